//! Settings form definitions.
//!
//! A small declarative form builder plus the two settings forms this
//! plugin exposes: the admin (plugin-wide) form and the per-field form.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::settings::{available_plugins, FieldSettings, PluginSet, PluginSettings, EDITOR_PLUGINS};

/// A complete form definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Form {
    /// Unique form identifier (e.g., "richtext_plugin_settings").
    pub form_id: String,

    /// Form action URL.
    pub action: String,

    /// HTTP method ("post" or "get").
    pub method: String,

    /// Form elements keyed by name.
    pub elements: BTreeMap<String, FormElement>,

    /// Optional form title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Optional form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Form {
    /// Create a new form with the given ID.
    pub fn new(form_id: impl Into<String>) -> Self {
        Self {
            form_id: form_id.into(),
            action: String::new(),
            method: "post".to_string(),
            elements: BTreeMap::new(),
            title: None,
            description: None,
        }
    }

    /// Set the form action URL.
    pub fn action(mut self, action: impl Into<String>) -> Self {
        self.action = action.into();
        self
    }

    /// Set the form title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Add an element to the form.
    pub fn element(mut self, name: impl Into<String>, element: FormElement) -> Self {
        self.elements.insert(name.into(), element);
        self
    }

    /// Get elements sorted by weight.
    pub fn sorted_elements(&self) -> Vec<(&String, &FormElement)> {
        let mut elements: Vec<_> = self.elements.iter().collect();
        elements.sort_by_key(|(_, el)| el.weight);
        elements
    }
}

/// A form element definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormElement {
    /// Element type with type-specific configuration.
    #[serde(flatten)]
    pub element_type: ElementType,

    /// Element title/label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Element description/help text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Default value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,

    /// Whether this field is required.
    #[serde(default)]
    pub required: bool,

    /// Sort weight (lower = appears first).
    #[serde(default)]
    pub weight: i32,

    /// Placeholder text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

impl FormElement {
    /// Create a textfield element.
    pub fn textfield() -> Self {
        Self::new(ElementType::Textfield { max_length: None })
    }

    /// Create a textarea element.
    pub fn textarea(rows: u32) -> Self {
        Self::new(ElementType::Textarea { rows })
    }

    /// Create a select element.
    pub fn select(options: Vec<(String, String)>) -> Self {
        Self::new(ElementType::Select { options })
    }

    /// Create a checkboxes group.
    pub fn checkboxes(options: Vec<(String, String)>) -> Self {
        Self::new(ElementType::Checkboxes { options })
    }

    /// Create a submit button.
    pub fn submit(value: impl Into<String>) -> Self {
        Self::new(ElementType::Submit {
            value: value.into(),
        })
    }

    /// Create a markup element (display-only HTML).
    pub fn markup(value: impl Into<String>) -> Self {
        Self::new(ElementType::Markup {
            value: value.into(),
        })
    }

    fn new(element_type: ElementType) -> Self {
        Self {
            element_type,
            title: None,
            description: None,
            default_value: None,
            required: false,
            weight: 0,
            placeholder: None,
        }
    }

    /// Set the element title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the element description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the default value.
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Mark as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set the weight.
    pub fn weight(mut self, weight: i32) -> Self {
        self.weight = weight;
        self
    }

    /// Set placeholder text.
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }
}

/// Element type variants with type-specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ElementType {
    /// Single-line text input.
    Textfield {
        #[serde(skip_serializing_if = "Option::is_none")]
        max_length: Option<usize>,
    },

    /// Multi-line text input.
    Textarea { rows: u32 },

    /// Dropdown select.
    Select { options: Vec<(String, String)> },

    /// Multiple checkboxes.
    Checkboxes { options: Vec<(String, String)> },

    /// Submit button.
    Submit { value: String },

    /// Display-only markup.
    Markup { value: String },
}

/// Build the plugin-wide settings form.
pub fn plugin_settings_form(settings: &PluginSettings) -> Form {
    Form::new("richtext_plugin_settings")
        .title("Rich Text Editor")
        .element(
            "license_key",
            FormElement::textfield()
                .title("License Key")
                .description("Editor license key, passed to the client on every render.")
                .default_value(settings.license_key.clone())
                .weight(0),
        )
        .element(
            "custom_css_type",
            FormElement::textfield()
                .title("Custom CSS Type")
                .description("Resource type of the custom CSS file. Leave empty for a site-relative path.")
                .default_value(settings.custom_css_type.clone().unwrap_or_default())
                .weight(10),
        )
        .element(
            "custom_css_file",
            FormElement::textfield()
                .title("Custom CSS File")
                .default_value(settings.custom_css_file.clone().unwrap_or_default())
                .weight(20),
        )
        .element(
            "custom_css_classes",
            FormElement::textarea(6)
                .title("Paragraph Styles")
                .description("One style per line, as \"class: Display Name\".")
                .default_value(settings.custom_css_classes.clone().unwrap_or_default())
                .weight(30),
        )
        .element(
            "enabled_plugins",
            FormElement::checkboxes(
                EDITOR_PLUGINS
                    .iter()
                    .map(|(name, label)| (name.to_string(), label.to_string()))
                    .collect(),
            )
            .title("Enabled Plugins")
            .description("Editor sub-plugins enabled site-wide. Leave all unchecked for everything.")
            .default_value(plugin_set_value(Some(&settings.enabled_plugins)))
            .weight(40),
        )
        .element("submit", FormElement::submit("Save").weight(100))
}

/// Build the per-field settings form.
///
/// `source_options` are the asset sources the host offers, as
/// `(id, label)` pairs.
pub fn field_settings_form(
    settings: &FieldSettings,
    plugin_settings: &PluginSettings,
    source_options: &[(String, String)],
) -> Form {
    let sources: Vec<(String, String)> = source_options.to_vec();

    Form::new("richtext_field_settings")
        .element(
            "assets_images_source",
            FormElement::select(sources.clone())
                .title("Images Source")
                .description("Asset source for images inserted through this field.")
                .default_value(
                    settings
                        .assets_images_source
                        .map(|id| id.to_string())
                        .unwrap_or_default(),
                )
                .weight(0),
        )
        .element(
            "assets_images_sub_path",
            FormElement::textfield()
                .title("Images Sub-path")
                .description("Folder path under the source root. May contain tokens like {id}.")
                .default_value(settings.assets_images_sub_path.clone().unwrap_or_default())
                .weight(10),
        )
        .element(
            "assets_files_source",
            FormElement::select(sources)
                .title("Files Source")
                .description("Asset source for files inserted through this field.")
                .default_value(
                    settings
                        .assets_files_source
                        .map(|id| id.to_string())
                        .unwrap_or_default(),
                )
                .weight(20),
        )
        .element(
            "assets_files_sub_path",
            FormElement::textfield()
                .title("Files Sub-path")
                .default_value(settings.assets_files_sub_path.clone().unwrap_or_default())
                .weight(30),
        )
        .element(
            "custom_css_type",
            FormElement::textfield()
                .title("Custom CSS Type")
                .default_value(settings.custom_css_type.clone().unwrap_or_default())
                .weight(40),
        )
        .element(
            "custom_css_file",
            FormElement::textfield()
                .title("Custom CSS File")
                .description("Overrides the plugin-wide custom CSS file for this field.")
                .default_value(settings.custom_css_file.clone().unwrap_or_default())
                .placeholder(plugin_settings.custom_css_file.clone().unwrap_or_default())
                .weight(50),
        )
        .element(
            "custom_css_classes",
            FormElement::textarea(6)
                .title("Paragraph Styles")
                .default_value(settings.custom_css_classes.clone().unwrap_or_default())
                .placeholder(plugin_settings.custom_css_classes.clone().unwrap_or_default())
                .weight(60),
        )
        .element(
            "enabled_plugins",
            FormElement::checkboxes(
                available_plugins(plugin_settings)
                    .into_iter()
                    .map(|(name, label)| (name.to_string(), label.to_string()))
                    .collect(),
            )
            .title("Enabled Plugins")
            .description("Overrides the plugin-wide selection for this field.")
            .default_value(plugin_set_value(settings.enabled_plugins.as_ref()))
            .weight(70),
        )
}

/// Serialize a plugin set as a form default value.
fn plugin_set_value(set: Option<&PluginSet>) -> Value {
    match set {
        Some(set) => serde_json::to_value(set).unwrap_or(Value::Null),
        None => Value::Null,
    }
}

#[cfg(test)]
// Tests are allowed to use unwrap/expect freely.
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_form_builder() {
        let form = Form::new("test_form")
            .title("Test Form")
            .action("/submit")
            .element("name", FormElement::textfield().title("Name").required())
            .element("submit", FormElement::submit("Save").weight(100));

        assert_eq!(form.form_id, "test_form");
        assert_eq!(form.action, "/submit");
        assert_eq!(form.elements.len(), 2);
        assert!(form.elements.get("name").unwrap().required);
    }

    #[test]
    fn test_form_sorted_elements() {
        let form = Form::new("test")
            .element("c", FormElement::textfield().weight(30))
            .element("a", FormElement::textfield().weight(10))
            .element("b", FormElement::textfield().weight(20));

        let sorted = form.sorted_elements();
        assert_eq!(sorted[0].0, "a");
        assert_eq!(sorted[1].0, "b");
        assert_eq!(sorted[2].0, "c");
    }

    #[test]
    fn test_plugin_settings_form_covers_all_options() {
        let form = plugin_settings_form(&PluginSettings::default());
        for name in [
            "license_key",
            "custom_css_type",
            "custom_css_file",
            "custom_css_classes",
            "enabled_plugins",
        ] {
            assert!(form.elements.contains_key(name), "missing element: {name}");
        }
    }

    #[test]
    fn test_field_settings_form_covers_all_options() {
        let sources = vec![("1".to_string(), "Local".to_string())];
        let form = field_settings_form(
            &FieldSettings::default(),
            &PluginSettings::default(),
            &sources,
        );
        for name in [
            "assets_images_source",
            "assets_images_sub_path",
            "assets_files_source",
            "assets_files_sub_path",
            "custom_css_type",
            "custom_css_file",
            "custom_css_classes",
            "enabled_plugins",
        ] {
            assert!(form.elements.contains_key(name), "missing element: {name}");
        }
    }

    #[test]
    fn test_field_settings_form_offers_only_available_plugins() {
        let plugin = PluginSettings {
            enabled_plugins: crate::settings::PluginSet::List(vec!["link".to_string()]),
            ..Default::default()
        };
        let form = field_settings_form(&FieldSettings::default(), &plugin, &[]);

        let element = form.elements.get("enabled_plugins").unwrap();
        let ElementType::Checkboxes { options } = &element.element_type else {
            panic!("enabled_plugins should be checkboxes");
        };
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].0, "link");
    }

    #[test]
    fn test_form_serialization() {
        let form = plugin_settings_form(&PluginSettings::default());
        let json = serde_json::to_string(&form).unwrap();
        assert!(json.contains("richtext_plugin_settings"));

        let parsed: Form = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.form_id, "richtext_plugin_settings");
    }
}
