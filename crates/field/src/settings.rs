//! Plugin-wide and per-field settings.
//!
//! The plugin carries global defaults (license key, custom CSS, enabled
//! editor sub-plugins); each field may override the CSS and sub-plugin
//! selection and configures where uploaded images and files are stored.

use serde::{Deserialize, Serialize};

use crate::assets::SourceId;

/// All editor sub-plugins bundled with the editor library, as
/// `(machine_name, label)` pairs. Machine names are stored in settings;
/// labels appear in the settings forms.
pub const EDITOR_PLUGINS: &[(&str, &str)] = &[
    ("align", "Align"),
    ("char_counter", "Char Counter"),
    ("code_beautifier", "Code Beautifier"),
    ("code_view", "Code View"),
    ("colors", "Colors"),
    ("draggable", "Draggable"),
    ("emoticons", "Emoticons"),
    ("entities", "Entities"),
    ("file", "File"),
    ("font_family", "Font Family"),
    ("font_size", "Font Size"),
    ("fullscreen", "Fullscreen"),
    ("image", "Image"),
    ("image_manager", "Image Manager"),
    ("inline_style", "Inline Style"),
    ("line_breaker", "Line Breaker"),
    ("link", "Link"),
    ("lists", "Lists"),
    ("paragraph_format", "Paragraph Format"),
    ("paragraph_style", "Paragraph Style"),
    ("quick_insert", "Quick Insert"),
    ("quote", "Quote"),
    ("save", "Save"),
    ("table", "Table"),
    ("url", "Url"),
    ("video", "Video"),
    ("word_paste", "Word Paste"),
];

/// The set of editor sub-plugins enabled for a render: either the literal
/// wildcard (serialized as `"*"`) or an explicit list of plugin names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "PluginSetRepr", into = "PluginSetRepr")]
pub enum PluginSet {
    /// Every available sub-plugin is enabled.
    #[default]
    All,
    /// Only the named sub-plugins are enabled.
    List(Vec<String>),
}

impl PluginSet {
    /// Whether this is the wildcard set.
    pub fn is_all(&self) -> bool {
        matches!(self, PluginSet::All)
    }

    /// Whether this is an explicit list with no entries.
    pub fn is_empty_list(&self) -> bool {
        matches!(self, PluginSet::List(list) if list.is_empty())
    }

    /// Whether the named capability is enabled. The wildcard enables
    /// everything; comparison against a list is done on normalized names.
    pub fn contains(&self, name: &str) -> bool {
        match self {
            PluginSet::All => true,
            PluginSet::List(list) => {
                let wanted = lower_camel(name);
                list.iter().any(|entry| lower_camel(entry) == wanted)
            }
        }
    }

    /// Normalize every entry to lowerCamelCase (`char_counter` becomes
    /// `charCounter`). The wildcard is returned unchanged.
    pub fn normalized(&self) -> PluginSet {
        match self {
            PluginSet::All => PluginSet::All,
            PluginSet::List(list) => {
                PluginSet::List(list.iter().map(|name| lower_camel(name)).collect())
            }
        }
    }
}

/// Serialized form: the wildcard is stored as the string `"*"`, a concrete
/// set as a JSON array. Any other string is treated as a one-element list.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum PluginSetRepr {
    Literal(String),
    List(Vec<String>),
}

impl From<PluginSetRepr> for PluginSet {
    fn from(repr: PluginSetRepr) -> Self {
        match repr {
            PluginSetRepr::Literal(s) if s == "*" => PluginSet::All,
            PluginSetRepr::Literal(s) => PluginSet::List(vec![s]),
            PluginSetRepr::List(list) => PluginSet::List(list),
        }
    }
}

impl From<PluginSet> for PluginSetRepr {
    fn from(set: PluginSet) -> Self {
        match set {
            PluginSet::All => PluginSetRepr::Literal("*".to_string()),
            PluginSet::List(list) => PluginSetRepr::List(list),
        }
    }
}

/// Join snake_case segments into a single lowerCamelCase token.
pub fn lower_camel(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for (i, segment) in name.split('_').filter(|s| !s.is_empty()).enumerate() {
        let mut chars = segment.chars();
        let Some(first) = chars.next() else {
            continue;
        };
        if i == 0 {
            out.extend(first.to_lowercase());
        } else {
            out.extend(first.to_uppercase());
        }
        out.push_str(chars.as_str());
    }
    out
}

/// Plugin-wide configuration, edited in the admin settings form and read
/// on every field render.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PluginSettings {
    /// Editor license key, passed through to the client.
    #[serde(default)]
    pub license_key: String,

    /// Where the custom CSS file lives: a resource type prefix, or empty
    /// for a site-relative path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_css_type: Option<String>,

    /// Custom CSS file to include in the editor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_css_file: Option<String>,

    /// Custom paragraph-style classes, one `class: Label` per line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_css_classes: Option<String>,

    /// Globally enabled editor sub-plugins.
    #[serde(default)]
    pub enabled_plugins: PluginSet,
}

/// Per-field configuration, persisted alongside the content-type schema.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FieldSettings {
    /// Asset source for inserted images.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assets_images_source: Option<SourceId>,

    /// Templated sub-path for inserted images.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assets_images_sub_path: Option<String>,

    /// Asset source for inserted files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assets_files_source: Option<SourceId>,

    /// Templated sub-path for inserted files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assets_files_sub_path: Option<String>,

    /// Per-field custom CSS resource type override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_css_type: Option<String>,

    /// Per-field custom CSS file override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_css_file: Option<String>,

    /// Per-field paragraph-style classes override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_css_classes: Option<String>,

    /// Per-field enabled sub-plugin override. When present and not the
    /// wildcard, it fully replaces the plugin-wide set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled_plugins: Option<PluginSet>,
}

/// Compute the effective enabled sub-plugin set for a render.
///
/// A present, non-wildcard, non-empty field override fully replaces the
/// plugin-wide set (no merge). The result is normalized to lowerCamelCase.
pub fn effective_plugins(plugin: &PluginSettings, field: &FieldSettings) -> PluginSet {
    let chosen = match &field.enabled_plugins {
        Some(set) if !set.is_all() && !set.is_empty_list() => set,
        _ => &plugin.enabled_plugins,
    };
    chosen.normalized()
}

/// A custom CSS include resolved from settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssInclude {
    /// Resource type prefix; `None` for a site-relative file.
    pub css_type: Option<String>,
    /// CSS file path.
    pub file: String,
}

impl CssInclude {
    /// Build the include URL. Typed includes resolve under the plugin
    /// resources URL; untyped ones are site-relative.
    pub fn href(&self, resources_url: &str) -> String {
        match &self.css_type {
            Some(css_type) if !css_type.is_empty() => format!(
                "{}/{}/{}",
                resources_url.trim_end_matches('/'),
                css_type,
                self.file
            ),
            _ => format!("/{}", self.file.trim_start_matches('/')),
        }
    }
}

/// Resolve the custom CSS include: the field-level file wins when set,
/// otherwise the plugin-wide file applies. The CSS type follows whichever
/// level supplied the file.
pub fn custom_css(plugin: &PluginSettings, field: &FieldSettings) -> Option<CssInclude> {
    let (css_type, file) = match &field.custom_css_file {
        Some(file) if !file.is_empty() => (field.custom_css_type.clone(), file.clone()),
        _ => match &plugin.custom_css_file {
            Some(file) if !file.is_empty() => (plugin.custom_css_type.clone(), file.clone()),
            _ => return None,
        },
    };
    Some(CssInclude { css_type, file })
}

/// Parse the custom paragraph styles for a render: the field-level classes
/// win when set, otherwise the plugin-wide classes apply.
///
/// Each non-empty line is either `class: Display Name` or a bare class
/// name, which maps to itself.
pub fn paragraph_styles(plugin: &PluginSettings, field: &FieldSettings) -> Vec<(String, String)> {
    let classes = match &field.custom_css_classes {
        Some(classes) if !classes.is_empty() => classes,
        _ => match &plugin.custom_css_classes {
            Some(classes) if !classes.is_empty() => classes,
            _ => return Vec::new(),
        },
    };

    classes
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            if line.is_empty() {
                return None;
            }
            match line.split_once(':') {
                Some((class, label)) => {
                    Some((class.trim().to_string(), label.trim().to_string()))
                }
                // Map to itself so the editor never sees a style without a label.
                None => Some((line.to_string(), line.to_string())),
            }
        })
        .collect()
}

/// The sub-plugin catalog offered in the field settings form, restricted
/// to what the plugin-wide settings enable.
pub fn available_plugins(plugin: &PluginSettings) -> Vec<(&'static str, &'static str)> {
    EDITOR_PLUGINS
        .iter()
        .filter(|(name, _)| plugin.enabled_plugins.contains(name))
        .copied()
        .collect()
}
