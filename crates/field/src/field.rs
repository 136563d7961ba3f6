//! The rich text field type.
//!
//! [`RichTextField`] is the configuration-driven value type the host
//! registers: it renders the editor input for a content form and resolves
//! where uploads for the field should land. Collaborators arrive through
//! the constructor; there is no ambient global lookup.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::assets::{UploadFolderResolver, UploadFolders};
use crate::config::EditorConfig;
use crate::element::{ContentElement, User};
use crate::error::FieldResult;
use crate::form::{field_settings_form, Form};
use crate::render::{
    editor_assets, format_input_id, html_escape, init_script, namespace_input_id,
    transforms_script, EditorAssets, ImageTransform,
};
use crate::settings::{
    custom_css, effective_plugins, paragraph_styles, FieldSettings, PluginSettings,
};

/// Stored rich text content.
///
/// The wrapper marks the HTML as already filtered, so templates can print
/// it without re-escaping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RichTextValue(String);

impl RichTextValue {
    /// Wrap a stored value. Empty input has no value.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        if value.is_empty() {
            None
        } else {
            Some(Self(value))
        }
    }

    /// The raw HTML.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RichTextValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The content-table column a field stores into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentAttribute {
    /// Unbounded text column.
    Text,
    /// Bounded string column.
    String { max_length: usize },
}

/// Everything a single field render needs from the host.
#[derive(Debug)]
pub struct RenderContext<'a> {
    /// Raw input name (e.g. `fields[body]`).
    pub input_name: &'a str,
    /// Form namespace the host will wrap the output in.
    pub namespace: Option<&'a str>,
    /// Current field value.
    pub value: Option<&'a RichTextValue>,
    /// The element being edited.
    pub element: &'a ContentElement,
    /// The editing user, owner of the fallback upload folder.
    pub user: &'a User,
    /// Image transforms offered in the insertion modal.
    pub transforms: &'a [ImageTransform],
}

/// Output of a field render: the HTML fragment plus the assets and
/// scripts the host must include with it.
#[derive(Debug, Clone)]
pub struct RenderedField {
    pub html: String,
    pub assets: EditorAssets,
    pub scripts: Vec<String>,
}

/// A field type pluggable into content-editing forms.
#[async_trait]
pub trait FieldType: Send + Sync {
    /// Human-readable field type name.
    fn name(&self) -> &str;

    /// The content column this field stores into.
    fn content_attribute(&self) -> ContentAttribute;

    /// The per-field settings form.
    fn settings_form(&self, source_options: &[(String, String)]) -> Form;

    /// Render the field input for a content form.
    async fn render(&self, ctx: &RenderContext<'_>) -> FieldResult<RenderedField>;

    /// Resolve the upload folders for this field.
    async fn resolve_upload_folders(&self, ctx: &RenderContext<'_>) -> FieldResult<UploadFolders>;
}

/// The rich text (WYSIWYG) editor field type.
pub struct RichTextField {
    handle: String,
    plugin_settings: Arc<PluginSettings>,
    settings: FieldSettings,
    resolver: Arc<UploadFolderResolver>,
    config: EditorConfig,
}

impl RichTextField {
    /// Create a field instance.
    pub fn new(
        handle: impl Into<String>,
        plugin_settings: Arc<PluginSettings>,
        settings: FieldSettings,
        resolver: Arc<UploadFolderResolver>,
        config: EditorConfig,
    ) -> Self {
        Self {
            handle: handle.into(),
            plugin_settings,
            settings,
            resolver,
            config,
        }
    }

    /// The field's machine handle.
    pub fn handle(&self) -> &str {
        &self.handle
    }

    /// The field's settings.
    pub fn settings(&self) -> &FieldSettings {
        &self.settings
    }
}

#[async_trait]
impl FieldType for RichTextField {
    fn name(&self) -> &str {
        "Rich Text (WYSIWYG Editor)"
    }

    fn content_attribute(&self) -> ContentAttribute {
        ContentAttribute::Text
    }

    fn settings_form(&self, source_options: &[(String, String)]) -> Form {
        field_settings_form(&self.settings, &self.plugin_settings, source_options)
    }

    async fn render(&self, ctx: &RenderContext<'_>) -> FieldResult<RenderedField> {
        let id = format_input_id(ctx.input_name);
        let namespaced_id = namespace_input_id(ctx.namespace, &id);

        let folders = self.resolve_upload_folders(ctx).await?;

        let enabled = effective_plugins(&self.plugin_settings, &self.settings);
        let styles = paragraph_styles(&self.plugin_settings, &self.settings);
        let css = custom_css(&self.plugin_settings, &self.settings);
        let assets = editor_assets(&self.config, css.as_ref());

        let mut scripts = Vec::new();
        if let Some(script) = transforms_script(ctx.transforms) {
            scripts.push(script);
        }
        scripts.push(init_script(
            &namespaced_id,
            &self.plugin_settings.license_key,
            &enabled,
            &styles,
        ));

        let value = ctx.value.map(RichTextValue::as_str).unwrap_or_default();
        let html = format!(
            "<div class=\"richtext-field\">\
             <textarea id=\"{id}\" name=\"{name}\"{images}{files}>{value}</textarea>\
             </div>",
            id = html_escape(&id),
            name = html_escape(ctx.input_name),
            images = data_attr("data-images-folder", folders.images.as_deref()),
            files = data_attr("data-files-folder", folders.files.as_deref()),
            value = html_escape(value),
        );

        debug!(field = %self.handle, id = %namespaced_id, "rich text field rendered");

        Ok(RenderedField {
            html,
            assets,
            scripts,
        })
    }

    async fn resolve_upload_folders(&self, ctx: &RenderContext<'_>) -> FieldResult<UploadFolders> {
        self.resolver
            .resolve_upload_folders(&self.settings, ctx.element, ctx.user, &self.handle)
            .await
    }
}

impl std::fmt::Debug for RichTextField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RichTextField")
            .field("handle", &self.handle)
            .finish()
    }
}

/// Render an optional data attribute.
fn data_attr(name: &str, value: Option<&str>) -> String {
    match value {
        Some(value) => format!(" {}=\"{}\"", name, html_escape(value)),
        None => String::new(),
    }
}
