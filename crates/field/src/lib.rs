//! Rich text (WYSIWYG) editor field type.
//!
//! Embeds a bundled rich-text editor into content-editing forms: computes
//! the effective toolbar and sub-plugin set from plugin-wide and per-field
//! settings, emits the editor bootstrap markup, and resolves where
//! uploaded images and files land in the asset storage hierarchy,
//! creating missing folders on demand.

pub mod assets;
pub mod config;
pub mod element;
pub mod error;
pub mod field;
pub mod form;
pub mod render;
pub mod settings;
pub mod template;
pub mod toolbar;

pub use assets::{AssetStore, MemoryAssetStore, UploadFolderResolver, UploadFolders};
pub use config::EditorConfig;
pub use element::{ContentElement, User};
pub use error::{FieldError, FieldResult};
pub use field::{FieldType, RenderContext, RichTextField, RichTextValue};
pub use settings::{FieldSettings, PluginSet, PluginSettings};
pub use template::{ObjectTemplates, TeraTemplates};
