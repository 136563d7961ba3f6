//! Upload folder resolution.
//!
//! Resolves a configured asset source plus an optional templated sub-path
//! to the concrete folder that uploads for a field should land in,
//! creating missing folder segments on demand. When the sub-path cannot
//! be resolved for a not-yet-persisted element (the common case is a
//! template referencing `{id}`), resolution falls back to a fixed-name
//! subfolder of the user's personal upload folder.

use std::sync::Arc;

use anyhow::{anyhow, Context};
use tracing::debug;
use uuid::Uuid;

use super::folder::{AssetFolder, FolderCriteria, FolderId, SourceId};
use super::store::AssetStore;
use crate::config::EditorConfig;
use crate::element::{ContentElement, User};
use crate::error::{FieldError, FieldResult};
use crate::settings::FieldSettings;
use crate::template::ObjectTemplates;

/// Resolved upload folder handles for a field render, in the host's
/// `folder:<id>:single` wire format. A slot is `None` when no source is
/// configured for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFolders {
    pub images: Option<String>,
    pub files: Option<String>,
}

/// Resolves upload folders against the asset store.
pub struct UploadFolderResolver {
    store: Arc<dyn AssetStore>,
    templates: Arc<dyn ObjectTemplates>,
    config: EditorConfig,
}

impl UploadFolderResolver {
    /// Create a new resolver.
    pub fn new(
        store: Arc<dyn AssetStore>,
        templates: Arc<dyn ObjectTemplates>,
        config: EditorConfig,
    ) -> Self {
        Self {
            store,
            templates,
            config,
        }
    }

    /// Resolve both upload slots for a field.
    pub async fn resolve_upload_folders(
        &self,
        settings: &FieldSettings,
        element: &ContentElement,
        user: &User,
        field_handle: &str,
    ) -> FieldResult<UploadFolders> {
        let images = match settings.assets_images_source {
            Some(source_id) => {
                let folder_id = self
                    .determine_upload_folder(
                        source_id,
                        settings.assets_images_sub_path.as_deref(),
                        element,
                        user,
                        field_handle,
                        true,
                    )
                    .await?;
                Some(folder_handle(folder_id))
            }
            None => None,
        };

        let files = match settings.assets_files_source {
            Some(source_id) => {
                let folder_id = self
                    .determine_upload_folder(
                        source_id,
                        settings.assets_files_sub_path.as_deref(),
                        element,
                        user,
                        field_handle,
                        true,
                    )
                    .await?;
                Some(folder_handle(folder_id))
            }
            None => None,
        };

        Ok(UploadFolders { images, files })
    }

    /// Resolve one source/sub-path pair to a folder, with the fallback to
    /// the user's personal upload folder.
    ///
    /// The fallback only applies when dynamic folder creation is enabled
    /// and the element is unpersisted; an unresolvable sub-path on a saved
    /// element is a genuine misconfiguration and propagates.
    pub async fn determine_upload_folder(
        &self,
        source_id: SourceId,
        sub_path: Option<&str>,
        element: &ContentElement,
        user: &User,
        field_handle: &str,
        create_dynamic_folders: bool,
    ) -> FieldResult<FolderId> {
        match self
            .resolve_source_path(source_id, sub_path, element, create_dynamic_folders)
            .await
        {
            Ok(folder_id) => Ok(folder_id),
            Err(FieldError::InvalidSubpath(sub_path)) => {
                if !create_dynamic_folders || element.is_persisted() {
                    return Err(FieldError::InvalidSubpath(sub_path));
                }

                // A new element: the sub-path most likely contained a token
                // that is not available yet, like {id}. Use a field-specific
                // folder under the user's upload folder instead.
                debug!(
                    sub_path = %sub_path,
                    field = %field_handle,
                    "sub-path unresolvable for unsaved element, using user folder"
                );
                self.user_fallback_folder(user, field_handle).await
            }
            Err(other) => Err(other),
        }
    }

    /// Resolve the source root plus rendered sub-path to a folder id.
    async fn resolve_source_path(
        &self,
        source_id: SourceId,
        sub_path: Option<&str>,
        element: &ContentElement,
        create_dynamic_folders: bool,
    ) -> FieldResult<FolderId> {
        let root = self
            .store
            .root_folder(source_id)
            .await?
            .ok_or(FieldError::InvalidSource(source_id))?;

        let sub_path = sub_path.unwrap_or("").trim().trim_matches('/');
        if sub_path.is_empty() {
            return Ok(root.id);
        }

        let rendered = self
            .templates
            .render_object_template(sub_path, element)?;

        // A token that resolved to nothing leaves an empty path, a
        // leading/trailing slash, or a collapsed empty segment.
        if rendered.is_empty()
            || rendered.trim_matches('/') != rendered
            || rendered.contains("//")
        {
            return Err(FieldError::InvalidSubpath(sub_path.to_string()));
        }

        let cleaned = clean_path(&rendered, self.config.convert_filenames_to_ascii);

        let existing = self
            .store
            .find_folder(
                &FolderCriteria::new()
                    .source(source_id)
                    .path(format!("{cleaned}/")),
            )
            .await?;
        if let Some(folder) = existing {
            return Ok(folder.id);
        }

        if !create_dynamic_folders {
            return Err(FieldError::InvalidSubpath(cleaned));
        }

        // Walk from the root, creating each missing segment under its
        // immediate parent.
        let mut parent = root;
        for segment in cleaned.split('/') {
            let found = self
                .store
                .find_folder(&FolderCriteria::new().parent(parent.id).name(segment))
                .await?;

            parent = match found {
                Some(folder) => folder,
                None => {
                    let folder_id = self.create_subfolder(&parent, segment).await?;
                    self.store
                        .folder_by_id(folder_id)
                        .await?
                        .ok_or_else(|| anyhow!("created folder {folder_id} not found"))?
                }
            };
        }

        Ok(parent.id)
    }

    /// Create a subfolder, reconciling error/conflict responses.
    ///
    /// A conflict means the directory exists on the physical backend but
    /// is not recorded yet; the expected record is constructed locally and
    /// stored instead of failing.
    async fn create_subfolder(&self, parent: &AssetFolder, name: &str) -> FieldResult<FolderId> {
        let response = self.store.create_folder(parent.id, name).await?;

        if response.is_error || response.is_conflict {
            let path = if parent.parent_id.is_some() {
                format!("{}{}/", parent.path, name)
            } else {
                format!("{name}/")
            };
            debug!(
                parent = %parent.id,
                name = %name,
                path = %path,
                "folder creation conflicted, storing expected record"
            );

            let folder = AssetFolder {
                id: Uuid::now_v7(),
                parent_id: Some(parent.id),
                source_id: parent.source_id,
                name: name.to_string(),
                path,
            };
            let folder_id = self.store.store_folder(folder).await?;
            return Ok(folder_id);
        }

        response
            .folder_id
            .ok_or_else(|| FieldError::Internal(anyhow!("folder creation returned no id")))
    }

    /// The fallback folder: `field_<handle>` under the user's personal
    /// upload folder, created on first use, with a matching temporary
    /// filesystem directory.
    async fn user_fallback_folder(&self, user: &User, field_handle: &str) -> FieldResult<FolderId> {
        let user_folder = self.store.user_upload_folder(user).await?;
        let folder_name = format!("field_{field_handle}");

        let existing = self
            .store
            .find_folder(
                &FolderCriteria::new()
                    .parent(user_folder.id)
                    .name(folder_name.clone()),
            )
            .await?;

        let folder_id = match existing {
            Some(folder) => folder.id,
            None => self.create_subfolder(&user_folder, &folder_name).await?,
        };

        let temp_dir = self.config.temp_uploads_dir.join(&folder_name);
        tokio::fs::create_dir_all(&temp_dir)
            .await
            .with_context(|| format!("failed to create temp upload dir {}", temp_dir.display()))?;

        Ok(folder_id)
    }
}

impl std::fmt::Debug for UploadFolderResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadFolderResolver")
            .field("config", &self.config)
            .finish()
    }
}

/// Format a folder id in the host's folder handle syntax.
fn folder_handle(folder_id: FolderId) -> String {
    format!("folder:{folder_id}:single")
}

/// Normalize separators and, when configured, transliterate to ASCII.
fn clean_path(path: &str, to_ascii: bool) -> String {
    let normalized = path.replace('\\', "/");
    if !to_ascii {
        return normalized;
    }
    normalized
        .split('/')
        .map(transliterate)
        .collect::<Vec<_>>()
        .join("/")
}

/// Fold a segment to ASCII: common diacritics map to their base letters,
/// other non-ASCII characters are dropped.
fn transliterate(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for c in segment.chars() {
        match c {
            'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => out.push('a'),
            'À' | 'Á' | 'Â' | 'Ã' | 'Ä' | 'Å' => out.push('A'),
            'è' | 'é' | 'ê' | 'ë' => out.push('e'),
            'È' | 'É' | 'Ê' | 'Ë' => out.push('E'),
            'ì' | 'í' | 'î' | 'ï' => out.push('i'),
            'Ì' | 'Í' | 'Î' | 'Ï' => out.push('I'),
            'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' => out.push('o'),
            'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' | 'Ø' => out.push('O'),
            'ù' | 'ú' | 'û' | 'ü' => out.push('u'),
            'Ù' | 'Ú' | 'Û' | 'Ü' => out.push('U'),
            'ý' | 'ÿ' => out.push('y'),
            'ç' => out.push('c'),
            'Ç' => out.push('C'),
            'ñ' => out.push('n'),
            'Ñ' => out.push('N'),
            'ß' => out.push_str("ss"),
            'æ' => out.push_str("ae"),
            'Æ' => out.push_str("AE"),
            c if c.is_ascii() => out.push(c),
            _ => {}
        }
    }
    out
}

#[cfg(test)]
// Tests are allowed to use unwrap/expect freely.
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_path_separators() {
        assert_eq!(clean_path("news\\2026", false), "news/2026");
        assert_eq!(clean_path("news/2026", false), "news/2026");
    }

    #[test]
    fn test_clean_path_ascii_off_keeps_unicode() {
        assert_eq!(clean_path("café/naïve", false), "café/naïve");
    }

    #[test]
    fn test_clean_path_ascii_folds_diacritics() {
        assert_eq!(clean_path("café/naïve", true), "cafe/naive");
        assert_eq!(clean_path("straße", true), "strasse");
    }

    #[test]
    fn test_transliterate_drops_unknown() {
        assert_eq!(transliterate("news☃2026"), "news2026");
    }

    #[test]
    fn test_folder_handle_format() {
        let id = Uuid::now_v7();
        assert_eq!(folder_handle(id), format!("folder:{id}:single"));
    }
}
