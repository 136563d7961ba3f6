//! Asset folder model types.
//!
//! Folders are owned by the external asset store; this crate only reads
//! them and requests creation of missing segments.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Asset source identifier.
pub type SourceId = Uuid;

/// Asset folder identifier.
pub type FolderId = Uuid;

/// A folder in the asset storage hierarchy.
///
/// `path` is relative to the source root and carries a trailing slash;
/// the root folder itself has an empty path and no parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetFolder {
    pub id: FolderId,
    pub parent_id: Option<FolderId>,
    pub source_id: SourceId,
    pub name: String,
    pub path: String,
}

/// Search criteria for folder lookup. All present fields must match.
#[derive(Debug, Clone, Default)]
pub struct FolderCriteria {
    pub source_id: Option<SourceId>,
    pub parent_id: Option<FolderId>,
    pub name: Option<String>,
    pub path: Option<String>,
}

impl FolderCriteria {
    /// Create empty criteria.
    pub fn new() -> Self {
        Self::default()
    }

    /// Match folders in the given source.
    pub fn source(mut self, source_id: SourceId) -> Self {
        self.source_id = Some(source_id);
        self
    }

    /// Match folders with the given parent.
    pub fn parent(mut self, parent_id: FolderId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// Match folders with the given name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Match folders at the given path.
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Whether the given folder satisfies these criteria.
    pub fn matches(&self, folder: &AssetFolder) -> bool {
        if let Some(source_id) = self.source_id {
            if folder.source_id != source_id {
                return false;
            }
        }
        if let Some(parent_id) = self.parent_id {
            if folder.parent_id != Some(parent_id) {
                return false;
            }
        }
        if let Some(name) = &self.name {
            if &folder.name != name {
                return false;
            }
        }
        if let Some(path) = &self.path {
            if &folder.path != path {
                return false;
            }
        }
        true
    }
}

/// Outcome of a folder creation request against the asset store.
///
/// A conflict means the folder already exists on the physical backend but
/// is not recorded yet; callers reconcile rather than fail.
#[derive(Debug, Clone, Default)]
pub struct CreateFolderResponse {
    pub folder_id: Option<FolderId>,
    pub is_error: bool,
    pub is_conflict: bool,
}

impl CreateFolderResponse {
    /// A successful creation.
    pub fn created(folder_id: FolderId) -> Self {
        Self {
            folder_id: Some(folder_id),
            is_error: false,
            is_conflict: false,
        }
    }

    /// The folder already exists on the backend.
    pub fn conflict() -> Self {
        Self {
            folder_id: None,
            is_error: false,
            is_conflict: true,
        }
    }

    /// The creation failed.
    pub fn error() -> Self {
        Self {
            folder_id: None,
            is_error: true,
            is_conflict: false,
        }
    }
}
