//! Asset store collaborator.
//!
//! The store owns the folder hierarchy; this crate reads folders and
//! requests creation of missing ones. [`MemoryAssetStore`] is an
//! in-memory reference implementation used in tests and demos.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Result;
use async_trait::async_trait;
use parking_lot::RwLock;
use uuid::Uuid;

use super::folder::{AssetFolder, CreateFolderResponse, FolderCriteria, FolderId, SourceId};
use crate::element::User;

/// Asset storage collaborator.
///
/// Folder creation is assumed to be serialized by the implementation;
/// concurrent creation of the same path surfaces as a conflict response,
/// never as a duplicate record.
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// The root folder of a source, or `None` when the source is
    /// misconfigured or deleted.
    async fn root_folder(&self, source_id: SourceId) -> Result<Option<AssetFolder>>;

    /// Find the first folder matching the criteria.
    async fn find_folder(&self, criteria: &FolderCriteria) -> Result<Option<AssetFolder>>;

    /// Fetch a folder by identifier.
    async fn folder_by_id(&self, id: FolderId) -> Result<Option<AssetFolder>>;

    /// Request creation of a subfolder under `parent_id`.
    async fn create_folder(&self, parent_id: FolderId, name: &str) -> Result<CreateFolderResponse>;

    /// Record a folder that already exists on the physical backend.
    /// Returns the stored folder's identifier.
    async fn store_folder(&self, folder: AssetFolder) -> Result<FolderId>;

    /// The user's personal upload folder, created on first use.
    async fn user_upload_folder(&self, user: &User) -> Result<AssetFolder>;
}

struct MemoryStoreInner {
    folders: Vec<AssetFolder>,
    roots: HashMap<SourceId, FolderId>,
    user_folders: HashMap<Uuid, FolderId>,
    /// Source hosting per-user upload folders.
    user_source: Option<SourceId>,
}

/// In-memory asset store.
pub struct MemoryAssetStore {
    inner: RwLock<MemoryStoreInner>,
    /// When set, creation requests report a conflict without recording the
    /// folder, simulating a backend that already has the directory.
    conflict_on_create: AtomicBool,
}

impl MemoryAssetStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(MemoryStoreInner {
                folders: Vec::new(),
                roots: HashMap::new(),
                user_folders: HashMap::new(),
                user_source: None,
            }),
            conflict_on_create: AtomicBool::new(false),
        }
    }

    /// Register a new source with an empty root folder and return its id.
    /// The first source registered also hosts per-user upload folders.
    pub fn add_source(&self) -> SourceId {
        let source_id = Uuid::now_v7();
        let root = AssetFolder {
            id: Uuid::now_v7(),
            parent_id: None,
            source_id,
            name: String::new(),
            path: String::new(),
        };

        let mut inner = self.inner.write();
        inner.roots.insert(source_id, root.id);
        inner.folders.push(root);
        if inner.user_source.is_none() {
            inner.user_source = Some(source_id);
        }
        source_id
    }

    /// Toggle conflict responses for subsequent creation requests.
    pub fn set_create_conflict(&self, conflict: bool) {
        self.conflict_on_create.store(conflict, Ordering::SeqCst);
    }

    /// Snapshot of all recorded folders.
    pub fn folders(&self) -> Vec<AssetFolder> {
        self.inner.read().folders.clone()
    }

    fn child_path(parent: &AssetFolder, name: &str) -> String {
        format!("{}{}/", parent.path, name)
    }
}

impl Default for MemoryAssetStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AssetStore for MemoryAssetStore {
    async fn root_folder(&self, source_id: SourceId) -> Result<Option<AssetFolder>> {
        let inner = self.inner.read();
        let Some(root_id) = inner.roots.get(&source_id) else {
            return Ok(None);
        };
        Ok(inner.folders.iter().find(|f| f.id == *root_id).cloned())
    }

    async fn find_folder(&self, criteria: &FolderCriteria) -> Result<Option<AssetFolder>> {
        let inner = self.inner.read();
        Ok(inner.folders.iter().find(|f| criteria.matches(f)).cloned())
    }

    async fn folder_by_id(&self, id: FolderId) -> Result<Option<AssetFolder>> {
        let inner = self.inner.read();
        Ok(inner.folders.iter().find(|f| f.id == id).cloned())
    }

    async fn create_folder(&self, parent_id: FolderId, name: &str) -> Result<CreateFolderResponse> {
        if self.conflict_on_create.load(Ordering::SeqCst) {
            return Ok(CreateFolderResponse::conflict());
        }

        let mut inner = self.inner.write();
        let Some(parent) = inner.folders.iter().find(|f| f.id == parent_id).cloned() else {
            return Ok(CreateFolderResponse::error());
        };

        let exists = inner
            .folders
            .iter()
            .any(|f| f.parent_id == Some(parent_id) && f.name == name);
        if exists {
            return Ok(CreateFolderResponse::conflict());
        }

        let folder = AssetFolder {
            id: Uuid::now_v7(),
            parent_id: Some(parent_id),
            source_id: parent.source_id,
            name: name.to_string(),
            path: Self::child_path(&parent, name),
        };
        let id = folder.id;
        inner.folders.push(folder);

        Ok(CreateFolderResponse::created(id))
    }

    async fn store_folder(&self, folder: AssetFolder) -> Result<FolderId> {
        let id = folder.id;
        self.inner.write().folders.push(folder);
        Ok(id)
    }

    async fn user_upload_folder(&self, user: &User) -> Result<AssetFolder> {
        let mut inner = self.inner.write();

        if let Some(folder_id) = inner.user_folders.get(&user.id) {
            if let Some(folder) = inner.folders.iter().find(|f| f.id == *folder_id) {
                return Ok(folder.clone());
            }
        }

        let source_id = match inner.user_source {
            Some(source_id) => source_id,
            None => anyhow::bail!("no source registered for user upload folders"),
        };
        let root_id = match inner.roots.get(&source_id) {
            Some(root_id) => *root_id,
            None => anyhow::bail!("user folder source {source_id} has no root"),
        };

        let name = format!("user_{}", user.id.simple());
        let folder = AssetFolder {
            id: Uuid::now_v7(),
            parent_id: Some(root_id),
            source_id,
            name: name.clone(),
            path: format!("{name}/"),
        };
        inner.user_folders.insert(user.id, folder.id);
        inner.folders.push(folder.clone());

        Ok(folder)
    }
}

impl std::fmt::Debug for MemoryAssetStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryAssetStore")
            .field("folders", &self.inner.read().folders.len())
            .finish()
    }
}

#[cfg(test)]
// Tests are allowed to use unwrap/expect freely.
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_add_source_creates_root() {
        let store = MemoryAssetStore::new();
        let source_id = store.add_source();

        let root = store.root_folder(source_id).await.unwrap().unwrap();
        assert_eq!(root.path, "");
        assert!(root.parent_id.is_none());
    }

    #[tokio::test]
    async fn test_unknown_source_has_no_root() {
        let store = MemoryAssetStore::new();
        assert!(store.root_folder(Uuid::now_v7()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_folder_records_path() {
        let store = MemoryAssetStore::new();
        let source_id = store.add_source();
        let root = store.root_folder(source_id).await.unwrap().unwrap();

        let response = store.create_folder(root.id, "news").await.unwrap();
        let id = response.folder_id.unwrap();

        let folder = store.folder_by_id(id).await.unwrap().unwrap();
        assert_eq!(folder.path, "news/");
        assert_eq!(folder.parent_id, Some(root.id));
    }

    #[tokio::test]
    async fn test_create_existing_folder_conflicts() {
        let store = MemoryAssetStore::new();
        let source_id = store.add_source();
        let root = store.root_folder(source_id).await.unwrap().unwrap();

        store.create_folder(root.id, "news").await.unwrap();
        let response = store.create_folder(root.id, "news").await.unwrap();
        assert!(response.is_conflict);
        assert!(response.folder_id.is_none());
    }

    #[tokio::test]
    async fn test_user_upload_folder_created_once() {
        let store = MemoryAssetStore::new();
        store.add_source();
        let user = User::new("editor");

        let first = store.user_upload_folder(&user).await.unwrap();
        let second = store.user_upload_folder(&user).await.unwrap();
        assert_eq!(first.id, second.id);
        assert!(first.name.starts_with("user_"));
    }
}
