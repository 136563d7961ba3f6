//! Asset folder model, store collaborator, and upload folder resolution.

pub mod folder;
pub mod resolver;
pub mod store;

pub use folder::{AssetFolder, CreateFolderResponse, FolderCriteria, FolderId, SourceId};
pub use resolver::{UploadFolderResolver, UploadFolders};
pub use store::{AssetStore, MemoryAssetStore};
