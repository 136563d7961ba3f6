#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Upload folder resolution tests.

use std::path::PathBuf;
use std::sync::Arc;

use richtext_field::assets::{FolderCriteria, MemoryAssetStore, UploadFolderResolver};
use richtext_field::{
    ContentElement, EditorConfig, FieldError, FieldSettings, TeraTemplates, User,
};
use uuid::Uuid;

fn test_config() -> EditorConfig {
    EditorConfig {
        temp_uploads_dir: std::env::temp_dir().join(format!("richtext-test-{}", Uuid::now_v7())),
        ..Default::default()
    }
}

fn resolver_with_store() -> (Arc<MemoryAssetStore>, UploadFolderResolver, PathBuf) {
    let store = Arc::new(MemoryAssetStore::new());
    let config = test_config();
    let temp_dir = config.temp_uploads_dir.clone();
    let resolver =
        UploadFolderResolver::new(store.clone(), Arc::new(TeraTemplates::new()), config);
    (store, resolver, temp_dir)
}

#[tokio::test]
async fn empty_sub_path_resolves_to_root() {
    let (store, resolver, _) = resolver_with_store();
    let source_id = store.add_source();
    let root = root_folder_id(&store, source_id).await;

    let element = ContentElement::new("article");
    let user = User::new("editor");

    for sub_path in [None, Some(""), Some("   "), Some("/"), Some(" // ")] {
        let folder_id = resolver
            .determine_upload_folder(source_id, sub_path, &element, &user, "body", true)
            .await
            .unwrap();
        assert_eq!(folder_id, root, "sub_path {sub_path:?} should hit the root");
    }
}

#[tokio::test]
async fn static_sub_path_creates_missing_segments() {
    let (store, resolver, _) = resolver_with_store();
    let source_id = store.add_source();

    let element = ContentElement::new("article").with_id(Uuid::now_v7());
    let user = User::new("editor");

    let folder_id = resolver
        .determine_upload_folder(source_id, Some("news/2026"), &element, &user, "body", true)
        .await
        .unwrap();

    let folders = store.folders();
    let leaf = folders.iter().find(|f| f.id == folder_id).unwrap();
    assert_eq!(leaf.path, "news/2026/");
    assert_eq!(leaf.name, "2026");

    let parent = folders.iter().find(|f| Some(f.id) == leaf.parent_id).unwrap();
    assert_eq!(parent.path, "news/");

    // Resolving again finds the existing folder instead of creating more.
    let again = resolver
        .determine_upload_folder(source_id, Some("news/2026"), &element, &user, "body", true)
        .await
        .unwrap();
    assert_eq!(again, folder_id);
    assert_eq!(store.folders().len(), folders.len());
}

#[tokio::test]
async fn tokenized_sub_path_renders_against_element() {
    let (store, resolver, _) = resolver_with_store();
    let source_id = store.add_source();

    let element = ContentElement::new("article")
        .with_id(Uuid::now_v7())
        .with_field("slug", "hello-world");
    let user = User::new("editor");

    let folder_id = resolver
        .determine_upload_folder(
            source_id,
            Some("posts/{slug}"),
            &element,
            &user,
            "body",
            true,
        )
        .await
        .unwrap();

    let folders = store.folders();
    let leaf = folders.iter().find(|f| f.id == folder_id).unwrap();
    assert_eq!(leaf.path, "posts/hello-world/");
}

#[tokio::test]
async fn collapsed_segment_is_invalid_for_persisted_element() {
    let (store, resolver, _) = resolver_with_store();
    let source_id = store.add_source();

    // slug renders empty, producing "a//b".
    let element = ContentElement::new("article")
        .with_id(Uuid::now_v7())
        .with_field("slug", "");
    let user = User::new("editor");

    let result = resolver
        .determine_upload_folder(source_id, Some("a/{slug}/b"), &element, &user, "body", true)
        .await;
    assert!(matches!(result, Err(FieldError::InvalidSubpath(_))));
}

#[tokio::test]
async fn trailing_slash_from_token_is_invalid() {
    let (store, resolver, _) = resolver_with_store();
    let source_id = store.add_source();

    let element = ContentElement::new("article")
        .with_id(Uuid::now_v7())
        .with_field("slug", "bad/");
    let user = User::new("editor");

    let result = resolver
        .determine_upload_folder(source_id, Some("posts/{slug}"), &element, &user, "body", true)
        .await;
    assert!(matches!(result, Err(FieldError::InvalidSubpath(_))));
}

#[tokio::test]
async fn unsaved_element_falls_back_to_user_folder() {
    let (store, resolver, temp_dir) = resolver_with_store();
    let source_id = store.add_source();

    // {id} renders empty for an unpersisted element.
    let element = ContentElement::new("article");
    let user = User::new("editor");

    let folder_id = resolver
        .determine_upload_folder(source_id, Some("news/{id}"), &element, &user, "body", true)
        .await
        .unwrap();

    let folders = store.folders();
    let fallback = folders.iter().find(|f| f.id == folder_id).unwrap();
    assert_eq!(fallback.name, "field_body");

    let user_folder = folders
        .iter()
        .find(|f| Some(f.id) == fallback.parent_id)
        .unwrap();
    assert!(user_folder.name.starts_with("user_"));

    // The matching temporary filesystem directory is ensured.
    assert!(temp_dir.join("field_body").is_dir());
    let _ = std::fs::remove_dir_all(&temp_dir);
}

#[tokio::test]
async fn fallback_folder_is_reused() {
    let (store, resolver, temp_dir) = resolver_with_store();
    let source_id = store.add_source();

    let element = ContentElement::new("article");
    let user = User::new("editor");

    let first = resolver
        .determine_upload_folder(source_id, Some("{id}"), &element, &user, "body", true)
        .await
        .unwrap();
    let second = resolver
        .determine_upload_folder(source_id, Some("{id}"), &element, &user, "body", true)
        .await
        .unwrap();
    assert_eq!(first, second);
    let _ = std::fs::remove_dir_all(&temp_dir);
}

#[tokio::test]
async fn persisted_element_with_unknown_token_errors() {
    let (store, resolver, _) = resolver_with_store();
    let source_id = store.add_source();

    let element = ContentElement::new("article").with_id(Uuid::now_v7());
    let user = User::new("editor");

    let result = resolver
        .determine_upload_folder(
            source_id,
            Some("{nonexistent}"),
            &element,
            &user,
            "body",
            true,
        )
        .await;
    assert!(matches!(result, Err(FieldError::InvalidSubpath(_))));
}

#[tokio::test]
async fn missing_folder_without_dynamic_creation_errors() {
    let (store, resolver, _) = resolver_with_store();
    let source_id = store.add_source();

    let element = ContentElement::new("article").with_id(Uuid::now_v7());
    let user = User::new("editor");

    let result = resolver
        .determine_upload_folder(source_id, Some("news"), &element, &user, "body", false)
        .await;
    assert!(matches!(result, Err(FieldError::InvalidSubpath(_))));

    // No fallback without dynamic creation, even for an unsaved element.
    let unsaved = ContentElement::new("article");
    let result = resolver
        .determine_upload_folder(source_id, Some("news"), &unsaved, &user, "body", false)
        .await;
    assert!(matches!(result, Err(FieldError::InvalidSubpath(_))));
}

#[tokio::test]
async fn creation_conflict_is_reconciled() {
    let (store, resolver, _) = resolver_with_store();
    let source_id = store.add_source();
    store.set_create_conflict(true);

    let element = ContentElement::new("article").with_id(Uuid::now_v7());
    let user = User::new("editor");

    let folder_id = resolver
        .determine_upload_folder(source_id, Some("shared"), &element, &user, "body", true)
        .await
        .unwrap();

    let folders = store.folders();
    let reconciled = folders.iter().find(|f| f.id == folder_id).unwrap();
    assert_eq!(reconciled.path, "shared/");
    assert_eq!(reconciled.name, "shared");
}

#[tokio::test]
async fn unknown_source_is_invalid() {
    let (_, resolver, _) = resolver_with_store();

    let element = ContentElement::new("article");
    let user = User::new("editor");

    let result = resolver
        .determine_upload_folder(Uuid::now_v7(), None, &element, &user, "body", true)
        .await;
    assert!(matches!(result, Err(FieldError::InvalidSource(_))));
}

#[tokio::test]
async fn resolve_upload_folders_emits_handles() {
    let (store, resolver, _) = resolver_with_store();
    let source_id = store.add_source();

    let settings = FieldSettings {
        assets_images_source: Some(source_id),
        assets_images_sub_path: Some("images".to_string()),
        assets_files_source: None,
        ..Default::default()
    };
    let element = ContentElement::new("article").with_id(Uuid::now_v7());
    let user = User::new("editor");

    let folders = resolver
        .resolve_upload_folders(&settings, &element, &user, "body")
        .await
        .unwrap();

    let images = folders.images.unwrap();
    assert!(images.starts_with("folder:"));
    assert!(images.ends_with(":single"));
    assert!(folders.files.is_none());

    let recorded = store
        .folders()
        .into_iter()
        .find(|f| f.path == "images/")
        .unwrap();
    assert_eq!(images, format!("folder:{}:single", recorded.id));
}

/// Look up a source's root folder id directly from the store.
async fn root_folder_id(store: &MemoryAssetStore, source_id: richtext_field::assets::SourceId) -> Uuid {
    use richtext_field::AssetStore;
    store.root_folder(source_id).await.unwrap().unwrap().id
}

// Criteria helpers are exercised here so lookup semantics stay aligned
// with what the resolver sends the store.
#[tokio::test]
async fn store_lookup_by_criteria_matches_resolver_queries() {
    use richtext_field::AssetStore;

    let (store, resolver, _) = resolver_with_store();
    let source_id = store.add_source();

    let element = ContentElement::new("article").with_id(Uuid::now_v7());
    let user = User::new("editor");
    resolver
        .determine_upload_folder(source_id, Some("news/2026"), &element, &user, "body", true)
        .await
        .unwrap();

    let by_path = store
        .find_folder(&FolderCriteria::new().source(source_id).path("news/2026/"))
        .await
        .unwrap();
    assert!(by_path.is_some());
}
