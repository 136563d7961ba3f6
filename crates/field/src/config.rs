//! Configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Editor-wide configuration.
#[derive(Debug, Clone)]
pub struct EditorConfig {
    /// Bundled editor library version, used to build resource paths
    /// (default: "2.2.7").
    pub editor_version: String,

    /// Base URL for bundled editor resources (default: /resources/richtext).
    pub resources_url: String,

    /// Directory for temporary uploads awaiting element save
    /// (default: ./uploads/temp).
    pub temp_uploads_dir: PathBuf,

    /// Transliterate resolved folder paths to ASCII (default: false).
    pub convert_filenames_to_ascii: bool,
}

impl EditorConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let editor_version =
            env::var("EDITOR_VERSION").unwrap_or_else(|_| "2.2.7".to_string());

        let resources_url =
            env::var("EDITOR_RESOURCES_URL").unwrap_or_else(|_| "/resources/richtext".to_string());

        let temp_uploads_dir = env::var("TEMP_UPLOADS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./uploads/temp"));

        let convert_filenames_to_ascii = env::var("CONVERT_FILENAMES_TO_ASCII")
            .map(|v| v.parse())
            .unwrap_or(Ok(false))
            .context("CONVERT_FILENAMES_TO_ASCII must be true or false")?;

        Ok(Self {
            editor_version,
            resources_url,
            temp_uploads_dir,
            convert_filenames_to_ascii,
        })
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            editor_version: "2.2.7".to_string(),
            resources_url: "/resources/richtext".to_string(),
            temp_uploads_dir: PathBuf::from("./uploads/temp"),
            convert_filenames_to_ascii: false,
        }
    }
}
