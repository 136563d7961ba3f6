//! Field error types.

use thiserror::Error;

use crate::assets::SourceId;

/// Errors raised while rendering the field or resolving upload folders.
#[derive(Debug, Error)]
pub enum FieldError {
    /// The configured asset source has no root folder (misconfigured or
    /// deleted source). Fatal to the render.
    #[error("asset source {0} has no root folder")]
    InvalidSource(SourceId),

    /// A sub-path template produced an unusable folder path. Recovered via
    /// the per-user fallback folder when the element is unpersisted and
    /// dynamic folder creation is enabled; propagated otherwise.
    #[error("invalid upload sub-path: {0}")]
    InvalidSubpath(String),

    /// A collaborator (asset store, filesystem) failed.
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

/// Result type alias using FieldError.
pub type FieldResult<T> = Result<T, FieldError>;
