//! Course errors
//!
//! Only conditions a user or a stored document can cause live here. Broken
//! internal invariants (an out-of-range brush index, say) panic instead.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CourseError {
    #[error("course has no flag")]
    MissingFlag,

    #[error("course has neither a terrain history nor grass/sand masks")]
    MissingTerrain,

    #[error("course has both a terrain history and grass/sand masks")]
    AmbiguousTerrain,

    #[error("invalid course dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("mask is {found:?}, course needs {expected:?}")]
    MaskSizeMismatch {
        expected: (u32, u32),
        found: (u32, u32),
    },

    #[error("portal pair id {0} is used more than once")]
    DuplicatePortalId(u32),

    #[error("invalid mask encoding: {0}")]
    InvalidMaskEncoding(String),

    #[error("unsupported course version {0}")]
    UnsupportedVersion(u32),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
