//! Errors of the renderer's ambient surface.
//!
//! Render failures themselves are [`RenderError`](hyperons_core::RenderError),
//! defined next to the element model so error boundaries can hand them to
//! fallbacks.

use thiserror::Error;

/// Invalid renderer configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The options are not valid JSON or contain unknown fields.
    #[error("invalid render options: {0}")]
    Json(#[from] serde_json::Error),
    /// A depth limit of zero would reject every tree.
    #[error("maxDepth must be at least 1")]
    ZeroDepth,
}
