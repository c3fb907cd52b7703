//! Errors raised while rendering an element tree.

use alloc::borrow::Cow;
use alloc::boxed::Box;
use thiserror::Error;

/// A type-erased error returned by components and deferred values.
pub type BoxError = Box<dyn core::error::Error + Send + Sync + 'static>;

/// Failure of a render pass.
///
/// Synchronous failures ([`RenderError::Component`], [`RenderError::DepthExceeded`])
/// can be recovered by the nearest enclosing error boundary. A rejected deferred
/// value is always fatal to the render it belongs to.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A component function returned an error.
    #[error("component `{component}` failed: {source}")]
    Component {
        /// Name of the failing component.
        component: Cow<'static, str>,
        /// The error the component returned.
        #[source]
        source: BoxError,
    },
    /// A deferred value resolved to an error.
    #[error("deferred element failed: {0}")]
    Deferred(#[source] BoxError),
    /// The element tree nests deeper than the configured limit.
    #[error("element tree exceeds the maximum render depth of {limit}")]
    DepthExceeded {
        /// The configured depth limit.
        limit: usize,
    },
}

impl RenderError {
    /// Creates a [`RenderError::Component`] for the named component.
    pub fn component(component: impl Into<Cow<'static, str>>, source: impl Into<BoxError>) -> Self {
        Self::Component {
            component: component.into(),
            source: source.into(),
        }
    }

    /// Returns `true` if an error boundary may recover from this error.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Deferred(_))
    }
}
