//! # hyperons
//!
//! Renders trees of declarative elements to HTML strings.
//!
//! Trees are made of text, numbers, lists, tags, component functions,
//! fragments, context providers and deferred (asynchronous) elements. Deferred
//! elements resolve concurrently, but the output always matches what a fully
//! synchronous render would have produced: every piece of markup lands at its
//! position in the tree, not at the moment it became available.
//!
//! ```
//! use hyperons::{Element, Environment, Props, h, render};
//!
//! fn greeting(props: Props, _env: &Environment) -> Element {
//!     let name = props.get_str("name").unwrap_or("stranger").to_owned();
//!     h("p", Props::new(), ["Hello, ".into(), name.into()])
//! }
//!
//! let page = h(
//!     "main",
//!     Props::new().attr("className", "page"),
//!     [
//!         Element::component(greeting, Props::new().attr("name", "Ada")),
//!         Element::deferred(async { h("footer", Props::new(), ["loaded later".into()]) }),
//!     ],
//! );
//!
//! let html = futures::executor::block_on(render(page))?;
//! assert_eq!(
//!     html,
//!     r#"<main class="page"><p>Hello, Ada</p><footer>loaded later</footer></main>"#
//! );
//! # Ok::<(), hyperons::RenderError>(())
//! ```
//!
//! ## Contexts
//!
//! A [`Context`] handle, created through a [`ContextRegistry`], lets a component
//! read a value bound by any ancestor provider. Components receive the
//! [`Environment`] (the context map in effect at their position) as a parameter
//! and look values up with [`Environment::use_context`].
//!
//! ## Error boundaries
//!
//! [`ErrorBoundary`] catches synchronous failures of its subtree, such as a
//! component returning an error, and renders a fallback instead. Failures of
//! deferred elements always fail the whole render.

#![allow(clippy::future_not_send)]

extern crate alloc;

pub mod attributes;
mod controller;
mod engine;
mod error;
pub mod logging;
mod options;

pub use controller::Controller;
pub use engine::Renderer;
pub use error::ConfigError;
pub use options::{DEFAULT_MAX_DEPTH, RenderOptions};

#[doc(inline)]
pub use hyperons_core::{
    BoxError, ComponentElement, ComponentFn, Context, ContextId, ContextRegistry, Deferred,
    Element, ElementType, Environment, ErrorBoundary, Fallback, Props, ProviderElement,
    RenderError, TagElement, h, json,
};
pub use hyperons_escape as escape;

/// Renders `element` to HTML with default options.
///
/// Always asynchronous, whether or not the tree contains deferred elements.
///
/// # Errors
///
/// Fails if a synchronous failure escapes every error boundary, or if a
/// deferred element fails.
pub async fn render(element: impl Into<Element>) -> Result<String, RenderError> {
    Renderer::default().render(element).await
}

pub mod prelude {
    //! Commonly used types for building and rendering element trees.
    //!
    //! ```rust
    //! use hyperons::prelude::*;
    //!
    //! let element = h("p", Props::new(), ["text".into()]);
    //! # let _ = element;
    //! ```
    pub use super::{
        Context, ContextRegistry, Element, ElementType, Environment, ErrorBoundary, Props,
        RenderOptions, Renderer, h, render,
    };
}
