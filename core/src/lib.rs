//! # hyperons core
//!
//! The data model shared by the `hyperons` renderer and the code that builds
//! element trees:
//!
//! - [`Element`]: the closed set of node kinds a tree is made of.
//! - [`Props`]: ordered attributes plus children.
//! - [`Context`], [`ContextRegistry`] and [`Environment`]: implicit parameter
//!   passing down the tree.
//! - [`ErrorBoundary`]: recovery from synchronous render failures.
//! - [`RenderError`]: everything that can go wrong during a render.

extern crate alloc;

mod context;
mod element;
mod error;
mod props;

pub use context::{Context, ContextId, ContextRegistry, Environment, ErrorBoundary, Fallback};
pub use element::{
    ComponentElement, ComponentFn, Deferred, Element, ElementType, ProviderElement, TagElement, h,
};
pub use error::{BoxError, RenderError};
pub use props::Props;

pub use serde_json::{Map, Value, json};
