//! # Context propagation
//!
//! Contexts let a component read a value bound by an ancestor without the value
//! being threaded through every intermediate component's props.
//!
//! - A [`Context<T>`] handle is an identity plus a default value. Handles are
//!   allocated by a [`ContextRegistry`], which hands out unique ids.
//! - A provider element ([`Context::provider`]) binds a value to the handle's id
//!   for its subtree.
//! - The renderer carries an [`Environment`], the map of all bindings in effect
//!   at the current position, and passes it to every component. Binding never
//!   mutates a map: each provider derives a new one, so sibling subtrees never
//!   observe each other's bindings.
//!
//! ```
//! use hyperons_core::{ContextRegistry, Element, Environment, Props};
//!
//! let registry = ContextRegistry::new();
//! let theme = registry.create("light");
//!
//! let reader = theme.clone();
//! let label = Element::component(
//!     move |_props: Props, env: &Environment| Element::from(*env.use_context(&reader)),
//!     Props::new(),
//! );
//! let tree = theme.provider("dark", label);
//! # let _ = tree;
//! ```
//!
//! ## Error boundaries
//!
//! The id [`ContextId::ERROR_BOUNDARY`] is reserved. A provider bound under it
//! installs a [`Fallback`] that the renderer calls when rendering the provider's
//! subtree fails synchronously; see [`ErrorBoundary`].

use alloc::{borrow::Cow, collections::BTreeMap, rc::Rc, string::String};
use core::any::{Any, type_name};
use core::cell::Cell;
use core::fmt::{self, Debug, Display};

use crate::{Element, ProviderElement, RenderError};

// ============================================================================
// Identity
// ============================================================================

/// Identity of a context.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContextId {
    /// An id allocated by a [`ContextRegistry`].
    Counter(u64),
    /// An explicitly chosen id.
    Named(Cow<'static, str>),
}

impl ContextId {
    /// The reserved identity of the error-boundary context.
    pub const ERROR_BOUNDARY: Self = Self::Named(Cow::Borrowed("errorBoundary"));
}

impl Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Counter(id) => write!(f, "{id}"),
            Self::Named(name) => f.write_str(name),
        }
    }
}

impl From<u64> for ContextId {
    fn from(id: u64) -> Self {
        Self::Counter(id)
    }
}

impl From<&'static str> for ContextId {
    fn from(name: &'static str) -> Self {
        Self::Named(Cow::Borrowed(name))
    }
}

impl From<String> for ContextId {
    fn from(name: String) -> Self {
        Self::Named(Cow::Owned(name))
    }
}

// ============================================================================
// Handles
// ============================================================================

/// A typed context handle.
pub struct Context<T> {
    id: ContextId,
    default: Rc<T>,
}

impl<T> Clone for Context<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            default: self.default.clone(),
        }
    }
}

impl<T> Debug for Context<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("id", &self.id)
            .field("type", &type_name::<T>())
            .finish()
    }
}

impl<T: 'static> Context<T> {
    /// Creates a handle with an explicit id.
    ///
    /// Two handles created with the same id share their bindings. This is the
    /// escape hatch for interop with fixed, well-known identities; prefer
    /// [`ContextRegistry::create`] otherwise.
    pub fn with_id(default: T, id: impl Into<ContextId>) -> Self {
        Self {
            id: id.into(),
            default: Rc::new(default),
        }
    }

    /// The handle's identity.
    #[must_use]
    pub const fn id(&self) -> &ContextId {
        &self.id
    }

    /// The value seen where nothing is bound.
    #[must_use]
    pub const fn default_value(&self) -> &Rc<T> {
        &self.default
    }

    /// Builds a provider element binding `value` for `children`.
    pub fn provider(&self, value: T, children: impl Into<Element>) -> Element {
        Element::Provider(ProviderElement {
            id: self.id.clone(),
            value: Rc::new(value),
            children: alloc::boxed::Box::new(children.into()),
        })
    }

    /// Looks up the value bound in `env`, falling back to the default value.
    #[must_use]
    pub fn get(&self, env: &Environment) -> Rc<T> {
        let Some(bound) = env.raw(&self.id) else {
            return self.default.clone();
        };
        bound.clone().downcast::<T>().unwrap_or_else(|_| {
            tracing::warn!(
                context = %self.id,
                expected = type_name::<T>(),
                "context is bound to a value of another type, using its default value"
            );
            self.default.clone()
        })
    }
}

/// Allocates context handles with unique ids.
///
/// Ids are unique per registry. The registry is usually owned by whatever sets
/// up the application's contexts, and lives as long as the handles it issues
/// are in use.
#[derive(Debug, Default)]
pub struct ContextRegistry {
    next: Cell<u64>,
}

impl ContextRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self { next: Cell::new(0) }
    }

    /// Creates a handle with the next free id.
    pub fn create<T: 'static>(&self, default: T) -> Context<T> {
        let id = self.next.get();
        self.next.set(id + 1);
        Context::with_id(default, ContextId::Counter(id))
    }

    /// Creates a handle with an explicit id.
    ///
    /// The registry's counter is not advanced; see [`Context::with_id`].
    pub fn create_with_id<T: 'static>(&self, default: T, id: impl Into<ContextId>) -> Context<T> {
        Context::with_id(default, id)
    }
}

// ============================================================================
// Context map
// ============================================================================

/// The context map in effect at one position of the element tree.
///
/// Cloning is cheap. [`Environment::with_value`] derives a new map and never
/// changes the map it is called on.
#[derive(Clone, Default)]
pub struct Environment {
    map: Rc<BTreeMap<ContextId, Rc<dyn Any>>>,
}

impl Environment {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of this map with `value` bound under `id`.
    #[must_use]
    pub fn with_value(&self, id: ContextId, value: Rc<dyn Any>) -> Self {
        let mut map = (*self.map).clone();
        map.insert(id, value);
        Self { map: Rc::new(map) }
    }

    /// Returns `true` if something is bound under `id`.
    #[must_use]
    pub fn contains(&self, id: &ContextId) -> bool {
        self.map.contains_key(id)
    }

    /// Returns the raw value bound under `id`.
    #[must_use]
    pub fn raw(&self, id: &ContextId) -> Option<&Rc<dyn Any>> {
        self.map.get(id)
    }

    /// Reads the value of `context` at this position.
    ///
    /// This is what components use to access contexts bound by their ancestors.
    #[must_use]
    pub fn use_context<T: 'static>(&self, context: &Context<T>) -> Rc<T> {
        context.get(self)
    }
}

impl Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.map.keys()).finish()
    }
}

// ============================================================================
// Error boundary
// ============================================================================

/// Renders a replacement for a subtree whose rendering failed.
pub type Fallback = Rc<dyn Fn(&RenderError) -> Element>;

/// Recovers from synchronous failures in a subtree.
///
/// When rendering the wrapped children fails, none of their partial output is
/// kept; the fallback's element is rendered in their place instead. Failures of
/// deferred values are not intercepted.
///
/// ```
/// use hyperons_core::{Element, ErrorBoundary, Props};
///
/// let tree = ErrorBoundary::new(|error| Element::from(format!("failed: {error}")))
///     .wrap(Element::try_component(|_, _| Err("boom"), Props::new()));
/// # let _ = tree;
/// ```
#[derive(Clone)]
pub struct ErrorBoundary {
    fallback: Fallback,
}

impl ErrorBoundary {
    /// Creates a boundary with the given fallback.
    pub fn new(fallback: impl Fn(&RenderError) -> Element + 'static) -> Self {
        Self {
            fallback: Rc::new(fallback),
        }
    }

    /// Handle of the reserved error-boundary context.
    ///
    /// Reading it yields the fallback of the nearest enclosing boundary, or a
    /// fallback rendering nothing outside of any boundary.
    #[must_use]
    pub fn context() -> Context<Fallback> {
        let nothing: Fallback = Rc::new(|_: &RenderError| Element::Null);
        Context::with_id(nothing, ContextId::ERROR_BOUNDARY)
    }

    /// Wraps `children` in this boundary.
    pub fn wrap(self, children: impl Into<Element>) -> Element {
        Self::context().provider(self.fallback, children)
    }

    /// The fallback.
    #[must_use]
    pub const fn fallback(&self) -> &Fallback {
        &self.fallback
    }
}

impl Debug for ErrorBoundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorBoundary").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_registry_ids_are_unique() {
        let registry = ContextRegistry::new();
        let a = registry.create(1_u8);
        let b = registry.create(2_u8);
        assert_ne!(a.id(), b.id());
        assert_eq!(registry.create(3_u8).id(), &ContextId::Counter(2));
    }

    #[test]
    fn test_forced_id_is_shared() {
        let registry = ContextRegistry::new();
        let a = registry.create_with_id(0_i32, "shared");
        let b = Context::with_id(1_i32, "shared");
        assert_eq!(a.id(), b.id());
        assert_eq!(registry.create(2_i32).id(), &ContextId::Counter(0));

        let env = Environment::new().with_value(a.id().clone(), Rc::new(7_i32));
        assert_eq!(*b.get(&env), 7);
    }

    #[test]
    fn test_lookup_falls_back_to_default() {
        let context = ContextRegistry::new().create("default");
        assert_eq!(*Environment::new().use_context(&context), "default");
    }

    #[test]
    fn test_with_value_does_not_mutate_original() {
        let context = ContextRegistry::new().create(0_u32);
        let outer = Environment::new().with_value(context.id().clone(), Rc::new(1_u32));
        let inner = outer.with_value(context.id().clone(), Rc::new(2_u32));

        assert_eq!(*outer.use_context(&context), 1);
        assert_eq!(*inner.use_context(&context), 2);
        assert!(!Environment::new().contains(context.id()));
    }

    #[test]
    fn test_explicit_none_is_distinct_from_unbound() {
        let context = ContextRegistry::new().create(Some("default"));
        let env = Environment::new().with_value(context.id().clone(), Rc::new(None::<&str>));
        assert!(env.contains(context.id()));
        assert_eq!(*env.use_context(&context), None);
    }

    #[test]
    fn test_mismatched_type_uses_default() {
        let context = Context::with_id(5_u8, "number");
        let env = Environment::new().with_value(context.id().clone(), Rc::new("text"));
        assert_eq!(*context.get(&env), 5);
    }

    #[test]
    fn test_error_boundary_context_id() {
        assert_eq!(ErrorBoundary::context().id(), &ContextId::ERROR_BOUNDARY);
        assert_eq!(ContextId::ERROR_BOUNDARY.to_string(), "errorBoundary");
    }
}
