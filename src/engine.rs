//! # The render engine
//!
//! [`Renderer::render_into`] walks an element tree depth first and appends its
//! markup to a [`Controller`]. Everything available synchronously is rendered
//! immediately; a deferred element is handed to the controller as a pending
//! slot and rendered once its value arrives (see [`Controller::drive`]).
//!
//! Per element kind:
//!
//! | element | output |
//! |---|---|
//! | text | escaped text |
//! | number | the number, formatted like a browser would |
//! | boolean, null | nothing |
//! | list | each member, in order |
//! | deferred | a pending slot |
//! | provider | its children, with the binding added to the context map |
//! | component | whatever the component returns |
//! | fragment | its children |
//! | tag | opening tag, children (or raw inner HTML), closing tag; void tags self-close |

use alloc::{format, string::String};

use hyperons_core::{
    ComponentElement, ContextId, Element, Environment, Fallback, ProviderElement, RenderError,
    TagElement,
};
use hyperons_escape::{escape, format_number};
use tracing::Instrument;

use crate::{
    Controller, RenderOptions,
    attributes::{Attributes, is_void_element, serialize_attributes},
};

const DOCTYPE: &str = "<!DOCTYPE html>";

/// Renders element trees to HTML.
///
/// ```
/// use hyperons::{Props, Renderer, RenderOptions, h};
///
/// let renderer = Renderer::new(RenderOptions::default().with_doctype(true));
/// let page = h("html", Props::new(), [h("body", Props::new(), ["Hi".into()])]);
/// let html = futures::executor::block_on(renderer.render(page))?;
/// assert_eq!(html, "<!DOCTYPE html><html><body>Hi</body></html>");
/// # Ok::<(), hyperons::RenderError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    options: RenderOptions,
}

impl Renderer {
    /// Creates a renderer with the given options.
    #[must_use]
    pub const fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// The renderer's options.
    #[must_use]
    pub const fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Renders `element` to a complete HTML string.
    ///
    /// The tree is rendered with an empty context map. The returned future
    /// completes once every deferred element in the tree, including deferred
    /// elements produced by other deferred elements, has been resolved.
    ///
    /// # Errors
    ///
    /// Fails if a synchronous failure escapes every error boundary, or if a
    /// deferred element fails.
    pub async fn render(&self, element: impl Into<Element>) -> Result<String, RenderError> {
        let element = element.into();
        let span = tracing::debug_span!("render", doctype = self.options.doctype);
        async move {
            let mut controller = Controller::new();
            self.render_into(element, &Environment::new(), &mut controller, 0)?;
            let body = controller.drive(self).await?;
            tracing::debug!(bytes = body.len(), "render finished");
            Ok(if self.options.doctype {
                format!("{DOCTYPE}{body}")
            } else {
                body
            })
        }
        .instrument(span)
        .await
    }

    /// Appends the markup of `element` to `controller`.
    ///
    /// `env` is the context map in effect at the element's position and
    /// `depth` its nesting depth.
    ///
    /// # Errors
    ///
    /// Returns the first synchronous failure that no error boundary inside
    /// `element` recovered from.
    pub fn render_into(
        &self,
        element: Element,
        env: &Environment,
        controller: &mut Controller,
        depth: usize,
    ) -> Result<(), RenderError> {
        if depth > self.options.max_depth {
            return Err(RenderError::DepthExceeded {
                limit: self.options.max_depth,
            });
        }

        match element {
            Element::Text(text) => controller.push(&escape(&text)),
            Element::Number(number) => controller.push(&format_number(number)),
            Element::Bool(_) | Element::Null => {}
            Element::List(items) => {
                for item in items {
                    self.render_into(item, env, controller, depth + 1)?;
                }
            }
            Element::Deferred(deferred) => controller.handle_async(deferred, env.clone(), depth),
            Element::Provider(provider) => self.render_provider(provider, env, controller, depth)?,
            Element::Component(ComponentElement { component, props }) => {
                let output = component.call(props, env)?;
                self.render_into(output, env, controller, depth + 1)?;
            }
            Element::Fragment(children) => self.render_into(*children, env, controller, depth + 1)?,
            Element::Tag(tag) => self.render_tag(tag, env, controller, depth)?,
        }

        Ok(())
    }

    fn render_provider(
        &self,
        provider: ProviderElement,
        env: &Environment,
        controller: &mut Controller,
        depth: usize,
    ) -> Result<(), RenderError> {
        let is_error_boundary = provider.is_error_boundary();
        let ProviderElement {
            id,
            value,
            children,
        } = provider;
        let env = env.with_value(id, value);

        if !is_error_boundary {
            return self.render_into(*children, &env, controller, depth + 1);
        }

        // Children render into scratch space so a failure leaves no partial output.
        let mut scratch = Controller::new();
        match self.render_into(*children, &env, &mut scratch, depth + 1) {
            Ok(()) => {
                controller.append(scratch);
                Ok(())
            }
            Err(error) if error.is_recoverable() => {
                let Some(fallback) = bound_fallback(&env) else {
                    tracing::warn!(%error, "error boundary is not bound to a fallback");
                    return Err(error);
                };
                tracing::debug!(%error, "error boundary recovered from a render failure");
                self.render_into(fallback(&error), &env, controller, depth + 1)
            }
            Err(error) => Err(error),
        }
    }

    fn render_tag(
        &self,
        tag: TagElement,
        env: &Environment,
        controller: &mut Controller,
        depth: usize,
    ) -> Result<(), RenderError> {
        let TagElement { tag, props } = tag;
        let (attrs, children) = props.into_parts();
        let Attributes {
            html: attributes,
            inner_html,
        } = serialize_attributes(&attrs);

        let mut open = String::with_capacity(tag.len() + attributes.len() + 3);
        open.push('<');
        open.push_str(&tag);
        open.push_str(&attributes);

        if is_void_element(&tag) {
            open.push_str("/>");
            controller.push(&open);
            return Ok(());
        }

        open.push('>');
        controller.push(&open);
        match inner_html {
            Some(html) => controller.push(&html),
            None => self.render_into(children, env, controller, depth + 1)?,
        }
        controller.push(&format!("</{tag}>"));

        Ok(())
    }
}

/// The fallback bound by the innermost error boundary in `env`.
fn bound_fallback(env: &Environment) -> Option<Fallback> {
    env.raw(&ContextId::ERROR_BOUNDARY)?
        .clone()
        .downcast::<Fallback>()
        .ok()
        .map(|fallback| (*fallback).clone())
}
