//! # Ordered output assembly
//!
//! A [`Controller`] collects the output of one render pass as an ordered list of
//! slots. Finished markup is appended as text; a deferred element is appended
//! as a pending slot that remembers the context map in effect where it
//! appeared. Driving the controller resolves every pending slot concurrently
//! and joins the results by slot position, so the final string is the same as
//! if every deferred value had been available up front.
//!
//! ```text
//!  slots:   [ "<ul><li>" ] [ pending A ] [ "</li><li>" ] [ pending B ] [ "</li></ul>" ]
//!                               │                             │
//!                     resolve + render              resolve + render
//!                     into nested controller        into nested controller
//!                               │                             │
//!                     drive (recursively)           drive (recursively)
//!                               ▼                             ▼
//!  joined:  "<ul><li>"  +   "a…"   +   "</li><li>"  +   "b…"   +   "</li></ul>"
//! ```

use alloc::{boxed::Box, string::String, vec::Vec};

use futures::future::{self, FutureExt, LocalBoxFuture};
use hyperons_core::{Deferred, Environment, RenderError};

use crate::Renderer;

/// Ordered, append-only output of one render pass.
#[derive(Debug, Default)]
pub struct Controller {
    slots: Vec<Slot>,
    has_async: bool,
}

#[derive(Debug)]
enum Slot {
    Text(String),
    Pending(Box<Pending>),
}

/// A deferred element waiting for its value.
#[derive(Debug)]
struct Pending {
    deferred: Deferred,
    env: Environment,
    controller: Controller,
    depth: usize,
}

impl Controller {
    /// Creates an empty controller.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends finished markup.
    ///
    /// Consecutive text is kept in a single slot.
    pub fn push(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(Slot::Text(last)) = self.slots.last_mut() {
            last.push_str(text);
        } else {
            self.slots.push(Slot::Text(text.into()));
        }
    }

    /// Appends a pending slot for `deferred`.
    ///
    /// `env` is the context map the resolved element will be rendered with, and
    /// `depth` its position in the tree.
    pub fn handle_async(&mut self, deferred: Deferred, env: Environment, depth: usize) {
        self.has_async = true;
        self.slots.push(Slot::Pending(Box::new(Pending {
            deferred,
            env,
            controller: Self::new(),
            depth,
        })));
    }

    /// Returns `true` if any slot is pending.
    #[must_use]
    pub const fn has_async(&self) -> bool {
        self.has_async
    }

    /// Appends all slots of `other`, keeping their order.
    pub fn append(&mut self, other: Self) {
        self.has_async |= other.has_async;
        for slot in other.slots {
            match slot {
                Slot::Text(text) => self.push(&text),
                pending @ Slot::Pending(_) => self.slots.push(pending),
            }
        }
    }

    /// Resolves every pending slot and joins all slots in order.
    ///
    /// Pending slots are awaited concurrently. Each resolved element is rendered
    /// into the slot's own controller with the context map captured when the
    /// slot was created, and that controller is driven in turn, so deferred
    /// elements may nest to any depth.
    ///
    /// # Errors
    ///
    /// Fails with the first error among the pending slots: a rejected deferred
    /// value, or a render failure of a resolved element.
    pub fn drive(self, renderer: &Renderer) -> LocalBoxFuture<'_, Result<String, RenderError>> {
        if !self.has_async {
            let html = self
                .slots
                .into_iter()
                .filter_map(|slot| match slot {
                    Slot::Text(text) => Some(text),
                    Slot::Pending(_) => None,
                })
                .collect::<String>();
            return future::ready(Ok(html)).boxed_local();
        }

        let pending = self
            .slots
            .iter()
            .filter(|slot| matches!(slot, Slot::Pending(_)))
            .count();
        tracing::debug!(slots = self.slots.len(), pending, "resolving deferred slots");

        let slots = self.slots.into_iter().map(move |slot| async move {
            match slot {
                Slot::Text(text) => Ok(text),
                Slot::Pending(pending) => {
                    let Pending {
                        deferred,
                        env,
                        mut controller,
                        depth,
                    } = *pending;
                    let element = deferred.await.map_err(RenderError::Deferred)?;
                    renderer.render_into(element, &env, &mut controller, depth)?;
                    controller.drive(renderer).await
                }
            }
        });

        future::try_join_all(slots)
            .map(|parts| parts.map(|parts| parts.concat()))
            .boxed_local()
    }
}
