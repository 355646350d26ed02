//! # Closure-backed listener (`ListenFn`)
//!
//! [`ListenFn`] wraps a plain `F: Fn(&Event)` so a closure can be registered
//! without writing a named [`Subscribe`] impl. The closure is shared across
//! dispatches; keep mutable state behind `Arc<Mutex<...>>` (or atomics)
//! inside the capture.
//!
//! ## Example
//! ```rust
//! use bluehub::{Event, EventKind, ListenFn, ListenerRef};
//!
//! let quiet: ListenerRef = ListenFn::arc("tracer", |ev: &Event| {
//!     eprintln!("saw {} (seq {})", ev.kind, ev.seq);
//! });
//!
//! assert_eq!(quiet.name(), "tracer");
//! ```

use std::borrow::Cow;
use std::sync::Arc;

use crate::events::Event;
use crate::subscribers::subscribe::Subscribe;

/// Function-backed listener implementation.
pub struct ListenFn<F> {
    name: Cow<'static, str>,
    f: F,
}

impl<F> ListenFn<F> {
    /// Creates a new function-backed listener.
    ///
    /// Prefer [`ListenFn::arc`] when you immediately need a
    /// [`ListenerRef`](crate::ListenerRef).
    pub fn new(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self { name: name.into(), f }
    }

    /// Creates the listener and returns it as a shared handle.
    pub fn arc(name: impl Into<Cow<'static, str>>, f: F) -> Arc<Self> {
        Arc::new(Self::new(name, f))
    }
}

impl<F> Subscribe for ListenFn<F>
where
    F: Fn(&Event) + Send + Sync + 'static,
{
    fn on_event(&self, event: &Event) {
        (self.f)(event)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
