//! # Event listener trait.
//!
//! Provides [`Subscribe`], the extension point for observing host lifecycle
//! events through the fan-out hub.
//!
//! ## Rules
//! - `on_event` is **synchronous**: dispatch runs on whatever thread the host
//!   delivers events on and never suspends, so listeners must not block.
//! - A listener may re-enter the hub from inside `on_event` (register more
//!   listeners, dispose itself or others); the in-progress pass is unaffected.
//! - With panic isolation enabled (default), a panic in one listener is caught
//!   and reported under [`Subscribe::name`]; the rest of the pass still runs.
//!
//! ## Example
//! ```rust
//! use bluehub::{Event, EventKind, Subscribe};
//!
//! struct DisconnectCounter;
//!
//! impl Subscribe for DisconnectCounter {
//!     fn on_event(&self, ev: &Event) {
//!         if matches!(ev.kind, EventKind::GattServerDisconnected) {
//!             // bump a metric, surface a notification, etc.
//!         }
//!     }
//!
//!     fn name(&self) -> &str { "disconnect-counter" }
//! }
//! ```

use std::sync::Arc;

use crate::events::Event;

/// Listener for host lifecycle events.
///
/// Registered under one or more [`EventKind`](crate::EventKind)s; each
/// registration is independent and yields its own disposal handle.
///
/// ### Implementation requirements
/// - Return quickly; dispatch is synchronous and in registration order.
/// - Handle errors internally; panics are caught only when isolation is on.
pub trait Subscribe: Send + Sync + 'static {
    /// Processes a single event.
    ///
    /// Called once per dispatch for every registration of this listener,
    /// in registration order.
    fn on_event(&self, event: &Event);

    /// Returns the listener name used in logs and panic reports.
    ///
    /// Prefer short, descriptive names (e.g., "metrics", "ui", "audit").
    /// The default uses `type_name::<Self>()`, which can be verbose — override
    /// it when possible.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Shared listener handle, the form the hub stores and fans out to.
pub type ListenerRef = Arc<dyn Subscribe>;
