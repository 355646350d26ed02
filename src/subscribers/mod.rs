//! # Event listeners for the fan-out hub.
//!
//! This module provides the [`Subscribe`] trait, the shared handle alias
//! [`ListenerRef`], and adapters for plugging callbacks into the hub.
//!
//! ## Listener flavors
//! - **Named impls** — implement [`Subscribe`] on your own type (metrics,
//!   UI bridges, audit trails).
//! - **Closures** — wrap a `Fn(&Event)` in [`ListenFn`] for one-off handlers.
//! - **Built-in** — [`LogListener`] (feature `logging`) prints events to
//!   stdout for demos.

mod listen_fn;
mod subscribe;

#[cfg(feature = "logging")]
mod log;

pub use listen_fn::ListenFn;
pub use subscribe::{ListenerRef, Subscribe};

#[cfg(feature = "logging")]
pub use log::LogListener;
