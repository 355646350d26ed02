//! # bluehub
//!
//! **Bluehub** is a thin accessor for a host-provided Bluetooth capability.
//!
//! The host platform (a browser bridge, an OS Bluetooth service, a test
//! simulation) owns the actual Bluetooth stack — GATT, pairing, transport,
//! the device chooser UI. This crate forwards to it, normalizes its
//! availability check, translates the user-cancellation error code into a
//! discriminated outcome, and multiplexes its six single-slot lifecycle
//! callbacks out to any number of registered listeners.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │  listener A  │   │  listener B  │   │  listener C  │
//!     │ (Subscribe)  │   │ (ListenFn)   │   │ (Subscribe)  │
//!     └──────▲───────┘   └──────▲───────┘   └──────▲───────┘
//!            │ fan-out (registration order, snapshot per pass)
//! ┌──────────┴──────────────────┴──────────────────┴─────────────────┐
//! │  EventHub (fixed six-slot dispatch table, one per EventKind)      │
//! └──────────────────────────────▲────────────────────────────────────┘
//!                                │ installed hooks (one per slot)
//! ┌──────────────────────────────┴────────────────────────────────────┐
//! │  HostCapability (platform collaborator)                           │
//! │  - availability()        optional query                           │
//! │  - request_device()      chooser; code 8 = user cancelled         │
//! │  - on... handler slots   single-slot, overwritten by the hub      │
//! │  - add/remove listener   generic target, passed through           │
//! └──────────────────────────────▲────────────────────────────────────┘
//!                                │
//!                     Bluetooth (accessor, owns the hub)
//! ```
//!
//! ### Flow
//! ```text
//! caller ──► Bluetooth::listen(kind, listener)
//!   ├─► hooks planted into the host's slots (eager or lazy, once)
//!   └─► EventHub registers the listener, returns a Subscription
//!
//! host fires a slot ──► hub hook ──► EventHub::dispatch(event)
//!   └─► snapshot of that kind's sequence, each listener invoked in order
//!        (a panicking listener is caught and reported; the pass continues)
//!
//! caller ──► subscription.dispose()   // removes exactly that registration
//! ```
//!
//! ## Features
//! | Area            | Description                                                   | Key types / traits                      |
//! |-----------------|---------------------------------------------------------------|-----------------------------------------|
//! | **Accessor**    | Forwarding, availability normalization, chooser outcomes.     | [`Bluetooth`], [`RequestOutcome`]       |
//! | **Listeners**   | Multi-listener fan-out over single-slot host callbacks.       | [`Subscribe`], [`ListenFn`], [`EventHub`], [`Subscription`] |
//! | **Events**      | Closed six-kind event model with opaque payloads.             | [`Event`], [`EventKind`]                |
//! | **Host seam**   | The platform contract and its bridge-shaped structures.       | [`HostCapability`], [`RequestDeviceOptions`], [`DeviceInfo`] |
//! | **Errors**      | Absent capability vs. pass-through host failures.             | [`BluetoothError`], [`HostError`]       |
//! | **Configuration** | Panic isolation, hook install timing.                       | [`Config`], [`InstallPolicy`]           |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogListener`] _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::sync::{Arc, Mutex};
//!
//! use async_trait::async_trait;
//! use bluehub::{
//!     Bluetooth, DeviceInfo, Event, EventKind, HostCapability, HostError,
//!     PlatformHandler, RequestDeviceOptions, RequestOutcome,
//! };
//!
//! /// Host stand-in that knows one device and records its handler slots.
//! #[derive(Default)]
//! struct OneDeviceHost {
//!     slots: Mutex<Vec<(EventKind, PlatformHandler)>>,
//! }
//!
//! #[async_trait]
//! impl HostCapability for OneDeviceHost {
//!     async fn availability(&self) -> Option<bool> {
//!         Some(true)
//!     }
//!
//!     async fn request_device(
//!         &self,
//!         _options: &RequestDeviceOptions,
//!     ) -> Result<DeviceInfo, HostError> {
//!         Ok(DeviceInfo::new("dev-1").with_name("Heart Rate Monitor"))
//!     }
//!
//!     fn set_event_handler(&self, kind: EventKind, handler: PlatformHandler) {
//!         self.slots.lock().unwrap().push((kind, handler));
//!     }
//!
//!     fn add_event_listener(&self, _event_type: &str, _listener: PlatformHandler) {}
//!     fn remove_event_listener(&self, _event_type: &str, _listener: &PlatformHandler) {}
//! }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let host = Arc::new(OneDeviceHost::default());
//!     let bt = Bluetooth::new(host.clone());
//!
//!     assert!(bt.availability().await);
//!
//!     let outcome = bt.request_device(&RequestDeviceOptions::accept_all()).await?;
//!     assert!(matches!(outcome, RequestOutcome::Selected(_)));
//!
//!     // Subscribe; the accessor plants its fan-out hooks into the host.
//!     let seen = Arc::new(Mutex::new(0u32));
//!     let count = Arc::clone(&seen);
//!     let sub = bt.listen_fn(EventKind::ServiceAdded, move |_ev: &Event| {
//!         *count.lock().unwrap() += 1;
//!     })?;
//!
//!     // The host fires its slot; the hub fans out to every listener.
//!     let hooks = host.slots.lock().unwrap().clone();
//!     for (kind, hook) in &hooks {
//!         if *kind == EventKind::ServiceAdded {
//!             hook(Event::service_event(EventKind::ServiceAdded, "battery_service"));
//!         }
//!     }
//!     assert_eq!(*seen.lock().unwrap(), 1);
//!
//!     sub.dispose();
//!     Ok(())
//! }
//! ```

mod core;
mod error;
mod events;
mod host;
mod subscribers;

// ---- Public re-exports ----

pub use crate::core::{Bluetooth, BluetoothBuilder, Config, InstallPolicy, RequestOutcome};
pub use error::{BluetoothError, HostError, CODE_USER_CANCELLED};
pub use events::{Event, EventHub, EventKind, Subscription};
pub use host::{
    DeviceFilter, DeviceInfo, HostCapability, PlatformHandler, RequestDeviceOptions,
    AVAILABILITY_CHANGED_EVENT,
};
pub use subscribers::{ListenFn, ListenerRef, Subscribe};

// Optional: expose a simple built-in logging listener (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogListener;
