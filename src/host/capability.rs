//! # Host capability contract.
//!
//! [`HostCapability`] is the seam between this crate and the platform's
//! Bluetooth stack. Everything protocol-shaped — GATT, pairing, transport,
//! the device chooser UI — lives behind it; the accessor only forwards,
//! normalizes, and multiplexes.
//!
//! A host exposes:
//! - an **optional availability query** (some platforms cannot answer and
//!   return `None`, in which case mere presence of the host object counts);
//! - an async **device chooser** that either yields a device descriptor or
//!   fails with a [`HostError`] (code 8 meaning the user dismissed it);
//! - six **single-slot handler properties**, one per [`EventKind`] — the
//!   fan-out hub overwrites these with its own hooks at install time;
//! - a **generic event-target pair** (`add`/`remove`) for the well-known
//!   `"availabilitychanged"` event type, passed through with no fan-out.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::HostError;
use crate::events::{Event, EventKind};
use crate::host::device::DeviceInfo;
use crate::host::options::RequestDeviceOptions;

/// Well-known event type accepted by the host's generic event target.
pub const AVAILABILITY_CHANGED_EVENT: &str = "availabilitychanged";

/// Callback the host invokes for single-slot events and generic listeners.
///
/// For the generic event-target pair, `Arc` identity (`Arc::ptr_eq`) is the
/// removal key — keep the original handle around to unregister it.
pub type PlatformHandler = Arc<dyn Fn(Event) + Send + Sync>;

/// # The platform's Bluetooth capability object.
///
/// Implementations wrap whatever the platform provides (a browser bridge, an
/// OS Bluetooth service, a simulation). The accessor treats the object as
/// opaque: failures pass through as [`HostError`] and event payloads are
/// whatever the host constructs.
///
/// ## Example
/// ```rust
/// use async_trait::async_trait;
/// use bluehub::{
///     DeviceInfo, EventKind, HostCapability, HostError, PlatformHandler,
///     RequestDeviceOptions,
/// };
///
/// /// Host with no radio: never available, chooser always fails.
/// struct DeadHost;
///
/// #[async_trait]
/// impl HostCapability for DeadHost {
///     async fn availability(&self) -> Option<bool> { Some(false) }
///
///     async fn request_device(
///         &self,
///         _options: &RequestDeviceOptions,
///     ) -> Result<DeviceInfo, HostError> {
///         Err(HostError::new(None, "adapter is powered off"))
///     }
///
///     fn set_event_handler(&self, _kind: EventKind, _handler: PlatformHandler) {}
///     fn add_event_listener(&self, _event_type: &str, _listener: PlatformHandler) {}
///     fn remove_event_listener(&self, _event_type: &str, _listener: &PlatformHandler) {}
/// }
/// ```
#[async_trait]
pub trait HostCapability: Send + Sync {
    /// Answers the optional availability query.
    ///
    /// Returns `None` when the platform does not implement the query; the
    /// accessor then treats the presence of the host object itself as the
    /// answer.
    async fn availability(&self) -> Option<bool>;

    /// Shows the platform device chooser and resolves to the selection.
    ///
    /// User dismissal is reported as a [`HostError`] carrying
    /// [`CODE_USER_CANCELLED`](crate::CODE_USER_CANCELLED); every other
    /// failure is the host's own taxonomy and passes through unchanged.
    async fn request_device(
        &self,
        options: &RequestDeviceOptions,
    ) -> Result<DeviceInfo, HostError>;

    /// The device this session was launched from, if the platform tracks one.
    fn referring_device(&self) -> Option<DeviceInfo> {
        None
    }

    /// Overwrites the single handler slot for `kind`.
    ///
    /// The slot holds at most one handler; assigning replaces whatever was
    /// there. The fan-out hub relies on this to plant its hooks — callers
    /// should never assign slots directly once a hub is installed.
    fn set_event_handler(&self, kind: EventKind, handler: PlatformHandler);

    /// Adds a listener to the host's generic event target.
    ///
    /// Independent of the six single-slot kinds; no fan-out semantics. The
    /// only well-known type is [`AVAILABILITY_CHANGED_EVENT`].
    fn add_event_listener(&self, event_type: &str, listener: PlatformHandler);

    /// Removes a previously added generic listener by `Arc` identity.
    fn remove_event_listener(&self, event_type: &str, listener: &PlatformHandler);

    /// Dispatches a synthetic event through the host's generic event target.
    ///
    /// Returns whatever the platform reports for synthetic dispatch; hosts
    /// without the capability report `false`.
    fn dispatch_event(&self, event: &Event) -> bool {
        let _ = event;
        false
    }
}
