//! # Lifecycle events delivered by the host's Bluetooth stack.
//!
//! The [`EventKind`] enum is the closed set of six single-slot callback
//! identifiers a host exposes, across three categories:
//! - **Capability events**: adapter availability flips (`AvailabilityChanged`)
//! - **Device events**: GATT link loss (`GattServerDisconnected`) and
//!   characteristic notifications (`CharacteristicValueChanged`)
//! - **Service events**: service table changes (`ServiceAdded`,
//!   `ServiceChanged`, `ServiceRemoved`)
//!
//! The [`Event`] struct carries the payload handed to listeners: optional
//! device/service/characteristic identifiers plus an opaque JSON value whose
//! shape is entirely the host's business.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases
//! monotonically. Use `seq` to restore the exact order when events are
//! recorded out of band (logs, test captures).
//!
//! ## Example
//! ```rust
//! use bluehub::{Event, EventKind};
//!
//! let ev = Event::new(EventKind::CharacteristicValueChanged)
//!     .with_device("dev-1")
//!     .with_characteristic("battery_level")
//!     .with_value(87);
//!
//! assert_eq!(ev.kind, EventKind::CharacteristicValueChanged);
//! assert_eq!(ev.characteristic.as_deref(), Some("battery_level"));
//! ```

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::time::SystemTime;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// The closed set of single-slot lifecycle callbacks a host exposes.
///
/// Exactly six kinds exist; the set is fixed at compile time and the fan-out
/// hub keys its dispatch table by [`EventKind::index`]. Adding a variant is a
/// breaking change by design — every `match` over the kinds is exhaustive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Adapter availability flipped (radio toggled, permission revoked).
    ///
    /// Sets:
    /// - `value`: the new availability as a JSON boolean
    AvailabilityChanged,

    /// The remote GATT server dropped the connection.
    ///
    /// Sets:
    /// - `device`: identifier of the disconnected device
    GattServerDisconnected,

    /// A characteristic the host is watching produced a new value.
    ///
    /// Sets:
    /// - `characteristic`: characteristic identifier
    /// - `value`: opaque host-encoded value
    CharacteristicValueChanged,

    /// A primary service appeared on a connected device.
    ///
    /// Sets:
    /// - `service`: service identifier
    ServiceAdded,

    /// An existing service changed shape.
    ///
    /// Sets:
    /// - `service`: service identifier
    ServiceChanged,

    /// A service disappeared from a connected device.
    ///
    /// Sets:
    /// - `service`: service identifier
    ServiceRemoved,
}

impl EventKind {
    /// Number of event kinds; the fan-out hub sizes its dispatch table with it.
    pub const COUNT: usize = 6;

    /// All kinds in declaration order. Index in this table equals [`EventKind::index`].
    pub const ALL: [EventKind; EventKind::COUNT] = [
        EventKind::AvailabilityChanged,
        EventKind::GattServerDisconnected,
        EventKind::CharacteristicValueChanged,
        EventKind::ServiceAdded,
        EventKind::ServiceChanged,
        EventKind::ServiceRemoved,
    ];

    /// Stable position of this kind in the fixed dispatch table.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            EventKind::AvailabilityChanged => 0,
            EventKind::GattServerDisconnected => 1,
            EventKind::CharacteristicValueChanged => 2,
            EventKind::ServiceAdded => 3,
            EventKind::ServiceChanged => 4,
            EventKind::ServiceRemoved => 5,
        }
    }

    /// The host-side name of the single-slot handler property for this kind.
    pub const fn slot_name(self) -> &'static str {
        match self {
            EventKind::AvailabilityChanged => "onavailabilitychanged",
            EventKind::GattServerDisconnected => "ongattserverdisconnected",
            EventKind::CharacteristicValueChanged => "oncharacteristicvaluechanged",
            EventKind::ServiceAdded => "onserviceadded",
            EventKind::ServiceChanged => "onservicechanged",
            EventKind::ServiceRemoved => "onserviceremoved",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slot_name())
    }
}

/// Lifecycle event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,

    /// Identifier of the device the event concerns, if applicable.
    pub device: Option<Arc<str>>,
    /// Identifier of the service the event concerns, if applicable.
    pub service: Option<Arc<str>>,
    /// Identifier of the characteristic the event concerns, if applicable.
    pub characteristic: Option<Arc<str>>,
    /// Opaque payload value; its shape is owned by the host.
    pub value: Option<serde_json::Value>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next
    /// sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            device: None,
            service: None,
            characteristic: None,
            value: None,
        }
    }

    /// Attaches a device identifier.
    #[inline]
    pub fn with_device(mut self, device: impl Into<Arc<str>>) -> Self {
        self.device = Some(device.into());
        self
    }

    /// Attaches a service identifier.
    #[inline]
    pub fn with_service(mut self, service: impl Into<Arc<str>>) -> Self {
        self.service = Some(service.into());
        self
    }

    /// Attaches a characteristic identifier.
    #[inline]
    pub fn with_characteristic(mut self, characteristic: impl Into<Arc<str>>) -> Self {
        self.characteristic = Some(characteristic.into());
        self
    }

    /// Attaches an opaque payload value.
    #[inline]
    pub fn with_value(mut self, value: impl Into<serde_json::Value>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Creates an availability-flip event.
    #[inline]
    pub fn availability(available: bool) -> Self {
        Event::new(EventKind::AvailabilityChanged).with_value(available)
    }

    /// Creates a GATT-server-disconnected event for the given device.
    #[inline]
    pub fn disconnected(device: impl Into<Arc<str>>) -> Self {
        Event::new(EventKind::GattServerDisconnected).with_device(device)
    }

    /// Creates a characteristic-value-changed event.
    #[inline]
    pub fn value_changed(
        characteristic: impl Into<Arc<str>>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        Event::new(EventKind::CharacteristicValueChanged)
            .with_characteristic(characteristic)
            .with_value(value)
    }

    /// Creates a service lifecycle event (`ServiceAdded` / `ServiceChanged` /
    /// `ServiceRemoved`) for the given service.
    #[inline]
    pub fn service_event(kind: EventKind, service: impl Into<Arc<str>>) -> Self {
        Event::new(kind).with_service(service)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_matches_position_in_all() {
        for (i, kind) in EventKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i, "kind {kind} out of place");
        }
    }

    #[test]
    fn test_slot_names_match_host_properties() {
        assert_eq!(EventKind::AvailabilityChanged.slot_name(), "onavailabilitychanged");
        assert_eq!(
            EventKind::GattServerDisconnected.slot_name(),
            "ongattserverdisconnected"
        );
        assert_eq!(
            EventKind::CharacteristicValueChanged.slot_name(),
            "oncharacteristicvaluechanged"
        );
        assert_eq!(EventKind::ServiceAdded.slot_name(), "onserviceadded");
        assert_eq!(EventKind::ServiceChanged.slot_name(), "onservicechanged");
        assert_eq!(EventKind::ServiceRemoved.slot_name(), "onserviceremoved");
    }

    #[test]
    fn test_seq_is_monotonic() {
        let a = Event::new(EventKind::ServiceAdded);
        let b = Event::new(EventKind::ServiceAdded);
        assert!(b.seq > a.seq);
    }
}
