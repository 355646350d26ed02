//! # Bluetooth accessor: forwarding, normalization, and listener wiring.
//!
//! [`Bluetooth`] is the single entry point callers hold. It owns the fan-out
//! [`EventHub`] and an optional handle to the platform's
//! [`HostCapability`]; every operation either forwards to the host or
//! registers listeners with the hub.
//!
//! ## Key responsibilities
//! - normalize the availability check (absent host → `false`, host without
//!   the optional query → `true`)
//! - translate the host's user-cancellation code into
//!   [`RequestOutcome::Cancelled`] instead of an error
//! - plant fan-out hooks into the host's six handler slots before listeners
//!   can observe events ([`Config::install`] picks eager or lazy timing)
//! - pass the generic event-target pair through untouched
//!
//! ## High-level architecture
//! ```text
//! caller ──► Bluetooth ─────────────────────► HostCapability
//!              │  availability / request_device / referring_device
//!              │  add_event_listener / remove_event_listener (pass-through)
//!              │
//!              │ listen(kind, listener)
//!              ▼
//!           EventHub ◄── slot hooks ◄── host event delivery
//!              │ fan-out (snapshot walk, registration order)
//!              ▼
//!        registered listeners
//! ```

use std::sync::Arc;

use tracing::debug;

use crate::core::builder::BluetoothBuilder;
use crate::core::config::{Config, InstallPolicy};
use crate::error::BluetoothError;
use crate::events::{Event, EventHub, EventKind, Subscription};
use crate::host::{DeviceInfo, HostCapability, PlatformHandler, RequestDeviceOptions};
use crate::subscribers::{ListenFn, ListenerRef};

/// Outcome of a device-chooser request.
///
/// User dismissal is an expected outcome, not an error — host failures other
/// than the reserved cancellation code are raised as
/// [`BluetoothError::Host`] instead.
#[derive(Clone, Debug, PartialEq)]
pub enum RequestOutcome {
    /// The user picked a device.
    Selected(DeviceInfo),
    /// The user dismissed the chooser.
    Cancelled,
}

impl RequestOutcome {
    /// Returns `true` for the cancelled outcome.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, RequestOutcome::Cancelled)
    }

    /// Returns the selected device, if any.
    #[inline]
    pub fn device(&self) -> Option<&DeviceInfo> {
        match self {
            RequestOutcome::Selected(device) => Some(device),
            RequestOutcome::Cancelled => None,
        }
    }
}

/// Accessor over the host's Bluetooth capability.
///
/// Constructed once (per host object) via [`Bluetooth::new`] or
/// [`Bluetooth::builder`] and shared by reference; every instance owns an
/// independent [`EventHub`], so separate accessors never see each other's
/// listeners.
pub struct Bluetooth {
    host: Option<Arc<dyn HostCapability>>,
    hub: Arc<EventHub>,
    cfg: Config,
}

impl Bluetooth {
    /// Creates an accessor over the given host with default configuration.
    pub fn new(host: Arc<dyn HostCapability>) -> Self {
        Self::builder().with_host(host).build()
    }

    /// Returns a builder; use it to configure the hub or to build a
    /// host-less accessor (every operation then reports `Unavailable`).
    pub fn builder() -> BluetoothBuilder {
        BluetoothBuilder::new()
    }

    pub(crate) fn assemble(
        host: Option<Arc<dyn HostCapability>>,
        hub: Arc<EventHub>,
        cfg: Config,
    ) -> Self {
        Self { host, hub, cfg }
    }

    /// Returns `true` when a host capability object is present at all.
    #[inline]
    pub fn is_capable(&self) -> bool {
        self.host.is_some()
    }

    /// Answers whether Bluetooth can be used right now.
    ///
    /// Never errors — this is the probe:
    /// - no host object → `false`
    /// - host present but without the optional query → `true`
    /// - otherwise → the host's answer
    pub async fn availability(&self) -> bool {
        match &self.host {
            None => false,
            Some(host) => host.availability().await.unwrap_or(true),
        }
    }

    /// Shows the host device chooser and reports the outcome.
    ///
    /// The host's reserved cancellation code becomes
    /// [`RequestOutcome::Cancelled`]; any other host failure is raised
    /// unchanged as [`BluetoothError::Host`].
    pub async fn request_device(
        &self,
        options: &RequestDeviceOptions,
    ) -> Result<RequestOutcome, BluetoothError> {
        let host = self.host()?;
        match host.request_device(options).await {
            Ok(device) => Ok(RequestOutcome::Selected(device)),
            Err(err) if err.is_user_cancelled() => {
                debug!("device chooser dismissed by user");
                Ok(RequestOutcome::Cancelled)
            }
            Err(err) => Err(BluetoothError::Host(err)),
        }
    }

    /// The device this session was launched from, if the host tracks one.
    pub fn referring_device(&self) -> Result<Option<DeviceInfo>, BluetoothError> {
        Ok(self.host()?.referring_device())
    }

    /// Registers a listener for one event kind and returns its disposal
    /// handle.
    ///
    /// Ensures the fan-out hooks are planted first (per [`Config::install`]),
    /// so the host cannot deliver an event this listener should have seen
    /// into an unhooked slot. Duplicate registrations are fine — each gets an
    /// independent handle and both fire.
    pub fn listen(
        &self,
        kind: EventKind,
        listener: ListenerRef,
    ) -> Result<Subscription, BluetoothError> {
        let host = self.host()?;
        match self.cfg.install {
            InstallPolicy::Eager => self.hub.install_all(host.as_ref()),
            InstallPolicy::Lazy => self.hub.install(host.as_ref(), kind),
        }
        Ok(self.hub.register(kind, listener))
    }

    /// Registers a closure for one event kind.
    ///
    /// Shorthand for wrapping the closure in a
    /// [`ListenFn`](crate::ListenFn) named after the kind's slot.
    pub fn listen_fn<F>(&self, kind: EventKind, f: F) -> Result<Subscription, BluetoothError>
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        self.listen(kind, ListenFn::arc(kind.slot_name(), f))
    }

    /// Adds a listener to the host's generic event target (pass-through).
    ///
    /// No fan-out semantics: the host manages this listener list itself.
    /// Keep the handler `Arc` around — it is the removal key.
    pub fn add_event_listener(
        &self,
        event_type: &str,
        listener: PlatformHandler,
    ) -> Result<(), BluetoothError> {
        self.host()?.add_event_listener(event_type, listener);
        Ok(())
    }

    /// Removes a generic listener previously added (pass-through).
    pub fn remove_event_listener(
        &self,
        event_type: &str,
        listener: &PlatformHandler,
    ) -> Result<(), BluetoothError> {
        self.host()?.remove_event_listener(event_type, listener);
        Ok(())
    }

    /// Dispatches a synthetic event through the host (pass-through).
    pub fn dispatch_event(&self, event: &Event) -> Result<bool, BluetoothError> {
        Ok(self.host()?.dispatch_event(event))
    }

    /// The accessor's fan-out hub, for advanced wiring and tests.
    #[inline]
    pub fn hub(&self) -> &Arc<EventHub> {
        &self.hub
    }

    fn host(&self) -> Result<&Arc<dyn HostCapability>, BluetoothError> {
        self.host.as_ref().ok_or(BluetoothError::Unavailable)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::json;

    use super::*;
    use crate::error::HostError;
    use crate::host::AVAILABILITY_CHANGED_EVENT;

    /// Scripted host: records slot/generic handler assignments and serves
    /// pre-loaded chooser results.
    struct MockHost {
        available: Option<bool>,
        chooser: Mutex<Vec<Result<DeviceInfo, HostError>>>,
        slots: Mutex<HashMap<usize, PlatformHandler>>,
        generic: Mutex<Vec<(String, PlatformHandler)>>,
    }

    impl MockHost {
        fn new(available: Option<bool>) -> Arc<Self> {
            Arc::new(Self {
                available,
                chooser: Mutex::new(Vec::new()),
                slots: Mutex::new(HashMap::new()),
                generic: Mutex::new(Vec::new()),
            })
        }

        fn script_chooser(&self, result: Result<DeviceInfo, HostError>) {
            self.chooser.lock().unwrap().push(result);
        }

        fn hooked_slots(&self) -> usize {
            self.slots.lock().unwrap().len()
        }

        /// Fires the installed slot hook the way the platform would.
        fn fire(&self, event: Event) {
            let hook = self
                .slots
                .lock()
                .unwrap()
                .get(&event.kind.index())
                .cloned()
                .expect("no hook installed for fired kind");
            hook(event);
        }
    }

    #[async_trait]
    impl HostCapability for MockHost {
        async fn availability(&self) -> Option<bool> {
            self.available
        }

        async fn request_device(
            &self,
            _options: &RequestDeviceOptions,
        ) -> Result<DeviceInfo, HostError> {
            self.chooser.lock().unwrap().remove(0)
        }

        fn set_event_handler(&self, kind: EventKind, handler: PlatformHandler) {
            self.slots.lock().unwrap().insert(kind.index(), handler);
        }

        fn add_event_listener(&self, event_type: &str, listener: PlatformHandler) {
            self.generic
                .lock()
                .unwrap()
                .push((event_type.to_string(), listener));
        }

        fn remove_event_listener(&self, event_type: &str, listener: &PlatformHandler) {
            self.generic
                .lock()
                .unwrap()
                .retain(|(ty, l)| ty != event_type || !Arc::ptr_eq(l, listener));
        }
    }

    fn accessor(host: Arc<MockHost>) -> Bluetooth {
        Bluetooth::new(host)
    }

    #[tokio::test]
    async fn test_cancellation_code_yields_cancelled_outcome() {
        let host = MockHost::new(Some(true));
        host.script_chooser(Err(HostError::cancelled()));

        let bt = accessor(host);
        let outcome = bt
            .request_device(&RequestDeviceOptions::accept_all())
            .await
            .unwrap();
        assert!(outcome.is_cancelled());
        assert_eq!(outcome.device(), None);
    }

    #[tokio::test]
    async fn test_other_host_errors_propagate_unchanged() {
        let host = MockHost::new(Some(true));
        host.script_chooser(Err(HostError::new(19, "connection congested")));

        let bt = accessor(host);
        let err = bt
            .request_device(&RequestDeviceOptions::accept_all())
            .await
            .unwrap_err();
        match err {
            BluetoothError::Host(host_err) => {
                assert_eq!(host_err.code, Some(19));
                assert_eq!(host_err.message, "connection congested");
            }
            other => panic!("expected host error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_selected_device_comes_back() {
        let host = MockHost::new(Some(true));
        host.script_chooser(Ok(DeviceInfo::new("dev-1").with_name("Aranet4")));

        let bt = accessor(host);
        let outcome = bt
            .request_device(&RequestDeviceOptions::accept_all())
            .await
            .unwrap();
        assert_eq!(outcome.device().map(|d| d.id.as_str()), Some("dev-1"));
    }

    #[tokio::test]
    async fn test_availability_falls_back_to_host_presence() {
        // Host present, no availability query: presence wins.
        let bt = accessor(MockHost::new(None));
        assert!(bt.availability().await);
        assert!(bt.is_capable());

        // No host at all: not available, and not an error.
        let bare = Bluetooth::builder().build();
        assert!(!bare.availability().await);
        assert!(!bare.is_capable());
    }

    #[tokio::test]
    async fn test_availability_query_is_forwarded() {
        assert!(!accessor(MockHost::new(Some(false))).availability().await);
        assert!(accessor(MockHost::new(Some(true))).availability().await);
    }

    #[tokio::test]
    async fn test_operations_without_host_report_unavailable() {
        let bare = Bluetooth::builder().build();

        let err = bare
            .request_device(&RequestDeviceOptions::accept_all())
            .await
            .unwrap_err();
        assert_eq!(err.as_label(), "bluetooth_unavailable");

        let err = bare.listen_fn(EventKind::ServiceAdded, |_ev| {}).unwrap_err();
        assert_eq!(err.as_label(), "bluetooth_unavailable");

        let err = bare.referring_device().unwrap_err();
        assert_eq!(err.as_label(), "bluetooth_unavailable");
    }

    #[test]
    fn test_eager_install_hooks_every_slot_on_first_listen() {
        let host = MockHost::new(Some(true));
        let bt = accessor(host.clone());
        assert_eq!(host.hooked_slots(), 0);

        let _sub = bt.listen_fn(EventKind::ServiceAdded, |_ev| {}).unwrap();
        assert_eq!(host.hooked_slots(), EventKind::COUNT);
    }

    #[test]
    fn test_lazy_install_hooks_only_the_registered_slot() {
        let host = MockHost::new(Some(true));
        let bt = Bluetooth::builder()
            .with_host(host.clone())
            .with_config(Config {
                install: InstallPolicy::Lazy,
                ..Config::default()
            })
            .build();

        let _sub = bt.listen_fn(EventKind::ServiceAdded, |_ev| {}).unwrap();
        assert_eq!(host.hooked_slots(), 1);

        let _sub2 = bt
            .listen_fn(EventKind::GattServerDisconnected, |_ev| {})
            .unwrap();
        assert_eq!(host.hooked_slots(), 2);
    }

    #[test]
    fn test_host_fired_event_fans_out_to_listeners() {
        let host = MockHost::new(Some(true));
        let bt = accessor(host.clone());

        let seen = Arc::new(Mutex::new(Vec::new()));
        let first = Arc::clone(&seen);
        let second = Arc::clone(&seen);
        let _a = bt
            .listen_fn(EventKind::CharacteristicValueChanged, move |ev| {
                first.lock().unwrap().push(format!("a:{}", ev.value.clone().unwrap()));
            })
            .unwrap();
        let _b = bt
            .listen_fn(EventKind::CharacteristicValueChanged, move |ev| {
                second.lock().unwrap().push(format!("b:{}", ev.value.clone().unwrap()));
            })
            .unwrap();

        host.fire(Event::value_changed("battery_level", json!(87)));
        assert_eq!(
            seen.lock().unwrap().clone(),
            vec!["a:87".to_string(), "b:87".to_string()]
        );
    }

    #[test]
    fn test_generic_listener_pair_is_passed_through() {
        let host = MockHost::new(Some(true));
        let bt = accessor(host.clone());

        let listener: PlatformHandler = Arc::new(|_event| {});
        bt.add_event_listener(AVAILABILITY_CHANGED_EVENT, Arc::clone(&listener))
            .unwrap();
        assert_eq!(host.generic.lock().unwrap().len(), 1);

        // Removing a different handle is a no-op; removing ours clears it.
        let other: PlatformHandler = Arc::new(|_event| {});
        bt.remove_event_listener(AVAILABILITY_CHANGED_EVENT, &other)
            .unwrap();
        assert_eq!(host.generic.lock().unwrap().len(), 1);
        bt.remove_event_listener(AVAILABILITY_CHANGED_EVENT, &listener)
            .unwrap();
        assert!(host.generic.lock().unwrap().is_empty());
    }
}
