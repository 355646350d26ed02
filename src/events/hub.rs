//! # Multi-listener fan-out over single-slot host callbacks.
//!
//! A host exposes exactly one handler slot per [`EventKind`]; [`EventHub`]
//! installs its own hook into each slot and fans every host invocation out to
//! all registered listeners.
//!
//! ## Architecture
//! ```text
//! host fires slot hook ──► EventHub::dispatch(event)
//!                               │ snapshot of the kind's sequence
//!                 ┌─────────────┼─────────────┐
//!                 ▼             ▼             ▼
//!         listener1.on_event  listener2    listenerN
//!                 └── panic caught, reported, fan-out continues
//! ```
//!
//! ## Rules
//! - **Insertion order is invocation order** per kind.
//! - **Identity removal**: each registration gets its own entry id; the same
//!   listener registered twice fires twice and is removed one entry at a time.
//! - **Stable pass**: dispatch walks a snapshot taken at dispatch start, so a
//!   listener disposing itself (or others) mid-pass never skips or
//!   double-invokes anyone in that pass.
//! - **No lock across callbacks**: the slot lock is released before any
//!   listener runs, so listeners may re-enter `register`/`dispose` freely.
//! - **Isolation** (default): a panicking listener is caught and reported via
//!   `tracing`; the rest of the pass still runs. Disable with
//!   `Config::isolate_panics = false` to let panics surface.
//!
//! Callers must not assign host slots directly once a hub hook is installed —
//! that would clobber the fan-out. Registration and disposal go through the
//! hub (via `Bluetooth::listen` / [`Subscription::dispose`]).

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tracing::{debug, error};

use crate::events::event::{Event, EventKind};
use crate::host::{HostCapability, PlatformHandler};
use crate::subscribers::ListenerRef;

/// One registration: the listener plus the id used for identity removal.
struct Entry {
    id: u64,
    listener: ListenerRef,
}

/// Fan-out hub: a fixed dispatch table from event kind to listener sequence.
///
/// One hub instance is owned by each accessor; independent hubs never share
/// state. The table has exactly [`EventKind::COUNT`] slots, indexed by
/// [`EventKind::index`], so unknown kinds cannot exist.
pub struct EventHub {
    slots: [Mutex<Vec<Entry>>; EventKind::COUNT],
    hooked: [AtomicBool; EventKind::COUNT],
    next_id: AtomicU64,
    isolate_panics: bool,
    /// Back-reference handed out to subscriptions and host hooks.
    weak_self: Weak<EventHub>,
}

impl EventHub {
    /// Creates an empty hub.
    ///
    /// `isolate_panics` controls whether a panicking listener is caught and
    /// reported (`true`, the default) or allowed to unwind out of dispatch,
    /// skipping the rest of the pass (`false`).
    pub fn new(isolate_panics: bool) -> Arc<Self> {
        Arc::new_cyclic(|weak| Self {
            slots: std::array::from_fn(|_| Mutex::new(Vec::new())),
            hooked: std::array::from_fn(|_| AtomicBool::new(false)),
            next_id: AtomicU64::new(0),
            isolate_panics,
            weak_self: weak.clone(),
        })
    }

    /// Appends a listener to the sequence for `kind`.
    ///
    /// Never errors: duplicate registrations are allowed and both fire, each
    /// with its own [`Subscription`].
    #[must_use = "dropping the handle leaves the registration active but undisposable"]
    pub fn register(&self, kind: EventKind, listener: ListenerRef) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.lock_slot(kind).push(Entry {
            id,
            listener,
        });
        debug!(kind = %kind, id, "listener registered");
        Subscription {
            hub: self.weak_self.clone(),
            kind,
            id,
        }
    }

    /// Fans the event out to every listener registered for `event.kind`,
    /// in registration order.
    ///
    /// Called by the installed host hooks; also callable directly to inject
    /// synthetic events (tests, simulations). Walks a snapshot taken at entry:
    /// registrations and disposals performed by listeners take effect on the
    /// next dispatch. Dispatching a kind with no listeners is a no-op.
    pub fn dispatch(&self, event: &Event) {
        let snapshot: Vec<ListenerRef> = {
            let slot = self.lock_slot(event.kind);
            slot.iter().map(|e| Arc::clone(&e.listener)).collect()
        };

        for listener in snapshot {
            if self.isolate_panics {
                let hook = AssertUnwindSafe(|| listener.on_event(event));
                if let Err(cause) = panic::catch_unwind(hook) {
                    error!(
                        listener = listener.name(),
                        kind = %event.kind,
                        seq = event.seq,
                        "listener panicked during dispatch: {}",
                        panic_message(&cause),
                    );
                }
            } else {
                listener.on_event(event);
            }
        }
    }

    /// Installs this hub's fan-out hook into the host's slot for `kind`.
    ///
    /// Idempotent per hub: the slot is overwritten once; later calls are
    /// no-ops. The hook holds only a `Weak` reference, so a dropped hub does
    /// not keep itself alive through the host.
    pub fn install(&self, host: &dyn HostCapability, kind: EventKind) {
        if self.hooked[kind.index()].swap(true, Ordering::SeqCst) {
            return;
        }
        let hub = self.weak_self.clone();
        let hook: PlatformHandler = Arc::new(move |event: Event| {
            if let Some(hub) = hub.upgrade() {
                hub.dispatch(&event);
            }
        });
        host.set_event_handler(kind, hook);
        debug!(kind = %kind, "fan-out hook installed");
    }

    /// Installs fan-out hooks for all six kinds.
    pub fn install_all(&self, host: &dyn HostCapability) {
        for kind in EventKind::ALL {
            self.install(host, kind);
        }
    }

    /// Returns how many listeners are currently registered for `kind`.
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.lock_slot(kind).len()
    }

    /// Removes the entry with the given id; absent ids are ignored.
    fn remove(&self, kind: EventKind, id: u64) {
        let mut slot = self.lock_slot(kind);
        let before = slot.len();
        slot.retain(|e| e.id != id);
        if slot.len() < before {
            debug!(kind = %kind, id, "listener disposed");
        }
    }

    /// Locks one slot, recovering from poisoning.
    ///
    /// The lock is never held across listener callbacks, so a poisoned slot
    /// can only mean a panic inside the vector ops themselves; the data is
    /// still a valid listener sequence either way.
    fn lock_slot(&self, kind: EventKind) -> MutexGuard<'_, Vec<Entry>> {
        self.slots[kind.index()]
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Extracts a printable message from a caught panic payload.
fn panic_message(cause: &Box<dyn Any + Send>) -> String {
    if let Some(msg) = cause.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = cause.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Disposal handle for one registration.
///
/// Removes exactly the entry it was returned for — other registrations of the
/// same listener stay live. Disposal is explicit: dropping the handle does
/// **not** unregister (a fire-and-forget listener outlives its handle).
///
/// ## Rules
/// - `dispose` is idempotent: the second call is a no-op, not an error.
/// - Disposing after the hub itself was dropped is a no-op.
#[derive(Debug)]
pub struct Subscription {
    hub: Weak<EventHub>,
    kind: EventKind,
    id: u64,
}

impl Subscription {
    /// Removes this registration from its kind's sequence.
    pub fn dispose(&self) {
        if let Some(hub) = self.hub.upgrade() {
            hub.remove(self.kind, self.id);
        }
    }

    /// The kind this handle was registered under.
    #[inline]
    pub fn kind(&self) -> EventKind {
        self.kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subscribers::ListenFn;
    use serde_json::json;

    /// Test listener that appends "label:id" markers to a shared log.
    fn recorder(
        label: &'static str,
        log: &Arc<Mutex<Vec<String>>>,
    ) -> ListenerRef {
        let log = Arc::clone(log);
        ListenFn::arc(label, move |ev: &Event| {
            let id = ev
                .value
                .as_ref()
                .and_then(|v| v.get("id"))
                .and_then(|v| v.as_i64())
                .unwrap_or(0);
            log.lock().unwrap().push(format!("{label}:{id}"));
        })
    }

    fn taken(log: &Arc<Mutex<Vec<String>>>) -> Vec<String> {
        log.lock().unwrap().drain(..).collect()
    }

    #[test]
    fn test_dispatch_invokes_in_registration_order() {
        let hub = EventHub::new(true);
        let log = Arc::new(Mutex::new(Vec::new()));
        let _a = hub.register(EventKind::ServiceAdded, recorder("a", &log));
        let _b = hub.register(EventKind::ServiceAdded, recorder("b", &log));
        let _c = hub.register(EventKind::ServiceAdded, recorder("c", &log));

        hub.dispatch(&Event::new(EventKind::ServiceAdded).with_value(json!({ "id": 7 })));
        assert_eq!(taken(&log), vec!["a:7", "b:7", "c:7"]);
    }

    #[test]
    fn test_scenario_dispose_middle_listener() {
        let hub = EventHub::new(true);
        let log = Arc::new(Mutex::new(Vec::new()));
        let _a = hub.register(EventKind::ServiceAdded, recorder("a", &log));
        let b = hub.register(EventKind::ServiceAdded, recorder("b", &log));
        let _c = hub.register(EventKind::ServiceAdded, recorder("c", &log));

        hub.dispatch(&Event::new(EventKind::ServiceAdded).with_value(json!({ "id": 1 })));
        assert_eq!(taken(&log), vec!["a:1", "b:1", "c:1"]);

        b.dispose();
        hub.dispatch(&Event::new(EventKind::ServiceAdded).with_value(json!({ "id": 2 })));
        assert_eq!(taken(&log), vec!["a:2", "c:2"]);
    }

    #[test]
    fn test_duplicate_registration_fires_twice_and_disposes_independently() {
        let hub = EventHub::new(true);
        let log = Arc::new(Mutex::new(Vec::new()));
        let listener = recorder("x", &log);

        let first = hub.register(EventKind::ServiceChanged, Arc::clone(&listener));
        let _second = hub.register(EventKind::ServiceChanged, listener);

        hub.dispatch(&Event::new(EventKind::ServiceChanged).with_value(json!({ "id": 1 })));
        assert_eq!(taken(&log), vec!["x:1", "x:1"]);

        // Removing via one handle must not touch the other registration.
        first.dispose();
        hub.dispatch(&Event::new(EventKind::ServiceChanged).with_value(json!({ "id": 2 })));
        assert_eq!(taken(&log), vec!["x:2"]);
    }

    #[test]
    fn test_double_dispose_is_noop() {
        let hub = EventHub::new(true);
        let log = Arc::new(Mutex::new(Vec::new()));
        let a = hub.register(EventKind::ServiceRemoved, recorder("a", &log));
        let _b = hub.register(EventKind::ServiceRemoved, recorder("b", &log));

        a.dispose();
        a.dispose();
        assert_eq!(hub.listener_count(EventKind::ServiceRemoved), 1);

        hub.dispatch(&Event::new(EventKind::ServiceRemoved).with_value(json!({ "id": 3 })));
        assert_eq!(taken(&log), vec!["b:3"]);
    }

    #[test]
    fn test_dispose_after_hub_dropped_is_noop() {
        let hub = EventHub::new(true);
        let log = Arc::new(Mutex::new(Vec::new()));
        let a = hub.register(EventKind::ServiceAdded, recorder("a", &log));
        drop(hub);
        a.dispose();
    }

    #[test]
    fn test_self_disposal_does_not_affect_current_pass() {
        let hub = EventHub::new(true);
        let log = Arc::new(Mutex::new(Vec::new()));

        let _a = hub.register(EventKind::ServiceAdded, recorder("a", &log));

        // "b" disposes itself the first time it fires.
        let own_handle: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));
        let slot = Arc::clone(&own_handle);
        let log_b = Arc::clone(&log);
        let b = hub.register(
            EventKind::ServiceAdded,
            ListenFn::arc("b", move |_ev: &Event| {
                log_b.lock().unwrap().push("b".to_string());
                if let Some(handle) = slot.lock().unwrap().as_ref() {
                    handle.dispose();
                }
            }),
        );
        *own_handle.lock().unwrap() = Some(b);

        let _c = hub.register(EventKind::ServiceAdded, recorder("c", &log));

        // First pass: the snapshot keeps "c" in even though "b" unregisters itself.
        hub.dispatch(&Event::new(EventKind::ServiceAdded).with_value(json!({ "id": 1 })));
        assert_eq!(taken(&log), vec!["a:1", "b", "c:1"]);

        // Second pass: "b" is gone.
        hub.dispatch(&Event::new(EventKind::ServiceAdded).with_value(json!({ "id": 2 })));
        assert_eq!(taken(&log), vec!["a:2", "c:2"]);
    }

    #[test]
    fn test_kinds_are_independent() {
        let hub = EventHub::new(true);
        let log = Arc::new(Mutex::new(Vec::new()));
        let _added = hub.register(EventKind::ServiceAdded, recorder("added", &log));
        let _removed = hub.register(EventKind::ServiceRemoved, recorder("removed", &log));

        hub.dispatch(&Event::new(EventKind::ServiceRemoved).with_value(json!({ "id": 5 })));
        assert_eq!(taken(&log), vec!["removed:5"]);
        assert_eq!(hub.listener_count(EventKind::ServiceAdded), 1);
        assert_eq!(hub.listener_count(EventKind::GattServerDisconnected), 0);
    }

    #[test]
    fn test_dispatch_with_no_listeners_is_noop() {
        let hub = EventHub::new(true);
        hub.dispatch(&Event::availability(true));
    }

    #[test]
    fn test_panicking_listener_is_isolated() {
        let hub = EventHub::new(true);
        let log = Arc::new(Mutex::new(Vec::new()));
        let _boom = hub.register(
            EventKind::GattServerDisconnected,
            ListenFn::arc("boom", |_ev: &Event| panic!("listener blew up")),
        );
        let _after = hub.register(EventKind::GattServerDisconnected, recorder("after", &log));

        hub.dispatch(&Event::disconnected("dev-1").with_value(json!({ "id": 9 })));
        assert_eq!(taken(&log), vec!["after:9"]);
    }

    #[test]
    #[should_panic(expected = "listener blew up")]
    fn test_panic_surfaces_when_isolation_disabled() {
        let hub = EventHub::new(false);
        let _boom = hub.register(
            EventKind::GattServerDisconnected,
            ListenFn::arc("boom", |_ev: &Event| panic!("listener blew up")),
        );
        hub.dispatch(&Event::disconnected("dev-1"));
    }
}
