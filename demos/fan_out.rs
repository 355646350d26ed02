//! # Demo: fan_out
//!
//! Demonstrates multi-listener fan-out over the host's single-slot callbacks.
//!
//! Shows how to:
//! - Implement the [`Subscribe`] trait and register closures via `listen_fn`.
//! - Observe that dispatch preserves registration order.
//! - Dispose one subscription without disturbing the others.
//!
//! ## Flow
//! ```text
//! SimulatedHost ──► Bluetooth::listen() plants hooks into the six slots
//!     │
//!     ├─► host fires onserviceadded ──► EventHub ──► ui / audit / closure
//!     ├─► audit.dispose()
//!     └─► host fires again ──► EventHub ──► ui / closure
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example fan_out
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bluehub::{
    Bluetooth, DeviceInfo, Event, EventKind, HostCapability, HostError, PlatformHandler,
    RequestDeviceOptions, Subscribe,
};

/// In-process host stand-in: six handler slots and a fixed chooser answer.
#[derive(Default)]
struct SimulatedHost {
    slots: Mutex<Vec<(EventKind, PlatformHandler)>>,
}

impl SimulatedHost {
    /// Fires the hook installed for `event.kind`, as the platform would.
    fn fire(&self, event: Event) {
        let hook = self
            .slots
            .lock()
            .unwrap()
            .iter()
            .find(|(kind, _)| *kind == event.kind)
            .map(|(_, hook)| Arc::clone(hook));
        if let Some(hook) = hook {
            hook(event);
        }
    }
}

#[async_trait]
impl HostCapability for SimulatedHost {
    async fn availability(&self) -> Option<bool> {
        Some(true)
    }

    async fn request_device(
        &self,
        _options: &RequestDeviceOptions,
    ) -> Result<DeviceInfo, HostError> {
        Ok(DeviceInfo::new("sim-0").with_name("Simulated Peripheral"))
    }

    fn set_event_handler(&self, kind: EventKind, handler: PlatformHandler) {
        let mut slots = self.slots.lock().unwrap();
        slots.retain(|(k, _)| *k != kind);
        slots.push((kind, handler));
    }

    fn add_event_listener(&self, _event_type: &str, _listener: PlatformHandler) {}
    fn remove_event_listener(&self, _event_type: &str, _listener: &PlatformHandler) {}
}

/// A named listener that prints what the UI layer would render.
struct UiBridge;

impl Subscribe for UiBridge {
    fn on_event(&self, ev: &Event) {
        match ev.kind {
            EventKind::ServiceAdded => {
                println!("[ui] service appeared: {:?}", ev.service.as_deref());
            }
            EventKind::GattServerDisconnected => {
                println!("[ui] lost device: {:?}", ev.device.as_deref());
            }
            _ => {}
        }
    }

    fn name(&self) -> &str {
        "ui"
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .init();

    let host = Arc::new(SimulatedHost::default());
    let bt = Bluetooth::new(host.clone());

    println!("available: {}\n", bt.availability().await);

    // Three independent registrations on the same kind.
    let _ui = bt.listen(EventKind::ServiceAdded, Arc::new(UiBridge))?;
    let audit = bt.listen_fn(EventKind::ServiceAdded, |ev: &Event| {
        println!("[audit] seq={} service={:?}", ev.seq, ev.service.as_deref());
    })?;
    let _count = bt.listen_fn(EventKind::ServiceAdded, {
        let total = Arc::new(Mutex::new(0u32));
        move |_ev: &Event| {
            let mut total = total.lock().unwrap();
            *total += 1;
            println!("[count] {total} so far");
        }
    })?;

    println!("-- host announces battery_service --");
    host.fire(Event::service_event(EventKind::ServiceAdded, "battery_service"));

    println!("\n-- audit listener disposed; host announces heart_rate --");
    audit.dispose();
    host.fire(Event::service_event(EventKind::ServiceAdded, "heart_rate"));

    println!("\n-- disconnect reaches only the ui listener --");
    let _link = bt.listen(EventKind::GattServerDisconnected, Arc::new(UiBridge))?;
    host.fire(Event::disconnected("sim-0"));

    Ok(())
}
