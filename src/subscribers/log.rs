//! # Simple logging listener for debugging and demos.
//!
//! [`LogListener`] prints events to stdout in a human-readable format.
//! This is primarily useful for development, debugging, and demo programs.
//!
//! ## Output format
//! ```text
//! [availability] available=true
//! [disconnected] device="dev-1"
//! [value-changed] characteristic="battery_level" value=87
//! [service-added] service="battery_service"
//! ```

use crate::events::{Event, EventKind};
use crate::subscribers::subscribe::Subscribe;

/// Simple stdout logging listener.
///
/// Enabled via the `logging` feature. Not intended for production use —
/// implement a custom [`Subscribe`] for structured logging or metrics.
pub struct LogListener;

impl Subscribe for LogListener {
    fn on_event(&self, e: &Event) {
        match e.kind {
            EventKind::AvailabilityChanged => {
                let available = e.value.as_ref().and_then(|v| v.as_bool()).unwrap_or(false);
                println!("[availability] available={available}");
            }
            EventKind::GattServerDisconnected => {
                println!("[disconnected] device={:?}", e.device.as_deref().unwrap_or("<unknown>"));
            }
            EventKind::CharacteristicValueChanged => {
                println!(
                    "[value-changed] characteristic={:?} value={}",
                    e.characteristic.as_deref().unwrap_or("<unknown>"),
                    e.value.as_ref().map(ToString::to_string).unwrap_or_default()
                );
            }
            EventKind::ServiceAdded => {
                println!("[service-added] service={:?}", e.service.as_deref().unwrap_or("<unknown>"));
            }
            EventKind::ServiceChanged => {
                println!("[service-changed] service={:?}", e.service.as_deref().unwrap_or("<unknown>"));
            }
            EventKind::ServiceRemoved => {
                println!("[service-removed] service={:?}", e.service.as_deref().unwrap_or("<unknown>"));
            }
        }
    }

    fn name(&self) -> &str {
        "log"
    }
}
