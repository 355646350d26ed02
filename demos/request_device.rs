//! # Demo: request_device
//!
//! Demonstrates the device chooser flow: availability probe, a filtered
//! request that succeeds, and a request the user dismisses.
//!
//! Shows how to:
//! - Build chooser options ([`RequestDeviceOptions`], [`DeviceFilter`]).
//! - Match the discriminated [`RequestOutcome`] instead of catching errors.
//! - See a genuine host failure propagate as [`BluetoothError::Host`].
//!
//! ## Run
//! ```bash
//! cargo run --example request_device
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bluehub::{
    Bluetooth, DeviceFilter, DeviceInfo, EventKind, HostCapability, HostError, PlatformHandler,
    RequestDeviceOptions, RequestOutcome,
};

/// Chooser stand-in: serves scripted answers in order.
struct ChooserHost {
    answers: Mutex<Vec<Result<DeviceInfo, HostError>>>,
}

#[async_trait]
impl HostCapability for ChooserHost {
    async fn availability(&self) -> Option<bool> {
        Some(true)
    }

    async fn request_device(
        &self,
        options: &RequestDeviceOptions,
    ) -> Result<DeviceInfo, HostError> {
        println!(
            "  (host) chooser opened with {}",
            serde_json::to_string(options).expect("options serialize")
        );
        self.answers.lock().unwrap().remove(0)
    }

    fn set_event_handler(&self, _kind: EventKind, _handler: PlatformHandler) {}
    fn add_event_listener(&self, _event_type: &str, _listener: PlatformHandler) {}
    fn remove_event_listener(&self, _event_type: &str, _listener: &PlatformHandler) {}
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let host = Arc::new(ChooserHost {
        answers: Mutex::new(vec![
            Ok(DeviceInfo::new("hrm-1").with_name("Polar H10")),
            Err(HostError::cancelled()),
            Err(HostError::new(11, "adapter reset while chooser was open")),
        ]),
    });
    let bt = Bluetooth::new(host);

    println!("available: {}\n", bt.availability().await);

    let options = RequestDeviceOptions::filtered(vec![
        DeviceFilter::for_service("heart_rate").with_name_prefix("Polar"),
    ])
    .with_optional_services(["battery_service"]);

    println!("first request:");
    match bt.request_device(&options).await? {
        RequestOutcome::Selected(device) => {
            println!("  picked {} ({})\n", device.id, device.name.as_deref().unwrap_or("?"));
        }
        RequestOutcome::Cancelled => println!("  chooser dismissed\n"),
    }

    println!("second request (user backs out):");
    match bt.request_device(&options).await? {
        RequestOutcome::Selected(device) => println!("  picked {}\n", device.id),
        RequestOutcome::Cancelled => println!("  chooser dismissed — not an error\n"),
    }

    println!("third request (host failure propagates):");
    match bt.request_device(&options).await {
        Ok(outcome) => println!("  unexpected outcome: {outcome:?}"),
        Err(err) => println!("  error [{}]: {}", err.as_label(), err.as_message()),
    }

    Ok(())
}
