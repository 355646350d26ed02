//! Builder for assembling a [`Bluetooth`] accessor.

use std::sync::Arc;

use crate::core::bluetooth::Bluetooth;
use crate::core::config::Config;
use crate::events::EventHub;
use crate::host::HostCapability;

/// Builder for constructing a [`Bluetooth`] accessor.
///
/// Building without a host is valid and models a platform without the
/// capability: `availability()` answers `false` and every other operation
/// reports `Unavailable`.
#[derive(Default)]
pub struct BluetoothBuilder {
    host: Option<Arc<dyn HostCapability>>,
    cfg: Config,
}

impl BluetoothBuilder {
    /// Creates a builder with default configuration and no host.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the host capability object to forward to.
    pub fn with_host(mut self, host: Arc<dyn HostCapability>) -> Self {
        self.host = Some(host);
        self
    }

    /// Overrides the accessor configuration.
    pub fn with_config(mut self, cfg: Config) -> Self {
        self.cfg = cfg;
        self
    }

    /// Builds the accessor, creating its private fan-out hub.
    pub fn build(self) -> Bluetooth {
        let hub = EventHub::new(self.cfg.isolate_panics);
        Bluetooth::assemble(self.host, hub, self.cfg)
    }
}
