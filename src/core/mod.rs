//! Accessor core: forwarding and wiring.
//!
//! This module contains the user-facing surface of the crate. The main public
//! API is [`Bluetooth`], which forwards operations to the host capability and
//! wires listeners into the fan-out hub.
//!
//! Modules:
//! - [`bluetooth`]: the accessor and the chooser [`RequestOutcome`];
//! - [`builder`]: step-wise construction, including host-less accessors;
//! - [`config`]: panic isolation and hook install policy.

mod bluetooth;
mod builder;
mod config;

pub use bluetooth::{Bluetooth, RequestOutcome};
pub use builder::BluetoothBuilder;
pub use config::{Config, InstallPolicy};
