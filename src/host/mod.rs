//! Host boundary: the capability contract and its bridge-shaped structures.
//!
//! Everything in this module describes the external collaborator — the
//! platform object that actually owns the Bluetooth stack. The crate never
//! implements any of it; production hosts wrap a platform bridge, tests and
//! demos script a fake.
//!
//! ## Contents
//! - [`HostCapability`], [`PlatformHandler`] — the trait seam and hook type
//! - [`RequestDeviceOptions`], [`DeviceFilter`] — chooser filter structures
//! - [`DeviceInfo`] — chooser result descriptor

mod capability;
mod device;
mod options;

pub use capability::{HostCapability, PlatformHandler, AVAILABILITY_CHANGED_EVENT};
pub use device::DeviceInfo;
pub use options::{DeviceFilter, RequestDeviceOptions};
