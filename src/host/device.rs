//! Device descriptor returned by the host chooser.

use serde::{Deserialize, Serialize};

/// Descriptor of a device the host selected or remembered.
///
/// Carries only what the chooser exposes: a host-assigned opaque identifier
/// and an optional advertised name. Connecting and talking to the device is
/// the host's business.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceInfo {
    /// Host-assigned opaque identifier, stable for this session.
    pub id: String,

    /// Advertised device name, if the host saw one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl DeviceInfo {
    /// Creates a descriptor with the given identifier and no name.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
        }
    }

    /// Attaches the advertised name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}
