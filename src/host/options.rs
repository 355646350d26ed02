//! # Device chooser options.
//!
//! [`RequestDeviceOptions`] is the filter structure handed to the host's
//! device chooser: either "accept all devices" or a list of service-based
//! [`DeviceFilter`]s. On real platforms the structure crosses a JSON bridge,
//! so the serde shape uses the bridge's camelCase field names.
//!
//! ## Example
//! ```rust
//! use bluehub::{DeviceFilter, RequestDeviceOptions};
//!
//! // Chooser limited to devices advertising the battery service.
//! let options = RequestDeviceOptions::filtered(vec![
//!     DeviceFilter::for_service("battery_service"),
//! ]);
//! assert!(!options.accept_all_devices);
//!
//! // No preference: show every reachable device.
//! let any = RequestDeviceOptions::default();
//! assert!(any.accept_all_devices);
//! ```

use serde::{Deserialize, Serialize};

/// One service-based chooser filter.
///
/// A device matches when it satisfies every populated field; empty fields
/// don't constrain. Field names serialize in the bridge's camelCase.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceFilter {
    /// Service identifiers the device must advertise.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub services: Vec<String>,

    /// Exact device name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Device name prefix.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_prefix: Option<String>,
}

impl DeviceFilter {
    /// Creates a filter matching devices that advertise one service.
    pub fn for_service(service: impl Into<String>) -> Self {
        Self {
            services: vec![service.into()],
            ..Self::default()
        }
    }

    /// Adds an exact-name constraint.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Adds a name-prefix constraint.
    pub fn with_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.name_prefix = Some(prefix.into());
        self
    }
}

/// Options for the host device chooser.
///
/// Exactly one of the two modes is meaningful per request: `accept_all_devices`
/// shows every reachable device, `filters` narrows the chooser to matches.
/// `Default` accepts all devices — the behavior when a caller has no
/// preference.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestDeviceOptions {
    /// Show every reachable device in the chooser.
    #[serde(default)]
    pub accept_all_devices: bool,

    /// Service-based filters; a device must match at least one.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<DeviceFilter>,

    /// Services the caller wants access to beyond the filtered ones.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub optional_services: Vec<String>,
}

impl Default for RequestDeviceOptions {
    fn default() -> Self {
        Self::accept_all()
    }
}

impl RequestDeviceOptions {
    /// Options that accept any device.
    pub fn accept_all() -> Self {
        Self {
            accept_all_devices: true,
            filters: Vec::new(),
            optional_services: Vec::new(),
        }
    }

    /// Options that narrow the chooser to the given filters.
    pub fn filtered(filters: Vec<DeviceFilter>) -> Self {
        Self {
            accept_all_devices: false,
            filters,
            optional_services: Vec::new(),
        }
    }

    /// Adds services the caller wants access to beyond the filtered ones.
    pub fn with_optional_services<I, S>(mut self, services: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.optional_services = services.into_iter().map(Into::into).collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_accepts_all_devices() {
        let options = RequestDeviceOptions::default();
        assert!(options.accept_all_devices);
        assert!(options.filters.is_empty());
    }

    #[test]
    fn test_accept_all_serializes_to_bridge_shape() {
        let options = RequestDeviceOptions::accept_all();
        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            json!({ "acceptAllDevices": true })
        );
    }

    #[test]
    fn test_filters_serialize_camel_case() {
        let options = RequestDeviceOptions::filtered(vec![
            DeviceFilter::for_service("battery_service").with_name_prefix("Polar"),
        ])
        .with_optional_services(["heart_rate"]);

        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            json!({
                "acceptAllDevices": false,
                "filters": [{ "services": ["battery_service"], "namePrefix": "Polar" }],
                "optionalServices": ["heart_rate"],
            })
        );
    }

    #[test]
    fn test_bridge_shape_deserializes() {
        let options: RequestDeviceOptions = serde_json::from_value(json!({
            "filters": [{ "services": ["battery_service"], "name": "Aranet4" }],
        }))
        .unwrap();
        assert!(!options.accept_all_devices);
        assert_eq!(options.filters[0].name.as_deref(), Some("Aranet4"));
    }
}
