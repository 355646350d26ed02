//! Error types used at the host capability boundary.
//!
//! This module defines two main error types:
//!
//! - [`BluetoothError`] — errors raised by the accessor itself.
//! - [`HostError`] — failures reported by the host's Bluetooth stack.
//!
//! Both types provide helper methods (`as_label`, `as_message`) for logging/metrics.
//! User cancellation of the device chooser is **not** an error at the accessor
//! level: the host reports it as a [`HostError`] carrying [`CODE_USER_CANCELLED`],
//! and the accessor translates it into `RequestOutcome::Cancelled`.

use thiserror::Error;

/// Error code the host reports when the user dismisses the device chooser.
///
/// Any [`HostError`] carrying this code is translated into a cancelled
/// outcome instead of being raised; every other code propagates unchanged.
pub const CODE_USER_CANCELLED: u32 = 8;

/// # Failure reported by the host's Bluetooth stack.
///
/// The host is an opaque collaborator; its failures arrive as a numeric code
/// (when the platform assigns one) plus a human-readable message and pass
/// through the accessor untouched, with one exception: the reserved
/// cancellation code (see [`HostError::is_user_cancelled`]).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct HostError {
    /// Platform error code, if the host assigned one.
    pub code: Option<u32>,
    /// Human-readable description from the host.
    pub message: String,
}

impl HostError {
    /// Creates a host error with an optional platform code.
    ///
    /// # Example
    /// ```
    /// use bluehub::HostError;
    ///
    /// let err = HostError::new(19, "GATT operation already in progress");
    /// assert_eq!(err.code, Some(19));
    /// ```
    pub fn new(code: impl Into<Option<u32>>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Creates the error the host reports when the user dismisses the chooser.
    pub fn cancelled() -> Self {
        Self::new(CODE_USER_CANCELLED, "user cancelled the device chooser")
    }

    /// Returns `true` if this failure carries the reserved cancellation code.
    ///
    /// # Example
    /// ```
    /// use bluehub::HostError;
    ///
    /// assert!(HostError::cancelled().is_user_cancelled());
    /// assert!(!HostError::new(None, "adapter off").is_user_cancelled());
    /// ```
    #[inline]
    pub fn is_user_cancelled(&self) -> bool {
        self.code == Some(CODE_USER_CANCELLED)
    }
}

/// # Errors produced by the accessor.
///
/// Either the host capability object is missing entirely, or the host failed
/// an operation and the failure is passed through unchanged.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum BluetoothError {
    /// No host capability object is present; fatal to the call, never retried.
    #[error("this device is not capable of using bluetooth")]
    Unavailable,

    /// The host reported a failure; propagated unchanged.
    #[error(transparent)]
    Host(#[from] HostError),
}

impl BluetoothError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use bluehub::BluetoothError;
    ///
    /// assert_eq!(BluetoothError::Unavailable.as_label(), "bluetooth_unavailable");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            BluetoothError::Unavailable => "bluetooth_unavailable",
            BluetoothError::Host(_) => "bluetooth_host_error",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            BluetoothError::Unavailable => "host capability object is absent".to_string(),
            BluetoothError::Host(err) => match err.code {
                Some(code) => format!("host error (code {code}): {}", err.message),
                None => format!("host error: {}", err.message),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancellation_code_is_recognized() {
        assert!(HostError::new(8, "whatever").is_user_cancelled());
        assert!(!HostError::new(9, "whatever").is_user_cancelled());
        assert!(!HostError::new(None, "whatever").is_user_cancelled());
    }

    #[test]
    fn test_labels_are_stable() {
        assert_eq!(BluetoothError::Unavailable.as_label(), "bluetooth_unavailable");
        let err = BluetoothError::Host(HostError::new(42, "boom"));
        assert_eq!(err.as_label(), "bluetooth_host_error");
        assert_eq!(err.as_message(), "host error (code 42): boom");
    }
}
