//! # Accessor configuration.
//!
//! Provides [`Config`], the knobs for one [`Bluetooth`](crate::Bluetooth)
//! instance. Both knobs govern the fan-out hub; the forwarding operations
//! (availability, device chooser, pass-throughs) have no tunables.

use serde::{Deserialize, Serialize};

/// When the fan-out hooks get planted into the host's handler slots.
///
/// Either policy guarantees a hook exists before the host can deliver an
/// event that a registered listener could observe.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallPolicy {
    /// All six slots are hooked on the first registration anywhere.
    ///
    /// Slightly eager, but removes any ordering concern between kinds.
    #[default]
    Eager,

    /// Each slot is hooked on the first registration **for that kind**.
    ///
    /// Slots of kinds nobody listens to are left untouched.
    Lazy,
}

/// Configuration for one accessor instance.
///
/// ## Field semantics
/// - `isolate_panics`: catch and report a panicking listener, keep fanning out
///   (`false` lets the panic unwind out of dispatch, skipping the rest of
///   the pass)
/// - `install`: when hooks get planted into the host's slots
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct Config {
    /// Catch a panicking listener and continue the pass.
    pub isolate_panics: bool,

    /// Hook installation timing.
    pub install: InstallPolicy,
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `isolate_panics = true` (one broken listener cannot starve the rest)
    /// - `install = InstallPolicy::Eager`
    fn default() -> Self {
        Self {
            isolate_panics: true,
            install: InstallPolicy::Eager,
        }
    }
}
