//! Session configuration.

use std::path::PathBuf;
use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::capability::CapabilitySet;
use crate::locator::{DEFAULT_CANDIDATES, DeviceLocator};

/// Default settling delay after creating and before destroying a device.
pub const DEFAULT_SETTLING_DELAY: Duration = Duration::from_secs(2);

/// How a [`Session`](crate::Session) finds, declares and waits on its device.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SessionConfig {
    /// Device node paths, probed in order.
    pub candidates: Vec<PathBuf>,

    /// Unconditional sleep after `UI_DEV_CREATE` and before `UI_DEV_DESTROY`.
    ///
    /// The kernel reports the device created before consumers can receive
    /// its events, and destroying it drops events still in flight. Sleeping
    /// is best effort and may be too short on a loaded system.
    /// `Duration::ZERO` skips the sleep.
    #[cfg_attr(feature = "serde", serde(with = "millis", rename = "settling_delay_ms"))]
    pub settling_delay: Duration,

    /// Capabilities declared before registration.
    pub capabilities: CapabilitySet,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            candidates: DEFAULT_CANDIDATES.iter().map(PathBuf::from).collect(),
            settling_delay: DEFAULT_SETTLING_DELAY,
            capabilities: CapabilitySet::default(),
        }
    }
}

impl SessionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the candidate node paths.
    pub fn with_candidates<I, P>(mut self, candidates: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.candidates = candidates.into_iter().map(Into::into).collect();
        self
    }

    /// Set the settling delay.
    pub fn with_settling_delay(mut self, delay: Duration) -> Self {
        self.settling_delay = delay;
        self
    }

    /// Replace the declared capabilities.
    pub fn with_capabilities(mut self, capabilities: CapabilitySet) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// A locator over the configured candidates.
    pub fn locator(&self) -> DeviceLocator {
        DeviceLocator::new(self.candidates.iter().cloned())
    }
}

#[cfg(feature = "serde")]
mod millis {
    use serde::{Deserialize, Deserializer, Serializer, ser};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(delay: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        let millis = u64::try_from(delay.as_millis()).map_err(|_| {
            <S::Error as ser::Error>::custom(format!("settling delay {delay:?} does not fit in u64 milliseconds"))
        })?;
        serializer.serialize_u64(millis)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
