//! Capabilities declared on a device before it is registered.

use std::fmt;
use std::ops::Range;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::event::{EV_KEY, EV_REL, EV_REP, EV_SYN, KEY_MAX, REL_MAX, REL_X};

/// A single capability-registration request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Declaration {
    /// `UI_SET_EVBIT`: enable an event category.
    EventType(u16),
    /// `UI_SET_KEYBIT`: enable one key or button code.
    Key(u16),
    /// `UI_SET_RELBIT`: enable one relative axis.
    RelAxis(u16),
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Declaration::EventType(t) => write!(f, "event type {t:#04x}"),
            Declaration::Key(code) => write!(f, "key code {code:#05x}"),
            Declaration::RelAxis(axis) => write!(f, "relative axis {axis:#04x}"),
        }
    }
}

/// The event categories and codes a device may emit.
///
/// Declared once while the session is configuring; the kernel rejects
/// declarations once the device exists.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CapabilitySet {
    /// Event categories, declared in this order.
    pub event_types: Vec<u16>,
    /// Key codes, end exclusive.
    pub keys: Range<u16>,
    /// Relative axes, end exclusive.
    pub rel_axes: Range<u16>,
}

impl Default for CapabilitySet {
    /// Keys, auto-repeat, relative motion and sync; every key code below
    /// `KEY_MAX` and every axis below `REL_MAX`.
    fn default() -> Self {
        Self {
            event_types: vec![EV_KEY, EV_REP, EV_REL, EV_SYN],
            keys: 0..KEY_MAX,
            rel_axes: REL_X..REL_MAX,
        }
    }
}

impl CapabilitySet {
    /// Every declaration in submission order: categories, keys, then axes.
    pub fn declarations(&self) -> impl Iterator<Item = Declaration> + '_ {
        self.event_types
            .iter()
            .copied()
            .map(Declaration::EventType)
            .chain(self.keys.clone().map(Declaration::Key))
            .chain(self.rel_axes.clone().map(Declaration::RelAxis))
    }
}
