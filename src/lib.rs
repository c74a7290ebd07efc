//! # vhid
//!
//! A minimal virtual keyboard/mouse for Linux, built directly on the kernel's
//! uinput subsystem.
//!
//! ## Features
//!
//! - Creates a kernel-level input device other software cannot tell apart
//!   from real hardware
//! - Key/button presses, releases and clicks, relative pointer motion, wheel
//! - Every action is delivered as one frame terminated by a single `SYN_REPORT`
//! - Typed errors for every step of the device lifecycle
//! - Pluggable [`Backend`] so the device node can be faked in tests
//!
//! ## Quick Start
//!
//! ```no_run
//! use vhid::{BUS_VIRTUAL, InputId, Session};
//!
//! const KEY_A: u16 = 30;
//!
//! let mut session = Session::open("vhid keyboard", InputId::new(BUS_VIRTUAL, 0x1, 0x1, 1))?;
//! session.click(KEY_A)?;
//! session.move_pointer(10, 10)?;
//! session.move_wheel(0, -1)?;
//! session.close()?;
//! # Ok::<(), vhid::Error>(())
//! ```
//!
//! ## Custom configuration
//!
//! ```no_run
//! use std::time::Duration;
//! use vhid::{BUS_USB, InputId, Session, SessionConfig, UinputBackend};
//!
//! let config = SessionConfig::new()
//!     .with_candidates(["/dev/uinput"])
//!     .with_settling_delay(Duration::from_millis(500));
//! let mut session =
//!     Session::open_with(&UinputBackend, &config, "vhid", InputId::new(BUS_USB, 0x1d6b, 0x0104, 1))?;
//! session.press(42)?;
//! session.release(42)?;
//! # Ok::<(), vhid::Error>(())
//! ```
//!
//! ## Settling delays
//!
//! The kernel reports a new device as created before consumers can read its
//! events, and destroying a device discards events still being dispatched.
//! Sessions therefore sleep for [`SessionConfig::settling_delay`] (two seconds
//! by default) right after creating the device and right before destroying
//! it. This is best effort, not a guarantee under heavy load.

pub mod capability;
pub mod config;
pub mod device;
pub mod error;
pub mod event;
pub mod identity;
pub mod locator;
pub mod session;

mod platform;

// Re-exports
pub use capability::{CapabilitySet, Declaration};
pub use config::{DEFAULT_SETTLING_DELAY, SessionConfig};
pub use device::{Backend, DeviceNode};
pub use error::{Error, Result};
pub use event::{
    BTN_LEFT, BTN_MIDDLE, BTN_RIGHT, EV_KEY, EV_REL, EV_REP, EV_SYN, Event, KEY_MAX, REL_HWHEEL,
    REL_MAX, REL_WHEEL, REL_X, REL_Y, SYN_REPORT,
};
pub use identity::{BUS_BLUETOOTH, BUS_USB, BUS_VIRTUAL, DeviceIdentity, InputId};
pub use locator::{DEFAULT_CANDIDATES, DeviceLocator};
pub use platform::{UinputBackend, UinputNode};
pub use session::{Session, SessionState};
