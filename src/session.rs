//! Device sessions: registration, event emission and teardown.
//!
//! A [`Session`] owns one open device node for its whole life:
//!
//! ```text
//! Closed -> Opening -> Configuring -> Registered -> Destroying -> Closed
//!                                      |      ^
//!                                      +------+  (event emission)
//! ```
//!
//! Every emission operation writes its events and then exactly one
//! `SYN_REPORT`, so consumers see each logical action as one frame.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use crate::capability::CapabilitySet;
use crate::config::SessionConfig;
use crate::device::{Backend, DeviceNode};
use crate::error::{Error, Result};
use crate::event::{Event, REL_WHEEL, REL_X, REL_Y};
use crate::identity::{DeviceIdentity, InputId};
use crate::platform::{UinputBackend, UinputNode};

/// Lifecycle state of a [`Session`].
///
/// Only `Registered` and `Closed` are observable from outside; the other
/// states exist while `open` or `close` is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    Closed,
    Opening,
    Configuring,
    Registered,
    Destroying,
}

/// A registered virtual input device.
///
/// Not internally synchronized: share it between threads behind a lock.
/// Sessions never share state with each other.
pub struct Session<N: DeviceNode = UinputNode> {
    node: Option<N>,
    path: PathBuf,
    state: SessionState,
    settling_delay: Duration,
}

impl Session<UinputNode> {
    /// Create a virtual device on the host's uinput node.
    ///
    /// Uses [`SessionConfig::default`], so this blocks for the default
    /// two-second settling delay before returning.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use vhid::{BTN_LEFT, BUS_VIRTUAL, InputId, Session};
    ///
    /// let mut session = Session::open("vhid pointer", InputId::new(BUS_VIRTUAL, 0x1, 0x1, 1))?;
    /// session.move_pointer(40, -10)?;
    /// session.click(BTN_LEFT)?;
    /// session.close()?;
    /// # Ok::<(), vhid::Error>(())
    /// ```
    pub fn open(name: &str, id: InputId) -> Result<Self> {
        Self::open_with(&UinputBackend, &SessionConfig::default(), name, id)
    }
}

impl<N: DeviceNode> Session<N> {
    /// Create a virtual device through `backend` using `config`.
    ///
    /// Locates a node, declares every capability, writes the registration
    /// record, creates the device and then sleeps for the settling delay.
    /// If any step after locating fails, the node is released before the
    /// error is returned. A failing release is logged and never replaces
    /// the original error.
    pub fn open_with<B>(backend: &B, config: &SessionConfig, name: &str, id: InputId) -> Result<Self>
    where
        B: Backend<Node = N>,
    {
        log::trace!("session: {:?} -> {:?}", SessionState::Closed, SessionState::Opening);
        let (path, mut node) = config.locator().locate(backend)?;

        log::trace!(
            "session {}: {:?} -> {:?}",
            path.display(),
            SessionState::Opening,
            SessionState::Configuring
        );
        let identity = DeviceIdentity::new(name, id);
        if let Err(e) = register(&mut node, &config.capabilities, &identity) {
            if let Err(release_err) = node.release() {
                log::warn!(
                    "failed to release {} after open failure: {}",
                    path.display(),
                    release_err
                );
            }
            log::trace!(
                "session {}: {:?} -> {:?}",
                path.display(),
                SessionState::Configuring,
                SessionState::Closed
            );
            return Err(e);
        }

        settle(config.settling_delay);

        log::debug!(
            "registered virtual device {:?} ({:04x}:{:04x}) on {}",
            identity.kernel_name(),
            id.vendor,
            id.product,
            path.display()
        );
        let mut session = Self {
            node: Some(node),
            path,
            state: SessionState::Configuring,
            settling_delay: config.settling_delay,
        };
        session.transition(SessionState::Registered);
        Ok(session)
    }

    /// The node path this session opened.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Whether the device is registered and accepts events.
    pub fn is_registered(&self) -> bool {
        self.node.is_some()
    }

    /// Move the pointer by `(dx, dy)`: `REL_X`, `REL_Y`, then sync.
    ///
    /// If the `REL_X` write fails nothing else is written, leaving the
    /// device without a closing sync for that frame.
    pub fn move_pointer(&mut self, dx: i32, dy: i32) -> Result<()> {
        self.emit(&[Event::relative(REL_X, dx), Event::relative(REL_Y, dy)])
    }

    /// Scroll the vertical wheel by `dy` notches.
    ///
    /// `dx` is accepted for symmetry with [`move_pointer`](Self::move_pointer)
    /// but no horizontal wheel event is emitted.
    pub fn move_wheel(&mut self, dx: i32, dy: i32) -> Result<()> {
        if dx != 0 {
            log::trace!("horizontal wheel delta {} not emitted", dx);
        }
        self.emit(&[Event::relative(REL_WHEEL, dy)])
    }

    /// Press a key or button.
    ///
    /// Codes outside the declared [`CapabilitySet`] are written anyway; the
    /// kernel drops them.
    pub fn press(&mut self, code: u16) -> Result<()> {
        self.emit(&[Event::key(code, true)])
    }

    /// Release a key or button.
    pub fn release(&mut self, code: u16) -> Result<()> {
        self.emit(&[Event::key(code, false)])
    }

    /// Press then release; the release is skipped if the press fails.
    pub fn click(&mut self, code: u16) -> Result<()> {
        self.press(code)?;
        self.release(code)
    }

    /// Write `events` in order as one frame, followed by a single sync.
    ///
    /// Sync markers inside `events` are skipped so the frame is closed
    /// exactly once. Writing stops at the first failure.
    pub fn emit(&mut self, events: &[Event]) -> Result<()> {
        let node = self.node.as_mut().ok_or(Error::SessionClosed)?;
        for event in events {
            if event.is_sync() {
                log::trace!("skipping sync marker inside frame");
                continue;
            }
            write_event(node, event)?;
        }
        write_event(node, &Event::sync())
    }

    /// Destroy the device and release its node.
    ///
    /// Sleeps for the settling delay first so events already submitted can
    /// reach consumers. The session is closed afterwards whatever the
    /// outcome; closing it again fails with [`Error::SessionClosed`].
    pub fn close(&mut self) -> Result<()> {
        let mut node = self.node.take().ok_or(Error::SessionClosed)?;
        self.transition(SessionState::Destroying);

        settle(self.settling_delay);

        let destroyed = node.destroy();
        let released = node.release();
        self.transition(SessionState::Closed);

        if let Err(e) = destroyed {
            if let Err(release_err) = released {
                log::warn!(
                    "failed to release {} after destroy failure: {}",
                    self.path.display(),
                    release_err
                );
            }
            return Err(Error::DeviceDestroyFailed(e));
        }
        released.map_err(Error::HandleReleaseFailed)?;

        log::debug!("destroyed virtual device on {}", self.path.display());
        Ok(())
    }

    fn transition(&mut self, to: SessionState) {
        log::trace!("session {}: {:?} -> {:?}", self.path.display(), self.state, to);
        self.state = to;
    }
}

impl<N: DeviceNode> fmt::Debug for Session<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("path", &self.path)
            .field("state", &self.state)
            .field("settling_delay", &self.settling_delay)
            .finish()
    }
}

impl<N: DeviceNode> Drop for Session<N> {
    /// Best-effort teardown without the settling delay.
    fn drop(&mut self) {
        let Some(mut node) = self.node.take() else {
            return;
        };
        if let Err(e) = node.destroy() {
            log::warn!("failed to destroy device on {} during drop: {}", self.path.display(), e);
        }
        if let Err(e) = node.release() {
            log::warn!("failed to release {} during drop: {}", self.path.display(), e);
        }
        self.transition(SessionState::Closed);
    }
}

/// Declare capabilities, submit the registration record and create the device.
fn register<N: DeviceNode>(
    node: &mut N,
    capabilities: &CapabilitySet,
    identity: &DeviceIdentity,
) -> Result<()> {
    for declaration in capabilities.declarations() {
        node.declare(declaration)
            .map_err(|source| Error::CapabilityDeclarationFailed {
                declaration,
                source,
            })?;
    }

    write_record(node, &identity.registration_record()).map_err(Error::RegistrationWriteFailed)?;
    node.create().map_err(Error::DeviceCreateFailed)
}

fn write_event<N: DeviceNode>(node: &mut N, event: &Event) -> Result<()> {
    write_record(node, &event.to_bytes()).map_err(Error::WriteFailed)
}

/// One write call; anything short of the full record is an error.
fn write_record<N: DeviceNode>(node: &mut N, bytes: &[u8]) -> io::Result<()> {
    let written = node.write(bytes)?;
    if written != bytes.len() {
        return Err(io::Error::new(
            io::ErrorKind::WriteZero,
            format!("short write: {} of {} bytes", written, bytes.len()),
        ));
    }
    Ok(())
}

fn settle(delay: Duration) {
    if !delay.is_zero() {
        thread::sleep(delay);
    }
}
