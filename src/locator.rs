//! Locating the uinput control node.
//!
//! The node lives at different paths depending on the kernel and userspace
//! (desktop Linux, Android variants). The locator probes an ordered list of
//! candidates and keeps the first one that opens.

use std::path::{Path, PathBuf};

use crate::device::Backend;
use crate::error::{Error, Result};

/// Candidate paths probed by default, most preferred first.
pub const DEFAULT_CANDIDATES: [&str; 4] = [
    "/android/dev/uinput",
    "/dev/uinput",
    "/dev/input/uinput",
    "/dev/misc/uinput",
];

/// An ordered list of candidate device node paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceLocator {
    candidates: Vec<PathBuf>,
}

impl Default for DeviceLocator {
    fn default() -> Self {
        Self::new(DEFAULT_CANDIDATES)
    }
}

impl DeviceLocator {
    /// Create a locator probing `candidates` in order.
    pub fn new<I, P>(candidates: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            candidates: candidates.into_iter().map(Into::into).collect(),
        }
    }

    /// The candidate paths, in probing order.
    pub fn candidates(&self) -> &[PathBuf] {
        &self.candidates
    }

    /// Open the first candidate `backend` accepts.
    ///
    /// Returns the path that opened alongside the node. Fails with
    /// [`Error::DeviceNotFound`] when every candidate fails; per-path reasons
    /// are only logged.
    pub fn locate<B: Backend>(&self, backend: &B) -> Result<(PathBuf, B::Node)> {
        for path in &self.candidates {
            match backend.open_node(path) {
                Ok(node) => {
                    log::debug!("opened uinput node {}", path.display());
                    return Ok((path.clone(), node));
                }
                Err(e) => {
                    log::trace!("cannot open {}: {}", path.display(), e);
                }
            }
        }

        Err(Error::DeviceNotFound {
            tried: self.candidates.clone(),
        })
    }
}

impl<P: AsRef<Path>> FromIterator<P> for DeviceLocator {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(|p| p.as_ref().to_path_buf()))
    }
}
