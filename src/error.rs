//! Error types for virtual device sessions.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::capability::Declaration;

/// Result type alias for vhid operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while opening, driving or closing a virtual device.
///
/// Callers match on the variant. The wrapped [`io::Error`], where present, is
/// only there for diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    /// None of the candidate device nodes could be opened.
    #[error("no uinput device node could be opened (tried {})", display_paths(.tried))]
    DeviceNotFound { tried: Vec<PathBuf> },

    /// The kernel refused one of the capability declarations.
    #[error("failed to declare {declaration}")]
    CapabilityDeclarationFailed {
        declaration: Declaration,
        #[source]
        source: io::Error,
    },

    /// The device registration record could not be written in full.
    #[error("failed to write device registration record")]
    RegistrationWriteFailed(#[source] io::Error),

    /// The kernel refused to create the device.
    #[error("failed to create virtual device")]
    DeviceCreateFailed(#[source] io::Error),

    /// An event could not be written in full.
    #[error("failed to write input event")]
    WriteFailed(#[source] io::Error),

    /// The kernel refused to destroy the device.
    #[error("failed to destroy virtual device")]
    DeviceDestroyFailed(#[source] io::Error),

    /// Closing the device handle failed.
    #[error("failed to release device handle")]
    HandleReleaseFailed(#[source] io::Error),

    /// The session was already closed.
    #[error("session is closed")]
    SessionClosed,
}

fn display_paths(paths: &[PathBuf]) -> String {
    if paths.is_empty() {
        return "no candidates".into();
    }
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
