//! DeviceNode and Backend traits.
//!
//! A [`Backend`] opens device nodes by path; a [`DeviceNode`] is the open
//! handle a session drives. The real implementation talks to `/dev/uinput`
//! (see [`UinputBackend`](crate::UinputBackend)); tests plug in a recording
//! fake.

use std::io;
use std::path::Path;

use crate::capability::Declaration;

/// An open, exclusively owned handle to a virtual-input control node.
///
/// Each method maps onto one request of the kernel's uinput protocol.
pub trait DeviceNode {
    /// Submit one capability declaration (`UI_SET_*BIT`).
    fn declare(&mut self, declaration: Declaration) -> io::Result<()>;

    /// Write raw bytes, returning how many were accepted.
    ///
    /// Used both for the registration record and for event records. Callers
    /// treat a short count as a failure.
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize>;

    /// Register the device with the kernel (`UI_DEV_CREATE`).
    fn create(&mut self) -> io::Result<()>;

    /// Unregister the device (`UI_DEV_DESTROY`).
    fn destroy(&mut self) -> io::Result<()>;

    /// Close the handle, reporting any error the close itself raises.
    fn release(self) -> io::Result<()>
    where
        Self: Sized;
}

/// Opens device nodes for a [`DeviceLocator`](crate::DeviceLocator).
pub trait Backend {
    type Node: DeviceNode;

    /// Open `path` write-only.
    fn open_node(&self, path: &Path) -> io::Result<Self::Node>;
}

/// Implement Backend for closures.
impl<F, N> Backend for F
where
    F: Fn(&Path) -> io::Result<N>,
    N: DeviceNode,
{
    type Node = N;

    fn open_node(&self, path: &Path) -> io::Result<N> {
        self(path)
    }
}
