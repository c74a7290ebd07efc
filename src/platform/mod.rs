//! Platform-specific device node backends.

#[cfg(target_os = "linux")]
mod linux;
#[cfg(target_os = "linux")]
pub use linux::*;

// Other hosts have no uinput; every open fails and sessions report
// `DeviceNotFound`. Custom backends still work.
#[cfg(not(target_os = "linux"))]
mod stub {
    use crate::capability::Declaration;
    use crate::device::{Backend, DeviceNode};
    use std::io;
    use std::path::Path;

    /// Opens uinput nodes. Unavailable on this platform.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct UinputBackend;

    /// A uinput node. Uninhabited on this platform.
    #[derive(Debug)]
    pub enum UinputNode {}

    impl Backend for UinputBackend {
        type Node = UinputNode;

        fn open_node(&self, path: &Path) -> io::Result<UinputNode> {
            Err(io::Error::new(
                io::ErrorKind::Unsupported,
                format!("uinput is only available on Linux ({})", path.display()),
            ))
        }
    }

    impl DeviceNode for UinputNode {
        fn declare(&mut self, _declaration: Declaration) -> io::Result<()> {
            match *self {}
        }

        fn write(&mut self, _bytes: &[u8]) -> io::Result<usize> {
            match *self {}
        }

        fn create(&mut self) -> io::Result<()> {
            match *self {}
        }

        fn destroy(&mut self) -> io::Result<()> {
            match *self {}
        }

        fn release(self) -> io::Result<()> {
            match self {}
        }
    }
}

#[cfg(not(target_os = "linux"))]
pub use stub::*;
