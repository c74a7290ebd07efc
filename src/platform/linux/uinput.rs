//! uinput control node: ioctl request codes and the [`DeviceNode`] impl.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::mem::size_of;
use std::os::unix::io::{AsRawFd, IntoRawFd};
use std::path::Path;

use crate::capability::Declaration;
use crate::device::{Backend, DeviceNode};

// _IOC encoding (asm-generic/ioctl.h); a few architectures use their own
// direction bits and a narrower size field.
#[cfg(any(
    target_arch = "mips",
    target_arch = "mips64",
    target_arch = "powerpc",
    target_arch = "powerpc64",
    target_arch = "sparc",
    target_arch = "sparc64"
))]
mod ioc {
    pub const NONE: u32 = 1;
    pub const WRITE: u32 = 4;
    pub const SIZEBITS: u32 = 13;
}

#[cfg(not(any(
    target_arch = "mips",
    target_arch = "mips64",
    target_arch = "powerpc",
    target_arch = "powerpc64",
    target_arch = "sparc",
    target_arch = "sparc64"
)))]
mod ioc {
    pub const NONE: u32 = 0;
    pub const WRITE: u32 = 1;
    pub const SIZEBITS: u32 = 14;
}

const NRSHIFT: u32 = 0;
const TYPESHIFT: u32 = 8;
const SIZESHIFT: u32 = 16;
const DIRSHIFT: u32 = SIZESHIFT + ioc::SIZEBITS;

const UINPUT_IOCTL_BASE: u8 = b'U';

const fn ioc(dir: u32, nr: u8, size: usize) -> u32 {
    (dir << DIRSHIFT)
        | ((UINPUT_IOCTL_BASE as u32) << TYPESHIFT)
        | ((nr as u32) << NRSHIFT)
        | ((size as u32) << SIZESHIFT)
}

/// `_IO('U', 1)`
pub const UI_DEV_CREATE: u32 = ioc(ioc::NONE, 1, 0);
/// `_IO('U', 2)`
pub const UI_DEV_DESTROY: u32 = ioc(ioc::NONE, 2, 0);
/// `_IOW('U', 100, int)`
pub const UI_SET_EVBIT: u32 = ioc(ioc::WRITE, 100, size_of::<libc::c_int>());
/// `_IOW('U', 101, int)`
pub const UI_SET_KEYBIT: u32 = ioc(ioc::WRITE, 101, size_of::<libc::c_int>());
/// `_IOW('U', 102, int)`
pub const UI_SET_RELBIT: u32 = ioc(ioc::WRITE, 102, size_of::<libc::c_int>());

/// Opens uinput control nodes write-only.
#[derive(Debug, Clone, Copy, Default)]
pub struct UinputBackend;

impl Backend for UinputBackend {
    type Node = UinputNode;

    fn open_node(&self, path: &Path) -> io::Result<UinputNode> {
        let file = OpenOptions::new().write(true).open(path)?;
        Ok(UinputNode { file })
    }
}

/// An open uinput control node.
#[derive(Debug)]
pub struct UinputNode {
    file: File,
}

impl UinputNode {
    fn ioctl(&self, request: u32) -> io::Result<()> {
        // SAFETY: the fd is open for the lifetime of `self` and these
        // requests take no argument.
        let rc = unsafe { libc::ioctl(self.file.as_raw_fd(), request as _) };
        if rc == -1 {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }

    fn ioctl_int(&self, request: u32, arg: libc::c_int) -> io::Result<()> {
        // SAFETY: the fd is open for the lifetime of `self` and the
        // UI_SET_*BIT requests take their argument by value.
        let rc = unsafe { libc::ioctl(self.file.as_raw_fd(), request as _, arg) };
        if rc == -1 {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }
}

impl DeviceNode for UinputNode {
    fn declare(&mut self, declaration: Declaration) -> io::Result<()> {
        let (request, value) = match declaration {
            Declaration::EventType(t) => (UI_SET_EVBIT, t),
            Declaration::Key(code) => (UI_SET_KEYBIT, code),
            Declaration::RelAxis(axis) => (UI_SET_RELBIT, axis),
        };
        self.ioctl_int(request, libc::c_int::from(value))
    }

    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        Write::write(&mut self.file, bytes)
    }

    fn create(&mut self) -> io::Result<()> {
        self.ioctl(UI_DEV_CREATE)
    }

    fn destroy(&mut self) -> io::Result<()> {
        self.ioctl(UI_DEV_DESTROY)
    }

    fn release(self) -> io::Result<()> {
        let fd = self.file.into_raw_fd();
        // SAFETY: `into_raw_fd` handed over sole ownership of the fd.
        if unsafe { libc::close(fd) } == -1 {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(any(target_arch = "x86_64", target_arch = "x86", target_arch = "aarch64", target_arch = "arm"))]
    #[test]
    fn test_request_codes_match_kernel_headers() {
        assert_eq!(UI_DEV_CREATE, 0x5501);
        assert_eq!(UI_DEV_DESTROY, 0x5502);
        assert_eq!(UI_SET_EVBIT, 0x4004_5564);
        assert_eq!(UI_SET_KEYBIT, 0x4004_5565);
        assert_eq!(UI_SET_RELBIT, 0x4004_5566);
    }

    #[test]
    fn test_regular_file_is_not_a_uinput_node() {
        let path = std::env::temp_dir().join(format!("vhid_fake_node_{}", std::process::id()));
        File::create(&path).unwrap();

        let mut node = UinputBackend.open_node(&path).unwrap();
        assert!(node.declare(Declaration::EventType(crate::event::EV_KEY)).is_err());
        assert!(node.create().is_err());
        node.release().unwrap();

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_writes_go_to_the_node() {
        let path = std::env::temp_dir().join(format!("vhid_write_node_{}", std::process::id()));
        File::create(&path).unwrap();

        let mut node = UinputBackend.open_node(&path).unwrap();
        let bytes = crate::event::Event::sync().to_bytes();
        assert_eq!(node.write(&bytes).unwrap(), bytes.len());
        node.release().unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), bytes.to_vec());
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_node() {
        let err = UinputBackend
            .open_node(Path::new("/nonexistent/vhid/uinput"))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
