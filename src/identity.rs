//! Device identity and the legacy `uinput_user_dev` registration record.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Size of the kernel's device name buffer.
///
/// The legacy setup path copies it with `kstrndup(name, UINPUT_MAX_NAME_SIZE)`,
/// so a name filling all of it needs no terminating NUL.
pub const UINPUT_MAX_NAME_SIZE: usize = 80;

/// Number of absolute axes in the registration record's tables.
const ABS_CNT: usize = 0x40;

/// Size in bytes of `struct uinput_user_dev`.
pub const REGISTRATION_RECORD_SIZE: usize = UINPUT_MAX_NAME_SIZE + 8 + 4 + 4 * ABS_CNT * 4;

// Bus types (linux/input.h)
pub const BUS_USB: u16 = 0x03;
pub const BUS_BLUETOOTH: u16 = 0x05;
pub const BUS_VIRTUAL: u16 = 0x06;

/// The `struct input_id` tuple identifying a device to the kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InputId {
    pub bustype: u16,
    pub vendor: u16,
    pub product: u16,
    pub version: u16,
}

impl InputId {
    pub const fn new(bustype: u16, vendor: u16, product: u16, version: u16) -> Self {
        Self {
            bustype,
            vendor,
            product,
            version,
        }
    }
}

/// Name and id of a virtual device, as submitted at registration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DeviceIdentity {
    pub name: String,
    pub id: InputId,
}

impl DeviceIdentity {
    pub fn new(name: impl Into<String>, id: InputId) -> Self {
        Self {
            name: name.into(),
            id,
        }
    }

    /// The name as the kernel will see it.
    ///
    /// Cut at the first NUL, then to at most `UINPUT_MAX_NAME_SIZE` bytes on
    /// a character boundary. Names that fit the buffer are kept whole.
    pub fn kernel_name(&self) -> &str {
        let name = match self.name.find('\0') {
            Some(nul) => &self.name[..nul],
            None => &self.name,
        };
        let mut end = name.len().min(UINPUT_MAX_NAME_SIZE);
        while !name.is_char_boundary(end) {
            end -= 1;
        }
        &name[..end]
    }

    /// Encode as `struct uinput_user_dev`.
    ///
    /// Only the name and id are filled in; `ff_effects_max` and the absolute
    /// axis tables stay zero since the device declares no absolute axes.
    pub fn registration_record(&self) -> [u8; REGISTRATION_RECORD_SIZE] {
        let mut record = [0u8; REGISTRATION_RECORD_SIZE];
        let name = self.kernel_name().as_bytes();
        record[..name.len()].copy_from_slice(name);

        let id = UINPUT_MAX_NAME_SIZE;
        record[id..id + 2].copy_from_slice(&self.id.bustype.to_ne_bytes());
        record[id + 2..id + 4].copy_from_slice(&self.id.vendor.to_ne_bytes());
        record[id + 4..id + 6].copy_from_slice(&self.id.product.to_ne_bytes());
        record[id + 6..id + 8].copy_from_slice(&self.id.version.to_ne_bytes());
        record
    }
}
