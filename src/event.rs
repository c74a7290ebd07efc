//! Input events and their wire encoding.
//!
//! Every event written to a uinput node is a `struct input_event`: a
//! timestamp followed by a 16-bit type, a 16-bit code and a signed 32-bit
//! value, all in host byte order. The timestamp is left zeroed, the kernel
//! stamps the event when it is injected.
//!
//! The kernel header lays the timestamp out as two `__kernel_ulong_t`
//! (seconds, microseconds), not as the C library's `struct timeval`. The two
//! differ on 32-bit targets built with a 64-bit `time_t` (musl, glibc with
//! `_TIME_BITS=64`), so the size here follows `c_ulong`: 24 bytes on 64-bit
//! targets, 16 on 32-bit ones. x32 is not supported.

use std::mem::size_of;

// Event types (linux/input-event-codes.h)
/// Synchronization events.
pub const EV_SYN: u16 = 0x00;
/// Key and button events.
pub const EV_KEY: u16 = 0x01;
/// Relative axis events.
pub const EV_REL: u16 = 0x02;
/// Key auto-repeat events.
pub const EV_REP: u16 = 0x14;

/// Synchronization marker closing one input frame.
pub const SYN_REPORT: u16 = 0x00;

// Relative axes
pub const REL_X: u16 = 0x00;
pub const REL_Y: u16 = 0x01;
pub const REL_HWHEEL: u16 = 0x06;
pub const REL_WHEEL: u16 = 0x08;
/// Highest relative axis code known to the kernel headers.
pub const REL_MAX: u16 = 0x0f;

/// Highest key code known to the kernel headers.
pub const KEY_MAX: u16 = 0x2ff;

// Mouse buttons
pub const BTN_LEFT: u16 = 0x110;
pub const BTN_RIGHT: u16 = 0x111;
pub const BTN_MIDDLE: u16 = 0x112;

const TIME_SIZE: usize = 2 * size_of::<libc::c_ulong>();

/// Size in bytes of one event record on this host.
pub const EVENT_SIZE: usize = TIME_SIZE + 8;

/// One atomic input fact: `(type, code, value)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Event {
    /// Event category (`EV_KEY`, `EV_REL`, ...).
    pub event_type: u16,
    /// Code within the category (key code, axis).
    pub code: u16,
    /// Magnitude: 1/0 for key press/release, a delta for relative axes.
    pub value: i32,
}

impl Event {
    /// Create an event from its raw parts.
    pub const fn new(event_type: u16, code: u16, value: i32) -> Self {
        Self {
            event_type,
            code,
            value,
        }
    }

    /// A key or button press (`pressed == true`) or release.
    pub const fn key(code: u16, pressed: bool) -> Self {
        Self::new(EV_KEY, code, if pressed { 1 } else { 0 })
    }

    /// Relative motion along `axis`.
    pub const fn relative(axis: u16, delta: i32) -> Self {
        Self::new(EV_REL, axis, delta)
    }

    /// The `SYN_REPORT` marker.
    pub const fn sync() -> Self {
        Self::new(EV_SYN, SYN_REPORT, 0)
    }

    /// Whether this is a `SYN_REPORT` marker.
    pub const fn is_sync(&self) -> bool {
        self.event_type == EV_SYN && self.code == SYN_REPORT
    }

    /// Encode as a `struct input_event` with a zero timestamp.
    pub fn to_bytes(&self) -> [u8; EVENT_SIZE] {
        let mut buf = [0u8; EVENT_SIZE];
        buf[TIME_SIZE..TIME_SIZE + 2].copy_from_slice(&self.event_type.to_ne_bytes());
        buf[TIME_SIZE + 2..TIME_SIZE + 4].copy_from_slice(&self.code.to_ne_bytes());
        buf[TIME_SIZE + 4..].copy_from_slice(&self.value.to_ne_bytes());
        buf
    }

    /// Decode one `struct input_event`, ignoring its timestamp.
    ///
    /// Returns `None` unless `bytes` is exactly one record long.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() != EVENT_SIZE {
            return None;
        }
        let event_type = u16::from_ne_bytes([bytes[TIME_SIZE], bytes[TIME_SIZE + 1]]);
        let code = u16::from_ne_bytes([bytes[TIME_SIZE + 2], bytes[TIME_SIZE + 3]]);
        let value = i32::from_ne_bytes([
            bytes[TIME_SIZE + 4],
            bytes[TIME_SIZE + 5],
            bytes[TIME_SIZE + 6],
            bytes[TIME_SIZE + 7],
        ]);
        Some(Self::new(event_type, code, value))
    }
}

#[cfg(all(feature = "evdev", target_os = "linux"))]
impl From<Event> for evdev::InputEvent {
    fn from(event: Event) -> Self {
        evdev::InputEvent::new(evdev::EventType(event.event_type), event.code, event.value)
    }
}

#[cfg(all(feature = "evdev", target_os = "linux"))]
impl From<evdev::InputEvent> for Event {
    fn from(event: evdev::InputEvent) -> Self {
        Event::new(event.event_type().0, event.code(), event.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_record_matches_kernel_layout() {
        assert_eq!(EVENT_SIZE, 24);
    }

    // Holds even where the C library's `timeval` is 16 bytes (64-bit time_t).
    #[cfg(target_pointer_width = "32")]
    #[test]
    fn test_record_matches_kernel_layout() {
        assert_eq!(EVENT_SIZE, 16);
    }

    #[test]
    fn test_encoding_zeroes_timestamp() {
        let bytes = Event::relative(REL_Y, -3).to_bytes();
        assert!(bytes[..TIME_SIZE].iter().all(|b| *b == 0));
        assert_eq!(&bytes[TIME_SIZE..TIME_SIZE + 2], &EV_REL.to_ne_bytes());
        assert_eq!(&bytes[TIME_SIZE + 2..TIME_SIZE + 4], &REL_Y.to_ne_bytes());
        assert_eq!(&bytes[TIME_SIZE + 4..], &(-3i32).to_ne_bytes());
    }

    #[test]
    fn test_sync_marker() {
        let sync = Event::sync();
        assert!(sync.is_sync());
        assert_eq!(sync, Event::new(EV_SYN, SYN_REPORT, 0));
        assert!(!Event::key(BTN_LEFT, true).is_sync());
    }

    #[test]
    fn test_key_values() {
        assert_eq!(Event::key(30, true).value, 1);
        assert_eq!(Event::key(30, false).value, 0);
        assert_eq!(Event::key(30, false).event_type, EV_KEY);
    }

    #[test]
    fn test_decode_rejects_wrong_length() {
        assert_eq!(Event::from_bytes(&[0u8; 3]), None);
        let mut long = Event::sync().to_bytes().to_vec();
        long.push(0);
        assert_eq!(Event::from_bytes(&long), None);
    }

    #[test]
    fn test_decode_ignores_timestamp() {
        let mut bytes = Event::key(BTN_RIGHT, true).to_bytes();
        bytes[0] = 0x7f;
        assert_eq!(Event::from_bytes(&bytes), Some(Event::key(BTN_RIGHT, true)));
    }

    #[cfg(all(feature = "evdev", target_os = "linux"))]
    #[test]
    fn test_evdev_conversion() {
        let ev: evdev::InputEvent = Event::relative(REL_WHEEL, 2).into();
        assert_eq!(ev.event_type(), evdev::EventType::RELATIVE);
        assert_eq!(ev.code(), evdev::RelativeAxisType::REL_WHEEL.0);
        assert_eq!(Event::from(ev), Event::relative(REL_WHEEL, 2));

        let key = evdev::InputEvent::new(evdev::EventType::KEY, evdev::Key::KEY_A.code(), 1);
        assert_eq!(Event::from(key), Event::key(30, true));
    }
}
