//! Linux uinput backend.
//!
//! Talks to the kernel's virtual-input subsystem through the control node
//! (usually `/dev/uinput`).
//!
//! ## Permissions
//!
//! The node is normally owned by root. Either run as root or grant access
//! with a udev rule:
//! ```bash
//! echo 'KERNEL=="uinput", GROUP="input", MODE="0660"' | sudo tee /etc/udev/rules.d/99-uinput.rules
//! sudo usermod -aG input $USER
//! # Then log out and back in
//! ```
//!
//! The `uinput` kernel module must be loaded (`sudo modprobe uinput`).

mod uinput;

pub use uinput::{UinputBackend, UinputNode};
