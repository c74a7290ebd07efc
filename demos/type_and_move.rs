//! Virtual device example.
//!
//! Run with: cargo run --example type_and_move
//!
//! WARNING: This will actually move your mouse and type keys!
//! Needs write access to /dev/uinput.

use std::thread::sleep;
use std::time::Duration;
use vhid::{BUS_VIRTUAL, InputId, Session};

const KEY_H: u16 = 35;
const KEY_I: u16 = 23;
const KEY_LEFTSHIFT: u16 = 42;

fn main() {
    println!("vhid virtual device example");
    println!("===========================\n");
    println!("Creating device (takes a couple of seconds)...");

    let mut session = match Session::open("vhid demo", InputId::new(BUS_VIRTUAL, 0x1, 0x1, 1)) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Is the uinput module loaded and /dev/uinput writable?");
            return;
        }
    };
    println!("Device registered on {}\n", session.path().display());

    println!("1. Moving pointer in a square...");
    for (dx, dy) in [(50, 0), (0, 50), (-50, 0), (0, -50)] {
        if let Err(e) = session.move_pointer(dx, dy) {
            eprintln!("   Error: {}", e);
        }
        sleep(Duration::from_millis(200));
    }

    println!("2. Scrolling down three notches...");
    for _ in 0..3 {
        if let Err(e) = session.move_wheel(0, -1) {
            eprintln!("   Error: {}", e);
        }
        sleep(Duration::from_millis(100));
    }

    println!("3. Typing 'Hi'...");
    let typed = session
        .press(KEY_LEFTSHIFT)
        .and_then(|_| session.click(KEY_H))
        .and_then(|_| session.release(KEY_LEFTSHIFT))
        .and_then(|_| session.click(KEY_I));
    if let Err(e) = typed {
        eprintln!("   Error: {}", e);
    }

    println!("\nDestroying device...");
    match session.close() {
        Ok(()) => println!("Done!"),
        Err(e) => eprintln!("Error: {}", e),
    }
}
