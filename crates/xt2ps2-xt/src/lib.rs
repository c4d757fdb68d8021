//! Host side of the PC/XT keyboard interface.
//!
//! [`XtReceiver`] decodes frames bit by bit from clock-edge interrupts and sequences the
//! keyboard reset lines from a 1 ms timer. [`XtKeyboardSession`] sits on top and is polled from
//! the main loop: it moves decoded scan codes into a queue, drops the keyboard's own typematic
//! repeats and soft-resets the keyboard after a run of bad frames.
//!
//! Board I/O goes through the [`XtLines`] trait so the engines run unchanged against real pins
//! or a test harness.

mod config;
mod hal;
mod receiver;
pub mod scancode;
mod session;

pub use config::{ConfigError, Result, XtConfig, POR_MARGIN_MS};
pub use hal::XtLines;
pub use receiver::{ReceiveState, XcvrState, XtReceiver, XtStatus};
pub use session::XtKeyboardSession;

#[cfg(test)]
mod proptests;
