//! Device side of the PS/2 keyboard interface.
//!
//! [`Ps2Transceiver`] drives the bus clock and moves bits in both directions from a 20 µs tick.
//! [`Ps2KeyboardSession`] runs the keyboard protocol on top: power-on reset and BAT, the host
//! command set, a send queue with overrun marking, and typematic repeat. Key events are
//! encoded with [`xt2ps2_keyevent::ScanCodeConverter`] (scan code set 2 only).

mod bus;
#[path = "command.rs"]
mod commands;
mod conditions;
mod config;
mod handler;
mod session;
mod transceiver;
mod typematic;

pub use bus::{BusState, Ps2Bus};
pub use commands::{command, response, Ps2Leds};
pub use conditions::{KeyConditionTable, KeyConditions};
pub use config::{
    ConfigError, Ps2Config, Result, BAT_RANGE_MS, DEFAULT_TYPEMATIC_RATE, POR_RANGE_MS,
};
pub use handler::{LedStatusHandler, Ps2Handler, ResetHandler, SelfTestHandler};
pub use session::{Ps2KeyboardSession, SessionState};
pub use transceiver::{Ps2Status, Ps2Transceiver, TransceiverState};
pub use typematic::{Typematic, TypematicRate, TypematicState};

#[cfg(test)]
mod proptests;
