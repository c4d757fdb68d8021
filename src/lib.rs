//! XT keyboard to PS/2 host adapter.
//!
//! The adapter is the bus host for a PC/XT keyboard and a PS/2 keyboard to the computer it is
//! plugged into. [`Converter`] ties the pieces together:
//!
//! - [`HostAdapter`] decodes XT frames into key events ([`xt2ps2_xt`]),
//! - [`xt2ps2_keymap::KeymapEngine`] remaps them through the selected keymap,
//! - [`DeviceAdapter`] encodes them as scan code set 2 and runs the PS/2 keyboard protocol
//!   ([`xt2ps2_ps2`]).
//!
//! Board I/O is reached through [`xt2ps2_xt::XtLines`], [`xt2ps2_ps2::Ps2Bus`],
//! [`StatusLedSink`] and [`xt2ps2_util::EepromCell`].

mod config;
mod converter;
mod device;
mod host;

pub use config::{AdapterConfig, AdapterError, Result};
pub use converter::Converter;
pub use device::{DeviceAdapter, DeviceHandler, StatusLedSink};
pub use host::HostAdapter;

pub use xt2ps2_keyevent as keyevent;
pub use xt2ps2_keymap as keymap;
pub use xt2ps2_ps2 as ps2;
pub use xt2ps2_time as time;
pub use xt2ps2_util as util;
pub use xt2ps2_xt as xt;
