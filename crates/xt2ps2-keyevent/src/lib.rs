//! Key events and their PS/2 Set-2 encoding.
//!
//! [`KeyCode`] values follow the USB HID keyboard usage table, with a handful of internal codes
//! (layer sentinels, Break, consumer keys) above `0xEF` that never reach the wire as-is.
//! [`ScanCodeConverter`] turns a [`KeyEvent`] into the byte sequence a PS/2 keyboard would send.

mod converter;
mod event;
mod keycode;
mod modifiers;
pub mod set2;

pub use converter::ScanCodeConverter;
pub use event::{KeyAction, KeyEvent};
pub use keycode::KeyCode;
pub use modifiers::Modifiers;
