//! XT (scan code set 1) key numbers as sent by a PC/XT keyboard.
//!
//! Bit 7 of a received byte marks a break; the remaining seven bits are the base code below.

pub const NONE: u8 = 0x00;
pub const ESCAPE: u8 = 0x01;
pub const N1: u8 = 0x02;
pub const N2: u8 = 0x03;
pub const N3: u8 = 0x04;
pub const N4: u8 = 0x05;
pub const N5: u8 = 0x06;
pub const N6: u8 = 0x07;
pub const N7: u8 = 0x08;
pub const N8: u8 = 0x09;
pub const N9: u8 = 0x0A;
pub const N0: u8 = 0x0B;
pub const MINUS: u8 = 0x0C;
pub const EQUAL: u8 = 0x0D;
pub const BACKSPACE: u8 = 0x0E;
pub const TAB: u8 = 0x0F;
pub const Q: u8 = 0x10;
pub const W: u8 = 0x11;
pub const E: u8 = 0x12;
pub const R: u8 = 0x13;
pub const T: u8 = 0x14;
pub const Y: u8 = 0x15;
pub const U: u8 = 0x16;
pub const I: u8 = 0x17;
pub const O: u8 = 0x18;
pub const P: u8 = 0x19;
pub const LBRACKET: u8 = 0x1A;
pub const RBRACKET: u8 = 0x1B;
pub const ENTER: u8 = 0x1C;
pub const CONTROL: u8 = 0x1D;
pub const A: u8 = 0x1E;
pub const S: u8 = 0x1F;
pub const D: u8 = 0x20;
pub const F: u8 = 0x21;
pub const G: u8 = 0x22;
pub const H: u8 = 0x23;
pub const J: u8 = 0x24;
pub const K: u8 = 0x25;
pub const L: u8 = 0x26;
pub const SEMICOLON: u8 = 0x27;
pub const QUOTE: u8 = 0x28;
pub const GRAVE: u8 = 0x29;
pub const LSHIFT: u8 = 0x2A;
pub const BACKSLASH: u8 = 0x2B;
pub const Z: u8 = 0x2C;
pub const X: u8 = 0x2D;
pub const C: u8 = 0x2E;
pub const V: u8 = 0x2F;
pub const B: u8 = 0x30;
pub const N: u8 = 0x31;
pub const M: u8 = 0x32;
pub const COMMA: u8 = 0x33;
pub const PERIOD: u8 = 0x34;
pub const SLASH: u8 = 0x35;
pub const RSHIFT: u8 = 0x36;
pub const KP_ASTERISK: u8 = 0x37;
pub const ALT: u8 = 0x38;
pub const SPACE: u8 = 0x39;
pub const CAPSLOCK: u8 = 0x3A;
pub const F1: u8 = 0x3B;
pub const F2: u8 = 0x3C;
pub const F3: u8 = 0x3D;
pub const F4: u8 = 0x3E;
pub const F5: u8 = 0x3F;
pub const F6: u8 = 0x40;
pub const F7: u8 = 0x41;
pub const F8: u8 = 0x42;
pub const F9: u8 = 0x43;
pub const F10: u8 = 0x44;
pub const NUM_LOCK: u8 = 0x45;
pub const SCROLL_LOCK: u8 = 0x46;
pub const KP_7: u8 = 0x47;
pub const KP_8: u8 = 0x48;
pub const KP_9: u8 = 0x49;
pub const KP_MINUS: u8 = 0x4A;
pub const KP_4: u8 = 0x4B;
pub const KP_5: u8 = 0x4C;
pub const KP_6: u8 = 0x4D;
pub const KP_PLUS: u8 = 0x4E;
pub const KP_1: u8 = 0x4F;
pub const KP_2: u8 = 0x50;
pub const KP_3: u8 = 0x51;
pub const KP_0: u8 = 0x52;
pub const KP_DOT: u8 = 0x53;

/// Highest base code an 83-key XT keyboard sends.
pub const MAX_CODE: u8 = 0x53;

/// Sent by the keyboard once its power-on self test passes.
pub const BAT_COMPLETE: u8 = 0xAA;

pub const BREAK_BIT: u8 = 0x80;

pub fn base_code(scan_code: u8) -> u8 {
    scan_code & !BREAK_BIT
}

pub fn is_break(scan_code: u8) -> bool {
    scan_code & BREAK_BIT != 0
}
