//! PS/2 scan code Set 2 make sequences.
//!
//! Entries with no Set-2 code are empty slices.

use crate::KeyCode;

/// Prefix of extended keys; never preceded by a break marker.
pub const EXTENDED_PREFIX: u8 = 0xE0;
pub const BREAK_PREFIX: u8 = 0xF0;

/// PrintScreen as sent with a fake left shift.
pub const PRINT_SCREEN_SHIFTED: &[u8] = &[0xE0, 0x12, 0xE0, 0x7C];

const BASE_LEN: usize = 0xA4;

/// Make sequence for `code`, or `None` when Set 2 has no code for it.
pub fn make_sequence(code: KeyCode) -> Option<&'static [u8]> {
    let raw = code.raw();
    let seq: &'static [u8] = if usize::from(raw) < BASE_LEN {
        BASE[usize::from(raw)]
    } else if code.is_modifier() {
        MODIFIERS[usize::from(raw - KeyCode::LCTRL.raw())]
    } else if (KeyCode::BREAK..=KeyCode::CD_PREV_TRACK).contains(&code) {
        MISC[usize::from(raw - KeyCode::BREAK.raw())]
    } else {
        return None;
    };
    if seq.is_empty() {
        None
    } else {
        Some(seq)
    }
}

pub(crate) const BASE: [&[u8]; BASE_LEN] = [
    &[], // NONE
    &[], // ROLL_OVER
    &[], // POST_FAIL
    &[], // UNDEFINED
    &[0x1C], // A
    &[0x32], // B
    &[0x21], // C
    &[0x23], // D
    &[0x24], // E
    &[0x2B], // F
    &[0x34], // G
    &[0x33], // H
    &[0x43], // I
    &[0x3B], // J
    &[0x42], // K
    &[0x4B], // L
    &[0x3A], // M
    &[0x31], // N
    &[0x44], // O
    &[0x4D], // P
    &[0x15], // Q
    &[0x2D], // R
    &[0x1B], // S
    &[0x2C], // T
    &[0x3C], // U
    &[0x2A], // V
    &[0x1D], // W
    &[0x22], // X
    &[0x35], // Y
    &[0x1A], // Z
    &[0x16], // N1
    &[0x1E], // N2
    &[0x26], // N3
    &[0x25], // N4
    &[0x2E], // N5
    &[0x36], // N6
    &[0x3D], // N7
    &[0x3E], // N8
    &[0x46], // N9
    &[0x45], // N0
    &[0x5A], // ENTER
    &[0x76], // ESCAPE
    &[0x66], // BACKSPACE
    &[0x0D], // TAB
    &[0x29], // SPACE
    &[0x4E], // MINUS
    &[0x55], // EQUAL
    &[0x54], // LBRACKET
    &[0x5B], // RBRACKET
    &[0x5D], // BACKSLASH
    &[0x5D], // NONUS_HASH
    &[0x4C], // SEMICOLON
    &[0x52], // QUOTE
    &[0x0E], // GRAVE
    &[0x41], // COMMA
    &[0x49], // PERIOD
    &[0x4A], // SLASH
    &[0x58], // CAPS_LOCK
    &[0x05], // F1
    &[0x06], // F2
    &[0x04], // F3
    &[0x0C], // F4
    &[0x03], // F5
    &[0x0B], // F6
    &[0x83], // F7
    &[0x0A], // F8
    &[0x01], // F9
    &[0x09], // F10
    &[0x78], // F11
    &[0x07], // F12
    &[0xE0, 0x7C], // PRINT_SCREEN
    &[0x7E], // SCROLL_LOCK
    &[0xE1, 0x14, 0x77, 0xE1, 0xF0, 0x14, 0xF0, 0x77], // PAUSE
    &[0xE0, 0x70], // INSERT
    &[0xE0, 0x6C], // HOME
    &[0xE0, 0x7D], // PAGE_UP
    &[0xE0, 0x71], // DELETE
    &[0xE0, 0x69], // END
    &[0xE0, 0x7A], // PAGE_DOWN
    &[0xE0, 0x74], // RIGHT
    &[0xE0, 0x6B], // LEFT
    &[0xE0, 0x72], // DOWN
    &[0xE0, 0x75], // UP
    &[0x77], // NUM_LOCK
    &[0xE0, 0x4A], // KP_SLASH
    &[0x7C], // KP_ASTERISK
    &[0x7B], // KP_MINUS
    &[0x79], // KP_PLUS
    &[0xE0, 0x5A], // KP_ENTER
    &[0x69], // KP_1
    &[0x72], // KP_2
    &[0x7A], // KP_3
    &[0x6B], // KP_4
    &[0x73], // KP_5
    &[0x74], // KP_6
    &[0x6C], // KP_7
    &[0x75], // KP_8
    &[0x7D], // KP_9
    &[0x70], // KP_0
    &[0x71], // KP_DOT
    &[0x61], // NONUS_BACKSLASH
    &[0xE0, 0x2F], // APPLICATION
    &[0xE0, 0x37], // POWER
    &[0x0F], // KP_EQUAL
    &[0x08], // F13
    &[0x10], // F14
    &[0x18], // F15
    &[0x20], // F16
    &[0x28], // F17
    &[0x30], // F18
    &[0x38], // F19
    &[0x40], // F20
    &[0x48], // F21
    &[0x50], // F22
    &[0x57], // F23
    &[0x5F], // F24
    &[], // EXECUTE
    &[], // HELP
    &[], // MENU
    &[], // SELECT
    &[], // STOP
    &[], // AGAIN
    &[], // UNDO
    &[], // CUT
    &[], // COPY
    &[], // PASTE
    &[], // FIND
    &[0xE0, 0x23], // MUTE
    &[0xE0, 0x32], // VOLUME_UP
    &[0xE0, 0x31], // VOLUME_DOWN
    &[], // LOCKING_CAPS
    &[], // LOCKING_NUM
    &[], // LOCKING_SCROLL
    &[0x6D], // KP_COMMA
    &[], // KP_EQUAL_AS400
    &[0x51], // INT1
    &[0x13], // INT2
    &[0x6A], // INT3
    &[0x64], // INT4
    &[0x67], // INT5
    &[0x27], // INT6
    &[], // INT7
    &[], // INT8
    &[], // INT9
    &[0xF2], // LANG1
    &[0xF1], // LANG2
    &[0x63], // LANG3
    &[0x62], // LANG4
    &[0x5F], // LANG5
    &[], // LANG6
    &[], // LANG7
    &[], // LANG8
    &[], // LANG9
    &[], // ALT_ERASE
    &[0x84], // SYSREQ
    &[], // CANCEL
    &[], // CLEAR
    &[], // PRIOR
    &[], // RETURN
    &[], // SEPARATOR
    &[], // OUT
    &[], // OPER
    &[], // CLEAR_AGAIN
    &[], // CRSEL
];

pub(crate) const MODIFIERS: [&[u8]; 8] = [
    &[0x14], // LCTRL
    &[0x12], // LSHIFT
    &[0x11], // LALT
    &[0xE0, 0x1F], // LGUI
    &[0xE0, 0x14], // RCTRL
    &[0x59], // RSHIFT
    &[0xE0, 0x11], // RALT
    &[0xE0, 0x27], // RGUI
];

pub(crate) const MISC: [&[u8]; 8] = [
    &[0xE0, 0x7E], // BREAK
    &[0xE0, 0x32], // CD_VOLUME_UP
    &[0xE0, 0x21], // CD_VOLUME_DOWN
    &[0xE0, 0x23], // CD_MUTE
    &[0xE0, 0x3B], // CD_STOP
    &[0xE0, 0x34], // CD_PLAY_PAUSE
    &[0xE0, 0x4D], // CD_NEXT_TRACK
    &[0xE0, 0x15], // CD_PREV_TRACK
];
