//! User keymap.
//!
//! The base layer is the stock layout with Ctrl and CapsLock exchanged and ScrollLock turned
//! into a momentary layer key. Holding ScrollLock selects the function layer:
//!
//! - F1..F10 become F11, F12 and the media keys, F10 is the Application key,
//! - the keypad becomes the navigation cluster, KP- sends Pause,
//! - `/` and Enter send their keypad variants, Esc sends the grave key and Alt is AltGr,
//! - NumLock toggles the layer, so ScrollLock + NumLock locks the function layer until NumLock
//!   is tapped again.

use xt2ps2_keyevent::{KeyCode, Modifiers};
use xt2ps2_xt::scancode;

use crate::keymap::{KeyCombination, Keymap, TABLE_ROWS};
use crate::stock::STOCK_LAYER;

const fn set(mut layer: [KeyCode; TABLE_ROWS], xt: u8, code: KeyCode) -> [KeyCode; TABLE_ROWS] {
    layer[xt as usize - 1] = code;
    layer
}

const fn base_layer() -> [KeyCode; TABLE_ROWS] {
    let layer = set(STOCK_LAYER, scancode::CONTROL, KeyCode::CAPS_LOCK);
    let layer = set(layer, scancode::CAPSLOCK, KeyCode::LCTRL);
    set(layer, scancode::SCROLL_LOCK, KeyCode::MOMENTARY_LAYER)
}

const FUNCTION_KEYS: [KeyCode; 10] = [
    KeyCode::F11,
    KeyCode::F12,
    KeyCode::CD_MUTE,
    KeyCode::CD_VOLUME_DOWN,
    KeyCode::CD_VOLUME_UP,
    KeyCode::CD_STOP,
    KeyCode::CD_PLAY_PAUSE,
    KeyCode::CD_PREV_TRACK,
    KeyCode::CD_NEXT_TRACK,
    KeyCode::APPLICATION,
];

const NAVIGATION: [(u8, KeyCode); 11] = [
    (scancode::KP_7, KeyCode::HOME),
    (scancode::KP_8, KeyCode::UP),
    (scancode::KP_9, KeyCode::PAGE_UP),
    (scancode::KP_4, KeyCode::LEFT),
    (scancode::KP_6, KeyCode::RIGHT),
    (scancode::KP_1, KeyCode::END),
    (scancode::KP_2, KeyCode::DOWN),
    (scancode::KP_3, KeyCode::PAGE_DOWN),
    (scancode::KP_0, KeyCode::INSERT),
    (scancode::KP_DOT, KeyCode::DELETE),
    (scancode::KP_MINUS, KeyCode::PAUSE),
];

const fn function_layer() -> [KeyCode; TABLE_ROWS] {
    let mut layer = base_layer();
    let mut i = 0;
    while i < FUNCTION_KEYS.len() {
        layer = set(layer, scancode::F1 + i as u8, FUNCTION_KEYS[i]);
        i += 1;
    }
    let mut i = 0;
    while i < NAVIGATION.len() {
        layer = set(layer, NAVIGATION[i].0, NAVIGATION[i].1);
        i += 1;
    }
    let layer = set(layer, scancode::NUM_LOCK, KeyCode::TOGGLE_LAYER);
    let layer = set(layer, scancode::ESCAPE, KeyCode::GRAVE);
    let layer = set(layer, scancode::ALT, KeyCode::RALT);
    let layer = set(layer, scancode::SLASH, KeyCode::KP_SLASH);
    set(layer, scancode::ENTER, KeyCode::KP_ENTER)
}

const fn user_table() -> [[KeyCode; 2]; TABLE_ROWS] {
    let base = base_layer();
    let function = function_layer();
    let mut table = [[KeyCode::NONE; 2]; TABLE_ROWS];
    let mut i = 0;
    while i < TABLE_ROWS {
        table[i] = [base[i], function[i]];
        i += 1;
    }
    table
}

const USER_COMBOS: [KeyCombination; 4] = [
    KeyCombination::new(Modifiers::LSHIFT, KeyCode::KP_ASTERISK, KeyCode::PRINT_SCREEN),
    KeyCombination::new(Modifiers::LALT, KeyCode::KP_ASTERISK, KeyCode::SYSREQ),
    KeyCombination::new(Modifiers::LCTRL, KeyCode::NUM_LOCK, KeyCode::PAUSE),
    KeyCombination::new(Modifiers::LCTRL, KeyCode::PAUSE, KeyCode::BREAK),
];

pub static USER_KEYMAP: Keymap = Keymap::new("user", user_table(), &USER_COMBOS);
