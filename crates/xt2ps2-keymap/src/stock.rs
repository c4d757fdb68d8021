//! Stock keymap: the 83-key XT layout as printed on the keycaps.

use xt2ps2_keyevent::{KeyCode, Modifiers};

use crate::keymap::{single_layer, KeyCombination, Keymap, TABLE_ROWS};

/// Row `n` holds the key for XT base code `n + 1`.
pub(crate) const STOCK_LAYER: [KeyCode; TABLE_ROWS] = [
    KeyCode::ESCAPE,
    KeyCode::N1,
    KeyCode::N2,
    KeyCode::N3,
    KeyCode::N4,
    KeyCode::N5,
    KeyCode::N6,
    KeyCode::N7,
    KeyCode::N8,
    KeyCode::N9,
    KeyCode::N0,
    KeyCode::MINUS,
    KeyCode::EQUAL,
    KeyCode::BACKSPACE,
    KeyCode::TAB,
    KeyCode::Q,
    KeyCode::W,
    KeyCode::E,
    KeyCode::R,
    KeyCode::T,
    KeyCode::Y,
    KeyCode::U,
    KeyCode::I,
    KeyCode::O,
    KeyCode::P,
    KeyCode::LBRACKET,
    KeyCode::RBRACKET,
    KeyCode::ENTER,
    KeyCode::LCTRL,
    KeyCode::A,
    KeyCode::S,
    KeyCode::D,
    KeyCode::F,
    KeyCode::G,
    KeyCode::H,
    KeyCode::J,
    KeyCode::K,
    KeyCode::L,
    KeyCode::SEMICOLON,
    KeyCode::QUOTE,
    KeyCode::GRAVE,
    KeyCode::LSHIFT,
    KeyCode::BACKSLASH,
    KeyCode::Z,
    KeyCode::X,
    KeyCode::C,
    KeyCode::V,
    KeyCode::B,
    KeyCode::N,
    KeyCode::M,
    KeyCode::COMMA,
    KeyCode::PERIOD,
    KeyCode::SLASH,
    KeyCode::RSHIFT,
    KeyCode::KP_ASTERISK,
    KeyCode::LALT,
    KeyCode::SPACE,
    KeyCode::CAPS_LOCK,
    KeyCode::F1,
    KeyCode::F2,
    KeyCode::F3,
    KeyCode::F4,
    KeyCode::F5,
    KeyCode::F6,
    KeyCode::F7,
    KeyCode::F8,
    KeyCode::F9,
    KeyCode::F10,
    KeyCode::NUM_LOCK,
    KeyCode::SCROLL_LOCK,
    KeyCode::KP_7,
    KeyCode::KP_8,
    KeyCode::KP_9,
    KeyCode::KP_MINUS,
    KeyCode::KP_4,
    KeyCode::KP_5,
    KeyCode::KP_6,
    KeyCode::KP_PLUS,
    KeyCode::KP_1,
    KeyCode::KP_2,
    KeyCode::KP_3,
    KeyCode::KP_0,
    KeyCode::KP_DOT,
];

const STOCK_COMBOS: [KeyCombination; 4] = [
    KeyCombination::new(Modifiers::LSHIFT, KeyCode::KP_ASTERISK, KeyCode::PRINT_SCREEN),
    KeyCombination::new(Modifiers::LALT, KeyCode::KP_ASTERISK, KeyCode::SYSREQ),
    KeyCombination::new(Modifiers::LCTRL, KeyCode::NUM_LOCK, KeyCode::PAUSE),
    KeyCombination::new(Modifiers::LCTRL, KeyCode::SCROLL_LOCK, KeyCode::BREAK),
];

pub static STOCK_KEYMAP: Keymap = Keymap::new("stock", single_layer(STOCK_LAYER), &STOCK_COMBOS);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::Layer;
    use xt2ps2_xt::scancode;

    #[test]
    fn follows_xt_keycaps() {
        let cases = [
            (scancode::ESCAPE, KeyCode::ESCAPE),
            (scancode::CONTROL, KeyCode::LCTRL),
            (scancode::ALT, KeyCode::LALT),
            (scancode::A, KeyCode::A),
            (scancode::KP_ASTERISK, KeyCode::KP_ASTERISK),
            (scancode::F10, KeyCode::F10),
            (scancode::NUM_LOCK, KeyCode::NUM_LOCK),
            (scancode::KP_0, KeyCode::KP_0),
        ];
        for (xt, kc) in cases {
            assert_eq!(STOCK_KEYMAP.lookup(xt, Layer::Base), kc, "xt {xt:#04x}");
            assert_eq!(STOCK_KEYMAP.lookup(xt, Layer::Function), kc, "xt {xt:#04x}");
        }
    }

    #[test]
    fn every_row_is_mapped() {
        for xt in 1..=scancode::MAX_CODE {
            assert!(!STOCK_KEYMAP.lookup(xt, Layer::Base).is_none(), "xt {xt:#04x}");
        }
    }
}
