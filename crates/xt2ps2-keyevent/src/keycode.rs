use std::fmt;

/// Key identifier derived from the USB HID keyboard usage page.
///
/// Digits are spelled `N0`..`N9`. Codes from `0xF0` up are internal to the adapter: layer
/// sentinels are consumed by the keymap, the rest map to dedicated Set-2 sequences.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KeyCode(pub u8);

macro_rules! key_codes {
    ($($name:ident = $value:literal,)*) => {
        impl KeyCode {
            $(pub const $name: KeyCode = KeyCode($value);)*

            pub fn name(self) -> Option<&'static str> {
                match self.0 {
                    $($value => Some(stringify!($name)),)*
                    _ => None,
                }
            }
        }
    };
}

key_codes! {
    NONE = 0x00,
    ROLL_OVER = 0x01,
    POST_FAIL = 0x02,
    UNDEFINED = 0x03,
    A = 0x04,
    B = 0x05,
    C = 0x06,
    D = 0x07,
    E = 0x08,
    F = 0x09,
    G = 0x0A,
    H = 0x0B,
    I = 0x0C,
    J = 0x0D,
    K = 0x0E,
    L = 0x0F,
    M = 0x10,
    N = 0x11,
    O = 0x12,
    P = 0x13,
    Q = 0x14,
    R = 0x15,
    S = 0x16,
    T = 0x17,
    U = 0x18,
    V = 0x19,
    W = 0x1A,
    X = 0x1B,
    Y = 0x1C,
    Z = 0x1D,
    N1 = 0x1E,
    N2 = 0x1F,
    N3 = 0x20,
    N4 = 0x21,
    N5 = 0x22,
    N6 = 0x23,
    N7 = 0x24,
    N8 = 0x25,
    N9 = 0x26,
    N0 = 0x27,
    ENTER = 0x28,
    ESCAPE = 0x29,
    BACKSPACE = 0x2A,
    TAB = 0x2B,
    SPACE = 0x2C,
    MINUS = 0x2D,
    EQUAL = 0x2E,
    LBRACKET = 0x2F,
    RBRACKET = 0x30,
    BACKSLASH = 0x31,
    NONUS_HASH = 0x32,
    SEMICOLON = 0x33,
    QUOTE = 0x34,
    GRAVE = 0x35,
    COMMA = 0x36,
    PERIOD = 0x37,
    SLASH = 0x38,
    CAPS_LOCK = 0x39,
    F1 = 0x3A,
    F2 = 0x3B,
    F3 = 0x3C,
    F4 = 0x3D,
    F5 = 0x3E,
    F6 = 0x3F,
    F7 = 0x40,
    F8 = 0x41,
    F9 = 0x42,
    F10 = 0x43,
    F11 = 0x44,
    F12 = 0x45,
    PRINT_SCREEN = 0x46,
    SCROLL_LOCK = 0x47,
    PAUSE = 0x48,
    INSERT = 0x49,
    HOME = 0x4A,
    PAGE_UP = 0x4B,
    DELETE = 0x4C,
    END = 0x4D,
    PAGE_DOWN = 0x4E,
    RIGHT = 0x4F,
    LEFT = 0x50,
    DOWN = 0x51,
    UP = 0x52,
    NUM_LOCK = 0x53,
    KP_SLASH = 0x54,
    KP_ASTERISK = 0x55,
    KP_MINUS = 0x56,
    KP_PLUS = 0x57,
    KP_ENTER = 0x58,
    KP_1 = 0x59,
    KP_2 = 0x5A,
    KP_3 = 0x5B,
    KP_4 = 0x5C,
    KP_5 = 0x5D,
    KP_6 = 0x5E,
    KP_7 = 0x5F,
    KP_8 = 0x60,
    KP_9 = 0x61,
    KP_0 = 0x62,
    KP_DOT = 0x63,
    NONUS_BACKSLASH = 0x64,
    APPLICATION = 0x65,
    POWER = 0x66,
    KP_EQUAL = 0x67,
    F13 = 0x68,
    F14 = 0x69,
    F15 = 0x6A,
    F16 = 0x6B,
    F17 = 0x6C,
    F18 = 0x6D,
    F19 = 0x6E,
    F20 = 0x6F,
    F21 = 0x70,
    F22 = 0x71,
    F23 = 0x72,
    F24 = 0x73,
    EXECUTE = 0x74,
    HELP = 0x75,
    MENU = 0x76,
    SELECT = 0x77,
    STOP = 0x78,
    AGAIN = 0x79,
    UNDO = 0x7A,
    CUT = 0x7B,
    COPY = 0x7C,
    PASTE = 0x7D,
    FIND = 0x7E,
    MUTE = 0x7F,
    VOLUME_UP = 0x80,
    VOLUME_DOWN = 0x81,
    LOCKING_CAPS = 0x82,
    LOCKING_NUM = 0x83,
    LOCKING_SCROLL = 0x84,
    KP_COMMA = 0x85,
    KP_EQUAL_AS400 = 0x86,
    INT1 = 0x87,
    INT2 = 0x88,
    INT3 = 0x89,
    INT4 = 0x8A,
    INT5 = 0x8B,
    INT6 = 0x8C,
    INT7 = 0x8D,
    INT8 = 0x8E,
    INT9 = 0x8F,
    LANG1 = 0x90,
    LANG2 = 0x91,
    LANG3 = 0x92,
    LANG4 = 0x93,
    LANG5 = 0x94,
    LANG6 = 0x95,
    LANG7 = 0x96,
    LANG8 = 0x97,
    LANG9 = 0x98,
    ALT_ERASE = 0x99,
    SYSREQ = 0x9A,
    CANCEL = 0x9B,
    CLEAR = 0x9C,
    PRIOR = 0x9D,
    RETURN = 0x9E,
    SEPARATOR = 0x9F,
    OUT = 0xA0,
    OPER = 0xA1,
    CLEAR_AGAIN = 0xA2,
    CRSEL = 0xA3,
    EXSEL = 0xA4,

    KP_00 = 0xB0,
    KP_000 = 0xB1,
    THOUSANDS_SEPARATOR = 0xB2,
    DECIMAL_SEPARATOR = 0xB3,
    CURRENCY_UNIT = 0xB4,
    CURRENCY_SUB_UNIT = 0xB5,
    KP_LPAREN = 0xB6,
    KP_RPAREN = 0xB7,
    KP_LBRACE = 0xB8,
    KP_RBRACE = 0xB9,
    KP_TAB = 0xBA,
    KP_BACKSPACE = 0xBB,
    KP_A = 0xBC,
    KP_B = 0xBD,
    KP_C = 0xBE,
    KP_D = 0xBF,
    KP_E = 0xC0,
    KP_F = 0xC1,
    KP_XOR = 0xC2,
    KP_CARET = 0xC3,
    KP_PERCENT = 0xC4,
    KP_LT = 0xC5,
    KP_GT = 0xC6,
    KP_BITWISE_AND = 0xC7,
    KP_LOGICAL_AND = 0xC8,
    KP_BITWISE_OR = 0xC9,
    KP_LOGICAL_OR = 0xCA,
    KP_COLON = 0xCB,
    KP_HASH = 0xCC,
    KP_SPACE = 0xCD,
    KP_AT = 0xCE,
    KP_EXCLAMATION = 0xCF,
    KP_MEM_STORE = 0xD0,
    KP_MEM_RECALL = 0xD1,
    KP_MEM_CLEAR = 0xD2,
    KP_MEM_ADD = 0xD3,
    KP_MEM_SUB = 0xD4,
    KP_MEM_MUL = 0xD5,
    KP_MEM_DIV = 0xD6,
    KP_PLUS_MINUS = 0xD7,
    KP_CLEAR = 0xD8,
    KP_CLEAR_ENTRY = 0xD9,
    KP_BINARY = 0xDA,
    KP_OCTAL = 0xDB,
    KP_DECIMAL = 0xDC,
    KP_HEXADECIMAL = 0xDD,

    LCTRL = 0xE0,
    LSHIFT = 0xE1,
    LALT = 0xE2,
    LGUI = 0xE3,
    RCTRL = 0xE4,
    RSHIFT = 0xE5,
    RALT = 0xE6,
    RGUI = 0xE7,

    TOGGLE_LAYER = 0xF0,
    MOMENTARY_LAYER = 0xF1,
    BREAK = 0xF2,
    CD_VOLUME_UP = 0xF3,
    CD_VOLUME_DOWN = 0xF4,
    CD_MUTE = 0xF5,
    CD_STOP = 0xF6,
    CD_PLAY_PAUSE = 0xF7,
    CD_NEXT_TRACK = 0xF8,
    CD_PREV_TRACK = 0xF9,}

impl KeyCode {
    /// One past the highest defined code; sizes per-key lookup tables.
    pub const COUNT: usize = 0xFA;

    pub const fn raw(self) -> u8 {
        self.0
    }

    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    pub const fn is_modifier(self) -> bool {
        self.0 >= Self::LCTRL.0 && self.0 <= Self::RGUI.0
    }

    pub const fn is_layer_sentinel(self) -> bool {
        self.0 == Self::TOGGLE_LAYER.0 || self.0 == Self::MOMENTARY_LAYER.0
    }
}

impl fmt::Debug for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "KeyCode::{name}"),
            None => write!(f, "KeyCode({:#04x})", self.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hid_anchor_values() {
        assert_eq!(KeyCode::A.raw(), 0x04);
        assert_eq!(KeyCode::N0.raw(), 0x27);
        assert_eq!(KeyCode::CAPS_LOCK.raw(), 0x39);
        assert_eq!(KeyCode::PRINT_SCREEN.raw(), 0x46);
        assert_eq!(KeyCode::NUM_LOCK.raw(), 0x53);
        assert_eq!(KeyCode::KP_DOT.raw(), 0x63);
        assert_eq!(KeyCode::SYSREQ.raw(), 0x9A);
        assert_eq!(KeyCode::EXSEL.raw(), 0xA4);
        assert_eq!(KeyCode::KP_HEXADECIMAL.raw(), 0xDD);
        assert_eq!(KeyCode::RGUI.raw(), 0xE7);
        assert_eq!(KeyCode::CD_PREV_TRACK.raw() as usize, KeyCode::COUNT - 1);
    }

    #[test]
    fn classification_and_debug() {
        assert!(KeyCode::LCTRL.is_modifier());
        assert!(KeyCode::RGUI.is_modifier());
        assert!(!KeyCode::BREAK.is_modifier());
        assert!(KeyCode::MOMENTARY_LAYER.is_layer_sentinel());
        assert!(KeyCode::NONE.is_none());
        assert_eq!(format!("{:?}", KeyCode::PAUSE), "KeyCode::PAUSE");
        assert_eq!(format!("{:?}", KeyCode(0xA8)), "KeyCode(0xa8)");
    }
}
