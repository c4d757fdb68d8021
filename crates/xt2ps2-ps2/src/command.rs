use bitflags::bitflags;

/// Bytes the host sends to the keyboard.
pub mod command {
    pub const SET_LEDS: u8 = 0xED;
    pub const ECHO: u8 = 0xEE;
    pub const SCAN_CODE_SET: u8 = 0xF0;
    pub const READ_ID: u8 = 0xF2;
    pub const SET_TYPEMATIC_RATE: u8 = 0xF3;
    pub const ENABLE: u8 = 0xF4;
    pub const DISABLE: u8 = 0xF5;
    pub const SET_DEFAULTS: u8 = 0xF6;
    pub const SET_ALL_TYPEMATIC: u8 = 0xF7;
    pub const SET_ALL_MAKE_BREAK: u8 = 0xF8;
    pub const SET_ALL_MAKE: u8 = 0xF9;
    pub const SET_ALL_TYPEMATIC_MAKE_BREAK: u8 = 0xFA;
    pub const SET_KEY_TYPEMATIC: u8 = 0xFB;
    pub const SET_KEY_MAKE_BREAK: u8 = 0xFC;
    pub const SET_KEY_MAKE: u8 = 0xFD;
    /// Handled by the transceiver, never seen by the session.
    pub const RESEND: u8 = 0xFE;
    pub const RESET: u8 = 0xFF;
}

/// Bytes the keyboard sends that are not scan codes.
pub mod response {
    pub const BAT_PASS: u8 = 0xAA;
    pub const BAT_FAIL: u8 = 0xFC;
    pub const ECHO: u8 = 0xEE;
    pub const ACK: u8 = 0xFA;
    pub const RESEND: u8 = 0xFE;
    /// Replaces the newest queued byte when the send queue overruns.
    pub const OVERRUN: u8 = 0xFF;
}

bitflags! {
    /// Keyboard LED state, in `Set LEDs` parameter bit order.
    #[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
    pub struct Ps2Leds: u8 {
        const SCROLL_LOCK = 1 << 0;
        const NUM_LOCK = 1 << 1;
        const CAPS_LOCK = 1 << 2;
    }
}

/// Commands that take a parameter byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ExpectingData {
    LedState,
    Typematic,
    ScanCodeSet,
}
