use std::ops::RangeInclusive;

use thiserror::Error;
use xt2ps2_time::PS2_TICK_PERIOD_US;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("power-on reset delay {0} ms is outside 150..=2000 ms")]
    PorOutOfRange(u16),
    #[error("BAT duration {0} ms is outside 300..=500 ms")]
    BatOutOfRange(u16),
    #[error("send queue capacity {0} leaves no room for the ID response")]
    QueueTooSmall(usize),
}

pub const POR_RANGE_MS: RangeInclusive<u16> = 150..=2000;
pub const BAT_RANGE_MS: RangeInclusive<u16> = 300..=500;

/// Default typematic rate/delay byte: 10.9 characters per second after 750 ms.
pub const DEFAULT_TYPEMATIC_RATE: u8 = 0x4B;

/// Keyboard-side PS/2 timing and identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ps2Config {
    pub por_ms: u16,
    pub bat_ms: u16,
    /// Minimum idle time between transmitted bytes.
    pub inter_byte_delay_us: u32,
    /// Reply to `Read ID`; an MF2 keyboard answers `AB 83`.
    pub keyboard_id: [u8; 2],
    pub send_queue_capacity: usize,
    pub default_typematic_rate: u8,
}

impl Default for Ps2Config {
    fn default() -> Self {
        Self {
            por_ms: 150,
            bat_ms: 300,
            inter_byte_delay_us: 500,
            keyboard_id: [0xAB, 0x83],
            send_queue_capacity: 64,
            default_typematic_rate: DEFAULT_TYPEMATIC_RATE,
        }
    }
}

impl Ps2Config {
    pub fn validate(&self) -> Result<()> {
        if !POR_RANGE_MS.contains(&self.por_ms) {
            return Err(ConfigError::PorOutOfRange(self.por_ms));
        }
        if !BAT_RANGE_MS.contains(&self.bat_ms) {
            return Err(ConfigError::BatOutOfRange(self.bat_ms));
        }
        if self.send_queue_capacity <= self.keyboard_id.len() {
            return Err(ConfigError::QueueTooSmall(self.send_queue_capacity));
        }
        Ok(())
    }

    pub(crate) fn ticks_for_ms(ms: u16) -> u32 {
        u32::from(ms) * 1000 / PS2_TICK_PERIOD_US
    }

    pub(crate) fn inter_byte_delay_ticks(&self) -> u16 {
        u16::try_from(self.inter_byte_delay_us / PS2_TICK_PERIOD_US).unwrap_or(u16::MAX)
    }
}
