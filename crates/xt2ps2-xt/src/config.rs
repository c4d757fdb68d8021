use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{0} must be non-zero")]
    Zero(&'static str),
}

/// Extra time after the hard-reset line is released before the soft-reset phase starts.
pub const POR_MARGIN_MS: u16 = 25;

/// Timing and behaviour of the XT host side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XtConfig {
    /// A gap between clock edges longer than this starts a new frame.
    pub start_of_frame_threshold_us: u32,
    /// Keyboards that send a single start bit instead of the usual two.
    pub single_start_bit: bool,
    /// Run a hard reset (and then a soft reset) every time the receiver is enabled.
    pub por_on_enable: bool,
    /// Whether the board wires the keyboard reset line.
    pub use_reset_line: bool,
    pub soft_reset_enabled: bool,
    pub soft_reset_hold_ms: u16,
    pub hard_reset_hold_ms: u16,
    /// Consecutive frame errors tolerated before the receiver is soft-reset.
    pub error_threshold: u8,
    /// Forward repeated make codes from the keyboard's own typematic.
    pub forward_typematic: bool,
    pub queue_capacity: usize,
}

impl Default for XtConfig {
    fn default() -> Self {
        Self {
            start_of_frame_threshold_us: 200,
            single_start_bit: false,
            por_on_enable: true,
            use_reset_line: false,
            soft_reset_enabled: true,
            soft_reset_hold_ms: 20,
            hard_reset_hold_ms: 50,
            error_threshold: 10,
            forward_typematic: false,
            queue_capacity: 16,
        }
    }
}

impl XtConfig {
    pub fn validate(&self) -> Result<()> {
        if self.start_of_frame_threshold_us == 0 {
            return Err(ConfigError::Zero("start_of_frame_threshold_us"));
        }
        if self.soft_reset_hold_ms == 0 {
            return Err(ConfigError::Zero("soft_reset_hold_ms"));
        }
        if self.hard_reset_hold_ms == 0 {
            return Err(ConfigError::Zero("hard_reset_hold_ms"));
        }
        if self.queue_capacity == 0 {
            return Err(ConfigError::Zero("queue_capacity"));
        }
        Ok(())
    }
}
