use thiserror::Error;
use xt2ps2_keymap::{KeymapConfig, KeymapError};
use xt2ps2_ps2::Ps2Config;
use xt2ps2_xt::XtConfig;

pub type Result<T> = std::result::Result<T, AdapterError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdapterError {
    #[error("xt host: {0}")]
    Xt(#[from] xt2ps2_xt::ConfigError),

    #[error("ps/2 device: {0}")]
    Ps2(#[from] xt2ps2_ps2::ConfigError),

    #[error("keymap: {0}")]
    Keymap(#[from] KeymapError),

    #[error("key event queue capacity must be non-zero")]
    EmptyKeyEventQueue,
}

/// Everything needed to bring up a [`crate::Converter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterConfig {
    pub xt: XtConfig,
    pub ps2: Ps2Config,
    pub keymap: KeymapConfig,
    /// Decoded XT key events buffered between the host side and the keymap.
    pub key_event_queue_capacity: usize,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            xt: XtConfig::default(),
            ps2: Ps2Config::default(),
            keymap: KeymapConfig::default(),
            key_event_queue_capacity: 10,
        }
    }
}

impl AdapterConfig {
    pub fn validate(&self) -> Result<()> {
        self.xt.validate()?;
        self.ps2.validate()?;
        self.keymap.validate()?;
        if self.key_event_queue_capacity == 0 {
            return Err(AdapterError::EmptyKeyEventQueue);
        }
        Ok(())
    }
}
