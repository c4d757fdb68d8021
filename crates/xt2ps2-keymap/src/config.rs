use thiserror::Error;
use xt2ps2_util::EepromError;
use xt2ps2_xt::scancode;

pub type Result<T> = std::result::Result<T, KeymapError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeymapError {
    #[error("swap key {0:#04x} is not a usable XT base code")]
    InvalidSwapKey(u8),

    #[error(transparent)]
    Eeprom(#[from] EepromError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeymapConfig {
    /// XT base code that, pressed with both shifts held, swaps between the stock and user
    /// keymaps.
    pub swap_key: u8,
    /// Start of the wear-leveled block holding the keymap selection.
    pub eeprom_base: usize,
    pub eeprom_block_len: usize,
}

impl Default for KeymapConfig {
    fn default() -> Self {
        Self {
            swap_key: scancode::F10,
            eeprom_base: 0,
            eeprom_block_len: 128,
        }
    }
}

impl KeymapConfig {
    pub fn validate(&self) -> Result<()> {
        let key = self.swap_key;
        if key == scancode::NONE
            || key > scancode::MAX_CODE
            || key == scancode::LSHIFT
            || key == scancode::RSHIFT
        {
            return Err(KeymapError::InvalidSwapKey(key));
        }
        if self.eeprom_block_len == 0 {
            return Err(EepromError::EmptyBlock.into());
        }
        Ok(())
    }
}
