//! XT base code to [`xt2ps2_keyevent::KeyEvent`] mapping.
//!
//! Two keymaps ship with the adapter: [`STOCK_KEYMAP`] follows the XT keycaps and
//! [`USER_KEYMAP`] adds a function layer. [`KeymapEngine`] applies the selected one and
//! handles key combinations, layer keys and the keymap-swap chord, persisting the choice
//! through a wear-leveled EEPROM block.

mod config;
mod engine;
mod keymap;
mod stock;
mod user;

pub use config::{KeymapConfig, KeymapError, Result};
pub use engine::{KeymapEngine, MappedEvents};
pub use keymap::{KeyCombination, Keymap, KeymapSelection, Layer, TABLE_ROWS};
pub use stock::STOCK_KEYMAP;
pub use user::USER_KEYMAP;

#[cfg(test)]
mod proptests;
