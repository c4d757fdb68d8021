use tracing::{debug, warn};
use xt2ps2_keyevent::{KeyCode, KeyEvent, Modifiers};
use xt2ps2_util::{EepromCell, WearLevelStore};
use xt2ps2_xt::scancode;

use crate::config::{KeymapConfig, Result};
use crate::keymap::{Keymap, KeymapSelection, Layer};
use crate::stock::STOCK_KEYMAP;
use crate::user::USER_KEYMAP;

const MAX_MAPPED: usize = 3;

/// Up to three key events produced from a single XT key transition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MappedEvents {
    events: [KeyEvent; MAX_MAPPED],
    len: usize,
}

impl MappedEvents {
    fn push(&mut self, event: KeyEvent) {
        if let Some(slot) = self.events.get_mut(self.len) {
            *slot = event;
            self.len += 1;
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_slice(&self) -> &[KeyEvent] {
        &self.events[..self.len]
    }

    pub fn iter(&self) -> impl Iterator<Item = &KeyEvent> {
        self.as_slice().iter()
    }
}

impl<'a> IntoIterator for &'a MappedEvents {
    type Item = &'a KeyEvent;
    type IntoIter = std::slice::Iter<'a, KeyEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

/// Outcome of the keymap-swap chord check.
enum Swap {
    NotSwap,
    Emit(KeyEvent),
    Absorb,
}

/// Maps XT key transitions to [`KeyEvent`]s through the selected keymap.
///
/// Besides the table lookup the engine handles modifier combinations, layer keys, the
/// LShift + RShift + swap-key chord that switches keymaps (persisted through a
/// [`WearLevelStore`]) and the Ctrl + Pause suppression PS/2 hosts need.
#[derive(Debug)]
pub struct KeymapEngine<E> {
    store: WearLevelStore<E>,
    swap_key: u8,
    selection: KeymapSelection,
    layer: Layer,
    mods: Modifiers,
    swap_shifts: Modifiers,
    swap_key_down: bool,
    active: Vec<bool>,
}

impl<E: EepromCell> KeymapEngine<E> {
    /// Opens the selection store and restores the last keymap. A store that cannot be read
    /// falls back to the stock keymap.
    pub fn new(config: &KeymapConfig, cell: E) -> Result<Self> {
        config.validate()?;
        let mut store = WearLevelStore::open(cell, config.eeprom_base, config.eeprom_block_len)?;
        let selection = match store.read_byte() {
            Ok(value) => KeymapSelection::from_stored(value),
            Err(err) => {
                warn!(%err, "failed to read keymap selection, using stock keymap");
                KeymapSelection::Stock
            }
        };
        debug!(?selection, "keymap selected");

        let combos = STOCK_KEYMAP.combos().len().max(USER_KEYMAP.combos().len());
        Ok(Self {
            store,
            swap_key: config.swap_key,
            selection,
            layer: Layer::Base,
            mods: Modifiers::empty(),
            swap_shifts: Modifiers::empty(),
            swap_key_down: false,
            active: vec![false; combos],
        })
    }

    pub fn selection(&self) -> KeymapSelection {
        self.selection
    }

    pub fn layer(&self) -> Layer {
        self.layer
    }

    pub fn modifiers(&self) -> Modifiers {
        self.mods
    }

    pub fn keymap(&self) -> &'static Keymap {
        match self.selection {
            KeymapSelection::Stock => &STOCK_KEYMAP,
            KeymapSelection::User => &USER_KEYMAP,
        }
    }

    pub fn store(&self) -> &WearLevelStore<E> {
        &self.store
    }

    pub fn into_store(self) -> WearLevelStore<E> {
        self.store
    }

    /// Maps one XT transition. `xt_event.code` carries the XT base code (`1..=0x53`).
    pub fn map(&mut self, xt_event: &KeyEvent) -> MappedEvents {
        let mut out = MappedEvents::default();
        let xt_code = xt_event.code.raw();

        let code = self.keymap().lookup(xt_code, self.layer);
        let mut mapped = xt_event.with_code(code);
        self.mods.update(&mapped);

        match self.check_keymap_swap(xt_code, xt_event) {
            Swap::Emit(event) => {
                out.push(event);
                return out;
            }
            Swap::Absorb => return out,
            Swap::NotSwap => {}
        }

        self.check_combos(&mut mapped);
        self.check_layer_change(&mut mapped);
        if mapped.code.is_none() {
            return out;
        }

        if mapped.code == KeyCode::PAUSE && self.mods.is_down(Modifiers::LCTRL) {
            // Ctrl + Pause is Break on the host side; hide LCtrl around the Pause make, and
            // drop the release since Pause has no break code.
            if mapped.is_press() {
                out.push(KeyEvent::release(KeyCode::LCTRL));
                out.push(mapped);
                out.push(KeyEvent::press(KeyCode::LCTRL));
            }
            return out;
        }

        out.push(mapped);
        out
    }

    fn check_keymap_swap(&mut self, xt_code: u8, xt_event: &KeyEvent) -> Swap {
        let pressed = xt_event.is_press();
        match xt_code {
            scancode::LSHIFT => {
                self.swap_shifts.set(Modifiers::LSHIFT, pressed);
                return Swap::NotSwap;
            }
            scancode::RSHIFT => {
                self.swap_shifts.set(Modifiers::RSHIFT, pressed);
                return Swap::NotSwap;
            }
            code if code == self.swap_key => {}
            _ => return Swap::NotSwap,
        }

        if pressed {
            if self.swap_key_down {
                return Swap::Absorb;
            }
            if !self.swap_shifts.is_down(Modifiers::LSHIFT | Modifiers::RSHIFT) {
                return Swap::NotSwap;
            }
            self.swap_key_down = true;
            self.selection = self.selection.toggled();
            self.active.fill(false);
            debug!(selection = ?self.selection, "keymap swapped");
            if let Err(err) = self.store.write_byte(self.selection.stored()) {
                warn!(%err, "failed to persist keymap selection");
            }
            Swap::Emit(KeyEvent::press(self.selection.indicator()))
        } else if self.swap_key_down {
            self.swap_key_down = false;
            Swap::Emit(KeyEvent::release(self.selection.indicator()))
        } else {
            Swap::NotSwap
        }
    }

    fn check_combos(&mut self, event: &mut KeyEvent) {
        let combos = self.keymap().combos();
        for (combo, active) in combos.iter().zip(self.active.iter_mut()) {
            if event.code != combo.original {
                continue;
            }
            if event.is_press() {
                if self.mods.is_down(combo.required) {
                    debug!(original = ?combo.original, mapped = ?combo.mapped, "key combination");
                    event.code = combo.mapped;
                    *active = true;
                    return;
                }
                if *active {
                    event.code = KeyCode::NONE;
                    return;
                }
            } else if *active {
                event.code = combo.mapped;
                *active = false;
                return;
            }
        }
    }

    fn check_layer_change(&mut self, event: &mut KeyEvent) {
        let flip = match event.code {
            KeyCode::TOGGLE_LAYER => event.is_press(),
            KeyCode::MOMENTARY_LAYER => true,
            _ => return,
        };
        if flip {
            self.layer = self.layer.toggled();
            debug!(layer = ?self.layer, "keymap layer changed");
        }
        event.code = KeyCode::NONE;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xt2ps2_keyevent::KeyAction;
    use xt2ps2_util::MemEeprom;

    fn engine() -> KeymapEngine<MemEeprom> {
        KeymapEngine::new(&KeymapConfig::default(), MemEeprom::new(256)).unwrap()
    }

    fn user_engine() -> KeymapEngine<MemEeprom> {
        let mut bytes = vec![0xFF; 256];
        bytes[5] = 1;
        KeymapEngine::new(&KeymapConfig::default(), MemEeprom::from_bytes(bytes)).unwrap()
    }

    fn press(e: &mut KeymapEngine<MemEeprom>, xt: u8) -> Vec<KeyEvent> {
        e.map(&KeyEvent::press(KeyCode(xt))).as_slice().to_vec()
    }

    fn release(e: &mut KeymapEngine<MemEeprom>, xt: u8) -> Vec<KeyEvent> {
        e.map(&KeyEvent::release(KeyCode(xt))).as_slice().to_vec()
    }

    #[test]
    fn plain_keys_map_through_the_table() {
        let mut e = engine();
        assert_eq!(press(&mut e, scancode::A), vec![KeyEvent::press(KeyCode::A)]);
        assert_eq!(release(&mut e, scancode::A), vec![KeyEvent::release(KeyCode::A)]);
        assert!(press(&mut e, 0x00).is_empty());
        assert!(press(&mut e, 0x60).is_empty());
    }

    #[test]
    fn stored_selection_is_restored() {
        assert_eq!(engine().selection(), KeymapSelection::Stock);
        let e = user_engine();
        assert_eq!(e.selection(), KeymapSelection::User);
        assert_eq!(e.store().index(), 5);
    }

    #[test]
    fn ctrl_numlock_gives_pause_with_ctrl_hidden() {
        let mut e = engine();
        press(&mut e, scancode::CONTROL);
        assert_eq!(
            press(&mut e, scancode::NUM_LOCK),
            vec![
                KeyEvent::release(KeyCode::LCTRL),
                KeyEvent::press(KeyCode::PAUSE),
                KeyEvent::press(KeyCode::LCTRL),
            ]
        );
        // Pause release while Ctrl is still down produces nothing.
        assert!(release(&mut e, scancode::NUM_LOCK).is_empty());
        assert_eq!(
            release(&mut e, scancode::CONTROL),
            vec![KeyEvent::release(KeyCode::LCTRL)]
        );
        // Combo inactive again: NumLock is itself.
        assert_eq!(
            press(&mut e, scancode::NUM_LOCK),
            vec![KeyEvent::press(KeyCode::NUM_LOCK)]
        );
    }

    #[test]
    fn combo_release_after_modifier_release_still_maps() {
        let mut e = engine();
        press(&mut e, scancode::LSHIFT);
        assert_eq!(
            press(&mut e, scancode::KP_ASTERISK),
            vec![KeyEvent::press(KeyCode::PRINT_SCREEN)]
        );
        release(&mut e, scancode::LSHIFT);
        // A typematic repeat without the modifier is swallowed while the combo is active.
        assert!(press(&mut e, scancode::KP_ASTERISK).is_empty());
        assert_eq!(
            release(&mut e, scancode::KP_ASTERISK),
            vec![KeyEvent::release(KeyCode::PRINT_SCREEN)]
        );
    }

    #[test]
    fn alt_asterisk_is_sysreq_and_ctrl_scroll_is_break() {
        let mut e = engine();
        press(&mut e, scancode::ALT);
        assert_eq!(
            press(&mut e, scancode::KP_ASTERISK),
            vec![KeyEvent::press(KeyCode::SYSREQ)]
        );
        release(&mut e, scancode::KP_ASTERISK);
        release(&mut e, scancode::ALT);

        press(&mut e, scancode::CONTROL);
        assert_eq!(
            press(&mut e, scancode::SCROLL_LOCK),
            vec![KeyEvent::press(KeyCode::BREAK)]
        );
    }

    #[test]
    fn swap_chord_toggles_once_and_persists() {
        let mut e = engine();
        press(&mut e, scancode::LSHIFT);
        press(&mut e, scancode::RSHIFT);
        assert_eq!(
            press(&mut e, scancode::F10),
            vec![KeyEvent::press(KeyCode::U)]
        );
        assert_eq!(e.selection(), KeymapSelection::User);
        // Typematic repeats of the swap key do nothing.
        assert!(press(&mut e, scancode::F10).is_empty());
        assert!(press(&mut e, scancode::F10).is_empty());
        assert_eq!(e.selection(), KeymapSelection::User);
        assert_eq!(
            release(&mut e, scancode::F10),
            vec![KeyEvent::release(KeyCode::U)]
        );

        assert_eq!(
            press(&mut e, scancode::F10),
            vec![KeyEvent::press(KeyCode::S)]
        );
        assert_eq!(e.selection(), KeymapSelection::Stock);

        let store = e.into_store();
        assert_eq!(store.index(), 2);
        let mut cell = store.into_inner();
        let reopened = KeymapEngine::new(&KeymapConfig::default(), &mut cell).unwrap();
        assert_eq!(reopened.selection(), KeymapSelection::Stock);
    }

    #[test]
    fn swap_key_without_both_shifts_is_ordinary() {
        let mut e = engine();
        press(&mut e, scancode::LSHIFT);
        assert_eq!(
            press(&mut e, scancode::F10),
            vec![KeyEvent::press(KeyCode::F10)]
        );
        assert_eq!(
            release(&mut e, scancode::F10),
            vec![KeyEvent::release(KeyCode::F10)]
        );
        assert_eq!(e.selection(), KeymapSelection::Stock);
    }

    #[test]
    fn momentary_and_toggle_layers() {
        let mut e = user_engine();
        assert!(press(&mut e, scancode::SCROLL_LOCK).is_empty());
        assert_eq!(e.layer(), Layer::Function);
        assert_eq!(press(&mut e, scancode::F1), vec![KeyEvent::press(KeyCode::F11)]);
        release(&mut e, scancode::F1);

        // Lock the function layer.
        assert!(press(&mut e, scancode::NUM_LOCK).is_empty());
        assert_eq!(e.layer(), Layer::Base);
        // The release is looked up on the base layer, where the key is plain NumLock.
        assert_eq!(
            release(&mut e, scancode::NUM_LOCK),
            vec![KeyEvent::release(KeyCode::NUM_LOCK)]
        );
        assert!(release(&mut e, scancode::SCROLL_LOCK).is_empty());
        assert_eq!(e.layer(), Layer::Function);
        assert_eq!(press(&mut e, scancode::KP_8), vec![KeyEvent::press(KeyCode::UP)]);
    }

    #[test]
    fn user_ctrl_pause_is_break() {
        let mut e = user_engine();
        press(&mut e, scancode::SCROLL_LOCK);
        press(&mut e, scancode::CAPSLOCK);
        assert_eq!(e.modifiers(), Modifiers::LCTRL);
        assert_eq!(
            press(&mut e, scancode::KP_MINUS),
            vec![KeyEvent::press(KeyCode::BREAK)]
        );
        assert_eq!(
            release(&mut e, scancode::KP_MINUS),
            vec![KeyEvent::release(KeyCode::BREAK)]
        );
    }

    #[test]
    fn events_without_action_pass_through_unchanged() {
        let mut e = engine();
        let out = e.map(&KeyEvent::new(KeyAction::None, KeyCode(scancode::A)));
        assert_eq!(out.as_slice(), &[KeyEvent::new(KeyAction::None, KeyCode::A)]);
    }
}
