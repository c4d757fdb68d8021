use bitflags::bitflags;

use crate::{KeyAction, KeyCode, KeyEvent};

bitflags! {
    /// Modifier keys currently held, in HID report bit order.
    #[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        const LCTRL = 1 << 0;
        const LSHIFT = 1 << 1;
        const LALT = 1 << 2;
        const LGUI = 1 << 3;
        const RCTRL = 1 << 4;
        const RSHIFT = 1 << 5;
        const RALT = 1 << 6;
        const RGUI = 1 << 7;
    }
}

impl Modifiers {
    /// The flag for a modifier key, or empty for any other code.
    pub fn for_code(code: KeyCode) -> Modifiers {
        if code.is_modifier() {
            Modifiers::from_bits_truncate(1 << (code.raw() - KeyCode::LCTRL.raw()))
        } else {
            Modifiers::empty()
        }
    }

    /// Tracks a key transition. Non-modifier events leave the set unchanged.
    pub fn update(&mut self, event: &KeyEvent) {
        let flag = Modifiers::for_code(event.code);
        match event.action {
            KeyAction::Press => self.insert(flag),
            KeyAction::Release => self.remove(flag),
            KeyAction::None => {}
        }
    }

    /// True when every modifier in `mask` is down.
    pub fn is_down(&self, mask: Modifiers) -> bool {
        self.contains(mask)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_press_and_release() {
        let mut mods = Modifiers::empty();
        mods.update(&KeyEvent::press(KeyCode::LSHIFT));
        mods.update(&KeyEvent::press(KeyCode::RALT));
        mods.update(&KeyEvent::press(KeyCode::A));
        assert_eq!(mods, Modifiers::LSHIFT | Modifiers::RALT);

        mods.update(&KeyEvent::release(KeyCode::LSHIFT));
        assert_eq!(mods, Modifiers::RALT);

        mods.update(&KeyEvent::new(KeyAction::None, KeyCode::RALT));
        assert_eq!(mods, Modifiers::RALT);
    }

    #[test]
    fn is_down_requires_every_bit() {
        let mods = Modifiers::LSHIFT;
        assert!(mods.is_down(Modifiers::LSHIFT));
        assert!(!mods.is_down(Modifiers::LSHIFT | Modifiers::RSHIFT));
        assert!(mods.is_down(Modifiers::empty()));
    }

    #[test]
    fn for_code_matches_hid_order() {
        assert_eq!(Modifiers::for_code(KeyCode::LCTRL), Modifiers::LCTRL);
        assert_eq!(Modifiers::for_code(KeyCode::RGUI), Modifiers::RGUI);
        assert_eq!(Modifiers::for_code(KeyCode::ENTER), Modifiers::empty());
    }
}
