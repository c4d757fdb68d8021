use crate::{KeymapConfig, KeymapEngine, KeymapSelection};
use proptest::prelude::*;
use xt2ps2_keyevent::{KeyAction, KeyCode, KeyEvent};
use xt2ps2_util::MemEeprom;
use xt2ps2_xt::scancode;

fn xt_event() -> impl Strategy<Value = KeyEvent> {
    (any::<bool>(), 0u8..=0x60).prop_map(|(press, code)| {
        let action = if press {
            KeyAction::Press
        } else {
            KeyAction::Release
        };
        KeyEvent::new(action, KeyCode(code))
    })
}

proptest! {
    #[test]
    fn mapping_never_leaks_internal_codes(
        user in any::<bool>(),
        events in prop::collection::vec(xt_event(), 0..200),
    ) {
        let mut bytes = vec![0xFF; 64];
        bytes[0] = u8::from(user);
        let config = KeymapConfig {
            eeprom_block_len: 64,
            ..KeymapConfig::default()
        };
        let mut engine = KeymapEngine::new(&config, MemEeprom::from_bytes(bytes)).unwrap();

        for event in &events {
            let out = engine.map(event);
            prop_assert!(out.len() <= 3);
            for mapped in &out {
                prop_assert!(!mapped.code.is_none());
                prop_assert!(!mapped.code.is_layer_sentinel());
                prop_assert_eq!(mapped.action == KeyAction::None, false);
            }
        }
    }

    #[test]
    fn swap_chord_flips_selection_once_per_press(repeats in 1usize..8) {
        let mut engine =
            KeymapEngine::new(&KeymapConfig::default(), MemEeprom::new(256)).unwrap();
        engine.map(&KeyEvent::press(KeyCode(scancode::LSHIFT)));
        engine.map(&KeyEvent::press(KeyCode(scancode::RSHIFT)));

        let mut emitted = 0;
        for _ in 0..repeats {
            emitted += engine.map(&KeyEvent::press(KeyCode(scancode::F10))).len();
        }
        prop_assert_eq!(emitted, 1);
        prop_assert_eq!(engine.selection(), KeymapSelection::User);
        prop_assert_eq!(engine.store().index(), 1);
    }
}
