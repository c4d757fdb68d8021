#![no_main]

use arbitrary::{Arbitrary, Unstructured};
use libfuzzer_sys::fuzz_target;

use xt2ps2_keyevent::{KeyAction, KeyCode, KeyEvent, ScanCodeConverter};
use xt2ps2_keymap::{KeymapConfig, KeymapEngine};
use xt2ps2_util::{MemEeprom, BYTE_SEQUENCE_CAPACITY, EMPTY_SLOT};

/// Upper bound on XT scan codes per testcase.
const MAX_CODES: usize = 4096;

const EEPROM_SIZE: usize = 128;

#[derive(Debug)]
struct Input {
    eeprom: Vec<u8>,
    codes: Vec<u8>,
}

impl<'a> Arbitrary<'a> for Input {
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        let eeprom = u.bytes(EEPROM_SIZE)?.to_vec();
        let len = u.int_in_range(0..=MAX_CODES)?;
        let codes = u.bytes(len)?.to_vec();
        Ok(Self { eeprom, codes })
    }
}

fuzz_target!(|input: Input| {
    let config = KeymapConfig {
        eeprom_block_len: EEPROM_SIZE,
        ..KeymapConfig::default()
    };
    let cell = MemEeprom::from_bytes(input.eeprom.clone());
    let mut engine = KeymapEngine::new(&config, cell).expect("block fits the cell");
    let mut converter = ScanCodeConverter::new();

    for &raw in &input.codes {
        let action = if raw & 0x80 != 0 {
            KeyAction::Release
        } else {
            KeyAction::Press
        };
        let event = KeyEvent::new(action, KeyCode(raw & 0x7F));
        let mapped = engine.map(&event);
        assert!(mapped.len() <= 3);
        for out in &mapped {
            assert!(!out.code.is_none());
            assert!(!out.code.is_layer_sentinel());
            if let Some(seq) = converter.convert(out) {
                assert!(!seq.as_slice().is_empty());
                assert!(seq.as_slice().len() <= BYTE_SEQUENCE_CAPACITY);
            }
        }
    }

    // At most one live slot once the engine has written a selection.
    let store = engine.into_store();
    let live = store
        .cell()
        .bytes()
        .iter()
        .filter(|&&b| b != EMPTY_SLOT)
        .count();
    if input.eeprom.iter().filter(|&&b| b != EMPTY_SLOT).count() <= 1 {
        assert!(live <= 1);
    }
});
