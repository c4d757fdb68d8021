use xt2ps2_util::ByteSequence;

use crate::set2::{self, BREAK_PREFIX, EXTENDED_PREFIX, PRINT_SCREEN_SHIFTED};
use crate::{KeyCode, KeyEvent, Modifiers};

/// Converts key events to PS/2 Set-2 byte sequences.
///
/// The lookup itself is stateless; the converter only keeps its own modifier tracker for the
/// PrintScreen special case. The shifted PrintScreen sequence is emitted whenever LShift and
/// RShift are *not both* down, which covers the common no-shift case.
#[derive(Debug, Clone, Default)]
pub struct ScanCodeConverter {
    mods: Modifiers,
}

impl ScanCodeConverter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn modifiers(&self) -> Modifiers {
        self.mods
    }

    /// Returns `None` for [`KeyCode::NONE`] and codes without a Set-2 sequence.
    pub fn convert(&mut self, event: &KeyEvent) -> Option<ByteSequence> {
        if event.code.is_none() {
            return None;
        }
        let make = set2::make_sequence(event.code)?;

        self.mods.update(event);
        let make = if event.code == KeyCode::PRINT_SCREEN
            && !self.mods.is_down(Modifiers::LSHIFT | Modifiers::RSHIFT)
        {
            PRINT_SCREEN_SHIFTED
        } else {
            make
        };

        let mut seq = ByteSequence::new();
        if event.is_release() {
            for &byte in make {
                if byte != EXTENDED_PREFIX {
                    seq.push(BREAK_PREFIX);
                }
                seq.push(byte);
            }
        } else {
            seq.extend_from_slice(make);
        }
        Some(seq)
    }
}
