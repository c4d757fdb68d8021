use bitflags::bitflags;
use xt2ps2_keyevent::KeyCode;

bitflags! {
    /// What a key reports to the host.
    #[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
    pub struct KeyConditions: u8 {
        const MAKE = 1 << 0;
        const BREAK = 1 << 1;
        const TYPEMATIC = 1 << 2;
    }
}

/// Per-key [`KeyConditions`], indexed by [`KeyCode`].
#[derive(Debug, Clone)]
pub struct KeyConditionTable {
    conditions: [KeyConditions; KeyCode::COUNT],
}

impl KeyConditionTable {
    /// Set-2 defaults: every key makes, breaks and repeats, except Pause which is make-only.
    pub fn set2() -> Self {
        let mut conditions = [KeyConditions::all(); KeyCode::COUNT];
        conditions[usize::from(KeyCode::PAUSE.raw())] = KeyConditions::MAKE;
        Self { conditions }
    }

    pub fn get(&self, code: KeyCode) -> KeyConditions {
        self.conditions
            .get(usize::from(code.raw()))
            .copied()
            .unwrap_or_default()
    }
}

impl Default for KeyConditionTable {
    fn default() -> Self {
        Self::set2()
    }
}
