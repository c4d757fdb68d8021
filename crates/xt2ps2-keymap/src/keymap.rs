use xt2ps2_keyevent::{KeyCode, Modifiers};
use xt2ps2_xt::scancode;

/// Rows in a keymap table, one per XT base code `1..=0x53`.
pub const TABLE_ROWS: usize = scancode::MAX_CODE as usize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Layer {
    #[default]
    Base = 0,
    Function = 1,
}

impl Layer {
    pub fn toggled(self) -> Self {
        match self {
            Layer::Base => Layer::Function,
            Layer::Function => Layer::Base,
        }
    }
}

/// A modifier plus a non-modifier key remapped to a single key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyCombination {
    pub required: Modifiers,
    pub original: KeyCode,
    pub mapped: KeyCode,
}

impl KeyCombination {
    pub const fn new(required: Modifiers, original: KeyCode, mapped: KeyCode) -> Self {
        Self {
            required,
            original,
            mapped,
        }
    }
}

/// Two-layer XT base code to [`KeyCode`] table plus its key combinations.
#[derive(Debug)]
pub struct Keymap {
    pub name: &'static str,
    table: [[KeyCode; 2]; TABLE_ROWS],
    combos: &'static [KeyCombination],
}

impl Keymap {
    pub const fn new(
        name: &'static str,
        table: [[KeyCode; 2]; TABLE_ROWS],
        combos: &'static [KeyCombination],
    ) -> Self {
        Self {
            name,
            table,
            combos,
        }
    }

    /// Maps an XT base code. Codes outside `1..=0x53` map to [`KeyCode::NONE`].
    pub fn lookup(&self, xt_code: u8, layer: Layer) -> KeyCode {
        usize::from(xt_code)
            .checked_sub(1)
            .and_then(|row| self.table.get(row))
            .map_or(KeyCode::NONE, |row| row[layer as usize])
    }

    pub fn combos(&self) -> &'static [KeyCombination] {
        self.combos
    }
}

/// Builds a table with the same mapping on both layers.
pub(crate) const fn single_layer(base: [KeyCode; TABLE_ROWS]) -> [[KeyCode; 2]; TABLE_ROWS] {
    let mut table = [[KeyCode::NONE; 2]; TABLE_ROWS];
    let mut i = 0;
    while i < TABLE_ROWS {
        table[i] = [base[i], base[i]];
        i += 1;
    }
    table
}

/// Which keymap is in use; persisted as a single byte.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum KeymapSelection {
    #[default]
    Stock = 0,
    User = 1,
}

impl KeymapSelection {
    /// Anything other than the user marker selects the stock keymap.
    pub fn from_stored(value: u8) -> Self {
        if value == KeymapSelection::User as u8 {
            KeymapSelection::User
        } else {
            KeymapSelection::Stock
        }
    }

    pub fn stored(self) -> u8 {
        self as u8
    }

    pub fn toggled(self) -> Self {
        match self {
            KeymapSelection::Stock => KeymapSelection::User,
            KeymapSelection::User => KeymapSelection::Stock,
        }
    }

    /// Key typed to tell the user which keymap is now active.
    pub fn indicator(self) -> KeyCode {
        match self {
            KeymapSelection::Stock => KeyCode::S,
            KeymapSelection::User => KeyCode::U,
        }
    }
}
