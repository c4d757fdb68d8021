use thiserror::Error;

/// Value of an erased, unused slot in a wear-leveled block.
pub const EMPTY_SLOT: u8 = 0xFF;

pub type Result<T> = std::result::Result<T, EepromError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EepromError {
    #[error("out of bounds: offset={offset} len={len} size={size}")]
    OutOfBounds { offset: usize, len: usize, size: usize },

    #[error("value {0:#04x} is reserved as the empty-slot marker")]
    ReservedValue(u8),

    #[error("wear-leveling block must not be empty")]
    EmptyBlock,

    #[error("eeprom backend failure: {0}")]
    Backend(String),
}

fn check_range(offset: usize, len: usize, size: usize) -> Result<()> {
    match offset.checked_add(len) {
        Some(end) if end <= size => Ok(()),
        _ => Err(EepromError::OutOfBounds { offset, len, size }),
    }
}

/// Byte-addressable non-volatile storage.
pub trait EepromCell {
    fn size(&self) -> usize;

    fn read(&mut self, offset: usize) -> Result<u8>;

    fn write(&mut self, offset: usize, value: u8) -> Result<()>;

    fn read_block(&mut self, offset: usize, buf: &mut [u8]) -> Result<()> {
        check_range(offset, buf.len(), self.size())?;
        for (i, b) in buf.iter_mut().enumerate() {
            *b = self.read(offset + i)?;
        }
        Ok(())
    }

    fn write_block(&mut self, offset: usize, data: &[u8]) -> Result<()> {
        check_range(offset, data.len(), self.size())?;
        for (i, &b) in data.iter().enumerate() {
            self.write(offset + i, b)?;
        }
        Ok(())
    }
}

impl<E: EepromCell + ?Sized> EepromCell for &mut E {
    fn size(&self) -> usize {
        (**self).size()
    }

    fn read(&mut self, offset: usize) -> Result<u8> {
        (**self).read(offset)
    }

    fn write(&mut self, offset: usize, value: u8) -> Result<()> {
        (**self).write(offset, value)
    }
}

/// In-memory EEPROM that counts writes per byte.
#[derive(Debug, Clone)]
pub struct MemEeprom {
    bytes: Vec<u8>,
    writes: Vec<u32>,
}

impl MemEeprom {
    /// Device as shipped: every byte zero.
    pub fn new(size: usize) -> Self {
        Self::from_bytes(vec![0; size])
    }

    /// Freshly erased device: every byte [`EMPTY_SLOT`].
    pub fn erased(size: usize) -> Self {
        Self::from_bytes(vec![EMPTY_SLOT; size])
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        let writes = vec![0; bytes.len()];
        Self { bytes, writes }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn write_count(&self, offset: usize) -> u32 {
        self.writes.get(offset).copied().unwrap_or(0)
    }
}

impl EepromCell for MemEeprom {
    fn size(&self) -> usize {
        self.bytes.len()
    }

    fn read(&mut self, offset: usize) -> Result<u8> {
        check_range(offset, 1, self.bytes.len())?;
        Ok(self.bytes[offset])
    }

    fn write(&mut self, offset: usize, value: u8) -> Result<()> {
        check_range(offset, 1, self.bytes.len())?;
        self.bytes[offset] = value;
        self.writes[offset] = self.writes[offset].saturating_add(1);
        Ok(())
    }
}

/// Single persisted byte spread round-robin over a block of cells.
///
/// Exactly one slot in the block holds the value; every other slot is [`EMPTY_SLOT`]. A write
/// erases the current slot, advances to the next one (wrapping at the block end) and stores the
/// value there, so each cell sees `1/len` of the erase cycles.
#[derive(Debug)]
pub struct WearLevelStore<E> {
    cell: E,
    base: usize,
    len: usize,
    index: usize,
}

impl<E: EepromCell> WearLevelStore<E> {
    /// Opens the block `[base, base + len)` and locates the live slot (slot 0 if every slot is
    /// empty).
    pub fn open(mut cell: E, base: usize, len: usize) -> Result<Self> {
        if len == 0 {
            return Err(EepromError::EmptyBlock);
        }
        check_range(base, len, cell.size())?;

        let mut index = 0;
        for n in 0..len {
            if cell.read(base + n)? != EMPTY_SLOT {
                index = n;
                break;
            }
        }

        Ok(Self {
            cell,
            base,
            len,
            index,
        })
    }

    /// Slot currently holding the value, relative to the block start.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn block_len(&self) -> usize {
        self.len
    }

    pub fn read_byte(&mut self) -> Result<u8> {
        self.cell.read(self.base + self.index)
    }

    pub fn write_byte(&mut self, value: u8) -> Result<()> {
        if value == EMPTY_SLOT {
            return Err(EepromError::ReservedValue(value));
        }
        self.cell.write(self.base + self.index, EMPTY_SLOT)?;
        self.index = (self.index + 1) % self.len;
        self.cell.write(self.base + self.index, value)
    }

    pub fn cell(&self) -> &E {
        &self.cell
    }

    pub fn into_inner(self) -> E {
        self.cell
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_block_opens_at_slot_zero() {
        let mut store = WearLevelStore::open(MemEeprom::new(128), 0, 128).unwrap();
        assert_eq!(store.index(), 0);
        assert_eq!(store.read_byte().unwrap(), 0);

        let mut store = WearLevelStore::open(MemEeprom::erased(16), 0, 16).unwrap();
        assert_eq!(store.read_byte().unwrap(), EMPTY_SLOT);
    }

    #[test]
    fn writes_advance_and_wrap() {
        let mut store = WearLevelStore::open(MemEeprom::new(4), 0, 4).unwrap();
        for n in 1..=9u8 {
            store.write_byte(n).unwrap();
            assert_eq!(store.index(), usize::from(n) % 4);
            assert_eq!(store.read_byte().unwrap(), n);
        }
        let live = store
            .cell()
            .bytes()
            .iter()
            .filter(|&&b| b != EMPTY_SLOT)
            .count();
        assert_eq!(live, 1);
    }

    #[test]
    fn reopen_finds_live_slot() {
        let mut store = WearLevelStore::open(MemEeprom::new(8), 0, 8).unwrap();
        store.write_byte(1).unwrap();
        store.write_byte(0).unwrap();
        store.write_byte(1).unwrap();
        let cell = store.into_inner();

        let mut reopened = WearLevelStore::open(cell, 0, 8).unwrap();
        assert_eq!(reopened.index(), 3);
        assert_eq!(reopened.read_byte().unwrap(), 1);
    }

    #[test]
    fn block_bounds_and_reserved_value() {
        assert_eq!(
            WearLevelStore::open(MemEeprom::new(8), 4, 8).unwrap_err(),
            EepromError::OutOfBounds {
                offset: 4,
                len: 8,
                size: 8
            }
        );
        assert_eq!(
            WearLevelStore::open(MemEeprom::new(8), 0, 0).unwrap_err(),
            EepromError::EmptyBlock
        );

        let mut store = WearLevelStore::open(MemEeprom::new(8), 2, 4).unwrap();
        assert_eq!(
            store.write_byte(EMPTY_SLOT),
            Err(EepromError::ReservedValue(0xFF))
        );
        store.write_byte(7).unwrap();
        assert_eq!(store.cell().bytes(), &[0, 0, 0xFF, 7, 0, 0, 0, 0]);
    }

    #[test]
    fn block_helpers_are_bounds_checked() {
        let mut mem = MemEeprom::new(8);
        mem.write_block(6, &[1, 2]).unwrap();
        let mut buf = [0u8; 3];
        mem.read_block(5, &mut buf).unwrap();
        assert_eq!(buf, [0, 1, 2]);
        assert!(matches!(
            mem.write_block(7, &[1, 2]),
            Err(EepromError::OutOfBounds { .. })
        ));
        assert_eq!(mem.write_count(6), 1);
    }
}
