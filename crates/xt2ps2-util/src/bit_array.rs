/// Fixed set of `8 * BYTES` boolean flags.
///
/// Out-of-range indices read as clear and ignore writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitArray<const BYTES: usize> {
    bits: [u8; BYTES],
}

impl<const BYTES: usize> BitArray<BYTES> {
    pub const BITS: usize = BYTES * 8;

    pub const fn new() -> Self {
        Self { bits: [0; BYTES] }
    }

    pub fn get(&self, index: usize) -> bool {
        match self.bits.get(index / 8) {
            Some(byte) => byte & (1 << (index % 8)) != 0,
            None => false,
        }
    }

    pub fn set(&mut self, index: usize, value: bool) {
        if let Some(byte) = self.bits.get_mut(index / 8) {
            let mask = 1 << (index % 8);
            if value {
                *byte |= mask;
            } else {
                *byte &= !mask;
            }
        }
    }

    pub fn clear_all(&mut self) {
        self.bits = [0; BYTES];
    }

    pub fn count_set(&self) -> usize {
        self.bits.iter().map(|b| b.count_ones() as usize).sum()
    }
}

impl<const BYTES: usize> Default for BitArray<BYTES> {
    fn default() -> Self {
        Self::new()
    }
}
