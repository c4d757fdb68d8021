//! Fixed-capacity containers and persistence helpers shared by the adapter engines.
//!
//! Nothing here grows after construction: queues and bit sets are sized once, and
//! [`ByteSequence`] is an inline array. This keeps the interrupt and polling paths free of
//! allocation.

mod bit_array;
mod byte_sequence;
mod eeprom;
mod ring;

pub use bit_array::BitArray;
pub use byte_sequence::{ByteSequence, BYTE_SEQUENCE_CAPACITY, MAX_MAKE_LEN};
pub use eeprom::{EepromCell, EepromError, MemEeprom, Result, WearLevelStore, EMPTY_SLOT};
pub use ring::{QueueFull, RingQueue};

#[cfg(test)]
mod proptests;
