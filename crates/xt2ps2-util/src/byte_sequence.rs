use std::fmt;

/// Longest make sequence a single key produces on the PS/2 wire (Pause).
pub const MAX_MAKE_LEN: usize = 8;

/// Room for the break form of any make sequence, which may double in length.
pub const BYTE_SEQUENCE_CAPACITY: usize = 2 * MAX_MAKE_LEN;

/// Short inline byte buffer holding one scan-code sequence.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ByteSequence {
    len: u8,
    bytes: [u8; BYTE_SEQUENCE_CAPACITY],
}

impl ByteSequence {
    pub const fn new() -> Self {
        Self {
            len: 0,
            bytes: [0; BYTE_SEQUENCE_CAPACITY],
        }
    }

    /// Returns `None` when `bytes` does not fit.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        let mut seq = Self::new();
        if seq.extend_from_slice(bytes) {
            Some(seq)
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        usize::from(self.len)
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn push(&mut self, byte: u8) -> bool {
        let len = self.len();
        if len == BYTE_SEQUENCE_CAPACITY {
            return false;
        }
        self.bytes[len] = byte;
        self.len += 1;
        true
    }

    /// Appends all of `bytes`, or nothing if they do not fit.
    pub fn extend_from_slice(&mut self, bytes: &[u8]) -> bool {
        let len = self.len();
        if bytes.len() > BYTE_SEQUENCE_CAPACITY - len {
            return false;
        }
        self.bytes[len..len + bytes.len()].copy_from_slice(bytes);
        self.len += bytes.len() as u8;
        true
    }

    pub fn clear(&mut self) {
        self.len = 0;
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[..self.len()]
    }
}

impl AsRef<[u8]> for ByteSequence {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl fmt::Debug for ByteSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ByteSequence[")?;
        for (i, b) in self.as_slice().iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{b:02X}")?;
        }
        f.write_str("]")
    }
}
