use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("queue is full (capacity {capacity})")]
pub struct QueueFull {
    pub capacity: usize,
}

/// Fixed-capacity FIFO backed by storage allocated once at construction.
///
/// Besides plain FIFO use it supports pushing to the front (protocol responses overtake queued
/// key data) and replacing an entry in place (overrun marking).
#[derive(Debug, Clone)]
pub struct RingQueue<T> {
    storage: Box<[T]>,
    out: usize,
    len: usize,
}

impl<T: Copy + Default> RingQueue<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: vec![T::default(); capacity].into_boxed_slice(),
            out: 0,
            len: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    fn slot(&self, index: usize) -> usize {
        (self.out + index) % self.capacity()
    }

    fn full(&self) -> QueueFull {
        QueueFull {
            capacity: self.capacity(),
        }
    }

    /// Appends `value` at the back.
    pub fn insert(&mut self, value: T) -> Result<(), QueueFull> {
        if self.is_full() {
            return Err(self.full());
        }
        let slot = self.slot(self.len);
        self.storage[slot] = value;
        self.len += 1;
        Ok(())
    }

    /// Prepends `value` so it is the next entry removed.
    pub fn push_front(&mut self, value: T) -> Result<(), QueueFull> {
        if self.is_full() {
            return Err(self.full());
        }
        self.out = match self.out {
            0 => self.capacity() - 1,
            out => out - 1,
        };
        self.storage[self.out] = value;
        self.len += 1;
        Ok(())
    }

    pub fn peek(&self) -> Option<T> {
        self.get(0)
    }

    /// Entry at `index` counted from the front.
    pub fn get(&self, index: usize) -> Option<T> {
        if index < self.len {
            Some(self.storage[self.slot(index)])
        } else {
            None
        }
    }

    pub fn remove(&mut self) -> Option<T> {
        let value = self.peek()?;
        self.out = self.slot(1);
        self.len -= 1;
        Some(value)
    }

    /// Discards the `n` oldest entries. Returns `false` (and leaves the queue untouched) when
    /// fewer than `n` are queued.
    pub fn remove_n(&mut self, n: usize) -> bool {
        if n > self.len {
            return false;
        }
        if n > 0 {
            self.out = self.slot(n);
            self.len -= n;
        }
        true
    }

    /// Overwrites the entry at `index`. Returns `false` when `index` is not occupied.
    pub fn replace(&mut self, index: usize, value: T) -> bool {
        if index >= self.len {
            return false;
        }
        let slot = self.slot(index);
        self.storage[slot] = value;
        true
    }

    pub fn clear(&mut self) {
        self.out = 0;
        self.len = 0;
    }

    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        (0..self.len).map(move |i| self.storage[self.slot(i)])
    }
}
