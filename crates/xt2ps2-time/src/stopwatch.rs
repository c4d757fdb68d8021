use crate::ClockCount;

/// Accumulates elapsed ticks across [`ClockCount`] wraps.
///
/// Each [`Stopwatch::sample`] folds the wrapping delta since the previous sample into a 32-bit
/// total, so the stopwatch must be sampled at least once per wrap period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stopwatch {
    last: ClockCount,
    elapsed: u32,
}

impl Stopwatch {
    pub fn start(now: ClockCount) -> Self {
        Self {
            last: now,
            elapsed: 0,
        }
    }

    pub fn restart(&mut self, now: ClockCount) {
        *self = Self::start(now);
    }

    /// Records `now` and returns the total ticks since the stopwatch was started.
    pub fn sample(&mut self, now: ClockCount) -> u32 {
        let delta = now.ticks_since(self.last);
        self.last = now;
        self.elapsed = self.elapsed.saturating_add(u32::from(delta));
        self.elapsed
    }

    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }
}
