use tracing::debug;
use xt2ps2_keyevent::{KeyCode, KeyEvent};
use xt2ps2_time::{ClockCount, Stopwatch, PS2_TICKS_PER_MS};
use xt2ps2_util::ByteSequence;

/// Decoded `Set Typematic Rate/Delay` parameter.
///
/// Bits `[2:0]` (A) and `[4:3]` (B) select the repeat period `(8 + A) * 2^B * 4.17 ms`,
/// rounded here to whole 4 ms units. Bits `[6:5]` (D) select the delay `(1 + D) * 250 ms`,
/// approximated as `(1 + D) * 256 ms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypematicRate(u8);

impl TypematicRate {
    pub const fn new(raw: u8) -> Self {
        Self(raw & 0x7F)
    }

    pub const fn raw(self) -> u8 {
        self.0
    }

    pub fn interval_ms(self) -> u32 {
        let a = u32::from(self.0 & 0x07);
        let b = u32::from((self.0 >> 3) & 0x03);
        (8 + a) * (1 << b) * 4
    }

    pub fn delay_ms(self) -> u32 {
        let d = u32::from((self.0 >> 5) & 0x03);
        (1 + d) << 8
    }

    pub fn interval_ticks(self) -> u32 {
        self.interval_ms() * PS2_TICKS_PER_MS
    }

    pub fn delay_ticks(self) -> u32 {
        self.delay_ms() * PS2_TICKS_PER_MS
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypematicState {
    Inactive,
    Delay,
    Active,
}

/// Auto-repeat for the most recently pressed key.
#[derive(Debug, Clone)]
pub struct Typematic {
    state: TypematicState,
    rate: TypematicRate,
    code: KeyCode,
    sequence: ByteSequence,
    watch: Stopwatch,
}

impl Typematic {
    pub fn new(rate: TypematicRate) -> Self {
        Self {
            state: TypematicState::Inactive,
            rate,
            code: KeyCode::NONE,
            sequence: ByteSequence::new(),
            watch: Stopwatch::default(),
        }
    }

    pub fn state(&self) -> TypematicState {
        self.state
    }

    pub fn rate(&self) -> TypematicRate {
        self.rate
    }

    pub fn set_rate(&mut self, rate: TypematicRate) {
        debug!(
            rate = rate.raw(),
            interval_ms = rate.interval_ms(),
            delay_ms = rate.delay_ms(),
            "typematic rate"
        );
        self.rate = rate;
    }

    pub fn reset(&mut self) {
        self.state = TypematicState::Inactive;
        self.code = KeyCode::NONE;
        self.sequence.clear();
    }

    /// Tracks a key transition. `repeats` says whether the key is allowed to auto-repeat.
    pub fn key_event(
        &mut self,
        event: &KeyEvent,
        sequence: &ByteSequence,
        repeats: bool,
        now: ClockCount,
    ) {
        if event.is_press() && repeats {
            self.code = event.code;
            self.sequence = *sequence;
            self.state = TypematicState::Delay;
            self.watch.restart(now);
        } else if event.is_release() && event.code == self.code {
            self.reset();
        }
    }

    /// Returns the sequence to repeat when a repeat is due.
    pub fn poll(&mut self, now: ClockCount) -> Option<ByteSequence> {
        let threshold = match self.state {
            TypematicState::Inactive => return None,
            TypematicState::Delay => self.rate.delay_ticks(),
            TypematicState::Active => self.rate.interval_ticks(),
        };
        if self.watch.sample(now) <= threshold {
            return None;
        }
        self.state = TypematicState::Active;
        self.watch.restart(now);
        Some(self.sequence)
    }
}
