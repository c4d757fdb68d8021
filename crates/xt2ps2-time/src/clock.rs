/// Nominal PS/2 bus clock period (12.5 kHz).
pub const PS2_CLOCK_PERIOD_US: u32 = 80;

/// The PS/2 transceiver visits four phases per bus clock cycle.
pub const PS2_TICK_PERIOD_US: u32 = PS2_CLOCK_PERIOD_US / 4;

pub const PS2_TICKS_PER_MS: u32 = 1000 / PS2_TICK_PERIOD_US;

/// Wrapping 16-bit tick counter value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ClockCount(u16);

impl ClockCount {
    pub const fn new(raw: u16) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u16 {
        self.0
    }

    pub fn wrapping_add(self, ticks: u16) -> Self {
        Self(self.0.wrapping_add(ticks))
    }

    /// Ticks elapsed since `earlier`.
    ///
    /// Only meaningful when the real interval is shorter than one wrap period (65536 ticks).
    pub fn ticks_since(self, earlier: ClockCount) -> u16 {
        self.0.wrapping_sub(earlier.0)
    }
}

/// Free-running tick counter fed by a periodic timer interrupt.
#[derive(Debug, Clone)]
pub struct TimeBase {
    now: ClockCount,
    tick_period_us: u32,
}

impl TimeBase {
    pub fn new(tick_period_us: u32) -> Self {
        Self {
            now: ClockCount::default(),
            tick_period_us: tick_period_us.max(1),
        }
    }

    /// Time base running at the PS/2 transceiver tick rate.
    pub fn ps2() -> Self {
        Self::new(PS2_TICK_PERIOD_US)
    }

    pub fn tick(&mut self) -> ClockCount {
        self.now = self.now.wrapping_add(1);
        self.now
    }

    pub fn now(&self) -> ClockCount {
        self.now
    }

    pub fn tick_period_us(&self) -> u32 {
        self.tick_period_us
    }

    /// Converts a duration to whole ticks, rounding down.
    pub fn ticks_for_us(&self, us: u32) -> u32 {
        us / self.tick_period_us
    }

    pub fn ticks_for_ms(&self, ms: u32) -> u32 {
        ms.saturating_mul(1000) / self.tick_period_us
    }
}

impl Default for TimeBase {
    fn default() -> Self {
        Self::ps2()
    }
}
