//! Tick-based time keeping shared by the adapter's line engines.
//!
//! All protocol timing is expressed in ticks of a periodic hardware timer rather than wall-clock
//! time. The PS/2 transceiver tick runs at four times the nominal bus clock, so one tick is
//! 20 µs and the 16-bit [`ClockCount`] wraps after roughly 1.3 s. Durations longer than one wrap
//! period (power-on reset, self-test) are measured with a [`Stopwatch`].

mod clock;
mod stopwatch;

pub use clock::{ClockCount, TimeBase, PS2_CLOCK_PERIOD_US, PS2_TICKS_PER_MS, PS2_TICK_PERIOD_US};
pub use stopwatch::Stopwatch;
