/// Board access to the PS/2 connector.
///
/// Both lines are open-collector: `set_*(true)` releases the line, `set_*(false)` pulls it low.
/// Reads return the actual line level, which may be held low by the host.
pub trait Ps2Bus {
    fn clock_high(&self) -> bool;

    fn data_high(&self) -> bool;

    fn set_clock(&mut self, high: bool);

    fn set_data(&mut self, high: bool);
}

impl<B: Ps2Bus + ?Sized> Ps2Bus for &mut B {
    fn clock_high(&self) -> bool {
        (**self).clock_high()
    }

    fn data_high(&self) -> bool {
        (**self).data_high()
    }

    fn set_clock(&mut self, high: bool) {
        (**self).set_clock(high)
    }

    fn set_data(&mut self, high: bool) {
        (**self).set_data(high)
    }
}

/// Line levels as seen by the device, encoded `(clock << 1) | data`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum BusState {
    /// Host holds clock low and data low.
    InhibitRts = 0,
    /// Host holds clock low.
    Inhibit = 1,
    /// Host requests to send: data low, clock released.
    Rts = 2,
    Idle = 3,
}

impl BusState {
    pub fn from_lines(clock_high: bool, data_high: bool) -> Self {
        match (clock_high, data_high) {
            (false, false) => BusState::InhibitRts,
            (false, true) => BusState::Inhibit,
            (true, false) => BusState::Rts,
            (true, true) => BusState::Idle,
        }
    }

    pub fn sample<B: Ps2Bus + ?Sized>(bus: &B) -> Self {
        Self::from_lines(bus.clock_high(), bus.data_high())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoding_matches_line_levels() {
        assert_eq!(BusState::from_lines(true, true) as u8, 3);
        assert_eq!(BusState::from_lines(false, true) as u8, 1);
        assert_eq!(BusState::from_lines(false, false) as u8, 0);
        assert_eq!(BusState::from_lines(true, false) as u8, 2);
    }
}
