/// Board access to the XT keyboard connector.
///
/// The clock and data lines are open-collector. The keyboard drives the clock; the host only
/// ever pulls it low to stall the keyboard (or to request a soft reset) and releases it again.
pub trait XtLines {
    fn data_high(&self) -> bool;

    fn hold_clock_low(&mut self);

    fn release_clock(&mut self);

    /// Drives the optional keyboard reset line.
    fn set_reset(&mut self, asserted: bool);
}

impl<L: XtLines + ?Sized> XtLines for &mut L {
    fn data_high(&self) -> bool {
        (**self).data_high()
    }

    fn hold_clock_low(&mut self) {
        (**self).hold_clock_low()
    }

    fn release_clock(&mut self) {
        (**self).release_clock()
    }

    fn set_reset(&mut self, asserted: bool) {
        (**self).set_reset(asserted)
    }
}
