use crate::Ps2Leds;

/// Runs the keyboard's Basic Assurance Test.
pub trait SelfTestHandler {
    fn run_self_test(&mut self) -> bool;
}

/// Receives LED state from `Set LEDs` and during BAT.
pub trait LedStatusHandler {
    fn set_leds(&mut self, leds: Ps2Leds);
}

/// Notified when the host sends `Reset`, before the BAT starts.
pub trait ResetHandler {
    fn reset_received(&mut self);
}

/// Everything the keyboard session calls back into.
pub trait Ps2Handler: SelfTestHandler + LedStatusHandler + ResetHandler {}

impl<T: SelfTestHandler + LedStatusHandler + ResetHandler> Ps2Handler for T {}
