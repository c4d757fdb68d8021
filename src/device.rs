use tracing::debug;
use xt2ps2_keyevent::KeyEvent;
use xt2ps2_ps2::{
    LedStatusHandler, Ps2Bus, Ps2Config, Ps2KeyboardSession, Ps2Leds, ResetHandler,
    SelfTestHandler,
};

use crate::config::Result;

/// Board outputs driven by the device side.
pub trait StatusLedSink {
    /// Lock LEDs as last set by the host.
    fn status_leds(&mut self, leds: Ps2Leds);

    /// Activity indicator, called for every key event sent to the host.
    fn key_activity(&mut self, _pressed: bool) {}
}

impl<S: StatusLedSink + ?Sized> StatusLedSink for &mut S {
    fn status_leds(&mut self, leds: Ps2Leds) {
        (**self).status_leds(leds)
    }

    fn key_activity(&mut self, pressed: bool) {
        (**self).key_activity(pressed)
    }
}

/// Session callbacks for the adapter: the self test always passes and LED updates go to the
/// board.
#[derive(Debug)]
pub struct DeviceHandler<S> {
    sink: S,
    resets_received: u32,
}

impl<S> DeviceHandler<S> {
    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn resets_received(&self) -> u32 {
        self.resets_received
    }
}

impl<S> SelfTestHandler for DeviceHandler<S> {
    fn run_self_test(&mut self) -> bool {
        true
    }
}

impl<S: StatusLedSink> LedStatusHandler for DeviceHandler<S> {
    fn set_leds(&mut self, leds: Ps2Leds) {
        self.sink.status_leds(leds);
    }
}

impl<S> ResetHandler for DeviceHandler<S> {
    fn reset_received(&mut self) {
        self.resets_received = self.resets_received.wrapping_add(1);
        debug!("host reset received");
    }
}

/// PS/2 side of the adapter.
#[derive(Debug)]
pub struct DeviceAdapter<S> {
    session: Ps2KeyboardSession<DeviceHandler<S>>,
}

impl<S: StatusLedSink> DeviceAdapter<S> {
    pub fn new(config: &Ps2Config, sink: S) -> Result<Self> {
        let handler = DeviceHandler {
            sink,
            resets_received: 0,
        };
        Ok(Self {
            session: Ps2KeyboardSession::new(config, handler)?,
        })
    }

    pub fn session(&self) -> &Ps2KeyboardSession<DeviceHandler<S>> {
        &self.session
    }

    pub fn handler(&self) -> &DeviceHandler<S> {
        self.session.handler()
    }

    pub fn start(&mut self) {
        self.session.start();
    }

    /// Bus interrupt; call every 20 µs.
    pub fn tick<B: Ps2Bus>(&mut self, bus: &mut B) {
        self.session.tick(bus);
    }

    pub fn update<B: Ps2Bus>(&mut self, bus: &mut B) {
        self.session.task(bus);
    }

    /// Queues `event` for the host. The activity indicator sees every event, including
    /// [`xt2ps2_keyevent::KeyCode::NONE`], which is then dropped.
    pub fn send_key_event(&mut self, event: &KeyEvent) -> bool {
        self.session
            .handler_mut()
            .sink
            .key_activity(event.is_press());
        if event.code.is_none() {
            return false;
        }
        self.session.send_key_event(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use xt2ps2_keyevent::KeyCode;

    #[derive(Default)]
    struct Recorded {
        leds: Vec<Ps2Leds>,
        activity: Vec<bool>,
    }

    #[derive(Clone, Default)]
    struct TestSink(Rc<RefCell<Recorded>>);

    impl StatusLedSink for TestSink {
        fn status_leds(&mut self, leds: Ps2Leds) {
            self.0.borrow_mut().leds.push(leds);
        }

        fn key_activity(&mut self, pressed: bool) {
            self.0.borrow_mut().activity.push(pressed);
        }
    }

    #[test]
    fn handler_callbacks() {
        let sink = TestSink::default();
        let mut handler = DeviceHandler {
            sink: sink.clone(),
            resets_received: 0,
        };
        assert!(handler.run_self_test());
        handler.set_leds(Ps2Leds::CAPS_LOCK | Ps2Leds::NUM_LOCK);
        handler.reset_received();
        assert_eq!(handler.resets_received(), 1);
        assert_eq!(
            sink.0.borrow().leds,
            vec![Ps2Leds::CAPS_LOCK | Ps2Leds::NUM_LOCK]
        );
    }

    #[test]
    fn none_events_blink_activity_but_are_not_sent() {
        let sink = TestSink::default();
        let mut device = DeviceAdapter::new(&Ps2Config::default(), sink.clone()).unwrap();
        assert!(!device.send_key_event(&KeyEvent::press(KeyCode::NONE)));
        assert!(!device.send_key_event(&KeyEvent::release(KeyCode::NONE)));
        assert_eq!(sink.0.borrow().activity, vec![true, false]);

        // Not enabled until BAT has run: the activity LED still blinks.
        assert!(!device.send_key_event(&KeyEvent::press(KeyCode::A)));
        assert_eq!(sink.0.borrow().activity, vec![true, false, true]);
    }
}
