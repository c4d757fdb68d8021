use tracing::{debug, warn};
use xt2ps2_util::{BitArray, RingQueue};

use crate::config::{Result, XtConfig};
use crate::hal::XtLines;
use crate::receiver::XtReceiver;
use crate::scancode;

/// Keyboard-level XT session: drains the receiver, filters keyboard typematic repeats and
/// recovers from runs of bad frames.
#[derive(Debug)]
pub struct XtKeyboardSession {
    receiver: XtReceiver,
    queue: RingQueue<u8>,
    // One bit per base code; set while the key is down.
    pressed: BitArray<16>,
    enabled: bool,
    detected: bool,
    error_count: u8,
    error_threshold: u8,
    forward_typematic: bool,
}

impl XtKeyboardSession {
    pub fn new(config: &XtConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            receiver: XtReceiver::new(config),
            queue: RingQueue::with_capacity(config.queue_capacity),
            pressed: BitArray::new(),
            enabled: false,
            detected: false,
            error_count: 0,
            error_threshold: config.error_threshold,
            forward_typematic: config.forward_typematic,
        })
    }

    pub fn receiver(&self) -> &XtReceiver {
        &self.receiver
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_detected(&self) -> bool {
        self.detected
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn enable<L: XtLines>(&mut self, lines: &mut L) {
        self.queue.clear();
        self.pressed.clear_all();
        self.error_count = 0;
        self.detected = false;
        self.enabled = true;
        self.receiver.enable(lines);
    }

    pub fn disable(&mut self) {
        self.enabled = false;
        self.receiver.disable();
    }

    /// Soft-resets the keyboard and waits for it to be detected again. Ignored while disabled.
    pub fn reset<L: XtLines>(&mut self, lines: &mut L) {
        if !self.enabled {
            return;
        }
        self.queue.clear();
        self.pressed.clear_all();
        self.error_count = 0;
        self.detected = false;
        self.receiver.soft_reset(lines);
    }

    pub fn on_clock_falling_edge<L: XtLines>(&mut self, lines: &mut L, now_us: u32) {
        self.receiver.on_clock_falling_edge(lines, now_us);
    }

    pub fn on_timeout_tick<L: XtLines>(&mut self, lines: &mut L) {
        self.receiver.on_timeout_tick(lines);
    }

    /// Polling step. Moves at most one received byte into the scan code queue.
    pub fn task<L: XtLines>(&mut self, lines: &mut L) {
        if !self.enabled || !self.receiver.is_ready() {
            return;
        }

        let detected = self.receiver.keyboard_detected();
        if detected != self.detected {
            self.detected = detected;
            debug!(detected, "xt keyboard detection changed");
        }

        if self.receiver.discard_frame_error(lines) {
            self.error_count = self.error_count.saturating_add(1);
            if self.error_count > self.error_threshold {
                warn!(errors = self.error_count, "xt frame errors, resetting keyboard");
                self.error_count = 0;
                self.receiver.soft_reset(lines);
            }
            return;
        }

        let Some(code) = self.receiver.read_received_data(lines) else {
            return;
        };
        self.error_count = 0;
        self.accept(code);
    }

    fn accept(&mut self, code: u8) {
        if code == scancode::NONE {
            return;
        }
        let key = usize::from(scancode::base_code(code));
        if scancode::is_break(code) {
            self.pressed.set(key, false);
            self.enqueue(code);
        } else {
            if self.forward_typematic || !self.pressed.get(key) {
                self.enqueue(code);
            }
            self.pressed.set(key, true);
        }
    }

    fn enqueue(&mut self, code: u8) {
        if self.queue.insert(code).is_err() {
            warn!(code, "xt scan code queue full, dropping");
        }
    }

    pub fn next_scan_code(&mut self) -> Option<u8> {
        self.queue.remove()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::receiver::tests::{clock_frame, clock_frame_with_start, FakeLines};
    use crate::receiver::ReceiveState;

    fn ready_session(config: XtConfig) -> (XtKeyboardSession, FakeLines) {
        let mut lines = FakeLines::default();
        let mut session = XtKeyboardSession::new(&config).unwrap();
        session.enable(&mut lines);
        while !session.receiver().is_ready() {
            session.on_timeout_tick(&mut lines);
        }
        (session, lines)
    }

    fn receive(session: &mut XtKeyboardSession, lines: &mut FakeLines, t: &mut u32, code: u8) {
        clock_frame(&mut session.receiver, lines, t, code);
        session.task(lines);
    }

    fn drain(session: &mut XtKeyboardSession) -> Vec<u8> {
        std::iter::from_fn(|| session.next_scan_code()).collect()
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = XtConfig {
            queue_capacity: 0,
            ..XtConfig::default()
        };
        assert!(XtKeyboardSession::new(&config).is_err());
    }

    #[test]
    fn suppresses_keyboard_typematic_repeats() {
        let (mut session, mut lines) = ready_session(XtConfig::default());
        let mut t = 0;
        for code in [0x1E, 0x1E, 0x1E, 0x9E, 0x1E] {
            receive(&mut session, &mut lines, &mut t, code);
        }
        assert_eq!(drain(&mut session), vec![0x1E, 0x9E, 0x1E]);
    }

    #[test]
    fn forwards_repeats_when_configured() {
        let (mut session, mut lines) = ready_session(XtConfig {
            forward_typematic: true,
            ..XtConfig::default()
        });
        let mut t = 0;
        for code in [0x1E, 0x1E, 0x9E] {
            receive(&mut session, &mut lines, &mut t, code);
        }
        assert_eq!(drain(&mut session), vec![0x1E, 0x1E, 0x9E]);
    }

    #[test]
    fn detection_is_reported_after_bat() {
        let (mut session, mut lines) = ready_session(XtConfig::default());
        assert!(!session.is_detected());
        let mut t = 0;
        receive(&mut session, &mut lines, &mut t, scancode::BAT_COMPLETE);
        session.task(&mut lines);
        assert!(session.is_detected());
        assert!(drain(&mut session).is_empty());
    }

    #[test]
    fn zero_code_is_ignored() {
        let (mut session, mut lines) = ready_session(XtConfig::default());
        let mut t = 0;
        receive(&mut session, &mut lines, &mut t, 0x00);
        assert!(drain(&mut session).is_empty());
        assert!(!lines.clock_held);
    }

    #[test]
    fn full_queue_drops_new_codes() {
        let (mut session, mut lines) = ready_session(XtConfig {
            queue_capacity: 2,
            ..XtConfig::default()
        });
        let mut t = 0;
        for code in [0x10, 0x11, 0x12] {
            receive(&mut session, &mut lines, &mut t, code);
        }
        assert_eq!(drain(&mut session), vec![0x10, 0x11]);
    }

    #[test]
    fn repeated_frame_errors_trigger_soft_reset() {
        let (mut session, mut lines) = ready_session(XtConfig::default());
        let mut t = 0;
        for _ in 0..10 {
            clock_frame_with_start(&mut session.receiver, &mut lines, &mut t, 0x1E, false);
            session.task(&mut lines);
            assert!(session.receiver().is_ready());
        }
        // A good frame resets the count.
        receive(&mut session, &mut lines, &mut t, 0x1E);
        for _ in 0..11 {
            clock_frame_with_start(&mut session.receiver, &mut lines, &mut t, 0x1E, false);
            session.task(&mut lines);
        }
        assert!(!session.receiver().is_ready());
        assert!(lines.clock_held);
        assert_eq!(drain(&mut session), vec![0x1E]);
    }

    #[test]
    fn reset_clears_queue_and_detection() {
        let (mut session, mut lines) = ready_session(XtConfig::default());
        let mut t = 0;
        receive(&mut session, &mut lines, &mut t, scancode::BAT_COMPLETE);
        receive(&mut session, &mut lines, &mut t, 0x1E);
        assert!(session.is_detected());
        assert_eq!(session.pending(), 1);

        session.reset(&mut lines);
        assert!(!session.is_detected());
        assert_eq!(session.pending(), 0);
        assert!(lines.clock_held);
        assert!(session.receiver().timeout_running());
    }

    #[test]
    fn reset_mid_frame_starts_the_next_frame_clean() {
        let (mut session, mut lines) = ready_session(XtConfig::default());
        let mut t = 0;
        receive(&mut session, &mut lines, &mut t, scancode::BAT_COMPLETE);

        // Start bits and two data bits of a frame the reset cuts short.
        for bit in [false, true, true, false] {
            lines.data = bit;
            session.on_clock_falling_edge(&mut lines, t);
            t += 100;
        }
        session.reset(&mut lines);
        assert_eq!(session.receiver().receive_state(), ReceiveState::Idle);
        while !session.receiver().is_ready() {
            session.on_timeout_tick(&mut lines);
        }

        t += 50_000;
        receive(&mut session, &mut lines, &mut t, scancode::BAT_COMPLETE);
        assert!(session.is_detected());
        receive(&mut session, &mut lines, &mut t, 0x1E);
        assert_eq!(drain(&mut session), vec![0x1E]);
    }

    #[test]
    fn reset_is_ignored_while_disabled() {
        let mut lines = FakeLines::default();
        let mut session = XtKeyboardSession::new(&XtConfig::default()).unwrap();
        session.reset(&mut lines);
        assert!(!session.receiver().timeout_running());
    }
}
