use tracing::warn;
use xt2ps2_keyevent::{KeyAction, KeyCode, KeyEvent};
use xt2ps2_util::RingQueue;
use xt2ps2_xt::{scancode, XtConfig, XtKeyboardSession, XtLines};

use crate::config::{AdapterError, Result};

/// XT side of the adapter: runs the keyboard session and turns scan codes into key events.
///
/// Events carry the XT base code in [`KeyEvent::code`]; the keymap translates them later.
#[derive(Debug)]
pub struct HostAdapter {
    session: XtKeyboardSession,
    events: RingQueue<KeyEvent>,
}

impl HostAdapter {
    pub fn new(config: &XtConfig, queue_capacity: usize) -> Result<Self> {
        if queue_capacity == 0 {
            return Err(AdapterError::EmptyKeyEventQueue);
        }
        Ok(Self {
            session: XtKeyboardSession::new(config)?,
            events: RingQueue::with_capacity(queue_capacity),
        })
    }

    pub fn session(&self) -> &XtKeyboardSession {
        &self.session
    }

    pub fn pending(&self) -> usize {
        self.events.len()
    }

    pub fn start<L: XtLines>(&mut self, lines: &mut L) {
        self.events.clear();
        self.session.enable(lines);
    }

    pub fn on_clock_falling_edge<L: XtLines>(&mut self, lines: &mut L, now_us: u32) {
        self.session.on_clock_falling_edge(lines, now_us);
    }

    pub fn on_timeout_tick<L: XtLines>(&mut self, lines: &mut L) {
        self.session.on_timeout_tick(lines);
    }

    /// Runs the XT session and converts every scan code it has ready, as long as the event
    /// queue has room. Scan codes left behind stay in the session queue.
    pub fn update<L: XtLines>(&mut self, lines: &mut L) {
        self.session.task(lines);
        while !self.events.is_full() {
            let Some(code) = self.session.next_scan_code() else {
                break;
            };
            let Some(event) = to_key_event(code) else {
                continue;
            };
            if self.events.insert(event).is_err() {
                warn!(code, "key event queue full, dropping");
            }
        }
    }

    pub fn next_key_event(&mut self) -> Option<KeyEvent> {
        self.events.remove()
    }
}

fn to_key_event(code: u8) -> Option<KeyEvent> {
    let base = scancode::base_code(code);
    if base == scancode::NONE || base > scancode::MAX_CODE {
        warn!(code, "ignoring unknown xt scan code");
        return None;
    }
    let action = if scancode::is_break(code) {
        KeyAction::Release
    } else {
        KeyAction::Press
    };
    Some(KeyEvent::new(action, KeyCode(base)))
}
