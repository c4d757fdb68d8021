use tracing::{debug, trace, warn};
use xt2ps2_keyevent::{KeyEvent, ScanCodeConverter};
use xt2ps2_time::{ClockCount, Stopwatch};
use xt2ps2_util::{ByteSequence, RingQueue};

use crate::bus::Ps2Bus;
use crate::commands::{command, response, ExpectingData};
use crate::conditions::{KeyConditionTable, KeyConditions};
use crate::config::{Ps2Config, Result};
use crate::handler::Ps2Handler;
use crate::transceiver::{Ps2Status, Ps2Transceiver};
use crate::typematic::{Typematic, TypematicRate};
use crate::Ps2Leds;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    PorWait,
    ResetWaitAck,
    BatWait,
    BatXmit,
    Xmit,
}

/// Keyboard-side PS/2 protocol: power-on and BAT sequencing, host command handling, the send
/// queue and typematic repeat.
///
/// [`Ps2KeyboardSession::tick`] is the 20 µs bus interrupt; [`Ps2KeyboardSession::task`] is
/// polled from the main loop.
#[derive(Debug)]
pub struct Ps2KeyboardSession<H> {
    handler: H,
    xcvr: Ps2Transceiver,
    state: SessionState,
    watch: Stopwatch,
    queue: RingQueue<u8>,
    converter: ScanCodeConverter,
    typematic: Typematic,
    conditions: KeyConditionTable,
    expecting_data: Option<ExpectingData>,
    enabled: bool,
    self_test_passed: bool,

    por_ticks: u32,
    bat_ticks: u32,
    inter_byte_ticks: u16,
    keyboard_id: [u8; 2],
    default_rate: TypematicRate,
}

impl<H: Ps2Handler> Ps2KeyboardSession<H> {
    pub fn new(config: &Ps2Config, handler: H) -> Result<Self> {
        config.validate()?;
        let default_rate = TypematicRate::new(config.default_typematic_rate);
        Ok(Self {
            handler,
            xcvr: Ps2Transceiver::new(),
            state: SessionState::PorWait,
            watch: Stopwatch::default(),
            queue: RingQueue::with_capacity(config.send_queue_capacity),
            converter: ScanCodeConverter::new(),
            typematic: Typematic::new(default_rate),
            conditions: KeyConditionTable::set2(),
            expecting_data: None,
            enabled: false,
            self_test_passed: false,
            por_ticks: Ps2Config::ticks_for_ms(config.por_ms),
            bat_ticks: Ps2Config::ticks_for_ms(config.bat_ms),
            inter_byte_ticks: config.inter_byte_delay_ticks(),
            keyboard_id: config.keyboard_id,
            default_rate,
        })
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    pub fn transceiver(&self) -> &Ps2Transceiver {
        &self.xcvr
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn typematic(&self) -> &Typematic {
        &self.typematic
    }

    pub fn key_conditions(&self) -> &KeyConditionTable {
        &self.conditions
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Bytes waiting to be sent, head first.
    pub fn queued(&self) -> impl Iterator<Item = u8> + '_ {
        self.queue.iter()
    }

    /// Begins the power-on delay that precedes the first BAT.
    pub fn start(&mut self) {
        self.enabled = false;
        self.state = SessionState::PorWait;
        self.watch.restart(self.now());
        debug!(por_ticks = self.por_ticks, "ps2 power-on wait");
    }

    /// Bus interrupt; call every 20 µs.
    pub fn tick<B: Ps2Bus>(&mut self, bus: &mut B) {
        self.xcvr.tick(bus);
    }

    fn now(&self) -> ClockCount {
        self.xcvr.clock_count()
    }

    /// Polling step.
    pub fn task<B: Ps2Bus>(&mut self, bus: &mut B) {
        match self.state {
            SessionState::Idle => {
                if let Some(seq) = self.typematic.poll(self.now()) {
                    if self.enabled {
                        self.send_sequence(&seq);
                    }
                }
            }
            SessionState::PorWait => {
                if self.watch.sample(self.now()) >= self.por_ticks {
                    self.bat_initiate();
                }
            }
            SessionState::BatWait => self.bat_check(bus),
            SessionState::BatXmit => {
                if self.xcvr.bus_idle() {
                    self.enabled = self.self_test_passed;
                    let result = if self.self_test_passed {
                        response::BAT_PASS
                    } else {
                        response::BAT_FAIL
                    };
                    self.enqueue(result);
                    self.state = SessionState::Idle;
                    debug!(result, "ps2 BAT complete");
                }
            }
            SessionState::Xmit => {
                let status = self.xcvr.status();
                if status.contains(Ps2Status::XMIT_COMPLETE) {
                    if status.contains(Ps2Status::XMIT_INTERRUPTED) {
                        trace!("ps2 transmit interrupted");
                    } else if let Some(byte) = self.queue.remove() {
                        trace!(byte, "ps2 byte sent");
                    }
                    self.state = SessionState::Idle;
                }
            }
            SessionState::ResetWaitAck => {
                if self.xcvr.transmit_data_async(response::ACK) {
                    self.bat_initiate();
                }
            }
        }

        if self.state != SessionState::Idle {
            return;
        }

        if self.xcvr.data_received() {
            let frame_error = self.xcvr.status().contains(Ps2Status::RECV_FRAME_ERROR);
            let byte = self.xcvr.read_received_data();
            if frame_error {
                debug!(byte, "ps2 frame error, requesting resend");
                self.enqueue(response::RESEND);
            } else {
                self.receive_byte(byte);
            }
        } else if let Some(head) = self.queue.peek() {
            if self.xcvr.bus_idle()
                && self.xcvr.idle_count() > self.inter_byte_ticks
                && self.xcvr.transmit_data_async(head)
            {
                self.state = SessionState::Xmit;
            }
        }
    }

    fn bat_initiate(&mut self) {
        self.state = SessionState::BatWait;
        self.watch.restart(self.now());
        self.handler.set_leds(Ps2Leds::all());
        self.self_test_passed = self.handler.run_self_test();
        self.queue.clear();
        self.typematic.reset();
        self.expecting_data = None;
        debug!(passed = self.self_test_passed, "ps2 BAT started");
    }

    fn bat_check<B: Ps2Bus>(&mut self, bus: &mut B) {
        if self.watch.sample(self.now()) >= self.bat_ticks {
            self.handler.set_leds(Ps2Leds::empty());
            self.xcvr.enable(bus);
            self.state = SessionState::BatXmit;
        }
    }

    fn enqueue(&mut self, byte: u8) {
        if self.queue.insert(byte).is_err() {
            warn!(byte, "ps2 send queue full");
        }
    }

    fn respond(&mut self, byte: u8) {
        if self.queue.push_front(byte).is_err() {
            warn!(byte, "ps2 send queue full, response dropped");
        }
    }

    /// Queues key data, marking an overrun by replacing the newest byte with `0xFF`.
    fn send_sequence(&mut self, seq: &ByteSequence) {
        if !self.enabled {
            return;
        }
        // Two slots stay free for the ID response.
        let limit = self.queue.capacity() - self.keyboard_id.len();
        for &byte in seq.as_slice() {
            let len = self.queue.len();
            if len > limit {
                self.queue.replace(len - 1, response::OVERRUN);
                warn!(byte, "ps2 send queue overrun");
            } else {
                self.enqueue(byte);
            }
        }
    }

    /// Converts `event` to Set-2 and queues it. Returns whether anything was queued.
    pub fn send_key_event(&mut self, event: &KeyEvent) -> bool {
        if !self.enabled {
            return false;
        }
        let Some(seq) = self.converter.convert(event) else {
            return false;
        };
        let conditions = self.conditions.get(event.code);
        self.typematic.key_event(
            event,
            &seq,
            conditions.contains(KeyConditions::TYPEMATIC),
            self.now(),
        );

        let wanted = if event.is_press() {
            KeyConditions::MAKE
        } else {
            KeyConditions::BREAK
        };
        if !conditions.contains(wanted) {
            return false;
        }
        self.send_sequence(&seq);
        true
    }

    /// Handles a byte from the host.
    fn receive_byte(&mut self, byte: u8) {
        if let Some(expecting) = self.expecting_data.take() {
            self.handle_data_byte(expecting, byte);
            return;
        }
        debug!(byte, "ps2 command");

        match byte {
            command::SET_LEDS => {
                self.respond(response::ACK);
                self.expecting_data = Some(ExpectingData::LedState);
            }
            command::ECHO => {
                self.respond(response::ECHO);
            }
            command::SCAN_CODE_SET => {
                self.respond(response::ACK);
                self.expecting_data = Some(ExpectingData::ScanCodeSet);
            }
            command::READ_ID => {
                self.queue_id();
                self.respond(response::ACK);
            }
            command::SET_TYPEMATIC_RATE => {
                self.respond(response::ACK);
                self.expecting_data = Some(ExpectingData::Typematic);
            }
            command::ENABLE => {
                self.enabled = true;
                self.respond(response::ACK);
            }
            command::DISABLE => {
                self.queue.clear();
                self.enabled = false;
                self.respond(response::ACK);
            }
            command::SET_DEFAULTS => {
                self.typematic.set_rate(self.default_rate);
                self.conditions = KeyConditionTable::set2();
                self.respond(response::ACK);
            }
            command::RESET => self.reset(),
            _ => {
                // Set-3 key configuration and unknown commands are ACKed and ignored.
                self.respond(response::ACK);
            }
        }
    }

    fn handle_data_byte(&mut self, expecting: ExpectingData, byte: u8) {
        debug!(?expecting, byte, "ps2 command parameter");
        match expecting {
            ExpectingData::LedState => {
                self.handler.set_leds(Ps2Leds::from_bits_truncate(byte));
                self.respond(response::ACK);
            }
            ExpectingData::Typematic => {
                self.typematic.set_rate(TypematicRate::new(byte));
                self.respond(response::ACK);
            }
            ExpectingData::ScanCodeSet => {
                match byte {
                    0 => {
                        self.respond(2);
                    }
                    2 => {
                        self.conditions = KeyConditionTable::set2();
                    }
                    other => warn!(set = other, "unsupported scan code set"),
                }
                self.respond(response::ACK);
            }
        }
    }

    /// Puts the ID bytes ahead of everything already queued.
    fn queue_id(&mut self) {
        let prior = self.queue.len();
        for byte in self.keyboard_id {
            self.enqueue(byte);
        }
        for _ in 0..prior {
            if let Some(byte) = self.queue.remove() {
                self.enqueue(byte);
            }
        }
    }

    fn reset(&mut self) {
        self.handler.reset_received();
        self.enabled = false;
        if self.xcvr.transmit_data_async(response::ACK) {
            self.bat_initiate();
        } else {
            self.state = SessionState::ResetWaitAck;
        }
    }
}
