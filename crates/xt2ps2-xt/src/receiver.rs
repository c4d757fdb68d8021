use bitflags::bitflags;
use tracing::debug;

use crate::config::{XtConfig, POR_MARGIN_MS};
use crate::hal::XtLines;
use crate::scancode::BAT_COMPLETE;

bitflags! {
    /// Sticky receiver status; cleared only by reading data or by a reset.
    #[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
    pub struct XtStatus: u8 {
        const KBD_DETECTED = 1 << 0;
        const READY = 1 << 1;
        const RECV_FRAME_ERROR = 1 << 2;
        const RECV_BUFFER_FULL = 1 << 3;
        const RECV_OVERFLOW = 1 << 4;
    }
}

impl XtStatus {
    /// Flags describing the byte currently held by the receiver.
    pub const RECV: XtStatus = XtStatus::RECV_BUFFER_FULL.union(XtStatus::RECV_FRAME_ERROR);
}

/// Position within an XT frame, advanced by each falling clock edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiveState {
    Idle,
    Start1,
    Start2,
    /// Data bit `0..=7`, LSB first.
    Data(u8),
}

impl ReceiveState {
    fn next(self) -> Self {
        match self {
            ReceiveState::Idle => ReceiveState::Start1,
            ReceiveState::Start1 => ReceiveState::Start2,
            ReceiveState::Start2 => ReceiveState::Data(0),
            ReceiveState::Data(7) => ReceiveState::Idle,
            ReceiveState::Data(bit) => ReceiveState::Data(bit + 1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XcvrState {
    Disabled,
    PowerOnReset,
    SoftReset,
    Idle,
}

/// Bit-level XT receiver.
///
/// Two interrupt sources drive it: [`XtReceiver::on_clock_falling_edge`] for every falling
/// edge of the keyboard clock, and [`XtReceiver::on_timeout_tick`] every millisecond while a
/// reset sequence is in progress. The board polls [`XtReceiver::edges_enabled`] and
/// [`XtReceiver::timeout_running`] to gate those interrupts.
#[derive(Debug, Clone)]
pub struct XtReceiver {
    sof_threshold_us: u32,
    single_start_bit: bool,
    por_on_enable: bool,
    use_reset_line: bool,
    soft_reset_enabled: bool,
    soft_reset_hold_ms: u16,
    hard_reset_hold_ms: u16,

    state: XcvrState,
    receive: ReceiveState,
    register: u8,
    buffer: u8,
    frame_error: bool,
    status: XtStatus,

    edges_enabled: bool,
    timeout_running: bool,
    timeout_count: u16,
    last_edge_us: Option<u32>,
}

impl XtReceiver {
    pub fn new(config: &XtConfig) -> Self {
        Self {
            sof_threshold_us: config.start_of_frame_threshold_us,
            single_start_bit: config.single_start_bit,
            por_on_enable: config.por_on_enable,
            use_reset_line: config.use_reset_line,
            soft_reset_enabled: config.soft_reset_enabled,
            soft_reset_hold_ms: config.soft_reset_hold_ms,
            hard_reset_hold_ms: config.hard_reset_hold_ms,
            state: XcvrState::Disabled,
            receive: ReceiveState::Idle,
            register: 0,
            buffer: 0,
            frame_error: false,
            status: XtStatus::empty(),
            edges_enabled: false,
            timeout_running: false,
            timeout_count: 0,
            last_edge_us: None,
        }
    }

    pub fn state(&self) -> XcvrState {
        self.state
    }

    pub fn receive_state(&self) -> ReceiveState {
        self.receive
    }

    pub fn status(&self) -> XtStatus {
        self.status
    }

    pub fn is_ready(&self) -> bool {
        self.status.contains(XtStatus::READY)
    }

    pub fn keyboard_detected(&self) -> bool {
        self.status.contains(XtStatus::KBD_DETECTED)
    }

    pub fn data_received(&self) -> bool {
        self.status.contains(XtStatus::RECV_BUFFER_FULL)
    }

    pub fn has_frame_error(&self) -> bool {
        self.status.contains(XtStatus::RECV_FRAME_ERROR)
    }

    pub fn edges_enabled(&self) -> bool {
        self.edges_enabled
    }

    pub fn timeout_running(&self) -> bool {
        self.timeout_running
    }

    pub fn enable<L: XtLines>(&mut self, lines: &mut L) {
        self.receive = ReceiveState::Idle;
        self.status = XtStatus::empty();
        if self.por_on_enable {
            self.hard_reset(lines);
        } else {
            self.start_receiving();
        }
    }

    pub fn disable(&mut self) {
        self.edges_enabled = false;
        self.timeout_running = false;
        self.state = XcvrState::Disabled;
    }

    /// Holds the clock low for the soft-reset period. Does nothing when soft reset is disabled.
    pub fn soft_reset<L: XtLines>(&mut self, lines: &mut L) {
        if !self.soft_reset_enabled {
            return;
        }
        self.edges_enabled = false;
        self.abandon_frame();
        self.status = XtStatus::empty();
        self.state = XcvrState::SoftReset;
        lines.hold_clock_low();
        self.start_timeout();
    }

    /// Asserts the reset line (when wired), then continues into a soft reset.
    pub fn hard_reset<L: XtLines>(&mut self, lines: &mut L) {
        self.edges_enabled = false;
        self.abandon_frame();
        lines.release_clock();
        self.state = XcvrState::PowerOnReset;
        if self.use_reset_line {
            lines.set_reset(true);
        }
        self.start_timeout();
    }

    /// Drops any partly clocked frame so the next edge is read as a start bit.
    fn abandon_frame(&mut self) {
        self.receive = ReceiveState::Idle;
        self.register = 0;
        self.frame_error = false;
    }

    fn start_timeout(&mut self) {
        self.timeout_count = 0;
        self.timeout_running = true;
    }

    fn start_receiving(&mut self) {
        self.edges_enabled = true;
        self.timeout_running = false;
        self.timeout_count = 0;
        self.last_edge_us = None;
        self.state = XcvrState::Idle;
        self.status.insert(XtStatus::READY);
    }

    /// Reset sequencing; called every millisecond while [`XtReceiver::timeout_running`].
    pub fn on_timeout_tick<L: XtLines>(&mut self, lines: &mut L) {
        if !self.timeout_running {
            return;
        }
        self.timeout_count = self.timeout_count.saturating_add(1);

        match self.state {
            XcvrState::SoftReset => {
                if self.timeout_count >= self.soft_reset_hold_ms {
                    lines.release_clock();
                    self.start_receiving();
                    debug!("xt receiver ready");
                }
            }
            XcvrState::PowerOnReset => {
                if self.timeout_count == self.hard_reset_hold_ms {
                    if self.use_reset_line {
                        lines.set_reset(false);
                    }
                } else if self.timeout_count >= self.hard_reset_hold_ms + POR_MARGIN_MS {
                    if self.soft_reset_enabled {
                        lines.hold_clock_low();
                        self.timeout_count = 0;
                    } else {
                        self.timeout_count = self.soft_reset_hold_ms;
                    }
                    self.state = XcvrState::SoftReset;
                }
            }
            XcvrState::Disabled | XcvrState::Idle => {}
        }
    }

    /// Samples one bit; called on every falling edge of the keyboard clock.
    ///
    /// `now_us` is a free-running microsecond timestamp used only to detect the gap that
    /// separates frames.
    pub fn on_clock_falling_edge<L: XtLines>(&mut self, lines: &mut L, now_us: u32) {
        if !self.edges_enabled {
            return;
        }

        let gap = self.last_edge_us.map(|last| now_us.wrapping_sub(last));
        self.last_edge_us = Some(now_us);
        if gap.is_some_and(|us| us > self.sof_threshold_us) {
            self.status.remove(XtStatus::RECV);
            self.receive = ReceiveState::Idle;
        }

        let data_high = lines.data_high();
        self.receive = self.receive.next();

        match self.receive {
            ReceiveState::Idle => {}
            ReceiveState::Start1 if self.single_start_bit => {
                self.register = 0;
                self.frame_error = !data_high;
                self.receive = ReceiveState::Start2;
            }
            ReceiveState::Start1 => {
                self.register = 0;
                self.frame_error = false;
            }
            ReceiveState::Start2 => {
                if !data_high {
                    self.frame_error = true;
                }
            }
            ReceiveState::Data(bit) => {
                self.register >>= 1;
                if data_high {
                    self.register |= 0x80;
                }
                if bit == 7 {
                    self.complete_frame(lines);
                }
            }
        }
    }

    fn complete_frame<L: XtLines>(&mut self, lines: &mut L) {
        // Stall the keyboard until the byte is consumed.
        lines.hold_clock_low();

        if self.frame_error {
            self.status.insert(XtStatus::RECV_FRAME_ERROR);
        } else if self.register == BAT_COMPLETE && !self.keyboard_detected() {
            self.status.insert(XtStatus::KBD_DETECTED);
            lines.release_clock();
        } else if self.data_received() {
            self.status.insert(XtStatus::RECV_OVERFLOW);
        } else {
            self.buffer = self.register;
            self.status.insert(XtStatus::RECV_BUFFER_FULL);
        }
        self.receive = ReceiveState::Idle;
    }

    /// Takes the buffered byte and lets the keyboard continue.
    pub fn read_received_data<L: XtLines>(&mut self, lines: &mut L) -> Option<u8> {
        if !self.data_received() {
            return None;
        }
        self.status.remove(XtStatus::RECV);
        self.status.insert(XtStatus::KBD_DETECTED);
        self.last_edge_us = None;
        lines.release_clock();
        Some(self.buffer)
    }

    /// Drops a frame that failed to decode and lets the keyboard continue.
    pub fn discard_frame_error<L: XtLines>(&mut self, lines: &mut L) -> bool {
        if !self.has_frame_error() {
            return false;
        }
        self.status.remove(XtStatus::RECV);
        self.last_edge_us = None;
        lines.release_clock();
        true
    }
}
