use bitflags::bitflags;
use xt2ps2_time::{ClockCount, TimeBase};

use crate::bus::{BusState, Ps2Bus};
use crate::commands::response;

bitflags! {
    #[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
    pub struct Ps2Status: u8 {
        const RECV_BUFFER_FULL = 1 << 0;
        const RECV_BUFFER_OVERFLOW = 1 << 1;
        const RECV_FRAME_ERROR = 1 << 2;
        const XMIT_INTERRUPTED = 1 << 3;
        const XMIT_BUFFER_FULL = 1 << 4;
        const XMIT_COMPLETE = 1 << 5;
    }
}

impl Ps2Status {
    pub const RECV: Ps2Status = Ps2Status::RECV_BUFFER_FULL
        .union(Ps2Status::RECV_BUFFER_OVERFLOW)
        .union(Ps2Status::RECV_FRAME_ERROR);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransceiverState {
    Disabled,
    Idle,
    Inhibit,
    Receiving,
    Transmitting,
}

/// Quarter of a bus clock cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    DataBit,
    ClockHighLow,
    Nop,
    ClockLowHigh,
}

impl Phase {
    fn next(self) -> Self {
        match self {
            Phase::DataBit => Phase::ClockHighLow,
            Phase::ClockHighLow => Phase::Nop,
            Phase::Nop => Phase::ClockLowHigh,
            Phase::ClockLowHigh => Phase::DataBit,
        }
    }
}

const START_BIT: u8 = 0;
const PARITY_BIT: u8 = 9;
const STOP_BIT: u8 = 10;

/// Device-side PS/2 line driver.
///
/// [`Ps2Transceiver::tick`] must be called every 20 µs; it generates the bus clock at 12.5 kHz
/// and moves one quarter-cycle per call. Results are reported through sticky [`Ps2Status`]
/// flags that the keyboard session polls.
#[derive(Debug, Clone)]
pub struct Ps2Transceiver {
    state: TransceiverState,
    phase: Phase,
    bit: u8,
    register: u8,
    ones: u8,
    received: u8,
    last_xmit: u8,
    status: Ps2Status,
    time: TimeBase,
    idle_count: u16,
}

impl Ps2Transceiver {
    pub fn new() -> Self {
        Self {
            state: TransceiverState::Disabled,
            phase: Phase::DataBit,
            bit: 0,
            register: 0,
            ones: 0,
            received: 0,
            last_xmit: 0,
            status: Ps2Status::empty(),
            time: TimeBase::ps2(),
            idle_count: 0,
        }
    }

    pub fn state(&self) -> TransceiverState {
        self.state
    }

    pub fn status(&self) -> Ps2Status {
        self.status
    }

    pub fn clock_count(&self) -> ClockCount {
        self.time.now()
    }

    /// Consecutive ticks the bus has been seen idle while in `Idle`.
    pub fn idle_count(&self) -> u16 {
        self.idle_count
    }

    pub fn bus_idle(&self) -> bool {
        self.state == TransceiverState::Idle
    }

    pub fn data_received(&self) -> bool {
        self.status.contains(Ps2Status::RECV_BUFFER_FULL)
    }

    pub fn enable<B: Ps2Bus>(&mut self, bus: &mut B) {
        self.status = Ps2Status::empty();
        self.idle_count = 0;
        bus.set_clock(true);
        bus.set_data(true);
        self.state = if bus.clock_high() {
            TransceiverState::Idle
        } else {
            TransceiverState::Inhibit
        };
    }

    /// Stops driving the bus, abandoning any frame in flight and clearing every status flag.
    pub fn disable<B: Ps2Bus>(&mut self, bus: &mut B) {
        self.state = TransceiverState::Disabled;
        self.status = Ps2Status::empty();
        self.phase = Phase::DataBit;
        self.bit = START_BIT;
        bus.set_clock(true);
        bus.set_data(true);
    }

    /// Returns the last received byte and clears every receive flag.
    pub fn read_received_data(&mut self) -> u8 {
        self.status.remove(Ps2Status::RECV);
        self.received
    }

    pub fn retransmit_last_byte(&mut self) {
        if self.state != TransceiverState::Disabled {
            self.status.insert(Ps2Status::XMIT_BUFFER_FULL);
        }
    }

    /// Starts sending `byte` once the bus is idle. Refused unless the transceiver is idle with
    /// nothing pending.
    pub fn transmit_data_async(&mut self, byte: u8) -> bool {
        if self.state != TransceiverState::Idle || self.status.contains(Ps2Status::XMIT_BUFFER_FULL)
        {
            return false;
        }
        self.status
            .remove(Ps2Status::XMIT_COMPLETE | Ps2Status::XMIT_INTERRUPTED);
        self.last_xmit = byte;
        self.status.insert(Ps2Status::XMIT_BUFFER_FULL);
        true
    }

    /// Advances the line state by one quarter bus-clock.
    pub fn tick<B: Ps2Bus>(&mut self, bus: &mut B) {
        self.time.tick();
        let lines = BusState::sample(bus);

        match self.state {
            TransceiverState::Disabled => {}
            TransceiverState::Idle => {
                if lines == BusState::Idle && self.status.contains(Ps2Status::XMIT_BUFFER_FULL) {
                    self.register = self.last_xmit;
                    self.start_frame(TransceiverState::Transmitting);
                    self.idle_count = 0;
                    return;
                }
                if lines == BusState::Idle {
                    self.idle_count = self.idle_count.saturating_add(1);
                } else {
                    self.idle_count = 0;
                    self.state = TransceiverState::Inhibit;
                }
                self.inhibit(lines);
            }
            TransceiverState::Inhibit => self.inhibit(lines),
            TransceiverState::Receiving => self.receive(bus),
            TransceiverState::Transmitting => self.transmit(bus),
        }
    }

    fn start_frame(&mut self, state: TransceiverState) {
        self.state = state;
        self.bit = START_BIT;
        self.phase = Phase::DataBit;
    }

    fn inhibit(&mut self, lines: BusState) {
        match lines {
            BusState::Idle => self.state = TransceiverState::Idle,
            BusState::Rts => {
                self.status.remove(Ps2Status::RECV);
                self.start_frame(TransceiverState::Receiving);
            }
            BusState::Inhibit | BusState::InhibitRts => self.state = TransceiverState::Inhibit,
        }
    }

    fn receive<B: Ps2Bus>(&mut self, bus: &mut B) {
        match self.phase {
            Phase::DataBit => match self.bit {
                START_BIT => {
                    self.register = 0;
                    self.ones = 0;
                }
                1..=8 => {
                    if bus.data_high() {
                        self.register |= 1 << (self.bit - 1);
                        self.ones += 1;
                    }
                }
                PARITY_BIT => {
                    // Odd parity: a correct parity bit never equals the low bit of the count.
                    if bus.data_high() == (self.ones & 1 == 1) {
                        self.status.insert(Ps2Status::RECV_FRAME_ERROR);
                    }
                }
                _ => bus.set_data(false),
            },
            Phase::ClockHighLow => bus.set_clock(false),
            Phase::Nop => {}
            Phase::ClockLowHigh => {
                bus.set_clock(true);
                if self.bit >= STOP_BIT {
                    self.finish_receive();
                    bus.set_data(true);
                    self.state = TransceiverState::Inhibit;
                }
                self.bit = self.bit.wrapping_add(1);
            }
        }
        self.phase = self.phase.next();
    }

    fn finish_receive(&mut self) {
        if self.status.contains(Ps2Status::RECV_BUFFER_FULL) {
            self.status.insert(Ps2Status::RECV_BUFFER_OVERFLOW);
        } else if self.register == response::RESEND {
            self.retransmit_last_byte();
        } else {
            self.received = self.register;
            self.status.insert(Ps2Status::RECV_BUFFER_FULL);
        }
    }

    fn transmit<B: Ps2Bus>(&mut self, bus: &mut B) {
        match self.phase {
            Phase::DataBit => match self.bit {
                START_BIT => {
                    self.ones = 0;
                    bus.set_data(false);
                }
                1..=8 => {
                    let high = self.register & (1 << (self.bit - 1)) != 0;
                    if high {
                        self.ones += 1;
                    }
                    bus.set_data(high);
                }
                PARITY_BIT => bus.set_data(self.ones & 1 == 0),
                _ => bus.set_data(true),
            },
            Phase::ClockHighLow => {
                if !bus.clock_high() {
                    // Host pulled the clock low: abort and let the session retry.
                    self.status.remove(Ps2Status::XMIT_BUFFER_FULL);
                    self.status
                        .insert(Ps2Status::XMIT_COMPLETE | Ps2Status::XMIT_INTERRUPTED);
                    bus.set_data(true);
                    self.state = TransceiverState::Inhibit;
                } else {
                    bus.set_clock(false);
                }
            }
            Phase::Nop => {}
            Phase::ClockLowHigh => {
                bus.set_clock(true);
                if self.bit >= STOP_BIT {
                    bus.set_data(true);
                    self.status.remove(Ps2Status::XMIT_BUFFER_FULL);
                    self.status.insert(Ps2Status::XMIT_COMPLETE);
                    self.state = TransceiverState::Inhibit;
                }
                self.bit = self.bit.wrapping_add(1);
            }
        }
        self.phase = self.phase.next();
    }
}

impl Default for Ps2Transceiver {
    fn default() -> Self {
        Self::new()
    }
}
