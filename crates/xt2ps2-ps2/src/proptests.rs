use proptest::prelude::*;

use crate::{Ps2Bus, Ps2Status, Ps2Transceiver, TransceiverState};

/// Wired-AND line pair shared by the device under test and a scripted host.
#[derive(Debug)]
struct Line {
    dev_clock: bool,
    dev_data: bool,
    host_clock: bool,
    host_data: bool,
}

impl Line {
    fn new() -> Self {
        Self {
            dev_clock: true,
            dev_data: true,
            host_clock: true,
            host_data: true,
        }
    }
}

impl Ps2Bus for Line {
    fn clock_high(&self) -> bool {
        self.dev_clock && self.host_clock
    }

    fn data_high(&self) -> bool {
        self.dev_data && self.host_data
    }

    fn set_clock(&mut self, high: bool) {
        self.dev_clock = high;
    }

    fn set_data(&mut self, high: bool) {
        self.dev_data = high;
    }
}

fn device_to_host(xcvr: &mut Ps2Transceiver, line: &mut Line) -> Vec<bool> {
    let mut bits = Vec::new();
    for _ in 0..100 {
        let before = line.clock_high();
        xcvr.tick(line);
        if before && !line.clock_high() {
            bits.push(line.data_high());
        }
    }
    bits
}

/// Sends one frame from the host. Returns whether the device acknowledged it.
fn host_to_device(xcvr: &mut Ps2Transceiver, line: &mut Line, byte: u8, good_parity: bool) -> bool {
    line.host_clock = false;
    for _ in 0..6 {
        xcvr.tick(line);
    }
    line.host_data = false;
    line.host_clock = true;

    let odd = byte.count_ones() % 2 == 1;
    let parity = !odd == good_parity;
    let mut bits: Vec<bool> = (0..8).map(|n| byte & (1 << n) != 0).collect();
    bits.push(parity);
    bits.push(true);

    let mut next = 0;
    let mut acked = false;
    for _ in 0..100 {
        let before = line.clock_high();
        xcvr.tick(line);
        if before && !line.clock_high() {
            if let Some(&bit) = bits.get(next) {
                line.host_data = bit;
                next += 1;
            } else {
                acked = !line.data_high();
            }
        }
        if next == bits.len() && xcvr.state() == TransceiverState::Inhibit {
            break;
        }
    }
    line.host_data = true;
    acked
}

fn enabled() -> (Ps2Transceiver, Line) {
    let mut line = Line::new();
    let mut xcvr = Ps2Transceiver::new();
    xcvr.enable(&mut line);
    (xcvr, line)
}

proptest! {
    #[test]
    fn device_frames_decode_with_odd_parity(byte in any::<u8>()) {
        let (mut xcvr, mut line) = enabled();
        prop_assert!(xcvr.transmit_data_async(byte));
        let bits = device_to_host(&mut xcvr, &mut line);

        prop_assert_eq!(bits.len(), 11);
        prop_assert!(!bits[0]);
        prop_assert!(bits[10]);
        let decoded = (0..8).fold(0u8, |acc, n| acc | (u8::from(bits[n + 1]) << n));
        prop_assert_eq!(decoded, byte);
        let ones = bits[1..10].iter().filter(|&&b| b).count();
        prop_assert_eq!(ones % 2, 1);
        prop_assert!(xcvr.status().contains(Ps2Status::XMIT_COMPLETE));
        prop_assert!(xcvr.bus_idle());
    }

    #[test]
    fn host_frames_are_received_and_acknowledged(byte in any::<u8>()) {
        prop_assume!(byte != 0xFE);
        let (mut xcvr, mut line) = enabled();
        prop_assert!(host_to_device(&mut xcvr, &mut line, byte, true));
        prop_assert!(xcvr.data_received());
        prop_assert!(!xcvr.status().contains(Ps2Status::RECV_FRAME_ERROR));
        prop_assert_eq!(xcvr.read_received_data(), byte);
        prop_assert_eq!(xcvr.status() & Ps2Status::RECV, Ps2Status::empty());
    }

    #[test]
    fn bad_parity_is_flagged(byte in any::<u8>()) {
        prop_assume!(byte != 0xFE);
        let (mut xcvr, mut line) = enabled();
        host_to_device(&mut xcvr, &mut line, byte, false);
        prop_assert!(xcvr.status().contains(Ps2Status::RECV_FRAME_ERROR));
    }
}

#[test]
fn resend_from_host_rearms_last_byte() {
    let (mut xcvr, mut line) = enabled();
    assert!(xcvr.transmit_data_async(0x1C));
    device_to_host(&mut xcvr, &mut line);

    host_to_device(&mut xcvr, &mut line, 0xFE, true);
    assert!(!xcvr.data_received());
    // The retransmission starts on its own once the bus is idle.
    let bits = device_to_host(&mut xcvr, &mut line);
    let decoded = (0..8).fold(0u8, |acc, n| acc | (u8::from(bits[n + 1]) << n));
    assert_eq!(decoded, 0x1C);
}

#[test]
fn new_host_frame_replaces_unread_byte() {
    let (mut xcvr, mut line) = enabled();
    host_to_device(&mut xcvr, &mut line, 0xED, true);
    host_to_device(&mut xcvr, &mut line, 0x02, true);
    assert!(!xcvr.status().contains(Ps2Status::RECV_BUFFER_OVERFLOW));
    assert_eq!(xcvr.read_received_data(), 0x02);
}
