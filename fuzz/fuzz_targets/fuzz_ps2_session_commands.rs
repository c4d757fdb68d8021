#![no_main]

use arbitrary::{Arbitrary, Unstructured};
use libfuzzer_sys::fuzz_target;

use xt2ps2_keyevent::{KeyCode, KeyEvent};
use xt2ps2_ps2::{
    LedStatusHandler, Ps2Bus, Ps2Config, Ps2KeyboardSession, Ps2Leds, ResetHandler,
    SelfTestHandler,
};

/// Upper bound on host actions per testcase.
const MAX_OPS: usize = 256;

/// Power-on wait plus BAT at 50 ticks per ms, with some slack.
const BOOT_TICKS: usize = (150 + 300) * 50 + 500;

struct Handler {
    self_test: bool,
    leds: u32,
    resets: u32,
}

impl SelfTestHandler for Handler {
    fn run_self_test(&mut self) -> bool {
        self.self_test
    }
}

impl LedStatusHandler for Handler {
    fn set_leds(&mut self, _leds: Ps2Leds) {
        self.leds = self.leds.saturating_add(1);
    }
}

impl ResetHandler for Handler {
    fn reset_received(&mut self) {
        self.resets = self.resets.saturating_add(1);
    }
}

struct Wire {
    dev_clock: bool,
    dev_data: bool,
    host_clock: bool,
    host_data: bool,
}

impl Ps2Bus for Wire {
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

#[derive(Debug, Arbitrary)]
enum Op {
    HostByte { byte: u8, good_parity: bool },
    Inhibit { ticks: u8 },
    Idle { ticks: u16 },
    Key { press: bool, code: u8 },
}

#[derive(Debug)]
struct Input {
    self_test: bool,
    ops: Vec<Op>,
}

impl<'a> Arbitrary<'a> for Input {
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        let self_test = u.arbitrary()?;
        let len = u.int_in_range(0..=MAX_OPS)?;
        let mut ops = Vec::with_capacity(len);
        for _ in 0..len {
            ops.push(u.arbitrary()?);
        }
        Ok(Self { self_test, ops })
    }
}

struct Host {
    session: Ps2KeyboardSession<Handler>,
    wire: Wire,
    rx_bits: Vec<bool>,
    received: Vec<u8>,
    tx_bits: Vec<bool>,
    sending: bool,
    capacity: usize,
}

impl Host {
    fn step(&mut self) {
        let before = self.wire.clock_high();
        self.session.tick(&mut self.wire);
        self.session.task(&mut self.wire);
        assert!(self.session.pending() <= self.capacity);
        if !(before && !self.wire.clock_high()) {
            return;
        }

        if self.sending {
            if self.tx_bits.is_empty() {
                // Acknowledge bit from the device.
                self.sending = false;
                self.wire.host_data = true;
            } else {
                self.wire.host_data = self.tx_bits.remove(0);
            }
            return;
        }

        self.rx_bits.push(self.wire.data_high());
        if self.rx_bits.len() == 11 {
            let bits = std::mem::take(&mut self.rx_bits);
            let byte = (0..8).fold(0u8, |acc, n| acc | (u8::from(bits[n + 1]) << n));
            assert_eq!(bits[1..10].iter().filter(|&&b| b).count() % 2, 1);
            self.received.push(byte);
        }
    }

    fn run(&mut self, ticks: usize) {
        for _ in 0..ticks {
            self.step();
        }
    }

    fn inhibit(&mut self, ticks: usize) {
        self.wire.host_clock = false;
        self.rx_bits.clear();
        self.run(ticks);
        self.wire.host_clock = true;
    }
}

fn run(input: &Input) -> (Vec<u8>, u32, u32) {
    let config = Ps2Config::default();
    let handler = Handler {
        self_test: input.self_test,
        leds: 0,
        resets: 0,
    };
    let mut session = Ps2KeyboardSession::new(&config, handler).expect("default config is valid");
    session.start();
    let mut host = Host {
        session,
        wire: Wire {
            dev_clock: true,
            dev_data: true,
            host_clock: true,
            host_data: true,
        },
        rx_bits: Vec::new(),
        received: Vec::new(),
        tx_bits: Vec::new(),
        sending: false,
        capacity: config.send_queue_capacity,
    };
    host.run(BOOT_TICKS);

    for op in &input.ops {
        match *op {
            Op::HostByte { byte, good_parity } => {
                host.inhibit(6);
                let odd = byte.count_ones() % 2 == 1;
                host.tx_bits = (0..8).map(|n| byte & (1 << n) != 0).collect();
                host.tx_bits.push(!odd == good_parity);
                host.tx_bits.push(true);
                host.sending = true;
                host.wire.host_data = false;
                host.run(60);
                host.sending = false;
                host.tx_bits.clear();
                host.wire.host_data = true;
            }
            Op::Inhibit { ticks } => host.inhibit(usize::from(ticks)),
            Op::Idle { ticks } => host.run(usize::from(ticks)),
            Op::Key { press, code } => {
                let code = KeyCode(code);
                let event = if press {
                    KeyEvent::press(code)
                } else {
                    KeyEvent::release(code)
                };
                host.session.send_key_event(&event);
                host.run(10);
            }
        }
    }
    host.run(2_000);
    let handler = host.session.handler();
    (host.received, handler.leds, handler.resets)
}

fuzz_target!(|input: Input| {
    let a = run(&input);
    let b = run(&input);
    assert_eq!(a, b);
});
