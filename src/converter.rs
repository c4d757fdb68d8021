use tracing::{debug, trace};
use xt2ps2_keymap::KeymapEngine;
use xt2ps2_ps2::Ps2Bus;
use xt2ps2_util::EepromCell;
use xt2ps2_xt::XtLines;

use crate::config::{AdapterConfig, Result};
use crate::device::{DeviceAdapter, StatusLedSink};
use crate::host::HostAdapter;

/// The whole adapter: XT host side, keymap and PS/2 device side.
///
/// A board calls [`Converter::start`] once, then [`Converter::update`] from its main loop.
/// The interrupt entry points ([`Converter::ps2_tick`], [`Converter::xt_clock_edge`] and
/// [`Converter::xt_timeout_tick`]) forward to the engine that owns the lines.
#[derive(Debug)]
pub struct Converter<S, E> {
    host: HostAdapter,
    keymap: KeymapEngine<E>,
    device: DeviceAdapter<S>,
}

impl<S: StatusLedSink, E: EepromCell> Converter<S, E> {
    pub fn new(config: &AdapterConfig, sink: S, eeprom: E) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            host: HostAdapter::new(&config.xt, config.key_event_queue_capacity)?,
            keymap: KeymapEngine::new(&config.keymap, eeprom)?,
            device: DeviceAdapter::new(&config.ps2, sink)?,
        })
    }

    pub fn host(&self) -> &HostAdapter {
        &self.host
    }

    pub fn keymap(&self) -> &KeymapEngine<E> {
        &self.keymap
    }

    pub fn device(&self) -> &DeviceAdapter<S> {
        &self.device
    }

    /// Starts the PS/2 power-on wait, then enables the XT keyboard.
    pub fn start<L: XtLines>(&mut self, xt_lines: &mut L) {
        debug!(keymap = self.keymap.keymap().name, "adapter starting");
        self.device.start();
        self.host.start(xt_lines);
    }

    /// One main-loop iteration.
    pub fn update<L: XtLines, B: Ps2Bus>(&mut self, xt_lines: &mut L, ps2_bus: &mut B) {
        self.host.update(xt_lines);
        while let Some(event) = self.host.next_key_event() {
            for mapped in &self.keymap.map(&event) {
                trace!(?event, ?mapped, "key mapped");
                self.device.send_key_event(mapped);
            }
        }
        self.device.update(ps2_bus);
    }

    /// PS/2 bus interrupt; call every 20 µs.
    pub fn ps2_tick<B: Ps2Bus>(&mut self, ps2_bus: &mut B) {
        self.device.tick(ps2_bus);
    }

    /// Falling edge of the XT keyboard clock. `now_us` is a free-running microsecond counter.
    pub fn xt_clock_edge<L: XtLines>(&mut self, xt_lines: &mut L, now_us: u32) {
        self.host.on_clock_falling_edge(xt_lines, now_us);
    }

    /// XT reset sequencing timer; call every millisecond.
    pub fn xt_timeout_tick<L: XtLines>(&mut self, xt_lines: &mut L) {
        self.host.on_timeout_tick(xt_lines);
    }
}
