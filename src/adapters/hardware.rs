//! Hardware adapter bridging the GPIO bank to the [`LinePort`] trait.
//!
//! The only module in the system that touches actual lines.  On ESP-IDF it
//! drives GPIO through raw `esp-idf-svc::sys` calls and busy-waits with the
//! ROM delay; on host targets it simulates a 16-line bank whose inputs can be
//! driven from tests and bench tools.

use embedded_hal::delay::DelayNs;
use log::warn;

use crate::app::ports::LinePort;

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

/// Lines addressable by a 4-bit pin field.
pub const BANK_SIZE: usize = 16;

/// Electrical configuration of one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineMode {
    /// High-impedance (reset state).
    #[default]
    Disabled,
    InputPullUp,
    Output,
}

/// Concrete adapter for the controller's GPIO bank.
pub struct GpioAdapter {
    modes: [LineMode; BANK_SIZE],
    #[cfg(not(target_os = "espidf"))]
    sim: SimLines,
}

/// Host-side line levels.
#[cfg(not(target_os = "espidf"))]
#[derive(Debug, Default)]
struct SimLines {
    /// Last level written to each output.
    written: [bool; BANK_SIZE],
    /// Level forced onto an input by the outside world; `None` = floating,
    /// read through the pull-up.
    driven: [Option<bool>; BANK_SIZE],
}

impl GpioAdapter {
    pub fn new() -> Self {
        Self {
            modes: [LineMode::Disabled; BANK_SIZE],
            #[cfg(not(target_os = "espidf"))]
            sim: SimLines::default(),
        }
    }

    /// Current configuration of `pin`, `None` if outside the bank.
    pub fn mode(&self, pin: u8) -> Option<LineMode> {
        self.modes.get(usize::from(pin)).copied()
    }

    fn set_mode(&mut self, pin: u8, mode: LineMode) -> bool {
        match self.modes.get_mut(usize::from(pin)) {
            Some(m) if *m == mode => false,
            Some(m) => {
                *m = mode;
                true
            }
            None => false,
        }
    }
}

impl Default for GpioAdapter {
    fn default() -> Self {
        Self::new()
    }
}

// ── Simulation helpers (host only) ────────────────────────────

#[cfg(not(target_os = "espidf"))]
impl GpioAdapter {
    /// Force an input line to a level (`false` = switch closed to ground).
    pub fn drive_input(&mut self, pin: u8, high: bool) {
        if let Some(d) = self.sim.driven.get_mut(usize::from(pin)) {
            *d = Some(high);
        }
    }

    /// Let an input float back to its pull-up.
    pub fn release_input(&mut self, pin: u8) {
        if let Some(d) = self.sim.driven.get_mut(usize::from(pin)) {
            *d = None;
        }
    }

    /// Level an output line is driving, `None` unless configured as output.
    pub fn output_level(&self, pin: u8) -> Option<bool> {
        match self.mode(pin)? {
            LineMode::Output => Some(self.sim.written[usize::from(pin)]),
            _ => None,
        }
    }
}

// ── LinePort implementation ───────────────────────────────────

#[cfg(target_os = "espidf")]
impl LinePort for GpioAdapter {
    fn raw_read(&mut self, pin: u8) -> bool {
        // SAFETY: gpio_get_level is a read-only register access; main loop only.
        (unsafe { gpio_get_level(i32::from(pin)) }) != 0
    }

    fn raw_write(&mut self, pin: u8, high: bool) {
        // SAFETY: the output cache configures the line as output first.
        let ret = unsafe { gpio_set_level(i32::from(pin), u32::from(high)) };
        gpio_ok(pin, "set level", ret);
    }

    fn configure_input(&mut self, pin: u8) {
        if !self.set_mode(pin, LineMode::InputPullUp) {
            return;
        }
        // SAFETY: single-threaded main-loop access to GPIO config registers.
        let ret = unsafe { gpio_set_direction(i32::from(pin), gpio_mode_t_GPIO_MODE_INPUT) };
        gpio_ok(pin, "input direction", ret);
        // SAFETY: as above.
        let ret = unsafe { gpio_set_pull_mode(i32::from(pin), gpio_pull_mode_t_GPIO_PULLUP_ONLY) };
        gpio_ok(pin, "pull-up", ret);
    }

    fn configure_output(&mut self, pin: u8) {
        if !self.set_mode(pin, LineMode::Output) {
            return;
        }
        // SAFETY: single-threaded main-loop access to GPIO config registers.
        let ret = unsafe { gpio_set_pull_mode(i32::from(pin), gpio_pull_mode_t_GPIO_FLOATING) };
        gpio_ok(pin, "float", ret);
        // SAFETY: as above.
        let ret = unsafe { gpio_set_direction(i32::from(pin), gpio_mode_t_GPIO_MODE_OUTPUT) };
        gpio_ok(pin, "output direction", ret);
    }

    fn configure_disabled(&mut self, pin: u8) {
        self.set_mode(pin, LineMode::Disabled);
        // SAFETY: single-threaded main-loop access to GPIO config registers.
        let ret = unsafe { gpio_set_pull_mode(i32::from(pin), gpio_pull_mode_t_GPIO_FLOATING) };
        gpio_ok(pin, "float", ret);
        // SAFETY: as above.
        let ret = unsafe { gpio_set_direction(i32::from(pin), gpio_mode_t_GPIO_MODE_DISABLE) };
        gpio_ok(pin, "disable", ret);
    }
}

/// `true` when a GPIO driver call returned `ESP_OK` (0); otherwise logs the
/// failing step.  The line keeps whatever mode the driver left it in.
#[cfg_attr(not(target_os = "espidf"), allow(dead_code))]
fn gpio_ok(pin: u8, step: &str, ret: i32) -> bool {
    if ret != 0 {
        warn!("GPIO{}: {} failed (rc={})", pin, step, ret);
        return false;
    }
    true
}

#[cfg(not(target_os = "espidf"))]
impl LinePort for GpioAdapter {
    fn raw_read(&mut self, pin: u8) -> bool {
        let idx = usize::from(pin);
        match self.mode(pin) {
            Some(LineMode::Output) => self.sim.written[idx],
            Some(_) => self.sim.driven[idx].unwrap_or(true),
            None => true,
        }
    }

    fn raw_write(&mut self, pin: u8, high: bool) {
        if let Some(level) = self.sim.written.get_mut(usize::from(pin)) {
            *level = high;
        }
    }

    fn configure_input(&mut self, pin: u8) {
        self.set_mode(pin, LineMode::InputPullUp);
    }

    fn configure_output(&mut self, pin: u8) {
        self.set_mode(pin, LineMode::Output);
    }

    fn configure_disabled(&mut self, pin: u8) {
        self.set_mode(pin, LineMode::Disabled);
    }
}

// ── DelayNs implementation ────────────────────────────────────

impl DelayNs for GpioAdapter {
    #[cfg(target_os = "espidf")]
    fn delay_ns(&mut self, ns: u32) {
        // SAFETY: ROM busy-wait, no shared state.
        unsafe { esp_rom_delay_us(ns.div_ceil(1_000)) };
    }

    #[cfg(not(target_os = "espidf"))]
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(std::time::Duration::from_nanos(u64::from(ns)));
    }
}
