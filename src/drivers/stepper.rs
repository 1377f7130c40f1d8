// Sensor Sketches — Step/Dir Stepper Driver (A4988 / DRV8825 style)
//
// EN is active LOW. DIR HIGH is forward. STEP is either bit-banged from GPIO
// or fed by an LEDC square wave.

use esp_idf_hal::gpio::{AnyOutputPin, Output, PinDriver};

use super::ledc::{LedcChannel, Resolution};
use super::{PulseGenerator, StepPulses, StepperGate};
use crate::trigger::Direction;

type OutPin = PinDriver<'static, AnyOutputPin, Output>;

fn drive(pin: &mut OutPin, high: bool, line: &str) {
    let result = if high { pin.set_high() } else { pin.set_low() };
    if let Err(e) = result {
        log::warn!("Stepper {} write failed: {}", line, e);
    }
}

struct Gate {
    dir: OutPin,
    en: OutPin,
}

impl Gate {
    fn new(dir: AnyOutputPin, en: AnyOutputPin) -> anyhow::Result<Self> {
        let dir = PinDriver::output(dir)?;
        let mut en = PinDriver::output(en)?;
        // Start with the driver released.
        en.set_high()?;
        Ok(Self { dir, en })
    }

    fn set_direction(&mut self, direction: Direction) {
        drive(&mut self.dir, direction == Direction::Forward, "DIR");
    }

    fn set_enabled(&mut self, enabled: bool) {
        drive(&mut self.en, !enabled, "EN");
    }
}

// ---------------------------------------------------------------------------
// Bit-banged STEP
// ---------------------------------------------------------------------------
pub struct GpioStepper {
    gate: Gate,
    step: OutPin,
}

impl GpioStepper {
    pub fn new(step: AnyOutputPin, dir: AnyOutputPin, en: AnyOutputPin) -> anyhow::Result<Self> {
        let mut step = PinDriver::output(step)?;
        step.set_low()?;
        Ok(Self {
            gate: Gate::new(dir, en)?,
            step,
        })
    }
}

impl StepperGate for GpioStepper {
    fn set_direction(&mut self, direction: Direction) {
        self.gate.set_direction(direction);
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.gate.set_enabled(enabled);
    }
}

impl StepPulses for GpioStepper {
    fn set_step(&mut self, high: bool) {
        drive(&mut self.step, high, "STEP");
    }
}

// ---------------------------------------------------------------------------
// LEDC-driven STEP
// ---------------------------------------------------------------------------
pub struct LedcStepper {
    gate: Gate,
    step_gpio: i32,
    pulses: Option<LedcChannel>,
}

impl LedcStepper {
    pub fn new(step_gpio: i32, dir: AnyOutputPin, en: AnyOutputPin) -> anyhow::Result<Self> {
        Ok(Self {
            gate: Gate::new(dir, en)?,
            step_gpio,
            pulses: None,
        })
    }
}

impl StepperGate for LedcStepper {
    fn set_direction(&mut self, direction: Direction) {
        self.gate.set_direction(direction);
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.gate.set_enabled(enabled);
    }
}

impl PulseGenerator for LedcStepper {
    /// The generator keeps running after the driver is disabled; EN HIGH
    /// makes the driver ignore it.
    fn start_pulses(&mut self, frequency_hz: u32) {
        match LedcChannel::new(self.step_gpio, frequency_hz, Resolution::Bits1, 1) {
            Ok(channel) => self.pulses = Some(channel),
            Err(e) => log::error!("STEP pulse generator on GPIO{} failed: {}", self.step_gpio, e),
        }
    }
}
