// Sensor Sketches — Actuator Interfaces
//
// Output seams driven by the action triggers. ESP-IDF implementations live in
// the submodules; tests substitute recording fakes.

#[cfg(target_os = "espidf")]
pub mod buzzer;
#[cfg(target_os = "espidf")]
pub mod ledc;
#[cfg(target_os = "espidf")]
pub mod sensor;
#[cfg(target_os = "espidf")]
pub mod stepper;

use crate::trigger::Direction;

/// Square-wave tone output (passive buzzer).
pub trait ToneOutput {
    fn start_tone(&mut self, frequency_hz: u32);
    fn stop_tone(&mut self);
}

/// Direction line and enable gate of a step/dir stepper driver.
pub trait StepperGate {
    fn set_direction(&mut self, direction: Direction);
    fn set_enabled(&mut self, enabled: bool);
}

/// Software-driven STEP line.
pub trait StepPulses {
    fn set_step(&mut self, high: bool);
}

/// Free-running hardware pulse generator on the STEP line.
pub trait PulseGenerator {
    fn start_pulses(&mut self, frequency_hz: u32);
}
