// Sensor Sketches — Hardware & System Configuration
// Target: ESP32 DevKit (Xtensa)

use std::num::NonZeroU32;
use std::time::Duration;

use crate::trigger::{ContinuousAlert, Direction, PulseAlert, Qualify, ResetPolicy, RotateStep};

const fn threshold(n: u32) -> NonZeroU32 {
    match NonZeroU32::new(n) {
        Some(v) => v,
        None => panic!("detection threshold must be positive"),
    }
}

const fn hz(n: u32) -> NonZeroU32 {
    match NonZeroU32::new(n) {
        Some(v) => v,
        None => panic!("pulse frequency must be positive"),
    }
}

// ---------------------------------------------------------------------------
// Task Stack Sizes (bytes)
// ---------------------------------------------------------------------------
pub const STACK_DETECTION: usize = 4096;
pub const STACK_MONITOR: usize = 3072;
pub const STACK_SERVER: usize = 8192;
pub const STACK_MOTOR_DISABLE: usize = 2048;

// ---------------------------------------------------------------------------
// buzz-ir — IR obstacle sensor + passive buzzer
// ---------------------------------------------------------------------------
pub const BUZZ_PIN_IR_SENSOR: i32 = 5;      // INPUT_PULLUP, active LOW
pub const BUZZ_PIN_BUZZER: i32 = 2;         // LEDC channel 0
pub const BUZZ_MAX_DETECTIONS: NonZeroU32 = threshold(10);
pub const BUZZ_POLL_INTERVAL: Duration = Duration::from_millis(50);
pub const BUZZ_QUALIFY: Qualify = Qualify::RisingEdge;
pub const BUZZ_RESET: ResetPolicy = ResetPolicy::AfterAction;
pub const BUZZ_LEDC_BASE_FREQ_HZ: u32 = 1000;
pub const BUZZ_DUTY_ON: u32 = 4096;         // 50 % at 13-bit resolution

pub const OBSTACLE_ALERT: PulseAlert = PulseAlert {
    frequency_hz: 1000,
    on_ms: 200,
    off_ms: 100,
    repetitions: 3,
};

pub const CONTINUOUS_ALERT: ContinuousAlert = ContinuousAlert {
    frequency_hz: 2000,
    duration_ms: 5000,
};

// ---------------------------------------------------------------------------
// Stepper geometry (shared by both stepper sketches)
// ---------------------------------------------------------------------------
pub const MICROSTEPS_PER_REV: u32 = 6400;
pub const ROTATION_ANGLE_DEG: u32 = 60;
pub const STEPPER_PIN_PROXIMITY: i32 = 4;   // INPUT_PULLUP, active LOW
pub const STEPPER_PIN_STEP: i32 = 14;
pub const STEPPER_DETECTIONS: NonZeroU32 = threshold(5);
pub const STEPPER_POLL_INTERVAL: Duration = Duration::from_millis(1000);
pub const STEPPER_QUALIFY: Qualify = Qualify::Level;

// ---------------------------------------------------------------------------
// ir-stepper — single-shot, bit-banged step pulses
// ---------------------------------------------------------------------------
pub const IR_STEPPER_PIN_DIR: i32 = 12;
pub const IR_STEPPER_PIN_EN: i32 = 13;
pub const IR_STEPPER_RESET: ResetPolicy = ResetPolicy::SingleShot;

pub const IR_STEPPER_ROTATION: RotateStep = RotateStep {
    microsteps_per_rev: MICROSTEPS_PER_REV,
    angle_degrees: ROTATION_ANGLE_DEG,
    pulse_freq_hz: hz(1000),                // 500 µs high + 500 µs low
    direction: Direction::Forward,
    settle_ms: 100,
};

// ---------------------------------------------------------------------------
// stepper-detect — repeatable, LEDC pulse train + detached disable
// ---------------------------------------------------------------------------
pub const STEPPER_DETECT_PIN_DIR: i32 = 27;
pub const STEPPER_DETECT_PIN_EN: i32 = 26;
pub const STEPPER_DETECT_RESET: ResetPolicy = ResetPolicy::AfterAction;

pub const STEPPER_DETECT_ROTATION: RotateStep = RotateStep {
    microsteps_per_rev: MICROSTEPS_PER_REV,
    angle_degrees: ROTATION_ANGLE_DEG,
    pulse_freq_hz: hz(10_660),              // ~100 ms for 60°
    direction: Direction::Forward,
    settle_ms: 0,
};

// ---------------------------------------------------------------------------
// proximity-log / switch-log — raw input polling
// ---------------------------------------------------------------------------
pub const PROXIMITY_PIN: i32 = 4;
pub const PROXIMITY_POLL_INTERVAL: Duration = Duration::from_millis(1000);

pub const SWITCH1_PIN: i32 = 34;            // input-only, external pull
pub const SWITCH2_PIN: i32 = 35;            // input-only, external pull
pub const SWITCH_POLL_INTERVAL: Duration = Duration::from_millis(100);

// ---------------------------------------------------------------------------
// proto-server / sensor-server — TCP message listener
// ---------------------------------------------------------------------------
pub const SERVER_PORT: u16 = 3333;
pub const MAX_FRAME_LEN: usize = 256;       // length-prefixed ControlCommand
pub const RAW_RECV_CAPACITY: usize = 128;   // single-read SensorData

pub const WIFI_SSID: &str = match option_env!("WIFI_SSID") {
    Some(ssid) => ssid,
    None => "sketch-net",
};
pub const WIFI_PASS: &str = match option_env!("WIFI_PASS") {
    Some(pass) => pass,
    None => "changeme",
};
