// Sensor Sketches — Debounced Threshold Trigger
//
// Counts qualifying detections of a polled boolean sensor and, once the
// threshold is reached, runs a bounded action and applies the reset policy.
// Every sensor-triggered sketch is one instantiation of this core with a
// different action and policy.

pub mod action;
pub mod controller;
pub mod counter;
pub mod edge;

pub use action::{
    ActionTrigger, AlertProfile, BlockingStepper, ContinuousAlert, Direction, PulseAlert,
    PulseTrainStepper, RotateStep, ToneAlarm,
};
pub use controller::{Qualify, ResetPolicy, TriggerConfig, TriggerController};
pub use counter::ThresholdCounter;
pub use edge::{detect, EdgeDetector};
