// Sensor Sketches — Raw Input Monitors
//
// Read-log-delay loops with no state: one for the proximity sensor, one for
// a pair of switches.

use std::thread;
use std::time::Duration;

use crate::input::{Sensor, SensorInput};

pub fn presence_label(active: bool) -> &'static str {
    if active {
        "Object detected!"
    } else {
        "No object detected"
    }
}

pub struct LabeledSensor<P> {
    pub label: String,
    pub sensor: Sensor<P>,
}

impl<P: SensorInput> LabeledSensor<P> {
    pub fn new(label: impl Into<String>, sensor: Sensor<P>) -> Self {
        Self {
            label: label.into(),
            sensor,
        }
    }
}

/// `Switch1 (GPIO34): PRESSED | Switch2 (GPIO35): RELEASED`
pub fn switch_report<P: SensorInput>(switches: &mut [LabeledSensor<P>]) -> String {
    switches
        .iter_mut()
        .map(|s| {
            let state = if s.sensor.is_active() { "PRESSED" } else { "RELEASED" };
            format!("{}: {}", s.label, state)
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

pub fn proximity_task<P: SensorInput>(mut sensor: Sensor<P>, interval: Duration) -> ! {
    log::info!("Proximity monitor started");
    loop {
        log::info!("{}", presence_label(sensor.is_active()));
        thread::sleep(interval);
    }
}

pub fn switch_task<P: SensorInput>(mut switches: Vec<LabeledSensor<P>>, interval: Duration) -> ! {
    log::info!("Switch monitor started ({} inputs)", switches.len());
    loop {
        log::info!("{}", switch_report(&mut switches));
        thread::sleep(interval);
    }
}
