// Sensor Sketches — switch-log
//
// Logs two externally pulled switches (HIGH = pressed) every 100 ms.

#[cfg(target_os = "espidf")]
fn main() -> anyhow::Result<()> {
    use std::thread;

    use esp_idf_hal::gpio::InputPin;
    use esp_idf_hal::prelude::*;

    use sensor_sketches::config::*;
    use sensor_sketches::drivers::sensor;
    use sensor_sketches::input::Sensor;
    use sensor_sketches::tasks::monitor::{switch_task, LabeledSensor};

    sensor_sketches::init_firmware("switch-log");

    let peripherals = Peripherals::take()?;
    let switches = vec![
        LabeledSensor::new(
            format!("Switch1 (GPIO{})", SWITCH1_PIN),
            Sensor::active_high(sensor::floating(peripherals.pins.gpio34.downgrade_input())?),
        ),
        LabeledSensor::new(
            format!("Switch2 (GPIO{})", SWITCH2_PIN),
            Sensor::active_high(sensor::floating(peripherals.pins.gpio35.downgrade_input())?),
        ),
    ];

    let handle = thread::Builder::new()
        .name("switches".into())
        .stack_size(STACK_MONITOR)
        .spawn(move || {
            switch_task(switches, SWITCH_POLL_INTERVAL);
        })?;

    handle
        .join()
        .map_err(|_| anyhow::anyhow!("switch task panicked"))
}

// Host builds only exercise the library tests.
#[cfg(not(target_os = "espidf"))]
fn main() {}
