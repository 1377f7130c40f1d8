// Sensor Sketches — proximity-log
//
// Logs the proximity sensor state once per second.

#[cfg(target_os = "espidf")]
fn main() -> anyhow::Result<()> {
    use std::thread;

    use esp_idf_hal::gpio::InputPin;
    use esp_idf_hal::prelude::*;

    use sensor_sketches::config::*;
    use sensor_sketches::drivers::sensor;
    use sensor_sketches::input::Sensor;
    use sensor_sketches::tasks::monitor::proximity_task;

    sensor_sketches::init_firmware("proximity-log");

    let peripherals = Peripherals::take()?;
    let pin = sensor::floating(peripherals.pins.gpio4.downgrade_input())?;
    log::info!("Proximity sensor on GPIO{}", PROXIMITY_PIN);

    let handle = thread::Builder::new()
        .name("proximity".into())
        .stack_size(STACK_MONITOR)
        .spawn(move || {
            proximity_task(Sensor::active_low(pin), PROXIMITY_POLL_INTERVAL);
        })?;

    handle
        .join()
        .map_err(|_| anyhow::anyhow!("proximity task panicked"))
}

// Host builds only exercise the library tests.
#[cfg(not(target_os = "espidf"))]
fn main() {}
