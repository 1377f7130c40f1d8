// Sensor Sketches — ir-stepper
//
// Proximity sensor + step/dir stepper. After five polls that see an object,
// rotate 60° once with software-timed step pulses. Fires once per boot.

#[cfg(target_os = "espidf")]
fn main() -> anyhow::Result<()> {
    use std::thread;
    use std::time::Duration;

    use esp_idf_hal::gpio::{IOPin, OutputPin};
    use esp_idf_hal::prelude::*;

    use sensor_sketches::config::*;
    use sensor_sketches::drivers::sensor;
    use sensor_sketches::drivers::stepper::GpioStepper;
    use sensor_sketches::input::Sensor;
    use sensor_sketches::tasks::detection::detection_task;
    use sensor_sketches::timing::SystemClock;
    use sensor_sketches::trigger::{BlockingStepper, TriggerConfig, TriggerController};

    sensor_sketches::init_firmware("ir-stepper");

    let peripherals = Peripherals::take()?;
    let proximity = sensor::pulled_up(peripherals.pins.gpio4.downgrade())?;
    let motor = GpioStepper::new(
        peripherals.pins.gpio14.downgrade_output(),
        peripherals.pins.gpio12.downgrade_output(),
        peripherals.pins.gpio13.downgrade_output(),
    )?;
    log::info!(
        "Proximity GPIO{}, STEP GPIO{}, DIR GPIO{}, EN GPIO{}; {} steps per {}°",
        STEPPER_PIN_PROXIMITY,
        STEPPER_PIN_STEP,
        IR_STEPPER_PIN_DIR,
        IR_STEPPER_PIN_EN,
        IR_STEPPER_ROTATION.steps(),
        IR_STEPPER_ROTATION.angle_degrees
    );

    let config = TriggerConfig {
        threshold: STEPPER_DETECTIONS,
        qualify: STEPPER_QUALIFY,
        reset: IR_STEPPER_RESET,
    };
    let controller = TriggerController::new(
        config,
        BlockingStepper::new(motor, SystemClock),
        IR_STEPPER_ROTATION,
    );

    thread::Builder::new()
        .name("detection".into())
        .stack_size(STACK_DETECTION)
        .spawn(move || {
            detection_task(Sensor::active_low(proximity), controller, STEPPER_POLL_INTERVAL);
        })?;

    loop {
        thread::sleep(Duration::from_secs(60));
    }
}

// Host builds only exercise the library tests.
#[cfg(not(target_os = "espidf"))]
fn main() {}
