// Sensor Sketches — stepper-detect
//
// Proximity sensor + step/dir stepper. Every five polls that see an object
// start a 60° rotation from the LEDC pulse generator; a detached task
// releases the driver once the pulses should be done.

#[cfg(target_os = "espidf")]
fn main() -> anyhow::Result<()> {
    use std::thread;
    use std::time::Duration;

    use esp_idf_hal::gpio::{IOPin, OutputPin};
    use esp_idf_hal::prelude::*;

    use sensor_sketches::config::*;
    use sensor_sketches::drivers::sensor;
    use sensor_sketches::drivers::stepper::LedcStepper;
    use sensor_sketches::input::Sensor;
    use sensor_sketches::tasks::detection::detection_task;
    use sensor_sketches::timing::ThreadScheduler;
    use sensor_sketches::trigger::{PulseTrainStepper, TriggerConfig, TriggerController};

    sensor_sketches::init_firmware("stepper-detect");

    let peripherals = Peripherals::take()?;
    let proximity = sensor::pulled_up(peripherals.pins.gpio4.downgrade())?;
    // STEP (GPIO14) is routed to LEDC by number when the first rotation starts.
    let motor = LedcStepper::new(
        STEPPER_PIN_STEP,
        peripherals.pins.gpio27.downgrade_output(),
        peripherals.pins.gpio26.downgrade_output(),
    )?;
    log::info!(
        "Proximity GPIO{}, DIR GPIO{}, EN GPIO{}; {} steps at {} Hz",
        STEPPER_PIN_PROXIMITY,
        STEPPER_DETECT_PIN_DIR,
        STEPPER_DETECT_PIN_EN,
        STEPPER_DETECT_ROTATION.steps(),
        STEPPER_DETECT_ROTATION.pulse_freq_hz
    );

    let config = TriggerConfig {
        threshold: STEPPER_DETECTIONS,
        qualify: STEPPER_QUALIFY,
        reset: STEPPER_DETECT_RESET,
    };
    let controller = TriggerController::new(
        config,
        PulseTrainStepper::new(motor, ThreadScheduler::new("disable_motor")),
        STEPPER_DETECT_ROTATION,
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
