// Sensor Sketches — buzz-ir
//
// IR obstacle sensor + passive buzzer. Every new obstacle plays three short
// 1 kHz beeps; the tenth plays 2 kHz for five seconds and the count restarts.

#[cfg(target_os = "espidf")]
fn main() -> anyhow::Result<()> {
    use std::thread;
    use std::time::Duration;

    use esp_idf_hal::gpio::IOPin;
    use esp_idf_hal::prelude::*;

    use sensor_sketches::config::*;
    use sensor_sketches::drivers::buzzer::LedcBuzzer;
    use sensor_sketches::drivers::sensor;
    use sensor_sketches::input::Sensor;
    use sensor_sketches::tasks::detection::detection_task;
    use sensor_sketches::timing::SystemClock;
    use sensor_sketches::trigger::{AlertProfile, ToneAlarm, TriggerConfig, TriggerController};

    sensor_sketches::init_firmware("buzz-ir");
    log::info!(
        "Normal beep: {} Hz, continuous beep after {} detections: {} Hz",
        OBSTACLE_ALERT.frequency_hz,
        BUZZ_MAX_DETECTIONS,
        CONTINUOUS_ALERT.frequency_hz
    );

    // ---- Peripherals ------------------------------------------------------
    let peripherals = Peripherals::take()?;

    // IR module output: open collector, LOW while an obstacle is in range.
    let ir_pin = sensor::pulled_up(peripherals.pins.gpio5.downgrade())?;
    log::info!("IR sensor on GPIO{}", BUZZ_PIN_IR_SENSOR);

    let buzzer = LedcBuzzer::new(BUZZ_PIN_BUZZER, BUZZ_LEDC_BASE_FREQ_HZ, BUZZ_DUTY_ON)?;

    // ---- Trigger ----------------------------------------------------------
    let config = TriggerConfig {
        threshold: BUZZ_MAX_DETECTIONS,
        qualify: BUZZ_QUALIFY,
        reset: BUZZ_RESET,
    };
    let controller = TriggerController::new(
        config,
        ToneAlarm::new(buzzer, SystemClock),
        AlertProfile::Continuous(CONTINUOUS_ALERT),
    )
    .with_detection_action(AlertProfile::Pulse(OBSTACLE_ALERT));

    thread::Builder::new()
        .name("obstacle_detection".into())
        .stack_size(STACK_DETECTION)
        .spawn(move || {
            detection_task(Sensor::active_low(ir_pin), controller, BUZZ_POLL_INTERVAL);
        })?;

    log::info!("System ready. Place object near IR sensor to test...");

    loop {
        thread::sleep(Duration::from_secs(60));
    }
}

// Host builds only exercise the library tests.
#[cfg(not(target_os = "espidf"))]
fn main() {}
