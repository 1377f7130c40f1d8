// Sensor Sketches — proto-server
//
// WiFi station + TCP listener for length-prefixed drive commands (2-byte
// big-endian length, at most 256 bytes of protobuf). One message per
// connection; decoded fields are logged and nothing is sent back.

#[cfg(target_os = "espidf")]
fn main() -> anyhow::Result<()> {
    use std::thread;
    use std::time::Duration;

    use esp_idf_hal::prelude::*;
    use esp_idf_svc::eventloop::EspSystemEventLoop;
    use esp_idf_svc::nvs::EspDefaultNvsPartition;

    use sensor_sketches::config::*;
    use sensor_sketches::listener::{Framing, MessageListener};
    use sensor_sketches::proto::ControlCommand;
    use sensor_sketches::wifi;

    sensor_sketches::init_firmware("proto-server");

    let peripherals = Peripherals::take()?;
    let sysloop = EspSystemEventLoop::take()?;
    let nvs = EspDefaultNvsPartition::take()?;

    // Keep the driver alive for the lifetime of the firmware.
    let _wifi = wifi::connect(peripherals.modem, sysloop, nvs)?;

    let listener = MessageListener::<ControlCommand>::bind(
        SERVER_PORT,
        Framing::LengthPrefixed { max_len: MAX_FRAME_LEN },
    )?;

    thread::Builder::new()
        .name("server".into())
        .stack_size(STACK_SERVER)
        .spawn(move || {
            listener.run();
        })?;

    loop {
        thread::sleep(Duration::from_secs(60));
    }
}

// Host builds only exercise the library tests.
#[cfg(not(target_os = "espidf"))]
fn main() {}
