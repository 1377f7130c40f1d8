// Sensor Sketches — sensor-server
//
// WiFi station + TCP listener for bare protobuf environment readings. A
// single read of up to 128 bytes is decoded; the connection is then closed.

#[cfg(target_os = "espidf")]
fn main() -> anyhow::Result<()> {
    use std::thread;
    use std::time::Duration;

    use esp_idf_hal::prelude::*;
    use esp_idf_svc::eventloop::EspSystemEventLoop;
    use esp_idf_svc::nvs::EspDefaultNvsPartition;

    use sensor_sketches::config::*;
    use sensor_sketches::listener::{Framing, MessageListener};
    use sensor_sketches::proto::SensorData;
    use sensor_sketches::wifi;

    sensor_sketches::init_firmware("sensor-server");

    let peripherals = Peripherals::take()?;
    let sysloop = EspSystemEventLoop::take()?;
    let nvs = EspDefaultNvsPartition::take()?;

    let _wifi = wifi::connect(peripherals.modem, sysloop, nvs)?;

    let listener = MessageListener::<SensorData>::bind(
        SERVER_PORT,
        Framing::Raw { capacity: RAW_RECV_CAPACITY },
    )?;

    thread::Builder::new()
        .name("tcp_server".into())
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
