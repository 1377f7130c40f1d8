// Sensor Sketches — Shared Firmware Library
//
// Each binary under src/bin is one firmware image:
//   buzz-ir         IR obstacle -> pulse alerts, continuous alert at 10
//   ir-stepper      5 detections -> one 60° rotation per boot (bit-banged)
//   stepper-detect  5 detections -> 60° rotation (LEDC), repeatable
//   proximity-log   log proximity sensor state every second
//   switch-log      log GPIO34/35 switch state every 100 ms
//   proto-server    WiFi + TCP, length-prefixed ControlCommand
//   sensor-server   WiFi + TCP, single-read SensorData
//
// Everything outside `drivers::{buzzer, ledc, sensor, stepper}` and `wifi`
// is hardware independent and unit-tested on the host.

pub mod config;
pub mod drivers;
pub mod events;
pub mod input;
pub mod listener;
pub mod proto;
pub mod tasks;
pub mod timing;
pub mod trigger;

#[cfg(target_os = "espidf")]
pub mod wifi;

#[cfg(test)]
mod testing;

/// Link ESP-IDF runtime patches and install the logger. First call in `main`.
#[cfg(target_os = "espidf")]
pub fn init_firmware(name: &str) {
    esp_idf_svc::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();
    log::info!("{} firmware starting…", name);
}
