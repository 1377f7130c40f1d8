//! Protobuf messages accepted by the socket listeners.
//!
//! Field numbers and wire types match the nanopb definitions the clients
//! encode against: varint `uint32`/`bool`, fixed32 `float`.

use std::fmt;

use prost::Message;

/// Drive command: `ControlCommand` in control.proto.
#[derive(Clone, PartialEq, Message)]
pub struct ControlCommand {
    #[prost(uint32, tag = "1")]
    pub id: u32,

    /// Normalised speed, -1.0..=1.0
    #[prost(float, tag = "2")]
    pub speed: f32,

    /// Normalised steering, -1.0 (left) ..= 1.0 (right)
    #[prost(float, tag = "3")]
    pub steering: f32,

    #[prost(bool, tag = "4")]
    pub enable: bool,
}

impl fmt::Display for ControlCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {}, Speed: {:.2}, Steering: {:.2}, Enable: {}",
            self.id, self.speed, self.steering, self.enable
        )
    }
}

/// Environment reading: `SensorData` in sensor.proto.
#[derive(Clone, PartialEq, Message)]
pub struct SensorData {
    /// Degrees Celsius
    #[prost(float, tag = "1")]
    pub temperature: f32,

    /// Relative humidity, percent
    #[prost(float, tag = "2")]
    pub humidity: f32,
}

impl fmt::Display for SensorData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Temp: {:.2}, Humidity: {:.2}", self.temperature, self.humidity)
    }
}

/// A message a listener accepts and reports once decoded.
pub trait Received: Message + Default + fmt::Display {
    /// Text logged ahead of the decoded fields.
    const LOG_PREFIX: &'static str;

    fn log_line(&self) -> String {
        format!("{}{}", Self::LOG_PREFIX, self)
    }
}

impl Received for ControlCommand {
    const LOG_PREFIX: &'static str = "Received - ";
}

impl Received for SensorData {
    const LOG_PREFIX: &'static str = "Received ";
}
