// Sensor Sketches — Passive Buzzer Driver
//
// LEDC square wave at 50 % duty; silence is duty 0.

use super::ledc::{LedcChannel, Resolution};
use super::ToneOutput;

pub struct LedcBuzzer {
    channel: LedcChannel,
    duty_on: u32,
}

impl LedcBuzzer {
    pub fn new(gpio: i32, base_freq_hz: u32, duty_on: u32) -> anyhow::Result<Self> {
        let channel = LedcChannel::new(gpio, base_freq_hz, Resolution::Bits13, 0)?;
        Ok(Self { channel, duty_on })
    }
}

impl ToneOutput for LedcBuzzer {
    fn start_tone(&mut self, frequency_hz: u32) {
        if let Err(e) = self.channel.set_frequency(frequency_hz) {
            log::warn!("Buzzer GPIO{}: set {} Hz failed: {}", self.channel.gpio(), frequency_hz, e);
        }
        if let Err(e) = self.channel.set_duty(self.duty_on) {
            log::warn!("Buzzer GPIO{}: duty on failed: {}", self.channel.gpio(), e);
        }
    }

    fn stop_tone(&mut self) {
        if let Err(e) = self.channel.set_duty(0) {
            log::warn!("Buzzer GPIO{}: duty off failed: {}", self.channel.gpio(), e);
        }
    }
}
