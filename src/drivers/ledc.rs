// Sensor Sketches — LEDC PWM Channel
//
// Thin wrapper over the raw ESP-IDF LEDC calls. Both the buzzer and the
// stepper pulse generator use low-speed timer 0 / channel 0; only one of
// them is present in any one firmware image.

use esp_idf_sys::{self as sys, esp, EspError};

const MODE: sys::ledc_mode_t = sys::ledc_mode_t_LEDC_LOW_SPEED_MODE;
const TIMER: sys::ledc_timer_t = sys::ledc_timer_t_LEDC_TIMER_0;
const CHANNEL: sys::ledc_channel_t = sys::ledc_channel_t_LEDC_CHANNEL_0;

#[derive(Debug, Clone, Copy)]
pub enum Resolution {
    /// Tone output; duty 4096 is 50 %.
    Bits13,
    /// Square wave; duty 1 is 50 %.
    Bits1,
}

impl Resolution {
    fn raw(self) -> sys::ledc_timer_bit_t {
        match self {
            Self::Bits13 => sys::ledc_timer_bit_t_LEDC_TIMER_13_BIT,
            Self::Bits1  => sys::ledc_timer_bit_t_LEDC_TIMER_1_BIT,
        }
    }
}

pub struct LedcChannel {
    gpio: i32,
}

impl LedcChannel {
    /// Configure timer and channel on `gpio`, starting with `duty`.
    pub fn new(gpio: i32, freq_hz: u32, resolution: Resolution, duty: u32) -> Result<Self, EspError> {
        // Zeroed `clk_cfg` is LEDC_AUTO_CLK.
        let timer = sys::ledc_timer_config_t {
            speed_mode: MODE,
            timer_num: TIMER,
            duty_resolution: resolution.raw(),
            freq_hz,
            ..unsafe { core::mem::zeroed() }
        };
        esp!(unsafe { sys::ledc_timer_config(&timer) })?;

        let channel = sys::ledc_channel_config_t {
            gpio_num: gpio,
            speed_mode: MODE,
            channel: CHANNEL,
            intr_type: sys::ledc_intr_type_t_LEDC_INTR_DISABLE,
            timer_sel: TIMER,
            duty,
            hpoint: 0,
            ..unsafe { core::mem::zeroed() }
        };
        esp!(unsafe { sys::ledc_channel_config(&channel) })?;

        log::info!("LEDC channel on GPIO{} at {} Hz", gpio, freq_hz);
        Ok(Self { gpio })
    }

    pub fn set_frequency(&mut self, freq_hz: u32) -> Result<(), EspError> {
        esp!(unsafe { sys::ledc_set_freq(MODE, TIMER, freq_hz) })
    }

    pub fn set_duty(&mut self, duty: u32) -> Result<(), EspError> {
        esp!(unsafe { sys::ledc_set_duty(MODE, CHANNEL, duty) })?;
        esp!(unsafe { sys::ledc_update_duty(MODE, CHANNEL) })
    }

    pub fn gpio(&self) -> i32 {
        self.gpio
    }
}
