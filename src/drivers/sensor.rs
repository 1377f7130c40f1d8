// Sensor Sketches — GPIO Sensor Pins

use esp_idf_hal::gpio::{AnyIOPin, AnyInputPin, Input, Pin, PinDriver, Pull};

use crate::input::SensorInput;

/// Input with the internal pull-up enabled (open-collector IR modules).
pub fn pulled_up(pin: AnyIOPin) -> anyhow::Result<PinDriver<'static, AnyIOPin, Input>> {
    let mut driver = PinDriver::input(pin)?;
    driver.set_pull(Pull::Up)?;
    Ok(driver)
}

/// Input without internal pulls; GPIO34-39 have none anyway.
pub fn floating(pin: AnyInputPin) -> anyhow::Result<PinDriver<'static, AnyInputPin, Input>> {
    Ok(PinDriver::input(pin)?)
}

impl<'d, T: Pin> SensorInput for PinDriver<'d, T, Input> {
    fn is_high(&mut self) -> bool {
        PinDriver::is_high(self)
    }
}
