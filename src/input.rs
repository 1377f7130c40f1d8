// Sensor Sketches — Digital Sensor Input
//
// Maps raw pin levels to the logical "detected/pressed" signal. IR obstacle
// and proximity modules pull their output LOW when something is in range;
// the GPIO34/35 switches read HIGH when pressed.

/// Raw level source, sampled once per poll.
pub trait SensorInput {
    fn is_high(&mut self) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    ActiveLow,
    ActiveHigh,
}

impl Polarity {
    pub fn is_active(&self, level_high: bool) -> bool {
        match self {
            Self::ActiveLow  => !level_high,
            Self::ActiveHigh => level_high,
        }
    }
}

/// A pin paired with its polarity.
pub struct Sensor<P> {
    pin: P,
    polarity: Polarity,
}

impl<P: SensorInput> Sensor<P> {
    pub fn new(pin: P, polarity: Polarity) -> Self {
        Self { pin, polarity }
    }

    pub fn active_low(pin: P) -> Self {
        Self::new(pin, Polarity::ActiveLow)
    }

    pub fn active_high(pin: P) -> Self {
        Self::new(pin, Polarity::ActiveHigh)
    }

    /// Sample the pin and apply polarity.
    pub fn is_active(&mut self) -> bool {
        let level = self.pin.is_high();
        self.polarity.is_active(level)
    }
}
