//! Detection counter that arms once a fixed threshold is reached.

use std::num::NonZeroU32;

#[derive(Debug, Clone)]
pub struct ThresholdCounter {
    count: u32,
    threshold: NonZeroU32,
}

impl ThresholdCounter {
    pub fn new(threshold: NonZeroU32) -> Self {
        Self { count: 0, threshold }
    }

    /// Adds one detection, clamped at the threshold.
    pub fn increment(&mut self) {
        if self.count < self.threshold.get() {
            self.count += 1;
        }
    }

    pub fn is_armed(&self) -> bool {
        self.count >= self.threshold.get()
    }

    pub fn reset(&mut self) {
        self.count = 0;
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn threshold(&self) -> u32 {
        self.threshold.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter(n: u32) -> ThresholdCounter {
        ThresholdCounter::new(NonZeroU32::new(n).unwrap())
    }

    #[test]
    fn arms_exactly_at_threshold() {
        let mut c = counter(3);
        c.increment();
        c.increment();
        assert!(!c.is_armed());
        c.increment();
        assert!(c.is_armed());
        assert_eq!(c.count(), 3);
    }

    #[test]
    fn increment_clamps_at_threshold() {
        let mut c = counter(2);
        for _ in 0..50 {
            c.increment();
            assert!(c.count() <= c.threshold());
        }
        assert_eq!(c.count(), 2);
    }

    #[test]
    fn reset_returns_to_zero() {
        let mut c = counter(1);
        c.increment();
        assert!(c.is_armed());
        c.reset();
        assert_eq!(c.count(), 0);
        assert!(!c.is_armed());
    }
}
