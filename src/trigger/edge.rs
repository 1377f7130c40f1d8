//! Rising-edge detection over a polled boolean signal.

use crate::events::EdgeEvent;

/// True only for an inactive -> active transition between two polls.
pub fn detect(previous: bool, current: bool) -> bool {
    !previous && current
}

/// Remembers the previous sample so callers only feed the current one.
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeDetector {
    previous: bool,
}

impl EdgeDetector {
    pub fn new() -> Self {
        Self { previous: false }
    }

    /// Call exactly once per poll tick.
    pub fn sample(&mut self, current: bool) -> EdgeEvent {
        let rising = detect(self.previous, current);
        self.previous = current;
        EdgeEvent { rising }
    }

    pub fn previous(&self) -> bool {
        self.previous
    }
}
