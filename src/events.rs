// Sensor Sketches — Trigger Events & State Types

// ---------------------------------------------------------------------------
// Edge events (produced once per poll, consumed immediately)
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EdgeEvent {
    pub rising: bool,
}

// ---------------------------------------------------------------------------
// Trigger mode
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerMode {
    /// Counting qualifying detections.
    Idle,
    /// Threshold reached; the bounded action has not started yet.
    Armed,
    /// Action in progress; detections are ignored.
    Active,
}

impl TriggerMode {
    /// Human-readable label used in transition logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle   => "idle",
            Self::Armed  => "armed",
            Self::Active => "active",
        }
    }
}

impl Default for TriggerMode {
    fn default() -> Self {
        Self::Idle
    }
}

// ---------------------------------------------------------------------------
// Action completion
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The action ran to completion on the calling thread.
    Finished,
    /// Pulses are running on hardware; the driver is disabled after `after_ms`.
    DisableScheduled { after_ms: u32 },
}

// ---------------------------------------------------------------------------
// Per-tick result of the trigger controller
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing qualifying happened this tick.
    Quiet,
    /// A detection was counted; no action attached.
    Counted { count: u32 },
    /// A detection was counted and the per-detection action ran.
    Pulsed { count: u32 },
    /// The threshold was reached and the armed action ran.
    Triggered { count: u32, completion: Completion },
    /// A detection arrived while the single-shot action was already spent.
    Spent { count: u32 },
}
