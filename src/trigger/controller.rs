//! Polling-loop state machine: sample, detect, count, fire, reset.

use std::num::NonZeroU32;

use super::action::ActionTrigger;
use super::counter::ThresholdCounter;
use super::edge::EdgeDetector;
use crate::events::{Completion, TickOutcome, TriggerMode};

/// Which samples count as a detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Qualify {
    /// Only an inactive -> active transition counts.
    RisingEdge,
    /// Every poll that samples the sensor active counts.
    Level,
}

/// What happens to the counter once the armed action has run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetPolicy {
    /// Reset to zero and start counting again.
    AfterAction,
    /// Fire once per boot; the counter is left at threshold.
    SingleShot,
}

/// Count progress is reported for distinct obstacles; under `Level` every
/// active poll counts and the per-poll presence line is reported instead.
pub fn progress_level(qualify: Qualify) -> log::Level {
    match qualify {
        Qualify::RisingEdge => log::Level::Info,
        Qualify::Level => log::Level::Debug,
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TriggerConfig {
    pub threshold: NonZeroU32,
    pub qualify: Qualify,
    pub reset: ResetPolicy,
}

pub struct TriggerController<A: ActionTrigger> {
    edge: EdgeDetector,
    counter: ThresholdCounter,
    mode: TriggerMode,
    config: TriggerConfig,
    action: A,
    on_detection: Option<A::Profile>,
    on_armed: A::Profile,
    spent: bool,
}

impl<A: ActionTrigger> TriggerController<A> {
    pub fn new(config: TriggerConfig, action: A, on_armed: A::Profile) -> Self {
        Self {
            edge: EdgeDetector::new(),
            counter: ThresholdCounter::new(config.threshold),
            mode: TriggerMode::Idle,
            config,
            action,
            on_detection: None,
            on_armed,
            spent: false,
        }
    }

    /// Profile run for each detection that does not reach the threshold.
    pub fn with_detection_action(mut self, profile: A::Profile) -> Self {
        self.on_detection = Some(profile);
        self
    }

    /// Process one poll. `active` is the logical sensor state for this tick.
    pub fn tick(&mut self, active: bool) -> TickOutcome {
        let edge = self.edge.sample(active);
        if edge.rising {
            log::debug!("Sensor went active");
        }
        let qualifies = match self.config.qualify {
            Qualify::RisingEdge => edge.rising,
            Qualify::Level => active,
        };

        if !qualifies || self.mode == TriggerMode::Active {
            return TickOutcome::Quiet;
        }

        if self.spent {
            self.counter.increment();
            return TickOutcome::Spent { count: self.counter.count() };
        }

        self.counter.increment();
        let count = self.counter.count();
        log::log!(
            progress_level(self.config.qualify),
            "Obstacle detected! Count: {}/{}",
            count,
            self.counter.threshold()
        );

        if self.counter.is_armed() {
            self.set_mode(TriggerMode::Armed);
            let completion = self.fire();
            return TickOutcome::Triggered { count, completion };
        }

        match &self.on_detection {
            Some(profile) => {
                self.action.run(profile);
                TickOutcome::Pulsed { count }
            }
            None => TickOutcome::Counted { count },
        }
    }

    fn fire(&mut self) -> Completion {
        log::info!("Maximum detections reached! Running {:?}", self.on_armed);
        self.set_mode(TriggerMode::Active);
        let completion = self.action.run(&self.on_armed);

        match self.config.reset {
            ResetPolicy::AfterAction => {
                log::info!("Resetting detection count");
                self.counter.reset();
            }
            ResetPolicy::SingleShot => self.spent = true,
        }
        self.set_mode(TriggerMode::Idle);
        completion
    }

    fn set_mode(&mut self, mode: TriggerMode) {
        log::debug!("Trigger {} -> {}", self.mode.label(), mode.label());
        self.mode = mode;
    }

    pub fn mode(&self) -> TriggerMode {
        self.mode
    }

    pub fn count(&self) -> u32 {
        self.counter.count()
    }

    pub fn is_spent(&self) -> bool {
        self.spent
    }

    pub fn config(&self) -> TriggerConfig {
        self.config
    }
}
