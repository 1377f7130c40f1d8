//! Recording fakes shared by the unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::drivers::{PulseGenerator, StepPulses, StepperGate, ToneOutput};
use crate::events::Completion;
use crate::input::SensorInput;
use crate::timing::{Clock, Job, Scheduler};
use crate::trigger::{ActionTrigger, Direction};

// ---------------------------------------------------------------------------
// Clock
// ---------------------------------------------------------------------------
#[derive(Debug, Default)]
struct ClockState {
    sleeps: Vec<u32>,
    busy_us: u64,
}

/// Virtual clock; clones share the same record.
#[derive(Debug, Clone, Default)]
pub struct FakeClock {
    state: Arc<Mutex<ClockState>>,
}

impl FakeClock {
    pub fn sleeps(&self) -> Vec<u32> {
        self.state.lock().unwrap().sleeps.clone()
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.sleeps().iter().map(|&ms| ms as u64).sum()
    }

    pub fn busy_us(&self) -> u64 {
        self.state.lock().unwrap().busy_us
    }
}

impl Clock for FakeClock {
    fn sleep_ms(&mut self, ms: u32) {
        self.state.lock().unwrap().sleeps.push(ms);
    }

    fn wait_us(&mut self, us: u32) {
        self.state.lock().unwrap().busy_us += us as u64;
    }
}

// ---------------------------------------------------------------------------
// Tone output
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToneEvent {
    Start(u32),
    Stop,
}

/// Clones share the same event log.
#[derive(Debug, Clone, Default)]
pub struct FakeTone {
    events: Arc<Mutex<Vec<ToneEvent>>>,
}

impl FakeTone {
    pub fn events(&self) -> Vec<ToneEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl ToneOutput for FakeTone {
    fn start_tone(&mut self, frequency_hz: u32) {
        self.events.lock().unwrap().push(ToneEvent::Start(frequency_hz));
    }

    fn stop_tone(&mut self) {
        self.events.lock().unwrap().push(ToneEvent::Stop);
    }
}

// ---------------------------------------------------------------------------
// Stepper driver
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepperState {
    pub enabled: bool,
    pub direction: Option<Direction>,
    pub step_high: bool,
    pub rising_steps: u32,
    pub steps_while_disabled: u32,
    pub pulse_freq: Option<u32>,
}

/// Driver double; clones share the same pin state.
#[derive(Debug, Clone, Default)]
pub struct FakeStepper {
    state: Arc<Mutex<StepperState>>,
}

impl FakeStepper {
    pub fn state(&self) -> StepperState {
        self.state.lock().unwrap().clone()
    }
}

impl StepperGate for FakeStepper {
    fn set_direction(&mut self, direction: Direction) {
        self.state.lock().unwrap().direction = Some(direction);
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.state.lock().unwrap().enabled = enabled;
    }
}

impl StepPulses for FakeStepper {
    fn set_step(&mut self, high: bool) {
        let mut state = self.state.lock().unwrap();
        if high && !state.step_high {
            state.rising_steps += 1;
            if !state.enabled {
                state.steps_while_disabled += 1;
            }
        }
        state.step_high = high;
    }
}

impl PulseGenerator for FakeStepper {
    fn start_pulses(&mut self, frequency_hz: u32) {
        self.state.lock().unwrap().pulse_freq = Some(frequency_hz);
    }
}

// ---------------------------------------------------------------------------
// Scheduler
// ---------------------------------------------------------------------------

/// Holds jobs until the test fires them.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    jobs: Arc<Mutex<VecDeque<(Duration, Job)>>>,
}

impl ManualScheduler {
    pub fn pending_delays(&self) -> Vec<Duration> {
        self.jobs.lock().unwrap().iter().map(|(d, _)| *d).collect()
    }

    pub fn fire_next(&self) {
        let job = self.jobs.lock().unwrap().pop_front();
        if let Some((_, job)) = job {
            job();
        }
    }

    pub fn fire_all(&self) {
        while !self.jobs.lock().unwrap().is_empty() {
            self.fire_next();
        }
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, delay: Duration, job: Job) {
        self.jobs.lock().unwrap().push_back((delay, job));
    }
}

// ---------------------------------------------------------------------------
// Action and sensor
// ---------------------------------------------------------------------------

/// Records which profiles ran; clones share the record.
#[derive(Debug, Clone, Default)]
pub struct RecordingAction {
    runs: Arc<Mutex<Vec<&'static str>>>,
}

impl RecordingAction {
    pub fn runs(&self) -> Vec<&'static str> {
        self.runs.lock().unwrap().clone()
    }
}

impl ActionTrigger for RecordingAction {
    type Profile = &'static str;

    fn run(&mut self, profile: &&'static str) -> Completion {
        self.runs.lock().unwrap().push(*profile);
        Completion::Finished
    }
}

/// Replays raw pin levels; reads past the end repeat the idle level.
#[derive(Debug)]
pub struct ScriptedPin {
    levels: VecDeque<bool>,
    idle_high: bool,
}

impl ScriptedPin {
    pub fn new(levels: &[bool], idle_high: bool) -> Self {
        Self {
            levels: levels.iter().copied().collect(),
            idle_high,
        }
    }
}

impl SensorInput for ScriptedPin {
    fn is_high(&mut self) -> bool {
        self.levels.pop_front().unwrap_or(self.idle_high)
    }
}
