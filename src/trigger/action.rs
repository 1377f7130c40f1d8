//! Bounded actions fired by the trigger controller.
//!
//! Alerts and the bit-banged rotation block the polling task for their full
//! duration. The pulse-train rotation returns as soon as the hardware
//! generator is running and leaves the driver disable to a detached job.

use std::fmt;
use std::num::NonZeroU32;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use crate::drivers::{PulseGenerator, StepPulses, StepperGate, ToneOutput};
use crate::events::Completion;
use crate::timing::{Clock, Scheduler};

/// Something the controller can run once per trigger.
pub trait ActionTrigger {
    type Profile: fmt::Debug;

    fn run(&mut self, profile: &Self::Profile) -> Completion;
}

// ---------------------------------------------------------------------------
// Profiles
// ---------------------------------------------------------------------------

/// `repetitions` × (tone for `on_ms`, silence for `off_ms`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PulseAlert {
    pub frequency_hz: u32,
    pub on_ms: u32,
    pub off_ms: u32,
    pub repetitions: u32,
}

/// One tone held for `duration_ms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContinuousAlert {
    pub frequency_hz: u32,
    pub duration_ms: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertProfile {
    Pulse(PulseAlert),
    Continuous(ContinuousAlert),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Reverse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotateStep {
    pub microsteps_per_rev: u32,
    pub angle_degrees: u32,
    pub pulse_freq_hz: NonZeroU32,
    pub direction: Direction,
    /// Delay between enabling the driver and the first pulse.
    pub settle_ms: u32,
}

impl RotateStep {
    /// Truncating: 6400 microsteps at 60° gives 1066. Saturates at `u32::MAX`.
    pub const fn steps(&self) -> u32 {
        let steps = (self.microsteps_per_rev as u64 * self.angle_degrees as u64) / 360;
        saturate(steps)
    }

    /// Time the pulse train needs at `pulse_freq_hz`, truncated to whole ms.
    pub const fn pulse_duration_ms(&self) -> u32 {
        saturate((self.steps() as u64 * 1000) / self.pulse_freq_hz.get() as u64)
    }

    /// Half of one STEP period when pulses are generated in software.
    pub const fn half_period_us(&self) -> u32 {
        500_000 / self.pulse_freq_hz.get()
    }
}

const fn saturate(v: u64) -> u32 {
    if v > u32::MAX as u64 {
        u32::MAX
    } else {
        v as u32
    }
}

// ---------------------------------------------------------------------------
// Buzzer alerts
// ---------------------------------------------------------------------------
pub struct ToneAlarm<T, C> {
    output: T,
    clock: C,
}

impl<T: ToneOutput, C: Clock> ToneAlarm<T, C> {
    pub fn new(output: T, clock: C) -> Self {
        Self { output, clock }
    }

    fn beep(&mut self, frequency_hz: u32, duration_ms: u32) {
        self.output.start_tone(frequency_hz);
        self.clock.sleep_ms(duration_ms);
        self.output.stop_tone();
    }
}

impl<T: ToneOutput, C: Clock> ActionTrigger for ToneAlarm<T, C> {
    type Profile = AlertProfile;

    fn run(&mut self, profile: &AlertProfile) -> Completion {
        match *profile {
            AlertProfile::Pulse(p) => {
                for _ in 0..p.repetitions {
                    self.beep(p.frequency_hz, p.on_ms);
                    self.clock.sleep_ms(p.off_ms);
                }
            }
            AlertProfile::Continuous(c) => {
                log::info!("Playing continuous beep for {} seconds...", c.duration_ms / 1000);
                self.beep(c.frequency_hz, c.duration_ms);
                log::info!("Continuous beep finished");
            }
        }
        Completion::Finished
    }
}

// ---------------------------------------------------------------------------
// Stepper: software pulses, blocks until the rotation is done
// ---------------------------------------------------------------------------
pub struct BlockingStepper<G, C> {
    driver: G,
    clock: C,
}

impl<G: StepperGate + StepPulses, C: Clock> BlockingStepper<G, C> {
    pub fn new(mut driver: G, clock: C) -> Self {
        driver.set_enabled(false);
        Self { driver, clock }
    }
}

impl<G: StepperGate + StepPulses, C: Clock> ActionTrigger for BlockingStepper<G, C> {
    type Profile = RotateStep;

    fn run(&mut self, rotation: &RotateStep) -> Completion {
        self.driver.set_enabled(true);
        self.clock.sleep_ms(rotation.settle_ms);
        self.driver.set_direction(rotation.direction);

        let half_period = rotation.half_period_us();
        for _ in 0..rotation.steps() {
            self.driver.set_step(true);
            self.clock.wait_us(half_period);
            self.driver.set_step(false);
            self.clock.wait_us(half_period);
        }

        self.driver.set_enabled(false);
        log::info!("Motor rotated {} degrees", rotation.angle_degrees);
        Completion::Finished
    }
}

// ---------------------------------------------------------------------------
// Stepper: hardware pulse train, detached auto-disable
// ---------------------------------------------------------------------------

/// Each trigger schedules its own disable job. A trigger arriving before the
/// previous job fires is not guarded: the older job still disables the
/// driver, cutting the newer rotation short.
pub struct PulseTrainStepper<G, S> {
    gate: Arc<Mutex<G>>,
    scheduler: S,
}

impl<G, S> PulseTrainStepper<G, S>
where
    G: StepperGate + PulseGenerator + Send + 'static,
    S: Scheduler,
{
    pub fn new(mut driver: G, scheduler: S) -> Self {
        driver.set_enabled(false);
        Self {
            gate: Arc::new(Mutex::new(driver)),
            scheduler,
        }
    }
}

impl<G, S> ActionTrigger for PulseTrainStepper<G, S>
where
    G: StepperGate + PulseGenerator + Send + 'static,
    S: Scheduler,
{
    type Profile = RotateStep;

    fn run(&mut self, rotation: &RotateStep) -> Completion {
        let after_ms = rotation.pulse_duration_ms();
        {
            let mut driver = self.gate.lock().unwrap_or_else(PoisonError::into_inner);
            driver.set_direction(rotation.direction);
            driver.set_enabled(true);
            driver.start_pulses(rotation.pulse_freq_hz.get());
        }

        let gate = Arc::clone(&self.gate);
        self.scheduler.schedule(
            Duration::from_millis(after_ms as u64),
            Box::new(move || {
                gate.lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .set_enabled(false);
                log::info!("Motor disabled after {} ms", after_ms);
            }),
        );

        log::info!(
            "Motor rotating {} degrees in {} ms",
            rotation.angle_degrees,
            after_ms
        );
        Completion::DisableScheduled { after_ms }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeClock, FakeStepper, FakeTone, ManualScheduler, ToneEvent};

    const SIXTY_DEG: RotateStep = RotateStep {
        microsteps_per_rev: 6400,
        angle_degrees: 60,
        pulse_freq_hz: match NonZeroU32::new(10_660) {
            Some(hz) => hz,
            None => unreachable!(),
        },
        direction: Direction::Forward,
        settle_ms: 0,
    };

    fn freq(hz: u32) -> NonZeroU32 {
        NonZeroU32::new(hz).unwrap()
    }

    #[test]
    fn rotate_step_arithmetic_truncates() {
        assert_eq!(SIXTY_DEG.steps(), 1066);
        // 1_066_000 / 10_660 is exactly 100.
        assert_eq!(SIXTY_DEG.pulse_duration_ms(), 100);

        let slow = RotateStep { pulse_freq_hz: freq(1000), ..SIXTY_DEG };
        assert_eq!(slow.pulse_duration_ms(), 1066);
        assert_eq!(slow.half_period_us(), 500);

        let odd = RotateStep { angle_degrees: 45, microsteps_per_rev: 200, ..SIXTY_DEG };
        assert_eq!(odd.steps(), 25);
    }

    #[test]
    fn rotate_step_large_geometry_saturates() {
        let huge = RotateStep {
            microsteps_per_rev: u32::MAX,
            angle_degrees: 3600,
            pulse_freq_hz: freq(1),
            ..SIXTY_DEG
        };
        // 10 full turns of u32::MAX microsteps does not fit in u32.
        assert_eq!(huge.steps(), u32::MAX);
        assert_eq!(huge.pulse_duration_ms(), u32::MAX);

        // Products above u32::MAX no longer wrap before the division.
        let wide = RotateStep { microsteps_per_rev: 40_000_000, angle_degrees: 180, ..SIXTY_DEG };
        assert_eq!(wide.steps(), 20_000_000);
        assert_eq!(wide.pulse_duration_ms(), 1_876_172);
    }

    #[test]
    fn pulse_alert_beeps_with_gaps() {
        let clock = FakeClock::default();
        let tone = FakeTone::default();
        let mut alarm = ToneAlarm::new(tone.clone(), clock.clone());
        let profile = AlertProfile::Pulse(PulseAlert {
            frequency_hz: 1000,
            on_ms: 200,
            off_ms: 100,
            repetitions: 3,
        });

        assert_eq!(alarm.run(&profile), Completion::Finished);

        let events = tone.events();
        assert_eq!(events.len(), 6);
        for pair in events.chunks(2) {
            assert_eq!(pair, [ToneEvent::Start(1000), ToneEvent::Stop]);
        }
        assert_eq!(clock.sleeps(), vec![200, 100, 200, 100, 200, 100]);
        assert_eq!(clock.elapsed_ms(), 900);
    }

    #[test]
    fn continuous_alert_holds_one_tone() {
        let clock = FakeClock::default();
        let tone = FakeTone::default();
        let mut alarm = ToneAlarm::new(tone.clone(), clock.clone());
        let profile = AlertProfile::Continuous(ContinuousAlert {
            frequency_hz: 2000,
            duration_ms: 5000,
        });

        alarm.run(&profile);

        assert_eq!(tone.events(), vec![ToneEvent::Start(2000), ToneEvent::Stop]);
        assert_eq!(clock.sleeps(), vec![5000]);
    }

    #[test]
    fn blocking_stepper_pulses_inside_enable_gate() {
        let clock = FakeClock::default();
        let driver = FakeStepper::default();
        let rotation = RotateStep { pulse_freq_hz: freq(1000), settle_ms: 100, ..SIXTY_DEG };
        let mut stepper = BlockingStepper::new(driver.clone(), clock.clone());

        assert_eq!(stepper.run(&rotation), Completion::Finished);

        let state = driver.state();
        assert_eq!(state.rising_steps, 1066);
        assert!(!state.step_high);
        assert!(!state.enabled);
        assert_eq!(state.direction, Some(Direction::Forward));
        // Every step was emitted while the driver was enabled.
        assert_eq!(state.steps_while_disabled, 0);
        assert_eq!(clock.sleeps(), vec![100]);
        assert_eq!(clock.busy_us(), 1066 * 1000);
    }

    #[test]
    fn pulse_train_stepper_schedules_disable() {
        let scheduler = ManualScheduler::default();
        let driver = FakeStepper::default();
        let mut stepper = PulseTrainStepper::new(driver.clone(), scheduler.clone());

        let completion = stepper.run(&SIXTY_DEG);
        assert_eq!(completion, Completion::DisableScheduled { after_ms: 100 });

        let state = driver.state();
        assert!(state.enabled);
        assert_eq!(state.pulse_freq, Some(10_660));
        assert_eq!(scheduler.pending_delays(), vec![Duration::from_millis(100)]);

        scheduler.fire_all();
        assert!(!driver.state().enabled);
    }

    #[test]
    fn stale_disable_job_cuts_newer_rotation() {
        let scheduler = ManualScheduler::default();
        let driver = FakeStepper::default();
        let mut stepper = PulseTrainStepper::new(driver.clone(), scheduler.clone());

        stepper.run(&SIXTY_DEG);
        stepper.run(&SIXTY_DEG);
        assert_eq!(scheduler.pending_delays().len(), 2);

        // The first job disables the driver while the second rotation runs.
        scheduler.fire_next();
        assert!(!driver.state().enabled);
    }
}
