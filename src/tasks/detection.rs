// Sensor Sketches — Detection Task
//
// Samples the sensor once per poll interval and feeds the trigger controller.
// Blocking actions run inside the tick, so no sampling happens while an
// alert or bit-banged rotation is in progress.

use std::thread;
use std::time::{Duration, Instant};

use crate::events::TickOutcome;
use crate::input::{Sensor, SensorInput};
use crate::tasks::monitor::presence_label;
use crate::trigger::{ActionTrigger, Qualify, TriggerController};

/// Under `Level` each poll is a detection, so the presence line is the
/// progress report.
pub fn presence_level(qualify: Qualify) -> log::Level {
    match qualify {
        Qualify::Level => log::Level::Info,
        Qualify::RisingEdge => log::Level::Debug,
    }
}

/// One poll: sample, then tick the controller.
pub fn poll_once<P, A>(sensor: &mut Sensor<P>, controller: &mut TriggerController<A>) -> TickOutcome
where
    P: SensorInput,
    A: ActionTrigger,
{
    let active = sensor.is_active();
    log::log!(presence_level(controller.config().qualify), "{}", presence_label(active));
    controller.tick(active)
}

pub fn detection_task<P, A>(
    mut sensor: Sensor<P>,
    mut controller: TriggerController<A>,
    poll_interval: Duration,
) -> !
where
    P: SensorInput,
    A: ActionTrigger,
{
    log::info!("Detection task started (poll every {} ms)", poll_interval.as_millis());

    loop {
        let tick_start = Instant::now();

        if let TickOutcome::Triggered { completion, .. } = poll_once(&mut sensor, &mut controller) {
            log::info!("Trigger complete: {:?}", completion);
        }

        // Sleep for the remainder of the interval to keep a steady poll rate.
        let elapsed = tick_start.elapsed();
        if elapsed < poll_interval {
            thread::sleep(poll_interval - elapsed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{RecordingAction, ScriptedPin};
    use crate::trigger::{ResetPolicy, TriggerConfig};
    use std::num::NonZeroU32;

    #[test]
    fn active_low_pin_drives_controller() {
        // HIGH = clear, LOW = obstacle. Three separate obstacles.
        let levels = [true, false, true, false, false, true, false, true];
        let mut sensor = Sensor::active_low(ScriptedPin::new(&levels, true));
        let mut controller = TriggerController::new(
            TriggerConfig {
                threshold: NonZeroU32::new(3).unwrap(),
                qualify: Qualify::RisingEdge,
                reset: ResetPolicy::AfterAction,
            },
            RecordingAction::default(),
            "alert",
        );

        let outcomes: Vec<TickOutcome> = (0..levels.len())
            .map(|_| poll_once(&mut sensor, &mut controller))
            .collect();

        let triggered = outcomes
            .iter()
            .filter(|o| matches!(o, TickOutcome::Triggered { .. }))
            .count();
        assert_eq!(triggered, 1);
        assert!(matches!(outcomes[6], TickOutcome::Triggered { count: 3, .. }));
        assert_eq!(controller.count(), 0);
    }

    #[test]
    fn presence_is_reported_for_level_sketches() {
        assert_eq!(presence_level(Qualify::Level), log::Level::Info);
        assert_eq!(presence_level(Qualify::RisingEdge), log::Level::Debug);
    }
}
