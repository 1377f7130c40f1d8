// Sensor Sketches — Delays & Deferred Work
//
// Blocking delays for actions that must hold the polling task, plus a
// one-shot scheduler for work that outlives the call (motor auto-disable).

use std::hint;
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

use crate::config::STACK_MOTOR_DISABLE;

// ---------------------------------------------------------------------------
// Clock
// ---------------------------------------------------------------------------
pub trait Clock {
    /// Block the calling task; may yield to the scheduler.
    fn sleep_ms(&mut self, ms: u32);

    /// Block for a short, precise interval without yielding.
    fn wait_us(&mut self, us: u32);
}

/// Monotonic clock backed by `std` (FreeRTOS ticks under ESP-IDF).
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn sleep_ms(&mut self, ms: u32) {
        thread::sleep(Duration::from_millis(ms as u64));
    }

    fn wait_us(&mut self, us: u32) {
        // Sub-tick interval: a yielding sleep would round up to a full tick.
        let deadline = Instant::now() + Duration::from_micros(us as u64);
        while Instant::now() < deadline {
            hint::spin_loop();
        }
    }
}

// ---------------------------------------------------------------------------
// Scheduler
// ---------------------------------------------------------------------------
pub type Job = Box<dyn FnOnce() + Send + 'static>;

pub trait Scheduler {
    /// Run `job` once, `delay` from now, detached from the caller.
    /// Pending jobs cannot be cancelled.
    fn schedule(&mut self, delay: Duration, job: Job);
}

/// Spawns one short-lived task per job.
#[derive(Debug, Clone)]
pub struct ThreadScheduler {
    name: &'static str,
    stack_size: usize,
}

impl ThreadScheduler {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            stack_size: STACK_MOTOR_DISABLE,
        }
    }

    pub fn with_stack_size(mut self, stack_size: usize) -> Self {
        self.stack_size = stack_size;
        self
    }
}

impl Scheduler for ThreadScheduler {
    /// If the task cannot be spawned the job still runs, on the calling
    /// thread after `delay`.
    fn schedule(&mut self, delay: Duration, job: Job) {
        // `spawn` consumes its closure even on failure; keep the job reachable.
        let slot = Arc::new(Mutex::new(Some(job)));
        let task_slot = Arc::clone(&slot);

        let spawned = thread::Builder::new()
            .name(self.name.into())
            .stack_size(self.stack_size)
            .spawn(move || {
                thread::sleep(delay);
                let job = task_slot.lock().unwrap_or_else(PoisonError::into_inner).take();
                if let Some(job) = job {
                    job();
                }
            });

        if let Err(e) = spawned {
            log::error!("Failed to spawn '{}' task: {}; running inline", self.name, e);
            let job = slot.lock().unwrap_or_else(PoisonError::into_inner).take();
            if let Some(job) = job {
                thread::sleep(delay);
                job();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn wait_us_blocks_at_least_requested_time() {
        let mut clock = SystemClock;
        let start = Instant::now();
        clock.wait_us(2_000);
        assert!(start.elapsed() >= Duration::from_micros(2_000));
    }

    #[test]
    fn thread_scheduler_runs_job_after_delay() {
        let (tx, rx) = mpsc::channel();
        let mut scheduler = ThreadScheduler::new("test_job").with_stack_size(64 * 1024);
        let start = Instant::now();
        scheduler.schedule(
            Duration::from_millis(20),
            Box::new(move || {
                let _ = tx.send(start.elapsed());
            }),
        );

        let elapsed = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(elapsed >= Duration::from_millis(20));
    }

    #[test]
    fn job_still_runs_when_task_cannot_spawn() {
        let (tx, rx) = mpsc::channel();
        // No allocator can satisfy this stack, so the spawn fails.
        let mut scheduler = ThreadScheduler::new("huge_stack").with_stack_size(usize::MAX / 2);
        let start = Instant::now();
        scheduler.schedule(
            Duration::from_millis(20),
            Box::new(move || {
                let _ = tx.send(start.elapsed());
            }),
        );

        let elapsed = rx
            .recv_timeout(Duration::from_secs(5))
            .expect("disable job was dropped");
        assert!(elapsed >= Duration::from_millis(20));
    }
}
