//! Cooperative tick-driven scheduler.
//!
//! The original drove its algorithms by rescheduling a timer callback from
//! inside the previous callback; here an explicit scheduler holds the active
//! driver and forwards exactly one `step` per external tick. The scheduler
//! never sleeps itself — callers consult [`Scheduler::delay`] and time their
//! ticks however they like, which keeps `step` unit-testable without fake
//! timers.
//!
//! Single-threaded by construction: no two steps ever overlap, `pause` takes
//! effect at the next tick boundary (an in-flight step always completes),
//! and `reset` discards the run entirely.

use std::time::Duration;

use super::{Driver, RunContext, StartError, StepError, StepEvent, StepResult};
use crate::drivers;
use crate::graph::Graph;

/// What one tick did.
#[derive(Clone, Debug, PartialEq)]
pub enum Tick {
    /// One step executed; the run continues.
    Stepped(Vec<StepEvent>),
    /// The final step executed; the run is complete.
    Finished(Vec<StepEvent>),
    /// Paused; the driver was not touched.
    Paused,
    /// No active run (none started, finished earlier, or reset).
    Idle,
}

/// Owns the active driver and the pause flag for one graph.
pub struct Scheduler<'g> {
    graph: &'g Graph,
    driver: Option<Box<dyn Driver + 'g>>,
    paused: bool,
    finished: bool,
    delay: Duration,
}

impl<'g> Scheduler<'g> {
    pub fn new(graph: &'g Graph) -> Self {
        Self {
            graph,
            driver: None,
            paused: false,
            finished: false,
            delay: Duration::from_millis(50),
        }
    }

    /// Validate the context, install the driver, and return its initial
    /// events. Fails with `RunActive` while a run is in progress; a finished
    /// run may be replaced without an explicit reset.
    pub fn start(&mut self, ctx: &RunContext) -> Result<Vec<StepEvent>, StartError> {
        if self.is_active() {
            return Err(StartError::RunActive);
        }
        let (driver, events) = drivers::start(self.graph, ctx)?;
        self.driver = Some(driver);
        self.paused = false;
        self.finished = false;
        self.delay = Duration::from_millis(ctx.delay_ms);
        Ok(events)
    }

    /// Run one tick: forward a single `step` unless paused, idle, or already
    /// finished. A done driver is never stepped again, so `AlreadyDone` can
    /// only be provoked by bypassing the scheduler.
    pub fn tick(&mut self) -> Result<Tick, StepError> {
        if self.paused {
            return Ok(Tick::Paused);
        }
        if self.finished {
            return Ok(Tick::Idle);
        }
        let Some(driver) = self.driver.as_mut() else {
            return Ok(Tick::Idle);
        };
        match driver.step() {
            Ok(StepResult::Continue(events)) => Ok(Tick::Stepped(events)),
            Ok(StepResult::Done(events)) => {
                self.finished = true;
                Ok(Tick::Finished(events))
            }
            Err(err) => {
                // A failed run stops scheduling further ticks.
                self.finished = true;
                Err(err)
            }
        }
    }

    /// Checked at the top of the next tick; the in-flight step, if any,
    /// always completes first.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Clear the pause flag; the caller should tick again immediately.
    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Discard the run context, frontier, and visitation state entirely.
    pub fn reset(&mut self) {
        self.driver = None;
        self.paused = false;
        self.finished = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// A run is active from `start` until its final step (or a reset).
    pub fn is_active(&self) -> bool {
        self.driver.is_some() && !self.finished
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Configured delay between ticks, for the external timer.
    pub fn delay(&self) -> Duration {
        self.delay
    }
}
