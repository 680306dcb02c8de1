// Fixed-rate refresh loop.
// Each iteration: poll input, run one tick, then wait out the rest of the
// interval. The phase is the run flag: once Stopped, nothing else runs.

use std::time::{Duration, Instant};

use crate::camera::CaptureSource;
use crate::config::FRAME_INTERVAL;
use crate::display::{DisplaySurface, SurfaceInput};
use crate::pipeline::{Pipeline, Tick};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Stopped,
}

/// Waits between ticks.
pub trait Pacer {
    fn wait(&mut self, remaining: Duration);
}

/// Sleeps the calling thread.
pub struct ThreadPacer;

impl Pacer for ThreadPacer {
    fn wait(&mut self, remaining: Duration) {
        if !remaining.is_zero() {
            std::thread::sleep(remaining);
        }
    }
}

pub struct RefreshScheduler {
    phase: Phase,
    interval: Duration,
}

impl Default for RefreshScheduler {
    fn default() -> Self {
        Self::new(FRAME_INTERVAL)
    }
}

impl RefreshScheduler {
    pub fn new(interval: Duration) -> Self {
        Self { phase: Phase::Idle, interval }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// True while another tick will be scheduled.
    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    /// Idle -> Running, then run the first tick right away.
    /// Starting twice, or after a stop, does nothing.
    pub fn start<C, S>(&mut self, pipeline: &mut Pipeline<C, S>) -> Tick
    where
        C: CaptureSource,
        S: DisplaySurface,
    {
        if self.phase != Phase::Idle {
            return Tick::Stopped;
        }
        self.phase = Phase::Running;
        self.tick(pipeline)
    }

    /// One tick, only while Running.
    pub fn tick<C, S>(&mut self, pipeline: &mut Pipeline<C, S>) -> Tick
    where
        C: CaptureSource,
        S: DisplaySurface,
    {
        if !self.is_running() {
            return Tick::Stopped;
        }
        pipeline.process()
    }

    /// Enter the terminal phase. Later calls change nothing.
    pub fn stop(&mut self) {
        if self.phase != Phase::Stopped {
            log::debug!("scheduler stopped");
        }
        self.phase = Phase::Stopped;
    }

    /// Keep ticking until the window asks to quit or someone stops us.
    /// The first tick is expected to have happened in `start`. A quit request
    /// only ends the loop; the owner decides when to `stop`.
    pub fn run<C, S, P>(&mut self, pipeline: &mut Pipeline<C, S>, pacer: &mut P) -> SurfaceInput
    where
        C: CaptureSource,
        S: DisplaySurface,
        P: Pacer,
    {
        let mut last = Instant::now();
        while self.is_running() {
            pacer.wait(self.interval.saturating_sub(last.elapsed()));
            last = Instant::now();

            if pipeline.surface.pump_events() == SurfaceInput::Shutdown {
                return SurfaceInput::Shutdown;
            }
            self.tick(pipeline);
        }
        SurfaceInput::Continue
    }
}
