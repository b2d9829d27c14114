//! Fixed-timestep simulation clock
//!
//! Wall-clock frame time is fed into an accumulator and drained in whole
//! logic steps of `1 / tick_rate` seconds. The accumulator is kept in
//! integer units (nanoseconds scaled by the tick rate) so a step boundary
//! never drifts: after any sequence of frames totalling `T` nanoseconds the
//! number of steps taken is exactly `floor(T * tick_rate / 1e9)` when no
//! frame hit the clamp.

use crate::config::ClockConfig;
use std::time::Duration;
use tracing::debug;

/// Accumulator units consumed by one step
const STEP_UNITS: u64 = 1_000_000_000;

/// Largest `f32` below 1
const MAX_ALPHA: f32 = 1.0 - f32::EPSILON / 2.0;

/// Handle for a pending frame callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameRequest(pub u64);

/// Host-side frame callback source (a window's redraw request, a timer, ...)
pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameRequest;
    fn cancel_frame(&mut self, request: FrameRequest);
}

/// Receives logic steps and render calls from the clock
pub trait FixedStepHandler {
    /// Advance the simulation by exactly `dt` seconds
    fn update(&mut self, dt: f32);
    /// Draw, interpolating `alpha` of the way from the previous to the current step
    fn render(&mut self, alpha: f32);
}

/// Outcome of feeding one frame into the clock
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameAdvance {
    /// Logic steps to run this frame
    pub steps: u32,
    /// Step length in seconds
    pub dt: f32,
    /// Leftover fraction of a step, in `[0, 1)`
    pub alpha: f32,
}

/// Frames and steps per wall-clock second
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClockStats {
    /// Frames rendered during the last complete second
    pub fps: u32,
    /// Logic steps run during the last complete second
    pub ups: u32,
    frames: u32,
    steps: u32,
    window_start: Duration,
}

impl ClockStats {
    fn reset(&mut self, now: Duration) {
        *self = ClockStats {
            window_start: now,
            ..Default::default()
        };
    }

    fn record(&mut self, now: Duration, steps: u32) {
        self.frames += 1;
        self.steps += steps;
        if now.saturating_sub(self.window_start) >= Duration::from_secs(1) {
            self.fps = self.frames;
            self.ups = self.steps;
            self.frames = 0;
            self.steps = 0;
            self.window_start = now;
        }
    }
}

/// Accumulator-driven fixed-timestep clock
#[derive(Debug, Clone)]
pub struct SimulationClock {
    tick_rate: u32,
    max_frame: Duration,
    accumulator: u64,
    previous: Option<Duration>,
    running: bool,
    pending: Option<FrameRequest>,
    total_steps: u64,
    stats: ClockStats,
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::from_config(&ClockConfig::default())
    }
}

impl SimulationClock {
    /// Create a clock. A zero tick rate is treated as 1.
    pub fn new(tick_rate: u32, max_frame: Duration) -> Self {
        Self {
            tick_rate: tick_rate.max(1),
            max_frame,
            accumulator: 0,
            previous: None,
            running: false,
            pending: None,
            total_steps: 0,
            stats: ClockStats::default(),
        }
    }

    pub fn from_config(config: &ClockConfig) -> Self {
        Self::new(config.tick_rate, config.max_frame())
    }

    pub fn tick_rate(&self) -> u32 {
        self.tick_rate
    }

    /// Step length in seconds
    pub fn dt(&self) -> f32 {
        1.0 / self.tick_rate as f32
    }

    pub fn step_duration(&self) -> Duration {
        Duration::from_nanos(STEP_UNITS / self.tick_rate as u64)
    }

    pub fn max_frame(&self) -> Duration {
        self.max_frame
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Leftover fraction of a step, in `[0, 1)`
    pub fn alpha(&self) -> f32 {
        ((self.accumulator as f64 / STEP_UNITS as f64) as f32).min(MAX_ALPHA)
    }

    /// Steps taken since the clock was created
    pub fn total_steps(&self) -> u64 {
        self.total_steps
    }

    pub fn stats(&self) -> ClockStats {
        self.stats
    }

    /// The frame callback currently requested from the scheduler
    pub fn pending_request(&self) -> Option<FrameRequest> {
        self.pending
    }

    /// Start requesting frames. Does nothing if already running.
    pub fn start(&mut self, now: Duration, scheduler: &mut dyn FrameScheduler) {
        if self.running {
            return;
        }
        self.running = true;
        self.accumulator = 0;
        self.previous = Some(now);
        self.stats.reset(now);
        self.pending = Some(scheduler.request_frame());
        debug!("Simulation clock started at {} Hz", self.tick_rate);
    }

    /// Stop and cancel the pending frame request. Does nothing if stopped.
    pub fn stop(&mut self, scheduler: &mut dyn FrameScheduler) {
        if !self.running {
            return;
        }
        self.running = false;
        if let Some(request) = self.pending.take() {
            scheduler.cancel_frame(request);
        }
        debug!("Simulation clock stopped after {} steps", self.total_steps);
    }

    /// Feed the wall-clock time of a new frame and count the steps it owes.
    ///
    /// Frame time is `now - previous`, saturating at zero and clamped to the
    /// maximum frame length.
    pub fn advance(&mut self, now: Duration) -> FrameAdvance {
        let previous = self.previous.unwrap_or(now);
        let frame = now.saturating_sub(previous).min(self.max_frame);
        self.previous = Some(now);

        let nanos = u64::try_from(frame.as_nanos()).unwrap_or(u64::MAX);
        self.accumulator = self
            .accumulator
            .saturating_add(nanos.saturating_mul(self.tick_rate as u64));

        let steps = self.accumulator / STEP_UNITS;
        self.accumulator %= STEP_UNITS;
        let steps = u32::try_from(steps).unwrap_or(u32::MAX);
        self.total_steps += steps as u64;
        self.stats.record(now, steps);

        FrameAdvance {
            steps,
            dt: self.dt(),
            alpha: self.alpha(),
        }
    }

    /// Run one frame callback: every owed logic step in order, then a single
    /// render, then request the next frame. Ignored while stopped.
    pub fn on_frame(
        &mut self,
        now: Duration,
        scheduler: &mut dyn FrameScheduler,
        handler: &mut dyn FixedStepHandler,
    ) -> FrameAdvance {
        if !self.running {
            return FrameAdvance::default();
        }
        self.pending = None;

        let advance = self.advance(now);
        for _ in 0..advance.steps {
            handler.update(advance.dt);
        }
        handler.render(advance.alpha);

        if self.running {
            self.pending = Some(scheduler.request_frame());
        }
        advance
    }
}
