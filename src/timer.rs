use std::time::Instant;

/// Default upper bound on one simulation step, in seconds.
pub const DEFAULT_MAX_STEP: f64 = 0.05;

/// Turns wall-clock time between frames into a clamped simulation step.
///
/// A long pause (window hidden, debugger break) would otherwise hand the
/// game one enormous step. Every step is capped at `max_step` and the capped
/// steps are summed into `game_time`.
#[derive(Debug, Clone)]
pub struct Timer {
    game_time: f64,
    max_step: f64,
    last_tick: Option<Instant>,
}

impl Timer {
    pub fn new() -> Self {
        Self::with_max_step(DEFAULT_MAX_STEP)
    }

    pub fn with_max_step(max_step: f64) -> Self {
        Timer {
            game_time: 0.0,
            max_step,
            last_tick: None,
        }
    }

    /// Measure the wall time since the previous tick and advance by it.
    ///
    /// The very first tick has no reference point and yields `max_step`.
    pub fn tick(&mut self) -> f64 {
        let now = Instant::now();
        let wall_delta = match self.last_tick {
            Some(previous) => now.duration_since(previous).as_secs_f64(),
            None => f64::INFINITY,
        };
        self.last_tick = Some(now);
        self.advance(wall_delta)
    }

    /// Advance by an explicit wall delta (seconds). Returns the clamped step.
    pub fn advance(&mut self, wall_delta: f64) -> f64 {
        let step = wall_delta.clamp(0.0, self.max_step);
        self.game_time += step;
        step
    }

    /// Total simulated seconds.
    pub fn game_time(&self) -> f64 {
        self.game_time
    }

    pub fn max_step(&self) -> f64 {
        self.max_step
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}
