/// Fixed timestep accumulator.
/// Ensures simulation ticks run at a consistent rate regardless of frame time.
pub struct FixedTimestep {
    /// The fixed delta time per tick.
    dt: f32,
    /// Accumulated time from variable frame deltas.
    accumulator: f32,
    /// Upper bound on ticks per frame.
    max_steps: u32,
}

impl FixedTimestep {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
            max_steps: 10,
        }
    }

    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps.max(1);
        self
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.max(0.0);
        // Cap to prevent spiral of death
        self.accumulator = self.accumulator.min(self.dt * self.max_steps as f32);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    /// Interpolation alpha for rendering between ticks (0.0 to 1.0).
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.dt
    }

    /// The fixed delta time.
    pub fn dt(&self) -> f32 {
        self.dt
    }
}

/// Pausable simulation clock.
///
/// Holds a single scalar of simulated time, advanced once per tick by
/// `real_dt × time_scale`. Every consumer reads the same value for the whole
/// tick, so positions derived from it never disagree within a frame.
/// f64 because long runs at high time scales accumulate large values.
#[derive(Debug, Clone, PartialEq)]
pub struct SimClock {
    time: f64,
    time_scale: f64,
    paused: bool,
}

impl SimClock {
    pub fn new(start: f64, time_scale: f64) -> Self {
        Self {
            time: start,
            time_scale,
            paused: false,
        }
    }

    /// Advance by one tick of real time. Returns the new simulated time.
    pub fn advance(&mut self, real_dt: f32) -> f64 {
        if !self.paused {
            self.time += real_dt as f64 * self.time_scale;
        }
        self.time
    }

    /// Current simulated time.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Jump to an absolute simulated time. Non-finite values are ignored.
    pub fn set_time(&mut self, time: f64) {
        if time.is_finite() {
            self.time = time;
        } else {
            log::warn!("SimClock: ignoring non-finite time {time}");
        }
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    /// Set simulated units per real second. Non-finite values are ignored.
    pub fn set_time_scale(&mut self, time_scale: f64) {
        if time_scale.is_finite() {
            self.time_scale = time_scale;
        } else {
            log::warn!("SimClock: ignoring non-finite time scale {time_scale}");
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new(0.0, 1.0)
    }
}
