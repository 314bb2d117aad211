// extensions/fade.rs
//
// Full-screen fade overlay: a single tweened alpha with a settled state.
// Owned by whoever sequences scene switches; the UI only reads `alpha()`.
//
// Usage:
//   let mut fade = FadeOverlay::new();
//   fade.fade_in(0.6);
//   if fade.tick(dt) == Some(FadeState::Opaque) { /* swap scenes */ }

use super::easing::{Easing, ease};

/// Where the overlay currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FadeState {
    /// Fully transparent, nothing ramping.
    #[default]
    Clear,
    /// Ramping toward opaque.
    FadingIn,
    /// Fully opaque, held until `fade_out`.
    Opaque,
    /// Ramping toward transparent.
    FadingOut,
}

#[derive(Debug, Clone)]
pub struct FadeOverlay {
    alpha: f32,
    from: f32,
    to: f32,
    duration: f32,
    elapsed: f32,
    easing: Easing,
    state: FadeState,
}

impl FadeOverlay {
    pub fn new() -> Self {
        Self {
            alpha: 0.0,
            from: 0.0,
            to: 0.0,
            duration: 0.0,
            elapsed: 0.0,
            easing: Easing::SineInOut,
            state: FadeState::Clear,
        }
    }

    /// Start ramping to opaque from the current alpha.
    /// `duration` is the time for a full 0→1 ramp; a partial ramp takes proportionally less.
    pub fn fade_in(&mut self, duration: f32) {
        if self.state == FadeState::Opaque {
            return;
        }
        self.start(1.0, duration, FadeState::FadingIn);
    }

    /// Start ramping to transparent from the current alpha.
    pub fn fade_out(&mut self, duration: f32) {
        if self.state == FadeState::Clear {
            return;
        }
        self.start(0.0, duration, FadeState::FadingOut);
    }

    fn start(&mut self, to: f32, duration: f32, state: FadeState) {
        self.from = self.alpha;
        self.to = to;
        self.duration = duration.max(0.0) * (to - self.alpha).abs();
        self.elapsed = 0.0;
        self.state = state;
    }

    /// Advance the ramp. Returns the settled state on the tick a ramp finishes.
    pub fn tick(&mut self, dt: f32) -> Option<FadeState> {
        if !matches!(self.state, FadeState::FadingIn | FadeState::FadingOut) {
            return None;
        }

        self.elapsed += dt;
        let t = if self.duration > 0.0 {
            self.elapsed / self.duration
        } else {
            1.0
        };

        if t >= 1.0 {
            self.alpha = self.to;
            self.state = if self.to >= 1.0 {
                FadeState::Opaque
            } else {
                FadeState::Clear
            };
            return Some(self.state);
        }

        self.alpha = ease(self.from, self.to, t, self.easing);
        None
    }

    /// Current overlay opacity in [0, 1].
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn state(&self) -> FadeState {
        self.state
    }

    pub fn is_opaque(&self) -> bool {
        self.state == FadeState::Opaque
    }

    pub fn is_clear(&self) -> bool {
        self.state == FadeState::Clear
    }

    /// Drop any ramp and go fully transparent immediately.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for FadeOverlay {
    fn default() -> Self {
        Self::new()
    }
}
