//! Camera transition state machine.
//!
//! Owns the sequencing of the camera between the orbital overview, a focused
//! orbit around one body, and the sky seen from that body's surface:
//!
//! ```text
//! Overview -> EnteringFocus -> FocusedOrbit -> EnteringSurface -> SurfaceSky
//!     ^                                                              |
//!     +------------------------- ExitingSurface <--------------------+
//! ```
//!
//! Commands are queued by the UI and drained once per `step`. Every phase
//! that moves the camera ends on a distance check or an elapsed-time check,
//! so no phase can hang.
//!
//! Entry is a smooth fly-in; exit fades out and teleports back to the pose
//! saved before entry.

use glam::Vec3;
use skyward_engine::{
    CameraPose, Easing, EventQueue, FadeOverlay, FadeState, ease_vec3, lerp_vec3,
};

use crate::bodies::BodyRegistry;
use crate::config::SceneConfig;
use crate::error::SkyError;
use crate::orbit;

/// Direction used for the fly-in when the camera sits exactly on the target.
const FALLBACK_VIEW_DIR: Vec3 = Vec3::new(0.0, 0.34, 0.94);
/// Initial look direction from the surface: north, a little above the horizon.
const SKY_LOOK_DIR: Vec3 = Vec3::new(0.0, 0.34, -0.94);
/// Each hand-off between stages can cost one extra tick.
const HANDOFF_SLACK: f32 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Overview,
    EnteringFocus,
    FocusedOrbit,
    EnteringSurface,
    SurfaceSky,
    ExitingSurface,
}

impl Phase {
    pub fn name(self) -> &'static str {
        match self {
            Phase::Overview => "Overview",
            Phase::EnteringFocus => "EnteringFocus",
            Phase::FocusedOrbit => "FocusedOrbit",
            Phase::EnteringSurface => "EnteringSurface",
            Phase::SurfaceSky => "SurfaceSky",
            Phase::ExitingSurface => "ExitingSurface",
        }
    }

    /// Numeric code for the UI event protocol.
    pub fn code(self) -> u32 {
        match self {
            Phase::Overview => 0,
            Phase::EnteringFocus => 1,
            Phase::FocusedOrbit => 2,
            Phase::EnteringSurface => 3,
            Phase::SurfaceSky => 4,
            Phase::ExitingSurface => 5,
        }
    }

    /// Phases the machine rests in without further steps.
    pub fn is_stable(self) -> bool {
        matches!(self, Phase::Overview | Phase::FocusedOrbit | Phase::SurfaceSky)
    }
}

/// Requests from the UI or input handling.
#[derive(Debug, Clone, PartialEq)]
pub enum TransitionCommand {
    Enter(String),
    Exit,
}

/// Lifecycle signals, each emitted once per accepted request.
#[derive(Debug, Clone, PartialEq)]
pub enum TransitionEvent {
    EnterRequested(String),
    /// The surface-sky scene was mounted for this body.
    EnterCompleted(String),
    ExitRequested,
    ExitCompleted,
}

/// Timing and distances for every transition.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionConfig {
    pub focus_lerp: f32,
    pub arrival_threshold: f32,
    pub focus_distance: f32,
    pub focus_timeout: f32,
    pub approach_duration: f32,
    pub surface_standoff: f32,
    pub fade_in: f32,
    pub fade_hold: f32,
    pub fade_out: f32,
    pub sky_anchor: Vec3,
}

impl TransitionConfig {
    pub fn from_scene(config: &SceneConfig) -> Self {
        Self {
            focus_lerp: config.focus_lerp,
            arrival_threshold: config.arrival_threshold,
            focus_distance: config.focus_distance,
            focus_timeout: config.focus_timeout,
            approach_duration: config.approach_duration,
            surface_standoff: config.surface_standoff,
            fade_in: config.fade_in,
            fade_hold: config.fade_hold,
            fade_out: config.fade_out,
            sky_anchor: config.sky_anchor(),
        }
    }

    /// Upper bound on real seconds spent in `phase` before it completes.
    pub fn max_duration(&self, phase: Phase) -> f32 {
        match phase {
            Phase::EnteringFocus => self.focus_timeout + HANDOFF_SLACK,
            Phase::EnteringSurface => {
                self.approach_duration + self.fade_in + self.fade_hold + self.fade_out + 4.0 * HANDOFF_SLACK
            }
            Phase::ExitingSurface => self.fade_in + HANDOFF_SLACK,
            Phase::Overview | Phase::FocusedOrbit | Phase::SurfaceSky => 0.0,
        }
    }

    /// Camera pose at the surface observer, looking at the horizon.
    pub fn sky_pose(&self) -> CameraPose {
        CameraPose::new(self.sky_anchor, self.sky_anchor + SKY_LOOK_DIR)
    }
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self::from_scene(&SceneConfig::default())
    }
}

/// Per-phase motion state. Replaced wholesale on every phase entry.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Stage {
    Idle,
    /// Fly toward `target + offset` while the pivot closes in on the target.
    Focus { offset: Vec3, start_gap: f32 },
    /// Follow the target around its orbit.
    Track { last: Vec3 },
    /// Eased approach toward the surface, in the target's frame.
    Approach { from: Vec3, to: Vec3 },
    /// Fade to opaque while parked at the standoff point.
    Blackout { rest: Vec3 },
    /// Sky mounted, overlay held opaque.
    Hold { remaining: f32 },
    /// Overlay fading away over the sky scene.
    Reveal,
    /// Overlay ramping to opaque before teleporting back.
    Exit,
}

pub struct CameraTransition {
    config: TransitionConfig,
    phase: Phase,
    stage: Stage,
    target: Option<String>,
    source_pose: Option<CameraPose>,
    /// Body whose sky is mounted, if any.
    observer: Option<String>,
    overview_visible: bool,
    progress: f32,
    elapsed: f32,
    fade: FadeOverlay,
    commands: EventQueue<TransitionCommand>,
}

impl CameraTransition {
    pub fn new(config: TransitionConfig) -> Self {
        Self {
            config,
            phase: Phase::Overview,
            stage: Stage::Idle,
            target: None,
            source_pose: None,
            observer: None,
            overview_visible: true,
            progress: 0.0,
            elapsed: 0.0,
            fade: FadeOverlay::new(),
            commands: EventQueue::new(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn request_enter(&mut self, body: impl Into<String>) {
        self.commands.push(TransitionCommand::Enter(body.into()));
    }

    pub fn request_exit(&mut self) {
        self.commands.push(TransitionCommand::Exit);
    }

    // ── Read-only state for the UI and the scene ─────────────────────

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    pub fn observer(&self) -> Option<&str> {
        self.observer.as_deref()
    }

    pub fn source_pose(&self) -> Option<CameraPose> {
        self.source_pose
    }

    /// Progress through the current phase, 0 on entry.
    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn controls_enabled(&self) -> bool {
        self.phase.is_stable()
    }

    pub fn overview_visible(&self) -> bool {
        self.overview_visible
    }

    pub fn fade_alpha(&self) -> f32 {
        self.fade.alpha()
    }

    pub fn fade_state(&self) -> FadeState {
        self.fade.state()
    }

    pub fn config(&self) -> &TransitionConfig {
        &self.config
    }

    // ── Tick ─────────────────────────────────────────────────────────

    /// Drain pending commands, then advance the camera by one tick.
    /// `t` is the tick's simulated time; every target lookup uses it.
    pub fn step(
        &mut self,
        dt: f32,
        pose: &mut CameraPose,
        bodies: &BodyRegistry,
        t: f64,
    ) -> Vec<TransitionEvent> {
        let mut events = Vec::new();

        for command in self.commands.drain() {
            let result = match command {
                TransitionCommand::Enter(name) => self
                    .accept_enter(&name, pose, bodies, t)
                    .map(|()| TransitionEvent::EnterRequested(name)),
                TransitionCommand::Exit => self.accept_exit().map(|()| TransitionEvent::ExitRequested),
            };
            match result {
                Ok(event) => events.push(event),
                Err(err @ SkyError::InvalidTransitionRequest { .. }) => log::debug!("{err}"),
                Err(err) => log::warn!("{err}"),
            }
        }

        self.fade.tick(dt);
        self.elapsed += dt;

        if let Err(err) = self.advance(dt, pose, bodies, t, &mut events) {
            log::warn!("{err}; leaving {}", self.phase.name());
            if self.accept_exit().is_ok() {
                events.push(TransitionEvent::ExitRequested);
            }
        }
        events
    }

    fn accept_enter(
        &mut self,
        name: &str,
        pose: &CameraPose,
        bodies: &BodyRegistry,
        t: f64,
    ) -> Result<(), SkyError> {
        let target = target_position(bodies, name, t)?;
        match self.phase {
            Phase::Overview => {
                self.source_pose = Some(*pose);
                self.begin_focus(name, pose, target, bodies)
            }
            Phase::FocusedOrbit if self.target.as_deref() == Some(name) => {
                self.begin_surface(name, pose, target, bodies)
            }
            Phase::FocusedOrbit => self.begin_focus(name, pose, target, bodies),
            phase => Err(SkyError::InvalidTransitionRequest {
                command: "enter",
                phase: phase.name(),
            }),
        }
    }

    fn accept_exit(&mut self) -> Result<(), SkyError> {
        match self.phase {
            Phase::EnteringFocus | Phase::FocusedOrbit | Phase::EnteringSurface | Phase::SurfaceSky => {
                self.overview_visible = true;
                self.fade.fade_in(self.config.fade_in);
                self.enter_phase(Phase::ExitingSurface, Stage::Exit);
                Ok(())
            }
            phase => Err(SkyError::InvalidTransitionRequest {
                command: "exit",
                phase: phase.name(),
            }),
        }
    }

    fn begin_focus(
        &mut self,
        name: &str,
        pose: &CameraPose,
        target: Vec3,
        bodies: &BodyRegistry,
    ) -> Result<(), SkyError> {
        let radius = visual_radius(bodies, name)?;
        let dir = (pose.position - target).try_normalize().unwrap_or(FALLBACK_VIEW_DIR);
        let offset = dir * radius * self.config.focus_distance;
        let start_gap = (pose.position - target - offset).length();

        self.target = Some(name.to_string());
        self.enter_phase(Phase::EnteringFocus, Stage::Focus { offset, start_gap });
        Ok(())
    }

    fn begin_surface(
        &mut self,
        name: &str,
        pose: &CameraPose,
        target: Vec3,
        bodies: &BodyRegistry,
    ) -> Result<(), SkyError> {
        let radius = visual_radius(bodies, name)?;
        let from = pose.position - target;
        let dir = from.try_normalize().unwrap_or(FALLBACK_VIEW_DIR);
        let to = dir * radius * self.config.surface_standoff;
        self.enter_phase(Phase::EnteringSurface, Stage::Approach { from, to });
        Ok(())
    }

    fn enter_phase(&mut self, phase: Phase, stage: Stage) {
        if phase != self.phase {
            log::info!("camera: {} -> {}", self.phase.name(), phase.name());
        }
        self.phase = phase;
        self.stage = stage;
        self.progress = 0.0;
        self.elapsed = 0.0;
    }

    fn advance(
        &mut self,
        dt: f32,
        pose: &mut CameraPose,
        bodies: &BodyRegistry,
        t: f64,
        events: &mut Vec<TransitionEvent>,
    ) -> Result<(), SkyError> {
        match self.stage {
            Stage::Idle => {}

            Stage::Focus { offset, start_gap } => {
                let target = self.live_target(bodies, t)?;
                // Interpolate in the target's frame so a moving body is still reached.
                let rel = lerp_vec3(pose.position - target, offset, self.config.focus_lerp);
                let pivot = lerp_vec3(pose.target - target, Vec3::ZERO, self.config.focus_lerp);
                pose.position = target + rel;
                pose.target = target + pivot;

                let gap = (rel - offset).length();
                if start_gap > 0.0 {
                    self.set_progress(1.0 - gap / start_gap);
                }
                if gap < self.config.arrival_threshold || self.elapsed >= self.config.focus_timeout {
                    if gap >= self.config.arrival_threshold {
                        log::debug!("fly-in timed out {gap:.3} from rest, snapping");
                    }
                    pose.position = target + offset;
                    pose.target = target;
                    self.enter_phase(Phase::FocusedOrbit, Stage::Track { last: target });
                }
            }

            Stage::Track { last } => {
                let target = self.live_target(bodies, t)?;
                *pose = pose.translated(target - last);
                pose.target = target;
                self.stage = Stage::Track { last: target };
            }

            Stage::Approach { from, to } => {
                let target = self.live_target(bodies, t)?;
                let k = (self.elapsed / self.config.approach_duration).min(1.0);
                pose.position = target + ease_vec3(from, to, k, Easing::CubicOut);
                pose.target = target;
                self.set_progress(self.elapsed / self.config.max_duration(Phase::EnteringSurface));
                if k >= 1.0 {
                    self.fade.fade_in(self.config.fade_in);
                    self.stage = Stage::Blackout { rest: to };
                }
            }

            Stage::Blackout { rest } => {
                let target = self.live_target(bodies, t)?;
                pose.position = target + rest;
                pose.target = target;
                self.surface_progress();
                if self.fade.is_opaque() {
                    self.mount_sky(pose, events);
                }
            }

            Stage::Hold { remaining } => {
                self.surface_progress();
                let remaining = remaining - dt;
                if remaining <= 0.0 {
                    self.fade.fade_out(self.config.fade_out);
                    self.stage = Stage::Reveal;
                } else {
                    self.stage = Stage::Hold { remaining };
                }
            }

            Stage::Reveal => {
                self.surface_progress();
                if self.fade.is_clear() {
                    self.enter_phase(Phase::SurfaceSky, Stage::Idle);
                }
            }

            Stage::Exit => {
                self.set_progress(self.fade.alpha());
                if self.fade.is_opaque() {
                    self.finish_exit(pose, events);
                }
            }
        }
        Ok(())
    }

    fn mount_sky(&mut self, pose: &mut CameraPose, events: &mut Vec<TransitionEvent>) {
        let Some(name) = self.target.clone() else {
            return;
        };
        self.observer = Some(name.clone());
        self.overview_visible = false;
        *pose = self.config.sky_pose();
        self.stage = Stage::Hold { remaining: self.config.fade_hold };
        log::info!("surface sky mounted on {name}");
        events.push(TransitionEvent::EnterCompleted(name));
    }

    fn finish_exit(&mut self, pose: &mut CameraPose, events: &mut Vec<TransitionEvent>) {
        self.observer = None;
        self.target = None;
        if let Some(source) = self.source_pose.take() {
            *pose = source;
        }
        // The overlay clears on its own after the phase has already ended.
        self.fade.fade_out(self.config.fade_out);
        self.enter_phase(Phase::Overview, Stage::Idle);
        log::info!("returned to overview");
        events.push(TransitionEvent::ExitCompleted);
    }

    fn live_target(&self, bodies: &BodyRegistry, t: f64) -> Result<Vec3, SkyError> {
        let name = self
            .target
            .as_deref()
            .ok_or_else(|| SkyError::NotFound("<no target>".to_string()))?;
        target_position(bodies, name, t)
    }

    fn surface_progress(&mut self) {
        self.set_progress(self.elapsed / self.config.max_duration(Phase::EnteringSurface));
    }

    fn set_progress(&mut self, progress: f32) {
        self.progress = self.progress.max(progress.clamp(0.0, 1.0));
    }
}

impl Default for CameraTransition {
    fn default() -> Self {
        Self::new(TransitionConfig::default())
    }
}

fn target_position(bodies: &BodyRegistry, name: &str, t: f64) -> Result<Vec3, SkyError> {
    orbit::position(bodies, name, t).map(|p| p.as_vec3())
}

fn visual_radius(bodies: &BodyRegistry, name: &str) -> Result<f32, SkyError> {
    bodies
        .get(name)
        .map(|b| b.visual_radius)
        .ok_or_else(|| SkyError::NotFound(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::{Body, BodyKind};

    const DT: f32 = 1.0 / 60.0;

    fn bodies() -> BodyRegistry {
        let mut registry = BodyRegistry::new();
        registry.insert(Body::new("Sun", BodyKind::Star, 0.0, 0.0, 5.0)).unwrap();
        registry.insert(Body::new("Earth", BodyKind::Planet, 22.0, 365.0, 1.3)).unwrap();
        registry.insert(Body::new("Mars", BodyKind::Planet, 30.0, 687.0, 1.0)).unwrap();
        registry
    }

    fn overview_pose() -> CameraPose {
        CameraPose::new(Vec3::new(0.0, 60.0, 120.0), Vec3::ZERO)
    }

    /// Run whole ticks with the clock moving `days_per_step`.
    struct Rig {
        machine: CameraTransition,
        pose: CameraPose,
        bodies: BodyRegistry,
        t: f64,
        days_per_step: f64,
        events: Vec<TransitionEvent>,
    }

    impl Rig {
        fn new(days_per_step: f64) -> Self {
            Self {
                machine: CameraTransition::default(),
                pose: overview_pose(),
                bodies: bodies(),
                t: 0.0,
                days_per_step,
                events: Vec::new(),
            }
        }

        fn step(&mut self) {
            self.t += self.days_per_step;
            let events = self.machine.step(DT, &mut self.pose, &self.bodies, self.t);
            self.events.extend(events);
        }

        fn run(&mut self, seconds: f32) {
            let steps = (seconds / DT).ceil() as usize;
            for _ in 0..steps {
                self.step();
            }
        }

        /// Step until the phase is stable, failing after `limit` seconds.
        fn settle(&mut self, limit: f32) {
            let steps = (limit / DT).ceil() as usize + 2;
            for _ in 0..steps {
                self.step();
                if self.machine.phase().is_stable() {
                    return;
                }
            }
            panic!("stuck in {:?}", self.machine.phase());
        }

        fn to_surface(&mut self, body: &str) {
            self.machine.request_enter(body);
            self.settle(self.machine.config().focus_timeout);
            self.machine.request_enter(body);
            self.settle(self.machine.config().max_duration(Phase::EnteringSurface));
            assert_eq!(self.machine.phase(), Phase::SurfaceSky);
        }
    }

    #[test]
    fn starts_in_overview_with_controls() {
        let machine = CameraTransition::default();
        assert_eq!(machine.phase(), Phase::Overview);
        assert!(machine.controls_enabled());
        assert!(machine.overview_visible());
        assert!(machine.observer().is_none());
    }

    #[test]
    fn enter_mars_reaches_focused_orbit() {
        let mut rig = Rig::new(10.0 / 60.0);
        rig.machine.request_enter("Mars");
        rig.step();
        assert_eq!(rig.machine.phase(), Phase::EnteringFocus);
        assert_eq!(rig.machine.target(), Some("Mars"));
        assert!(!rig.machine.controls_enabled());
        assert_eq!(rig.events, vec![TransitionEvent::EnterRequested("Mars".into())]);

        rig.run(rig.machine.config().focus_timeout + 0.1);
        assert_eq!(rig.machine.phase(), Phase::FocusedOrbit);
        assert!(rig.machine.controls_enabled());

        let mars = orbit::position(&rig.bodies, "Mars", rig.t).unwrap().as_vec3();
        assert!((rig.pose.target - mars).length() < 1e-3);
        let expected = rig.bodies.get("Mars").unwrap().visual_radius * rig.machine.config().focus_distance;
        assert!((rig.pose.distance() - expected).abs() < 0.1);
    }

    #[test]
    fn focus_on_a_still_target_arrives_before_timeout() {
        let mut rig = Rig::new(0.0);
        rig.machine.request_enter("Earth");
        let mut steps = 0;
        while rig.machine.phase() != Phase::FocusedOrbit {
            rig.step();
            steps += 1;
            assert!(steps < 1000);
        }
        assert!((steps as f32) * DT < rig.machine.config().focus_timeout);
    }

    #[test]
    fn focused_orbit_follows_the_moving_target() {
        let mut rig = Rig::new(1.0);
        rig.machine.request_enter("Earth");
        rig.settle(rig.machine.config().focus_timeout);
        let offset = rig.pose.position - rig.pose.target;

        rig.run(1.0);
        let earth = orbit::position(&rig.bodies, "Earth", rig.t).unwrap().as_vec3();
        assert!((rig.pose.target - earth).length() < 1e-3);
        assert!((rig.pose.position - rig.pose.target - offset).length() < 1e-3);
    }

    #[test]
    fn only_enter_is_accepted_from_overview() {
        let mut rig = Rig::new(0.0);
        rig.machine.request_exit();
        rig.step();
        assert_eq!(rig.machine.phase(), Phase::Overview);
        assert!(rig.events.is_empty());
        assert_eq!(rig.pose, overview_pose());
    }

    #[test]
    fn only_exit_is_accepted_from_surface_sky() {
        let mut rig = Rig::new(0.0);
        rig.to_surface("Mars");
        rig.events.clear();

        rig.machine.request_enter("Earth");
        rig.step();
        assert_eq!(rig.machine.phase(), Phase::SurfaceSky);
        assert!(rig.events.is_empty());

        rig.machine.request_exit();
        rig.step();
        assert_eq!(rig.machine.phase(), Phase::ExitingSurface);
        assert_eq!(rig.events, vec![TransitionEvent::ExitRequested]);
    }

    #[test]
    fn enter_while_entering_is_dropped() {
        let mut rig = Rig::new(0.0);
        rig.machine.request_enter("Mars");
        rig.machine.request_enter("Earth");
        rig.step();
        assert_eq!(rig.machine.target(), Some("Mars"));
        assert_eq!(rig.events.len(), 1);

        rig.machine.request_enter("Earth");
        rig.step();
        assert_eq!(rig.machine.phase(), Phase::EnteringFocus);
        assert_eq!(rig.machine.target(), Some("Mars"));
    }

    #[test]
    fn unknown_body_keeps_overview() {
        let mut rig = Rig::new(0.0);
        rig.machine.request_enter("Vulcan");
        rig.step();
        assert_eq!(rig.machine.phase(), Phase::Overview);
        assert!(rig.events.is_empty());
    }

    #[test]
    fn surface_entry_sequence() {
        let mut rig = Rig::new(0.5);
        rig.machine.request_enter("Mars");
        rig.settle(rig.machine.config().focus_timeout);
        rig.events.clear();

        rig.machine.request_enter("Mars");
        rig.step();
        assert_eq!(rig.machine.phase(), Phase::EnteringSurface);
        assert!(!rig.machine.controls_enabled());

        rig.settle(rig.machine.config().max_duration(Phase::EnteringSurface));
        assert_eq!(rig.machine.phase(), Phase::SurfaceSky);
        assert!(rig.machine.controls_enabled());
        assert_eq!(rig.machine.observer(), Some("Mars"));
        assert!(!rig.machine.overview_visible());
        assert_eq!(rig.machine.fade_state(), FadeState::Clear);
        assert_eq!(rig.pose, rig.machine.config().sky_pose());
        assert_eq!(
            rig.events,
            vec![
                TransitionEvent::EnterRequested("Mars".into()),
                TransitionEvent::EnterCompleted("Mars".into()),
            ]
        );
    }

    #[test]
    fn sky_mounts_only_once_fully_opaque() {
        let mut rig = Rig::new(0.0);
        rig.machine.request_enter("Earth");
        rig.settle(rig.machine.config().focus_timeout);
        rig.machine.request_enter("Earth");
        loop {
            rig.step();
            if rig.machine.observer().is_some() {
                assert_eq!(rig.machine.fade_alpha(), 1.0);
                break;
            }
            assert!(rig.machine.fade_alpha() < 1.0 || rig.machine.fade_state() == FadeState::Opaque);
        }
    }

    #[test]
    fn exit_teleports_back_to_saved_pose() {
        let mut rig = Rig::new(0.25);
        rig.to_surface("Earth");
        rig.events.clear();

        rig.machine.request_exit();
        rig.step();
        // Overview shows immediately while the overlay is still ramping.
        assert!(rig.machine.overview_visible());
        assert!(rig.machine.fade_alpha() < 1.0);
        assert_eq!(rig.machine.observer(), Some("Earth"));

        rig.settle(rig.machine.config().max_duration(Phase::ExitingSurface));
        assert_eq!(rig.machine.phase(), Phase::Overview);
        assert_eq!(rig.pose, overview_pose());
        assert!(rig.machine.observer().is_none());
        assert!(rig.machine.target().is_none());
        assert_eq!(
            rig.events,
            vec![TransitionEvent::ExitRequested, TransitionEvent::ExitCompleted]
        );

        // The overlay fades away after the phase has ended.
        assert_eq!(rig.machine.fade_state(), FadeState::FadingOut);
        rig.run(rig.machine.config().fade_out + 0.1);
        assert_eq!(rig.machine.fade_state(), FadeState::Clear);
    }

    #[test]
    fn exit_preempts_surface_approach() {
        let mut rig = Rig::new(0.0);
        rig.machine.request_enter("Mars");
        rig.settle(rig.machine.config().focus_timeout);
        rig.machine.request_enter("Mars");
        rig.run(0.5);
        assert_eq!(rig.machine.phase(), Phase::EnteringSurface);

        rig.machine.request_exit();
        rig.step();
        assert_eq!(rig.machine.phase(), Phase::ExitingSurface);
        assert!(rig.machine.progress() < 0.5);

        rig.settle(rig.machine.config().max_duration(Phase::ExitingSurface));
        assert_eq!(rig.machine.phase(), Phase::Overview);
        assert_eq!(rig.pose, overview_pose());
        assert!(!rig.events.contains(&TransitionEvent::EnterCompleted("Mars".into())));
    }

    #[test]
    fn exit_preempts_fly_in() {
        let mut rig = Rig::new(0.0);
        rig.machine.request_enter("Mars");
        rig.run(0.2);
        assert_eq!(rig.machine.phase(), Phase::EnteringFocus);

        rig.machine.request_exit();
        rig.settle(rig.machine.config().max_duration(Phase::ExitingSurface) + DT);
        assert_eq!(rig.machine.phase(), Phase::Overview);
        assert_eq!(rig.pose, overview_pose());
    }

    #[test]
    fn refocus_keeps_the_original_source_pose() {
        let mut rig = Rig::new(0.0);
        rig.machine.request_enter("Mars");
        rig.settle(rig.machine.config().focus_timeout);
        rig.machine.request_enter("Earth");
        rig.step();
        assert_eq!(rig.machine.phase(), Phase::EnteringFocus);
        assert_eq!(rig.machine.target(), Some("Earth"));
        assert_eq!(rig.machine.source_pose(), Some(overview_pose()));
    }

    #[test]
    fn every_phase_finishes_within_its_max_duration() {
        let mut rig = Rig::new(2.0);
        let config = rig.machine.config().clone();

        rig.machine.request_enter("Mars");
        rig.step();
        rig.settle(config.max_duration(Phase::EnteringFocus));

        rig.machine.request_enter("Mars");
        rig.step();
        rig.settle(config.max_duration(Phase::EnteringSurface));

        rig.machine.request_exit();
        rig.step();
        rig.settle(config.max_duration(Phase::ExitingSurface));
        assert_eq!(rig.machine.phase(), Phase::Overview);
    }

    #[test]
    fn progress_resets_on_phase_entry_and_never_decreases() {
        let mut rig = Rig::new(0.0);
        rig.machine.request_enter("Mars");
        rig.step();
        let mut last = 0.0;
        while rig.machine.phase() == Phase::EnteringFocus {
            assert!(rig.machine.progress() >= last);
            last = rig.machine.progress();
            rig.step();
        }
        assert_eq!(rig.machine.phase(), Phase::FocusedOrbit);
        assert_eq!(rig.machine.progress(), 0.0);
    }
}
