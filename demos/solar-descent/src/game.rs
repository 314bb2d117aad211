//! Solar Descent: orbital overview with a smooth descent to the sky seen
//! from a planet's surface, and back.
//!
//! Tick order: input → clock → body placement → camera transition →
//! scene visibility and sky → UI events.

use glam::{DVec3, Vec2, Vec3};
use skyward_engine::systems::picking;
use skyward_engine::*;

use crate::bodies::{BodyKind, BodyRegistry};
use crate::catalog::{self, StarCatalog};
use crate::config::SceneConfig;
use crate::orbit;
use crate::sky;
use crate::transition::{CameraTransition, Phase, TransitionConfig, TransitionEvent};

// ── Custom event kinds from the UI ───────────────────────────────────

const CUSTOM_SET_TIME: u32 = 1;
const CUSTOM_SET_SPEED: u32 = 2;
const CUSTOM_TOGGLE_PAUSE: u32 = 3;
/// a = body index, or -1 for the current selection.
const CUSTOM_ENTER: u32 = 4;
const CUSTOM_EXIT: u32 = 5;
/// a = direction (+1 zoom in, -1 zoom out).
const CUSTOM_ZOOM: u32 = 6;
/// Viewport resize (sent by worker as kind=99).
const CUSTOM_RESIZE: u32 = 99;

const KEY_ESCAPE: u32 = 27;

// ── Game event kinds to the UI ───────────────────────────────────────

/// a = simulated time, b = time scale, c = paused.
const EVENT_TIME_INFO: f32 = 1.0;
/// a = phase code, b = controls enabled, c = phase progress.
const EVENT_PHASE: f32 = 2.0;
/// a = fade alpha, b = overview visible, c = observer index or -1.
const EVENT_SCENE: f32 = 3.0;
/// a = selected index or -1, b = distance from the star, c = focused index or -1.
const EVENT_SELECTION: f32 = 4.0;
/// a = body index, b = azimuth, c = altitude (degrees). One per sky object.
const EVENT_SKY_OBJECT: f32 = 5.0;
const EVENT_ENTER_REQUESTED: f32 = 10.0;
const EVENT_ENTER_COMPLETED: f32 = 11.0;
const EVENT_EXIT_REQUESTED: f32 = 12.0;
const EVENT_EXIT_COMPLETED: f32 = 13.0;

// ── Render kinds ─────────────────────────────────────────────────────

const KIND_STAR: u32 = 0;
const KIND_PLANET: u32 = 1;
const KIND_MOON: u32 = 2;
const KIND_SKY_BODY: u32 = 3;
const KIND_CATALOG_STAR: u32 = 4;
const KIND_BACKGROUND_STAR: u32 = 5;

const LINE_ORBIT: u32 = 0;
const LINE_CONSTELLATION: u32 = 1;

// ── Layout ───────────────────────────────────────────────────────────

const ORBIT_SAMPLES: usize = 96;
const ORBIT_ALPHA: f32 = 0.25;
const CONSTELLATION_ALPHA: f32 = 0.45;
/// Bodies sit just inside the star sphere so they draw in front of it.
const SKY_BODY_SHELL: f32 = 0.9;
const SKY_SUN_RADIUS: f32 = 12.0;

/// Pointer travel in pixels before a click becomes a drag.
const DRAG_THRESHOLD: f32 = 5.0;
/// Multiplicative zoom per scroll tick.
const ZOOM_STEP: f32 = 1.1;

/// Apparent size on the sky dome for a catalog magnitude.
fn star_size(magnitude: f32) -> f32 {
    (2.4 - 0.35 * magnitude).max(0.4)
}

fn body_kind_code(kind: BodyKind) -> u32 {
    match kind {
        BodyKind::Star => KIND_STAR,
        BodyKind::Planet | BodyKind::DwarfPlanet => KIND_PLANET,
        BodyKind::Moon => KIND_MOON,
    }
}

fn flag(value: bool) -> f32 {
    if value { 1.0 } else { 0.0 }
}

fn index_or_none(index: Option<usize>) -> f32 {
    index.map(|i| i as f32).unwrap_or(-1.0)
}

#[derive(Debug, Default)]
struct DragState {
    active: bool,
    moved: bool,
    start: Vec2,
    last: Vec2,
}

pub struct SolarDescent {
    config: SceneConfig,
    bodies: BodyRegistry,
    catalog: StarCatalog,
    clock: SimClock,
    transition: CameraTransition,
    /// Registry index of the selected body.
    selected: Option<usize>,

    // Entity IDs, indexed by registry index
    body_ids: Vec<EntityId>,
    hit_ids: Vec<EntityId>,
    sky_ids: Vec<EntityId>,
    /// Catalog and background stars, positioned once around the sky anchor.
    star_ids: Vec<EntityId>,
    /// Constellation lines in world space, projected once around the sky anchor.
    constellation_lines: Vec<(Vec3, Vec3)>,

    /// Observer the sky scene is currently built for.
    mounted_observer: Option<usize>,
    drag: DragState,
}

impl SolarDescent {
    pub fn new() -> Self {
        let config = SceneConfig::load();
        let bodies = BodyRegistry::solar_system(config.phase_seed).unwrap_or_else(|err| {
            log::error!("{err}; starting with an empty sky");
            BodyRegistry::new()
        });
        let catalog = StarCatalog::load().unwrap_or_else(|err| {
            log::warn!("{err}; no constellations");
            StarCatalog { constellations: Vec::new() }
        });
        Self::with_parts(config, bodies, catalog)
    }

    pub fn with_parts(config: SceneConfig, bodies: BodyRegistry, catalog: StarCatalog) -> Self {
        Self {
            clock: SimClock::new(config.start_time, config.time_scale),
            transition: CameraTransition::new(TransitionConfig::from_scene(&config)),
            config,
            bodies,
            catalog,
            selected: None,
            body_ids: Vec::new(),
            hit_ids: Vec::new(),
            sky_ids: Vec::new(),
            star_ids: Vec::new(),
            constellation_lines: Vec::new(),
            mounted_observer: None,
            drag: DragState::default(),
        }
    }

    pub fn transition(&self) -> &CameraTransition {
        &self.transition
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn bodies(&self) -> &BodyRegistry {
        &self.bodies
    }

    // ── Spawning ───────────────────────────────────────────────────

    fn spawn_bodies(&mut self, ctx: &mut EngineContext) {
        let t = self.clock.time();
        for (i, body) in self.bodies.iter().enumerate() {
            let id = ctx.next_id();
            ctx.scene.spawn(
                Entity::new(id)
                    .with_tag(body.name.clone())
                    .with_radius(body.visual_radius)
                    .with_kind(body_kind_code(body.kind), i as u32)
                    .with_pick_radius(body.visual_radius)
                    .selectable(),
            );
            ctx.graph.register(id, orbit::local_offset(body, t).as_vec3());
            if let Some(primary) = body.primary {
                ctx.graph.set_parent(id, Some(self.body_ids[primary]));
            }
            self.body_ids.push(id);

            // Oversized invisible hit volume riding on the body.
            let hit = ctx.next_id();
            ctx.scene.spawn(
                Entity::new(hit)
                    .with_tag(format!("{}/hit", body.name))
                    .with_pick_radius(self.config.hit_radius(body.visual_radius)),
            );
            ctx.graph.register(hit, Vec3::ZERO);
            ctx.graph.set_parent(hit, Some(id));
            self.hit_ids.push(hit);
        }
        ctx.graph.propagate(&mut ctx.scene);
    }

    fn spawn_sky(&mut self, ctx: &mut EngineContext) {
        let anchor = self.config.sky_anchor();
        let radius = self.config.sky_radius as f64;

        for (i, body) in self.bodies.iter().enumerate() {
            let size = match body.kind {
                BodyKind::Star => SKY_SUN_RADIUS,
                _ => (body.visual_radius * 2.0).max(2.0),
            };
            let id = ctx.next_id();
            ctx.scene.spawn(
                Entity::new(id)
                    .with_tag(body.name.clone())
                    .with_pos(anchor)
                    .with_radius(size)
                    .with_kind(KIND_SKY_BODY, i as u32)
                    .with_pick_radius(size * self.config.hit_volume_scale)
                    .selectable()
                    .inactive(),
            );
            self.sky_ids.push(id);
        }

        for (constellation, star) in self.catalog.stars() {
            let pos = sky::catalog_to_cartesian(star.ra, star.dec, radius).as_vec3();
            let id = ctx.next_id();
            ctx.scene.spawn(
                Entity::new(id)
                    .with_tag(star.name.clone())
                    .with_pos(anchor + pos)
                    .with_radius(star_size(star.magnitude))
                    .with_color(star.color)
                    .with_kind(KIND_CATALOG_STAR, constellation as u32)
                    .inactive(),
            );
            self.star_ids.push(id);
        }

        for (i, star) in catalog::background_stars(self.config.background_stars, self.config.phase_seed, radius)
            .iter()
            .enumerate()
        {
            let id = ctx.next_id();
            let mut entity = Entity::new(id)
                .with_pos(anchor + star.position.as_vec3())
                .with_radius(star_size(star.magnitude))
                .with_kind(KIND_BACKGROUND_STAR, i as u32)
                .inactive();
            entity.alpha = 0.6;
            ctx.scene.spawn(entity);
            self.star_ids.push(id);
        }

        self.constellation_lines = self
            .catalog
            .segments(radius)
            .into_iter()
            .map(|(a, b)| (anchor + a.as_vec3(), anchor + b.as_vec3()))
            .collect();
    }

    // ── Input ──────────────────────────────────────────────────────

    fn handle_input(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        for event in input.iter() {
            match *event {
                InputEvent::Custom { kind, a, b, .. } => match kind {
                    CUSTOM_SET_TIME => self.clock.set_time(a as f64),
                    CUSTOM_SET_SPEED => self.clock.set_time_scale(a as f64),
                    CUSTOM_TOGGLE_PAUSE => self.clock.toggle_pause(),
                    CUSTOM_ENTER => {
                        let index = if a < 0.0 { self.selected } else { Some(a as usize) };
                        match index.and_then(|i| self.bodies.by_index(i)) {
                            Some(body) => self.transition.request_enter(body.name.clone()),
                            None => log::warn!("enter requested for unknown body {a}"),
                        }
                    }
                    CUSTOM_EXIT => self.transition.request_exit(),
                    CUSTOM_ZOOM => {
                        if self.transition.controls_enabled() && self.transition.phase() != Phase::SurfaceSky {
                            let factor = if a > 0.0 { 1.0 / ZOOM_STEP } else { ZOOM_STEP };
                            ctx.camera.zoom(factor);
                        }
                    }
                    CUSTOM_RESIZE => ctx.camera.resize(a, b),
                    _ => {}
                },
                InputEvent::KeyDown { key_code: KEY_ESCAPE } => self.transition.request_exit(),
                InputEvent::PointerDown { x, y } => {
                    self.drag = DragState {
                        active: true,
                        moved: false,
                        start: Vec2::new(x, y),
                        last: Vec2::new(x, y),
                    };
                }
                InputEvent::PointerMove { x, y } => {
                    if !self.drag.active {
                        continue;
                    }
                    let pos = Vec2::new(x, y);
                    if pos.distance(self.drag.start) > DRAG_THRESHOLD {
                        self.drag.moved = true;
                    }
                    if self.drag.moved && self.transition.controls_enabled() {
                        let delta = pos - self.drag.last;
                        if self.transition.phase() == Phase::SurfaceSky {
                            ctx.camera.look_around(delta.x, delta.y);
                        } else {
                            ctx.camera.orbit(delta.x, delta.y);
                        }
                    }
                    self.drag.last = pos;
                }
                InputEvent::PointerUp { x, y } => {
                    if self.drag.active && !self.drag.moved {
                        self.click(ctx, Vec2::new(x, y));
                    }
                    self.drag = DragState::default();
                }
                _ => {}
            }
        }
    }

    /// A click (not a drag): select what is under the pointer and, from the
    /// orbital views, fly to it.
    fn click(&mut self, ctx: &EngineContext, screen: Vec2) {
        if !self.transition.controls_enabled() {
            return;
        }
        let picked = picking::resolve(screen, &ctx.camera, &ctx.scene, &ctx.graph)
            .and_then(|tag| self.bodies.index_of(&tag).ok());
        self.selected = picked;

        let Some(index) = picked else { return };
        let Some(body) = self.bodies.by_index(index) else { return };
        match self.transition.phase() {
            Phase::Overview => self.transition.request_enter(body.name.clone()),
            Phase::FocusedOrbit if self.transition.target() != Some(body.name.as_str()) => {
                self.transition.request_enter(body.name.clone())
            }
            _ => {}
        }
    }

    // ── Per-tick scene updates ─────────────────────────────────────

    fn place_bodies(&self, ctx: &mut EngineContext, t: f64) {
        for (i, body) in self.bodies.iter().enumerate() {
            let id = self.body_ids[i];
            ctx.graph.set_offset(id, orbit::local_offset(body, t).as_vec3());
            if let Some(entity) = ctx.scene.get_mut(id) {
                entity.spin = orbit::spin_angle(body, t) as f32;
            }
        }
        ctx.graph.propagate(&mut ctx.scene);
    }

    fn sync_visibility(&mut self, ctx: &mut EngineContext) {
        ctx.scene.set_active(&self.body_ids, self.transition.overview_visible());
        ctx.scene.set_active(&self.hit_ids, self.transition.overview_visible());

        let observer = self
            .transition
            .observer()
            .and_then(|name| match sky::resolve_observer(&self.bodies, name) {
                Ok(index) => Some(index),
                Err(err) => {
                    log::warn!("{err}");
                    None
                }
            });
        if observer != self.mounted_observer {
            ctx.scene.set_active(&self.sky_ids, observer.is_some());
            ctx.scene.set_active(&self.star_ids, observer.is_some());
            if let Some(index) = observer {
                // Nobody sees their own planet in the sky.
                ctx.scene.set_active(&self.sky_ids[index..=index], false);
            }
            self.mounted_observer = observer;
        }
    }

    fn update_sky(&self, ctx: &mut EngineContext, t: f64) {
        let Some(observer) = self.mounted_observer.and_then(|i| self.bodies.by_index(i)) else {
            return;
        };
        let radius = (self.config.sky_radius * SKY_BODY_SHELL) as f64;
        let objects = match sky::visible_objects(&self.bodies, &observer.name, t, radius) {
            Ok(objects) => objects,
            Err(err) => {
                log::warn!("{err}");
                return;
            }
        };

        let anchor = self.config.sky_anchor();
        for object in &objects {
            if let Some(entity) = ctx.scene.get_mut(self.sky_ids[object.body]) {
                entity.pos = anchor + object.placement.as_vec3();
            }
            ctx.emit_event(GameEvent::new(
                EVENT_SKY_OBJECT,
                object.body as f32,
                object.sky.azimuth as f32,
                object.sky.altitude as f32,
            ));
        }
    }

    fn draw_lines(&self, ctx: &mut EngineContext, t: f64) {
        ctx.lines.clear();

        if self.transition.overview_visible() {
            for (i, body) in self.bodies.iter().enumerate() {
                if body.is_stationary() {
                    continue;
                }
                match orbit::orbit_path(&self.bodies, i, t, ORBIT_SAMPLES) {
                    Ok(path) => {
                        let points: Vec<Vec3> = path.iter().map(|p| p.as_vec3()).collect();
                        ctx.lines.push_loop(&points, ORBIT_ALPHA, LINE_ORBIT);
                    }
                    Err(err) => log::warn!("{err}"),
                }
            }
        }

        if self.mounted_observer.is_some() {
            for &(a, b) in &self.constellation_lines {
                ctx.lines.push(LineSegment::new(a, b, CONSTELLATION_ALPHA, LINE_CONSTELLATION));
            }
        }
    }

    fn emit_events(&self, ctx: &mut EngineContext, lifecycle: &[TransitionEvent], t: f64) {
        let index_of = |name: &str| self.bodies.index_of(name).map(|i| i as f32).unwrap_or(-1.0);
        for event in lifecycle {
            let (kind, a) = match event {
                TransitionEvent::EnterRequested(name) => (EVENT_ENTER_REQUESTED, index_of(name)),
                TransitionEvent::EnterCompleted(name) => (EVENT_ENTER_COMPLETED, index_of(name)),
                TransitionEvent::ExitRequested => (EVENT_EXIT_REQUESTED, -1.0),
                TransitionEvent::ExitCompleted => (EVENT_EXIT_COMPLETED, -1.0),
            };
            ctx.emit_event(GameEvent::new(kind, a, 0.0, 0.0));
        }

        ctx.emit_event(GameEvent::new(
            EVENT_TIME_INFO,
            t as f32,
            self.clock.time_scale() as f32,
            flag(self.clock.is_paused()),
        ));
        ctx.emit_event(GameEvent::new(
            EVENT_PHASE,
            self.transition.phase().code() as f32,
            flag(self.transition.controls_enabled()),
            self.transition.progress(),
        ));
        ctx.emit_event(GameEvent::new(
            EVENT_SCENE,
            self.transition.fade_alpha(),
            flag(self.transition.overview_visible()),
            index_or_none(self.mounted_observer),
        ));

        let distance = self
            .selected
            .and_then(|i| orbit::position_at(&self.bodies, i, t).ok())
            .map(DVec3::length)
            .unwrap_or(0.0);
        let focused = self.transition.target().and_then(|name| self.bodies.index_of(name).ok());
        ctx.emit_event(GameEvent::new(
            EVENT_SELECTION,
            index_or_none(self.selected),
            distance as f32,
            index_or_none(focused),
        ));
    }
}

impl Default for SolarDescent {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for SolarDescent {
    fn config(&self) -> GameConfig {
        GameConfig {
            fixed_dt: 1.0 / 60.0,
            max_instances: 512,
            max_events: 128,
            max_lines: 2048,
            ..GameConfig::default()
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        if self.bodies.is_empty() {
            log::warn!("no bodies registered, the overview will be empty");
        }
        self.spawn_bodies(ctx);
        self.spawn_sky(ctx);
        self.draw_lines(ctx, self.clock.time());
        log::info!(
            "{} bodies, {} catalog stars, {} scene entities",
            self.bodies.len(),
            self.catalog.star_count(),
            ctx.scene.len()
        );
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        self.handle_input(ctx, input);

        let t = self.clock.advance(ctx.dt());
        self.place_bodies(ctx, t);

        let lifecycle = self.transition.step(ctx.dt(), &mut ctx.camera.pose, &self.bodies, t);

        self.sync_visibility(ctx);
        self.update_sky(ctx, t);
        self.draw_lines(ctx, t);
        self.emit_events(ctx, &lifecycle, t);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn game() -> (SolarDescent, EngineContext) {
        let mut game = SolarDescent::new();
        let mut ctx = EngineContext::from_config(&game.config());
        game.init(&mut ctx);
        (game, ctx)
    }

    fn tick(game: &mut SolarDescent, ctx: &mut EngineContext, input: &[InputEvent]) {
        let mut queue = InputQueue::new();
        for &event in input {
            queue.push(event);
        }
        ctx.clear_frame_data();
        game.update(ctx, &queue);
    }

    fn run(game: &mut SolarDescent, ctx: &mut EngineContext, seconds: f32) {
        for _ in 0..(seconds / DT).ceil() as usize {
            tick(game, ctx, &[]);
        }
    }

    fn enter(index: usize) -> InputEvent {
        InputEvent::Custom { kind: CUSTOM_ENTER, a: index as f32, b: 0.0, c: 0.0 }
    }

    /// Freeze the clock where `name` sits on +X of its primary.
    fn park_on_x(game: &mut SolarDescent, ctx: &mut EngineContext, name: &str) -> usize {
        let index = game.bodies().index_of(name).unwrap();
        let body = game.bodies().by_index(index).unwrap();
        let t = (std::f64::consts::TAU - body.start_phase) / std::f64::consts::TAU * body.period;
        game.clock.set_time(t);
        game.clock.set_paused(true);
        tick(game, ctx, &[]);
        index
    }

    fn click_at(game: &mut SolarDescent, ctx: &mut EngineContext, world: Vec3) {
        let screen = ctx.camera.project(world).unwrap();
        tick(game, ctx, &[
            InputEvent::PointerDown { x: screen.x, y: screen.y },
            InputEvent::PointerUp { x: screen.x, y: screen.y },
        ]);
    }

    fn events_of(ctx: &EngineContext, kind: f32) -> Vec<GameEvent> {
        ctx.events.iter().copied().filter(|e| e.kind == kind).collect()
    }

    #[test]
    fn init_spawns_bodies_hit_volumes_and_sky() {
        let (game, ctx) = game();
        let n = game.bodies().len();
        assert_eq!(game.body_ids.len(), n);
        assert_eq!(game.hit_ids.len(), n);
        assert_eq!(game.sky_ids.len(), n);
        assert!(ctx.scene.iter_active().all(|e| e.kind != KIND_SKY_BODY));
        assert!(ctx.lines.segment_count() > 0);
    }

    #[test]
    fn bodies_follow_the_orbital_model() {
        let (mut game, mut ctx) = game();
        run(&mut game, &mut ctx, 0.5);
        let t = game.clock().time();
        for (i, body) in game.bodies().iter().enumerate() {
            let expected = orbit::position(game.bodies(), &body.name, t).unwrap().as_vec3();
            let entity = ctx.scene.get(game.body_ids[i]).unwrap();
            assert!((entity.pos - expected).length() < 1e-3, "{} misplaced", body.name);
            let hit = ctx.scene.get(game.hit_ids[i]).unwrap();
            assert_eq!(hit.pos, entity.pos);
        }
    }

    #[test]
    fn clicking_a_body_selects_and_flies_to_it() {
        let (mut game, mut ctx) = game();
        let mars = park_on_x(&mut game, &mut ctx, "Mars");
        let pos = ctx.scene.get(game.body_ids[mars]).unwrap().pos;
        assert!((pos - Vec3::new(30.0, 0.0, 0.0)).length() < 1e-2);

        click_at(&mut game, &mut ctx, pos);
        assert_eq!(game.selected(), Some(mars));
        assert_eq!(game.transition().phase(), Phase::EnteringFocus);
        assert_eq!(game.transition().target(), Some("Mars"));

        let requested = events_of(&ctx, EVENT_ENTER_REQUESTED);
        assert_eq!(requested.len(), 1);
        assert_eq!(requested[0].a, mars as f32);
    }

    #[test]
    fn mercury_is_pickable_inside_the_suns_hit_volume() {
        let (mut game, mut ctx) = game();
        let mercury = park_on_x(&mut game, &mut ctx, "Mercury");
        let pos = ctx.scene.get(game.body_ids[mercury]).unwrap().pos;
        assert!((pos - Vec3::new(10.0, 0.0, 0.0)).length() < 1e-2);
        // Mercury's whole orbit lies inside the Sun's helper volume.
        let sun = game.bodies().get("Sun").unwrap();
        assert!(game.config.hit_radius(sun.visual_radius) > 10.0 + 0.8);

        click_at(&mut game, &mut ctx, pos);
        assert_eq!(game.selected(), Some(mercury));
        assert_eq!(game.transition().target(), Some("Mercury"));
    }

    #[test]
    fn catalog_stars_carry_their_colour() {
        let (game, ctx) = game();
        let first = game.catalog.stars().next().map(|(_, star)| star.color).unwrap();
        let entity = ctx.scene.get(game.star_ids[0]).unwrap();
        assert_eq!(entity.color, first);
        assert_eq!(game.constellation_lines.len(), game.catalog.segments(1.0).len());
    }

    #[test]
    fn empty_registry_still_runs() {
        let catalog = StarCatalog { constellations: Vec::new() };
        let mut game = SolarDescent::with_parts(SceneConfig::default(), BodyRegistry::new(), catalog);
        let mut ctx = EngineContext::from_config(&game.config());
        game.init(&mut ctx);
        assert!(game.bodies().is_empty());
        tick(&mut game, &mut ctx, &[InputEvent::Custom { kind: CUSTOM_ENTER, a: -1.0, b: 0.0, c: 0.0 }]);
        assert_eq!(game.transition().phase(), Phase::Overview);
        assert_eq!(ctx.scene.len(), SceneConfig::default().background_stars as usize);
    }

    #[test]
    fn clicking_empty_space_clears_selection() {
        let (mut game, mut ctx) = game();
        game.selected = Some(1);
        tick(&mut game, &mut ctx, &[
            InputEvent::PointerDown { x: 2.0, y: 2.0 },
            InputEvent::PointerUp { x: 2.0, y: 2.0 },
        ]);
        assert_eq!(game.selected(), None);
        assert_eq!(game.transition().phase(), Phase::Overview);
    }

    #[test]
    fn drag_orbits_instead_of_clicking() {
        let (mut game, mut ctx) = game();
        let before = ctx.camera.pose;
        tick(&mut game, &mut ctx, &[
            InputEvent::PointerDown { x: 100.0, y: 100.0 },
            InputEvent::PointerMove { x: 160.0, y: 110.0 },
            InputEvent::PointerUp { x: 160.0, y: 110.0 },
        ]);
        assert_ne!(ctx.camera.pose.position, before.position);
        assert!((ctx.camera.pose.distance() - before.distance()).abs() < 1e-3);
        assert_eq!(game.transition().phase(), Phase::Overview);
    }

    #[test]
    fn time_controls() {
        let (mut game, mut ctx) = game();
        tick(&mut game, &mut ctx, &[
            InputEvent::Custom { kind: CUSTOM_SET_TIME, a: 100.0, b: 0.0, c: 0.0 },
            InputEvent::Custom { kind: CUSTOM_TOGGLE_PAUSE, a: 0.0, b: 0.0, c: 0.0 },
        ]);
        assert_eq!(game.clock().time(), 100.0);
        run(&mut game, &mut ctx, 0.5);
        assert_eq!(game.clock().time(), 100.0);

        tick(&mut game, &mut ctx, &[
            InputEvent::Custom { kind: CUSTOM_TOGGLE_PAUSE, a: 0.0, b: 0.0, c: 0.0 },
            InputEvent::Custom { kind: CUSTOM_SET_SPEED, a: 60.0, b: 0.0, c: 0.0 },
        ]);
        assert!((game.clock().time() - 101.0).abs() < 1e-3);

        let info = events_of(&ctx, EVENT_TIME_INFO);
        assert_eq!(info.len(), 1);
        assert_eq!(info[0].b, 60.0);
        assert_eq!(info[0].c, 0.0);
    }

    #[test]
    fn descent_and_return() {
        let (mut game, mut ctx) = game();
        let start_pose = ctx.camera.pose;
        let earth = game.bodies().index_of("Earth").unwrap();
        let config = game.transition().config().clone();

        tick(&mut game, &mut ctx, &[enter(earth)]);
        run(&mut game, &mut ctx, config.max_duration(Phase::EnteringFocus));
        assert_eq!(game.transition().phase(), Phase::FocusedOrbit);

        tick(&mut game, &mut ctx, &[enter(earth)]);
        run(&mut game, &mut ctx, config.max_duration(Phase::EnteringSurface));
        assert_eq!(game.transition().phase(), Phase::SurfaceSky);

        // Sky scene mounted, orbital scene hidden, own planet not in the sky.
        assert!(!ctx.scene.get(game.body_ids[earth]).unwrap().active);
        assert!(!ctx.scene.get(game.sky_ids[earth]).unwrap().active);
        let mars = game.bodies().index_of("Mars").unwrap();
        let mars_sky = ctx.scene.get(game.sky_ids[mars]).unwrap();
        assert!(mars_sky.active);
        assert!(mars_sky.pos.y > config.sky_anchor.y);
        assert_eq!(events_of(&ctx, EVENT_SKY_OBJECT).len(), game.bodies().len() - 1);

        tick(&mut game, &mut ctx, &[InputEvent::KeyDown { key_code: KEY_ESCAPE }]);
        assert_eq!(game.transition().phase(), Phase::ExitingSurface);
        // Orbital scene is back immediately.
        assert!(ctx.scene.get(game.body_ids[earth]).unwrap().active);

        run(&mut game, &mut ctx, config.max_duration(Phase::ExitingSurface));
        assert_eq!(game.transition().phase(), Phase::Overview);
        assert_eq!(ctx.camera.pose, start_pose);
        assert!(ctx.scene.iter_active().all(|e| e.kind != KIND_SKY_BODY));
    }

    #[test]
    fn clicks_are_ignored_during_transitions() {
        let (mut game, mut ctx) = game();
        tick(&mut game, &mut ctx, &[enter(3)]);
        assert_eq!(game.transition().phase(), Phase::EnteringFocus);
        tick(&mut game, &mut ctx, &[
            InputEvent::PointerDown { x: 400.0, y: 300.0 },
            InputEvent::PointerUp { x: 400.0, y: 300.0 },
        ]);
        assert_eq!(game.selected(), None);
    }

    #[test]
    fn phase_event_reports_controls() {
        let (mut game, mut ctx) = game();
        tick(&mut game, &mut ctx, &[]);
        let phase = events_of(&ctx, EVENT_PHASE);
        assert_eq!(phase[0].a, Phase::Overview.code() as f32);
        assert_eq!(phase[0].b, 1.0);

        tick(&mut game, &mut ctx, &[enter(3)]);
        let phase = events_of(&ctx, EVENT_PHASE);
        assert_eq!(phase[0].a, Phase::EnteringFocus.code() as f32);
        assert_eq!(phase[0].b, 0.0);
    }
}
