//! State and plumbing every scene shares.
//!
//! A scene is `SceneCore<C>` plus whatever it draws. `C` is the scene's cue
//! type: ambient timers and action timelines both deliver cues, and the
//! scene reacts to them in its own `on_cue`. Because everything time-driven
//! lives in collections owned here, teardown is just clearing them.

use super::props::{Prop, PropChannel, PropId, Props};
use super::{Phase, PetParams, SceneKind};
use crate::anim::{Ease, Millis, Repeat, Timers, Tween, Tweens};
use crate::canvas::{v2, Affine, Canvas2D, Surface, Vec2};
use crate::engine::Engine;
use crate::error::{EngineError, Result};
use crate::events::PetEvent;
use crate::particle::{Particle, Particles};
use crate::pet::{PetChannel, PetInstance};
use crate::timeline::Timeline;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// What a tween drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Target {
    Pet(PetChannel),
    Prop(PropId, PropChannel),
}

/// The one big action a scene may have in flight, and the event it reports
/// once its timeline has run out.
#[derive(Debug)]
pub(crate) struct Action<C> {
    pub timeline: Timeline<C>,
    pub event: PetEvent,
}

pub(crate) struct SceneCore<C> {
    kind: SceneKind,
    phase: Phase,
    pub stage: Vec2,
    pub params: Option<PetParams>,
    pub background: Surface,
    pub pet: Option<PetInstance>,
    /// Where the pet rests between actions.
    pub home: Vec2,
    pub props: Props,
    pub particles: Particles,
    pub timers: Timers<C>,
    pub tweens: Tweens<Target>,
    action: Option<Action<C>>,
    pub rng: StdRng,
}

impl<C: Clone> SceneCore<C> {
    pub fn new(kind: SceneKind, engine: &Engine) -> Self {
        let salt = (kind as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15);
        Self {
            kind,
            phase: Phase::Constructing,
            stage: engine.stage_size(),
            params: None,
            background: engine.surface(),
            pet: None,
            home: Vec2::ZERO,
            props: Props::default(),
            particles: Particles::new(),
            timers: Timers::new(),
            tweens: Tweens::new(),
            action: None,
            rng: StdRng::seed_from_u64(engine.seed() ^ salt),
        }
    }

    pub fn kind(&self) -> SceneKind {
        self.kind
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_ready(&self) -> bool {
        self.phase == Phase::Ready
    }

    /// Guard at the top of `init`.
    pub fn begin_init(&mut self, params: PetParams) -> Result<()> {
        if self.phase != Phase::Constructing {
            return Err(EngineError::InvalidPhase {
                scene: self.kind,
                phase: self.phase.name(),
            });
        }
        self.params = Some(params);
        Ok(())
    }

    /// Last step of `init`.
    pub fn mark_ready(&mut self) {
        self.phase = Phase::Ready;
        log::info!(
            "{} scene ready ({} timers, {} tweens)",
            self.kind,
            self.timers.len(),
            self.tweens.len()
        );
    }

    pub fn require_ready(&self, command: &'static str) -> Result<()> {
        if self.is_ready() {
            Ok(())
        } else {
            Err(EngineError::NotReady {
                scene: self.kind,
                command,
            })
        }
    }

    pub fn unsupported(&self, command: &'static str) -> EngineError {
        EngineError::Unsupported {
            scene: self.kind,
            command,
        }
    }

    pub fn spawn_pet(&mut self, home: Vec2, scale: f32) {
        let Some(params) = self.params else {
            return;
        };
        self.home = home;
        self.pet = Some(PetInstance::new(params.breed, home, scale));
    }

    /// Breathing on the vertical squash, forever, plus an optional tail wag.
    pub fn start_idle(&mut self, breath_ms: Millis, depth: f32, wag: bool) {
        self.tweens.replace(
            Tween::new(Target::Pet(PetChannel::SquashY), 1.0, 1.0 + depth, breath_ms)
                .ease(Ease::SineInOut)
                .yoyo()
                .forever(),
        );
        if wag {
            self.tweens.replace(
                Tween::new(Target::Pet(PetChannel::TailAngle), -0.2, 0.2, 520)
                    .ease(Ease::SineInOut)
                    .yoyo()
                    .forever(),
            );
        }
    }

    pub fn pet_pos(&self) -> Vec2 {
        self.pet.as_ref().map_or(self.home, |p| p.pos + v2(0.0, p.lift))
    }

    /// Stage-space point near the top of the pet's head.
    pub fn pet_head(&self) -> Vec2 {
        match &self.pet {
            Some(p) => {
                let side = if p.flipped { 8.0 } else { -8.0 };
                p.pos + v2(side * p.scale, p.lift - 64.0 * p.scale)
            }
            None => self.home,
        }
    }

    pub fn pet_hit(&self, at: Vec2) -> bool {
        self.pet.as_ref().is_some_and(|p| p.contains(at))
    }

    /// Immediate affection: squash pulse, little hop, hearts. Allowed even
    /// while an action runs.
    pub fn pat(&mut self, out: &mut Vec<PetEvent>) {
        self.tweens.replace(
            Tween::new(Target::Pet(PetChannel::SquashX), 1.0, 1.12, 140)
                .ease(Ease::QuadOut)
                .yoyo()
                .repeat(Repeat::Times(2)),
        );
        self.tweens.replace(
            Tween::new(Target::Pet(PetChannel::Lift), 0.0, -8.0, 140)
                .ease(Ease::QuadOut)
                .yoyo()
                .repeat(Repeat::Times(2)),
        );
        let head = self.pet_head();
        for _ in 0..3 {
            let h = Particle::heart(head, &mut self.rng);
            self.particles.spawn(h);
        }
        out.push(PetEvent::Patted);
    }

    pub fn is_busy(&self) -> bool {
        self.action.is_some()
    }

    /// Claim the busy guard. Returns false, and changes nothing, when
    /// another action already holds it.
    pub fn try_start(&mut self, timeline: Timeline<C>, event: PetEvent) -> bool {
        if let Some(running) = &self.action {
            log::debug!(
                "{}: ignoring {} while '{}' runs",
                self.kind,
                event.name(),
                running.timeline.name()
            );
            return false;
        }
        log::debug!("{}: starting '{}'", self.kind, timeline.name());
        self.action = Some(Action { timeline, event });
        true
    }

    /// Start a tween, replacing any other tween on the same target.
    pub fn tween(&mut self, tween: Tween<Target>) {
        self.tweens.replace(tween);
    }

    /// Tween a pet channel from its current value.
    pub fn tween_pet(&mut self, ch: PetChannel, to: f32, ms: Millis, ease: Ease) {
        let from = self.pet.as_ref().map_or(to, |p| p.get(ch));
        self.tween(Tween::new(Target::Pet(ch), from, to, ms).ease(ease));
    }

    /// Tween a prop channel from its current value. No-op for a prop that
    /// is already gone.
    pub fn tween_prop(&mut self, id: PropId, ch: PropChannel, to: f32, ms: Millis, ease: Ease) {
        let Some(from) = self.props.get(id).map(|p| p.get(ch)) else {
            return;
        };
        self.tween(Tween::new(Target::Prop(id, ch), from, to, ms).ease(ease));
    }

    pub fn add_prop(&mut self, prop: Prop) -> PropId {
        self.props.add(prop)
    }

    /// Remove a prop and every tween still driving it.
    pub fn remove_prop(&mut self, id: PropId) {
        self.tweens
            .cancel_where(|t| matches!(t, Target::Prop(pid, _) if *pid == id));
        self.props.remove(id);
    }

    pub fn prop_pos(&self, id: PropId) -> Option<Vec2> {
        self.props.get(id).map(|p| p.pos)
    }

    fn apply(&mut self, target: Target, v: f32) {
        match target {
            Target::Pet(ch) => {
                if let Some(pet) = &mut self.pet {
                    pet.set(ch, v);
                }
            }
            Target::Prop(id, ch) => {
                if let Some(prop) = self.props.get_mut(id) {
                    prop.set(ch, v);
                }
            }
        }
    }

    /// Step tweens, particles, ambient timers and the running action.
    /// Returns the cues that came due: ambient ones first, then action
    /// steps in order.
    pub fn advance(&mut self, dt: Millis) -> Vec<C> {
        for (target, v) in self.tweens.advance(dt) {
            self.apply(target, v);
        }
        self.particles.update(dt);
        let mut cues = self.timers.advance(dt);
        if let Some(action) = &mut self.action {
            cues.extend(action.timeline.advance(dt));
        }
        cues
    }

    /// Report the running action if its last step has fired. The event goes
    /// out before the busy guard is released.
    pub fn settle(&mut self, out: &mut Vec<PetEvent>) {
        if let Some(action) = &self.action {
            if action.timeline.is_finished() {
                log::info!("{}: '{}' complete", self.kind, action.timeline.name());
                out.push(action.event.clone());
                self.action = None;
            }
        }
    }

    pub fn pending_work(&self) -> usize {
        let steps = self.action.as_ref().map_or(0, |a| a.timeline.pending());
        self.timers.len() + self.tweens.len() + steps
    }

    pub fn teardown(&mut self) {
        if self.phase == Phase::TornDown {
            return;
        }
        if let Some(mut action) = self.action.take() {
            log::debug!(
                "{}: abandoning '{}' with {} steps left",
                self.kind,
                action.timeline.name(),
                action.timeline.pending()
            );
            action.timeline.cancel();
        }
        self.timers.clear();
        self.tweens.clear();
        self.particles.clear();
        self.props.clear();
        self.background.clear();
        self.pet = None;
        self.phase = Phase::TornDown;
        log::info!("{} scene torn down", self.kind);
    }

    pub fn draw(&self, canvas: &mut dyn Canvas2D) {
        self.background.replay(canvas, Affine::IDENTITY, 1.0);
        self.props.draw_layer(canvas, false);
        if let Some(pet) = &self.pet {
            pet.draw(canvas);
        }
        self.props.draw_layer(canvas, true);
        self.particles.draw(canvas);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breed::{Breed, CatBreed};

    #[derive(Clone, Debug, PartialEq)]
    enum Cue {
        Tick,
        Step(u8),
    }

    fn ready_core() -> SceneCore<Cue> {
        let mut core = SceneCore::new(SceneKind::Room, &Engine::default());
        core.begin_init(Breed::Cat(CatBreed::Siamese).into()).unwrap();
        core.spawn_pet(v2(200.0, 190.0), 1.0);
        core.start_idle(1400, 0.04, true);
        core.mark_ready();
        core
    }

    #[test]
    fn second_action_is_dropped_while_busy() {
        let mut core = ready_core();
        let tl = Timeline::new("a").then(100, Cue::Step(0));
        assert!(core.try_start(tl, PetEvent::Splashed));
        let tl = Timeline::new("b").then(100, Cue::Step(1));
        assert!(!core.try_start(tl, PetEvent::Patted));
        assert!(core.is_busy());
    }

    #[test]
    fn action_reports_once_and_releases_guard() {
        let mut core = ready_core();
        let tl = Timeline::new("a").then(50, Cue::Step(0)).then(50, Cue::Step(1));
        core.try_start(tl, PetEvent::Splashed);
        let mut out = Vec::new();
        let mut cues = Vec::new();
        for _ in 0..10 {
            cues.extend(core.advance(16));
            core.settle(&mut out);
        }
        assert_eq!(cues, vec![Cue::Step(0), Cue::Step(1)]);
        assert_eq!(out, vec![PetEvent::Splashed]);
        assert!(!core.is_busy());
    }

    #[test]
    fn ambient_cues_precede_action_cues() {
        let mut core = ready_core();
        core.timers.after(10, Cue::Tick);
        core.try_start(Timeline::new("a").then(10, Cue::Step(0)), PetEvent::Patted);
        assert_eq!(core.advance(10), vec![Cue::Tick, Cue::Step(0)]);
    }

    #[test]
    fn teardown_silences_everything() {
        let mut core = ready_core();
        core.timers.every(10, Cue::Tick);
        core.try_start(Timeline::new("a").then(10, Cue::Step(0)), PetEvent::Splashed);
        core.teardown();
        assert_eq!(core.pending_work(), 0);
        assert!(core.advance(1000).is_empty());
        let mut out = Vec::new();
        core.settle(&mut out);
        assert!(out.is_empty());
        assert!(core.pet.is_none());
    }

    #[test]
    fn removing_a_prop_cancels_its_tweens() {
        let mut core = ready_core();
        let id = core.add_prop(Prop::new(Surface::new(), v2(0.0, 0.0)));
        core.tween_prop(id, PropChannel::X, 100.0, 500, Ease::Linear);
        let before = core.tweens.len();
        core.remove_prop(id);
        assert_eq!(core.tweens.len(), before - 1);
        core.advance(16);
    }

    #[test]
    fn pat_emits_immediately_and_spawns_hearts() {
        let mut core = ready_core();
        let mut out = Vec::new();
        core.pat(&mut out);
        assert_eq!(out, vec![PetEvent::Patted]);
        assert_eq!(core.particles.count(&crate::particle::ParticleKind::Heart), 3);
    }

    #[test]
    fn second_init_is_rejected() {
        let mut core = ready_core();
        let err = core
            .begin_init(Breed::Cat(CatBreed::Bombay).into())
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidPhase { .. }));
    }
}
