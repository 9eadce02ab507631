//! Bath time: the pet sits in a foamy tub with a rubber duck. Poking the
//! water (or a splash request) makes a splash.

use super::base::{SceneCore, Target};
use super::props::{self, Prop, PropChannel};
use super::{Command, Phase, PetParams, Scene, SceneKind};
use crate::anim::{Ease, Millis, Repeat, Tween};
use crate::canvas::{v2, Canvas2D, Color, Vec2};
use crate::engine::Engine;
use crate::error::Result;
use crate::events::PetEvent;
use crate::particle::Particle;
use crate::pet::{PetChannel, PetInstance};
use crate::timeline::Timeline;
use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Cue {
    Bubble,
    Steam,
    Burst,
    Shake,
    Settle,
    Done,
}

pub struct BathScene {
    core: SceneCore<Cue>,
    /// Center of the tub's rim.
    tub: Vec2,
    tub_width: f32,
}

impl BathScene {
    pub fn new(engine: &Engine) -> Self {
        Self {
            core: SceneCore::new(SceneKind::Bath, engine),
            tub: Vec2::ZERO,
            tub_width: 0.0,
        }
    }

    fn floor_y(&self) -> f32 {
        self.core.stage.y * 0.8
    }

    fn paint_background(&mut self) {
        let (w, h) = (self.core.stage.x, self.core.stage.y);
        let floor = self.floor_y();
        let (tub, half) = (self.tub, self.tub_width / 2.0);
        let s = &mut self.core.background;

        let tile = Color::hex(0xB2EBF2);
        s.fill_rect(v2(0.0, 0.0), w, floor, tile);
        let mut x = 24.0;
        while x < w {
            s.line(v2(x, 0.0), v2(x, floor), 0.6, tile.darken(0.12));
            x += 24.0;
        }
        let mut y = 24.0;
        while y < floor {
            s.line(v2(0.0, y), v2(w, y), 0.6, tile.darken(0.12));
            y += 24.0;
        }
        s.fill_rect(v2(0.0, floor), w, h - floor, Color::hex(0x80CBC4));
        s.fill_ellipse(v2(w * 0.82, floor + 16.0), 40.0, 8.0, 0.0, Color::hex(0xF8BBD0));

        // mirror and towel
        s.fill_ellipse(v2(w * 0.15, h * 0.26), 26.0, 34.0, 0.0, Color::hex(0xCFD8DC));
        s.fill_ellipse(v2(w * 0.15, h * 0.26), 22.0, 30.0, 0.0, Color::hex(0xE3F2FD));
        s.line(v2(w * 0.08, h * 0.2), v2(w * 0.12, h * 0.14), 2.0, Color::WHITE.with_alpha(160));
        s.fill_rect(v2(w * 0.84, h * 0.2), 30.0, 4.0, Color::hex(0x9E9E9E));
        s.fill_rect(v2(w * 0.845, h * 0.2 + 4.0), 24.0, 46.0, Color::hex(0xFFAB91));
        s.fill_rect(v2(w * 0.845, h * 0.2 + 36.0), 24.0, 4.0, Color::hex(0xFF8A65));

        // tub back wall and water surface; the front wall is a prop
        s.fill_ellipse(tub, half + 4.0, 10.0, 0.0, Color::hex(0xE0E0E0));
        s.fill_ellipse(tub + v2(0.0, 2.0), half - 4.0, 7.0, 0.0, Color::hex(0x81D4FA));
        s.line(tub + v2(half - 20.0, -10.0), tub + v2(half - 20.0, -40.0), 3.0, Color::hex(0xB0BEC5));
        s.line(tub + v2(half - 20.0, -40.0), tub + v2(half - 34.0, -40.0), 3.0, Color::hex(0xB0BEC5));
    }

    fn in_water(&self, at: Vec2) -> bool {
        (at.x - self.tub.x).abs() <= self.tub_width / 2.0
            && at.y >= self.tub.y - 14.0
            && at.y <= self.tub.y + 46.0
    }

    fn start_splash(&mut self) {
        let tl = Timeline::new("splash")
            .then(0, Cue::Burst)
            .then(0, Cue::Shake)
            .then(250, Cue::Burst)
            .then(450, Cue::Settle)
            .then(300, Cue::Done);
        self.core.try_start(tl, PetEvent::Splashed);
    }

    fn on_cue(&mut self, cue: Cue) {
        match cue {
            Cue::Bubble => {
                let half = self.tub_width / 2.0 - 10.0;
                let at = self.tub + v2(self.core.rng.gen_range(-half..half), -6.0);
                let b = Particle::bubble(at, &mut self.core.rng);
                self.core.particles.spawn(b);
            }
            Cue::Steam => {
                let at = self.tub + v2(self.core.rng.gen_range(-40.0..40.0), -24.0);
                let p = Particle::steam(at, &mut self.core.rng);
                self.core.particles.spawn(p);
            }
            Cue::Burst => {
                let at = v2(self.core.pet_pos().x, self.tub.y - 2.0);
                for _ in 0..10 {
                    let d = Particle::droplet(at, &mut self.core.rng);
                    self.core.particles.spawn(d);
                }
                for _ in 0..4 {
                    let b = Particle::bubble(at, &mut self.core.rng);
                    self.core.particles.spawn(b);
                }
            }
            Cue::Shake => {
                self.core.tween(
                    Tween::new(Target::Pet(PetChannel::Rotation), -0.14, 0.14, 90)
                        .ease(Ease::SineInOut)
                        .yoyo()
                        .repeat(Repeat::Times(6)),
                );
            }
            Cue::Settle => {
                self.core
                    .tween_pet(PetChannel::Rotation, 0.0, 120, Ease::QuadOut);
            }
            Cue::Done => {}
        }
    }
}

impl Scene for BathScene {
    fn kind(&self) -> SceneKind {
        self.core.kind()
    }

    fn phase(&self) -> Phase {
        self.core.phase()
    }

    fn init(&mut self, params: PetParams) -> Result<()> {
        self.core.begin_init(params)?;
        let w = self.core.stage.x;
        self.tub_width = (w * 0.5).min(220.0);
        self.tub = v2(w * 0.5, self.floor_y() - 56.0);
        self.paint_background();

        self.core.spawn_pet(v2(self.tub.x - 16.0, self.tub.y - 8.0), 0.95);
        self.core
            .add_prop(Prop::new(props::tub_front(self.tub_width), self.tub).front());
        let duck_at = self.tub + v2(self.tub_width * 0.3, -8.0);
        let duck = self.core.add_prop(Prop::new(props::duck(), duck_at).front());
        self.core.tween(
            Tween::new(Target::Prop(duck, PropChannel::Y), duck_at.y - 3.0, duck_at.y + 2.0, 700)
                .ease(Ease::SineInOut)
                .yoyo()
                .forever(),
        );
        self.core.tween(
            Tween::new(Target::Prop(duck, PropChannel::Rotation), -0.15, 0.15, 900)
                .ease(Ease::SineInOut)
                .yoyo()
                .forever(),
        );

        self.core.start_idle(1300, 0.03, false);
        self.core.timers.every(350, Cue::Bubble);
        self.core.timers.every(1000, Cue::Steam);
        self.core.mark_ready();
        Ok(())
    }

    fn handle(&mut self, command: Command, out: &mut Vec<PetEvent>) -> Result<()> {
        self.core.require_ready(command.name())?;
        match command {
            Command::PointerDown(at) => {
                if self.core.pet_hit(at) {
                    self.core.pat(out);
                } else if self.in_water(at) {
                    self.start_splash();
                }
                Ok(())
            }
            Command::Splash => {
                self.start_splash();
                Ok(())
            }
            other => Err(self.core.unsupported(other.name())),
        }
    }

    fn update(&mut self, dt: Millis, out: &mut Vec<PetEvent>) {
        if !self.core.is_ready() {
            return;
        }
        for cue in self.core.advance(dt) {
            self.on_cue(cue);
        }
        self.core.settle(out);
    }

    fn draw(&self, canvas: &mut dyn Canvas2D) {
        self.core.draw(canvas);
    }

    fn teardown(&mut self) {
        self.core.teardown();
    }

    fn pet(&self) -> Option<&PetInstance> {
        self.core.pet.as_ref()
    }

    fn is_busy(&self) -> bool {
        self.core.is_busy()
    }

    fn pending_work(&self) -> usize {
        self.core.pending_work()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breed::{Breed, CatBreed};
    use crate::particle::ParticleKind;

    fn tub() -> BathScene {
        let mut scene = BathScene::new(&Engine::default());
        scene.init(Breed::Cat(CatBreed::Sphynx).into()).unwrap();
        scene
    }

    fn run(scene: &mut BathScene, ms: u32) -> Vec<PetEvent> {
        let mut out = Vec::new();
        for _ in 0..ms / 16 {
            scene.update(16, &mut out);
        }
        out
    }

    #[test]
    fn poking_the_water_splashes() {
        let mut scene = tub();
        let water = scene.tub + v2(scene.tub_width / 2.0 - 6.0, 10.0);
        assert!(!scene.pet().unwrap().contains(water));
        scene.handle(Command::PointerDown(water), &mut Vec::new()).unwrap();
        assert!(scene.is_busy());
        run(&mut scene, 64);
        assert!(scene.core.particles.count(&ParticleKind::Droplet) >= 10);
        assert_eq!(run(&mut scene, 1500), vec![PetEvent::Splashed]);
    }

    #[test]
    fn splash_while_splashing_is_dropped() {
        let mut scene = tub();
        scene.handle(Command::Splash, &mut Vec::new()).unwrap();
        scene.handle(Command::Splash, &mut Vec::new()).unwrap();
        assert_eq!(run(&mut scene, 2000), vec![PetEvent::Splashed]);
        assert!(scene.pet().unwrap().rotation.abs() < 1e-3);
    }

    #[test]
    fn dry_clicks_do_nothing() {
        let mut scene = tub();
        let mut out = Vec::new();
        scene.handle(Command::PointerDown(v2(1.0, 1.0)), &mut out).unwrap();
        assert!(out.is_empty());
        assert!(!scene.is_busy());
    }

    #[test]
    fn bubbles_keep_coming() {
        let mut scene = tub();
        run(&mut scene, 1000);
        assert!(scene.core.particles.count(&ParticleKind::Bubble) > 0);
    }
}
