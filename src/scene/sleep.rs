//! Night time: the pet sleeps under a blanket, breathing slowly.

use super::base::SceneCore;
use super::props::{self, Prop};
use super::{Command, Phase, PetParams, Scene, SceneKind};
use crate::anim::Millis;
use crate::canvas::{v2, Canvas2D, Color, Vec2};
use crate::engine::Engine;
use crate::error::Result;
use crate::events::PetEvent;
use crate::particle::Particle;
use crate::pet::PetInstance;
use rand::Rng;

const STARS: usize = 9;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Cue {
    Zzz,
    Twinkle,
}

pub struct SleepScene {
    core: SceneCore<Cue>,
    stars: Vec<Vec2>,
}

impl SleepScene {
    pub fn new(engine: &Engine) -> Self {
        Self {
            core: SceneCore::new(SceneKind::Sleep, engine),
            stars: Vec::new(),
        }
    }

    fn floor_y(&self) -> f32 {
        self.core.stage.y * 0.8
    }

    fn bed_top(&self) -> f32 {
        self.floor_y() - 30.0
    }

    fn paint_background(&mut self) {
        let (w, h) = (self.core.stage.x, self.core.stage.y);
        let floor = self.floor_y();
        let bed_top = self.bed_top();

        // window first so the stars can be scattered inside it
        let (wx, wy, ww, wh) = (w * 0.62, h * 0.1, 104.0, 78.0);
        self.stars = (0..STARS)
            .map(|_| {
                v2(
                    self.core.rng.gen_range(wx + 6.0..wx + ww - 6.0),
                    self.core.rng.gen_range(wy + 6.0..wy + wh - 6.0),
                )
            })
            .collect();

        let s = &mut self.core.background;
        s.fill_rect(v2(0.0, 0.0), w, floor, Color::hex(0x2C2F54));
        s.fill_rect(v2(0.0, floor), w, h - floor, Color::hex(0x3B3355));

        let sky = Color::hex(0x0D1B3E);
        s.fill_rect(v2(wx - 4.0, wy - 4.0), ww + 8.0, wh + 8.0, Color::hex(0x4A4E7A));
        s.fill_rect(v2(wx, wy), ww, wh, sky);
        for &p in &self.stars {
            s.fill_circle(p, 1.1, Color::hex(0xFFF9C4));
        }
        let moon = v2(wx + ww * 0.72, wy + wh * 0.34);
        s.fill_circle(moon, 13.0, Color::hex(0xFFF59D));
        s.fill_circle(moon + v2(-6.0, -3.0), 11.5, sky);
        s.line(v2(wx + ww / 2.0, wy), v2(wx + ww / 2.0, wy + wh), 2.0, Color::hex(0x4A4E7A));

        // lamp glow on the left
        s.fill_circle(v2(w * 0.14, floor - 70.0), 44.0, Color::hex(0xFFE082).with_alpha(30));
        s.fill_rect(v2(w * 0.14 - 2.0, floor - 62.0), 4.0, 62.0, Color::hex(0x5D4037));
        s.fill_triangle(
            v2(w * 0.14 - 16.0, floor - 62.0),
            v2(w * 0.14 + 16.0, floor - 62.0),
            v2(w * 0.14, floor - 84.0),
            Color::hex(0xFFCC80),
        );

        // bed: headboard, frame, mattress, pillow
        let (bx, bw) = (w * 0.5 - 80.0, 160.0);
        s.fill_rect(v2(bx - 6.0, bed_top - 58.0), 12.0, 88.0, Color::hex(0x6D4C41));
        s.fill_rect(v2(bx, bed_top - 50.0), 10.0, 50.0, Color::hex(0x8D6E63));
        s.fill_rect(v2(bx, bed_top + 8.0), bw, 22.0, Color::hex(0x6D4C41));
        s.fill_rect(v2(bx, bed_top - 4.0), bw, 14.0, Color::hex(0xEDE7F6));
        s.fill_ellipse(v2(bx + 34.0, bed_top - 10.0), 24.0, 9.0, 0.0, Color::WHITE);
    }

    fn on_cue(&mut self, cue: Cue) {
        match cue {
            Cue::Zzz => {
                let at = self.core.pet_head() + v2(16.0, -4.0);
                let z = Particle::zzz(at, &mut self.core.rng);
                self.core.particles.spawn(z);
            }
            Cue::Twinkle => {
                if self.stars.is_empty() {
                    return;
                }
                let i = self.core.rng.gen_range(0..self.stars.len());
                let t = Particle::twinkle(self.stars[i], &mut self.core.rng);
                self.core.particles.spawn(t);
            }
        }
    }
}

impl Scene for SleepScene {
    fn kind(&self) -> SceneKind {
        self.core.kind()
    }

    fn phase(&self) -> Phase {
        self.core.phase()
    }

    fn init(&mut self, params: PetParams) -> Result<()> {
        self.core.begin_init(params)?;
        self.paint_background();
        let scale = 0.9;
        let bed_top = self.bed_top();
        let home = v2(self.core.stage.x * 0.5, bed_top - 48.0 * scale + 6.0);
        self.core.spawn_pet(home, scale);
        if let Some(pet) = &mut self.core.pet {
            pet.set_eyes_closed(true);
            pet.tail_angle = 0.35;
        }
        self.core
            .add_prop(Prop::new(props::blanket(130.0), v2(home.x + 8.0, bed_top - 16.0)).front());
        self.core.start_idle(2200, 0.06, false);
        self.core.timers.every(1400, Cue::Zzz);
        self.core.timers.every(600, Cue::Twinkle);
        self.core.mark_ready();
        Ok(())
    }

    fn handle(&mut self, command: Command, out: &mut Vec<PetEvent>) -> Result<()> {
        self.core.require_ready(command.name())?;
        match command {
            Command::PointerDown(at) => {
                if self.core.pet_hit(at) {
                    self.core.pat(out);
                }
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
        self.stars.clear();
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
    use crate::breed::{Breed, DogBreed};
    use crate::error::EngineError;
    use crate::particle::ParticleKind;

    fn bedroom() -> SleepScene {
        let mut scene = SleepScene::new(&Engine::default());
        scene.init(Breed::Dog(DogBreed::Poodle).into()).unwrap();
        scene
    }

    #[test]
    fn pet_sleeps_with_eyes_closed() {
        let scene = bedroom();
        assert!(scene.pet().unwrap().eyes_closed());
        assert_eq!(scene.stars.len(), STARS);
    }

    #[test]
    fn zzz_float_up_while_sleeping() {
        let mut scene = bedroom();
        let mut out = Vec::new();
        for _ in 0..100 {
            scene.update(16, &mut out);
        }
        assert_eq!(scene.core.particles.count(&ParticleKind::Zzz), 1);
        assert!(out.is_empty());
    }

    #[test]
    fn sleeping_pet_can_still_be_patted() {
        let mut scene = bedroom();
        let at = scene.pet().unwrap().pos;
        let mut out = Vec::new();
        scene.handle(Command::PointerDown(at), &mut out).unwrap();
        assert_eq!(out, vec![PetEvent::Patted]);
        let err = scene.handle(Command::Splash, &mut out).unwrap_err();
        assert!(matches!(err, EngineError::Unsupported { .. }));
    }
}
