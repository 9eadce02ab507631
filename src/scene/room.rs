//! The living room: the pet idles, glances around, sparkles drift up.
//! Patting is the only interaction.

use super::base::{SceneCore, Target};
use super::{Command, Phase, PetParams, Scene, SceneKind};
use crate::anim::{Ease, Millis, Tween};
use crate::canvas::{v2, Canvas2D, Color};
use crate::engine::Engine;
use crate::error::Result;
use crate::events::PetEvent;
use crate::particle::Particle;
use crate::pet::{PetChannel, PetInstance};
use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Cue {
    Sparkle,
    Glance,
}

pub struct RoomScene {
    core: SceneCore<Cue>,
}

impl RoomScene {
    pub fn new(engine: &Engine) -> Self {
        Self {
            core: SceneCore::new(SceneKind::Room, engine),
        }
    }

    fn floor_y(&self) -> f32 {
        self.core.stage.y * 0.8
    }

    fn paint_background(&mut self) {
        let (w, h) = (self.core.stage.x, self.core.stage.y);
        let floor = self.floor_y();
        let s = &mut self.core.background;

        let wall = Color::hex(0xF6E7D7);
        s.fill_rect(v2(0.0, 0.0), w, floor, wall);
        s.fill_rect(v2(0.0, floor - 34.0), w, 34.0, wall.darken(0.06));
        s.fill_rect(v2(0.0, floor - 36.0), w, 3.0, Color::hex(0xD9B99B));

        let wood = Color::hex(0xC89F73);
        s.fill_rect(v2(0.0, floor), w, h - floor, wood);
        let mut y = floor + 12.0;
        while y < h {
            s.line(v2(0.0, y), v2(w, y), 0.8, wood.darken(0.15));
            y += 14.0;
        }

        // window with a bit of sky
        let (wx, wy, ww, wh) = (w * 0.1, h * 0.13, 84.0, 66.0);
        s.fill_rect(v2(wx - 4.0, wy - 4.0), ww + 8.0, wh + 8.0, Color::hex(0xFFFFFF));
        s.fill_rect(v2(wx, wy), ww, wh, Color::hex(0xAEE1F9));
        s.fill_circle(v2(wx + 22.0, wy + 24.0), 9.0, Color::WHITE);
        s.fill_circle(v2(wx + 32.0, wy + 21.0), 11.0, Color::WHITE);
        s.fill_circle(v2(wx + 42.0, wy + 25.0), 8.0, Color::WHITE);
        s.line(v2(wx + ww / 2.0, wy), v2(wx + ww / 2.0, wy + wh), 2.0, Color::WHITE);
        s.line(v2(wx, wy + wh / 2.0), v2(wx + ww, wy + wh / 2.0), 2.0, Color::WHITE);
        s.fill_rect(v2(wx - 8.0, wy + wh + 4.0), ww + 16.0, 5.0, Color::hex(0xE0CDB6));

        // picture frame
        let (px, py) = (w * 0.72, h * 0.16);
        s.fill_rect(v2(px, py), 58.0, 44.0, Color::hex(0x8D6E63));
        s.fill_rect(v2(px + 4.0, py + 4.0), 50.0, 36.0, Color::hex(0xFFF3E0));
        s.fill_triangle(v2(px + 8.0, py + 36.0), v2(px + 26.0, py + 14.0), v2(px + 42.0, py + 36.0), Color::hex(0x81C784));
        s.fill_circle(v2(px + 42.0, py + 14.0), 4.0, Color::hex(0xFFB74D));

        // rug under the pet
        let cx = w * 0.5;
        s.fill_ellipse(v2(cx, floor + 14.0), 112.0, 18.0, 0.0, Color::hex(0xE57373));
        s.fill_ellipse(v2(cx, floor + 14.0), 92.0, 12.0, 0.0, Color::hex(0xEF9A9A));

        // potted plant in the corner
        let (ox, oy) = (w * 0.9, floor);
        s.fill_rect(v2(ox - 12.0, oy - 24.0), 24.0, 24.0, Color::hex(0xB0704F));
        s.fill_rect(v2(ox - 14.0, oy - 28.0), 28.0, 6.0, Color::hex(0x9A5E40));
        let leaf = Color::hex(0x66BB6A);
        for (dx, dy, a) in [(-10.0, -42.0, -0.6), (0.0, -50.0, 0.0), (10.0, -42.0, 0.6), (-4.0, -36.0, -0.2)] {
            s.fill_ellipse(v2(ox + dx, oy + dy), 5.0, 13.0, a, leaf);
        }
    }

    fn on_cue(&mut self, cue: Cue) {
        match cue {
            Cue::Sparkle => {
                let at = self.core.pet_pos()
                    + v2(
                        self.core.rng.gen_range(-55.0..55.0),
                        self.core.rng.gen_range(-80.0..-10.0),
                    );
                let p = Particle::sparkle(at, &mut self.core.rng);
                self.core.particles.spawn(p);
            }
            Cue::Glance => {
                let turn = self.core.rng.gen_bool(0.5);
                if let Some(pet) = &mut self.core.pet {
                    if turn {
                        pet.flipped = !pet.flipped;
                    }
                }
            }
        }
    }
}

impl Scene for RoomScene {
    fn kind(&self) -> SceneKind {
        self.core.kind()
    }

    fn phase(&self) -> Phase {
        self.core.phase()
    }

    fn init(&mut self, params: PetParams) -> Result<()> {
        self.core.begin_init(params)?;
        self.paint_background();
        let home = v2(self.core.stage.x * 0.5, self.floor_y() - 48.0);
        self.core.spawn_pet(home, 1.0);
        self.core.start_idle(1400, 0.035, true);
        self.core.tween(
            Tween::new(Target::Pet(PetChannel::Rotation), -0.05, 0.05, 2400)
                .ease(Ease::SineInOut)
                .yoyo()
                .forever(),
        );
        self.core.timers.every(900, Cue::Sparkle);
        self.core.timers.every(3200, Cue::Glance);
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
    use crate::error::EngineError;
    use crate::items::FoodItem;
    use crate::particle::ParticleKind;

    fn room() -> RoomScene {
        let mut scene = RoomScene::new(&Engine::default());
        scene.init(Breed::Cat(CatBreed::Siamese).into()).unwrap();
        scene
    }

    #[test]
    fn idle_loop_keeps_running() {
        let mut scene = room();
        let mut out = Vec::new();
        for _ in 0..3000 {
            scene.update(16, &mut out);
        }
        assert!(out.is_empty());
        assert!(scene.pending_work() >= 4);
        assert!(scene.core.particles.count(&ParticleKind::Sparkle) > 0);
    }

    #[test]
    fn pat_only_when_pointer_hits_pet() {
        let mut scene = room();
        let mut out = Vec::new();
        scene.handle(Command::PointerDown(v2(2.0, 2.0)), &mut out).unwrap();
        assert!(out.is_empty());
        let at = scene.pet().unwrap().pos;
        scene.handle(Command::PointerDown(at), &mut out).unwrap();
        assert_eq!(out, vec![PetEvent::Patted]);
    }

    #[test]
    fn feeding_is_not_a_room_thing() {
        let mut scene = room();
        let err = scene
            .handle(Command::Feed(FoodItem::new("fish", "Tuna", "")), &mut Vec::new())
            .unwrap_err();
        assert!(matches!(err, EngineError::Unsupported { scene: SceneKind::Room, .. }));
    }
}
