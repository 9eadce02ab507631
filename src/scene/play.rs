//! The garden: a toy comes in and the pet plays with it. Each known toy
//! has its own choreography; unknown toy ids get a generic hop-around.

use super::base::{SceneCore, Target};
use super::props::{self, Prop, PropChannel, PropId};
use super::{Command, Phase, PetParams, Scene, SceneKind};
use crate::anim::{Ease, Millis, Repeat, Tween};
use crate::canvas::{v2, Canvas2D, Color, Vec2};
use crate::engine::Engine;
use crate::error::Result;
use crate::events::PetEvent;
use crate::items::ToyKind;
use crate::particle::Particle;
use crate::pet::{PetChannel, PetInstance};
use crate::timeline::Timeline;
use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Cue {
    Leaf,
    Enter(ToyKind),
    Chase,
    Pounce(u8),
    Bat(u8),
    Jump(u8),
    Laser(u8),
    Catch,
    Exit,
    Return,
    Done,
}

/// Where the laser dot visits, as fractions of stage width.
const LASER_SPOTS: [f32; 4] = [0.2, 0.8, 0.35, 0.62];

fn choreography(toy: ToyKind) -> Timeline<Cue> {
    let tl = Timeline::new("play").then(0, Cue::Enter(toy));
    match toy {
        ToyKind::Ball => tl
            .then(750, Cue::Chase)
            .then(550, Cue::Pounce(0))
            .then(400, Cue::Pounce(1))
            .then(400, Cue::Pounce(2))
            .then(400, Cue::Exit)
            .then(650, Cue::Return)
            .then(650, Cue::Done),
        ToyKind::Yarn => tl
            .then(600, Cue::Chase)
            .then(550, Cue::Bat(0))
            .then(350, Cue::Bat(1))
            .then(350, Cue::Bat(2))
            .then(350, Cue::Bat(3))
            .then(400, Cue::Exit)
            .then(650, Cue::Return)
            .then(650, Cue::Done),
        ToyKind::Feather => tl
            .then(300, Cue::Jump(0))
            .then(500, Cue::Jump(1))
            .then(500, Cue::Jump(2))
            .then(500, Cue::Exit)
            .then(400, Cue::Done),
        ToyKind::Laser => tl
            .then(200, Cue::Laser(0))
            .then(450, Cue::Laser(1))
            .then(450, Cue::Laser(2))
            .then(450, Cue::Laser(3))
            .then(450, Cue::Exit)
            .then(200, Cue::Return)
            .then(650, Cue::Done),
        ToyKind::Frisbee => tl
            .then(300, Cue::Chase)
            .then(650, Cue::Catch)
            .then(400, Cue::Return)
            .then(700, Cue::Exit)
            .then(350, Cue::Done),
        ToyKind::Other => tl
            .then(600, Cue::Jump(0))
            .then(500, Cue::Jump(1))
            .then(500, Cue::Exit)
            .then(650, Cue::Done),
    }
}

pub struct PlayScene {
    core: SceneCore<Cue>,
    toy: Option<(PropId, ToyKind)>,
}

impl PlayScene {
    pub fn new(engine: &Engine) -> Self {
        Self {
            core: SceneCore::new(SceneKind::Play, engine),
            toy: None,
        }
    }

    fn floor_y(&self) -> f32 {
        self.core.stage.y * 0.8
    }

    fn paint_background(&mut self) {
        let (w, h) = (self.core.stage.x, self.core.stage.y);
        let floor = self.floor_y();
        let s = &mut self.core.background;

        let bands = [0x7EC8F2, 0x94D3F5, 0xAADDF7, 0xC1E7F9];
        let band_h = floor / bands.len() as f32;
        for (k, c) in bands.into_iter().enumerate() {
            s.fill_rect(v2(0.0, k as f32 * band_h), w, band_h + 1.0, Color::hex(c));
        }
        s.fill_circle(v2(w * 0.86, h * 0.14), 20.0, Color::hex(0xFFE082));
        s.fill_circle(v2(w * 0.86, h * 0.14), 15.0, Color::hex(0xFFD54F));
        for (cx, cy) in [(w * 0.25, h * 0.12), (w * 0.55, h * 0.2)] {
            s.fill_circle(v2(cx - 12.0, cy + 3.0), 10.0, Color::WHITE);
            s.fill_circle(v2(cx, cy), 13.0, Color::WHITE);
            s.fill_circle(v2(cx + 13.0, cy + 3.0), 9.0, Color::WHITE);
        }

        s.fill_ellipse(v2(w * 0.2, floor), w * 0.4, 50.0, 0.0, Color::hex(0x9CCC65));
        s.fill_ellipse(v2(w * 0.8, floor), w * 0.45, 40.0, 0.0, Color::hex(0x8BC34A));

        // trees
        for tx in [w * 0.08, w * 0.9] {
            s.fill_rect(v2(tx - 5.0, floor - 70.0), 10.0, 70.0, Color::hex(0x795548));
            let canopy = Color::hex(0x4CAF50);
            s.fill_circle(v2(tx, floor - 88.0), 26.0, canopy);
            s.fill_circle(v2(tx - 18.0, floor - 72.0), 18.0, canopy.darken(0.1));
            s.fill_circle(v2(tx + 18.0, floor - 74.0), 18.0, canopy.lighten(0.1));
        }

        // fence
        let picket = Color::hex(0xFFFDF5);
        s.fill_rect(v2(0.0, floor - 28.0), w, 4.0, picket.darken(0.05));
        s.fill_rect(v2(0.0, floor - 14.0), w, 4.0, picket.darken(0.05));
        let mut x = 6.0;
        while x < w {
            s.fill_rect(v2(x, floor - 36.0), 8.0, 36.0, picket);
            s.fill_triangle(v2(x, floor - 36.0), v2(x + 8.0, floor - 36.0), v2(x + 4.0, floor - 41.0), picket);
            x += 18.0;
        }

        let grass = Color::hex(0x7CB342);
        s.fill_rect(v2(0.0, floor), w, h - floor, grass);
        let mut gx = 4.0;
        let mut k = 0;
        while gx < w {
            let gy = floor + 6.0 + (k % 4) as f32 * 9.0;
            s.line(v2(gx, gy), v2(gx - 2.0, gy - 5.0), 0.8, grass.darken(0.2));
            if k % 7 == 3 {
                let petal = if k % 2 == 0 { 0xF06292 } else { 0xFFF176 };
                s.fill_circle(v2(gx + 3.0, gy + 2.0), 2.4, Color::hex(petal));
                s.fill_circle(v2(gx + 3.0, gy + 2.0), 0.9, Color::hex(0xFFA000));
            }
            gx += 11.0;
            k += 1;
        }
    }

    fn toy_id(&self) -> Option<PropId> {
        self.toy.map(|(id, _)| id)
    }

    fn scale(&self) -> f32 {
        self.core.pet.as_ref().map_or(1.0, |p| p.scale)
    }

    fn face(&mut self, x: f32) {
        if let Some(pet) = &mut self.core.pet {
            pet.flipped = x < pet.pos.x;
        }
    }

    fn hop(&mut self, height: f32, ms: Millis) {
        self.core.tween(
            Tween::new(Target::Pet(PetChannel::Lift), 0.0, -height, ms)
                .ease(Ease::QuadOut)
                .yoyo()
                .repeat(Repeat::Times(2)),
        );
    }

    fn sparkles_at(&mut self, at: Vec2, n: usize) {
        for _ in 0..n {
            let p = Particle::sparkle(at, &mut self.core.rng);
            self.core.particles.spawn(p);
        }
    }

    fn enter(&mut self, kind: ToyKind) {
        if let Some((old, _)) = self.toy.take() {
            self.core.remove_prop(old);
        }
        let (w, h) = (self.core.stage.x, self.core.stage.y);
        let floor = self.floor_y();
        let home = self.core.home;
        let start = match kind {
            ToyKind::Ball => v2(w + 20.0, floor - 60.0),
            ToyKind::Yarn => v2(w * 0.7, -20.0),
            ToyKind::Feather => v2(home.x + 44.0, home.y - 24.0),
            ToyKind::Laser => v2(w * 0.85, floor - 2.0),
            ToyKind::Frisbee => v2(-20.0, h * 0.3),
            ToyKind::Other => v2(home.x + 70.0, -20.0),
        };
        let mut prop = Prop::new(props::toy(kind), start);
        if matches!(kind, ToyKind::Feather | ToyKind::Laser) {
            prop.alpha = 0.0;
        }
        let id = self.core.add_prop(prop);
        self.toy = Some((id, kind));
        match kind {
            ToyKind::Ball => {
                self.core.tween_prop(id, PropChannel::X, w * 0.72, 700, Ease::QuadOut);
                self.core.tween_prop(id, PropChannel::Y, floor - 9.0, 700, Ease::BounceOut);
                self.core.tween_prop(id, PropChannel::Rotation, -6.0, 700, Ease::QuadOut);
            }
            ToyKind::Yarn => {
                self.core.tween_prop(id, PropChannel::Y, floor - 10.0, 600, Ease::BounceOut);
            }
            ToyKind::Feather => {
                self.core.tween_prop(id, PropChannel::Alpha, 1.0, 200, Ease::Linear);
                self.core.tween(
                    Tween::new(Target::Prop(id, PropChannel::Rotation), -0.5, 0.5, 450)
                        .ease(Ease::SineInOut)
                        .yoyo()
                        .forever(),
                );
            }
            ToyKind::Laser => {
                self.core.tween_prop(id, PropChannel::Alpha, 1.0, 150, Ease::Linear);
            }
            ToyKind::Frisbee => {
                self.core.tween_prop(id, PropChannel::X, w * 0.72, 900, Ease::Linear);
                self.core.tween_prop(id, PropChannel::Y, floor - 70.0, 900, Ease::SineInOut);
                self.core.tween_prop(id, PropChannel::Rotation, 8.0, 900, Ease::Linear);
            }
            ToyKind::Other => {
                self.core.tween_prop(id, PropChannel::Y, floor - 10.0, 600, Ease::BounceOut);
            }
        }
    }

    fn on_cue(&mut self, cue: Cue) {
        let w = self.core.stage.x;
        match cue {
            Cue::Leaf => {
                let at = v2(
                    self.core.rng.gen_range(0.0..w),
                    self.core.rng.gen_range(self.core.stage.y * 0.1..self.core.stage.y * 0.35),
                );
                let p = Particle::leaf(at, &mut self.core.rng);
                self.core.particles.spawn(p);
            }
            Cue::Enter(kind) => self.enter(kind),
            Cue::Chase => {
                // frisbees are chased to where they will land, not where they are
                let target_x = match self.toy {
                    Some((_, ToyKind::Frisbee)) => w * 0.72,
                    Some((id, _)) => self.core.prop_pos(id).map_or(w * 0.72, |p| p.x),
                    None => return,
                };
                self.face(target_x);
                let gap = 56.0 * self.scale();
                let dir = if self.core.pet.as_ref().is_some_and(|p| p.flipped) { -1.0 } else { 1.0 };
                self.core
                    .tween_pet(PetChannel::X, target_x - gap * dir, 500, Ease::QuadOut);
            }
            Cue::Pounce(_) => {
                self.hop(14.0, 160);
                if let Some(id) = self.toy_id() {
                    if let Some(at) = self.core.prop_pos(id) {
                        self.sparkles_at(at, 2);
                        self.core.tween_prop(id, PropChannel::X, at.x + 8.0, 200, Ease::QuadOut);
                    }
                    let spin = self.core.props.get(id).map_or(0.0, |p| p.rotation) + 1.0;
                    self.core.tween_prop(id, PropChannel::Rotation, spin, 200, Ease::QuadOut);
                }
            }
            Cue::Bat(i) => {
                let side = if i % 2 == 0 { 1.0 } else { -1.0 };
                self.core.tween(
                    Tween::new(Target::Pet(PetChannel::Rotation), 0.0, 0.14 * side, 150)
                        .ease(Ease::QuadOut)
                        .yoyo()
                        .repeat(Repeat::Times(2)),
                );
                if let Some(id) = self.toy_id() {
                    if let Some(at) = self.core.prop_pos(id) {
                        self.core
                            .tween_prop(id, PropChannel::X, at.x + 10.0 * side, 220, Ease::QuadOut);
                        self.sparkles_at(at, 1);
                    }
                    self.core
                        .tween_prop(id, PropChannel::Rotation, 1.5 * side, 220, Ease::QuadOut);
                }
            }
            Cue::Jump(_) => {
                self.hop(30.0, 220);
                let head = self.core.pet_head();
                self.sparkles_at(head, 2);
                if let Some((id, ToyKind::Other)) = self.toy {
                    let spin = self.core.props.get(id).map_or(0.0, |p| p.rotation) + 3.0;
                    self.core.tween_prop(id, PropChannel::Rotation, spin, 400, Ease::QuadOut);
                }
            }
            Cue::Laser(i) => {
                let spot = w * LASER_SPOTS[i as usize % LASER_SPOTS.len()];
                if let Some(id) = self.toy_id() {
                    self.core.tween_prop(id, PropChannel::X, spot, 300, Ease::QuadOut);
                }
                self.face(spot);
                let gap = 40.0 * self.scale();
                let dir = if self.core.pet.as_ref().is_some_and(|p| p.flipped) { -1.0 } else { 1.0 };
                self.core
                    .tween_pet(PetChannel::X, spot - gap * dir, 420, Ease::QuadOut);
                self.hop(8.0, 140);
            }
            Cue::Catch => {
                self.hop(30.0, 200);
                let mouth = self.core.pet_head() + v2(0.0, 30.0);
                if let Some(id) = self.toy_id() {
                    self.core.tween_prop(id, PropChannel::X, mouth.x, 250, Ease::QuadOut);
                    self.core.tween_prop(id, PropChannel::Y, mouth.y, 250, Ease::QuadOut);
                    self.core.tween_prop(id, PropChannel::Rotation, 0.0, 250, Ease::QuadOut);
                }
                self.core
                    .particles
                    .spawn(Particle::label(mouth + v2(0.0, -44.0), "!", Color::hex(0xFF7043)));
            }
            Cue::Exit => {
                let Some((id, kind)) = self.toy else {
                    return;
                };
                match kind {
                    ToyKind::Ball | ToyKind::Yarn => {
                        self.core.tween_prop(id, PropChannel::X, w + 40.0, 600, Ease::QuadIn);
                        let spin = self.core.props.get(id).map_or(0.0, |p| p.rotation) + 8.0;
                        self.core.tween_prop(id, PropChannel::Rotation, spin, 600, Ease::QuadIn);
                    }
                    ToyKind::Other => {
                        self.core.tween_prop(id, PropChannel::Alpha, 0.0, 400, Ease::Linear);
                        self.core.tween_prop(id, PropChannel::Scale, 0.0, 400, Ease::QuadIn);
                    }
                    ToyKind::Feather | ToyKind::Laser | ToyKind::Frisbee => {
                        self.core.tween_prop(id, PropChannel::Alpha, 0.0, 300, Ease::Linear);
                    }
                }
            }
            Cue::Return => {
                let home = self.core.home.x;
                self.face(home);
                self.core
                    .tween_pet(PetChannel::X, home, 600, Ease::SineInOut);
                if let Some((id, ToyKind::Frisbee)) = self.toy {
                    self.core
                        .tween_prop(id, PropChannel::X, home + 10.0, 600, Ease::SineInOut);
                }
            }
            Cue::Done => {
                if let Some((id, _)) = self.toy.take() {
                    self.core.remove_prop(id);
                }
                if let Some(pet) = &mut self.core.pet {
                    pet.flipped = false;
                }
            }
        }
    }
}

impl Scene for PlayScene {
    fn kind(&self) -> SceneKind {
        self.core.kind()
    }

    fn phase(&self) -> Phase {
        self.core.phase()
    }

    fn init(&mut self, params: PetParams) -> Result<()> {
        self.core.begin_init(params)?;
        self.paint_background();
        let home = v2(self.core.stage.x * 0.3, self.floor_y() - 48.0);
        self.core.spawn_pet(home, 1.0);
        self.core.start_idle(1200, 0.04, true);
        self.core.timers.every(1500, Cue::Leaf);
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
            Command::Play { toy_id } => {
                let tl = choreography(ToyKind::from_id(&toy_id));
                self.core.try_start(tl, PetEvent::Played { toy_id });
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
        self.toy = None;
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

    fn garden() -> PlayScene {
        let mut scene = PlayScene::new(&Engine::default());
        scene.init(Breed::Dog(DogBreed::Corgi).into()).unwrap();
        scene
    }

    fn play(scene: &mut PlayScene, toy: &str) -> Vec<PetEvent> {
        scene
            .handle(Command::Play { toy_id: toy.into() }, &mut Vec::new())
            .unwrap();
        let mut out = Vec::new();
        for _ in 0..400 {
            scene.update(16, &mut out);
        }
        out
    }

    #[test]
    fn every_toy_reports_its_own_id() {
        for toy in ["ball", "yarn", "feather", "laser", "frisbee", "squeaky-duck"] {
            let mut scene = garden();
            let out = play(&mut scene, toy);
            assert_eq!(out, vec![PetEvent::Played { toy_id: toy.into() }], "{toy}");
            assert!(scene.toy.is_none(), "{toy} left behind");
            assert!(!scene.pet().unwrap().flipped);
        }
    }

    #[test]
    fn pet_is_back_home_after_playing() {
        let mut scene = garden();
        let home = scene.core.home.x;
        play(&mut scene, "laser");
        assert!((scene.pet().unwrap().pos.x - home).abs() < 0.5);
    }

    #[test]
    fn choreographies_are_bounded() {
        for toy in [
            ToyKind::Ball,
            ToyKind::Yarn,
            ToyKind::Feather,
            ToyKind::Laser,
            ToyKind::Frisbee,
            ToyKind::Other,
        ] {
            let tl = choreography(toy);
            assert!(tl.remaining() < 6000, "{toy:?}");
            assert!(tl.pending() >= 3);
        }
    }

    #[test]
    fn play_while_busy_is_dropped() {
        let mut scene = garden();
        scene
            .handle(Command::Play { toy_id: "ball".into() }, &mut Vec::new())
            .unwrap();
        let out = play(&mut scene, "yarn");
        assert_eq!(out, vec![PetEvent::Played { toy_id: "ball".into() }]);
    }
}
