//! The kitchen: food drops into the bowl, the pet trots over and eats.

use super::base::{SceneCore, Target};
use super::props::{self, Prop, PropChannel, PropId};
use super::{Command, Phase, PetParams, Scene, SceneKind};
use crate::anim::{Ease, Millis, Repeat, Tween};
use crate::breed::PetKind;
use crate::canvas::{v2, Canvas2D, Color, Vec2};
use crate::engine::Engine;
use crate::error::Result;
use crate::events::PetEvent;
use crate::items::{FoodItem, FoodShape};
use crate::particle::Particle;
use crate::pet::{PetChannel, PetInstance};
use crate::timeline::Timeline;
use rand::Rng;

const BITES: u8 = 3;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Cue {
    Shine,
    DropFood(FoodShape),
    Approach,
    Nom(u8),
    ClearFood,
    Return,
    Done,
}

pub struct FeedScene {
    core: SceneCore<Cue>,
    bowl: Vec2,
    food: Option<(PropId, FoodShape)>,
}

impl FeedScene {
    pub fn new(engine: &Engine) -> Self {
        Self {
            core: SceneCore::new(SceneKind::Feed, engine),
            bowl: Vec2::ZERO,
            food: None,
        }
    }

    fn floor_y(&self) -> f32 {
        self.core.stage.y * 0.8
    }

    fn paint_background(&mut self) {
        let (w, h) = (self.core.stage.x, self.core.stage.y);
        let floor = self.floor_y();
        let s = &mut self.core.background;

        s.fill_rect(v2(0.0, 0.0), w, floor, Color::hex(0xFFF8E1));

        // checkered tiles
        let tile = 20.0;
        let (a, b) = (Color::hex(0xECEFF1), Color::hex(0xB0BEC5));
        let mut row = 0;
        let mut y = floor;
        while y < h {
            let mut x = 0.0;
            let mut col = row;
            while x < w {
                s.fill_rect(v2(x, y), tile, tile, if col % 2 == 0 { a } else { b });
                x += tile;
                col += 1;
            }
            y += tile;
            row += 1;
        }

        // counter and cupboards along the back
        let counter = Color::hex(0x90A4AE);
        s.fill_rect(v2(0.0, floor - 70.0), w * 0.42, 70.0, Color::hex(0xFFCC80));
        s.fill_rect(v2(0.0, floor - 76.0), w * 0.42 + 6.0, 8.0, counter);
        for k in 0..3 {
            let x = 8.0 + k as f32 * (w * 0.42 - 8.0) / 3.0;
            s.fill_rect(v2(x, floor - 60.0), w * 0.12, 52.0, Color::hex(0xFFB74D));
            s.fill_circle(v2(x + w * 0.12 - 8.0, floor - 34.0), 2.0, Color::hex(0x6D4C41));
        }

        // shelf with jars
        let (sx, sy) = (w * 0.55, h * 0.22);
        s.fill_rect(v2(sx, sy), w * 0.36, 5.0, Color::hex(0x8D6E63));
        let jars = [0xEF5350, 0x66BB6A, 0x42A5F5, 0xFFCA28];
        for (k, c) in jars.into_iter().enumerate() {
            let x = sx + 10.0 + k as f32 * 30.0;
            s.fill_rect(v2(x, sy - 22.0), 18.0, 22.0, Color::hex(c).lighten(0.3));
            s.fill_rect(v2(x - 1.0, sy - 26.0), 20.0, 5.0, Color::hex(c));
        }

        // placemat under the bowl
        s.fill_ellipse(
            v2(w * 0.68, floor + 4.0),
            44.0,
            10.0,
            0.0,
            Color::hex(0xE57373),
        );
    }

    fn feed_timeline() -> Vec<(Millis, Cue)> {
        let mut steps = vec![(550, Cue::Approach)];
        steps.extend((0..BITES).map(|i| (if i == 0 { 650 } else { 450 }, Cue::Nom(i))));
        steps.extend([(450, Cue::ClearFood), (300, Cue::Return), (650, Cue::Done)]);
        steps
    }

    fn start_feed(&mut self, food: FoodItem) {
        let shape = match FoodShape::from_id(&food.id) {
            FoodShape::Generic => FoodShape::from_id(&food.label),
            known => known,
        };
        let mut tl = Timeline::new("feed").then(0, Cue::DropFood(shape));
        for (wait, cue) in Self::feed_timeline() {
            tl.push(wait, cue);
        }
        self.core.try_start(
            tl,
            PetEvent::Fed {
                food_label: food.label,
            },
        );
    }

    fn on_cue(&mut self, cue: Cue) {
        match cue {
            Cue::Shine => {
                let at = self.bowl + v2(self.core.rng.gen_range(-18.0..18.0), -12.0);
                let p = Particle::sparkle(at, &mut self.core.rng);
                self.core.particles.spawn(p);
            }
            Cue::DropFood(shape) => {
                if let Some((old, _)) = self.food.take() {
                    self.core.remove_prop(old);
                }
                let id = self
                    .core
                    .add_prop(Prop::new(props::food(shape), v2(self.bowl.x, -24.0)));
                self.core
                    .tween_prop(id, PropChannel::Y, self.bowl.y - 13.0, 500, Ease::BounceOut);
                self.food = Some((id, shape));
            }
            Cue::Approach => {
                if let Some(pet) = &mut self.core.pet {
                    pet.flipped = false;
                }
                let scale = self.core.pet.as_ref().map_or(1.0, |p| p.scale);
                self.core
                    .tween_pet(PetChannel::X, self.bowl.x - 62.0 * scale, 600, Ease::QuadOut);
            }
            Cue::Nom(i) => {
                self.core.tween(
                    Tween::new(Target::Pet(PetChannel::Lift), 0.0, 6.0, 180)
                        .ease(Ease::QuadOut)
                        .yoyo()
                        .repeat(Repeat::Times(2)),
                );
                let label_at = self.core.pet_head() + v2(18.0, 0.0);
                self.core
                    .particles
                    .spawn(Particle::label(label_at, "nom", Color::hex(0x5D4037)));
                if let Some((id, shape)) = self.food {
                    let left = 1.0 - (i + 1) as f32 / (BITES + 1) as f32;
                    self.core
                        .tween_prop(id, PropChannel::Scale, left, 150, Ease::QuadOut);
                    let at = self.core.prop_pos(id).unwrap_or(self.bowl);
                    for _ in 0..4 {
                        let c = Particle::crumb(at, props::food_color(shape), &mut self.core.rng);
                        self.core.particles.spawn(c);
                    }
                }
            }
            Cue::ClearFood => {
                if let Some((id, _)) = self.food.take() {
                    self.core.remove_prop(id);
                }
                let head = self.core.pet_head();
                for _ in 0..2 {
                    let h = Particle::heart(head, &mut self.core.rng);
                    self.core.particles.spawn(h);
                }
            }
            Cue::Return => {
                let home = self.core.home.x;
                self.core
                    .tween_pet(PetChannel::X, home, 600, Ease::SineInOut);
            }
            Cue::Done => {}
        }
    }
}

impl Scene for FeedScene {
    fn kind(&self) -> SceneKind {
        self.core.kind()
    }

    fn phase(&self) -> Phase {
        self.core.phase()
    }

    fn init(&mut self, params: PetParams) -> Result<()> {
        self.core.begin_init(params)?;
        self.paint_background();
        let floor = self.floor_y();
        let w = self.core.stage.x;
        self.bowl = v2(w * 0.68, floor - 2.0);
        let bowl_color = match params.kind {
            PetKind::Cat => Color::hex(0x4FC3F7),
            PetKind::Dog => Color::hex(0xE53935),
        };
        self.core.add_prop(Prop::new(props::bowl(bowl_color), self.bowl));
        self.core.spawn_pet(v2(w * 0.3, floor - 48.0), 1.0);
        self.core.start_idle(1400, 0.035, true);
        self.core.timers.every(1800, Cue::Shine);
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
            Command::Feed(food) => {
                self.start_feed(food);
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
        self.food = None;
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
    use crate::particle::ParticleKind;

    fn kitchen() -> FeedScene {
        let mut scene = FeedScene::new(&Engine::default());
        scene.init(Breed::Dog(DogBreed::Husky).into()).unwrap();
        scene
    }

    fn run(scene: &mut FeedScene, ms: u32) -> Vec<PetEvent> {
        let mut out = Vec::new();
        for _ in 0..ms / 16 {
            scene.update(16, &mut out);
        }
        out
    }

    #[test]
    fn double_feed_reports_once() {
        let mut scene = kitchen();
        let bone = FoodItem::new("bone", "Meaty Bone", "");
        scene.handle(Command::Feed(bone.clone()), &mut Vec::new()).unwrap();
        scene.handle(Command::Feed(bone), &mut Vec::new()).unwrap();
        let out = run(&mut scene, 6000);
        assert_eq!(
            out,
            vec![PetEvent::Fed {
                food_label: "Meaty Bone".into()
            }]
        );
        assert!(!scene.is_busy());
    }

    #[test]
    fn pet_walks_to_bowl_eats_and_returns() {
        let mut scene = kitchen();
        let home = scene.pet().unwrap().pos.x;
        scene
            .handle(Command::Feed(FoodItem::new("fish", "Tuna", "")), &mut Vec::new())
            .unwrap();
        run(&mut scene, 1800);
        assert!(scene.pet().unwrap().pos.x > home + 50.0);
        assert!(scene.food.is_some());
        assert!(scene.core.particles.iter().any(|p| p.kind == ParticleKind::Label("nom".into())));
        run(&mut scene, 4000);
        assert!(scene.food.is_none());
        assert!((scene.pet().unwrap().pos.x - home).abs() < 0.5);
    }

    #[test]
    fn teardown_mid_meal_stays_silent() {
        let mut scene = kitchen();
        scene
            .handle(Command::Feed(FoodItem::new("milk", "Milk", "")), &mut Vec::new())
            .unwrap();
        run(&mut scene, 900);
        scene.teardown();
        assert!(run(&mut scene, 6000).is_empty());
        assert_eq!(scene.pending_work(), 0);
    }

    #[test]
    fn splash_is_refused() {
        let mut scene = kitchen();
        assert!(scene.handle(Command::Splash, &mut Vec::new()).is_err());
    }
}
