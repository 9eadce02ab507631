//! The five interactive scenes.
//!
//! Every scene goes `Constructing -> Ready -> TornDown`. Construction is
//! split in two on purpose: [`create`] only allocates, [`Scene::init`] draws
//! the background, spawns the pet, wires ambient timers and flips the scene
//! to ready. Commands before that are refused with [`EngineError::NotReady`].

mod base;
mod bath;
mod feed;
mod play;
mod props;
mod room;
mod sleep;

pub use bath::BathScene;
pub use feed::FeedScene;
pub use play::PlayScene;
pub use props::{PropChannel, PropId};
pub use room::RoomScene;
pub use sleep::SleepScene;

use crate::anim::Millis;
use crate::breed::{Breed, PetKind};
use crate::canvas::{Canvas2D, Vec2};
use crate::engine::Engine;
use crate::error::{EngineError, Result};
use crate::events::PetEvent;
use crate::items::FoodItem;
use crate::pet::PetInstance;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SceneKind {
    Room,
    Feed,
    Play,
    Bath,
    Sleep,
}

impl SceneKind {
    pub const ALL: [SceneKind; 5] = [
        SceneKind::Room,
        SceneKind::Feed,
        SceneKind::Play,
        SceneKind::Bath,
        SceneKind::Sleep,
    ];

    pub fn id(self) -> &'static str {
        match self {
            SceneKind::Room => "room",
            SceneKind::Feed => "feed",
            SceneKind::Play => "play",
            SceneKind::Bath => "bath",
            SceneKind::Sleep => "sleep",
        }
    }
}

impl fmt::Display for SceneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for SceneKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        SceneKind::ALL
            .iter()
            .copied()
            .find(|k| k.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| EngineError::UnknownScene(s.to_string()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Constructing,
    Ready,
    TornDown,
}

impl Phase {
    pub fn name(self) -> &'static str {
        match self {
            Phase::Constructing => "constructing",
            Phase::Ready => "ready",
            Phase::TornDown => "torn down",
        }
    }
}

/// The `(kind, breed)` selection a scene is built for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PetParams {
    pub kind: PetKind,
    pub breed: Breed,
}

impl PetParams {
    pub fn new(kind: PetKind, breed: Breed) -> Result<Self> {
        if breed.kind() != kind {
            return Err(EngineError::BreedKindMismatch {
                kind: kind.id().to_string(),
                breed: breed.id().to_string(),
            });
        }
        Ok(Self { kind, breed })
    }

    pub fn parse(kind: &str, breed: &str) -> Result<Self> {
        let breed = Breed::parse(kind, breed)?;
        Ok(Self {
            kind: breed.kind(),
            breed,
        })
    }
}

impl From<Breed> for PetParams {
    fn from(breed: Breed) -> Self {
        Self {
            kind: breed.kind(),
            breed,
        }
    }
}

/// Requests a scene can receive from its host.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Pointer pressed at a stage-space position.
    PointerDown(Vec2),
    Feed(FoodItem),
    Play { toy_id: String },
    Splash,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::PointerDown(_) => "pointer down",
            Command::Feed(_) => "feed",
            Command::Play { .. } => "play",
            Command::Splash => "splash",
        }
    }
}

pub trait Scene {
    fn kind(&self) -> SceneKind;

    fn phase(&self) -> Phase;

    /// Build everything and become ready. Only valid once, while
    /// constructing.
    fn init(&mut self, params: PetParams) -> Result<()>;

    fn is_ready(&self) -> bool {
        self.phase() == Phase::Ready
    }

    /// Apply a host command. Events it causes synchronously (a pat) are
    /// pushed to `out`. A big action requested while another is running is
    /// silently dropped.
    fn handle(&mut self, command: Command, out: &mut Vec<PetEvent>) -> Result<()>;

    /// Advance one logical tick. Does nothing unless ready.
    fn update(&mut self, dt: Millis, out: &mut Vec<PetEvent>);

    fn draw(&self, canvas: &mut dyn Canvas2D);

    /// Cancel every timer, tween and in-flight action and drop the pet.
    /// Abandoned actions never emit.
    fn teardown(&mut self);

    fn pet(&self) -> Option<&PetInstance>;

    /// True while a feed/play/splash action is in flight.
    fn is_busy(&self) -> bool;

    /// Live timers plus tweens plus pending action steps.
    fn pending_work(&self) -> usize;
}

pub fn create(kind: SceneKind, engine: &Engine) -> Box<dyn Scene> {
    match kind {
        SceneKind::Room => Box::new(RoomScene::new(engine)),
        SceneKind::Feed => Box::new(FeedScene::new(engine)),
        SceneKind::Play => Box::new(PlayScene::new(engine)),
        SceneKind::Bath => Box::new(BathScene::new(engine)),
        SceneKind::Sleep => Box::new(SleepScene::new(engine)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breed::{CatBreed, DogBreed};

    #[test]
    fn scene_ids_round_trip() {
        for k in SceneKind::ALL {
            assert_eq!(k.id().parse::<SceneKind>().unwrap(), k);
        }
        assert!("garage".parse::<SceneKind>().is_err());
    }

    #[test]
    fn params_reject_mismatched_species() {
        assert!(PetParams::new(PetKind::Cat, Breed::Dog(DogBreed::Husky)).is_err());
        let p = PetParams::new(PetKind::Cat, Breed::Cat(CatBreed::Siamese)).unwrap();
        assert_eq!(p, PetParams::parse("cat", "siamese").unwrap());
    }

    #[test]
    fn every_scene_goes_constructing_ready_torn_down() {
        let engine = Engine::default();
        for kind in SceneKind::ALL {
            let mut scene = create(kind, &engine);
            assert_eq!(scene.phase(), Phase::Constructing);
            assert!(scene.pet().is_none());
            scene.init(Breed::Cat(CatBreed::Calico).into()).unwrap();
            assert!(scene.is_ready(), "{kind} not ready");
            assert!(scene.pet().is_some());
            assert!(scene.init(Breed::Cat(CatBreed::Calico).into()).is_err());
            scene.teardown();
            assert_eq!(scene.phase(), Phase::TornDown);
            assert_eq!(scene.pending_work(), 0);
            assert!(scene.pet().is_none());
        }
    }

    #[test]
    fn commands_before_ready_are_refused() {
        let engine = Engine::default();
        for kind in SceneKind::ALL {
            let mut scene = create(kind, &engine);
            let mut out = Vec::new();
            let err = scene
                .handle(Command::PointerDown(Vec2::ZERO), &mut out)
                .unwrap_err();
            assert!(matches!(err, EngineError::NotReady { .. }), "{kind}: {err}");
            assert!(out.is_empty());
        }
    }
}
