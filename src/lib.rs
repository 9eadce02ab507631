//! Procedural pet rendering and scene orchestration.
//!
//! Pets are drawn from vector primitives only, parameterised by species and
//! breed. Five small scenes (room, feed, play, bath, sleep) animate the pet
//! with tick-driven timers, tweens and particles, and report interactions
//! back to the host as [`PetEvent`]s.

pub mod anim;
pub mod breed;
pub mod canvas;
pub mod engine;
pub mod error;
pub mod events;
pub mod host;
pub mod items;
pub mod painter;
pub mod particle;
pub mod pet;
pub mod raster;
pub mod scene;
pub mod timeline;

pub use breed::{Breed, BreedConfig, CatBreed, DogBreed, PetKind};
pub use canvas::{v2, Canvas2D, Color, Surface, Vec2};
pub use engine::{Engine, EngineConfig};
pub use error::{EngineError, Result};
pub use events::{EventBus, PetEvent, SubscriptionId};
pub use host::GameHost;
pub use items::{FoodItem, ToyItem};
pub use pet::PetInstance;
pub use raster::PixelCanvas;
pub use scene::{Command, PetParams, Scene, SceneKind};
