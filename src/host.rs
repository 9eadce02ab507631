//! The public facade a host application talks to.
//!
//! `GameHost` owns the engine, the one live scene and the event bus. Every
//! scene switch or pet change is a full restart: the old scene is torn down
//! first, so nothing it scheduled can fire into the new one.

use crate::anim::Millis;
use crate::breed::{Breed, PetKind};
use crate::canvas::{Canvas2D, Vec2};
use crate::engine::Engine;
use crate::error::Result;
use crate::events::{EventBus, PetEvent, SubscriptionId};
use crate::items::FoodItem;
use crate::scene::{self, Command, PetParams, Scene, SceneKind};
use std::time::Duration;

pub struct GameHost {
    engine: Engine,
    active: SceneKind,
    params: PetParams,
    scene: Box<dyn Scene>,
    bus: EventBus,
    /// Bumped on every restart.
    generation: u64,
}

impl GameHost {
    pub fn boot(engine: Engine, active: SceneKind, params: PetParams) -> Result<Self> {
        let scene = Self::build(&engine, active, params)?;
        log::info!("booted into {active} with {}", params.breed);
        Ok(Self {
            engine,
            active,
            params,
            scene,
            bus: EventBus::new(),
            generation: 0,
        })
    }

    fn build(engine: &Engine, kind: SceneKind, params: PetParams) -> Result<Box<dyn Scene>> {
        let mut scene = scene::create(kind, engine);
        scene.init(params)?;
        Ok(scene)
    }

    fn restart(&mut self, kind: SceneKind, params: PetParams) -> Result<()> {
        self.scene.teardown();
        self.scene = Self::build(&self.engine, kind, params)?;
        self.active = kind;
        self.params = params;
        self.generation += 1;
        log::info!("restarted {kind} with {}", params.breed);
        Ok(())
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn active_scene(&self) -> SceneKind {
        self.active
    }

    pub fn params(&self) -> PetParams {
        self.params
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn scene(&self) -> &dyn Scene {
        self.scene.as_ref()
    }

    pub fn is_scene_ready(&self) -> bool {
        self.scene.is_ready()
    }

    pub fn subscribe(&mut self, handler: impl FnMut(&PetEvent) + 'static) -> SubscriptionId {
        self.bus.subscribe(handler)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    pub fn switch_scene(&mut self, kind: SceneKind) -> Result<()> {
        self.restart(kind, self.params)
    }

    pub fn switch_scene_by_id(&mut self, id: &str) -> Result<()> {
        let kind = id.parse()?;
        self.switch_scene(kind)
    }

    /// Change species and breed. The active scene restarts with the new pet.
    pub fn set_pet_type(&mut self, kind: PetKind, breed: Breed) -> Result<()> {
        let params = PetParams::new(kind, breed)?;
        self.restart(self.active, params)
    }

    /// Like [`set_pet_type`](Self::set_pet_type) but from string ids. Ids
    /// are resolved before anything is torn down, so a bad id leaves the
    /// running scene alone.
    pub fn set_pet_type_by_id(&mut self, kind: &str, breed: &str) -> Result<()> {
        let params = PetParams::parse(kind, breed)?;
        self.restart(self.active, params)
    }

    /// Step through the breeds of the current species, wrapping around.
    pub fn cycle_breed(&mut self, step: i32) -> Result<()> {
        let next = self.params.breed.cycle(step);
        self.restart(self.active, next.into())
    }

    /// Swap cat for dog (or back), starting from the species' default breed.
    pub fn toggle_kind(&mut self) -> Result<()> {
        let kind = match self.params.kind {
            PetKind::Cat => PetKind::Dog,
            PetKind::Dog => PetKind::Cat,
        };
        self.set_pet_type(kind, kind.default_breed())
    }

    /// Rebuild the current scene from scratch with the same pet.
    pub fn reset(&mut self) -> Result<()> {
        self.restart(self.active, self.params)
    }

    fn command(&mut self, command: Command) -> Result<()> {
        let mut out = Vec::new();
        let result = self.scene.handle(command, &mut out);
        self.dispatch(out);
        result
    }

    pub fn feed_pet(&mut self, food: FoodItem) -> Result<()> {
        self.command(Command::Feed(food))
    }

    pub fn play_with(&mut self, toy_id: &str) -> Result<()> {
        self.command(Command::Play {
            toy_id: toy_id.to_string(),
        })
    }

    pub fn splash(&mut self) -> Result<()> {
        self.command(Command::Splash)
    }

    pub fn pointer_down(&mut self, at: Vec2) -> Result<()> {
        self.command(Command::PointerDown(at))
    }

    /// Feed real elapsed time; runs as many fixed steps as are due.
    pub fn tick(&mut self, elapsed: Duration) {
        let steps = self.engine.ticker_mut().feed(elapsed);
        let dt = self.engine.ticker().step_ms();
        for _ in 0..steps {
            self.step(dt);
        }
    }

    /// Run exactly `ms` of logical time in fixed steps, ignoring the
    /// per-frame cap. Meant for tests and headless drivers.
    pub fn advance(&mut self, ms: u64) {
        let dt = self.engine.ticker().step_ms().max(1);
        let mut left = ms;
        while left > 0 {
            let step = left.min(dt as u64) as Millis;
            self.step(step);
            left -= step as u64;
        }
    }

    fn step(&mut self, dt: Millis) {
        let mut out = Vec::new();
        self.scene.update(dt, &mut out);
        self.dispatch(out);
    }

    fn dispatch(&mut self, events: Vec<PetEvent>) {
        for event in &events {
            log::info!("{}: {event}", self.active);
            self.bus.emit(event);
        }
    }

    pub fn draw(&self, canvas: &mut dyn Canvas2D) {
        self.scene.draw(canvas);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breed::{CatBreed, DogBreed};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn host(kind: SceneKind, breed: Breed) -> (GameHost, Rc<RefCell<Vec<PetEvent>>>) {
        let mut host = GameHost::boot(Engine::default(), kind, breed.into()).unwrap();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        host.subscribe(move |e| sink.borrow_mut().push(e.clone()));
        (host, seen)
    }

    #[test]
    fn breed_change_restarts_active_scene() {
        let (mut host, _) = host(SceneKind::Play, Breed::Cat(CatBreed::Ragdoll));
        host.set_pet_type(PetKind::Dog, Breed::Dog(DogBreed::Shiba)).unwrap();
        assert_eq!(host.active_scene(), SceneKind::Play);
        assert_eq!(host.generation(), 1);
        assert_eq!(host.scene().pet().unwrap().breed(), Breed::Dog(DogBreed::Shiba));
    }

    #[test]
    fn bad_ids_leave_scene_running() {
        let (mut host, _) = host(SceneKind::Room, Breed::Cat(CatBreed::Siamese));
        assert!(host.set_pet_type_by_id("cat", "labrador").is_err());
        assert!(host.set_pet_type_by_id("cat", "husky").is_err());
        assert!(host.switch_scene_by_id("attic").is_err());
        assert_eq!(host.generation(), 0);
        assert!(host.is_scene_ready());
    }

    #[test]
    fn switching_mid_meal_drops_the_meal() {
        let (mut host, seen) = host(SceneKind::Feed, Breed::Dog(DogBreed::Husky));
        host.feed_pet(FoodItem::new("bone", "Meaty Bone", "")).unwrap();
        host.advance(500);
        host.switch_scene(SceneKind::Room).unwrap();
        host.advance(8000);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn tick_runs_whole_steps_only() {
        let (mut host, _) = host(SceneKind::Room, Breed::Cat(CatBreed::Bengal));
        host.tick(Duration::from_millis(40));
        assert_eq!(host.engine().ticker().ticks(), 2);
    }

    #[test]
    fn cycling_wraps_within_species() {
        let (mut host, _) = host(SceneKind::Room, Breed::Cat(CatBreed::Munchkin));
        host.cycle_breed(1).unwrap();
        assert_eq!(host.params().breed, Breed::Cat(CatBreed::OrangeTabby));
        host.toggle_kind().unwrap();
        assert_eq!(host.params().breed, Breed::Dog(DogBreed::Shiba));
    }
}
