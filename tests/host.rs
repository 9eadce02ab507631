use petscene::breed::{CatBreed, DogBreed};
use petscene::{
    scene, v2, Breed, Engine, EngineConfig, EngineError, FoodItem, GameHost, PetEvent, PetKind,
    PixelCanvas, Scene, SceneKind,
};
use std::cell::RefCell;
use std::rc::Rc;

type Seen = Rc<RefCell<Vec<PetEvent>>>;

fn boot(kind: SceneKind, breed: Breed) -> (GameHost, Seen) {
    let mut host = GameHost::boot(Engine::default(), kind, breed.into()).unwrap();
    let seen: Seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    host.subscribe(move |e| sink.borrow_mut().push(e.clone()));
    (host, seen)
}

fn pet_center(host: &GameHost) -> petscene::Vec2 {
    let pet = host.scene().pet().unwrap();
    pet.transform().apply(v2(0.0, -6.0))
}

#[test]
fn room_pat_reports_once() {
    let (mut host, seen) = boot(SceneKind::Room, Breed::Cat(CatBreed::Siamese));
    assert!(host.is_scene_ready());
    let at = pet_center(&host);
    host.pointer_down(at).unwrap();
    host.advance(1000);
    assert_eq!(*seen.borrow(), vec![PetEvent::Patted]);
}

#[test]
fn clicking_empty_floor_does_nothing() {
    let (mut host, seen) = boot(SceneKind::Room, Breed::Dog(DogBreed::Poodle));
    host.pointer_down(v2(10.0, 10.0)).unwrap();
    host.advance(1000);
    assert!(seen.borrow().is_empty());
}

#[test]
fn double_feed_is_one_meal() {
    let (mut host, seen) = boot(SceneKind::Feed, Breed::Dog(DogBreed::Husky));
    let bone = FoodItem::new("bone", "Meaty Bone", "🍖");
    host.feed_pet(bone.clone()).unwrap();
    host.advance(100);
    host.feed_pet(bone).unwrap();
    host.advance(6000);
    assert_eq!(
        *seen.borrow(),
        vec![PetEvent::Fed {
            food_label: "Meaty Bone".into()
        }]
    );
    assert!(!host.scene().is_busy());
}

#[test]
fn feeding_again_after_the_meal_works() {
    let (mut host, seen) = boot(SceneKind::Feed, Breed::Cat(CatBreed::Persian));
    host.feed_pet(FoodItem::new("fish", "Tuna", "")).unwrap();
    host.advance(6000);
    host.feed_pet(FoodItem::new("milk", "Milk", "")).unwrap();
    host.advance(6000);
    let labels: Vec<String> = seen.borrow().iter().map(|e| e.to_string()).collect();
    assert_eq!(labels, ["pet fed(Tuna)", "pet fed(Milk)"]);
}

#[test]
fn unknown_toy_still_plays() {
    let (mut host, seen) = boot(SceneKind::Play, Breed::Cat(CatBreed::Bengal));
    host.play_with("rubber-chicken").unwrap();
    host.advance(7000);
    assert_eq!(
        *seen.borrow(),
        vec![PetEvent::Played {
            toy_id: "rubber-chicken".into()
        }]
    );
}

#[test]
fn bath_splash_reports_splashed() {
    let (mut host, seen) = boot(SceneKind::Bath, Breed::Dog(DogBreed::Corgi));
    host.splash().unwrap();
    host.advance(3000);
    assert_eq!(*seen.borrow(), vec![PetEvent::Splashed]);
}

#[test]
fn teardown_mid_action_is_silent() {
    let (mut host, seen) = boot(SceneKind::Play, Breed::Dog(DogBreed::Shiba));
    host.play_with("ball").unwrap();
    host.advance(300);
    host.switch_scene(SceneKind::Sleep).unwrap();
    host.advance(10_000);
    assert!(seen.borrow().is_empty());
    assert_eq!(host.active_scene(), SceneKind::Sleep);
}

#[test]
fn breed_change_mid_action_is_silent() {
    let (mut host, seen) = boot(SceneKind::Bath, Breed::Cat(CatBreed::Sphynx));
    host.splash().unwrap();
    host.advance(100);
    host.set_pet_type(PetKind::Dog, Breed::Dog(DogBreed::GoldenRetriever))
        .unwrap();
    host.advance(5000);
    assert!(seen.borrow().is_empty());
    assert_eq!(host.active_scene(), SceneKind::Bath);
}

#[test]
fn idle_keeps_running() {
    for kind in SceneKind::ALL {
        let (mut host, seen) = boot(kind, Breed::Cat(CatBreed::OrangeTabby));
        host.advance(60_000);
        assert!(host.is_scene_ready(), "{kind}");
        assert!(host.scene().pending_work() > 0, "{kind} went quiet");
        assert!(seen.borrow().is_empty(), "{kind}");
    }
}

#[test]
fn wrong_scene_command_is_an_error() {
    let (mut host, _) = boot(SceneKind::Sleep, Breed::Cat(CatBreed::Ragdoll));
    let err = host.feed_pet(FoodItem::new("fish", "Tuna", "")).unwrap_err();
    assert!(matches!(
        err,
        EngineError::Unsupported {
            scene: SceneKind::Sleep,
            ..
        }
    ));
    assert!(host.is_scene_ready());
}

#[test]
fn commands_before_init_are_refused() {
    let engine = Engine::default();
    let mut feed = scene::create(SceneKind::Feed, &engine);
    let err = feed
        .handle(
            petscene::Command::Feed(FoodItem::new("bone", "Bone", "")),
            &mut Vec::new(),
        )
        .unwrap_err();
    assert!(matches!(err, EngineError::NotReady { .. }));
}

#[test]
fn unsubscribed_handlers_hear_nothing() {
    let (mut host, _) = boot(SceneKind::Room, Breed::Cat(CatBreed::Siamese));
    let late: Seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&late);
    let id = host.subscribe(move |e| sink.borrow_mut().push(e.clone()));
    assert!(host.unsubscribe(id));
    let at = pet_center(&host);
    host.pointer_down(at).unwrap();
    assert!(late.borrow().is_empty());
}

#[test]
fn every_scene_renders_ink() {
    let engine = Engine::new(EngineConfig::default());
    let stage = engine.stage_size();
    let (mut host, _) = boot(SceneKind::Room, Breed::Dog(DogBreed::Poodle));
    for kind in SceneKind::ALL {
        host.switch_scene(kind).unwrap();
        host.advance(200);
        let mut canvas = PixelCanvas::new(stage.x as u32, stage.y as u32);
        host.draw(&mut canvas);
        let center = host.scene().pet().unwrap().pos;
        let px = canvas.get(center.x as u32, center.y as u32).unwrap();
        assert!(px.a > 0, "{kind} left the stage blank");
    }
}
