use crate::breed::{Breed, BreedConfig, PetKind};
use crate::canvas::{v2, Affine, Canvas2D, Surface, Vec2};
use crate::painter;

/// Animatable pet properties. Tweens address these by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PetChannel {
    X,
    Y,
    /// Vertical offset on top of `pos` (hops, bobs).
    Lift,
    Rotation,
    SquashX,
    SquashY,
    TailAngle,
    Alpha,
}

/// A renderable pet: species, breed, transform and the two surfaces the
/// painter records into. Owned by exactly one scene.
#[derive(Debug)]
pub struct PetInstance {
    breed: Breed,
    config: BreedConfig,
    pub pos: Vec2,
    pub lift: f32,
    pub rotation: f32,
    pub scale: f32,
    pub squash: Vec2,
    pub tail_angle: f32,
    pub alpha: f32,
    /// Faces left when true.
    pub flipped: bool,
    body: Surface,
    tail: Surface,
    overlay: Option<Surface>,
}

impl PetInstance {
    pub fn new(breed: Breed, pos: Vec2, scale: f32) -> Self {
        let mut pet = Self {
            breed,
            config: breed.config(),
            pos,
            lift: 0.0,
            rotation: 0.0,
            scale,
            squash: v2(1.0, 1.0),
            tail_angle: 0.0,
            alpha: 1.0,
            flipped: false,
            body: Surface::new(),
            tail: Surface::new(),
            overlay: None,
        };
        painter::render(&mut pet.body, &mut pet.tail, breed);
        pet
    }

    pub fn kind(&self) -> PetKind {
        self.breed.kind()
    }

    pub fn breed(&self) -> Breed {
        self.breed
    }

    pub fn config(&self) -> &BreedConfig {
        &self.config
    }

    pub fn body(&self) -> &Surface {
        &self.body
    }

    pub fn tail(&self) -> &Surface {
        &self.tail
    }

    /// Swap breed in place: both surfaces are cleared and redrawn, any eye
    /// overlay is redrawn for the new face.
    pub fn set_breed(&mut self, breed: Breed) {
        self.breed = breed;
        self.config = breed.config();
        painter::render(&mut self.body, &mut self.tail, breed);
        if self.overlay.is_some() {
            self.set_eyes_closed(true);
        }
    }

    pub fn set_eyes_closed(&mut self, closed: bool) {
        if closed {
            let mut lids = Surface::new();
            painter::render_closed_eyes(&mut lids, self.breed);
            self.overlay = Some(lids);
        } else {
            self.overlay = None;
        }
    }

    pub fn eyes_closed(&self) -> bool {
        self.overlay.is_some()
    }

    pub fn set(&mut self, ch: PetChannel, v: f32) {
        match ch {
            PetChannel::X => self.pos.x = v,
            PetChannel::Y => self.pos.y = v,
            PetChannel::Lift => self.lift = v,
            PetChannel::Rotation => self.rotation = v,
            PetChannel::SquashX => self.squash.x = v,
            PetChannel::SquashY => self.squash.y = v,
            PetChannel::TailAngle => self.tail_angle = v,
            PetChannel::Alpha => self.alpha = v.clamp(0.0, 1.0),
        }
    }

    pub fn get(&self, ch: PetChannel) -> f32 {
        match ch {
            PetChannel::X => self.pos.x,
            PetChannel::Y => self.pos.y,
            PetChannel::Lift => self.lift,
            PetChannel::Rotation => self.rotation,
            PetChannel::SquashX => self.squash.x,
            PetChannel::SquashY => self.squash.y,
            PetChannel::TailAngle => self.tail_angle,
            PetChannel::Alpha => self.alpha,
        }
    }

    /// Body-space to stage-space transform. Squash is anchored at the paws
    /// so breathing doesn't make the pet float.
    pub fn transform(&self) -> Affine {
        let foot = 48.0;
        let sx = self.scale * self.squash.x * if self.flipped { -1.0 } else { 1.0 };
        let sy = self.scale * self.squash.y;
        Affine::translate(self.pos.x, self.pos.y + self.lift + foot * self.scale)
            .then_inner(Affine::rotate(self.rotation))
            .then_inner(Affine::scale(sx, sy))
            .then_inner(Affine::translate(0.0, -foot))
    }

    pub fn draw(&self, canvas: &mut dyn Canvas2D) {
        let xf = self.transform();
        let anchor = painter::tail_anchor(self.kind());
        let tail_xf = xf
            .then_inner(Affine::translate(anchor.x, anchor.y))
            .then_inner(Affine::rotate(self.tail_angle));
        self.tail.replay(canvas, tail_xf, self.alpha);
        self.body.replay(canvas, xf, self.alpha);
        if let Some(lids) = &self.overlay {
            lids.replay(canvas, xf, self.alpha);
        }
    }

    /// Stage-space hit test against the pet's elliptical footprint.
    pub fn contains(&self, p: Vec2) -> bool {
        let Some(inv) = self.transform().inverse() else {
            return false;
        };
        let local = inv.apply(p);
        let ext = painter::hit_extents(self.kind());
        // footprint centered a little above the body center to include ears
        let d = local - v2(0.0, -6.0);
        (d.x / ext.x).powi(2) + (d.y / ext.y).powi(2) <= 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breed::{CatBreed, DogBreed};

    #[test]
    fn breed_change_redraws_both_surfaces() {
        let mut pet = PetInstance::new(Breed::Cat(CatBreed::Persian), v2(0.0, 0.0), 1.0);
        let persian = pet.body().clone();
        pet.set_breed(Breed::Cat(CatBreed::Bombay));
        assert_ne!(pet.body(), &persian);
        assert_eq!(pet.kind(), PetKind::Cat);
    }

    #[test]
    fn hit_test_follows_position_and_scale() {
        let pet = PetInstance::new(Breed::Dog(DogBreed::Corgi), v2(100.0, 100.0), 0.5);
        assert!(pet.contains(v2(100.0, 100.0)));
        assert!(!pet.contains(v2(160.0, 100.0)));
    }

    #[test]
    fn lift_moves_hit_area() {
        let mut pet = PetInstance::new(Breed::Dog(DogBreed::Husky), v2(0.0, 0.0), 1.0);
        pet.set(PetChannel::Lift, -200.0);
        assert!(!pet.contains(v2(0.0, 0.0)));
        assert!(pet.contains(v2(0.0, -200.0)));
    }

    #[test]
    fn closed_eyes_overlay_survives_breed_change() {
        let mut pet = PetInstance::new(Breed::Cat(CatBreed::Siamese), v2(0.0, 0.0), 1.0);
        pet.set_eyes_closed(true);
        pet.set_breed(Breed::Cat(CatBreed::Tuxedo));
        assert!(pet.eyes_closed());
    }
}
