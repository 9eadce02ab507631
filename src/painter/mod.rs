//! Procedural pet renderer.
//!
//! A pet is two recorded surfaces: the tail (drawn first, rotated about its
//! base by the owner) and the body. Both are cleared and re-recorded from the
//! breed config on every call, so the same breed always yields the same draw
//! list. Nothing here is random.
//!
//! Local space: origin at the body center, y down, roughly 100 units tall.

mod cat;
mod dog;

use crate::breed::{Breed, BreedConfig, PetKind};
use crate::canvas::{v2, Canvas2D, Color, Surface, Vec2};
use crate::error::Result;

/// Body layers in paint order. The tail surface is always painted before
/// all of these.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layer {
    Body,
    Overlays,
    Head,
    Ears,
    Eyes,
    Nose,
    Mouth,
    Paws,
}

pub const BODY_LAYERS: [Layer; 8] = [
    Layer::Body,
    Layer::Overlays,
    Layer::Head,
    Layer::Ears,
    Layer::Eyes,
    Layer::Nose,
    Layer::Mouth,
    Layer::Paws,
];

/// Where the tail surface's origin sits in body space.
pub fn tail_anchor(kind: PetKind) -> Vec2 {
    match kind {
        PetKind::Cat => v2(24.0, 34.0),
        PetKind::Dog => v2(26.0, 30.0),
    }
}

/// Eye centers in body space (left, right).
pub fn eye_centers(kind: PetKind, cfg: &BreedConfig) -> (Vec2, Vec2) {
    match kind {
        PetKind::Cat => cat::eye_centers(cfg),
        PetKind::Dog => dog::eye_centers(cfg),
    }
}

/// Half extents of the pet's clickable area in body space.
pub fn hit_extents(kind: PetKind) -> Vec2 {
    match kind {
        PetKind::Cat => v2(38.0, 58.0),
        PetKind::Dog => v2(40.0, 56.0),
    }
}

pub fn render(body: &mut Surface, tail: &mut Surface, breed: Breed) {
    render_config(body, tail, breed.kind(), &breed.config());
}

/// Resolve host identifiers first and only then touch the surfaces, so an
/// unknown breed leaves whatever was drawn before intact.
pub fn render_by_id(body: &mut Surface, tail: &mut Surface, kind: &str, breed: &str) -> Result<Breed> {
    let breed = Breed::parse(kind, breed)?;
    render(body, tail, breed);
    Ok(breed)
}

/// Paint an arbitrary config. Used for named breeds and for flag
/// combinations no breed ships with.
pub fn render_config(body: &mut Surface, tail: &mut Surface, kind: PetKind, cfg: &BreedConfig) {
    let mut next_tail = Surface::with_capacity(24);
    let mut next_body = Surface::with_capacity(96);

    match kind {
        PetKind::Cat => cat::draw_tail(&mut next_tail, cfg),
        PetKind::Dog => dog::draw_tail(&mut next_tail, cfg),
    }
    for layer in BODY_LAYERS {
        match kind {
            PetKind::Cat => cat::draw_layer(&mut next_body, layer, cfg),
            PetKind::Dog => dog::draw_layer(&mut next_body, layer, cfg),
        }
    }

    tail.clear();
    body.clear();
    tail.replace_with(next_tail);
    body.replace_with(next_body);
}

/// Sleepy eyelids drawn over whatever eyes the breed has.
pub fn render_closed_eyes(overlay: &mut Surface, breed: Breed) {
    let cfg = breed.config();
    let (l, r) = eye_centers(breed.kind(), &cfg);
    let lid = lid_color(&cfg);
    let lash = outline_color(&cfg);
    overlay.clear();
    for c in [l, r] {
        overlay.fill_ellipse(c, 6.5, 7.0, 0.0, lid);
        overlay.stroke_arc(c + v2(0.0, -1.5), 4.5, 0.35, 2.8, 1.4, lash);
    }
}

fn lid_color(cfg: &BreedConfig) -> Color {
    if cfg.flags.color_point || cfg.flags.face_mask {
        cfg.palette.pattern
    } else {
        cfg.palette.primary
    }
}

/* -----------------------------
   Helpers shared by both species
------------------------------ */

fn luma(c: Color) -> f32 {
    0.299 * c.r as f32 + 0.587 * c.g as f32 + 0.114 * c.b as f32
}

/// Dark line color on light coats, light on dark ones.
pub(crate) fn outline_color(cfg: &BreedConfig) -> Color {
    if luma(cfg.palette.primary) > 120.0 {
        Color::hex(0x3B2A24)
    } else {
        Color::hex(0xE8E2DA)
    }
}

pub(crate) fn whisker_color(cfg: &BreedConfig) -> Color {
    if luma(cfg.palette.primary) > 180.0 {
        Color::hex(0x9E9E9E)
    } else {
        Color::hex(0xF5F5F5)
    }
}

/// Main torso plus the texture flags that change its outline.
pub(crate) fn body_silhouette(s: &mut Surface, cfg: &BreedConfig) {
    let f = cfg.flags;
    let col = cfg.palette.primary;
    let (cy, rx, ry) = match (f.long_fur, f.short_legs) {
        (true, true) => (24.0, 34.0, 26.0),
        (true, false) => (18.0, 34.0, 31.0),
        (false, true) => (24.0, 30.0, 23.0),
        (false, false) => (18.0, 30.0, 28.0),
    };
    s.fill_ellipse(v2(0.0, cy), rx, ry, 0.0, col);

    if f.long_fur {
        for (x, y, r) in [(-30.0, 6.0, 9.0), (30.0, 6.0, 9.0), (-28.0, 26.0, 10.0), (28.0, 26.0, 10.0)] {
            s.fill_circle(v2(x, y + cy - 18.0), r, col);
        }
    }
    if f.curly_fur {
        let puff = col.lighten(0.12);
        for i in 0..10 {
            let a = i as f32 / 10.0 * std::f32::consts::TAU;
            let p = v2(a.cos() * (rx - 3.0), cy + a.sin() * (ry - 3.0));
            s.fill_circle(p, 6.5, puff);
        }
    }
    if f.hairless {
        let fold = cfg.palette.pattern;
        s.stroke_arc(v2(0.0, cy - 14.0), 10.0, 0.6, 2.5, 1.2, fold);
        s.stroke_arc(v2(0.0, cy - 10.0), 14.0, 0.8, 2.3, 1.2, fold);
    }
}

/// Belly, chest and coat patterns on the torso.
pub(crate) fn body_overlays(s: &mut Surface, cfg: &BreedConfig) {
    let f = cfg.flags;
    let p = cfg.palette;
    let cy = if f.short_legs { 24.0 } else { 18.0 };

    s.fill_ellipse(v2(0.0, cy + 6.0), 17.0, 18.0, 0.0, p.belly);

    if f.bicolor {
        s.fill_ellipse(v2(0.0, cy + 2.0), 20.0, 24.0, 0.0, p.secondary);
        s.fill_triangle(v2(-12.0, cy - 16.0), v2(12.0, cy - 16.0), v2(0.0, cy + 2.0), p.secondary);
    }
    if f.stripes {
        for i in 0..3 {
            let y = cy - 8.0 + i as f32 * 9.0;
            s.line(v2(-29.0, y), v2(-18.0, y + 3.0), 3.0, p.pattern);
            s.line(v2(29.0, y), v2(18.0, y + 3.0), 3.0, p.pattern);
        }
    }
    if f.spots {
        for (x, y, r) in [
            (-20.0, -6.0, 3.5),
            (-24.0, 8.0, 3.0),
            (-14.0, 18.0, 2.8),
            (20.0, -4.0, 3.2),
            (24.0, 10.0, 3.6),
            (15.0, 20.0, 2.6),
        ] {
            s.fill_ellipse(v2(x, y + cy - 18.0), r + 1.0, r, 0.3, p.pattern);
        }
    }
    if f.patches {
        s.fill_circle(v2(-16.0, cy - 8.0), 10.0, p.secondary);
        s.fill_circle(v2(18.0, cy + 4.0), 9.0, p.pattern);
        s.fill_circle(v2(-6.0, cy + 18.0), 6.0, p.pattern);
    }
    if f.color_point {
        // points darken toward the haunches
        s.fill_ellipse(v2(0.0, cy + 20.0), 24.0, 8.0, 0.0, p.primary.mix(p.pattern, 0.25));
    }
}

/// Front paws. Short legs tuck them closer to the torso.
pub(crate) fn paws(s: &mut Surface, cfg: &BreedConfig, toe_color: Color) {
    let f = cfg.flags;
    let col = if f.color_point && !f.bicolor {
        cfg.palette.pattern
    } else {
        cfg.palette.paw
    };
    let (y, rx, ry) = if f.short_legs {
        (44.0, 7.0, 4.0)
    } else {
        (45.0, 8.0, 5.0)
    };
    for x in [-12.0, 12.0] {
        s.fill_ellipse(v2(x, y), rx, ry, 0.0, col);
        s.line(v2(x - 2.5, y + 1.0), v2(x - 2.5, y + ry - 0.5), 0.8, toe_color);
        s.line(v2(x + 2.5, y + 1.0), v2(x + 2.5, y + ry - 0.5), 0.8, toe_color);
    }
}

/// Tail recorded in tail-local space (origin at the base).
pub(crate) fn tail(s: &mut Surface, cfg: &BreedConfig, base_radius: f32) {
    let f = cfg.flags;
    let p = cfg.palette;

    if f.curly_tail {
        let w = if f.fluffy_tail { 9.0 } else { 6.0 };
        s.stroke_arc(v2(6.0, -12.0), 10.0, 1.6, 1.6 + 5.2, w, p.primary);
        s.stroke_arc(v2(6.0, -12.0), 10.0, 5.4, 6.8, w * 0.6, p.secondary);
        return;
    }

    let segments = if f.short_tail { 3 } else { 8 };
    let mut radius = if f.fluffy_tail {
        base_radius + 3.5
    } else if f.hairless {
        base_radius - 2.0
    } else {
        base_radius
    };
    for i in 0..segments {
        let t = i as f32 / 7.0;
        let pos = v2(24.0 * t, -36.0 * t * t);
        let mut col = p.primary;
        if f.stripes && i % 2 == 1 {
            col = p.pattern;
        }
        if f.color_point && t > 0.35 {
            col = p.pattern;
        }
        if f.bicolor && i == segments - 1 {
            col = p.secondary;
        }
        s.fill_circle(pos, radius.max(1.5), col);
        if f.fluffy_tail {
            radius += 0.25;
        } else {
            radius -= 0.2;
        }
    }
}

/// Ear silhouettes shared by cats and dogs; species decide placement.
pub(crate) fn pointed_ear(s: &mut Surface, cfg: &BreedConfig, side: f32, base_y: f32, big: bool) {
    let k = if big { 1.3 } else { 1.0 };
    let outer = if cfg.flags.color_point {
        cfg.palette.pattern
    } else {
        cfg.palette.primary
    };
    let a = v2(side * 22.0, base_y);
    let b = v2(side * 6.0, base_y - 8.0);
    let tip = v2(side * 20.0, base_y - 20.0 * k);
    s.fill_triangle(a, b, tip, outer);
    let inner_tip = tip.lerp(v2(side * 15.0, base_y - 4.0), 0.25);
    s.fill_triangle(
        a.lerp(b, 0.2) + v2(0.0, -2.0),
        b.lerp(a, 0.25) + v2(0.0, -1.0),
        inner_tip,
        cfg.palette.inner_ear,
    );
    if cfg.flags.ear_tufts {
        s.line(tip, tip + v2(side * 1.5, -6.0), 1.2, cfg.palette.pattern);
    }
}

pub(crate) fn flop_ear(s: &mut Surface, cfg: &BreedConfig, side: f32, top_y: f32) {
    let col = if cfg.flags.face_mask || cfg.flags.color_point {
        cfg.palette.pattern
    } else {
        cfg.palette.primary.darken(0.15)
    };
    s.fill_ellipse(v2(side * 22.0, top_y + 12.0), 8.0, 15.0, -side * 0.25, col);
    if cfg.flags.curly_fur {
        for k in 0..3 {
            s.fill_circle(v2(side * 23.0, top_y + 6.0 + k as f32 * 8.0), 5.0, col.lighten(0.1));
        }
    }
}

pub(crate) fn folded_ear(s: &mut Surface, cfg: &BreedConfig, side: f32, base_y: f32) {
    let col = if cfg.flags.color_point {
        cfg.palette.pattern
    } else {
        cfg.palette.primary
    };
    s.fill_ellipse(v2(side * 14.0, base_y - 3.0), 8.0, 5.0, side * 0.4, col);
    s.stroke_arc(v2(side * 14.0, base_y - 1.0), 5.0, 3.6, 5.8, 1.0, col.darken(0.3));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breed::{CatBreed, DogBreed, ShapeFlags, CAT_DEFAULT, DOG_DEFAULT};
    use crate::canvas::DrawCall;

    #[test]
    fn rendering_is_deterministic_for_every_breed() {
        for breed in Breed::all() {
            let (mut b1, mut t1) = (Surface::new(), Surface::new());
            let (mut b2, mut t2) = (Surface::new(), Surface::new());
            render(&mut b1, &mut t1, breed);
            render(&mut b2, &mut t2, breed);
            assert_eq!(b1, b2, "{breed} body differs");
            assert_eq!(t1, t2, "{breed} tail differs");
            assert!(!b1.is_empty() && !t1.is_empty());
        }
    }

    #[test]
    fn rerender_clears_previous_breed() {
        let (mut body, mut tail) = (Surface::new(), Surface::new());
        render(&mut body, &mut tail, Breed::Cat(CatBreed::Persian));
        render(&mut body, &mut tail, Breed::Cat(CatBreed::Siamese));
        let (mut fresh_body, mut fresh_tail) = (Surface::new(), Surface::new());
        render(&mut fresh_body, &mut fresh_tail, Breed::Cat(CatBreed::Siamese));
        assert_eq!(body, fresh_body);
        assert_eq!(tail, fresh_tail);
    }

    #[test]
    fn body_silhouette_is_painted_first_in_primary_color() {
        let (mut body, mut tail) = (Surface::new(), Surface::new());
        render(&mut body, &mut tail, Breed::Dog(DogBreed::Husky));
        let primary = DogBreed::Husky.config().palette.primary;
        match &body.calls()[0] {
            DrawCall::Ellipse { color, .. } => assert_eq!(*color, primary),
            other => panic!("expected torso ellipse, got {other:?}"),
        }
    }

    #[test]
    fn unknown_breed_id_fails_without_touching_surfaces() {
        let (mut body, mut tail) = (Surface::new(), Surface::new());
        render(&mut body, &mut tail, Breed::Cat(CatBreed::Bengal));
        let before = body.clone();
        assert!(render_by_id(&mut body, &mut tail, "cat", "griffin").is_err());
        assert_eq!(body, before);
    }

    #[test]
    fn any_flag_combination_is_drawable() {
        for kind in PetKind::ALL {
            let base = match kind {
                PetKind::Cat => CAT_DEFAULT,
                PetKind::Dog => DOG_DEFAULT,
            };
            for flags in [ShapeFlags::NONE, ShapeFlags::ALL] {
                let cfg = BreedConfig { flags, ..base };
                let (mut body, mut tail) = (Surface::new(), Surface::new());
                render_config(&mut body, &mut tail, kind, &cfg);
                assert!(!body.is_empty());
            }
        }
    }

    #[test]
    fn pointed_and_flop_ears_are_different_shapes() {
        let (mut pointed, mut t) = (Surface::new(), Surface::new());
        render(&mut pointed, &mut t, Breed::Dog(DogBreed::Shiba));
        let (mut flop, mut t) = (Surface::new(), Surface::new());
        render(&mut flop, &mut t, Breed::Dog(DogBreed::GoldenRetriever));
        let triangles = |s: &Surface| {
            s.calls()
                .iter()
                .filter(|c| matches!(c, DrawCall::Triangle { .. }))
                .count()
        };
        assert!(triangles(&pointed) > triangles(&flop));
    }
}
