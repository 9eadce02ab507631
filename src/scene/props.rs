//! Scene furniture and toys: recorded once into a surface, then moved
//! around by tweens like the pet is.

use crate::canvas::{v2, Affine, Canvas2D, Color, Surface, Vec2};
use crate::items::{FoodShape, ToyKind};
use std::collections::BTreeMap;
use std::f32::consts::{PI, TAU};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PropId(u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PropChannel {
    X,
    Y,
    Rotation,
    Scale,
    Alpha,
}

#[derive(Debug)]
pub(crate) struct Prop {
    pub surface: Surface,
    pub pos: Vec2,
    pub rotation: f32,
    pub scale: f32,
    pub alpha: f32,
    /// Drawn over the pet instead of behind it.
    pub in_front: bool,
}

impl Prop {
    pub fn new(surface: Surface, pos: Vec2) -> Self {
        Self {
            surface,
            pos,
            rotation: 0.0,
            scale: 1.0,
            alpha: 1.0,
            in_front: false,
        }
    }

    pub fn front(mut self) -> Self {
        self.in_front = true;
        self
    }

    pub fn set(&mut self, ch: PropChannel, v: f32) {
        match ch {
            PropChannel::X => self.pos.x = v,
            PropChannel::Y => self.pos.y = v,
            PropChannel::Rotation => self.rotation = v,
            PropChannel::Scale => self.scale = v.max(0.0),
            PropChannel::Alpha => self.alpha = v.clamp(0.0, 1.0),
        }
    }

    pub fn get(&self, ch: PropChannel) -> f32 {
        match ch {
            PropChannel::X => self.pos.x,
            PropChannel::Y => self.pos.y,
            PropChannel::Rotation => self.rotation,
            PropChannel::Scale => self.scale,
            PropChannel::Alpha => self.alpha,
        }
    }

    pub fn draw(&self, canvas: &mut dyn Canvas2D) {
        if self.alpha <= 0.0 || self.scale <= 0.0 {
            return;
        }
        let xf = Affine::trs(self.pos, self.rotation, self.scale, self.scale);
        self.surface.replay(canvas, xf, self.alpha);
    }
}

/// Props keyed by id; lower ids draw first.
#[derive(Debug, Default)]
pub(crate) struct Props {
    next: u32,
    items: BTreeMap<PropId, Prop>,
}

impl Props {
    pub fn add(&mut self, prop: Prop) -> PropId {
        self.next += 1;
        let id = PropId(self.next);
        self.items.insert(id, prop);
        id
    }

    pub fn remove(&mut self, id: PropId) -> Option<Prop> {
        self.items.remove(&id)
    }

    pub fn get(&self, id: PropId) -> Option<&Prop> {
        self.items.get(&id)
    }

    pub fn get_mut(&mut self, id: PropId) -> Option<&mut Prop> {
        self.items.get_mut(&id)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn draw_layer(&self, canvas: &mut dyn Canvas2D, in_front: bool) {
        for prop in self.items.values().filter(|p| p.in_front == in_front) {
            prop.draw(canvas);
        }
    }
}

// Prop artwork. Every surface is drawn around its own origin, which is
// where the prop's `pos` puts it.

pub(crate) fn bowl(color: Color) -> Surface {
    let mut s = Surface::new();
    let rim = color.lighten(0.25);
    s.fill_ellipse(v2(0.0, 4.0), 26.0, 5.0, 0.0, Color::BLACK.with_alpha(50));
    s.fill_rect(v2(-20.0, -10.0), 40.0, 12.0, color);
    s.fill_ellipse(v2(0.0, 2.0), 20.0, 4.0, 0.0, color);
    s.fill_ellipse(v2(0.0, -10.0), 24.0, 5.0, 0.0, rim);
    s.fill_ellipse(v2(0.0, -10.0), 19.0, 3.4, 0.0, color.darken(0.35));
    s.fill_ellipse(v2(-9.0, -4.0), 4.0, 1.6, 0.0, Color::WHITE.with_alpha(110));
    s
}

pub(crate) fn food(shape: FoodShape) -> Surface {
    let mut s = Surface::new();
    match shape {
        FoodShape::Fish => {
            let body = Color::hex(0x7FA7C9);
            s.fill_ellipse(v2(0.0, 0.0), 12.0, 6.0, 0.0, body);
            s.fill_triangle(v2(10.0, 0.0), v2(19.0, -7.0), v2(19.0, 7.0), body.darken(0.15));
            s.fill_ellipse(v2(1.0, 2.0), 8.0, 2.5, 0.0, body.lighten(0.3));
            s.fill_circle(v2(-7.0, -1.5), 1.6, Color::WHITE);
            s.fill_circle(v2(-7.2, -1.5), 0.8, Color::BLACK);
            s.stroke_arc(v2(-2.0, 0.0), 5.0, -0.9, 0.9, 0.8, body.darken(0.3));
        }
        FoodShape::Bone => {
            let bone = Color::hex(0xF3E9D2);
            s.fill_rect(v2(-11.0, -2.5), 22.0, 5.0, bone);
            for (x, y) in [(-12.0, -3.0), (-12.0, 3.0), (12.0, -3.0), (12.0, 3.0)] {
                s.fill_circle(v2(x, y), 3.6, bone);
            }
            s.fill_ellipse(v2(0.0, 1.0), 9.0, 0.8, 0.0, bone.darken(0.15));
            let meat = Color::hex(0xC0504D);
            s.fill_ellipse(v2(0.0, -3.0), 8.0, 4.0, 0.0, meat);
            s.fill_ellipse(v2(-2.0, -4.0), 3.0, 1.2, 0.0, meat.lighten(0.3));
        }
        FoodShape::Milk => {
            let milk = Color::hex(0xFDFDF6);
            s.fill_ellipse(v2(0.0, 0.0), 15.0, 3.5, 0.0, milk);
            s.fill_ellipse(v2(-4.0, -0.8), 5.0, 1.0, 0.0, Color::WHITE);
            s.fill_circle(v2(8.0, -1.0), 1.0, Color::hex(0xE8E4D8));
        }
        FoodShape::Kibble => {
            let brown = Color::hex(0x9C6B3F);
            let pile = [
                (-8.0, 1.0),
                (-3.0, 2.0),
                (3.0, 1.5),
                (8.0, 1.0),
                (-5.0, -2.5),
                (1.0, -2.0),
                (6.0, -2.8),
                (-1.0, -5.5),
            ];
            for (i, (x, y)) in pile.into_iter().enumerate() {
                let c = if i % 3 == 0 { brown.lighten(0.15) } else { brown };
                s.fill_circle(v2(x, y), 2.8, c);
            }
        }
        FoodShape::Generic => {
            let c = Color::hex(0xF4A259);
            s.fill_circle(v2(0.0, -2.0), 8.0, c);
            s.fill_circle(v2(-3.0, -5.0), 2.2, c.lighten(0.4));
            s.fill_ellipse(v2(0.0, 5.0), 9.0, 2.0, 0.0, c.darken(0.25));
        }
    }
    s
}

pub(crate) fn food_color(shape: FoodShape) -> Color {
    match shape {
        FoodShape::Fish => Color::hex(0x7FA7C9),
        FoodShape::Bone => Color::hex(0xC0504D),
        FoodShape::Milk => Color::hex(0xFDFDF6),
        FoodShape::Kibble => Color::hex(0x9C6B3F),
        FoodShape::Generic => Color::hex(0xF4A259),
    }
}

pub(crate) fn toy(kind: ToyKind) -> Surface {
    let mut s = Surface::new();
    match kind {
        ToyKind::Ball => {
            let red = Color::hex(0xE53935);
            s.fill_circle(v2(0.0, 0.0), 9.0, red);
            s.stroke_arc(v2(0.0, 0.0), 9.0, -0.3, PI + 0.3, 1.6, Color::WHITE);
            s.fill_circle(v2(-3.0, -3.5), 2.2, red.lighten(0.5));
        }
        ToyKind::Yarn => {
            let pink = Color::hex(0xEC6FA5);
            s.fill_circle(v2(0.0, 0.0), 10.0, pink);
            for k in 0..4 {
                let a = k as f32 * 0.8;
                s.stroke_arc(v2(0.0, 0.0), 7.0 - k as f32, a, a + 2.2, 1.0, pink.darken(0.25));
            }
            s.line(v2(8.0, 5.0), v2(18.0, 9.0), 1.0, pink.darken(0.1));
            s.line(v2(18.0, 9.0), v2(24.0, 7.0), 1.0, pink.darken(0.1));
        }
        ToyKind::Feather => {
            // wand handle runs up from the origin, feather hangs off the tip
            s.line(v2(0.0, 0.0), v2(0.0, -46.0), 1.5, Color::hex(0x8D6E63));
            s.line(v2(0.0, -46.0), v2(6.0, -30.0), 0.6, Color::hex(0x555555));
            let plume = Color::hex(0x4DB6AC);
            s.fill_ellipse(v2(8.0, -22.0), 3.5, 10.0, 0.25, plume);
            s.fill_ellipse(v2(10.0, -18.0), 2.0, 7.0, 0.35, plume.lighten(0.3));
            s.line(v2(6.0, -32.0), v2(10.0, -12.0), 0.6, plume.darken(0.3));
        }
        ToyKind::Laser => {
            let red = Color::hex(0xFF1744);
            s.fill_circle(v2(0.0, 0.0), 5.0, red.with_alpha(70));
            s.fill_circle(v2(0.0, 0.0), 2.6, red);
            s.fill_circle(v2(0.0, 0.0), 1.0, Color::WHITE);
        }
        ToyKind::Frisbee => {
            let blue = Color::hex(0x1E88E5);
            s.fill_ellipse(v2(0.0, 0.0), 16.0, 5.0, 0.0, blue);
            s.fill_ellipse(v2(0.0, -1.0), 11.0, 3.0, 0.0, blue.lighten(0.3));
            s.stroke_arc(v2(0.0, 0.0), 4.0, 0.0, TAU, 0.8, Color::WHITE.with_alpha(160));
        }
        ToyKind::Other => {
            let gold = Color::hex(0xFFC107);
            for k in 0..5 {
                let a = -PI / 2.0 + k as f32 * TAU / 5.0;
                let tip = Vec2::from_angle(a) * 10.0;
                let l = Vec2::from_angle(a - 0.6) * 4.0;
                let r = Vec2::from_angle(a + 0.6) * 4.0;
                s.fill_triangle(l, r, tip, gold);
            }
            s.fill_circle(v2(0.0, 0.0), 4.6, gold);
            s.fill_circle(v2(-1.5, -1.5), 1.2, Color::WHITE.with_alpha(180));
        }
    }
    s
}

/// Front wall of the tub plus the foam line; the water itself is in the
/// background so the pet can sit "in" it.
pub(crate) fn tub_front(width: f32) -> Surface {
    let mut s = Surface::new();
    let enamel = Color::hex(0xF5F7FA);
    let half = width / 2.0;
    s.fill_rect(v2(-half, 0.0), width, 46.0, enamel);
    s.fill_ellipse(v2(0.0, 46.0), half, 6.0, 0.0, enamel);
    s.fill_rect(v2(-half - 4.0, -4.0), width + 8.0, 6.0, enamel.darken(0.08));
    s.fill_rect(v2(-half + 6.0, 10.0), width - 12.0, 2.0, enamel.darken(0.05));
    for x in [-half + 18.0, half - 18.0] {
        s.fill_rect(v2(x - 4.0, 50.0), 8.0, 8.0, Color::hex(0xC9A227));
    }
    let foam = Color::WHITE;
    let mut x = -half + 6.0;
    let mut k = 0;
    while x < half - 4.0 {
        let r = if k % 2 == 0 { 7.0 } else { 5.0 };
        s.fill_circle(v2(x, -6.0), r, foam);
        x += 9.0;
        k += 1;
    }
    s
}

pub(crate) fn duck() -> Surface {
    let mut s = Surface::new();
    let yellow = Color::hex(0xFFD54F);
    s.fill_ellipse(v2(0.0, 0.0), 11.0, 7.0, 0.0, yellow);
    s.fill_circle(v2(-6.0, -9.0), 5.5, yellow);
    s.fill_triangle(v2(-11.0, -10.0), v2(-11.0, -7.0), v2(-16.0, -8.0), Color::hex(0xFF8F00));
    s.fill_circle(v2(-7.5, -10.5), 1.0, Color::BLACK);
    s.fill_ellipse(v2(4.0, -1.0), 5.0, 3.0, -0.3, yellow.darken(0.1));
    s
}

pub(crate) fn blanket(width: f32) -> Surface {
    let mut s = Surface::new();
    let quilt = Color::hex(0x5C6BC0);
    s.fill_rect(v2(-width / 2.0, 0.0), width, 34.0, quilt);
    s.fill_ellipse(v2(0.0, 0.0), width / 2.0, 6.0, 0.0, quilt.lighten(0.1));
    s.fill_rect(v2(-width / 2.0, -2.0), width, 5.0, Color::hex(0xE8EAF6));
    let step = width / 5.0;
    for k in 1..5 {
        let x = -width / 2.0 + step * k as f32;
        s.line(v2(x, 4.0), v2(x, 34.0), 0.8, quilt.darken(0.25));
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::PixelCanvas;

    fn inked(c: &PixelCanvas) -> usize {
        (0..c.height())
            .flat_map(|y| (0..c.width()).map(move |x| (x, y)))
            .filter(|&(x, y)| c.get(x, y).is_some_and(|p| p.a > 0))
            .count()
    }

    #[test]
    fn ids_draw_in_insertion_order() {
        let mut props = Props::default();
        let a = props.add(Prop::new(toy(ToyKind::Ball), v2(10.0, 10.0)));
        let b = props.add(Prop::new(toy(ToyKind::Yarn), v2(10.0, 10.0)));
        assert!(a < b);
        assert_eq!(props.len(), 2);
        props.remove(a);
        assert!(props.get(a).is_none());
        assert!(props.get(b).is_some());
    }

    #[test]
    fn front_and_back_layers_are_split() {
        let mut props = Props::default();
        props.add(Prop::new(duck(), v2(20.0, 20.0)).front());
        let mut back = PixelCanvas::new(40, 40);
        props.draw_layer(&mut back, false);
        assert_eq!(inked(&back), 0);
        let mut front = PixelCanvas::new(40, 40);
        props.draw_layer(&mut front, true);
        assert!(inked(&front) > 0);
    }

    #[test]
    fn invisible_props_skip_drawing() {
        let mut prop = Prop::new(toy(ToyKind::Other), v2(5.0, 5.0));
        prop.set(PropChannel::Alpha, -1.0);
        let mut out = Surface::new();
        prop.draw(&mut out);
        assert!(out.is_empty());
        prop.set(PropChannel::Alpha, 1.0);
        prop.draw(&mut out);
        assert!(!out.is_empty());
    }

    #[test]
    fn every_food_and_toy_has_artwork() {
        for shape in [
            FoodShape::Fish,
            FoodShape::Bone,
            FoodShape::Milk,
            FoodShape::Kibble,
            FoodShape::Generic,
        ] {
            assert!(!food(shape).is_empty());
        }
        for kind in [
            ToyKind::Ball,
            ToyKind::Yarn,
            ToyKind::Feather,
            ToyKind::Laser,
            ToyKind::Frisbee,
            ToyKind::Other,
        ] {
            assert!(!toy(kind).is_empty());
        }
    }
}
