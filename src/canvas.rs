//! Library-neutral 2D drawing surface.
//!
//! Everything the engine draws goes through [`Canvas2D`]. The renderer writes
//! into [`Surface`]s, which record an ordered display list of [`DrawCall`]s and
//! can later be replayed onto any other canvas under an [`Affine`] transform.

use std::f32::consts::TAU;
use std::ops::{Add, AddAssign, Mul, Sub};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::hex(0xFFFFFF);
    pub const BLACK: Color = Color::hex(0x000000);
    pub const TRANSPARENT: Color = Color {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    /// Opaque color from `0xRRGGBB`.
    pub const fn hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xFF) as u8,
            g: ((rgb >> 8) & 0xFF) as u8,
            b: (rgb & 0xFF) as u8,
            a: 255,
        }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Multiply alpha by `f` (clamped to `[0, 1]`).
    pub fn fade(self, f: f32) -> Self {
        let a = (self.a as f32 * f.clamp(0.0, 1.0) + 0.5) as u8;
        Self { a, ..self }
    }

    /// Linear mix towards `other`; `t = 0` is `self`.
    pub fn mix(self, other: Color, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let l = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t + 0.5) as u8;
        Self {
            r: l(self.r, other.r),
            g: l(self.g, other.g),
            b: l(self.b, other.b),
            a: l(self.a, other.a),
        }
    }

    pub fn darken(self, t: f32) -> Self {
        self.mix(Color::BLACK.with_alpha(self.a), t)
    }

    pub fn lighten(self, t: f32) -> Self {
        self.mix(Color::WHITE.with_alpha(self.a), t)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn len(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn from_angle(angle: f32) -> Self {
        Self::new(angle.cos(), angle.sin())
    }

    pub fn lerp(self, to: Vec2, t: f32) -> Self {
        self + (to - self) * t
    }
}

/// Shorthand used all over the painters.
pub const fn v2(x: f32, y: f32) -> Vec2 {
    Vec2::new(x, y)
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}
impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}
impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}
impl Mul<f32> for Vec2 {
    type Output = Vec2;
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

/// Row-major 2x3 affine matrix: `x' = a*x + c*y + e`, `y' = b*x + d*y + f`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Affine {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub e: f32,
    pub f: f32,
}

impl Default for Affine {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Affine {
    pub const IDENTITY: Affine = Affine {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    pub fn translate(x: f32, y: f32) -> Self {
        Self {
            e: x,
            f: y,
            ..Self::IDENTITY
        }
    }

    pub fn rotate(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self {
            a: c,
            b: s,
            c: -s,
            d: c,
            e: 0.0,
            f: 0.0,
        }
    }

    pub fn scale(sx: f32, sy: f32) -> Self {
        Self {
            a: sx,
            d: sy,
            ..Self::IDENTITY
        }
    }

    /// `self` applied after `inner`: `(self.then_inner(inner))(p) == self(inner(p))`.
    pub fn then_inner(self, inner: Affine) -> Self {
        Self {
            a: self.a * inner.a + self.c * inner.b,
            b: self.b * inner.a + self.d * inner.b,
            c: self.a * inner.c + self.c * inner.d,
            d: self.b * inner.c + self.d * inner.d,
            e: self.a * inner.e + self.c * inner.f + self.e,
            f: self.b * inner.e + self.d * inner.f + self.f,
        }
    }

    /// Standard "translate, rotate, then scale" local-to-parent transform.
    pub fn trs(pos: Vec2, rotation: f32, sx: f32, sy: f32) -> Self {
        Self::translate(pos.x, pos.y)
            .then_inner(Self::rotate(rotation))
            .then_inner(Self::scale(sx, sy))
    }

    pub fn apply(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            self.a * p.x + self.c * p.y + self.e,
            self.b * p.x + self.d * p.y + self.f,
        )
    }

    pub fn apply_vector(&self, v: Vec2) -> Vec2 {
        Vec2::new(self.a * v.x + self.c * v.y, self.b * v.x + self.d * v.y)
    }

    pub fn determinant(&self) -> f32 {
        self.a * self.d - self.b * self.c
    }

    pub fn uniform_scale(&self) -> f32 {
        self.determinant().abs().sqrt()
    }

    pub fn rotation(&self) -> f32 {
        self.b.atan2(self.a)
    }

    pub fn inverse(&self) -> Option<Affine> {
        let det = self.determinant();
        if det.abs() <= 1e-9 {
            return None;
        }
        let inv = 1.0 / det;
        let a = self.d * inv;
        let b = -self.b * inv;
        let c = -self.c * inv;
        let d = self.a * inv;
        Some(Affine {
            a,
            b,
            c,
            d,
            e: -(a * self.e + c * self.f),
            f: -(b * self.e + d * self.f),
        })
    }
}

/// The primitive set every backend has to provide.
///
/// Coordinates are y-down; angles are radians measured clockwise from +x.
pub trait Canvas2D {
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn fill_ellipse(&mut self, center: Vec2, rx: f32, ry: f32, angle: f32, color: Color);
    fn fill_triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, color: Color);
    fn fill_rect(&mut self, origin: Vec2, w: f32, h: f32, color: Color);
    fn stroke_arc(
        &mut self,
        center: Vec2,
        radius: f32,
        start: f32,
        end: f32,
        width: f32,
        color: Color,
    );
    fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color);
    fn text(&mut self, at: Vec2, size: f32, text: &str, color: Color);
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    Ellipse {
        center: Vec2,
        rx: f32,
        ry: f32,
        angle: f32,
        color: Color,
    },
    Triangle {
        a: Vec2,
        b: Vec2,
        c: Vec2,
        color: Color,
    },
    Rect {
        origin: Vec2,
        w: f32,
        h: f32,
        color: Color,
    },
    Arc {
        center: Vec2,
        radius: f32,
        start: f32,
        end: f32,
        width: f32,
        color: Color,
    },
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Color,
    },
    Text {
        at: Vec2,
        size: f32,
        text: String,
        color: Color,
    },
}

impl DrawCall {
    pub fn issue(&self, canvas: &mut dyn Canvas2D) {
        match self {
            DrawCall::Circle {
                center,
                radius,
                color,
            } => canvas.fill_circle(*center, *radius, *color),
            DrawCall::Ellipse {
                center,
                rx,
                ry,
                angle,
                color,
            } => canvas.fill_ellipse(*center, *rx, *ry, *angle, *color),
            DrawCall::Triangle { a, b, c, color } => canvas.fill_triangle(*a, *b, *c, *color),
            DrawCall::Rect {
                origin,
                w,
                h,
                color,
            } => canvas.fill_rect(*origin, *w, *h, *color),
            DrawCall::Arc {
                center,
                radius,
                start,
                end,
                width,
                color,
            } => canvas.stroke_arc(*center, *radius, *start, *end, *width, *color),
            DrawCall::Line {
                from,
                to,
                width,
                color,
            } => canvas.line(*from, *to, *width, *color),
            DrawCall::Text {
                at,
                size,
                text,
                color,
            } => canvas.text(*at, *size, text, *color),
        }
    }
}

/// A recorded display list. Surfaces are what pets and props own; they are
/// cleared and re-recorded, never patched in place.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Surface {
    calls: Vec<DrawCall>,
}

impl Surface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(n: usize) -> Self {
        Self {
            calls: Vec::with_capacity(n),
        }
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    /// Replace this surface's contents with `other`'s in one step.
    pub fn replace_with(&mut self, other: Surface) {
        self.calls = other.calls;
    }

    pub fn replay(&self, target: &mut dyn Canvas2D, xf: Affine, alpha: f32) {
        let mut t = Transformed::new(target, xf, alpha);
        for call in &self.calls {
            call.issue(&mut t);
        }
    }
}

impl Canvas2D for Surface {
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.calls.push(DrawCall::Circle {
            center,
            radius,
            color,
        });
    }
    fn fill_ellipse(&mut self, center: Vec2, rx: f32, ry: f32, angle: f32, color: Color) {
        self.calls.push(DrawCall::Ellipse {
            center,
            rx,
            ry,
            angle,
            color,
        });
    }
    fn fill_triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, color: Color) {
        self.calls.push(DrawCall::Triangle { a, b, c, color });
    }
    fn fill_rect(&mut self, origin: Vec2, w: f32, h: f32, color: Color) {
        self.calls.push(DrawCall::Rect {
            origin,
            w,
            h,
            color,
        });
    }
    fn stroke_arc(
        &mut self,
        center: Vec2,
        radius: f32,
        start: f32,
        end: f32,
        width: f32,
        color: Color,
    ) {
        self.calls.push(DrawCall::Arc {
            center,
            radius,
            start,
            end,
            width,
            color,
        });
    }
    fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        self.calls.push(DrawCall::Line {
            from,
            to,
            width,
            color,
        });
    }
    fn text(&mut self, at: Vec2, size: f32, text: &str, color: Color) {
        self.calls.push(DrawCall::Text {
            at,
            size,
            text: text.to_string(),
            color,
        });
    }
}

/// Forwards draw calls to `inner` after mapping them through `xf` and
/// multiplying every color's alpha by `alpha`.
///
/// Radii are mapped through the transform's axes, which is exact for
/// rotation plus uniform scale and a close approximation otherwise.
pub struct Transformed<'a> {
    inner: &'a mut dyn Canvas2D,
    xf: Affine,
    alpha: f32,
}

impl<'a> Transformed<'a> {
    pub fn new(inner: &'a mut dyn Canvas2D, xf: Affine, alpha: f32) -> Self {
        Self { inner, xf, alpha }
    }

    fn tint(&self, c: Color) -> Color {
        if self.alpha >= 1.0 {
            c
        } else {
            c.fade(self.alpha)
        }
    }

    fn map_angles(&self, start: f32, end: f32) -> (f32, f32) {
        let rot = self.xf.rotation();
        if self.xf.determinant() < 0.0 {
            // mirrored: sweep direction flips
            let s = rot - end;
            let e = rot - start;
            (s.rem_euclid(TAU), s.rem_euclid(TAU) + (e - s))
        } else {
            (start + rot, end + rot)
        }
    }
}

impl Canvas2D for Transformed<'_> {
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        let c = self.xf.apply(center);
        let ax = self.xf.apply_vector(Vec2::new(radius, 0.0));
        let ay = self.xf.apply_vector(Vec2::new(0.0, radius));
        let col = self.tint(color);
        let (rx, ry) = (ax.len(), ay.len());
        if (rx - ry).abs() < 0.01 {
            self.inner.fill_circle(c, rx, col);
        } else {
            self.inner
                .fill_ellipse(c, rx, ry, ax.y.atan2(ax.x), col);
        }
    }

    fn fill_ellipse(&mut self, center: Vec2, rx: f32, ry: f32, angle: f32, color: Color) {
        let c = self.xf.apply(center);
        let ax = self.xf.apply_vector(Vec2::from_angle(angle) * rx);
        let ay = self
            .xf
            .apply_vector(Vec2::from_angle(angle + std::f32::consts::FRAC_PI_2) * ry);
        let col = self.tint(color);
        self.inner
            .fill_ellipse(c, ax.len(), ay.len(), ax.y.atan2(ax.x), col);
    }

    fn fill_triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, color: Color) {
        let col = self.tint(color);
        self.inner
            .fill_triangle(self.xf.apply(a), self.xf.apply(b), self.xf.apply(c), col);
    }

    fn fill_rect(&mut self, origin: Vec2, w: f32, h: f32, color: Color) {
        let col = self.tint(color);
        let axis_aligned = self.xf.b.abs() < 1e-6 && self.xf.c.abs() < 1e-6;
        if axis_aligned {
            let p0 = self.xf.apply(origin);
            let p1 = self.xf.apply(origin + Vec2::new(w, h));
            let min = Vec2::new(p0.x.min(p1.x), p0.y.min(p1.y));
            self.inner
                .fill_rect(min, (p1.x - p0.x).abs(), (p1.y - p0.y).abs(), col);
        } else {
            let p0 = self.xf.apply(origin);
            let p1 = self.xf.apply(origin + Vec2::new(w, 0.0));
            let p2 = self.xf.apply(origin + Vec2::new(w, h));
            let p3 = self.xf.apply(origin + Vec2::new(0.0, h));
            self.inner.fill_triangle(p0, p1, p2, col);
            self.inner.fill_triangle(p0, p2, p3, col);
        }
    }

    fn stroke_arc(
        &mut self,
        center: Vec2,
        radius: f32,
        start: f32,
        end: f32,
        width: f32,
        color: Color,
    ) {
        let s = self.xf.uniform_scale();
        let (start, end) = self.map_angles(start, end);
        let col = self.tint(color);
        self.inner
            .stroke_arc(self.xf.apply(center), radius * s, start, end, width * s, col);
    }

    fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        let s = self.xf.uniform_scale();
        let col = self.tint(color);
        self.inner
            .line(self.xf.apply(from), self.xf.apply(to), width * s, col);
    }

    fn text(&mut self, at: Vec2, size: f32, text: &str, color: Color) {
        let s = self.xf.uniform_scale();
        let col = self.tint(color);
        self.inner.text(self.xf.apply(at), size * s, text, col);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec2, b: Vec2) -> bool {
        (a - b).len() < 1e-4
    }

    #[test]
    fn trs_maps_points_in_expected_order() {
        let xf = Affine::trs(v2(10.0, 20.0), std::f32::consts::FRAC_PI_2, 2.0, 2.0);
        // (1,0) scaled to (2,0), rotated to (0,2), translated
        assert!(close(xf.apply(v2(1.0, 0.0)), v2(10.0, 22.0)));
    }

    #[test]
    fn inverse_round_trips() {
        let xf = Affine::trs(v2(-3.0, 7.0), 0.4, 1.5, 0.5);
        let inv = xf.inverse().unwrap();
        let p = v2(12.0, -4.0);
        assert!(close(inv.apply(xf.apply(p)), p));
    }

    #[test]
    fn surface_replay_transforms_and_fades() {
        let mut src = Surface::new();
        src.fill_circle(v2(1.0, 1.0), 2.0, Color::WHITE);
        let mut dst = Surface::new();
        src.replay(&mut dst, Affine::translate(5.0, 0.0), 0.5);
        match &dst.calls()[0] {
            DrawCall::Circle {
                center,
                radius,
                color,
            } => {
                assert!(close(*center, v2(6.0, 1.0)));
                assert!((radius - 2.0).abs() < 1e-4);
                assert_eq!(color.a, 128);
            }
            other => panic!("unexpected call {other:?}"),
        }
    }

    #[test]
    fn rotated_rect_becomes_two_triangles() {
        let mut src = Surface::new();
        src.fill_rect(v2(0.0, 0.0), 4.0, 2.0, Color::BLACK);
        let mut dst = Surface::new();
        src.replay(&mut dst, Affine::rotate(0.3), 1.0);
        assert_eq!(dst.len(), 2);
        assert!(dst
            .calls()
            .iter()
            .all(|c| matches!(c, DrawCall::Triangle { .. })));
    }

    #[test]
    fn color_helpers() {
        let c = Color::hex(0x102030);
        assert_eq!((c.r, c.g, c.b, c.a), (0x10, 0x20, 0x30, 255));
        assert_eq!(c.fade(0.0).a, 0);
        assert_eq!(Color::BLACK.mix(Color::WHITE, 1.0), Color::WHITE);
    }
}
