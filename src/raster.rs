//! Software rasterizer backing [`Canvas2D`] with an RGBA pixel grid.
//!
//! Shapes are sampled at pixel centers and composited with source-over
//! blending. Text is not rasterized; labels are collected so a presenter can
//! print them with a real font (the terminal host writes them into cells).

use crate::canvas::{Canvas2D, Color, Vec2};
use std::f32::consts::TAU;

#[derive(Clone, Debug, PartialEq)]
pub struct Label {
    pub at: Vec2,
    pub size: f32,
    pub text: String,
    pub color: Color,
}

pub struct PixelCanvas {
    w: u32,
    h: u32,
    px: Vec<Color>,
    labels: Vec<Label>,
}

impl PixelCanvas {
    pub fn new(w: u32, h: u32) -> Self {
        Self {
            w,
            h,
            px: vec![Color::TRANSPARENT; (w as usize) * (h as usize)],
            labels: Vec::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.w
    }

    pub fn height(&self) -> u32 {
        self.h
    }

    fn idx(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.w as usize) + (x as usize)
    }

    pub fn get(&self, x: u32, y: u32) -> Option<Color> {
        if x < self.w && y < self.h {
            Some(self.px[self.idx(x, y)])
        } else {
            None
        }
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn clear(&mut self, c: Color) {
        self.px.fill(c);
        self.labels.clear();
    }

    fn blend_over(&mut self, x: i32, y: i32, src: Color) {
        if x < 0 || y < 0 || src.a == 0 {
            return;
        }
        let (x, y) = (x as u32, y as u32);
        if x >= self.w || y >= self.h {
            return;
        }
        let i = self.idx(x, y);
        let dst = self.px[i];

        let sa = src.a as f32 / 255.0;
        let da = dst.a as f32 / 255.0;

        let out_a = sa + da * (1.0 - sa);
        if out_a <= 1e-6 {
            self.px[i] = Color::TRANSPARENT;
            return;
        }

        let blend = |sc: u8, dc: u8| -> u8 {
            let sc = sc as f32 / 255.0;
            let dc = dc as f32 / 255.0;
            let out = (sc * sa + dc * da * (1.0 - sa)) / out_a;
            (out.clamp(0.0, 1.0) * 255.0 + 0.5) as u8
        };

        self.px[i] = Color {
            r: blend(src.r, dst.r),
            g: blend(src.g, dst.g),
            b: blend(src.b, dst.b),
            a: (out_a.clamp(0.0, 1.0) * 255.0 + 0.5) as u8,
        };
    }

    /// Visit every pixel center inside the clipped box `[min, max]`.
    fn scan(&mut self, min: Vec2, max: Vec2, color: Color, inside: impl Fn(Vec2) -> bool) {
        let x0 = (min.x.floor() as i32).max(0);
        let y0 = (min.y.floor() as i32).max(0);
        let x1 = (max.x.ceil() as i32).min(self.w as i32 - 1);
        let y1 = (max.y.ceil() as i32).min(self.h as i32 - 1);
        for y in y0..=y1 {
            for x in x0..=x1 {
                if inside(Vec2::new(x as f32 + 0.5, y as f32 + 0.5)) {
                    self.blend_over(x, y, color);
                }
            }
        }
    }
}

fn edge(a: Vec2, b: Vec2, p: Vec2) -> f32 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}

fn dist_to_segment(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len2 = ab.x * ab.x + ab.y * ab.y;
    if len2 <= 1e-9 {
        return (p - a).len();
    }
    let t = (((p.x - a.x) * ab.x + (p.y - a.y) * ab.y) / len2).clamp(0.0, 1.0);
    (p - (a + ab * t)).len()
}

impl Canvas2D for PixelCanvas {
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        let r = radius.max(0.5);
        let r2 = r * r;
        self.scan(
            center - Vec2::new(r, r),
            center + Vec2::new(r, r),
            color,
            |p| {
                let d = p - center;
                d.x * d.x + d.y * d.y <= r2
            },
        );
    }

    fn fill_ellipse(&mut self, center: Vec2, rx: f32, ry: f32, angle: f32, color: Color) {
        let (rx, ry) = (rx.max(0.5), ry.max(0.5));
        let reach = rx.max(ry);
        let (s, c) = angle.sin_cos();
        self.scan(
            center - Vec2::new(reach, reach),
            center + Vec2::new(reach, reach),
            color,
            |p| {
                let d = p - center;
                let lx = d.x * c + d.y * s;
                let ly = -d.x * s + d.y * c;
                (lx / rx).powi(2) + (ly / ry).powi(2) <= 1.0
            },
        );
    }

    fn fill_triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, color: Color) {
        let area = edge(a, b, c);
        if area.abs() <= 1e-6 {
            return;
        }
        let min = Vec2::new(a.x.min(b.x).min(c.x), a.y.min(b.y).min(c.y));
        let max = Vec2::new(a.x.max(b.x).max(c.x), a.y.max(b.y).max(c.y));
        self.scan(min, max, color, |p| {
            let w0 = edge(b, c, p) * area.signum();
            let w1 = edge(c, a, p) * area.signum();
            let w2 = edge(a, b, p) * area.signum();
            w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0
        });
    }

    fn fill_rect(&mut self, origin: Vec2, w: f32, h: f32, color: Color) {
        let max = origin + Vec2::new(w, h);
        self.scan(origin, max, color, |p| {
            p.x >= origin.x && p.x < max.x && p.y >= origin.y && p.y < max.y
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
        let half = (width * 0.5).max(0.5);
        let sweep = (end - start).clamp(-TAU, TAU);
        let (start, sweep) = if sweep < 0.0 {
            (start + sweep, -sweep)
        } else {
            (start, sweep)
        };
        let start = start.rem_euclid(TAU);
        let reach = radius + half;
        self.scan(
            center - Vec2::new(reach, reach),
            center + Vec2::new(reach, reach),
            color,
            |p| {
                let d = p - center;
                if (d.len() - radius).abs() > half {
                    return false;
                }
                let ang = d.y.atan2(d.x).rem_euclid(TAU);
                (ang - start).rem_euclid(TAU) <= sweep
            },
        );
    }

    fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        let half = (width * 0.5).max(0.5);
        let min = Vec2::new(from.x.min(to.x) - half, from.y.min(to.y) - half);
        let max = Vec2::new(from.x.max(to.x) + half, from.y.max(to.y) + half);
        self.scan(min, max, color, |p| dist_to_segment(p, from, to) <= half);
    }

    fn text(&mut self, at: Vec2, size: f32, text: &str, color: Color) {
        if color.a == 0 || text.is_empty() {
            return;
        }
        self.labels.push(Label {
            at,
            size,
            text: text.to_string(),
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::v2;

    const RED: Color = Color::hex(0xFF0000);

    #[test]
    fn circle_covers_center_not_corner() {
        let mut c = PixelCanvas::new(20, 20);
        c.fill_circle(v2(10.0, 10.0), 4.0, RED);
        assert_eq!(c.get(10, 10), Some(RED));
        assert_eq!(c.get(0, 0), Some(Color::TRANSPARENT));
    }

    #[test]
    fn triangle_winding_does_not_matter() {
        let mut cw = PixelCanvas::new(10, 10);
        let mut ccw = PixelCanvas::new(10, 10);
        cw.fill_triangle(v2(0.0, 0.0), v2(9.0, 0.0), v2(0.0, 9.0), RED);
        ccw.fill_triangle(v2(0.0, 0.0), v2(0.0, 9.0), v2(9.0, 0.0), RED);
        assert_eq!(cw.get(2, 2), Some(RED));
        assert_eq!(ccw.get(2, 2), Some(RED));
        assert_eq!(cw.get(8, 8), Some(Color::TRANSPARENT));
    }

    #[test]
    fn half_alpha_blends_over_opaque() {
        let mut c = PixelCanvas::new(4, 4);
        c.clear(Color::BLACK);
        c.fill_rect(v2(0.0, 0.0), 4.0, 4.0, Color::WHITE.with_alpha(128));
        let p = c.get(1, 1).unwrap();
        assert_eq!(p.a, 255);
        assert!(p.r > 120 && p.r < 136);
    }

    #[test]
    fn arc_only_draws_its_sweep() {
        let mut c = PixelCanvas::new(40, 40);
        // lower half (y-down, clockwise from +x)
        c.stroke_arc(v2(20.0, 20.0), 10.0, 0.0, std::f32::consts::PI, 2.0, RED);
        assert_eq!(c.get(20, 30), Some(RED));
        assert_eq!(c.get(20, 9), Some(Color::TRANSPARENT));
    }

    #[test]
    fn text_is_collected_as_label() {
        let mut c = PixelCanvas::new(8, 8);
        c.text(v2(1.0, 2.0), 8.0, "nom", Color::WHITE);
        assert_eq!(c.labels().len(), 1);
        c.clear(Color::BLACK);
        assert!(c.labels().is_empty());
    }
}
