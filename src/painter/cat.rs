use super::{
    body_overlays, body_silhouette, flop_ear, folded_ear, outline_color, paws, pointed_ear, tail,
    whisker_color, Layer,
};
use crate::breed::BreedConfig;
use crate::canvas::{v2, Canvas2D, Color, Surface, Vec2};

const HEAD: Vec2 = v2(0.0, -24.0);

pub(super) fn eye_centers(cfg: &BreedConfig) -> (Vec2, Vec2) {
    let y = if cfg.flags.flat_face { -25.0 } else { -27.0 };
    (v2(-9.0, y), v2(9.0, y))
}

pub(super) fn draw_tail(s: &mut Surface, cfg: &BreedConfig) {
    tail(s, cfg, 4.5);
}

pub(super) fn draw_layer(s: &mut Surface, layer: Layer, cfg: &BreedConfig) {
    match layer {
        Layer::Body => body_silhouette(s, cfg),
        Layer::Overlays => body_overlays(s, cfg),
        Layer::Head => head(s, cfg),
        Layer::Ears => ears(s, cfg),
        Layer::Eyes => eyes(s, cfg),
        Layer::Nose => nose(s, cfg),
        Layer::Mouth => mouth(s, cfg),
        Layer::Paws => paws(s, cfg, outline_color(cfg).with_alpha(140)),
    }
}

fn head(s: &mut Surface, cfg: &BreedConfig) {
    let f = cfg.flags;
    let p = cfg.palette;

    if f.long_fur {
        // ruff
        s.fill_triangle(v2(-30.0, -18.0), v2(-18.0, -6.0), v2(-22.0, -30.0), p.primary);
        s.fill_triangle(v2(30.0, -18.0), v2(18.0, -6.0), v2(22.0, -30.0), p.primary);
    }
    if f.flat_face {
        s.fill_ellipse(HEAD, 27.0, 22.0, 0.0, p.primary);
    } else {
        s.fill_circle(HEAD, 24.0, p.primary);
    }
    // muzzle
    s.fill_ellipse(HEAD + v2(0.0, 10.0), 11.0, 7.0, 0.0, p.secondary);

    if f.color_point {
        s.fill_ellipse(HEAD + v2(0.0, 6.0), 15.0, 12.0, 0.0, p.pattern);
    }
    if f.face_mask {
        s.fill_ellipse(HEAD + v2(0.0, 8.0), 16.0, 10.0, 0.0, p.secondary);
    }
    if f.bicolor {
        s.fill_triangle(HEAD + v2(-4.0, -10.0), HEAD + v2(4.0, -10.0), HEAD + v2(0.0, 6.0), p.secondary);
    }
    if f.stripes {
        // forehead "M"
        let top = HEAD + v2(0.0, -16.0);
        s.line(top + v2(-7.0, 0.0), top + v2(-5.0, 6.0), 2.0, p.pattern);
        s.line(top, top + v2(0.0, 7.0), 2.0, p.pattern);
        s.line(top + v2(7.0, 0.0), top + v2(5.0, 6.0), 2.0, p.pattern);
        s.line(HEAD + v2(-24.0, 2.0), HEAD + v2(-16.0, 4.0), 2.0, p.pattern);
        s.line(HEAD + v2(24.0, 2.0), HEAD + v2(16.0, 4.0), 2.0, p.pattern);
    }
    if f.spots {
        s.fill_circle(HEAD + v2(-8.0, -14.0), 2.0, p.pattern);
        s.fill_circle(HEAD + v2(8.0, -14.0), 2.0, p.pattern);
    }
    if f.patches {
        s.fill_ellipse(HEAD + v2(-11.0, -8.0), 9.0, 8.0, 0.2, p.secondary);
        s.fill_ellipse(HEAD + v2(12.0, -10.0), 8.0, 7.0, -0.3, p.pattern);
    }
    if f.hairless {
        for k in 0..3 {
            s.stroke_arc(HEAD + v2(0.0, -6.0 + k as f32 * 2.5), 8.0, 3.7, 5.7, 0.9, p.pattern);
        }
    }
    if f.curly_fur {
        let puff = p.primary.lighten(0.12);
        for x in [-10.0, 0.0, 10.0] {
            s.fill_circle(HEAD + v2(x, -20.0), 5.0, puff);
        }
    }
}

fn ears(s: &mut Surface, cfg: &BreedConfig) {
    let f = cfg.flags;
    let base_y = HEAD.y - 12.0;
    for side in [-1.0, 1.0] {
        if f.pointed_ears {
            pointed_ear(s, cfg, side, base_y, f.large_ears);
        }
        if f.folded_ears {
            folded_ear(s, cfg, side, base_y);
        }
        if f.flop_ears {
            flop_ear(s, cfg, side, HEAD.y - 16.0);
        }
        if !f.pointed_ears && !f.folded_ears && !f.flop_ears {
            // rounded nubs so the head never reads as bald
            s.fill_circle(v2(side * 16.0, base_y - 4.0), 5.0, cfg.palette.primary);
        }
    }
}

fn eyes(s: &mut Surface, cfg: &BreedConfig) {
    let f = cfg.flags;
    let (l, r) = eye_centers(cfg);
    let (rx, ry) = if f.flat_face { (6.0, 6.0) } else { (5.0, 6.0) };
    let iris = [
        cfg.palette.eye,
        if f.odd_eyes { cfg.palette.eye_alt } else { cfg.palette.eye },
    ];
    for (c, col) in [l, r].into_iter().zip(iris) {
        s.fill_ellipse(c, rx + 1.0, ry + 1.0, 0.0, outline_color(cfg));
        s.fill_ellipse(c, rx, ry, 0.0, col);
        s.fill_ellipse(c, 1.6, ry - 1.5, 0.0, Color::hex(0x101010));
        s.fill_circle(c + v2(1.6, -2.2), 1.4, Color::WHITE);
    }
}

fn nose(s: &mut Surface, cfg: &BreedConfig) {
    let y = if cfg.flags.flat_face { -19.0 } else { -17.0 };
    s.fill_triangle(v2(-3.0, y), v2(3.0, y), v2(0.0, y + 3.0), cfg.palette.nose);
}

fn mouth(s: &mut Surface, cfg: &BreedConfig) {
    let y = if cfg.flags.flat_face { -13.5 } else { -11.5 };
    let line = outline_color(cfg);
    s.line(v2(0.0, y - 2.5), v2(0.0, y), 0.9, line);
    s.stroke_arc(v2(-2.5, y), 2.5, 0.0, std::f32::consts::PI, 0.9, line);
    s.stroke_arc(v2(2.5, y), 2.5, 0.0, std::f32::consts::PI, 0.9, line);

    if cfg.flags.whiskers {
        let col = whisker_color(cfg);
        for side in [-1.0, 1.0] {
            for k in 0..3 {
                let k = k as f32;
                s.line(
                    v2(side * 8.0, y - 3.0 + k * 2.0),
                    v2(side * 25.0, y - 7.0 + k * 4.5),
                    0.7,
                    col,
                );
            }
        }
    }
}
