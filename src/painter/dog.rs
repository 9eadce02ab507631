use super::{
    body_overlays, body_silhouette, flop_ear, folded_ear, outline_color, paws, pointed_ear, tail,
    whisker_color, Layer,
};
use crate::breed::BreedConfig;
use crate::canvas::{v2, Canvas2D, Color, Surface, Vec2};

const HEAD: Vec2 = v2(0.0, -26.0);
const TONGUE: Color = Color::hex(0xF06292);

fn snout_center(cfg: &BreedConfig) -> Vec2 {
    if cfg.flags.long_snout {
        HEAD + v2(0.0, 13.0)
    } else {
        HEAD + v2(0.0, 10.0)
    }
}

pub(super) fn eye_centers(_cfg: &BreedConfig) -> (Vec2, Vec2) {
    (HEAD + v2(-9.0, -3.0), HEAD + v2(9.0, -3.0))
}

pub(super) fn draw_tail(s: &mut Surface, cfg: &BreedConfig) {
    tail(s, cfg, 5.0);
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
        Layer::Paws => paws(s, cfg, cfg.palette.pattern.with_alpha(160)),
    }
}

fn head(s: &mut Surface, cfg: &BreedConfig) {
    let f = cfg.flags;
    let p = cfg.palette;

    if f.long_fur {
        s.fill_ellipse(HEAD + v2(0.0, 14.0), 22.0, 12.0, 0.0, p.primary.darken(0.05));
    }
    if f.flat_face {
        s.fill_ellipse(HEAD, 25.0, 21.0, 0.0, p.primary);
    } else {
        s.fill_circle(HEAD, 23.0, p.primary);
    }
    if f.curly_fur {
        let puff = p.primary.lighten(0.15);
        for (x, y) in [(-12.0, -20.0), (0.0, -24.0), (12.0, -20.0), (-6.0, -16.0), (6.0, -16.0)] {
            s.fill_circle(HEAD + v2(x, y), 6.5, puff);
        }
    }
    if f.face_mask {
        // husky mask: pale lower face and brow spots
        s.fill_ellipse(HEAD + v2(0.0, 6.0), 19.0, 13.0, 0.0, p.secondary);
        s.fill_triangle(HEAD + v2(-5.0, -14.0), HEAD + v2(5.0, -14.0), HEAD + v2(0.0, 2.0), p.secondary);
        s.fill_ellipse(HEAD + v2(-9.0, -10.0), 3.0, 2.0, 0.0, p.secondary);
        s.fill_ellipse(HEAD + v2(9.0, -10.0), 3.0, 2.0, 0.0, p.secondary);
    }
    if f.bicolor {
        s.fill_ellipse(HEAD + v2(-13.0, 8.0), 7.0, 6.0, 0.0, p.secondary);
        s.fill_ellipse(HEAD + v2(13.0, 8.0), 7.0, 6.0, 0.0, p.secondary);
    }
    if f.color_point {
        s.fill_ellipse(HEAD + v2(0.0, 4.0), 15.0, 12.0, 0.0, p.pattern);
    }
    if f.stripes {
        s.line(HEAD + v2(0.0, -20.0), HEAD + v2(0.0, -12.0), 2.0, p.pattern);
    }
    if f.spots {
        s.fill_circle(HEAD + v2(-12.0, -8.0), 2.5, p.pattern);
        s.fill_circle(HEAD + v2(14.0, -4.0), 2.0, p.pattern);
    }
    if f.patches {
        s.fill_ellipse(HEAD + v2(10.0, -8.0), 10.0, 9.0, 0.2, p.pattern);
    }

    let (rx, ry) = if f.long_snout { (12.0, 9.0) } else { (10.0, 7.5) };
    s.fill_ellipse(snout_center(cfg), rx, ry, 0.0, p.secondary);
}

fn ears(s: &mut Surface, cfg: &BreedConfig) {
    let f = cfg.flags;
    let base_y = HEAD.y - 11.0;
    for side in [-1.0, 1.0] {
        if f.pointed_ears {
            pointed_ear(s, cfg, side, base_y, f.large_ears);
        }
        if f.folded_ears {
            folded_ear(s, cfg, side, base_y);
        }
        if f.flop_ears {
            flop_ear(s, cfg, side, HEAD.y - 18.0);
        }
        if !f.pointed_ears && !f.folded_ears && !f.flop_ears {
            s.fill_ellipse(v2(side * 18.0, base_y - 2.0), 6.0, 4.0, side * 0.5, cfg.palette.primary);
        }
    }
}

fn eyes(s: &mut Surface, cfg: &BreedConfig) {
    let (l, r) = eye_centers(cfg);
    let right = if cfg.flags.odd_eyes {
        cfg.palette.eye_alt
    } else {
        cfg.palette.eye
    };
    for (c, col) in [(l, cfg.palette.eye), (r, right)] {
        s.fill_circle(c, 4.2, Color::hex(0x1A1A1A));
        s.fill_circle(c, 3.4, col);
        s.fill_circle(c, 1.6, Color::hex(0x0A0A0A));
        s.fill_circle(c + v2(1.2, -1.4), 1.1, Color::WHITE);
    }
}

fn nose(s: &mut Surface, cfg: &BreedConfig) {
    let c = snout_center(cfg) + v2(0.0, -4.0);
    s.fill_ellipse(c, 4.5, 3.2, 0.0, cfg.palette.nose);
    s.fill_circle(c + v2(-1.5, -1.0), 1.0, Color::WHITE.with_alpha(160));
}

fn mouth(s: &mut Surface, cfg: &BreedConfig) {
    let c = snout_center(cfg) + v2(0.0, 2.0);
    let line = outline_color(cfg);
    s.line(c + v2(0.0, -3.0), c, 1.0, line);
    s.stroke_arc(c + v2(-3.0, 0.0), 3.0, 0.0, std::f32::consts::PI, 1.0, line);
    s.stroke_arc(c + v2(3.0, 0.0), 3.0, 0.0, std::f32::consts::PI, 1.0, line);
    if cfg.flags.tongue {
        s.fill_ellipse(c + v2(0.0, 4.5), 3.0, 4.0, 0.0, TONGUE);
        s.line(c + v2(0.0, 2.0), c + v2(0.0, 6.5), 0.6, TONGUE.darken(0.25));
    }
    if cfg.flags.whiskers {
        let col = whisker_color(cfg);
        for side in [-1.0, 1.0] {
            s.line(c + v2(side * 6.0, -4.0), c + v2(side * 18.0, -6.0), 0.6, col);
            s.line(c + v2(side * 6.0, -2.0), c + v2(side * 18.0, 0.0), 0.6, col);
        }
    }
}
