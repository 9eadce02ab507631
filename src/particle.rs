//! Fire-and-forget visual particles.
//!
//! A particle moves, fades and expires on its own. Whoever spawns one never
//! hears about it again; the container drops it when its life runs out.

use crate::anim::Millis;
use crate::canvas::{v2, Canvas2D, Color, Vec2};
use rand::Rng;
use std::f32::consts::{FRAC_PI_2, TAU};

#[derive(Clone, Debug, PartialEq)]
pub enum ParticleKind {
    Heart,
    Sparkle,
    Crumb,
    Bubble,
    Steam,
    Droplet,
    Zzz,
    Twinkle,
    Leaf,
    Label(String),
}

#[derive(Clone, Debug)]
pub struct Particle {
    pub kind: ParticleKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub gravity: f32,
    pub size: f32,
    /// Size change per second.
    pub grow: f32,
    pub spin: f32,
    pub angle: f32,
    pub color: Color,
    pub life: Millis,
    pub age: Millis,
}

impl Particle {
    pub fn new(kind: ParticleKind, pos: Vec2, color: Color, life: Millis) -> Self {
        Self {
            kind,
            pos,
            vel: Vec2::ZERO,
            gravity: 0.0,
            size: 4.0,
            grow: 0.0,
            spin: 0.0,
            angle: 0.0,
            color,
            life: life.max(1),
            age: 0,
        }
    }

    pub fn heart(at: Vec2, rng: &mut impl Rng) -> Self {
        Self {
            vel: v2(rng.gen_range(-18.0..18.0), rng.gen_range(-55.0..-35.0)),
            size: rng.gen_range(4.0..6.0),
            ..Self::new(ParticleKind::Heart, at, Color::hex(0xFF5C8A), 900)
        }
    }

    pub fn sparkle(at: Vec2, rng: &mut impl Rng) -> Self {
        Self {
            vel: v2(rng.gen_range(-6.0..6.0), rng.gen_range(-14.0..-4.0)),
            size: rng.gen_range(3.0..5.5),
            spin: rng.gen_range(-2.0..2.0),
            ..Self::new(ParticleKind::Sparkle, at, Color::hex(0xFFF3A3), 1100)
        }
    }

    pub fn crumb(at: Vec2, color: Color, rng: &mut impl Rng) -> Self {
        Self {
            vel: v2(rng.gen_range(-40.0..40.0), rng.gen_range(-70.0..-30.0)),
            gravity: 220.0,
            size: rng.gen_range(1.2..2.4),
            ..Self::new(ParticleKind::Crumb, at, color, 600)
        }
    }

    pub fn bubble(at: Vec2, rng: &mut impl Rng) -> Self {
        Self {
            vel: v2(rng.gen_range(-8.0..8.0), rng.gen_range(-30.0..-15.0)),
            size: rng.gen_range(3.0..7.0),
            grow: 2.0,
            ..Self::new(ParticleKind::Bubble, at, Color::hex(0xCDEBFF), 1800)
        }
    }

    pub fn steam(at: Vec2, rng: &mut impl Rng) -> Self {
        Self {
            vel: v2(rng.gen_range(-5.0..5.0), rng.gen_range(-22.0..-12.0)),
            size: rng.gen_range(6.0..9.0),
            grow: 8.0,
            ..Self::new(ParticleKind::Steam, at, Color::WHITE.with_alpha(110), 2200)
        }
    }

    pub fn droplet(at: Vec2, rng: &mut impl Rng) -> Self {
        let a = rng.gen_range(-2.6..-0.5);
        let speed = rng.gen_range(60.0..120.0);
        Self {
            vel: Vec2::from_angle(a) * speed,
            gravity: 260.0,
            size: rng.gen_range(1.8..3.2),
            ..Self::new(ParticleKind::Droplet, at, Color::hex(0x6EC6FF), 800)
        }
    }

    pub fn zzz(at: Vec2, rng: &mut impl Rng) -> Self {
        Self {
            vel: v2(rng.gen_range(8.0..16.0), rng.gen_range(-20.0..-14.0)),
            size: 5.0,
            grow: 3.0,
            ..Self::new(ParticleKind::Zzz, at, Color::hex(0xB8C4FF), 2400)
        }
    }

    pub fn twinkle(at: Vec2, rng: &mut impl Rng) -> Self {
        Self {
            size: rng.gen_range(1.5..3.0),
            ..Self::new(ParticleKind::Twinkle, at, Color::hex(0xFFF9C4), 900)
        }
    }

    pub fn leaf(at: Vec2, rng: &mut impl Rng) -> Self {
        Self {
            vel: v2(rng.gen_range(-12.0..-4.0), rng.gen_range(10.0..22.0)),
            size: rng.gen_range(2.5..4.0),
            spin: rng.gen_range(-1.5..1.5),
            ..Self::new(ParticleKind::Leaf, at, Color::hex(0x8BC34A), 3000)
        }
    }

    pub fn label(at: Vec2, text: &str, color: Color) -> Self {
        Self {
            vel: v2(0.0, -30.0),
            size: 10.0,
            ..Self::new(ParticleKind::Label(text.to_string()), at, color, 700)
        }
    }

    pub fn is_alive(&self) -> bool {
        self.age < self.life
    }

    /// Fade in over the first tenth, out over the rest.
    pub fn opacity(&self) -> f32 {
        let t = self.age as f32 / self.life as f32;
        if t < 0.1 {
            t / 0.1
        } else {
            1.0 - (t - 0.1) / 0.9
        }
    }

    pub fn update(&mut self, dt: Millis) {
        let s = dt as f32 / 1000.0;
        self.age = self.age.saturating_add(dt);
        self.vel.y += self.gravity * s;
        self.pos += self.vel * s;
        self.size = (self.size + self.grow * s).max(0.1);
        self.angle += self.spin * s;
    }

    pub fn draw(&self, c: &mut dyn Canvas2D) {
        let col = self.color.fade(self.opacity());
        let p = self.pos;
        let r = self.size;
        match &self.kind {
            ParticleKind::Heart => {
                c.fill_circle(p + v2(-r * 0.5, 0.0), r * 0.55, col);
                c.fill_circle(p + v2(r * 0.5, 0.0), r * 0.55, col);
                c.fill_triangle(
                    p + v2(-r * 1.05, r * 0.2),
                    p + v2(r * 1.05, r * 0.2),
                    p + v2(0.0, r * 1.3),
                    col,
                );
            }
            ParticleKind::Sparkle => {
                for k in 0..4 {
                    let a = self.angle + k as f32 * FRAC_PI_2;
                    let tip = p + Vec2::from_angle(a) * r;
                    let side = Vec2::from_angle(a + FRAC_PI_2) * (r * 0.22);
                    c.fill_triangle(p + side, p - side, tip, col);
                }
                c.fill_circle(p, r * 0.25, Color::WHITE.fade(self.opacity()));
            }
            ParticleKind::Crumb => c.fill_circle(p, r, col),
            ParticleKind::Bubble => {
                c.stroke_arc(p, r, 0.0, TAU, 1.0, col);
                c.fill_circle(p + v2(-r * 0.35, -r * 0.35), r * 0.25, Color::WHITE.fade(self.opacity()));
            }
            ParticleKind::Steam => c.fill_ellipse(p, r, r * 0.7, 0.0, col),
            ParticleKind::Droplet => {
                c.fill_circle(p, r, col);
                c.fill_triangle(p + v2(-r * 0.8, -r * 0.3), p + v2(r * 0.8, -r * 0.3), p + v2(0.0, -r * 2.0), col);
            }
            ParticleKind::Zzz => {
                let h = r;
                let w = r * 0.8;
                c.line(p + v2(-w, -h), p + v2(w, -h), 1.2, col);
                c.line(p + v2(w, -h), p + v2(-w, h), 1.2, col);
                c.line(p + v2(-w, h), p + v2(w, h), 1.2, col);
            }
            ParticleKind::Twinkle => {
                c.line(p + v2(-r, 0.0), p + v2(r, 0.0), 0.8, col);
                c.line(p + v2(0.0, -r), p + v2(0.0, r), 0.8, col);
                c.fill_circle(p, r * 0.35, col);
            }
            ParticleKind::Leaf => c.fill_ellipse(p, r * 1.6, r * 0.7, self.angle, col),
            ParticleKind::Label(text) => c.text(p, r, text, col),
        }
    }
}

#[derive(Debug, Default)]
pub struct Particles {
    items: Vec<Particle>,
}

impl Particles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, p: Particle) {
        self.items.push(p);
    }

    pub fn update(&mut self, dt: Millis) {
        for p in &mut self.items {
            p.update(dt);
        }
        self.items.retain(Particle::is_alive);
    }

    pub fn draw(&self, c: &mut dyn Canvas2D) {
        for p in &self.items {
            p.draw(c);
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn count(&self, kind: &ParticleKind) -> usize {
        self.items.iter().filter(|p| &p.kind == kind).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Surface;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn particles_destroy_themselves() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut ps = Particles::new();
        ps.spawn(Particle::heart(v2(0.0, 0.0), &mut rng));
        ps.spawn(Particle::crumb(v2(0.0, 0.0), Color::BLACK, &mut rng));
        for _ in 0..200 {
            ps.update(16);
        }
        assert!(ps.is_empty());
    }

    #[test]
    fn opacity_peaks_early_and_fades_to_zero() {
        let mut p = Particle::label(v2(0.0, 0.0), "nom", Color::WHITE);
        assert_eq!(p.opacity(), 0.0);
        p.age = p.life / 10;
        assert!((p.opacity() - 1.0).abs() < 1e-3);
        p.age = p.life;
        assert!(p.opacity().abs() < 1e-3);
    }

    #[test]
    fn label_draws_text() {
        let mut p = Particle::label(v2(1.0, 1.0), "nom", Color::WHITE);
        p.age = 100;
        let mut s = Surface::new();
        p.draw(&mut s);
        assert!(matches!(&s.calls()[0], crate::canvas::DrawCall::Text { text, .. } if text == "nom"));
    }
}
