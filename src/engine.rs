use crate::anim::Millis;
use crate::canvas::{Surface, Vec2};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub stage_width: f32,
    pub stage_height: f32,
    pub tick_ms: Millis,
    pub seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            stage_width: 400.0,
            stage_height: 300.0,
            tick_ms: 16,
            seed: 0xC0FFEE_u64,
        }
    }
}

/// Turns real frame time into a whole number of fixed logical steps.
#[derive(Clone, Debug)]
pub struct Ticker {
    step: Duration,
    accum: Duration,
    ticks: u64,
}

impl Ticker {
    /// Upper bound on steps per frame after a stall.
    pub const MAX_STEPS: u32 = 8;

    pub fn new(step_ms: Millis) -> Self {
        Self {
            step: Duration::from_millis(step_ms.max(1) as u64),
            accum: Duration::ZERO,
            ticks: 0,
        }
    }

    pub fn step_ms(&self) -> Millis {
        self.step.as_millis() as Millis
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Add elapsed real time; returns how many steps to run now.
    pub fn feed(&mut self, elapsed: Duration) -> u32 {
        self.accum = self.accum.saturating_add(elapsed);
        let mut n = 0;
        while self.accum >= self.step && n < Self::MAX_STEPS {
            self.accum -= self.step;
            n += 1;
        }
        if n == Self::MAX_STEPS {
            // drop the backlog instead of spiralling
            self.accum = Duration::ZERO;
        }
        self.ticks += n as u64;
        n
    }
}

/// The context every scene is built from: stage geometry, the ticker and
/// the drawing-surface factory.
#[derive(Clone, Debug)]
pub struct Engine {
    config: EngineConfig,
    ticker: Ticker,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        let ticker = Ticker::new(config.tick_ms);
        Self { config, ticker }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn stage_size(&self) -> Vec2 {
        Vec2::new(self.config.stage_width, self.config.stage_height)
    }

    pub fn seed(&self) -> u64 {
        self.config.seed
    }

    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    pub fn ticker_mut(&mut self) -> &mut Ticker {
        &mut self.ticker
    }

    /// Fresh, empty drawing surface.
    pub fn surface(&self) -> Surface {
        Surface::with_capacity(64)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticker_accumulates_partial_frames() {
        let mut t = Ticker::new(16);
        assert_eq!(t.feed(Duration::from_millis(10)), 0);
        assert_eq!(t.feed(Duration::from_millis(10)), 1);
        assert_eq!(t.feed(Duration::from_millis(28)), 2);
        assert_eq!(t.ticks(), 3);
    }

    #[test]
    fn ticker_caps_steps_after_stall() {
        let mut t = Ticker::new(16);
        assert_eq!(t.feed(Duration::from_secs(5)), Ticker::MAX_STEPS);
        assert_eq!(t.feed(Duration::from_millis(1)), 0);
    }

    #[test]
    fn config_fills_missing_fields_from_default() {
        let cfg: EngineConfig = serde_json::from_str(r#"{"tick_ms": 20}"#).unwrap();
        assert_eq!(cfg.tick_ms, 20);
        assert_eq!(cfg.stage_width, 400.0);
    }
}
