//! Tick-driven timers and tweens.
//!
//! Nothing here owns a clock. Owners call `advance(dt)` once per logical tick
//! and get back what fired, so every timer and tween lives exactly as long as
//! the collection holding it. Dropping or clearing the collection is
//! cancellation.

use std::f32::consts::PI;

pub type Millis = u32;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TweenId(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Ease {
    #[default]
    Linear,
    QuadIn,
    QuadOut,
    SineInOut,
    BackOut,
    BounceOut,
}

impl Ease {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::QuadIn => t * t,
            Ease::QuadOut => t * (2.0 - t),
            Ease::SineInOut => 0.5 - 0.5 * (PI * t).cos(),
            Ease::BackOut => {
                let c1 = 1.70158;
                let c3 = c1 + 1.0;
                1.0 + c3 * (t - 1.0).powi(3) + c1 * (t - 1.0).powi(2)
            }
            Ease::BounceOut => {
                let n1 = 7.5625;
                let d1 = 2.75;
                if t < 1.0 / d1 {
                    n1 * t * t
                } else if t < 2.0 / d1 {
                    let t = t - 1.5 / d1;
                    n1 * t * t + 0.75
                } else if t < 2.5 / d1 {
                    let t = t - 2.25 / d1;
                    n1 * t * t + 0.9375
                } else {
                    let t = t - 2.625 / d1;
                    n1 * t * t + 0.984375
                }
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Repeat {
    /// Run `n` cycles in total, then finish.
    Times(u32),
    /// Never finishes; only cancellation stops it.
    Forever,
}

#[derive(Clone, Debug)]
pub struct Tween<K> {
    pub target: K,
    pub from: f32,
    pub to: f32,
    pub duration: Millis,
    pub delay: Millis,
    pub ease: Ease,
    pub repeat: Repeat,
    /// Every odd cycle plays backwards.
    pub yoyo: bool,
    elapsed: u64,
}

impl<K> Tween<K> {
    pub fn new(target: K, from: f32, to: f32, duration: Millis) -> Self {
        Self {
            target,
            from,
            to,
            duration: duration.max(1),
            delay: 0,
            ease: Ease::Linear,
            repeat: Repeat::Times(1),
            yoyo: false,
            elapsed: 0,
        }
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn delay(mut self, ms: Millis) -> Self {
        self.delay = ms;
        self
    }

    pub fn yoyo(mut self) -> Self {
        self.yoyo = true;
        self
    }

    pub fn repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self
    }

    pub fn forever(self) -> Self {
        self.repeat(Repeat::Forever)
    }

    fn cycles(&self) -> Option<u64> {
        match self.repeat {
            Repeat::Times(n) => Some(n.max(1) as u64),
            Repeat::Forever => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        match self.cycles() {
            Some(n) => self.elapsed >= self.delay as u64 + n * self.duration as u64,
            None => false,
        }
    }

    pub fn is_started(&self) -> bool {
        self.elapsed >= self.delay as u64
    }

    /// Value at the current elapsed time.
    pub fn value(&self) -> f32 {
        let d = self.duration as u64;
        let run = self.elapsed.saturating_sub(self.delay as u64);
        let (cycle, phase) = match self.cycles() {
            Some(n) if run >= n * d => (n - 1, 1.0),
            _ => (run / d, (run % d) as f32 / d as f32),
        };
        let t = if self.yoyo && cycle % 2 == 1 {
            1.0 - phase
        } else {
            phase
        };
        self.from + (self.to - self.from) * self.ease.apply(t)
    }

    fn step(&mut self, dt: Millis) {
        self.elapsed += dt as u64;
    }
}

/// A set of running tweens addressed by target key.
#[derive(Debug)]
pub struct Tweens<K> {
    next_id: u64,
    entries: Vec<(TweenId, Tween<K>)>,
}

impl<K> Default for Tweens<K> {
    fn default() -> Self {
        Self {
            next_id: 1,
            entries: Vec::new(),
        }
    }
}

impl<K: Copy + PartialEq> Tweens<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, tween: Tween<K>) -> TweenId {
        let id = TweenId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, tween));
        id
    }

    /// Add after cancelling whatever else drives the same target.
    pub fn replace(&mut self, tween: Tween<K>) -> TweenId {
        self.cancel_target(tween.target);
        self.add(tween)
    }

    pub fn cancel(&mut self, id: TweenId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(i, _)| *i != id);
        self.entries.len() != before
    }

    pub fn cancel_target(&mut self, target: K) -> usize {
        let before = self.entries.len();
        self.entries.retain(|(_, t)| t.target != target);
        before - self.entries.len()
    }

    pub fn cancel_where(&mut self, mut pred: impl FnMut(&K) -> bool) -> usize {
        let before = self.entries.len();
        self.entries.retain(|(_, t)| !pred(&t.target));
        before - self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: TweenId) -> bool {
        self.entries.iter().any(|(i, _)| *i == id)
    }

    pub fn is_animating(&self, target: K) -> bool {
        self.entries.iter().any(|(_, t)| t.target == target)
    }

    /// Step every tween and return `(target, value)` in insertion order.
    /// Tweens still inside their delay report nothing; finished tweens report
    /// their final value once and are dropped.
    pub fn advance(&mut self, dt: Millis) -> Vec<(K, f32)> {
        let mut out = Vec::with_capacity(self.entries.len());
        for (_, t) in &mut self.entries {
            t.step(dt);
            if t.is_started() {
                out.push((t.target, t.value()));
            }
        }
        self.entries.retain(|(_, t)| !t.is_finished());
        out
    }
}

#[derive(Clone, Debug)]
struct TimerEntry<M> {
    id: TimerId,
    due: u64,
    interval: Option<Millis>,
    msg: M,
}

/// One-shot and repeating timers that deliver a message when due.
#[derive(Debug)]
pub struct Timers<M> {
    now: u64,
    next_id: u64,
    entries: Vec<TimerEntry<M>>,
}

impl<M> Default for Timers<M> {
    fn default() -> Self {
        Self {
            now: 0,
            next_id: 1,
            entries: Vec::new(),
        }
    }
}

impl<M: Clone> Timers<M> {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, delay: Millis, interval: Option<Millis>, msg: M) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.entries.push(TimerEntry {
            id,
            due: self.now + delay as u64,
            interval,
            msg,
        });
        id
    }

    pub fn after(&mut self, delay: Millis, msg: M) -> TimerId {
        self.push(delay, None, msg)
    }

    /// Fires every `interval` ms until cancelled.
    pub fn every(&mut self, interval: Millis, msg: M) -> TimerId {
        let interval = interval.max(1);
        self.push(interval, Some(interval), msg)
    }

    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn now(&self) -> u64 {
        self.now
    }

    /// Move time forward and collect due messages, earliest first. A
    /// repeating timer that fell several intervals behind fires once per
    /// missed interval.
    pub fn advance(&mut self, dt: Millis) -> Vec<M> {
        self.now += dt as u64;
        let mut fired: Vec<(u64, TimerId, M)> = Vec::new();
        for e in &mut self.entries {
            while e.due <= self.now {
                fired.push((e.due, e.id, e.msg.clone()));
                match e.interval {
                    Some(iv) => e.due += iv as u64,
                    None => break,
                }
            }
        }
        let now = self.now;
        self.entries
            .retain(|e| e.interval.is_some() || e.due > now);
        fired.sort_by_key(|(due, id, _)| (*due, *id));
        fired.into_iter().map(|(_, _, m)| m).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_shot_fires_once() {
        let mut t = Timers::new();
        t.after(100, "ping");
        assert!(t.advance(99).is_empty());
        assert_eq!(t.advance(1), vec!["ping"]);
        assert!(t.advance(1000).is_empty());
        assert!(t.is_empty());
    }

    #[test]
    fn repeating_timer_never_expires() {
        let mut t = Timers::new();
        t.every(50, 1u8);
        let mut total = 0;
        for _ in 0..1000 {
            total += t.advance(10).len();
        }
        assert_eq!(total, 200);
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn cancelled_timer_stays_silent() {
        let mut t = Timers::new();
        let id = t.after(10, ());
        assert!(t.cancel(id));
        assert!(t.advance(100).is_empty());
        assert!(!t.cancel(id));
    }

    #[test]
    fn fired_messages_come_out_in_due_order() {
        let mut t = Timers::new();
        t.after(30, 'c');
        t.after(10, 'a');
        t.after(20, 'b');
        assert_eq!(t.advance(100), vec!['a', 'b', 'c']);
    }

    #[test]
    fn tween_reaches_target_and_is_removed() {
        let mut tw = Tweens::new();
        tw.add(Tween::new('x', 0.0, 10.0, 100));
        let mid = tw.advance(50);
        assert_eq!(mid, vec![('x', 5.0)]);
        let end = tw.advance(60);
        assert_eq!(end, vec![('x', 10.0)]);
        assert!(tw.is_empty());
    }

    #[test]
    fn yoyo_returns_to_start() {
        let mut tw = Tweens::new();
        tw.add(Tween::new('y', 0.0, 4.0, 100).yoyo().repeat(Repeat::Times(2)));
        tw.advance(100);
        let back = tw.advance(100);
        assert_eq!(back, vec![('y', 0.0)]);
        assert!(tw.is_empty());
    }

    #[test]
    fn forever_tween_keeps_running() {
        let mut tw = Tweens::new();
        tw.add(Tween::new('b', 1.0, 1.05, 800).yoyo().forever());
        for _ in 0..10_000 {
            tw.advance(16);
        }
        assert_eq!(tw.len(), 1);
        tw.clear();
        assert!(tw.advance(16).is_empty());
    }

    #[test]
    fn delayed_tween_is_quiet_until_started() {
        let mut tw = Tweens::new();
        tw.add(Tween::new('d', 0.0, 1.0, 10).delay(50));
        assert!(tw.advance(49).is_empty());
        assert_eq!(tw.advance(1), vec![('d', 0.0)]);
    }

    #[test]
    fn replace_cancels_same_target() {
        let mut tw = Tweens::new();
        tw.add(Tween::new('r', 0.0, 1.0, 100));
        tw.add(Tween::new('q', 0.0, 1.0, 100));
        tw.replace(Tween::new('r', 5.0, 6.0, 100));
        assert_eq!(tw.len(), 2);
        let vals = tw.advance(0);
        assert!(vals.contains(&('r', 5.0)));
    }

    #[test]
    fn eases_hit_endpoints() {
        for e in [
            Ease::Linear,
            Ease::QuadIn,
            Ease::QuadOut,
            Ease::SineInOut,
            Ease::BackOut,
            Ease::BounceOut,
        ] {
            assert!(e.apply(0.0).abs() < 1e-4, "{e:?} at 0");
            assert!((e.apply(1.0) - 1.0).abs() < 1e-4, "{e:?} at 1");
        }
    }
}
