use crate::anim::Millis;
use std::collections::VecDeque;

#[derive(Clone, Debug, PartialEq)]
pub struct Step<S> {
    /// Wait after the previous step fired (or after the start, for the first).
    pub wait: Millis,
    pub action: S,
}

/// An ordered chain of timed steps. Step N+1's clock only starts once step N
/// has fired, so steps can never reorder. Cancelling drops every pending
/// step at once.
#[derive(Clone, Debug)]
pub struct Timeline<S> {
    name: &'static str,
    steps: VecDeque<Step<S>>,
    waited: u64,
    fired: usize,
    cancelled: bool,
}

impl<S> Timeline<S> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            steps: VecDeque::new(),
            waited: 0,
            fired: 0,
            cancelled: false,
        }
    }

    pub fn then(mut self, wait: Millis, action: S) -> Self {
        self.steps.push_back(Step { wait, action });
        self
    }

    pub fn push(&mut self, wait: Millis, action: S) {
        self.steps.push_back(Step { wait, action });
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn pending(&self) -> usize {
        self.steps.len()
    }

    pub fn fired(&self) -> usize {
        self.fired
    }

    pub fn is_finished(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Total time from now until the last step fires.
    pub fn remaining(&self) -> u64 {
        let total: u64 = self.steps.iter().map(|s| s.wait as u64).sum();
        total.saturating_sub(self.waited)
    }

    pub fn cancel(&mut self) {
        self.steps.clear();
        self.cancelled = true;
    }

    /// Advance by `dt` and return every step that came due, in order.
    /// Leftover time after a step fires carries into the next wait.
    pub fn advance(&mut self, dt: Millis) -> Vec<S> {
        let mut out = Vec::new();
        self.waited += dt as u64;
        while let Some(front) = self.steps.front() {
            let wait = front.wait as u64;
            if self.waited < wait {
                break;
            }
            self.waited -= wait;
            if let Some(step) = self.steps.pop_front() {
                self.fired += 1;
                out.push(step.action);
            }
        }
        if self.steps.is_empty() {
            self.waited = 0;
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_fire_in_chain_order() {
        let mut tl = Timeline::new("t").then(0, 'a').then(100, 'b').then(50, 'c');
        assert_eq!(tl.advance(0), vec!['a']);
        assert!(tl.advance(99).is_empty());
        assert_eq!(tl.advance(1), vec!['b']);
        assert_eq!(tl.advance(50), vec!['c']);
        assert!(tl.is_finished());
        assert_eq!(tl.fired(), 3);
    }

    #[test]
    fn big_tick_fires_several_steps_in_order() {
        let mut tl = Timeline::new("t").then(10, 1).then(10, 2).then(10, 3);
        assert_eq!(tl.advance(25), vec![1, 2]);
        assert_eq!(tl.remaining(), 5);
        assert_eq!(tl.advance(5), vec![3]);
    }

    #[test]
    fn cancel_drops_everything() {
        let mut tl = Timeline::new("t").then(10, ()).then(10, ());
        tl.cancel();
        assert!(tl.is_finished() && tl.is_cancelled());
        assert!(tl.advance(1000).is_empty());
    }
}
