//! Small scripted states for exercising the search in unit tests.

use engine_core::{SearchAction, SearchState};
use rand::seq::index::sample;
use rand::Rng;

/// Choose option `n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pick(pub u8);

impl SearchAction for Pick {
    type Key = u8;

    fn key(&self) -> u8 {
        self.0
    }

    fn label(&self) -> String {
        format!("pick {}", self.0)
    }
}

/// One-shot bandit: pick an arm, receive its payout, game over.
#[derive(Debug, Clone)]
pub struct BanditState {
    pub payouts: Vec<f64>,
    pub chosen: Option<u8>,
}

impl BanditState {
    pub fn new(payouts: &[f64]) -> Self {
        Self {
            payouts: payouts.to_vec(),
            chosen: None,
        }
    }
}

impl SearchState for BanditState {
    type Action = Pick;
    type Committed = u8;

    fn get_actions(&self) -> Vec<Pick> {
        if self.chosen.is_some() {
            return Vec::new();
        }
        (0..self.payouts.len() as u8).map(Pick).collect()
    }

    fn step(&mut self, action: &Pick) {
        self.chosen = Some(action.0);
    }

    fn ended(&self) -> bool {
        self.chosen.is_some()
    }

    fn score(&self) -> f64 {
        self.chosen
            .map(|arm| self.payouts[arm as usize])
            .unwrap_or(0.0)
    }

    fn health(&self) -> f64 {
        1.0
    }

    fn copy_undeterministic<R: Rng + ?Sized>(&self, _rng: &mut R) -> Self {
        self.clone()
    }

    fn to_committed(&self, action: &Pick) -> u8 {
        action.0
    }
}

/// Sequence of `depth` choices among `width` options; score is the sum of
/// the picked option numbers.
#[derive(Debug, Clone)]
pub struct ChainState {
    pub width: u8,
    pub depth: u32,
    pub picks: Vec<u8>,
}

impl ChainState {
    pub fn new(width: u8, depth: u32) -> Self {
        Self {
            width,
            depth,
            picks: Vec::new(),
        }
    }
}

impl SearchState for ChainState {
    type Action = Pick;
    type Committed = u8;

    fn get_actions(&self) -> Vec<Pick> {
        if self.ended() {
            return Vec::new();
        }
        (0..self.width).map(Pick).collect()
    }

    fn step(&mut self, action: &Pick) {
        self.picks.push(action.0);
    }

    fn ended(&self) -> bool {
        self.picks.len() as u32 >= self.depth
    }

    fn score(&self) -> f64 {
        self.picks.iter().map(|&p| p as f64).sum()
    }

    fn health(&self) -> f64 {
        1.0
    }

    fn copy_undeterministic<R: Rng + ?Sized>(&self, _rng: &mut R) -> Self {
        self.clone()
    }

    fn to_committed(&self, action: &Pick) -> u8 {
        action.0
    }
}

/// Bandit whose legal arms are resampled on every copy: each copy offers a
/// random non-empty subset of `0..arms`, like a hand drawn from a shuffled deck.
/// With `allow_empty` a copy may offer nothing at all.
#[derive(Debug, Clone)]
pub struct FlakyState {
    pub arms: u8,
    pub offered: Vec<u8>,
    pub chosen: Option<u8>,
    pub allow_empty: bool,
}

impl FlakyState {
    pub fn new(arms: u8) -> Self {
        Self {
            arms,
            offered: (0..arms).collect(),
            chosen: None,
            allow_empty: false,
        }
    }

    pub fn sometimes_empty(arms: u8) -> Self {
        Self {
            allow_empty: true,
            ..Self::new(arms)
        }
    }
}

impl SearchState for FlakyState {
    type Action = Pick;
    type Committed = u8;

    fn get_actions(&self) -> Vec<Pick> {
        if self.chosen.is_some() {
            return Vec::new();
        }
        self.offered.iter().map(|&a| Pick(a)).collect()
    }

    fn step(&mut self, action: &Pick) {
        self.chosen = Some(action.0);
    }

    fn ended(&self) -> bool {
        self.chosen.is_some()
    }

    fn score(&self) -> f64 {
        self.chosen.map(|arm| arm as f64).unwrap_or(0.0)
    }

    fn health(&self) -> f64 {
        1.0
    }

    fn copy_undeterministic<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        let arms = self.arms as usize;
        let least = if self.allow_empty { 0 } else { 1 };
        let amount = rng.gen_range(least..=arms);
        let mut offered: Vec<u8> = sample(rng, arms, amount)
            .into_iter()
            .map(|i| i as u8)
            .collect();
        offered.sort_unstable();
        Self {
            arms: self.arms,
            offered,
            chosen: self.chosen,
            allow_empty: self.allow_empty,
        }
    }

    fn to_committed(&self, action: &Pick) -> u8 {
        action.0
    }
}

/// Position with a fixed action list that never changes and never ends on
/// its own; used for the fast path and the empty-action cases.
#[derive(Debug, Clone)]
pub struct FixedState {
    pub actions: Vec<u8>,
}

impl SearchState for FixedState {
    type Action = Pick;
    type Committed = u8;

    fn get_actions(&self) -> Vec<Pick> {
        self.actions.iter().map(|&a| Pick(a)).collect()
    }

    fn step(&mut self, _action: &Pick) {
        self.actions.clear();
    }

    fn ended(&self) -> bool {
        self.actions.is_empty()
    }

    fn score(&self) -> f64 {
        0.0
    }

    fn health(&self) -> f64 {
        0.0
    }

    fn copy_undeterministic<R: Rng + ?Sized>(&self, _rng: &mut R) -> Self {
        self.clone()
    }

    fn to_committed(&self, action: &Pick) -> u8 {
        action.0
    }
}
