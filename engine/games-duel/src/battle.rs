//! Battle state and rules.

use engine_core::{SearchAction, SearchState};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use thiserror::Error;

use crate::cards::{starter_deck, Card};
use crate::enemy::Enemy;

/// Scenario parameters for a battle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuelConfig {
    pub player_hp: u32,
    pub enemy_hp: u32,
    /// Energy available at the start of every turn
    pub energy: u32,
    /// Cards drawn at the start of every turn
    pub hand_size: u32,
    /// The battle ends after this many turns even if nobody died
    pub max_turns: u32,
    pub deck: Vec<Card>,
}

impl Default for DuelConfig {
    fn default() -> Self {
        Self {
            player_hp: 50,
            enemy_hp: 60,
            energy: 3,
            hand_size: 5,
            max_turns: 30,
            deck: starter_deck(),
        }
    }
}

/// A legal move inside the battle simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DuelAction {
    /// Play one copy of this card from hand
    Play(Card),
    /// Stop playing cards and let the enemy act
    EndTurn,
}

impl SearchAction for DuelAction {
    type Key = DuelAction;

    fn key(&self) -> DuelAction {
        *self
    }

    fn label(&self) -> String {
        match self {
            DuelAction::Play(card) => format!("Play {}", card),
            DuelAction::EndTurn => "End turn".to_string(),
        }
    }
}

/// Command committed to the real battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    PlayCard { hand_index: usize, card: Card },
    EndTurn,
}

/// Errors raised when applying a command to the real battle.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DuelError {
    #[error("Battle is already over")]
    BattleOver,

    #[error("No card at hand index {index} (hand size {hand_size})")]
    InvalidHandIndex { index: usize, hand_size: usize },

    #[error("Card {card} at hand index {index} does not match the hand ({actual})")]
    CardMismatch {
        index: usize,
        card: Card,
        actual: Card,
    },

    #[error("Not enough energy to play {card}: need {cost}, have {energy}")]
    NotEnoughEnergy { card: Card, cost: u32, energy: u32 },
}

/// How a finished battle went.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Won,
    Lost,
    /// Turn limit reached with both sides alive
    TimedOut,
}

/// Full battle state: player, enemy, piles and the hidden shuffle RNG.
#[derive(Debug, Clone)]
pub struct Battle {
    player_hp: u32,
    player_max_hp: u32,
    block: u32,
    energy: u32,
    max_energy: u32,
    hand_size: u32,
    max_turns: u32,
    turn: u32,
    hand: Vec<Card>,
    draw_pile: Vec<Card>,
    discard_pile: Vec<Card>,
    enemy: Enemy,
    rng: ChaCha20Rng,
}

impl Battle {
    /// Start a battle: shuffle the deck with `seed` and draw the opening hand.
    pub fn new(config: DuelConfig, seed: u64) -> Self {
        let mut battle = Self {
            player_hp: config.player_hp,
            player_max_hp: config.player_hp,
            block: 0,
            energy: config.energy,
            max_energy: config.energy,
            hand_size: config.hand_size,
            max_turns: config.max_turns,
            turn: 1,
            hand: Vec::new(),
            draw_pile: config.deck,
            discard_pile: Vec::new(),
            enemy: Enemy::new(config.enemy_hp),
            rng: ChaCha20Rng::seed_from_u64(seed),
        };
        battle.draw_pile.shuffle(&mut battle.rng);
        battle.draw(battle.hand_size);
        battle
    }

    pub fn player_hp(&self) -> u32 {
        self.player_hp
    }

    pub fn player_max_hp(&self) -> u32 {
        self.player_max_hp
    }

    pub fn block(&self) -> u32 {
        self.block
    }

    pub fn energy(&self) -> u32 {
        self.energy
    }

    /// Current turn, starting at 1
    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    pub fn draw_pile(&self) -> &[Card] {
        &self.draw_pile
    }

    pub fn discard_pile(&self) -> &[Card] {
        &self.discard_pile
    }

    pub fn enemy(&self) -> &Enemy {
        &self.enemy
    }

    /// Result once the battle has ended.
    pub fn outcome(&self) -> Option<Outcome> {
        if self.enemy.is_dead() {
            Some(Outcome::Won)
        } else if self.player_hp == 0 {
            Some(Outcome::Lost)
        } else if self.turn > self.max_turns {
            Some(Outcome::TimedOut)
        } else {
            None
        }
    }

    /// Apply a committed command to this battle.
    pub fn apply(&mut self, command: &Command) -> Result<(), DuelError> {
        if self.outcome().is_some() {
            return Err(DuelError::BattleOver);
        }

        match *command {
            Command::PlayCard { hand_index, card } => {
                let actual = *self.hand.get(hand_index).ok_or(DuelError::InvalidHandIndex {
                    index: hand_index,
                    hand_size: self.hand.len(),
                })?;
                if actual != card {
                    return Err(DuelError::CardMismatch {
                        index: hand_index,
                        card,
                        actual,
                    });
                }
                if card.cost() > self.energy {
                    return Err(DuelError::NotEnoughEnergy {
                        card,
                        cost: card.cost(),
                        energy: self.energy,
                    });
                }
                self.play_at(hand_index);
            }
            Command::EndTurn => self.end_turn(),
        }
        Ok(())
    }

    fn play_at(&mut self, hand_index: usize) {
        let card = self.hand.remove(hand_index);
        self.energy -= card.cost();

        if card.damage() > 0 {
            self.enemy.take_damage(card.damage());
        }
        self.enemy.vulnerable += card.vulnerable();
        self.block += card.block();
        self.draw(card.draw());

        self.discard_pile.push(card);
    }

    fn end_turn(&mut self) {
        self.discard_pile.append(&mut self.hand);

        if !self.enemy.is_dead() {
            if let Some(damage) = self.enemy.act() {
                let blocked = damage.min(self.block);
                self.player_hp = self.player_hp.saturating_sub(damage - blocked);
            }
        }

        self.block = 0;
        self.turn += 1;

        if self.outcome().is_none() {
            self.energy = self.max_energy;
            self.draw(self.hand_size);
        }
    }

    /// Draw up to `count` cards, reshuffling the discard pile when the draw
    /// pile runs out.
    fn draw(&mut self, count: u32) {
        for _ in 0..count {
            if self.draw_pile.is_empty() {
                if self.discard_pile.is_empty() {
                    return;
                }
                self.draw_pile.append(&mut self.discard_pile);
                self.draw_pile.shuffle(&mut self.rng);
            }
            if let Some(card) = self.draw_pile.pop() {
                self.hand.push(card);
            }
        }
    }
}

impl SearchState for Battle {
    type Action = DuelAction;
    type Committed = Command;

    /// One action per distinct affordable card in hand, then `EndTurn`.
    fn get_actions(&self) -> Vec<DuelAction> {
        if self.outcome().is_some() {
            return Vec::new();
        }

        let mut actions = Vec::with_capacity(self.hand.len() + 1);
        for &card in &self.hand {
            let action = DuelAction::Play(card);
            if card.cost() <= self.energy && !actions.contains(&action) {
                actions.push(action);
            }
        }
        actions.push(DuelAction::EndTurn);
        actions
    }

    fn step(&mut self, action: &DuelAction) {
        match *action {
            DuelAction::Play(card) => {
                if let Some(index) = self.hand.iter().position(|&c| c == card) {
                    if card.cost() <= self.energy {
                        self.play_at(index);
                    }
                }
            }
            DuelAction::EndTurn => self.end_turn(),
        }
    }

    fn ended(&self) -> bool {
        self.outcome().is_some()
    }

    /// Fraction of the enemy's health removed.
    fn score(&self) -> f64 {
        let max = self.enemy.max_hp.max(1) as f64;
        (self.enemy.max_hp - self.enemy.hp) as f64 / max
    }

    /// Fraction of the player's health left.
    fn health(&self) -> f64 {
        self.player_hp as f64 / self.player_max_hp.max(1) as f64
    }

    /// Clone with a fresh shuffle RNG and a reshuffled draw pile: the player
    /// knows which cards remain, not their order.
    fn copy_undeterministic<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        let mut copy = self.clone();
        copy.rng = ChaCha20Rng::seed_from_u64(rng.gen());
        copy.draw_pile.shuffle(&mut copy.rng);
        copy
    }

    /// Resolve `action` against this hand. Callers pass an action from this
    /// state's `get_actions`, so a played card is always in hand; release
    /// builds fall back to ending the turn.
    fn to_committed(&self, action: &DuelAction) -> Command {
        match *action {
            DuelAction::Play(card) => {
                let hand_index = self.hand.iter().position(|&c| c == card);
                debug_assert!(hand_index.is_some(), "to_committed: {} is not in hand", card);
                match hand_index {
                    Some(hand_index) => Command::PlayCard { hand_index, card },
                    None => Command::EndTurn,
                }
            }
            DuelAction::EndTurn => Command::EndTurn,
        }
    }
}
