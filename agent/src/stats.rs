//! Run statistics: battle outcomes and aggregated search counters.

use games_duel::Outcome;
use mcts::SearchStats;
use tracing::info;

/// Totals over every battle of a run.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RunStats {
    pub battles: u32,
    pub wins: u32,
    pub losses: u32,
    /// Battles that hit the turn limit or the step cap
    pub timeouts: u32,
    /// Sum of player hp left at the end of each battle
    pub total_hp_left: u64,
    /// Sum of turns played in each battle
    pub total_turns: u64,
    /// Commands sent to the battles
    pub decisions: u64,
    /// Decisions that actually ran a search (not the single-action path)
    pub searches: u64,
    pub iterations: u64,
    pub rollouts: u64,
    /// Wall-clock search time (microseconds)
    pub search_time_us: u64,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one decision and the search that produced it, if any.
    pub fn record_decision(&mut self, search: Option<&SearchStats>) {
        self.decisions += 1;
        if let Some(stats) = search {
            if stats.iterations > 0 {
                self.searches += 1;
            }
            self.iterations += stats.iterations as u64;
            self.rollouts += stats.rollouts as u64;
            self.search_time_us += stats.total_time_us;
        }
    }

    /// Record a finished battle. `None` means it was cut off before ending.
    pub fn record_battle(&mut self, outcome: Option<Outcome>, hp_left: u32, turns: u32) {
        self.battles += 1;
        match outcome {
            Some(Outcome::Won) => self.wins += 1,
            Some(Outcome::Lost) => self.losses += 1,
            Some(Outcome::TimedOut) | None => self.timeouts += 1,
        }
        self.total_hp_left += hp_left as u64;
        self.total_turns += turns as u64;
    }

    pub fn win_rate(&self) -> f64 {
        ratio(self.wins as f64, self.battles as u64)
    }

    pub fn mean_hp_left(&self) -> f64 {
        ratio(self.total_hp_left as f64, self.battles as u64)
    }

    pub fn mean_turns(&self) -> f64 {
        ratio(self.total_turns as f64, self.battles as u64)
    }

    /// Mean search time per searched decision (microseconds)
    pub fn mean_search_us(&self) -> f64 {
        ratio(self.search_time_us as f64, self.searches)
    }

    /// Log a progress line after `battles` battles.
    pub fn log_progress(&self) {
        info!(
            battles = self.battles,
            wins = self.wins,
            losses = self.losses,
            timeouts = self.timeouts,
            win_rate = format!("{:.1}%", self.win_rate() * 100.0),
            "Progress"
        );
    }

    /// Log the final summary of the run.
    pub fn log_summary(&self) {
        info!(
            battles = self.battles,
            wins = self.wins,
            losses = self.losses,
            timeouts = self.timeouts,
            win_rate = format!("{:.1}%", self.win_rate() * 100.0),
            mean_hp_left = format!("{:.1}", self.mean_hp_left()),
            mean_turns = format!("{:.1}", self.mean_turns()),
            decisions = self.decisions,
            searches = self.searches,
            rollouts = self.rollouts,
            mean_search_ms = format!("{:.2}", self.mean_search_us() / 1000.0),
            "Run complete"
        );
    }
}

fn ratio(total: f64, count: u64) -> f64 {
    if count == 0 {
        0.0
    } else {
        total / count as f64
    }
}
