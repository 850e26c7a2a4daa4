//! Battle runner: plays battles to completion with a policy.

use anyhow::{Context, Result};
use engine_core::SearchState;
use games_duel::{Battle, DuelConfig, Outcome};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::policy::Policy;
use crate::stats::RunStats;

/// Commands allowed per turn before a battle is abandoned.
const MAX_STEPS_PER_TURN: u32 = 64;

/// Result of one battle.
#[derive(Debug, Clone, PartialEq)]
pub struct BattleReport {
    /// `None` when the step cap cut the battle short
    pub outcome: Option<Outcome>,
    pub hp_left: u32,
    pub turns: u32,
    pub steps: u32,
}

pub struct Runner {
    config: Config,
    seed: u64,
}

impl Runner {
    pub fn new(config: Config, seed: u64) -> Self {
        Self { config, seed }
    }

    /// Play every configured battle and return the totals.
    pub fn run(&self, policy: &mut dyn Policy) -> Result<RunStats> {
        let battles = self.config.battles;
        let duel_config = self.config.duel_config();
        let step_cap = self.config.max_turns.saturating_mul(MAX_STEPS_PER_TURN);
        let mut stats = RunStats::new();

        info!(
            bot = policy.name(),
            battles,
            seed = self.seed,
            "Runner starting"
        );

        // Progress bar only when stderr is a TTY
        let progress = if std::io::IsTerminal::is_terminal(&std::io::stderr()) {
            let pb = ProgressBar::new(battles as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} battles ({eta})")
                    .context("invalid progress bar template")?
                    .progress_chars("#>-"),
            );
            Some(pb)
        } else {
            None
        };

        for index in 0..battles {
            let battle_seed = self.seed.wrapping_add(index as u64);
            let report = play_battle(policy, duel_config.clone(), battle_seed, step_cap, &mut stats)
                .with_context(|| format!("battle {} (seed {}) failed", index + 1, battle_seed))?;

            stats.record_battle(report.outcome, report.hp_left, report.turns);
            debug!(
                battle = index + 1,
                outcome = ?report.outcome,
                hp_left = report.hp_left,
                turns = report.turns,
                steps = report.steps,
                "Battle completed"
            );

            if let Some(ref pb) = progress {
                pb.inc(1);
            }

            let completed = index + 1;
            if self.config.log_interval > 0 && completed % self.config.log_interval == 0 {
                // Suspend progress bar while logging to avoid visual glitches
                match progress {
                    Some(ref pb) => pb.suspend(|| stats.log_progress()),
                    None => stats.log_progress(),
                }
            }
        }

        if let Some(pb) = progress {
            pb.finish_and_clear();
        }

        Ok(stats)
    }
}

/// Play one battle from `seed` until it ends or `step_cap` commands were sent.
pub fn play_battle(
    policy: &mut dyn Policy,
    duel_config: DuelConfig,
    seed: u64,
    step_cap: u32,
    stats: &mut RunStats,
) -> Result<BattleReport> {
    let mut battle = Battle::new(duel_config, seed);
    let mut steps = 0;

    while !battle.ended() {
        if steps >= step_cap {
            warn!(seed, steps, turn = battle.turn(), "Step cap reached, abandoning battle");
            break;
        }

        let choice = policy.choose(&battle)?;
        battle
            .apply(&choice.command)
            .with_context(|| format!("{} bot chose {:?}", policy.name(), choice.command))?;
        stats.record_decision(choice.search.as_ref());
        steps += 1;
    }

    // Turns actually played; the counter moves past the last one on end turn
    let turns = if battle.ended() && battle.outcome() != Some(Outcome::Won) {
        battle.turn() - 1
    } else {
        battle.turn()
    };

    Ok(BattleReport {
        outcome: battle.outcome(),
        hp_left: battle.player_hp(),
        turns,
        steps,
    })
}
