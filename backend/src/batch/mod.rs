//! Batch Driver
//!
//! Plays many independent runs with the collector policy and aggregates
//! them into a [`BatchReport`]. Runs share only the read-only engine; each
//! owns its state and a seed derived from the base seed, so they fan out
//! across threads without locking.
//!
//! # Museum semantics
//!
//! Batch runs always use [`MuseumMode::EndRun`]: the first founding is the
//! terminal event the statistics are built on.

pub mod parallel;
pub mod stats;

pub use stats::{percentile, AchievementShare, BatchReport, Percentiles};

use crate::config::presets::{config_from_presets, MarketPreset, TopUpPreset, TuningPreset};
use crate::config::{Config, ConfigError, MuseumMode};
use crate::models::{AchievementTier, Outcome, RunState};
use crate::orchestrator::Engine;
use crate::policy::{AcquisitionPolicy, CollectorPolicy};
use serde::{Deserialize, Serialize};

/// Multiplier spacing run seeds apart
pub const SEED_STRIDE: u32 = 1_000_003;

/// Decisions a policy may make in one week before the driver moves on
pub const MAX_DECISIONS_PER_WEEK: usize = 16;

/// Week at which net worth is sampled for the report
pub const NET_WORTH_WEEK: u32 = 52;

/// Batch parameters (the CLI surface)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    pub runs: usize,
    pub max_weeks: u32,
    pub base_seed: u32,
    /// Market preset name (unknown names fall back to `balanced`)
    pub market: String,
    /// Top-up preset name (unknown names fall back to `none`)
    pub top_up: String,
    /// Tuning preset name (unknown names fall back to `standard`)
    pub tuning: String,
    pub loans_enabled: bool,
    pub flipping_enabled: bool,
    /// Force single-threaded execution
    pub sequential: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            runs: 200,
            max_weeks: 104,
            base_seed: 42,
            market: "balanced".to_string(),
            top_up: "none".to_string(),
            tuning: "standard".to_string(),
            loans_enabled: true,
            flipping_enabled: false,
            sequential: false,
        }
    }
}

impl BatchConfig {
    /// Engine configuration for this batch
    pub fn engine_config(&self) -> Config {
        let mut config = config_from_presets(&self.market, &self.tuning);
        config.max_weeks = self.max_weeks;
        config.museum_mode = MuseumMode::EndRun;
        config
    }

    pub fn weekly_top_up(&self) -> i64 {
        TopUpPreset::from_name(&self.top_up).weekly_amount()
    }

    pub fn policy(&self) -> CollectorPolicy {
        CollectorPolicy::new(self.loans_enabled, self.flipping_enabled)
    }

    /// Report heading, with fallbacks resolved
    pub fn label(&self) -> String {
        format!(
            "{} market / {} top-up / {} tuning",
            MarketPreset::from_name(&self.market).name(),
            TopUpPreset::from_name(&self.top_up).name(),
            TuningPreset::from_name(&self.tuning).name(),
        )
    }
}

/// Seed of run `index`: `base + index * SEED_STRIDE`, wrapping
pub fn run_seed(base_seed: u32, index: usize) -> u32 {
    base_seed.wrapping_add((index as u32).wrapping_mul(SEED_STRIDE))
}

/// Outcome of one finished run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub index: usize,
    pub seed: u32,
    pub outcome: Outcome,
    pub end_week: u32,
    pub first_museum_week: Option<u32>,
    pub final_cash: i64,
    /// Net worth at week 52, or at the end for shorter runs
    pub net_worth_week_52: i64,
    pub peak_achievement: Option<AchievementTier>,
    pub final_achievement: Option<AchievementTier>,
    pub museums_founded: u32,
    pub total_carry_paid: i64,
    pub decisions_applied: usize,
    pub decisions_rejected: usize,
}

/// Counters from driving one run
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Playthrough {
    pub net_worth_week_52: Option<i64>,
    pub decisions_applied: usize,
    pub decisions_rejected: usize,
}

/// Let the policy act until it passes, is rejected, or hits the weekly limit
///
/// Returns `(applied, rejected)`.
pub fn play_week<P: AcquisitionPolicy + ?Sized>(
    engine: &Engine,
    state: &mut RunState,
    policy: &mut P,
) -> (usize, usize) {
    let mut applied = 0;
    for _ in 0..MAX_DECISIONS_PER_WEEK {
        if state.is_finished() {
            break;
        }
        let Some(decision) = policy.next_decision(state, engine.config()) else {
            break;
        };
        match engine.apply(state, &decision) {
            Ok(_) => applied += 1,
            Err(err) => {
                tracing::debug!(week = state.week, ?decision, error = %err, "decision rejected");
                return (applied, 1);
            }
        }
    }
    (applied, 0)
}

/// Drive a run to its terminal outcome
pub fn simulate<P: AcquisitionPolicy + ?Sized>(
    engine: &Engine,
    state: &mut RunState,
    policy: &mut P,
    weekly_top_up: i64,
) -> Playthrough {
    let mut playthrough = Playthrough::default();

    while !state.is_finished() {
        if weekly_top_up > 0 && state.week > 0 && engine.top_up(state, weekly_top_up).is_err() {
            break;
        }

        let (applied, rejected) = play_week(engine, state, policy);
        playthrough.decisions_applied += applied;
        playthrough.decisions_rejected += rejected;
        if state.is_finished() {
            break;
        }

        if engine.advance_week(state).is_err() {
            break;
        }
        if state.week == NET_WORTH_WEEK && playthrough.net_worth_week_52.is_none() {
            playthrough.net_worth_week_52 = Some(state.net_worth());
        }
    }

    playthrough
}

/// Play run `index` of a batch
pub fn run_single(engine: &Engine, batch: &BatchConfig, index: usize) -> RunSummary {
    let seed = run_seed(batch.base_seed, index);
    let mut state = engine.create_run(seed);
    let mut policy = batch.policy();
    let playthrough = simulate(engine, &mut state, &mut policy, batch.weekly_top_up());

    RunSummary {
        index,
        seed,
        // `simulate` only returns once an outcome is set
        outcome: state.outcome.unwrap_or(Outcome::Timeout),
        end_week: state.week,
        first_museum_week: state.first_museum_week,
        final_cash: state.cash,
        net_worth_week_52: playthrough
            .net_worth_week_52
            .unwrap_or_else(|| state.net_worth()),
        peak_achievement: state.peak_achievement,
        final_achievement: state.achievement,
        museums_founded: state.museums_founded,
        total_carry_paid: state.total_carry_paid,
        decisions_applied: playthrough.decisions_applied,
        decisions_rejected: playthrough.decisions_rejected,
    }
}

/// Play every run of a batch and aggregate
pub fn run_batch(batch: &BatchConfig) -> Result<BatchReport, ConfigError> {
    let engine = Engine::new(batch.engine_config())?;
    let indices: Vec<usize> = (0..batch.runs).collect();

    tracing::info!(runs = batch.runs, label = %batch.label(), "batch started");
    let summaries = parallel::map_slice(
        &indices,
        |&index| run_single(&engine, batch, index),
        batch.sequential,
    );

    let report = BatchReport::from_summaries(batch.label(), &summaries);
    tracing::info!(
        museum_rate = report.museum_rate,
        bankruptcy_rate = report.bankruptcy_rate,
        "batch finished"
    );
    Ok(report)
}

/// Run the same batch under every market preset
pub fn compare_presets(batch: &BatchConfig) -> Result<Vec<BatchReport>, ConfigError> {
    MarketPreset::ALL
        .iter()
        .map(|preset| {
            let variant = BatchConfig {
                market: preset.name().to_string(),
                ..batch.clone()
            };
            run_batch(&variant)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_seed_wraps() {
        assert_eq!(run_seed(42, 0), 42);
        assert_eq!(run_seed(42, 1), 42 + 1_000_003);
        assert_eq!(run_seed(u32::MAX, 1), 1_000_002);
    }

    #[test]
    fn test_batch_forces_end_run() {
        let config = BatchConfig::default().engine_config();
        assert_eq!(config.museum_mode, MuseumMode::EndRun);
        assert_eq!(config.max_weeks, 104);
    }

    #[test]
    fn test_unknown_presets_fall_back() {
        let batch = BatchConfig {
            market: "bogus".into(),
            top_up: "lots".into(),
            ..BatchConfig::default()
        };
        assert_eq!(batch.label(), "balanced market / none top-up / standard tuning");
        assert_eq!(batch.weekly_top_up(), 0);
    }
}
