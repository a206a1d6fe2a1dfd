//! Decision Policy Module
//!
//! Auto-play and interactive play share one engine. A policy only chooses
//! what to do; the engine validates and applies it, so the rules never fork.
//!
//! # Policy Interface
//!
//! A policy is asked for one decision at a time until it returns `None`.
//! The driver applies each decision before asking again, so every call sees
//! the effect of the previous one (indices stay valid).
//!
//! ```rust
//! use collection_sim_core::policy::{AcquisitionPolicy, Decision};
//! use collection_sim_core::{Config, RunState};
//!
//! struct BuyFirstLot;
//!
//! impl AcquisitionPolicy for BuyFirstLot {
//!     fn name(&self) -> &'static str {
//!         "buy_first_lot"
//!     }
//!
//!     fn next_decision(&mut self, state: &RunState, _config: &Config) -> Option<Decision> {
//!         if state.acquisitions_this_week > 0 {
//!             return None;
//!         }
//!         state
//!             .lots
//!             .iter()
//!             .find(|lot| !lot.purchased && lot.total_cost <= state.cash)
//!             .map(|lot| Decision::BuyLot { lot_index: lot.index })
//!     }
//! }
//! ```
//!
//! Available policies:
//! 1. **Greedy**: cheapest D-tier lot while the runway stays above a buffer
//! 2. **Collector**: works toward the museum thresholds (batch default)

use crate::config::Config;
use crate::models::RunState;
use serde::{Deserialize, Serialize};

pub mod collector;
pub mod greedy;

pub use collector::CollectorPolicy;
pub use greedy::GreedyPolicy;

/// One player action, mirroring the engine's decision operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Decision {
    BuyLot { lot_index: usize },
    BuyPackage { package_index: usize },
    AcceptLoan { loan_index: usize },
    /// Consign to auction
    SellArtwork { artwork_index: usize },
    SellToDealer { artwork_index: usize },
    TakeMortgage { artwork_index: usize },
    RepayMortgage { artwork_index: usize },
    AnswerQuiz { choice: usize },
    FoundMuseum,
    TopUp { amount: i64 },
}

/// Chooses the player's actions between ticks
pub trait AcquisitionPolicy: Send {
    /// Policy name for reports
    fn name(&self) -> &'static str;

    /// Next action for the current week, or `None` when done for the week
    fn next_decision(&mut self, state: &RunState, config: &Config) -> Option<Decision>;
}
