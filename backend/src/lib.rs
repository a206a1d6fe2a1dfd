//! Collection Simulator Core - Rust Engine
//!
//! Deterministic, turn-based simulation of an art-collecting economy.
//!
//! # Architecture
//!
//! - **rng**: Seeded generator with per-week streams
//! - **models**: Domain types (Artwork, RunState, offerings, NPCs, events)
//! - **config**: Economy parameters and named presets
//! - **costs**: Carry and fee arithmetic
//! - **market**: Weekly lots, loan offers, quiz, packages
//! - **finance**: Mortgages
//! - **progression**: Achievement tiers and museum founding
//! - **orchestrator**: Weekly state machine, decisions, checkpoints
//! - **policy**: Pluggable auto-play policies
//! - **batch**: Many-run driver and statistics
//!
//! # Critical Invariants
//!
//! 1. All money values are i64 credits
//! 2. All randomness is derived from `(seed, week, stream)`
//! 3. Rejected decisions never change state
//! 4. Finished runs accept no further operations

pub mod batch;
pub mod config;
pub mod costs;
pub mod finance;
pub mod market;
pub mod models;
pub mod orchestrator;
pub mod policy;
pub mod progression;
pub mod rng;

// Re-exports for convenience
pub use batch::{run_batch, BatchConfig, BatchReport, RunSummary};
pub use config::{Config, ConfigError, MuseumMode};
pub use models::{
    AchievementTier, Artwork, AuctionLot, Event, LoanOffer, Npc, Outcome, QuizQuestion, RunState,
    Tier,
};
pub use orchestrator::{CheckpointError, DecisionOutcome, Engine, EngineError, TickResult};
pub use policy::{AcquisitionPolicy, CollectorPolicy, Decision, GreedyPolicy};
pub use progression::{MuseumCheck, MuseumShortfall};
pub use rng::Prng;

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn collection_sim_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<ffi::engine::PyGameEngine>()?;
    Ok(())
}
