//! Orchestrator - weekly state machine and persistence boundary
//!
//! See `engine.rs` for the tick order and decision operations.

pub mod checkpoint;
pub mod engine;

pub use engine::{fixed_clock, Clock, DecisionOutcome, Engine, EngineError, TickResult};

pub use checkpoint::{compute_config_hash, load_state, save_state, CheckpointError, RunCheckpoint};
