//! Checkpoint - Save/Load Run State
//!
//! The excluded persistence layer stores a run between calls as JSON. A
//! checkpoint wraps the plain `RunState` with the hash of the config it was
//! produced under, so a run is never resumed under different economics.
//!
//! # Critical Invariants
//!
//! - **Determinism**: a reloaded state ticks exactly like the original
//! - **Exclusivity**: no artwork on loan and mortgaged at once
//! - **Week scoping**: stored offerings belong to the stored week
//! - **Config Matching**: state can only be loaded with matching config

use crate::config::Config;
use crate::models::RunState;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use thiserror::Error;

/// Format version written into every checkpoint
pub const CHECKPOINT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CheckpointError {
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Config mismatch: checkpoint {expected}, current {actual}")]
    ConfigMismatch { expected: String, actual: String },

    #[error("Unsupported checkpoint version {0}")]
    UnsupportedVersion(u32),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

// ============================================================================
// Snapshot Structure
// ============================================================================

/// Serialized form of one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunCheckpoint {
    pub version: u32,

    /// SHA256 of the canonical config JSON
    pub config_hash: String,

    pub state: RunState,
}

// ============================================================================
// Config Hashing
// ============================================================================

/// Deterministic SHA256 hash of a config
///
/// Serializes through `serde_json::Value` with every object's keys sorted, so
/// the hash does not depend on field or map ordering.
pub fn compute_config_hash<T: Serialize>(config: &T) -> Result<String, CheckpointError> {
    use serde_json::Value;
    use std::collections::BTreeMap;

    let value = serde_json::to_value(config)
        .map_err(|e| CheckpointError::Serialization(format!("config: {}", e)))?;

    fn canonicalize(value: Value) -> Value {
        match value {
            Value::Object(map) => {
                let sorted: BTreeMap<String, Value> =
                    map.into_iter().map(|(k, v)| (k, canonicalize(v))).collect();
                Value::Object(sorted.into_iter().collect())
            }
            Value::Array(arr) => Value::Array(arr.into_iter().map(canonicalize).collect()),
            other => other,
        }
    }

    let json = serde_json::to_string(&canonicalize(value))
        .map_err(|e| CheckpointError::Serialization(format!("config: {}", e)))?;

    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    Ok(format!("{:x}", hasher.finalize()))
}

// ============================================================================
// Save / Load
// ============================================================================

/// Serialize a run to a checkpoint JSON string
pub fn save_state(state: &RunState, config: &Config) -> Result<String, CheckpointError> {
    validate_state(state)?;
    let checkpoint = RunCheckpoint {
        version: CHECKPOINT_VERSION,
        config_hash: compute_config_hash(config)?,
        state: state.clone(),
    };
    serde_json::to_string(&checkpoint).map_err(|e| CheckpointError::Serialization(e.to_string()))
}

/// Restore a run from checkpoint JSON, rejecting foreign configs and
/// corrupted states
pub fn load_state(json: &str, config: &Config) -> Result<RunState, CheckpointError> {
    let checkpoint: RunCheckpoint =
        serde_json::from_str(json).map_err(|e| CheckpointError::Serialization(e.to_string()))?;

    if checkpoint.version != CHECKPOINT_VERSION {
        return Err(CheckpointError::UnsupportedVersion(checkpoint.version));
    }

    let actual = compute_config_hash(config)?;
    if checkpoint.config_hash != actual {
        return Err(CheckpointError::ConfigMismatch {
            expected: checkpoint.config_hash,
            actual,
        });
    }

    validate_state(&checkpoint.state)?;
    tracing::debug!(run_id = %checkpoint.state.id, week = checkpoint.state.week, "run restored");
    Ok(checkpoint.state)
}

// ============================================================================
// Validation
// ============================================================================

/// Check the structural invariants of a run state
pub fn validate_state(state: &RunState) -> Result<(), CheckpointError> {
    let mut ids = HashSet::new();
    for art in &state.artworks {
        if art.on_loan && art.mortgaged {
            return Err(CheckpointError::InvalidState(format!(
                "artwork {} is both on loan and mortgaged",
                art.id
            )));
        }
        if art.id >= state.next_artwork_id {
            return Err(CheckpointError::InvalidState(format!(
                "artwork id {} not below next id {}",
                art.id, state.next_artwork_id
            )));
        }
        if !ids.insert(art.id) {
            return Err(CheckpointError::InvalidState(format!(
                "duplicate artwork id {}",
                art.id
            )));
        }
        if art.on_loan && art.loan_weeks_remaining == 0 {
            return Err(CheckpointError::InvalidState(format!(
                "artwork {} on loan with no weeks remaining",
                art.id
            )));
        }
    }

    let stale_lot = state.lots.iter().any(|l| l.week != state.week);
    let stale_offer = state.loan_offers.iter().any(|o| o.week != state.week);
    let stale_quiz = state.quiz.as_ref().is_some_and(|q| q.week != state.week);
    if stale_lot || stale_offer || stale_quiz {
        return Err(CheckpointError::InvalidState(format!(
            "offerings do not belong to week {}",
            state.week
        )));
    }

    if state.week > state.max_weeks {
        return Err(CheckpointError::InvalidState(format!(
            "week {} beyond cap {}",
            state.week, state.max_weeks
        )));
    }

    Ok(())
}
