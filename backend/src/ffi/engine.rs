//! PyO3 wrapper for the week engine
//!
//! # Example (from Python)
//!
//! ```python
//! from collection_sim_core import GameEngine
//!
//! engine = GameEngine(None)
//! state = engine.create_run(42)
//! state, tick = engine.advance_week(state)
//! state, outcome = engine.apply(state, '{"action": "buy_lot", "lot_index": 0}')
//! ```

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use super::types::{engine_err, from_json, system_clock, to_json};
use crate::batch::{run_batch, BatchConfig};
use crate::config::Config;
use crate::models::RunState;
use crate::orchestrator::{load_state, save_state, Engine};
use crate::policy::Decision;

#[pyclass(name = "GameEngine")]
pub struct PyGameEngine {
    inner: Engine,
}

#[pymethods]
impl PyGameEngine {
    /// Create an engine from a JSON config (`None` for the default economy)
    #[new]
    #[pyo3(signature = (config_json=None))]
    fn new(config_json: Option<&str>) -> PyResult<Self> {
        let config = match config_json {
            Some(json) => Config::from_json_str(json).map_err(|e| PyValueError::new_err(e.to_string()))?,
            None => Config::default(),
        };
        let inner = Engine::new(config)
            .map_err(|e| PyValueError::new_err(e.to_string()))?
            .with_clock(system_clock);
        Ok(Self { inner })
    }

    /// New run state as JSON
    fn create_run(&self, seed: u32) -> PyResult<String> {
        to_json(&self.inner.create_run(seed))
    }

    /// Tick one week; returns `(state_json, tick_result_json)`
    fn advance_week(&self, state_json: &str) -> PyResult<(String, String)> {
        let mut state: RunState = from_json("state", state_json)?;
        let result = self.inner.advance_week(&mut state).map_err(engine_err)?;
        Ok((to_json(&state)?, to_json(&result)?))
    }

    /// Apply one decision; returns `(state_json, outcome_json)`
    ///
    /// Raises `ValueError` when the engine rejects the decision. The input
    /// state is never modified in that case.
    fn apply(&self, state_json: &str, decision_json: &str) -> PyResult<(String, String)> {
        let mut state: RunState = from_json("state", state_json)?;
        let decision: Decision = from_json("decision", decision_json)?;
        let outcome = self.inner.apply(&mut state, &decision).map_err(engine_err)?;
        Ok((to_json(&state)?, to_json(&outcome)?))
    }

    /// Museum eligibility with unmet thresholds
    fn museum_report(&self, state_json: &str) -> PyResult<String> {
        let state: RunState = from_json("state", state_json)?;
        to_json(&self.inner.museum_report(&state))
    }

    /// Wrap a state in a config-hashed checkpoint
    fn save_checkpoint(&self, state_json: &str) -> PyResult<String> {
        let state: RunState = from_json("state", state_json)?;
        save_state(&state, self.inner.config()).map_err(|e| PyValueError::new_err(e.to_string()))
    }

    /// Restore a state from a checkpoint made under the same config
    fn load_checkpoint(&self, checkpoint_json: &str) -> PyResult<String> {
        let state =
            load_state(checkpoint_json, self.inner.config()).map_err(|e| PyValueError::new_err(e.to_string()))?;
        to_json(&state)
    }

    /// Run a batch (JSON `BatchConfig`, missing fields default); returns the report
    #[staticmethod]
    fn run_batch(py: Python<'_>, batch_json: &str) -> PyResult<String> {
        let batch: BatchConfig = from_json("batch config", batch_json)?;
        let report = py
            .allow_threads(|| run_batch(&batch))
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        to_json(&report)
    }
}
