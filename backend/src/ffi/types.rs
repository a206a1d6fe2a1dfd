//! JSON conversion helpers shared by the Python wrappers

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::PyErr;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::orchestrator::EngineError;

/// Parse a JSON argument, raising `ValueError` on malformed input
pub fn from_json<T: DeserializeOwned>(what: &str, json: &str) -> Result<T, PyErr> {
    serde_json::from_str(json).map_err(|e| PyValueError::new_err(format!("Invalid {}: {}", what, e)))
}

/// Serialize a return value, raising `RuntimeError` on failure
pub fn to_json<T: Serialize>(value: &T) -> Result<String, PyErr> {
    serde_json::to_string(value)
        .map_err(|e| PyRuntimeError::new_err(format!("Serialization failed: {}", e)))
}

/// Map a rejected decision to `ValueError`, keeping the engine's message
pub fn engine_err(err: EngineError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

/// Wall-clock seconds for run timestamps on the Python side
pub fn system_clock() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
