//! Python bindings (feature `pyo3`)
//!
//! The excluded web layer talks to the engine through JSON strings: it
//! stores `RunState` verbatim between calls, so every method takes the
//! current state and returns the next one.

pub mod engine;
pub mod types;
