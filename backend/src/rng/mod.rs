//! Deterministic random number generation
//!
//! Uses the mulberry32 algorithm seeded with a 32-bit integer.
//! CRITICAL: All randomness in the engine MUST go through this module.

mod mulberry;

pub use mulberry::{derive_seed, Prng, Stream};
