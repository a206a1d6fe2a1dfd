//! Weekly market generation
//!
//! Produces the week-scoped offerings the player can act on between ticks:
//! auction lots, curator loan offers and the critic's trivia question.
//!
//! # Key Principles
//!
//! 1. **Determinism**: same `(seed, week)` → byte-identical output
//! 2. **Stream isolation**: each generator draws from its own derived stream,
//!    so lots never depend on how many loan trials ran
//! 3. **Week scoping**: every offering records the week it belongs to

pub mod loans;
pub mod lots;
pub mod packages;
pub mod quiz;

use crate::config::TierConfig;
use crate::models::TAG_CATALOGUE;
use crate::rng::Prng;

pub use loans::generate_loan_offers;
pub use lots::generate_lots;
pub use packages::{draw_package, PackageDraw};
pub use quiz::generate_quiz;

/// Draw 1–2 distinct tags from the catalogue
pub(crate) fn draw_tags(rng: &mut Prng) -> Vec<String> {
    let count = rng.uniform_int(1, 2) as usize;
    rng.pick(&TAG_CATALOGUE, count)
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Draw an insured value in the tier's range plus its tags
pub(crate) fn draw_piece(rng: &mut Prng, tier_config: &TierConfig) -> (i64, Vec<String>) {
    let iv = rng.uniform_int(tier_config.iv_min, tier_config.iv_max);
    let tags = draw_tags(rng);
    (iv, tags)
}
