//! Curator loan offer generation

use crate::config::Config;
use crate::models::{Artwork, LoanOffer};
use crate::rng::{Prng, Stream};

/// Generate this week's loan offers for the owned collection.
///
/// Only unencumbered artworks (neither on loan nor mortgaged) get a trial;
/// encumbered ones consume no draws.
pub fn generate_loan_offers(
    artworks: &[Artwork],
    config: &Config,
    seed: u32,
    week: u32,
) -> Vec<LoanOffer> {
    let mut rng = Prng::for_week(seed, week, Stream::Loans);
    let curators = &config.loans.curators;
    let weights: Vec<f64> = curators.iter().map(|c| c.weight).collect();
    let mut offers = Vec::new();

    for artwork in artworks.iter().filter(|a| a.is_unencumbered()) {
        let probability = config.tier(artwork.tier).loan_offer_probability;
        if !rng.chance(probability) {
            continue;
        }

        let Some(curator) = rng.weighted_choice(curators, &weights) else {
            continue;
        };
        let fee = (artwork.iv as f64 * curator.fee_rate).round() as i64;
        let duration_weeks =
            rng.uniform_int(config.loans.min_weeks as i64, config.loans.max_weeks as i64) as u32;

        offers.push(LoanOffer {
            index: offers.len(),
            week,
            artwork_id: artwork.id,
            curator: curator.curator(),
            fee,
            duration_weeks,
        });
    }

    offers
}
