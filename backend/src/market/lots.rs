//! Auction lot generation

use super::draw_piece;
use crate::config::Config;
use crate::costs::lot_total_cost;
use crate::models::AuctionLot;
use crate::rng::{Prng, Stream};

/// Generate the auction inventory for `week` of the run seeded with `seed`.
///
/// Tiers are generated cheapest first, `lots_per_week` each.
pub fn generate_lots(config: &Config, seed: u32, week: u32) -> Vec<AuctionLot> {
    let mut rng = Prng::for_week(seed, week, Stream::Lots);
    generate_lots_with(config, week, &mut rng)
}

/// Generate lots drawing from an existing generator
pub fn generate_lots_with(config: &Config, week: u32, rng: &mut Prng) -> Vec<AuctionLot> {
    let market = &config.market;
    let mut lots = Vec::new();

    for (tier, tier_config) in config.tiers.iter() {
        for _ in 0..tier_config.lots_per_week {
            let (iv, tags) = draw_piece(rng, tier_config);
            let clearing_pct = rng.normal_clamped(market.mean, market.std, market.min, market.max);

            lots.push(AuctionLot {
                index: lots.len(),
                week,
                iv,
                tier,
                tags,
                clearing_pct,
                clearing_price: (iv as f64 * clearing_pct).round() as i64,
                total_cost: lot_total_cost(iv, clearing_pct, &config.fees),
                purchased: false,
            });
        }
    }

    lots
}
