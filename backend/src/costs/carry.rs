//! Weekly carry (holding cost)
//!
//! ```text
//! rate  = tier.premium_rate
//! rate *= idle_surcharge_multiplier      if idle_weeks >= idle_surcharge_weeks
//! rate *= 1 - loan_premium_reduction     if on loan
//! carry = round(iv * rate) + tier.storage_fee
//! ```
//!
//! The surcharge is applied to the base rate first and the loan discount on
//! top of it. Reordering changes rounding and is not allowed.

use crate::config::{Config, TierConfig};
use crate::models::{Artwork, Tier};

fn carry_with_loan_flag(artwork: &Artwork, tier: &TierConfig, config: &Config, on_loan: bool) -> i64 {
    let mut rate = tier.premium_rate;
    if artwork.idle_weeks >= config.idle_surcharge_weeks {
        rate *= config.idle_surcharge_multiplier;
    }
    if on_loan {
        rate *= 1.0 - config.loans.premium_reduction;
    }
    (artwork.iv as f64 * rate).round() as i64 + tier.storage_fee
}

/// Weekly carry of one artwork in its current state
///
/// # Example
/// ```
/// use collection_sim_core::{costs, Artwork, Config};
///
/// let config = Config::default();
/// let art = Artwork::new(1, "study".into(), 100_000, vec!["pop".into()], 0, 110_000);
/// // tier B: round(100_000 * 0.015) + 1_000
/// assert_eq!(costs::weekly_carry(&art, config.tier(art.tier), &config), 2_500);
/// ```
pub fn weekly_carry(artwork: &Artwork, tier: &TierConfig, config: &Config) -> i64 {
    carry_with_loan_flag(artwork, tier, config, artwork.on_loan)
}

/// Weekly carry with the loan discount forced off
///
/// Used for the museum endowment requirement, so lending everything out the
/// week before founding does not shrink the endowment.
pub fn normal_weekly_carry(artwork: &Artwork, tier: &TierConfig, config: &Config) -> i64 {
    carry_with_loan_flag(artwork, tier, config, false)
}

/// Total weekly carry of a collection
pub fn total_weekly_carry(artworks: &[Artwork], config: &Config) -> i64 {
    artworks
        .iter()
        .map(|a| weekly_carry(a, config.tier(a.tier), config))
        .sum()
}

/// Total normal (no-loan-discount) weekly carry of a collection
pub fn normal_total_weekly_carry(artworks: &[Artwork], config: &Config) -> i64 {
    artworks
        .iter()
        .map(|a| normal_weekly_carry(a, config.tier(a.tier), config))
        .sum()
}

/// Carry a piece of insured value `iv` would cost in its first week owned
pub fn acquisition_carry(iv: i64, config: &Config) -> i64 {
    let tier = config.tier(Tier::from_insured_value(iv));
    (iv as f64 * tier.premium_rate).round() as i64 + tier.storage_fee
}

/// Weeks of carry the cash covers (`f64::INFINITY` with nothing to carry)
pub fn runway_weeks(cash: i64, weekly_carry: i64) -> f64 {
    if weekly_carry <= 0 {
        f64::INFINITY
    } else {
        cash as f64 / weekly_carry as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artwork(iv: i64) -> Artwork {
        Artwork::new(1, "t".into(), iv, vec!["modern".into()], 0, iv)
    }

    #[test]
    fn test_surcharge_then_loan_discount() {
        let config = Config::default();
        let mut art = artwork(100_000);
        art.idle_weeks = config.idle_surcharge_weeks;
        art.on_loan = true;
        // 0.015 * 1.5 * 0.5 = 0.01125 → 1125 + 1000
        assert_eq!(weekly_carry(&art, config.tier(art.tier), &config), 2_125);
        assert_eq!(normal_weekly_carry(&art, config.tier(art.tier), &config), 3_250);
    }

    #[test]
    fn test_runway_with_no_carry_is_infinite() {
        assert!(runway_weeks(1_000, 0).is_infinite());
        assert_eq!(runway_weeks(1_000, 250), 4.0);
    }

    #[test]
    fn test_total_carry_sums_collection() {
        let config = Config::default();
        let arts = vec![artwork(100_000), artwork(10_000)];
        // 2500 + (100 + 100)
        assert_eq!(total_weekly_carry(&arts, &config), 2_700);
    }
}
