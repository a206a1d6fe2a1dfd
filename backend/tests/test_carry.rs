//! Carry Calculator Tests
//!
//! - Base formula: round(iv * premium) + storage
//! - Idle surcharge applies exactly from `idle_surcharge_weeks`
//! - Loan discount stacks on top of the surcharge
//! - Normal carry ignores the loan discount

use collection_sim_core::costs::{
    acquisition_carry, normal_total_weekly_carry, normal_weekly_carry, runway_weeks,
    total_weekly_carry, weekly_carry,
};
use collection_sim_core::{Artwork, Config, Tier};
use proptest::prelude::*;

fn artwork(iv: i64) -> Artwork {
    Artwork::new(1, "study".into(), iv, vec!["modern".into()], 0, iv)
}

#[test]
fn test_reference_carry_2500() {
    let config = Config::default();
    let art = artwork(100_000);
    assert_eq!(art.tier, Tier::B);
    assert_eq!(weekly_carry(&art, config.tier(art.tier), &config), 2_500);
}

#[test]
fn test_idle_surcharge_boundary() {
    let config = Config::default();
    let mut art = artwork(100_000);
    let tier = config.tier(art.tier);

    art.idle_weeks = config.idle_surcharge_weeks - 1;
    assert_eq!(weekly_carry(&art, tier, &config), 2_500);

    art.idle_weeks = config.idle_surcharge_weeks;
    // round(100_000 * 0.015 * 1.5) + 1_000
    assert_eq!(weekly_carry(&art, tier, &config), 3_250);

    art.idle_weeks = config.idle_surcharge_weeks + 1;
    assert_eq!(weekly_carry(&art, tier, &config), 3_250);
}

#[test]
fn test_loan_halves_premium_only() {
    let config = Config::default();
    let mut art = artwork(100_000);
    art.start_loan(6);
    // storage is not discounted
    assert_eq!(weekly_carry(&art, config.tier(art.tier), &config), 1_750);
    assert_eq!(normal_weekly_carry(&art, config.tier(art.tier), &config), 2_500);
}

#[test]
fn test_collection_totals() {
    let config = Config::default();
    let mut lent = artwork(100_000);
    lent.start_loan(4);
    let arts = vec![lent, artwork(600_000)];
    // 1_750 + (10_800 + 2_500)
    assert_eq!(total_weekly_carry(&arts, &config), 15_050);
    assert_eq!(normal_total_weekly_carry(&arts, &config), 15_800);
}

#[test]
fn test_acquisition_carry_matches_fresh_artwork() {
    let config = Config::default();
    for iv in [5_000, 24_999, 25_000, 100_000, 1_999_999] {
        let art = artwork(iv);
        assert_eq!(
            acquisition_carry(iv, &config),
            weekly_carry(&art, config.tier(art.tier), &config)
        );
    }
}

#[test]
fn test_runway() {
    assert_eq!(runway_weeks(10_000, 2_500), 4.0);
    assert!(runway_weeks(10_000, 0).is_infinite());
    assert!(runway_weeks(-1, 100) < 0.0);
}

proptest! {
    #[test]
    fn prop_carry_formula_order(iv in 5_000i64..2_000_000, idle in 0u32..20, on_loan in any::<bool>()) {
        let config = Config::default();
        let mut art = artwork(iv);
        art.idle_weeks = idle;
        if on_loan {
            art.start_loan(4);
        }
        let tier = config.tier(art.tier);

        let mut rate = tier.premium_rate;
        if idle >= config.idle_surcharge_weeks {
            rate *= config.idle_surcharge_multiplier;
        }
        if on_loan {
            rate *= 1.0 - config.loans.premium_reduction;
        }
        let expected = (iv as f64 * rate).round() as i64 + tier.storage_fee;
        prop_assert_eq!(weekly_carry(&art, tier, &config), expected);
        prop_assert!(normal_weekly_carry(&art, tier, &config) >= weekly_carry(&art, tier, &config));
    }
}
