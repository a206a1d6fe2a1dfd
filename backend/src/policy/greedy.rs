//! Greedy Policy
//!
//! Regression baseline: at most one purchase per week, always the cheapest
//! D-tier lot whose post-purchase runway stays at or above the buffer.
//!
//! # Behavior
//!
//! ```text
//! post_cash  = cash - lot.total_cost
//! post_carry = total_weekly_carry(collection) + acquisition_carry(lot.iv)
//! buy if post_cash / post_carry >= safety_buffer_weeks
//! ```
//!
//! Never sells, lends, mortgages or founds a museum.

use super::{AcquisitionPolicy, Decision};
use crate::config::Config;
use crate::costs::{acquisition_carry, runway_weeks, total_weekly_carry};
use crate::models::{RunState, Tier};

#[derive(Debug, Clone)]
pub struct GreedyPolicy {
    /// Minimum runway (weeks) left after a purchase
    pub safety_buffer_weeks: f64,
}

impl GreedyPolicy {
    pub fn new(safety_buffer_weeks: f64) -> Self {
        Self {
            safety_buffer_weeks,
        }
    }
}

impl Default for GreedyPolicy {
    fn default() -> Self {
        Self::new(12.0)
    }
}

impl AcquisitionPolicy for GreedyPolicy {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn next_decision(&mut self, state: &RunState, config: &Config) -> Option<Decision> {
        if state.acquisitions_this_week > 0 {
            return None;
        }
        let carry = total_weekly_carry(&state.artworks, config);

        state
            .lots
            .iter()
            .filter(|lot| lot.tier == Tier::D && !lot.purchased && lot.total_cost <= state.cash)
            .filter(|lot| {
                let post_cash = state.cash - lot.total_cost;
                let post_carry = carry + acquisition_carry(lot.iv, config);
                runway_weeks(post_cash, post_carry) >= self.safety_buffer_weeks
            })
            .min_by_key(|lot| (lot.total_cost, lot.index))
            .map(|lot| Decision::BuyLot {
                lot_index: lot.index,
            })
    }
}
