//! Holding costs and transaction fees
//!
//! - `carry`: weekly holding cost of owned artworks
//! - `fees`: buyer premium, seller fee, dealer and mortgage arithmetic
//!
//! All money values are i64 credits; fractional intermediate results are
//! rounded half away from zero (`f64::round`) exactly once per formula.

pub mod carry;
pub mod fees;

// Re-exports
pub use carry::{
    acquisition_carry, normal_total_weekly_carry, normal_weekly_carry, runway_weeks,
    total_weekly_carry, weekly_carry,
};
pub use fees::{
    consignment_proceeds, dealer_proceeds, lot_total_cost, mortgage_principal, weekly_interest,
};
