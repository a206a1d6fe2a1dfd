//! Fee and financing arithmetic

use crate::config::{FeeSchedule, MortgageConfig};

/// What a buyer pays for a lot: hammer price plus buyer premium
pub fn lot_total_cost(iv: i64, clearing_pct: f64, fees: &FeeSchedule) -> i64 {
    let clearing_price = iv as f64 * clearing_pct;
    (clearing_price * (1.0 + fees.buyer_premium)).round() as i64
}

/// Direct dealer buy-back (also used for forced liquidation)
pub fn dealer_proceeds(iv: i64, fees: &FeeSchedule) -> i64 {
    (iv as f64 * fees.dealer_buy_rate).round() as i64
}

/// Net proceeds of an auction consignment
///
/// The hammer price never drops below the dealer backstop; the seller fee
/// is taken from whichever is higher.
pub fn consignment_proceeds(iv: i64, clearing_pct: f64, fees: &FeeSchedule) -> i64 {
    let hammer = iv as f64 * clearing_pct.max(fees.backstop_rate);
    (hammer * (1.0 - fees.seller_fee)).round() as i64
}

/// Principal advanced against an artwork
pub fn mortgage_principal(iv: i64, mortgage: &MortgageConfig) -> i64 {
    (iv as f64 * mortgage.ltv_rate).round() as i64
}

/// Interest due for one week
pub fn weekly_interest(principal: i64, mortgage: &MortgageConfig) -> i64 {
    (principal as f64 * mortgage.weekly_interest_rate).round() as i64
}
