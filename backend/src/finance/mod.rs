//! Mortgages: pledging artworks for cash, weekly interest, term expiry

pub mod mortgage;

pub use mortgage::{process_mortgages, repay_mortgage, take_mortgage, MortgageReport};
