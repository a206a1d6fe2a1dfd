//! Week-scoped market offerings: auction lots, loan offers, trivia
//!
//! All three are regenerated at every tick and are only valid for the week
//! they were generated in. Indices are positions within the week's list.

use crate::models::artwork::Tier;
use crate::models::npc::{Critic, Curator};
use serde::{Deserialize, Serialize};

/// One artwork offered at this week's auction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuctionLot {
    /// Position within the week's lots
    pub index: usize,
    /// Week the lot was generated for
    pub week: u32,
    pub iv: i64,
    pub tier: Tier,
    pub tags: Vec<String>,
    /// Clearing price as a fraction of insured value
    pub clearing_pct: f64,
    /// Hammer price (rounded `iv * clearing_pct`)
    pub clearing_price: i64,
    /// Hammer price plus buyer premium, what the buyer pays
    pub total_cost: i64,
    /// Already bought this week
    #[serde(default)]
    pub purchased: bool,
}

/// A curator's request to borrow an owned artwork
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanOffer {
    /// Position within the week's offers
    pub index: usize,
    /// Week the offer was generated for
    pub week: u32,
    /// Artwork the curator wants to borrow
    pub artwork_id: u64,
    pub curator: Curator,
    /// Fee paid to the collector on acceptance
    pub fee: i64,
    pub duration_weeks: u32,
}

/// The critic's weekly trivia question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub week: u32,
    pub prompt: String,
    pub choices: Vec<String>,
    pub answer_index: usize,
    pub critic: Critic,
}
