//! Events emitted by the weekly tick and by ascension
//!
//! Events are returned to the caller (they are not stored in `RunState`),
//! so the excluded UI layer can show messages such as "2 artworks were
//! sold to cover defaulted mortgages".

use crate::models::npc::Npc;
use serde::{Deserialize, Serialize};

/// Engine event capturing a state change
///
/// All events include the week for temporal ordering and are emitted in
/// the order they occur within a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// A curator returned a borrowed artwork
    LoanReturned { week: u32, artwork_id: u64 },

    /// Weekly holding costs were deducted
    CarryCharged { week: u32, amount: i64 },

    /// Weekly mortgage interest was deducted
    MortgageInterest {
        week: u32,
        artwork_id: u64,
        amount: i64,
    },

    /// Mortgage term expired and the principal was repaid from cash
    MortgageRepaid {
        week: u32,
        artwork_id: u64,
        principal: i64,
    },

    /// Mortgage term expired without cover; the artwork was sold
    ForcedSale {
        week: u32,
        artwork_id: u64,
        proceeds: i64,
        principal: i64,
        counterparty: Npc,
    },

    /// Collection now meets every museum threshold
    MuseumEligible { week: u32 },

    /// A museum was founded and the run was reset
    MuseumFounded {
        week: u32,
        museums_founded: u32,
        new_cash: i64,
    },

    /// A starting artwork was gifted after ascension
    ArtworkGifted { week: u32, artwork_id: u64 },

    /// Cash went negative
    Bankruptcy { week: u32, cash: i64 },

    /// Week cap reached
    Timeout { week: u32 },
}

impl Event {
    /// Week the event happened in
    pub fn week(&self) -> u32 {
        match self {
            Event::LoanReturned { week, .. }
            | Event::CarryCharged { week, .. }
            | Event::MortgageInterest { week, .. }
            | Event::MortgageRepaid { week, .. }
            | Event::ForcedSale { week, .. }
            | Event::MuseumEligible { week }
            | Event::MuseumFounded { week, .. }
            | Event::ArtworkGifted { week, .. }
            | Event::Bankruptcy { week, .. }
            | Event::Timeout { week } => *week,
        }
    }

    /// Event type name (snake_case, matches the serialized tag)
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::LoanReturned { .. } => "loan_returned",
            Event::CarryCharged { .. } => "carry_charged",
            Event::MortgageInterest { .. } => "mortgage_interest",
            Event::MortgageRepaid { .. } => "mortgage_repaid",
            Event::ForcedSale { .. } => "forced_sale",
            Event::MuseumEligible { .. } => "museum_eligible",
            Event::MuseumFounded { .. } => "museum_founded",
            Event::ArtworkGifted { .. } => "artwork_gifted",
            Event::Bankruptcy { .. } => "bankruptcy",
            Event::Timeout { .. } => "timeout",
        }
    }
}
