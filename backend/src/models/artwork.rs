//! Artwork model
//!
//! An owned unit of the collection. Each artwork has:
//! - Insured value (i64 credits) and the tier derived from it
//! - Descriptive tags (drive diversity thresholds)
//! - Idle / loan / mortgage bookkeeping used by the weekly tick
//!
//! CRITICAL: An artwork is never on loan and mortgaged at the same time.
//! Decision operations enforce this; the tick never creates either state.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Catalogue of descriptive tags an artwork may carry
pub const TAG_CATALOGUE: [&str; 12] = [
    "portrait",
    "landscape",
    "abstract",
    "still_life",
    "sculpture",
    "photography",
    "impressionist",
    "modern",
    "baroque",
    "renaissance",
    "pop",
    "minimalist",
];

/// Ownership-burden bucket derived from insured value
///
/// Ordered cheapest first: `D < C < B < A`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    D,
    C,
    B,
    A,
}

impl Tier {
    /// All tiers, cheapest first
    pub const ALL: [Tier; 4] = [Tier::D, Tier::C, Tier::B, Tier::A];

    /// Derive the tier from an insured value using the fixed thresholds
    ///
    /// # Example
    /// ```
    /// use collection_sim_core::Tier;
    ///
    /// assert_eq!(Tier::from_insured_value(24_999), Tier::D);
    /// assert_eq!(Tier::from_insured_value(25_000), Tier::C);
    /// assert_eq!(Tier::from_insured_value(100_000), Tier::B);
    /// assert_eq!(Tier::from_insured_value(500_000), Tier::A);
    /// ```
    pub fn from_insured_value(iv: i64) -> Tier {
        if iv >= 500_000 {
            Tier::A
        } else if iv >= 100_000 {
            Tier::B
        } else if iv >= 25_000 {
            Tier::C
        } else {
            Tier::D
        }
    }

    /// Position in `Tier::ALL` (0 = D)
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Tier::D => "D",
            Tier::C => "C",
            Tier::B => "B",
            Tier::A => "A",
        };
        write!(f, "{}", label)
    }
}

/// An artwork owned by the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artwork {
    /// Run-local identifier (monotonic per run)
    pub id: u64,

    /// Display title
    pub title: String,

    /// Insured value (credits, positive)
    pub iv: i64,

    /// Tier derived from `iv` at construction
    pub tier: Tier,

    /// Descriptive tags (1–2 from `TAG_CATALOGUE`)
    pub tags: Vec<String>,

    /// Consecutive weeks not spent on loan
    pub idle_weeks: u32,

    /// Currently lent to a curator
    pub on_loan: bool,

    /// Weeks until the loan returns (0 when not on loan)
    pub loan_weeks_remaining: u32,

    /// Week the artwork entered the collection
    pub acquired_week: u32,

    /// Total cost paid to acquire it
    pub purchase_cost: i64,

    /// Pledged as mortgage collateral
    pub mortgaged: bool,

    /// Outstanding mortgage principal (0 when not mortgaged)
    pub mortgage_principal: i64,

    /// Weeks until the mortgage term expires (0 when not mortgaged)
    pub mortgage_weeks_remaining: u32,
}

impl Artwork {
    /// Create a freshly acquired artwork
    pub fn new(
        id: u64,
        title: String,
        iv: i64,
        tags: Vec<String>,
        acquired_week: u32,
        purchase_cost: i64,
    ) -> Self {
        Self {
            id,
            title,
            iv,
            tier: Tier::from_insured_value(iv),
            tags,
            idle_weeks: 0,
            on_loan: false,
            loan_weeks_remaining: 0,
            acquired_week,
            purchase_cost,
            mortgaged: false,
            mortgage_principal: 0,
            mortgage_weeks_remaining: 0,
        }
    }

    /// Free to be lent or pledged (neither on loan nor mortgaged)
    pub fn is_unencumbered(&self) -> bool {
        !self.on_loan && !self.mortgaged
    }

    /// Put the artwork on loan for `weeks`
    pub fn start_loan(&mut self, weeks: u32) {
        self.on_loan = true;
        self.loan_weeks_remaining = weeks;
    }

    /// Loan returned: clear the flag and restart the idle clock
    pub fn end_loan(&mut self) {
        self.on_loan = false;
        self.loan_weeks_remaining = 0;
        self.idle_weeks = 0;
    }

    /// Pledge the artwork for `principal` over `weeks`
    pub fn pledge(&mut self, principal: i64, weeks: u32) {
        self.mortgaged = true;
        self.mortgage_principal = principal;
        self.mortgage_weeks_remaining = weeks;
    }

    /// Clear all mortgage fields
    pub fn release_mortgage(&mut self) {
        self.mortgaged = false;
        self.mortgage_principal = 0;
        self.mortgage_weeks_remaining = 0;
    }
}

/// Build a display title from tags and id
pub(crate) fn make_title(tags: &[String], id: u64) -> String {
    let lead = tags.first().map(String::as_str).unwrap_or("untitled");
    format!("{} study no. {}", lead.replace('_', " "), id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_ordering() {
        assert!(Tier::D < Tier::C);
        assert!(Tier::C < Tier::B);
        assert!(Tier::B < Tier::A);
        assert_eq!(Tier::A.index(), 3);
    }

    #[test]
    fn test_loan_return_resets_idle() {
        let mut art = Artwork::new(1, "x".into(), 10_000, vec!["pop".into()], 0, 11_000);
        art.idle_weeks = 5;
        art.start_loan(4);
        assert!(!art.is_unencumbered());
        art.end_loan();
        assert!(art.is_unencumbered());
        assert_eq!(art.idle_weeks, 0);
    }

    #[test]
    fn test_title_uses_first_tag() {
        assert_eq!(make_title(&["still_life".into()], 7), "still life study no. 7");
        assert_eq!(make_title(&[], 2), "untitled study no. 2");
    }
}
