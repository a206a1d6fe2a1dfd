//! Run State
//!
//! The complete state of one playthrough. Plain data: the persistence layer
//! stores and reloads it verbatim as JSON between calls.
//!
//! # Critical Invariants
//!
//! 1. **Terminality**: once `outcome` is set it never changes and the run
//!    accepts no further ticks or decisions
//! 2. **Exclusivity**: no artwork is on loan and mortgaged at once
//! 3. **Week scoping**: `lots`, `loan_offers` and `quiz` belong to `week`

use crate::models::artwork::{Artwork, Tier};
use crate::models::market::{AuctionLot, LoanOffer, QuizQuestion};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Terminal outcome of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Museum,
    Bankruptcy,
    Timeout,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Outcome::Museum => "museum",
            Outcome::Bankruptcy => "bankruptcy",
            Outcome::Timeout => "timeout",
        };
        write!(f, "{}", label)
    }
}

/// Progression tier reached by the current collection
///
/// Not monotonic: selling or losing artworks can lower it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementTier {
    Exhibition,
    Gallery,
    Wing,
}

impl fmt::Display for AchievementTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AchievementTier::Exhibition => "exhibition",
            AchievementTier::Gallery => "gallery",
            AchievementTier::Wing => "wing",
        };
        write!(f, "{}", label)
    }
}

/// Complete state of one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunState {
    /// Run identity
    pub id: Uuid,

    /// Seed every weekly draw is derived from
    pub seed: u32,

    /// Current week (0 before the first tick)
    pub week: u32,

    /// Week cap; ticking at or past it ends the run with `Timeout`
    pub max_weeks: u32,

    /// Cash balance (may go negative only transiently inside a tick)
    pub cash: i64,

    /// Expertise score (quiz answers, curator loans)
    pub expertise: u32,

    /// Owned artworks, in acquisition order
    pub artworks: Vec<Artwork>,

    /// This week's auction lots
    pub lots: Vec<AuctionLot>,

    /// This week's curator loan offers
    pub loan_offers: Vec<LoanOffer>,

    /// This week's trivia question, if enabled
    pub quiz: Option<QuizQuestion>,

    /// Whether this week's quiz has been attempted
    pub quiz_answered: bool,

    /// Terminal outcome (None while in progress)
    pub outcome: Option<Outcome>,

    /// Highest achievement tier the current collection meets
    pub achievement: Option<AchievementTier>,

    /// Highest achievement tier ever reached in this run
    pub peak_achievement: Option<AchievementTier>,

    /// Museums founded so far in this run
    pub museums_founded: u32,

    /// Week of the first founding
    pub first_museum_week: Option<u32>,

    /// Museum eligibility as of the last tick or decision
    pub museum_eligible: bool,

    /// Lifetime carry paid
    pub total_carry_paid: i64,

    /// Lots and packages acquired since the last tick
    pub acquisitions_this_week: u32,

    /// Packages opened over the whole run (disambiguates package draws)
    pub packages_opened: u32,

    /// Next artwork id to hand out
    pub next_artwork_id: u64,

    /// Unix seconds at creation
    pub started_at: u64,

    /// Unix seconds when the outcome was set
    pub finished_at: Option<u64>,
}

impl RunState {
    /// Fresh, empty run. The engine fills in week-0 inventory.
    pub fn new(seed: u32, cash: i64, max_weeks: u32, started_at: u64) -> Self {
        Self {
            id: Uuid::new_v4(),
            seed,
            week: 0,
            max_weeks,
            cash,
            expertise: 0,
            artworks: Vec::new(),
            lots: Vec::new(),
            loan_offers: Vec::new(),
            quiz: None,
            quiz_answered: false,
            outcome: None,
            achievement: None,
            peak_achievement: None,
            museums_founded: 0,
            first_museum_week: None,
            museum_eligible: false,
            total_carry_paid: 0,
            acquisitions_this_week: 0,
            packages_opened: 0,
            next_artwork_id: 1,
            started_at,
            finished_at: None,
        }
    }

    /// Run has a terminal outcome
    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    /// Hand out the next artwork id
    pub fn allocate_artwork_id(&mut self) -> u64 {
        let id = self.next_artwork_id;
        self.next_artwork_id += 1;
        id
    }

    /// Position of an artwork by id
    pub fn artwork_position(&self, artwork_id: u64) -> Option<usize> {
        self.artworks.iter().position(|a| a.id == artwork_id)
    }

    /// Number of actively mortgaged artworks
    pub fn mortgaged_count(&self) -> usize {
        self.artworks.iter().filter(|a| a.mortgaged).count()
    }

    /// Number of artworks of a tier
    pub fn count_tier(&self, tier: Tier) -> usize {
        self.artworks.iter().filter(|a| a.tier == tier).count()
    }

    /// Total insured value of the collection
    pub fn collection_value(&self) -> i64 {
        self.artworks.iter().map(|a| a.iv).sum()
    }

    /// Total outstanding mortgage principal
    pub fn mortgage_debt(&self) -> i64 {
        self.artworks.iter().map(|a| a.mortgage_principal).sum()
    }

    /// Cash plus collection value minus mortgage debt
    pub fn net_worth(&self) -> i64 {
        self.cash + self.collection_value() - self.mortgage_debt()
    }

    /// Set the achievement tier and update the run peak
    pub(crate) fn set_achievement(&mut self, tier: Option<AchievementTier>) {
        self.achievement = tier;
        if tier > self.peak_achievement {
            self.peak_achievement = tier;
        }
    }

    /// Set a terminal outcome and stamp the finish time
    pub(crate) fn finish(&mut self, outcome: Outcome, finished_at: u64) {
        self.outcome = Some(outcome);
        self.finished_at = Some(finished_at);
        self.lots.clear();
        self.loan_offers.clear();
        self.quiz = None;
    }

    /// True if any artwork is both on loan and mortgaged
    pub fn violates_exclusivity(&self) -> bool {
        self.artworks.iter().any(|a| a.on_loan && a.mortgaged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn art(id: u64, iv: i64) -> Artwork {
        Artwork::new(id, format!("a{}", id), iv, vec!["pop".into()], 0, iv)
    }

    #[test]
    fn test_net_worth_subtracts_principal() {
        let mut state = RunState::new(1, 100_000, 104, 0);
        state.artworks.push(art(1, 50_000));
        state.artworks[0].pledge(25_000, 12);
        assert_eq!(state.net_worth(), 100_000 + 50_000 - 25_000);
        assert_eq!(state.mortgaged_count(), 1);
    }

    #[test]
    fn test_peak_achievement_tracks_maximum() {
        let mut state = RunState::new(1, 0, 104, 0);
        state.set_achievement(Some(AchievementTier::Gallery));
        state.set_achievement(Some(AchievementTier::Exhibition));
        assert_eq!(state.achievement, Some(AchievementTier::Exhibition));
        assert_eq!(state.peak_achievement, Some(AchievementTier::Gallery));
    }

    #[test]
    fn test_finish_clears_week_offerings() {
        let mut state = RunState::new(1, 0, 104, 0);
        state.finish(Outcome::Bankruptcy, 99);
        assert!(state.is_finished());
        assert_eq!(state.finished_at, Some(99));
        assert!(state.lots.is_empty());
    }
}
