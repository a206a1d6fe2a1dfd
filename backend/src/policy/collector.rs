//! Collector Policy
//!
//! Batch auto-play: builds toward the museum thresholds while protecting a
//! cash runway. One decision per call, in priority order:
//!
//! 1. Found the museum when eligible
//! 2. Answer the weekly quiz (a deterministic guess that improves with expertise)
//! 3. Emergency liquidity when runway < buffer / 2: mortgage, then sell
//! 4. Repay mortgages once runway after repayment is at least twice the buffer
//! 5. Accept loan offers (if enabled)
//! 6. Flip surplus pieces held long enough (if enabled)
//! 7. Buy the lot that closes the largest museum gap, keeping the buffer

use super::{AcquisitionPolicy, Decision};
use crate::config::Config;
use crate::costs::{acquisition_carry, runway_weeks, total_weekly_carry, weekly_carry};
use crate::models::{AuctionLot, QuizQuestion, RunState, Tier};
use crate::progression::CollectionProfile;
use crate::rng::{Prng, Stream};
use std::collections::HashSet;

#[derive(Debug, Clone)]
pub struct CollectorPolicy {
    /// Minimum runway (weeks) left after a purchase
    pub safety_buffer_weeks: f64,
    pub loans_enabled: bool,
    pub flipping_enabled: bool,
    /// Weeks a piece must be held before it may be flipped
    pub flip_hold_weeks: u32,
}

impl Default for CollectorPolicy {
    fn default() -> Self {
        Self {
            safety_buffer_weeks: 16.0,
            loans_enabled: true,
            flipping_enabled: false,
            flip_hold_weeks: 8,
        }
    }
}

impl CollectorPolicy {
    pub fn new(loans_enabled: bool, flipping_enabled: bool) -> Self {
        Self {
            loans_enabled,
            flipping_enabled,
            ..Self::default()
        }
    }

    fn quiz_guess(&self, state: &RunState, quiz: &QuizQuestion) -> usize {
        let knowledge = 0.5 + 0.4 * (state.expertise.min(100) as f64 / 100.0);
        let mut rng = Prng::for_week_with(state.seed, state.week, Stream::Quiz, 1);
        if rng.chance(knowledge) || quiz.choices.len() < 2 {
            quiz.answer_index
        } else {
            (quiz.answer_index + 1) % quiz.choices.len()
        }
    }

    fn emergency(&self, state: &RunState, config: &Config, carry: i64) -> Option<Decision> {
        if runway_weeks(state.cash, carry) >= self.safety_buffer_weeks / 2.0 {
            return None;
        }

        // Most valuable unencumbered piece first: the largest principal
        let pledgeable = state
            .artworks
            .iter()
            .enumerate()
            .filter(|(_, a)| a.is_unencumbered())
            .max_by_key(|(i, a)| (a.iv, std::cmp::Reverse(*i)));

        if (state.mortgaged_count() as u32) < config.mortgage.max_concurrent {
            if let Some((index, _)) = pledgeable {
                return Some(Decision::TakeMortgage {
                    artwork_index: index,
                });
            }
        }

        // Shed the heaviest carry
        state
            .artworks
            .iter()
            .enumerate()
            .filter(|(_, a)| a.is_unencumbered())
            .max_by_key(|(i, a)| (weekly_carry(a, config.tier(a.tier), config), std::cmp::Reverse(*i)))
            .map(|(index, _)| Decision::SellArtwork {
                artwork_index: index,
            })
    }

    fn repayment(&self, state: &RunState, carry: i64) -> Option<Decision> {
        state
            .artworks
            .iter()
            .enumerate()
            .filter(|(_, a)| a.mortgaged)
            .find(|(_, a)| {
                runway_weeks(state.cash - a.mortgage_principal, carry) >= 2.0 * self.safety_buffer_weeks
            })
            .map(|(index, _)| Decision::RepayMortgage {
                artwork_index: index,
            })
    }

    fn loan(&self, state: &RunState) -> Option<Decision> {
        if !self.loans_enabled {
            return None;
        }
        state
            .loan_offers
            .iter()
            .find(|offer| {
                state
                    .artworks
                    .iter()
                    .any(|a| a.id == offer.artwork_id && a.is_unencumbered())
            })
            .map(|offer| Decision::AcceptLoan {
                loan_index: offer.index,
            })
    }

    fn flip(&self, state: &RunState, config: &Config) -> Option<Decision> {
        if !self.flipping_enabled {
            return None;
        }
        let profile = CollectionProfile::of(&state.artworks);
        if profile.total <= config.museum.min_total {
            return None;
        }
        state
            .artworks
            .iter()
            .enumerate()
            .filter(|(_, a)| a.is_unencumbered())
            .filter(|(_, a)| state.week >= a.acquired_week + self.flip_hold_weeks)
            .filter(|(_, a)| profile.count(a.tier) > *config.museum.min_per_tier.get(a.tier))
            .max_by_key(|(i, a)| (a.idle_weeks, std::cmp::Reverse(*i)))
            .map(|(index, _)| Decision::SellArtwork {
                artwork_index: index,
            })
    }

    /// Priority of a lot for the museum build (lower is more urgent)
    fn lot_priority(&self, state: &RunState, config: &Config, lot: &AuctionLot, owned_tags: &HashSet<&str>) -> Option<u8> {
        let profile = CollectionProfile::of(&state.artworks);
        let museum = &config.museum;

        if profile.count(lot.tier) < *museum.min_per_tier.get(lot.tier) {
            // Rarer tiers first: A = 0 ... D = 3
            return Some(3 - lot.tier.index() as u8);
        }
        let adds_tag = lot.tags.iter().any(|t| !owned_tags.contains(t.as_str()));
        if profile.tag_diversity < museum.min_tag_diversity && adds_tag && lot.tier <= Tier::C {
            return Some(4);
        }
        if profile.total < museum.min_total && lot.tier == Tier::D {
            return Some(5);
        }
        None
    }

    fn purchase(&self, state: &RunState, config: &Config, carry: i64) -> Option<Decision> {
        if state.acquisitions_this_week >= config.max_acquisitions_per_week {
            return None;
        }
        let owned_tags: HashSet<&str> = state
            .artworks
            .iter()
            .flat_map(|a| a.tags.iter().map(String::as_str))
            .collect();

        state
            .lots
            .iter()
            .filter(|lot| !lot.purchased && lot.total_cost <= state.cash)
            .filter(|lot| {
                let post_cash = state.cash - lot.total_cost;
                let post_carry = carry + acquisition_carry(lot.iv, config);
                runway_weeks(post_cash, post_carry) >= self.safety_buffer_weeks
            })
            .filter_map(|lot| {
                self.lot_priority(state, config, lot, &owned_tags)
                    .map(|priority| (priority, lot))
            })
            // Within a priority, the best price relative to insured value
            .min_by(|(pa, a), (pb, b)| {
                let ra = a.total_cost as f64 / a.iv as f64;
                let rb = b.total_cost as f64 / b.iv as f64;
                pa.cmp(pb).then(ra.total_cmp(&rb)).then(a.index.cmp(&b.index))
            })
            .map(|(_, lot)| Decision::BuyLot {
                lot_index: lot.index,
            })
    }
}

impl AcquisitionPolicy for CollectorPolicy {
    fn name(&self) -> &'static str {
        "collector"
    }

    fn next_decision(&mut self, state: &RunState, config: &Config) -> Option<Decision> {
        if state.museum_eligible {
            return Some(Decision::FoundMuseum);
        }
        if let Some(quiz) = state.quiz.as_ref().filter(|_| !state.quiz_answered) {
            return Some(Decision::AnswerQuiz {
                choice: self.quiz_guess(state, quiz),
            });
        }

        let carry = total_weekly_carry(&state.artworks, config);
        self.emergency(state, config, carry)
            .or_else(|| self.repayment(state, carry))
            .or_else(|| self.loan(state))
            .or_else(|| self.flip(state, config))
            .or_else(|| self.purchase(state, config, carry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Artwork;
    use crate::orchestrator::Engine;

    #[test]
    fn test_answers_quiz_first() {
        let engine = Engine::default();
        let state = engine.create_run(42);
        let mut policy = CollectorPolicy::default();
        assert!(matches!(
            policy.next_decision(&state, engine.config()),
            Some(Decision::AnswerQuiz { .. })
        ));
    }

    #[test]
    fn test_founds_museum_when_eligible() {
        let engine = Engine::default();
        let mut state = engine.create_run(42);
        state.museum_eligible = true;
        let mut policy = CollectorPolicy::default();
        assert_eq!(
            policy.next_decision(&state, engine.config()),
            Some(Decision::FoundMuseum)
        );
    }

    #[test]
    fn test_low_runway_pledges_before_selling() {
        let engine = Engine::default();
        let mut state = engine.create_run(42);
        state.quiz_answered = true;
        state
            .artworks
            .push(Artwork::new(1, "a".into(), 200_000, vec!["pop".into()], 0, 1));
        state.next_artwork_id = 2;
        state.cash = 1_000;
        let mut policy = CollectorPolicy::default();
        assert_eq!(
            policy.next_decision(&state, engine.config()),
            Some(Decision::TakeMortgage { artwork_index: 0 })
        );
    }

    #[test]
    fn test_prefers_deficit_tier() {
        let engine = Engine::default();
        let mut state = engine.create_run(42);
        state.quiz_answered = true;
        let mut policy = CollectorPolicy::new(false, false);
        let Some(Decision::BuyLot { lot_index }) = policy.next_decision(&state, engine.config()) else {
            panic!("expected a purchase");
        };
        // Every tier is in deficit on an empty collection; the pick is the
        // rarest affordable tier
        let chosen = state.lots[lot_index].tier;
        let carry = 0;
        let rarer_affordable = state.lots.iter().any(|l| {
            l.tier > chosen
                && l.total_cost <= state.cash
                && runway_weeks(state.cash - l.total_cost, carry + acquisition_carry(l.iv, engine.config()))
                    >= policy.safety_buffer_weeks
        });
        assert!(!rarer_affordable);
        state.cash = 0;
        assert_eq!(policy.next_decision(&state, engine.config()), None);
    }
}
