//! Mortgage Processor
//!
//! Runs once per tick for every mortgaged artwork, in collection order:
//!
//! ```text
//! cash -= round(principal * weekly_interest_rate)
//! remaining -= 1
//! if remaining == 0:
//!     cash >= principal → auto-repay (cash -= principal, clear flags)
//!     otherwise         → forced liquidation to the dealer:
//!                         cash += round(iv * dealer_buy_rate) - principal
//!                         artwork leaves the collection
//! ```
//!
//! Cash may end negative; the orchestrator re-checks bankruptcy afterwards.

use crate::config::Config;
use crate::costs::{dealer_proceeds, mortgage_principal, weekly_interest};
use crate::models::{Dealer, Event, Npc, RunState};
use crate::orchestrator::EngineError;

/// What the processor did this week
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MortgageReport {
    pub interest_paid: i64,
    pub repaid: usize,
    pub forced_sales: usize,
    pub events: Vec<Event>,
}

/// Accrue interest and settle expired terms for every mortgaged artwork
pub fn process_mortgages(state: &mut RunState, config: &Config) -> MortgageReport {
    let week = state.week;
    let mut report = MortgageReport::default();
    let mut i = 0;

    while i < state.artworks.len() {
        if !state.artworks[i].mortgaged {
            i += 1;
            continue;
        }

        let (artwork_id, iv, principal) = {
            let art = &state.artworks[i];
            (art.id, art.iv, art.mortgage_principal)
        };

        let interest = weekly_interest(principal, &config.mortgage);
        state.cash -= interest;
        report.interest_paid += interest;
        report.events.push(Event::MortgageInterest {
            week,
            artwork_id,
            amount: interest,
        });

        let art = &mut state.artworks[i];
        art.mortgage_weeks_remaining = art.mortgage_weeks_remaining.saturating_sub(1);
        if art.mortgage_weeks_remaining > 0 {
            i += 1;
            continue;
        }

        if state.cash >= principal {
            state.cash -= principal;
            state.artworks[i].release_mortgage();
            report.repaid += 1;
            report.events.push(Event::MortgageRepaid {
                week,
                artwork_id,
                principal,
            });
            i += 1;
        } else {
            let proceeds = dealer_proceeds(iv, &config.fees);
            state.cash += proceeds - principal;
            state.artworks.remove(i);
            report.forced_sales += 1;
            tracing::warn!(week, artwork_id, proceeds, principal, "mortgage default, artwork liquidated");
            report.events.push(Event::ForcedSale {
                week,
                artwork_id,
                proceeds,
                principal,
                counterparty: Npc::Dealer(Dealer {
                    buy_rate: config.fees.dealer_buy_rate,
                    backstop_rate: config.fees.backstop_rate,
                }),
            });
        }
    }

    report
}

/// Pledge an owned artwork; returns the principal advanced
///
/// Fails closed: not found, on loan, already mortgaged, or at the
/// concurrent-mortgage limit all leave the state untouched.
pub fn take_mortgage(
    state: &mut RunState,
    config: &Config,
    artwork_index: usize,
) -> Result<i64, EngineError> {
    let art = state
        .artworks
        .get(artwork_index)
        .ok_or(EngineError::ArtworkNotFound(artwork_index))?;
    if art.on_loan {
        return Err(EngineError::AlreadyOnLoan(art.id));
    }
    if art.mortgaged {
        return Err(EngineError::AlreadyMortgaged(art.id));
    }
    let active = state.mortgaged_count() as u32;
    if active >= config.mortgage.max_concurrent {
        return Err(EngineError::MortgageLimitReached {
            max: config.mortgage.max_concurrent,
        });
    }

    let principal = mortgage_principal(art.iv, &config.mortgage);
    state.artworks[artwork_index].pledge(principal, config.mortgage.term_weeks);
    state.cash += principal;
    Ok(principal)
}

/// Repay a mortgage early from cash; returns the principal repaid
pub fn repay_mortgage(state: &mut RunState, artwork_index: usize) -> Result<i64, EngineError> {
    let art = state
        .artworks
        .get(artwork_index)
        .ok_or(EngineError::ArtworkNotFound(artwork_index))?;
    if !art.mortgaged {
        return Err(EngineError::NotMortgaged(art.id));
    }
    let principal = art.mortgage_principal;
    if state.cash < principal {
        return Err(EngineError::InsufficientFunds {
            required: principal,
            available: state.cash,
        });
    }

    state.cash -= principal;
    state.artworks[artwork_index].release_mortgage();
    Ok(principal)
}
