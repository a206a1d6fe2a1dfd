//! Week Orchestrator
//!
//! Owns the weekly state machine and every player decision operation.
//!
//! # Architecture
//!
//! ```text
//! advance_week:
//! 1. week >= max_weeks          → Timeout (terminal)
//! 2. week += 1, reset weekly counters
//! 3. Loans tick down; returned artworks restart their idle clock
//! 4. Artworks not on loan accrue an idle week
//! 5. Deduct total weekly carry   → cash < 0 ⇒ Bankruptcy (terminal)
//! 6. Mortgage processor          → cash < 0 ⇒ Bankruptcy (terminal)
//! 7. Museum eligibility flag (informational)
//! 8. Regenerate lots, loan offers, quiz from (seed, week)
//! 9. Recompute achievement tier
//! ```
//!
//! Decision operations run between ticks. Each one validates every
//! precondition before touching the state, so an `Err` means the state is
//! exactly as it was.
//!
//! # Example
//!
//! ```rust
//! use collection_sim_core::{Config, Engine};
//!
//! let engine = Engine::new(Config::default()).unwrap();
//! let mut state = engine.create_run(42);
//!
//! for _ in 0..10 {
//!     let result = engine.advance_week(&mut state).unwrap();
//!     println!("Week {}: carry {}", result.week, result.carry_paid);
//! }
//! assert_eq!(state.week, 10);
//! ```

use crate::config::{Config, ConfigError, MuseumMode};
use crate::costs::{consignment_proceeds, dealer_proceeds, total_weekly_carry};
use crate::finance;
use crate::market::{draw_package, generate_loan_offers, generate_lots, generate_quiz};
use crate::models::artwork::make_title;
use crate::models::{Artwork, Event, Outcome, RunState};
use crate::policy::Decision;
use crate::progression::{
    check_museum, evaluate_achievement, execute_ascension, AscensionResult, MuseumCheck,
    MuseumShortfall,
};
use crate::rng::{Prng, Stream};
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// Errors
// ============================================================================

/// Decision-validation failures
///
/// Returning one of these guarantees the state was not modified. Terminal
/// outcomes (bankruptcy, timeout) are not errors; they arrive through
/// [`TickResult::outcome`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("Run has already finished")]
    RunFinished,

    #[error("Lot {0} not found this week")]
    LotNotFound(usize),

    #[error("Lot {0} was already bought this week")]
    LotUnavailable(usize),

    #[error("Loan offer {0} not found this week")]
    LoanOfferNotFound(usize),

    #[error("Artwork at index {0} not found")]
    ArtworkNotFound(usize),

    #[error("Package {0} not found")]
    PackageNotFound(usize),

    #[error("Artwork {0} is already on loan")]
    AlreadyOnLoan(u64),

    #[error("Artwork {0} is already mortgaged")]
    AlreadyMortgaged(u64),

    #[error("Artwork {0} is not mortgaged")]
    NotMortgaged(u64),

    #[error("Mortgage limit reached ({max} concurrent)")]
    MortgageLimitReached { max: u32 },

    #[error("Insufficient funds: required {required}, available {available}")]
    InsufficientFunds { required: i64, available: i64 },

    #[error("Weekly acquisition cap of {0} reached")]
    AcquisitionCapReached(u32),

    #[error("Museum thresholds not met: {}", format_shortfalls(.0))]
    MuseumNotEligible(Vec<MuseumShortfall>),

    #[error("No quiz this week")]
    QuizUnavailable,

    #[error("This week's quiz was already answered")]
    QuizAlreadyAnswered,

    #[error("Choice {0} is out of range")]
    InvalidChoice(usize),

    #[error("Amount must be positive, got {0}")]
    InvalidAmount(i64),
}

fn format_shortfalls(shortfalls: &[MuseumShortfall]) -> String {
    shortfalls
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

// ============================================================================
// Results
// ============================================================================

/// Result of a single tick
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickResult {
    /// Week after the tick
    pub week: u32,

    /// Cash went negative this tick
    pub bankrupt: bool,

    /// Collection meets every museum threshold
    pub museum_eligible: bool,

    /// Carry deducted this tick
    pub carry_paid: i64,

    /// Mortgage interest deducted this tick
    pub interest_paid: i64,

    /// Artworks liquidated for defaulted mortgages
    pub forced_sales: usize,

    /// Loans that came back this tick
    pub loans_returned: usize,

    /// Terminal outcome reached by this tick, if any
    pub outcome: Option<Outcome>,

    /// Events in the order they happened
    pub events: Vec<Event>,
}

impl TickResult {
    fn empty(week: u32) -> Self {
        Self {
            week,
            bankrupt: false,
            museum_eligible: false,
            carry_paid: 0,
            interest_paid: 0,
            forced_sales: 0,
            loans_returned: 0,
            outcome: None,
            events: Vec::new(),
        }
    }
}

/// What a successfully applied [`Decision`] produced
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "result", content = "value", rename_all = "snake_case")]
pub enum DecisionOutcome {
    /// Lot or package acquired
    Acquired(Artwork),
    /// Loan fee received
    LoanFee(i64),
    /// Sale proceeds received
    SaleProceeds(i64),
    /// Mortgage principal advanced
    MortgageTaken(i64),
    /// Mortgage principal repaid
    MortgageRepaid(i64),
    /// Quiz answered (true when correct)
    QuizAnswered(bool),
    /// Museum founded
    MuseumFounded(AscensionResult),
    /// Credits deposited
    ToppedUp(i64),
}

// ============================================================================
// Engine
// ============================================================================

/// Source of the `started_at` / `finished_at` timestamps (unix seconds)
///
/// The engine never reads the wall clock itself; hosts that want real
/// timestamps install one with [`Engine::with_clock`].
pub type Clock = fn() -> u64;

/// Clock used unless the host installs one; always reads zero
pub fn fixed_clock() -> u64 {
    0
}

/// Stateless rules engine; every call takes the run state explicitly
#[derive(Debug, Clone)]
pub struct Engine {
    config: Config,
    clock: Clock,
}

impl Default for Engine {
    fn default() -> Self {
        Self {
            config: Config::default(),
            clock: fixed_clock,
        }
    }
}

/// Fold a 64-bit artwork id into a 32-bit stream key
fn stream_key(id: u64) -> u32 {
    (id ^ (id >> 32)) as u32
}

fn ensure_active(state: &RunState) -> Result<(), EngineError> {
    if state.is_finished() {
        Err(EngineError::RunFinished)
    } else {
        Ok(())
    }
}

impl Engine {
    /// Create an engine after validating the configuration
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            clock: fixed_clock,
        })
    }

    /// Replace the timestamp source
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Start a run: empty collection, starting cash, week-0 inventory
    pub fn create_run(&self, seed: u32) -> RunState {
        let mut state = RunState::new(
            seed,
            self.config.starting_cash,
            self.config.max_weeks,
            (self.clock)(),
        );
        self.regenerate_offerings(&mut state);
        tracing::debug!(run_id = %state.id, seed, "run created");
        state
    }

    /// Advance the run by one week
    pub fn advance_week(&self, state: &mut RunState) -> Result<TickResult, EngineError> {
        ensure_active(state)?;
        let config = &self.config;

        // STEP 1: WEEK CAP
        if state.week >= state.max_weeks {
            let mut result = TickResult::empty(state.week);
            state.finish(Outcome::Timeout, (self.clock)());
            result.outcome = Some(Outcome::Timeout);
            result.events.push(Event::Timeout { week: state.week });
            tracing::info!(run_id = %state.id, week = state.week, cash = state.cash, "run timed out");
            return Ok(result);
        }

        // STEP 2: ADVANCE TIME
        state.week += 1;
        state.acquisitions_this_week = 0;
        state.quiz_answered = false;
        let week = state.week;
        let mut result = TickResult::empty(week);

        // STEP 3: LOAN RETURNS
        for art in state.artworks.iter_mut().filter(|a| a.on_loan) {
            art.loan_weeks_remaining = art.loan_weeks_remaining.saturating_sub(1);
            if art.loan_weeks_remaining == 0 {
                art.end_loan();
                result.loans_returned += 1;
                result.events.push(Event::LoanReturned {
                    week,
                    artwork_id: art.id,
                });
            }
        }

        // STEP 4: IDLE CLOCK
        for art in state.artworks.iter_mut().filter(|a| !a.on_loan) {
            art.idle_weeks += 1;
        }

        // STEP 5: CARRY
        let carry = total_weekly_carry(&state.artworks, config);
        state.cash -= carry;
        state.total_carry_paid += carry;
        result.carry_paid = carry;
        result.events.push(Event::CarryCharged {
            week,
            amount: carry,
        });
        if state.cash < 0 {
            self.go_bankrupt(state, &mut result);
            return Ok(result);
        }

        // STEP 6: MORTGAGES
        let report = finance::process_mortgages(state, config);
        result.interest_paid = report.interest_paid;
        result.forced_sales = report.forced_sales;
        result.events.extend(report.events);
        if state.cash < 0 {
            self.go_bankrupt(state, &mut result);
            return Ok(result);
        }

        // STEP 7: MUSEUM FLAG
        state.museum_eligible = check_museum(state, config).eligible;
        result.museum_eligible = state.museum_eligible;
        if state.museum_eligible {
            result.events.push(Event::MuseumEligible { week });
        }

        // STEP 8: OFFERINGS
        self.regenerate_offerings(state);

        // STEP 9: ACHIEVEMENT
        state.set_achievement(evaluate_achievement(&state.artworks, config));

        tracing::debug!(
            week,
            cash = state.cash,
            carry,
            forced_sales = result.forced_sales,
            artworks = state.artworks.len(),
            "week advanced"
        );

        Ok(result)
    }

    fn go_bankrupt(&self, state: &mut RunState, result: &mut TickResult) {
        state.set_achievement(evaluate_achievement(&state.artworks, &self.config));
        state.museum_eligible = false;
        state.finish(Outcome::Bankruptcy, (self.clock)());
        result.bankrupt = true;
        result.outcome = Some(Outcome::Bankruptcy);
        result.events.push(Event::Bankruptcy {
            week: state.week,
            cash: state.cash,
        });
        tracing::info!(run_id = %state.id, week = state.week, cash = state.cash, "run went bankrupt");
    }

    fn regenerate_offerings(&self, state: &mut RunState) {
        let config = &self.config;
        state.lots = generate_lots(config, state.seed, state.week);
        state.loan_offers = generate_loan_offers(&state.artworks, config, state.seed, state.week);
        state.quiz = generate_quiz(config, state.seed, state.week);
    }

    /// Recompute the derived flags after a decision
    fn refresh(&self, state: &mut RunState) {
        state.set_achievement(evaluate_achievement(&state.artworks, &self.config));
        state.museum_eligible = check_museum(state, &self.config).eligible;
    }

    fn ensure_acquisition_slot(&self, state: &RunState) -> Result<(), EngineError> {
        let cap = self.config.max_acquisitions_per_week;
        if state.acquisitions_this_week >= cap {
            return Err(EngineError::AcquisitionCapReached(cap));
        }
        Ok(())
    }

    // ========================================================================
    // Decision Operations
    // ========================================================================

    /// Buy one of this week's auction lots
    pub fn buy_lot(&self, state: &mut RunState, lot_index: usize) -> Result<Artwork, EngineError> {
        ensure_active(state)?;
        let lot = state
            .lots
            .get(lot_index)
            .filter(|lot| lot.week == state.week)
            .ok_or(EngineError::LotNotFound(lot_index))?;
        if lot.purchased {
            return Err(EngineError::LotUnavailable(lot_index));
        }
        self.ensure_acquisition_slot(state)?;
        if state.cash < lot.total_cost {
            return Err(EngineError::InsufficientFunds {
                required: lot.total_cost,
                available: state.cash,
            });
        }

        let (iv, tags, cost) = (lot.iv, lot.tags.clone(), lot.total_cost);
        let id = state.allocate_artwork_id();
        let artwork = Artwork::new(id, make_title(&tags, id), iv, tags, state.week, cost);
        state.cash -= cost;
        state.lots[lot_index].purchased = true;
        state.acquisitions_this_week += 1;
        state.artworks.push(artwork.clone());
        self.refresh(state);

        tracing::debug!(week = state.week, artwork_id = id, iv, cost, "lot bought");
        Ok(artwork)
    }

    /// Accept a curator's loan offer; returns the fee received
    pub fn accept_loan(&self, state: &mut RunState, loan_index: usize) -> Result<i64, EngineError> {
        ensure_active(state)?;
        let offer = state
            .loan_offers
            .get(loan_index)
            .filter(|offer| offer.week == state.week)
            .ok_or(EngineError::LoanOfferNotFound(loan_index))?;
        let position = state
            .artwork_position(offer.artwork_id)
            .ok_or(EngineError::LoanOfferNotFound(loan_index))?;
        let art = &state.artworks[position];
        if art.on_loan {
            return Err(EngineError::AlreadyOnLoan(art.id));
        }
        if art.mortgaged {
            return Err(EngineError::AlreadyMortgaged(art.id));
        }
        let artwork_id = art.id;

        let (fee, weeks, reward) = (offer.fee, offer.duration_weeks, offer.curator.expertise_reward);
        state.artworks[position].start_loan(weeks);
        state.cash += fee;
        state.expertise += reward;
        self.refresh(state);

        tracing::debug!(week = state.week, artwork_id, fee, weeks, "loan accepted");
        Ok(fee)
    }

    /// Consign an artwork to auction; returns the proceeds after seller fee
    ///
    /// The clearing percentage comes from the week's `Sale` stream keyed by
    /// the artwork id, so repeating the sale of the same piece in the same
    /// week yields the same price. The dealer backstop sets the floor.
    pub fn sell_artwork(&self, state: &mut RunState, artwork_index: usize) -> Result<i64, EngineError> {
        ensure_active(state)?;
        let art = self.sellable(state, artwork_index)?;

        let market = &self.config.market;
        let mut rng = Prng::for_week_with(state.seed, state.week, Stream::Sale, stream_key(art.id));
        let pct = rng.normal_clamped(market.mean, market.std, market.min, market.max);
        let proceeds = consignment_proceeds(art.iv, pct, &self.config.fees);
        let artwork_id = art.id;

        state.artworks.remove(artwork_index);
        state.cash += proceeds;
        self.refresh(state);

        tracing::debug!(week = state.week, artwork_id, pct, proceeds, "artwork sold at auction");
        Ok(proceeds)
    }

    /// Sell an artwork straight to the dealer at the guaranteed buy rate
    pub fn sell_to_dealer(&self, state: &mut RunState, artwork_index: usize) -> Result<i64, EngineError> {
        ensure_active(state)?;
        let art = self.sellable(state, artwork_index)?;
        let proceeds = dealer_proceeds(art.iv, &self.config.fees);
        let artwork_id = art.id;

        state.artworks.remove(artwork_index);
        state.cash += proceeds;
        self.refresh(state);

        tracing::debug!(week = state.week, artwork_id, proceeds, "artwork sold to dealer");
        Ok(proceeds)
    }

    fn sellable<'a>(&self, state: &'a RunState, artwork_index: usize) -> Result<&'a Artwork, EngineError> {
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
        Ok(art)
    }

    /// Pledge an artwork; returns the principal advanced
    pub fn take_mortgage(&self, state: &mut RunState, artwork_index: usize) -> Result<i64, EngineError> {
        ensure_active(state)?;
        let principal = finance::take_mortgage(state, &self.config, artwork_index)?;
        self.refresh(state);
        tracing::debug!(week = state.week, artwork_index, principal, "mortgage taken");
        Ok(principal)
    }

    /// Repay a mortgage early; returns the principal repaid
    pub fn repay_mortgage(&self, state: &mut RunState, artwork_index: usize) -> Result<i64, EngineError> {
        ensure_active(state)?;
        let principal = finance::repay_mortgage(state, artwork_index)?;
        self.refresh(state);
        tracing::debug!(week = state.week, artwork_index, principal, "mortgage repaid");
        Ok(principal)
    }

    /// Buy and open a surprise package
    pub fn buy_package(&self, state: &mut RunState, package_index: usize) -> Result<Artwork, EngineError> {
        ensure_active(state)?;
        let package = self
            .config
            .packages
            .get(package_index)
            .ok_or(EngineError::PackageNotFound(package_index))?;
        self.ensure_acquisition_slot(state)?;
        if state.cash < package.cost {
            return Err(EngineError::InsufficientFunds {
                required: package.cost,
                available: state.cash,
            });
        }
        let draw = draw_package(
            &self.config,
            package,
            state.seed,
            state.week,
            state.packages_opened,
        )
        .ok_or(EngineError::PackageNotFound(package_index))?;

        let id = state.allocate_artwork_id();
        let artwork = Artwork::new(
            id,
            make_title(&draw.tags, id),
            draw.iv,
            draw.tags,
            state.week,
            package.cost,
        );
        state.cash -= package.cost;
        state.packages_opened += 1;
        state.acquisitions_this_week += 1;
        state.artworks.push(artwork.clone());
        self.refresh(state);

        tracing::debug!(week = state.week, package = %package.name, artwork_id = id, tier = %artwork.tier, "package opened");
        Ok(artwork)
    }

    /// Found a museum if every threshold is met
    ///
    /// In [`MuseumMode::EndRun`] the founding is terminal; otherwise the
    /// collection resets and the run continues.
    pub fn found_museum(&self, state: &mut RunState) -> Result<AscensionResult, EngineError> {
        ensure_active(state)?;
        let check = check_museum(state, &self.config);
        if !check.eligible {
            return Err(EngineError::MuseumNotEligible(check.shortfalls));
        }

        let result = execute_ascension(state, &self.config);
        self.refresh(state);
        if self.config.museum_mode == MuseumMode::EndRun {
            state.finish(Outcome::Museum, (self.clock)());
        }
        Ok(result)
    }

    /// Answer this week's trivia question; returns whether it was correct
    pub fn answer_quiz(&self, state: &mut RunState, choice: usize) -> Result<bool, EngineError> {
        ensure_active(state)?;
        let quiz = state.quiz.as_ref().ok_or(EngineError::QuizUnavailable)?;
        if state.quiz_answered {
            return Err(EngineError::QuizAlreadyAnswered);
        }
        if choice >= quiz.choices.len() {
            return Err(EngineError::InvalidChoice(choice));
        }

        let correct = choice == quiz.answer_index;
        let reward = quiz.critic.expertise_reward;
        state.quiz_answered = true;
        if correct {
            state.expertise += reward;
        }
        self.refresh(state);
        Ok(correct)
    }

    /// Deposit external credits; returns the new balance
    pub fn top_up(&self, state: &mut RunState, amount: i64) -> Result<i64, EngineError> {
        ensure_active(state)?;
        if amount <= 0 {
            return Err(EngineError::InvalidAmount(amount));
        }
        state.cash += amount;
        self.refresh(state);
        Ok(state.cash)
    }

    /// Museum eligibility with every unmet threshold listed
    pub fn museum_report(&self, state: &RunState) -> MuseumCheck {
        check_museum(state, &self.config)
    }

    /// Apply a policy decision through the matching operation
    pub fn apply(&self, state: &mut RunState, decision: &Decision) -> Result<DecisionOutcome, EngineError> {
        match *decision {
            Decision::BuyLot { lot_index } => self.buy_lot(state, lot_index).map(DecisionOutcome::Acquired),
            Decision::BuyPackage { package_index } => self
                .buy_package(state, package_index)
                .map(DecisionOutcome::Acquired),
            Decision::AcceptLoan { loan_index } => self
                .accept_loan(state, loan_index)
                .map(DecisionOutcome::LoanFee),
            Decision::SellArtwork { artwork_index } => self
                .sell_artwork(state, artwork_index)
                .map(DecisionOutcome::SaleProceeds),
            Decision::SellToDealer { artwork_index } => self
                .sell_to_dealer(state, artwork_index)
                .map(DecisionOutcome::SaleProceeds),
            Decision::TakeMortgage { artwork_index } => self
                .take_mortgage(state, artwork_index)
                .map(DecisionOutcome::MortgageTaken),
            Decision::RepayMortgage { artwork_index } => self
                .repay_mortgage(state, artwork_index)
                .map(DecisionOutcome::MortgageRepaid),
            Decision::AnswerQuiz { choice } => self.answer_quiz(state, choice).map(DecisionOutcome::QuizAnswered),
            Decision::FoundMuseum => self.found_museum(state).map(DecisionOutcome::MuseumFounded),
            Decision::TopUp { amount } => self.top_up(state, amount).map(DecisionOutcome::ToppedUp),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Tier;

    fn engine() -> Engine {
        Engine::default()
    }

    #[test]
    fn test_create_run_has_week_zero_inventory() {
        let state = engine().create_run(42);
        assert_eq!(state.week, 0);
        assert_eq!(state.cash, 1_000_000);
        assert_eq!(state.lots.len(), 10);
        assert!(state.lots.iter().all(|l| l.week == 0));
        assert!(state.loan_offers.is_empty());
    }

    #[test]
    fn test_buy_lot_twice_rejected() {
        let engine = engine();
        let mut state = engine.create_run(42);
        engine.buy_lot(&mut state, 0).unwrap();
        let before = state.clone();
        assert_eq!(engine.buy_lot(&mut state, 0), Err(EngineError::LotUnavailable(0)));
        assert_eq!(state, before);
    }

    #[test]
    fn test_acquisition_cap() {
        let engine = engine();
        let mut state = engine.create_run(42);
        for i in 0..3 {
            engine.buy_lot(&mut state, i).unwrap();
        }
        let before = state.clone();
        assert_eq!(
            engine.buy_lot(&mut state, 3),
            Err(EngineError::AcquisitionCapReached(3))
        );
        assert_eq!(state, before);

        engine.advance_week(&mut state).unwrap();
        assert_eq!(state.acquisitions_this_week, 0);
    }

    #[test]
    fn test_sell_to_dealer_pays_buy_rate() {
        let engine = engine();
        let mut state = engine.create_run(42);
        let art = engine.buy_lot(&mut state, 0).unwrap();
        let cash = state.cash;
        let proceeds = engine.sell_to_dealer(&mut state, 0).unwrap();
        assert_eq!(proceeds, (art.iv as f64 * 0.6).round() as i64);
        assert_eq!(state.cash, cash + proceeds);
        assert!(state.artworks.is_empty());
    }

    #[test]
    fn test_sale_stream_key_keeps_high_id_bits() {
        assert_eq!(stream_key(7), 7);
        assert_ne!(stream_key(7), stream_key(7 + (1 << 32)));
        assert_ne!(stream_key(u64::MAX), stream_key(u64::from(u32::MAX)));
    }

    #[test]
    fn test_auction_sale_respects_backstop() {
        let engine = engine();
        let mut state = engine.create_run(42);
        let art = engine.buy_lot(&mut state, 0).unwrap();
        let proceeds = engine.sell_artwork(&mut state, 0).unwrap();
        let floor = (art.iv as f64 * 0.7 * 0.9).round() as i64;
        assert!(proceeds >= floor);
    }

    #[test]
    fn test_sell_mortgaged_rejected() {
        let engine = engine();
        let mut state = engine.create_run(42);
        let b_lot = state.lots.iter().position(|l| l.tier == Tier::B).unwrap();
        engine.buy_lot(&mut state, b_lot).unwrap();
        engine.take_mortgage(&mut state, 0).unwrap();
        let before = state.clone();
        assert!(matches!(
            engine.sell_artwork(&mut state, 0),
            Err(EngineError::AlreadyMortgaged(_))
        ));
        assert_eq!(state, before);
    }

    #[test]
    fn test_quiz_single_attempt() {
        let engine = engine();
        let mut state = engine.create_run(42);
        let answer = state.quiz.as_ref().unwrap().answer_index;
        assert_eq!(engine.answer_quiz(&mut state, answer), Ok(true));
        assert_eq!(state.expertise, 5);
        assert_eq!(
            engine.answer_quiz(&mut state, answer),
            Err(EngineError::QuizAlreadyAnswered)
        );
    }

    #[test]
    fn test_top_up_rejects_non_positive() {
        let engine = engine();
        let mut state = engine.create_run(42);
        assert_eq!(engine.top_up(&mut state, 0), Err(EngineError::InvalidAmount(0)));
        assert_eq!(engine.top_up(&mut state, 5_000), Ok(1_005_000));
    }

    #[test]
    fn test_apply_dispatches() {
        let engine = engine();
        let mut state = engine.create_run(42);
        let outcome = engine.apply(&mut state, &Decision::BuyLot { lot_index: 1 }).unwrap();
        assert!(matches!(outcome, DecisionOutcome::Acquired(_)));
        assert_eq!(state.artworks.len(), 1);
    }
}
