//! Week Orchestrator Tests
//!
//! Critical invariants tested:
//! - Tick order: loans, idle clock, carry, mortgages, offerings
//! - Bankruptcy and timeout are terminal
//! - Every rejected decision leaves the state untouched
//! - Same seed and same decisions give the same run

use collection_sim_core::costs::total_weekly_carry;
use collection_sim_core::{
    Artwork, Config, Decision, DecisionOutcome, Engine, EngineError, Event, Outcome, RunState,
    Tier,
};

// ============================================================================
// Test Helpers
// ============================================================================

fn engine_with(f: impl FnOnce(&mut Config)) -> Engine {
    let mut config = Config::default();
    f(&mut config);
    Engine::new(config).unwrap()
}

fn push_artwork(state: &mut RunState, iv: i64) -> usize {
    let id = state.allocate_artwork_id();
    state
        .artworks
        .push(Artwork::new(id, format!("piece {}", id), iv, vec!["pop".into()], state.week, iv));
    state.artworks.len() - 1
}

/// Fields that must match between two replays (ids and timestamps differ)
fn fingerprint(state: &RunState) -> (u32, i64, u32, Vec<(i64, u32, bool)>, Vec<i64>) {
    (
        state.week,
        state.cash,
        state.expertise,
        state
            .artworks
            .iter()
            .map(|a| (a.iv, a.idle_weeks, a.on_loan))
            .collect(),
        state.lots.iter().map(|l| l.total_cost).collect(),
    )
}

/// One of each decision, all of which an active run could accept
fn every_decision() -> Vec<Decision> {
    vec![
        Decision::BuyLot { lot_index: 0 },
        Decision::BuyPackage { package_index: 0 },
        Decision::AcceptLoan { loan_index: 0 },
        Decision::SellArtwork { artwork_index: 0 },
        Decision::SellToDealer { artwork_index: 0 },
        Decision::TakeMortgage { artwork_index: 0 },
        Decision::RepayMortgage { artwork_index: 0 },
        Decision::AnswerQuiz { choice: 0 },
        Decision::FoundMuseum,
        Decision::TopUp { amount: 10_000 },
    ]
}

/// A finished run rejects every call and stays as it was
fn assert_terminal(engine: &Engine, state: &mut RunState) {
    let before = state.clone();
    assert_eq!(engine.advance_week(state), Err(EngineError::RunFinished));
    assert_eq!(*state, before);
    for decision in every_decision() {
        assert_eq!(
            engine.apply(state, &decision),
            Err(EngineError::RunFinished),
            "{:?}",
            decision
        );
        assert_eq!(*state, before, "{:?} modified a finished run", decision);
    }
}

// ============================================================================
// Tick Semantics
// ============================================================================

#[test]
fn test_tick_charges_total_carry() {
    let engine = Engine::default();
    let mut state = engine.create_run(42);
    push_artwork(&mut state, 100_000);
    push_artwork(&mut state, 10_000);

    let tick = engine.advance_week(&mut state).unwrap();

    assert_eq!(tick.week, 1);
    assert_eq!(tick.carry_paid, 2_500 + 200);
    assert_eq!(state.cash, 1_000_000 - 2_700);
    assert_eq!(state.total_carry_paid, 2_700);
    assert!(tick
        .events
        .contains(&Event::CarryCharged { week: 1, amount: 2_700 }));
}

#[test]
fn test_idle_surcharge_starts_after_eight_idle_weeks() {
    let engine = Engine::default();
    let mut state = engine.create_run(42);
    push_artwork(&mut state, 100_000);

    let mut charges = Vec::new();
    for _ in 0..9 {
        charges.push(engine.advance_week(&mut state).unwrap().carry_paid);
    }
    // idle reaches 8 during the eighth tick
    assert_eq!(&charges[..7], &[2_500; 7]);
    assert_eq!(charges[7], 3_250);
    assert_eq!(charges[8], 3_250);
}

#[test]
fn test_offerings_regenerated_every_week() {
    let engine = Engine::default();
    let mut state = engine.create_run(42);
    engine.buy_lot(&mut state, 0).unwrap();
    engine.advance_week(&mut state).unwrap();

    assert_eq!(state.lots.len(), 10);
    assert!(state.lots.iter().all(|l| l.week == 1 && !l.purchased));
    assert!(state.quiz.as_ref().is_some_and(|q| q.week == 1));
    assert!(!state.quiz_answered);
}

#[test]
fn test_loan_lifecycle() {
    let engine = engine_with(|c| c.tiers.d.loan_offer_probability = 1.0);
    let mut state = engine.create_run(42);
    engine.buy_lot(&mut state, 0).unwrap();
    engine.advance_week(&mut state).unwrap();
    assert_eq!(state.loan_offers.len(), 1);

    let offer = state.loan_offers[0].clone();
    state.artworks[0].idle_weeks = 5;
    let cash = state.cash;
    let fee = engine.accept_loan(&mut state, 0).unwrap();

    assert_eq!(fee, offer.fee);
    assert_eq!(state.cash, cash + fee);
    assert_eq!(state.expertise, offer.curator.expertise_reward);
    assert!(state.artworks[0].on_loan);
    assert_eq!(
        engine.accept_loan(&mut state, 0),
        Err(EngineError::AlreadyOnLoan(state.artworks[0].id))
    );

    for week in 1..offer.duration_weeks {
        let tick = engine.advance_week(&mut state).unwrap();
        assert_eq!(tick.loans_returned, 0, "returned early at tick {}", week);
        assert!(state.artworks[0].on_loan);
        assert_eq!(state.artworks[0].idle_weeks, 5);
        assert!(state.loan_offers.is_empty());
    }

    let tick = engine.advance_week(&mut state).unwrap();
    assert_eq!(tick.loans_returned, 1);
    let art = &state.artworks[0];
    assert!(!art.on_loan);
    assert_eq!(art.loan_weeks_remaining, 0);
    // reset on return, then one idle week for the tick it came back in
    assert_eq!(art.idle_weeks, 1);
}

#[test]
fn test_loaned_piece_pays_discounted_carry() {
    let engine = engine_with(|c| c.tiers.b.loan_offer_probability = 1.0);
    let mut state = engine.create_run(42);
    let b_lot = state.lots.iter().position(|l| l.tier == Tier::B).unwrap();
    engine.buy_lot(&mut state, b_lot).unwrap();
    engine.advance_week(&mut state).unwrap();
    engine.accept_loan(&mut state, 0).unwrap();

    let expected = total_weekly_carry(&state.artworks, engine.config());
    let tick = engine.advance_week(&mut state).unwrap();
    assert_eq!(tick.carry_paid, expected);
}

// ============================================================================
// Terminal Outcomes
// ============================================================================

#[test]
fn test_carry_bankruptcy_is_terminal() {
    let engine = Engine::default();
    let mut state = engine.create_run(42);
    push_artwork(&mut state, 100_000);
    state.cash = 100;

    let tick = engine.advance_week(&mut state).unwrap();

    assert!(tick.bankrupt);
    assert_eq!(tick.outcome, Some(Outcome::Bankruptcy));
    assert_eq!(state.outcome, Some(Outcome::Bankruptcy));
    assert_eq!(state.cash, -2_400);
    assert!(state.lots.is_empty());
    assert!(tick
        .events
        .contains(&Event::Bankruptcy { week: 1, cash: -2_400 }));

    assert_terminal(&engine, &mut state);
}

#[test]
fn test_zero_cash_is_not_bankrupt() {
    let engine = Engine::default();
    let mut state = engine.create_run(42);
    push_artwork(&mut state, 100_000);
    state.cash = 2_500;

    let tick = engine.advance_week(&mut state).unwrap();
    assert!(!tick.bankrupt);
    assert_eq!(state.cash, 0);
    assert_eq!(state.outcome, None);
}

#[test]
fn test_timeout_at_week_cap() {
    let engine = engine_with(|c| c.max_weeks = 2);
    let mut state = engine.create_run(1);

    engine.advance_week(&mut state).unwrap();
    engine.advance_week(&mut state).unwrap();
    assert_eq!(state.outcome, None);

    let tick = engine.advance_week(&mut state).unwrap();
    assert_eq!(tick.outcome, Some(Outcome::Timeout));
    assert_eq!(state.week, 2);
    assert_eq!(state.outcome, Some(Outcome::Timeout));
}

#[test]
fn test_timed_out_run_rejects_everything() {
    let engine = engine_with(|c| c.max_weeks = 1);
    let mut state = engine.create_run(42);
    engine.buy_lot(&mut state, 0).unwrap();
    engine.advance_week(&mut state).unwrap();
    engine.advance_week(&mut state).unwrap();
    assert_eq!(state.outcome, Some(Outcome::Timeout));
    assert_eq!(state.artworks.len(), 1);

    assert_terminal(&engine, &mut state);
}

// ============================================================================
// Decision Validation
// ============================================================================

#[test]
fn test_rejected_decisions_leave_state_untouched() {
    let engine = engine_with(|c| c.quiz.enabled = false);
    let mut state = engine.create_run(42);
    state.cash = 1_000;
    let before = state.clone();

    let rejections = [
        Decision::BuyLot { lot_index: 0 },
        Decision::BuyLot { lot_index: 99 },
        Decision::BuyPackage { package_index: 0 },
        Decision::BuyPackage { package_index: 9 },
        Decision::AcceptLoan { loan_index: 0 },
        Decision::SellArtwork { artwork_index: 0 },
        Decision::SellToDealer { artwork_index: 0 },
        Decision::TakeMortgage { artwork_index: 0 },
        Decision::RepayMortgage { artwork_index: 0 },
        Decision::AnswerQuiz { choice: 0 },
        Decision::FoundMuseum,
        Decision::TopUp { amount: -5 },
    ];
    for decision in rejections {
        assert!(engine.apply(&mut state, &decision).is_err(), "{:?} accepted", decision);
        assert_eq!(state, before, "{:?} modified state", decision);
    }
}

#[test]
fn test_specific_rejection_errors() {
    let engine = Engine::default();
    let mut state = engine.create_run(42);

    assert_eq!(engine.buy_lot(&mut state, 99), Err(EngineError::LotNotFound(99)));
    assert_eq!(
        engine.accept_loan(&mut state, 0),
        Err(EngineError::LoanOfferNotFound(0))
    );
    assert_eq!(
        engine.buy_package(&mut state, 9),
        Err(EngineError::PackageNotFound(9))
    );
    assert_eq!(engine.answer_quiz(&mut state, 4), Err(EngineError::InvalidChoice(4)));

    state.cash = 10;
    assert_eq!(
        engine.buy_lot(&mut state, 0),
        Err(EngineError::InsufficientFunds {
            required: state.lots[0].total_cost,
            available: 10
        })
    );
}

#[test]
fn test_package_counts_toward_acquisition_cap() {
    let engine = Engine::default();
    let mut state = engine.create_run(42);

    let art = engine.buy_package(&mut state, 0).unwrap();
    assert_eq!(art.purchase_cost, 40_000);
    assert_eq!(state.cash, 960_000);
    assert_eq!(state.packages_opened, 1);

    engine.buy_lot(&mut state, 0).unwrap();
    engine.buy_lot(&mut state, 1).unwrap();
    assert_eq!(
        engine.buy_package(&mut state, 0),
        Err(EngineError::AcquisitionCapReached(3))
    );
}

#[test]
fn test_wrong_quiz_answer_gives_nothing() {
    let engine = Engine::default();
    let mut state = engine.create_run(42);
    let answer = state.quiz.as_ref().unwrap().answer_index;
    let wrong = (answer + 1) % 4;

    assert_eq!(engine.answer_quiz(&mut state, wrong), Ok(false));
    assert_eq!(state.expertise, 0);
    assert_eq!(
        engine.answer_quiz(&mut state, answer),
        Err(EngineError::QuizAlreadyAnswered)
    );
}

#[test]
fn test_decision_outcome_serializes_tagged() {
    let engine = Engine::default();
    let mut state = engine.create_run(42);
    let outcome = engine
        .apply(&mut state, &Decision::TopUp { amount: 500 })
        .unwrap();
    assert_eq!(outcome, DecisionOutcome::ToppedUp(1_000_500));
    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["result"], "topped_up");
    assert_eq!(json["value"], 1_000_500);
}

#[test]
fn test_decision_json_shape() {
    let decision: Decision =
        serde_json::from_str(r#"{ "action": "buy_lot", "lot_index": 3 }"#).unwrap();
    assert_eq!(decision, Decision::BuyLot { lot_index: 3 });
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn test_same_seed_same_decisions_same_run() {
    let play = || {
        let engine = engine_with(|c| c.tiers.d.loan_offer_probability = 0.5);
        let mut state = engine.create_run(2024);
        let mut fingerprints = Vec::new();
        for _ in 0..20 {
            let _ = engine.buy_lot(&mut state, 0);
            if !state.loan_offers.is_empty() {
                let _ = engine.accept_loan(&mut state, 0);
            }
            engine.advance_week(&mut state).unwrap();
            fingerprints.push(fingerprint(&state));
        }
        fingerprints
    };
    assert_eq!(play(), play());
}

#[test]
fn test_cloned_run_replays_to_equal_state() {
    let engine = engine_with(|c| c.max_weeks = 6);
    let mut a = engine.create_run(42);
    engine.buy_lot(&mut a, 0).unwrap();
    let mut b = a.clone();

    while !a.is_finished() {
        engine.advance_week(&mut a).unwrap();
    }
    std::thread::sleep(std::time::Duration::from_millis(1_100));
    while !b.is_finished() {
        engine.advance_week(&mut b).unwrap();
    }

    assert_eq!(a.outcome, Some(Outcome::Timeout));
    assert_eq!(a, b);
}

#[test]
fn test_timestamps_come_from_the_installed_clock() {
    let engine = engine_with(|c| c.max_weeks = 1).with_clock(|| 1_700_000_000);
    let mut state = engine.create_run(42);
    assert_eq!(state.started_at, 1_700_000_000);

    engine.advance_week(&mut state).unwrap();
    engine.advance_week(&mut state).unwrap();
    assert_eq!(state.finished_at, Some(1_700_000_000));

    let unclocked = Engine::default().create_run(42);
    assert_eq!(unclocked.started_at, 0);
}
