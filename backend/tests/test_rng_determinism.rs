//! RNG Determinism Tests
//!
//! The generator's bit-level transform is a cross-implementation contract:
//! the reference values below come from an independent mulberry32
//! implementation and must never change.

use collection_sim_core::rng::{derive_seed, Prng, Stream};
use proptest::prelude::*;

#[test]
fn test_reference_sequence_seed_42() {
    let mut rng = Prng::new(42);
    let raw: Vec<u32> = (0..5).map(|_| rng.next_u32()).collect();
    assert_eq!(
        raw,
        vec![2_581_720_956, 1_925_393_290, 3_661_312_704, 2_876_485_805, 750_819_978]
    );
}

#[test]
fn test_reference_floats_seed_42() {
    let mut rng = Prng::new(42);
    assert_eq!(rng.next(), 0.6011037519201636);
    assert_eq!(rng.next(), 0.44829055899754167);
    assert_eq!(rng.next(), 0.8524657934904099);
}

#[test]
fn test_reference_derived_seeds() {
    assert_eq!(derive_seed(42, 3, Stream::Loans, 0), 1_598_924_606);
    assert_eq!(derive_seed(42, 3, Stream::Lots, 7), 3_785_783_386);
    assert_eq!(derive_seed(42, 0, Stream::Lots, 0), 42);
}

#[test]
fn test_state_exposed_for_replay() {
    let mut a = Prng::new(9);
    a.next_u32();
    let mut b = Prng::new(a.state());
    assert_eq!(a.next_u32(), b.next_u32());
}

#[test]
fn test_weeks_draw_differently() {
    let mut week1 = Prng::for_week(42, 1, Stream::Lots);
    let mut week2 = Prng::for_week(42, 2, Stream::Lots);
    assert_ne!(week1.next_u32(), week2.next_u32());
}

proptest! {
    #[test]
    fn prop_same_seed_same_sequence(seed in any::<u32>()) {
        let mut a = Prng::new(seed);
        let mut b = Prng::new(seed);
        for _ in 0..32 {
            prop_assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn prop_uniform_int_inclusive_range(seed in any::<u32>(), min in -1_000i64..1_000, span in 0i64..1_000) {
        let mut rng = Prng::new(seed);
        let max = min + span;
        for _ in 0..16 {
            let v = rng.uniform_int(min, max);
            prop_assert!(v >= min && v <= max);
        }
    }

    #[test]
    fn prop_normal_clamped_within_bounds(seed in any::<u32>()) {
        let mut rng = Prng::new(seed);
        for _ in 0..16 {
            let v = rng.normal_clamped(1.0, 0.5, 0.6, 1.5);
            prop_assert!((0.6..=1.5).contains(&v));
        }
    }

    #[test]
    fn prop_pick_without_replacement(seed in any::<u32>(), n in 0usize..15) {
        let mut rng = Prng::new(seed);
        let items: Vec<u32> = (0..12).collect();
        let picked = rng.pick(&items, n);
        prop_assert_eq!(picked.len(), n.min(12));
        let unique: std::collections::HashSet<_> = picked.iter().collect();
        prop_assert_eq!(unique.len(), picked.len());
    }
}
