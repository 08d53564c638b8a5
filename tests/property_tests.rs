//! Property-based tests for chunking, conservation and purity.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated inputs.

mod common;

use common::*;
use proptest::prelude::*;
use stepgen::compound::{compile_step, split_volume, ChangeTip, StepArgs, TransferArgs};
use stepgen::core::{Composition, RobotState};

const TOLERANCE: f64 = 1e-6;

prop_compose! {
    fn chunk_inputs()(capacity in 10u32..1000)(
        capacity in Just(capacity),
        total in 1u32..10_000,
        min_volume in 0..=capacity / 2,
    ) -> (f64, f64, f64) {
        (total as f64, capacity as f64, min_volume as f64)
    }
}

fn arbitrary_policy() -> impl Strategy<Value = ChangeTip> {
    prop_oneof![
        Just(ChangeTip::Always),
        Just(ChangeTip::Once),
        Just(ChangeTip::Never),
    ]
}

fn transfer_step(volume: f64, change_tip: ChangeTip, pairs: usize) -> StepArgs {
    let sources = vec!["A1".to_string(); pairs];
    let dests: Vec<String> = ["B1", "B2", "B3", "B4"][..pairs]
        .iter()
        .map(|well| well.to_string())
        .collect();
    StepArgs::Transfer(TransferArgs {
        change_tip,
        ..TransferArgs::new(PIPETTE, SOURCE, sources, DEST, dests, volume)
    })
}

fn liquid_total(state: &RobotState) -> f64 {
    let wells: f64 = ["A1"]
        .iter()
        .map(|well| state.well_volume(SOURCE, well))
        .chain(["B1", "B2", "B3", "B4"].iter().map(|well| state.well_volume(DEST, well)))
        .sum();
    wells + state.tip_volume(PIPETTE, 0)
}

proptest! {
    #[test]
    fn chunk_count_follows_ceiling((total, capacity, min_volume) in chunk_inputs()) {
        let chunks = split_volume(total, capacity, min_volume);

        prop_assert_eq!(chunks.len(), (total / capacity).ceil() as usize);
    }

    #[test]
    fn chunks_sum_to_total_within_capacity((total, capacity, min_volume) in chunk_inputs()) {
        let chunks = split_volume(total, capacity, min_volume);

        let sum: f64 = chunks.iter().sum();
        prop_assert!((sum - total).abs() < TOLERANCE);
        prop_assert!(chunks.iter().all(|&chunk| chunk <= capacity + TOLERANCE));
    }

    #[test]
    fn only_the_last_two_chunks_deviate((total, capacity, min_volume) in chunk_inputs()) {
        let chunks = split_volume(total, capacity, min_volume);
        let n = chunks.len();
        let naive_last = total - capacity * (n - 1) as f64;

        if n > 1 && naive_last < min_volume {
            prop_assert!(chunks[..n - 2].iter().all(|&chunk| chunk == capacity));
            prop_assert_eq!(chunks[n - 2], chunks[n - 1]);
            let merged = chunks[n - 2] + chunks[n - 1];
            prop_assert!((merged - (capacity + naive_last)).abs() < TOLERANCE);
        } else {
            prop_assert!(chunks[..n - 1].iter().all(|&chunk| chunk == capacity));
            prop_assert!((chunks[n - 1] - naive_last).abs() < TOLERANCE);
        }
    }

    #[test]
    fn split_conserves_each_ingredient(
        a in 1u32..1000,
        b in 0u32..1000,
        fraction in 0.0f64..=1.0,
    ) {
        let contents = Composition::new()
            .with_ingredient("a", a as f64)
            .with_ingredient("b", b as f64);
        let volume = contents.total_volume() * fraction;

        let (remaining, taken) = contents.split(volume);

        prop_assert!((taken.total_volume() - volume).abs() < TOLERANCE);
        for ingredient in ["a", "b"] {
            let sum = remaining.volume_of(ingredient) + taken.volume_of(ingredient);
            prop_assert!((sum - contents.volume_of(ingredient)).abs() < TOLERANCE);
        }
    }

    #[test]
    fn transfer_conserves_liquid(
        volume in 1u32..400,
        pairs in 1usize..=4,
        policy in arbitrary_policy(),
    ) {
        let state = stocked_with_tip(2000.0);

        let result = compile_step(&transfer_step(volume as f64, policy, pairs)).run(&state);

        prop_assert!(result.is_success(), "{:?}", result.errors);
        prop_assert!((liquid_total(&result.robot_state) - 2000.0).abs() < TOLERANCE);
        let first_dest = result.robot_state.well_volume(DEST, "B1");
        prop_assert!((first_dest - volume as f64).abs() < TOLERANCE);
    }

    #[test]
    fn compilation_is_deterministic(
        volume in 1u32..800,
        policy in arbitrary_policy(),
    ) {
        let state = stocked_with_tip(1000.0);
        let step = transfer_step(volume as f64, policy, 1);

        let first = compile_step(&step).run(&state);
        let second = compile_step(&step).run(&state);

        prop_assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
        prop_assert_eq!(first, second);
    }

    #[test]
    fn running_never_mutates_the_input(
        volume in 1u32..3000,
        policy in arbitrary_policy(),
    ) {
        let state = stocked(500.0);
        let snapshot = state.clone();

        let _ = compile_step(&transfer_step(volume as f64, policy, 2)).run(&state);

        prop_assert_eq!(state, snapshot);
    }

    #[test]
    fn failed_precondition_returns_one_error_and_same_state(
        volume in 1u32..300,
        policy in arbitrary_policy(),
    ) {
        let state = stocked(500.0);
        let step = StepArgs::Transfer(TransferArgs {
            change_tip: policy,
            ..TransferArgs::new(
                "missing",
                SOURCE,
                wells(&["A1"]),
                DEST,
                wells(&["B1"]),
                volume as f64,
            )
        });

        let result = compile_step(&step).run(&state);

        prop_assert_eq!(result.errors.len(), 1);
        prop_assert!(result.commands.is_empty());
        prop_assert_eq!(result.robot_state, state);
    }
}
