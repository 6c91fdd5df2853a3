// crates/triage-bench-core/tests/proptest_runner.rs
// ============================================================================
// Module: Runner Property-Based Tests
// Description: Index fidelity across arbitrary sizes and lane counts.
// Purpose: Detect claim collisions and dropped slots across wide inputs.
// ============================================================================

//! Property-based tests for runner index fidelity.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use proptest::prelude::*;
use triage_bench_core::run_pool;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn every_slot_holds_its_own_task_output(
        total in 0usize .. 40,
        lanes in 1usize .. 16,
        offset in 0usize .. 1000,
    ) {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .unwrap();
        let items: Vec<usize> = (0 .. total).map(|index| index + offset).collect();
        let results = runtime.block_on(run_pool(items, lanes, |_, item: usize| async move {
            tokio::task::yield_now().await;
            item * 3
        }));

        prop_assert_eq!(results.len(), total);
        for (index, slot) in results.iter().enumerate() {
            prop_assert_eq!(*slot, Some((index + offset) * 3));
        }
    }
}
