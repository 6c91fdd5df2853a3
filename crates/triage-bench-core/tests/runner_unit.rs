// crates/triage-bench-core/tests/runner_unit.rs
// ============================================================================
// Module: Runner Unit Tests
// Description: Index fidelity, concurrency ceiling, and lane isolation.
// Purpose: Ensure the pull-based lane pool preserves result correspondence.
// ============================================================================

//! Runner tests for the concurrency-bounded lane pool.

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

use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::time::Duration;

use triage_bench_core::run_pool;
use triage_bench_core::runner::DEFAULT_LANES;

#[tokio::test(flavor = "multi_thread")]
async fn results_correspond_to_inputs_regardless_of_completion_order() {
    let items: Vec<usize> = (0..25).collect();
    let results = run_pool(items, 4, |index, item: usize| async move {
        // Stagger completions so later indices often finish first.
        let stagger = u64::try_from((25 - index) % 5).unwrap();
        tokio::time::sleep(Duration::from_millis(stagger * 3)).await;
        item * 2
    })
    .await;

    assert_eq!(results.len(), 25);
    for (index, slot) in results.iter().enumerate() {
        assert_eq!(*slot, Some(index * 2));
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn concurrency_never_exceeds_lane_count() {
    let lanes = 3;
    let in_flight = Arc::new(AtomicUsize::new(0));
    let peak = Arc::new(AtomicUsize::new(0));
    let observed_in_flight = Arc::clone(&in_flight);
    let observed_peak = Arc::clone(&peak);

    let items: Vec<usize> = (0..20).collect();
    let results = run_pool(items, lanes, move |_, item: usize| {
        let in_flight = Arc::clone(&observed_in_flight);
        let peak = Arc::clone(&observed_peak);
        async move {
            let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(10)).await;
            in_flight.fetch_sub(1, Ordering::SeqCst);
            item
        }
    })
    .await;

    assert_eq!(results.len(), 20);
    assert!(peak.load(Ordering::SeqCst) <= lanes);
    assert!(peak.load(Ordering::SeqCst) >= 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn panicking_task_only_loses_its_own_slot() {
    let items: Vec<usize> = (0..10).collect();
    let results = run_pool(items, 3, |index, item: usize| async move {
        tokio::time::sleep(Duration::from_millis(1)).await;
        assert!(index != 4, "task 4 fails");
        item + 100
    })
    .await;

    assert_eq!(results.len(), 10);
    for (index, slot) in results.iter().enumerate() {
        if index == 4 {
            assert!(slot.is_none());
        } else {
            assert_eq!(*slot, Some(index + 100));
        }
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn empty_input_yields_empty_results() {
    let results = run_pool(Vec::<usize>::new(), DEFAULT_LANES, |_, item: usize| async move { item })
        .await;
    assert!(results.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn lane_count_larger_than_input_still_completes() {
    let items: Vec<usize> = (0..3).collect();
    let results = run_pool(items, 64, |_, item: usize| async move { item + 1 }).await;
    assert_eq!(results, vec![Some(1), Some(2), Some(3)]);
}

#[tokio::test(flavor = "multi_thread")]
async fn fast_lanes_absorb_extra_work() {
    // One slow item and many fast items: with two lanes the fast lane must
    // pull more than half of the queue while the slow task is in flight.
    let processed = Arc::new(AtomicUsize::new(0));
    let counted = Arc::clone(&processed);
    let items: Vec<usize> = (0..12).collect();
    let results = run_pool(items, 2, move |index, item: usize| {
        let processed = Arc::clone(&counted);
        async move {
            if index == 0 {
                tokio::time::sleep(Duration::from_millis(50)).await;
            }
            processed.fetch_add(1, Ordering::SeqCst);
            item
        }
    })
    .await;

    assert_eq!(processed.load(Ordering::SeqCst), 12);
    assert_eq!(results.len(), 12);
    assert!(results.iter().all(Option::is_some));
}
