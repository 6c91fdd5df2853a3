// crates/triage-bench-core/src/runner.rs
// ============================================================================
// Module: Concurrency-Bounded Task Runner
// Description: Pull-based lane pool with index-faithful result placement.
// Purpose: Execute per-case work with a fixed concurrency ceiling.
// Dependencies: std::sync, tokio
// ============================================================================

//! ## Overview
//! The runner executes one asynchronous task per input item with at most a
//! fixed number of lanes in flight. Scheduling is pull-based: lanes claim the
//! next unclaimed index from a shared atomic cursor, so lanes that finish
//! fast tasks absorb more work. Each result is stored at its claimed index
//! immediately on completion, which keeps results index-faithful regardless
//! of completion order and confines a lane panic to the slot that was in
//! flight. Surviving lanes keep draining the cursor, so one failure never
//! aborts siblings or the run.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::future::Future;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::PoisonError;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use tokio::task::JoinSet;

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// Default number of concurrent lanes.
pub const DEFAULT_LANES: usize = 10;

// ============================================================================
// SECTION: Runner
// ============================================================================

/// Executes one task per item with at most `lanes` running concurrently.
///
/// Returns a vector of the same length as `items` where index `i` holds the
/// output of the task for `items[i]`. A slot is `None` only when its lane
/// aborted (panicked) while that index was in flight; the normative harness
/// task body catches its own failures, so callers treat `None` as an aborted
/// task.
pub async fn run_pool<T, R, F, Fut>(items: Vec<T>, lanes: usize, task: F) -> Vec<Option<R>>
where
    T: Clone + Send + Sync + 'static,
    R: Send + 'static,
    F: Fn(usize, T) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
{
    let total = items.len();
    if total == 0 {
        return Vec::new();
    }
    let slots: Arc<Vec<Mutex<Option<R>>>> =
        Arc::new((0..total).map(|_| Mutex::new(None)).collect());
    let items = Arc::new(items);
    let task = Arc::new(task);
    let cursor = Arc::new(AtomicUsize::new(0));
    let lane_count = lanes.clamp(1, total);

    let mut pool = JoinSet::new();
    for _ in 0..lane_count {
        let slots = Arc::clone(&slots);
        let items = Arc::clone(&items);
        let task = Arc::clone(&task);
        let cursor = Arc::clone(&cursor);
        pool.spawn(async move {
            loop {
                // fetch_add guarantees no two lanes claim the same index.
                let index = cursor.fetch_add(1, Ordering::SeqCst);
                if index >= items.len() {
                    break;
                }
                let item = items[index].clone();
                let output = task(index, item).await;
                if let Ok(mut slot) = slots[index].lock() {
                    *slot = Some(output);
                }
            }
        });
    }
    // Completion is the join of all lanes; lane panics surface here as
    // join errors and are confined to the in-flight slot.
    while pool.join_next().await.is_some() {}

    match Arc::try_unwrap(slots) {
        Ok(slots) => slots
            .into_iter()
            .map(|slot| slot.into_inner().unwrap_or_else(PoisonError::into_inner))
            .collect(),
        Err(shared) => shared
            .iter()
            .map(|slot| slot.lock().map_or(None, |mut guard| guard.take()))
            .collect(),
    }
}
