//! Scheduler thread loop.

use crate::graph::StaticGraph;
use crate::id::ReadySignal;
use crate::queue::{CompleteQueue, ReadyQueue};
use crate::state::ErrorLatch;

/// Drain the Complete queue, propagate dependencies back onto the Ready
/// queue, and shut every worker down once the graph is finished or a
/// kernel has failed.
///
/// `current_indegree` and the completed-node counter are owned
/// exclusively by this function's call stack: since only the scheduler
/// thread ever mutates them, plain, unsynchronized local state already
/// satisfies the invariant that a node is enqueued to Ready exactly
/// once, exactly by the decrement that drove its counter to zero.
///
/// Returns the latched error code (0 on full success) so the driver can
/// read it straight from this thread's join result instead of a second
/// shared read.
pub fn run(
    graph: &StaticGraph,
    ready: &ReadyQueue,
    complete: &CompleteQueue,
    num_workers: usize,
    error: &ErrorLatch,
) -> i32 {
    let n = graph.node_count();
    let mut current_indegree: Vec<i32> = graph.initial_indegree().to_vec();
    let mut completed_ops = 0usize;

    while completed_ops < n && !error.is_set() {
        let u = complete.pop();
        completed_ops += 1;

        for &w in graph.successors(u) {
            let idx = w as usize;
            current_indegree[idx] -= 1;
            debug_assert!(
                current_indegree[idx] >= 0,
                "current_indegree for node {w} went negative"
            );
            if current_indegree[idx] == 0 {
                ready.push(ReadySignal::Dispatch(w));
            }
        }
    }

    for _ in 0..num_workers {
        ready.push(ReadySignal::Shutdown);
    }

    error.get()
}
