//! Runtime driver and the serial fallback used when no workers are
//! configured.

use crossbeam_utils::thread as cb_thread;

use crate::config::RuntimeMode;
use crate::entity::{EntityTable, ScratchBuffer};
use crate::error::CoreError;
use crate::graph::StaticGraph;
use crate::id::ReadySignal;
use crate::queue::{ready_queue_capacity, CompleteQueue, ReadyQueue};
use crate::state::ErrorLatch;
use crate::{scheduler, worker};

/// Run the graph to completion under the given [`RuntimeMode`].
///
/// Returns the first non-zero kernel status observed, or `0` if every
/// kernel succeeded.
pub fn run(
    graph: &StaticGraph,
    entities: &EntityTable,
    scratch_const: &[u8],
    scratch_work: ScratchBuffer,
    mode: RuntimeMode,
) -> Result<i32, CoreError> {
    match mode {
        RuntimeMode::Serial => Ok(run_serial(entities, scratch_const, scratch_work)),
        RuntimeMode::Parallel(num_workers) => {
            run_parallel(graph, entities, scratch_const, scratch_work, num_workers)
        }
    }
}

/// Serial fallback: invoke every kernel in ascending node id order,
/// stopping at the first non-zero status. Valid because node ids are
/// already in topological order, which callers are required to
/// guarantee when constructing the graph.
fn run_serial(entities: &EntityTable, scratch_const: &[u8], scratch_work: ScratchBuffer) -> i32 {
    for id in 0..entities.len() as u32 {
        let entity = entities.get(id);
        // Safety: the serial path never runs two kernels concurrently,
        // so the non-overlap contract required of `scratch_work` is
        // trivially satisfied.
        let status = (entity.kernel)(entity.inputs(), entity.outputs(), scratch_const, unsafe {
            scratch_work.as_mut_slice()
        });
        if status != 0 {
            return status;
        }
    }
    0
}

/// Parallel path: seed the Ready queue with every node whose initial
/// predecessor count is zero, then spawn one scheduler
/// thread and `num_workers` worker threads and join them.
///
/// Uses a scoped thread spawn (mirroring the donor's own
/// `Scheduler::run()` in `snow-rt/src/actor/scheduler.rs`, which wraps
/// `crossbeam_utils::thread::scope`) so `graph`, `entities`, and
/// `scratch_const` can be shared as plain borrows instead of `Arc`-wrapped
/// -- the scope guarantees every spawned thread finishes before `run`
/// returns.
fn run_parallel(
    graph: &StaticGraph,
    entities: &EntityTable,
    scratch_const: &[u8],
    scratch_work: ScratchBuffer,
    num_workers: usize,
) -> Result<i32, CoreError> {
    let n = graph.node_count();
    let ready = ReadyQueue::with_capacity(ready_queue_capacity(n, num_workers));
    let complete = CompleteQueue::with_capacity(n.max(1));
    let error = ErrorLatch::new();

    for v in graph.initial_ready_set() {
        ready.push(ReadySignal::Dispatch(v));
    }

    let scope_result = cb_thread::scope(|scope| {
        for _ in 0..num_workers {
            let ready = ready.clone();
            let complete = complete.clone();
            let error = &error;
            scope.spawn(move |_| {
                worker::run(&ready, &complete, entities, scratch_const, scratch_work, error);
            });
        }

        scheduler::run(graph, &ready, &complete, num_workers, &error)
    });

    scope_result.map_err(|_| CoreError::ResourceAllocation("worker/scheduler thread panicked".into()))
}
