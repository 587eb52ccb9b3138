//! `dagrt` -- the scheduler / worker coordination core of a data-flow
//! execution engine.
//!
//! This crate drives a precomputed DAG of compute kernels (the operators
//! of a compiled inference graph) to completion on a pool of worker
//! threads. It owns the concurrency correctness (no lost wakeups, no
//! deadlocks, no double dispatch, no early termination) and the ordering
//! guarantee that a node runs only after every predecessor has
//! observably completed.
//!
//! Deliberately out of scope, treated as inputs supplied by the caller:
//! the kernels themselves, generation of the DAG tables, the top-level
//! inference entry point and I/O marshalling, and memory planning for
//! the scratch workspaces.
//!
//! ## Modules
//!
//! - [`graph`]: the static graph description and its construction-time
//!   preconditions.
//! - [`entity`]: the kernel ABI and per-node buffer bindings.
//! - [`queue`]: the bounded Ready/Complete signalling queues.
//! - [`state`]: the shared error latch.
//! - [`worker`]: the worker thread loop.
//! - [`scheduler`]: the scheduler thread loop.
//! - [`driver`]: the runtime driver, tying scheduler + workers together,
//!   and the serial fallback used when no workers are configured.
//! - [`config`]: the environment-variable-driven policy that picks
//!   between the serial and parallel paths.
//! - [`error`]: the error taxonomy returned by [`driver::run`].
//! - [`id`]: node identifiers and the Ready-queue signal type.

pub mod config;
pub mod driver;
pub mod entity;
pub mod error;
pub mod graph;
pub mod id;
pub mod queue;
pub mod scheduler;
pub mod state;
pub mod worker;

pub use config::RuntimeMode;
pub use entity::{DeviceKind, Entity, EntityConfig, EntityTable, KernelFn, ScratchBuffer};
pub use error::CoreError;
pub use graph::StaticGraph;
pub use id::{NodeId, ReadySignal};

/// Run a graph to completion, resolving the execution mode from the
/// process environment.
///
/// This is the crate's single external entry point: it seeds the Ready
/// queue, spawns the scheduler and worker threads (or runs the serial
/// fallback if `TVMRT_NUM_WORKERS` resolves to zero), joins everything,
/// and returns the first non-zero kernel status encountered, or `0`.
pub fn run(
    graph: &StaticGraph,
    entities: &EntityTable,
    scratch_const: &[u8],
    scratch_work: ScratchBuffer,
) -> Result<i32, CoreError> {
    let mode = config::resolve_from_env();
    driver::run(graph, entities, scratch_const, scratch_work, mode)
}
