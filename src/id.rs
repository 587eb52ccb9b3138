//! Node identifiers and the ready-queue signal type.
//!
//! The original C runtime this core is modeled on pushes a plain `i32`
//! onto the Ready queue and treats a negative value (conventionally
//! `-1`) as "worker, please exit" -- a fixed-width integer channel
//! shared by both the Ready and Complete paths. In Rust we can say the
//! same thing with a sum type instead of a magic number, so
//! [`ReadySignal`] carries the shutdown meaning in its own variant.

use std::fmt;

/// A node in `[0, N)`. Stored as `u32` since negative ids have no meaning
/// once the sentinel convention moves into [`ReadySignal::Shutdown`].
pub type NodeId = u32;

/// A message placed on the Ready queue.
///
/// `Dispatch` carries a real node id; `Shutdown` is what the scheduler
/// pushes `num_workers` times once every node has completed, replacing
/// the negative-id sentinel convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadySignal {
    /// Run the kernel bound to this node.
    Dispatch(NodeId),
    /// Exit the worker loop.
    Shutdown,
}

impl fmt::Display for ReadySignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadySignal::Dispatch(id) => write!(f, "dispatch({id})"),
            ReadySignal::Shutdown => write!(f, "shutdown"),
        }
    }
}
