//! Error taxonomy for the core.
//!
//! Three kinds: a kernel reporting failure, a malformed static graph
//! discovered at construction time, and a resource allocation failure
//! (thread spawn). None of these are raised as panics -- the driver
//! returns them to its caller, same as the donor's hand-rolled error
//! enums (`mesh-common::error::LexError`, `snow-typeck::error`) which
//! favor a `Kind` enum + manual `Display` over `thiserror`.

use std::fmt;

/// Errors the core can report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A kernel returned a non-zero status code. Carries the first
    /// non-zero status observed.
    KernelFailure(i32),
    /// The static graph description violates a construction-time
    /// precondition: an empty initial ready set despite `N > 0`, or a
    /// `successor_count` that exceeds the stored successor list length.
    GraphPrecondition(String),
    /// Spawning the scheduler or worker threads failed.
    ResourceAllocation(String),
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::KernelFailure(code) => {
                write!(f, "kernel reported non-zero status: {code}")
            }
            CoreError::GraphPrecondition(msg) => {
                write!(f, "graph precondition violated: {msg}")
            }
            CoreError::ResourceAllocation(msg) => {
                write!(f, "resource allocation failed: {msg}")
            }
        }
    }
}

impl std::error::Error for CoreError {}
