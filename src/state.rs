//! Dynamic run state shared across threads: the `error` latch.
//! `current_indegree` and `completed_ops` are *not* modeled here --
//! since only the scheduler thread ever touches them, the simplest and
//! fastest correct choice is plain, unsynchronized ownership by that one
//! thread, which is exactly how [`crate::scheduler::run`] holds them (a
//! local `Vec<i32>` and a local counter, not fields here).

use std::sync::atomic::{AtomicI32, Ordering};

/// The latched kernel-failure status.
///
/// Workers write on kernel failure, the scheduler and (post-join) the
/// driver read it. Last-writer-wins would be an acceptable choice too --
/// the caller only needs *some* non-zero status if any kernel failed --
/// but this implementation keeps the *first* non-zero status via a
/// compare-and-swap from the sentinel `0`, which is strictly more
/// informative for a caller debugging a graph with more than one failing
/// kernel and costs no extra synchronization.
#[derive(Debug, Default)]
pub struct ErrorLatch {
    code: AtomicI32,
}

impl ErrorLatch {
    pub fn new() -> Self {
        ErrorLatch {
            code: AtomicI32::new(0),
        }
    }

    /// Record a non-zero status if none has been recorded yet. A `code`
    /// of `0` is a no-op (there is nothing to latch).
    pub fn set_if_absent(&self, code: i32) {
        if code == 0 {
            return;
        }
        let _ = self
            .code
            .compare_exchange(0, code, Ordering::AcqRel, Ordering::Acquire);
    }

    /// The latched status, or `0` if no kernel has failed yet.
    pub fn get(&self) -> i32 {
        self.code.load(Ordering::Acquire)
    }

    pub fn is_set(&self) -> bool {
        self.get() != 0
    }
}
