//! Worker thread loop.

use crate::entity::{EntityTable, ScratchBuffer};
use crate::id::ReadySignal;
use crate::queue::{CompleteQueue, ReadyQueue};
use crate::state::ErrorLatch;

/// Run one worker's invariant loop until it observes
/// [`ReadySignal::Shutdown`].
///
/// 1. Block on `ready.pop()`.
/// 2. On `Shutdown`, return.
/// 3. Otherwise invoke the bound kernel.
/// 4. Latch a non-zero status.
/// 5. Push the node id to `complete` unconditionally, even on failure --
///    the scheduler needs the completion event to keep the dependency
///    graph moving and to eventually drive shutdown.
pub fn run(
    ready: &ReadyQueue,
    complete: &CompleteQueue,
    entities: &EntityTable,
    scratch_const: &[u8],
    scratch_work: ScratchBuffer,
    error: &ErrorLatch,
) {
    loop {
        match ready.pop() {
            ReadySignal::Shutdown => return,
            ReadySignal::Dispatch(id) => {
                let entity = entities.get(id);
                // Safety: the upstream memory planner guarantees no two
                // concurrently-ready nodes are handed overlapping regions
                // of `scratch_work`.
                let status = (entity.kernel)(entity.inputs(), entity.outputs(), scratch_const, unsafe {
                    scratch_work.as_mut_slice()
                });

                if status != 0 {
                    error.set_if_absent(status);
                }

                complete.push(id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Entity, EntityConfig};
    use std::sync::atomic::{AtomicUsize, Ordering};

    static CALLS: AtomicUsize = AtomicUsize::new(0);

    extern "C" fn counting_kernel(
        _inputs: &[*const u8],
        _outputs: &[*mut u8],
        _scratch_const: &[u8],
        _scratch_work: &mut [u8],
    ) -> i32 {
        CALLS.fetch_add(1, Ordering::SeqCst);
        0
    }

    extern "C" fn failing_kernel(
        _inputs: &[*const u8],
        _outputs: &[*mut u8],
        _scratch_const: &[u8],
        _scratch_work: &mut [u8],
    ) -> i32 {
        42
    }

    #[test]
    fn dispatches_then_shuts_down() {
        CALLS.store(0, Ordering::SeqCst);
        let entities = EntityTable::new(vec![Entity::new(
            0,
            counting_kernel,
            &[],
            &[],
            EntityConfig::default(),
        )]);
        let ready = ReadyQueue::with_capacity(2);
        let complete = CompleteQueue::with_capacity(2);
        let error = ErrorLatch::new();
        let mut scratch = vec![0u8; 4];
        let scratch_buf = ScratchBuffer::new(&mut scratch);

        ready.push(ReadySignal::Dispatch(0));
        ready.push(ReadySignal::Shutdown);

        run(&ready, &complete, &entities, &[], scratch_buf, &error);

        assert_eq!(CALLS.load(Ordering::SeqCst), 1);
        assert_eq!(complete.pop(), 0);
        assert!(!error.is_set());
    }

    #[test]
    fn latches_kernel_failure_and_still_reports_completion() {
        let entities = EntityTable::new(vec![Entity::new(
            0,
            failing_kernel,
            &[],
            &[],
            EntityConfig::default(),
        )]);
        let ready = ReadyQueue::with_capacity(2);
        let complete = CompleteQueue::with_capacity(2);
        let error = ErrorLatch::new();
        let mut scratch = vec![0u8; 4];
        let scratch_buf = ScratchBuffer::new(&mut scratch);

        ready.push(ReadySignal::Dispatch(0));
        ready.push(ReadySignal::Shutdown);

        run(&ready, &complete, &entities, &[], scratch_buf, &error);

        assert_eq!(complete.pop(), 0, "completion is reported even on failure");
        assert_eq!(error.get(), 42);
    }
}
