//! Bounded MPMC signalling queues connecting the scheduler and workers.
//!
//! Thin typed wrappers over `crossbeam_channel::bounded`. A bounded
//! channel already gives FIFO ordering among non-concurrent sends,
//! blocking `recv`, and no lost wakeups, so there's nothing left for
//! this module to implement by hand -- it exists purely to give the
//! Ready/Complete queues their own names and a capacity sized for the
//! run.

use crossbeam_channel::{Receiver, Sender};

use crate::id::{NodeId, ReadySignal};

/// Margin added to `N` when sizing the Ready queue, so that pushing one
/// shutdown signal per worker at the end of a run can never block.
pub fn ready_queue_capacity(n: usize, num_workers: usize) -> usize {
    n + num_workers
}

/// The Ready queue: scheduler and driver push [`ReadySignal`]s, workers
/// pop them.
#[derive(Clone)]
pub struct ReadyQueue {
    tx: Sender<ReadySignal>,
    rx: Receiver<ReadySignal>,
}

impl ReadyQueue {
    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, rx) = crossbeam_channel::bounded(capacity.max(1));
        ReadyQueue { tx, rx }
    }

    /// Append a signal. Never blocks given the queue was sized per
    /// [`ready_queue_capacity`].
    pub fn push(&self, signal: ReadySignal) {
        self.tx
            .send(signal)
            .expect("ready queue sender dropped while a receiver is still live");
    }

    /// Block until a signal is available.
    pub fn pop(&self) -> ReadySignal {
        self.rx
            .recv()
            .expect("ready queue has no senders left but a worker is still polling")
    }

    /// Number of signals currently buffered. Exposed for quiescence
    /// assertions in tests, not used by the scheduler/worker loops
    /// themselves.
    pub fn len(&self) -> usize {
        self.rx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }
}

/// The Complete queue: workers push completed node ids, the scheduler
/// pops them.
#[derive(Clone)]
pub struct CompleteQueue {
    tx: Sender<NodeId>,
    rx: Receiver<NodeId>,
}

impl CompleteQueue {
    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, rx) = crossbeam_channel::bounded(capacity.max(1));
        CompleteQueue { tx, rx }
    }

    pub fn push(&self, id: NodeId) {
        self.tx
            .send(id)
            .expect("complete queue sender dropped while the scheduler is still live");
    }

    pub fn pop(&self) -> NodeId {
        self.rx
            .recv()
            .expect("complete queue has no senders left but the scheduler is still polling")
    }

    /// Number of ids currently buffered. Exposed for quiescence
    /// assertions in tests.
    pub fn len(&self) -> usize {
        self.rx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }
}
