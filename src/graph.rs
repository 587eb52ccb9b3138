//! Static graph description and its construction-time preconditions.
//!
//! The shape mirrors the generator's C ABI directly: `successors[v]` may
//! be over-allocated (the generator's placeholder convention for terminal
//! nodes is a one-element array containing `{-1}`), so a node's real
//! successor list is `successors[v][..successor_count[v]]`. The core
//! never reads past `successor_count[v]`.

use crate::error::CoreError;
use crate::id::NodeId;

/// Immutable, shared-read-only graph description for one run.
#[derive(Debug, Clone)]
pub struct StaticGraph {
    n: usize,
    initial_indegree: Vec<i32>,
    /// `successors[v]` truncated to its first `successor_count[v]` entries.
    successors: Vec<Vec<NodeId>>,
}

impl StaticGraph {
    /// Validate and build a graph description.
    ///
    /// Checks two construction-time preconditions:
    /// - the initial ready set (`initial_indegree[v] == 0`) is non-empty
    ///   whenever `N > 0`;
    /// - `successor_count[v]` never exceeds the stored successor array's
    ///   length for any `v`.
    ///
    /// Edge-consistency and acyclicity are assumed preconditions on the
    /// input and are not re-derived here; a cautious caller may
    /// additionally run [`StaticGraph::assert_topologically_ordered`].
    pub fn new(
        initial_indegree: Vec<i32>,
        successors: Vec<Vec<NodeId>>,
        successor_count: Vec<i32>,
    ) -> Result<Self, CoreError> {
        let n = initial_indegree.len();
        if successors.len() != n || successor_count.len() != n {
            return Err(CoreError::GraphPrecondition(format!(
                "table length mismatch: indegree={}, successors={}, successor_count={}",
                n,
                successors.len(),
                successor_count.len()
            )));
        }

        let mut truncated = Vec::with_capacity(n);
        for (v, (list, &count)) in successors.into_iter().zip(&successor_count).enumerate() {
            let count = count as usize;
            if count > list.len() {
                return Err(CoreError::GraphPrecondition(format!(
                    "node {v}: successor_count {count} exceeds stored list length {}",
                    list.len()
                )));
            }
            let mut list = list;
            list.truncate(count);
            truncated.push(list);
        }

        if n > 0 && !initial_indegree.iter().any(|&d| d == 0) {
            return Err(CoreError::GraphPrecondition(
                "initial ready set is empty despite N > 0".into(),
            ));
        }

        Ok(StaticGraph {
            n,
            initial_indegree,
            successors: truncated,
        })
    }

    /// Total node count.
    pub fn node_count(&self) -> usize {
        self.n
    }

    /// The initial predecessor count of every node.
    pub fn initial_indegree(&self) -> &[i32] {
        &self.initial_indegree
    }

    /// The successor list of node `v`, already truncated to its real
    /// length.
    pub fn successors(&self, v: NodeId) -> &[NodeId] {
        &self.successors[v as usize]
    }

    /// Ids of every node with zero initial predecessors, in ascending
    /// order, so seeding the Ready queue is deterministic across runs.
    pub fn initial_ready_set(&self) -> Vec<NodeId> {
        self.initial_indegree
            .iter()
            .enumerate()
            .filter(|&(_, &d)| d == 0)
            .map(|(v, _)| v as NodeId)
            .collect()
    }

    /// Optional construction-time check that node ids already appear in
    /// topological order -- the precondition the serial fallback relies
    /// on. Not run by [`StaticGraph::new`] automatically -- call it
    /// explicitly, e.g. from a test or a cautious caller, since it costs
    /// O(V+E) and the upstream generator is trusted to provide it.
    pub fn assert_topologically_ordered(&self) {
        for u in 0..self.n {
            for &w in self.successors(u as NodeId) {
                assert!(
                    (w as usize) > u,
                    "node {u} has successor {w} that does not come later in id order"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_chain_accepts() {
        let g = StaticGraph::new(
            vec![0, 1, 1, 1],
            vec![vec![1], vec![2], vec![3], vec![]],
            vec![1, 1, 1, 0],
        )
        .unwrap();
        assert_eq!(g.node_count(), 4);
        assert_eq!(g.initial_ready_set(), vec![0]);
        assert_eq!(g.successors(0), &[1]);
        assert_eq!(g.successors(3), &[] as &[NodeId]);
        g.assert_topologically_ordered();
    }

    #[test]
    fn rejects_empty_ready_set() {
        let err = StaticGraph::new(vec![1, 1], vec![vec![], vec![]], vec![0, 0]).unwrap_err();
        assert!(matches!(err, CoreError::GraphPrecondition(_)));
    }

    #[test]
    fn rejects_successor_count_overrun() {
        let err = StaticGraph::new(vec![0, 1], vec![vec![1], vec![]], vec![5, 0]).unwrap_err();
        assert!(matches!(err, CoreError::GraphPrecondition(_)));
    }

    #[test]
    fn terminal_placeholder_is_truncated_away() {
        // Generator convention: terminal nodes store a one-element {-1}
        // placeholder array but successor_count is 0, so it must never
        // be read.
        let g = StaticGraph::new(vec![0], vec![vec![NodeId::MAX]], vec![0]).unwrap();
        assert!(g.successors(0).is_empty());
    }

    #[test]
    fn diamond_ready_set() {
        let g = StaticGraph::new(
            vec![0, 1, 1, 2],
            vec![vec![1, 2], vec![3], vec![3], vec![]],
            vec![2, 1, 1, 0],
        )
        .unwrap();
        assert_eq!(g.initial_ready_set(), vec![0]);
    }
}
