//! Lattice for the Viterbi search.
//!
//! Nodes are stored in an arena and addressed by index; `ends[p]` lists the
//! nodes whose surface ends at byte position `p`. Each node remembers the
//! predecessor giving the lowest cost from BOS, so the best path is read by
//! walking predecessors back from EOS.

use std::cmp::Reverse;

use crate::dictionary::{BOS_EOS_CONNECTION_ID, Candidate, Dictionary, WordId};

const BOS_IDX: usize = 0;

/// A candidate placed in the lattice.
#[derive(Debug, Clone)]
pub struct Node {
    pub start: usize,
    pub candidate: Candidate,
    /// Lowest cost from BOS up to and including this node.
    pub total_cost: i64,
    /// Arena index of the best predecessor.
    pub prev: usize,
}

impl Node {
    #[inline(always)]
    pub fn end(&self) -> usize {
        self.start + self.candidate.length
    }
}

/// Arena-indexed lattice over byte positions `0..=len`.
pub struct Lattice {
    nodes: Vec<Node>,
    ends: Vec<Vec<usize>>,
}

impl Lattice {
    pub fn new(len: usize) -> Self {
        let bos = Node {
            start: 0,
            candidate: Candidate {
                word_id: WordId::UNKNOWN,
                length: 0,
                left_id: BOS_EOS_CONNECTION_ID,
                right_id: BOS_EOS_CONNECTION_ID,
                cost: 0,
                details: Vec::new().into(),
            },
            total_cost: 0,
            prev: BOS_IDX,
        };

        let mut ends = vec![Vec::new(); len + 1];
        ends[0].push(BOS_IDX);

        Self {
            nodes: vec![bos],
            ends,
        }
    }

    /// Whether some node ends at `position`, i.e. a path from BOS reaches it.
    #[inline(always)]
    pub fn is_reachable(&self, position: usize) -> bool {
        self.ends.get(position).is_some_and(|ends| !ends.is_empty())
    }

    /// Place a candidate starting at a reachable position.
    pub fn insert<D>(&mut self, start: usize, candidate: Candidate, dictionary: &D)
    where
        D: Dictionary + ?Sized,
    {
        debug_assert!(self.is_reachable(start));
        debug_assert!(candidate.length > 0);

        let (prev, cost) = self.best_predecessor(start, candidate.left_id, dictionary);
        let end = start + candidate.length;
        let total_cost = cost + i64::from(candidate.cost);

        self.nodes.push(Node {
            start,
            candidate,
            total_cost,
            prev,
        });
        self.ends[end].push(self.nodes.len() - 1);
    }

    /// Best path from BOS to EOS, as arena indices in text order (BOS and EOS excluded).
    pub fn best_path<D>(&self, dictionary: &D) -> Vec<usize>
    where
        D: Dictionary + ?Sized,
    {
        let len = self.ends.len() - 1;
        if len == 0 || !self.is_reachable(len) {
            return Vec::new();
        }

        let (mut idx, _) = self.best_predecessor(len, BOS_EOS_CONNECTION_ID, dictionary);
        let mut path = Vec::new();
        while idx != BOS_IDX {
            path.push(idx);
            idx = self.nodes[idx].prev;
        }
        path.reverse();
        path
    }

    pub fn node(&self, idx: usize) -> &Node {
        &self.nodes[idx]
    }

    /// Choose the node ending at `position` with the lowest cost into `left_id`.
    ///
    /// Equal costs resolve to the lower emission cost, then the longer
    /// surface, then the earlier inserted node.
    fn best_predecessor<D>(&self, position: usize, left_id: u16, dictionary: &D) -> (usize, i64)
    where
        D: Dictionary + ?Sized,
    {
        self.ends[position]
            .iter()
            .map(|&idx| {
                let node = &self.nodes[idx];
                let cost = node.total_cost
                    + i64::from(dictionary.connection_cost(node.candidate.right_id, left_id));
                (
                    (
                        cost,
                        node.candidate.cost,
                        Reverse(node.candidate.length),
                        idx,
                    ),
                    idx,
                    cost,
                )
            })
            .min_by(|a, b| a.0.cmp(&b.0))
            .map(|(_, idx, cost)| (idx, cost))
            .unwrap_or((BOS_IDX, i64::MAX / 2))
    }
}
