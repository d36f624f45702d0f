//! Interface to external ring (cycle) enumeration collaborators.
//!
//! The engine never perceives rings itself. A collaborator walks a graph and
//! feeds closed node sequences to a [`RingReporter`]; downstream logic treats
//! the sequences as opaque index lists.

use crate::LabeledGraph;

/// Consumer of closed node sequences produced by a ring enumerator.
pub trait RingReporter {
    /// Receives one ring. `ring` is closed: its first and last entries are equal.
    fn report_ring(&mut self, graph: &dyn LabeledGraph, ring: &[usize]);
}

/// Collects reported rings, discarding sequences that are not closed or
/// reference nodes outside the graph.
#[derive(Debug, Clone, Default)]
pub struct RingStore {
    rings: Vec<Vec<usize>>,
    rejected: usize,
}

impl RingStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the accepted rings in report order.
    pub fn rings(&self) -> &[Vec<usize>] {
        &self.rings
    }

    /// Returns how many reported sequences were discarded.
    pub fn rejected(&self) -> usize {
        self.rejected
    }

    /// Consumes the store and returns the accepted rings.
    pub fn into_rings(self) -> Vec<Vec<usize>> {
        self.rings
    }
}

impl RingReporter for RingStore {
    fn report_ring(&mut self, graph: &dyn LabeledGraph, ring: &[usize]) {
        let closed = ring.len() >= 2 && ring.first() == ring.last();
        let in_range = ring.iter().all(|&node| node < graph.node_count());
        if closed && in_range {
            self.rings.push(ring.to_vec());
        } else {
            self.rejected += 1;
        }
    }
}
