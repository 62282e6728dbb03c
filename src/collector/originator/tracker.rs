//! Per-node next-hop stability tracking.
//!
//! Remembers, for every originator seen during the process lifetime, the
//! last next hop reported for it. Entries are never removed. Mesh sizes
//! are small (tens to low hundreds of nodes), so lookup is a linear scan
//! over an insertion-ordered table.

use crate::mac::NodeAddr;

/// Outcome of one next-hop observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stability {
    /// Known originator, next hop identical to the previous pass.
    Unchanged,
    /// Known originator, next hop differs; the stored hop was updated.
    Changed,
    /// First observation of this originator.
    New,
    /// The table could not grow; the originator was not remembered.
    AllocationFailure,
}

impl Stability {
    /// Numeric stability signal: 0.0 when the hop changed, 1.0 otherwise.
    ///
    /// A newly observed node counts as initially stable. An untracked node
    /// (growth failure) is reported the same way; the pass logs that
    /// distinction separately.
    pub fn signal(self) -> f64 {
        match self {
            Stability::Changed => 0.0,
            Stability::Unchanged | Stability::New | Stability::AllocationFailure => 1.0,
        }
    }
}

/// One remembered originator.
#[derive(Debug, Clone, Copy)]
struct TrackedNode {
    originator: NodeAddr,
    next_hop: NodeAddr,
}

/// Insertion-ordered table of originator → last-known next hop.
///
/// Owned by the collector for the life of the process; reset to empty
/// only by process restart.
#[derive(Debug)]
pub struct HopTracker {
    nodes: Vec<TrackedNode>,
}

impl HopTracker {
    /// Initial table capacity. When the table fills up it grows by half
    /// its current capacity, keeping insertion amortized O(1).
    pub const INITIAL_CAPACITY: usize = 16;

    pub fn new() -> Self {
        Self {
            nodes: Vec::with_capacity(Self::INITIAL_CAPACITY),
        }
    }

    /// Records one observation and reports how the next hop moved since
    /// the previous pass.
    ///
    /// A growth failure leaves the table exactly as it was; the observed
    /// node is simply not remembered for future comparisons.
    pub fn observe(&mut self, originator: NodeAddr, next_hop: NodeAddr) -> Stability {
        if let Some(node) = self
            .nodes
            .iter_mut()
            .find(|n| n.originator == originator)
        {
            if node.next_hop == next_hop {
                return Stability::Unchanged;
            }
            node.next_hop = next_hop;
            return Stability::Changed;
        }

        if self.nodes.len() == self.nodes.capacity() {
            let additional = (self.nodes.capacity() / 2).max(1);
            if self.nodes.try_reserve_exact(additional).is_err() {
                return Stability::AllocationFailure;
            }
        }
        self.nodes.push(TrackedNode {
            originator,
            next_hop,
        });
        Stability::New
    }

    /// Last next hop recorded for an originator, if it is tracked.
    pub fn last_hop(&self, originator: NodeAddr) -> Option<NodeAddr> {
        self.nodes
            .iter()
            .find(|n| n.originator == originator)
            .map(|n| n.next_hop)
    }

    /// Number of tracked originators.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl Default for HopTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(n: u64) -> NodeAddr {
        let b = n.to_be_bytes();
        NodeAddr::from_octets([b[2], b[3], b[4], b[5], b[6], b[7]])
    }

    #[test]
    fn test_first_observation_is_new() {
        let mut tracker = HopTracker::new();
        let state = tracker.observe(addr(1), addr(100));
        assert_eq!(state, Stability::New);
        assert_eq!(state.signal(), 1.0);
        assert_eq!(tracker.last_hop(addr(1)), Some(addr(100)));
    }

    #[test]
    fn test_same_hop_is_unchanged() {
        let mut tracker = HopTracker::new();
        tracker.observe(addr(1), addr(100));
        let state = tracker.observe(addr(1), addr(100));
        assert_eq!(state, Stability::Unchanged);
        assert_eq!(state.signal(), 1.0);
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn test_hop_change_updates_stored_hop() {
        let mut tracker = HopTracker::new();
        tracker.observe(addr(1), addr(100));
        let state = tracker.observe(addr(1), addr(200));
        assert_eq!(state, Stability::Changed);
        assert_eq!(state.signal(), 0.0);
        assert_eq!(tracker.last_hop(addr(1)), Some(addr(200)));

        // The new hop is now the comparison baseline.
        assert_eq!(tracker.observe(addr(1), addr(200)), Stability::Unchanged);
    }

    #[test]
    fn test_change_then_stable_sequence() {
        let mut tracker = HopTracker::new();
        let signals: Vec<f64> = [addr(100), addr(200), addr(200)]
            .into_iter()
            .map(|hop| tracker.observe(addr(1), hop).signal())
            .collect();
        assert_eq!(signals, vec![1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_nodes_tracked_independently() {
        let mut tracker = HopTracker::new();
        tracker.observe(addr(1), addr(100));
        tracker.observe(addr(2), addr(100));

        assert_eq!(tracker.observe(addr(1), addr(200)), Stability::Changed);
        assert_eq!(tracker.observe(addr(2), addr(100)), Stability::Unchanged);
    }

    #[test]
    fn test_growth_preserves_all_entries() {
        let mut tracker = HopTracker::new();
        let count = HopTracker::INITIAL_CAPACITY * 8;

        for i in 0..count {
            let state = tracker.observe(addr(i as u64), addr(1000 + i as u64));
            assert_eq!(state, Stability::New);
        }

        assert_eq!(tracker.len(), count);
        for i in 0..count {
            assert_eq!(
                tracker.last_hop(addr(i as u64)),
                Some(addr(1000 + i as u64)),
                "entry {i} lost or corrupted after growth"
            );
        }
    }

    #[test]
    fn test_allocation_failure_signal() {
        assert_eq!(Stability::AllocationFailure.signal(), 1.0);
    }
}
