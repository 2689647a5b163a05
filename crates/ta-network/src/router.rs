//! Single-source Dijkstra over a per-link cost view.
//!
//! # Cost view
//!
//! Callers pass a `&[f64]` indexed by `LinkId`.  Infinite (or NaN) entries
//! mark links the search must not use, which is how mode restrictions and
//! zero-capacity links are expressed without touching the network.
//!
//! # Determinism
//!
//! A label is replaced only on strict improvement, a node's outgoing links are
//! scanned in ascending `LinkId` order, and heap ties pop the lowest `NodeId`
//! first.  Equal-cost alternatives therefore always resolve the same way.
//!
//! # Centroids
//!
//! Zone centroids other than the source are settled but never expanded, so a
//! path cannot shortcut through a zone via its zero-cost connectors.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use ta_core::{LinkId, NodeId};

use crate::network::PhyNetwork;

// ── Heap entry ────────────────────────────────────────────────────────────────

/// Min-heap entry: lowest cost first, then lowest node index.
#[derive(Copy, Clone, Debug)]
struct MinCost {
    cost: f64,
    node: NodeId,
}

impl PartialEq for MinCost {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for MinCost {}

impl PartialOrd for MinCost {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MinCost {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so that BinaryHeap (a max-heap) pops the cheapest entry.
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

// ── ShortestPathTree ──────────────────────────────────────────────────────────

/// Cost and predecessor-link labels of every node, rooted at `source`.
///
/// Buffers are reused across [`build`](Self::build) calls, so a long-lived
/// tree avoids reallocating per origin.
#[derive(Clone, Debug)]
pub struct ShortestPathTree {
    source:    NodeId,
    cost:      Vec<f64>,
    pred_link: Vec<LinkId>,
    heap:      BinaryHeap<MinCost>,
}

impl ShortestPathTree {
    /// An empty tree sized for `node_count` nodes.
    pub fn new(node_count: usize) -> Self {
        Self {
            source:    NodeId::INVALID,
            cost:      vec![f64::INFINITY; node_count],
            pred_link: vec![LinkId::INVALID; node_count],
            heap:      BinaryHeap::new(),
        }
    }

    pub fn source(&self) -> NodeId {
        self.source
    }

    /// Label every node reachable from `source` under `link_cost`.
    ///
    /// # Panics
    ///
    /// Panics if `link_cost` is shorter than the network's link count.
    pub fn build(&mut self, network: &PhyNetwork, source: NodeId, link_cost: &[f64]) {
        assert!(
            link_cost.len() >= network.link_count(),
            "cost view covers {} links, network has {}",
            link_cost.len(),
            network.link_count(),
        );

        let n = network.node_count();
        self.cost.clear();
        self.cost.resize(n, f64::INFINITY);
        self.pred_link.clear();
        self.pred_link.resize(n, LinkId::INVALID);
        self.heap.clear();
        self.source = source;

        self.cost[source.index()] = 0.0;
        self.heap.push(MinCost { cost: 0.0, node: source });

        while let Some(MinCost { cost, node }) = self.heap.pop() {
            // Skip stale heap entries.
            if cost > self.cost[node.index()] {
                continue;
            }
            if node != source && network.node(node).is_centroid {
                continue;
            }

            for &link in network.out_links(node) {
                let c = link_cost[link.index()];
                if !c.is_finite() {
                    continue;
                }
                let next = network.link(link).to_node;
                let new_cost = cost + c.max(0.0);
                if new_cost < self.cost[next.index()] {
                    self.cost[next.index()] = new_cost;
                    self.pred_link[next.index()] = link;
                    self.heap.push(MinCost { cost: new_cost, node: next });
                }
            }
        }
    }

    /// Label cost of `node`, or `None` if unreachable.
    pub fn cost_to(&self, node: NodeId) -> Option<f64> {
        self.cost
            .get(node.index())
            .copied()
            .filter(|c| c.is_finite())
    }

    /// Links from the source to `node` in travel order, or `None` if `node`
    /// is unreachable.  The source itself yields an empty path.
    pub fn path_to(&self, network: &PhyNetwork, node: NodeId) -> Option<Vec<LinkId>> {
        self.cost_to(node)?;
        let mut links = Vec::new();
        let mut cur = node;
        loop {
            let l = self.pred_link[cur.index()];
            if l == LinkId::INVALID {
                break;
            }
            links.push(l);
            cur = network.link(l).from_node;
        }
        links.reverse();
        Some(links)
    }
}
