//! Hardware qubit connectivity.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Target device connectivity graph.
///
/// Vertices are the physical qubit indices `[0, n)`; an edge means a
/// two-qubit gate may act directly on that pair. Routing relies on the
/// graph being connected between any pair of qubits a program actually
/// couples; a disconnected pair surfaces as
/// [`NoRoutingPath`](crate::CompileError::NoRoutingPath) at that gate.
///
/// ## Determinism
///
/// Adjacency lists are kept sorted, so breadth-first traversal visits
/// neighbors in ascending index order and [`shortest_path`](Self::shortest_path)
/// returns the same (lexicographically least) path for a given topology
/// and endpoint pair on every run. Synthesis output is reproducible
/// because of this.
///
/// ## Deserialization
///
/// The adjacency index is skipped during serialization; call
/// [`rebuild_adjacency`](Self::rebuild_adjacency) after deserializing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topology {
    /// List of connected qubit pairs (bidirectional).
    edges: Vec<(u32, u32)>,
    /// Number of physical qubits.
    num_qubits: u32,
    /// Adjacency lists, each kept sorted.
    #[serde(skip)]
    adjacency: FxHashMap<u32, Vec<u32>>,
}

impl Topology {
    /// Create a topology with the given number of qubits and no edges.
    pub fn new(num_qubits: u32) -> Self {
        Self {
            edges: vec![],
            num_qubits,
            adjacency: FxHashMap::default(),
        }
    }

    /// Add an edge between two qubits (bidirectional).
    ///
    /// Duplicate edges (including reversed pairs) are silently ignored.
    pub fn add_edge(&mut self, q1: u32, q2: u32) {
        if q1 == q2 || self.has_edge(q1, q2) {
            return;
        }
        self.edges.push((q1, q2));
        Self::insert_sorted(self.adjacency.entry(q1).or_default(), q2);
        Self::insert_sorted(self.adjacency.entry(q2).or_default(), q1);
    }

    fn insert_sorted(neighbors: &mut Vec<u32>, q: u32) {
        if let Err(pos) = neighbors.binary_search(&q) {
            neighbors.insert(pos, q);
        }
    }

    /// Rebuild the adjacency index from the edge list. Must be called
    /// after deserialization.
    pub fn rebuild_adjacency(&mut self) {
        self.adjacency.clear();
        for &(q1, q2) in &self.edges {
            Self::insert_sorted(self.adjacency.entry(q1).or_default(), q2);
            Self::insert_sorted(self.adjacency.entry(q2).or_default(), q1);
        }
    }

    /// Check if two qubits are directly connected.
    #[inline]
    pub fn has_edge(&self, q1: u32, q2: u32) -> bool {
        self.adjacency
            .get(&q1)
            .is_some_and(|neighbors| neighbors.binary_search(&q2).is_ok())
    }

    /// Get the number of physical qubits.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Get the edge list.
    pub fn edges(&self) -> &[(u32, u32)] {
        &self.edges
    }

    /// Get the neighbors of a qubit in ascending order.
    pub fn neighbors(&self, qubit: u32) -> impl Iterator<Item = u32> + '_ {
        self.adjacency
            .get(&qubit)
            .map(|v| v.iter().copied())
            .into_iter()
            .flatten()
    }

    /// Create a linear topology (0-1-2-...).
    pub fn linear(n: u32) -> Self {
        let mut topology = Self::new(n);
        for i in 0..n.saturating_sub(1) {
            topology.add_edge(i, i + 1);
        }
        topology
    }

    /// Create a ring topology (linear plus the closing edge).
    pub fn ring(n: u32) -> Self {
        let mut topology = Self::linear(n);
        if n > 2 {
            topology.add_edge(n - 1, 0);
        }
        topology
    }

    /// Create a star topology (qubit 0 connected to all others).
    pub fn star(n: u32) -> Self {
        let mut topology = Self::new(n);
        for i in 1..n {
            topology.add_edge(0, i);
        }
        topology
    }

    /// Create a fully connected topology.
    pub fn full(n: u32) -> Self {
        let mut topology = Self::new(n);
        for i in 0..n {
            for j in (i + 1)..n {
                topology.add_edge(i, j);
            }
        }
        topology
    }

    /// Find the shortest path between two qubits by breadth-first
    /// search. Returns the full vertex sequence including both
    /// endpoints, or `None` if no path exists.
    ///
    /// Neighbors are visited in ascending order, so among equal-length
    /// paths the lexicographically least one is returned.
    pub fn shortest_path(&self, from: u32, to: u32) -> Option<Vec<u32>> {
        if from == to {
            return Some(vec![from]);
        }

        let mut predecessor: FxHashMap<u32, u32> = FxHashMap::default();
        let mut queue = VecDeque::new();
        predecessor.insert(from, from);
        queue.push_back(from);

        while let Some(current) = queue.pop_front() {
            for neighbor in self.neighbors(current) {
                if predecessor.contains_key(&neighbor) {
                    continue;
                }
                predecessor.insert(neighbor, current);

                if neighbor == to {
                    let mut path = vec![to];
                    let mut node = to;
                    while node != from {
                        node = predecessor[&node];
                        path.push(node);
                    }
                    path.reverse();
                    return Some(path);
                }

                queue.push_back(neighbor);
            }
        }

        None
    }

    /// Check that every qubit can reach every other.
    pub fn is_connected_graph(&self) -> bool {
        if self.num_qubits <= 1 {
            return true;
        }

        let mut seen = vec![false; self.num_qubits as usize];
        let mut queue = VecDeque::new();
        seen[0] = true;
        queue.push_back(0u32);

        while let Some(current) = queue.pop_front() {
            for neighbor in self.neighbors(current) {
                let idx = neighbor as usize;
                if idx < seen.len() && !seen[idx] {
                    seen[idx] = true;
                    queue.push_back(neighbor);
                }
            }
        }

        seen.iter().all(|&s| s)
    }
}
