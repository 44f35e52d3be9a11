//! Graphs over residue labels: bridges, spatial chains, and their relationships.

pub mod bridges;
pub mod chains;
pub mod classify;

pub use bridges::{bridge_networks, extract_bridges, Bridge};
pub use chains::extract_chains;
pub use classify::{classify, Comparison, Relationship};

use crate::structure::ResidueLabel;
use petgraph::algo::kosaraju_scc;
use petgraph::graph::{NodeIndex, UnGraph};
use std::collections::{BTreeSet, HashMap};

/// The node set of one connected component, in canonical order.
pub type Network = BTreeSet<ResidueLabel>;

/// Format a network the way result tables print it, e.g. `{TYR20,TRP30}`.
pub fn format_network(network: &Network) -> String {
    let labels: Vec<String> = network.iter().map(|l| l.to_string()).collect();
    format!("{{{}}}", labels.join(","))
}

/// Undirected simple graph keyed by residue label.
#[derive(Debug, Clone, Default)]
pub struct LabelGraph {
    graph: UnGraph<ResidueLabel, ()>,
    node_index_map: HashMap<ResidueLabel, NodeIndex>,
}

impl LabelGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the node for `label`, adding it if needed.
    pub fn add_node(&mut self, label: ResidueLabel) -> NodeIndex {
        if let Some(idx) = self.node_index_map.get(&label) {
            return *idx;
        }
        let idx = self.graph.add_node(label);
        self.node_index_map.insert(label, idx);
        idx
    }

    /// Join two labels. Repeated edges and self loops are ignored.
    pub fn add_edge(&mut self, a: ResidueLabel, b: ResidueLabel) {
        let (ia, ib) = (self.add_node(a), self.add_node(b));
        if ia != ib {
            self.graph.update_edge(ia, ib, ());
        }
    }

    pub fn labels(&self) -> impl Iterator<Item = &ResidueLabel> + '_ {
        self.graph.node_weights()
    }

    /// Number of distinct neighbors, or 0 for an unknown label.
    pub fn degree(&self, label: &ResidueLabel) -> usize {
        self.node_index_map
            .get(label)
            .map_or(0, |idx| self.graph.neighbors(*idx).count())
    }

    /// Neighbors of `label` in canonical order.
    pub fn neighbors(&self, label: &ResidueLabel) -> Vec<ResidueLabel> {
        let mut out: Vec<ResidueLabel> = match self.node_index_map.get(label) {
            Some(idx) => self.graph.neighbors(*idx).map(|n| self.graph[n]).collect(),
            None => Vec::new(),
        };
        out.sort();
        out
    }

    /// Connected components with at least `min_size` nodes, sorted canonically.
    pub fn components(&self, min_size: usize) -> Vec<Network> {
        let mut networks: Vec<Network> = kosaraju_scc(&self.graph)
            .into_iter()
            .filter(|c| c.len() >= min_size)
            .map(|c| c.into_iter().map(|idx| self.graph[idx]).collect())
            .collect();
        networks.sort();
        networks
    }
}
