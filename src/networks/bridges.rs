use super::{LabelGraph, Network};
use crate::interactions::Interaction;
use crate::settings::BridgeSettings;
use crate::structure::{ResidueKind, ResidueLabel};

use std::collections::BTreeMap;
use std::fmt;

/// Aromatic residues held together by one shared methionine.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Bridge {
    pub methionine: ResidueLabel,
    /// Sorted aromatic partners of the methionine
    pub aromatics: Vec<ResidueLabel>,
}

impl Bridge {
    /// Number of aromatics bridged by the methionine.
    pub fn order(&self) -> usize {
        self.aromatics.len()
    }

    /// Sorted residue kinds of the partners joined by `-`, e.g. `TYR-TRP`.
    pub fn composition(&self) -> String {
        let mut kinds: Vec<ResidueKind> = self.aromatics.iter().map(|l| l.kind).collect();
        kinds.sort();
        kinds
            .iter()
            .map(|k| k.to_string())
            .collect::<Vec<_>>()
            .join("-")
    }
}

impl fmt::Display for Bridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let aromatics: Vec<String> = self.aromatics.iter().map(|l| l.to_string()).collect();
        write!(f, "{}", aromatics.join("-"))
    }
}

/// Build the undirected aromatic-methionine graph, one edge per distinct pair.
pub fn interaction_graph(interactions: &[Interaction]) -> LabelGraph {
    let mut graph = LabelGraph::new();
    for interaction in interactions {
        let (aromatic, methionine) = interaction.edge();
        graph.add_edge(aromatic, methionine);
    }
    graph
}

/// Find methionines bonded to exactly `settings.order` distinct aromatics.
///
/// Bridges with a partner of an excluded kind are dropped after extraction.
/// The result is sorted by methionine.
pub fn extract_bridges(interactions: &[Interaction], settings: &BridgeSettings) -> Vec<Bridge> {
    let graph = interaction_graph(interactions);

    let mut bridges: Vec<Bridge> = graph
        .labels()
        .filter(|label| label.kind == ResidueKind::Met)
        .filter(|label| graph.degree(label) == settings.order)
        .map(|label| Bridge {
            methionine: *label,
            aromatics: graph.neighbors(label),
        })
        .filter(|bridge| {
            !bridge
                .aromatics
                .iter()
                .any(|a| settings.excluded_kinds.contains(&a.kind))
        })
        .collect();
    bridges.sort();
    bridges
}

/// Connected components of the graph joining the partners of each bridge.
///
/// Partners of a bridge of order three or more are joined in a star from the first one.
pub fn bridge_networks(bridges: &[Bridge]) -> Vec<Network> {
    let mut graph = LabelGraph::new();
    for bridge in bridges {
        if let Some((first, rest)) = bridge.aromatics.split_first() {
            graph.add_node(*first);
            for other in rest {
                graph.add_edge(*first, *other);
            }
        }
    }
    graph.components(2)
}

/// Histogram of interaction counts per distinct aromatic-methionine pair.
///
/// A pair is counted once per qualifying ring point, so in edge midpoint mode its
/// order ranges from 1 to 6.
pub fn order_breakdown(interactions: &[Interaction]) -> BTreeMap<usize, usize> {
    let mut per_pair: BTreeMap<(ResidueLabel, ResidueLabel), usize> = BTreeMap::new();
    for interaction in interactions {
        *per_pair.entry(interaction.edge()).or_insert(0) += 1;
    }

    let mut breakdown = BTreeMap::new();
    for order in per_pair.into_values() {
        *breakdown.entry(order).or_insert(0) += 1;
    }
    breakdown
}

/// Count bridges by the residue kinds of their partners.
pub fn composition_counts(bridges: &[Bridge]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for bridge in bridges {
        *counts.entry(bridge.composition()).or_insert(0) += 1;
    }
    counts
}
