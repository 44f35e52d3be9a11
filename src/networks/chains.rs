use super::{LabelGraph, Network};
use crate::geometry::centroid;
use crate::structure::{Residue, ResidueLabel};

use rstar::primitives::GeomWithData;
use rstar::RTree;
use tracing::trace;

type RingCenter = GeomWithData<[f64; 3], ResidueLabel>;

/// Group closely spaced aromatic residues into chains.
///
/// Two aromatics are linked when their ring centroids lie within `cutoff` Å of each
/// other (inclusive). Each connected component of two or more residues is a chain.
/// Non-aromatic and incomplete residues are ignored.
pub fn extract_chains(residues: &[Residue], cutoff: f64) -> Vec<Network> {
    let centers: Vec<RingCenter> = residues
        .iter()
        .filter(|r| r.kind.is_aromatic())
        .filter_map(|r| match r.ring_atoms() {
            Ok(ring) => {
                let c = centroid(&ring);
                Some(RingCenter::new([c.x, c.y, c.z], r.label()))
            }
            Err(e) => {
                trace!("Skipping: {e}");
                None
            }
        })
        .collect();

    let tree = RTree::bulk_load(centers.clone());
    let mut graph = LabelGraph::new();
    for center in &centers {
        for neighbor in tree.locate_within_distance(*center.geom(), cutoff * cutoff) {
            graph.add_edge(center.data, neighbor.data);
        }
    }
    graph.components(2)
}
