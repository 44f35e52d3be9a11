//! End-to-end analysis of a single structure.

use crate::chains::ChainExt;
use crate::errors::MetAromaticError;
use crate::interactions::{detect_interactions, Interaction};
use crate::metadata::StructureMetadata;
use crate::networks::bridges::{composition_counts, order_breakdown};
use crate::networks::{bridge_networks, classify, extract_bridges, extract_chains};
use crate::networks::{Bridge, Comparison, Network};
use crate::settings::{BridgeSettings, Settings};
use crate::structure::Residue;

use pdbtbx::*;
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// Everything found in one polymer chain of one structure.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StructureReport {
    pub structure: String,
    pub chain: String,
    /// EC number and organism from the file header, when known
    pub metadata: StructureMetadata,
    pub interactions: Vec<Interaction>,
    /// Bridges that passed the partner kind filter
    pub bridges: Vec<Bridge>,
    /// Number of aromatic-methionine pairs per interaction count
    pub order_breakdown: BTreeMap<usize, usize>,
    /// Bridge counts by partner kinds, before the partner kind filter
    pub compositions: BTreeMap<String, usize>,
    pub bridge_networks: Vec<Network>,
    pub chains: Vec<Network>,
    pub comparisons: Vec<Comparison>,
}

impl StructureReport {
    /// A structure needs at least one bridge and one chain to be compared.
    pub fn has_result(&self) -> bool {
        !self.comparisons.is_empty()
    }
}

fn configured_chain(residues: &[Residue], settings: &Settings) -> Vec<Residue> {
    residues
        .iter()
        .filter(|r| r.chain == settings.chain_identifier)
        .cloned()
        .collect()
}

fn find_interactions(
    structure: &str,
    residues: &[Residue],
    settings: &Settings,
) -> Vec<Interaction> {
    let interactions = detect_interactions(residues, &settings.interactions);
    debug!("{structure}: found {} interactions", interactions.len());
    for interaction in &interactions {
        trace!("{structure}: {interaction}");
    }
    interactions
}

/// Run only the interaction detector on one chain's residues.
///
/// Bridges, chains, and comparisons are left empty.
pub fn detect_residues(
    structure: &str,
    residues: &[Residue],
    settings: &Settings,
) -> StructureReport {
    let residues = configured_chain(residues, settings);
    let interactions = find_interactions(structure, &residues, settings);
    StructureReport {
        structure: structure.to_string(),
        chain: settings.chain_identifier.clone(),
        order_breakdown: order_breakdown(&interactions),
        interactions,
        ..Default::default()
    }
}

/// Run detection, bridge and chain extraction, and classification on one chain's residues.
pub fn analyze_residues(
    structure: &str,
    residues: &[Residue],
    settings: &Settings,
) -> Result<StructureReport, MetAromaticError> {
    let chain = settings.chain_identifier.as_str();
    let residues = configured_chain(residues, settings);
    let interactions = find_interactions(structure, &residues, settings);

    let unfiltered = BridgeSettings {
        excluded_kinds: vec![],
        ..settings.bridges.clone()
    };
    let compositions = composition_counts(&extract_bridges(&interactions, &unfiltered));
    let bridges = extract_bridges(&interactions, &settings.bridges);
    let bridge_nets = bridge_networks(&bridges);
    debug!("{structure}: found {} bridges", bridges.len());

    // Chains are built from the same aromatic kinds bridges may contain
    let chain_residues: Vec<Residue> = residues
        .iter()
        .filter(|r| !settings.bridges.excluded_kinds.contains(&r.kind))
        .cloned()
        .collect();
    let chains = extract_chains(&chain_residues, settings.chain_distance_cutoff);
    debug!("{structure}: found {} aromatic chains", chains.len());

    let comparisons = classify(&chains, &bridge_nets)?;
    for comparison in &comparisons {
        debug!("{structure} : {comparison}");
    }

    Ok(StructureReport {
        structure: structure.to_string(),
        chain: chain.to_string(),
        order_breakdown: order_breakdown(&interactions),
        interactions,
        bridges,
        compositions,
        bridge_networks: bridge_nets,
        chains,
        comparisons,
        ..Default::default()
    })
}

/// Analyze the configured chain in the first model of a loaded structure.
pub fn analyze_structure(
    structure: &str,
    pdb: &PDB,
    settings: &Settings,
) -> Result<StructureReport, MetAromaticError> {
    let residues = chain_residues(structure, pdb, &settings.chain_identifier)?;
    analyze_residues(structure, &residues, settings)
}

/// Methionine and aromatic residues of one chain of the first model.
pub fn chain_residues(
    structure: &str,
    pdb: &PDB,
    chain_id: &str,
) -> Result<Vec<Residue>, MetAromaticError> {
    let model = pdb.model(0).ok_or_else(|| MetAromaticError::StructureLoad {
        structure: structure.to_string(),
        reason: "no models".to_string(),
    })?;
    let chain = model
        .chains()
        .find(|c| c.id() == chain_id)
        .ok_or_else(|| MetAromaticError::StructureLoad {
            structure: structure.to_string(),
            reason: format!("chain {chain_id} not found"),
        })?;
    trace!(">{structure}:{chain_id}\n{}", chain.pdb_seq().join(""));
    Ok(chain.met_aromatic_residues())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::networks::Relationship;
    use crate::utils::load_model;

    fn fixture() -> PDB {
        let root = env!("CARGO_MANIFEST_DIR");
        let path = format!("{}/{}", root, "test-data/bridge.pdb");
        let (pdb, _) = load_model(&path).unwrap();
        pdb
    }

    fn labels(network: &Network) -> Vec<String> {
        network.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_analyze_fixture() {
        let report = analyze_structure("bridge", &fixture(), &Settings::default()).unwrap();
        assert_eq!(report.chain, "A");

        let pairs: Vec<(String, String)> = report
            .interactions
            .iter()
            .map(|i| (i.methionine.to_string(), i.aromatic.to_string()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("MET10".to_string(), "TYR20".to_string()),
                ("MET10".to_string(), "TRP30".to_string()),
            ]
        );
        for i in &report.interactions {
            assert!((i.norm - 4.0).abs() < 0.01);
            assert!(i.met_theta.min(i.met_phi) < 0.5);
        }

        assert_eq!(report.bridges.len(), 1);
        assert_eq!(report.bridges[0].to_string(), "TYR20-TRP30");
        assert_eq!(report.order_breakdown, BTreeMap::from([(1, 2)]));
        assert_eq!(report.compositions, BTreeMap::from([("TYR-TRP".to_string(), 1)]));

        let chains: Vec<Vec<String>> = report.chains.iter().map(labels).collect();
        assert_eq!(
            chains,
            vec![vec!["TYR20", "TYR40", "TRP30"], vec!["TYR60", "TYR61"]]
        );

        let relationships: Vec<Relationship> =
            report.comparisons.iter().map(|c| c.relationship).collect();
        assert_eq!(
            relationships,
            vec![
                Relationship::DirectSuperimposition,
                Relationship::NoRelationship
            ]
        );
        assert!(report.has_result());
    }

    #[test]
    fn test_analyze_other_chain() {
        let settings = Settings {
            chain_identifier: "B".to_string(),
            ..Default::default()
        };
        let report = analyze_structure("bridge", &fixture(), &settings).unwrap();
        assert_eq!(report.interactions.len(), 1);
        assert_eq!(report.interactions[0].methionine.to_string(), "MET5");
        assert!(report.bridges.is_empty());
        assert!(!report.has_result());
    }

    #[test]
    fn test_detect_only() {
        let residues = chain_residues("bridge", &fixture(), "A").unwrap();
        let report = detect_residues("bridge", &residues, &Settings::default());
        assert_eq!(report.interactions.len(), 2);
        assert_eq!(report.order_breakdown, BTreeMap::from([(1, 2)]));
        assert!(report.bridges.is_empty());
        assert!(report.chains.is_empty());
        assert!(!report.has_result());
    }

    #[test]
    fn test_missing_chain() {
        let settings = Settings {
            chain_identifier: "Z".to_string(),
            ..Default::default()
        };
        let err = analyze_structure("bridge", &fixture(), &settings).unwrap_err();
        assert!(matches!(err, MetAromaticError::StructureLoad { .. }));
    }
}
