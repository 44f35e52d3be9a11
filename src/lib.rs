#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

//! # Metaromatic Library
//!
//! This library detects Met-aromatic interactions in PDB and mmCIF files: contacts
//! between the lone pairs of a methionine sulfur and the ring of a phenylalanine,
//! tyrosine, or tryptophan. Interactions are grouped into bridges (several aromatics
//! sharing one methionine) and compared against chains of closely spaced aromatic
//! residues.
//!
//! The library returns tables as Polars DataFrames, which can be written to various
//! output formats with [`write_df_to_file`].

pub mod batch;
pub mod errors;
pub mod geometry;
pub mod interactions;
pub mod metadata;
pub mod networks;
pub mod pipeline;
pub mod provider;
pub mod settings;
pub mod sink;
pub mod structure;

mod chains;
mod residues;
mod utils;

// Re-export key public types
pub use batch::{run_batch, run_detection, BatchOutcome, Stage, StructureStatus};
pub use errors::MetAromaticError;
pub use geometry::LonePairMethod;
pub use interactions::{detect_interactions, Interaction};
pub use metadata::StructureMetadata;
pub use networks::{
    bridge_networks, classify, extract_bridges, extract_chains, Bridge, Comparison, Network,
    Relationship,
};
pub use pipeline::{analyze_structure, StructureReport};
pub use provider::{LoadedStructure, PdbFileProvider, StructureProvider};
pub use settings::{RingPoints, Settings};
pub use sink::{ResultSink, TableSink};
pub use utils::{
    load_model, load_model_with_timeout, read_worklist, run_with_threads, write_df_to_file,
    DataFrameFileType,
};

use pdbtbx::*;
use polars::prelude::*;
use tracing::debug;

/// Detect Met-aromatic interactions in the configured chain of a structure.
///
/// # Arguments
///
/// * `structure` - Name reported in the `structure` column
/// * `pdb` - Reference to a PDB structure
/// * `settings` - Cutoffs, lone pair model, and chain to analyze
///
/// # Returns
///
/// A Polars DataFrame with columns:
/// - structure, chain
/// - aromatic, aromatic_resi, methionine, methionine_resi
/// - norm, met_theta, met_phi
///
/// # Example
///
/// ```no_run
/// use metaromatic::{load_model, get_interactions, Settings};
///
/// let (pdb, _errors) = load_model("path/to/structure.pdb").unwrap();
/// let df = get_interactions("structure", &pdb, &Settings::default()).unwrap();
/// println!("Found {} interactions", df.height());
/// ```
pub fn get_interactions(
    structure: &str,
    pdb: &PDB,
    settings: &Settings,
) -> Result<DataFrame, MetAromaticError> {
    settings.validate()?;
    let residues =
        pipeline::chain_residues(structure, pdb, settings.chain_identifier.as_str())?;
    let report = pipeline::detect_residues(structure, &residues, settings);
    let df = sink::interactions_to_df(&[report])?;
    debug!("Found {} interactions\n{}", df.height(), df);
    Ok(df)
}

/// Find bridges in the configured chain of a structure.
///
/// # Returns
///
/// A Polars DataFrame with columns structure, methionine, aromatics, order, and ec.
/// A loaded `PDB` carries no header annotations, so ec is null here; use
/// [`run_batch`] with a [`PdbFileProvider`] to fill it.
///
/// # Example
///
/// ```no_run
/// use metaromatic::{load_model, get_bridges, Settings};
///
/// let (pdb, _errors) = load_model("path/to/structure.pdb").unwrap();
/// let df = get_bridges("structure", &pdb, &Settings::default()).unwrap();
/// println!("Found {} bridges", df.height());
/// ```
pub fn get_bridges(
    structure: &str,
    pdb: &PDB,
    settings: &Settings,
) -> Result<DataFrame, MetAromaticError> {
    settings.validate()?;
    let report = analyze_structure(structure, pdb, settings)?;
    Ok(sink::bridges_to_df(&[report])?)
}

/// Classify every (chain, bridge) pair of a structure.
///
/// # Returns
///
/// A Polars DataFrame with columns structure, relationship, bridge, chain, ec, and
/// organism. The relationship column holds one of NR, PM, DS, or IS. The ec and
/// organism columns are null, as for [`get_bridges`].
///
/// # Example
///
/// ```no_run
/// use metaromatic::{load_model, get_relationships, Settings};
///
/// let (pdb, _errors) = load_model("path/to/structure.pdb").unwrap();
/// let df = get_relationships("structure", &pdb, &Settings::default()).unwrap();
/// println!("{df}");
/// ```
pub fn get_relationships(
    structure: &str,
    pdb: &PDB,
    settings: &Settings,
) -> Result<DataFrame, MetAromaticError> {
    settings.validate()?;
    let report = analyze_structure(structure, pdb, settings)?;

    let mut table = TableSink::new();
    table.accept(&report);
    Ok(table.to_df()?)
}
