//! Resolution of structure identifiers to residues.

use crate::errors::MetAromaticError;
use crate::metadata::StructureMetadata;
use crate::pipeline::chain_residues;
use crate::settings::Settings;
use crate::structure::Residue;
use crate::utils::load_model_with_timeout;

use std::path::{Path, PathBuf};
use tracing::{debug, error, warn};

/// File extensions tried, in order, when an identifier is looked up in a directory.
pub const STRUCTURE_EXTENSIONS: [&str; 3] = ["pdb", "cif", "ent"];

/// Residues and header annotations of one structure.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedStructure {
    /// Methionine and aromatic residues of the configured chain in the first model
    pub residues: Vec<Residue>,
    pub metadata: StructureMetadata,
}

/// A source of structures for identifiers.
pub trait StructureProvider: Send + Sync {
    /// Load `id`, honoring the chain and load timeout of `settings`.
    fn load(&self, id: &str, settings: &Settings) -> Result<LoadedStructure, MetAromaticError>;
}

/// Reads local PDB or mmCIF files.
///
/// An identifier is either a path to a file or, when a search directory is set, the
/// stem of `<dir>/<id>.pdb`, `<dir>/<id>.cif`, or `<dir>/<id>.ent`.
#[derive(Debug, Clone, Default)]
pub struct PdbFileProvider {
    pub search_dir: Option<PathBuf>,
}

impl PdbFileProvider {
    pub fn new(search_dir: Option<PathBuf>) -> Self {
        Self { search_dir }
    }

    pub fn resolve(&self, id: &str) -> Result<PathBuf, MetAromaticError> {
        let direct = Path::new(id);
        if direct.is_file() {
            return Ok(direct.to_path_buf());
        }

        if let Some(dir) = &self.search_dir {
            for stem in [id.to_string(), id.to_lowercase(), id.to_uppercase()] {
                for ext in STRUCTURE_EXTENSIONS {
                    let candidate = dir.join(format!("{stem}.{ext}"));
                    if candidate.is_file() {
                        return Ok(candidate);
                    }
                }
            }
        }
        Err(MetAromaticError::StructureNotFound(id.to_string()))
    }
}

impl StructureProvider for PdbFileProvider {
    fn load(&self, id: &str, settings: &Settings) -> Result<LoadedStructure, MetAromaticError> {
        let path = self.resolve(id)?;
        let path_str = path.to_str().ok_or_else(|| MetAromaticError::StructureLoad {
            structure: id.to_string(),
            reason: format!("non UTF-8 path {}", path.display()),
        })?;
        debug!("Loading {id} from {path_str}");

        let (pdb, pdb_warnings) = load_model_with_timeout(path_str, settings.load_timeout)?;
        for e in &pdb_warnings {
            match e.level() {
                pdbtbx::ErrorLevel::BreakingError => error!("{e}"),
                pdbtbx::ErrorLevel::InvalidatingError => error!("{e}"),
                _ => warn!("{e}"),
            }
        }

        let residues = chain_residues(id, &pdb, &settings.chain_identifier)?;
        let metadata = StructureMetadata::read(&path)?;
        if metadata.ec.is_none() {
            debug!("{id}: no EC number in header");
        }
        Ok(LoadedStructure { residues, metadata })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn provider() -> PdbFileProvider {
        let root = env!("CARGO_MANIFEST_DIR");
        PdbFileProvider::new(Some(Path::new(root).join("test-data")))
    }

    #[test]
    fn test_resolve() {
        let p = provider();
        let by_id = p.resolve("bridge").unwrap();
        assert!(by_id.ends_with("test-data/bridge.pdb"));

        let by_path = p.resolve(by_id.to_str().unwrap()).unwrap();
        assert_eq!(by_path, by_id);

        assert_eq!(
            p.resolve("1abc"),
            Err(MetAromaticError::StructureNotFound("1abc".to_string()))
        );
    }

    #[test]
    fn test_load() {
        let loaded = provider().load("bridge", &Settings::default()).unwrap();
        assert_eq!(loaded.residues.len(), 8);
        assert!(loaded.residues.iter().all(|r| r.chain == "A"));
        assert_eq!(loaded.metadata.ec.as_deref(), Some("3.2.1.17"));
        assert_eq!(loaded.metadata.organism.as_deref(), Some("GALLUS GALLUS"));

        let settings = Settings {
            chain_identifier: "Q".to_string(),
            ..Default::default()
        };
        let err = provider().load("bridge", &settings).unwrap_err();
        assert!(matches!(err, MetAromaticError::StructureLoad { .. }));
    }

    #[test]
    fn test_load_timeout_from_settings() {
        let settings = Settings {
            load_timeout: Duration::ZERO,
            ..Default::default()
        };
        let err = provider().load("bridge", &settings).unwrap_err();
        match err {
            MetAromaticError::StructureLoad { reason, .. } => assert!(reason.contains("timed out")),
            other => panic!("unexpected error {other:?}"),
        }
    }
}
