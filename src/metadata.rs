//! Enzyme classification and source organism from structure file headers.
//!
//! pdbtbx skips the `COMPND` and `SOURCE` records, so they are read from the raw
//! header here. PDB files are read up to the first coordinate record. mmCIF files
//! only contribute tags written in key-value form.

use crate::errors::MetAromaticError;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Annotations attached to every result row of a structure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructureMetadata {
    /// EC number of the first annotated entity, e.g. `3.2.1.17`
    pub ec: Option<String>,
    /// Distinct scientific names of the source organisms, joined by `; `
    pub organism: Option<String>,
}

const MMCIF_EC_TAGS: [&str; 1] = ["_entity.pdbx_ec"];
const MMCIF_ORGANISM_TAGS: [&str; 3] = [
    "_entity_src_gen.pdbx_gene_src_scientific_name",
    "_entity_src_nat.pdbx_organism_scientific",
    "_pdbx_entity_src_syn.organism_scientific",
];

impl StructureMetadata {
    /// Top level EC digit, e.g. `3` for `3.2.1.17`.
    pub fn ec_class(&self) -> Option<String> {
        self.ec
            .as_deref()
            .and_then(|ec| ec.split('.').next())
            .map(str::trim)
            .filter(|class| !class.is_empty() && class.chars().all(|c| c.is_ascii_digit()))
            .map(String::from)
    }

    /// Read the header of a PDB or mmCIF file, chosen by extension.
    pub fn read(path: &Path) -> Result<Self, MetAromaticError> {
        let file = File::open(path).map_err(|e| MetAromaticError::StructureLoad {
            structure: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let lines = BufReader::new(file).lines().map_while(Result::ok);

        let is_mmcif = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("cif"));
        Ok(match is_mmcif {
            true => Self::from_mmcif_lines(lines),
            false => Self::from_pdb_lines(lines),
        })
    }

    /// Parse `COMPND ... EC:` and `SOURCE ... ORGANISM_SCIENTIFIC:` records.
    pub fn from_pdb_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut compnd = String::new();
        let mut source = String::new();
        for line in lines {
            let line = line.as_ref();
            let record = line.get(..6).unwrap_or(line);
            let text = line.get(10..).unwrap_or("").trim_end();
            match record {
                "COMPND" => {
                    compnd.push(' ');
                    compnd.push_str(text);
                }
                "SOURCE" => {
                    source.push(' ');
                    source.push_str(text);
                }
                "ATOM  " | "HETATM" | "MODEL " => break,
                _ => {}
            }
        }

        let ec = token_values(&compnd, "EC").into_iter().next();
        let organisms = token_values(&source, "ORGANISM_SCIENTIFIC");
        Self {
            ec,
            organism: join_distinct(organisms),
        }
    }

    /// Parse key-value mmCIF tags such as `_entity.pdbx_ec 3.2.1.17`.
    pub fn from_mmcif_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut ec = None;
        let mut organisms = Vec::new();
        let mut pending: Option<String> = None;

        for line in lines {
            let line = line.as_ref().trim();
            // A value may follow its tag on the next line
            let (tag, value) = match pending.take() {
                Some(tag) => (tag, line.to_string()),
                None => match line.split_once(char::is_whitespace) {
                    Some((tag, value)) => (tag.to_string(), value.trim().to_string()),
                    None if line.starts_with('_') => {
                        pending = Some(line.to_string());
                        continue;
                    }
                    None => continue,
                },
            };

            let Some(value) = normalize_scalar(&value) else {
                continue;
            };
            if MMCIF_EC_TAGS.contains(&tag.as_str()) && ec.is_none() {
                ec = value.split(',').next().map(|v| v.trim().to_string());
            } else if MMCIF_ORGANISM_TAGS.contains(&tag.as_str()) {
                organisms.push(value);
            }
        }

        Self {
            ec,
            organism: join_distinct(organisms),
        }
    }
}

/// Values of `KEY: value;` tokens in the joined text of a continued record.
fn token_values(text: &str, key: &str) -> Vec<String> {
    text.split(';')
        .filter_map(|token| token.split_once(':'))
        .filter(|(k, _)| k.trim() == key)
        .filter_map(|(_, v)| {
            let v = v.split(',').next().unwrap_or(v);
            normalize_scalar(&v.split_whitespace().collect::<Vec<_>>().join(" "))
        })
        .collect()
}

fn normalize_scalar(value: &str) -> Option<String> {
    let trimmed = value.trim().trim_matches(&['\'', '"'][..]).trim();
    if trimmed.is_empty() || trimmed == "?" || trimmed == "." || trimmed.starts_with(';') {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn join_distinct(values: Vec<String>) -> Option<String> {
    let mut distinct: Vec<String> = Vec::new();
    for value in values {
        if !distinct.contains(&value) {
            distinct.push(value);
        }
    }
    match distinct.is_empty() {
        true => None,
        false => Some(distinct.join("; ")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdb_header() {
        let root = env!("CARGO_MANIFEST_DIR");
        let path = Path::new(root).join("test-data/bridge.pdb");
        let metadata = StructureMetadata::read(&path).unwrap();
        assert_eq!(metadata.ec.as_deref(), Some("3.2.1.17"));
        assert_eq!(metadata.organism.as_deref(), Some("GALLUS GALLUS"));
        assert_eq!(metadata.ec_class().as_deref(), Some("3"));
    }

    #[test]
    fn test_pdb_continuation_lines() {
        let lines = [
            "COMPND    MOL_ID: 1;",
            "COMPND   2 MOLECULE: AZURIN;",
            "COMPND   3 EC: 1.10.3.2, 1.10.3.3;",
            "SOURCE    MOL_ID: 1;",
            "SOURCE   2 ORGANISM_SCIENTIFIC: ESCHERICHIA COLI",
            "SOURCE   3 K-12;",
            "SOURCE   4 MOL_ID: 2;",
            "SOURCE   5 ORGANISM_SCIENTIFIC: HOMO SAPIENS;",
            "SOURCE   6 MOL_ID: 3;",
            "SOURCE   7 ORGANISM_SCIENTIFIC: HOMO SAPIENS;",
            "ATOM      1  N   MET A   1      11.104   6.134  -6.504  1.00  0.00           N",
            "COMPND   9 EC: 9.9.9.9;",
        ];
        let metadata = StructureMetadata::from_pdb_lines(lines);
        assert_eq!(metadata.ec.as_deref(), Some("1.10.3.2"));
        assert_eq!(
            metadata.organism.as_deref(),
            Some("ESCHERICHIA COLI K-12; HOMO SAPIENS")
        );
    }

    #[test]
    fn test_unannotated_header() {
        let metadata = StructureMetadata::from_pdb_lines(["HEADER    DE NOVO PROTEIN"]);
        assert_eq!(metadata, StructureMetadata::default());
        assert_eq!(metadata.ec_class(), None);

        let partial = StructureMetadata {
            ec: Some("3.-.-.-".to_string()),
            organism: None,
        };
        assert_eq!(partial.ec_class().as_deref(), Some("3"));
    }

    #[test]
    fn test_mmcif_tags() {
        let lines = [
            "data_1ABC",
            "_entity.id                         1",
            "_entity.pdbx_ec                    3.2.1.17",
            "_entity.pdbx_description",
            "'Lysozyme C'",
            "_entity_src_nat.pdbx_organism_scientific",
            "'Gallus gallus'",
            "_pdbx_entity_src_syn.organism_scientific ?",
        ];
        let metadata = StructureMetadata::from_mmcif_lines(lines);
        assert_eq!(metadata.ec.as_deref(), Some("3.2.1.17"));
        assert_eq!(metadata.organism.as_deref(), Some("Gallus gallus"));
    }
}
