//! Typed atom and residue model consumed by the Met-aromatic algorithm.

use crate::errors::MetAromaticError;
use nalgebra as na;
use std::fmt;

/// Methionine atoms in the order CG, SD, CE.
pub const MET_ATOMS: [&str; 3] = ["CG", "SD", "CE"];
/// Phenylalanine and tyrosine ring atoms in cyclic order.
pub const PHE_TYR_RING_ATOMS: [&str; 6] = ["CG", "CD2", "CE2", "CZ", "CE1", "CD1"];
/// Tryptophan six-membered ring atoms in cyclic order.
pub const TRP_RING_ATOMS: [&str; 6] = ["CD2", "CE3", "CZ3", "CH2", "CZ2", "CE2"];

/// Residue kinds the algorithm distinguishes.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum ResidueKind {
    Met,
    Phe,
    Tyr,
    Trp,
    Other,
}

impl ResidueKind {
    /// Map a three-letter residue name onto a kind.
    pub fn from_name(name: &str) -> Self {
        match name.to_uppercase().as_str() {
            "MET" => ResidueKind::Met,
            "PHE" => ResidueKind::Phe,
            "TYR" => ResidueKind::Tyr,
            "TRP" => ResidueKind::Trp,
            _ => ResidueKind::Other,
        }
    }

    pub fn is_aromatic(&self) -> bool {
        matches!(self, ResidueKind::Phe | ResidueKind::Tyr | ResidueKind::Trp)
    }

    /// Atoms a residue of this kind must carry to take part in detection.
    pub fn required_atoms(&self) -> &'static [&'static str] {
        match self {
            ResidueKind::Met => &MET_ATOMS,
            ResidueKind::Phe | ResidueKind::Tyr => &PHE_TYR_RING_ATOMS,
            ResidueKind::Trp => &TRP_RING_ATOMS,
            ResidueKind::Other => &[],
        }
    }
}

impl fmt::Display for ResidueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResidueKind::Met => write!(f, "MET"),
            ResidueKind::Phe => write!(f, "PHE"),
            ResidueKind::Tyr => write!(f, "TYR"),
            ResidueKind::Trp => write!(f, "TRP"),
            ResidueKind::Other => write!(f, "UNK"),
        }
    }
}

/// Node label of the interaction and proximity graphs, e.g. `TYR122`.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ResidueLabel {
    pub kind: ResidueKind,
    pub resi: isize,
}

impl ResidueLabel {
    pub fn new(kind: ResidueKind, resi: isize) -> Self {
        Self { kind, resi }
    }
}

impl fmt::Display for ResidueLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind, self.resi)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// PDB atom name
    pub name: String,
    /// Element symbol, if the source file declared one
    pub element: Option<String>,
    pub pos: na::Vector3<f64>,
}

impl Atom {
    pub fn new(name: &str, pos: na::Vector3<f64>) -> Self {
        Self {
            name: name.to_string(),
            element: None,
            pos,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Residue {
    pub kind: ResidueKind,
    /// Sequence number, unique within a chain
    pub resi: isize,
    pub chain: String,
    pub atoms: Vec<Atom>,
}

impl Residue {
    pub fn new(kind: ResidueKind, resi: isize, chain: &str, atoms: Vec<Atom>) -> Self {
        Self {
            kind,
            resi,
            chain: chain.to_string(),
            atoms,
        }
    }

    pub fn label(&self) -> ResidueLabel {
        ResidueLabel::new(self.kind, self.resi)
    }

    /// Position of the first atom with the given name.
    pub fn atom_pos(&self, name: &str) -> Option<na::Vector3<f64>> {
        self.atoms.iter().find(|a| a.name == name).map(|a| a.pos)
    }

    /// Positions of all atoms required for this residue kind, in their canonical order.
    pub fn required_positions(&self) -> Result<Vec<na::Vector3<f64>>, MetAromaticError> {
        let required = self.kind.required_atoms();
        let positions: Vec<Option<na::Vector3<f64>>> =
            required.iter().map(|name| self.atom_pos(name)).collect();

        let missing: Vec<String> = required
            .iter()
            .zip(positions.iter())
            .filter(|(_, p)| p.is_none())
            .map(|(name, _)| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(MetAromaticError::IncompleteResidue {
                residue: self.label().to_string(),
                missing,
            });
        }
        Ok(positions.into_iter().flatten().collect())
    }

    /// The CG, SD, and CE positions of a methionine.
    pub fn met_atoms(&self) -> Result<[na::Vector3<f64>; 3], MetAromaticError> {
        let p = self.required_positions()?;
        match p.as_slice() {
            [cg, sd, ce] => Ok([*cg, *sd, *ce]),
            _ => Err(MetAromaticError::IncompleteResidue {
                residue: self.label().to_string(),
                missing: MET_ATOMS.iter().map(|s| s.to_string()).collect(),
            }),
        }
    }

    /// The six ring atom positions of an aromatic residue in cyclic order.
    pub fn ring_atoms(&self) -> Result<[na::Vector3<f64>; 6], MetAromaticError> {
        let p = self.required_positions()?;
        p.try_into()
            .map_err(|_: Vec<na::Vector3<f64>>| MetAromaticError::IncompleteResidue {
                residue: self.label().to_string(),
                missing: self
                    .kind
                    .required_atoms()
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn met(atoms: &[&str]) -> Residue {
        let atoms = atoms
            .iter()
            .enumerate()
            .map(|(i, name)| Atom::new(name, na::Vector3::new(i as f64, 0.0, 0.0)))
            .collect();
        Residue::new(ResidueKind::Met, 18, "A", atoms)
    }

    #[test]
    fn test_kind_from_name() {
        assert_eq!(ResidueKind::from_name("MET"), ResidueKind::Met);
        assert_eq!(ResidueKind::from_name("tyr"), ResidueKind::Tyr);
        assert_eq!(ResidueKind::from_name("HIS"), ResidueKind::Other);
        assert!(ResidueKind::Trp.is_aromatic());
        assert!(!ResidueKind::Met.is_aromatic());
    }

    #[test]
    fn test_label_display_and_order() {
        let tyr = ResidueLabel::new(ResidueKind::Tyr, 122);
        assert_eq!(tyr.to_string(), "TYR122");
        assert!(ResidueLabel::new(ResidueKind::Met, 500) < tyr);
        assert!(ResidueLabel::new(ResidueKind::Tyr, 12) < tyr);
    }

    #[test]
    fn test_met_atoms_order() {
        // Atom order in the file should not matter
        let res = met(&["CE", "N", "SD", "CG"]);
        let [cg, sd, ce] = res.met_atoms().unwrap();
        assert_eq!(cg.x, 3.0);
        assert_eq!(sd.x, 2.0);
        assert_eq!(ce.x, 0.0);
    }

    #[test]
    fn test_incomplete_residue() {
        let res = met(&["CG", "SD"]);
        match res.met_atoms() {
            Err(MetAromaticError::IncompleteResidue { residue, missing }) => {
                assert_eq!(residue, "MET18");
                assert_eq!(missing, vec!["CE".to_string()]);
            }
            other => panic!("Expected an incomplete residue, got {other:?}"),
        }
    }
}
