use crate::structure::{Atom as MaAtom, Residue as MaResidue, ResidueKind};
use nalgebra as na;
use pdbtbx::*;

pub trait ResidueExt {
    /// The residue one-letter code, or `None` if it's not an amino acid.
    fn resn(&self) -> Option<&str>;

    /// The residue kind as seen by the Met-aromatic algorithm.
    fn kind(&self) -> ResidueKind;

    /// Return the atoms the algorithm needs for this residue: CG, SD, and CE for
    /// methionine, the six-membered ring for aromatics, and nothing otherwise.
    fn met_aromatic_atoms(&self) -> Vec<&Atom>;

    /// Convert into the typed residue model, keeping only the atoms of interest.
    fn to_residue(&self, chain: &str) -> MaResidue;
}

impl ResidueExt for Residue {
    fn resn(&self) -> Option<&str> {
        let aa_code = match self.name().unwrap_or("").to_uppercase().as_str() {
            "ALA" => "A",
            "ARG" => "R",
            "ASN" => "N",
            "ASP" => "D",
            "CYS" => "C",
            "GLN" => "Q",
            "GLU" => "E",
            "GLY" => "G",
            "HIS" => "H",
            "ILE" => "I",
            "LEU" => "L",
            "LYS" => "K",
            "MET" => "M",
            "PHE" => "F",
            "PRO" => "P",
            "SER" => "S",
            "THR" => "T",
            "TRP" => "W",
            "TYR" => "Y",
            "VAL" => "V",
            _ => "X",
        };

        match aa_code {
            "X" => None,
            _ => Some(aa_code),
        }
    }

    fn kind(&self) -> ResidueKind {
        ResidueKind::from_name(self.name().unwrap_or(""))
    }

    fn met_aromatic_atoms(&self) -> Vec<&Atom> {
        let wanted = self.kind().required_atoms();
        let mut atoms: Vec<&Atom> = Vec::with_capacity(wanted.len());
        // Alternate conformers repeat atom names, keep the first one seen
        for atom in self.atoms() {
            if wanted.iter().any(|w| *w == atom.name())
                && !atoms.iter().any(|a| a.name() == atom.name())
            {
                atoms.push(atom);
            }
        }
        atoms
    }

    fn to_residue(&self, chain: &str) -> MaResidue {
        let atoms = self
            .met_aromatic_atoms()
            .into_iter()
            .map(|atom| {
                let (x, y, z) = atom.pos();
                MaAtom {
                    name: atom.name().to_string(),
                    element: atom.element().map(|e| e.symbol().to_string()),
                    pos: na::Vector3::new(x, y, z),
                }
            })
            .collect();
        MaResidue::new(self.kind(), self.serial_number(), chain, atoms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::load_model;

    #[test]
    fn test_fixture_residues() {
        let root = env!("CARGO_MANIFEST_DIR");
        let path = format!("{}/{}", root, "test-data/bridge.pdb");
        let (pdb, _) = load_model(&path).unwrap();

        let chain = pdb.model(0).unwrap().chains().find(|c| c.id() == "A").unwrap();
        let met10 = chain.residues().find(|r| r.serial_number() == 10).unwrap();
        assert_eq!(met10.kind(), ResidueKind::Met);
        assert_eq!(met10.resn(), Some("M"));

        let names: Vec<&str> = met10.met_aromatic_atoms().iter().map(|a| a.name()).collect();
        assert_eq!(names.len(), 3);
        for name in ["CG", "SD", "CE"] {
            assert!(names.contains(&name), "{name} missing from {names:?}");
        }

        let trp30 = chain.residues().find(|r| r.serial_number() == 30).unwrap();
        let residue = trp30.to_residue("A");
        assert_eq!(residue.kind, ResidueKind::Trp);
        assert_eq!(residue.atoms.len(), 6);
        assert!(residue.ring_atoms().is_ok());
        assert_eq!(residue.atoms[0].element.as_deref(), Some("C"));
    }
}
