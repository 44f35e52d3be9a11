use crate::residues::ResidueExt;
use crate::structure::{Residue as MaResidue, ResidueKind};
use pdbtbx::*;

pub trait ChainExt {
    fn pdb_seq(&self) -> Vec<&str>;

    /// Methionine and aromatic residues of the chain, in sequence order.
    fn met_aromatic_residues(&self) -> Vec<MaResidue>;
}

impl ChainExt for Chain {
    fn pdb_seq(&self) -> Vec<&str> {
        // Load the amino acid sequence for each chain
        self.residues().map(|res| res.resn().unwrap_or("X")).collect()
    }

    fn met_aromatic_residues(&self) -> Vec<MaResidue> {
        self.residues()
            .filter(|res| res.kind() != ResidueKind::Other)
            .map(|res| res.to_residue(self.id()))
            .collect()
    }
}
