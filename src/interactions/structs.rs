use crate::structure::ResidueLabel;
use core::fmt;

/// A methionine SD lone pair pointing at an aromatic ring.
#[derive(Debug, Clone, PartialEq)]
pub struct Interaction {
    pub aromatic: ResidueLabel,
    pub methionine: ResidueLabel,
    /// Norm of the vector from SD to the ring point
    pub norm: f64,
    /// Angle between the SD-ring vector and lone pair a
    pub met_theta: f64,
    /// Angle between the SD-ring vector and lone pair g
    pub met_phi: f64,
}

impl Interaction {
    /// The (aromatic, methionine) edge this interaction contributes to the interaction graph.
    pub fn edge(&self) -> (ResidueLabel, ResidueLabel) {
        (self.aromatic, self.methionine)
    }
}

impl fmt::Display for Interaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{aro} {aro_resi} {met} {met_resi} {norm:.3} {theta:.3} {phi:.3}",
            aro = self.aromatic.kind,
            aro_resi = self.aromatic.resi,
            met = self.methionine.kind,
            met_resi = self.methionine.resi,
            norm = self.norm,
            theta = self.met_theta,
            phi = self.met_phi
        )
    }
}
