use super::structs::Interaction;
use crate::errors::MetAromaticError;
use crate::geometry::{angle_between, centroid, hexagon_midpoints, LonePairs};
use crate::settings::{InteractionSettings, RingPoints};
use crate::structure::{Residue, ResidueKind, ResidueLabel};

use nalgebra as na;
use tracing::{trace, warn};

/// A methionine with its sulfur position and lone pairs resolved.
struct MetSite<'a> {
    label: ResidueLabel,
    chain: &'a str,
    sd: na::Vector3<f64>,
    lone_pairs: LonePairs,
}

/// An aromatic residue with the ring points tested against each methionine.
struct AromaticSite<'a> {
    label: ResidueLabel,
    chain: &'a str,
    points: Vec<na::Vector3<f64>>,
}

/// Identify all Met-aromatic interactions among the given residues.
///
/// Every methionine is paired with every aromatic residue of the same chain. A pair
/// interacts when the SD-to-ring vector `v` is no longer than the distance cutoff and
/// at least one lone pair lies within the angle cutoff of `v`.
///
/// Residues missing required atoms are skipped, as are methionines whose lone pairs
/// cannot be constructed.
pub fn detect_interactions(
    residues: &[Residue],
    settings: &InteractionSettings,
) -> Vec<Interaction> {
    let mets: Vec<MetSite> = residues
        .iter()
        .filter(|r| r.kind == ResidueKind::Met)
        .filter_map(|r| match met_site(r, settings) {
            Ok(site) => Some(site),
            Err(e) => {
                match &e {
                    MetAromaticError::DegenerateGeometry { .. } => warn!("{e}"),
                    _ => trace!("Skipping: {e}"),
                }
                None
            }
        })
        .collect();

    let aromatics: Vec<AromaticSite> = residues
        .iter()
        .filter(|r| r.kind.is_aromatic())
        .filter_map(|r| match aromatic_site(r, settings.ring_points) {
            Ok(site) => Some(site),
            Err(e) => {
                trace!("Skipping: {e}");
                None
            }
        })
        .collect();

    let mut interactions = Vec::new();
    for met in &mets {
        for aro in aromatics.iter().filter(|a| a.chain == met.chain) {
            for point in &aro.points {
                let v = point - met.sd;
                let norm = v.norm();
                if norm > settings.distance_cutoff {
                    continue;
                }

                let met_theta = angle_between(&met.lone_pairs.a, &v);
                let met_phi = angle_between(&met.lone_pairs.g, &v);
                if met_theta <= settings.angle_cutoff || met_phi <= settings.angle_cutoff {
                    interactions.push(Interaction {
                        aromatic: aro.label,
                        methionine: met.label,
                        norm,
                        met_theta,
                        met_phi,
                    });
                }
            }
        }
    }
    interactions
}

fn met_site<'a>(
    residue: &'a Residue,
    settings: &InteractionSettings,
) -> Result<MetSite<'a>, MetAromaticError> {
    let [cg, sd, ce] = residue.met_atoms()?;
    let lone_pairs = settings
        .lone_pair_method
        .lone_pairs(&cg, &sd, &ce)
        .map_err(|reason| MetAromaticError::DegenerateGeometry {
            residue: residue.label().to_string(),
            reason,
        })?;
    Ok(MetSite {
        label: residue.label(),
        chain: residue.chain.as_str(),
        sd,
        lone_pairs,
    })
}

fn aromatic_site(
    residue: &Residue,
    ring_points: RingPoints,
) -> Result<AromaticSite<'_>, MetAromaticError> {
    let ring = residue.ring_atoms()?;
    let points = match ring_points {
        RingPoints::Centroid => vec![centroid(&ring)],
        RingPoints::EdgeMidpoints => hexagon_midpoints(&ring).to_vec(),
    };
    Ok(AromaticSite {
        label: residue.label(),
        chain: residue.chain.as_str(),
        points,
    })
}


#[cfg(test)]
mod tests {
    use super::fixtures::{lone_pair_directions, met, ring};
    use super::*;
    use crate::geometry::LonePairMethod;

    /// One methionine at the origin surrounded by rings at assorted distances and angles.
    fn scene() -> Vec<Residue> {
        let [lp1, lp2] = lone_pair_directions();
        let off_axis = na::Vector3::new(0.0, 0.0, 1.0);
        vec![
            met(1, na::Vector3::zeros()),
            ring(ResidueKind::Tyr, 10, lp1 * 4.0, lp1),
            ring(ResidueKind::Trp, 11, lp2 * 5.5, lp2),
            ring(ResidueKind::Phe, 12, off_axis * 4.5, off_axis),
            ring(ResidueKind::Tyr, 13, (lp1 + off_axis).normalize() * 5.0, lp1),
            ring(ResidueKind::Phe, 14, lp2 * 6.5, lp2),
            ring(ResidueKind::Tyr, 15, -lp1 * 3.0, lp1),
        ]
    }

    #[test]
    fn test_detects_lone_pair_aligned_rings() {
        let settings = InteractionSettings::default();
        let interactions = detect_interactions(&scene(), &settings);
        let labels: Vec<String> = interactions
            .iter()
            .map(|i| i.aromatic.to_string())
            .collect();

        // PHE12 sits 125 degrees from both lone pairs and PHE14 is out of range
        assert_eq!(labels, vec!["TYR10", "TRP11", "TYR13", "TYR15"]);
        assert!(interactions.iter().all(|i| i.methionine.to_string() == "MET1"));

        let tyr10 = interactions
            .iter()
            .find(|i| i.aromatic.to_string() == "TYR10")
            .unwrap();
        assert!((tyr10.norm - 4.0).abs() < 1e-9);
        assert!(tyr10.met_theta.min(tyr10.met_phi) < 1e-3);
        assert!((tyr10.met_theta.max(tyr10.met_phi) - 109.47).abs() < 0.01);
    }

    #[test]
    fn test_angular_condition() {
        let mut settings = InteractionSettings::default();
        settings.angle_cutoff = 30.0;
        let labels: Vec<String> = detect_interactions(&scene(), &settings)
            .iter()
            .map(|i| i.aromatic.to_string())
            .collect();
        assert_eq!(labels, vec!["TYR10", "TRP11"]);
    }

    #[test]
    fn test_monotonicity() {
        let residues = scene();
        for method in [LonePairMethod::CrossProduct, LonePairMethod::Rodrigues] {
            for ring_points in [RingPoints::Centroid, RingPoints::EdgeMidpoints] {
                let mut previous = usize::MAX;
                for dist in [8.0, 6.0, 5.0, 4.5, 3.0] {
                    let settings = InteractionSettings {
                        distance_cutoff: dist,
                        lone_pair_method: method,
                        ring_points,
                        ..Default::default()
                    };
                    let count = detect_interactions(&residues, &settings).len();
                    assert!(count <= previous, "{count} > {previous} at {dist} Å");
                    previous = count;
                }

                let mut previous = usize::MAX;
                for angle in [180.0, 120.0, 109.5, 60.0, 10.0, 0.0] {
                    let settings = InteractionSettings {
                        angle_cutoff: angle,
                        lone_pair_method: method,
                        ring_points,
                        ..Default::default()
                    };
                    let count = detect_interactions(&residues, &settings).len();
                    assert!(count <= previous, "{count} > {previous} at {angle} degrees");
                    previous = count;
                }
            }
        }
    }

    #[test]
    fn test_methods_agree_on_ideal_geometry() {
        let residues = scene();
        let cp = detect_interactions(&residues, &InteractionSettings::default());
        let rm = detect_interactions(
            &residues,
            &InteractionSettings {
                lone_pair_method: LonePairMethod::Rodrigues,
                ..Default::default()
            },
        );
        let cp_labels: Vec<_> = cp.iter().map(|i| i.aromatic).collect();
        let rm_labels: Vec<_> = rm.iter().map(|i| i.aromatic).collect();
        assert_eq!(cp_labels, rm_labels);
    }

    #[test]
    fn test_edge_midpoints_yield_six_points_per_ring() {
        let [lp1, _] = lone_pair_directions();
        let residues = vec![
            met(1, na::Vector3::zeros()),
            ring(ResidueKind::Tyr, 10, lp1 * 4.0, lp1),
        ];
        let settings = InteractionSettings {
            ring_points: RingPoints::EdgeMidpoints,
            ..Default::default()
        };
        let interactions = detect_interactions(&residues, &settings);
        assert_eq!(interactions.len(), 6);
        // Edge midpoints sit 1.39 * cos(30) Å from the ring center
        let expected = (16.0f64 + (1.39 * 3f64.sqrt() / 2.0).powi(2)).sqrt();
        assert!(interactions
            .iter()
            .all(|i| (i.norm - expected).abs() < 1e-6));

        let breakdown = crate::networks::bridges::order_breakdown(&interactions);
        assert_eq!(breakdown, std::collections::BTreeMap::from([(6, 1)]));
    }

    #[test]
    fn test_skips_incomplete_and_degenerate_residues() {
        let [lp1, _] = lone_pair_directions();
        let mut incomplete = met(2, na::Vector3::zeros());
        incomplete.atoms.retain(|a| a.name != "CE");

        let mut collinear = met(3, na::Vector3::zeros());
        collinear.atoms[0].pos = na::Vector3::new(1.8, 0.0, 0.0);
        collinear.atoms[2].pos = na::Vector3::new(-1.8, 0.0, 0.0);

        let mut broken_ring = ring(ResidueKind::Tyr, 11, lp1 * 4.0, lp1);
        broken_ring.atoms.pop();

        let residues = vec![
            incomplete,
            collinear,
            broken_ring,
            ring(ResidueKind::Tyr, 10, lp1 * 4.0, lp1),
        ];
        assert!(detect_interactions(&residues, &InteractionSettings::default()).is_empty());
    }

    #[test]
    fn test_other_chains_are_ignored() {
        let [lp1, _] = lone_pair_directions();
        let mut tyr = ring(ResidueKind::Tyr, 10, lp1 * 4.0, lp1);
        tyr.chain = "B".to_string();
        let residues = vec![met(1, na::Vector3::zeros()), tyr];
        assert!(detect_interactions(&residues, &InteractionSettings::default()).is_empty());
    }
}
