//! Vector geometry for reconstructing methionine SD lone pairs.
//!
//! The sulfur of methionine is modelled as the center of a tetrahedron whose two
//! known vertices are the CG and CE carbons. The remaining two vertices point along
//! the sulfur lone pairs and are recovered with one of two constructions.

use nalgebra as na;
use std::f64::consts::FRAC_PI_2;

/// Bonds shorter than this, or bond pairs closer to collinear than this, are rejected.
const DEGENERATE_EPS: f64 = 1e-6;

/// Construction used to place the two SD lone pairs.
#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LonePairMethod {
    /// Bisector plus scaled cross product of the two C-S bonds
    #[default]
    #[value(name = "cp")]
    CrossProduct,
    /// Rotate the flipped C-S bonds 90 degrees about their bisector
    #[value(name = "rm")]
    Rodrigues,
}

impl std::fmt::Display for LonePairMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            LonePairMethod::CrossProduct => write!(f, "cp"),
            LonePairMethod::Rodrigues => write!(f, "rm"),
        }
    }
}

/// Unit vectors parallel to the two SD lone pairs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LonePairs {
    pub a: na::Vector3<f64>,
    pub g: na::Vector3<f64>,
}

impl LonePairMethod {
    /// Compute lone pair directions from the CG, SD, and CE positions.
    pub fn lone_pairs(
        &self,
        cg: &na::Vector3<f64>,
        sd: &na::Vector3<f64>,
        ce: &na::Vector3<f64>,
    ) -> Result<LonePairs, String> {
        let u = ce - sd;
        let v = cg - sd;
        check_bonds(&u, &v)?;

        let (a, g) = match self {
            LonePairMethod::CrossProduct => cross_product_vertices(&u, &v),
            LonePairMethod::Rodrigues => rodrigues_vertices(&u, &v),
        };
        Ok(LonePairs {
            a: a.try_normalize(DEGENERATE_EPS)
                .ok_or_else(|| "lone pair vector a vanished".to_string())?,
            g: g.try_normalize(DEGENERATE_EPS)
                .ok_or_else(|| "lone pair vector g vanished".to_string())?,
        })
    }
}

fn check_bonds(u: &na::Vector3<f64>, v: &na::Vector3<f64>) -> Result<(), String> {
    let (nu, nv) = (u.norm(), v.norm());
    if nu < DEGENERATE_EPS || nv < DEGENERATE_EPS {
        return Err("coincident sulfur and carbon atoms".to_string());
    }
    if (u / nu).cross(&(v / nv)).norm() < DEGENERATE_EPS {
        return Err("collinear CG, SD, and CE atoms".to_string());
    }
    Ok(())
}

fn cross_product_vertices(
    u: &na::Vector3<f64>,
    v: &na::Vector3<f64>,
) -> (na::Vector3<f64>, na::Vector3<f64>) {
    let not_vec = (-0.5 * (v.normalize() + u.normalize())).normalize();
    let a = not_vec + std::f64::consts::SQRT_2 * u.cross(v).normalize();
    let g = not_vec + std::f64::consts::SQRT_2 * v.cross(u).normalize();
    (a, g)
}

fn rodrigues_vertices(
    u: &na::Vector3<f64>,
    v: &na::Vector3<f64>,
) -> (na::Vector3<f64>, na::Vector3<f64>) {
    let flip_u = -u;
    let flip_v = -v;
    let axis = (0.5 * (flip_u + flip_v)).normalize();
    let rot = rodrigues_matrix(&axis, FRAC_PI_2);
    (rot * flip_v, rot * flip_u)
}

/// Rotation matrix `I + sin(θ)W + (1 - cos(θ))W²` about a unit axis.
pub fn rodrigues_matrix(axis: &na::Vector3<f64>, theta: f64) -> na::Matrix3<f64> {
    let w = axis.cross_matrix();
    na::Matrix3::identity() + theta.sin() * w + (1.0 - theta.cos()) * (w * w)
}

/// Angle between two vectors in degrees, in `[0, 180]`.
pub fn angle_between(u: &na::Vector3<f64>, v: &na::Vector3<f64>) -> f64 {
    let cos = u.dot(v) / (u.norm() * v.norm());
    cos.clamp(-1.0, 1.0).acos().to_degrees()
}

/// Mean of a set of points.
pub fn centroid(points: &[na::Vector3<f64>]) -> na::Vector3<f64> {
    let sum: na::Vector3<f64> = points.iter().sum();
    sum / points.len() as f64
}

/// Midpoints of consecutive hexagon vertices, wrapping the last onto the first.
pub fn hexagon_midpoints(ring: &[na::Vector3<f64>; 6]) -> [na::Vector3<f64>; 6] {
    std::array::from_fn(|i| 0.5 * (ring[i] + ring[(i + 1) % 6]))
}
