//! Run settings for detection, bridge extraction, and chain extraction.

use crate::errors::MetAromaticError;
use crate::geometry::LonePairMethod;
use crate::structure::ResidueKind;
use std::time::Duration;

/// Distance condition: SD to ring point, in Å
pub const DISTANCE_CUTOFF: f64 = 6.0;
/// Angular condition: lone pair to SD-ring vector, in degrees (tetrahedral angle)
pub const ANGLE_CUTOFF: f64 = 109.5;
/// Ring centroid separation for closely spaced aromatics, in Å
pub const CHAIN_DISTANCE_CUTOFF: f64 = 7.4;
/// A 2-bridge is one methionine bonded to exactly two aromatics
pub const BRIDGE_ORDER: usize = 2;
pub const CHAIN_IDENTIFIER: &str = "A";
pub const LOAD_TIMEOUT_SECS: u64 = 60;

/// Which points of an aromatic ring are tested against the methionine.
#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RingPoints {
    /// The mean of the six ring atoms
    #[default]
    Centroid,
    /// The six midpoints of the hexagon edges
    EdgeMidpoints,
}

#[derive(Clone, Debug, PartialEq)]
pub struct InteractionSettings {
    pub distance_cutoff: f64,
    pub angle_cutoff: f64,
    pub lone_pair_method: LonePairMethod,
    pub ring_points: RingPoints,
}

impl Default for InteractionSettings {
    fn default() -> Self {
        Self {
            distance_cutoff: DISTANCE_CUTOFF,
            angle_cutoff: ANGLE_CUTOFF,
            lone_pair_method: LonePairMethod::default(),
            ring_points: RingPoints::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BridgeSettings {
    /// Degree a methionine must have to form a bridge
    pub order: usize,
    /// Bridges with any partner of these kinds are dropped
    pub excluded_kinds: Vec<ResidueKind>,
}

impl Default for BridgeSettings {
    fn default() -> Self {
        Self {
            order: BRIDGE_ORDER,
            excluded_kinds: vec![ResidueKind::Phe],
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub interactions: InteractionSettings,
    pub bridges: BridgeSettings,
    pub chain_distance_cutoff: f64,
    /// Polymer chain to analyze
    pub chain_identifier: String,
    /// Upper bound on reading a single structure file
    pub load_timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            interactions: InteractionSettings::default(),
            bridges: BridgeSettings::default(),
            chain_distance_cutoff: CHAIN_DISTANCE_CUTOFF,
            chain_identifier: CHAIN_IDENTIFIER.to_string(),
            load_timeout: Duration::from_secs(LOAD_TIMEOUT_SECS),
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), MetAromaticError> {
        let cutoffs = [
            ("distance cutoff", self.interactions.distance_cutoff),
            ("angle cutoff", self.interactions.angle_cutoff),
            ("chain distance cutoff", self.chain_distance_cutoff),
        ];
        for (name, value) in cutoffs {
            if !value.is_finite() || value < 0.0 {
                return Err(MetAromaticError::InvalidSettings(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        if self.interactions.angle_cutoff > 180.0 {
            return Err(MetAromaticError::InvalidSettings(format!(
                "angle cutoff must not exceed 180 degrees, got {}",
                self.interactions.angle_cutoff
            )));
        }
        if self.bridges.order < 2 {
            return Err(MetAromaticError::InvalidSettings(format!(
                "bridge order must be at least 2, got {}",
                self.bridges.order
            )));
        }
        if self.chain_identifier.is_empty() {
            return Err(MetAromaticError::InvalidSettings(
                "chain identifier must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.interactions.distance_cutoff, 6.0);
        assert_eq!(settings.interactions.angle_cutoff, 109.5);
        assert_eq!(settings.chain_distance_cutoff, 7.4);
        assert_eq!(settings.chain_identifier, "A");
        assert_eq!(settings.bridges.order, 2);
        assert_eq!(
            settings.interactions.lone_pair_method,
            LonePairMethod::CrossProduct
        );
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_invalid_settings() {
        let mut settings = Settings::default();
        settings.bridges.order = 1;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.interactions.distance_cutoff = -1.0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.interactions.angle_cutoff = f64::NAN;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.chain_identifier = String::new();
        assert!(settings.validate().is_err());
    }
}
