use super::{format_network, Network};
use crate::errors::MetAromaticError;

use std::fmt;

/// Topological relationship between an aromatic chain and a bridge network.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Relationship {
    /// The chain and the bridge share no residue
    NoRelationship,
    /// Every chain residue belongs to the bridge
    Pseudomembership,
    /// The bridge lies entirely inside the chain
    DirectSuperimposition,
    /// The chain and the bridge overlap partially
    IndirectSuperimposition,
    /// None of the rules applied
    Unknown,
}

impl Relationship {
    pub const ALL: [Relationship; 5] = [
        Relationship::NoRelationship,
        Relationship::Pseudomembership,
        Relationship::DirectSuperimposition,
        Relationship::IndirectSuperimposition,
        Relationship::Unknown,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Relationship::NoRelationship => "NR",
            Relationship::Pseudomembership => "PM",
            Relationship::DirectSuperimposition => "DS",
            Relationship::IndirectSuperimposition => "IS",
            Relationship::Unknown => "UC",
        }
    }

    /// Apply the relationship rules in order of precedence.
    pub fn between(chain: &Network, bridge: &Network) -> Self {
        let common: Network = chain.intersection(bridge).copied().collect();
        if common.is_empty() {
            Relationship::NoRelationship
        } else if chain.is_subset(bridge) {
            Relationship::Pseudomembership
        } else if common == *bridge {
            Relationship::DirectSuperimposition
        } else if common.first().is_some_and(|l| bridge.contains(l)) {
            Relationship::IndirectSuperimposition
        } else {
            Relationship::Unknown
        }
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// One classified (chain, bridge) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    pub bridge: Network,
    pub chain: Network,
    pub relationship: Relationship,
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} : {} : {}",
            self.relationship,
            format_network(&self.bridge),
            format_network(&self.chain)
        )
    }
}

/// Classify every (chain, bridge) pair, chain-major.
///
/// Both inputs are put in canonical order first, so the result does not depend on the
/// order they were given in. A pair no rule covers is reported as an error.
pub fn classify(
    chains: &[Network],
    bridges: &[Network],
) -> Result<Vec<Comparison>, MetAromaticError> {
    let mut chains = chains.to_vec();
    chains.sort();
    let mut bridges = bridges.to_vec();
    bridges.sort();

    let mut comparisons = Vec::with_capacity(chains.len() * bridges.len());
    for chain in &chains {
        for bridge in &bridges {
            let relationship = Relationship::between(chain, bridge);
            if relationship == Relationship::Unknown {
                return Err(MetAromaticError::InvariantViolation(format!(
                    "no relationship between chain {} and bridge {}",
                    format_network(chain),
                    format_network(bridge)
                )));
            }
            comparisons.push(Comparison {
                bridge: bridge.clone(),
                chain: chain.clone(),
                relationship,
            });
        }
    }
    Ok(comparisons)
}
