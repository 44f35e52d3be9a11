use std::fmt;

/// Errors raised while detecting and classifying Met-aromatic networks.
#[derive(Debug, Clone, PartialEq)]
pub enum MetAromaticError {
    /// Collinear or coincident atoms prevent lone pair construction
    DegenerateGeometry { residue: String, reason: String },
    /// A residue lacks atoms required for its kind
    IncompleteResidue { residue: String, missing: Vec<String> },
    /// The structure provider could not locate the structure
    StructureNotFound(String),
    /// The structure was found but could not be read
    StructureLoad { structure: String, reason: String },
    /// A classification reached a state that valid inputs never produce
    InvariantViolation(String),
    /// Rejected configuration values
    InvalidSettings(String),
    /// A result table could not be written
    Output { path: String, reason: String },
    /// A result table could not be assembled
    Table(String),
}

impl fmt::Display for MetAromaticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetAromaticError::DegenerateGeometry { residue, reason } => {
                write!(f, "Degenerate geometry in {residue}: {reason}")
            }
            MetAromaticError::IncompleteResidue { residue, missing } => {
                write!(f, "Residue {residue} is missing atoms {}", missing.join(","))
            }
            MetAromaticError::StructureNotFound(id) => write!(f, "Structure not found: {id}"),
            MetAromaticError::StructureLoad { structure, reason } => {
                write!(f, "Failed to load structure {structure}: {reason}")
            }
            MetAromaticError::InvariantViolation(msg) => {
                write!(f, "Invariant violated: {msg}")
            }
            MetAromaticError::InvalidSettings(msg) => write!(f, "Invalid settings: {msg}"),
            MetAromaticError::Output { path, reason } => {
                write!(f, "Failed to write {path}: {reason}")
            }
            MetAromaticError::Table(msg) => write!(f, "Failed to build table: {msg}"),
        }
    }
}

impl std::error::Error for MetAromaticError {}

impl From<polars::error::PolarsError> for MetAromaticError {
    fn from(e: polars::error::PolarsError) -> Self {
        MetAromaticError::Table(e.to_string())
    }
}
