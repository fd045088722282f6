//! Error types
//!
//! Everything that can fail does so at construction time. Once a match is
//! running, stepping it is total.

/// Errors raised while building simulation objects
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SimError {
    #[error("measure of a full revolution must be nonzero and finite")]
    ZeroModulus,

    #[error("unrecognized arena layout id: {0}")]
    UnknownLayout(u32),

    #[error("invalid rules: {0}")]
    InvalidRules(String),

    #[error("unrecognized brain name: {0}")]
    UnknownBrain(String),
}

/// Errors raised while loading rules from disk
#[derive(Debug, thiserror::Error)]
pub enum RulesError {
    #[error("failed to read rules file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse rules: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] SimError),
}
