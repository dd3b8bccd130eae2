//! Error types for the raid engine.
//!
//! Only caller contract violations and unusable data surface as errors.
//! Recoverable data problems (a stat change without a value, an unknown move
//! name) are logged and recorded on the move result instead.

use std::fmt;

/// Main error type for the raid engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The caller asked for something the rules forbid (e.g. a raider using a
    /// boss-only action)
    IllegalAction(String),
    /// Combatant slot outside the state
    InvalidSlot(usize),
    /// Move name not present in the catalog
    UnknownMove(String),
    /// Species name not present in the catalog
    UnknownSpecies(String),
    /// Catalog or script data could not be parsed
    Catalog(String),
    /// The sequential-condition loop of a roll tracker hit its iteration cap
    DidNotConverge { iterations: usize },
}

pub type Result<T> = std::result::Result<T, EngineError>;

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::IllegalAction(details) => write!(f, "Illegal action: {}", details),
            EngineError::InvalidSlot(slot) => write!(f, "Invalid combatant slot: {}", slot),
            EngineError::UnknownMove(name) => write!(f, "Move not found: {}", name),
            EngineError::UnknownSpecies(name) => write!(f, "Species not found: {}", name),
            EngineError::Catalog(details) => write!(f, "Malformed data: {}", details),
            EngineError::DidNotConverge { iterations } => write!(
                f,
                "Roll distribution did not converge after {} iterations",
                iterations
            ),
        }
    }
}

impl std::error::Error for EngineError {}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        EngineError::Catalog(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EngineError::IllegalAction("Raider 2 used Activate Shield".to_string());
        assert_eq!(
            format!("{}", err),
            "Illegal action: Raider 2 used Activate Shield"
        );

        let err = EngineError::DidNotConverge { iterations: 10 };
        assert_eq!(
            format!("{}", err),
            "Roll distribution did not converge after 10 iterations"
        );
    }

    #[test]
    fn test_from_serde_error() {
        let parse: std::result::Result<Vec<u8>, serde_json::Error> = serde_json::from_str("[1,");
        let err: EngineError = parse.unwrap_err().into();
        assert!(matches!(err, EngineError::Catalog(_)));
    }
}
