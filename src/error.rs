//! Error types for the rotorcrypt library.
//!
//! Every error is raised eagerly while a machine is assembled or configured.
//! Once assembled, routing a letter cannot fail.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, EnigmaError>;

/// Errors produced by the rotorcrypt library.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnigmaError {
    /// A character outside the machine alphabet was presented.
    #[error("Invalid symbol '{0}': not part of the machine alphabet")]
    InvalidSymbol(char),

    /// A wheel wiring is not a permutation of the alphabet.
    #[error("Invalid wiring for wheel '{name}': {reason}")]
    InvalidWiring { name: String, reason: String },

    /// A turnover notch references a symbol outside the alphabet.
    #[error("Invalid notch '{notch}' for wheel '{name}'")]
    InvalidNotch { name: String, notch: char },

    /// One or more letters would be plugged by more than one cable.
    #[error("Letters used by more than one cable: {letters}")]
    DuplicateLetter { letters: String },

    /// A cable is not exactly two letters.
    #[error("Cable '{cable}' must be a pair of letters")]
    MalformedCable { cable: String },

    /// A cable references symbols outside the alphabet.
    #[error("Invalid letters used for cable: {letters}")]
    InvalidLetter { letters: String },

    /// A position or ring-setting string does not match the wheel count.
    #[error("Expected {expected} settings (one per wheel), got {actual}")]
    ConfigurationLengthMismatch { expected: usize, actual: usize },

    /// A ring setting outside `[1, 26]`.
    #[error("Invalid ring setting '{0}': must be between 1 and 26 (A-Z)")]
    InvalidRingPosition(String),

    /// The wheel stack cannot form a working machine.
    #[error("Invalid machine layout: {0}")]
    InvalidMachineLayout(String),

    /// A wheel name missing from the historical registry.
    #[error("Unknown wheel specification '{0}'")]
    UnknownSpec(String),

    /// A machine configuration document could not be decoded.
    #[error("Invalid machine configuration: {0}")]
    InvalidConfig(String),
}

impl From<serde_json::Error> for EnigmaError {
    fn from(err: serde_json::Error) -> Self {
        EnigmaError::InvalidConfig(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_invalid_symbol() {
        let err = EnigmaError::InvalidSymbol('?');
        assert_eq!(
            format!("{}", err),
            "Invalid symbol '?': not part of the machine alphabet"
        );
    }

    #[test]
    fn test_display_duplicate_letter() {
        let err = EnigmaError::DuplicateLetter {
            letters: "AB".to_string(),
        };
        assert_eq!(format!("{}", err), "Letters used by more than one cable: AB");
    }

    #[test]
    fn test_display_length_mismatch() {
        let err = EnigmaError::ConfigurationLengthMismatch {
            expected: 4,
            actual: 3,
        };
        assert_eq!(
            format!("{}", err),
            "Expected 4 settings (one per wheel), got 3"
        );
    }

    #[test]
    fn test_display_unknown_spec() {
        let err = EnigmaError::UnknownSpec("IX".to_string());
        assert_eq!(format!("{}", err), "Unknown wheel specification 'IX'");
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(
            EnigmaError::InvalidSymbol('1'),
            EnigmaError::InvalidSymbol('1')
        );
        assert_ne!(
            EnigmaError::InvalidSymbol('1'),
            EnigmaError::InvalidRingPosition("1".to_string())
        );
    }

    #[test]
    fn test_json_error_maps_to_invalid_config() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: EnigmaError = json_err.into();
        assert!(matches!(err, EnigmaError::InvalidConfig(_)));
    }
}
