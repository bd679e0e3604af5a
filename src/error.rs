//! Error types for plug and parameter operations

use thiserror::Error;

/// Errors returned by plug and parameter operations.
///
/// Every variant is local and recoverable: it is reported to the
/// immediate caller and never poisons the holder or the parameter set.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PlugError {
    /// A value of the wrong type was assigned to a plug or parameter
    #[error("type mismatch on \"{name}\": expected {expected}, got {actual}")]
    TypeMismatch {
        name: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// A pushed value was rejected by the parameter's own constraints
    #[error("validation failed for parameter \"{parameter}\": {reason}")]
    Validation { parameter: String, reason: String },

    /// Lookup of a plug name that was never bound or was skipped
    #[error("no plug named \"{name}\"")]
    Missing { name: String },
}
