//! Error types for parsing and constructing conditions and fulfillments.
//!
//! Verification never produces an error.  A fulfillment that decoded cleanly
//! but doesn't satisfy a condition just makes `verify` return `false`, so
//! everything here is about inputs that can't be represented at all.
use cryptocond_der::DerError;
use thiserror::Error;

use crate::type_ids::CryptoConditionType;

/// Errors that can occur when decoding or building conditions and fulfillments.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ConditionError {
    // === Encoding Errors ===
    /// Input is not the canonical encoding of any value.
    #[error("malformed encoding: {0}")]
    MalformedEncoding(#[from] DerError),

    // === Type Errors ===
    /// Type ordinal not in the registry.
    #[error("unsupported condition type ordinal {0}")]
    UnsupportedTypeOrdinal(u64),

    /// Type name not in the registry.
    #[error("unsupported condition type name {0:?}")]
    UnsupportedTypeName(String),

    // === Structural Errors ===
    /// A structural rule for the given type was broken.
    #[error("constraint violated for {ty}: {reason}")]
    ConstraintViolation {
        /// The type whose rule was broken.
        ty: CryptoConditionType,
        /// What was wrong.
        reason: String,
    },
}

/// Coarse classification of a [`ConditionError`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// Truncated, non-canonical or otherwise unparseable bytes.
    MalformedEncoding,
    /// A type ordinal, name or subtype bit that isn't registered.
    UnsupportedType,
    /// A value that parsed but breaks a structural rule.
    ConstraintViolation,
}

impl ConditionError {
    /// Returns which category this error falls into.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConditionError::MalformedEncoding(_) => ErrorKind::MalformedEncoding,
            ConditionError::UnsupportedTypeOrdinal(_) | ConditionError::UnsupportedTypeName(_) => {
                ErrorKind::UnsupportedType
            }
            ConditionError::ConstraintViolation { .. } => ErrorKind::ConstraintViolation,
        }
    }

    pub(crate) fn constraint(ty: CryptoConditionType, reason: impl Into<String>) -> Self {
        ConditionError::ConstraintViolation {
            ty,
            reason: reason.into(),
        }
    }
}

/// Result type alias for condition operations.
pub type ConditionResult<T> = std::result::Result<T, ConditionError>;
