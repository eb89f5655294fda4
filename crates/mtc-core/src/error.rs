//! # Error Types
//!
//! Domain-specific error types for mtc-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  mtc-core errors (this file)                                           │
//! │  ├── PriceCodeError   - Malformed / unencodable price codes            │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  mtc-db errors (separate crate)                                        │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  API errors (apps/api)                                                 │
//! │  └── ApiError         - What HTTP clients see (serialized)             │
//! │                                                                         │
//! │  Flow: PriceCodeError / ValidationError → ApiError → Client            │
//! │        sqlx::Error → DbError → ApiError → Client                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Price Code Error
// =============================================================================

/// Why a price code could not be produced or read.
///
/// A successful decode of `"S"` is `Ok(0)`; every failure is one of these
/// variants, so "malformed" is never confused with "zero".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceCodeError {
    /// Code is empty or whitespace only.
    #[error("price code is empty")]
    Empty,

    /// Code contains a letter outside the digit alphabet.
    #[error("invalid character '{character}' at position {position} in price code")]
    InvalidCharacter { character: char, position: usize },

    /// Decoded value exceeds `max` whole units.
    #[error("price code '{code}' is too large: at most {max} units can be decoded")]
    Overflow { code: String, max: u64 },

    /// Negative amounts have no code representation.
    #[error("cannot encode negative amount {cents} cents")]
    NegativeAmount { cents: i64 },
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., invalid UUID).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_code_error_messages() {
        let err = PriceCodeError::InvalidCharacter {
            character: 'X',
            position: 2,
        };
        assert_eq!(
            err.to_string(),
            "invalid character 'X' at position 2 in price code"
        );
        assert_eq!(PriceCodeError::Empty.to_string(), "price code is empty");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "code".to_string(),
        };
        assert_eq!(err.to_string(), "code is required");

        let err = ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        };
        assert_eq!(err.to_string(), "name must be at most 200 characters");
    }
}
