//! # Error Types
//!
//! Domain-specific error types for tipsplit-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tipsplit-core errors (this file)                                      │
//! │  ├── AllocationIssue  - Recovered inside the engine, reported as data  │
//! │  ├── CoreError        - Form operations that can be refused            │
//! │  └── ValidationError  - Strict input validation failures               │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── ConfigError      - Bad TIPSPLIT_* environment values              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. The allocation engine never returns `Err`; it recovers and records
//!    an [`AllocationIssue`] instead
//! 3. Errors are enum variants, never String

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

// =============================================================================
// Allocation Issues
// =============================================================================

/// A malformed-input condition the allocation engine recovered from.
///
/// These are attached to [`crate::Allocation::issues`] so a front end can
/// surface a hint, but they never stop a calculation.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export)]
pub enum AllocationIssue {
    /// The participant count was below 1 and was clamped to 1.
    #[error("participant count {requested} is below 1, using 1")]
    InvalidParticipantCount { requested: i64 },

    /// Weighted split with every weight at zero.
    ///
    /// Every participant but the last gets nothing and the last absorbs the
    /// whole bill as the remainder.
    #[error("all split weights are zero, the last participant absorbs the bill")]
    DegenerateWeights,
}

// =============================================================================
// Core Error
// =============================================================================

/// Errors from operations that edit a bill form.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The roster would exceed the maximum participant count.
    #[error("Cannot split between {requested} people (maximum {max})")]
    TooManyParticipants { requested: i64, max: i64 },

    /// The bill already has the maximum number of line items.
    #[error("Bill cannot have more than {max} items")]
    TooManyLineItems { max: usize },

    /// No line item exists at this 1-based position.
    #[error("Item {0} not found")]
    ItemNotFound(usize),

    /// No participant exists at this 1-based position.
    #[error("Person {0} not found")]
    ParticipantNotFound(usize),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised by the strict validators in [`crate::validation`] and by
/// parsing of enumerated settings such as the currency code.
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

    /// Invalid format.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_messages() {
        let issue = AllocationIssue::InvalidParticipantCount { requested: -2 };
        assert_eq!(issue.to_string(), "participant count -2 is below 1, using 1");
        assert_eq!(
            AllocationIssue::DegenerateWeights.to_string(),
            "all split weights are zero, the last participant absorbs the bill"
        );
    }

    #[test]
    fn test_issue_serializes_with_kind_tag() {
        let json = serde_json::to_string(&AllocationIssue::InvalidParticipantCount { requested: 0 })
            .unwrap();
        assert_eq!(json, r#"{"kind":"invalid_participant_count","requested":0}"#);
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::TooLong {
            field: "name".to_string(),
            max: 50,
        };
        assert_eq!(err.to_string(), "name must be at most 50 characters");

        let err = ValidationError::OutOfRange {
            field: "people".to_string(),
            min: 1,
            max: 100,
        };
        assert_eq!(err.to_string(), "people must be between 1 and 100");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "currency".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }

    #[test]
    fn test_core_error_messages() {
        let err = CoreError::TooManyParticipants {
            requested: 500,
            max: 100,
        };
        assert_eq!(err.to_string(), "Cannot split between 500 people (maximum 100)");
        assert_eq!(CoreError::ItemNotFound(3).to_string(), "Item 3 not found");
    }
}
