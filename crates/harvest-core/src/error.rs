//! # Error Types
//!
//! Domain-specific error types for harvest-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  harvest-core errors (this file)                                       │
//! │  ├── CoreError        - Cart / checkout rule violations                │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  harvest-api errors (separate crate)                                   │
//! │  └── ApiError         - Transport / envelope / auth failures           │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → caller-facing message             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product id, field name)
//! 3. Errors are enum variants, never String
//! 4. A failed operation leaves cart state untouched

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations. They should be caught
/// and translated to user-friendly messages by the consuming layer.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The item's stock snapshot forbids a quantity increase.
    ///
    /// ## When This Occurs
    /// - Incrementing a line item whose `in_stock` was false at add time
    #[error("'{name}' is out of stock, cannot increase quantity")]
    OutOfStock { id: String, name: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Invalid format (e.g., unparsable number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
