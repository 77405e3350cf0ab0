//! # Error Types
//!
//! Domain-specific error types for tierprice-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tierprice-core errors (this file)                                      │
//! │  ├── CoreError        - Malformed product records, bad input            │
//! │  ├── ValidationError  - Input validation failures                       │
//! │  └── TierViolation    - Tier ladder problems, reported as DATA          │
//! │                                                                         │
//! │  CLI errors (separate crate)                                            │
//! │  └── CliError         - What the operator sees                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Note on TierViolation
//! The tier validator never fails. It returns a list of `TierViolation`
//! values and leaves it to the caller to decide whether a non-empty list
//! blocks an action (e.g. saving a product).

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core errors raised around the pricing logic.
///
/// The calculator itself has no failure path; these cover the inputs that
/// reach it.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The product record could not be read at all.
    ///
    /// ## When This Occurs
    /// - Document is not JSON
    /// - Top-level value is not an object
    /// - Base `price` is missing or not a number
    ///
    /// A malformed *tier list* is NOT this error; it degrades to base pricing
    /// and shows up as [`TierViolation::Malformed`].
    #[error("Invalid product record: {0}")]
    InvalidProduct(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    #[error("{field} cannot be negative")]
    Negative { field: String },
}

// =============================================================================
// Tier Violation
// =============================================================================

/// A single problem found in a tier ladder.
///
/// Tiers are identified by their 1-based position after sorting by minimum
/// quantity, together with their formatted range (`"10 - 49"`, `"50+"`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TierViolation {
    #[error("Tier {position} ({range}): minimum quantity must be at least 1, got {min_quantity}")]
    MinQuantityTooLow {
        position: usize,
        range: String,
        min_quantity: i64,
    },

    #[error("Tier {position} ({range}): price cannot be negative")]
    NegativePrice { position: usize, range: String },

    #[error("Tier {position} ({range}): discount percentage must be between 0 and 100, got {percentage}")]
    DiscountOutOfRange {
        position: usize,
        range: String,
        percentage: String,
    },

    #[error("Tier {position} ({range}): maximum quantity {max_quantity} is less than minimum quantity {min_quantity}")]
    MaxBelowMin {
        position: usize,
        range: String,
        min_quantity: i64,
        max_quantity: i64,
    },

    /// Two adjacent tiers share quantities.
    #[error("Tier {position} ({range}) overlaps with tier {next_position} ({next_range})")]
    Overlap {
        position: usize,
        range: String,
        next_position: usize,
        next_range: String,
    },

    /// Only the last tier may be open-ended.
    #[error("Tier {position} ({range}) has no maximum quantity but is followed by tier {next_position}; only the last tier may be unbounded")]
    UnboundedNotLast {
        position: usize,
        range: String,
        next_position: usize,
    },

    /// The product's tier list was present but could not be read, so it
    /// was dropped.
    #[error("Quantity pricing tiers could not be read: {reason}")]
    Malformed { reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
