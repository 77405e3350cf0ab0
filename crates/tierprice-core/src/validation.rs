//! # Validation Module
//!
//! Tier ladder validation and input checks.
//!
//! ## Two Kinds of Validation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  validate_tiers()        Reports EVERY problem in a ladder as data.     │
//! │  ├── per tier: min >= 1, price >= 0, 0 <= discount <= 100, max >= min   │
//! │  └── per adjacent pair: no overlap, only the last tier unbounded        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Caller decides: block the save, warn, or quote anyway                  │
//! │                                                                         │
//! │  validate_quantity()     Fails fast on the first bad input (Result).    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tierprice_core::validation::{validate_quantity, validate_tiers};
//!
//! assert!(validate_tiers(&[]).is_empty());
//! assert!(validate_quantity(25).is_ok());
//! ```

use crate::error::{TierViolation, ValidationError};
use crate::money::Money;
use crate::pricing::list_tiers_sorted;
use crate::types::QuantityPricingTier;
use crate::{MAX_QUOTE_QUANTITY, MIN_TIER_QUANTITY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Tier Ladder Validation
// =============================================================================

/// Checks a tier ladder and returns every violation found.
///
/// The checks run against a copy sorted by `min_quantity`; the input is not
/// touched. Tiers are named by their 1-based position in that order. An
/// empty result means the ladder is valid.
///
/// ## Checks
/// - Per tier: `min_quantity >= 1`, `price >= 0`, discount within 0-100%,
///   `max_quantity >= min_quantity` when present
/// - Per adjacent pair: `current.max < next.min`, and a tier without a max
///   must be the last one
///
/// ## Example
/// ```rust
/// use tierprice_core::{validate_tiers, DiscountRate, Money, QuantityPricingTier, TierViolation};
///
/// let tiers = vec![
///     QuantityPricingTier::new(1, Some(10), Money::from_cents(1000), DiscountRate::zero()),
///     QuantityPricingTier::new(5, Some(20), Money::from_cents(900), DiscountRate::zero()),
/// ];
/// let violations = validate_tiers(&tiers);
/// assert!(matches!(violations[0], TierViolation::Overlap { .. }));
/// ```
pub fn validate_tiers(tiers: &[QuantityPricingTier]) -> Vec<TierViolation> {
    let sorted = list_tiers_sorted(tiers);
    let mut violations = Vec::new();

    for (index, tier) in sorted.iter().enumerate() {
        let position = index + 1;
        let range = tier.quantity_range();

        if tier.min_quantity < MIN_TIER_QUANTITY {
            violations.push(TierViolation::MinQuantityTooLow {
                position,
                range: range.clone(),
                min_quantity: tier.min_quantity,
            });
        }

        if validate_price(tier.price).is_err() {
            violations.push(TierViolation::NegativePrice {
                position,
                range: range.clone(),
            });
        }

        if !tier.discount_percentage.is_in_range() {
            violations.push(TierViolation::DiscountOutOfRange {
                position,
                range: range.clone(),
                percentage: tier.discount_percentage.to_string(),
            });
        }

        if let Some(max) = tier.max_quantity {
            if max < tier.min_quantity {
                violations.push(TierViolation::MaxBelowMin {
                    position,
                    range: range.clone(),
                    min_quantity: tier.min_quantity,
                    max_quantity: max,
                });
            }
        }

        let Some(next) = sorted.get(index + 1) else {
            continue;
        };

        match tier.max_quantity {
            Some(max) if max >= next.min_quantity => {
                violations.push(TierViolation::Overlap {
                    position,
                    range,
                    next_position: position + 1,
                    next_range: next.quantity_range(),
                });
            }
            Some(_) => {}
            None => {
                violations.push(TierViolation::UnboundedNotLast {
                    position,
                    range,
                    next_position: position + 1,
                });
            }
        }
    }

    violations
}

/// Same as [`validate_tiers`], rendered as human-readable messages.
pub fn validate_tier_messages(tiers: &[QuantityPricingTier]) -> Vec<String> {
    validate_tiers(tiers)
        .iter()
        .map(ToString::to_string)
        .collect()
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity before quoting.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_QUOTE_QUANTITY
///
/// The calculator accepts any quantity; this is for callers that want to
/// reject obviously wrong input (e.g. a typo in the quantity box) first.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_QUOTE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_QUOTE_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a unit price. Zero is allowed (free tier); any amount below
/// zero is not, however small.
///
/// ## Example
/// ```rust
/// use rust_decimal::Decimal;
/// use tierprice_core::money::Money;
/// use tierprice_core::validation::validate_price;
///
/// assert!(validate_price(Money::from_cents(1099)).is_ok());
/// assert!(validate_price(Money::zero()).is_ok());
/// assert!(validate_price(Money::new(Decimal::new(-4, 3))).is_err());
/// ```
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
