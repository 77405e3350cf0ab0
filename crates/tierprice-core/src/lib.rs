//! # tierprice-core: Pure Quantity-Tier Pricing
//!
//! This crate holds the pricing logic behind the storefront admin's product
//! form: quantity-based pricing tiers, the calculator that applies them, and
//! the validator that checks a tier ladder before a product is saved.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tierprice Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │         Admin Dashboard / tierprice CLI (presentation)          │    │
//! │  │     Product form ──► Tier table ──► Quote preview               │    │
//! │  └─────────────────────────────┬───────────────────────────────────┘    │
//! │                                │ product JSON from the backend          │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐    │
//! │  │               ★ tierprice-core (THIS CRATE) ★                   │    │
//! │  │                                                                 │    │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐    │    │
//! │  │   │   types   │  │   money   │  │  pricing  │  │ validation│    │    │
//! │  │   │   Tier    │  │   Money   │  │  quote    │  │  ladder   │    │    │
//! │  │   │  Result   │  │  decimal  │  │  ladder   │  │  checks   │    │    │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘    │    │
//! │  │                                                                 │    │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                          │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Tier, price result, product record types
//! - [`money`] - Exact decimal Money type
//! - [`pricing`] - The tier calculator and display helpers
//! - [`validation`] - Tier ladder and input validation
//! - [`error`] - Error and violation types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output, inputs are never mutated
//! 2. **Permissive Pricing**: the calculator never fails, it falls back to
//!    the base price
//! 3. **Problems as Data**: the validator returns violations, it does not
//!    decide what to do with them
//! 4. **Exact Money**: prices and discounts are base-10 decimals, never floats
//!
//! ## Example Usage
//!
//! ```rust
//! use tierprice_core::{Money, ProductPricing};
//!
//! let product = ProductPricing::from_json(r#"{
//!     "id": "mug-01",
//!     "name": "Enamel Mug",
//!     "price": 20,
//!     "quantityPricing": [
//!         {"minQuantity": 1,  "maxQuantity": 9,    "price": 10, "discountPercentage": 0},
//!         {"minQuantity": 10, "maxQuantity": 49,   "price": 9,  "discountPercentage": 10},
//!         {"minQuantity": 50, "maxQuantity": null, "price": 8,  "discountPercentage": 20}
//!     ]
//! }"#).unwrap();
//!
//! assert!(product.validate().is_empty());
//!
//! let quote = product.quote(25);
//! assert_eq!(quote.total_price, Money::from_cents(22500));
//! assert_eq!(quote.savings, Some(Money::from_cents(27500)));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, TierViolation, ValidationError};
pub use money::Money;
pub use pricing::{compute_price_for_quantity, format_quantity_range, list_tiers_sorted, price_ladder};
pub use types::*;
pub use validation::{validate_tier_messages, validate_tiers};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Smallest valid `min_quantity` for a tier.
pub const MIN_TIER_QUANTITY: i64 = 1;

/// Upper bound for a tier discount, in percent.
pub const MAX_DISCOUNT_PERCENT: i64 = 100;

/// Largest quantity `validate_quantity` accepts.
///
/// ## Business Reason
/// Catches typos in the quantity box (an extra few zeros) before a quote is
/// shown. The calculator itself does not enforce it.
pub const MAX_QUOTE_QUANTITY: i64 = 1_000_000;
