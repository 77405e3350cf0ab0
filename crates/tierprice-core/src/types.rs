//! # Domain Types
//!
//! Pricing types shared by the calculator, the validator and the CLI.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────────────┐            ┌──────────────────────┐           │
//! │  │   ProductPricing     │  quote()   │     PriceResult      │           │
//! │  │  ──────────────────  │ ─────────► │  ──────────────────  │           │
//! │  │  id, name            │            │  price               │           │
//! │  │  price (base)        │            │  discount_percentage │           │
//! │  │  quantity_pricing ─┐ │            │  tier (matched)      │           │
//! │  └────────────────────┼─┘            │  original_price      │           │
//! │                       │              │  total_price         │           │
//! │                       ▼              │  savings             │           │
//! │  ┌──────────────────────┐            └──────────────────────┘           │
//! │  │ QuantityPricingTier  │                                               │
//! │  │  min_quantity        │            ┌──────────────────────┐           │
//! │  │  max_quantity (opt)  │ ─────────► │  TierRow (display)   │           │
//! │  │  price               │            └──────────────────────┘           │
//! │  │  discount_percentage │                                               │
//! │  └──────────────────────┘                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! Field names follow the backend's camelCase product JSON. Prices and
//! discounts travel as JSON numbers and are held as exact decimals.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, TierViolation};
use crate::money::{decimal_from_wire, Money};
use crate::MAX_DISCOUNT_PERCENT;

// =============================================================================
// Discount Rate
// =============================================================================

/// Discount rate held as an exact percentage.
///
/// Signed and unclamped, because a misconfigured tier can carry `-5` or
/// `100.004` and the validator has to report it. On the wire the value is a
/// plain percentage number (`12.5`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct DiscountRate(Decimal);

impl DiscountRate {
    /// Creates a discount rate from basis points (1 bp = 0.01%).
    ///
    /// ## Example
    /// ```rust
    /// use tierprice_core::DiscountRate;
    ///
    /// assert_eq!(DiscountRate::from_bps(1250).to_string(), "12.5%");
    /// ```
    #[inline]
    pub fn from_bps(bps: i64) -> Self {
        DiscountRate(Decimal::new(bps, 2))
    }

    #[inline]
    pub const fn from_percentage(pct: Decimal) -> Self {
        DiscountRate(pct)
    }

    /// Returns the exact percentage.
    #[inline]
    pub const fn percentage(&self) -> Decimal {
        self.0
    }

    /// Zero discount.
    #[inline]
    pub const fn zero() -> Self {
        DiscountRate(Decimal::ZERO)
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// True when the rate lies within 0% to 100%.
    #[inline]
    pub fn is_in_range(&self) -> bool {
        self.0 >= Decimal::ZERO && self.0 <= Decimal::from(MAX_DISCOUNT_PERCENT)
    }
}

impl Default for DiscountRate {
    fn default() -> Self {
        DiscountRate::zero()
    }
}

impl TryFrom<f64> for DiscountRate {
    type Error = String;

    fn try_from(pct: f64) -> Result<Self, Self::Error> {
        decimal_from_wire(pct)
            .map(DiscountRate)
            .ok_or_else(|| format!("discount {pct} is not representable"))
    }
}

impl From<DiscountRate> for f64 {
    fn from(rate: DiscountRate) -> Self {
        rate.0.to_f64().unwrap_or_default()
    }
}

/// `10%`, `12.5%`, `100.004%`
impl fmt::Display for DiscountRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0.normalize())
    }
}

// =============================================================================
// Quantity Pricing Tier
// =============================================================================

/// A quantity bracket with its own unit price.
///
/// Tiers arrive wholesale from the backend as part of a product record and
/// are never mutated locally. Nothing is enforced at construction; see
/// [`crate::validation::validate_tiers`] for the ladder invariants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct QuantityPricingTier {
    /// Inclusive lower bound.
    #[ts(type = "number")]
    pub min_quantity: i64,

    /// Inclusive upper bound. `None` means "and above".
    #[serde(default)]
    #[ts(type = "number | null")]
    pub max_quantity: Option<i64>,

    /// Unit price within this tier.
    #[serde(with = "crate::money::major_units")]
    #[ts(type = "number")]
    pub price: Money,

    /// Informational discount shown next to the tier.
    #[serde(default)]
    #[ts(type = "number")]
    pub discount_percentage: DiscountRate,
}

impl QuantityPricingTier {
    pub fn new(
        min_quantity: i64,
        max_quantity: Option<i64>,
        price: Money,
        discount_percentage: DiscountRate,
    ) -> Self {
        QuantityPricingTier {
            min_quantity,
            max_quantity,
            price,
            discount_percentage,
        }
    }

    /// Checks whether `quantity` falls inside `[min, max]` (or `[min, ∞)`).
    pub fn contains(&self, quantity: i64) -> bool {
        if quantity < self.min_quantity {
            return false;
        }
        match self.max_quantity {
            Some(max) => quantity <= max,
            None => true,
        }
    }

    #[inline]
    pub fn is_unbounded(&self) -> bool {
        self.max_quantity.is_none()
    }

    /// `"10 - 49"` or `"50+"`.
    pub fn quantity_range(&self) -> String {
        match self.max_quantity {
            Some(max) => format!("{} - {}", self.min_quantity, max),
            None => format!("{}+", self.min_quantity),
        }
    }
}

// =============================================================================
// Price Result
// =============================================================================

/// The outcome of pricing a quantity against a tier ladder.
///
/// `original_price` is only set when a tier matched. `savings` is only set
/// when the tier actually undercuts the base price; a zero or negative
/// difference is omitted rather than reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PriceResult {
    /// Effective unit price.
    #[serde(serialize_with = "crate::money::major_units::serialize")]
    #[ts(type = "number")]
    pub price: Money,

    #[ts(type = "number")]
    pub discount_percentage: DiscountRate,

    /// The matched tier, if any.
    pub tier: Option<QuantityPricingTier>,

    /// Base unit price, present only when a tier matched.
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "crate::money::major_units_opt::serialize"
    )]
    #[ts(optional, type = "number")]
    pub original_price: Option<Money>,

    #[serde(serialize_with = "crate::money::major_units::serialize")]
    #[ts(type = "number")]
    pub total_price: Money,

    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "crate::money::major_units_opt::serialize"
    )]
    #[ts(optional, type = "number")]
    pub savings: Option<Money>,
}

impl PriceResult {
    /// Base pricing with no tier applied.
    pub fn base(quantity: i64, base_price: Money) -> Self {
        PriceResult {
            price: base_price,
            discount_percentage: DiscountRate::zero(),
            tier: None,
            original_price: None,
            total_price: base_price.multiply_quantity(quantity),
            savings: None,
        }
    }

    /// True when a tier was applied.
    #[inline]
    pub fn is_tiered(&self) -> bool {
        self.tier.is_some()
    }
}

// =============================================================================
// Tier Row
// =============================================================================

/// One row of the tier table shown on the product form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TierRow {
    /// Formatted quantity range (`"10 - 49"`, `"50+"`).
    pub range: String,

    #[serde(serialize_with = "crate::money::major_units::serialize")]
    #[ts(type = "number")]
    pub price: Money,

    #[ts(type = "number")]
    pub discount_percentage: DiscountRate,

    /// Base price minus tier price, only when positive.
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "crate::money::major_units_opt::serialize"
    )]
    #[ts(optional, type = "number")]
    pub savings_per_unit: Option<Money>,
}

// =============================================================================
// Product Pricing
// =============================================================================

/// The pricing slice of a backend product record.
///
/// ## Leniency
/// Only the base `price` is required. A missing or `null` `quantityPricing`
/// list means no tiers. A list that cannot be read is replaced by an empty
/// one so the product still quotes at base price, and the parse error is
/// kept in `malformed_tiers` so [`ProductPricing::validate`] reports it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "ProductRecord")]
pub struct ProductPricing {
    pub id: String,

    pub name: String,

    /// Base (undiscounted) unit price.
    pub price: Money,

    pub quantity_pricing: Vec<QuantityPricingTier>,

    /// Why the backend's tier list was discarded, if it was.
    pub malformed_tiers: Option<String>,
}

impl ProductPricing {
    /// Parses a product record as the backend sends it.
    ///
    /// ## Example
    /// ```rust
    /// use tierprice_core::{Money, ProductPricing};
    ///
    /// let product = ProductPricing::from_json(
    ///     r#"{"id": "p1", "name": "Mug", "price": 20, "quantityPricing": null}"#,
    /// ).unwrap();
    /// assert!(product.quantity_pricing.is_empty());
    /// assert_eq!(product.quote(3).total_price, Money::from_cents(6000));
    /// ```
    pub fn from_json(json: &str) -> CoreResult<Self> {
        serde_json::from_str(json).map_err(|e| CoreError::InvalidProduct(e.to_string()))
    }

    /// Prices `quantity` units of this product.
    pub fn quote(&self, quantity: i64) -> PriceResult {
        crate::pricing::compute_price_for_quantity(quantity, self.price, &self.quantity_pricing)
    }

    /// Checks the product's tier ladder, including whether it could be read.
    pub fn validate(&self) -> Vec<TierViolation> {
        let mut violations = Vec::new();
        if let Some(reason) = &self.malformed_tiers {
            violations.push(TierViolation::Malformed {
                reason: reason.clone(),
            });
        }
        violations.extend(crate::validation::validate_tiers(&self.quantity_pricing));
        violations
    }

    /// Display rows for the product's tier table.
    pub fn ladder(&self) -> Vec<TierRow> {
        crate::pricing::price_ladder(self.price, &self.quantity_pricing)
    }
}

/// Product record exactly as it arrives, before the tier list is read.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductRecord {
    #[serde(default, alias = "_id")]
    id: String,

    #[serde(default)]
    name: String,

    #[serde(with = "crate::money::major_units")]
    price: Money,

    #[serde(default, alias = "quantityPricingTiers")]
    quantity_pricing: Option<serde_json::Value>,
}

impl From<ProductRecord> for ProductPricing {
    fn from(record: ProductRecord) -> Self {
        let (quantity_pricing, malformed_tiers) = match record.quantity_pricing {
            None | Some(serde_json::Value::Null) => (Vec::new(), None),
            Some(value) => match serde_json::from_value::<Vec<QuantityPricingTier>>(value) {
                Ok(tiers) => (tiers, None),
                Err(err) => {
                    tracing::warn!(
                        product = %record.id,
                        error = %err,
                        "Discarding malformed quantity pricing tiers"
                    );
                    (Vec::new(), Some(err.to_string()))
                }
            },
        };

        ProductPricing {
            id: record.id,
            name: record.name,
            price: record.price,
            quantity_pricing,
            malformed_tiers,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discount_rate_from_wire() {
        let rate = DiscountRate::try_from(12.5_f64).unwrap();
        assert_eq!(rate, DiscountRate::from_bps(1250));
        assert_eq!(rate.percentage(), Decimal::new(125, 1));
        assert_eq!(rate.to_string(), "12.5%");
        assert_eq!(DiscountRate::from_bps(1000).to_string(), "10%");
        assert!(DiscountRate::try_from(f64::NAN).is_err());
    }

    #[test]
    fn test_discount_rate_range() {
        assert!(DiscountRate::zero().is_in_range());
        assert!(DiscountRate::from_bps(10_000).is_in_range());
        assert!(!DiscountRate::from_bps(10_001).is_in_range());
        assert!(!DiscountRate::from_bps(-1).is_in_range());
    }

    #[test]
    fn test_discount_rate_keeps_fractional_overshoot() {
        let rate = DiscountRate::try_from(100.004_f64).unwrap();
        assert_eq!(rate.percentage(), Decimal::new(100_004, 3));
        assert!(!rate.is_in_range());
        assert_eq!(rate.to_string(), "100.004%");

        assert!(!DiscountRate::try_from(-0.001_f64).unwrap().is_in_range());
    }

    #[test]
    fn test_tier_contains() {
        let bounded = QuantityPricingTier::new(10, Some(49), Money::from_cents(900), DiscountRate::zero());
        assert!(!bounded.contains(9));
        assert!(bounded.contains(10));
        assert!(bounded.contains(49));
        assert!(!bounded.contains(50));

        let open = QuantityPricingTier::new(50, None, Money::from_cents(800), DiscountRate::zero());
        assert!(open.contains(50));
        assert!(open.contains(i64::MAX));
        assert!(open.is_unbounded());
    }

    #[test]
    fn test_tier_deserializes_backend_json() {
        let tier: QuantityPricingTier = serde_json::from_str(
            r#"{"minQuantity": 10, "maxQuantity": 49, "price": 9.5, "discountPercentage": 10}"#,
        )
        .unwrap();
        assert_eq!(tier.min_quantity, 10);
        assert_eq!(tier.max_quantity, Some(49));
        assert_eq!(tier.price, Money::from_cents(950));
        assert_eq!(tier.discount_percentage, DiscountRate::from_bps(1000));

        // null and missing max both mean unbounded; discount defaults to 0
        let tier: QuantityPricingTier =
            serde_json::from_str(r#"{"minQuantity": 50, "maxQuantity": null, "price": 8}"#).unwrap();
        assert!(tier.is_unbounded());
        assert!(tier.discount_percentage.is_zero());

        let tier: QuantityPricingTier =
            serde_json::from_str(r#"{"minQuantity": 50, "price": 8}"#).unwrap();
        assert!(tier.is_unbounded());
    }

    #[test]
    fn test_price_result_serialization_omits_absent_fields() {
        let result = PriceResult::base(3, Money::from_cents(2000));
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["price"], 20.0);
        assert_eq!(json["discountPercentage"], 0.0);
        assert!(json["tier"].is_null());
        assert_eq!(json["totalPrice"], 60.0);
        assert!(json.get("originalPrice").is_none());
        assert!(json.get("savings").is_none());
    }

    #[test]
    fn test_typescript_optional_fields() {
        let decl = PriceResult::decl();
        assert!(decl.contains("originalPrice?: number"));
        assert!(decl.contains("savings?: number"));
        assert!(decl.contains("totalPrice: number"));

        assert!(TierRow::decl().contains("savingsPerUnit?: number"));
        assert!(QuantityPricingTier::decl().contains("maxQuantity: number | null"));
    }

    #[test]
    fn test_product_from_json_lenient_tiers() {
        let product = ProductPricing::from_json(r#"{"price": 20}"#).unwrap();
        assert!(product.quantity_pricing.is_empty());
        assert!(product.malformed_tiers.is_none());
        assert!(product.id.is_empty());
        assert!(product.validate().is_empty());

        let product =
            ProductPricing::from_json(r#"{"price": 20, "quantityPricing": null}"#).unwrap();
        assert!(product.malformed_tiers.is_none());

        let product =
            ProductPricing::from_json(r#"{"_id": "abc", "price": 20, "quantityPricing": "oops"}"#)
                .unwrap();
        assert_eq!(product.id, "abc");
        assert!(product.quantity_pricing.is_empty());
        assert!(product.malformed_tiers.is_some());

        let product = ProductPricing::from_json(
            r#"{"price": 20, "quantityPricingTiers": [{"minQuantity": 1, "maxQuantity": null, "price": 18}]}"#,
        )
        .unwrap();
        assert_eq!(product.quantity_pricing.len(), 1);
        assert!(product.malformed_tiers.is_none());
    }

    #[test]
    fn test_product_with_unreadable_tiers_fails_validation() {
        let product = ProductPricing::from_json(
            r#"{"price": 20, "quantityPricing": [{"minQuantity": 1}]}"#,
        )
        .unwrap();

        // Still quotes at base price
        assert!(product.quantity_pricing.is_empty());
        assert_eq!(product.quote(2).total_price, Money::from_cents(4000));

        let violations = product.validate();
        assert_eq!(violations.len(), 1);
        assert!(matches!(violations[0], TierViolation::Malformed { .. }));
        assert!(violations[0]
            .to_string()
            .starts_with("Quantity pricing tiers could not be read"));
    }

    #[test]
    fn test_product_keeps_sub_cent_and_negative_prices() {
        let product = ProductPricing::from_json(
            r#"{"price": 0.004, "quantityPricing": [
                {"minQuantity": 1000, "price": 0.001}
            ]}"#,
        )
        .unwrap();
        let result = product.quote(100_000);
        assert_eq!(result.total_price, Money::from_cents(10000));
        assert_eq!(result.savings, Some(Money::from_cents(30000)));

        let product = ProductPricing::from_json(
            r#"{"price": 1, "quantityPricing": [
                {"minQuantity": 1, "price": -0.004, "discountPercentage": 100.004}
            ]}"#,
        )
        .unwrap();
        let violations = product.validate();
        assert!(violations
            .iter()
            .any(|v| matches!(v, TierViolation::NegativePrice { .. })));
        assert!(violations
            .iter()
            .any(|v| matches!(v, TierViolation::DiscountOutOfRange { .. })));
    }

    #[test]
    fn test_product_from_json_rejects_bad_documents() {
        assert!(matches!(
            ProductPricing::from_json("not json"),
            Err(CoreError::InvalidProduct(_))
        ));
        assert!(ProductPricing::from_json("[]").is_err());
        assert!(ProductPricing::from_json(r#"{"name": "no price"}"#).is_err());
        assert!(ProductPricing::from_json(r#"{"price": "20"}"#).is_err());
    }
}
