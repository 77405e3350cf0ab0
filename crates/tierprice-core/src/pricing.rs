//! # Pricing Module
//!
//! The tiered quantity pricing calculator and its display helpers.
//!
//! ## Tier Matching
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Base price: $20.00          Quantity: 25                               │
//! │                                                                         │
//! │   1 - 9     $10.00                                                      │
//! │  10 - 49     $9.00  ◄── 10 <= 25 <= 49, matched                         │
//! │  50+         $8.00                                                      │
//! │                                                                         │
//! │  total   = $9.00 × 25          = $225.00                                │
//! │  savings = $20.00 × 25 − $225  = $275.00                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything here is permissive: no tier list, an empty one, or one where
//! nothing matches all fall back to base pricing. Nothing in this module
//! returns an error.

use tracing::debug;

use crate::money::Money;
use crate::types::{PriceResult, QuantityPricingTier, TierRow};

/// Prices `quantity` units against a tier ladder.
///
/// ## Matching Rules
/// 1. A tier qualifies when `min_quantity <= quantity` and its max is absent
///    or `>= quantity`.
/// 2. No qualifying tier (or no tiers at all) means base pricing with no
///    discount.
/// 3. If several tiers qualify (an overlapping ladder), the one with the
///    greatest `min_quantity` wins; on equal minimums the earlier tier in
///    the input wins.
///
/// ## Example
/// ```rust
/// use tierprice_core::{compute_price_for_quantity, DiscountRate, Money, QuantityPricingTier};
///
/// let tiers = vec![
///     QuantityPricingTier::new(1, Some(9), Money::from_cents(1000), DiscountRate::zero()),
///     QuantityPricingTier::new(10, Some(49), Money::from_cents(900), DiscountRate::from_bps(1000)),
///     QuantityPricingTier::new(50, None, Money::from_cents(800), DiscountRate::from_bps(2000)),
/// ];
///
/// let result = compute_price_for_quantity(25, Money::from_cents(2000), &tiers);
/// assert_eq!(result.price, Money::from_cents(900));
/// assert_eq!(result.total_price, Money::from_cents(22500));
/// assert_eq!(result.savings, Some(Money::from_cents(27500)));
/// ```
pub fn compute_price_for_quantity(
    quantity: i64,
    base_price: Money,
    tiers: &[QuantityPricingTier],
) -> PriceResult {
    if tiers.is_empty() {
        return PriceResult::base(quantity, base_price);
    }

    let mut matched: Option<&QuantityPricingTier> = None;
    let mut candidates = 0usize;
    for tier in tiers.iter().filter(|t| t.contains(quantity)) {
        candidates += 1;
        match matched {
            Some(best) if best.min_quantity >= tier.min_quantity => {}
            _ => matched = Some(tier),
        }
    }

    let Some(tier) = matched else {
        debug!(quantity, tiers = tiers.len(), "No tier matches quantity, using base price");
        return PriceResult::base(quantity, base_price);
    };

    if candidates > 1 {
        debug!(
            quantity,
            candidates,
            chosen = %tier.quantity_range(),
            "Overlapping tiers matched, picked the highest minimum quantity"
        );
    }

    let total_price = tier.price.multiply_quantity(quantity);
    let savings = base_price.multiply_quantity(quantity) - total_price;

    PriceResult {
        price: tier.price,
        discount_percentage: tier.discount_percentage,
        tier: Some(tier.clone()),
        original_price: Some(base_price),
        total_price,
        savings: savings.is_positive().then_some(savings),
    }
}

/// Returns a copy of `tiers` sorted ascending by `min_quantity`.
///
/// The sort is stable, so tiers with equal minimums keep their input order.
pub fn list_tiers_sorted(tiers: &[QuantityPricingTier]) -> Vec<QuantityPricingTier> {
    let mut sorted = tiers.to_vec();
    sorted.sort_by_key(|t| t.min_quantity);
    sorted
}

/// Formats a tier's quantity range: `"10 - 49"` or `"50+"`.
///
/// ## Example
/// ```rust
/// use tierprice_core::{format_quantity_range, DiscountRate, Money, QuantityPricingTier};
///
/// let tier = QuantityPricingTier::new(50, None, Money::from_cents(800), DiscountRate::zero());
/// assert_eq!(format_quantity_range(&tier), "50+");
/// ```
pub fn format_quantity_range(tier: &QuantityPricingTier) -> String {
    tier.quantity_range()
}

/// Builds the tier table shown on the product form, in ladder order.
pub fn price_ladder(base_price: Money, tiers: &[QuantityPricingTier]) -> Vec<TierRow> {
    list_tiers_sorted(tiers)
        .into_iter()
        .map(|tier| {
            let per_unit = base_price - tier.price;
            TierRow {
                range: tier.quantity_range(),
                price: tier.price,
                discount_percentage: tier.discount_percentage,
                savings_per_unit: per_unit.is_positive().then_some(per_unit),
            }
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
