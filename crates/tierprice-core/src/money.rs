//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  The backend sends prices as JSON numbers:                              │
//! │    9.99 * 100 = 998.9999999999999  ❌                                   │
//! │                                                                         │
//! │  ROUNDING TO CENTS IS NOT ENOUGH EITHER                                 │
//! │    0.125 × 1000 must be 125.00, not 0.13 × 1000 = 130.00                │
//! │    -0.004 must stay negative so the validator can flag it               │
//! │                                                                         │
//! │  OUR SOLUTION: Exact base-10 Decimal                                    │
//! │    Parse ONCE at the JSON boundary from the number's shortest           │
//! │    decimal text, then every tier total is exact decimal math.           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tierprice_core::money::Money;
//!
//! let unit = Money::from_cents(900); // $9.00
//! let total = unit.multiply_quantity(25);
//! assert_eq!(total, Money::from_cents(22500));
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::fmt;
use std::ops::{Mul, Sub};
use std::str::FromStr;

// =============================================================================
// Money Type
// =============================================================================

/// An exact monetary value in major currency units (dollars for USD).
///
/// ## Design Decisions
/// - **Decimal, not cents**: Sub-cent unit prices are legal on the backend
///   and totals have to be exact for them
/// - **Signed**: A misconfigured tier may carry a negative price, and
///   the validator has to be able to see it
///
/// ## Where Money is Used
/// ```text
/// ProductPricing.price ──┬──► PriceResult.original_price
///                        │
/// Tier.price ────────────┴──► PriceResult.price ──► PriceResult.total_price
///                                                          │
///                           base × qty − total ────► PriceResult.savings
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(Decimal);

impl Money {
    /// Wraps an exact decimal amount in major units.
    #[inline]
    pub const fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal::Decimal;
    /// use tierprice_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.amount(), Decimal::new(1099, 2));
    /// ```
    #[inline]
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, 2))
    }

    /// Returns the exact amount in major units.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Multiplies money by a quantity, saturating at the Decimal bounds.
    ///
    /// ## Example
    /// ```rust
    /// use tierprice_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(2000); // $20.00
    /// assert_eq!(unit_price.multiply_quantity(25), Money::from_cents(50000));
    /// ```
    pub fn multiply_quantity(&self, qty: i64) -> Self {
        let product = self.0.checked_mul(Decimal::from(qty));
        Money(product.unwrap_or_else(|| saturate(self.is_negative() != (qty < 0))))
    }

    /// Formats the value with a caller-chosen currency symbol.
    ///
    /// At least two decimal places are shown; sub-cent digits are kept.
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal::Decimal;
    /// use tierprice_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(22500).format_with_symbol("€"), "€225.00");
    /// assert_eq!(Money::from_cents(-550).format_with_symbol("$"), "-$5.50");
    /// assert_eq!(Money::new(Decimal::new(125, 3)).format_with_symbol("$"), "$0.125");
    /// ```
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        let mut magnitude = self.0.abs().normalize();
        if magnitude.scale() < 2 {
            magnitude.rescale(2);
        }
        format!("{sign}{symbol}{magnitude}")
    }

    /// Converts a major-unit JSON number (as sent by the backend) to Money.
    ///
    /// The number is read through its shortest decimal text, so `0.1` is
    /// exactly one tenth. Returns `None` for non-finite values or ones
    /// outside the Decimal range.
    pub(crate) fn from_major_f64(amount: f64) -> Option<Self> {
        decimal_from_wire(amount).map(Money)
    }

    /// Returns the value as decimal major units (for JSON output only).
    pub(crate) fn to_major_f64(self) -> f64 {
        self.0.to_f64().unwrap_or_default()
    }
}

/// Exact decimal for a JSON number, via its shortest round-trip text.
pub(crate) fn decimal_from_wire(value: f64) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    Decimal::from_str(&value.to_string()).ok()
}

fn saturate(negative: bool) -> Decimal {
    if negative {
        Decimal::MIN
    } else {
        Decimal::MAX
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows money in dollars. The CLI uses `format_with_symbol` for
/// configured currencies.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with_symbol("$"))
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        let difference = self.0.checked_sub(other.0);
        Money(difference.unwrap_or_else(|| saturate(self.0 < other.0)))
    }
}

/// Multiplication by quantity (saturating).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

// =============================================================================
// JSON Boundary
// =============================================================================

/// Serde adapter for prices expressed as decimal major units (`9.99`).
///
/// Use with `#[serde(with = "crate::money::major_units")]`.
pub mod major_units {
    use super::Money;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(money: &Money, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(money.to_major_f64())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Money, D::Error>
    where
        D: Deserializer<'de>,
    {
        let amount = f64::deserialize(deserializer)?;
        Money::from_major_f64(amount)
            .ok_or_else(|| Error::custom(format!("price {amount} is not representable")))
    }
}

/// Same as [`major_units`] for optional fields.
pub mod major_units_opt {
    use super::Money;
    use serde::Serializer;

    pub fn serialize<S>(money: &Option<Money>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match money {
            Some(m) => serializer.serialize_some(&m.to_major_f64()),
            None => serializer.serialize_none(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.amount(), Decimal::new(1099, 2));
        assert_eq!(money, Money::new(Decimal::from_str("10.990").unwrap()));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
        assert_eq!(format!("{}", Money::new(Decimal::new(-4, 3))), "-$0.004");
        assert_eq!(format!("{}", Money::new(Decimal::from(125))), "$125.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(50000);
        let b = Money::from_cents(22500);

        assert_eq!(a - b, Money::from_cents(27500));
        assert_eq!(b * 2, Money::from_cents(45000));
    }

    #[test]
    fn test_arithmetic_saturates() {
        let huge = Money::new(Decimal::MAX);
        assert_eq!(huge.multiply_quantity(2), Money::new(Decimal::MAX));
        assert_eq!(huge.multiply_quantity(-2), Money::new(Decimal::MIN));
        assert_eq!(Money::new(Decimal::MIN) - huge, Money::new(Decimal::MIN));
    }

    #[test]
    fn test_sub_cent_totals_are_exact() {
        let unit = Money::from_major_f64(0.125).unwrap();
        assert_eq!(unit.multiply_quantity(1000), Money::from_cents(12500));

        let base = Money::from_major_f64(0.004).unwrap();
        let tier = Money::from_major_f64(0.001).unwrap();
        let savings = base.multiply_quantity(100_000) - tier.multiply_quantity(100_000);
        assert_eq!(savings, Money::from_cents(30000));
    }

    #[test]
    fn test_from_major_f64_is_exact() {
        assert_eq!(Money::from_major_f64(9.99), Some(Money::from_cents(999)));
        assert_eq!(Money::from_major_f64(0.29), Some(Money::from_cents(29)));
        assert_eq!(Money::from_major_f64(20.0), Some(Money::from_cents(2000)));
        assert_eq!(Money::from_major_f64(-1.5), Some(Money::from_cents(-150)));
        assert_eq!(
            Money::from_major_f64(-0.004),
            Some(Money::new(Decimal::new(-4, 3)))
        );
        assert_eq!(Money::from_major_f64(f64::NAN), None);
        assert_eq!(Money::from_major_f64(f64::INFINITY), None);
        assert_eq!(Money::from_major_f64(1e30), None);
    }

    #[test]
    fn test_major_units_serde() {
        #[derive(Serialize, Deserialize)]
        struct Wrapper {
            #[serde(with = "major_units")]
            price: Money,
        }

        let w: Wrapper = serde_json::from_str(r#"{"price": 12.5}"#).unwrap();
        assert_eq!(w.price, Money::from_cents(1250));

        let w: Wrapper = serde_json::from_str(r#"{"price": 0.125}"#).unwrap();
        assert_eq!(w.price, Money::new(Decimal::new(125, 3)));

        // Integers are accepted too
        let w: Wrapper = serde_json::from_str(r#"{"price": 8}"#).unwrap();
        assert_eq!(w.price, Money::from_cents(800));

        let json = serde_json::to_string(&w).unwrap();
        assert_eq!(json, r#"{"price":8.0}"#);

        assert!(serde_json::from_str::<Wrapper>(r#"{"price": "8"}"#).is_err());
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());
        assert_eq!(Money::default(), zero);

        assert!(Money::from_cents(100).is_positive());
        assert!(Money::new(Decimal::new(-4, 3)).is_negative());
    }
}
