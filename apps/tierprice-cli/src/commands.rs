//! # Command Handlers
//!
//! Each handler takes the product document as text, so the handlers
//! themselves never touch the file system. `read_document` does the I/O.
//!
//! ```text
//! quote    ──► validate_quantity ──► [strict: validate tiers] ──► PriceResult
//! ladder   ──► TierRow table
//! validate ──► TierViolation list (success = list is empty)
//! ```

use std::fmt::Write as _;
use std::io::Read;

use serde::Serialize;
use tracing::{info, warn};

use tierprice_core::validation::validate_quantity;
use tierprice_core::{CoreError, PriceResult, ProductPricing, TierRow, TierViolation};

use crate::config::{CliConfig, OutputFormat};
use crate::error::CliError;

/// What a command prints, and whether the process should exit cleanly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub text: String,
    pub success: bool,
}

impl CommandOutput {
    fn ok(text: String) -> Self {
        CommandOutput {
            text,
            success: true,
        }
    }
}

/// Reads a product document from a path, or from stdin when `source` is `-`.
pub fn read_document(source: &str) -> Result<String, CliError> {
    if source == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|source| CliError::Io {
                path: "<stdin>".to_string(),
                source,
            })?;
        return Ok(buf);
    }

    std::fs::read_to_string(source).map_err(|err| CliError::Io {
        path: source.to_string(),
        source: err,
    })
}

// =============================================================================
// quote
// =============================================================================

/// Prices `quantity` units of the product in `document`.
pub fn quote(
    document: &str,
    quantity: i64,
    format: OutputFormat,
    config: &CliConfig,
) -> Result<CommandOutput, CliError> {
    validate_quantity(quantity).map_err(CoreError::from)?;
    let product = ProductPricing::from_json(document)?;

    let violations = product.validate();
    if !violations.is_empty() {
        if config.strict {
            return Err(CliError::InvalidTiers {
                count: violations.len(),
                details: bullet_list(&violations),
            });
        }
        warn!(
            product = %product.id,
            violations = violations.len(),
            "Quoting product with invalid tier configuration"
        );
    }

    let result = product.quote(quantity);
    info!(
        product = %product.id,
        quantity,
        tiered = result.is_tiered(),
        total = %result.total_price,
        "Quoted product"
    );

    let text = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&result)?,
        OutputFormat::Text => render_quote(&product, quantity, &result, &config.currency_symbol),
    };
    Ok(CommandOutput::ok(text))
}

fn render_quote(
    product: &ProductPricing,
    quantity: i64,
    result: &PriceResult,
    symbol: &str,
) -> String {
    let mut out = String::new();

    match (product.name.is_empty(), product.id.is_empty()) {
        (false, false) => {
            let _ = writeln!(out, "Product: {} ({})", product.name, product.id);
        }
        (false, true) => {
            let _ = writeln!(out, "Product: {}", product.name);
        }
        (true, false) => {
            let _ = writeln!(out, "Product: {}", product.id);
        }
        (true, true) => {}
    }

    let _ = writeln!(out, "Quantity: {quantity}");
    match &result.tier {
        Some(tier) if result.discount_percentage.is_zero() => {
            let _ = writeln!(
                out,
                "Unit price: {} ({})",
                result.price.format_with_symbol(symbol),
                tier.quantity_range()
            );
        }
        Some(tier) => {
            let _ = writeln!(
                out,
                "Unit price: {} ({}, {} off)",
                result.price.format_with_symbol(symbol),
                tier.quantity_range(),
                result.discount_percentage
            );
        }
        None => {
            let _ = writeln!(
                out,
                "Unit price: {} (base price)",
                result.price.format_with_symbol(symbol)
            );
        }
    }

    if let Some(original) = result.original_price {
        let _ = writeln!(out, "Base price: {}", original.format_with_symbol(symbol));
    }
    let _ = write!(out, "Total: {}", result.total_price.format_with_symbol(symbol));
    if let Some(savings) = result.savings {
        let _ = write!(out, "\nYou save: {}", savings.format_with_symbol(symbol));
    }

    out
}

// =============================================================================
// ladder
// =============================================================================

/// Renders the product's tier table.
pub fn ladder(
    document: &str,
    format: OutputFormat,
    config: &CliConfig,
) -> Result<CommandOutput, CliError> {
    let product = ProductPricing::from_json(document)?;
    let rows = product.ladder();

    let text = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&rows)?,
        OutputFormat::Text => render_ladder(&rows, &config.currency_symbol),
    };
    Ok(CommandOutput::ok(text))
}

fn render_ladder(rows: &[TierRow], symbol: &str) -> String {
    if rows.is_empty() {
        return "No quantity pricing tiers".to_string();
    }

    let mut out = format!(
        "{:<14} {:>12} {:>9} {:>14}",
        "Quantity", "Unit price", "Discount", "Savings/unit"
    );
    for row in rows {
        let savings = row
            .savings_per_unit
            .map(|s| s.format_with_symbol(symbol))
            .unwrap_or_else(|| "-".to_string());
        let _ = write!(
            out,
            "\n{:<14} {:>12} {:>9} {:>14}",
            row.range,
            row.price.format_with_symbol(symbol),
            row.discount_percentage.to_string(),
            savings
        );
    }
    out
}

// =============================================================================
// validate
// =============================================================================

#[derive(Debug, Serialize)]
struct ValidationReport {
    valid: bool,
    tiers: usize,
    violations: Vec<String>,
}

/// Checks the product's tier ladder. Unsuccessful when any violation exists.
pub fn validate(document: &str, format: OutputFormat) -> Result<CommandOutput, CliError> {
    let product = ProductPricing::from_json(document)?;
    let violations = product.validate();
    let tiers = product.quantity_pricing.len();

    if !violations.is_empty() {
        warn!(product = %product.id, violations = violations.len(), "Tier validation failed");
    }

    let text = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&ValidationReport {
            valid: violations.is_empty(),
            tiers,
            violations: violations.iter().map(ToString::to_string).collect(),
        })?,
        OutputFormat::Text if violations.is_empty() => {
            format!("Tier configuration is valid ({tiers} tiers)")
        }
        OutputFormat::Text => format!(
            "Found {} tier violation(s):\n{}",
            violations.len(),
            bullet_list(&violations)
        ),
    };

    Ok(CommandOutput {
        text,
        success: violations.is_empty(),
    })
}

fn bullet_list(violations: &[TierViolation]) -> String {
    violations
        .iter()
        .map(|v| format!("- {v}"))
        .collect::<Vec<_>>()
        .join("\n")
}

// =============================================================================
// Unit Tests
// =============================================================================
