//! Turning an amount into text with a selected description pattern.

use rust_decimal::Decimal;

use super::errors::CurrencyError;
use super::plural::Pluralizer;
use super::select::select_pattern;
use super::types::{Currency, DescriptionPattern, PatternElement, Style};

/// Quantity of one element's division within an amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementQuantity {
    pub division: String,
    pub rate: Decimal,
    pub quantity: Decimal,
}

/// Split the magnitude of `amount` across the pattern's elements.
///
/// Aggregating patterns consume a running remainder element by element;
/// flat patterns measure every element against the whole amount.
pub fn decompose(pattern: &DescriptionPattern, amount: Decimal) -> Vec<ElementQuantity> {
    let magnitude = amount.abs();
    let mut remaining = magnitude;
    pattern
        .elements
        .iter()
        .map(|element| {
            let quantity = if pattern.aggregate {
                let step = element.rounding.extract(remaining, element.rate);
                remaining = step.remaining;
                step.quantity
            } else {
                element.rounding.quantity_of(magnitude, element.rate)
            };
            ElementQuantity {
                division: element.division.clone(),
                rate: element.rate,
                quantity,
            }
        })
        .collect()
}

fn render_element(element: &PatternElement, quantity: Decimal, pluralizer: &Pluralizer) -> String {
    if let Some(text) = element.special_text(quantity) {
        return text.to_string();
    }
    let filled = element.template.fill(quantity);
    pluralizer.inflect_in(&filled, &element.pluralise_word, quantity)
}

/// Describe `amount` with a specific pattern.
pub fn render_pattern(
    pattern: &DescriptionPattern,
    amount: Decimal,
    pluralizer: &Pluralizer,
) -> String {
    let quantities = decompose(pattern, amount);

    let mut parts: Vec<String> = pattern
        .elements
        .iter()
        .zip(&quantities)
        .filter(|(element, q)| !q.quantity.is_zero() || element.show_if_zero)
        .map(|(element, q)| render_element(element, q.quantity, pluralizer))
        .collect();

    // Never describe an amount as nothing at all.
    if parts.is_empty() {
        if let (Some(element), Some(q)) = (pattern.elements.last(), quantities.last()) {
            parts.push(render_element(element, q.quantity, pluralizer));
        }
    }

    let body = pattern.join.join(&parts);
    if amount < Decimal::ZERO {
        format!("{}{}", pattern.negative_prefix, body)
    } else {
        body
    }
}

/// Describe `amount` of `currency` in the requested style.
pub fn render(currency: &Currency, amount: Decimal, style: Style) -> Result<String, CurrencyError> {
    let pattern = select_pattern(currency, style, amount)?;
    Ok(render_pattern(pattern, amount, currency.pluralizer()))
}

impl Currency {
    /// Describe `amount` (in base units) in the requested style.
    pub fn describe(&self, amount: Decimal, style: Style) -> Result<String, CurrencyError> {
        render(self, amount, style)
    }
}
