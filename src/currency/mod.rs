//! Currency description and parsing.
//!
//! A [`Currency`] is a table of divisions plus description patterns for each
//! [`Style`]. Amounts are always exact counts of the base division, held as
//! [`Decimal`](rust_decimal::Decimal).

pub mod builtin;
pub mod condition;
pub mod errors;
pub mod parser;
pub mod plural;
pub mod registry;
pub mod render;
pub mod rounding;
pub mod seed;
pub mod select;
pub mod template;
pub mod types;
mod validate;

pub use condition::Condition;
pub use errors::{ConfigurationError, CurrencyError, ParseFailure, PredicateError};
pub use parser::{parse_amount, MAX_SPAN};
pub use plural::Pluralizer;
pub use registry::CurrencyRegistry;
pub use render::{decompose, render, render_pattern, ElementQuantity};
pub use rounding::RoundingMode;
pub use seed::{
    load_currencies_from_json, load_currency_seeds_from_json, CurrencySeed, DivisionSeed,
    ElementSeed, PatternSeed,
};
pub use select::{select_pattern, PredicateRegistry, Selector, SelectorPredicate};
pub use template::Template;
pub use types::*;

/// Read `text` as an amount of `currency`.
pub fn parse(currency: &Currency, text: &str) -> Result<rust_decimal::Decimal, ParseFailure> {
    currency.parse(text)
}
