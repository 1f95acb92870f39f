//! Seed records for currency definitions
//!
//! Currencies are authored as flat records (divisions, patterns and their
//! elements, each with an explicit order) and stored as JSON, normally under
//! `data/seeds/currencies.json`. Admins can add or adjust currencies without
//! recompiling; [`Currency::load`](super::Currency::load) validates them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use super::errors::CurrencyError;
use super::rounding::RoundingMode;
use super::select::PredicateRegistry;
use super::types::{Currency, JoinStyle, SpecialValue, Style};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencySeed {
    pub name: String,
    pub divisions: Vec<DivisionSeed>,
    /// Irregular plurals, singular → plural.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub plurals: BTreeMap<String, String>,
    pub patterns: Vec<PatternSeed>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DivisionSeed {
    pub name: String,
    /// Base units per one of this division.
    pub rate: Decimal,
    /// Regular expressions with one capture group for the number.
    #[serde(default)]
    pub abbreviations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternSeed {
    pub style: Style,
    pub order: i32,
    /// Inline condition expression, e.g. `$amount == 0`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    /// Name of a predicate registered by the host.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicate: Option<String>,
    #[serde(default)]
    pub negative_prefix: String,
    #[serde(default = "default_aggregate")]
    pub aggregate: bool,
    /// Defaults to a natural list for aggregating patterns, plain concatenation otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub join: Option<JoinStyle>,
    pub elements: Vec<ElementSeed>,
}

fn default_aggregate() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementSeed {
    pub order: i32,
    pub division: String,
    pub format: String,
    #[serde(default)]
    pub show_if_zero: bool,
    #[serde(default)]
    pub rounding: RoundingMode,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub pluralise_word: String,
    #[serde(default)]
    pub special_values_override: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub special_values: Vec<SpecialValue>,
}

impl CurrencySeed {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            divisions: Vec::new(),
            plurals: BTreeMap::new(),
            patterns: Vec::new(),
        }
    }

    pub fn with_division(mut self, name: &str, rate: u64, abbreviations: &[&str]) -> Self {
        self.divisions.push(DivisionSeed {
            name: name.to_string(),
            rate: Decimal::from(rate),
            abbreviations: abbreviations.iter().map(|a| a.to_string()).collect(),
        });
        self
    }

    pub fn with_plural(mut self, singular: &str, plural: &str) -> Self {
        self.plurals.insert(singular.to_string(), plural.to_string());
        self
    }

    pub fn with_pattern(mut self, pattern: PatternSeed) -> Self {
        self.patterns.push(pattern);
        self
    }
}

impl PatternSeed {
    /// An aggregating pattern with no selector and no negative prefix.
    pub fn new(style: Style, order: i32) -> Self {
        Self {
            style,
            order,
            condition: None,
            predicate: None,
            negative_prefix: String::new(),
            aggregate: true,
            join: None,
            elements: Vec::new(),
        }
    }

    pub fn with_condition(mut self, condition: &str) -> Self {
        self.condition = Some(condition.to_string());
        self
    }

    pub fn with_predicate(mut self, name: &str) -> Self {
        self.predicate = Some(name.to_string());
        self
    }

    pub fn with_negative_prefix(mut self, prefix: &str) -> Self {
        self.negative_prefix = prefix.to_string();
        self
    }

    /// Elements are measured independently instead of consuming a remainder.
    pub fn flat(mut self) -> Self {
        self.aggregate = false;
        self
    }

    pub fn with_join(mut self, join: JoinStyle) -> Self {
        self.join = Some(join);
        self
    }

    pub fn with_element(mut self, element: ElementSeed) -> Self {
        self.elements.push(element);
        self
    }
}

impl ElementSeed {
    /// A truncating element with no pluralisation or special values.
    pub fn new(order: i32, division: &str, format: &str) -> Self {
        Self {
            order,
            division: division.to_string(),
            format: format.to_string(),
            show_if_zero: false,
            rounding: RoundingMode::Truncate,
            pluralise_word: String::new(),
            special_values_override: false,
            special_values: Vec::new(),
        }
    }

    pub fn pluralising(mut self, word: &str) -> Self {
        self.pluralise_word = word.to_string();
        self
    }

    pub fn show_if_zero(mut self) -> Self {
        self.show_if_zero = true;
        self
    }

    pub fn unrounded(mut self) -> Self {
        self.rounding = RoundingMode::NoRounding;
        self
    }

    /// Add a literal override and switch overrides on.
    pub fn with_special(mut self, value: u32, text: &str) -> Self {
        self.special_values_override = true;
        self.special_values.push(SpecialValue {
            value: Decimal::from(value),
            text: text.to_string(),
        });
        self
    }
}

/// Read currency seeds from a JSON array without validating them.
pub fn load_currency_seeds_from_json<P: AsRef<Path>>(
    path: P,
) -> Result<Vec<CurrencySeed>, CurrencyError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    let seeds: Vec<CurrencySeed> = serde_json::from_str(&contents)?;
    Ok(seeds)
}

/// Read and validate currencies from a JSON seed file.
///
/// Fails on the first invalid currency; nothing from the file is returned in that case.
pub fn load_currencies_from_json<P: AsRef<Path>>(
    path: P,
    predicates: &PredicateRegistry,
) -> Result<Vec<Currency>, CurrencyError> {
    load_currency_seeds_from_json(path)?
        .into_iter()
        .map(|seed| Currency::load_with(seed, predicates).map_err(CurrencyError::from))
        .collect()
}
