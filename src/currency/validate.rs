//! Turning seed records into validated [`Currency`] values.
//!
//! All checks happen here, once. Rendering and parsing trust the result.

use log::debug;
use regex_syntax::hir::literal::{ExtractKind, Extractor};
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::sync::Arc;

use super::condition::Condition;
use super::errors::ConfigurationError;
use super::plural::Pluralizer;
use super::rounding::RoundingMode;
use super::seed::{CurrencySeed, DivisionSeed, ElementSeed, PatternSeed};
use super::select::{PredicateRegistry, Selector};
use super::template::Template;
use super::types::{
    Abbreviation, Currency, DescriptionPattern, Division, JoinStyle, PatternElement, Style,
};

impl Currency {
    /// Validate a seed that uses only inline conditions.
    pub fn load(seed: CurrencySeed) -> Result<Self, ConfigurationError> {
        Self::load_with(seed, &PredicateRegistry::new())
    }

    /// Validate a seed, resolving named predicates against `predicates`.
    pub fn load_with(
        seed: CurrencySeed,
        predicates: &PredicateRegistry,
    ) -> Result<Self, ConfigurationError> {
        let name = seed.name.trim().to_string();
        if name.is_empty() {
            return Err(ConfigurationError::MissingName);
        }

        let pluralizer = Pluralizer::with_irregular(
            seed.plurals
                .iter()
                .map(|(singular, plural)| (singular.as_str(), plural.as_str())),
        );

        let mut divisions = build_divisions(&name, &seed.divisions)?;
        check_ambiguity(&name, &divisions, &pluralizer)?;
        // Stable: equal rates cannot occur, but keep seed order regardless.
        divisions.sort_by(|a, b| b.rate.cmp(&a.rate));

        let mut patterns = seed
            .patterns
            .iter()
            .map(|p| build_pattern(&name, p, &divisions, predicates))
            .collect::<Result<Vec<_>, _>>()?;
        patterns.sort_by_key(|p| (p.style, p.order));

        for style in Style::ALL {
            if !patterns.iter().any(|p| p.style == style && p.is_default()) {
                return Err(ConfigurationError::MissingDefaultPattern {
                    currency: name,
                    style,
                });
            }
        }

        debug!(
            "loaded currency {} ({} divisions, {} patterns)",
            name,
            divisions.len(),
            patterns.len()
        );
        Ok(Currency::from_parts(name, divisions, patterns, pluralizer))
    }
}

fn build_divisions(
    currency: &str,
    seeds: &[DivisionSeed],
) -> Result<Vec<Division>, ConfigurationError> {
    if seeds.is_empty() {
        return Err(ConfigurationError::NoDivisions {
            currency: currency.to_string(),
        });
    }

    let mut seen = HashSet::new();
    let mut base: Option<&str> = None;
    let mut divisions = Vec::with_capacity(seeds.len());

    for seed in seeds {
        if !seen.insert(seed.name.to_lowercase()) {
            return Err(ConfigurationError::DuplicateDivision {
                currency: currency.to_string(),
                division: seed.name.clone(),
            });
        }
        if seed.rate < Decimal::ONE || !seed.rate.fract().is_zero() {
            return Err(ConfigurationError::InvalidRate {
                currency: currency.to_string(),
                division: seed.name.clone(),
                rate: seed.rate,
            });
        }
        if seed.rate == Decimal::ONE {
            if let Some(first) = base {
                return Err(ConfigurationError::DuplicateBaseDivision {
                    currency: currency.to_string(),
                    first: first.to_string(),
                    second: seed.name.clone(),
                });
            }
            base = Some(&seed.name);
        }

        let abbreviations = seed
            .abbreviations
            .iter()
            .map(|pattern| {
                Abbreviation::compile(pattern).map_err(|reason| {
                    ConfigurationError::InvalidAbbreviation {
                        currency: currency.to_string(),
                        division: seed.name.clone(),
                        pattern: pattern.clone(),
                        reason,
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        divisions.push(Division {
            name: seed.name.clone(),
            rate: seed.rate.normalize(),
            abbreviations,
        });
    }

    if base.is_none() {
        return Err(ConfigurationError::NoBaseDivision {
            currency: currency.to_string(),
        });
    }
    Ok(divisions)
}

/// Reject grammars that could read the same text as two different divisions.
///
/// Identical patterns are caught directly. Beyond that, typical inputs are
/// built from each division's name ("1 shilling", "2shillings", a bare "1")
/// and from the fixed text each grammar expects around its number ("1s",
/// "£ 1"), and every grammar is tried against them.
fn check_ambiguity(
    currency: &str,
    divisions: &[Division],
    pluralizer: &Pluralizer,
) -> Result<(), ConfigurationError> {
    let ambiguous = |input: &str, first: &Division, second: &Division| {
        ConfigurationError::AmbiguousAbbreviation {
            currency: currency.to_string(),
            input: input.to_string(),
            first: first.name.clone(),
            second: second.name.clone(),
        }
    };

    for (i, a) in divisions.iter().enumerate() {
        for b in &divisions[i + 1..] {
            for x in &a.abbreviations {
                if let Some(y) = b
                    .abbreviations
                    .iter()
                    .find(|y| y.pattern().eq_ignore_ascii_case(x.pattern()))
                {
                    return Err(ambiguous(y.pattern(), a, b));
                }
            }
        }
    }

    let mut probes = vec!["1".to_string(), "2".to_string()];
    for division in divisions {
        for word in [division.name.clone(), pluralizer.plural_of(&division.name)] {
            probes.push(format!("1 {}", word));
            probes.push(format!("1{}", word));
            probes.push(format!("2 {}", word));
            probes.push(format!("2{}", word));
        }
        for abbreviation in &division.abbreviations {
            probes.extend(literal_probes(abbreviation.pattern()));
        }
    }

    for probe in &probes {
        let mut matched = divisions
            .iter()
            .filter(|d| d.abbreviations.iter().any(|a| a.is_match(probe)));
        if let (Some(first), Some(second)) = (matched.next(), matched.next()) {
            return Err(ambiguous(probe, first, second));
        }
    }
    Ok(())
}

/// Inputs built from the literal text a grammar requires before or after its
/// number, e.g. `(\d+)\s*(?:s|bob)` gives "1s", "1 s", "1bob", "2 bob".
fn literal_probes(pattern: &str) -> Vec<String> {
    let Ok(hir) = regex_syntax::Parser::new().parse(pattern) else {
        return Vec::new();
    };
    let mut probes = Vec::new();
    for kind in [ExtractKind::Prefix, ExtractKind::Suffix] {
        let prefix = matches!(kind, ExtractKind::Prefix);
        let seq = Extractor::new().kind(kind).extract(&hir);
        // None when the grammar admits too many literals to list.
        let Some(literals) = seq.literals() else {
            continue;
        };
        for literal in literals {
            let Ok(text) = std::str::from_utf8(literal.as_bytes()) else {
                continue;
            };
            let text = text.trim();
            if text.is_empty() {
                continue;
            }
            for n in ["1", "2"] {
                if prefix {
                    probes.push(format!("{}{}", text, n));
                    probes.push(format!("{} {}", text, n));
                } else {
                    probes.push(format!("{}{}", n, text));
                    probes.push(format!("{} {}", n, text));
                }
            }
        }
    }
    probes
}

fn build_pattern(
    currency: &str,
    seed: &PatternSeed,
    divisions: &[Division],
    predicates: &PredicateRegistry,
) -> Result<DescriptionPattern, ConfigurationError> {
    let style = seed.style;
    let order = seed.order;

    if seed.elements.is_empty() {
        return Err(ConfigurationError::EmptyPattern {
            currency: currency.to_string(),
            style,
            order,
        });
    }

    let mut element_seeds: Vec<&ElementSeed> = seed.elements.iter().collect();
    element_seeds.sort_by_key(|e| e.order);
    for pair in element_seeds.windows(2) {
        if pair[0].order == pair[1].order {
            return Err(ConfigurationError::DuplicateElementOrder {
                currency: currency.to_string(),
                style,
                order,
                element: pair[1].order,
            });
        }
    }

    let elements = element_seeds
        .iter()
        .map(|e| build_element(currency, style, order, e, divisions))
        .collect::<Result<Vec<_>, _>>()?;

    check_element_layout(currency, style, order, seed.aggregate, &elements)?;

    let selector = match (&seed.condition, &seed.predicate) {
        (Some(_), Some(_)) => {
            return Err(ConfigurationError::ConflictingSelector {
                currency: currency.to_string(),
                style,
                order,
            })
        }
        (Some(condition), None) => {
            let compiled = Condition::compile(condition).map_err(|reason| {
                ConfigurationError::InvalidCondition {
                    currency: currency.to_string(),
                    style,
                    order,
                    condition: condition.clone(),
                    reason,
                }
            })?;
            Some(Selector::new(condition.clone(), Arc::new(compiled)))
        }
        (None, Some(name)) => Some(predicates.selector(name).ok_or_else(|| {
            ConfigurationError::UnknownPredicate {
                currency: currency.to_string(),
                style,
                order,
                name: name.clone(),
            }
        })?),
        (None, None) => None,
    };

    let join = seed.join.clone().unwrap_or_else(|| {
        if seed.aggregate {
            JoinStyle::Natural("and".to_string())
        } else {
            JoinStyle::Concatenate
        }
    });

    Ok(DescriptionPattern {
        style,
        order,
        selector,
        negative_prefix: seed.negative_prefix.clone(),
        aggregate: seed.aggregate,
        join,
        elements,
    })
}

fn build_element(
    currency: &str,
    style: Style,
    order: i32,
    seed: &ElementSeed,
    divisions: &[Division],
) -> Result<PatternElement, ConfigurationError> {
    let division = divisions
        .iter()
        .find(|d| d.name.eq_ignore_ascii_case(&seed.division))
        .ok_or_else(|| ConfigurationError::UnknownDivision {
            currency: currency.to_string(),
            style,
            order,
            division: seed.division.clone(),
        })?;

    let template =
        Template::parse(&seed.format).map_err(|reason| ConfigurationError::InvalidTemplate {
            currency: currency.to_string(),
            style,
            order,
            template: seed.format.clone(),
            reason,
        })?;

    for special in &seed.special_values {
        if special.value.is_sign_negative() || !special.value.fract().is_zero() {
            return Err(ConfigurationError::InvalidSpecialValue {
                currency: currency.to_string(),
                style,
                order,
                division: division.name.clone(),
                value: special.value,
            });
        }
    }

    Ok(PatternElement {
        order: seed.order,
        division: division.name.clone(),
        rate: division.rate,
        template,
        show_if_zero: seed.show_if_zero,
        rounding: seed.rounding,
        pluralise_word: seed.pluralise_word.clone(),
        special_values_override: seed.special_values_override,
        special_values: seed.special_values.clone(),
    })
}

/// Ordering, rounding placement and special-value reachability within one pattern.
fn check_element_layout(
    currency: &str,
    style: Style,
    order: i32,
    aggregate: bool,
    elements: &[PatternElement],
) -> Result<(), ConfigurationError> {
    let last = elements.len() - 1;
    for (i, element) in elements.iter().enumerate() {
        let misplaced = if aggregate { i != last } else { last != 0 };
        if element.rounding == RoundingMode::NoRounding && misplaced {
            return Err(ConfigurationError::MisplacedNoRounding {
                currency: currency.to_string(),
                style,
                order,
                division: element.division.clone(),
            });
        }
    }

    if !aggregate {
        return Ok(());
    }

    for pair in elements.windows(2) {
        let (larger, smaller) = (&pair[0], &pair[1]);
        if larger.rate <= smaller.rate || !(larger.rate % smaller.rate).is_zero() {
            return Err(ConfigurationError::NonMonotonicRates {
                currency: currency.to_string(),
                style,
                order,
                larger: larger.division.clone(),
                larger_rate: larger.rate,
                smaller: smaller.division.clone(),
                smaller_rate: smaller.rate,
            });
        }

        // An element never receives a remainder of the previous element's rate or more.
        let limit = larger.rate / smaller.rate;
        if let Some(special) = smaller.special_values.iter().find(|s| s.value >= limit) {
            return Err(ConfigurationError::SpecialValueOutOfRange {
                currency: currency.to_string(),
                style,
                order,
                division: smaller.division.clone(),
                value: special.value,
                limit,
            });
        }
    }
    Ok(())
}
