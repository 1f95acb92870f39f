//! Choosing which description pattern describes an amount.
//!
//! Patterns of one style are tried in ascending order; the first whose
//! selector accepts the amount (or that has no selector) wins.

use log::debug;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use super::errors::{CurrencyError, PredicateError};
use super::types::{Currency, DescriptionPattern, Style};

/// Boolean test of an amount supplied by the host (or compiled from a seed
/// condition). Receives the signed amount in base units.
///
/// A panic inside `evaluate` is caught and reported as a [`PredicateError`].
/// Release builds of the `coinage` binary abort on panic, so hosts embedding
/// the library with `panic = "abort"` should return errors instead.
pub trait SelectorPredicate: Send + Sync {
    fn evaluate(&self, amount: Decimal) -> Result<bool, PredicateError>;
}

struct FnPredicate<F>(F);

impl<F> SelectorPredicate for FnPredicate<F>
where
    F: Fn(Decimal) -> bool + Send + Sync,
{
    fn evaluate(&self, amount: Decimal) -> Result<bool, PredicateError> {
        Ok((self.0)(amount))
    }
}

struct FallibleFnPredicate<F>(F);

impl<F> SelectorPredicate for FallibleFnPredicate<F>
where
    F: Fn(Decimal) -> Result<bool, PredicateError> + Send + Sync,
{
    fn evaluate(&self, amount: Decimal) -> Result<bool, PredicateError> {
        (self.0)(amount)
    }
}

/// A labelled predicate attached to a pattern.
#[derive(Clone)]
pub struct Selector {
    label: String,
    predicate: Arc<dyn SelectorPredicate>,
}

impl Selector {
    pub fn new(label: impl Into<String>, predicate: Arc<dyn SelectorPredicate>) -> Self {
        Self {
            label: label.into(),
            predicate,
        }
    }

    pub fn from_fn<F>(label: impl Into<String>, f: F) -> Self
    where
        F: Fn(Decimal) -> bool + Send + Sync + 'static,
    {
        Self::new(label, Arc::new(FnPredicate(f)))
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn applies(&self, amount: Decimal) -> Result<bool, PredicateError> {
        panic::catch_unwind(AssertUnwindSafe(|| self.predicate.evaluate(amount))).unwrap_or_else(
            |payload| {
                let reason = payload
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                Err(PredicateError(format!("{} panicked: {}", self.label, reason)))
            },
        )
    }
}

impl fmt::Debug for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Selector").field(&self.label).finish()
    }
}

/// Host-side table of named predicates that seeds may refer to.
#[derive(Clone, Default)]
pub struct PredicateRegistry {
    predicates: HashMap<String, Arc<dyn SelectorPredicate>>,
}

impl PredicateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: &str, predicate: impl SelectorPredicate + 'static) {
        self.predicates.insert(name.to_string(), Arc::new(predicate));
    }

    pub fn register_fn<F>(&mut self, name: &str, f: F)
    where
        F: Fn(Decimal) -> bool + Send + Sync + 'static,
    {
        self.register(name, FnPredicate(f));
    }

    /// Register a predicate that may fail; failures count as "does not apply".
    pub fn register_fallible<F>(&mut self, name: &str, f: F)
    where
        F: Fn(Decimal) -> Result<bool, PredicateError> + Send + Sync + 'static,
    {
        self.register(name, FallibleFnPredicate(f));
    }

    pub fn selector(&self, name: &str) -> Option<Selector> {
        self.predicates
            .get(name)
            .map(|p| Selector::new(name, Arc::clone(p)))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.predicates.contains_key(name)
    }
}

impl fmt::Debug for PredicateRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.predicates.keys()).finish()
    }
}

/// First pattern of `style` that applies to `amount`.
pub fn select_pattern<'a>(
    currency: &'a Currency,
    style: Style,
    amount: Decimal,
) -> Result<&'a DescriptionPattern, CurrencyError> {
    for pattern in currency.patterns_for(style) {
        let Some(selector) = &pattern.selector else {
            return Ok(pattern);
        };
        match selector.applies(amount) {
            Ok(true) => return Ok(pattern),
            Ok(false) => {}
            Err(e) => debug!(
                "{} {} pattern #{} skipped: {}",
                currency.name(),
                style,
                pattern.order,
                e
            ),
        }
    }
    Err(CurrencyError::NoApplicablePattern {
        currency: currency.name().to_string(),
        style,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::seed::{CurrencySeed, ElementSeed, PatternSeed};

    fn chips(extra: Vec<PatternSeed>) -> CurrencySeed {
        let mut seed = CurrencySeed::new("chips").with_division("chip", 1, &[r"(\d+)"]);
        for pattern in extra {
            seed = seed.with_pattern(pattern);
        }
        for style in Style::ALL {
            seed = seed.with_pattern(
                PatternSeed::new(style, 10).with_element(ElementSeed::new(1, "chip", "{} chip")),
            );
        }
        seed
    }

    fn first_order(currency: &Currency, amount: i64) -> i32 {
        select_pattern(currency, Style::Short, Decimal::from(amount))
            .unwrap()
            .order
    }

    #[test]
    fn first_applicable_pattern_wins() {
        let currency = Currency::load(chips(vec![
            PatternSeed::new(Style::Short, 1)
                .with_condition("$amount > 100")
                .with_element(ElementSeed::new(1, "chip", "{} big")),
            PatternSeed::new(Style::Short, 2)
                .with_condition("$amount > 10")
                .with_element(ElementSeed::new(1, "chip", "{} medium")),
        ]))
        .unwrap();
        assert_eq!(first_order(&currency, 500), 1);
        assert_eq!(first_order(&currency, 50), 2);
        assert_eq!(first_order(&currency, 5), 10);
    }

    #[test]
    fn predicate_sees_signed_amount() {
        let mut registry = PredicateRegistry::new();
        registry.register_fn("debt", |amount| amount < Decimal::ZERO);
        let seed = chips(vec![PatternSeed::new(Style::Short, 1)
            .with_predicate("debt")
            .with_element(ElementSeed::new(1, "chip", "{} owed"))]);
        let currency = Currency::load_with(seed, &registry).unwrap();
        assert_eq!(first_order(&currency, -3), 1);
        assert_eq!(first_order(&currency, 3), 10);
    }

    #[test]
    fn failing_predicate_counts_as_false() {
        let mut registry = PredicateRegistry::new();
        registry.register_fallible("broken", |_| Err(PredicateError("offline".to_string())));
        assert!(registry.contains("broken"));
        let seed = chips(vec![PatternSeed::new(Style::Short, 1)
            .with_predicate("broken")
            .with_element(ElementSeed::new(1, "chip", "{} never"))]);
        let currency = Currency::load_with(seed, &registry).unwrap();
        assert_eq!(first_order(&currency, 1), 10);
    }

    #[test]
    fn panicking_predicate_counts_as_false() {
        let mut registry = PredicateRegistry::new();
        registry.register_fn("explodes", |_| panic!("lookup table missing"));
        let seed = chips(vec![PatternSeed::new(Style::Short, 1)
            .with_predicate("explodes")
            .with_element(ElementSeed::new(1, "chip", "{} never"))]);
        let currency = Currency::load_with(seed, &registry).unwrap();
        assert_eq!(first_order(&currency, 1), 10);

        let err = registry
            .selector("explodes")
            .unwrap()
            .applies(Decimal::ONE)
            .unwrap_err();
        assert!(err.0.contains("lookup table missing"), "{}", err);
    }

    #[test]
    fn selector_from_fn() {
        let selector = Selector::from_fn("even", |a: Decimal| (a % Decimal::TWO).is_zero());
        assert_eq!(selector.label(), "even");
        assert!(selector.applies(Decimal::from(4)).unwrap());
        assert!(!selector.applies(Decimal::from(3)).unwrap());
        assert_eq!(format!("{:?}", selector), "Selector(\"even\")");
    }
}
