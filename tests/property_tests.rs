//! Property-based tests for rendering and parsing.
//!
//! These tests verify invariants hold for arbitrary amounts using proptest.

use std::sync::OnceLock;

use coinage::currency::{builtin, decompose, select_pattern, Currency, Style};
use proptest::prelude::*;
use rust_decimal::Decimal;

fn stock() -> &'static [Currency] {
    static STOCK: OnceLock<Vec<Currency>> = OnceLock::new();
    STOCK.get_or_init(|| builtin::load_all().unwrap())
}

// ============================================================================
// Arbitrary generators
// ============================================================================

fn arb_amount() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000i64).prop_map(Decimal::from)
}

fn arb_positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(Decimal::from)
}

fn arb_signed_amount() -> impl Strategy<Value = Decimal> {
    (-10_000_000i64..10_000_000i64).prop_map(Decimal::from)
}

fn arb_style() -> impl Strategy<Value = Style> {
    prop_oneof![
        Just(Style::Casual),
        Just(Style::Wordy),
        Just(Style::Long),
        Just(Style::Short),
        Just(Style::ShortDecimal),
    ]
}

fn arb_currency() -> impl Strategy<Value = usize> {
    0..stock().len()
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn short_decimal_round_trips(index in arb_currency(), amount in arb_amount()) {
        let currency = &stock()[index];
        let text = currency.describe(amount, Style::ShortDecimal).unwrap();
        prop_assert_eq!(currency.parse(&text).unwrap(), amount, "{}", text);
    }

    #[test]
    fn short_round_trips(index in arb_currency(), amount in arb_amount()) {
        let currency = &stock()[index];
        let text = currency.describe(amount, Style::Short).unwrap();
        prop_assert_eq!(currency.parse(&text).unwrap(), amount, "{}", text);
    }

    #[test]
    fn aggregation_conserves_amount(index in arb_currency(), amount in arb_signed_amount()) {
        let currency = &stock()[index];
        for pattern in currency.patterns().iter().filter(|p| p.aggregate) {
            let total: Decimal = decompose(pattern, amount)
                .iter()
                .map(|q| q.quantity * q.rate)
                .sum();
            prop_assert_eq!(total, amount.abs());
        }
    }

    #[test]
    fn rendering_never_empty(index in arb_currency(), style in arb_style(), amount in arb_signed_amount()) {
        let text = stock()[index].describe(amount, style).unwrap();
        prop_assert!(!text.is_empty());
    }

    #[test]
    fn sign_only_adds_prefix(index in arb_currency(), style in arb_style(), amount in arb_positive_amount()) {
        let currency = &stock()[index];
        let negative = -amount;
        let prefix = &select_pattern(currency, style, negative).unwrap().negative_prefix;
        let positive_text = currency.describe(amount, style).unwrap();
        let negative_text = currency.describe(negative, style).unwrap();
        prop_assert_eq!(negative_text, format!("{}{}", prefix, positive_text));
    }

    #[test]
    fn parse_never_panics(index in arb_currency(), text in "\\PC{0,40}") {
        let _ = stock()[index].parse(&text);
    }
}

#[test]
fn zero_renders_in_every_style() {
    for currency in stock() {
        for style in Style::ALL {
            let text = currency.describe(Decimal::ZERO, style).unwrap();
            assert!(!text.is_empty(), "{} {}", currency.name(), style);
            assert!(!text.starts_with('-'), "{} {}", currency.name(), style);
        }
    }
}
