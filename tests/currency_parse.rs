/// Reading user-typed amounts back into base units
mod common;

use coinage::currency::{
    ConfigurationError, CurrencyError, Currency, CurrencySeed, ElementSeed, ParseFailure, PatternSeed, Style,
};
use rust_decimal_macros::dec;

#[test]
fn test_sterling_shillings_and_pence() {
    let sterling = common::sterling();
    assert_eq!(sterling.parse("3s 6d").unwrap(), dec!(168));
    assert_eq!(sterling.parse("3S 6D").unwrap(), dec!(168));
    assert_eq!(sterling.parse("  3s\t6d ").unwrap(), dec!(168));
    assert_eq!(sterling.parse("£1 10.75d").unwrap(), dec!(1003));
    assert_eq!(sterling.parse("1 quid 2 bob").unwrap(), dec!(1056));
}

#[test]
fn test_sterling_multi_segment_words() {
    let sterling = common::sterling();
    assert_eq!(
        sterling.parse("2 pounds 5 shillings 3 pennies").unwrap(),
        dec!(2172)
    );
    assert_eq!(sterling.parse("2 pound 5 shilling 3 penny").unwrap(), dec!(2172));
    assert_eq!(sterling.parse("1 farthing").unwrap(), dec!(1));
}

#[test]
fn test_unmatched_segment_fails() {
    let sterling = common::sterling();
    let err = sterling.parse("3sh").unwrap_err();
    assert_eq!(
        err,
        ParseFailure::Unrecognized {
            currency: "pounds sterling".to_string(),
            segment: "3sh".to_string(),
        }
    );
    assert_eq!(err.segment(), Some("3sh"));
    assert_eq!(err.currency(), "pounds sterling");

    let err = sterling.parse("3s 6x").unwrap_err();
    assert_eq!(err.segment(), Some("6x"));
}

#[test]
fn test_empty_input_fails() {
    let dollars = common::dollars();
    for text in ["", "   ", "\t\n"] {
        assert!(matches!(
            dollars.parse(text),
            Err(ParseFailure::Empty { .. })
        ));
    }
}

#[test]
fn test_dollar_forms() {
    let dollars = common::dollars();
    assert_eq!(dollars.parse("$1.05").unwrap(), dec!(105));
    assert_eq!(dollars.parse("$1 5c").unwrap(), dec!(105));
    assert_eq!(dollars.parse("1 dollar 5 cents").unwrap(), dec!(105));
    assert_eq!(dollars.parse("3 bucks").unwrap(), dec!(300));
    assert_eq!(dollars.parse("0c").unwrap(), dec!(0));
}

#[test]
fn test_roman_forms() {
    let roman = common::roman();
    assert_eq!(roman.parse("1au 2den 1HS 1as").unwrap(), dec!(437));
    assert_eq!(roman.parse("1.25 HS").unwrap(), dec!(5));
    assert_eq!(roman.parse("3 asses").unwrap(), dec!(3));
    assert_eq!(roman.parse("2 denarii").unwrap(), dec!(32));
}

fn overlap_seed(big: &str, small: &str) -> CurrencySeed {
    let mut seed = CurrencySeed::new("overlap")
        .with_division("big", 10, &[big])
        .with_division("small", 1, &[small]);
    for style in Style::ALL {
        seed = seed.with_pattern(
            PatternSeed::new(style, 1).with_element(ElementSeed::new(1, "small", "{}y")),
        );
    }
    seed
}

#[test]
fn test_shared_suffix_rejected_at_load() {
    let seed = overlap_seed(r"(\d+)\s*x", r"(\d+)\s*[xy]");
    assert!(matches!(
        Currency::load(seed),
        Err(ConfigurationError::AmbiguousAbbreviation { .. })
    ));
}

/// Letter classes too wide to list as literals slip past loading and are
/// caught per segment instead.
#[test]
fn test_ambiguous_segment_fails() {
    let seed = overlap_seed(r"(\d+)\s*[a-k]{2}", r"(\d+)\s*[h-z]{2}");
    let currency = Currency::load(seed).unwrap();
    match currency.parse("3hi") {
        Err(ParseFailure::Ambiguous {
            segment,
            divisions,
            ..
        }) => {
            assert_eq!(segment, "3hi");
            assert_eq!(divisions, vec!["big".to_string(), "small".to_string()]);
        }
        other => panic!("expected ambiguity, got {:?}", other),
    }
    assert_eq!(currency.parse("3zz").unwrap(), dec!(3));
}

#[test]
fn test_registry_wraps_failures() {
    let registry = common::builtin_registry();
    assert_eq!(registry.parse("Pounds Sterling", "3s 6d").unwrap(), dec!(168));
    assert!(matches!(
        registry.parse("pounds sterling", "3sh"),
        Err(CurrencyError::Parse(ParseFailure::Unrecognized { .. }))
    ));
}

#[test]
fn test_failure_messages_name_segment() {
    let sterling = common::sterling();
    let message = sterling.parse("3sh").unwrap_err().to_string();
    assert!(message.contains("3sh"), "{}", message);
    assert!(message.contains("pounds sterling"), "{}", message);
}
