/// Publishing replacement currency snapshots while readers are active
mod common;

use std::sync::Arc;
use std::thread;

use coinage::currency::{builtin, Currency, CurrencySeed, ElementSeed, PatternSeed, Style};
use rust_decimal_macros::dec;

/// Dollars re-seeded with a different Wordy wording.
fn reworded_dollars() -> Currency {
    let mut seed: CurrencySeed = builtin::dollars();
    seed.patterns.retain(|p| p.style != Style::Wordy);
    seed = seed.with_pattern(
        PatternSeed::new(Style::Wordy, 1)
            .with_element(ElementSeed::new(1, "dollar", "{} greenback").pluralising("greenback"))
            .with_element(ElementSeed::new(2, "cent", "{} penny").pluralising("penny")),
    );
    Currency::load(seed.with_plural("penny", "pennies")).unwrap()
}

#[test]
fn test_readers_see_whole_snapshots() {
    let registry = common::builtin_registry();
    let old = "1 dollar and 5 cents";
    let new = "1 greenback and 5 pennies";

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let registry = registry.clone();
            thread::spawn(move || {
                for _ in 0..500 {
                    let text = registry.render("dollars", dec!(105), Style::Wordy).unwrap();
                    assert!(text == old || text == new, "torn read: {}", text);
                }
            })
        })
        .collect();

    for _ in 0..20 {
        registry.publish(reworded_dollars());
        registry.publish(Currency::load(builtin::dollars()).unwrap());
    }
    registry.publish(reworded_dollars());

    for reader in readers {
        reader.join().unwrap();
    }
    assert_eq!(registry.render("dollars", dec!(105), Style::Wordy).unwrap(), new);
}

#[test]
fn test_held_snapshot_survives_removal() {
    let registry = common::builtin_registry();
    let roman: Arc<Currency> = registry.get("roman").unwrap();
    registry.remove("roman");
    assert!(registry.get("roman").is_none());
    assert_eq!(roman.describe(dec!(400), Style::Wordy).unwrap(), "1 aureus");
}
