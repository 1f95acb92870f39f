//! Rounding policies used when pulling a division's quantity out of an amount.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How an element turns `remaining / rate` into the quantity it displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// Whole units only; the fractional remainder carries to the next element.
    #[default]
    Truncate,
    /// Keep the full quotient; the element consumes everything that is left.
    NoRounding,
}

/// Result of extracting one element's quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extraction {
    /// Quantity of the division to display.
    pub quantity: Decimal,
    /// Base units still to be described by later elements.
    pub remaining: Decimal,
}

impl RoundingMode {
    /// Split `remaining` (non-negative base units) into a quantity of a
    /// division worth `rate` base units and what is left over.
    pub fn extract(self, remaining: Decimal, rate: Decimal) -> Extraction {
        match self {
            // `%` is exact, whereas `remaining / rate` rounds to 28 digits
            // and can overshoot by a whole unit near the top of the range.
            RoundingMode::Truncate => {
                let rest = remaining % rate;
                Extraction {
                    quantity: ((remaining - rest) / rate).normalize(),
                    remaining: rest,
                }
            }
            RoundingMode::NoRounding => Extraction {
                quantity: (remaining / rate).normalize(),
                remaining: Decimal::ZERO,
            },
        }
    }

    /// Quantity of a division in `amount` without consuming anything.
    pub fn quantity_of(self, amount: Decimal, rate: Decimal) -> Decimal {
        self.extract(amount, rate).quantity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn truncate_carries_remainder() {
        let e = RoundingMode::Truncate.extract(dec!(1003), dec!(960));
        assert_eq!(e.quantity, dec!(1));
        assert_eq!(e.remaining, dec!(43));
    }

    #[test]
    fn truncate_below_rate_is_zero() {
        let e = RoundingMode::Truncate.extract(dec!(47), dec!(48));
        assert_eq!(e.quantity, Decimal::ZERO);
        assert_eq!(e.remaining, dec!(47));
    }

    #[test]
    fn truncate_keeps_fractional_base_units() {
        let e = RoundingMode::Truncate.extract(dec!(5.5), dec!(4));
        assert_eq!(e.quantity, dec!(1));
        assert_eq!(e.remaining, dec!(1.5));
    }

    #[test]
    fn truncate_is_exact_for_huge_amounts() {
        let amount = dec!(79228162514264337593543950079);
        let e = RoundingMode::Truncate.extract(amount, dec!(960));
        assert_eq!(e.quantity, dec!(82529335952358684993274947));
        assert_eq!(e.remaining, dec!(959));
        assert_eq!(e.quantity * dec!(960) + e.remaining, amount);
    }

    #[test]
    fn no_rounding_consumes_everything() {
        let e = RoundingMode::NoRounding.extract(dec!(105), dec!(100));
        assert_eq!(e.quantity, dec!(1.05));
        assert_eq!(e.remaining, Decimal::ZERO);
    }

    #[test]
    fn quantity_of_is_independent() {
        assert_eq!(RoundingMode::Truncate.quantity_of(dec!(250), dec!(100)), dec!(2));
        assert_eq!(
            RoundingMode::NoRounding.quantity_of(dec!(250), dec!(100)),
            dec!(2.5)
        );
    }
}
