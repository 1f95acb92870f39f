//! Stock currencies shipped with the engine.
//!
//! These are plain seeds, loaded the same way as a JSON seed file. Use
//! `coinage export-builtin` to dump them as a starting point for custom data.

use super::errors::ConfigurationError;
use super::seed::{CurrencySeed, ElementSeed, PatternSeed};
use super::types::{Currency, JoinStyle, Style};

fn spaced() -> JoinStyle {
    JoinStyle::Separator(" ".to_string())
}

fn listed() -> JoinStyle {
    JoinStyle::Separator(", ".to_string())
}

/// Decimal dollars: 100 cents to the dollar.
pub fn dollars() -> CurrencySeed {
    CurrencySeed::new("dollars")
        .with_division(
            "dollar",
            100,
            &[r"\$(\d+(?:\.\d+)?)", r"(\d+(?:\.\d+)?)\s*(?:dollars?|bucks?)"],
        )
        .with_division("cent", 1, &[r"(\d+)\s*(?:c|cents?|¢)"])
        .with_pattern(
            PatternSeed::new(Style::Casual, 1)
                .with_negative_prefix("minus ")
                .with_element(
                    ElementSeed::new(1, "dollar", "{} buck")
                        .pluralising("buck")
                        .with_special(1, "a buck"),
                )
                .with_element(ElementSeed::new(2, "cent", "{} cent").pluralising("cent")),
        )
        .with_pattern(
            PatternSeed::new(Style::Wordy, 1)
                .with_condition("$amount == 0")
                .flat()
                .with_element(
                    ElementSeed::new(1, "dollar", "{} dollar")
                        .pluralising("dollar")
                        .show_if_zero(),
                ),
        )
        .with_pattern(
            PatternSeed::new(Style::Wordy, 2)
                .with_negative_prefix("negative ")
                .with_element(ElementSeed::new(1, "dollar", "{} dollar").pluralising("dollar"))
                .with_element(ElementSeed::new(2, "cent", "{} cent").pluralising("cent")),
        )
        .with_pattern(
            PatternSeed::new(Style::Long, 1)
                .with_negative_prefix("negative ")
                .with_element(
                    ElementSeed::new(1, "dollar", "{} dollar")
                        .pluralising("dollar")
                        .show_if_zero(),
                )
                .with_element(
                    ElementSeed::new(2, "cent", "{} cent")
                        .pluralising("cent")
                        .show_if_zero(),
                ),
        )
        .with_pattern(
            PatternSeed::new(Style::Short, 1)
                .with_negative_prefix("-")
                .with_join(spaced())
                .with_element(ElementSeed::new(1, "dollar", "${}"))
                .with_element(ElementSeed::new(2, "cent", "{}c")),
        )
        .with_pattern(
            PatternSeed::new(Style::ShortDecimal, 1)
                .with_negative_prefix("-")
                .flat()
                .with_element(
                    ElementSeed::new(1, "dollar", "${:.2}")
                        .unrounded()
                        .show_if_zero(),
                ),
        )
}

/// Pre-decimal British coinage: 4 farthings to the penny, 12 pence to the
/// shilling, 20 shillings to the pound.
pub fn pounds_sterling() -> CurrencySeed {
    CurrencySeed::new("pounds sterling")
        .with_division("pound", 960, &[r"£(\d+)", r"(\d+)\s*(?:pounds?|quid)"])
        .with_division("shilling", 48, &[r"(\d+)\s*(?:s|shillings?|bob)"])
        .with_division(
            "penny",
            4,
            &[r"(\d+(?:\.\d+)?)\s*(?:d|pence|pennies|penny)"],
        )
        .with_division("farthing", 1, &[r"(\d+)\s*(?:f|farthings?)"])
        .with_plural("penny", "pennies")
        .with_pattern(
            PatternSeed::new(Style::Casual, 1)
                .with_condition("abs($amount) >= 960")
                .with_negative_prefix("owing ")
                .with_element(ElementSeed::new(1, "pound", "{} quid"))
                .with_element(ElementSeed::new(2, "shilling", "{} bob"))
                .with_element(ElementSeed::new(3, "penny", "{}d"))
                .with_element(
                    ElementSeed::new(4, "farthing", "{} farthing")
                        .pluralising("farthing")
                        .with_special(2, "hapenny"),
                ),
        )
        .with_pattern(
            PatternSeed::new(Style::Casual, 2)
                .with_negative_prefix("owing ")
                .with_element(ElementSeed::new(1, "shilling", "{} bob"))
                .with_element(ElementSeed::new(2, "penny", "{} penny").pluralising("penny"))
                .with_element(
                    ElementSeed::new(3, "farthing", "{} farthing")
                        .pluralising("farthing")
                        .with_special(2, "hapenny"),
                ),
        )
        .with_pattern(
            PatternSeed::new(Style::Wordy, 1)
                .with_negative_prefix("negative ")
                .with_element(ElementSeed::new(1, "pound", "{} pound").pluralising("pound"))
                .with_element(
                    ElementSeed::new(2, "shilling", "{} shilling").pluralising("shilling"),
                )
                .with_element(ElementSeed::new(3, "penny", "{} penny").pluralising("penny"))
                .with_element(
                    ElementSeed::new(4, "farthing", "{} farthing").pluralising("farthing"),
                ),
        )
        .with_pattern(
            PatternSeed::new(Style::Long, 1)
                .with_negative_prefix("negative ")
                .with_join(listed())
                .with_element(
                    ElementSeed::new(1, "pound", "{} pound sterling").pluralising("pound"),
                )
                .with_element(
                    ElementSeed::new(2, "shilling", "{} shilling").pluralising("shilling"),
                )
                .with_element(ElementSeed::new(3, "penny", "{} penny").pluralising("penny"))
                .with_element(
                    ElementSeed::new(4, "farthing", "{} farthing").pluralising("farthing"),
                ),
        )
        .with_pattern(
            PatternSeed::new(Style::Short, 1)
                .with_negative_prefix("-")
                .with_join(spaced())
                .with_element(ElementSeed::new(1, "pound", "£{}"))
                .with_element(ElementSeed::new(2, "shilling", "{}s"))
                .with_element(ElementSeed::new(3, "penny", "{}d").unrounded()),
        )
        .with_pattern(
            PatternSeed::new(Style::ShortDecimal, 1)
                .with_negative_prefix("-")
                .flat()
                .with_element(
                    ElementSeed::new(1, "penny", "{}d")
                        .unrounded()
                        .show_if_zero(),
                ),
        )
}

/// Imperial Roman coinage of the early Principate.
pub fn roman() -> CurrencySeed {
    let full = |style: Style, join: JoinStyle| {
        PatternSeed::new(style, 1)
            .with_negative_prefix("a debt of ")
            .with_join(join)
            .with_element(ElementSeed::new(1, "aureus", "{} aureus").pluralising("aureus"))
            .with_element(ElementSeed::new(2, "denarius", "{} denarius").pluralising("denarius"))
            .with_element(
                ElementSeed::new(3, "sestertius", "{} sestertius").pluralising("sestertius"),
            )
            .with_element(
                ElementSeed::new(4, "dupondius", "{} dupondius").pluralising("dupondius"),
            )
            .with_element(ElementSeed::new(5, "as", "{} as").pluralising("as"))
    };

    CurrencySeed::new("roman")
        .with_division("aureus", 400, &[r"(\d+)\s*(?:au|aurei|aureus)"])
        .with_division("denarius", 16, &[r"(\d+)\s*(?:den|denarii|denarius)"])
        .with_division(
            "sestertius",
            4,
            &[r"(\d+(?:\.\d+)?)\s*(?:hs|sestertii|sestertius)"],
        )
        .with_division("dupondius", 2, &[r"(\d+)\s*(?:dp|dupondii|dupondius)"])
        .with_division("as", 1, &[r"(\d+)\s*(?:as|asses)"])
        .with_plural("aureus", "aurei")
        .with_plural("denarius", "denarii")
        .with_plural("sestertius", "sestertii")
        .with_plural("dupondius", "dupondii")
        .with_plural("as", "asses")
        .with_pattern(
            PatternSeed::new(Style::Casual, 1)
                .with_negative_prefix("a debt of ")
                .with_element(ElementSeed::new(1, "denarius", "{} denarius").pluralising("denarius"))
                .with_element(
                    ElementSeed::new(2, "sestertius", "{} sestertius")
                        .pluralising("sestertius"),
                )
                .with_element(ElementSeed::new(3, "as", "{} as").pluralising("as")),
        )
        .with_pattern(full(Style::Wordy, JoinStyle::Natural("and".to_string())))
        .with_pattern(full(Style::Long, listed()))
        .with_pattern(
            PatternSeed::new(Style::Short, 1)
                .with_negative_prefix("-")
                .with_join(spaced())
                .with_element(ElementSeed::new(1, "aureus", "{}au"))
                .with_element(ElementSeed::new(2, "denarius", "{}den"))
                .with_element(ElementSeed::new(3, "sestertius", "{}HS"))
                .with_element(ElementSeed::new(4, "dupondius", "{}dp"))
                .with_element(ElementSeed::new(5, "as", "{}as")),
        )
        .with_pattern(
            PatternSeed::new(Style::ShortDecimal, 1)
                .with_negative_prefix("-")
                .flat()
                .with_element(
                    ElementSeed::new(1, "sestertius", "{} HS")
                        .unrounded()
                        .show_if_zero(),
                ),
        )
}

/// Every stock currency seed.
pub fn all() -> Vec<CurrencySeed> {
    vec![dollars(), pounds_sterling(), roman()]
}

/// Validate every stock currency.
pub fn load_all() -> Result<Vec<Currency>, ConfigurationError> {
    all().into_iter().map(Currency::load).collect()
}
