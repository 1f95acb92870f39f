//! Pluralisation of division words.
//!
//! Only the regular "+s" rule is applied automatically. Anything else
//! ("penny" → "pennies", "as" → "asses") must be listed in the currency's
//! irregular table.

use rust_decimal::Decimal;
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pluralizer {
    irregular: HashMap<String, String>,
}

impl Pluralizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(singular, plural)` pairs. Keys are matched case-insensitively.
    pub fn with_irregular<I, S, P>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, P)>,
        S: AsRef<str>,
        P: Into<String>,
    {
        let irregular = pairs
            .into_iter()
            .map(|(s, p)| (s.as_ref().to_lowercase(), p.into()))
            .collect();
        Self { irregular }
    }

    pub fn insert(&mut self, singular: &str, plural: impl Into<String>) {
        self.irregular.insert(singular.to_lowercase(), plural.into());
    }

    pub fn irregular(&self) -> impl Iterator<Item = (&str, &str)> {
        self.irregular.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Plural form of `word`, ignoring the count.
    pub fn plural_of(&self, word: &str) -> String {
        match self.irregular.get(&word.to_lowercase()) {
            Some(plural) => plural.clone(),
            None => format!("{}s", word),
        }
    }

    /// `word` inflected for `count`. A count of exactly one keeps the singular.
    pub fn pluralize(&self, word: &str, count: Decimal) -> String {
        if count == Decimal::ONE {
            word.to_string()
        } else {
            self.plural_of(word)
        }
    }

    /// Replace whole-word occurrences of `word` in `text` with its form for `count`.
    pub fn inflect_in(&self, text: &str, word: &str, count: Decimal) -> String {
        if word.is_empty() || count == Decimal::ONE {
            return text.to_string();
        }
        replace_whole_word(text, word, &self.plural_of(word))
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn replace_whole_word(text: &str, word: &str, replacement: &str) -> String {
    let mut out = String::with_capacity(text.len() + replacement.len());
    let mut rest = text;
    let mut prev: Option<char> = None;
    while let Some(pos) = rest.find(word) {
        let before = rest[..pos].chars().last().or(prev);
        let after = rest[pos + word.len()..].chars().next();
        let bounded = !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char);
        out.push_str(&rest[..pos]);
        if bounded {
            out.push_str(replacement);
        } else {
            out.push_str(word);
        }
        prev = word.chars().last();
        rest = &rest[pos + word.len()..];
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sterling() -> Pluralizer {
        Pluralizer::with_irregular([("penny", "pennies")])
    }

    #[test]
    fn regular_words_take_s() {
        let p = Pluralizer::new();
        assert_eq!(p.pluralize("dollar", dec!(2)), "dollars");
        assert_eq!(p.pluralize("dollar", dec!(0)), "dollars");
        assert_eq!(p.pluralize("dollar", dec!(1.5)), "dollars");
    }

    #[test]
    fn one_stays_singular() {
        assert_eq!(sterling().pluralize("penny", dec!(1)), "penny");
        assert_eq!(sterling().pluralize("penny", dec!(1.00)), "penny");
    }

    #[test]
    fn irregular_table_wins() {
        assert_eq!(sterling().pluralize("penny", dec!(3)), "pennies");
        assert_eq!(sterling().pluralize("Penny", dec!(3)), "pennies");
    }

    #[test]
    fn inflects_only_whole_words() {
        let p = sterling();
        assert_eq!(p.inflect_in("3 penny", "penny", dec!(3)), "3 pennies");
        assert_eq!(
            p.inflect_in("3 pennyweight penny", "penny", dec!(3)),
            "3 pennyweight pennies"
        );
        assert_eq!(p.inflect_in("1 penny", "penny", dec!(1)), "1 penny");
        assert_eq!(p.inflect_in("2 cent", "", dec!(2)), "2 cent");
    }
}
