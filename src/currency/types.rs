use regex::{Regex, RegexBuilder};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::plural::Pluralizer;
use super::rounding::RoundingMode;
use super::select::Selector;
use super::template::Template;

// ============================================================================
// Styles
// ============================================================================

/// Output style requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Style {
    /// Everyday speech, e.g. "a hapenny" or "2 bob".
    Casual,
    /// Full words joined as a list, e.g. "1 dollar and 5 cents".
    Wordy,
    /// Formal, complete description.
    Long,
    /// Compact abbreviations, e.g. "£1 5s 3d".
    Short,
    /// Single decimal figure, e.g. "$1.05".
    ShortDecimal,
}

impl Style {
    pub const ALL: [Style; 5] = [
        Style::Casual,
        Style::Wordy,
        Style::Long,
        Style::Short,
        Style::ShortDecimal,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Style::Casual => "casual",
            Style::Wordy => "wordy",
            Style::Long => "long",
            Style::Short => "short",
            Style::ShortDecimal => "short_decimal",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Style {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .collect::<String>()
            .to_lowercase();
        match key.as_str() {
            "casual" => Ok(Style::Casual),
            "wordy" => Ok(Style::Wordy),
            "long" => Ok(Style::Long),
            "short" => Ok(Style::Short),
            "shortdecimal" | "decimal" => Ok(Style::ShortDecimal),
            _ => Err(format!("unknown style '{}'", s)),
        }
    }
}

// ============================================================================
// Joining element text
// ============================================================================

/// How the rendered elements of one pattern are put together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinStyle {
    /// Elements run straight together; templates carry their own spacing.
    Concatenate,
    /// Elements separated by a fixed string.
    Separator(String),
    /// English list: "a", "a and b", "a, b and c" using the given conjunction.
    Natural(String),
}

impl JoinStyle {
    pub fn join(&self, parts: &[String]) -> String {
        match self {
            JoinStyle::Concatenate => parts.concat(),
            JoinStyle::Separator(sep) => parts.join(sep),
            JoinStyle::Natural(conjunction) => match parts {
                [] => String::new(),
                [only] => only.clone(),
                [head @ .., last] => {
                    format!("{} {} {}", head.join(", "), conjunction, last)
                }
            },
        }
    }
}

// ============================================================================
// Denomination table
// ============================================================================

/// One abbreviation grammar of a division.
///
/// Matching is anchored to the whole candidate text and case-insensitive.
/// The single capture group holds the numeric literal.
#[derive(Debug, Clone)]
pub struct Abbreviation {
    pattern: String,
    regex: Regex,
}

impl Abbreviation {
    pub fn compile(pattern: &str) -> Result<Self, String> {
        let regex = RegexBuilder::new(&format!("^(?:{})$", pattern))
            .case_insensitive(true)
            .build()
            .map_err(|e| e.to_string())?;
        // group 0 is the whole match
        if regex.captures_len() != 2 {
            return Err(format!(
                "expected exactly one capture group, found {}",
                regex.captures_len() - 1
            ));
        }
        Ok(Self {
            pattern: pattern.to_string(),
            regex,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// The numeric literal captured from `text`, if the whole text matches.
    pub fn capture<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.regex
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

/// A named denomination and its worth in base units.
#[derive(Debug, Clone)]
pub struct Division {
    pub name: String,
    pub rate: Decimal,
    pub abbreviations: Vec<Abbreviation>,
}

impl Division {
    pub fn is_base(&self) -> bool {
        self.rate == Decimal::ONE
    }
}

// ============================================================================
// Description patterns
// ============================================================================

/// Literal text shown instead of the template for one exact quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialValue {
    pub value: Decimal,
    pub text: String,
}

/// One division's slot in a pattern.
#[derive(Debug, Clone)]
pub struct PatternElement {
    pub order: i32,
    pub division: String,
    /// Rate of `division`, copied from the denomination table at load.
    pub rate: Decimal,
    pub template: Template,
    pub show_if_zero: bool,
    pub rounding: RoundingMode,
    /// Word to inflect when the quantity is not one; empty disables it.
    pub pluralise_word: String,
    pub special_values_override: bool,
    pub special_values: Vec<SpecialValue>,
}

impl PatternElement {
    pub fn special_text(&self, quantity: Decimal) -> Option<&str> {
        if !self.special_values_override {
            return None;
        }
        self.special_values
            .iter()
            .find(|sv| sv.value == quantity)
            .map(|sv| sv.text.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct DescriptionPattern {
    pub style: Style,
    pub order: i32,
    /// `None` means the pattern always applies.
    pub selector: Option<Selector>,
    pub negative_prefix: String,
    /// Successive remainder consumption when true; independent elements otherwise.
    pub aggregate: bool,
    pub join: JoinStyle,
    /// Sorted by `order`.
    pub elements: Vec<PatternElement>,
}

impl DescriptionPattern {
    pub fn is_default(&self) -> bool {
        self.selector.is_none()
    }
}

// ============================================================================
// Currency
// ============================================================================

/// A validated, immutable currency definition.
///
/// Built by [`Currency::load`]; never mutated afterwards. Replace the whole
/// value (see [`CurrencyRegistry`](super::CurrencyRegistry)) to change it.
#[derive(Debug, Clone)]
pub struct Currency {
    name: String,
    divisions: Vec<Division>,
    patterns: Vec<DescriptionPattern>,
    pluralizer: Pluralizer,
}

impl Currency {
    /// Assemble an already-validated definition. Divisions must be sorted by
    /// descending rate and patterns by (style, order).
    pub(crate) fn from_parts(
        name: String,
        divisions: Vec<Division>,
        patterns: Vec<DescriptionPattern>,
        pluralizer: Pluralizer,
    ) -> Self {
        Self {
            name,
            divisions,
            patterns,
            pluralizer,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Divisions from largest to smallest.
    pub fn divisions(&self) -> &[Division] {
        &self.divisions
    }

    pub fn division(&self, name: &str) -> Option<&Division> {
        self.divisions
            .iter()
            .find(|d| d.name.eq_ignore_ascii_case(name))
    }

    pub fn base_division(&self) -> Option<&Division> {
        self.divisions.iter().find(|d| d.is_base())
    }

    pub fn patterns(&self) -> &[DescriptionPattern] {
        &self.patterns
    }

    /// Patterns of one style in priority order.
    pub fn patterns_for(&self, style: Style) -> impl Iterator<Item = &DescriptionPattern> {
        self.patterns.iter().filter(move |p| p.style == style)
    }

    pub fn pluralizer(&self) -> &Pluralizer {
        &self.pluralizer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_from_str_accepts_variants() {
        assert_eq!("Wordy".parse::<Style>().unwrap(), Style::Wordy);
        assert_eq!("short-decimal".parse::<Style>().unwrap(), Style::ShortDecimal);
        assert_eq!("ShortDecimal".parse::<Style>().unwrap(), Style::ShortDecimal);
        assert_eq!("short_decimal".parse::<Style>().unwrap(), Style::ShortDecimal);
        assert!("fancy".parse::<Style>().is_err());
    }

    #[test]
    fn style_serde_names() {
        let json = serde_json::to_string(&Style::ShortDecimal).unwrap();
        assert_eq!(json, "\"short_decimal\"");
        let back: Style = serde_json::from_str("\"casual\"").unwrap();
        assert_eq!(back, Style::Casual);
    }

    #[test]
    fn natural_join() {
        let join = JoinStyle::Natural("and".to_string());
        let parts = |v: &[&str]| v.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        assert_eq!(join.join(&parts(&[])), "");
        assert_eq!(join.join(&parts(&["1 dollar"])), "1 dollar");
        assert_eq!(
            join.join(&parts(&["1 dollar", "5 cents"])),
            "1 dollar and 5 cents"
        );
        assert_eq!(
            join.join(&parts(&["1 pound", "2 shillings", "3 pennies"])),
            "1 pound, 2 shillings and 3 pennies"
        );
    }

    #[test]
    fn separator_and_concatenate_join() {
        let parts = vec!["£1".to_string(), "5s".to_string()];
        assert_eq!(JoinStyle::Separator(" ".to_string()).join(&parts), "£1 5s");
        assert_eq!(JoinStyle::Concatenate.join(&parts), "£15s");
    }

    #[test]
    fn abbreviation_is_anchored_and_case_insensitive() {
        let abbr = Abbreviation::compile(r"(\d+)\s*s").unwrap();
        assert_eq!(abbr.capture("3s"), Some("3"));
        assert_eq!(abbr.capture("3 S"), Some("3"));
        assert_eq!(abbr.capture("3sh"), None);
        assert_eq!(abbr.capture("x3s"), None);
    }

    #[test]
    fn abbreviation_requires_one_group() {
        assert!(Abbreviation::compile(r"\d+s").is_err());
        assert!(Abbreviation::compile(r"(\d+)(s)").is_err());
        assert!(Abbreviation::compile(r"(?:\d+)(s").is_err());
        assert!(Abbreviation::compile(r"(\d+)(?:s|shillings?)").is_ok());
    }
}
