use rust_decimal::Decimal;
use thiserror::Error;

use super::types::Style;

/// Problems detected while loading a currency definition.
///
/// These are raised once, when a seed is turned into a [`Currency`](super::Currency).
/// A currency that fails validation is never published.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("currency has no name")]
    MissingName,

    #[error("currency {currency} has no divisions")]
    NoDivisions { currency: String },

    #[error("currency {currency} has no base division (a division with rate 1)")]
    NoBaseDivision { currency: String },

    #[error("currency {currency} has more than one base division: {first}, {second}")]
    DuplicateBaseDivision {
        currency: String,
        first: String,
        second: String,
    },

    #[error("division {division} of {currency} has rate {rate}; rates must be at least 1 base unit")]
    InvalidRate {
        currency: String,
        division: String,
        rate: Decimal,
    },

    #[error("currency {currency} defines division {division} more than once")]
    DuplicateDivision { currency: String, division: String },

    #[error("currency {currency} has no default {style} pattern (one without a selector)")]
    MissingDefaultPattern { currency: String, style: Style },

    #[error("{style} pattern #{order} of {currency} has no elements")]
    EmptyPattern {
        currency: String,
        style: Style,
        order: i32,
    },

    #[error("{style} pattern #{order} of {currency} refers to unknown division {division}")]
    UnknownDivision {
        currency: String,
        style: Style,
        order: i32,
        division: String,
    },

    #[error("{style} pattern #{order} of {currency} repeats element order {element}")]
    DuplicateElementOrder {
        currency: String,
        style: Style,
        order: i32,
        element: i32,
    },

    #[error(
        "{style} pattern #{order} of {currency}: {larger} ({larger_rate}) must come before and be a whole multiple of {smaller} ({smaller_rate})"
    )]
    NonMonotonicRates {
        currency: String,
        style: Style,
        order: i32,
        larger: String,
        larger_rate: Decimal,
        smaller: String,
        smaller_rate: Decimal,
    },

    #[error("{style} pattern #{order} of {currency}: unrounded element {division} must be the last or only element")]
    MisplacedNoRounding {
        currency: String,
        style: Style,
        order: i32,
        division: String,
    },

    #[error("{style} pattern #{order} of {currency}: special value {value} of {division} can never be reached (limit {limit})")]
    SpecialValueOutOfRange {
        currency: String,
        style: Style,
        order: i32,
        division: String,
        value: Decimal,
        limit: Decimal,
    },

    #[error("{style} pattern #{order} of {currency}: special value {value} of {division} is not a whole non-negative number")]
    InvalidSpecialValue {
        currency: String,
        style: Style,
        order: i32,
        division: String,
        value: Decimal,
    },

    #[error("{style} pattern #{order} of {currency}: bad template {template:?}: {reason}")]
    InvalidTemplate {
        currency: String,
        style: Style,
        order: i32,
        template: String,
        reason: String,
    },

    #[error("division {division} of {currency} has bad abbreviation {pattern:?}: {reason}")]
    InvalidAbbreviation {
        currency: String,
        division: String,
        pattern: String,
        reason: String,
    },

    #[error("abbreviations of {currency} are ambiguous: {input:?} matches both {first} and {second}")]
    AmbiguousAbbreviation {
        currency: String,
        input: String,
        first: String,
        second: String,
    },

    #[error("{style} pattern #{order} of {currency}: bad condition {condition:?}: {reason}")]
    InvalidCondition {
        currency: String,
        style: Style,
        order: i32,
        condition: String,
        reason: String,
    },

    #[error("{style} pattern #{order} of {currency}: unknown predicate {name}")]
    UnknownPredicate {
        currency: String,
        style: Style,
        order: i32,
        name: String,
    },

    #[error("{style} pattern #{order} of {currency} sets both a condition and a named predicate")]
    ConflictingSelector {
        currency: String,
        style: Style,
        order: i32,
    },
}

/// Reasons user-typed currency text could not be read.
///
/// These are ordinary outcomes of bad input, not crashes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseFailure {
    #[error("no amount of {currency} given")]
    Empty { currency: String },

    #[error("{segment:?} is not an amount of {currency}")]
    Unrecognized { currency: String, segment: String },

    #[error("{segment:?} could be any of {} in {currency}", .divisions.join(", "))]
    Ambiguous {
        currency: String,
        segment: String,
        divisions: Vec<String>,
    },

    #[error("{segment:?} is not a usable number of {currency}")]
    InvalidNumber { currency: String, segment: String },
}

impl ParseFailure {
    /// The segment of input that caused the failure, if any.
    pub fn segment(&self) -> Option<&str> {
        match self {
            ParseFailure::Empty { .. } => None,
            ParseFailure::Unrecognized { segment, .. }
            | ParseFailure::Ambiguous { segment, .. }
            | ParseFailure::InvalidNumber { segment, .. } => Some(segment),
        }
    }

    pub fn currency(&self) -> &str {
        match self {
            ParseFailure::Empty { currency }
            | ParseFailure::Unrecognized { currency, .. }
            | ParseFailure::Ambiguous { currency, .. }
            | ParseFailure::InvalidNumber { currency, .. } => currency,
        }
    }
}

/// Raised by a selector predicate that could not decide.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("selector failed: {0}")]
pub struct PredicateError(pub String);

/// Umbrella error for the currency engine.
#[derive(Debug, Error)]
pub enum CurrencyError {
    #[error("invalid currency configuration: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Parse(#[from] ParseFailure),

    /// Only reachable for a currency that bypassed load-time validation.
    #[error("no {style} pattern of {currency} applies")]
    NoApplicablePattern { currency: String, style: Style },

    #[error("unknown currency: {0}")]
    UnknownCurrency(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("seed error: {0}")]
    Json(#[from] serde_json::Error),
}
