//! Reading user-typed amounts such as "3s 6d" or "2 pounds 5 shillings".
//!
//! Input is split on whitespace. At each position the longest run of up to
//! [`MAX_SPAN`] segments that matches a division's abbreviation grammar is
//! consumed; its captured number times the division's rate is added to the
//! total. Anything left unmatched fails the whole parse.

use log::debug;
use rust_decimal::Decimal;
use std::str::FromStr;

use super::errors::ParseFailure;
use super::types::Currency;
use crate::logutil::escape_log;

/// Most segments a single grammar match may span ("2 pounds sterling").
pub const MAX_SPAN: usize = 3;

/// A grammar hit for one division.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Hit<'c> {
    division: &'c str,
    value: Decimal,
}

/// Parse `text` into an amount of base units of `currency`.
pub fn parse_amount(currency: &Currency, text: &str) -> Result<Decimal, ParseFailure> {
    let segments: Vec<&str> = text.split_whitespace().collect();
    if segments.is_empty() {
        return Err(ParseFailure::Empty {
            currency: currency.name().to_string(),
        });
    }

    let mut total = Decimal::ZERO;
    let mut position = 0;
    while position < segments.len() {
        let (consumed, value) = match_at(currency, &segments[position..])?;
        total = total
            .checked_add(value)
            .ok_or_else(|| ParseFailure::InvalidNumber {
                currency: currency.name().to_string(),
                segment: segments[position..position + consumed].join(" "),
            })?;
        position += consumed;
    }
    Ok(total)
}

/// Match the longest prefix of `segments` that some division recognises.
fn match_at(currency: &Currency, segments: &[&str]) -> Result<(usize, Decimal), ParseFailure> {
    let longest = segments.len().min(MAX_SPAN);
    for span in (1..=longest).rev() {
        let candidate = segments[..span].join(" ");
        let hits = hits_for(currency, &candidate)?;
        let Some(first) = hits.first() else {
            continue;
        };
        if hits.iter().any(|h| h.value != first.value) {
            return Err(ParseFailure::Ambiguous {
                currency: currency.name().to_string(),
                segment: candidate,
                divisions: hits.iter().map(|h| h.division.to_string()).collect(),
            });
        }
        return Ok((span, first.value));
    }
    Err(ParseFailure::Unrecognized {
        currency: currency.name().to_string(),
        segment: segments[0].to_string(),
    })
}

/// Every division whose grammar accepts `candidate`, with the value it reads.
fn hits_for<'c>(currency: &'c Currency, candidate: &str) -> Result<Vec<Hit<'c>>, ParseFailure> {
    let mut hits = Vec::new();
    for division in currency.divisions() {
        let Some(literal) = division
            .abbreviations
            .iter()
            .find_map(|abbr| abbr.capture(candidate))
        else {
            continue;
        };
        let invalid = || ParseFailure::InvalidNumber {
            currency: currency.name().to_string(),
            segment: candidate.to_string(),
        };
        let number = Decimal::from_str(&literal.replace(',', "")).map_err(|_| invalid())?;
        let value = number.checked_mul(division.rate).ok_or_else(invalid)?;
        hits.push(Hit {
            division: &division.name,
            value,
        });
    }
    Ok(hits)
}

impl Currency {
    /// Read a user-typed amount of this currency, in base units.
    pub fn parse(&self, text: &str) -> Result<Decimal, ParseFailure> {
        parse_amount(self, text).map_err(|e| {
            debug!("could not read \"{}\" as {}: {}", escape_log(text), self.name(), e);
            e
        })
    }
}
