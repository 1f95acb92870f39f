//! # Coinage - describing and reading money in any coinage
//!
//! Coinage turns an exact amount of a currency's base unit into text and reads
//! user-typed text back into an exact amount. Currencies need not be decimal:
//! pre-1971 sterling (4 farthings to the penny, 12 pence to the shilling, 20
//! shillings to the pound) and Roman coinage are configured the same way as
//! dollars and cents.
//!
//! ## Features
//!
//! - **Five output styles**: Casual, Wordy, Long, Short and ShortDecimal, each
//!   with its own description patterns.
//! - **Conditional patterns**: a pattern may apply only when a condition such as
//!   `abs($amount) >= 960` holds, or when a host-registered predicate accepts the amount.
//! - **Mixed-radix decomposition**: greedy remainder consumption across divisions
//!   with truncating or exact rounding per element.
//! - **Special values and plurals**: "hapenny" instead of "2 farthings",
//!   irregular plurals such as "penny" to "pennies".
//! - **Parsing**: per-division regular-expression grammars ("3s 6d", "£2",
//!   "5 shillings") summed into an exact total.
//! - **Snapshots**: validated currencies are immutable and published whole through
//!   [`currency::CurrencyRegistry`].
//!
//! ## Quick Start
//!
//! ```rust
//! use coinage::currency::{builtin, Currency, Style};
//! use rust_decimal::Decimal;
//!
//! let sterling = Currency::load(builtin::pounds_sterling()).unwrap();
//! assert_eq!(sterling.parse("3s 6d").unwrap(), Decimal::from(168));
//! assert_eq!(sterling.describe(Decimal::from(2), Style::Casual).unwrap(), "hapenny");
//! ```
//!
//! ## Module Organization
//!
//! - [`currency`] - currency model, validation, rendering, parsing and the registry
//! - [`config`] - TOML configuration for the `coinage` binary
//! - [`logutil`] - helpers for logging user-typed text

pub mod config;
pub mod currency;
pub mod logutil;
