//! Published currency snapshots.
//!
//! Each currency is held as an `Arc<Currency>`. Callers take a clone of the
//! `Arc` and render or parse against it without holding any lock. Changing a
//! currency means validating a whole new definition and swapping it in; a
//! caller that already holds the old snapshot keeps using it undisturbed.

use log::{info, warn};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::errors::CurrencyError;
use super::seed::load_currencies_from_json;
use super::select::PredicateRegistry;
use super::types::{Currency, Style};

#[derive(Debug, Clone, Default)]
pub struct CurrencyRegistry {
    currencies: Arc<RwLock<HashMap<String, Arc<Currency>>>>,
}

fn key(name: &str) -> String {
    name.trim().to_lowercase()
}

fn same_divisions(a: &Currency, b: &Currency) -> bool {
    a.divisions().len() == b.divisions().len()
        && a
            .divisions()
            .iter()
            .zip(b.divisions())
            .all(|(x, y)| x.name == y.name && x.rate == y.rate)
}

impl CurrencyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the given currencies.
    pub fn with_currencies(currencies: impl IntoIterator<Item = Currency>) -> Self {
        let registry = Self::new();
        for currency in currencies {
            registry.publish(currency);
        }
        registry
    }

    // Snapshots are replaced whole, so a poisoned lock still guards a consistent map.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Arc<Currency>>> {
        self.currencies.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Arc<Currency>>> {
        self.currencies.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Publish a validated currency, replacing any snapshot with the same name.
    /// Returns the replaced snapshot.
    pub fn publish(&self, currency: Currency) -> Option<Arc<Currency>> {
        let name = currency.name().to_string();
        let reshaped = self.get(&name).map(|old| !same_divisions(&old, &currency));
        let previous = self.write().insert(key(&name), Arc::new(currency));
        match reshaped {
            Some(true) => warn!("replaced currency {} with a different division table", name),
            Some(false) => info!("replaced currency snapshot: {}", name),
            None => info!("published currency: {}", name),
        }
        previous
    }

    /// Validate every currency in a JSON seed file and publish them together.
    ///
    /// If any currency is invalid nothing is published.
    pub fn publish_seed_file<P: AsRef<Path>>(
        &self,
        path: P,
        predicates: &PredicateRegistry,
    ) -> Result<usize, CurrencyError> {
        let path = path.as_ref();
        let currencies = load_currencies_from_json(path, predicates)?;
        let count = currencies.len();
        let mut map = self.write();
        for currency in currencies {
            map.insert(key(currency.name()), Arc::new(currency));
        }
        info!("published {} currencies from {}", count, path.display());
        Ok(count)
    }

    pub fn get(&self, name: &str) -> Option<Arc<Currency>> {
        self.read().get(&key(name)).cloned()
    }

    pub fn require(&self, name: &str) -> Result<Arc<Currency>, CurrencyError> {
        self.get(name)
            .ok_or_else(|| CurrencyError::UnknownCurrency(name.to_string()))
    }

    pub fn remove(&self, name: &str) -> Option<Arc<Currency>> {
        let removed = self.write().remove(&key(name));
        if let Some(currency) = &removed {
            info!("withdrew currency: {}", currency.name());
        }
        removed
    }

    /// Display names of all published currencies, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.read().values().map(|c| c.name().to_string()).collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Describe `amount` in the named currency.
    pub fn render(&self, name: &str, amount: Decimal, style: Style) -> Result<String, CurrencyError> {
        self.require(name)?.describe(amount, style)
    }

    /// Read user text as an amount of the named currency.
    pub fn parse(&self, name: &str, text: &str) -> Result<Decimal, CurrencyError> {
        Ok(self.require(name)?.parse(text)?)
    }
}
