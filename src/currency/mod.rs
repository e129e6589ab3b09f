//! Currency identity and date-indexed exchange rates.

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use serde::de::{self, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

use crate::config;
use crate::errors::LedgerError;

/// Active ISO 4217 alpha codes, including the fund and metal entries.
const ISO_4217_CODES: &[&str] = &[
    "AED", "AFN", "ALL", "AMD", "ANG", "AOA", "ARS", "AUD", "AWG", "AZN", "BAM", "BBD", "BDT",
    "BGN", "BHD", "BIF", "BMD", "BND", "BOB", "BOV", "BRL", "BSD", "BTN", "BWP", "BYN", "BZD",
    "CAD", "CDF", "CHE", "CHF", "CHW", "CLF", "CLP", "CNY", "COP", "COU", "CRC", "CUP", "CVE",
    "CZK", "DJF", "DKK", "DOP", "DZD", "EGP", "ERN", "ETB", "EUR", "FJD", "FKP", "GBP", "GEL",
    "GHS", "GIP", "GMD", "GNF", "GTQ", "GYD", "HKD", "HNL", "HTG", "HUF", "IDR", "ILS", "INR",
    "IQD", "IRR", "ISK", "JMD", "JOD", "JPY", "KES", "KGS", "KHR", "KMF", "KPW", "KRW", "KWD",
    "KYD", "KZT", "LAK", "LBP", "LKR", "LRD", "LSL", "LYD", "MAD", "MDL", "MGA", "MKD", "MMK",
    "MNT", "MOP", "MRU", "MUR", "MVR", "MWK", "MXN", "MXV", "MYR", "MZN", "NAD", "NGN", "NIO",
    "NOK", "NPR", "NZD", "OMR", "PAB", "PEN", "PGK", "PHP", "PKR", "PLN", "PYG", "QAR", "RON",
    "RSD", "RUB", "RWF", "SAR", "SBD", "SCR", "SDG", "SEK", "SGD", "SHP", "SLE", "SOS", "SRD",
    "SSP", "STN", "SVC", "SYP", "SZL", "THB", "TJS", "TMT", "TND", "TOP", "TRY", "TTD", "TWD",
    "TZS", "UAH", "UGX", "USD", "USN", "UYI", "UYU", "UYW", "UZS", "VED", "VES", "VND", "VUV",
    "WST", "XAF", "XAG", "XAU", "XBA", "XBB", "XBC", "XBD", "XCD", "XDR", "XOF", "XPD", "XPF",
    "XPT", "XSU", "XTS", "XUA", "XXX", "YER", "ZAR", "ZMW", "ZWG",
];

static CODE_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ISO_4217_CODES.iter().copied().collect());

/// ISO 4217 currency representation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Currency(String);

impl Currency {
    /// Canonicalizes to uppercase and validates against the ISO 4217 table.
    pub fn new(code: impl Into<String>) -> Result<Self, LedgerError> {
        let code = code.into().to_uppercase();
        if CODE_SET.contains(code.as_str()) {
            Ok(Self(code))
        } else {
            Err(LedgerError::UnknownCurrency { code })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Every alpha code this library recognizes.
    pub fn all_codes() -> &'static [&'static str] {
        ISO_4217_CODES
    }
}

impl Default for Currency {
    fn default() -> Self {
        Self(config::DEFAULT_BASE_CURRENCY.to_string())
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Currency {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for Currency {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Currency {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Currency::new(raw).map_err(de::Error::custom)
    }
}

/// Date-indexed exchange rates expressed against a fixed base currency.
///
/// Rates are keyed by the exact instant they were quoted at; lookups never
/// interpolate between instants.
#[derive(Debug, Clone)]
pub struct RateTable {
    base: Currency,
    rates: BTreeMap<DateTime<Utc>, BTreeMap<Currency, Decimal>>,
}

impl RateTable {
    pub fn new() -> Self {
        Self::with_base(Currency::default())
    }

    pub fn with_base(base: Currency) -> Self {
        Self {
            base,
            rates: BTreeMap::new(),
        }
    }

    pub fn base(&self) -> &Currency {
        &self.base
    }

    /// Records a rate quoted at an exact instant and reports whether a new
    /// entry was stored.
    ///
    /// The base currency is pinned at rate 1 whatever the caller passes, and
    /// an already-recorded (instant, currency) pair keeps its first value.
    pub fn insert(&mut self, currency: Currency, rate: Decimal, at: DateTime<Utc>) -> bool {
        let rate = if currency == self.base {
            Decimal::ONE
        } else {
            rate
        };
        let quotes = self.rates.entry(at).or_default();
        if quotes.contains_key(&currency) {
            tracing::debug!("{} already quoted at {}, keeping the first value", currency, at);
            return false;
        }
        quotes.insert(currency, rate);
        true
    }

    /// Rate quoted for a currency exactly at `at`, if one was recorded.
    ///
    /// The base currency is implicitly 1 at every instant.
    pub fn rate_at(&self, currency: &Currency, at: DateTime<Utc>) -> Option<Decimal> {
        if *currency == self.base {
            return Some(Decimal::ONE);
        }
        self.rates
            .get(&at)
            .and_then(|quotes| quotes.get(currency))
            .copied()
    }

    /// Number of recorded (instant, currency) entries.
    pub fn len(&self) -> usize {
        self.rates.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl Default for RateTable {
    fn default() -> Self {
        Self::new()
    }
}

impl Serialize for RateTable {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.rates.len()))?;
        for (at, quotes) in &self.rates {
            map.serialize_entry(&at.to_rfc3339(), quotes)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for RateTable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = BTreeMap::<String, BTreeMap<String, Decimal>>::deserialize(deserializer)?;
        let mut table = RateTable::new();
        for (stamp, quotes) in raw {
            let at = DateTime::parse_from_rfc3339(&stamp)
                .map_err(|err| {
                    de::Error::custom(format!("invalid rate timestamp `{}`: {}", stamp, err))
                })?
                .with_timezone(&Utc);
            for (code, rate) in quotes {
                let currency = Currency::new(code).map_err(de::Error::custom)?;
                table.insert(currency, rate, at);
            }
        }
        Ok(table)
    }
}
