//! Shared newtypes and utilities used across all domain modules.
//!
//! These types are serialization-transparent: they serialize/deserialize identically
//! to the raw format the provider sends, so they can be used directly in wire types
//! without conversion overhead.

pub mod fmt;
pub mod serde_util;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;
use thiserror::Error;

// ─── CoinId ──────────────────────────────────────────────────────────────────

/// Newtype for provider coin identifiers (e.g. `"bitcoin"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CoinId(String);

impl CoinId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CoinId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CoinId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for CoinId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl FromStr for CoinId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(CoinId(s.to_string()))
    }
}

impl Serialize for CoinId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for CoinId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(CoinId(s))
    }
}

// ─── Currency ────────────────────────────────────────────────────────────────

/// Quote currency code as the provider expects it (`vs_currency`), always lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Currency(String);

impl Currency {
    pub fn new(code: &str) -> Self {
        Self(code.trim().to_lowercase())
    }

    pub fn usd() -> Self {
        Self::new("usd")
    }

    pub fn inr() -> Self {
        Self::new("inr")
    }

    pub fn eur() -> Self {
        Self::new("eur")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Display symbol for prices in this currency.
    pub fn symbol(&self) -> String {
        match self.0.as_str() {
            "inr" => "₹".to_string(),
            "usd" => "$".to_string(),
            "eur" => "€".to_string(),
            other => other.to_uppercase(),
        }
    }
}

impl Default for Currency {
    fn default() -> Self {
        Self::inr()
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Currency {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl Serialize for Currency {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Currency {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Currency::new(&s))
    }
}

// ─── DayRange ────────────────────────────────────────────────────────────────

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("day range must be a positive number of days")]
pub struct DayRangeError;

/// Width of a historical window in days. `1` means intraday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct DayRange(u32);

impl DayRange {
    pub const ONE_DAY: DayRange = DayRange(1);
    pub const THIRTY_DAYS: DayRange = DayRange(30);
    pub const NINETY_DAYS: DayRange = DayRange(90);
    pub const ONE_YEAR: DayRange = DayRange(365);

    /// The preset windows offered by the chart period selector.
    pub const PRESETS: [DayRange; 4] = [
        Self::ONE_DAY,
        Self::THIRTY_DAYS,
        Self::NINETY_DAYS,
        Self::ONE_YEAR,
    ];

    pub fn new(days: u32) -> Result<Self, DayRangeError> {
        if days == 0 {
            return Err(DayRangeError);
        }
        Ok(Self(days))
    }

    pub fn days(&self) -> u32 {
        self.0
    }

    pub fn is_intraday(&self) -> bool {
        self.0 == 1
    }

    /// Human label for the selector ("24 Hours", "3 Months", ...).
    pub fn label(&self) -> String {
        match self.0 {
            1 => "24 Hours".to_string(),
            90 => "3 Months".to_string(),
            365 => "1 Year".to_string(),
            n => format!("{} Days", n),
        }
    }
}

impl Default for DayRange {
    fn default() -> Self {
        Self::THIRTY_DAYS
    }
}

impl TryFrom<u32> for DayRange {
    type Error = DayRangeError;

    fn try_from(days: u32) -> Result<Self, Self::Error> {
        DayRange::new(days)
    }
}

impl From<DayRange> for u32 {
    fn from(range: DayRange) -> Self {
        range.0
    }
}

impl std::fmt::Display for DayRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coin_id_serde() {
        let id = CoinId::from("bitcoin");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"bitcoin\"");
        let back: CoinId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }

    #[test]
    fn test_currency_is_lowercased() {
        let c: Currency = serde_json::from_str("\"USD\"").unwrap();
        assert_eq!(c, Currency::usd());
        assert_eq!(Currency::new(" Eur ").as_str(), "eur");
    }

    #[test]
    fn test_currency_symbols() {
        assert_eq!(Currency::inr().symbol(), "₹");
        assert_eq!(Currency::usd().symbol(), "$");
        assert_eq!(Currency::eur().symbol(), "€");
        assert_eq!(Currency::new("gbp").symbol(), "GBP");
        assert_eq!(Currency::default(), Currency::inr());
    }

    #[test]
    fn test_day_range_rejects_zero() {
        assert_eq!(DayRange::new(0), Err(DayRangeError));
        assert!(serde_json::from_str::<DayRange>("0").is_err());
        let r: DayRange = serde_json::from_str("90").unwrap();
        assert_eq!(r, DayRange::NINETY_DAYS);
    }

    #[test]
    fn test_day_range_labels() {
        let labels: Vec<_> = DayRange::PRESETS.iter().map(|r| r.label()).collect();
        assert_eq!(labels, ["24 Hours", "30 Days", "3 Months", "1 Year"]);
        assert!(DayRange::ONE_DAY.is_intraday());
        assert!(!DayRange::NINETY_DAYS.is_intraday());
    }
}
