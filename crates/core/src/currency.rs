//! Currency codes and conversion into the reference currency (USD).
//!
//! Conversion rates are plain configuration values: they are loaded once at
//! startup and handed to the salary service by value. Nothing here reads
//! global state.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const CODE_USD: &str = "USD";
pub const CODE_EUR: &str = "EUR";
/// Rouble code used by the HR spreadsheets.
pub const CODE_RUS: &str = "RUS";
/// ISO 4217 rouble code, accepted as an alias of [`CODE_RUS`].
pub const CODE_RUB: &str = "RUB";

/// Default EUR -> USD multiplier.
pub const DEFAULT_EUR_TO_USD: f64 = 1.1328;
/// Default RUB -> USD multiplier.
pub const DEFAULT_RUB_TO_USD: f64 = 0.014;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Currencies the salary filter knows how to express in USD.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Currency {
    Usd,
    Eur,
    Rub,
}

impl Currency {
    /// Parse a stored currency code. Returns `None` for unknown codes.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            CODE_USD => Some(Self::Usd),
            CODE_EUR => Some(Self::Eur),
            CODE_RUS | CODE_RUB => Some(Self::Rub),
            _ => None,
        }
    }
}

/// Multipliers from the supported foreign currencies into USD.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurrencyRates {
    pub eur_to_usd: f64,
    pub rub_to_usd: f64,
}

impl Default for CurrencyRates {
    fn default() -> Self {
        Self {
            eur_to_usd: DEFAULT_EUR_TO_USD,
            rub_to_usd: DEFAULT_RUB_TO_USD,
        }
    }
}

impl CurrencyRates {
    /// Multiplier into USD, or `None` when the currency is already USD.
    pub fn coefficient(&self, currency: Currency) -> Option<f64> {
        match currency {
            Currency::Usd => None,
            Currency::Eur => Some(self.eur_to_usd),
            Currency::Rub => Some(self.rub_to_usd),
        }
    }
}

/// Multiply a textual amount by `coefficient` and render the result as a
/// whole number.
///
/// Rounding is half away from zero (`f64::round`), so `2.5` becomes `3` and
/// `-2.5` becomes `-3`. Returns `None` when `amount` is not a finite number
/// or the result does not fit in an `i64`.
pub fn convert_amount(amount: &str, coefficient: f64) -> Option<String> {
    let value: f64 = amount.trim().parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    let converted = (value * coefficient).round();
    // `i64::MAX as f64` rounds up to 2^63, so the upper bound is exclusive.
    if !(i64::MIN as f64..i64::MAX as f64).contains(&converted) {
        return None;
    }
    Some(format!("{}", converted as i64))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
