//! Type-safe price representation using decimal arithmetic.
//!
//! Amounts are kept in the currency's standard unit (dollars, not cents) as
//! [`Decimal`] so that subtotal, shipping and tax arithmetic is exact.
//! Rounding only happens at the display boundary, half away from zero,
//! always to two places.

use core::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a USD price.
    #[must_use]
    pub const fn usd(amount: Decimal) -> Self {
        Self::new(amount, CurrencyCode::USD)
    }

    /// Create a price from an amount in the smallest currency unit.
    #[must_use]
    pub fn from_cents(cents: i64, currency_code: CurrencyCode) -> Self {
        Self::new(Decimal::new(cents, 2), currency_code)
    }

    /// A zero amount.
    #[must_use]
    pub const fn zero(currency_code: CurrencyCode) -> Self {
        Self::new(Decimal::ZERO, currency_code)
    }

    /// The amount rounded to cents.
    #[must_use]
    pub fn rounded(&self) -> Decimal {
        round_cents(self.amount)
    }

    /// Format for display (e.g., "$19.99").
    #[must_use]
    pub fn display(&self) -> String {
        format!("{}{:.2}", self.currency_code.symbol(), self.rounded())
    }

    /// Format for display with thousands separators (e.g., "$125,430.50").
    #[must_use]
    pub fn display_grouped(&self) -> String {
        let formatted = format!("{:.2}", self.rounded().abs());
        let (whole, cents) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (i, ch) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        let sign = if self.amount.is_sign_negative() && !self.rounded().is_zero() {
            "-"
        } else {
            ""
        };
        format!("{sign}{}{grouped}.{cents}", self.currency_code.symbol())
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// Round an amount to cents, half away from zero.
#[must_use]
pub fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
}

impl CurrencyCode {
    /// Currency symbol used when formatting.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::USD | Self::CAD | Self::AUD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }

    /// Three-letter ISO code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
            Self::CAD => "CAD",
            Self::AUD => "AUD",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_pads_to_two_places() {
        assert_eq!(Price::usd(Decimal::new(25, 0)).display(), "$25.00");
        assert_eq!(Price::from_cents(999, CurrencyCode::USD).display(), "$9.99");
    }

    #[test]
    fn test_display_rounds_half_away_from_zero() {
        assert_eq!(Price::usd(Decimal::new(10_005, 3)).display(), "$10.01");
        assert_eq!(Price::usd(Decimal::new(10_004, 3)).display(), "$10.00");
    }

    #[test]
    fn test_display_grouped() {
        assert_eq!(
            Price::from_cents(12_543_050, CurrencyCode::USD).display_grouped(),
            "$125,430.50"
        );
        assert_eq!(Price::from_cents(99_900, CurrencyCode::USD).display_grouped(), "$999.00");
        assert_eq!(
            Price::from_cents(100_000_000, CurrencyCode::USD).display_grouped(),
            "$1,000,000.00"
        );
    }

    #[test]
    fn test_currency_symbols() {
        assert_eq!(Price::zero(CurrencyCode::EUR).display(), "€0.00");
        assert_eq!(CurrencyCode::GBP.code(), "GBP");
    }
}
