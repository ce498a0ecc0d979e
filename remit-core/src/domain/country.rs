//! Country, currency, exchange-rate and fee tables
//!
//! All tables are static and hand-authored. Exchange rates are not
//! reciprocal and there is no diagonal: converting a currency into itself
//! is never looked up.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::result::Error;

/// Supported account countries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Country {
    India,
    UK,
    US,
    Canada,
    Saudi,
}

impl Country {
    /// All countries, in the order the sign-up and transfer pickers show them
    pub const ALL: [Country; 5] = [
        Country::India,
        Country::UK,
        Country::US,
        Country::Canada,
        Country::Saudi,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Country::India => "India",
            Country::UK => "UK",
            Country::US => "US",
            Country::Canada => "Canada",
            Country::Saudi => "Saudi",
        }
    }

    /// The national currency of this country
    pub fn currency(&self) -> Currency {
        match self {
            Country::India => Currency::INR,
            Country::UK => Currency::GBP,
            Country::US => Currency::USD,
            Country::Canada => Currency::CAD,
            Country::Saudi => Currency::SAR,
        }
    }

    /// Flat per-transfer fee, denominated in this country's currency
    pub fn transaction_fee(&self) -> Decimal {
        match self {
            Country::India => Decimal::new(12879, 2),
            Country::UK => Decimal::new(99, 2),
            Country::US => Decimal::new(15, 1),
            Country::Canada => Decimal::new(199, 2),
            Country::Saudi => Decimal::new(56, 1),
        }
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Country {
    type Err = Error;

    /// Case-insensitive; accepts the currency code too ("usd" -> US)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Country::ALL
            .into_iter()
            .find(|c| {
                c.as_str().eq_ignore_ascii_case(needle)
                    || c.currency().code().eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| {
                Error::validation(format!(
                    "unknown country '{}'. Available: India, UK, US, Canada, Saudi",
                    needle
                ))
            })
    }
}

/// ISO 4217 codes of the supported currencies
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    INR,
    GBP,
    USD,
    CAD,
    SAR,
}

impl Currency {
    pub const ALL: [Currency; 5] = [
        Currency::SAR,
        Currency::INR,
        Currency::GBP,
        Currency::USD,
        Currency::CAD,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Currency::INR => "INR",
            Currency::GBP => "GBP",
            Currency::USD => "USD",
            Currency::CAD => "CAD",
            Currency::SAR => "SAR",
        }
    }

    /// Format an amount with this currency's display symbol
    pub fn format_amount(&self, amount: Decimal) -> String {
        match self {
            Currency::INR => format!("₹{}", amount),
            Currency::USD => format!("${}", amount),
            Currency::SAR => format!("SAR {}", amount),
            Currency::GBP => format!("£{}", amount),
            Currency::CAD => format!("C${}", amount),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Multiplier converting one unit of `from` into `to`
///
/// Returns `None` when `from == to`; the table has no diagonal.
pub fn exchange_rate(from: Currency, to: Currency) -> Option<Decimal> {
    use Currency::*;

    let rate = match (from, to) {
        (SAR, INR) => Decimal::new(2243, 2),
        (SAR, GBP) => Decimal::new(67, 2),
        (SAR, USD) => Decimal::new(27, 2),
        (SAR, CAD) => Decimal::new(38, 2),

        (INR, SAR) => Decimal::new(44, 3),
        (INR, GBP) => Decimal::new(30, 3),
        (INR, USD) => Decimal::new(12, 3),
        (INR, CAD) => Decimal::new(17, 3),

        (GBP, SAR) => Decimal::new(149, 2),
        (GBP, INR) => Decimal::new(3333, 2),
        (GBP, USD) => Decimal::new(150, 2),
        (GBP, CAD) => Decimal::new(188, 2),

        (USD, SAR) => Decimal::new(375, 2),
        (USD, INR) => Decimal::new(8333, 2),
        (USD, GBP) => Decimal::new(67, 2),
        (USD, CAD) => Decimal::new(135, 2),

        (CAD, SAR) => Decimal::new(263, 2),
        (CAD, INR) => Decimal::new(5882, 2),
        (CAD, GBP) => Decimal::new(53, 2),
        (CAD, USD) => Decimal::new(74, 2),

        _ => return None,
    };
    Some(rate)
}
