//! Display of integer minor-unit amounts.

use std::fmt;

/// An amount in the minor units of `currency` (cents for USD, kuruş for TRY).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Money {
    minor: i64,
    currency: String,
}

impl Money {
    pub fn new(minor: i64, currency: &str) -> Self {
        Self {
            minor,
            currency: currency.trim().to_ascii_uppercase(),
        }
    }

    pub fn minor_units(&self) -> i64 {
        self.minor
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Number of minor-unit digits after the decimal point.
    pub fn exponent(&self) -> u32 {
        minor_unit_exponent(&self.currency)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let exponent = self.exponent();
        let sign = if self.minor < 0 { "-" } else { "" };
        let amount = self.minor.unsigned_abs();

        if exponent == 0 {
            return write!(f, "{}{} {}", sign, amount, self.currency);
        }

        let scale = 10u64.pow(exponent);
        write!(
            f,
            "{}{}.{:0width$} {}",
            sign,
            amount / scale,
            amount % scale,
            self.currency,
            width = exponent as usize
        )
    }
}

// ISO 4217 exceptions; everything else uses two digits.
fn minor_unit_exponent(currency: &str) -> u32 {
    match currency {
        "BIF" | "CLP" | "DJF" | "GNF" | "ISK" | "JPY" | "KMF" | "KRW" | "PYG" | "RWF" | "UGX"
        | "VND" | "VUV" | "XAF" | "XOF" | "XPF" => 0,
        "BHD" | "IQD" | "JOD" | "KWD" | "LYD" | "OMR" | "TND" => 3,
        _ => 2,
    }
}
