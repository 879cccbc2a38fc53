use crate::error::SeedError;

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;
use std::str::FromStr;

const NO_BREAK_SPACE: char = '\u{a0}';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Currency {
    Usd,
    Eur,
    Gbp,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Eur => "EUR",
            Self::Gbp => "GBP",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Usd => "$",
            Self::Eur => "€",
            Self::Gbp => "£",
        }
    }
}

impl FromStr for Currency {
    type Err = SeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USD" => Ok(Self::Usd),
            "EUR" => Ok(Self::Eur),
            "GBP" => Ok(Self::Gbp),
            _ => Err(SeedError::UnsupportedCurrency(s.to_string())),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locale {
    EnUs,
    EnGb,
    PtPt,
    DeDe,
}

/// Separators and symbol placement used when rendering money for a locale.
struct NumberStyle {
    group: char,
    decimal: char,
    /// Integer digits needed past the first group before separators appear.
    min_grouping: usize,
    symbol_after: bool,
}

impl Locale {
    pub fn tag(&self) -> &'static str {
        match self {
            Self::EnUs => "en-US",
            Self::EnGb => "en-GB",
            Self::PtPt => "pt-PT",
            Self::DeDe => "de-DE",
        }
    }

    fn number_style(&self) -> NumberStyle {
        match self {
            Self::EnUs | Self::EnGb => NumberStyle {
                group: ',',
                decimal: '.',
                min_grouping: 1,
                symbol_after: false,
            },
            Self::PtPt => NumberStyle {
                group: NO_BREAK_SPACE,
                decimal: ',',
                min_grouping: 2,
                symbol_after: true,
            },
            Self::DeDe => NumberStyle {
                group: '.',
                decimal: ',',
                min_grouping: 1,
                symbol_after: true,
            },
        }
    }

    /// Render `amount` as money, two decimals, midpoint rounded away from zero.
    /// e.g. `-1234.5` in USD/en-US → `"-$1,234.50"`
    pub fn format_currency(&self, amount: Decimal, currency: Currency) -> String {
        let style = self.number_style();
        let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let formatted = format!("{:.2}", rounded.abs());
        let (int_part, dec_part) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

        let grouped = group_digits(int_part, style.group, style.min_grouping);
        let sign = if rounded < Decimal::ZERO { "-" } else { "" };

        if style.symbol_after {
            format!(
                "{sign}{grouped}{}{dec_part}{NO_BREAK_SPACE}{}",
                style.decimal,
                currency.symbol()
            )
        } else {
            format!("{sign}{}{grouped}{}{dec_part}", currency.symbol(), style.decimal)
        }
    }

    /// Two-digit day and month with a numeric year, in the locale's order.
    pub fn format_date(&self, date: DateTime<Utc>) -> String {
        let pattern = match self {
            Self::EnUs => "%m/%d/%Y",
            Self::EnGb | Self::PtPt => "%d/%m/%Y",
            Self::DeDe => "%d.%m.%Y",
        };
        date.format(pattern).to_string()
    }

    pub fn format_datetime(&self, date: DateTime<Utc>) -> String {
        let pattern = match self {
            Self::EnUs => "%m/%-d/%Y, %-I:%M %p",
            Self::EnGb | Self::PtPt => "%-d/%m/%Y, %H:%M",
            Self::DeDe => "%-d.%m.%Y, %H:%M",
        };
        date.format(pattern).to_string()
    }
}

fn group_digits(digits: &str, separator: char, min_grouping: usize) -> String {
    if digits.len() < 3 + min_grouping {
        return digits.to_string();
    }

    digits
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(&separator.to_string())
}

impl FromStr for Locale {
    type Err = SeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "en-us" => Ok(Self::EnUs),
            "en-gb" => Ok(Self::EnGb),
            "pt-pt" => Ok(Self::PtPt),
            "de-de" => Ok(Self::DeDe),
            _ => Err(SeedError::UnsupportedLocale(s.to_string())),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
