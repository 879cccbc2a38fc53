use crate::account::Movement;
use crate::error::{BankError, SeedError};
use crate::locale::{Currency, Locale};

use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementKind {
    Deposit,
    Withdrawal,
}

impl MovementKind {
    pub fn of(amount: Decimal) -> Self {
        if amount > Decimal::ZERO {
            Self::Deposit
        } else {
            Self::Withdrawal
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Deposit => "deposit",
            Self::Withdrawal => "withdrawal",
        }
    }
}

impl fmt::Display for MovementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse an amount typed by the user. Blank or non-numeric text is rejected
/// rather than coerced; the sign is validated by the caller.
pub fn parse_amount(text: &str) -> Result<Decimal, BankError> {
    parse_number(text).ok_or_else(|| BankError::InvalidAmount(text.to_string()))
}

/// Pins are read as numbers, so `"1111.0"` and `"1.111e3"` both mean 1111.
/// Fractional or negative values never match a pin.
pub fn parse_pin(text: &str) -> Option<u32> {
    let pin = parse_number(text)?;
    if pin.is_sign_negative() || !pin.fract().is_zero() {
        return None;
    }
    pin.to_u32()
}

fn parse_number(text: &str) -> Option<Decimal> {
    let trimmed = text.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, SeedError> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|date| date.with_timezone(&Utc))
        .map_err(|source| SeedError::InvalidDate {
            value: value.to_string(),
            source,
        })
}

/// One row of a seed fixture: a single movement plus the owning account's fields.
#[derive(Debug, Deserialize)]
pub struct CsvMovement {
    pub owner: String,
    pub pin: u32,
    pub interest_rate: Decimal,
    pub currency: String,
    pub locale: String,
    pub amount: Decimal,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeedMovement {
    pub owner: String,
    pub pin: u32,
    pub interest_rate: Decimal,
    pub currency: Currency,
    pub locale: Locale,
    pub movement: Movement,
}

impl TryFrom<CsvMovement> for SeedMovement {
    type Error = SeedError;

    fn try_from(csv: CsvMovement) -> Result<Self, Self::Error> {
        if csv.owner.trim().is_empty() {
            return Err(SeedError::InvalidRecord {
                message: format!("Missing owner for movement dated {}", csv.date),
            });
        }

        Ok(SeedMovement {
            currency: csv.currency.parse()?,
            locale: csv.locale.parse()?,
            movement: Movement::new(csv.amount, parse_timestamp(&csv.date)?),
            owner: csv.owner,
            pin: csv.pin,
            interest_rate: csv.interest_rate,
        })
    }
}
