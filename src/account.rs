use crate::locale::{Currency, Locale};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// A single signed ledger entry: positive for deposits, negative for withdrawals.
#[derive(Debug, Clone, PartialEq)]
pub struct Movement {
    pub amount: Decimal,
    pub date: DateTime<Utc>,
}

impl Movement {
    pub fn new(amount: Decimal, date: DateTime<Utc>) -> Self {
        Self { amount, date }
    }

    pub fn is_deposit(&self) -> bool {
        self.amount > Decimal::ZERO
    }
}

#[derive(Debug, Clone)]
pub struct Account {
    pub owner: String,
    pub username: String,
    pub pin: u32,
    pub interest_rate: Decimal,
    pub currency: Currency,
    pub locale: Locale,
    movements: Vec<Movement>,
}

impl Account {
    /// The username stays empty until the owning store derives it.
    pub fn new(
        owner: impl Into<String>,
        pin: u32,
        interest_rate: Decimal,
        currency: Currency,
        locale: Locale,
    ) -> Self {
        Self {
            owner: owner.into(),
            username: String::new(),
            pin,
            interest_rate,
            currency,
            locale,
            movements: Vec::new(),
        }
    }

    pub fn with_movements(mut self, movements: impl IntoIterator<Item = Movement>) -> Self {
        self.movements.extend(movements);
        self
    }

    /// Movements in chronological order.
    pub fn movements(&self) -> &[Movement] {
        &self.movements
    }

    pub fn amounts(&self) -> impl Iterator<Item = Decimal> + '_ {
        self.movements.iter().map(|movement| movement.amount)
    }

    pub fn movement_dates(&self) -> impl Iterator<Item = DateTime<Utc>> + '_ {
        self.movements.iter().map(|movement| movement.date)
    }

    pub fn push_movement(&mut self, amount: Decimal, date: DateTime<Utc>) {
        self.movements.push(Movement::new(amount, date));
    }

    /// First space-separated token of the owner's name.
    pub fn first_name(&self) -> &str {
        self.owner.split(' ').next().unwrap_or_default()
    }
}

/// Lowercase initial of every space-separated token of `owner`.
/// e.g. `"Jonas Schmedtmann"` → `"js"`
pub fn derive_username(owner: &str) -> String {
    owner
        .to_lowercase()
        .split(' ')
        .filter_map(|token| token.chars().next())
        .collect()
}
