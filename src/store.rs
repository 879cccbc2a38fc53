use crate::account::{derive_username, Account};
use crate::error::{BankError, SeedError};
use crate::ledger;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::collections::HashSet;

/// Ordered set of accounts, unique by derived username.
#[derive(Debug, Default)]
pub struct AccountStore {
    accounts: Vec<Account>,
}

impl AccountStore {
    pub fn new(accounts: Vec<Account>) -> Result<Self, SeedError> {
        let mut store = Self { accounts };
        store.derive_usernames();

        if let Some(duplicate) = first_duplicate(&store.accounts) {
            return Err(SeedError::DuplicateUsername(duplicate));
        }

        Ok(store)
    }

    pub fn derive_usernames(&mut self) {
        for account in &mut self.accounts {
            account.username = derive_username(&account.owner);
        }
    }

    pub fn find_by_username(&self, username: &str) -> Option<&Account> {
        self.accounts
            .iter()
            .find(|account| account.username == username)
    }

    pub fn get(&self, username: &str) -> Result<&Account, BankError> {
        self.find_by_username(username)
            .ok_or_else(|| BankError::AccountNotFound(username.to_string()))
    }

    pub fn remove_by_username(&mut self, username: &str) -> Result<Account, BankError> {
        let index = self
            .accounts
            .iter()
            .position(|account| account.username == username)
            .ok_or_else(|| BankError::AccountNotFound(username.to_string()))?;

        Ok(self.accounts.remove(index))
    }

    pub fn append_movement(
        &mut self,
        username: &str,
        amount: Decimal,
        date: DateTime<Utc>,
    ) -> Result<(), BankError> {
        let account = self
            .accounts
            .iter_mut()
            .find(|account| account.username == username)
            .ok_or_else(|| BankError::AccountNotFound(username.to_string()))?;

        if !ledger::can_record(account, amount) {
            return Err(BankError::InvalidAmount(amount.to_string()));
        }

        account.push_movement(amount, date);
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Account> {
        self.accounts.iter()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

fn first_duplicate(accounts: &[Account]) -> Option<String> {
    let mut seen = HashSet::new();
    accounts
        .iter()
        .find(|account| !seen.insert(account.username.as_str()))
        .map(|account| account.username.clone())
}
