use crate::account::{Account, Movement};
use crate::error::SeedError;
use crate::ledger;
use crate::locale::{Currency, Locale};
use crate::store::AccountStore;
use crate::stream_movements;
use crate::transaction::{parse_timestamp, SeedMovement};

use rust_decimal::Decimal;
use std::path::Path;
use tracing::info;

struct DemoAccount {
    owner: &'static str,
    pin: u32,
    interest_rate: Decimal,
    currency: Currency,
    locale: Locale,
    movements: &'static [(i64, &'static str)],
}

const DEMO_ACCOUNTS: [DemoAccount; 2] = [
    DemoAccount {
        owner: "Jonas Schmedtmann",
        pin: 1111,
        interest_rate: Decimal::from_parts(12, 0, 0, false, 1),
        currency: Currency::Usd,
        locale: Locale::EnUs,
        movements: &[
            (200, "2019-11-18T21:31:17.178Z"),
            (450, "2019-12-23T07:42:02.178Z"),
            (-400, "2020-01-28T09:15:04.908Z"),
            (3000, "2020-04-01T10:17:24.185Z"),
            (-650, "2020-05-08T14:11:59.604Z"),
            (-130, "2022-03-18T17:01:17.194Z"),
            (70, "2022-03-20T15:36:17.929Z"),
            (1300, "2022-03-28T10:51:36.790Z"),
        ],
    },
    DemoAccount {
        owner: "Jessica Davis",
        pin: 2222,
        interest_rate: Decimal::from_parts(15, 0, 0, false, 1),
        currency: Currency::Eur,
        locale: Locale::PtPt,
        movements: &[
            (5000, "2019-11-18T21:31:17.178Z"),
            (3400, "2019-12-23T07:42:02.178Z"),
            (-150, "2020-01-28T09:15:04.908Z"),
            (-790, "2020-04-01T10:17:24.185Z"),
            (-3210, "2020-05-08T14:11:59.604Z"),
            (-1000, "2020-05-27T17:01:17.194Z"),
            (8500, "2020-07-11T23:36:17.929Z"),
            (-30, "2020-07-11T10:51:36.790Z"),
        ],
    },
];

/// The two fixed accounts the demo starts with.
pub fn demo_accounts() -> Result<AccountStore, SeedError> {
    let accounts = DEMO_ACCOUNTS
        .iter()
        .map(|demo| {
            let movements = demo
                .movements
                .iter()
                .map(|(amount, date)| {
                    Ok(Movement::new(Decimal::from(*amount), parse_timestamp(date)?))
                })
                .collect::<Result<Vec<_>, SeedError>>()?;

            Ok(
                Account::new(demo.owner, demo.pin, demo.interest_rate, demo.currency, demo.locale)
                    .with_movements(movements),
            )
        })
        .collect::<Result<Vec<_>, SeedError>>()?;

    AccountStore::new(accounts)
}

/// Build a store from a CSV fixture with one movement per row. Rows for the
/// same owner are collected in file order and must agree on every
/// account-level field.
pub fn load_accounts(path: impl AsRef<Path>) -> Result<AccountStore, SeedError> {
    let path = path.as_ref();
    if !path
        .extension()
        .is_some_and(|extension| extension.eq_ignore_ascii_case("csv"))
    {
        return Err(SeedError::NotCsv(path.to_path_buf()));
    }

    let mut accounts: Vec<Account> = Vec::new();

    for record in stream_movements(path)? {
        let seed = SeedMovement::try_from(record?)?;

        match accounts.iter().position(|account| account.owner == seed.owner) {
            Some(index) => {
                let account = &mut accounts[index];
                check_consistent(account, &seed)?;
                if !ledger::can_record(account, seed.movement.amount) {
                    return Err(SeedError::InvalidRecord {
                        message: format!("Balance of {} is out of range", seed.owner),
                    });
                }
                account.push_movement(seed.movement.amount, seed.movement.date);
            }
            None => accounts.push(
                Account::new(seed.owner, seed.pin, seed.interest_rate, seed.currency, seed.locale)
                    .with_movements([seed.movement]),
            ),
        }
    }

    info!(accounts = accounts.len(), "loaded seed accounts");
    AccountStore::new(accounts)
}

fn check_consistent(account: &Account, seed: &SeedMovement) -> Result<(), SeedError> {
    if account.pin != seed.pin
        || account.interest_rate != seed.interest_rate
        || account.currency != seed.currency
        || account.locale != seed.locale
    {
        return Err(SeedError::InvalidRecord {
            message: format!("Conflicting account fields for {}", seed.owner),
        });
    }
    Ok(())
}
