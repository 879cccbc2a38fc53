//! Plain view-models handed to a display surface.

use crate::account::Account;
use crate::ledger::{self, Row};
use crate::session::TimerView;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WelcomeState {
    pub visible: bool,
    /// First name of the logged in owner; empty when logged out.
    pub name: String,
}

impl WelcomeState {
    pub fn logged_out() -> Self {
        Self {
            visible: false,
            name: String::new(),
        }
    }

    pub fn welcome(account: &Account) -> Self {
        Self {
            visible: true,
            name: account.first_name().to_string(),
        }
    }
}

impl fmt::Display for WelcomeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.visible {
            write!(f, "Welcome back {}", self.name)
        } else {
            f.write_str("Log in to get started")
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceView {
    pub formatted: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryView {
    pub income: String,
    pub outgo: String,
    pub interest: String,
}

/// Everything shown while a user is logged in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dashboard {
    pub welcome: WelcomeState,
    pub current_date: String,
    pub balance: BalanceView,
    pub summary: SummaryView,
    pub rows: Vec<Row>,
    pub timer: TimerView,
}

impl Dashboard {
    pub fn build(account: &Account, sorted: bool, now: DateTime<Utc>, timer: TimerView) -> Self {
        let format = |amount: Decimal| account.locale.format_currency(amount, account.currency);
        let summary = ledger::summary(account);

        Self {
            welcome: WelcomeState::welcome(account),
            current_date: account.locale.format_datetime(now),
            balance: BalanceView {
                formatted: format(ledger::balance(account)),
            },
            summary: SummaryView {
                income: format(summary.income),
                outgo: format(summary.outgo),
                interest: format(summary.interest),
            },
            rows: ledger::display_rows(account, sorted, now),
            timer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::Movement;
    use crate::locale::{Currency, Locale};
    use chrono::{Duration, TimeZone};
    use rust_decimal_macros::dec;

    #[test]
    fn test_welcome_messages() {
        let account = Account::new("Jessica Davis", 2222, dec!(1.5), Currency::Eur, Locale::PtPt);

        assert_eq!(WelcomeState::welcome(&account).to_string(), "Welcome back Jessica");
        assert_eq!(WelcomeState::logged_out().to_string(), "Log in to get started");
        assert!(!WelcomeState::logged_out().visible);
    }

    #[test]
    fn test_dashboard_build() {
        let now = Utc.with_ymd_and_hms(2022, 3, 28, 12, 0, 0).unwrap();
        let account = Account::new("Jessica Davis", 2222, dec!(1.5), Currency::Eur, Locale::PtPt)
            .with_movements(vec![
                Movement::new(dec!(5000), now - Duration::days(40)),
                Movement::new(dec!(-150), now),
            ]);

        let dashboard = Dashboard::build(&account, false, now, TimerView::from_seconds(10));

        assert_eq!(dashboard.welcome.name, "Jessica");
        assert_eq!(dashboard.balance.formatted, "4850,00\u{a0}€");
        assert_eq!(dashboard.summary.income, "5000,00\u{a0}€");
        assert_eq!(dashboard.summary.outgo, "-150,00\u{a0}€");
        assert_eq!(dashboard.summary.interest, "60,00\u{a0}€");
        assert_eq!(dashboard.rows.len(), 2);
        assert_eq!(dashboard.rows[0].date, "Today");
        assert_eq!(dashboard.current_date, "28/03/2022, 12:00");
        assert_eq!(dashboard.timer.to_string(), "00:10");
    }
}
