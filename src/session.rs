use crate::account::Account;
use crate::error::BankError;
use crate::store::AccountStore;

use std::fmt;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    LoggedOut,
    Active {
        username: String,
        remaining_seconds: u32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Running(TimerView),
    /// The countdown hit zero on this tick and the session ended.
    Expired,
    /// Already logged out; nothing changed.
    Inactive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerView {
    pub minutes: u32,
    pub seconds: u32,
}

impl TimerView {
    pub fn from_seconds(remaining: u32) -> Self {
        Self {
            minutes: remaining / 60,
            seconds: remaining % 60,
        }
    }
}

impl fmt::Display for TimerView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.minutes, self.seconds)
    }
}

/// The single logged-in user, if any, plus the countdown that ends the session.
///
/// The session stores a username only; the account itself is looked up in the
/// [`AccountStore`] on every access so a closed account can never be reached
/// through a stale session.
#[derive(Debug)]
pub struct Session {
    state: SessionState,
    sorted: bool,
    timeout_secs: u32,
}

impl Session {
    pub fn new(timeout_secs: u32) -> Self {
        Self {
            state: SessionState::LoggedOut,
            sorted: false,
            timeout_secs,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, SessionState::Active { .. })
    }

    pub fn username(&self) -> Option<&str> {
        match &self.state {
            SessionState::Active { username, .. } => Some(username),
            SessionState::LoggedOut => None,
        }
    }

    pub fn remaining_seconds(&self) -> Option<u32> {
        match &self.state {
            SessionState::Active {
                remaining_seconds, ..
            } => Some(*remaining_seconds),
            SessionState::LoggedOut => None,
        }
    }

    pub fn timer(&self) -> Option<TimerView> {
        self.remaining_seconds().map(TimerView::from_seconds)
    }

    pub fn sorted(&self) -> bool {
        self.sorted
    }

    pub fn toggle_sort(&mut self) -> bool {
        self.sorted = !self.sorted;
        self.sorted
    }

    /// Replaces any existing session on success. A failed attempt leaves the
    /// current state untouched.
    pub fn login(
        &mut self,
        store: &AccountStore,
        username: &str,
        pin: u32,
    ) -> Result<(), BankError> {
        let account = store
            .find_by_username(username)
            .filter(|account| account.pin == pin)
            .ok_or(BankError::InvalidCredentials)?;

        self.state = SessionState::Active {
            username: account.username.clone(),
            remaining_seconds: self.timeout_secs,
        };

        info!(username = %account.username, "logged in");
        Ok(())
    }

    pub fn current<'a>(&self, store: &'a AccountStore) -> Result<&'a Account, BankError> {
        let username = self.username().ok_or(BankError::NotLoggedIn)?;
        store.get(username)
    }

    pub fn reset_timer(&mut self) -> Result<(), BankError> {
        match &mut self.state {
            SessionState::Active {
                remaining_seconds, ..
            } => {
                *remaining_seconds = self.timeout_secs;
                Ok(())
            }
            SessionState::LoggedOut => Err(BankError::NotLoggedIn),
        }
    }

    pub fn tick(&mut self) -> TickOutcome {
        let SessionState::Active {
            username,
            remaining_seconds,
        } = &mut self.state
        else {
            return TickOutcome::Inactive;
        };

        *remaining_seconds = remaining_seconds.saturating_sub(1);
        debug!(remaining = *remaining_seconds, "session tick");

        if *remaining_seconds == 0 {
            info!(username = %username, "session expired");
            self.state = SessionState::LoggedOut;
            return TickOutcome::Expired;
        }

        TickOutcome::Running(TimerView::from_seconds(*remaining_seconds))
    }

    pub fn logout(&mut self) {
        if let SessionState::Active { username, .. } = &self.state {
            info!(username = %username, "logged out");
        }
        self.state = SessionState::LoggedOut;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::{Currency, Locale};
    use rust_decimal_macros::dec;

    fn store() -> AccountStore {
        AccountStore::new(vec![
            Account::new("Jonas Schmedtmann", 1111, dec!(1.2), Currency::Usd, Locale::EnUs),
            Account::new("Jessica Davis", 2222, dec!(1.5), Currency::Eur, Locale::PtPt),
        ])
        .unwrap()
    }

    #[test]
    fn test_login_success() {
        let store = store();
        let mut session = Session::new(10);

        session.login(&store, "js", 1111).unwrap();

        assert_eq!(session.username(), Some("js"));
        assert_eq!(session.remaining_seconds(), Some(10));
        assert_eq!(session.current(&store).unwrap().owner, "Jonas Schmedtmann");
    }

    #[test]
    fn test_login_wrong_pin() {
        let store = store();
        let mut session = Session::new(10);

        let result = session.login(&store, "js", 2222);

        assert_eq!(result, Err(BankError::InvalidCredentials));
        assert_eq!(session.state(), &SessionState::LoggedOut);
    }

    #[test]
    fn test_login_unknown_user() {
        let store = store();
        let mut session = Session::new(10);

        assert_eq!(
            session.login(&store, "zz", 1111),
            Err(BankError::InvalidCredentials)
        );
        assert!(!session.is_active());
    }

    #[test]
    fn test_failed_login_keeps_existing_session() {
        let store = store();
        let mut session = Session::new(10);
        session.login(&store, "js", 1111).unwrap();

        assert!(session.login(&store, "jd", 1111).is_err());
        assert_eq!(session.username(), Some("js"));
    }

    #[test]
    fn test_login_replaces_previous_session() {
        let store = store();
        let mut session = Session::new(10);
        session.login(&store, "js", 1111).unwrap();
        session.tick();

        session.login(&store, "jd", 2222).unwrap();

        assert_eq!(session.username(), Some("jd"));
        assert_eq!(session.remaining_seconds(), Some(10));
    }

    #[test]
    fn test_tick_counts_down() {
        let store = store();
        let mut session = Session::new(10);
        session.login(&store, "js", 1111).unwrap();

        let outcome = session.tick();

        assert_eq!(
            outcome,
            TickOutcome::Running(TimerView {
                minutes: 0,
                seconds: 9
            })
        );
    }

    #[test]
    fn test_countdown_expires_exactly_once() {
        let store = store();
        let mut session = Session::new(3);
        session.login(&store, "js", 1111).unwrap();

        let outcomes: Vec<_> = (0..5).map(|_| session.tick()).collect();

        assert!(matches!(outcomes[0], TickOutcome::Running(_)));
        assert!(matches!(outcomes[1], TickOutcome::Running(_)));
        assert_eq!(outcomes[2], TickOutcome::Expired);
        assert_eq!(outcomes[3], TickOutcome::Inactive);
        assert_eq!(outcomes[4], TickOutcome::Inactive);
        assert_eq!(session.state(), &SessionState::LoggedOut);
        assert_eq!(session.remaining_seconds(), None);
    }

    #[test]
    fn test_reset_timer() {
        let store = store();
        let mut session = Session::new(10);
        session.login(&store, "js", 1111).unwrap();
        session.tick();
        session.tick();

        session.reset_timer().unwrap();

        assert_eq!(session.remaining_seconds(), Some(10));
    }

    #[test]
    fn test_reset_timer_when_logged_out() {
        let mut session = Session::new(10);
        assert_eq!(session.reset_timer(), Err(BankError::NotLoggedIn));
    }

    #[test]
    fn test_logout() {
        let store = store();
        let mut session = Session::new(10);
        session.login(&store, "js", 1111).unwrap();

        session.logout();

        assert!(!session.is_active());
        assert_eq!(session.current(&store).unwrap_err(), BankError::NotLoggedIn);
        assert_eq!(session.tick(), TickOutcome::Inactive);
    }

    #[test]
    fn test_current_after_account_removed() {
        let mut store = store();
        let mut session = Session::new(10);
        session.login(&store, "jd", 2222).unwrap();

        store.remove_by_username("jd").unwrap();

        assert_eq!(
            session.current(&store).unwrap_err(),
            BankError::AccountNotFound("jd".to_string())
        );
    }

    #[test]
    fn test_sort_toggle_survives_relogin() {
        let store = store();
        let mut session = Session::new(10);
        session.login(&store, "js", 1111).unwrap();

        assert!(session.toggle_sort());
        session.logout();
        session.login(&store, "js", 1111).unwrap();

        assert!(session.sorted());
        assert!(!session.toggle_sort());
    }

    #[test]
    fn test_timer_view_format() {
        assert_eq!(TimerView::from_seconds(9).to_string(), "00:09");
        assert_eq!(TimerView::from_seconds(125).to_string(), "02:05");
        assert_eq!(TimerView::from_seconds(0).to_string(), "00:00");
    }
}
