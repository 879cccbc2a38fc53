use crate::clock::Clock;
use crate::config::Settings;
use crate::engine::service::{self, PendingLoan};
use crate::error::BankError;
use crate::session::{Session, TickOutcome};
use crate::store::AccountStore;
use crate::transaction::{parse_amount, parse_pin};
use crate::view::{Dashboard, WelcomeState};

use std::sync::Arc;

/// Owns every piece of mutable state and turns inbound UI events into
/// view-models. All mutation goes through `&mut self`, so a single owner
/// serializes it.
pub struct Engine {
    store: AccountStore,
    session: Session,
    clock: Arc<dyn Clock>,
    settings: Settings,
}

impl Engine {
    pub fn new(store: AccountStore, clock: Arc<dyn Clock>, settings: Settings) -> Self {
        Self {
            session: Session::new(settings.session_timeout_secs),
            store,
            clock,
            settings,
        }
    }

    pub fn store(&self) -> &AccountStore {
        &self.store
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn login(&mut self, username: &str, pin: &str) -> Result<Dashboard, BankError> {
        let pin = parse_pin(pin).ok_or(BankError::InvalidCredentials)?;
        self.session.login(&self.store, username, pin)?;
        self.dashboard()
    }

    pub fn transfer(&mut self, to: &str, amount: &str) -> Result<Dashboard, BankError> {
        self.session.current(&self.store)?;
        let amount = parse_amount(amount)?;
        service::transfer(
            &mut self.store,
            &mut self.session,
            self.clock.as_ref(),
            to,
            amount,
        )?;
        self.dashboard()
    }

    pub fn request_loan(&mut self, amount: &str) -> Result<PendingLoan, BankError> {
        self.session.current(&self.store)?;
        let amount = parse_amount(amount)?;
        service::request_loan(&self.store, &self.session, amount)
    }

    /// Returns a fresh dashboard only when the loan landed on the account
    /// that is currently logged in.
    pub fn complete_loan(&mut self, loan: &PendingLoan) -> Result<Option<Dashboard>, BankError> {
        let active = service::complete_loan(
            &mut self.store,
            &mut self.session,
            self.clock.as_ref(),
            loan,
        )?;

        if active {
            self.dashboard().map(Some)
        } else {
            Ok(None)
        }
    }

    pub fn close_account(&mut self, username: &str, pin: &str) -> Result<WelcomeState, BankError> {
        let Some(pin) = parse_pin(pin) else {
            self.session.current(&self.store)?;
            return Err(BankError::CredentialMismatch);
        };

        service::close_account(&mut self.store, &mut self.session, username, pin)?;
        Ok(WelcomeState::logged_out())
    }

    pub fn toggle_sort(&mut self) -> Result<Dashboard, BankError> {
        if !self.session.is_active() {
            return Err(BankError::NotLoggedIn);
        }
        self.session.toggle_sort();
        self.dashboard()
    }

    pub fn tick(&mut self) -> TickOutcome {
        self.session.tick()
    }

    pub fn dashboard(&self) -> Result<Dashboard, BankError> {
        let account = self.session.current(&self.store)?;
        let timer = self.session.timer().ok_or(BankError::NotLoggedIn)?;

        Ok(Dashboard::build(
            account,
            self.session.sorted(),
            self.clock.now(),
            timer,
        ))
    }
}
