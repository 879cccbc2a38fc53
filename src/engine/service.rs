use crate::clock::{iso_timestamp, Clock};
use crate::error::BankError;
use crate::ledger;
use crate::session::Session;
use crate::store::AccountStore;

use rust_decimal::Decimal;
use tracing::{info, warn};

/// A loan needs at least one movement worth this share of the requested amount.
pub const LOAN_RATIO: Decimal = Decimal::from_parts(1, 0, 0, false, 1);

/// An approved loan waiting out its processing delay.
///
/// Keyed by username so it can still land after the session that requested
/// it has ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingLoan {
    pub username: String,
    pub amount: Decimal,
}

pub fn transfer(
    store: &mut AccountStore,
    session: &mut Session,
    clock: &dyn Clock,
    to: &str,
    amount: Decimal,
) -> Result<(), BankError> {
    let sender = session.current(store)?;

    if amount <= Decimal::ZERO {
        return Err(BankError::InvalidAmount(amount.to_string()));
    }

    let recipient = store
        .find_by_username(to)
        .ok_or_else(|| BankError::UnknownRecipient(to.to_string()))?;

    let available = ledger::balance(sender);
    if amount > available {
        return Err(BankError::InsufficientFunds {
            requested: amount,
            available,
        });
    }

    if recipient.username == sender.username {
        return Err(BankError::SelfTransfer);
    }

    // Both sides must fit before either is written.
    if !ledger::can_record(sender, -amount) || !ledger::can_record(recipient, amount) {
        return Err(BankError::InvalidAmount(amount.to_string()));
    }

    let from = sender.username.clone();
    let to = recipient.username.clone();

    let debited_at = clock.now();
    store.append_movement(&from, -amount, debited_at)?;
    store.append_movement(&to, amount, clock.now())?;
    session.reset_timer()?;

    info!(%from, %to, %amount, at = %iso_timestamp(debited_at), "transfer completed");
    Ok(())
}

/// Approve or deny a loan. Approval only schedules the deposit; it lands
/// through [`complete_loan`].
pub fn request_loan(
    store: &AccountStore,
    session: &Session,
    amount: Decimal,
) -> Result<PendingLoan, BankError> {
    let account = session.current(store)?;

    if amount <= Decimal::ZERO {
        return Err(BankError::InvalidAmount(amount.to_string()));
    }

    if !ledger::can_record(account, amount) {
        return Err(BankError::InvalidAmount(amount.to_string()));
    }

    let threshold = amount * LOAN_RATIO;
    if !account.amounts().any(|movement| movement >= threshold) {
        warn!(username = %account.username, %amount, "loan denied");
        return Err(BankError::LoanDenied(amount));
    }

    info!(username = %account.username, %amount, "loan approved");
    Ok(PendingLoan {
        username: account.username.clone(),
        amount,
    })
}

/// Record a matured loan against its account, whether or not the requesting
/// session is still live. Returns whether that account is the active session,
/// in which case the session timer is reset.
pub fn complete_loan(
    store: &mut AccountStore,
    session: &mut Session,
    clock: &dyn Clock,
    loan: &PendingLoan,
) -> Result<bool, BankError> {
    let now = clock.now();
    store.append_movement(&loan.username, loan.amount, now)?;

    info!(
        username = %loan.username,
        amount = %loan.amount,
        at = %iso_timestamp(now),
        "loan deposited"
    );

    if session.username() != Some(loan.username.as_str()) {
        return Ok(false);
    }

    session.reset_timer()?;
    Ok(true)
}

/// Close the logged in account. Both credentials must match that account.
pub fn close_account(
    store: &mut AccountStore,
    session: &mut Session,
    username: &str,
    pin: u32,
) -> Result<(), BankError> {
    let account = session.current(store)?;

    if account.username != username || account.pin != pin {
        return Err(BankError::CredentialMismatch);
    }

    let closed = store.remove_by_username(username)?;
    session.logout();

    info!(username = %closed.username, "account closed");
    Ok(())
}
