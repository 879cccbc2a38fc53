use rust_decimal::Decimal;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BankError {
    #[error("Invalid username or pin")]
    InvalidCredentials,

    #[error("Invalid amount: {0:?}")]
    InvalidAmount(String),

    #[error("Unknown recipient: {0}")]
    UnknownRecipient(String),

    #[error("Insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds {
        requested: Decimal,
        available: Decimal,
    },

    #[error("Cannot transfer to your own account")]
    SelfTransfer,

    #[error("Loan of {0} denied")]
    LoanDenied(Decimal),

    #[error("Username or pin does not match the logged in account")]
    CredentialMismatch,

    #[error("Account not found: {0}")]
    AccountNotFound(String),

    #[error("No active session")]
    NotLoggedIn,
}

#[derive(Debug, Error)]
pub enum SeedError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("Seed file {} is not a CSV file", .0.display())]
    NotCsv(PathBuf),

    #[error("Invalid seed record: {message}")]
    InvalidRecord { message: String },

    #[error("Unsupported currency: {0}")]
    UnsupportedCurrency(String),

    #[error("Unsupported locale: {0}")]
    UnsupportedLocale(String),

    #[error("Duplicate username: {0}")]
    DuplicateUsername(String),

    #[error("Invalid date {value:?}: {source}")]
    InvalidDate {
        value: String,
        source: chrono::ParseError,
    },
}
