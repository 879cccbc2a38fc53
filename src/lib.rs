pub mod account;
pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod ledger;
pub mod locale;
pub mod runtime;
pub mod seed;
pub mod session;
pub mod store;
pub mod transaction;
pub mod view;

use crate::error::SeedError;
use crate::transaction::CsvMovement;
use csv::ReaderBuilder;
use std::fs::File;
use std::path::Path;

pub fn stream_movements(
    path: impl AsRef<Path>,
) -> Result<impl Iterator<Item = Result<CsvMovement, csv::Error>>, SeedError> {
    let file = File::open(path)?;
    let rdr = ReaderBuilder::new().trim(csv::Trim::All).from_reader(file);

    Ok(rdr.into_deserialize::<CsvMovement>())
}
