#[allow(clippy::module_inception)]
pub mod engine;
pub mod service;


pub use engine::Engine;
pub use service::PendingLoan;
