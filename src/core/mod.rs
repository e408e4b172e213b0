// src/core/mod.rs

pub mod export;
pub mod ledger;
pub mod session;
pub mod time;

pub use ledger::Ledger;
pub use session::Session;
pub use time::TimeToken;
