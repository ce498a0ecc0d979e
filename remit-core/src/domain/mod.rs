//! Core domain entities
//!
//! All business entities are defined here. These are pure data structures
//! with validation logic - no I/O or external dependencies.

mod account;
pub mod country;
mod credential;
pub mod result;
mod session;
pub mod store;
mod transaction;

pub use account::Account;
pub use country::{exchange_rate, Country, Currency};
pub use credential::{AdminCredential, Argon2Params};
pub use session::{Role, Session};
pub use store::{AccountStore, LOG_CONTAINER_KEY};
pub use transaction::Transaction;
