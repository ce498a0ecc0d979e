//! Service layer - business logic orchestration
//!
//! Services coordinate domain logic and port interactions. Each service
//! focuses on a specific use case or feature area. The account store is
//! always passed in explicitly; services never hold it.

pub mod admin;
mod auth;
pub mod credential;
pub mod logging;
pub mod transfer;

pub use admin::{AccountSummary, AdminDashboard, AdminService, TransactionEntry};
pub use auth::{AuthService, LoginResult};
pub use credential::{CredentialService, Verification};
pub use logging::{EntryPoint, LogEntry, LogEvent, LoggingService};
pub use transfer::{TransferQuote, TransferReceipt, TransferService};
