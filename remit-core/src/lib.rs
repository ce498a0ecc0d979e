//! Remit Core - Business logic for the Remit money transfer app
//!
//! This crate implements the core domain logic following hexagonal architecture:
//!
//! - **domain**: Core business entities (Account, Transaction, currency tables)
//! - **ports**: Trait definitions for external dependencies (AccountRepository)
//! - **services**: Business logic orchestration (auth, transfers, admin view)
//! - **adapters**: Concrete implementations (JSON file, in-memory)

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod services;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;

use adapters::json_file::JsonFileRepository;
use config::Config;
use ports::{AccountRepository, LoadedStore};
use services::*;

// Re-export commonly used types at crate root
pub use domain::{
    Account, AccountStore, AdminCredential, Country, Currency, Role, Session, Transaction,
};
pub use domain::result::{Error, OperationResult};
pub use ports::LoadStatus;
pub use services::{EntryPoint, LogEvent, LoggingService};

/// Main context for Remit operations
///
/// This is the primary entry point for all business logic. It holds the
/// configuration, the store repository, and all services. The account
/// store itself is loaded by the caller and passed to each operation.
pub struct RemitContext {
    pub config: Config,
    pub data_dir: PathBuf,
    pub repository: Arc<dyn AccountRepository>,
    pub auth_service: AuthService,
    pub transfer_service: TransferService,
    pub admin_service: AdminService,
}

impl RemitContext {
    /// Create a new context backed by the JSON store in `data_dir`
    pub fn new(data_dir: &Path) -> Result<Self> {
        let config = Config::load(data_dir)?;
        let repository: Arc<dyn AccountRepository> =
            Arc::new(JsonFileRepository::new(config.store_path(data_dir)));
        Ok(Self::with_repository(config, data_dir, repository))
    }

    /// Create a context over any repository
    pub fn with_repository(
        config: Config,
        data_dir: &Path,
        repository: Arc<dyn AccountRepository>,
    ) -> Self {
        let credentials = Arc::new(CredentialService::new(config.argon2));

        let auth_service = AuthService::new(
            Arc::clone(&repository),
            credentials,
            config.admin.clone(),
            config.starting_balance,
        );
        let transfer_service = TransferService::new(Arc::clone(&repository));
        let admin_service = AdminService::new();

        Self {
            config,
            data_dir: data_dir.to_path_buf(),
            repository,
            auth_service,
            transfer_service,
            admin_service,
        }
    }

    /// Load the whole account store
    pub fn load_store(&self) -> domain::result::Result<LoadedStore> {
        self.repository.load()
    }
}
