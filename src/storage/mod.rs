//! Storage layer for splitledger
//!
//! Provides JSON file storage with atomic writes and automatic directory
//! creation. Each entity kind lives in its own file under `<base>/data/`.

pub mod expenses;
pub mod file_io;
pub mod groups;
pub mod members;
pub mod payments;

pub use expenses::ExpenseRepository;
pub use file_io::DataFile;
pub use groups::GroupRepository;
pub use members::MemberRepository;
pub use payments::PaymentRepository;

use tracing::debug;

use crate::config::paths::LedgerPaths;
use crate::error::LedgerError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: LedgerPaths,
    pub members: MemberRepository,
    pub groups: GroupRepository,
    pub expenses: ExpenseRepository,
    pub payments: PaymentRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: LedgerPaths) -> Result<Self, LedgerError> {
        paths.ensure_directories()?;

        Ok(Self {
            members: MemberRepository::new(paths.members_file()),
            groups: GroupRepository::new(paths.groups_file()),
            expenses: ExpenseRepository::new(paths.expenses_file()),
            payments: PaymentRepository::new(paths.payments_file()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &LedgerPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), LedgerError> {
        self.members.load()?;
        self.groups.load()?;
        self.expenses.load()?;
        self.payments.load()?;
        debug!(base = %self.paths.base_dir().display(), "ledger loaded");
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), LedgerError> {
        self.members.save()?;
        self.groups.save()?;
        self.expenses.save()?;
        self.payments.save()?;
        Ok(())
    }

    /// Check if storage has been initialized (settings file written)
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }
}
