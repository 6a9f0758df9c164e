//! splitledger - shared expenses for groups, from the terminal
//!
//! Members form groups, log shared expenses (split equally or by explicit
//! shares) and record payments they make to each other. The ledger engine
//! turns those records into a net balance per member and a short list of
//! transfers that would settle everyone up.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `engine`: Balance aggregation and settlement planning (pure, no I/O)
//! - `models`: Core data models (members, groups, expenses, payments, money)
//! - `services`: Business rules and validation on top of storage
//! - `storage`: JSON file storage layer
//! - `config`: Configuration and path management
//! - `display`: Terminal tables
//! - `export`: JSON, YAML and CSV balance reports
//! - `cli`: Command handlers for the `splitledger` binary
//! - `logging`: Tracing subscriber setup
//! - `error`: Custom error types
//!
//! # Example
//!
//! ```rust,ignore
//! use splitledger::config::{paths::LedgerPaths, settings::Settings};
//! use splitledger::services::LedgerService;
//! use splitledger::storage::Storage;
//!
//! let paths = LedgerPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let mut storage = Storage::new(paths)?;
//! storage.load_all()?;
//! let report = LedgerService::with_settings(&storage, &settings).report(&group_id)?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod engine;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{LedgerError, LedgerResult};
