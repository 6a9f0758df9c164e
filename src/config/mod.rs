//! Configuration module for splitledger
//!
//! This module provides configuration management including:
//! - platform path resolution
//! - user settings persistence

pub mod paths;
pub mod settings;

pub use paths::LedgerPaths;
pub use settings::Settings;
