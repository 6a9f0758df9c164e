//! Payment repository for JSON storage
//!
//! Manages loading and saving settlement payments to payments.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::LedgerError;
use crate::models::{GroupId, Payment, PaymentId};

use super::file_io::DataFile;

/// Serializable payment data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct PaymentData {
    payments: Vec<Payment>,
}

/// Repository for payment persistence
pub struct PaymentRepository {
    file: DataFile,
    data: RwLock<HashMap<PaymentId, Payment>>,
}

impl PaymentRepository {
    /// Create a new payment repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: DataFile::new(path),
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load payments from disk
    pub fn load(&self) -> Result<(), LedgerError> {
        let file_data: PaymentData = self.file.load()?;

        let mut data = self
            .data
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for payment in file_data.payments {
            data.insert(payment.id.clone(), payment);
        }

        Ok(())
    }

    /// Save payments to disk
    pub fn save(&self) -> Result<(), LedgerError> {
        let payments = self.get_all()?;
        self.file.store(&PaymentData { payments })
    }

    /// Get a payment by ID
    pub fn get(&self, id: &PaymentId) -> Result<Option<Payment>, LedgerError> {
        let data = self
            .data
            .read()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(id).cloned())
    }

    /// Get all payments, oldest first
    pub fn get_all(&self) -> Result<Vec<Payment>, LedgerError> {
        let data = self
            .data
            .read()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut payments: Vec<_> = data.values().cloned().collect();
        payments.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(payments)
    }

    /// Get the payments of one group, oldest first
    pub fn get_by_group(&self, group_id: &GroupId) -> Result<Vec<Payment>, LedgerError> {
        Ok(self
            .get_all()?
            .into_iter()
            .filter(|p| &p.group_id == group_id)
            .collect())
    }

    /// Find payments whose id matches a full id or a short prefix
    pub fn find(&self, reference: &str) -> Result<Vec<Payment>, LedgerError> {
        Ok(self
            .get_all()?
            .into_iter()
            .filter(|p| p.id.as_str() == reference || p.id.matches(reference))
            .collect())
    }

    /// Insert or update a payment
    pub fn upsert(&self, payment: Payment) -> Result<(), LedgerError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(payment.id.clone(), payment);
        Ok(())
    }

    /// Delete a payment
    pub fn delete(&self, id: &PaymentId) -> Result<bool, LedgerError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(data.remove(id).is_some())
    }

    /// Delete every payment of a group, returning how many were removed
    pub fn delete_by_group(&self, group_id: &GroupId) -> Result<usize, LedgerError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let before = data.len();
        data.retain(|_, p| &p.group_id != group_id);
        Ok(before - data.len())
    }
}
