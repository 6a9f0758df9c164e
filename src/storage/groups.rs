//! Group repository for JSON storage
//!
//! Manages loading and saving groups to groups.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::LedgerError;
use crate::models::{Group, GroupId, MemberId};

use super::file_io::DataFile;

/// Serializable group data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct GroupData {
    groups: Vec<Group>,
}

/// Repository for group persistence
pub struct GroupRepository {
    file: DataFile,
    data: RwLock<HashMap<GroupId, Group>>,
}

impl GroupRepository {
    /// Create a new group repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: DataFile::new(path),
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load groups from disk
    pub fn load(&self) -> Result<(), LedgerError> {
        let file_data: GroupData = self.file.load()?;

        let mut data = self
            .data
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for group in file_data.groups {
            data.insert(group.id.clone(), group);
        }

        Ok(())
    }

    /// Save groups to disk
    pub fn save(&self) -> Result<(), LedgerError> {
        let groups = self.get_all()?;
        self.file.store(&GroupData { groups })
    }

    /// Get a group by ID
    pub fn get(&self, id: &GroupId) -> Result<Option<Group>, LedgerError> {
        let data = self
            .data
            .read()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(id).cloned())
    }

    /// Get all groups, newest first
    pub fn get_all(&self) -> Result<Vec<Group>, LedgerError> {
        let data = self
            .data
            .read()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut groups: Vec<_> = data.values().cloned().collect();
        groups.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(groups)
    }

    /// Groups that a member belongs to, newest first
    pub fn get_for_member(&self, member_id: &MemberId) -> Result<Vec<Group>, LedgerError> {
        Ok(self
            .get_all()?
            .into_iter()
            .filter(|g| g.has_member(member_id))
            .collect())
    }

    /// Get a group by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Result<Option<Group>, LedgerError> {
        let needle = name.trim().to_lowercase();
        let data = self
            .data
            .read()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data
            .values()
            .find(|g| g.name.to_lowercase() == needle)
            .cloned())
    }

    /// Check if a group name is taken, optionally ignoring one group
    pub fn name_exists(&self, name: &str, exclude: Option<&GroupId>) -> Result<bool, LedgerError> {
        Ok(self
            .get_by_name(name)?
            .is_some_and(|g| Some(&g.id) != exclude))
    }

    /// Insert or update a group
    pub fn upsert(&self, group: Group) -> Result<(), LedgerError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(group.id.clone(), group);
        Ok(())
    }

    /// Delete a group
    pub fn delete(&self, id: &GroupId) -> Result<bool, LedgerError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(data.remove(id).is_some())
    }
}
