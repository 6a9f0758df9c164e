//! Member repository for JSON storage
//!
//! Manages loading and saving members to members.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::LedgerError;
use crate::models::{Member, MemberId};

use super::file_io::DataFile;

/// Serializable member data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct MemberData {
    members: Vec<Member>,
}

/// Repository for member persistence
pub struct MemberRepository {
    file: DataFile,
    data: RwLock<HashMap<MemberId, Member>>,
}

impl MemberRepository {
    /// Create a new member repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: DataFile::new(path),
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load members from disk
    pub fn load(&self) -> Result<(), LedgerError> {
        let file_data: MemberData = self.file.load()?;

        let mut data = self
            .data
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for member in file_data.members {
            data.insert(member.id.clone(), member);
        }

        Ok(())
    }

    /// Save members to disk
    pub fn save(&self) -> Result<(), LedgerError> {
        let members = self.get_all()?;
        self.file.store(&MemberData { members })
    }

    /// Get a member by ID
    pub fn get(&self, id: &MemberId) -> Result<Option<Member>, LedgerError> {
        let data = self
            .data
            .read()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(id).cloned())
    }

    /// Get several members, in the order of `ids`, skipping unknown ids
    pub fn get_many(&self, ids: &[MemberId]) -> Result<Vec<Member>, LedgerError> {
        let data = self
            .data
            .read()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(ids.iter().filter_map(|id| data.get(id).cloned()).collect())
    }

    /// Get all members sorted by name
    pub fn get_all(&self) -> Result<Vec<Member>, LedgerError> {
        let data = self
            .data
            .read()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut members: Vec<_> = data.values().cloned().collect();
        members.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(members)
    }

    /// Find members whose name or email matches (case-insensitive)
    pub fn find_by_name_or_email(&self, query: &str) -> Result<Vec<Member>, LedgerError> {
        let needle = Member::normalize(query);
        Ok(self
            .get_all()?
            .into_iter()
            .filter(|m| {
                Member::normalize(&m.name) == needle
                    || m.email.as_deref().map(Member::normalize).as_deref() == Some(needle.as_str())
            })
            .collect())
    }

    /// Insert or update a member
    pub fn upsert(&self, member: Member) -> Result<(), LedgerError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(member.id.clone(), member);
        Ok(())
    }

    /// Count members
    pub fn count(&self) -> Result<usize, LedgerError> {
        let data = self
            .data
            .read()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(data.len())
    }
}
