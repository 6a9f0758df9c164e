//! Group model
//!
//! A group is a named set of members who share expenses. The order of
//! `members` is the order balances are reported and settled in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{GroupId, MemberId};

/// Maximum length of a group name, after trimming
pub const MAX_GROUP_NAME_LEN: usize = 50;

/// A group of members sharing expenses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Unique identifier
    pub id: GroupId,

    /// Group name
    pub name: String,

    /// Member ids in the order they joined
    #[serde(default)]
    pub members: Vec<MemberId>,

    /// Member who created the group
    pub created_by: Option<MemberId>,

    /// When the group was created
    pub created_at: DateTime<Utc>,

    /// When the group was last modified
    pub updated_at: DateTime<Utc>,
}

impl Group {
    /// Create a new group with its creator as the first member
    pub fn new(name: impl Into<String>, creator: MemberId) -> Self {
        let now = Utc::now();
        Self {
            id: GroupId::new(),
            name: name.into().trim().to_string(),
            members: vec![creator.clone()],
            created_by: Some(creator),
            created_at: now,
            updated_at: now,
        }
    }

    /// Check whether a member belongs to this group
    pub fn has_member(&self, member_id: &MemberId) -> bool {
        self.members.contains(member_id)
    }

    /// Append a member; returns false if they were already in the group
    pub fn add_member(&mut self, member_id: MemberId) -> bool {
        if self.has_member(&member_id) {
            return false;
        }
        self.members.push(member_id);
        self.updated_at = Utc::now();
        true
    }

    /// Remove a member; returns false if they were not in the group
    pub fn remove_member(&mut self, member_id: &MemberId) -> bool {
        let before = self.members.len();
        self.members.retain(|m| m != member_id);
        let removed = self.members.len() != before;
        if removed {
            self.updated_at = Utc::now();
        }
        removed
    }

    /// Rename the group (name is trimmed)
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into().trim().to_string();
        self.updated_at = Utc::now();
    }

    /// Validate the group
    pub fn validate(&self) -> Result<(), GroupValidationError> {
        validate_group_name(&self.name)?;

        if self.members.is_empty() {
            return Err(GroupValidationError::NoMembers);
        }

        Ok(())
    }
}

/// Validate a group name the same way for creation and renaming
pub fn validate_group_name(name: &str) -> Result<(), GroupValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(GroupValidationError::EmptyName);
    }
    let len = name.chars().count();
    if len > MAX_GROUP_NAME_LEN {
        return Err(GroupValidationError::NameTooLong(len));
    }
    Ok(())
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Validation errors for groups
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupValidationError {
    EmptyName,
    NameTooLong(usize),
    NoMembers,
}

impl fmt::Display for GroupValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Group name is required"),
            Self::NameTooLong(len) => write!(
                f,
                "Group name must be at most {} characters (got {})",
                MAX_GROUP_NAME_LEN, len
            ),
            Self::NoMembers => write!(f, "Group must have at least one member"),
        }
    }
}

impl std::error::Error for GroupValidationError {}
