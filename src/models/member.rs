//! Member model
//!
//! A member is a person who can belong to groups, pay for expenses and
//! record settlement payments.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::MemberId;

/// A person taking part in shared expenses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Unique identifier
    pub id: MemberId,

    /// Display name
    pub name: String,

    /// Contact email (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// When the member was created
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Member {
    /// Create a new member with a generated id
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(MemberId::new(), name)
    }

    /// Create a member with a known id
    pub fn with_id(id: impl Into<MemberId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: None,
            created_at: Utc::now(),
        }
    }

    /// Normalize a name or email for case-insensitive lookup
    pub fn normalize(value: &str) -> String {
        value.trim().to_lowercase()
    }

    /// Validate the member
    pub fn validate(&self) -> Result<(), MemberValidationError> {
        if self.name.trim().is_empty() {
            return Err(MemberValidationError::EmptyName);
        }

        if self.name.len() > 100 {
            return Err(MemberValidationError::NameTooLong(self.name.len()));
        }

        if let Some(email) = &self.email {
            if !is_valid_email(email) {
                return Err(MemberValidationError::InvalidEmail(email.clone()));
            }
        }

        Ok(())
    }
}

/// Loose `local@domain.tld` check with no whitespace
fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        }
        None => false,
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Validation errors for members
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberValidationError {
    EmptyName,
    NameTooLong(usize),
    InvalidEmail(String),
}

impl fmt::Display for MemberValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Member name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Member name too long ({} chars, max 100)", len)
            }
            Self::InvalidEmail(email) => write!(f, "Invalid email address: {}", email),
        }
    }
}

impl std::error::Error for MemberValidationError {}
