//! Member service
//!
//! Creates members and resolves the loose references users type on the
//! command line (id, short id, name or email) to a single member.

use tracing::info;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Member, MemberId};
use crate::storage::Storage;

/// Service for member management
pub struct MemberService<'a> {
    storage: &'a Storage,
}

impl<'a> MemberService<'a> {
    /// Create a new member service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new member
    pub fn create(&self, name: &str, email: Option<&str>) -> LedgerResult<Member> {
        let name = name.trim();
        let email = email.map(str::trim).filter(|e| !e.is_empty());

        let mut member = Member::new(name);
        member.email = email.map(str::to_string);
        member
            .validate()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

        // Names double as references, so they must be unambiguous
        if !self.storage.members.find_by_name_or_email(name)?.is_empty() {
            return Err(LedgerError::Duplicate {
                entity_type: "Member",
                identifier: name.to_string(),
            });
        }
        if let Some(email) = email {
            if !self.storage.members.find_by_name_or_email(email)?.is_empty() {
                return Err(LedgerError::Duplicate {
                    entity_type: "Member",
                    identifier: email.to_string(),
                });
            }
        }

        self.storage.members.upsert(member.clone())?;
        self.storage.members.save()?;

        info!(member = %member.id, name = %member.name, "member created");
        Ok(member)
    }

    /// Get a member by ID
    pub fn get(&self, id: &MemberId) -> LedgerResult<Option<Member>> {
        self.storage.members.get(id)
    }

    /// Get all members sorted by name
    pub fn list(&self) -> LedgerResult<Vec<Member>> {
        self.storage.members.get_all()
    }

    /// Find a member by id, short id, name or email
    pub fn find(&self, reference: &str) -> LedgerResult<Option<Member>> {
        let reference = reference.trim();

        if let Some(member) = self.storage.members.get(&MemberId::from(reference))? {
            return Ok(Some(member));
        }

        let mut by_name = self.storage.members.find_by_name_or_email(reference)?;
        if by_name.len() > 1 {
            return Err(LedgerError::Validation(format!(
                "'{}' matches {} members; use an id instead",
                reference,
                by_name.len()
            )));
        }
        if let Some(member) = by_name.pop() {
            return Ok(Some(member));
        }

        let mut by_prefix: Vec<Member> = self
            .storage
            .members
            .get_all()?
            .into_iter()
            .filter(|m| m.id.matches(reference))
            .collect();
        match by_prefix.len() {
            0 => Ok(None),
            1 => Ok(by_prefix.pop()),
            n => Err(LedgerError::Validation(format!(
                "'{}' is ambiguous ({} members share that id prefix)",
                reference, n
            ))),
        }
    }

    /// Resolve a reference to a member, failing if none matches
    pub fn resolve(&self, reference: &str) -> LedgerResult<Member> {
        self.find(reference)?
            .ok_or_else(|| LedgerError::member_not_found(reference))
    }

    /// Resolve several references, keeping their order
    pub fn resolve_all<S: AsRef<str>>(&self, references: &[S]) -> LedgerResult<Vec<Member>> {
        references
            .iter()
            .map(|r| self.resolve(r.as_ref()))
            .collect()
    }
}
