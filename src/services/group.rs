//! Group service
//!
//! Group lifecycle and membership rules: unique trimmed names, no duplicate
//! members, a group never drops to zero members except by being deleted.

use tracing::info;

use crate::error::{LedgerError, LedgerResult};
use crate::models::group::validate_group_name;
use crate::models::{Group, GroupId, Member, MemberId};
use crate::storage::Storage;

/// Service for group management
pub struct GroupService<'a> {
    storage: &'a Storage,
}

/// What happened when a member left a group
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeaveOutcome {
    /// The member left; the group lives on
    Left(Group),
    /// The member was the last one, so the group was deleted
    GroupDeleted(GroupId),
}

/// Counts of records removed alongside a group
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeletedGroup {
    pub expenses: usize,
    pub payments: usize,
}

impl<'a> GroupService<'a> {
    /// Create a new group service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new group with `creator` as its first member
    pub fn create(&self, name: &str, creator: &MemberId) -> LedgerResult<Group> {
        validate_group_name(name).map_err(|e| LedgerError::Validation(e.to_string()))?;
        self.ensure_member_exists(creator)?;

        if self.storage.groups.name_exists(name, None)? {
            return Err(LedgerError::Duplicate {
                entity_type: "Group",
                identifier: name.trim().to_string(),
            });
        }

        let group = Group::new(name, creator.clone());
        group
            .validate()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

        self.storage.groups.upsert(group.clone())?;
        self.storage.groups.save()?;

        info!(group = %group.id, name = %group.name, "group created");
        Ok(group)
    }

    /// Get a group by ID
    pub fn get(&self, id: &GroupId) -> LedgerResult<Option<Group>> {
        self.storage.groups.get(id)
    }

    /// Get all groups, newest first
    pub fn list(&self) -> LedgerResult<Vec<Group>> {
        self.storage.groups.get_all()
    }

    /// Groups a member belongs to
    pub fn list_for_member(&self, member_id: &MemberId) -> LedgerResult<Vec<Group>> {
        self.storage.groups.get_for_member(member_id)
    }

    /// Find a group by id, name or short id
    pub fn find(&self, reference: &str) -> LedgerResult<Option<Group>> {
        let reference = reference.trim();

        if let Some(group) = self.storage.groups.get(&GroupId::from(reference))? {
            return Ok(Some(group));
        }
        if let Some(group) = self.storage.groups.get_by_name(reference)? {
            return Ok(Some(group));
        }

        let mut by_prefix: Vec<Group> = self
            .storage
            .groups
            .get_all()?
            .into_iter()
            .filter(|g| g.id.matches(reference))
            .collect();
        match by_prefix.len() {
            0 => Ok(None),
            1 => Ok(by_prefix.pop()),
            n => Err(LedgerError::Validation(format!(
                "'{}' is ambiguous ({} groups share that id prefix)",
                reference, n
            ))),
        }
    }

    /// Resolve a reference to a group, failing if none matches
    pub fn resolve(&self, reference: &str) -> LedgerResult<Group> {
        self.find(reference)?
            .ok_or_else(|| LedgerError::group_not_found(reference))
    }

    /// Members of a group in membership order.
    ///
    /// Ids whose member record no longer exists are left out.
    pub fn members(&self, group: &Group) -> LedgerResult<Vec<Member>> {
        self.storage.members.get_many(&group.members)
    }

    /// Rename a group
    pub fn rename(&self, id: &GroupId, name: &str) -> LedgerResult<Group> {
        let mut group = self.require(id)?;

        validate_group_name(name).map_err(|e| LedgerError::Validation(e.to_string()))?;
        if self.storage.groups.name_exists(name, Some(id))? {
            return Err(LedgerError::Duplicate {
                entity_type: "Group",
                identifier: name.trim().to_string(),
            });
        }

        group.rename(name);
        self.storage.groups.upsert(group.clone())?;
        self.storage.groups.save()?;

        info!(group = %group.id, name = %group.name, "group renamed");
        Ok(group)
    }

    /// Delete a group along with its expenses and payments
    pub fn delete(&self, id: &GroupId) -> LedgerResult<DeletedGroup> {
        let group = self.require(id)?;

        let deleted = DeletedGroup {
            expenses: self.storage.expenses.delete_by_group(id)?,
            payments: self.storage.payments.delete_by_group(id)?,
        };
        self.storage.groups.delete(id)?;

        self.storage.expenses.save()?;
        self.storage.payments.save()?;
        self.storage.groups.save()?;

        info!(
            group = %group.id,
            expenses = deleted.expenses,
            payments = deleted.payments,
            "group deleted"
        );
        Ok(deleted)
    }

    /// Add an existing member to a group
    pub fn invite(&self, id: &GroupId, member_id: &MemberId) -> LedgerResult<Group> {
        let mut group = self.require(id)?;
        let member = self.ensure_member_exists(member_id)?;

        if !group.add_member(member_id.clone()) {
            return Err(LedgerError::Membership(format!(
                "{} is already a member of '{}'",
                member.name, group.name
            )));
        }

        self.storage.groups.upsert(group.clone())?;
        self.storage.groups.save()?;

        info!(group = %group.id, member = %member_id, "member invited");
        Ok(group)
    }

    /// Remove another member from a group
    pub fn remove(&self, id: &GroupId, member_id: &MemberId) -> LedgerResult<Group> {
        let mut group = self.require(id)?;

        if !group.has_member(member_id) {
            return Err(LedgerError::Membership(format!(
                "{} is not a member of '{}'",
                member_id, group.name
            )));
        }
        if group.members.len() == 1 {
            return Err(LedgerError::Membership(format!(
                "Cannot remove the last member of '{}'; delete the group instead",
                group.name
            )));
        }

        group.remove_member(member_id);
        self.storage.groups.upsert(group.clone())?;
        self.storage.groups.save()?;

        info!(group = %group.id, member = %member_id, "member removed");
        Ok(group)
    }

    /// Leave a group; the last member leaving deletes it
    pub fn leave(&self, id: &GroupId, member_id: &MemberId) -> LedgerResult<LeaveOutcome> {
        let mut group = self.require(id)?;

        if !group.has_member(member_id) {
            return Err(LedgerError::Membership(format!(
                "{} is not a member of '{}'",
                member_id, group.name
            )));
        }

        if group.members.len() == 1 {
            self.delete(id)?;
            return Ok(LeaveOutcome::GroupDeleted(group.id));
        }

        group.remove_member(member_id);
        self.storage.groups.upsert(group.clone())?;
        self.storage.groups.save()?;

        info!(group = %group.id, member = %member_id, "member left");
        Ok(LeaveOutcome::Left(group))
    }

    fn require(&self, id: &GroupId) -> LedgerResult<Group> {
        self.storage
            .groups
            .get(id)?
            .ok_or_else(|| LedgerError::group_not_found(id.to_string()))
    }

    fn ensure_member_exists(&self, member_id: &MemberId) -> LedgerResult<Member> {
        self.storage
            .members
            .get(member_id)?
            .ok_or_else(|| LedgerError::member_not_found(member_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::LedgerPaths;
    use crate::models::{Expense, Money};
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn add_member(storage: &Storage, name: &str) -> Member {
        let member = Member::new(name);
        storage.members.upsert(member.clone()).unwrap();
        member
    }

    #[test]
    fn test_create_group() {
        let (_temp_dir, storage) = create_test_storage();
        let asha = add_member(&storage, "Asha");
        let service = GroupService::new(&storage);

        let group = service.create("  Goa Trip  ", &asha.id).unwrap();
        assert_eq!(group.name, "Goa Trip");
        assert_eq!(group.members, vec![asha.id.clone()]);
        assert_eq!(group.created_by, Some(asha.id));
    }

    #[test]
    fn test_create_validation() {
        let (_temp_dir, storage) = create_test_storage();
        let asha = add_member(&storage, "Asha");
        let service = GroupService::new(&storage);

        assert!(service.create("   ", &asha.id).unwrap_err().is_validation());
        assert!(service
            .create(&"x".repeat(51), &asha.id)
            .unwrap_err()
            .is_validation());
        assert!(service
            .create("Flat", &MemberId::from("ghost"))
            .unwrap_err()
            .is_not_found());

        service.create("Flat", &asha.id).unwrap();
        assert!(matches!(
            service.create("flat", &asha.id),
            Err(LedgerError::Duplicate { .. })
        ));
    }

    #[test]
    fn test_rename() {
        let (_temp_dir, storage) = create_test_storage();
        let asha = add_member(&storage, "Asha");
        let service = GroupService::new(&storage);
        let flat = service.create("Flat", &asha.id).unwrap();
        service.create("Trip", &asha.id).unwrap();

        assert!(matches!(
            service.rename(&flat.id, "TRIP"),
            Err(LedgerError::Duplicate { .. })
        ));
        // Renaming to a different case of its own name is allowed
        assert_eq!(service.rename(&flat.id, "FLAT").unwrap().name, "FLAT");
    }

    #[test]
    fn test_invite_and_remove_rules() {
        let (_temp_dir, storage) = create_test_storage();
        let asha = add_member(&storage, "Asha");
        let ben = add_member(&storage, "Ben");
        let service = GroupService::new(&storage);
        let group = service.create("Flat", &asha.id).unwrap();

        let group = service.invite(&group.id, &ben.id).unwrap();
        assert_eq!(group.members, vec![asha.id.clone(), ben.id.clone()]);

        assert!(matches!(
            service.invite(&group.id, &ben.id),
            Err(LedgerError::Membership(_))
        ));
        assert!(service
            .invite(&group.id, &MemberId::from("ghost"))
            .unwrap_err()
            .is_not_found());

        let group = service.remove(&group.id, &ben.id).unwrap();
        assert_eq!(group.members, vec![asha.id.clone()]);
        assert!(matches!(
            service.remove(&group.id, &ben.id),
            Err(LedgerError::Membership(_))
        ));
        assert!(matches!(
            service.remove(&group.id, &asha.id),
            Err(LedgerError::Membership(_))
        ));
    }

    #[test]
    fn test_leave_last_member_deletes_group() {
        let (_temp_dir, storage) = create_test_storage();
        let asha = add_member(&storage, "Asha");
        let ben = add_member(&storage, "Ben");
        let service = GroupService::new(&storage);
        let group = service.create("Flat", &asha.id).unwrap();
        service.invite(&group.id, &ben.id).unwrap();

        let outcome = service.leave(&group.id, &asha.id).unwrap();
        assert!(matches!(outcome, LeaveOutcome::Left(ref g) if g.members == vec![ben.id.clone()]));

        assert!(matches!(
            service.leave(&group.id, &asha.id),
            Err(LedgerError::Membership(_))
        ));

        let outcome = service.leave(&group.id, &ben.id).unwrap();
        assert_eq!(outcome, LeaveOutcome::GroupDeleted(group.id.clone()));
        assert!(service.get(&group.id).unwrap().is_none());
    }

    #[test]
    fn test_delete_cascades() {
        let (_temp_dir, storage) = create_test_storage();
        let asha = add_member(&storage, "Asha");
        let service = GroupService::new(&storage);
        let group = service.create("Flat", &asha.id).unwrap();
        storage
            .expenses
            .upsert(Expense::equal(
                group.id.clone(),
                "Rent",
                Money::from_cents(100_000),
                asha.id.clone(),
                vec![asha.id.clone()],
            ))
            .unwrap();

        let deleted = service.delete(&group.id).unwrap();
        assert_eq!(deleted, DeletedGroup { expenses: 1, payments: 0 });
        assert!(storage.expenses.get_by_group(&group.id).unwrap().is_empty());
        assert!(service.delete(&group.id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_find_by_name_and_members_order() {
        let (_temp_dir, storage) = create_test_storage();
        let zed = add_member(&storage, "Zed");
        let amy = add_member(&storage, "Amy");
        let service = GroupService::new(&storage);
        let group = service.create("Flat", &zed.id).unwrap();
        let group = service.invite(&group.id, &amy.id).unwrap();

        let found = service.resolve("flat").unwrap();
        assert_eq!(found.id, group.id);

        let names: Vec<String> = service
            .members(&found)
            .unwrap()
            .into_iter()
            .map(|m| m.name)
            .collect();
        assert_eq!(names, vec!["Zed", "Amy"]);
    }
}
