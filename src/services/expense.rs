//! Expense service
//!
//! Records expenses against a group after checking the expense itself and
//! that everyone it names belongs to the group.

use tracing::{debug, info};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Expense, ExpenseId, Group, GroupId, MemberId, Money, Split};
use crate::storage::Storage;

/// How a new expense is to be shared
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseShares {
    /// Evenly among these members; an empty list means every group member
    Equal(Vec<MemberId>),
    /// Explicit per-member shares that must add up to the amount
    Custom(Vec<Split>),
}

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
}

impl<'a> ExpenseService<'a> {
    /// Create a new expense service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Record a new expense in a group
    pub fn add(
        &self,
        group_id: &GroupId,
        description: &str,
        amount: Money,
        paid_by: &MemberId,
        shares: ExpenseShares,
    ) -> LedgerResult<Expense> {
        let group = self
            .storage
            .groups
            .get(group_id)?
            .ok_or_else(|| LedgerError::group_not_found(group_id.to_string()))?;

        let description = description.trim();
        let expense = match shares {
            ExpenseShares::Equal(among) => {
                let among = if among.is_empty() {
                    group.members.clone()
                } else {
                    dedup(among)
                };
                Expense::equal(group.id.clone(), description, amount, paid_by.clone(), among)
            }
            ExpenseShares::Custom(splits) => {
                Expense::custom(group.id.clone(), description, amount, paid_by.clone(), splits)
            }
        };

        self.record(&group, expense)
    }

    /// Validate and store a fully-built expense
    pub fn record(&self, group: &Group, expense: Expense) -> LedgerResult<Expense> {
        expense
            .validate()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

        if expense.group_id != group.id {
            return Err(LedgerError::Validation(format!(
                "Expense belongs to group {}, not {}",
                expense.group_id, group.id
            )));
        }
        if !group.has_member(&expense.paid_by) {
            return Err(LedgerError::Membership(format!(
                "Payer {} is not a member of '{}'",
                expense.paid_by, group.name
            )));
        }
        if let Some(outsider) = expense
            .participants()
            .into_iter()
            .find(|m| !group.has_member(m))
        {
            return Err(LedgerError::Membership(format!(
                "{} is not a member of '{}'",
                outsider, group.name
            )));
        }

        let mut seen = Vec::with_capacity(expense.splits.len());
        for split in &expense.splits {
            if seen.contains(&&split.member_id) {
                return Err(LedgerError::Validation(format!(
                    "{} appears more than once in the split",
                    split.member_id
                )));
            }
            seen.push(&split.member_id);
        }

        self.storage.expenses.upsert(expense.clone())?;
        self.storage.expenses.save()?;

        info!(
            expense = %expense.id,
            group = %group.id,
            amount = %expense.amount,
            mode = %expense.split_mode(),
            "expense recorded"
        );
        Ok(expense)
    }

    /// Get an expense by ID
    pub fn get(&self, id: &ExpenseId) -> LedgerResult<Option<Expense>> {
        self.storage.expenses.get(id)
    }

    /// Expenses of a group, oldest first
    pub fn list(&self, group_id: &GroupId) -> LedgerResult<Vec<Expense>> {
        self.storage.expenses.get_by_group(group_id)
    }

    /// Resolve an id or short id to a single expense
    pub fn resolve(&self, reference: &str) -> LedgerResult<Expense> {
        let mut matches = self.storage.expenses.find(reference.trim())?;
        match matches.len() {
            0 => Err(LedgerError::expense_not_found(reference)),
            1 => Ok(matches.remove(0)),
            n => Err(LedgerError::Validation(format!(
                "'{}' is ambiguous ({} expenses share that id prefix)",
                reference, n
            ))),
        }
    }

    /// Delete an expense
    pub fn delete(&self, id: &ExpenseId) -> LedgerResult<Expense> {
        let expense = self
            .storage
            .expenses
            .get(id)?
            .ok_or_else(|| LedgerError::expense_not_found(id.to_string()))?;

        self.storage.expenses.delete(id)?;
        self.storage.expenses.save()?;

        debug!(expense = %id, "expense deleted");
        Ok(expense)
    }
}

fn dedup(ids: Vec<MemberId>) -> Vec<MemberId> {
    let mut out: Vec<MemberId> = Vec::with_capacity(ids.len());
    for id in ids {
        if !out.contains(&id) {
            out.push(id);
        }
    }
    out
}
