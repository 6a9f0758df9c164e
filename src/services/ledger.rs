//! Ledger service
//!
//! Loads a group's members, expenses and payments and runs them through the
//! reconciliation engine. Nothing computed here is ever persisted.

use tracing::{debug, warn};

use crate::config::settings::Settings;
use crate::engine::{compute_balances, plan_settlement, BalanceSheet, SettlementPlan};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Group, GroupId, Member};
use crate::storage::Storage;

/// Balances and suggested transfers for one group
#[derive(Debug, Clone)]
pub struct GroupReport {
    pub group: Group,
    pub members: Vec<Member>,
    pub balances: BalanceSheet,
    pub plan: SettlementPlan,
}

/// Service producing balance reports
pub struct LedgerService<'a> {
    storage: &'a Storage,
    strict_references: bool,
}

impl<'a> LedgerService<'a> {
    /// Create a ledger service that tolerates skipped references
    pub fn new(storage: &'a Storage) -> Self {
        Self {
            storage,
            strict_references: false,
        }
    }

    /// Create a ledger service honoring the user's settings
    pub fn with_settings(storage: &'a Storage, settings: &Settings) -> Self {
        Self {
            storage,
            strict_references: settings.strict_references,
        }
    }

    /// Compute balances and the settlement plan for a group
    pub fn report(&self, group_id: &GroupId) -> LedgerResult<GroupReport> {
        let group = self
            .storage
            .groups
            .get(group_id)?
            .ok_or_else(|| LedgerError::group_not_found(group_id.to_string()))?;

        let members = self.storage.members.get_many(&group.members)?;
        if members.len() != group.members.len() {
            warn!(
                group = %group.id,
                missing = group.members.len() - members.len(),
                "group lists members with no member record"
            );
        }

        let expenses = self.storage.expenses.get_by_group(&group.id)?;
        let payments = self.storage.payments.get_by_group(&group.id)?;
        debug!(
            group = %group.id,
            members = members.len(),
            expenses = expenses.len(),
            payments = payments.len(),
            "computing group report"
        );

        let balances = compute_balances(&members, &expenses, &payments);
        if self.strict_references && !balances.is_clean() {
            let details: Vec<String> = balances.warnings().iter().map(|w| w.to_string()).collect();
            return Err(LedgerError::Validation(format!(
                "Ledger for '{}' references non-members: {}",
                group.name,
                details.join("; ")
            )));
        }

        let plan = plan_settlement(balances.balances());

        Ok(GroupReport {
            group,
            members,
            balances,
            plan,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::LedgerPaths;
    use crate::models::{Expense, MemberId, Money, Payment};
    use tempfile::TempDir;

    fn setup() -> (TempDir, Storage, Group, Vec<Member>) {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();

        let members: Vec<Member> = ["Asha", "Ben", "Chen"]
            .iter()
            .map(|n| Member::new(*n))
            .collect();
        for m in &members {
            storage.members.upsert(m.clone()).unwrap();
        }
        let mut group = Group::new("Trip", members[0].id.clone());
        group.add_member(members[1].id.clone());
        group.add_member(members[2].id.clone());
        storage.groups.upsert(group.clone()).unwrap();

        (temp_dir, storage, group, members)
    }

    #[test]
    fn test_report_balances_and_plan() {
        let (_temp_dir, storage, group, members) = setup();
        let ids: Vec<MemberId> = members.iter().map(|m| m.id.clone()).collect();
        storage
            .expenses
            .upsert(Expense::equal(
                group.id.clone(),
                "Hotel",
                Money::from_cents(9_000),
                ids[0].clone(),
                ids.clone(),
            ))
            .unwrap();

        let report = LedgerService::new(&storage).report(&group.id).unwrap();
        let cents: Vec<i64> = report
            .balances
            .balances()
            .iter()
            .map(|b| b.balance.cents())
            .collect();
        assert_eq!(cents, vec![6_000, -3_000, -3_000]);
        assert_eq!(report.plan.transfers.len(), 2);
        assert_eq!(report.plan.transfers[0].to_string(), "Ben owes Asha ₹30.00");
        assert_eq!(report.plan.transfers[1].to_string(), "Chen owes Asha ₹30.00");
    }

    #[test]
    fn test_report_ignores_other_groups() {
        let (_temp_dir, storage, group, members) = setup();
        storage
            .expenses
            .upsert(Expense::equal(
                GroupId::from("elsewhere"),
                "Lunch",
                Money::from_cents(1_000),
                members[0].id.clone(),
                vec![members[1].id.clone()],
            ))
            .unwrap();

        let report = LedgerService::new(&storage).report(&group.id).unwrap();
        assert!(report.plan.is_settled());
        assert!(report.balances.balances().iter().all(|b| b.balance.is_zero()));
    }

    #[test]
    fn test_strict_references() {
        let (_temp_dir, storage, group, members) = setup();
        storage
            .payments
            .upsert(Payment::new(
                group.id.clone(),
                members[1].id.clone(),
                "former-member",
                Money::from_cents(1_000),
            ))
            .unwrap();

        let lenient = LedgerService::new(&storage).report(&group.id).unwrap();
        assert_eq!(lenient.balances.warnings().len(), 1);
        assert_eq!(lenient.balances.get(&members[1].id).unwrap().balance.cents(), 1_000);

        let settings = Settings {
            strict_references: true,
            ..Settings::default()
        };
        let strict = LedgerService::with_settings(&storage, &settings).report(&group.id);
        assert!(strict.unwrap_err().is_validation());
    }

    #[test]
    fn test_unknown_group() {
        let (_temp_dir, storage, _group, _members) = setup();
        let err = LedgerService::new(&storage)
            .report(&GroupId::from("nope"))
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
