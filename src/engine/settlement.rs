//! Settlement planning
//!
//! Turns a set of balances into suggested transfers using a first-fit greedy
//! two-pointer match: debtors and creditors are taken in balance order (no
//! sorting by size), and each step moves the smaller of the two remaining
//! amounts.

use std::fmt;

use serde::Serialize;
use tracing::{debug, warn};

use crate::models::{MemberId, Money};

use super::balances::Balance;

/// Balances with an absolute value at or below this are treated as settled
pub const SETTLED_THRESHOLD: Money = Money::from_cents(1);

/// One suggested payment from a debtor to a creditor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettlementTransfer {
    pub debtor_id: MemberId,
    pub debtor_name: String,
    pub creditor_id: MemberId,
    pub creditor_name: String,
    pub amount: Money,
}

impl SettlementTransfer {
    /// Human-readable sentence with a chosen currency symbol
    pub fn describe(&self, currency_symbol: &str) -> String {
        format!(
            "{} owes {} {}",
            self.debtor_name,
            self.creditor_name,
            self.amount.format_with_symbol(currency_symbol)
        )
    }
}

impl fmt::Display for SettlementTransfer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} owes {} {}",
            self.debtor_name, self.creditor_name, self.amount
        )
    }
}

/// The suggested transfers for a group
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SettlementPlan {
    /// Transfers in the order they were matched
    pub transfers: Vec<SettlementTransfer>,

    /// Amounts left over when creditor and debtor totals disagree.
    /// Creditors keep a positive balance, debtors a negative one.
    pub unresolved: Vec<Balance>,
}

impl SettlementPlan {
    /// True when there is nothing to transfer
    pub fn is_settled(&self) -> bool {
        self.transfers.is_empty()
    }

    /// Total money moved by the plan
    pub fn total(&self) -> Money {
        self.transfers.iter().map(|t| t.amount).sum()
    }
}

struct Position<'a> {
    balance: &'a Balance,
    remaining: Money,
}

/// Plan transfers that settle every balance above the threshold.
///
/// The loop stops as soon as either side runs out. When totals disagree
/// (for example because a payment referenced someone outside the group) the
/// other side is left partly unsettled; what is left is returned in
/// [`SettlementPlan::unresolved`] instead of being turned into transfers.
pub fn plan_settlement(balances: &[Balance]) -> SettlementPlan {
    let mut creditors: Vec<Position<'_>> = Vec::new();
    let mut debtors: Vec<Position<'_>> = Vec::new();

    for balance in balances {
        if balance.balance > SETTLED_THRESHOLD {
            creditors.push(Position {
                balance,
                remaining: balance.balance,
            });
        } else if balance.balance < -SETTLED_THRESHOLD {
            debtors.push(Position {
                balance,
                remaining: balance.balance.abs(),
            });
        }
    }

    let mut transfers = Vec::new();
    let (mut i, mut j) = (0, 0);

    while i < debtors.len() && j < creditors.len() {
        let amount = debtors[i].remaining.min(creditors[j].remaining);

        transfers.push(SettlementTransfer {
            debtor_id: debtors[i].balance.member_id.clone(),
            debtor_name: debtors[i].balance.name.clone(),
            creditor_id: creditors[j].balance.member_id.clone(),
            creditor_name: creditors[j].balance.name.clone(),
            amount,
        });

        debtors[i].remaining -= amount;
        creditors[j].remaining -= amount;

        if debtors[i].remaining < SETTLED_THRESHOLD {
            i += 1;
        }
        if creditors[j].remaining < SETTLED_THRESHOLD {
            j += 1;
        }
    }

    let leftover = |p: &Position<'_>, sign: Money| {
        (p.remaining > SETTLED_THRESHOLD).then(|| Balance {
            member_id: p.balance.member_id.clone(),
            name: p.balance.name.clone(),
            balance: if sign.is_negative() {
                -p.remaining
            } else {
                p.remaining
            },
        })
    };

    let unresolved: Vec<Balance> = debtors[i.min(debtors.len())..]
        .iter()
        .filter_map(|p| leftover(p, Money::from_cents(-1)))
        .chain(
            creditors[j.min(creditors.len())..]
                .iter()
                .filter_map(|p| leftover(p, Money::from_cents(1))),
        )
        .collect();

    if !unresolved.is_empty() {
        let left: Money = unresolved.iter().map(|b| b.balance).sum();
        warn!(
            unresolved = unresolved.len(),
            amount = %left,
            "creditor and debtor totals disagree; balances left unsettled"
        );
    }

    debug!(
        creditors = creditors.len(),
        debtors = debtors.len(),
        transfers = transfers.len(),
        "settlement planned"
    );

    SettlementPlan {
        transfers,
        unresolved,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn balances(entries: &[(&str, i64)]) -> Vec<Balance> {
        entries
            .iter()
            .map(|(id, cents)| Balance::new(*id, id.to_uppercase(), Money::from_cents(*cents)))
            .collect()
    }

    fn summary(plan: &SettlementPlan) -> Vec<(String, String, i64)> {
        plan.transfers
            .iter()
            .map(|t| {
                (
                    t.debtor_id.to_string(),
                    t.creditor_id.to_string(),
                    t.amount.cents(),
                )
            })
            .collect()
    }

    #[test]
    fn test_one_creditor_two_debtors() {
        let plan = plan_settlement(&balances(&[("a", 6_000), ("b", -3_000), ("c", -3_000)]));
        assert_eq!(
            summary(&plan),
            vec![
                ("b".into(), "a".into(), 3_000),
                ("c".into(), "a".into(), 3_000)
            ]
        );
        assert!(plan.unresolved.is_empty());
        assert_eq!(plan.transfers[0].to_string(), "B owes A ₹30.00");
    }

    #[test]
    fn test_settled_group_has_empty_plan() {
        let plan = plan_settlement(&balances(&[("a", 0), ("b", 0)]));
        assert!(plan.is_settled());
        assert!(plan.unresolved.is_empty());
    }

    #[test]
    fn test_threshold_excludes_one_cent() {
        let plan = plan_settlement(&balances(&[("a", 1), ("b", -1)]));
        assert!(plan.is_settled());
    }

    #[test]
    fn test_first_fit_order_not_sorted() {
        // Largest debtor is last; greedy still walks in the given order
        let plan = plan_settlement(&balances(&[
            ("a", 5_000),
            ("b", 2_000),
            ("c", -1_000),
            ("d", -6_000),
        ]));
        assert_eq!(
            summary(&plan),
            vec![
                ("c".into(), "a".into(), 1_000),
                ("d".into(), "a".into(), 4_000),
                ("d".into(), "b".into(), 2_000),
            ]
        );
    }

    #[test]
    fn test_both_cursors_advance_on_exact_match() {
        let plan = plan_settlement(&balances(&[
            ("a", 2_500),
            ("b", -2_500),
            ("c", 1_000),
            ("d", -1_000),
        ]));
        assert_eq!(
            summary(&plan),
            vec![
                ("b".into(), "a".into(), 2_500),
                ("d".into(), "c".into(), 1_000)
            ]
        );
    }

    #[test]
    fn test_idempotent() {
        let input = balances(&[("a", 4_321), ("b", -1_234), ("c", -3_087)]);
        assert_eq!(plan_settlement(&input), plan_settlement(&input));
    }

    #[test]
    fn test_mismatched_totals_leave_unresolved() {
        let plan = plan_settlement(&balances(&[("a", 5_000), ("b", -2_000)]));
        assert_eq!(summary(&plan), vec![("b".into(), "a".into(), 2_000)]);
        assert_eq!(plan.unresolved, balances(&[("a", 3_000)]));

        let plan = plan_settlement(&balances(&[("a", 1_000), ("b", -2_500), ("c", -500)]));
        assert_eq!(summary(&plan), vec![("b".into(), "a".into(), 1_000)]);
        assert_eq!(plan.unresolved, balances(&[("b", -1_500), ("c", -500)]));
    }

    #[test]
    fn test_rounding_residual_is_not_unresolved() {
        // 100.00 split three ways rounds to +66.67 / -33.33 / -33.33
        let plan = plan_settlement(&balances(&[("a", 6_667), ("b", -3_333), ("c", -3_333)]));
        assert_eq!(plan.transfers.len(), 2);
        assert!(plan.unresolved.is_empty());
        assert_eq!(plan.total().cents(), 6_666);
    }

    #[test]
    fn test_describe_with_symbol() {
        let plan = plan_settlement(&balances(&[("a", 1_050), ("b", -1_050)]));
        assert_eq!(plan.transfers[0].describe("$"), "B owes A $10.50");
    }
}
