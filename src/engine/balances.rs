//! Balance aggregation
//!
//! Reduces a group's members, expenses and payments to one signed net
//! balance per member. Positive balances are owed money by the group,
//! negative balances owe money.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::models::{Expense, ExpenseId, Member, MemberId, Money, Payment, PaymentId};

use super::micros::Micros;

/// One member's net position in a group
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Balance {
    pub member_id: MemberId,
    pub name: String,
    /// Rounded to whole cents
    pub balance: Money,
}

impl Balance {
    pub fn new(member_id: impl Into<MemberId>, name: impl Into<String>, balance: Money) -> Self {
        Self {
            member_id: member_id.into(),
            name: name.into(),
            balance,
        }
    }
}

/// Which side of a payment referenced an unknown member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentSide {
    From,
    To,
}

impl fmt::Display for PaymentSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::From => write!(f, "from"),
            Self::To => write!(f, "to"),
        }
    }
}

/// A reference the aggregator skipped while computing balances
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LedgerWarning {
    /// A split participant is not a member of the group
    UnknownSplitMember {
        expense_id: ExpenseId,
        member_id: MemberId,
    },
    /// The payer of an expense is not a member of the group
    UnknownPayer {
        expense_id: ExpenseId,
        member_id: MemberId,
    },
    /// One side of a payment is not a member of the group
    UnknownPaymentMember {
        payment_id: PaymentId,
        member_id: MemberId,
        side: PaymentSide,
    },
    /// Equal-split expense with nobody to split among; the whole expense is skipped
    EmptySplit { expense_id: ExpenseId },
}

impl fmt::Display for LedgerWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownSplitMember {
                expense_id,
                member_id,
            } => write!(
                f,
                "expense {}: split member {} is not in the group",
                expense_id, member_id
            ),
            Self::UnknownPayer {
                expense_id,
                member_id,
            } => write!(
                f,
                "expense {}: payer {} is not in the group",
                expense_id, member_id
            ),
            Self::UnknownPaymentMember {
                payment_id,
                member_id,
                side,
            } => write!(
                f,
                "payment {}: '{}' member {} is not in the group",
                payment_id, side, member_id
            ),
            Self::EmptySplit { expense_id } => write!(
                f,
                "expense {}: no members to split among, expense ignored",
                expense_id
            ),
        }
    }
}

/// Balances for every group member plus the references that were skipped
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BalanceSheet {
    balances: Vec<Balance>,
    warnings: Vec<LedgerWarning>,
}

impl BalanceSheet {
    /// Balances in member order
    pub fn balances(&self) -> &[Balance] {
        &self.balances
    }

    pub fn warnings(&self) -> &[LedgerWarning] {
        &self.warnings
    }

    /// Look up a member's balance
    pub fn get(&self, member_id: &MemberId) -> Option<&Balance> {
        self.balances.iter().find(|b| &b.member_id == member_id)
    }

    /// True when no reference was skipped
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Sum of the rounded balances (zero up to rounding when data is consistent)
    pub fn total(&self) -> Money {
        self.balances.iter().map(|b| b.balance).sum()
    }
}

/// Running totals keyed by member, kept in member order
struct Accumulator<'a> {
    index: HashMap<&'a MemberId, usize>,
    members: Vec<&'a Member>,
    totals: Vec<Micros>,
}

impl<'a> Accumulator<'a> {
    fn new(members: &'a [Member]) -> Self {
        let mut index = HashMap::with_capacity(members.len());
        let mut ordered = Vec::with_capacity(members.len());
        for member in members {
            if index.contains_key(&member.id) {
                debug!(member_id = %member.id, "duplicate member ignored");
                continue;
            }
            index.insert(&member.id, ordered.len());
            ordered.push(member);
        }
        let totals = vec![Micros::ZERO; ordered.len()];
        Self {
            index,
            members: ordered,
            totals,
        }
    }

    /// Apply `delta` to a member; returns false if the member is unknown
    fn credit(&mut self, member_id: &MemberId, delta: Micros) -> bool {
        match self.index.get(member_id) {
            Some(&i) => {
                self.totals[i] += delta;
                true
            }
            None => false,
        }
    }

    fn debit(&mut self, member_id: &MemberId, delta: Micros) -> bool {
        match self.index.get(member_id) {
            Some(&i) => {
                self.totals[i] -= delta;
                true
            }
            None => false,
        }
    }

    fn finish(self) -> Vec<Balance> {
        self.members
            .into_iter()
            .zip(self.totals)
            .map(|(member, total)| Balance {
                member_id: member.id.clone(),
                name: member.name.clone(),
                balance: total.round_to_money(),
            })
            .collect()
    }
}

/// Compute each member's net balance from expenses and payments.
///
/// Every member starts at zero. For each expense the participants are debited
/// their share (explicit splits when present, otherwise an equal share of the
/// amount) and the payer is credited the full amount. For each payment the
/// `from` member is credited and the `to` member debited. References to
/// non-members are skipped and reported as [`LedgerWarning`]s. Balances are
/// rounded to cents only at the end.
pub fn compute_balances(
    members: &[Member],
    expenses: &[Expense],
    payments: &[Payment],
) -> BalanceSheet {
    let mut acc = Accumulator::new(members);
    let mut warnings = Vec::new();

    for expense in expenses {
        apply_expense(&mut acc, expense, &mut warnings);
    }

    for payment in payments {
        let amount = Micros::from_money(payment.amount);
        if !acc.credit(&payment.from, amount) {
            warnings.push(LedgerWarning::UnknownPaymentMember {
                payment_id: payment.id.clone(),
                member_id: payment.from.clone(),
                side: PaymentSide::From,
            });
        }
        if !acc.debit(&payment.to, amount) {
            warnings.push(LedgerWarning::UnknownPaymentMember {
                payment_id: payment.id.clone(),
                member_id: payment.to.clone(),
                side: PaymentSide::To,
            });
        }
    }

    for warning in &warnings {
        debug!(%warning, "skipped reference while computing balances");
    }

    let balances = acc.finish();
    debug!(
        members = balances.len(),
        expenses = expenses.len(),
        payments = payments.len(),
        skipped = warnings.len(),
        "balances computed"
    );

    BalanceSheet { balances, warnings }
}

fn apply_expense(acc: &mut Accumulator<'_>, expense: &Expense, warnings: &mut Vec<LedgerWarning>) {
    if expense.uses_custom_splits() {
        for split in &expense.splits {
            if !acc.debit(&split.member_id, Micros::from_money(split.amount)) {
                warnings.push(LedgerWarning::UnknownSplitMember {
                    expense_id: expense.id.clone(),
                    member_id: split.member_id.clone(),
                });
            }
        }
    } else {
        if expense.split_among.is_empty() {
            warnings.push(LedgerWarning::EmptySplit {
                expense_id: expense.id.clone(),
            });
            return;
        }
        let shares = Micros::split_evenly(expense.amount, expense.split_among.len());
        for (member_id, share) in expense.split_among.iter().zip(shares) {
            if !acc.debit(member_id, share) {
                warnings.push(LedgerWarning::UnknownSplitMember {
                    expense_id: expense.id.clone(),
                    member_id: member_id.clone(),
                });
            }
        }
    }

    if !acc.credit(&expense.paid_by, Micros::from_money(expense.amount)) {
        warnings.push(LedgerWarning::UnknownPayer {
            expense_id: expense.id.clone(),
            member_id: expense.paid_by.clone(),
        });
    }
}

/// Net expenses alone, with no membership filter.
///
/// Every id that appears as a participant or payer gets an entry, in the
/// order it is first seen. Payments are not considered. Useful for auditing
/// expenses that reference people who have since left a group.
pub fn tally_expenses(expenses: &[Expense]) -> Vec<(MemberId, Money)> {
    let mut order: Vec<&MemberId> = Vec::new();
    let mut totals: HashMap<&MemberId, Micros> = HashMap::new();

    for expense in expenses {
        let mut entries: Vec<(&MemberId, Micros, bool)> = Vec::new();
        if expense.uses_custom_splits() {
            for split in &expense.splits {
                entries.push((&split.member_id, Micros::from_money(split.amount), false));
            }
        } else if expense.split_among.is_empty() {
            continue;
        } else {
            let shares = Micros::split_evenly(expense.amount, expense.split_among.len());
            for (member_id, share) in expense.split_among.iter().zip(shares) {
                entries.push((member_id, share, false));
            }
        }
        entries.push((&expense.paid_by, Micros::from_money(expense.amount), true));

        for (member_id, delta, is_credit) in entries {
            let total = totals.entry(member_id).or_insert_with(|| {
                order.push(member_id);
                Micros::ZERO
            });
            if is_credit {
                *total += delta;
            } else {
                *total -= delta;
            }
        }
    }

    order
        .into_iter()
        .map(|member_id| {
            let total = totals.get(member_id).copied().unwrap_or_default();
            (member_id.clone(), total.round_to_money())
        })
        .collect()
}
