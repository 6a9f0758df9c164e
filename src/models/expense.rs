//! Expense model
//!
//! An expense is money one member paid on behalf of the group. It is shared
//! either equally among `split_among`, or by explicit per-member `splits`.
//! When `splits` is non-empty it wins, even if `split_among` is also set.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{ExpenseId, GroupId, MemberId};
use super::money::Money;

/// One member's explicit share of an expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Split {
    /// The member who owes this share
    pub member_id: MemberId,

    /// The share amount
    pub amount: Money,
}

impl Split {
    pub fn new(member_id: impl Into<MemberId>, amount: Money) -> Self {
        Self {
            member_id: member_id.into(),
            amount,
        }
    }
}

/// How an expense is divided between members
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitMode {
    /// Divided evenly among `split_among`
    Equal,
    /// Divided by the explicit `splits`
    Custom,
}

impl fmt::Display for SplitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Equal => write!(f, "Equal"),
            Self::Custom => write!(f, "Custom"),
        }
    }
}

/// A shared expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier
    pub id: ExpenseId,

    /// The group this expense belongs to
    pub group_id: GroupId,

    /// What the money was spent on
    #[serde(default)]
    pub description: String,

    /// Total amount paid
    pub amount: Money,

    /// Member who paid
    pub paid_by: MemberId,

    /// Members sharing the amount equally (used when `splits` is empty)
    #[serde(default)]
    pub split_among: Vec<MemberId>,

    /// Explicit per-member shares
    #[serde(default)]
    pub splits: Vec<Split>,

    /// When the expense was recorded
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Expense {
    /// Create an expense split equally among `split_among`
    pub fn equal(
        group_id: GroupId,
        description: impl Into<String>,
        amount: Money,
        paid_by: impl Into<MemberId>,
        split_among: Vec<MemberId>,
    ) -> Self {
        Self {
            id: ExpenseId::new(),
            group_id,
            description: description.into(),
            amount,
            paid_by: paid_by.into(),
            split_among,
            splits: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Create an expense with explicit per-member shares
    pub fn custom(
        group_id: GroupId,
        description: impl Into<String>,
        amount: Money,
        paid_by: impl Into<MemberId>,
        splits: Vec<Split>,
    ) -> Self {
        let split_among = splits.iter().map(|s| s.member_id.clone()).collect();
        Self {
            id: ExpenseId::new(),
            group_id,
            description: description.into(),
            amount,
            paid_by: paid_by.into(),
            split_among,
            splits,
            created_at: Utc::now(),
        }
    }

    /// Which split mode applies to this expense
    pub fn split_mode(&self) -> SplitMode {
        if self.splits.is_empty() {
            SplitMode::Equal
        } else {
            SplitMode::Custom
        }
    }

    pub fn uses_custom_splits(&self) -> bool {
        self.split_mode() == SplitMode::Custom
    }

    /// Sum of the explicit shares
    pub fn splits_total(&self) -> Money {
        self.splits.iter().map(|s| s.amount).sum()
    }

    /// Members whose balance this expense debits, in order
    pub fn participants(&self) -> Vec<&MemberId> {
        match self.split_mode() {
            SplitMode::Custom => self.splits.iter().map(|s| &s.member_id).collect(),
            SplitMode::Equal => self.split_among.iter().collect(),
        }
    }

    /// Validate the expense on its own (group membership is checked by the service)
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.description.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyDescription);
        }

        if !self.amount.is_positive() {
            return Err(ExpenseValidationError::NonPositiveAmount(self.amount));
        }

        if self.amount > Money::MAX_AMOUNT {
            return Err(ExpenseValidationError::AmountTooLarge(self.amount));
        }

        match self.split_mode() {
            SplitMode::Equal => {
                if self.split_among.is_empty() {
                    return Err(ExpenseValidationError::NoParticipants);
                }
            }
            SplitMode::Custom => {
                if let Some(split) = self.splits.iter().find(|s| !s.amount.is_positive()) {
                    return Err(ExpenseValidationError::NonPositiveShare {
                        member_id: split.member_id.clone(),
                        amount: split.amount,
                    });
                }
                if let Some(split) = self.splits.iter().find(|s| s.amount > self.amount) {
                    return Err(ExpenseValidationError::SplitTotalMismatch {
                        expected: self.amount,
                        actual: split.amount,
                    });
                }
                let total = self.splits_total();
                if total != self.amount {
                    return Err(ExpenseValidationError::SplitTotalMismatch {
                        expected: self.amount,
                        actual: total,
                    });
                }
            }
        }

        Ok(())
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.description, self.amount)
    }
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    EmptyDescription,
    NonPositiveAmount(Money),
    AmountTooLarge(Money),
    NoParticipants,
    NonPositiveShare { member_id: MemberId, amount: Money },
    SplitTotalMismatch { expected: Money, actual: Money },
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDescription => write!(f, "Expense description is required"),
            Self::NonPositiveAmount(amount) => {
                write!(f, "Expense amount must be positive (got {})", amount)
            }
            Self::AmountTooLarge(amount) => write!(
                f,
                "Expense amount must be at most {} (got {})",
                Money::MAX_AMOUNT,
                amount
            ),
            Self::NoParticipants => {
                write!(f, "Expense must be split among at least one member")
            }
            Self::NonPositiveShare { member_id, amount } => write!(
                f,
                "Split share for {} must be positive (got {})",
                member_id, amount
            ),
            Self::SplitTotalMismatch { expected, actual } => write!(
                f,
                "Split total must be {}, but it's {}",
                expected, actual
            ),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(names: &[&str]) -> Vec<MemberId> {
        names.iter().map(|n| MemberId::from(*n)).collect()
    }

    #[test]
    fn test_equal_expense() {
        let expense = Expense::equal(
            GroupId::new(),
            "Dinner",
            Money::from_cents(10000),
            "a",
            ids(&["a", "b"]),
        );
        assert_eq!(expense.split_mode(), SplitMode::Equal);
        assert_eq!(expense.participants().len(), 2);
        assert!(expense.validate().is_ok());
    }

    #[test]
    fn test_custom_splits_take_precedence() {
        let mut expense = Expense::custom(
            GroupId::new(),
            "Groceries",
            Money::from_cents(9000),
            "a",
            vec![Split::new("b", Money::from_cents(9000))],
        );
        expense.split_among = ids(&["a", "b", "c"]);

        assert!(expense.uses_custom_splits());
        assert_eq!(expense.participants(), vec![&MemberId::from("b")]);
        assert_eq!(expense.splits_total().cents(), 9000);
    }

    #[test]
    fn test_validation() {
        let mut expense = Expense::equal(GroupId::new(), "Taxi", Money::zero(), "a", ids(&["a"]));
        assert_eq!(
            expense.validate(),
            Err(ExpenseValidationError::NonPositiveAmount(Money::zero()))
        );

        expense.amount = Money::from_cents(500);
        expense.split_among.clear();
        assert_eq!(expense.validate(), Err(ExpenseValidationError::NoParticipants));

        expense.description = " ".into();
        assert_eq!(expense.validate(), Err(ExpenseValidationError::EmptyDescription));
    }

    #[test]
    fn test_non_positive_share_rejected() {
        let expense = Expense::custom(
            GroupId::new(),
            "Rent",
            Money::from_cents(1000),
            "a",
            vec![
                Split::new("a", Money::from_cents(1000)),
                Split::new("b", Money::zero()),
            ],
        );
        assert!(matches!(
            expense.validate(),
            Err(ExpenseValidationError::NonPositiveShare { .. })
        ));
    }

    #[test]
    fn test_split_total_must_match_amount() {
        let expense = Expense::custom(
            GroupId::new(),
            "Cab",
            Money::from_cents(900),
            "a",
            vec![
                Split::new("a", Money::from_cents(300)),
                Split::new("b", Money::from_cents(500)),
            ],
        );
        assert_eq!(
            expense.validate(),
            Err(ExpenseValidationError::SplitTotalMismatch {
                expected: Money::from_cents(900),
                actual: Money::from_cents(800),
            })
        );
    }

    #[test]
    fn test_amount_upper_bound() {
        let mut expense = Expense::equal(
            GroupId::new(),
            "Villa",
            Money::MAX_AMOUNT,
            "a",
            ids(&["a", "b"]),
        );
        assert!(expense.validate().is_ok());

        expense.amount = Money::parse("1000000000000000").unwrap();
        assert_eq!(
            expense.validate(),
            Err(ExpenseValidationError::AmountTooLarge(expense.amount))
        );
    }

    #[test]
    fn test_oversized_share_rejected_before_summing() {
        let expense = Expense::custom(
            GroupId::new(),
            "Rent",
            Money::from_cents(1000),
            "a",
            vec![
                Split::new("a", Money::from_cents(i64::MAX)),
                Split::new("b", Money::from_cents(i64::MAX)),
            ],
        );
        assert!(matches!(
            expense.validate(),
            Err(ExpenseValidationError::SplitTotalMismatch { .. })
        ));
    }

    #[test]
    fn test_deserialize_without_splits() {
        let json = r#"{
            "id": "e1",
            "group_id": "g1",
            "description": "Snacks",
            "amount": 1200,
            "paid_by": "a",
            "split_among": ["a", "b"]
        }"#;
        let expense: Expense = serde_json::from_str(json).unwrap();
        assert!(expense.splits.is_empty());
        assert_eq!(expense.split_mode(), SplitMode::Equal);
    }
}
