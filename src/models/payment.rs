//! Payment model
//!
//! A payment records money one member already handed to another outside the
//! ledger, reducing what the payer owes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{GroupId, MemberId, PaymentId};
use super::money::Money;

/// Note attached to payments recorded through "settle up"
pub const SETTLE_UP_NOTE: &str = "Settled up";

/// A settlement payment between two members
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    /// Unique identifier
    pub id: PaymentId,

    /// The group this payment belongs to
    pub group_id: GroupId,

    /// Member who handed over the money
    pub from: MemberId,

    /// Member who received it
    pub to: MemberId,

    /// Amount transferred
    pub amount: Money,

    /// Free-text note
    #[serde(default)]
    pub note: String,

    /// When the payment was recorded
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Payment {
    /// Create a new payment
    pub fn new(
        group_id: GroupId,
        from: impl Into<MemberId>,
        to: impl Into<MemberId>,
        amount: Money,
    ) -> Self {
        Self {
            id: PaymentId::new(),
            group_id,
            from: from.into(),
            to: to.into(),
            amount,
            note: String::new(),
            created_at: Utc::now(),
        }
    }

    /// Builder-style note setter
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    /// Validate the payment on its own (group membership is checked by the service)
    pub fn validate(&self) -> Result<(), PaymentValidationError> {
        if !self.amount.is_positive() {
            return Err(PaymentValidationError::NonPositiveAmount(self.amount));
        }

        if self.amount > Money::MAX_AMOUNT {
            return Err(PaymentValidationError::AmountTooLarge(self.amount));
        }

        if self.from == self.to {
            return Err(PaymentValidationError::SelfPayment);
        }

        Ok(())
    }
}

impl fmt::Display for Payment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} {}", self.from, self.to, self.amount)
    }
}

/// Validation errors for payments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentValidationError {
    NonPositiveAmount(Money),
    AmountTooLarge(Money),
    SelfPayment,
}

impl fmt::Display for PaymentValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => {
                write!(f, "Payment amount must be positive (got {})", amount)
            }
            Self::AmountTooLarge(amount) => write!(
                f,
                "Payment amount must be at most {} (got {})",
                Money::MAX_AMOUNT,
                amount
            ),
            Self::SelfPayment => write!(f, "A member cannot pay themselves"),
        }
    }
}

impl std::error::Error for PaymentValidationError {}
