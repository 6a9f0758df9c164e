//! Payment service
//!
//! Records money members have already handed each other, including the
//! "settle up" shortcut that tags the payment with a fixed note.

use tracing::info;

use crate::error::{LedgerError, LedgerResult};
use crate::models::payment::SETTLE_UP_NOTE;
use crate::models::{GroupId, MemberId, Money, Payment};
use crate::storage::Storage;

/// Service for settlement payments
pub struct PaymentService<'a> {
    storage: &'a Storage,
}

impl<'a> PaymentService<'a> {
    /// Create a new payment service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Record a payment from one group member to another
    pub fn record(
        &self,
        group_id: &GroupId,
        from: &MemberId,
        to: &MemberId,
        amount: Money,
        note: Option<&str>,
    ) -> LedgerResult<Payment> {
        let group = self
            .storage
            .groups
            .get(group_id)?
            .ok_or_else(|| LedgerError::group_not_found(group_id.to_string()))?;

        let payment = Payment::new(group.id.clone(), from.clone(), to.clone(), amount)
            .with_note(note.map(str::trim).unwrap_or_default());
        payment
            .validate()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

        for member in [from, to] {
            if !group.has_member(member) {
                return Err(LedgerError::Membership(format!(
                    "{} is not a member of '{}'",
                    member, group.name
                )));
            }
        }

        self.storage.payments.upsert(payment.clone())?;
        self.storage.payments.save()?;

        info!(
            payment = %payment.id,
            group = %group.id,
            from = %payment.from,
            to = %payment.to,
            amount = %payment.amount,
            "payment recorded"
        );
        Ok(payment)
    }

    /// Record a payment with the standard "Settled up" note
    pub fn settle_up(
        &self,
        group_id: &GroupId,
        from: &MemberId,
        to: &MemberId,
        amount: Money,
    ) -> LedgerResult<Payment> {
        self.record(group_id, from, to, amount, Some(SETTLE_UP_NOTE))
    }

    /// Payments of a group, oldest first
    pub fn list(&self, group_id: &GroupId) -> LedgerResult<Vec<Payment>> {
        self.storage.payments.get_by_group(group_id)
    }
}
