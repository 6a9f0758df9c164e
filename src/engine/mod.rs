//! Ledger reconciliation engine
//!
//! Pure, synchronous functions that turn a snapshot of a group (members,
//! expenses, payments) into net balances and a settlement plan. Nothing here
//! performs I/O or keeps state between calls, so concurrent callers need no
//! coordination.
//!
//! ```
//! use splitledger::engine::{compute_balances, plan_settlement};
//! use splitledger::models::{Expense, GroupId, Member, MemberId, Money};
//!
//! let members = vec![Member::with_id("a", "Asha"), Member::with_id("b", "Ben")];
//! let dinner = Expense::equal(
//!     GroupId::from("trip"),
//!     "Dinner",
//!     Money::from_cents(10_000),
//!     "a",
//!     vec![MemberId::from("a"), MemberId::from("b")],
//! );
//!
//! let sheet = compute_balances(&members, &[dinner], &[]);
//! let plan = plan_settlement(sheet.balances());
//! assert_eq!(plan.transfers[0].to_string(), "Ben owes Asha ₹50.00");
//! ```

pub mod balances;
mod micros;
pub mod settlement;

pub use balances::{
    compute_balances, tally_expenses, Balance, BalanceSheet, LedgerWarning, PaymentSide,
};
pub use settlement::{plan_settlement, SettlementPlan, SettlementTransfer, SETTLED_THRESHOLD};
