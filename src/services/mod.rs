//! Service layer for splitledger
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, membership rules, and ledger reports.

pub mod expense;
pub mod group;
pub mod ledger;
pub mod member;
pub mod payment;

pub use expense::{ExpenseService, ExpenseShares};
pub use group::{DeletedGroup, GroupService, LeaveOutcome};
pub use ledger::{GroupReport, LedgerService};
pub use member::MemberService;
pub use payment::PaymentService;
