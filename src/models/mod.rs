//! Core data models for splitledger
//!
//! This module contains the data structures of the shared-expense domain:
//! members, groups, expenses with their splits, and settlement payments.

pub mod expense;
pub mod group;
pub mod ids;
pub mod member;
pub mod money;
pub mod payment;

pub use expense::{Expense, Split, SplitMode};
pub use group::Group;
pub use ids::{ExpenseId, GroupId, MemberId, PaymentId};
pub use member::Member;
pub use money::Money;
pub use payment::Payment;
