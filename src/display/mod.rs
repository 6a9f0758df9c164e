//! Display formatting for terminal output
//!
//! Provides utilities for formatting data models and ledger reports as
//! terminal tables.

pub mod activity;
pub mod balance;
pub mod group;

pub use activity::{format_expense_list, format_payment_list};
pub use balance::{
    balance_status, format_balance_table, format_report, format_settlement, format_warnings,
};
pub use group::{format_group_details, format_group_list, format_member_list};
