//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod expense;
pub mod group;
pub mod member;
pub mod payment;
pub mod report;

pub use expense::{handle_expense_command, ExpenseCommands};
pub use group::{handle_group_command, GroupCommands};
pub use member::{handle_member_command, MemberCommands};
pub use payment::{handle_payment_command, handle_settle_up, PaymentCommands};
pub use report::{handle_balances, handle_export, handle_settle};
