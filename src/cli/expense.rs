//! Expense CLI commands
//!
//! Expenses are split equally by default. `--among` narrows the equal
//! split; `--split name=amount` (repeatable) switches to custom shares.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::format_expense_list;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Money, Split};
use crate::services::{ExpenseService, ExpenseShares, GroupService, MemberService};
use crate::storage::Storage;

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record a shared expense
    Add {
        /// Group name or ID
        group: String,
        /// What the money was spent on
        description: String,
        /// Amount (e.g., "90", "12.50")
        amount: String,
        /// Member who paid
        #[arg(short, long)]
        paid_by: String,
        /// Members to split equally among (default: everyone in the group)
        #[arg(short, long, num_args = 1.., conflicts_with = "split")]
        among: Vec<String>,
        /// Custom share as MEMBER=AMOUNT; repeat for each member
        #[arg(short, long, value_name = "MEMBER=AMOUNT")]
        split: Vec<String>,
    },
    /// List a group's expenses
    List {
        /// Group name or ID
        group: String,
    },
    /// Delete an expense
    Delete {
        /// Expense ID (full or short)
        id: String,
    },
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> LedgerResult<()> {
    let service = ExpenseService::new(storage);
    let groups = GroupService::new(storage);
    let members = MemberService::new(storage);

    match cmd {
        ExpenseCommands::Add {
            group,
            description,
            amount,
            paid_by,
            among,
            split,
        } => {
            let group = groups.resolve(&group)?;
            let amount = parse_amount(&amount)?;
            let payer = members.resolve(&paid_by)?;

            let shares = if split.is_empty() {
                let among = members
                    .resolve_all(&among)?
                    .into_iter()
                    .map(|m| m.id)
                    .collect();
                ExpenseShares::Equal(among)
            } else {
                ExpenseShares::Custom(parse_splits(&members, &split)?)
            };

            let expense = service.add(&group.id, &description, amount, &payer.id, shares)?;

            println!(
                "Recorded expense: {} {}",
                expense.description,
                expense.amount.format_with_symbol(&settings.currency_symbol)
            );
            println!("  Paid by: {}", payer.name);
            println!(
                "  Split:   {} ({} members)",
                expense.split_mode(),
                expense.participants().len()
            );
            println!("  ID: {}", expense.id);
        }

        ExpenseCommands::List { group } => {
            let group = groups.resolve(&group)?;
            let expenses = service.list(&group.id)?;
            // Former members still show by name
            let everyone = storage.members.get_all()?;
            println!(
                "{}",
                format_expense_list(&expenses, &everyone, &settings.currency_symbol)
            );
        }

        ExpenseCommands::Delete { id } => {
            let expense = service.resolve(&id)?;
            service.delete(&expense.id)?;
            println!(
                "Deleted expense: {} {}",
                expense.description,
                expense.amount.format_with_symbol(&settings.currency_symbol)
            );
        }
    }

    Ok(())
}

/// Parse a user-entered amount
pub(crate) fn parse_amount(input: &str) -> LedgerResult<Money> {
    Money::parse(input).map_err(|e| {
        LedgerError::Validation(format!(
            "Invalid amount: '{}'. Use format like '12.50' or '12'. Error: {}",
            input, e
        ))
    })
}

fn parse_splits(members: &MemberService<'_>, raw: &[String]) -> LedgerResult<Vec<Split>> {
    raw.iter()
        .map(|entry| {
            let (who, amount) = entry.rsplit_once('=').ok_or_else(|| {
                LedgerError::Validation(format!(
                    "Invalid split '{}': expected MEMBER=AMOUNT",
                    entry
                ))
            })?;
            let member = members.resolve(who)?;
            Ok(Split::new(member.id, parse_amount(amount)?))
        })
        .collect()
}
