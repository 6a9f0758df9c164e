//! Payment CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::format_payment_list;
use crate::error::LedgerResult;
use crate::models::{MemberId, Payment};
use crate::services::{GroupService, MemberService, PaymentService};
use crate::storage::Storage;

use super::expense::parse_amount;

/// Payment subcommands
#[derive(Subcommand)]
pub enum PaymentCommands {
    /// Record money already handed from one member to another
    Add {
        /// Group name or ID
        group: String,
        /// Amount paid
        amount: String,
        /// Member who paid
        #[arg(short, long)]
        from: String,
        /// Member who received the money
        #[arg(short, long)]
        to: String,
        /// Free-text note
        #[arg(short, long)]
        note: Option<String>,
    },
    /// List a group's payments
    List {
        /// Group name or ID
        group: String,
    },
}

/// Handle a payment command
pub fn handle_payment_command(
    storage: &Storage,
    settings: &Settings,
    cmd: PaymentCommands,
) -> LedgerResult<()> {
    match cmd {
        PaymentCommands::Add {
            group,
            amount,
            from,
            to,
            note,
        } => {
            let payment = record(storage, &group, &from, &to, &amount, note.as_deref(), false)?;
            print_payment(storage, settings, &payment)?;
        }

        PaymentCommands::List { group } => {
            let group = GroupService::new(storage).resolve(&group)?;
            let payments = PaymentService::new(storage).list(&group.id)?;
            let everyone = storage.members.get_all()?;
            println!(
                "{}",
                format_payment_list(&payments, &everyone, &settings.currency_symbol)
            );
        }
    }

    Ok(())
}

/// Handle `settle-up`: a payment tagged "Settled up"
pub fn handle_settle_up(
    storage: &Storage,
    settings: &Settings,
    group: &str,
    from: &str,
    to: &str,
    amount: &str,
) -> LedgerResult<()> {
    let payment = record(storage, group, from, to, amount, None, true)?;
    print_payment(storage, settings, &payment)
}

fn record(
    storage: &Storage,
    group: &str,
    from: &str,
    to: &str,
    amount: &str,
    note: Option<&str>,
    settle_up: bool,
) -> LedgerResult<Payment> {
    let members = MemberService::new(storage);
    let group = GroupService::new(storage).resolve(group)?;
    let from = members.resolve(from)?;
    let to = members.resolve(to)?;
    let amount = parse_amount(amount)?;

    let service = PaymentService::new(storage);
    if settle_up {
        service.settle_up(&group.id, &from.id, &to.id, amount)
    } else {
        service.record(&group.id, &from.id, &to.id, amount, note)
    }
}

fn print_payment(storage: &Storage, settings: &Settings, payment: &Payment) -> LedgerResult<()> {
    let name = |id: &MemberId| -> LedgerResult<String> {
        Ok(storage
            .members
            .get(id)?
            .map(|m| m.name)
            .unwrap_or_else(|| id.to_string()))
    };

    println!(
        "Recorded payment: {} paid {} {}",
        name(&payment.from)?,
        name(&payment.to)?,
        payment.amount.format_with_symbol(&settings.currency_symbol)
    );
    if !payment.note.is_empty() {
        println!("  Note: {}", payment.note);
    }
    println!("  ID: {}", payment.id);
    Ok(())
}
