//! Expense and payment display formatting
//!
//! Member ids are shown by name when the member is known, otherwise by id.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::models::{Expense, Member, MemberId, Payment, SplitMode};

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Paid by")]
    paid_by: String,
    #[tabled(rename = "Split")]
    split: String,
}

#[derive(Tabled)]
struct PaymentRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "From")]
    from: String,
    #[tabled(rename = "To")]
    to: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Note")]
    note: String,
}

fn name_of(members: &[Member], id: &MemberId) -> String {
    members
        .iter()
        .find(|m| &m.id == id)
        .map(|m| m.name.clone())
        .unwrap_or_else(|| id.to_string())
}

fn describe_split(expense: &Expense, members: &[Member], currency_symbol: &str) -> String {
    match expense.split_mode() {
        SplitMode::Equal => {
            let names: Vec<String> = expense
                .split_among
                .iter()
                .map(|id| name_of(members, id))
                .collect();
            format!("equal: {}", names.join(", "))
        }
        SplitMode::Custom => {
            let shares: Vec<String> = expense
                .splits
                .iter()
                .map(|s| {
                    format!(
                        "{} {}",
                        name_of(members, &s.member_id),
                        s.amount.format_with_symbol(currency_symbol)
                    )
                })
                .collect();
            shares.join(", ")
        }
    }
}

/// Format a group's expenses as a table
pub fn format_expense_list(expenses: &[Expense], members: &[Member], currency_symbol: &str) -> String {
    if expenses.is_empty() {
        return "No expenses recorded.".to_string();
    }

    let rows: Vec<ExpenseRow> = expenses
        .iter()
        .map(|e| ExpenseRow {
            id: e.id.short(),
            date: e.created_at.format("%Y-%m-%d").to_string(),
            description: e.description.clone(),
            amount: e.amount.format_with_symbol(currency_symbol),
            paid_by: name_of(members, &e.paid_by),
            split: describe_split(e, members, currency_symbol),
        })
        .collect();

    Table::new(rows)
        .with(Style::psql())
        .with(Modify::new(Columns::single(3)).with(Alignment::right()))
        .to_string()
}

/// Format a group's payments as a table
pub fn format_payment_list(payments: &[Payment], members: &[Member], currency_symbol: &str) -> String {
    if payments.is_empty() {
        return "No payments recorded.".to_string();
    }

    let rows: Vec<PaymentRow> = payments
        .iter()
        .map(|p| PaymentRow {
            id: p.id.short(),
            date: p.created_at.format("%Y-%m-%d").to_string(),
            from: name_of(members, &p.from),
            to: name_of(members, &p.to),
            amount: p.amount.format_with_symbol(currency_symbol),
            note: p.note.clone(),
        })
        .collect();

    Table::new(rows)
        .with(Style::psql())
        .with(Modify::new(Columns::single(4)).with(Alignment::right()))
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GroupId, Money, Split};

    fn members() -> Vec<Member> {
        vec![Member::with_id("a", "Asha"), Member::with_id("b", "Ben")]
    }

    #[test]
    fn test_expense_list() {
        let equal = Expense::equal(
            GroupId::from("g"),
            "Dinner",
            Money::from_cents(10_000),
            "a",
            vec![MemberId::from("a"), MemberId::from("b")],
        );
        let custom = Expense::custom(
            GroupId::from("g"),
            "Cab",
            Money::from_cents(900),
            "b",
            vec![
                Split::new("a", Money::from_cents(300)),
                Split::new("x", Money::from_cents(600)),
            ],
        );

        let table = format_expense_list(&[equal, custom], &members(), "$");
        assert!(table.contains("Dinner"));
        assert!(table.contains("$100.00"));
        assert!(table.contains("equal: Asha, Ben"));
        assert!(table.contains("Asha $3.00, x $6.00"));
    }

    #[test]
    fn test_payment_list() {
        let payment = Payment::new(GroupId::from("g"), "b", "a", Money::from_cents(5_000))
            .with_note("Settled up");
        let table = format_payment_list(&[payment], &members(), "₹");
        assert!(table.contains("Ben"));
        assert!(table.contains("₹50.00"));
        assert!(table.contains("Settled up"));
    }

    #[test]
    fn test_empty_lists() {
        assert_eq!(format_expense_list(&[], &[], "$"), "No expenses recorded.");
        assert_eq!(format_payment_list(&[], &[], "$"), "No payments recorded.");
    }
}
