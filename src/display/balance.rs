//! Balance and settlement display formatting
//!
//! Renders a group report: the per-member balance table, the suggested
//! transfers, and any references the engine had to skip.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::engine::{Balance, LedgerWarning, SettlementPlan};
use crate::models::Money;
use crate::services::GroupReport;

#[derive(Tabled)]
struct BalanceRow {
    #[tabled(rename = "Member")]
    name: String,
    #[tabled(rename = "Balance")]
    balance: String,
    #[tabled(rename = "Status")]
    status: &'static str,
}

/// Describe a balance in words
pub fn balance_status(balance: Money) -> &'static str {
    if balance.is_positive() {
        "gets back"
    } else if balance.is_negative() {
        "owes"
    } else {
        "settled"
    }
}

/// Format balances as a table
pub fn format_balance_table(balances: &[Balance], currency_symbol: &str) -> String {
    if balances.is_empty() {
        return "No members in this group.".to_string();
    }

    let rows: Vec<BalanceRow> = balances
        .iter()
        .map(|b| BalanceRow {
            name: b.name.clone(),
            balance: b.balance.format_with_symbol(currency_symbol),
            status: balance_status(b.balance),
        })
        .collect();

    Table::new(rows)
        .with(Style::psql())
        .with(Modify::new(Columns::single(1)).with(Alignment::right()))
        .to_string()
}

/// Format the settlement plan as one sentence per transfer
pub fn format_settlement(plan: &SettlementPlan, currency_symbol: &str) -> String {
    let mut output = String::new();

    if plan.is_settled() {
        output.push_str("All settled up.\n");
    } else {
        for transfer in &plan.transfers {
            output.push_str(&transfer.describe(currency_symbol));
            output.push('\n');
        }
    }

    if !plan.unresolved.is_empty() {
        output.push('\n');
        output.push_str("Left unmatched (creditor and debtor totals disagree):\n");
        for b in &plan.unresolved {
            output.push_str(&format!(
                "  {:<20} {}\n",
                b.name,
                b.balance.format_with_symbol(currency_symbol)
            ));
        }
    }

    output
}

/// Format skipped-reference warnings
pub fn format_warnings(warnings: &[LedgerWarning]) -> String {
    let mut output = String::new();
    for warning in warnings {
        output.push_str(&format!("warning: {}\n", warning));
    }
    output
}

/// Format a full group report
pub fn format_report(report: &GroupReport, currency_symbol: &str, show_warnings: bool) -> String {
    let mut output = String::new();

    output.push_str(&format!("Balances for {}\n\n", report.group.name));
    output.push_str(&format_balance_table(
        report.balances.balances(),
        currency_symbol,
    ));
    output.push_str("\n\nSettlement\n");
    output.push_str(&format_settlement(&report.plan, currency_symbol));

    if show_warnings && !report.balances.is_clean() {
        output.push('\n');
        output.push_str(&format_warnings(report.balances.warnings()));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{plan_settlement, SettlementTransfer};
    use crate::models::{ExpenseId, MemberId};

    fn balances() -> Vec<Balance> {
        vec![
            Balance::new("a", "Asha", Money::from_cents(6_000)),
            Balance::new("b", "Ben", Money::from_cents(-3_000)),
            Balance::new("c", "Chen", Money::from_cents(-3_000)),
        ]
    }

    #[test]
    fn test_balance_table() {
        let table = format_balance_table(&balances(), "₹");
        assert!(table.contains("Member"));
        assert!(table.contains("Asha"));
        assert!(table.contains("₹60.00"));
        assert!(table.contains("-₹30.00"));
        assert!(table.contains("gets back"));
        assert!(table.contains("owes"));
    }

    #[test]
    fn test_empty_balance_table() {
        assert_eq!(format_balance_table(&[], "$"), "No members in this group.");
    }

    #[test]
    fn test_settlement_lines() {
        let plan = plan_settlement(&balances());
        let text = format_settlement(&plan, "$");
        assert_eq!(text, "Ben owes Asha $30.00\nChen owes Asha $30.00\n");
    }

    #[test]
    fn test_settled_and_unresolved() {
        assert_eq!(
            format_settlement(&SettlementPlan::default(), "$"),
            "All settled up.\n"
        );

        let plan = SettlementPlan {
            transfers: vec![SettlementTransfer {
                debtor_id: MemberId::from("b"),
                debtor_name: "Ben".into(),
                creditor_id: MemberId::from("a"),
                creditor_name: "Asha".into(),
                amount: Money::from_cents(1_000),
            }],
            unresolved: vec![Balance::new("a", "Asha", Money::from_cents(500))],
        };
        let text = format_settlement(&plan, "$");
        assert!(text.contains("Ben owes Asha $10.00"));
        assert!(text.contains("Left unmatched"));
        assert!(text.contains("$5.00"));
    }

    #[test]
    fn test_warnings() {
        let text = format_warnings(&[LedgerWarning::EmptySplit {
            expense_id: ExpenseId::from("e1"),
        }]);
        assert!(text.starts_with("warning: expense e1"));
    }
}
