//! CSV Export functionality
//!
//! Flattens a group report into rows: every balance, every suggested
//! transfer, and any amount the settlement left unmatched.

use std::io::Write;

use serde::Serialize;

use crate::engine::Balance;
use crate::error::{LedgerError, LedgerResult};
use crate::services::GroupReport;

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    kind: &'static str,
    group: &'a str,
    member_id: &'a str,
    member: &'a str,
    counterparty_id: &'a str,
    counterparty: &'a str,
    amount: String,
}

impl<'a> CsvRow<'a> {
    fn balance(kind: &'static str, group: &'a str, balance: &'a Balance) -> Self {
        Self {
            kind,
            group,
            member_id: balance.member_id.as_str(),
            member: &balance.name,
            counterparty_id: "",
            counterparty: "",
            amount: balance.balance.to_decimal_string(),
        }
    }
}

/// Export a group report to CSV
pub fn export_report_csv<W: Write>(report: &GroupReport, writer: &mut W) -> LedgerResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    let group = report.group.name.as_str();

    for balance in report.balances.balances() {
        csv_writer.serialize(CsvRow::balance("balance", group, balance))?;
    }

    for transfer in &report.plan.transfers {
        csv_writer.serialize(CsvRow {
            kind: "transfer",
            group,
            member_id: transfer.debtor_id.as_str(),
            member: &transfer.debtor_name,
            counterparty_id: transfer.creditor_id.as_str(),
            counterparty: &transfer.creditor_name,
            amount: transfer.amount.to_decimal_string(),
        })?;
    }

    for balance in &report.plan.unresolved {
        csv_writer.serialize(CsvRow::balance("unresolved", group, balance))?;
    }

    csv_writer
        .flush()
        .map_err(|e| LedgerError::Export(e.to_string()))?;

    Ok(())
}
