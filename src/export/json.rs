//! JSON Export functionality
//!
//! Exports a group's balance report to JSON with schema versioning.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

use crate::engine::{Balance, SettlementTransfer};
use crate::error::{LedgerError, LedgerResult};
use crate::services::GroupReport;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Balance report export structure
#[derive(Debug, Clone, Serialize)]
pub struct BalanceReport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub group_id: String,
    pub group_name: String,
    pub currency_symbol: String,

    /// One entry per member, in membership order
    pub balances: Vec<BalanceEntry>,

    /// Suggested transfers, in the order they were matched
    pub settlements: Vec<TransferEntry>,

    /// Amounts left over when creditor and debtor totals disagree
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unresolved: Vec<BalanceEntry>,

    /// References skipped while computing balances
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// A member's balance in an export
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BalanceEntry {
    pub member_id: String,
    pub name: String,
    /// Signed amount in cents
    pub cents: i64,
    /// Signed decimal amount ("-12.50")
    pub amount: String,
}

/// A suggested transfer in an export
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferEntry {
    pub from_id: String,
    pub from: String,
    pub to_id: String,
    pub to: String,
    pub cents: i64,
    pub amount: String,
    /// "Ben owes Asha $30.00"
    pub text: String,
}

impl BalanceEntry {
    fn from_balance(balance: &Balance) -> Self {
        Self {
            member_id: balance.member_id.to_string(),
            name: balance.name.clone(),
            cents: balance.balance.cents(),
            amount: balance.balance.to_decimal_string(),
        }
    }
}

impl TransferEntry {
    fn from_transfer(transfer: &SettlementTransfer, currency_symbol: &str) -> Self {
        Self {
            from_id: transfer.debtor_id.to_string(),
            from: transfer.debtor_name.clone(),
            to_id: transfer.creditor_id.to_string(),
            to: transfer.creditor_name.clone(),
            cents: transfer.amount.cents(),
            amount: transfer.amount.to_decimal_string(),
            text: transfer.describe(currency_symbol),
        }
    }
}

impl BalanceReport {
    /// Build an export from a computed group report
    pub fn from_report(report: &GroupReport, currency_symbol: &str) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            group_id: report.group.id.to_string(),
            group_name: report.group.name.clone(),
            currency_symbol: currency_symbol.to_string(),
            balances: report
                .balances
                .balances()
                .iter()
                .map(BalanceEntry::from_balance)
                .collect(),
            settlements: report
                .plan
                .transfers
                .iter()
                .map(|t| TransferEntry::from_transfer(t, currency_symbol))
                .collect(),
            unresolved: report
                .plan
                .unresolved
                .iter()
                .map(BalanceEntry::from_balance)
                .collect(),
            warnings: report
                .balances
                .warnings()
                .iter()
                .map(|w| w.to_string())
                .collect(),
        }
    }
}

/// Export a group report to JSON
pub fn export_report_json<W: Write>(
    report: &GroupReport,
    currency_symbol: &str,
    writer: &mut W,
    pretty: bool,
) -> LedgerResult<()> {
    let export = BalanceReport::from_report(report, currency_symbol);

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| LedgerError::Export(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::test_support::sample_report;

    #[test]
    fn test_json_export() {
        let report = sample_report();
        let mut output = Vec::new();
        export_report_json(&report, "$", &mut output, true).unwrap();

        let json_str = String::from_utf8(output).unwrap();
        assert!(json_str.contains("\"schema_version\""));
        assert!(json_str.contains("\"group_name\": \"Trip, 2024\""));

        let json: serde_json::Value = serde_json::from_str(&json_str).unwrap();
        assert_eq!(json["schema_version"], EXPORT_SCHEMA_VERSION);
        let cents: Vec<i64> = json["balances"]
            .as_array()
            .unwrap()
            .iter()
            .map(|b| b["cents"].as_i64().unwrap())
            .collect();
        assert_eq!(cents, vec![5_000, -2_000, -2_500]);
        assert_eq!(json["balances"][1]["amount"], "-20.00");

        assert_eq!(json["settlements"][0]["text"], "Ben owes Asha $20.00");
        assert_eq!(json["settlements"][1]["text"], "Chen owes Asha $25.00");
        assert_eq!(json["settlements"][1]["from_id"], "c");

        assert_eq!(json["unresolved"][0]["cents"], 500);
        assert_eq!(json["warnings"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_compact_export_omits_empty_sections() {
        let mut report = sample_report();
        report.plan.unresolved.clear();
        let mut output = Vec::new();
        export_report_json(&report, "$", &mut output, false).unwrap();

        let json_str = String::from_utf8(output).unwrap();
        assert!(!json_str.contains('\n'));
        assert!(!json_str.contains("\"unresolved\""));
    }
}
