//! YAML Export functionality
//!
//! Exports a group's balance report to YAML for human reading.

use std::io::Write;

use crate::error::{LedgerError, LedgerResult};
use crate::export::json::BalanceReport;
use crate::services::GroupReport;

/// Export a group report to YAML
pub fn export_report_yaml<W: Write>(
    report: &GroupReport,
    currency_symbol: &str,
    writer: &mut W,
) -> LedgerResult<()> {
    let export = BalanceReport::from_report(report, currency_symbol);

    let header = format!(
        "# splitledger balance report\n# Group: {}\n# Generated: {}\n# App Version: {}\n\n",
        export.group_name, export.exported_at, export.app_version
    );
    writer
        .write_all(header.as_bytes())
        .map_err(|e| LedgerError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export).map_err(|e| LedgerError::Export(e.to_string()))?;

    Ok(())
}
