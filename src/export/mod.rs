//! Export module for splitledger
//!
//! Writes a group's balance report in one of three formats:
//! - JSON: machine-readable report with schema versioning
//! - YAML: the same report, human-readable, with a comment header
//! - CSV: one row per balance, transfer and unresolved amount

pub mod csv;
pub mod json;
pub mod yaml;

use std::fmt;
use std::io::Write;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::LedgerResult;
use crate::services::GroupReport;

pub use self::csv::export_report_csv;
pub use json::{export_report_json, BalanceReport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_report_yaml;

/// Export format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// JSON report
    #[default]
    Json,
    /// YAML report (human-readable)
    Yaml,
    /// CSV rows (spreadsheet-compatible)
    Csv,
}

impl ExportFormat {
    /// Conventional file extension
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
            Self::Csv => "csv",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Write a report in the chosen format
pub fn export_report<W: Write>(
    report: &GroupReport,
    currency_symbol: &str,
    format: ExportFormat,
    writer: &mut W,
) -> LedgerResult<()> {
    match format {
        ExportFormat::Json => export_report_json(report, currency_symbol, writer, true),
        ExportFormat::Yaml => export_report_yaml(report, currency_symbol, writer),
        ExportFormat::Csv => export_report_csv(report, writer),
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_serde_and_display() {
        assert_eq!(ExportFormat::default(), ExportFormat::Json);
        assert_eq!(serde_json::to_string(&ExportFormat::Yaml).unwrap(), "\"yaml\"");
        assert_eq!(ExportFormat::Csv.to_string(), "csv");
        assert_eq!(
            ExportFormat::from_str("yaml", true).unwrap(),
            ExportFormat::Yaml
        );
    }

    #[test]
    fn test_export_dispatch() {
        let report = test_support::sample_report();
        for format in [ExportFormat::Json, ExportFormat::Yaml, ExportFormat::Csv] {
            let mut out = Vec::new();
            export_report(&report, "$", format, &mut out).unwrap();
            assert!(!out.is_empty(), "{} export was empty", format);
        }
    }
}
