//! Report CLI commands
//!
//! `balances`, `settle` and `export` all run the reconciliation engine over a
//! group's stored records; nothing they compute is written back.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use crate::config::settings::Settings;
use crate::display::{format_report, format_settlement, format_warnings};
use crate::error::{LedgerError, LedgerResult};
use crate::export::{export_report, ExportFormat};
use crate::services::{GroupReport, GroupService, LedgerService};
use crate::storage::Storage;

fn load_report(storage: &Storage, settings: &Settings, group: &str) -> LedgerResult<GroupReport> {
    let group = GroupService::new(storage).resolve(group)?;
    LedgerService::with_settings(storage, settings).report(&group.id)
}

/// Handle `balances`: the balance table plus suggested transfers
pub fn handle_balances(storage: &Storage, settings: &Settings, group: &str) -> LedgerResult<()> {
    let report = load_report(storage, settings, group)?;
    print!(
        "{}",
        format_report(&report, &settings.currency_symbol, settings.show_warnings)
    );
    Ok(())
}

/// Handle `settle`: only the suggested transfers, one per line
pub fn handle_settle(storage: &Storage, settings: &Settings, group: &str) -> LedgerResult<()> {
    let report = load_report(storage, settings, group)?;
    print!("{}", format_settlement(&report.plan, &settings.currency_symbol));
    if settings.show_warnings && !report.balances.is_clean() {
        eprint!("{}", format_warnings(report.balances.warnings()));
    }
    Ok(())
}

/// Handle `export`: write the report to a file, or stdout when no path is given
pub fn handle_export(
    storage: &Storage,
    settings: &Settings,
    group: &str,
    format: Option<ExportFormat>,
    output: Option<PathBuf>,
) -> LedgerResult<()> {
    let report = load_report(storage, settings, group)?;
    let format = format.unwrap_or(settings.default_export_format);

    match output {
        Some(path) => {
            let file = File::create(&path).map_err(|e| {
                LedgerError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            let mut writer = BufWriter::new(file);
            export_report(&report, &settings.currency_symbol, format, &mut writer)?;
            writer
                .flush()
                .map_err(|e| LedgerError::Export(e.to_string()))?;

            println!(
                "Exported {} balances for '{}' as {} to: {}",
                report.balances.balances().len(),
                report.group.name,
                format,
                path.display()
            );
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            export_report(&report, &settings.currency_symbol, format, &mut writer)?;
            if format == ExportFormat::Json {
                writeln!(writer).map_err(|e| LedgerError::Export(e.to_string()))?;
            }
        }
    }

    Ok(())
}
