use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use splitledger::cli::{
    handle_balances, handle_expense_command, handle_export, handle_group_command,
    handle_member_command, handle_payment_command, handle_settle, handle_settle_up,
    ExpenseCommands, GroupCommands, MemberCommands, PaymentCommands,
};
use splitledger::config::{paths::LedgerPaths, settings::Settings};
use splitledger::export::ExportFormat;
use splitledger::storage::Storage;

#[derive(Parser)]
#[command(
    name = "splitledger",
    version,
    about = "Split shared expenses within groups and settle up",
    long_about = "splitledger tracks shared expenses for groups of people. Log who paid \
                  for what and who shares it, record payments between members, and \
                  get each member's balance plus the transfers that settle everyone up."
)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Member management commands
    #[command(subcommand)]
    Member(MemberCommands),

    /// Group management commands
    #[command(subcommand)]
    Group(GroupCommands),

    /// Expense commands
    #[command(subcommand, alias = "exp")]
    Expense(ExpenseCommands),

    /// Payment commands
    #[command(subcommand)]
    Payment(PaymentCommands),

    /// Record a "Settled up" payment
    SettleUp {
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
    },

    /// Show every member's balance and the suggested transfers
    #[command(alias = "bal")]
    Balances {
        /// Group name or ID
        group: String,
    },

    /// Show only the suggested transfers
    Settle {
        /// Group name or ID
        group: String,
    },

    /// Export a group's balance report
    Export {
        /// Group name or ID
        group: String,
        /// Export format (defaults to the configured format)
        #[arg(short, long, value_enum)]
        format: Option<ExportFormat>,
        /// Output file path (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Initialize the data directory
    Init,

    /// Show current configuration and paths, optionally changing settings
    Config {
        /// Currency symbol used in output
        #[arg(long)]
        currency: Option<String>,
        /// Fail reports that reference non-members
        #[arg(long)]
        strict_references: Option<bool>,
        /// Print skipped-reference warnings under reports
        #[arg(long)]
        show_warnings: Option<bool>,
        /// Default export format
        #[arg(long, value_enum)]
        export_format: Option<ExportFormat>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    splitledger::logging::init(cli.verbose);

    // Initialize paths and settings
    let paths = LedgerPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Member(cmd)) => handle_member_command(&storage, cmd)?,
        Some(Commands::Group(cmd)) => handle_group_command(&storage, cmd)?,
        Some(Commands::Expense(cmd)) => handle_expense_command(&storage, &settings, cmd)?,
        Some(Commands::Payment(cmd)) => handle_payment_command(&storage, &settings, cmd)?,
        Some(Commands::SettleUp {
            group,
            amount,
            from,
            to,
        }) => handle_settle_up(&storage, &settings, &group, &from, &to, &amount)?,
        Some(Commands::Balances { group }) => handle_balances(&storage, &settings, &group)?,
        Some(Commands::Settle { group }) => handle_settle(&storage, &settings, &group)?,
        Some(Commands::Export {
            group,
            format,
            output,
        }) => handle_export(&storage, &settings, &group, format, output)?,
        Some(Commands::Init) => {
            println!("Initializing splitledger at: {}", paths.base_dir().display());
            storage.save_all()?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Next steps:");
            println!("  splitledger member add <name>");
            println!("  splitledger group create <name> --as <member>");
        }
        Some(Commands::Config {
            currency,
            strict_references,
            show_warnings,
            export_format,
        }) => {
            let mut changed = false;
            if let Some(symbol) = currency {
                settings.currency_symbol = symbol;
                changed = true;
            }
            if let Some(strict) = strict_references {
                settings.strict_references = strict;
                changed = true;
            }
            if let Some(show) = show_warnings {
                settings.show_warnings = show;
                changed = true;
            }
            if let Some(format) = export_format {
                settings.default_export_format = format;
                changed = true;
            }
            if changed {
                settings.save(&paths)?;
            }

            println!("splitledger Configuration");
            println!("=========================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:   {}", settings.currency_symbol);
            println!("  Strict references: {}", settings.strict_references);
            println!("  Show warnings:     {}", settings.show_warnings);
            println!("  Export format:     {}", settings.default_export_format);
        }
        None => {
            println!("splitledger - shared expenses for groups");
            println!();
            println!("Run 'splitledger --help' for usage information.");
        }
    }

    Ok(())
}
