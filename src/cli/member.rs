//! Member CLI commands

use clap::Subcommand;

use crate::display::format_member_list;
use crate::error::LedgerResult;
use crate::services::{GroupService, MemberService};
use crate::storage::Storage;

/// Member subcommands
#[derive(Subcommand)]
pub enum MemberCommands {
    /// Add a new member
    Add {
        /// Display name
        name: String,
        /// Contact email
        #[arg(short, long)]
        email: Option<String>,
    },
    /// List all members
    List,
    /// Show a member and the groups they belong to
    Show {
        /// Member name, email or ID
        member: String,
    },
}

/// Handle a member command
pub fn handle_member_command(storage: &Storage, cmd: MemberCommands) -> LedgerResult<()> {
    let service = MemberService::new(storage);

    match cmd {
        MemberCommands::Add { name, email } => {
            let member = service.create(&name, email.as_deref())?;
            println!("Added member: {}", member.name);
            if let Some(email) = &member.email {
                println!("  Email: {}", email);
            }
            println!("  ID: {}", member.id);
        }

        MemberCommands::List => {
            let members = service.list()?;
            println!("{}", format_member_list(&members));
        }

        MemberCommands::Show { member } => {
            let member = service.resolve(&member)?;
            let groups = GroupService::new(storage).list_for_member(&member.id)?;

            println!("Member: {}", member.name);
            println!("  ID:     {}", member.id);
            if let Some(email) = &member.email {
                println!("  Email:  {}", email);
            }
            if groups.is_empty() {
                println!("  Groups: (none)");
            } else {
                let names: Vec<&str> = groups.iter().map(|g| g.name.as_str()).collect();
                println!("  Groups: {}", names.join(", "));
            }
        }
    }

    Ok(())
}
