//! Group CLI commands
//!
//! Group lifecycle and membership. Commands that act on behalf of a person
//! (`create`, `leave`) take `--as <member>`.

use clap::Subcommand;

use crate::display::{format_group_details, format_group_list};
use crate::error::LedgerResult;
use crate::services::{GroupService, LeaveOutcome, MemberService};
use crate::storage::Storage;

/// Group subcommands
#[derive(Subcommand)]
pub enum GroupCommands {
    /// Create a new group
    Create {
        /// Group name (at most 50 characters)
        name: String,
        /// Member creating the group; they become its first member
        #[arg(long = "as", value_name = "MEMBER")]
        actor: String,
    },
    /// List groups
    List {
        /// Only groups this member belongs to
        #[arg(short, long)]
        member: Option<String>,
    },
    /// Show group details
    Show {
        /// Group name or ID
        group: String,
    },
    /// Rename a group
    Rename {
        /// Group name or ID
        group: String,
        /// New name
        name: String,
    },
    /// Delete a group with its expenses and payments
    Delete {
        /// Group name or ID
        group: String,
    },
    /// Add a member to a group
    Invite {
        /// Group name or ID
        group: String,
        /// Member name, email or ID
        member: String,
    },
    /// Remove a member from a group
    Remove {
        /// Group name or ID
        group: String,
        /// Member name, email or ID
        member: String,
    },
    /// Leave a group (the last member leaving deletes it)
    Leave {
        /// Group name or ID
        group: String,
        /// Member leaving
        #[arg(long = "as", value_name = "MEMBER")]
        actor: String,
    },
}

/// Handle a group command
pub fn handle_group_command(storage: &Storage, cmd: GroupCommands) -> LedgerResult<()> {
    let service = GroupService::new(storage);
    let members = MemberService::new(storage);

    match cmd {
        GroupCommands::Create { name, actor } => {
            let creator = members.resolve(&actor)?;
            let group = service.create(&name, &creator.id)?;
            println!("Created group: {}", group.name);
            println!("  Owner: {}", creator.name);
            println!("  ID: {}", group.id);
        }

        GroupCommands::List { member } => {
            let groups = match member {
                Some(reference) => {
                    let member = members.resolve(&reference)?;
                    service.list_for_member(&member.id)?
                }
                None => service.list()?,
            };
            println!("{}", format_group_list(&groups));
        }

        GroupCommands::Show { group } => {
            let group = service.resolve(&group)?;
            let group_members = service.members(&group)?;
            print!("{}", format_group_details(&group, &group_members));
        }

        GroupCommands::Rename { group, name } => {
            let group = service.resolve(&group)?;
            let old_name = group.name.clone();
            let renamed = service.rename(&group.id, &name)?;
            println!("Renamed group '{}' to '{}'", old_name, renamed.name);
        }

        GroupCommands::Delete { group } => {
            let group = service.resolve(&group)?;
            let deleted = service.delete(&group.id)?;
            println!(
                "Deleted group '{}' ({} expenses, {} payments)",
                group.name, deleted.expenses, deleted.payments
            );
        }

        GroupCommands::Invite { group, member } => {
            let group = service.resolve(&group)?;
            let member = members.resolve(&member)?;
            service.invite(&group.id, &member.id)?;
            println!("Added {} to '{}'", member.name, group.name);
        }

        GroupCommands::Remove { group, member } => {
            let group = service.resolve(&group)?;
            let member = members.resolve(&member)?;
            service.remove(&group.id, &member.id)?;
            println!("Removed {} from '{}'", member.name, group.name);
        }

        GroupCommands::Leave { group, actor } => {
            let group = service.resolve(&group)?;
            let member = members.resolve(&actor)?;
            match service.leave(&group.id, &member.id)? {
                LeaveOutcome::Left(group) => {
                    println!("{} left '{}'", member.name, group.name);
                }
                LeaveOutcome::GroupDeleted(_) => {
                    println!(
                        "{} left '{}'; it had no other members and was deleted",
                        member.name, group.name
                    );
                }
            }
        }
    }

    Ok(())
}
