//! Group and member display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{Group, Member};

#[derive(Tabled)]
struct MemberRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
}

#[derive(Tabled)]
struct GroupRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Members")]
    members: usize,
    #[tabled(rename = "Created")]
    created: String,
}

/// Format a list of members as a table
pub fn format_member_list(members: &[Member]) -> String {
    if members.is_empty() {
        return "No members found.".to_string();
    }

    let rows: Vec<MemberRow> = members
        .iter()
        .map(|m| MemberRow {
            id: m.id.short(),
            name: m.name.clone(),
            email: m.email.clone().unwrap_or_default(),
        })
        .collect();

    Table::new(rows).with(Style::psql()).to_string()
}

/// Format a list of groups as a table
pub fn format_group_list(groups: &[Group]) -> String {
    if groups.is_empty() {
        return "No groups found.".to_string();
    }

    let rows: Vec<GroupRow> = groups
        .iter()
        .map(|g| GroupRow {
            id: g.id.short(),
            name: g.name.clone(),
            members: g.members.len(),
            created: g.created_at.format("%Y-%m-%d").to_string(),
        })
        .collect();

    Table::new(rows).with(Style::psql()).to_string()
}

/// Format a single group's details with its members in membership order
pub fn format_group_details(group: &Group, members: &[Member]) -> String {
    let mut output = String::new();

    output.push_str(&format!("Group: {}\n", group.name));
    output.push_str(&format!("  ID:       {}\n", group.id));
    output.push_str(&format!(
        "  Created:  {}\n",
        group.created_at.format("%Y-%m-%d %H:%M")
    ));
    if let Some(creator) = &group.created_by {
        let name = members
            .iter()
            .find(|m| &m.id == creator)
            .map(|m| m.name.as_str())
            .unwrap_or("(former member)");
        output.push_str(&format!("  Owner:    {}\n", name));
    }
    output.push('\n');
    output.push_str(&format!("  Members ({}):\n", group.members.len()));

    for id in &group.members {
        match members.iter().find(|m| &m.id == id) {
            Some(member) => match &member.email {
                Some(email) => output.push_str(&format!("    {} <{}>\n", member.name, email)),
                None => output.push_str(&format!("    {}\n", member.name)),
            },
            None => output.push_str(&format!("    {} (unknown)\n", id)),
        }
    }

    output
}
