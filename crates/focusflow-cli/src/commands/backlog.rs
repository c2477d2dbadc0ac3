//! Backlog management commands.

use clap::Subcommand;
use focusflow_core::dashboard::sorted_newest_first;
use focusflow_core::{BacklogItem, NewBacklogItem, Priority, Subject};

use super::{open_store, CommandResult};

#[derive(Subcommand)]
pub enum BacklogAction {
    /// Add a chapter to the backlog
    Add {
        /// Chapter or topic name
        title: String,
        /// physics, chemistry or maths
        #[arg(long, default_value = "physics")]
        subject: Subject,
        /// high, medium or low
        #[arg(long, default_value = "medium")]
        priority: Priority,
        /// Estimated hours to clear it
        #[arg(long, default_value = "2", allow_negative_numbers = true)]
        hours: f64,
    },
    /// List backlog items, newest first
    List {
        /// Only items not yet completed
        #[arg(long)]
        pending: bool,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Flip an item between pending and completed
    Toggle {
        /// Item ID
        id: String,
    },
    /// Record partial progress on an item
    Progress {
        /// Item ID
        id: String,
        /// Percentage done (values above 100 are clamped)
        percent: u32,
    },
    /// Delete an item
    Delete {
        /// Item ID
        id: String,
    },
}

pub fn run(action: BacklogAction) -> CommandResult {
    let (_, mut store) = open_store()?;

    match action {
        BacklogAction::Add {
            title,
            subject,
            priority,
            hours,
        } => {
            let draft = NewBacklogItem {
                title,
                subject,
                priority,
                estimated_hours: hours,
            };
            match draft.into_item() {
                Some(item) if store.add_backlog_item(item.clone())? => {
                    println!("Backlog item added: {}", item.id);
                }
                _ => println!("nothing added"),
            }
        }
        BacklogAction::List { pending, json } => {
            let items = store.backlog();
            let listed: Vec<&BacklogItem> = sorted_newest_first(&items)
                .into_iter()
                .filter(|i| !pending || i.is_pending())
                .collect();
            if json {
                println!("{}", serde_json::to_string_pretty(&listed)?);
            } else if listed.is_empty() {
                println!("Backlog is empty.");
            } else {
                for item in listed {
                    print_item(item);
                }
            }
        }
        BacklogAction::Toggle { id } => {
            let item = store
                .toggle_backlog_item(&id)?
                .ok_or_else(|| format!("backlog item '{id}' not found"))?;
            let state = if item.is_completed { "completed" } else { "pending" };
            println!("{}: {state}", item.title);
        }
        BacklogAction::Progress { id, percent } => {
            let item = store
                .set_backlog_progress(&id, percent.min(100) as u8)?
                .ok_or_else(|| format!("backlog item '{id}' not found"))?;
            println!("{}: {}%", item.title, item.completed_percentage);
        }
        BacklogAction::Delete { id } => {
            if store.delete_backlog_item(&id)? {
                println!("deleted {id}");
            } else {
                println!("nothing to delete");
            }
        }
    }
    Ok(())
}

fn print_item(item: &BacklogItem) {
    let mark = if item.is_completed { "x" } else { " " };
    println!(
        "[{mark}] {}  {:<9}  {}  ({}, {}h, {}%)",
        item.id,
        item.subject.as_str(),
        item.title,
        item.priority,
        item.estimated_hours,
        item.completed_percentage
    );
}
