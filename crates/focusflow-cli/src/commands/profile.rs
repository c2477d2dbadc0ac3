//! Student profile commands.

use clap::Subcommand;

use super::{open_store, CommandResult};

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Print the profile as JSON
    Show,
    /// Update name and/or target exam year
    Set {
        #[arg(long)]
        name: Option<String>,
        /// e.g. "2026"
        #[arg(long)]
        target_year: Option<String>,
    },
}

pub fn run(action: ProfileAction) -> CommandResult {
    let (_, mut store) = open_store()?;

    match action {
        ProfileAction::Show => {
            let profile = store.profile();
            println!("{}", serde_json::to_string_pretty(&profile)?);
        }
        ProfileAction::Set { name, target_year } => {
            let mut profile = store.profile();
            let mut changed = false;
            if let Some(name) = name.filter(|n| !n.trim().is_empty()) {
                profile.name = name.trim().to_string();
                changed = true;
            }
            if let Some(year) = target_year.filter(|y| !y.trim().is_empty()) {
                profile.target_exam_year = year.trim().to_string();
                changed = true;
            }
            if changed {
                store.save_profile(&profile)?;
            }
            println!("{}", serde_json::to_string_pretty(&profile)?);
        }
    }
    Ok(())
}
