use clap::Subcommand;
use focusflow_core::timer::format_clock;

use super::{open_store, CommandResult};

#[derive(Subcommand)]
pub enum SessionAction {
    /// List logged sessions in the order they were recorded
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: SessionAction) -> CommandResult {
    let (_, store) = open_store()?;

    match action {
        SessionAction::List { json } => {
            let sessions = store.sessions();
            if json {
                println!("{}", serde_json::to_string_pretty(&sessions)?);
            } else if sessions.is_empty() {
                println!("No sessions yet.");
            } else {
                for s in &sessions {
                    println!(
                        "{}  {:?}  {}",
                        s.start_time.format("%Y-%m-%d %H:%M"),
                        s.kind,
                        format_clock(s.duration_seconds)
                    );
                }
            }
        }
    }
    Ok(())
}
