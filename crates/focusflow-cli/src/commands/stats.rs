use chrono::Utc;
use focusflow_core::dashboard::{motivational_quote, urgent_items};
use focusflow_core::{BacklogItem, BacklogSummary, SessionStats, UserProfile};
use serde::Serialize;

use super::{open_store, CommandResult};

const URGENT_LIMIT: usize = 3;

#[derive(Serialize)]
struct Dashboard<'a> {
    profile: UserProfile,
    backlog: BacklogSummary,
    sessions: SessionStats,
    urgent: Vec<&'a BacklogItem>,
    quote: &'static str,
}

pub fn run(json: bool) -> CommandResult {
    let (_, store) = open_store()?;
    let items = store.backlog();
    let sessions = store.sessions();

    let dashboard = Dashboard {
        profile: store.profile(),
        backlog: BacklogSummary::from_items(&items),
        sessions: SessionStats::from_sessions(&sessions, Utc::now()),
        urgent: urgent_items(&items, URGENT_LIMIT),
        quote: motivational_quote(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&dashboard)?);
        return Ok(());
    }

    let Dashboard {
        profile,
        backlog,
        sessions,
        urgent,
        quote,
    } = dashboard;

    println!("Hi {}! Target: JEE {}", profile.name, profile.target_exam_year);
    println!("\"{quote}\"");
    println!();
    println!("Streak:          {} sessions", profile.streak);
    println!(
        "Today:           {} sessions, {} min",
        sessions.today_sessions, sessions.today_focus_min
    );
    println!(
        "All time:        {} sessions, {} min",
        sessions.total_sessions, sessions.total_focus_min
    );
    println!(
        "Backlog health:  {}% ({} pending, {} completed)",
        backlog.health_percent, backlog.pending, backlog.completed
    );
    for s in &backlog.by_subject {
        println!("  {:<10} {}/{} ({}%)", s.subject.as_str(), s.completed, s.total, s.percent);
    }

    println!();
    if urgent.is_empty() {
        println!("No urgent backlogs. Great job!");
    } else {
        println!("Urgent:");
        for item in urgent {
            println!("  {} ({}, {}h)", item.title, item.subject, item.estimated_hours);
        }
    }
    Ok(())
}
