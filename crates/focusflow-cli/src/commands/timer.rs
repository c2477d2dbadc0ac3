use std::io::Write;

use clap::Subcommand;
use focusflow_core::timer::format_clock;
use focusflow_core::{Config, Event, FocusTimer, SessionRecorder, TimerEngine, TimerMode};
use tokio::io::{AsyncBufReadExt, BufReader};

use super::{open_store, runtime, CommandResult};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Run a live countdown in the terminal
    ///
    /// Type a command and press Enter: p (start/pause), r (reset),
    /// 1/2/3 (focus, short break, long break), q (quit).
    Run {
        /// pomodoro, short-break or long-break
        #[arg(long, default_value = "pomodoro")]
        mode: TimerMode,
        /// Print every event as a JSON line instead of a live clock
        #[arg(long)]
        json: bool,
    },
    /// Print the configured mode presets as JSON
    Modes,
}

pub fn run(action: TimerAction) -> CommandResult {
    match action {
        TimerAction::Run { mode, json } => run_live(mode, json),
        TimerAction::Modes => {
            let presets = Config::load()?.presets();
            let modes: Vec<serde_json::Value> = TimerMode::ALL
                .iter()
                .map(|&mode| {
                    serde_json::json!({
                        "mode": mode,
                        "label": mode.label(),
                        "duration_secs": presets.duration_secs(mode),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&modes)?);
            Ok(())
        }
    }
}

fn run_live(mode: TimerMode, json: bool) -> CommandResult {
    let (config, store) = open_store()?;
    let recorder = SessionRecorder::new(store);
    let mut engine = TimerEngine::new(config.presets(), Box::new(recorder));
    engine.change_mode(mode);

    let rt = runtime()?;
    let result = rt.block_on(drive(engine, json));
    // A pending stdin read would otherwise keep the runtime alive.
    rt.shutdown_background();
    result
}

async fn drive(engine: TimerEngine, json: bool) -> CommandResult {
    let (mut timer, mut events) = FocusTimer::new(engine);
    let out = Output { json };

    out.show(&timer.snapshot())?;
    if let Some(event) = timer.start() {
        out.show(&event)?;
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            event = events.recv() => {
                let Some(event) = event else { break };
                out.show(&event)?;
                if matches!(event, Event::TimerCompleted { .. }) {
                    break;
                }
            }
            line = lines.next_line(), if stdin_open => {
                let Some(line) = line? else {
                    stdin_open = false;
                    continue;
                };
                let event = match line.trim() {
                    "p" => timer.toggle(),
                    "r" => Some(timer.reset()),
                    "1" => Some(timer.change_mode(TimerMode::Pomodoro)),
                    "2" => Some(timer.change_mode(TimerMode::ShortBreak)),
                    "3" => Some(timer.change_mode(TimerMode::LongBreak)),
                    "q" => break,
                    "" => None,
                    other => {
                        eprintln!("unknown command '{other}' (p, r, 1, 2, 3, q)");
                        None
                    }
                };
                if let Some(event) = event {
                    out.show(&event)?;
                }
            }
            _ = &mut ctrl_c => {
                tracing::debug!("interrupted");
                break;
            }
        }
    }

    if !out.json {
        println!();
    }
    Ok(())
}

struct Output {
    json: bool,
}

impl Output {
    fn show(&self, event: &Event) -> CommandResult {
        if self.json {
            println!("{}", serde_json::to_string(event)?);
            return Ok(());
        }

        let mut stdout = std::io::stdout().lock();
        match event {
            Event::TimerTicked {
                mode,
                remaining_secs,
                ..
            } => {
                write!(stdout, "\r{:<12} {}", mode.label(), format_clock(*remaining_secs))?;
            }
            Event::StateSnapshot {
                label,
                remaining_secs,
                ..
            } => {
                write!(stdout, "\r{:<12} {}", label, format_clock(*remaining_secs))?;
            }
            Event::TimerStarted { .. } => write!(stdout, "  [running]")?,
            Event::TimerPaused {
                mode,
                remaining_secs,
                ..
            } => {
                write!(
                    stdout,
                    "\r{:<12} {}  [paused]",
                    mode.label(),
                    format_clock(*remaining_secs)
                )?;
            }
            Event::TimerReset {
                mode,
                remaining_secs,
                ..
            } => {
                write!(
                    stdout,
                    "\r{:<12} {}  [reset]  ",
                    mode.label(),
                    format_clock(*remaining_secs)
                )?;
            }
            Event::ModeChanged {
                to, duration_secs, ..
            } => {
                write!(
                    stdout,
                    "\r{:<12} {}           ",
                    to.label(),
                    format_clock(*duration_secs)
                )?;
            }
            Event::TimerCompleted {
                notice, recorded, ..
            } => {
                writeln!(stdout)?;
                writeln!(stdout, "{notice}")?;
                if *recorded {
                    writeln!(stdout, "Session logged.")?;
                }
            }
        }
        stdout.flush()?;
        Ok(())
    }
}
