//! Terminal front end and entry point.
//!
//! Wires the library together on a tokio runtime:
//!
//! ```text
//!  stdin lines ──parse_command──┐
//!                               ▼
//!                         handle_event ──Action::PostToWorker──▶ NotesWorker
//!                               ▲                                    │
//!                               └──────── WorkerResponse ◀───────────┘
//! ```
//!
//! After every handled event that asks for it, the whole screen is redrawn.
//! The terminal size is read from `LINES` and `COLUMNS`, defaulting to 80x24.
//!
//! # Usage
//!
//! ```text
//! notehub [TAG] [--config PATH] [key=value ...]
//! ```
//!
//! `TAG` opens the list filtered to one tag (`Work`, `todo`, `all`, ...).
//! `key=value` pairs override config file and environment settings.

#![allow(clippy::multiple_crate_versions)]

use notehub::api::HttpNotesApi;
use notehub::app::parse_command;
use notehub::worker::NotesWorker;
use notehub::{handle_event, Action, AppState, Config, Event, NoteHubError, Result};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

const USAGE: &str = "usage: notehub [TAG] [--config PATH] [key=value ...]";

const DEFAULT_ROWS: usize = 24;
const DEFAULT_COLS: usize = 80;

/// Parsed command-line arguments.
#[derive(Debug, Default, PartialEq, Eq)]
struct CliArgs {
    tag: Option<String>,
    config_path: Option<PathBuf>,
    overrides: BTreeMap<String, String>,
    help: bool,
}

impl CliArgs {
    fn parse(args: impl IntoIterator<Item = String>) -> Result<Self> {
        let mut parsed = Self::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" => parsed.help = true,
                "--config" => {
                    let path = args
                        .next()
                        .ok_or_else(|| NoteHubError::Config("--config needs a path".to_string()))?;
                    parsed.config_path = Some(notehub::infrastructure::expand_tilde(&path));
                }
                _ => {
                    if let Some((key, value)) = arg.split_once('=') {
                        parsed.overrides.insert(key.to_string(), value.to_string());
                    } else if arg.starts_with('-') {
                        return Err(NoteHubError::Config(format!("unknown option {arg}")));
                    } else if parsed.tag.is_none() {
                        parsed.tag = Some(arg);
                    } else {
                        return Err(NoteHubError::Config(format!("unexpected argument {arg}")));
                    }
                }
            }
        }

        Ok(parsed)
    }
}

/// Terminal size from `LINES`/`COLUMNS`, re-read before each frame.
fn terminal_size() -> (usize, usize) {
    let read = |key: &str, default: usize| {
        std::env::var(key)
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .filter(|&n: &usize| n > 0)
            .unwrap_or(default)
    };
    (read("LINES", DEFAULT_ROWS), read("COLUMNS", DEFAULT_COLS))
}

fn draw(app: &AppState) -> Result<()> {
    let (rows, cols) = terminal_size();
    notehub::ui::render(app, rows, cols);
    std::io::stdout().flush()?;
    Ok(())
}

/// Handles one event and executes its actions.
///
/// Returns `true` once the user asked to quit.
fn dispatch(app: &mut AppState, worker: &NotesWorker, event: &Event) -> Result<bool> {
    let (should_render, actions) = match handle_event(app, event) {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::warn!(error = %e, "error handling event");
            return Ok(false);
        }
    };

    tracing::debug!(action_count = actions.len(), should_render, "event handled");
    let mut quit = false;
    for action in actions {
        match action {
            Action::PostToWorker(message) => worker.post(message),
            Action::Quit => quit = true,
        }
    }

    if should_render && !quit {
        draw(app)?;
    }
    Ok(quit)
}

async fn run(args: CliArgs) -> Result<()> {
    let config = Config::load(args.config_path.as_deref())?
        .with_env(|key| std::env::var(key).ok())
        .with_overrides(&args.overrides);
    notehub::observability::init_tracing(&config);

    let span = tracing::debug_span!("client_start");
    let guard = span.enter();
    tracing::debug!(api = %config.api_base_url, per_page = ?config.per_page, "parsed configuration");

    let api = HttpNotesApi::from_config(&config)?;
    tracing::debug!(base = %api.base_url(), "notes api ready");
    let (responses_tx, mut responses_rx) = mpsc::unbounded_channel();
    let worker = NotesWorker::new(Arc::new(api), responses_tx);
    let mut app = notehub::initialize(&config);
    drop(guard);

    if dispatch(&mut app, &worker, &Event::OpenRoute { tag: args.tag })? {
        return Ok(());
    }
    draw(&app)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let event = tokio::select! {
            line = lines.next_line() => match line? {
                Some(line) => match parse_command(&line, app.screen) {
                    Some(event) => event,
                    None => {
                        draw(&app)?;
                        continue;
                    }
                },
                None => break,
            },
            Some(response) = responses_rx.recv() => Event::WorkerResponse(response),
        };

        if dispatch(&mut app, &worker, &event)? {
            break;
        }
    }

    tracing::debug!("client exiting");
    print!("\u{1b}[0m\u{1b}[2J\u{1b}[H");
    std::io::stdout().flush()?;
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = match CliArgs::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("notehub: {e}\n{USAGE}");
            return ExitCode::FAILURE;
        }
    };
    if args.help {
        println!("{USAGE}");
        return ExitCode::SUCCESS;
    }

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("notehub: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<CliArgs> {
        CliArgs::parse(list.iter().map(|s| (*s).to_string()))
    }

    #[test]
    fn parses_tag_config_and_overrides() {
        let parsed = args(&["Work", "--config", "/etc/notehub.toml", "per_page=6"]).unwrap();
        assert_eq!(parsed.tag.as_deref(), Some("Work"));
        assert_eq!(parsed.config_path, Some(PathBuf::from("/etc/notehub.toml")));
        assert_eq!(parsed.overrides.get("per_page").map(String::as_str), Some("6"));
    }

    #[test]
    fn rejects_unknown_options_and_extra_tags() {
        assert!(args(&["--verbose"]).is_err());
        assert!(args(&["Work", "Todo"]).is_err());
        assert!(args(&["--config"]).is_err());
        assert!(args(&["--help"]).unwrap().help);
    }
}
