//! `slotwise` CLI — resolve free slots and check proposed bookings from the
//! command line.
//!
//! ## Usage
//!
//! ```sh
//! # Free slots for a week, calendar document on stdin
//! slotwise slots --from 2026-03-02T00:00:00 --to 2026-03-09T00:00:00 < calendar.json
//!
//! # From file to file
//! slotwise slots -i calendar.json -o slots.json \
//!     --from 2026-03-02T00:00:00 --to 2026-03-09T00:00:00
//!
//! # Conflict-check a proposed booking against existing bookings
//! slotwise check -i proposal.json
//! ```
//!
//! The calendar document is one owner's rules and bookings as JSON; see
//! `tests/fixtures/` for the shape. Logs go to stderr (`RUST_LOG` to
//! enable), result JSON to stdout.

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use clap::{Parser, Subcommand};
use serde::Deserialize;
use slotwise_engine::{available_slots, check_conflict, BookedInterval, QueryRange, WeeklyRule};
use std::io::{self, Read};
use std::process;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "slotwise", version, about = "Availability resolution CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute free slots for a calendar document within a date range
    Slots {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Range start, naive ISO-8601 (e.g. 2026-03-02T00:00:00)
        #[arg(long)]
        from: NaiveDateTime,
        /// Range end, exclusive
        #[arg(long)]
        to: NaiveDateTime,
    },
    /// Check a proposed booking against existing bookings
    Check {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

/// One owner's calendar: weekly rules plus existing bookings.
#[derive(Deserialize)]
struct CalendarDoc {
    owner_id: Uuid,
    rules: Vec<WeeklyRule>,
    #[serde(default)]
    bookings: Vec<BookedInterval>,
}

/// A proposed booking and the bookings it must not collide with.
#[derive(Deserialize)]
struct ProposalDoc {
    proposed: BookedInterval,
    #[serde(default)]
    existing: Vec<BookedInterval>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Slots {
            input,
            output,
            from,
            to,
        } => {
            let raw = read_input(input.as_deref())?;
            let doc: CalendarDoc =
                serde_json::from_str(&raw).context("Failed to parse calendar document")?;

            let range = QueryRange {
                start: from,
                end: to,
            };
            let slots = available_slots(&doc.rules, &doc.bookings, &range, doc.owner_id)
                .context("Failed to resolve free slots")?;

            let pretty = serde_json::to_string_pretty(&slots)?;
            write_output(output.as_deref(), &pretty)?;
        }
        Commands::Check { input } => {
            let raw = read_input(input.as_deref())?;
            let doc: ProposalDoc =
                serde_json::from_str(&raw).context("Failed to parse proposal document")?;

            match check_conflict(&doc.proposed, &doc.existing) {
                Ok(()) => println!("{}", serde_json::json!({ "ok": true })),
                Err(err) => {
                    // A rejected proposal is a normal outcome, reported on
                    // stdout with a non-zero exit for scripting.
                    println!(
                        "{}",
                        serde_json::json!({ "ok": false, "error": err.to_string() })
                    );
                    process::exit(1);
                }
            }
        }
    }

    Ok(())
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
