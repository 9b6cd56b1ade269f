//! Interactive prompts of the editing flow. Every prompt re-asks the
//! question until the user gives a valid answer.

use crate::display;
use crate::prelude::*;
use crate::util::duration;
use crate::util::input::Terminal;
use crate::video::{output, TrimRange};
use std::time::Duration;

/// Shows a numbered menu (starting from 1) and returns the index of the
/// selected item in the `items` slice.
pub(crate) async fn select(
    terminal: &dyn Terminal,
    header: &str,
    items: &[String],
    question: &str,
) -> Result<usize> {
    ensure!(!items.is_empty(), "BUG: nothing to select from for `{header}`");

    terminal.print(header);

    for (i, item) in items.iter().enumerate() {
        terminal.print(&format!("{}. {item}", i + 1));
    }

    loop {
        let choice = terminal.read_line(&format!("\n{question}: ")).await?;

        let Ok(number) = choice.trim().parse::<usize>() else {
            terminal.print("Please enter a valid number.");
            continue;
        };

        match number.checked_sub(1).filter(|&idx| idx < items.len()) {
            Some(idx) => return Ok(idx),
            None => terminal.print("Invalid selection. Please try again."),
        }
    }
}

pub(crate) async fn read_timestamp(terminal: &dyn Terminal, question: &str) -> Result<Duration> {
    loop {
        let input = terminal.read_line(question).await?;

        match duration::parse(&input) {
            Ok(timestamp) => return Ok(timestamp),
            Err(err) => terminal.print(&format!("{err:#}")),
        }
    }
}

/// Reads the start time, and then the end time until it's after the start.
/// If any of the times are already known they aren't asked for.
pub(crate) async fn read_trim_range(
    terminal: &dyn Terminal,
    start: Option<Duration>,
    end: Option<Duration>,
) -> Result<TrimRange> {
    if let (Some(start), Some(end)) = (start, end) {
        return TrimRange::new(start, end);
    }

    terminal.print("");
    terminal.print(&display::rule('-'));
    terminal.print("Enter trim times (format: MM:SS)");
    terminal.print(&display::rule('-'));

    let start = match start {
        Some(start) => start,
        None => read_timestamp(terminal, "Start time (where to begin cutting): ").await?,
    };

    if let Some(end) = end {
        return TrimRange::new(start, end);
    }

    loop {
        let end = read_timestamp(terminal, "End time (where to stop cutting): ").await?;

        match TrimRange::new(start, end) {
            Ok(range) => return Ok(range),
            Err(err) => terminal.print(&format!("{err}!")),
        }
    }
}

pub(crate) async fn read_output_name(terminal: &dyn Terminal) -> Result<String> {
    loop {
        let input = terminal
            .read_line(&format!(
                "Enter output filename (default: {}): ",
                output::DEFAULT_FILE_NAME
            ))
            .await?;

        match output::normalize_file_name(&input) {
            Some(name) => return Ok(name),
            None => terminal.print("Invalid filename, try again."),
        }
    }
}
