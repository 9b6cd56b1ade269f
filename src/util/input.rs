use crate::prelude::*;
use async_trait::async_trait;
use std::fmt;
use std::io::Write;

/// Interactive line-based terminal. Abstracted away so that the prompts
/// can be driven by a scripted mock in tests.
#[async_trait]
pub(crate) trait Terminal: fmt::Debug + Send + Sync {
    /// Show a line of text to the user
    fn print(&self, line: &str);

    /// Show the prompt and read one line of the user's input without the
    /// trailing line break.
    async fn read_line(&self, prompt: &str) -> Result<String>;
}

#[derive(Debug)]
pub(crate) struct StdinTerminal;

#[async_trait]
impl Terminal for StdinTerminal {
    fn print(&self, line: &str) {
        println!("{line}");
    }

    async fn read_line(&self, prompt: &str) -> Result<String> {
        let prompt = prompt.to_owned();

        // Tokio recommends spawning a blocking thread for user input
        // https://docs.rs/tokio/latest/tokio/io/struct.Stdin.html
        tokio::task::spawn_blocking(move || -> Result<String> {
            let mut stdout = std::io::stdout().lock();
            write!(stdout, "{prompt}")?;
            stdout.flush()?;
            drop(stdout);

            std::io::stdin()
                .lines()
                .next()
                .transpose()
                .context("Failed to read user input from `stdin`")?
                .context("Reached end-of-file (EOF) while reading user input from `stdin`")
        })
        .await
        .context("Failed to join the blocking task for user input")?
    }
}

pub(crate) async fn read_confirmation(
    terminal: &dyn Terminal,
    message: &str,
    auto_confirm: bool,
) -> Result {
    if auto_confirm {
        return Ok(());
    }

    warn!("{message} Only `yes` will be accepted to confirm");

    let user_input = terminal.read_line("> ").await?;

    if user_input.trim() != "yes" {
        bail!("Confirmation response was not `yes`");
    }

    Ok(())
}
