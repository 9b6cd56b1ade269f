mod cmd;
mod display;
mod ffmpeg;
mod fs;
mod prelude;
mod progress;
mod prompt;
mod util;
mod video;

use clap::Parser;
use cmd::Cmd;

/// Trims a recording, wraps it with an intro and an outro and exports
/// the result as a single MP4 file using ffmpeg
#[derive(Parser, Debug)]
#[command(version)]
enum Args {
    Edit(cmd::Edit),
    Demo(cmd::Demo),
}

pub async fn run() -> anyhow::Result<()> {
    match Args::parse() {
        Args::Edit(cmd) => cmd.run().await,
        Args::Demo(cmd) => cmd.run().await,
    }
}
