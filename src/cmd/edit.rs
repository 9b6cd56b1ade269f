use crate::prelude::*;
use crate::video::EditSession;
use async_trait::async_trait;
use clap::Parser;
use std::time::Duration;

/// Trim a recording, put an intro and an outro around it, and export the
/// result into a single MP4 file using ffmpeg
///
/// Everything that isn't specified via the arguments is asked for
/// interactively. The outro is always the file `mainoutro.mp4` in the intros
/// directory. It's skipped if the file doesn't exist.
#[derive(Parser, Debug)]
pub struct Edit {
    /// Directory with the recordings to choose from
    #[clap(long, env = "REELCUT_RECORDINGS_DIR", default_value = "recordings")]
    recordings_dir: Utf8PathBuf,

    /// Directory with the intro videos and the `mainoutro.mp4`
    #[clap(long, env = "REELCUT_INTROS_DIR", default_value = "introandoutro")]
    intros_dir: Utf8PathBuf,

    /// Directory where the output video will be saved. It's created if it
    /// doesn't exist.
    #[clap(long, env = "REELCUT_OUTPUT_DIR", default_value = "output")]
    output_dir: Utf8PathBuf,

    /// File name of the recording in the recordings directory
    #[clap(long)]
    recording: Option<String>,

    /// The time from which the recording will be cut in the `MM:SS` format
    #[clap(long, value_parser = crate::util::duration::parse)]
    start: Option<Duration>,

    /// The time to which the recording will be cut in the `MM:SS` format
    #[clap(long, value_parser = crate::util::duration::parse)]
    end: Option<Duration>,

    /// File name of the intro in the intros directory
    #[clap(long, conflicts_with = "no_intro")]
    intro: Option<String>,

    /// Don't put an intro before the recording
    #[clap(long)]
    no_intro: bool,

    /// File name of the output video. The `.mp4` extension is appended
    /// if it's missing.
    #[clap(long)]
    output: Option<String>,

    /// Overwrite the output file without asking if it already exists
    #[clap(long)]
    overwrite: bool,

    /// Don't show the progress bars
    #[clap(long)]
    no_progress: bool,
}

#[async_trait]
impl crate::cmd::Cmd for Edit {
    async fn run(self) -> Result {
        let session = EditSession::builder()
            .recordings_dir(self.recordings_dir)
            .intros_dir(self.intros_dir)
            .output_dir(self.output_dir)
            .and_recording(self.recording)
            .and_start(self.start)
            .and_end(self.end)
            .and_intro(self.intro)
            .no_intro(self.no_intro)
            .and_output(self.output)
            .overwrite(self.overwrite)
            .show_progress(!self.no_progress)
            .build()?;

        session.run().await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoder_settings_are_not_configurable() {
        let err = Edit::try_parse_from(["edit", "--threads", "2"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);

        let edit = Edit::try_parse_from(["edit", "--start", "1:30", "--no-intro"]).unwrap();
        assert_eq!(edit.start, Some(Duration::from_secs(90)));
        assert!(edit.no_intro);
    }
}
