use crate::prelude::*;
use async_trait::async_trait;
use std::fmt;
use std::time::Duration;

/// What we need to know about a clip before it can be put into the
/// concatenation filter graph
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct MediaInfo {
    pub(crate) duration: Duration,

    /// Width and height of the first video stream
    pub(crate) video: Option<(u32, u32)>,
    pub(crate) has_audio: bool,
}

impl MediaInfo {
    /// Parses the output of `ffprobe -of default=noprint_wrappers=1`,
    /// which is a flat list of `key=value` lines.
    pub(crate) fn parse(output: &str) -> Result<Self> {
        let mut duration = None;
        let mut width = None;
        let mut height = None;
        let mut has_audio = false;

        for line in output.lines() {
            let Some((key, value)) = line.trim().split_once('=') else {
                continue;
            };

            let number = || value.parse::<u32>().ok();

            match key {
                "codec_type" if value == "audio" => has_audio = true,
                "width" if width.is_none() => width = number(),
                "height" if height.is_none() => height = number(),
                "duration" if value != "N/A" => {
                    let secs: f64 = value
                        .parse()
                        .with_context(|| format!("Invalid duration reported by ffprobe: `{value}`"))?;
                    ensure!(secs >= 0., "Negative duration reported by ffprobe: `{value}`");
                    let secs = Duration::try_from_secs_f64(secs).with_context(|| {
                        format!("Out of range duration reported by ffprobe: `{value}`")
                    })?;
                    duration = Some(secs);
                }
                _ => {}
            }
        }

        let duration = duration.context("ffprobe didn't report the media duration")?;

        Ok(Self {
            duration,
            video: width.zip(height),
            has_audio,
        })
    }
}

#[async_trait]
pub(crate) trait Ffmpeg: fmt::Debug + Send + Sync {
    /// Invoke ffmpeg process with the given arguments.
    async fn run(&self, args: Vec<String>) -> Result<Vec<u8>>;

    /// Query the duration and the streams of the media file with ffprobe
    async fn probe(&self, path: &Utf8Path) -> Result<MediaInfo>;
}

#[derive(Debug)]
pub(crate) struct FfmpegProcess;

#[async_trait]
impl Ffmpeg for FfmpegProcess {
    async fn run(&self, args: Vec<String>) -> Result<Vec<u8>> {
        crate::util::cmd::ffmpeg(args).await
    }

    async fn probe(&self, path: &Utf8Path) -> Result<MediaInfo> {
        let args = [
            "-show_entries",
            "format=duration:stream=codec_type,width,height",
            "-of",
            "default=noprint_wrappers=1",
            path.as_str(),
        ];

        let output = crate::util::cmd::ffprobe(args).await?;
        let output = String::from_utf8(output).context("ffprobe output is not UTF8")?;

        MediaInfo::parse(&output).with_context(|| format!("Failed to probe `{path}`"))
    }
}
