//! Rendering of the ffmpeg invocation that trims, normalizes and
//! concatenates all clips in a single pass.

use super::{Clip, AUDIO_CODEC, PRESET, VIDEO_CODEC};
use crate::ffmpeg::MediaInfo;
use crate::prelude::*;
use crate::util::{duration, iter};
use std::num::NonZeroUsize;
use std::time::Duration;

const SAMPLE_RATE: u32 = 48_000;
const CHANNEL_LAYOUT: &str = "stereo";

/// A clip that was loaded and is known to be a valid media file
#[derive(Debug, Clone)]
pub(crate) struct LoadedClip {
    pub(crate) clip: Clip,
    pub(crate) info: MediaInfo,
}

impl LoadedClip {
    /// The duration of the clip after trimming
    fn output_duration(&self) -> Duration {
        self.clip
            .trim
            .map(|trim| trim.duration())
            .unwrap_or(self.info.duration)
    }

    fn input_args(&self) -> impl Iterator<Item = String> + '_ {
        let trim = self.clip.trim;

        // Seeking on the input is fast and makes the trimmed video start
        // exactly at zero. An input `-to` is a position in the source, not
        // in the trimmed output.
        iter::optional_named_arg("-ss", trim.map(|trim| duration::ffmpeg_secs(trim.start())))
            .chain(iter::optional_named_arg(
                "-to",
                trim.map(|trim| duration::ffmpeg_secs(trim.end())),
            ))
            .chain(iter::strs(["-i", self.clip.path.as_str()]))
    }
}

/// Builds the filter graph. Every video is scaled and padded to the
/// resolution of the main clip, and the clips without an audio stream get
/// silence of the same duration, because `concat` requires all segments
/// to have the same set of streams.
pub(crate) fn filter_graph(clips: &[LoadedClip]) -> Result<String> {
    let main = clips
        .iter()
        .find(|loaded| loaded.clip.role == super::ClipRole::Main)
        .context("BUG: there is no main clip in the edit plan")?;

    let (width, height) = main
        .info
        .video
        .with_context(|| format!("The recording `{}` has no video stream", main.clip.path))?;

    let mut chains = Vec::with_capacity(clips.len() * 2 + 1);

    for (i, loaded) in clips.iter().enumerate() {
        ensure!(
            loaded.info.video.is_some(),
            "The {} `{}` has no video stream",
            loaded.clip.role,
            loaded.clip.path,
        );

        chains.push(format!(
            "[{i}:v:0]scale={width}:{height}:force_original_aspect_ratio=decrease,\
            pad={width}:{height}:(ow-iw)/2:(oh-ih)/2,setsar=1[v{i}]"
        ));

        let audio_format = format!(
            "aformat=sample_rates={SAMPLE_RATE}:channel_layouts={CHANNEL_LAYOUT}"
        );

        if loaded.info.has_audio {
            chains.push(format!("[{i}:a:0]{audio_format}[a{i}]"));
        } else {
            let duration = duration::ffmpeg_secs(loaded.output_duration());
            chains.push(format!(
                "anullsrc=channel_layout={CHANNEL_LAYOUT}:sample_rate={SAMPLE_RATE},\
                atrim=duration={duration},{audio_format}[a{i}]"
            ));
        }
    }

    let segments = (0..clips.len()).format_with("", |i, f| f(&format_args!("[v{i}][a{i}]")));

    chains.push(format!(
        "{segments}concat=n={}:v=1:a=1[v][a]",
        clips.len()
    ));

    Ok(chains.join(";\n"))
}

pub(crate) fn ffmpeg_args(
    clips: &[LoadedClip],
    filter_script: &Utf8Path,
    output: &Utf8Path,
    threads: NonZeroUsize,
) -> Vec<String> {
    iter::strs(["-y"])
        .chain(clips.iter().flat_map(LoadedClip::input_args))
        .chain(iter::strs([
            "-filter_complex_script",
            filter_script.as_str(),
            "-map",
            "[v]",
            "-map",
            "[a]",
            "-c:v",
            VIDEO_CODEC,
            "-preset",
            PRESET,
            "-pix_fmt",
            "yuv420p",
            "-c:a",
            AUDIO_CODEC,
            "-threads",
        ]))
        .chain([threads.to_string()])
        .chain(iter::strs(["-movflags", "+faststart", output.as_str()]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::video::{ClipRole, TrimRange};
    use expect_test::expect;

    fn loaded(role: ClipRole, trim: Option<TrimRange>, info: MediaInfo) -> LoadedClip {
        LoadedClip {
            clip: Clip {
                role,
                path: format!("{role}.mp4").into(),
                trim,
            },
            info,
        }
    }

    fn info(secs: u64, video: Option<(u32, u32)>, has_audio: bool) -> MediaInfo {
        MediaInfo {
            duration: Duration::from_secs(secs),
            video,
            has_audio,
        }
    }

    fn trim(start: u64, end: u64) -> Option<TrimRange> {
        Some(TrimRange::new(Duration::from_secs(start), Duration::from_secs(end)).unwrap())
    }

    #[test]
    fn graph_with_all_clips() {
        let clips = [
            loaded(ClipRole::Intro, None, info(5, Some((1280, 720)), false)),
            loaded(ClipRole::Main, trim(90, 150), info(600, Some((1920, 1080)), true)),
            loaded(ClipRole::Outro, None, info(7, Some((1920, 1080)), true)),
        ];

        expect![[r#"
            [0:v:0]scale=1920:1080:force_original_aspect_ratio=decrease,pad=1920:1080:(ow-iw)/2:(oh-ih)/2,setsar=1[v0];
            anullsrc=channel_layout=stereo:sample_rate=48000,atrim=duration=5,aformat=sample_rates=48000:channel_layouts=stereo[a0];
            [1:v:0]scale=1920:1080:force_original_aspect_ratio=decrease,pad=1920:1080:(ow-iw)/2:(oh-ih)/2,setsar=1[v1];
            [1:a:0]aformat=sample_rates=48000:channel_layouts=stereo[a1];
            [2:v:0]scale=1920:1080:force_original_aspect_ratio=decrease,pad=1920:1080:(ow-iw)/2:(oh-ih)/2,setsar=1[v2];
            [2:a:0]aformat=sample_rates=48000:channel_layouts=stereo[a2];
            [v0][a0][v1][a1][v2][a2]concat=n=3:v=1:a=1[v][a]"#]]
        .assert_eq(&filter_graph(&clips).unwrap());
    }

    #[test]
    fn silence_matches_trimmed_duration() {
        let clips = [loaded(
            ClipRole::Main,
            trim(10, 25),
            info(60, Some((640, 480)), false),
        )];

        expect![[r#"
            [0:v:0]scale=640:480:force_original_aspect_ratio=decrease,pad=640:480:(ow-iw)/2:(oh-ih)/2,setsar=1[v0];
            anullsrc=channel_layout=stereo:sample_rate=48000,atrim=duration=15,aformat=sample_rates=48000:channel_layouts=stereo[a0];
            [v0][a0]concat=n=1:v=1:a=1[v][a]"#]]
        .assert_eq(&filter_graph(&clips).unwrap());
    }

    #[test]
    fn clips_without_video_are_rejected() {
        let clips = [
            loaded(ClipRole::Main, trim(0, 5), info(60, Some((640, 480)), true)),
            loaded(ClipRole::Outro, None, info(3, None, true)),
        ];

        let err = filter_graph(&clips).unwrap_err();
        assert_eq!(err.to_string(), "The outro `outro.mp4` has no video stream");

        let clips = [loaded(ClipRole::Main, trim(0, 5), info(60, None, true))];

        let err = filter_graph(&clips).unwrap_err();
        assert_eq!(err.to_string(), "The recording `main.mp4` has no video stream");
    }

    #[test]
    fn only_main_clip_is_trimmed() {
        let clips = [
            loaded(ClipRole::Intro, None, info(5, Some((640, 480)), true)),
            loaded(ClipRole::Main, trim(90, 150), info(600, Some((640, 480)), true)),
        ];

        let args = ffmpeg_args(
            &clips,
            Utf8Path::new("graph.txt"),
            Utf8Path::new("output/final.mp4"),
            NonZeroUsize::new(4).unwrap(),
        );

        expect![[r#"
            -y
            -i
            intro.mp4
            -ss
            90
            -to
            150
            -i
            main.mp4
            -filter_complex_script
            graph.txt
            -map
            [v]
            -map
            [a]
            -c:v
            libx264
            -preset
            faster
            -pix_fmt
            yuv420p
            -c:a
            aac
            -threads
            4
            -movflags
            +faststart
            output/final.mp4"#]]
        .assert_eq(&args.join("\n"));
    }
}
