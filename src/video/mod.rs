pub(crate) mod output;
mod render;
mod session;

#[cfg(test)]
mod testing;

use crate::prelude::*;
use crate::util::duration;
use std::time::Duration;

pub(crate) use session::EditSession;

/// Codec and speed settings of the export. These are deliberately not
/// configurable.
const VIDEO_CODEC: &str = "libx264";
const AUDIO_CODEC: &str = "aac";
const PRESET: &str = "faster";

#[derive(strum::Display, Debug, Clone, Copy, PartialEq, Eq)]
#[strum(serialize_all = "kebab-case")]
pub(crate) enum ClipRole {
    Intro,
    Main,
    Outro,
}

/// A sub-range of the source video that will be kept
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TrimRange {
    start: Duration,
    end: Duration,
}

impl TrimRange {
    pub(crate) fn new(start: Duration, end: Duration) -> Result<Self> {
        ensure!(end > start, "End time must be after start time");
        Ok(Self { start, end })
    }

    pub(crate) fn start(&self) -> Duration {
        self.start
    }

    pub(crate) fn end(&self) -> Duration {
        self.end
    }

    pub(crate) fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// The range must fit into the video it's applied to
    pub(crate) fn ensure_within(&self, clip_duration: Duration) -> Result {
        ensure!(
            self.end <= clip_duration,
            "End time {} exceeds the duration of the recording {}",
            duration::format(self.end),
            duration::format(clip_duration),
        );
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Clip {
    pub(crate) role: ClipRole,
    pub(crate) path: Utf8PathBuf,
    pub(crate) trim: Option<TrimRange>,
}

/// Clips to concatenate in the order of intro, main, outro
#[derive(Debug, Clone)]
pub(crate) struct EditPlan {
    pub(crate) intro: Option<Clip>,
    pub(crate) main: Clip,
    pub(crate) outro: Option<Clip>,
}

impl EditPlan {
    pub(crate) fn new(
        main: Utf8PathBuf,
        trim: TrimRange,
        intro: Option<Utf8PathBuf>,
        outro: Option<Utf8PathBuf>,
    ) -> Self {
        let untrimmed = |role, path| Clip {
            role,
            path,
            trim: None,
        };

        Self {
            intro: intro.map(|path| untrimmed(ClipRole::Intro, path)),
            main: Clip {
                role: ClipRole::Main,
                path: main,
                trim: Some(trim),
            },
            outro: outro.map(|path| untrimmed(ClipRole::Outro, path)),
        }
    }

    pub(crate) fn clips(&self) -> impl Iterator<Item = &Clip> {
        self.intro
            .iter()
            .chain([&self.main])
            .chain(self.outro.iter())
    }
}
