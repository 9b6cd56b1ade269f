use super::render::{self, LoadedClip};
use super::{output, EditPlan};
use crate::display;
use crate::ffmpeg::Ffmpeg;
use crate::prelude::*;
use crate::progress::{OperationKind, ProgressTracker, StepTracker};
use crate::prompt;
use crate::util::duration;
use crate::util::input::{StdinTerminal, Terminal};
use buildstructor::buildstructor;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};

const FILTER_SCRIPT_FILE_NAME: &str = "filter_graph.txt";

const EXPORT_FAILURE_HINT: &str =
    "Failed to export the video. Make sure all video files exist and are valid MP4 files";

/// How the intro should be picked
#[derive(Debug, Clone, PartialEq, Eq)]
enum IntroChoice {
    Ask,
    Skip,
    Named(String),
}

/// The whole interactive editing flow: select the recording, trim it, put
/// the intro and the outro around it and export the result.
pub(crate) struct EditSession {
    recordings_dir: Utf8PathBuf,
    intros_dir: Utf8PathBuf,
    output_dir: Utf8PathBuf,

    recording: Option<String>,
    start: Option<Duration>,
    end: Option<Duration>,
    intro: IntroChoice,
    output: Option<String>,

    overwrite: bool,
    threads: NonZeroUsize,
    progress: ProgressTracker,

    ffmpeg: Arc<dyn Ffmpeg>,
    terminal: Arc<dyn Terminal>,
}

#[buildstructor]
impl EditSession {
    #[builder]
    pub(crate) fn new(
        recordings_dir: Utf8PathBuf,
        intros_dir: Utf8PathBuf,
        output_dir: Utf8PathBuf,

        recording: Option<String>,
        start: Option<Duration>,
        end: Option<Duration>,
        intro: Option<String>,
        no_intro: bool,
        output: Option<String>,

        overwrite: bool,
        show_progress: bool,
        threads: Option<NonZeroUsize>,

        ffmpeg: Option<Arc<dyn Ffmpeg>>,
        terminal: Option<Arc<dyn Terminal>>,
    ) -> Result<Self> {
        let intro = match (intro, no_intro) {
            (Some(intro), true) => {
                bail!("Intro `{intro}` was specified, but the intro was also disabled")
            }
            (Some(intro), false) => IntroChoice::Named(intro),
            (None, true) => IntroChoice::Skip,
            (None, false) => IntroChoice::Ask,
        };

        Ok(Self {
            recordings_dir,
            intros_dir,
            output_dir,
            recording,
            start,
            end,
            intro,
            output,
            overwrite,
            threads: threads.unwrap_or_else(Self::default_threads),
            progress: ProgressTracker::new(show_progress),
            ffmpeg: ffmpeg.unwrap_or_else(|| Arc::new(crate::ffmpeg::FfmpegProcess)),
            terminal: terminal.unwrap_or_else(|| Arc::new(StdinTerminal)),
        })
    }

    /// Number of threads the encoder is allowed to use
    fn default_threads() -> NonZeroUsize {
        std::thread::available_parallelism().unwrap_or_else(|err| {
            let default = NonZeroUsize::new(4).unwrap();
            warn!(
                err = &err as &dyn std::error::Error,
                "Failed to query the system's available parallelism. \
                Falling back to the default value of {default}",
            );
            default
        })
    }
}

impl EditSession {
    /// Returns the path of the exported video
    pub(crate) async fn run(self) -> Result<Utf8PathBuf> {
        let terminal = &*self.terminal;

        terminal.print(&display::rule('='));
        terminal.print("Video Editing Automation");
        terminal.print(&display::rule('='));

        fs::create_dir_all(&self.output_dir).await?;

        let recording = self.select_recording().await?;
        let trim = prompt::read_trim_range(terminal, self.start, self.end).await?;
        let intro = self.select_intro().await?;
        let outro = crate::fs::outro_path(&self.intros_dir).await?;
        let output = self.output_path().await?;

        let plan = EditPlan::new(recording, trim, intro, outro);

        terminal.print("");
        terminal.print(&display::rule('='));
        terminal.print("Processing video... This may take a few minutes.");
        terminal.print(&display::rule('='));

        let start = Instant::now();
        let steps = StepTracker::new(&self.progress, 4, "Video Editing");

        steps.next_step("Loading clips");
        let clips = self.load_clips(&plan).await?;

        steps.next_step("Combining clips");
        let temp_dir = tempfile::tempdir()?;
        let filter_script = self.combine(&clips, temp_dir.path().unwrap_utf8()).await?;

        steps.next_step("Exporting");
        self.export(&clips, &filter_script, &output).await?;

        steps.next_step("Cleanup");
        self.cleanup(temp_dir)?;

        steps.finish();

        let size = display::human_size(fs::metadata(&output).await?.len());

        info!(
            "🎉 Exported {} in {}",
            display::path(&output),
            display::elapsed(start)
        );

        terminal.print("");
        terminal.print(&display::rule('='));
        terminal.print(&format!("SUCCESS! Video saved to: {output} ({size})"));
        terminal.print(&display::rule('='));

        Ok(output)
    }

    async fn select_recording(&self) -> Result<Utf8PathBuf> {
        let dir = &self.recordings_dir;
        let mut recordings = crate::fs::list_recordings(dir).await?;

        ensure!(
            !recordings.is_empty(),
            "No recordings found in {}!",
            display::path(dir)
        );

        let name = match &self.recording {
            Some(name) => {
                ensure!(
                    recordings.contains(name),
                    "Recording `{name}` not found in {}. Available recordings: {}",
                    display::path(dir),
                    recordings.join(", "),
                );
                name.clone()
            }
            None => {
                self.terminal.print("");
                let idx = prompt::select(
                    &*self.terminal,
                    "Available recordings:",
                    &recordings,
                    "Enter the number of the recording you want to edit",
                )
                .await?;
                recordings.swap_remove(idx)
            }
        };

        self.terminal.print("");
        self.terminal.print(&format!("Selected: {name}"));

        Ok(dir.join(name))
    }

    async fn select_intro(&self) -> Result<Option<Utf8PathBuf>> {
        match &self.intro {
            IntroChoice::Skip => return Ok(None),
            IntroChoice::Named(name) => {
                let intros = crate::fs::list_intros(&self.intros_dir).await?;

                ensure!(
                    intros.contains(name),
                    "Intro `{name}` not found in {}. Available intros: {}",
                    display::path(&self.intros_dir),
                    intros.join(", "),
                );

                return Ok(Some(self.intros_dir.join(name)));
            }
            IntroChoice::Ask => {}
        }

        let mut intros = crate::fs::list_intros(&self.intros_dir)
            .await
            .unwrap_or_else(|err| {
                warn!("{err:#}");
                vec![]
            });

        if intros.is_empty() {
            warn!("No intro videos found! Continuing without an intro");
            return Ok(None);
        }

        let rule = display::rule('-');

        self.terminal.print("");
        let idx = prompt::select(
            &*self.terminal,
            &format!("{rule}\nAvailable intro videos:\n{rule}"),
            &intros,
            "Enter the number of the intro to use",
        )
        .await?;

        Ok(Some(self.intros_dir.join(intros.swap_remove(idx))))
    }

    async fn output_path(&self) -> Result<Utf8PathBuf> {
        let name = match &self.output {
            Some(name) => output::normalize_file_name(name)
                .with_context(|| format!("Invalid output file name `{name}`"))?,
            None => prompt::read_output_name(&*self.terminal).await?,
        };

        let path = self.output_dir.join(name);

        crate::fs::validate_output_files_overwriting(
            &*self.terminal,
            self.overwrite,
            [path.clone()],
        )
        .await?;

        Ok(path)
    }

    async fn load_clips(&self, plan: &EditPlan) -> Result<Vec<LoadedClip>> {
        let clips = plan.clips().collect_vec();
        let total = clips.len();

        let bar = self
            .progress
            .scoped(100, "Loading clips", OperationKind::Loading);

        let share = 100 / total as u64;
        let mut loaded = Vec::with_capacity(total);

        for (i, clip) in clips.into_iter().enumerate() {
            let info = self
                .ffmpeg
                .probe(&clip.path)
                .instrument(info_span!("load", role = %clip.role))
                .await
                .with_context(|| format!("Failed to load the {} `{}`", clip.role, clip.path))?;

            if let Some(trim) = clip.trim {
                trim.ensure_within(info.duration)?;
            }

            debug!(
                role = %clip.role,
                duration = %duration::format(info.duration),
                video = ?info.video,
                has_audio = info.has_audio,
                "Loaded {}",
                clip.path,
            );

            // The last clip takes the remainder of the integer division
            let amount = if i + 1 == total {
                100 - bar.position()
            } else {
                share
            };

            bar.inc(amount);

            loaded.push(LoadedClip {
                clip: clip.clone(),
                info,
            });
        }

        bar.finish();

        Ok(loaded)
    }

    /// Writes the filter graph into the script file in the given directory
    async fn combine(&self, clips: &[LoadedClip], dir: &Utf8Path) -> Result<Utf8PathBuf> {
        let bar = self
            .progress
            .scoped(100, "Combining clips", OperationKind::Combining);

        let graph = render::filter_graph(clips)?;
        bar.inc(50);

        let script = dir.join(FILTER_SCRIPT_FILE_NAME);
        fs::write(&script, graph).await?;
        bar.inc(50);

        bar.finish();

        Ok(script)
    }

    #[instrument(name = "export", skip_all, fields(output = %output))]
    async fn export(
        &self,
        clips: &[LoadedClip],
        filter_script: &Utf8Path,
        output: &Utf8Path,
    ) -> Result {
        let bar = self
            .progress
            .scoped(100, "Exporting", OperationKind::Exporting);

        bar.enable_steady_tick(Duration::from_millis(200));

        info!("🚀 Exporting to {}", display::path(&output));

        let args = render::ffmpeg_args(clips, filter_script, output, self.threads);

        if let Err(err) = self.ffmpeg.run(args).await {
            if fs::remove_file(output).await.not_found_as_none()?.is_some() {
                debug!("Removed the partially written output {output}");
            }
            return Err(err.context(EXPORT_FAILURE_HINT));
        }

        bar.inc(100);
        bar.finish();

        Ok(())
    }

    fn cleanup(&self, temp_dir: tempfile::TempDir) -> Result {
        let bar = self.progress.scoped(100, "Cleanup", OperationKind::Cleanup);

        temp_dir
            .close()
            .context("Failed to remove the temporary directory")?;

        bar.inc(100);
        bar.finish();

        Ok(())
    }
}
