//! Progress bars with consistent styling for every stage of the editing flow.
//!
//! The bars are driven by fixed totals (usually `100` with `%` as the unit)
//! that the caller advances manually once a stage is done, because the
//! external encoder doesn't give us a reliable measure of the work left.

use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::ops::Deref;

/// Kind of the operation the progress is reported for. Determines the
/// color of the bar.
#[derive(strum::Display, strum::EnumIter, Debug, Clone, Copy, PartialEq, Eq)]
#[strum(serialize_all = "kebab-case")]
pub(crate) enum OperationKind {
    Loading,
    Processing,
    Combining,
    Exporting,
    Cleanup,
    Default,
}

impl OperationKind {
    pub(crate) fn color(self) -> &'static str {
        match self {
            Self::Loading => "green",
            Self::Processing => "blue",
            Self::Combining => "yellow",
            Self::Exporting => "magenta",
            Self::Cleanup => "red",
            Self::Default => "cyan",
        }
    }
}

/// Factory of progress bars. All bars share a single [`MultiProgress`], so
/// the bars of the finished stages stay on the screen above the running ones.
/// When disabled, it still returns fully functional bars, but they are never
/// drawn.
#[derive(Debug, Clone)]
pub(crate) struct ProgressTracker {
    multi: MultiProgress,
}

impl ProgressTracker {
    pub(crate) fn new(enabled: bool) -> Self {
        if enabled {
            Self::with_draw_target(ProgressDrawTarget::stderr())
        } else {
            Self::with_draw_target(ProgressDrawTarget::hidden())
        }
    }

    pub(crate) fn with_draw_target(target: ProgressDrawTarget) -> Self {
        Self {
            multi: MultiProgress::with_draw_target(target),
        }
    }

    fn new_bar(&self, total: u64) -> ProgressBar {
        self.multi.add(ProgressBar::new(total))
    }

    /// Creates a progress bar. It's the caller's responsibility to finish it.
    pub(crate) fn bar(
        &self,
        total: u64,
        desc: &str,
        kind: OperationKind,
        unit: &str,
    ) -> ProgressBar {
        let bar = self.new_bar(total);
        bar.set_style(style(kind.color(), unit));
        bar.set_prefix(desc.to_owned());
        bar
    }

    /// Same as [`Self::bar`] with `%` as the unit, but the bar stays on the
    /// screen at its last position once the returned guard is dropped.
    pub(crate) fn scoped(&self, total: u64, desc: &str, kind: OperationKind) -> ScopedProgressBar {
        ScopedProgressBar(self.bar(total, desc, kind, "%"))
    }

    pub(crate) fn update(bar: &ProgressBar, amount: u64) {
        bar.inc(amount);
    }

    pub(crate) fn set_description(bar: &ProgressBar, desc: &str) {
        bar.set_prefix(desc.to_owned());
    }

    /// Two bars drawn one below another: the outer one counts items, the
    /// inner one shows the progress of the current item and disappears when
    /// it's finished.
    pub(crate) fn nested(
        &self,
        outer_total: u64,
        outer_desc: &str,
        inner_total: u64,
        inner_desc: &str,
    ) -> NestedProgress {
        let outer = self.bar(outer_total, outer_desc, OperationKind::Loading, " item");
        let inner = self.bar(inner_total, inner_desc, OperationKind::Processing, "%");

        NestedProgress {
            multi: self.multi.clone(),
            outer,
            inner,
        }
    }
}

fn style(color: &str, unit: &str) -> ProgressStyle {
    let template = format!(
        "{{prefix}}: {{percent:>3}}% [{{bar:40.{color}/black}}] \
        {{pos}}/{{len}}{unit} [{{elapsed_precise}}<{{eta}}] {{msg}}"
    );

    ProgressStyle::with_template(&template)
        .unwrap_or_else(|err| panic!("BUG: invalid progress bar template `{template}`: {err}"))
        .progress_chars("█▉▊▋▌▍▎▏ ")
}

/// Progress bar that is left on the screen at its current position when
/// dropped, even if the work was interrupted by an error
#[derive(Debug)]
pub(crate) struct ScopedProgressBar(ProgressBar);

impl Deref for ScopedProgressBar {
    type Target = ProgressBar;

    fn deref(&self) -> &ProgressBar {
        &self.0
    }
}

impl Drop for ScopedProgressBar {
    fn drop(&mut self) {
        if !self.0.is_finished() {
            self.0.abandon();
        }
    }
}

#[derive(Debug)]
pub(crate) struct NestedProgress {
    pub(crate) multi: MultiProgress,
    pub(crate) outer: ProgressBar,
    pub(crate) inner: ProgressBar,
}

impl NestedProgress {
    /// Marks the current item as done and resets the inner bar for the next one
    pub(crate) fn next_item(&self, inner_desc: &str) {
        self.outer.inc(1);
        self.inner.reset();
        self.inner.set_prefix(inner_desc.to_owned());
    }

    pub(crate) fn finish(&self) {
        self.inner.finish_and_clear();
        self.outer.finish();
    }
}

/// Tracks the overall progress of a process consisting of multiple steps
#[derive(Debug)]
pub(crate) struct StepTracker {
    title: String,
    bar: ProgressBar,
}

impl StepTracker {
    pub(crate) fn new(tracker: &ProgressTracker, total_steps: u64, title: &str) -> Self {
        let bar = tracker.bar(total_steps, title, OperationKind::Default, " step");
        Self {
            title: title.to_owned(),
            bar,
        }
    }

    pub(crate) fn next_step(&self, step_name: &str) {
        self.bar.set_prefix(format!("{} - {step_name}", self.title));
        self.bar.inc(1);
    }

    pub(crate) fn finish(&self) {
        self.bar.finish();
    }
}

impl Drop for StepTracker {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.abandon();
        }
    }
}
