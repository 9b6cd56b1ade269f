use crate::prelude::*;
use crate::progress::{OperationKind, ProgressTracker, StepTracker};
use async_trait::async_trait;
use clap::Parser;
use std::time::Duration;
use strum::IntoEnumIterator;

const EDITING_STEPS: &[&str] = &[
    "Selecting recording",
    "Setting trim times",
    "Selecting intro",
    "Loading clips",
    "Combining clips",
    "Exporting video",
    "Cleanup",
];

/// Show how the progress bars of every stage of the editing flow look like
/// by simulating the work without touching any video files
#[derive(Parser, Debug)]
pub struct Demo {
    /// How long every simulated chunk of work takes
    #[clap(long, default_value_t = 50)]
    delay_ms: u64,
}

#[async_trait]
impl crate::cmd::Cmd for Demo {
    async fn run(self) -> Result {
        let tracker = ProgressTracker::new(true);
        let delay = Duration::from_millis(self.delay_ms);

        info!("Basic progress bar");
        basic(&tracker, delay).await;

        info!("Step tracking");
        steps(&tracker, delay).await;

        info!("Colors of the operation kinds");
        colors(&tracker, delay).await;

        info!("Nested progress bars");
        nested(&tracker, delay).await?;

        info!("🎉 Done");

        Ok(())
    }
}

async fn basic(tracker: &ProgressTracker, delay: Duration) {
    let bar = tracker.scoped(100, "Loading data", OperationKind::Loading);

    for _ in 0..10 {
        tokio::time::sleep(delay).await;
        ProgressTracker::update(&bar, 10);
    }

    ProgressTracker::set_description(&bar, "Loaded data");
    bar.finish();
}

async fn steps(tracker: &ProgressTracker, delay: Duration) {
    let steps = StepTracker::new(tracker, EDITING_STEPS.len() as u64, "Video Editing");

    for step in EDITING_STEPS {
        steps.next_step(step);
        tokio::time::sleep(delay * 5).await;
    }

    steps.finish();
}

async fn colors(tracker: &ProgressTracker, delay: Duration) {
    for kind in OperationKind::iter() {
        let desc = kind.to_string();
        let bar = tracker.scoped(100, &desc, kind);

        for _ in 0..10 {
            tokio::time::sleep(delay).await;
            bar.inc(10);
        }

        bar.finish();
    }
}

async fn nested(tracker: &ProgressTracker, delay: Duration) -> Result<u64> {
    let videos = 3;
    let nested = tracker.nested(videos, "Videos", 100, "Video 1");

    for video in 1..=videos {
        for _ in 0..20 {
            tokio::time::sleep(delay / 5).await;
            nested.inner.inc(5);
        }

        if video < videos {
            nested.next_item(&format!("Video {}", video + 1));
        } else {
            nested.outer.inc(1);
        }
    }

    nested.finish();

    let processed = nested.outer.position();

    nested
        .multi
        .println(format!("Processed {processed} videos"))
        .context("Failed to print to the terminal")?;

    Ok(processed)
}
