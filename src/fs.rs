use crate::display;
use crate::prelude::*;
use crate::util::input::{self, Terminal};
use crate::util::path::has_extension;
use futures::prelude::*;

pub(crate) const VIDEO_EXTENSION: &str = "mp4";

/// The outro is always the same file in the intros directory
pub(crate) const OUTRO_FILE_NAME: &str = "mainoutro.mp4";

/// Returns the names of the files in the directory that have the given
/// extension. Subdirectories are skipped. The names are sorted to make the
/// menus stable between runs.
pub(crate) async fn list_media(dir: &Utf8Path, extension: &str) -> Result<Vec<String>> {
    let is_dir = fs::metadata(dir)
        .await
        .not_found_as_none()?
        .map(|meta| meta.is_dir())
        .unwrap_or(false);

    ensure!(is_dir, "Directory {} not found!", display::path(&dir));

    let dir = fs::read_dir(dir).await?;

    let entries: Vec<_> = read_dir_stream(dir).try_collect().await?;

    let mut names = Vec::with_capacity(entries.len());

    for entry in entries {
        if !entry.file_type().await?.is_file() {
            continue;
        }

        let path: Utf8PathBuf = entry.path().try_into()?;

        if !has_extension(&path, extension) {
            continue;
        }

        if let Some(name) = path.file_name() {
            names.push(name.to_owned());
        }
    }

    names.sort();

    Ok(names)
}

fn read_dir_stream(dir: fs::ReadDir) -> impl futures::Stream<Item = Result<fs::DirEntry>> {
    stream::unfold(dir, |mut dir| async move {
        dir.next_entry()
            .await
            .err_into()
            .transpose()
            .map(|entry| (entry, dir))
    })
}

pub(crate) async fn list_recordings(dir: &Utf8Path) -> Result<Vec<String>> {
    list_media(dir, VIDEO_EXTENSION).await
}

/// Intros live next to the outro, so only the files mentioning `intro`
/// in their name are considered
pub(crate) async fn list_intros(dir: &Utf8Path) -> Result<Vec<String>> {
    let videos = list_media(dir, VIDEO_EXTENSION).await?;

    Ok(videos
        .into_iter()
        .filter(|name| name.to_lowercase().contains("intro"))
        .collect())
}

pub(crate) async fn outro_path(dir: &Utf8Path) -> Result<Option<Utf8PathBuf>> {
    let path = dir.join(OUTRO_FILE_NAME);

    let exists = fs::metadata(&path)
        .await
        .not_found_as_none()?
        .map(|meta| meta.is_file())
        .unwrap_or(false);

    if !exists {
        warn!("Outro {} not found! Continuing without it", display::path(&path));
        return Ok(None);
    }

    Ok(Some(path))
}

pub(crate) async fn validate_output_files_overwriting(
    terminal: &dyn Terminal,
    overwrite: bool,
    paths: impl IntoIterator<Item = Utf8PathBuf>,
) -> Result {
    let existing_files: Vec<_> = paths
        .into_iter()
        .filter_map(|path| {
            path.try_exists()
                .with_context(|| format!("Failed to check if the output file exists: `{path}`"))
                .map(|exists| exists.then_some(path))
                .transpose()
        })
        .try_collect()?;

    if existing_files.is_empty() {
        return Ok(());
    }

    let files = existing_files.iter().format_with("\n", |path, f| {
        f(&format_args!("- {}", display::bold(&path)))
    });

    let message = format!("The following output files already exist.\n{files}\nOverwrite them?");

    input::read_confirmation(terminal, &message, overwrite).await?;

    Ok(())
}
