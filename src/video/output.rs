pub(crate) const DEFAULT_FILE_NAME: &str = "final.mp4";

const EXTENSION: &str = ".mp4";

/// Turns the user's input into a file name for the output video.
///
/// Empty input falls back to [`DEFAULT_FILE_NAME`]. Only the last path
/// component is kept so that the output never escapes the output directory.
/// The `.mp4` extension is appended if it's missing. Returns `None` if there
/// is no usable name left.
pub(crate) fn normalize_file_name(input: &str) -> Option<String> {
    let input = input.trim();

    if input.is_empty() {
        return Some(DEFAULT_FILE_NAME.to_owned());
    }

    let name = input.rsplit(&['/', '\\'][..]).next().unwrap_or_default().trim();

    if matches!(name, "" | "." | "..") {
        return None;
    }

    let has_extension = name
        .len()
        .checked_sub(EXTENSION.len())
        .and_then(|split| name.get(split..))
        .map(|ext| ext.eq_ignore_ascii_case(EXTENSION))
        .unwrap_or(false);

    if !has_extension {
        return Some(format!("{name}{EXTENSION}"));
    }

    // Nothing but the extension
    if name.len() == EXTENSION.len() {
        return None;
    }

    Some(name.to_owned())
}
