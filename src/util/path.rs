use crate::prelude::*;
use easy_ext::ext;
use std::path::Path;

#[ext(PathExt)]
pub(crate) impl Path {
    fn unwrap_utf8(&self) -> &Utf8Path {
        Utf8Path::from_path(self).unwrap_or_else(|| panic!("BUG: Path is not UTF8: {self:?}"))
    }
}

/// Case-insensitive check of the file extension, e.g. both `a.mp4`
/// and `a.MP4` have the extension `mp4`.
pub(crate) fn has_extension(path: &Utf8Path, extension: &str) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case(extension))
        .unwrap_or(false)
}
