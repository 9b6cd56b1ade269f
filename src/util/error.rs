use easy_ext::ext;
use std::io;

#[ext(ResultExt)]
pub(crate) impl<T, E> Result<T, E> {
    fn err_into<U>(self) -> Result<T, U>
    where
        E: Into<U>,
    {
        self.map_err(Into::into)
    }
}

#[ext(IoResultExt)]
pub(crate) impl<T> io::Result<T> {
    /// Turns [`io::ErrorKind::NotFound`] into `Ok(None)`. Useful for
    /// operations that are fine to skip if the file is already gone.
    fn not_found_as_none(self) -> io::Result<Option<T>> {
        match self {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }
}
