pub(crate) use crate::util::error::{IoResultExt, ResultExt};
pub(crate) use crate::util::path::PathExt;
pub(crate) use anyhow::{bail, ensure, Context};
pub(crate) use camino::{Utf8Path, Utf8PathBuf};
pub(crate) use fs_err::tokio as fs;
pub(crate) use itertools::Itertools;
pub(crate) use tracing::{debug, info, info_span, instrument, warn, Instrument};

pub(crate) type Result<T = (), E = anyhow::Error> = std::result::Result<T, E>;
