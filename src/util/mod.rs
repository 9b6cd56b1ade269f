pub(crate) mod cmd;
pub(crate) mod duration;
pub(crate) mod error;
pub(crate) mod input;
pub(crate) mod iter;
pub(crate) mod path;

#[cfg(test)]
pub(crate) mod testing;
