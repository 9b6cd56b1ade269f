mod demo;
mod edit;

use crate::prelude::*;
use async_trait::async_trait;

pub use demo::*;
pub use edit::*;

#[async_trait]
pub(crate) trait Cmd {
    async fn run(self) -> Result;
}
