//! Arguments for the `import` subcommand.

use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Snapshot file to import (plain JSON or gzip)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Append snapshot rows under fresh ids instead of replacing
    /// the current contents
    #[arg(long)]
    pub merge: bool,
}
