//! Arguments for the `export` subcommand.

use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Output file path (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Force gzip compression (auto-detected from .gz extension otherwise)
    #[arg(long)]
    pub gzip: bool,
}

impl ExportArgs {
    /// Whether the output should be gzip compressed.
    pub fn should_compress(&self) -> bool {
        if self.gzip {
            return true;
        }
        self.output
            .as_ref()
            .and_then(|path| path.extension())
            .is_some_and(|ext| ext == "gz")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gz_extension_implies_compression() {
        let args = ExportArgs {
            output: Some(PathBuf::from("dump.json.gz")),
            gzip: false,
        };
        assert!(args.should_compress());

        let args = ExportArgs {
            output: Some(PathBuf::from("dump.json")),
            gzip: false,
        };
        assert!(!args.should_compress());

        let args = ExportArgs {
            output: None,
            gzip: true,
        };
        assert!(args.should_compress());
    }
}
