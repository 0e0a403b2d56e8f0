use clap::Parser;
use std::path::PathBuf;
use vcp_core::chunk::DEFAULT_CHUNK_SIZE;

#[derive(Parser)]
#[command(name = "vcp")]
#[command(about = "Copy a file or directory tree, skipping content-identical files")]
pub struct Cli {
    /// File or directory to copy from
    #[arg(required_unless_present = "version")]
    pub source: Option<PathBuf>,
    /// File or directory to copy to; a file copied to an existing directory
    /// lands inside it under the same name
    #[arg(required_unless_present = "version")]
    pub destination: Option<PathBuf>,
    /// Chunk size in bytes for streamed reads, writes and hashing
    #[arg(
        short = 'b',
        long = "buffer",
        value_name = "BYTES",
        default_value_t = DEFAULT_CHUNK_SIZE as u64,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub buffer: u64,
    /// Overwrite existing files that differ: -o to always overwrite,
    /// --overwrite=false to never; omit the flag to be asked per file
    #[arg(
        short = 'o',
        long = "overwrite",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_name = "BOOL"
    )]
    pub overwrite: Option<bool>,
    /// Decide and report without copying anything
    #[arg(short = 'd', long = "dry-run")]
    pub dry_run: bool,
    /// Print version and exit
    #[arg(short = 'v', long = "version")]
    pub version: bool,
    /// Suppress the start line, progress bar and summary; errors still go to
    /// stderr
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,
}
