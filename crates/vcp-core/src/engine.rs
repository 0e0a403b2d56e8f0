//! Top-level dispatch: route a request to the file or directory path and own
//! the statistics measurement window.

use crate::copy::{copy_file, CopyOptions, OverwritePrompt};
use crate::errors::{CopyError, CopyResult};
use crate::stats::CopyStats;
use crate::walk::{copy_tree, ProgressObserver};
use std::path::{Path, PathBuf};

/// Immutable parameters for one invocation, built once from validated input.
#[derive(Debug, Clone)]
pub struct CopyRequest {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub options: CopyOptions,
}

/// Run one copy operation to completion. The measurement window is closed
/// even when the copy fails, so a duration stays computable afterwards.
pub fn execute(
    request: &CopyRequest,
    prompt: &dyn OverwritePrompt,
    observer: &dyn ProgressObserver,
) -> CopyResult<CopyStats> {
    if request.options.chunk_size == 0 {
        return Err(CopyError::invalid_input("chunk size must be positive", None));
    }
    let mut stats = CopyStats::new();
    stats.start();
    let outcome = dispatch(request, prompt, observer, &mut stats);
    stats.finish();
    outcome?;
    Ok(stats)
}

fn dispatch(
    request: &CopyRequest,
    prompt: &dyn OverwritePrompt,
    observer: &dyn ProgressObserver,
    stats: &mut CopyStats,
) -> CopyResult<()> {
    if request.source.is_file() {
        let destination = file_destination(&request.source, &request.destination);
        copy_file(&request.source, &destination, &request.options, prompt, stats)?;
        Ok(())
    } else {
        copy_tree(
            &request.source,
            &request.destination,
            &request.options,
            prompt,
            observer,
            stats,
        )
    }
}

/// Copying a file onto an existing directory targets a file of the same base
/// name inside it, the usual `cp file dir/` rule.
fn file_destination(source: &Path, destination: &Path) -> PathBuf {
    if destination.is_dir() {
        if let Some(name) = source.file_name() {
            return destination.join(name);
        }
    }
    destination.to_path_buf()
}
