//! Disposition and copy of a single source/destination file pair.

use crate::checksum;
use crate::chunk::process_chunks;
use crate::errors::{CopyError, CopyResult};
use crate::stats::CopyStats;
use log::debug;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// Whether an existing, differing destination file may be replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverwritePolicy {
    Always,
    Never,
    /// Defer to an [`OverwritePrompt`] per conflicting file.
    Ask,
}

/// Outcome of evaluating one source/destination pair. Computed fresh per
/// pair, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileDisposition {
    /// Content already identical, or source and destination are the same path.
    Skip,
    Copy,
    /// Would have been copied; suppressed by dry-run.
    DryRunCopy,
    /// Destination exists and differs; surfaced as an overwrite-refused error.
    Conflict,
}

/// Injected capability consulted when the policy is [`OverwritePolicy::Ask`].
pub trait OverwritePrompt {
    /// Whether `destination` may be overwritten. Declining is treated exactly
    /// like [`OverwritePolicy::Never`].
    fn confirm_overwrite(&self, destination: &Path) -> CopyResult<bool>;
}

/// Non-interactive prompt that declines every overwrite. With it, `Ask`
/// behaves like `Never`; callers with a terminal supply their own.
pub struct DenyOverwrite;

impl OverwritePrompt for DenyOverwrite {
    fn confirm_overwrite(&self, _destination: &Path) -> CopyResult<bool> {
        Ok(false)
    }
}

/// The per-file slice of a request, shared by every pair in a traversal.
#[derive(Debug, Clone, Copy)]
pub struct CopyOptions {
    /// Chunk size in bytes for streamed reads, writes and hashing.
    pub chunk_size: usize,
    pub overwrite: OverwritePolicy,
    pub dry_run: bool,
}

/// Decide and execute the fate of one source file against a destination
/// path. Statistics are updated on the `Copy` and `DryRunCopy` paths only,
/// before any filesystem mutation, so dry-run reports what would be copied.
pub fn copy_file(
    source: &Path,
    destination: &Path,
    options: &CopyOptions,
    prompt: &dyn OverwritePrompt,
    stats: &mut CopyStats,
) -> CopyResult<FileDisposition> {
    let source_abs =
        std::path::absolute(source).map_err(|err| CopyError::io(err, Some(source)))?;
    let destination_abs =
        std::path::absolute(destination).map_err(|err| CopyError::io(err, Some(destination)))?;
    if source_abs == destination_abs {
        debug!("{}: source and destination are the same file", source.display());
        return Ok(FileDisposition::Skip);
    }

    if !source.is_file() {
        return Err(CopyError::invalid_input("not a regular file", Some(source)));
    }
    let source_len = source
        .metadata()
        .map_err(|err| CopyError::io(err, Some(source)))?
        .len();

    if destination.exists() {
        if !destination.is_file() {
            return Err(CopyError::invalid_input(
                "destination exists but is not a regular file",
                Some(destination),
            ));
        }
        let destination_len = destination
            .metadata()
            .map_err(|err| CopyError::io(err, Some(destination)))?
            .len();
        // Equal sizes are not proof of equal content; compare full digests.
        // Differing sizes are proof of differing content, so skip the hash.
        if source_len == destination_len
            && checksum::files_identical(source, destination, options.chunk_size)?
        {
            debug!("{}: content identical, skipping", destination.display());
            return Ok(FileDisposition::Skip);
        }
        let allowed = match options.overwrite {
            OverwritePolicy::Always => true,
            OverwritePolicy::Never => false,
            OverwritePolicy::Ask => prompt.confirm_overwrite(destination)?,
        };
        if !allowed {
            debug!("{}: {:?}", destination.display(), FileDisposition::Conflict);
            return Err(CopyError::overwrite_refused(destination));
        }
    }

    stats.add_file(source_len);
    if options.dry_run {
        return Ok(FileDisposition::DryRunCopy);
    }

    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent).map_err(|err| CopyError::io(err, Some(parent)))?;
    }
    let reader = File::open(source).map_err(|err| CopyError::io(err, Some(source)))?;
    let mut writer =
        File::create(destination).map_err(|err| CopyError::io(err, Some(destination)))?;
    process_chunks(reader, options.chunk_size, |chunk| writer.write_all(chunk))
        .map_err(|err| CopyError::io(err, Some(destination)))?;
    Ok(FileDisposition::Copy)
}
