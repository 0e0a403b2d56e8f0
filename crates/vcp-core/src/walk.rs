//! Recursive directory traversal mapped onto per-file copy decisions.

use crate::copy::{copy_file, CopyOptions, OverwritePrompt};
use crate::errors::{CopyError, CopyResult};
use crate::stats::CopyStats;
use log::debug;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Observation seam for per-entry progress. Implementations must not affect
/// copy semantics; the walker works the same with [`NullObserver`].
pub trait ProgressObserver {
    /// Called once before the walk with the number of entries to visit.
    fn begin(&self, _total_entries: u64) {}
    /// Called after each entry has been handled.
    fn entry_done(&self, _path: &Path) {}
    /// Called after the last entry of a successful walk.
    fn finish(&self) {}
}

/// Observer that reports nothing.
pub struct NullObserver;

impl ProgressObserver for NullObserver {}

/// Copy every descendant of `source` under `destination`, preserving the
/// relative structure. Directories become idempotent creates (none in
/// dry-run), files are delegated to [`copy_file`]. The first error aborts
/// the remaining walk.
pub fn copy_tree(
    source: &Path,
    destination: &Path,
    options: &CopyOptions,
    prompt: &dyn OverwritePrompt,
    observer: &dyn ProgressObserver,
    stats: &mut CopyStats,
) -> CopyResult<()> {
    if !source.is_dir() {
        return Err(CopyError::invalid_input("not a directory", Some(source)));
    }
    if destination.is_file() {
        return Err(CopyError::invalid_input(
            "cannot copy a directory onto a regular file",
            Some(destination),
        ));
    }

    // Materialized up front so the observer can be given a total.
    let entries = WalkDir::new(source)
        .min_depth(1)
        .into_iter()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| {
            let path = err.path().map(Path::to_path_buf);
            match err.into_io_error() {
                Some(io_err) => CopyError::io(io_err, path.as_deref()),
                None => CopyError::invalid_input("filesystem loop detected", path.as_deref()),
            }
        })?;

    observer.begin(entries.len() as u64);
    for entry in &entries {
        let relative = entry.path().strip_prefix(source).map_err(|_| {
            CopyError::invalid_input("entry escapes the source root", Some(entry.path()))
        })?;
        let target = destination.join(relative);
        if entry.file_type().is_dir() {
            debug!("mkdir {}", target.display());
            if !options.dry_run {
                fs::create_dir_all(&target).map_err(|err| CopyError::io(err, Some(&target)))?;
            }
        } else {
            copy_file(entry.path(), &target, options, prompt, stats)?;
        }
        observer.entry_done(entry.path());
    }
    observer.finish();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::copy::{DenyOverwrite, OverwritePolicy};
    use crate::errors::ErrorKind;
    use std::cell::Cell;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn options(overwrite: OverwritePolicy, dry_run: bool) -> CopyOptions {
        CopyOptions {
            chunk_size: 1024,
            overwrite,
            dry_run,
        }
    }

    /// src/
    ///   a.txt (5 bytes)
    ///   sub/b.txt (9 bytes)
    ///   empty/
    fn tree() -> (tempfile::TempDir, PathBuf, PathBuf) {
        let dir = tempdir().unwrap();
        let src = dir.path().join("src");
        let dst = dir.path().join("dst");
        fs::create_dir_all(src.join("sub")).unwrap();
        fs::create_dir_all(src.join("empty")).unwrap();
        fs::write(src.join("a.txt"), b"aaaaa").unwrap();
        fs::write(src.join("sub").join("b.txt"), b"bbbbbbbbb").unwrap();
        (dir, src, dst)
    }

    #[test]
    fn test_copies_structure_including_empty_dirs() {
        let (_dir, src, dst) = tree();
        let mut stats = CopyStats::new();
        copy_tree(
            &src,
            &dst,
            &options(OverwritePolicy::Always, false),
            &DenyOverwrite,
            &NullObserver,
            &mut stats,
        )
        .unwrap();
        assert_eq!(fs::read(dst.join("a.txt")).unwrap(), b"aaaaa");
        assert_eq!(fs::read(dst.join("sub").join("b.txt")).unwrap(), b"bbbbbbbbb");
        assert!(dst.join("empty").is_dir());
        assert_eq!(stats.files_copied(), 2);
        assert_eq!(stats.bytes_copied(), 14);
    }

    #[test]
    fn test_dry_run_touches_nothing() {
        let (_dir, src, dst) = tree();
        let mut stats = CopyStats::new();
        copy_tree(
            &src,
            &dst,
            &options(OverwritePolicy::Always, true),
            &DenyOverwrite,
            &NullObserver,
            &mut stats,
        )
        .unwrap();
        assert!(!dst.exists());
        assert_eq!(stats.files_copied(), 2);
        assert_eq!(stats.bytes_copied(), 14);
    }

    #[test]
    fn test_source_must_be_directory() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("plain");
        fs::write(&file, b"x").unwrap();
        let mut stats = CopyStats::new();
        let err = copy_tree(
            &file,
            &dir.path().join("dst"),
            &options(OverwritePolicy::Always, false),
            &DenyOverwrite,
            &NullObserver,
            &mut stats,
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_destination_file_rejected() {
        let (dir, src, _dst) = tree();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"x").unwrap();
        let mut stats = CopyStats::new();
        let err = copy_tree(
            &src,
            &blocker,
            &options(OverwritePolicy::Always, false),
            &DenyOverwrite,
            &NullObserver,
            &mut stats,
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    struct CountingObserver {
        total: Cell<u64>,
        seen: Cell<u64>,
        finished: Cell<bool>,
    }

    impl ProgressObserver for CountingObserver {
        fn begin(&self, total_entries: u64) {
            self.total.set(total_entries);
        }

        fn entry_done(&self, _path: &Path) {
            self.seen.set(self.seen.get() + 1);
        }

        fn finish(&self) {
            self.finished.set(true);
        }
    }

    #[test]
    fn test_observer_sees_every_entry_exactly_once() {
        let (_dir, src, dst) = tree();
        let observer = CountingObserver {
            total: Cell::new(0),
            seen: Cell::new(0),
            finished: Cell::new(false),
        };
        let mut stats = CopyStats::new();
        copy_tree(
            &src,
            &dst,
            &options(OverwritePolicy::Always, false),
            &DenyOverwrite,
            &observer,
            &mut stats,
        )
        .unwrap();
        // a.txt, sub, sub/b.txt, empty
        assert_eq!(observer.total.get(), 4);
        assert_eq!(observer.seen.get(), 4);
        assert!(observer.finished.get());
    }

    #[test]
    fn test_first_conflict_aborts_walk() {
        let (_dir, src, dst) = tree();
        fs::create_dir_all(&dst).unwrap();
        // Same size as the source file, different bytes.
        fs::write(dst.join("a.txt"), b"AAAAA").unwrap();
        let mut stats = CopyStats::new();
        let err = copy_tree(
            &src,
            &dst,
            &options(OverwritePolicy::Never, false),
            &DenyOverwrite,
            &NullObserver,
            &mut stats,
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OverwriteRefused);
        assert_eq!(fs::read(dst.join("a.txt")).unwrap(), b"AAAAA");
    }
}
