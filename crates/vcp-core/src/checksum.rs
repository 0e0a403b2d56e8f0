//! Streamed whole-file hashing used for content-equality checks.

use crate::chunk::process_chunks;
use crate::errors::{CopyError, CopyResult};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Hash a reader's full content with BLAKE3, reading in `chunk_size` pieces.
/// The content is never materialized in memory as a whole.
pub fn hash_reader<R: Read>(reader: R, chunk_size: usize) -> io::Result<[u8; 32]> {
    let mut hasher = blake3::Hasher::new();
    process_chunks(reader, chunk_size, |chunk| {
        hasher.update(chunk);
        Ok(())
    })?;
    Ok(hasher.finalize().into())
}

/// Hash a file's full content with BLAKE3.
pub fn hash_file(path: &Path, chunk_size: usize) -> CopyResult<[u8; 32]> {
    let file = File::open(path).map_err(|err| CopyError::io(err, Some(path)))?;
    hash_reader(file, chunk_size).map_err(|err| CopyError::io(err, Some(path)))
}

/// Whether two files have byte-identical content. Both files are read fully:
/// on trees of many small, largely identical files, comparing digests is
/// faster than a byte-by-byte comparison.
pub fn files_identical(a: &Path, b: &Path, chunk_size: usize) -> CopyResult<bool> {
    Ok(hash_file(a, chunk_size)? == hash_file(b, chunk_size)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_digest_independent_of_chunk_size() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data");
        fs::write(&path, vec![0xAB; 20_000]).unwrap();
        assert_eq!(
            hash_file(&path, 512).unwrap(),
            hash_file(&path, 8192).unwrap()
        );
    }

    #[test]
    fn test_identical_files_compare_equal() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a");
        let b = dir.path().join("b");
        fs::write(&a, b"same content").unwrap();
        fs::write(&b, b"same content").unwrap();
        assert!(files_identical(&a, &b, 4).unwrap());
    }

    #[test]
    fn test_single_byte_difference_detected() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a");
        let b = dir.path().join("b");
        fs::write(&a, vec![0u8; 4096]).unwrap();
        let mut altered = vec![0u8; 4096];
        altered[4095] = 1;
        fs::write(&b, altered).unwrap();
        assert!(!files_identical(&a, &b, 1024).unwrap());
    }

    #[test]
    fn test_missing_file_reports_io() {
        let dir = tempdir().unwrap();
        let err = hash_file(&dir.path().join("missing"), 1024).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }
}
