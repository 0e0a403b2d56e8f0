//! Chunked streaming primitives shared by hashing and copying.

use std::io::{self, Read};

/// Default chunk size for streamed reads and writes. Matches the standard
/// library's default I/O buffer capacity.
pub const DEFAULT_CHUNK_SIZE: usize = 8 * 1024;

/// Drive `reader` to exhaustion in chunks of at most `chunk_size` bytes,
/// handing each filled slice to `sink`. Returns the total number of bytes
/// consumed.
pub fn process_chunks<R, F>(mut reader: R, chunk_size: usize, mut sink: F) -> io::Result<u64>
where
    R: Read,
    F: FnMut(&[u8]) -> io::Result<()>,
{
    let mut buf = vec![0u8; chunk_size.max(1)];
    let mut total = 0u64;
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        sink(&buf[..n])?;
        total += n as u64;
    }
    Ok(total)
}
