//! Chunked line reading for large contribution files.
//!
//! Lines are delivered in batches of roughly `size_hint` bytes so the driver
//! can process and flush output per chunk without holding the whole file.

use std::io::BufRead;

use donors_core::Result;
use tracing::debug;

// ── ChunkedLineReader ─────────────────────────────────────────────────────────

/// Reads whole lines in chunks whose combined size reaches a byte hint.
///
/// Each chunk keeps collecting lines until at least `size_hint` bytes
/// (terminators included) have been consumed; the last chunk may be
/// smaller. Returned lines have `\n` / `\r\n` stripped. Invalid UTF-8 is
/// replaced with U+FFFD so the field layout of the line survives.
pub struct ChunkedLineReader<R> {
    inner: R,
    size_hint: usize,
    buf: Vec<u8>,
    lines_read: u64,
    chunks_read: u64,
}

impl<R: BufRead> ChunkedLineReader<R> {
    /// `size_hint` of zero is treated as one byte, i.e. one line per chunk.
    pub fn new(inner: R, size_hint: usize) -> Self {
        Self {
            inner,
            size_hint: size_hint.max(1),
            buf: Vec::new(),
            lines_read: 0,
            chunks_read: 0,
        }
    }

    /// Next chunk of lines, or `None` at end of input.
    pub fn next_chunk(&mut self) -> Result<Option<Vec<String>>> {
        let mut lines = Vec::new();
        let mut consumed = 0usize;

        while consumed < self.size_hint {
            self.buf.clear();
            let n = self.inner.read_until(b'\n', &mut self.buf)?;
            if n == 0 {
                break;
            }
            consumed += n;
            lines.push(decode_line(&self.buf));
        }

        if lines.is_empty() {
            return Ok(None);
        }

        self.lines_read += lines.len() as u64;
        self.chunks_read += 1;
        debug!(
            chunk = self.chunks_read,
            lines = lines.len(),
            bytes = consumed,
            "read chunk"
        );
        Ok(Some(lines))
    }

    /// Total lines returned so far.
    pub fn lines_read(&self) -> u64 {
        self.lines_read
    }

    /// Total chunks returned so far.
    pub fn chunks_read(&self) -> u64 {
        self.chunks_read
    }
}

/// Strip the line terminator and decode lossily.
fn decode_line(raw: &[u8]) -> String {
    let mut end = raw.len();
    if end > 0 && raw[end - 1] == b'\n' {
        end -= 1;
        if end > 0 && raw[end - 1] == b'\r' {
            end -= 1;
        }
    }
    String::from_utf8_lossy(&raw[..end]).into_owned()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
