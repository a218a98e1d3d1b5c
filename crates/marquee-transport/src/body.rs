// SPDX-FileCopyrightText: 2026 Marquee Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Size-bounded response body accumulation.
//!
//! Bodies are kept for status checks and diagnostics only, so anything past
//! [`MAX_RESPONSE_BYTES`] is dropped and reading stops.

/// Maximum response body kept in memory (10,000 bytes).
pub const MAX_RESPONSE_BYTES: usize = 10_000;

/// Appended to a body that was cut at the limit.
pub const TRUNCATION_MARKER: &str = "...[truncated]";

/// Accumulates response chunks up to a byte limit.
#[derive(Debug)]
pub struct BoundedBody {
    buf: Vec<u8>,
    limit: usize,
    truncated: bool,
}

impl BoundedBody {
    /// Creates an empty body that keeps at most `limit` bytes.
    pub fn new(limit: usize) -> Self {
        Self {
            buf: Vec::new(),
            limit,
            truncated: false,
        }
    }

    /// Appends a chunk. Returns `false` once the limit has been exceeded and
    /// the caller should stop reading.
    pub fn push(&mut self, chunk: &[u8]) -> bool {
        let room = self.limit - self.buf.len();
        if chunk.len() > room {
            self.buf.extend_from_slice(&chunk[..room]);
            self.truncated = true;
            return false;
        }
        self.buf.extend_from_slice(chunk);
        true
    }

    /// Whether bytes were dropped.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Decodes the kept bytes, appending [`TRUNCATION_MARKER`] when cut.
    ///
    /// A multi-byte character split by the cut is dropped rather than
    /// replaced.
    pub fn finish(self) -> String {
        let bytes = match std::str::from_utf8(&self.buf) {
            Err(e) if self.truncated && e.error_len().is_none() => &self.buf[..e.valid_up_to()],
            _ => &self.buf[..],
        };
        let mut text = String::from_utf8_lossy(bytes).into_owned();
        if self.truncated {
            text.push_str(TRUNCATION_MARKER);
        }
        text
    }
}

/// Reads `response` chunk by chunk, stopping at `limit` bytes.
pub async fn read_bounded(
    mut response: reqwest::Response,
    limit: usize,
) -> Result<String, reqwest::Error> {
    let mut body = BoundedBody::new(limit);
    while let Some(chunk) = response.chunk().await? {
        if !body.push(&chunk) {
            break;
        }
    }
    Ok(body.finish())
}
