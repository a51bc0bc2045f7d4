//! Byte-level line reading.
//!
//! Input files are read as raw `\n` separated lines so that a single line
//! which is not valid UTF-8 can be rejected on its own instead of failing
//! the whole read.

use std::io::BufRead;

use crate::error::{BoolmergeError, Result};

/// Raw lines of a reader, without the trailing `\n` or `\r\n`.
///
/// The outer `io::Result` carries read failures, the inner `Result` carries
/// a per-line decoding failure as a `Parse` error.
pub fn raw_lines<R: BufRead>(reader: R) -> impl Iterator<Item = std::io::Result<Result<String>>> {
    reader.split(b'\n').map(|bytes| bytes.map(decode_line))
}

/// Decode one line, stripping a trailing `\r`.
pub fn decode_line(mut bytes: Vec<u8>) -> Result<String> {
    if bytes.last() == Some(&b'\r') {
        bytes.pop();
    }
    String::from_utf8(bytes)
        .map_err(|e| BoolmergeError::parse(format!("line is not valid UTF-8: {e}")))
}
