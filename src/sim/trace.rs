//! Trace Reader.
//!
//! Parses memory traces with one record per line:
//!
//! ```text
//! I 0400d7d4,8
//!  L 7ff0005c8,8
//!  S 7ff0005d0 4
//!  M 0421c7f0,4
//! ```
//!
//! The operation character is followed by a hexadecimal address (an `0x`
//! prefix is optional) and a decimal size. Address and size are separated
//! by whitespace or a single comma. Blank lines are skipped. The first record that does not
//! match this shape ends the stream; events read before it are kept.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::common::data::{AccessKind, TraceEvent};
use crate::common::error::{ConfigError, TraceError};

/// Parses a single trace line.
///
/// # Returns
///
/// * `Ok(Some(event))` for a well-formed record.
/// * `Ok(None)` for a blank line.
/// * `Err(TraceError::Malformed)` otherwise, tagged with `line_no`.
pub fn parse_record(line_no: usize, text: &str) -> Result<Option<TraceEvent>, TraceError> {
    let malformed = |reason| TraceError::Malformed {
        line: line_no,
        text: text.to_string(),
        reason,
    };

    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let mut chars = trimmed.chars();
    let op = chars.next().ok_or_else(|| malformed("empty record"))?;
    let kind = AccessKind::from_op(op).ok_or_else(|| malformed("unknown operation"))?;

    let (addr_text, size_text) = split_operands(chars.as_str().trim_start())
        .ok_or_else(|| malformed("expected address and size"))?;

    let digits = addr_text
        .strip_prefix("0x")
        .or_else(|| addr_text.strip_prefix("0X"))
        .unwrap_or(addr_text);
    let address = u64::from_str_radix(digits, 16).map_err(|_| malformed("invalid address"))?;
    let size = size_text
        .parse::<u32>()
        .map_err(|_| malformed("invalid size"))?;

    Ok(Some(TraceEvent::new(kind, address, size)))
}

/// Splits `"addr,size"` or `"addr size"` into its two operands.
fn split_operands(operands: &str) -> Option<(&str, &str)> {
    let addr_end = operands.find(|c: char| c == ',' || c.is_whitespace())?;
    let (addr, rest) = operands.split_at(addr_end);

    let rest = rest.trim_start();
    let rest = rest.strip_prefix(',').unwrap_or(rest).trim_start();

    let mut tokens = rest.split_whitespace();
    let size = tokens.next()?;
    if addr.is_empty() || tokens.next().is_some() {
        return None;
    }
    Some((addr, size))
}

/// Streams `TraceEvent`s from a buffered reader.
///
/// Iteration ends at EOF or at the first bad record. In the latter case
/// the reason is available from `stopped_by`.
pub struct TraceReader<R> {
    reader: R,
    buf: String,
    line_no: usize,
    stopped: Option<TraceError>,
    done: bool,
}

impl TraceReader<BufReader<File>> {
    /// Opens a trace file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::TraceOpen` if the file cannot be opened.
    pub fn open(path: &Path) -> Result<Self, ConfigError> {
        let file = File::open(path).map_err(|source| ConfigError::TraceOpen {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> TraceReader<R> {
    /// Wraps a buffered reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: String::new(),
            line_no: 0,
            stopped: None,
            done: false,
        }
    }

    /// The error that ended the stream early, if any.
    pub fn stopped_by(&self) -> Option<&TraceError> {
        self.stopped.as_ref()
    }

    /// Number of lines consumed so far.
    pub fn lines_read(&self) -> usize {
        self.line_no
    }

    fn stop(&mut self, err: TraceError) {
        tracing::warn!(error = %err, "trace ended early");
        self.stopped = Some(err);
        self.done = true;
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = TraceEvent;

    fn next(&mut self) -> Option<TraceEvent> {
        while !self.done {
            self.buf.clear();
            match self.reader.read_line(&mut self.buf) {
                Ok(0) => self.done = true,
                Ok(_) => {
                    self.line_no += 1;
                    match parse_record(self.line_no, &self.buf) {
                        Ok(Some(event)) => return Some(event),
                        Ok(None) => {}
                        Err(err) => self.stop(err),
                    }
                }
                Err(source) => {
                    let line = self.line_no + 1;
                    self.stop(TraceError::Io { line, source });
                }
            }
        }
        None
    }
}
