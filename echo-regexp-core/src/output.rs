//! Output sink for matched and replaced text
//!
//! Wraps the destination stream, remembers whether the last byte written was
//! a newline, and appends the trailing count line.

use std::io::{self, Write};

use crate::engine::Report;
use crate::flags::Options;

/// Destination for filter output
pub struct Output<W: Write> {
    inner: W,
    last: Option<u8>,
}

impl<W: Write> Output<W> {
    /// Wrap a writer
    pub fn new(inner: W) -> Self {
        Output { inner, last: None }
    }

    /// Write a piece of text
    pub fn write_str(&mut self, text: &str) -> io::Result<()> {
        if let Some(&last) = text.as_bytes().last() {
            self.inner.write_all(text.as_bytes())?;
            self.last = Some(last);
        }
        Ok(())
    }

    /// Write the count on its own line.
    ///
    /// A newline is inserted first only when earlier output did not already
    /// end with one, so exactly one separates the data from the count.
    pub fn write_count(&mut self, count: usize) -> io::Result<()> {
        if self.last.is_some_and(|b| b != b'\n') {
            self.write_str("\n")?;
        }
        self.write_str(&format!("{}\n", count))
    }

    #[cfg(test)]
    fn is_empty(&self) -> bool {
        self.last.is_none()
    }

    /// Write the count line if requested, flush, and return the exit status
    pub fn finish(&mut self, report: &Report, options: &Options) -> io::Result<i32> {
        if options.counting {
            self.write_count(report.count)?;
        }
        self.inner.flush()?;
        Ok(report.exit_status(options))
    }

    /// Unwrap the underlying writer
    pub fn into_inner(self) -> W {
        self.inner
    }
}
