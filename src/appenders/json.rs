//! JSON appender for structured output
//!
//! Writes each entry as a single-line JSON object (JSONL) in the same shape
//! that is handed to the remote publish callback. With [`JsonAppender::pretty`]
//! enabled each object spans several lines instead, and the output is no
//! longer JSONL.

use crate::core::{Appender, LogEntry, Result};
use std::io::{self, Write};

/// Structured sink writing JSON lines to any writer
pub struct JsonAppender<W: Write + Send + Sync> {
    writer: W,
    pretty: bool,
}

impl JsonAppender<io::Stdout> {
    /// JSON lines on standard output
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send + Sync> JsonAppender<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            pretty: false,
        }
    }

    /// Indent each object over several lines; breaks the one-object-per-line layout
    #[must_use]
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send + Sync> Appender for JsonAppender<W> {
    fn name(&self) -> &str {
        "json"
    }

    fn append(&mut self, entry: &LogEntry) -> Result<()> {
        let json = if self.pretty {
            entry.to_json_pretty()?
        } else {
            entry.to_json()?
        };

        writeln!(self.writer, "{}", json)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
