use std::io::{self, ErrorKind, Stdout, Write};

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::{OutputConfig, OutputFormat};

/// One status record in the JSON output shape
#[derive(Debug, Serialize)]
struct Record<'a> {
    text: &'a str,
    class: String,
    alt: &'a str,
}

/// Writes status lines, one per update, flushed immediately.
///
/// Once the reader goes away (`BrokenPipe`) the sink closes and further
/// lines are dropped without error.
#[derive(Debug)]
pub struct OutputSink<W: Write> {
    writer: W,
    format: OutputFormat,
    class_prefix: String,
    closed: bool,
}

impl OutputSink<Stdout> {
    /// Sink writing to standard output
    pub fn stdout(config: &OutputConfig) -> Self {
        Self::new(io::stdout(), config)
    }
}

impl<W: Write> OutputSink<W> {
    /// Sink writing to an arbitrary writer
    pub fn new(writer: W, config: &OutputConfig) -> Self {
        Self {
            writer,
            format: config.format,
            class_prefix: config.class_prefix.clone(),
            closed: false,
        }
    }

    /// Write the status for a player.
    ///
    /// `None` text renders as a blank line in text mode and as a record
    /// with empty text in JSON mode.
    pub fn emit(&mut self, text: Option<&str>, player_name: &str) {
        match self.format {
            OutputFormat::Text => self.write_line(text.unwrap_or_default()),
            OutputFormat::Json => {
                let record = Record {
                    text: text.unwrap_or_default(),
                    class: format!("{}{player_name}", self.class_prefix),
                    alt: player_name,
                };

                match serde_json::to_string(&record) {
                    Ok(line) => self.write_line(&line),
                    Err(e) => warn!("Failed to serialize status record: {e}"),
                }
            }
        }
    }

    /// Write a blank line, hiding the module
    pub fn clear(&mut self) {
        self.write_line("");
    }

    /// Whether the reader has gone away
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Underlying writer
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    fn write_line(&mut self, line: &str) {
        if self.closed {
            return;
        }

        let result = writeln!(self.writer, "{line}").and_then(|()| self.writer.flush());

        match result {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::BrokenPipe => {
                debug!("Output reader closed, dropping further lines");
                self.closed = true;
            }
            Err(e) => warn!("Failed to write status line: {e}"),
        }
    }
}
