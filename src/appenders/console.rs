//! Console appender implementation

use crate::core::{Appender, LogEntry, OutputStream, Result};
#[cfg(feature = "console")]
use colored::Colorize;
use std::io::{self, Write};

/// Writes records to the process's standard streams.
///
/// `Error` and `Warn` records go to stderr, `Info` and `Debug` to stdout.
/// A record's stack trace is written on the same stream right after its line.
#[derive(Debug, Clone, Default)]
pub struct ConsoleAppender {
    #[cfg_attr(not(feature = "console"), allow(dead_code))]
    use_colors: bool,
}

impl ConsoleAppender {
    pub fn new() -> Self {
        Self { use_colors: false }
    }

    /// Colour the line by level. Has no effect without the `console` feature.
    pub fn with_colors(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn decorate(&self, entry: &LogEntry, line: &str) -> String {
        #[cfg(feature = "console")]
        if self.use_colors {
            return line.color(entry.level.color_code()).to_string();
        }
        let _ = entry;
        line.to_string()
    }

    fn write_to<W: Write>(out: &mut W, line: &str, stack_trace: Option<&str>) -> Result<()> {
        writeln!(out, "{}", line)?;
        if let Some(stack_trace) = stack_trace {
            writeln!(out, "{}", stack_trace)?;
        }
        Ok(())
    }
}

impl Appender for ConsoleAppender {
    fn append(&mut self, entry: &LogEntry, line: &str) -> Result<()> {
        let output = self.decorate(entry, line);
        let stack_trace = entry.stack_trace.as_deref();

        match OutputStream::for_level(entry.level) {
            OutputStream::Stderr => Self::write_to(&mut io::stderr().lock(), &output, stack_trace),
            OutputStream::Stdout => Self::write_to(&mut io::stdout().lock(), &output, stack_trace),
        }
    }

    fn flush(&mut self) -> Result<()> {
        // Flush both stdout and stderr since we write to both
        io::stdout().flush()?;
        io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
