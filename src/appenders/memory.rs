//! In-memory appender for capturing output in tests

use crate::core::{Appender, LogContext, LogEntry, LogLevel, OutputStream, Result};
use parking_lot::Mutex;
use std::sync::Arc;

/// One record as it would have reached the console.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedLine {
    pub stream: OutputStream,
    pub level: LogLevel,
    pub line: String,
    pub context: Option<LogContext>,
    pub stack_trace: Option<String>,
}

/// Appender that keeps every record in memory.
///
/// Clones share the same buffer: hand one clone to the logger builder and
/// keep another to inspect what was written.
///
/// ```
/// use client_logger::prelude::*;
///
/// let sink = MemoryAppender::new();
/// let logger = Logger::builder()
///     .min_level(LogLevel::Debug)
///     .console_appender(sink.clone())
///     .build();
///
/// logger.child(LogContext::for_component("Jobs")).info("loaded");
/// assert!(sink.contents().contains(r#"{"component":"Jobs"}"#));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryAppender {
    lines: Arc<Mutex<Vec<CapturedLine>>>,
}

impl MemoryAppender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<CapturedLine> {
        self.lines.lock().clone()
    }

    pub fn last(&self) -> Option<CapturedLine> {
        self.lines.lock().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lines.lock().clear();
    }

    /// Everything written, as it would appear on the terminal
    pub fn contents(&self) -> String {
        let lines = self.lines.lock();
        let mut out = String::new();
        for captured in lines.iter() {
            out.push_str(&captured.line);
            out.push('\n');
            if let Some(stack_trace) = &captured.stack_trace {
                out.push_str(stack_trace);
                out.push('\n');
            }
        }
        out
    }
}

impl Appender for MemoryAppender {
    fn append(&mut self, entry: &LogEntry, line: &str) -> Result<()> {
        self.lines.lock().push(CapturedLine {
            stream: OutputStream::for_level(entry.level),
            level: entry.level,
            line: line.to_string(),
            context: entry.context.clone(),
            stack_trace: entry.stack_trace.clone(),
        });
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
