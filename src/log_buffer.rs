//! In-memory ring of recent log lines.
//!
//! While the demo owns the terminal, writing tracing output to stderr would
//! tear the alternate screen. The subscriber writes here instead and the
//! status line shows the most recent entry.

use std::collections::VecDeque;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, OnceLock};

pub const DEFAULT_MAX_LINES: usize = 500;

static GLOBAL_LOG: OnceLock<LogBufferHandle> = OnceLock::new();

pub fn set_global_log_buffer(handle: LogBufferHandle) -> bool {
    GLOBAL_LOG.set(handle).is_ok()
}

pub fn global_log_buffer() -> Option<LogBufferHandle> {
    GLOBAL_LOG.get().cloned()
}

#[derive(Debug)]
struct LogBuffer {
    lines: VecDeque<String>,
    max_lines: usize,
}

impl LogBuffer {
    fn new(max_lines: usize) -> Self {
        Self {
            lines: VecDeque::new(),
            max_lines: max_lines.max(1),
        }
    }

    fn push_line(&mut self, line: String) {
        self.lines.push_back(line);
        while self.lines.len() > self.max_lines {
            self.lines.pop_front();
        }
    }
}

#[derive(Clone, Debug)]
pub struct LogBufferHandle {
    inner: Arc<Mutex<LogBuffer>>,
}

impl LogBufferHandle {
    pub fn new(max_lines: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(LogBuffer::new(max_lines))),
        }
    }

    pub fn push(&self, line: impl Into<String>) {
        if let Ok(mut buffer) = self.inner.lock() {
            buffer.push_line(line.into());
        }
    }

    pub fn len(&self) -> usize {
        self.inner.lock().map(|b| b.lines.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn last(&self) -> Option<String> {
        self.inner.lock().ok()?.lines.back().cloned()
    }

    /// Up to `n` most recent lines, oldest first.
    pub fn tail(&self, n: usize) -> Vec<String> {
        let Ok(buffer) = self.inner.lock() else {
            return Vec::new();
        };
        let skip = buffer.lines.len().saturating_sub(n);
        buffer.lines.iter().skip(skip).cloned().collect()
    }

    pub fn writer(&self) -> LogBufferWriter {
        LogBufferWriter::new(self.clone())
    }
}

impl Default for LogBufferHandle {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LINES)
    }
}

/// `io::Write` adapter that splits incoming bytes into lines.
#[derive(Debug)]
pub struct LogBufferWriter {
    handle: LogBufferHandle,
    pending: Vec<u8>,
}

impl LogBufferWriter {
    pub fn new(handle: LogBufferHandle) -> Self {
        Self {
            handle,
            pending: Vec::new(),
        }
    }

    fn flush_pending(&mut self, force: bool) {
        if self.pending.is_empty() {
            return;
        }
        let end = if force {
            self.pending.len()
        } else {
            match self.pending.iter().rposition(|b| *b == b'\n') {
                Some(pos) => pos + 1,
                None => return,
            }
        };
        let drained: Vec<u8> = self.pending.drain(..end).collect();
        let text = String::from_utf8_lossy(&drained);
        for line in text.split('\n').filter(|l| !l.is_empty()) {
            self.handle.push(line.to_string());
        }
    }
}

impl Write for LogBufferWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.pending.extend_from_slice(buf);
        self.flush_pending(false);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flush_pending(true);
        Ok(())
    }
}

impl Drop for LogBufferWriter {
    fn drop(&mut self) {
        self.flush_pending(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_keeps_most_recent_lines() {
        let handle = LogBufferHandle::new(2);
        handle.push("a");
        handle.push("b");
        handle.push("c");
        assert_eq!(handle.tail(5), vec!["b", "c"]);
        assert_eq!(handle.last().as_deref(), Some("c"));
    }

    #[test]
    fn writer_splits_lines_and_holds_partial() {
        let handle = LogBufferHandle::new(10);
        let mut writer = handle.writer();
        writer.write_all(b"one\ntw").unwrap();
        assert_eq!(handle.tail(10), vec!["one"]);
        writer.write_all(b"o\n").unwrap();
        assert_eq!(handle.tail(10), vec!["one", "two"]);
        writer.write_all(b"three").unwrap();
        drop(writer);
        assert_eq!(handle.last().as_deref(), Some("three"));
    }

    #[test]
    fn empty_handle_reports_empty() {
        let handle = LogBufferHandle::default();
        assert!(handle.is_empty());
        assert!(handle.last().is_none());
    }
}
