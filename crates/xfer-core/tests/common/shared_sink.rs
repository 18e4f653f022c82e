//! In-memory sink that tests can read while the reporter still owns a handle.

use std::io;
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
pub struct SharedSink(Arc<Mutex<Vec<u8>>>);

impl SharedSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }

    /// Permanent (newline-terminated) lines with any summary-line prefix stripped.
    pub fn log_lines(&self) -> Vec<String> {
        self.contents()
            .split('\n')
            .filter(|l| !l.is_empty())
            .map(|l| l.rsplit('\r').next().unwrap_or("").to_string())
            .filter(|l| !l.is_empty())
            .collect()
    }
}

impl io::Write for SharedSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
