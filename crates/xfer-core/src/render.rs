//! Self-overwriting summary line.
//!
//! The summary line ends in `\r` so the next render starts at column 0. When a
//! new line is shorter than the previous one, trailing spaces blank out the
//! leftover characters. The previous length and the sink share one mutex: a
//! render's read-modify-write of the length and its write must not interleave
//! with another render, an erase, or a permanent log line.

use std::io::Write;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::format::format_status;
use crate::registry::StatusEntry;

const SEPARATOR: &str = "  ";

struct RenderState<W> {
    sink: W,
    /// Printable width of the last summary line (padding excluded).
    last_len: usize,
}

impl<W: Write> RenderState<W> {
    fn write(&mut self, buf: &str) {
        let res = self
            .sink
            .write_all(buf.as_bytes())
            .and_then(|()| self.sink.flush());
        if let Err(e) = res {
            tracing::warn!(error = %e, "console write failed");
        }
    }
}

/// Owns the output sink and the width of the previously written summary line.
pub struct LineRenderer<W> {
    state: Mutex<RenderState<W>>,
}

impl<W: Write + Send> LineRenderer<W> {
    pub fn new(sink: W) -> Self {
        Self {
            state: Mutex::new(RenderState { sink, last_len: 0 }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, RenderState<W>> {
        // A panicking writer leaves at worst a stale width; keep rendering.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Rewrite the summary line from `entries`, padding over any longer previous line.
    pub fn render(&self, entries: &[StatusEntry]) {
        let mut buffer = build_line(entries);
        let mut state = self.lock();
        let len = buffer.len();
        pad(&mut buffer, state.last_len.saturating_sub(len));
        state.last_len = len;
        buffer.push('\r');
        state.write(&buffer);
    }

    /// Blank the summary line without rebuilding it from the registry.
    ///
    /// The previous width is kept, so repeated erases are harmless.
    pub fn erase(&self) {
        let mut state = self.lock();
        let mut buffer = String::with_capacity(state.last_len + 1);
        pad(&mut buffer, state.last_len);
        buffer.push('\r');
        state.write(&buffer);
    }

    /// Write a permanent, newline-terminated line.
    pub fn println(&self, line: &str) {
        let mut state = self.lock();
        let mut buffer = String::with_capacity(line.len() + 1);
        buffer.push_str(line);
        buffer.push('\n');
        state.write(&buffer);
    }

    /// Write a permanent line while a summary line may still be on screen.
    ///
    /// The summary line is blanked first, in the same write, so a shorter log
    /// line leaves no stray characters behind.
    pub fn println_over_summary(&self, line: &str) {
        let mut state = self.lock();
        let mut buffer = String::with_capacity(state.last_len + line.len() + 2);
        if state.last_len > 0 {
            pad(&mut buffer, state.last_len);
            buffer.push('\r');
        }
        buffer.push_str(line);
        buffer.push('\n');
        state.write(&buffer);
    }

    /// Width of the last rendered summary line.
    pub fn last_len(&self) -> usize {
        self.lock().last_len
    }

    pub fn into_inner(self) -> W {
        self.state
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
            .sink
    }
}

/// Concatenate the status fragments of all entries, two spaces apart.
pub fn build_line(entries: &[StatusEntry]) -> String {
    let mut buffer = String::with_capacity(64);
    for (i, e) in entries.iter().enumerate() {
        if i > 0 {
            buffer.push_str(SEPARATOR);
        }
        buffer.push_str(&format_status(e.transferred, e.content_length));
    }
    buffer
}

fn pad(buffer: &mut String, spaces: usize) {
    buffer.extend(std::iter::repeat(' ').take(spaces));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::TransferResource;

    fn entry(transferred: u64, content_length: i64) -> StatusEntry {
        StatusEntry {
            id: TransferResource::new("u/", "n").id(),
            content_length,
            transferred,
        }
    }

    fn output(r: LineRenderer<Vec<u8>>) -> String {
        String::from_utf8(r.into_inner()).unwrap()
    }

    #[test]
    fn build_line_joins_with_two_spaces() {
        assert_eq!(build_line(&[]), "");
        assert_eq!(build_line(&[entry(1, 2048)]), "1/2 KB ");
        assert_eq!(
            build_line(&[entry(1, 2048), entry(5, -1)]),
            "1/2 KB   5 B "
        );
    }

    #[test]
    fn first_render_has_no_padding() {
        let r = LineRenderer::new(Vec::new());
        r.render(&[entry(500, 2048)]);
        assert_eq!(r.last_len(), 7);
        assert_eq!(output(r), "1/2 KB \r");
    }

    #[test]
    fn shorter_line_pads_over_longer_one() {
        let r = LineRenderer::new(Vec::new());
        r.render(&[entry(1, 2048), entry(5, -1)]);
        r.render(&[entry(5, -1)]);
        assert_eq!(r.last_len(), 4);
        assert_eq!(output(r), "1/2 KB   5 B \r5 B          \r");
    }

    #[test]
    fn written_width_is_max_of_new_and_previous() {
        let r = LineRenderer::new(Vec::new());
        let lines = [
            vec![entry(1, 2048)],
            vec![entry(1, 2048), entry(1, 2048)],
            vec![entry(3, -1)],
            vec![],
            vec![entry(10_000, 100_000)],
        ];
        let mut prev = 0usize;
        let mut expected_total = 0usize;
        for l in &lines {
            let len = build_line(l).len();
            r.render(l);
            expected_total += len.max(prev) + 1;
            prev = len;
        }
        let out = output(r);
        assert_eq!(out.len(), expected_total);
        let last = out.trim_end_matches('\r').rsplit('\r').next().unwrap();
        assert_eq!(last.trim_end(), "10/98 KB");
    }

    #[test]
    fn erase_blanks_previous_width_and_is_repeatable() {
        let r = LineRenderer::new(Vec::new());
        r.render(&[entry(1, 2048)]);
        r.erase();
        r.erase();
        assert_eq!(r.last_len(), 7);
        assert_eq!(output(r), "1/2 KB \r       \r       \r");
    }

    #[test]
    fn erase_before_any_render_writes_bare_return() {
        let r = LineRenderer::new(Vec::new());
        r.erase();
        assert_eq!(output(r), "\r");
    }

    #[test]
    fn println_over_summary_blanks_live_line_first() {
        let r = LineRenderer::new(Vec::new());
        r.render(&[entry(1, 2048), entry(5, -1)]);
        r.println_over_summary("x");
        assert_eq!(r.last_len(), 13);
        let out = output(r);
        let after_summary = out.strip_prefix("1/2 KB   5 B \r").unwrap();
        assert_eq!(after_summary, format!("{}\rx\n", " ".repeat(13)));
    }

    #[test]
    fn println_over_summary_without_summary_writes_plain_line() {
        let r = LineRenderer::new(Vec::new());
        r.println_over_summary("Downloading: u/n");
        assert_eq!(output(r), "Downloading: u/n\n");
    }

    #[test]
    fn println_terminates_with_newline() {
        let r = LineRenderer::new(Vec::new());
        r.println("Downloading: u/n");
        assert_eq!(r.last_len(), 0);
        assert_eq!(output(r), "Downloading: u/n\n");
    }
}
