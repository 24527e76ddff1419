use std::collections::VecDeque;
use std::io::Write;
use std::mem;

use rand::Rng;

use crate::error::Error;
use crate::model::Alignment;

use super::layout::{Cut, char_len, cut_line, indent, rule};
use super::{Formatter, Mode};

/// Footnote lines are set this many columns in from the left edge and wrapped to the
/// page width minus the same amount.
pub(crate) const FOOTNOTE_OFFSET: usize = 4;

/// Footnote lines waiting for the current page to close.
#[derive(Debug, Default)]
pub(super) struct FootnoteQueue {
    // Most recent first; reversed when printed.
    lines: VecDeque<String>,
    page_index: usize,
    // Marker or captured text not yet wrapped into lines.
    text: String,
}

impl FootnoteQueue {
    pub(super) fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn push(&mut self, line: String) {
        self.lines.push_front(line);
    }

    fn next_index(&mut self) -> usize {
        self.page_index += 1;
        self.page_index
    }

    pub(super) fn drain(&mut self) -> Vec<String> {
        self.lines.drain(..).rev().collect()
    }

    pub(super) fn snapshot(&self) -> Vec<String> {
        self.lines.iter().rev().cloned().collect()
    }

    pub(super) fn start_page(&mut self) {
        self.page_index = 0;
    }
}

impl<W: Write, R: Rng> Formatter<W, R> {
    pub(super) fn begin_footnote(&mut self, lines: usize) -> Result<(), Error> {
        let needed = if self.footnotes.is_empty() { 3 } else { 2 };
        if self.left < needed && !self.page_is_empty() {
            self.close_page(false)?;
        }
        self.ensure_page()?;

        let index = self.footnotes.next_index();
        let marker = format!("[{index}]");
        log::debug!("footnote {marker}: capturing {lines} lines");
        // As-is text is never accumulated, so there is nothing to attach the marker to.
        if self.alignment != Alignment::AsIs {
            self.pending.push_str(&marker);
            self.in_paragraph = true;
        }
        self.footnotes.text = marker;
        self.mode = Mode::CapturingFootnote { remaining: lines };
        Ok(())
    }

    /// One captured line, taken literally even if it looks like a directive.
    pub(super) fn capture_footnote_line(&mut self, line: &str, remaining: usize) -> Result<(), Error> {
        let remaining = remaining.saturating_sub(1);
        self.mode = if remaining == 0 {
            Mode::Normal
        } else {
            Mode::CapturingFootnote { remaining }
        };

        // Each captured line is wrapped on its own; only the marker carries over.
        let text = line.trim();
        if !text.is_empty() {
            if !self.footnotes.text.is_empty() {
                self.footnotes.text.push(' ');
            }
            self.footnotes.text.push_str(text);
            self.wrap_footnote_text()?;
            self.flush_footnote_text()?;
        } else if remaining == 0 {
            self.flush_footnote_text()?;
        }
        Ok(())
    }

    fn footnote_measure(&self) -> usize {
        self.width.saturating_sub(FOOTNOTE_OFFSET).max(1)
    }

    fn wrap_footnote_text(&mut self) -> Result<(), Error> {
        loop {
            let measure = self.footnote_measure();
            if char_len(&self.footnotes.text) < measure {
                return Ok(());
            }
            let text = mem::take(&mut self.footnotes.text);
            match cut_line(&text, measure) {
                Cut::Wrap { head, tail } => {
                    self.footnotes.text = tail.to_string();
                    self.queue_footnote_line(head)?;
                }
                Cut::Overlong => return self.queue_footnote_line(&text),
            }
        }
    }

    pub(super) fn flush_footnote_text(&mut self) -> Result<(), Error> {
        let text = mem::take(&mut self.footnotes.text);
        if text.is_empty() {
            return Ok(());
        }
        self.queue_footnote_line(&text)
    }

    /// Queue a wrapped footnote line and charge it to the current page. The first line
    /// on a page brings the separator rule with it.
    fn queue_footnote_line(&mut self, text: &str) -> Result<(), Error> {
        if self.footnotes.is_empty() && self.left < 2 && !self.page_is_empty() {
            self.close_page(false)?;
        }
        self.ensure_page()?;
        if self.footnotes.is_empty() {
            self.footnotes.push(rule(self.width));
            self.left = self.left.saturating_sub(1);
        }
        self.footnotes.push(indent(text, FOOTNOTE_OFFSET));
        self.left = self.left.saturating_sub(1);
        if self.left == 0 {
            self.close_page(false)?;
        }
        Ok(())
    }
}
