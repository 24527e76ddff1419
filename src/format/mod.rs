mod footnote;
mod header;
mod layout;
pub mod numbering;

use std::io::Write;
use std::mem;

use rand::Rng;

use crate::directive::{self, Directive};
use crate::error::{DirectiveError, Error};
use crate::model::{
    Alignment, HeaderBand, MIN_PAGE_DIMENSION, Options, PageNumbering, VerticalPosition,
};

use footnote::FootnoteQueue;
use header::render_band;
use layout::{Cut, align_line, char_len, cut_line, indent, pad_record};

pub(crate) const FORM_FEED: &str = "\x0c";

/// How the next input line is interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Normal,
    /// The next `remaining` lines are footnote text, directives included.
    CapturingFootnote { remaining: usize },
}

/// Counters for a finished run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub lines_in: usize,
    pub lines_out: usize,
    pub pages: usize,
    pub errors: usize,
}

/// The formatting engine. Feed it one input line at a time with
/// [`process_line`](Formatter::process_line), then call [`finish`](Formatter::finish).
pub struct Formatter<W: Write, R: Rng> {
    out: W,
    rng: R,
    options: Options,

    width: usize,
    height: usize,
    left: usize,

    alignment: Alignment,
    margin_left: usize,
    margin_right: usize,
    indent: i64,
    par_space: usize,
    interval: usize,

    header: Option<HeaderBand>,
    // Band in force on the current page; a new `?header` waits for the next page.
    page_band: Option<HeaderBand>,
    band_printed: bool,
    // The last page filled up; the form feed and the next page wait for more output.
    page_pending: bool,
    numbering: PageNumbering,

    mode: Mode,
    pending: String,
    in_paragraph: bool,
    first_line: bool,
    footnotes: FootnoteQueue,
    lines_on_page: usize,

    summary: Summary,
    finished: bool,
}

impl<W: Write, R: Rng> Formatter<W, R> {
    pub fn new(out: W, rng: R, options: Options) -> Self {
        Self {
            out,
            rng,
            width: options.width,
            height: options.height,
            left: options.height - 1,
            options,
            alignment: Alignment::default(),
            margin_left: 0,
            margin_right: 0,
            indent: 0,
            par_space: 1,
            interval: 1,
            header: None,
            page_band: None,
            band_printed: false,
            page_pending: false,
            numbering: PageNumbering::default(),
            mode: Mode::Normal,
            pending: String::new(),
            in_paragraph: false,
            first_line: true,
            footnotes: FootnoteQueue::default(),
            lines_on_page: 0,
            summary: Summary::default(),
            finished: false,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Text accumulated for the current paragraph and not yet printed.
    pub fn pending(&self) -> &str {
        &self.pending
    }

    /// Lines still available on the current page.
    pub fn lines_left(&self) -> usize {
        self.left
    }

    pub fn page_number(&self) -> usize {
        self.numbering.counter
    }

    /// Footnote lines waiting for the page close, in print order.
    pub fn queued_footnotes(&self) -> Vec<String> {
        self.footnotes.snapshot()
    }

    pub fn summary(&self) -> Summary {
        self.summary
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Process one input line. Only I/O failures are returned; directive problems are
    /// reported into the output and formatting continues.
    pub fn process_line(&mut self, raw: &str) -> Result<(), Error> {
        let line = normalize_line(raw);
        self.summary.lines_in += 1;

        if let Mode::CapturingFootnote { remaining } = self.mode {
            return self.capture_footnote_line(line, remaining);
        }

        match directive::parse_directive(line) {
            Some(parsed) => {
                let result = parsed.map_err(Error::from).and_then(|d| self.apply(d));
                match result {
                    Err(Error::Directive(e)) => self.report(&e),
                    other => other,
                }
            }
            None => self.format_line(line),
        }
    }

    /// Terminal flush: prints the last partial paragraph and any queued footnotes.
    /// Without it the tail of the document is lost.
    pub fn finish(&mut self) -> Result<Summary, Error> {
        if self.finished {
            return Ok(self.summary);
        }
        if let Mode::CapturingFootnote { .. } = self.mode {
            self.mode = Mode::Normal;
            self.flush_footnote_text()?;
        }
        self.flush(true)?;
        self.out.flush()?;
        self.finished = true;
        Ok(self.summary)
    }

    fn apply(&mut self, directive: Directive) -> Result<(), Error> {
        self.check(&directive)?;
        if directive.flushes_first() {
            self.flush(false)?;
        }
        log::debug!("applying ?{}", directive.name());

        match directive {
            Directive::Size { height, width } => self.resize(height, width)?,
            Directive::Align(alignment) => self.alignment = alignment,
            Directive::Par { space, indent } => {
                self.par_space = space;
                self.indent = indent;
            }
            Directive::Offset { left, right } => {
                self.margin_left = left;
                self.margin_right = right;
            }
            Directive::Interval(n) => self.interval = n,
            Directive::Feed(n) => self.feed(n * self.interval.max(1))?,
            Directive::FeedLines(n) => self.feed(n)?,
            Directive::PageBreak => {
                if !self.page_is_empty() {
                    self.close_page(false)?;
                }
            }
            Directive::Left(n) => {
                if self.left < n && !self.page_is_empty() {
                    self.close_page(false)?;
                }
            }
            Directive::Header(band) => {
                self.header = band;
                if !self.page_pending && self.page_is_empty() && !self.band_printed {
                    self.open_page()?;
                }
            }
            Directive::PageNumber(numbering) => self.numbering = numbering,
            Directive::Break => {}
            Directive::Footnote(n) => self.begin_footnote(n)?,
            Directive::Alias => {}
            Directive::Unknown(raw) => return Err(DirectiveError::Unknown(raw).into()),
        }
        Ok(())
    }

    /// Limits that depend on the current geometry. Runs before anything is flushed, so
    /// a rejected directive leaves the state untouched.
    fn check(&self, directive: &Directive) -> Result<(), DirectiveError> {
        match *directive {
            Directive::Size { height, width } => {
                let widest_margin = self.margin_left.max(self.margin_right);
                let min_width = MIN_PAGE_DIMENSION
                    .max(3 * widest_margin + 1)
                    .max(6 * self.indent.max(0) as usize);
                bounded("size", "w", width as i64, min_width as i64, i64::MAX)?;
                let min_height = MIN_PAGE_DIMENSION.max(2 * self.par_space);
                bounded("size", "h", height as i64, min_height as i64, i64::MAX)
            }
            Directive::Par { space, indent } => {
                bounded("par", "space", space as i64, 0, (self.height / 2) as i64)?;
                bounded(
                    "par",
                    "indent",
                    indent,
                    -(self.margin_left as i64),
                    (self.width / 6) as i64,
                )
            }
            Directive::Offset { left, right } => {
                let max = (self.width / 3) as i64 - 1;
                let min_left = (-self.indent).max(0);
                bounded("offset", "left", left as i64, min_left, max)?;
                bounded("offset", "right", right as i64, 0, max)
            }
            Directive::Feed(n) => bounded("feed", "n", n as i64, 0, (self.height / 3) as i64 - 1),
            Directive::FeedLines(n) => {
                bounded("feed_lines", "n", n as i64, 0, (self.height / 3) as i64 - 1)
            }
            Directive::Unknown(ref raw) => Err(DirectiveError::Unknown(raw.clone())),
            _ => Ok(()),
        }
    }

    /// Error frame on the page, charged like body lines.
    fn report(&mut self, error: &DirectiveError) -> Result<(), Error> {
        log::warn!("{error}");
        self.summary.errors += 1;
        for line in error_frame(error) {
            self.emit(line)?;
        }
        Ok(())
    }

    fn resize(&mut self, height: usize, width: usize) -> Result<(), Error> {
        let shrinks = height < self.height || width < self.width;
        if shrinks && !self.page_is_empty() {
            self.close_page(false)?;
        }
        let grown = height.saturating_sub(self.height);
        self.height = height;
        self.width = width;
        if self.page_is_empty() {
            self.left = self.page_capacity();
        } else {
            self.left += grown;
        }
        Ok(())
    }

    fn feed(&mut self, count: usize) -> Result<(), Error> {
        for _ in 0..count {
            if self.options.feed_consumes_budget {
                self.emit(String::new())?;
            } else {
                self.ensure_page()?;
                self.write_line("")?;
            }
        }
        Ok(())
    }

    // --- paragraph accumulation ---

    fn format_line(&mut self, line: &str) -> Result<(), Error> {
        if self.alignment == Alignment::AsIs {
            return self.emit(line.to_string());
        }

        let text = line.trim();
        if text.is_empty() {
            return self.flush(false);
        }
        if !self.pending.is_empty() {
            self.pending.push(' ');
        }
        self.pending.push_str(text);
        self.in_paragraph = true;
        self.wrap_pending()
    }

    fn wrap_pending(&mut self) -> Result<(), Error> {
        loop {
            let measure = self.measure();
            if char_len(&self.pending) < measure {
                return Ok(());
            }
            let offset = self.line_offset();
            let pending = mem::take(&mut self.pending);
            let record = match cut_line(&pending, measure) {
                Cut::Wrap { head, tail } => {
                    let aligned = align_line(head, self.alignment, measure, &mut self.rng);
                    self.pending = tail.to_string();
                    Some(pad_record(&aligned, offset, self.width))
                }
                Cut::Overlong => None,
            };
            let Some(record) = record else {
                // Unbreakable: the whole text goes out verbatim and the paragraph ends.
                log::debug!("no break within {measure} columns, line printed as is");
                self.first_line = true;
                self.in_paragraph = false;
                return self.emit(pending);
            };
            self.first_line = false;
            self.emit_spaced(record)?;
        }
    }

    /// Print the rest of the paragraph and the paragraph spacing. With
    /// `close_document` the last page is closed as well.
    fn flush(&mut self, close_document: bool) -> Result<(), Error> {
        if !self.pending.is_empty() {
            let pending = mem::take(&mut self.pending);
            let offset = self.line_offset();
            // The short last line of a paragraph is never stretched.
            let record = match self.alignment {
                Alignment::Right | Alignment::Center => {
                    let aligned = align_line(&pending, self.alignment, self.measure(), &mut self.rng);
                    pad_record(&aligned, offset, self.width)
                }
                _ => indent(&pending, offset),
            };
            self.first_line = false;
            self.emit_spaced(record)?;
        }

        if self.in_paragraph {
            self.in_paragraph = false;
            self.first_line = true;
            if !self.options.indent_persists {
                self.indent = 0;
            }
            for _ in 0..self.par_space {
                if self.lines_on_page == 0 {
                    break;
                }
                self.emit(String::new())?;
            }
        }

        if close_document {
            self.close_page(true)?;
        }
        Ok(())
    }

    fn measure(&self) -> usize {
        let base = (self.width - self.margin_left - self.margin_right) as i64;
        if self.first_line {
            (base - self.indent).max(1) as usize
        } else {
            base.max(1) as usize
        }
    }

    fn line_offset(&self) -> usize {
        if self.first_line {
            (self.margin_left as i64 + self.indent).max(0) as usize
        } else {
            self.margin_left
        }
    }

    // --- pagination ---

    fn write_line(&mut self, line: &str) -> Result<(), Error> {
        writeln!(self.out, "{line}")?;
        self.summary.lines_out += 1;
        Ok(())
    }

    /// Print one page line and charge it to the page budget.
    fn emit(&mut self, line: String) -> Result<(), Error> {
        self.ensure_page()?;
        self.write_line(&line)?;
        self.lines_on_page += 1;
        self.left = self.left.saturating_sub(1);
        if self.left == 0 {
            self.close_page(false)?;
        }
        Ok(())
    }

    /// A body line followed by its line-interval blanks. Blanks that would start a new
    /// page are dropped.
    fn emit_spaced(&mut self, line: String) -> Result<(), Error> {
        self.emit(line)?;
        for _ in 1..self.interval {
            if self.lines_on_page == 0 {
                break;
            }
            self.emit(String::new())?;
        }
        Ok(())
    }

    fn page_is_empty(&self) -> bool {
        self.lines_on_page == 0 && self.footnotes.is_empty()
    }

    // Without a band the form feed takes the line a band's rule would.
    fn page_capacity(&self) -> usize {
        let band = self.page_band.as_ref().map_or(0, |b| b.height);
        self.height - band - 1
    }

    fn close_page(&mut self, terminal: bool) -> Result<(), Error> {
        if terminal && self.page_is_empty() {
            return Ok(());
        }
        let bottom_band = self
            .page_band
            .clone()
            .filter(|b| b.vertical == VerticalPosition::Bottom);
        let mut padding = self.left;
        self.left = 0;

        let mut footer = Vec::new();
        if let Some(band) = &bottom_band {
            let (label, overflow) = self.band_label();
            // The overflow frame takes its lines out of the padding.
            if let Some(e) = overflow {
                log::warn!("{e}");
                self.summary.errors += 1;
                for line in error_frame(&e) {
                    self.write_line(&line)?;
                }
                padding = padding.saturating_sub(3);
            }
            footer = render_band(band, &label, self.numbering.counter, self.width);
        }

        // Footnotes and footer sit at the foot of the page.
        if !self.footnotes.is_empty() || bottom_band.is_some() {
            for _ in 0..padding {
                self.write_line("")?;
            }
        }
        for line in self.footnotes.drain() {
            self.write_line(&line)?;
        }
        for line in footer {
            self.write_line(&line)?;
        }

        log::debug!(
            "page {} closed after {} lines",
            self.numbering.counter,
            self.lines_on_page
        );
        self.summary.pages += 1;
        if terminal {
            return Ok(());
        }

        self.numbering.counter += 1;
        self.lines_on_page = 0;
        self.band_printed = false;
        self.page_pending = true;
        Ok(())
    }

    /// Start the page held back by the last close, if any.
    fn ensure_page(&mut self) -> Result<(), Error> {
        if self.page_pending {
            self.page_pending = false;
            self.write_line(FORM_FEED)?;
            self.open_page()?;
        }
        Ok(())
    }

    fn open_page(&mut self) -> Result<(), Error> {
        self.page_band = self.header.clone();
        self.left = self.page_capacity();
        self.lines_on_page = 0;
        self.band_printed = false;
        self.footnotes.start_page();

        if let Some(band) = self
            .page_band
            .clone()
            .filter(|b| b.vertical == VerticalPosition::Top)
        {
            let (label, overflow) = self.band_label();
            if let Some(e) = overflow {
                self.report(&e)?;
            }
            for line in render_band(&band, &label, self.numbering.counter, self.width) {
                self.write_line(&line)?;
            }
            self.band_printed = true;
        }
        Ok(())
    }

    fn band_label(&self) -> (String, Option<DirectiveError>) {
        numbering::page_label_or_placeholder(
            self.numbering.counter,
            self.numbering.style,
            &self.numbering.prefix,
        )
    }
}

fn error_frame(error: &DirectiveError) -> [String; 3] {
    [String::new(), format!(">>> ERROR: {error}"), String::new()]
}

fn bounded(
    directive: &'static str,
    what: &'static str,
    value: i64,
    min: i64,
    max: i64,
) -> Result<(), DirectiveError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(DirectiveError::OutOfRange {
            directive,
            what,
            value,
            min,
            max,
        })
    }
}

/// Cut a raw line at its first `\n` or `\r`.
pub fn normalize_line(raw: &str) -> &str {
    raw.find(['\n', '\r']).map_or(raw, |at| &raw[..at])
}
