//! Recognition of `?name args` directive lines.
//!
//! Parsing only checks what a directive line says on its own (syntax, keywords, fixed
//! bounds). Limits that depend on the live page geometry are checked by the formatter
//! when the directive is applied.

mod args;

use std::sync::LazyLock;

use regex::Regex;

use crate::error::DirectiveError;
use crate::model::{Alignment, HeaderBand, PageNumbering};

use args::{
    parse_alignment, parse_count, parse_horizontal, parse_signed, parse_style, parse_vertical,
    split_args,
};

pub(crate) const MARKER: char = '?';

// Arguments follow at least one space; only the argument-less directives may stand alone.
static DIRECTIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\?(?:(\w+)\s+(.*)|(br|page_break|alias)\s*)$").unwrap()
});

pub const MAX_BAND_HEIGHT: usize = 5;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Directive {
    Size { height: usize, width: usize },
    Align(Alignment),
    Par { space: usize, indent: i64 },
    Offset { left: usize, right: usize },
    Interval(usize),
    Feed(usize),
    FeedLines(usize),
    PageBreak,
    Left(usize),
    /// `None` removes the band.
    Header(Option<HeaderBand>),
    PageNumber(PageNumbering),
    Break,
    Footnote(usize),
    Alias,
    Unknown(String),
}

impl Directive {
    pub fn name(&self) -> &'static str {
        match self {
            Directive::Size { .. } => "size",
            Directive::Align(_) => "align",
            Directive::Par { .. } => "par",
            Directive::Offset { .. } => "offset",
            Directive::Interval(_) => "interval",
            Directive::Feed(_) => "feed",
            Directive::FeedLines(_) => "feed_lines",
            Directive::PageBreak => "page_break",
            Directive::Left(_) => "left",
            Directive::Header(_) => "header",
            Directive::PageNumber(_) => "p_num",
            Directive::Break => "br",
            Directive::Footnote(_) => "footnote",
            Directive::Alias => "alias",
            Directive::Unknown(_) => "unknown",
        }
    }

    /// Footnotes attach their marker to the pending paragraph, so they must not flush it.
    pub fn flushes_first(&self) -> bool {
        !matches!(
            self,
            Directive::Footnote(_) | Directive::Alias | Directive::Unknown(_)
        )
    }
}

/// True when the line has directive shape, whether or not the name is known.
pub fn is_directive_line(line: &str) -> bool {
    line.starts_with(MARKER) && DIRECTIVE_RE.is_match(line)
}

/// Parse a directive line.
///
/// Returns `None` for body text, `Some(Err(_))` for a known directive with bad
/// arguments, and `Some(Ok(Directive::Unknown(_)))` for an unrecognized name.
pub fn parse_directive(line: &str) -> Option<Result<Directive, DirectiveError>> {
    if !line.starts_with(MARKER) {
        return None;
    }
    let caps = DIRECTIVE_RE.captures(line)?;
    let name = caps.get(1).or_else(|| caps.get(3))?.as_str();
    let raw_args = caps.get(2).map_or("", |m| m.as_str()).trim();
    Some(parse_named(name, raw_args, line))
}

fn parse_named(name: &str, raw: &str, line: &str) -> Result<Directive, DirectiveError> {
    let directive = match name {
        "size" => {
            let [h, w] = fixed_args("size", raw, "h,w")?;
            Directive::Size {
                height: parse_count("size", "h", h)?,
                width: parse_count("size", "w", w)?,
            }
        }
        "align" => {
            let [mode] = fixed_args("align", raw, "left|right|center|fill|as_is")?;
            Directive::Align(parse_alignment(mode)?)
        }
        "par" => {
            let [space, indent] = fixed_args("par", raw, "space,indent")?;
            Directive::Par {
                space: parse_count("par", "space", space)?,
                indent: parse_signed("par", "indent", indent)?,
            }
        }
        "offset" => {
            let [left, right] = fixed_args("offset", raw, "left,right")?;
            Directive::Offset {
                left: parse_count("offset", "left", left)?,
                right: parse_count("offset", "right", right)?,
            }
        }
        "interval" => {
            let [n] = fixed_args("interval", raw, "n")?;
            Directive::Interval(parse_count("interval", "n", n)?)
        }
        "feed" => {
            let [n] = fixed_args("feed", raw, "n")?;
            Directive::Feed(parse_count("feed", "n", n)?)
        }
        "feed_lines" => {
            let [n] = fixed_args("feed_lines", raw, "n")?;
            Directive::FeedLines(parse_count("feed_lines", "n", n)?)
        }
        "page_break" => Directive::PageBreak,
        "left" => {
            let [n] = fixed_args("left", raw, "n")?;
            Directive::Left(parse_count("left", "n", n)?)
        }
        "header" => Directive::Header(parse_header(raw)?),
        "p_num" => Directive::PageNumber(parse_page_number(raw)?),
        "br" => Directive::Break,
        "footnote" => {
            let [n] = fixed_args("footnote", raw, "n")?;
            let n = parse_count("footnote", "n", n)?;
            if n == 0 {
                return Err(DirectiveError::OutOfRange {
                    directive: "footnote",
                    what: "n",
                    value: 0,
                    min: 1,
                    max: i64::MAX,
                });
            }
            Directive::Footnote(n)
        }
        "alias" => Directive::Alias,
        _ => Directive::Unknown(line.to_string()),
    };
    Ok(directive)
}

fn fixed_args<'a, const N: usize>(
    directive: &'static str,
    raw: &'a str,
    expected: &'static str,
) -> Result<[&'a str; N], DirectiveError> {
    let parts = split_args(raw);
    parts
        .try_into()
        .map_err(|_| DirectiveError::Syntax {
            directive,
            args: raw.to_string(),
            expected,
        })
}

fn parse_header(raw: &str) -> Result<Option<HeaderBand>, DirectiveError> {
    const EXPECTED: &str = "h,row,left|right|center|smart,top|bottom,text";
    if raw.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    // The text is everything after the fourth comma, commas included.
    let parts: Vec<&str> = raw.splitn(5, ',').collect();
    let [h, row, hpos, vpos, text] = parts.as_slice() else {
        return Err(DirectiveError::Syntax {
            directive: "header",
            args: raw.to_string(),
            expected: EXPECTED,
        });
    };

    let height = parse_count("header", "h", h.trim())?;
    if !(1..=MAX_BAND_HEIGHT).contains(&height) {
        return Err(DirectiveError::OutOfRange {
            directive: "header",
            what: "h",
            value: height as i64,
            min: 1,
            max: MAX_BAND_HEIGHT as i64,
        });
    }
    let row = parse_count("header", "row", row.trim())?;
    if !(1..=height).contains(&row) {
        return Err(DirectiveError::OutOfRange {
            directive: "header",
            what: "row",
            value: row as i64,
            min: 1,
            max: height as i64,
        });
    }

    Ok(Some(HeaderBand {
        height,
        row,
        horizontal: parse_horizontal(hpos.trim())?,
        vertical: parse_vertical(vpos.trim())?,
        text: text.trim().to_string(),
    }))
}

fn parse_page_number(raw: &str) -> Result<PageNumbering, DirectiveError> {
    let parts: Vec<&str> = raw.splitn(3, ',').map(str::trim).collect();
    let Some(&start) = parts.first().filter(|s| !s.is_empty()) else {
        return Err(DirectiveError::Syntax {
            directive: "p_num",
            args: raw.to_string(),
            expected: "n[,arabic|roman|letter[,prefix]]",
        });
    };
    let counter = parse_count("p_num", "n", start)?;
    if counter == 0 {
        return Err(DirectiveError::OutOfRange {
            directive: "p_num",
            what: "n",
            value: 0,
            min: 1,
            max: i64::MAX,
        });
    }
    let style = match parts.get(1) {
        Some(s) if !s.is_empty() => parse_style(s)?,
        _ => Default::default(),
    };
    let prefix = parts.get(2).map(|s| s.to_string()).unwrap_or_default();
    Ok(PageNumbering {
        counter,
        style,
        prefix,
    })
}
