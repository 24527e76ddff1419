use rand::Rng;
use rand::seq::index;

use crate::model::Alignment;

pub(super) fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Result of cutting accumulated text down to one output line.
#[derive(Debug, PartialEq, Eq)]
pub(super) enum Cut<'a> {
    /// `head` fits the measure and was cut at a space.
    Wrap { head: &'a str, tail: &'a str },
    /// No space at or before the limit.
    Overlong,
}

/// Cut the longest prefix of `text` that ends at a space at or before column `limit`.
pub(super) fn cut_line(text: &str, limit: usize) -> Cut<'_> {
    let mut last_space = None;
    for (col, (byte, ch)) in text.char_indices().enumerate() {
        if col > limit {
            break;
        }
        if ch == ' ' {
            last_space = Some(byte);
        }
    }

    match last_space {
        Some(at) => Cut::Wrap {
            head: text[..at].trim_end(),
            tail: text[at + 1..].trim_start(),
        },
        None => Cut::Overlong,
    }
}

/// Horizontal alignment of a line already known to fit in `width` columns.
/// `AsIs` lines never reach here and are returned unchanged like `Left`.
pub(super) fn align_line<R: Rng + ?Sized>(
    text: &str,
    alignment: Alignment,
    width: usize,
    rng: &mut R,
) -> String {
    match alignment {
        Alignment::Left | Alignment::AsIs => text.to_string(),
        Alignment::Right => align_right(text, width),
        Alignment::Center => align_center(text, width),
        Alignment::Fill => justify(text, width, rng),
    }
}

pub(super) fn align_right(text: &str, width: usize) -> String {
    let pad = width.saturating_sub(char_len(text));
    format!("{}{text}", " ".repeat(pad))
}

// Odd slack goes to the right.
pub(super) fn align_center(text: &str, width: usize) -> String {
    let slack = width.saturating_sub(char_len(text));
    let before = slack / 2;
    format!("{}{text}{}", " ".repeat(before), " ".repeat(slack - before))
}

/// Stretch inter-word gaps so the line is exactly `width` wide. Every gap gets the
/// uniform minimum; the leftover columns go one each to distinct random gaps.
pub(super) fn justify<R: Rng + ?Sized>(text: &str, width: usize, rng: &mut R) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() < 2 {
        return words.first().map_or_else(String::new, |w| w.to_string());
    }

    let word_len: usize = words.iter().map(|w| char_len(w)).sum();
    let gaps = words.len() - 1;
    if word_len + gaps > width {
        return words.join(" ");
    }
    let min_gap = (width - word_len) / gaps;
    let slack = width - word_len - min_gap * gaps;

    let mut gap_widths = vec![min_gap; gaps];
    for gap in index::sample(rng, gaps, slack) {
        gap_widths[gap] += 1;
    }

    let mut out = String::with_capacity(width);
    for (i, word) in words.iter().enumerate() {
        out.push_str(word);
        if let Some(&g) = gap_widths.get(i) {
            out.extend(std::iter::repeat_n(' ', g));
        }
    }
    out
}

/// Place an aligned line on the page: `offset` columns of left padding, then spaces up
/// to the record width.
pub(super) fn pad_record(body: &str, offset: usize, width: usize) -> String {
    let mut out = " ".repeat(offset);
    out.push_str(body);
    let len = char_len(&out);
    if len < width {
        out.push_str(&" ".repeat(width - len));
    }
    out
}

pub(super) fn indent(body: &str, offset: usize) -> String {
    format!("{}{body}", " ".repeat(offset))
}

pub(super) fn rule(width: usize) -> String {
    "-".repeat(width)
}
