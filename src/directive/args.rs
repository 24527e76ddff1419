use crate::error::DirectiveError;
use crate::model::{Alignment, HorizontalPosition, NumberStyle, VerticalPosition};

pub(super) fn split_args(raw: &str) -> Vec<&str> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(',').map(str::trim).collect()
}

pub(super) fn parse_count(
    directive: &'static str,
    what: &'static str,
    val: &str,
) -> Result<usize, DirectiveError> {
    val.parse().map_err(|_| {
        log::trace!("?{directive} {what}: '{val}' is not a count");
        DirectiveError::Syntax {
            directive,
            args: val.to_string(),
            expected: "a non-negative integer",
        }
    })
}

pub(super) fn parse_signed(
    directive: &'static str,
    what: &'static str,
    val: &str,
) -> Result<i64, DirectiveError> {
    val.parse().map_err(|_| {
        log::trace!("?{directive} {what}: '{val}' is not an integer");
        DirectiveError::Syntax {
            directive,
            args: val.to_string(),
            expected: "an integer",
        }
    })
}

pub(super) fn parse_alignment(val: &str) -> Result<Alignment, DirectiveError> {
    match val {
        "left" => Ok(Alignment::Left),
        "right" => Ok(Alignment::Right),
        "center" => Ok(Alignment::Center),
        "fill" => Ok(Alignment::Fill),
        "as_is" => Ok(Alignment::AsIs),
        _ => Err(bad_keyword("align", "mode", val)),
    }
}

pub(super) fn parse_horizontal(val: &str) -> Result<HorizontalPosition, DirectiveError> {
    match val {
        "left" => Ok(HorizontalPosition::Left),
        "right" => Ok(HorizontalPosition::Right),
        "center" => Ok(HorizontalPosition::Center),
        "smart" => Ok(HorizontalPosition::Smart),
        _ => Err(bad_keyword("header", "horizontal position", val)),
    }
}

pub(super) fn parse_vertical(val: &str) -> Result<VerticalPosition, DirectiveError> {
    match val {
        "top" => Ok(VerticalPosition::Top),
        "bottom" => Ok(VerticalPosition::Bottom),
        _ => Err(bad_keyword("header", "vertical position", val)),
    }
}

pub(super) fn parse_style(val: &str) -> Result<NumberStyle, DirectiveError> {
    match val {
        "arabic" => Ok(NumberStyle::Arabic),
        "roman" => Ok(NumberStyle::Roman),
        "letter" => Ok(NumberStyle::Letter),
        _ => Err(bad_keyword("p_num", "style", val)),
    }
}

fn bad_keyword(directive: &'static str, what: &'static str, val: &str) -> DirectiveError {
    DirectiveError::BadKeyword {
        directive,
        what,
        value: val.to_string(),
    }
}
