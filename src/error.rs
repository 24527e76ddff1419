use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("could not open {}: {source}", path.display())]
    Open { path: PathBuf, source: io::Error },
    #[error("invalid options: {0}")]
    Options(String),
    /// Non-fatal; reported into the output stream by the formatter loop.
    #[error(transparent)]
    Directive(#[from] DirectiveError),
}

/// Validation failures of a single directive line. None of these stop formatting.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectiveError {
    #[error("unknown directive: {0}")]
    Unknown(String),
    #[error("malformed arguments for ?{directive}: '{args}' (expected {expected})")]
    Syntax {
        directive: &'static str,
        args: String,
        expected: &'static str,
    },
    #[error("?{directive}: {what} = {value} is out of range [{min}, {max}]")]
    OutOfRange {
        directive: &'static str,
        what: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },
    #[error("?{directive}: unknown {what} '{value}'")]
    BadKeyword {
        directive: &'static str,
        what: &'static str,
        value: String,
    },
    #[error("page number {value} cannot be written in {style} style (max {max})")]
    PageNumberOverflow {
        style: &'static str,
        value: usize,
        max: usize,
    },
}
