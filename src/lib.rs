mod directive;
mod error;
mod format;
mod model;

pub use directive::{Directive, is_directive_line, parse_directive};
pub use error::{DirectiveError, Error};
pub use format::numbering::{page_label, page_label_or_placeholder};
pub use format::{Formatter, Mode, Summary, normalize_line};
pub use model::{
    Alignment, HeaderBand, HorizontalPosition, NumberStyle, Options, PageNumbering,
    VerticalPosition,
};

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::StdRng;

/// Random source for fill justification: seeded when `options.seed` is set.
pub fn rng_for(options: &Options) -> StdRng {
    match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

pub fn format_reader<R: BufRead, W: Write>(
    input: R,
    output: W,
    options: &Options,
) -> Result<Summary, Error> {
    options.validate()?;
    let t0 = Instant::now();

    let mut formatter = Formatter::new(output, rng_for(options), options.clone());
    for line in input.lines() {
        formatter.process_line(&line?)?;
    }
    let summary = formatter.finish()?;

    log::info!(
        "Formatted {} lines into {} lines on {} pages ({} directive errors) in {:.1}ms",
        summary.lines_in,
        summary.lines_out,
        summary.pages,
        summary.errors,
        t0.elapsed().as_secs_f64() * 1000.0,
    );

    Ok(summary)
}

pub fn format_file<W: Write>(input: &Path, output: W, options: &Options) -> Result<Summary, Error> {
    let file = File::open(input).map_err(|source| Error::Open {
        path: input.to_path_buf(),
        source,
    })?;
    format_reader(BufReader::new(file), output, options)
}

pub fn format_str(input: &str, options: &Options) -> Result<String, Error> {
    let mut out = Vec::new();
    format_reader(input.as_bytes(), &mut out, options)?;
    String::from_utf8(out).map_err(|e| Error::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
}
