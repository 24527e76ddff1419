use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use linefmt::Options;

pub const FORM_FEED: &str = "\x0c";

/// `group/case` relative to the fixture root.
pub fn display_name(fixture: &Path) -> String {
    fixture
        .strip_prefix("tests/fixtures")
        .unwrap_or(fixture)
        .to_string_lossy()
        .into_owned()
}

/// Every `tests/fixtures/<group>/<case>` directory, sorted. `LINEFMT_CASE` narrows the
/// run to names containing it.
pub fn discover_fixtures() -> io::Result<Vec<PathBuf>> {
    let filter = std::env::var("LINEFMT_CASE").ok();
    let mut fixtures = Vec::new();
    for group in fs::read_dir("tests/fixtures")? {
        let group = group?.path();
        if !group.is_dir() {
            continue;
        }
        for case in fs::read_dir(&group)? {
            let case = case?.path();
            if case.is_dir() && filter.as_deref().is_none_or(|f| display_name(&case).contains(f)) {
                fixtures.push(case);
            }
        }
    }
    fixtures.sort();
    Ok(fixtures)
}

pub fn options(width: usize, height: usize) -> Options {
    Options {
        width,
        height,
        seed: Some(7),
        ..Options::default()
    }
}

pub fn run(input: &str) -> String {
    run_with(input, &options(72, 40))
}

pub fn run_with(input: &str, options: &Options) -> String {
    linefmt::format_str(input, options).expect("formatting failed")
}

pub fn lines(output: &str) -> Vec<&str> {
    output.lines().collect()
}

/// Output split at form-feed lines.
pub fn pages(output: &str) -> Vec<Vec<&str>> {
    let mut pages = vec![Vec::new()];
    for line in output.lines() {
        if line == FORM_FEED {
            pages.push(Vec::new());
        } else if let Some(page) = pages.last_mut() {
            page.push(line);
        }
    }
    pages
}

pub fn as_is_lines(range: std::ops::RangeInclusive<usize>) -> String {
    range.map(|i| format!("L{i}\n")).collect()
}
