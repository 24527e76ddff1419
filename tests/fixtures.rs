mod common;

use rayon::prelude::*;
use std::fs;
use std::path::Path;

struct CaseResult {
    name: String,
    pass: bool,
    first_diff: Option<(usize, String, String)>,
}

fn run_fixture(fixture_dir: &Path) -> Option<CaseResult> {
    let name = common::display_name(fixture_dir);
    let input = fs::read_to_string(fixture_dir.join("input.txt")).ok()?;
    let expected = fs::read_to_string(fixture_dir.join("expected.txt")).ok()?;

    let generated = match linefmt::format_str(&input, &common::options(72, 40)) {
        Ok(out) => out,
        Err(e) => {
            println!("  [FAIL] {name}: {e}");
            return Some(CaseResult {
                name,
                pass: false,
                first_diff: None,
            });
        }
    };

    let first_diff = generated
        .lines()
        .map(Some)
        .chain(std::iter::repeat(None))
        .zip(expected.lines().map(Some).chain(std::iter::repeat(None)))
        .take_while(|(g, e)| g.is_some() || e.is_some())
        .enumerate()
        .find(|(_, (g, e))| g != e)
        .map(|(i, (g, e))| {
            (
                i + 1,
                format!("{:?}", g.unwrap_or("<eof>")),
                format!("{:?}", e.unwrap_or("<eof>")),
            )
        });

    Some(CaseResult {
        name,
        pass: generated == expected,
        first_diff,
    })
}

#[test]
fn golden_output_comparison() {
    let _ = env_logger::try_init();
    let fixtures = common::discover_fixtures().expect("discover fixtures");
    assert!(!fixtures.is_empty(), "no fixtures under tests/fixtures");

    let results: Vec<CaseResult> = fixtures.par_iter().filter_map(|f| run_fixture(f)).collect();

    println!();
    println!("+{:-<42}+{:-<7}+", "", "");
    println!("| {:<40} | {:<5} |", "Case", "Match");
    println!("+{:-<42}+{:-<7}+", "", "");
    for r in &results {
        println!(
            "| {:<40} | {:<5} |",
            r.name,
            if r.pass { "OK" } else { "DIFF" }
        );
    }
    println!("+{:-<42}+{:-<7}+", "", "");

    let failures: Vec<&CaseResult> = results.iter().filter(|r| !r.pass).collect();
    for r in &failures {
        if let Some((line, got, want)) = &r.first_diff {
            println!("{}: line {line}: got {got}, expected {want}", r.name);
        }
    }
    assert!(
        failures.is_empty(),
        "{} of {} fixtures differ",
        failures.len(),
        results.len()
    );
}
