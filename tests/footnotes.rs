mod common;

use common::{as_is_lines, lines, options, pages, run, run_with};
use linefmt::{Formatter, Mode, Options};

fn formatter(options: Options) -> Formatter<Vec<u8>, rand::rngs::StdRng> {
    Formatter::new(Vec::new(), linefmt::rng_for(&options), options)
}

fn feed(f: &mut Formatter<Vec<u8>, rand::rngs::StdRng>, input: &str) {
    for line in input.lines() {
        f.process_line(line).unwrap();
    }
}

#[test]
fn footnote_is_queued_and_marked() {
    let mut f = formatter(options(72, 40));
    feed(&mut f, "Some body text\n?footnote 2");
    assert_eq!(f.mode(), Mode::CapturingFootnote { remaining: 2 });
    assert_eq!(f.pending(), "Some body text[1]");

    feed(&mut f, "first note\nsecond note");
    assert_eq!(f.mode(), Mode::Normal);
    assert_eq!(
        f.queued_footnotes(),
        ["-".repeat(72), "    [1] first note".to_string(), "    second note".to_string()]
    );
    assert_eq!(f.lines_left(), 36);

    f.finish().unwrap();
    let out = String::from_utf8(f.into_inner()).unwrap();
    let out = lines(&out);
    assert_eq!(out.len(), 39);
    assert_eq!(out[0], "Some body text[1]");
    assert!(out[1..36].iter().all(|l| l.is_empty()));
    assert_eq!(out[36], "-".repeat(72));
    assert_eq!(out[37], "    [1] first note");
    assert_eq!(out[38], "    second note");
}

#[test]
fn captured_lines_are_taken_literally() {
    let mut f = formatter(options(72, 40));
    feed(&mut f, "?footnote 1\n?page_break");
    assert_eq!(f.queued_footnotes()[1], "    [1] ?page_break");
    assert_eq!(f.page_number(), 1);
}

#[test]
fn blank_captured_lines_still_count() {
    let mut f = formatter(options(72, 40));
    feed(&mut f, "text\n?footnote 3\none\n\ntwo\nafter");
    assert_eq!(f.mode(), Mode::Normal);
    assert_eq!(
        f.queued_footnotes(),
        ["-".repeat(72), "    [1] one".to_string(), "    two".to_string()]
    );
    assert_eq!(f.pending(), "text[1] after");
}

#[test]
fn second_footnote_shares_the_rule() {
    let mut f = formatter(options(72, 40));
    feed(&mut f, "alpha\n?footnote 1\none\nbeta\n?footnote 1\ntwo");
    assert_eq!(f.pending(), "alpha[1] beta[2]");
    assert_eq!(
        f.queued_footnotes(),
        ["-".repeat(72), "    [1] one".to_string(), "    [2] two".to_string()]
    );
}

#[test]
fn numbering_restarts_on_each_page() {
    let out = run("a\n?footnote 1\none\n?page_break\nb\n?footnote 1\ntwo\n");
    let split = pages(&out);
    assert_eq!(split.len(), 2);
    assert_eq!(split[0].len(), 39);
    assert_eq!(split[0][0], "a[1]");
    assert_eq!(split[0][38], "    [1] one");
    assert_eq!(split[1][0], "b[1]");
    assert_eq!(split[1][38], "    [1] two");
}

#[test]
fn footnote_near_the_foot_moves_to_the_next_page() {
    let input = format!(
        "?align as_is\n{}?align left\ntext\n?footnote 1\nnote\n",
        as_is_lines(1..=18)
    );
    let out = run_with(&input, &options(72, 20));
    let split = pages(&out);
    assert_eq!(split.len(), 2);
    assert_eq!(split[0].len(), 18);

    let second = &split[1];
    assert_eq!(second.len(), 19);
    assert_eq!(second[0], "text[1]");
    assert_eq!(second[17], "-".repeat(72));
    assert_eq!(second[18], "    [1] note");
}

#[test]
fn long_footnote_wraps_inside_its_offset() {
    let mut f = formatter(options(28, 20));
    feed(
        &mut f,
        "x\n?footnote 1\naaaa bbbb cccc dddd eeee ffff gggg",
    );
    assert_eq!(
        f.queued_footnotes(),
        [
            "-".repeat(28),
            "    [1] aaaa bbbb cccc dddd".to_string(),
            "    eeee ffff gggg".to_string(),
        ]
    );
    assert_eq!(f.lines_left(), 16);
}

#[test]
fn unfinished_capture_is_flushed_at_the_end() {
    let out = run("body\n?footnote 3\nonly one\n");
    let out = lines(&out);
    assert_eq!(out.last(), Some(&"    [1] only one"));
    assert_eq!(out.len(), 39);
}

#[test]
fn as_is_text_gets_no_marker() {
    let mut f = formatter(options(72, 40));
    feed(&mut f, "?align as_is\nrow one\n?footnote 1\nnote\nrow two");
    assert_eq!(f.pending(), "");
    assert_eq!(f.queued_footnotes()[1], "    [1] note");

    feed(&mut f, "?align left\nafter");
    assert_eq!(f.pending(), "after");
}

#[test]
fn footnote_after_a_full_page_starts_the_next_one() {
    let input = format!("?align as_is\n{}?align left\nx\n?footnote 1\nnote\n", as_is_lines(1..=19));
    let out = run_with(&input, &options(72, 20));
    let split = pages(&out);
    assert_eq!(split.len(), 2);
    assert_eq!(split[0].len(), 19);
    assert_eq!(split[1][0], "x[1]");
    assert_eq!(split[1][18], "    [1] note");
}

#[test]
fn zero_line_footnote_is_rejected() {
    let out = run("?footnote 0\nbody\n");
    assert_eq!(
        lines(&out),
        [
            "",
            ">>> ERROR: ?footnote: n = 0 is out of range [1, 9223372036854775807]",
            "",
            "body",
            "",
        ]
    );
}
