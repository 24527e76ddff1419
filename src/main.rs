use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use linefmt::Options;

#[derive(Parser)]
#[command(
    name = "linefmt",
    about = "Format directive-annotated text into paginated fixed-width pages",
    version
)]
struct Cli {
    /// File to format; standard input when omitted
    #[arg(short = 'f', long = "file", value_name = "FILE")]
    file: Option<PathBuf>,

    /// File to format (same as -f)
    #[arg(value_name = "INPUT", conflicts_with = "file")]
    input: Option<PathBuf>,

    /// Initial page width in columns
    #[arg(long, default_value_t = 72)]
    width: usize,

    /// Initial page height in lines
    #[arg(long, default_value_t = 40)]
    height: usize,

    /// Seed for fill-justification spacing, for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Print ?feed and ?feed_lines blank lines without charging them to the page
    #[arg(long)]
    feed_free: bool,

    /// Apply the ?par indent to the next paragraph only
    #[arg(long)]
    indent_once: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let options = Options {
        width: cli.width,
        height: cli.height,
        seed: cli.seed,
        feed_consumes_budget: !cli.feed_free,
        indent_persists: !cli.indent_once,
    };

    let out = BufWriter::new(io::stdout().lock());
    let result = match cli.file.or(cli.input) {
        Some(path) => linefmt::format_file(&path, out, &options),
        None => linefmt::format_reader(io::stdin().lock(), out, &options),
    };

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("linefmt: {e}");
            ExitCode::FAILURE
        }
    }
}
