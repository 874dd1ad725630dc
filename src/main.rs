//! Command-line entry point for pysplit

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use pysplit::base::LineIndex;
use pysplit::project::emit_package;
use pysplit::{SplitError, split_source};

#[derive(Parser, Debug)]
#[command(name = "pysplit")]
#[command(about = "Split a monolithic Python module into a package of single-declaration files")]
struct Args {
    /// Path to the source Python file
    input: PathBuf,

    /// Output directory (defaults to the input path with its extension removed)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Resolve declarations one at a time instead of across a thread pool
    #[arg(long)]
    sequential: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);
    run(&args)
}

fn run(args: &Args) -> ExitCode {
    let source = match std::fs::read_to_string(&args.input) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("error: {}: {err}", args.input.display());
            return ExitCode::FAILURE;
        }
    };
    let out_dir = args
        .out
        .clone()
        .unwrap_or_else(|| args.input.with_extension(""));

    let ctx = match split_source(&source, !args.sequential) {
        Ok(ctx) => ctx,
        Err(SplitError::Parse(err)) => {
            let position = LineIndex::new(&source).line_col(err.range.start());
            eprintln!(
                "error: {}:{}:{}: {}",
                args.input.display(),
                position.line,
                position.col + 1,
                err.message
            );
            return ExitCode::FAILURE;
        }
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    match emit_package(&ctx, &source, &out_dir) {
        Ok(summary) => {
            println!(
                "split {} into {} ({} declaration files, {} constants)",
                args.input.display(),
                out_dir.display(),
                summary.declaration_files,
                summary.constants
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
