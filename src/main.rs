//! Command-line front end: read two matrices, multiply, print.

use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use rowmatmul::io::{Problem, read_problem, write_result};
use rowmatmul::timing::compare;
use rowmatmul::{WorkerCount, multiply_with_workers};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "rowmatmul",
    version,
    about = "Multiply two integer matrices, splitting output rows across threads",
    after_help = "\
Input format (whitespace separated):
  N M P
  N*M values of A, row-major
  M*P values of B, row-major

Set RUST_LOG=rowmatmul=debug to see which rows each worker handles."
)]
struct Cli {
    /// Number of worker threads (default: available parallelism, or 4)
    #[arg(short, long)]
    workers: Option<usize>,

    /// Read input from a file instead of stdin
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Time a single-threaded run against the threaded run and print the
    /// speedup instead of the result matrix
    #[arg(long)]
    timing: bool,

    /// Do not print the result matrix
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "multiplication failed");
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> rowmatmul::Result<()> {
    let Problem { a, b } = match &cli.input {
        Some(path) => read_problem(File::open(path)?)?,
        None => read_problem(std::io::stdin().lock())?,
    };

    let workers = cli.workers.map_or(WorkerCount::Auto, WorkerCount::Fixed);

    if cli.timing {
        let (report, _) = compare(&a, &b, workers)?;
        println!("{}", report);
        return Ok(());
    }

    let c = multiply_with_workers(&a, &b, workers)?;
    if !cli.quiet {
        write_result(std::io::stdout().lock(), &c)?;
    }
    Ok(())
}
