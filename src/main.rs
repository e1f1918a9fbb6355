use std::{fs::File, path::PathBuf, process::ExitCode};

use clap::Parser;
use retail_report::{
    error::{Error, Result},
    pipeline::Reports,
};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "retail-report")]
#[command(about = "Summarise a year of retail transactions into report tables and chart data", long_about = None)]
struct Cli {
    /// Transaction log exported as CSV
    input: PathBuf,

    /// Directory the report CSV files are written to
    #[arg(short, long, default_value = "report")]
    output_dir: PathBuf,

    /// Enable verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(log_directives(std::env::var("RUST_LOG").ok(), cli.verbose))
                .unwrap_or_else(|_| EnvFilter::new(default_level(cli.verbose))),
        )
        .init();
    debug!(?cli, "starting");

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "report run failed");
            ExitCode::FAILURE
        }
    }
}

fn default_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

/// `RUST_LOG` wins over `-v` unless it is unset or blank.
fn log_directives(rust_log: Option<String>, verbose: u8) -> String {
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .unwrap_or_else(|| default_level(verbose).to_owned())
}

fn run(cli: &Cli) -> Result<()> {
    let file = File::open(&cli.input).map_err(|source| Error::FileError {
        path: cli.input.clone(),
        source,
    })?;

    Reports::from_reader(file)?.write_to(&cli.output_dir)
}
