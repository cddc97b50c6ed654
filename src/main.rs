use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Check that a backend's directory listing tracks file creation and deletion"
)]
struct Cli {
    /// File to create and delete. Its parent directory must exist and must
    /// not already contain an entry with this name.
    path: PathBuf,

    /// Repeat the create/delete cycle this many times on the same path
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    rounds: u32,

    /// Log each step to stderr (-v for debug, -vv to also log every listed entry)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match scanprobe::probe(&cli.path).rounds(cli.rounds as usize).run() {
        Ok(report) => {
            debug!(
                rounds = report.rounds,
                steps = report.steps.len(),
                elapsed = ?report.duration,
                "probe passed"
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            let code = err.exit_code();
            eprintln!("scanprobe: {:#}", anyhow::Error::from(err));
            ExitCode::from(code)
        }
    }
}

/// `RUST_LOG` wins when set; otherwise verbosity picks the level. The default
/// of `warn` keeps a passing run silent.
fn init_tracing(verbose: u8) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(match verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        })
    });
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .init();
}
