use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use console::Style;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use repo_scaffold::{exit_code, Config, Outcome, TermPrompter};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// URL of the boilerplate repository
    repo: String,

    /// More diagnostic output (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Runs the pipeline; scaffolding failures carry their own exit code, anything
/// else surfaces as an `anyhow` error.
fn scaffold(cli: &Cli) -> Result<ExitCode> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("cannot start the async runtime")?;

    let config = Config::from_env();
    let mut prompter = TermPrompter::new();
    match runtime.block_on(repo_scaffold::run(&config, &cli.repo, &mut prompter)) {
        Ok(Outcome::Created { .. }) | Ok(Outcome::Declined) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            eprintln!("{}", Style::new().red().for_stderr().apply_to(&err));
            Ok(ExitCode::from(err.exit_code()))
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    scaffold(&cli).unwrap_or_else(|err| {
        eprintln!("{}", Style::new().red().for_stderr().apply_to(format!("{err:#}")));
        ExitCode::from(exit_code::RUNTIME)
    })
}
