//! Command-line layer: argument parsing, orchestration and console output.

pub mod args;
pub mod exit_status;
pub mod report;
pub mod run;

use anyhow::{Context, Result};

pub use args::Arguments;
pub use exit_status::ExitStatus;

/// Generate the project file in the current directory and report the result.
pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    let cwd = std::env::current_dir().context("Failed to determine working directory")?;
    let summary = run::run(&cwd)?;
    report::print(&summary, args.verbose);
    Ok(ExitStatus::Success)
}
