//! Entry point for test driver binaries.
//!
//! A driver builds its fixture manager, registers its tests and hands both to
//! [`run`]. The same binary doubles as the worker executable used by process
//! isolation, so `run` must be the first thing `main` does.

use std::env;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::args::DriverArgs;
use crate::config::{HarnessConfig, LOG_ENV};
use crate::fixture::FixtureManager;
use crate::test::runner::Runner;

pub mod args;
pub mod output;

/// Exit status for harness faults, distinct from "some test failed".
const HARNESS_FAILURE: u8 = 2;

/// Installs a stderr `tracing` subscriber filtered by `TCTEST_LOG`
/// (default `warn`). Safe to call more than once.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

/// Parses the command line, runs the selected tests and returns the exit
/// status: 0 when every executed test passed, 1 on test failures or bad
/// usage, 2 when the harness itself failed.
pub fn run<M, R>(manager: M, register: R) -> ExitCode
where
    M: FixtureManager,
    R: FnOnce(&mut Runner<M>),
{
    init_tracing();
    let mut config = HarnessConfig::from_env();

    if let Some(test) = config.worker.clone() {
        let mut runner = Runner::with_config(manager, config);
        register(&mut runner);
        return runner.serve_worker(&test);
    }

    let argv: Vec<String> = env::args().collect();
    let program = argv.first().cloned().unwrap_or_else(|| "tctest".to_string());
    let args = match DriverArgs::try_parse_from(&argv) {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            tracing::debug!(error = %e, "rejected command line");
            println!("{}", crate::errors::HarnessError::usage(&program));
            return ExitCode::FAILURE;
        }
    };
    let selection = match args.test_name(&program) {
        Ok(selection) => selection,
        Err(usage) => {
            println!("{}", usage);
            return ExitCode::FAILURE;
        }
    };
    if let Some(color) = args.color {
        config.color = color;
    }

    let mut runner = Runner::with_config(manager, config);
    register(&mut runner);

    if args.list {
        for name in runner.test_names() {
            println!("{}", name);
        }
        return ExitCode::SUCCESS;
    }

    runner.select_by_name(selection);
    match runner.finalize() {
        Ok(report) => report.exit_code(),
        Err(e) => {
            eprintln!("{:?}", miette::Report::new(e));
            ExitCode::from(HARNESS_FAILURE)
        }
    }
}
