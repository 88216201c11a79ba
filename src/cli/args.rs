//! Command-line arguments accepted by a test driver.
//!
//! This module uses the `clap` crate with its "derive" feature. The harness
//! contract allows zero or one test name; clap collects every positional
//! argument so the arity rule can be enforced with the harness's own usage
//! message.
//!
//! A test whose name starts with `-` is selected after a `--` separator,
//! e.g. `driver -- -odd-name`; without it the name is parsed as a flag.

use clap::Parser;

use crate::config::ColorMode;
use crate::errors::HarnessError;

#[derive(Debug, Parser)]
#[command(
    version,
    about = "Runs the registered tests, each in an isolated worker process."
)]
pub struct DriverArgs {
    /// Run only the test with exactly this name.
    #[arg(value_name = "TEST NAME")]
    pub names: Vec<String>,

    /// Print the registered test names and exit.
    #[arg(long)]
    pub list: bool,

    /// When to color the results.
    #[arg(long, value_enum, value_name = "WHEN")]
    pub color: Option<ColorMode>,
}

impl DriverArgs {
    /// The selected test name, or `None` to run every test.
    pub fn test_name(&self, program: &str) -> Result<Option<String>, HarnessError> {
        match self.names.as_slice() {
            [] => Ok(None),
            [name] => Ok(Some(name.clone())),
            _ => Err(HarnessError::usage(program)),
        }
    }
}
