//! Harness error types.
//!
//! Only conditions that make the whole run meaningless live here. A failing
//! assertion or a crashing test body is never an error at this level: both
//! are converted into an [`Outcome`](crate::test::Outcome) by the isolation
//! layer and recorded in the report like any other result.

use miette::Diagnostic;
use thiserror::Error;

/// Fatal harness conditions.
#[derive(Error, Diagnostic, Debug)]
pub enum HarnessError {
    #[error("Usage: {program} [<test name>]")]
    #[diagnostic(
        code(tctest::usage),
        help("pass no argument to run every test, or exactly one test name")
    )]
    Usage { program: String },

    #[error("fixture setup failed before test '{test}'")]
    #[diagnostic(
        code(tctest::fixture::setup),
        help("fixture setup is expected to succeed; the run was stopped")
    )]
    FixtureSetup {
        test: String,
        #[source]
        source: FixtureError,
    },

    #[error("could not encode the fixture for test '{test}'")]
    #[diagnostic(code(tctest::fixture::encode))]
    FixtureEncode {
        test: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not start a worker process for test '{test}'")]
    #[diagnostic(
        code(tctest::worker::spawn),
        help("the harness re-executes its own binary; check that it is still present on disk")
    )]
    WorkerSpawn {
        test: String,
        #[source]
        source: std::io::Error,
    },

    #[error("worker for test '{test}' reported a harness fault: {message}")]
    #[diagnostic(code(tctest::worker::protocol))]
    Worker { test: String, message: String },

    #[error("finalize() was already called on this runner")]
    #[diagnostic(code(tctest::runner::finalized))]
    AlreadyFinalized,
}

impl HarnessError {
    pub fn usage(program: impl Into<String>) -> Self {
        Self::Usage {
            program: program.into(),
        }
    }

    pub fn worker(test: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Worker {
            test: test.into(),
            message: message.into(),
        }
    }
}

/// Error returned by a [`FixtureManager`](crate::fixture::FixtureManager)
/// that could not build a fixture.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct FixtureError {
    pub message: String,
}

impl FixtureError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
