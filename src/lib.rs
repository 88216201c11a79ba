//! tctest: run named test functions against a fresh fixture, each in its own
//! worker process, so a test that crashes is reported as a failure instead of
//! taking the whole run down.

pub use crate::assert::{AssertionFailure, SourceLocation, TestResult};
pub use crate::config::{ColorMode, HarnessConfig, IsolationMode};
pub use crate::errors::{FixtureError, HarnessError};
pub use crate::fixture::FixtureManager;
pub use crate::stack::{Stack, StackError, STACK_MAX};
pub use crate::test::runner::Runner;
pub use crate::test::{Outcome, RunReport, SignalKind, TestCase, TestRecord};

pub mod assert;
pub mod cli;
pub mod config;
pub mod errors;
pub mod fixture;
pub mod stack;
