//! Worker side of process isolation.
//!
//! A worker is the test binary re-executed with
//! [`WORKER_ENV`](crate::config::WORKER_ENV) set. It runs exactly one test:
//! read the JSON fixture from stdin, run the body, print one verdict line to
//! stdout, exit 0. If the body crashes first, no verdict is printed and the
//! parent classifies the termination signal instead.

use std::io::{self, Read, Write};
use std::process::ExitCode;

use serde::{Deserialize, Serialize};

use super::isolation::run_guarded;
use super::runner::Runner;
use crate::assert::AssertionFailure;
use crate::fixture::FixtureManager;

/// Marks the verdict in the worker's stdout. The body may have left a partial
/// line behind, so the marker is not required to start a line.
pub const VERDICT_PREFIX: &str = "\u{1e}tctest-verdict:";

/// What a worker reports back about its test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Passed,
    Failed(AssertionFailure),
    /// The worker could not run the test at all.
    Unavailable(String),
}

pub fn format_verdict_line(verdict: &Verdict) -> Result<String, serde_json::Error> {
    Ok(format!("{}{}", VERDICT_PREFIX, serde_json::to_string(verdict)?))
}

/// Splits a stdout line into the test output in front of the verdict and the
/// verdict itself. A line without the marker is all test output.
pub fn parse_verdict_line(line: &str) -> (&str, Option<Result<Verdict, serde_json::Error>>) {
    match line.find(VERDICT_PREFIX) {
        Some(at) => {
            let json = &line[at + VERDICT_PREFIX.len()..];
            (&line[..at], Some(serde_json::from_str(json.trim_end())))
        }
        None => (line, None),
    }
}

impl<M: FixtureManager> Runner<M> {
    /// Runs `test_name` as a worker and returns the process exit code.
    ///
    /// The fixture is never built here: it arrives on stdin, already set up by
    /// the parent, which also owns its cleanup.
    pub fn serve_worker(&self, test_name: &str) -> ExitCode {
        let verdict = self.run_as_worker(test_name, io::stdin().lock());
        let line = match format_verdict_line(&verdict) {
            Ok(line) => line,
            Err(e) => {
                tracing::error!(test = test_name, error = %e, "could not encode verdict");
                return ExitCode::FAILURE;
            }
        };
        let mut stdout = io::stdout().lock();
        if let Err(e) = writeln!(stdout, "{}", line).and_then(|_| stdout.flush()) {
            tracing::error!(test = test_name, error = %e, "could not write verdict");
            return ExitCode::FAILURE;
        }
        ExitCode::SUCCESS
    }

    fn run_as_worker(&self, test_name: &str, mut input: impl Read) -> Verdict {
        let Some(case) = self.case(test_name) else {
            return Verdict::Unavailable(format!("no test named '{}' is registered", test_name));
        };
        let mut payload = Vec::new();
        if let Err(e) = input.read_to_end(&mut payload) {
            return Verdict::Unavailable(format!("could not read fixture: {}", e));
        }
        let mut fixture: M::Fixture = match serde_json::from_slice(&payload) {
            Ok(fixture) => fixture,
            Err(e) => return Verdict::Unavailable(format!("could not decode fixture: {}", e)),
        };
        tracing::debug!(test = test_name, "worker running test body");
        match run_guarded(case, &mut fixture) {
            Ok(()) => Verdict::Passed,
            Err(failure) => Verdict::Failed(failure),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FixtureError;
    use crate::test::isolation::InlineIsolation;
    use crate::{check_eq, TestResult};

    struct Numbers;

    impl FixtureManager for Numbers {
        type Fixture = Vec<i32>;

        fn setup(&mut self) -> Result<Vec<i32>, FixtureError> {
            Ok(vec![1, 2, 3])
        }

        fn cleanup(&mut self, _fixture: Vec<i32>) {}
    }

    fn sums_to_six(v: &mut Vec<i32>) -> TestResult {
        check_eq!(v.iter().sum::<i32>(), 6);
        Ok(())
    }

    fn runner() -> Runner<Numbers> {
        let mut runner = Runner::with_config(Numbers, Default::default())
            .with_isolation(InlineIsolation);
        runner.register("sums_to_six", sums_to_six);
        runner
    }

    #[test]
    fn verdict_line_round_trips() {
        let verdict = Verdict::Failed(AssertionFailure::new("x.rs", 4, "check failed: a"));
        let line = format_verdict_line(&verdict).unwrap();
        assert!(line.starts_with(VERDICT_PREFIX));
        let (output, parsed) = parse_verdict_line(&line);
        assert_eq!(output, "");
        assert_eq!(parsed.unwrap().unwrap(), verdict);
    }

    #[test]
    fn ordinary_output_is_not_a_verdict() {
        let (output, parsed) = parse_verdict_line("hello from a test");
        assert_eq!(output, "hello from a test");
        assert!(parsed.is_none());
    }

    #[test]
    fn verdict_after_partial_output_is_found() {
        let line = format!("progress: {}", format_verdict_line(&Verdict::Passed).unwrap());
        let (output, parsed) = parse_verdict_line(&line);
        assert_eq!(output, "progress: ");
        assert_eq!(parsed.unwrap().unwrap(), Verdict::Passed);
    }

    #[test]
    fn worker_runs_body_on_received_fixture() {
        let runner = runner();
        assert_eq!(
            runner.run_as_worker("sums_to_six", &b"[1,2,3]"[..]),
            Verdict::Passed
        );
        match runner.run_as_worker("sums_to_six", &b"[1,2]"[..]) {
            Verdict::Failed(f) => assert!(f.message.contains("left: 3")),
            other => panic!("unexpected verdict {:?}", other),
        }
    }

    #[test]
    fn worker_rejects_unknown_test_and_bad_payload() {
        let runner = runner();
        assert!(matches!(
            runner.run_as_worker("missing", &b"[]"[..]),
            Verdict::Unavailable(msg) if msg.contains("missing")
        ));
        assert!(matches!(
            runner.run_as_worker("sums_to_six", &b"not json"[..]),
            Verdict::Unavailable(msg) if msg.contains("decode")
        ));
    }
}
