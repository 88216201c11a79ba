//! Handles all user-facing output for a test run.
//!
//! The runner talks to a [`Reporter`]; [`ConsoleReporter`] is the only
//! implementation shipped and writes colored lines through `termcolor`.

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::test::{Outcome, RunReport};

/// Receives progress events from the runner.
pub trait Reporter {
    /// Called once before the first test, with the number of selected tests.
    fn on_run_start(&mut self, _selected: usize) {}

    /// Called after each test, in execution order.
    fn on_test_complete(&mut self, name: &str, outcome: &Outcome);

    /// Called once after the last test.
    fn on_run_complete(&mut self, report: &RunReport);
}

// ============================================================================
// CONSOLE REPORTER
// ============================================================================

/// Prints `Running test <name>...PASS|FAIL` per test and a summary line.
pub struct ConsoleReporter<W> {
    out: W,
}

impl ConsoleReporter<StandardStream> {
    pub fn stdout(choice: ColorChoice) -> Self {
        Self::new(StandardStream::stdout(choice))
    }
}

impl<W: WriteColor> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    fn write_test_line(&mut self, name: &str, outcome: &Outcome) -> io::Result<()> {
        write!(self.out, "Running test {}...", name)?;
        let color = if outcome.is_passed() {
            Color::Green
        } else {
            Color::Red
        };
        self.out
            .set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
        write!(self.out, "{}", outcome.label())?;
        self.out.reset()?;
        writeln!(self.out)?;

        match outcome {
            Outcome::Passed => {}
            Outcome::AssertionFailed(failure) => writeln!(
                self.out,
                "    assertion failed at {}: {}",
                failure.location, failure.message
            )?,
            Outcome::Crashed { signal } => writeln!(self.out, "    crashed: {}", signal)?,
        }
        self.out.flush()
    }

    fn write_summary(&mut self, report: &RunReport) -> io::Result<()> {
        if report.all_passed() {
            self.out
                .set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true))?;
            write!(self.out, "All tests passed")?;
        } else {
            self.out
                .set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
            write!(self.out, "{} test(s) failed", report.failed())?;
        }
        self.out.reset()?;
        writeln!(
            self.out,
            " ({} run, {} passed, {} failed)",
            report.len(),
            report.passed(),
            report.failed()
        )?;
        self.out.flush()
    }
}

impl<W: WriteColor> Reporter for ConsoleReporter<W> {
    fn on_test_complete(&mut self, name: &str, outcome: &Outcome) {
        if let Err(e) = self.write_test_line(name, outcome) {
            tracing::warn!(error = %e, "could not write test result");
        }
    }

    fn on_run_complete(&mut self, report: &RunReport) {
        if let Err(e) = self.write_summary(report) {
            tracing::warn!(error = %e, "could not write run summary");
        }
    }
}

// ============================================================================
// SHARED BUFFER: in-memory sink for capturing reporter output
// ============================================================================

/// A cloneable, colorless in-memory writer.
///
/// Hand one clone to a [`ConsoleReporter`] and keep another to read what was
/// printed.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl WriteColor for SharedBuffer {
    fn supports_color(&self) -> bool {
        false
    }

    fn set_color(&mut self, _spec: &ColorSpec) -> io::Result<()> {
        Ok(())
    }

    fn reset(&mut self) -> io::Result<()> {
        Ok(())
    }
}
