// Exercises every outcome the harness can report, one test per kind.
// Used by the CLI tests; each fixture announces its setup and cleanup on
// stderr so the lifecycle can be checked from outside.

use std::process::ExitCode;

use serde::{Deserialize, Serialize};
use tctest::{check, check_eq, register, FixtureError, FixtureManager, TestResult};

#[derive(Debug, Serialize, Deserialize)]
struct Probe {
    serial: u32,
    values: Vec<i32>,
}

#[derive(Default)]
struct Probes {
    next_serial: u32,
}

impl FixtureManager for Probes {
    type Fixture = Probe;

    fn setup(&mut self) -> Result<Probe, FixtureError> {
        self.next_serial += 1;
        if std::env::var_os("SELFTEST_FAIL_SETUP").is_some() {
            return Err(FixtureError::new("setup disabled by SELFTEST_FAIL_SETUP"));
        }
        eprintln!("setup fixture #{}", self.next_serial);
        Ok(Probe {
            serial: self.next_serial,
            values: vec![1, 2, 3],
        })
    }

    fn cleanup(&mut self, probe: Probe) {
        // The runner's copy is untouched by whatever the worker did.
        eprintln!(
            "cleanup fixture #{} ({} values)",
            probe.serial,
            probe.values.len()
        );
    }
}

fn main() -> ExitCode {
    tctest::cli::run(Probes::default(), |runner| {
        register!(runner, passes);
        register!(runner, fails_check);
        register!(runner, panics);
        register!(runner, reads_invalid_memory);
        register!(runner, aborts);
        register!(runner, exits_early);
        register!(runner, prints_and_passes);
        register!(runner, prints_partial_line);
        register!(runner, fails_after_partial_line);
        register!(runner, sees_fresh_fixture);
    })
}

fn passes(p: &mut Probe) -> TestResult {
    check_eq!(p.values, vec![1, 2, 3]);
    Ok(())
}

fn fails_check(p: &mut Probe) -> TestResult {
    p.values.push(4);
    check_eq!(p.values.len(), 3, "fixture should still hold three values");
    Ok(())
}

fn panics(p: &mut Probe) -> TestResult {
    let idx = p.values.len() + 5;
    check!(p.values[idx] > 0);
    Ok(())
}

fn reads_invalid_memory(p: &mut Probe) -> TestResult {
    p.values.clear();
    let bogus = 0x10 as *const i32;
    let v = unsafe { std::ptr::read_volatile(bogus) };
    check_eq!(v, 0);
    Ok(())
}

fn aborts(p: &mut Probe) -> TestResult {
    p.values.clear();
    std::process::abort();
}

fn exits_early(_p: &mut Probe) -> TestResult {
    std::process::exit(3);
}

fn prints_and_passes(p: &mut Probe) -> TestResult {
    println!("hello from fixture #{}", p.serial);
    check!(p.serial > 0);
    Ok(())
}

fn prints_partial_line(p: &mut Probe) -> TestResult {
    print!("partial output from fixture #{}", p.serial);
    check_eq!(p.values.len(), 3);
    Ok(())
}

fn fails_after_partial_line(p: &mut Probe) -> TestResult {
    print!("partial output from fixture #{}", p.serial);
    check!(p.values.is_empty(), "values left over: {:?}", p.values);
    Ok(())
}

fn sees_fresh_fixture(p: &mut Probe) -> TestResult {
    // Earlier tests pushed to or cleared their fixtures; none of it leaks.
    check_eq!(p.values, vec![1, 2, 3]);
    Ok(())
}
