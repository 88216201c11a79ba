// Unit tests for the fixed-capacity stack.
// Usage: test_driver [<test name>]

use std::process::ExitCode;

use serde::{Deserialize, Serialize};
use tctest::{check, check_eq, register, FixtureError, FixtureManager, Stack, TestResult, STACK_MAX};

/// State handed to every test.
#[derive(Debug, Serialize, Deserialize)]
struct TestObjs {
    s: Stack,
}

struct StackFixtures;

impl FixtureManager for StackFixtures {
    type Fixture = TestObjs;

    fn setup(&mut self) -> Result<TestObjs, FixtureError> {
        Ok(TestObjs { s: Stack::new() })
    }

    fn cleanup(&mut self, objs: TestObjs) {
        drop(objs);
    }
}

fn main() -> ExitCode {
    tctest::cli::run(StackFixtures, |runner| {
        register!(runner, test_push);
        register!(runner, test_push_many);
        register!(runner, test_swap_top_elts);
        register!(runner, test_size_is_even);
        register!(runner, test_segfault_before_assert);
        register!(runner, test_pop_empty);
        register!(runner, test_bulk_push_stops_at_capacity);
    })
}

fn test_push(objs: &mut TestObjs) -> TestResult {
    check!(objs.s.is_empty());
    check!(objs.s.push(1).is_ok());
    check!(objs.s.push(2).is_ok());
    check!(objs.s.push(3).is_ok());

    check_eq!(objs.s.pop(), Some(3));
    check_eq!(objs.s.pop(), Some(2));
    check_eq!(objs.s.pop(), Some(1));
    check!(objs.s.is_empty());
    Ok(())
}

fn test_push_many(objs: &mut TestObjs) -> TestResult {
    for i in 1..=STACK_MAX as i32 {
        check!(objs.s.push(i).is_ok());
    }

    // stack should be full at this point
    check!(objs.s.push(11).is_err());
    check_eq!(objs.s.len(), STACK_MAX);
    Ok(())
}

fn test_swap_top_elts(objs: &mut TestObjs) -> TestResult {
    check!(objs.s.push(1).is_ok());
    check!(objs.s.push(2).is_ok());
    check!(objs.s.push(3).is_ok());

    check!(objs.s.swap_top_elts().is_ok());

    check_eq!(objs.s.pop(), Some(2));
    check_eq!(objs.s.pop(), Some(3));
    Ok(())
}

fn test_size_is_even(objs: &mut TestObjs) -> TestResult {
    check!(objs.s.push(1).is_ok());
    check!(objs.s.push(2).is_ok());
    check!(objs.s.push(3).is_ok());
    check!(!objs.s.size_is_even());

    check!(objs.s.pop().is_some());
    check!(objs.s.size_is_even());
    Ok(())
}

/// Faults before any check runs. The harness must report it as crashed and
/// carry on with the remaining tests.
fn test_segfault_before_assert(objs: &mut TestObjs) -> TestResult {
    let _ = objs.s.push(1);
    let _ = objs.s.push(2);
    let _ = objs.s.push(3);
    let _ = objs.s.swap_top_elts();

    // Aligned and non-null, but never mapped.
    let top = 0x10 as *const i32;
    let x = unsafe { std::ptr::read_volatile(top) };

    check_eq!(x, 2);
    check_eq!(objs.s.pop(), Some(3));
    Ok(())
}

fn test_pop_empty(objs: &mut TestObjs) -> TestResult {
    check!(objs.s.pop().is_none());
    check!(objs.s.swap_top_elts().is_err());
    Ok(())
}

fn test_bulk_push_stops_at_capacity(objs: &mut TestObjs) -> TestResult {
    let inserted = objs.s.push_many(100..);
    check_eq!(inserted, STACK_MAX);
    check!(objs.s.is_full());
    check_eq!(objs.s.pop(), Some(100 + STACK_MAX as i32 - 1));
    Ok(())
}
