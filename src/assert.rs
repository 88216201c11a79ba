//! Assertions for test bodies.
//!
//! A failed check does not panic. It builds an [`AssertionFailure`] that
//! records where the check was written and returns it from the enclosing test
//! body, so only that body stops running:
//!
//! ```rust
//! use tctest::{check, check_eq, TestResult};
//!
//! fn test_addition(total: &mut i32) -> TestResult {
//!     *total += 2;
//!     check!(*total > 0);
//!     check_eq!(*total, 2, "started from {}", 0);
//!     Ok(())
//! }
//!
//! let mut total = 0;
//! assert!(test_addition(&mut total).is_ok());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Return type of every test body.
pub type TestResult = Result<(), AssertionFailure>;

/// A `file:line` pair pointing at the check (or panic) that failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub file: String,
    pub line: u32,
}

impl SourceLocation {
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

impl From<&std::panic::Location<'_>> for SourceLocation {
    fn from(location: &std::panic::Location<'_>) -> Self {
        Self::new(location.file(), location.line())
    }
}

/// A failed check inside a test body.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{location}: {message}")]
pub struct AssertionFailure {
    pub location: SourceLocation,
    pub message: String,
}

impl AssertionFailure {
    pub fn new(file: &str, line: u32, message: impl Into<String>) -> Self {
        Self {
            location: SourceLocation::new(file, line),
            message: message.into(),
        }
    }
}

/// Fails the current test unless the condition holds.
#[macro_export]
macro_rules! check {
    ($cond:expr $(,)?) => {
        if !$cond {
            return ::core::result::Result::Err($crate::AssertionFailure::new(
                file!(),
                line!(),
                concat!("check failed: ", stringify!($cond)),
            ));
        }
    };
    ($cond:expr, $($arg:tt)+) => {
        if !$cond {
            return ::core::result::Result::Err($crate::AssertionFailure::new(
                file!(),
                line!(),
                format!(
                    "check failed: {}: {}",
                    stringify!($cond),
                    format_args!($($arg)+)
                ),
            ));
        }
    };
}

/// Fails the current test unless both values compare equal.
#[macro_export]
macro_rules! check_eq {
    ($left:expr, $right:expr $(,)?) => {
        match (&$left, &$right) {
            (left, right) => {
                if !(*left == *right) {
                    return ::core::result::Result::Err($crate::AssertionFailure::new(
                        file!(),
                        line!(),
                        format!(
                            "check failed: {} == {} (left: {:?}, right: {:?})",
                            stringify!($left),
                            stringify!($right),
                            left,
                            right
                        ),
                    ));
                }
            }
        }
    };
    ($left:expr, $right:expr, $($arg:tt)+) => {
        match (&$left, &$right) {
            (left, right) => {
                if !(*left == *right) {
                    return ::core::result::Result::Err($crate::AssertionFailure::new(
                        file!(),
                        line!(),
                        format!(
                            "check failed: {} == {} (left: {:?}, right: {:?}): {}",
                            stringify!($left),
                            stringify!($right),
                            left,
                            right,
                            format_args!($($arg)+)
                        ),
                    ));
                }
            }
        }
    };
}

/// Fails the current test if both values compare equal.
#[macro_export]
macro_rules! check_ne {
    ($left:expr, $right:expr $(,)?) => {
        match (&$left, &$right) {
            (left, right) => {
                if *left == *right {
                    return ::core::result::Result::Err($crate::AssertionFailure::new(
                        file!(),
                        line!(),
                        format!(
                            "check failed: {} != {} (both: {:?})",
                            stringify!($left),
                            stringify!($right),
                            left
                        ),
                    ));
                }
            }
        }
    };
}
