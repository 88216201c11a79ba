//! Harness configuration, read from the environment.
//!
//! | variable           | values                         | default   |
//! |--------------------|--------------------------------|-----------|
//! | `TCTEST_ISOLATION` | `process`, `inline`            | `process` |
//! | `TCTEST_COLOR`     | `auto`, `always`, `never`      | `auto`    |
//! | `NO_COLOR`         | any value disables color       |           |
//! | `TCTEST_LOG`       | `tracing` filter directives    | `warn`    |
//! | `TCTEST_WORKER`    | set by the runner in children  |           |

use std::env;
use std::str::FromStr;

use termcolor::ColorChoice;

pub const ISOLATION_ENV: &str = "TCTEST_ISOLATION";
pub const COLOR_ENV: &str = "TCTEST_COLOR";
pub const LOG_ENV: &str = "TCTEST_LOG";
pub const WORKER_ENV: &str = "TCTEST_WORKER";

/// How each test body is shielded from the rest of the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IsolationMode {
    /// Run every body in a child process; memory faults are contained.
    #[default]
    Process,
    /// Run bodies on the runner's own thread; only panics and failed checks
    /// are contained.
    Inline,
}

impl FromStr for IsolationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "process" => Ok(Self::Process),
            "inline" => Ok(Self::Inline),
            other => Err(format!("unknown isolation mode '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

impl FromStr for ColorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "always" => Ok(Self::Always),
            "never" => Ok(Self::Never),
            other => Err(format!("unknown color mode '{}'", other)),
        }
    }
}

impl ColorMode {
    pub fn to_color_choice(self) -> ColorChoice {
        match self {
            Self::Always => ColorChoice::Always,
            Self::Never => ColorChoice::Never,
            Self::Auto if atty::is(atty::Stream::Stdout) => ColorChoice::Auto,
            Self::Auto => ColorChoice::Never,
        }
    }
}

/// Configuration for a test run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HarnessConfig {
    pub isolation: IsolationMode,
    pub color: ColorMode,
    /// Name of the test this process must run as a worker, if any.
    pub worker: Option<String>,
}

impl HarnessConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary variable lookup.
    ///
    /// Unparseable values fall back to the default and are logged.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let isolation = parse_or_default(ISOLATION_ENV, lookup(ISOLATION_ENV));
        let color = if lookup("NO_COLOR").is_some_and(|v| !v.is_empty()) {
            ColorMode::Never
        } else {
            parse_or_default(COLOR_ENV, lookup(COLOR_ENV))
        };
        let worker = lookup(WORKER_ENV).filter(|name| !name.is_empty());
        Self {
            isolation,
            color,
            worker,
        }
    }

    pub fn is_worker(&self) -> bool {
        self.worker.is_some()
    }
}

fn parse_or_default<T>(key: &str, value: Option<String>) -> T
where
    T: FromStr<Err = String> + Default,
{
    match value.map(|v| v.parse::<T>()) {
        Some(Ok(parsed)) => parsed,
        Some(Err(reason)) => {
            tracing::warn!(variable = key, %reason, "ignoring invalid setting");
            T::default()
        }
        None => T::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> HarnessConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        HarnessConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_to_process_isolation() {
        let c = config(&[]);
        assert_eq!(c.isolation, IsolationMode::Process);
        assert_eq!(c.color, ColorMode::Auto);
        assert!(!c.is_worker());
    }

    #[test]
    fn reads_isolation_and_color() {
        let c = config(&[(ISOLATION_ENV, "Inline"), (COLOR_ENV, "never")]);
        assert_eq!(c.isolation, IsolationMode::Inline);
        assert_eq!(c.color, ColorMode::Never);
    }

    #[test]
    fn invalid_values_fall_back() {
        let c = config(&[(ISOLATION_ENV, "thread"), (COLOR_ENV, "rainbow")]);
        assert_eq!(c, HarnessConfig::default());
    }

    #[test]
    fn no_color_wins_over_tctest_color() {
        let c = config(&[("NO_COLOR", "1"), (COLOR_ENV, "always")]);
        assert_eq!(c.color, ColorMode::Never);
    }

    #[test]
    fn worker_name_comes_from_env() {
        let c = config(&[(WORKER_ENV, "test_push")]);
        assert_eq!(c.worker.as_deref(), Some("test_push"));
        assert!(config(&[(WORKER_ENV, "")]).worker.is_none());
    }
}
