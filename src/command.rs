//! Name-based dispatch from a routine name to a plotting routine.
//!
//! The registry is a fixed table built once at startup; nothing is
//! resolved reflectively. Options shared by the routines (currently just
//! the `--cores` filter) are parsed once and passed by reference into
//! whichever routine runs.

use crate::routines;
use anyhow::Result;
use thiserror::Error;

/// Fatal, user-facing validation errors. Each of these prints its message
/// plus the usage listing and exits with a non-zero status.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("no routine was specified")]
    NoRoutine,
    #[error("there is no routine named `{0}`")]
    UnknownRoutine(String),
    #[error("routine `{name}` expects {expected} argument(s), got {got}")]
    MissingArgument {
        name: &'static str,
        expected: usize,
        got: usize,
    },
    #[error("--cores expects space-separated integers, got `{0}`")]
    MalformedFilter(String),
}

/// Options shared by every routine, parsed once at startup.
#[derive(Debug, Default)]
pub struct Options {
    /// Restrict per-core plots to these core numbers; `None` plots every
    /// core present in the data file.
    pub cores: Option<Vec<u32>>,
}

impl Options {
    /// Parse a `--cores` value, a space-separated list of integers.
    pub fn parse_cores(value: &str) -> Result<Vec<u32>, CommandError> {
        value
            .split_whitespace()
            .map(|token| {
                token
                    .parse()
                    .map_err(|_| CommandError::MalformedFilter(token.to_string()))
            })
            .collect()
    }
}

/// Check that a routine received at least `expected` positional arguments.
pub fn require_args(name: &'static str, expected: usize, args: &[String]) -> Result<(), CommandError> {
    if args.len() < expected {
        return Err(CommandError::MissingArgument {
            name,
            expected,
            got: args.len(),
        });
    }
    Ok(())
}

type RoutineFn = fn(&Options, &[String]) -> Result<()>;

/// One registered plotting routine.
pub struct Routine {
    pub name: &'static str,
    pub usage: &'static str,
    pub help: &'static str,
    run: RoutineFn,
}

/// The fixed table of routines the command line can name.
pub struct Registry {
    routines: Vec<Routine>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            routines: vec![
                Routine {
                    name: "backlog",
                    usage: "backlog <data_file> <plot_file>",
                    help: "Plot per-core network backlog over time",
                    run: routines::backlog,
                },
                Routine {
                    name: "colors",
                    usage: "colors <plot_file>",
                    help: "Render a reference swatch of the series palette",
                    run: routines::colors,
                },
            ],
        }
    }

    /// Registered routines, in listing order.
    pub fn routines(&self) -> &[Routine] {
        &self.routines
    }

    /// Look up the named routine and run it with the remaining positional
    /// arguments. Errors raised inside the routine propagate untouched.
    pub fn dispatch(&self, name: &str, options: &Options, args: &[String]) -> Result<()> {
        let routine = self
            .routines
            .iter()
            .find(|r| r.name == name)
            .ok_or_else(|| CommandError::UnknownRoutine(name.to_string()))?;
        (routine.run)(options, args)
    }
}
