//! Declarative command line parsing.
//!
//! A [`CmdLine`] declares flags, options taking a value, positional
//! arguments (the last one optionally collecting every remaining token) or
//! commands. [`CmdLine::parse`] binds a token vector against it and returns
//! the bound [`Matches`], a help request, or a [`ParseError`].
//!
//! Only `-x` and `--long` forms are recognized: no `--name=value`, no
//! combined short flags. `--` ends option scanning.
//!
//! ```
//! use cmdline::{CmdLine, ParseOutcome};
//!
//! # fn main() -> Result<(), cmdline::SpecError> {
//! let mut cl = CmdLine::new();
//! cl.add_option("n", "", "value", "an example value")?;
//! cl.add_argument("foo", "the first argument")?;
//! cl.add_trailing_arguments("name", "a trailing argument")?;
//!
//! let Ok(ParseOutcome::Matches(m)) = cl.parse(["prog", "-n", "5", "a", "b", "c"]) else {
//!     panic!("parse failed");
//! };
//! assert_eq!(m.option_value("n"), "5");
//! assert_eq!(m.argument_value("foo"), "a");
//! assert_eq!(m.trailing_arguments_values("name"), ["b", "c"]);
//! # Ok(())
//! # }
//! ```
//!
//! Programs usually call [`CmdLine::parse_env_or_exit`], which prints help
//! or `error: <message>` and terminates the process when parsing does not
//! yield values.

mod cmdline;
mod error;
mod matches;
mod parse;
mod usage;

pub use cmdline::{Argument, CmdLine, Command, OptionSpec};
pub use error::{ParseError, ParseErrorKind, SpecError};
pub use matches::Matches;
pub use parse::{ParseOutcome, ParseResult, exit_with_error};
