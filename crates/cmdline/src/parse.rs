use std::ffi::OsString;
use std::fmt;
use std::io::{self, Write};
use std::process;

use crate::cmdline::CmdLine;
use crate::error::ParseError;
use crate::matches::Matches;

pub type ParseResult<T> = Result<T, ParseError>;

/// Successful results of [`CmdLine::parse`].
#[derive(Debug, Clone)]
pub enum ParseOutcome<'c> {
    Matches(Matches<'c>),
    /// `-h/--help` was given; holds the rendered usage text.
    Help(String),
}

/// Extract the option key from `-x` or `--long` tokens.
///
/// Any other token (including `-` alone) is not an option.
fn option_key(arg: &str) -> Option<&str> {
    let mut chars = arg.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some('-'), Some(c), None) if c != '-' => Some(&arg[1..]),
        (Some('-'), Some('-'), Some(_)) => Some(&arg[2..]),
        _ => None,
    }
}

/// Convert raw process arguments, rejecting tokens that are not valid UTF-8.
pub(crate) fn os_args<I>(args: I) -> ParseResult<Vec<String>>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| {
            arg.into_string()
                .map_err(|arg| ParseError::InvalidUnicode(arg.to_string_lossy().into_owned()))
        })
        .collect()
}

fn error_line(err: &dyn fmt::Display) -> String {
    format!("error: {err}")
}

/// Write help text to `w` and return the exit code to terminate with.
fn write_help<W: Write>(w: &mut W, text: &str) -> i32 {
    match w.write_all(text.as_bytes()).and_then(|()| w.flush()) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("{}", error_line(&format!("cannot write usage: {err}")));
            1
        }
    }
}

/// Print `error: <err>` to stderr and terminate the process with exit code 1.
///
/// Programs use it to report their own failures the same way invalid
/// command lines are reported.
pub fn exit_with_error(err: impl fmt::Display) -> ! {
    eprintln!("{}", error_line(&err));
    process::exit(1);
}

impl CmdLine {
    /// Parse a full token vector, `args[0]` being the program name.
    ///
    /// Options are scanned first, up to the first token that is not an
    /// option or up to `--`. Remaining tokens are bound to positional
    /// arguments, or select a command.
    ///
    /// Unknown options and options missing their value are always errors.
    /// When help is requested, the positional and command checks are
    /// skipped and `ParseOutcome::Help` is returned.
    pub fn parse<I, S>(&self, args: I) -> ParseResult<ParseOutcome<'_>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let argv: Vec<String> = args.into_iter().map(Into::into).collect();
        let Some((program_name, mut rest)) = argv.split_first() else {
            return Err(ParseError::EmptyInvocation);
        };

        let mut m = Matches::new(self, program_name.clone());

        while let Some(arg) = rest.first() {
            if arg == "--" {
                rest = &rest[1..];
                break;
            }
            let Some(key) = option_key(arg) else {
                break;
            };
            let idx = self
                .option_index(key)
                .ok_or_else(|| ParseError::UnknownOption(key.to_string()))?;

            if self.options()[idx].takes_value() {
                let Some(value) = rest.get(1) else {
                    return Err(ParseError::MissingOptionValue(key.to_string()));
                };
                tracing::debug!(option = key, value = value.as_str(), "bound option");
                m.bind_option(idx, Some(value.clone()));
                rest = &rest[2..];
            } else {
                tracing::debug!(option = key, "bound flag");
                m.bind_option(idx, None);
                rest = &rest[1..];
            }
        }

        let help = m.is_set_at(self.help_index());

        if !help {
            let trailing = self.trailing_argument().is_some();
            let required = self.arguments().len() - usize::from(trailing);
            if rest.len() < required {
                return Err(ParseError::MissingArguments);
            }

            let (bound, leftover) = rest.split_at(required);
            m.bind_arguments(bound.to_vec());
            rest = leftover;

            if trailing {
                m.bind_trailing(rest.to_vec());
                rest = &[];
            }

            if self.has_commands() {
                let name = bound.first().cloned().unwrap_or_default();
                if self.command(&name).is_none() {
                    return Err(ParseError::UnknownCommand(name));
                }
                tracing::debug!(command = name.as_str(), args = rest.len(), "resolved command");
                m.bind_command(name, rest.to_vec());
            } else if !rest.is_empty() {
                return Err(ParseError::ExtraArguments);
            }
        }

        if help {
            return Ok(ParseOutcome::Help(self.usage(program_name)));
        }

        Ok(ParseOutcome::Matches(m))
    }

    /// Parse `args` and terminate the process unless parsing succeeded.
    ///
    /// Help text is printed to stdout with exit code 0, or exit code 1 when
    /// stdout cannot be written. Errors are printed as `error: <message>` to
    /// stderr with exit code 1.
    pub fn parse_or_exit<I, S>(&self, args: I) -> Matches<'_>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        match self.parse(args) {
            Ok(ParseOutcome::Matches(m)) => m,
            Ok(ParseOutcome::Help(text)) => {
                let code = write_help(&mut io::stdout().lock(), &text);
                process::exit(code);
            }
            Err(err) => {
                tracing::debug!(kind = ?err.kind(), "command line rejected");
                exit_with_error(err);
            }
        }
    }

    /// [`parse_or_exit`](Self::parse_or_exit) over the arguments of the
    /// current process.
    ///
    /// An argument that is not valid UTF-8 is reported like any other
    /// invalid command line, before help is considered.
    pub fn parse_env_or_exit(&self) -> Matches<'_> {
        match os_args(std::env::args_os()) {
            Ok(args) => self.parse_or_exit(args),
            Err(err) => {
                tracing::debug!(kind = ?err.kind(), "command line rejected");
                exit_with_error(err);
            }
        }
    }
}
