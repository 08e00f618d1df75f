use thiserror::Error;

/// Mistakes made while declaring a [`CmdLine`](crate::CmdLine).
///
/// These are programming errors: the configuring program is expected to
/// abort on them (typically by propagating with `?` out of `main`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecError {
    #[error("option short names must be one character long (got \"{0}\")")]
    InvalidShortName(String),

    #[error("option long names must be at least two characters long (got \"{0}\")")]
    InvalidLongName(String),

    #[error("options must have a short name, a long name or both")]
    MissingName,

    #[error("option \"{0}\" is already defined")]
    DuplicateOption(String),

    #[error("unknown option \"{0}\"")]
    UnknownOption(String),

    #[error("option \"{0}\" is a flag and cannot have a default value")]
    DefaultOnFlag(String),

    #[error("cannot have both arguments and commands")]
    ArgumentsWithCommands,

    #[error("cannot add argument \"{0}\" after trailing argument")]
    ArgumentAfterTrailing(String),

    #[error("command \"{0}\" is already defined")]
    DuplicateCommand(String),
}

/// Category of a [`ParseError`], independent of the offending token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    EmptyInvocation,
    InvalidUnicode,
    UnknownOption,
    MissingOptionValue,
    MissingArguments,
    ExtraArguments,
    UnknownCommand,
}

/// Invalid user input detected while parsing a token vector.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty argument array")]
    EmptyInvocation,

    /// A process argument is not valid UTF-8; holds its lossy rendering.
    #[error("invalid UTF-8 in argument \"{0}\"")]
    InvalidUnicode(String),

    #[error("unknown option \"{0}\"")]
    UnknownOption(String),

    #[error("missing value for option \"{0}\"")]
    MissingOptionValue(String),

    #[error("missing argument(s)")]
    MissingArguments,

    #[error("invalid extra argument(s)")]
    ExtraArguments,

    #[error("unknown command \"{0}\"")]
    UnknownCommand(String),
}

impl ParseError {
    pub fn kind(&self) -> ParseErrorKind {
        match self {
            Self::EmptyInvocation => ParseErrorKind::EmptyInvocation,
            Self::InvalidUnicode(_) => ParseErrorKind::InvalidUnicode,
            Self::UnknownOption(_) => ParseErrorKind::UnknownOption,
            Self::MissingOptionValue(_) => ParseErrorKind::MissingOptionValue,
            Self::MissingArguments => ParseErrorKind::MissingArguments,
            Self::ExtraArguments => ParseErrorKind::ExtraArguments,
            Self::UnknownCommand(_) => ParseErrorKind::UnknownCommand,
        }
    }

    /// Process exit code used when this error terminates the program.
    pub fn exit_code(&self) -> i32 {
        1
    }
}
