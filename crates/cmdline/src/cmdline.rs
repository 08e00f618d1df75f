use std::collections::HashMap;

use indexmap::IndexMap;

use crate::error::SpecError;

pub(crate) const HELP_SHORT: char = 'h';
pub(crate) const HELP_LONG: &str = "help";
pub(crate) const COMMAND_ARGUMENT: &str = "command";

/// A named switch, identified by a short name, a long name or both.
///
/// An option without a value placeholder is a flag: its presence alone is
/// the signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSpec {
    short: Option<char>,
    long: Option<String>,
    value_name: Option<String>,
    description: String,
    default_value: Option<String>,
}

impl OptionSpec {
    pub fn short(&self) -> Option<char> {
        self.short
    }

    pub fn long(&self) -> Option<&str> {
        self.long.as_deref()
    }

    /// Placeholder shown in usage text for the option value (e.g. `FILE`).
    pub fn value_name(&self) -> Option<&str> {
        self.value_name.as_deref()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }

    /// Whether the option consumes the next token as its value.
    pub fn takes_value(&self) -> bool {
        self.value_name.is_some()
    }

    /// Key used to order options in usage text: the short name if present,
    /// else the long name.
    pub fn sort_key(&self) -> String {
        match (self.short, &self.long) {
            (Some(c), _) => c.to_string(),
            (None, Some(long)) => long.clone(),
            (None, None) => String::new(),
        }
    }

    /// Left column of the usage text, e.g. `-o, --output <file>`.
    pub fn signature(&self) -> String {
        let mut out = String::new();
        if let Some(c) = self.short {
            out.push('-');
            out.push(c);
        }
        if let Some(long) = &self.long {
            if self.short.is_some() {
                out.push_str(", ");
            }
            out.push_str("--");
            out.push_str(long);
        }
        if let Some(value_name) = &self.value_name {
            out.push_str(&format!(" <{value_name}>"));
        }
        out
    }
}

/// A positional slot, bound by position rather than by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    name: String,
    description: String,
    trailing: bool,
}

impl Argument {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Whether this argument collects every remaining token.
    pub fn is_trailing(&self) -> bool {
        self.trailing
    }
}

/// A named sub-mode consuming the rest of the token vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    name: String,
    description: String,
}

impl Command {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Declaration of the options, arguments and commands a program accepts.
///
/// A `CmdLine` is only mutated while it is being configured. Parsing takes
/// `&self` and produces a separate [`Matches`](crate::Matches), so the same
/// declaration can be parsed any number of times.
#[derive(Debug, Clone)]
pub struct CmdLine {
    options: Vec<OptionSpec>,
    short_index: HashMap<char, usize>,
    long_index: HashMap<String, usize>,
    arguments: Vec<Argument>,
    commands: IndexMap<String, Command>,
}

impl Default for CmdLine {
    fn default() -> Self {
        Self::new()
    }
}

impl CmdLine {
    /// Create a declaration containing only the built-in `-h/--help` flag.
    pub fn new() -> Self {
        let mut cmdline = Self {
            options: Vec::new(),
            short_index: HashMap::new(),
            long_index: HashMap::new(),
            arguments: Vec::new(),
            commands: IndexMap::new(),
        };
        let help = OptionSpec {
            short: Some(HELP_SHORT),
            long: Some(HELP_LONG.to_string()),
            value_name: None,
            description: "print help and exit".to_string(),
            default_value: None,
        };
        cmdline.short_index.insert(HELP_SHORT, 0);
        cmdline.long_index.insert(HELP_LONG.to_string(), 0);
        cmdline.options.push(help);
        cmdline
    }

    /// Declare a flag, i.e. an option without value.
    ///
    /// Either name may be empty, but not both.
    pub fn add_flag(
        &mut self,
        short: &str,
        long: &str,
        description: &str,
    ) -> Result<&mut Self, SpecError> {
        self.add_option_spec(short, long, "", description)
    }

    /// Declare an option taking a value in the next token.
    ///
    /// `value_name` is the placeholder shown in usage text. An empty
    /// placeholder declares a flag.
    pub fn add_option(
        &mut self,
        short: &str,
        long: &str,
        value_name: &str,
        description: &str,
    ) -> Result<&mut Self, SpecError> {
        self.add_option_spec(short, long, value_name, description)
    }

    fn add_option_spec(
        &mut self,
        short: &str,
        long: &str,
        value_name: &str,
        description: &str,
    ) -> Result<&mut Self, SpecError> {
        let short_name = if short.is_empty() {
            None
        } else {
            let mut chars = short.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(c),
                _ => return Err(SpecError::InvalidShortName(short.to_string())),
            }
        };

        let long_name = if long.is_empty() {
            None
        } else {
            if long.chars().count() < 2 {
                return Err(SpecError::InvalidLongName(long.to_string()));
            }
            Some(long.to_string())
        };

        if short_name.is_none() && long_name.is_none() {
            return Err(SpecError::MissingName);
        }
        if let Some(c) = short_name {
            if self.short_index.contains_key(&c) {
                return Err(SpecError::DuplicateOption(c.to_string()));
            }
        }
        if let Some(long) = &long_name {
            if self.long_index.contains_key(long) {
                return Err(SpecError::DuplicateOption(long.clone()));
            }
        }

        let idx = self.options.len();
        if let Some(c) = short_name {
            self.short_index.insert(c, idx);
        }
        if let Some(long) = &long_name {
            self.long_index.insert(long.clone(), idx);
        }
        self.options.push(OptionSpec {
            short: short_name,
            long: long_name,
            value_name: (!value_name.is_empty()).then(|| value_name.to_string()),
            description: description.to_string(),
            default_value: None,
        });
        tracing::trace!(short, long, value_name, "declared option");

        Ok(self)
    }

    /// Set the value reported for an option that does not appear on the
    /// command line. `name` is either the short or the long name.
    pub fn set_option_default(&mut self, name: &str, value: &str) -> Result<&mut Self, SpecError> {
        let idx = self
            .option_index(name)
            .ok_or_else(|| SpecError::UnknownOption(name.to_string()))?;
        let opt = &mut self.options[idx];
        if !opt.takes_value() {
            return Err(SpecError::DefaultOnFlag(name.to_string()));
        }
        opt.default_value = Some(value.to_string());
        Ok(self)
    }

    /// Append a positional argument.
    pub fn add_argument(&mut self, name: &str, description: &str) -> Result<&mut Self, SpecError> {
        self.push_argument(name, description, false)
    }

    /// Append the trailing argument, which collects every token left once
    /// the other positional arguments are bound. Nothing may follow it.
    pub fn add_trailing_arguments(
        &mut self,
        name: &str,
        description: &str,
    ) -> Result<&mut Self, SpecError> {
        self.push_argument(name, description, true)
    }

    fn push_argument(
        &mut self,
        name: &str,
        description: &str,
        trailing: bool,
    ) -> Result<&mut Self, SpecError> {
        if !self.commands.is_empty() {
            return Err(SpecError::ArgumentsWithCommands);
        }
        if self.arguments.last().is_some_and(|last| last.trailing) {
            return Err(SpecError::ArgumentAfterTrailing(name.to_string()));
        }
        self.arguments.push(Argument {
            name: name.to_string(),
            description: description.to_string(),
            trailing,
        });
        tracing::trace!(name, trailing, "declared argument");
        Ok(self)
    }

    /// Declare a command.
    ///
    /// The first command registers a `command` positional argument holding
    /// the selected command name; commands and other positional arguments are
    /// mutually exclusive.
    pub fn add_command(&mut self, name: &str, description: &str) -> Result<&mut Self, SpecError> {
        if self.commands.is_empty() {
            match self.arguments.as_slice() {
                [] => {
                    self.arguments.push(Argument {
                        name: COMMAND_ARGUMENT.to_string(),
                        description: "the command to execute".to_string(),
                        trailing: false,
                    });
                }
                [arg] if arg.name == COMMAND_ARGUMENT && !arg.trailing => {}
                _ => return Err(SpecError::ArgumentsWithCommands),
            }
        }
        if self.commands.contains_key(name) {
            return Err(SpecError::DuplicateCommand(name.to_string()));
        }
        self.commands.insert(
            name.to_string(),
            Command {
                name: name.to_string(),
                description: description.to_string(),
            },
        );
        tracing::trace!(name, "declared command");
        Ok(self)
    }

    /// Every declared option, in declaration order, the built-in help flag
    /// first.
    pub fn options(&self) -> &[OptionSpec] {
        &self.options
    }

    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    /// Declared commands, in declaration order.
    pub fn commands(&self) -> impl Iterator<Item = &Command> {
        self.commands.values()
    }

    pub fn has_commands(&self) -> bool {
        !self.commands.is_empty()
    }

    pub fn option(&self, name: &str) -> Option<&OptionSpec> {
        self.option_index(name).map(|idx| &self.options[idx])
    }

    pub fn command(&self, name: &str) -> Option<&Command> {
        self.commands.get(name)
    }

    pub(crate) fn trailing_argument(&self) -> Option<&Argument> {
        self.arguments.last().filter(|arg| arg.trailing)
    }

    /// Resolve a short or long option name to its index in `options`.
    pub(crate) fn option_index(&self, name: &str) -> Option<usize> {
        let mut chars = name.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => self.short_index.get(&c).copied(),
            _ => self.long_index.get(name).copied(),
        }
    }

    pub(crate) fn help_index(&self) -> usize {
        self.option_index(HELP_LONG).unwrap_or(0)
    }
}
