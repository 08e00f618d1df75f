use crate::cmdline::CmdLine;

#[derive(Debug, Clone, Default)]
struct OptionMatch {
    set: bool,
    value: Option<String>,
}

/// Values bound by a successful [`CmdLine::parse`].
///
/// Accessors take option and argument names as declared. Asking for a name
/// that was never declared is a programming error and panics.
#[derive(Debug, Clone)]
pub struct Matches<'c> {
    cmdline: &'c CmdLine,
    program_name: String,
    options: Vec<OptionMatch>,
    values: Vec<String>,
    trailing: Vec<String>,
    command: Option<String>,
    command_args: Vec<String>,
}

impl<'c> Matches<'c> {
    pub fn program_name(&self) -> &str {
        &self.program_name
    }

    /// Whether the option appeared on the command line.
    ///
    /// # Panics
    ///
    /// Panics if no option is declared under `name`.
    pub fn is_option_set(&self, name: &str) -> bool {
        self.options[self.option_index(name)].set
    }

    /// The value given on the command line, else the declared default, else
    /// an empty string. Flags always report an empty string.
    ///
    /// # Panics
    ///
    /// Panics if no option is declared under `name`.
    pub fn option_value(&self, name: &str) -> &str {
        let idx = self.option_index(name);
        let state = &self.options[idx];
        if state.set {
            state.value.as_deref().unwrap_or_default()
        } else {
            self.cmdline.options()[idx]
                .default_value()
                .unwrap_or_default()
        }
    }

    /// Value of a positional argument.
    ///
    /// # Panics
    ///
    /// Panics if no argument is declared under `name`, or if it is the
    /// trailing argument.
    pub fn argument_value(&self, name: &str) -> &str {
        let Some(idx) = self
            .cmdline
            .arguments()
            .iter()
            .position(|arg| arg.name() == name)
        else {
            panic!("unknown argument \"{name}\"");
        };
        if self.cmdline.arguments()[idx].is_trailing() {
            panic!("argument \"{name}\" is trailing, use trailing_arguments_values");
        }
        self.values.get(idx).map(String::as_str).unwrap_or_default()
    }

    /// Every token collected by the trailing argument, possibly none.
    ///
    /// # Panics
    ///
    /// Panics if there is no trailing argument named `name`.
    pub fn trailing_arguments_values(&self, name: &str) -> &[String] {
        match self.cmdline.trailing_argument() {
            Some(arg) if arg.name() == name => &self.trailing,
            Some(arg) => panic!(
                "unknown trailing argument \"{name}\" (declared: \"{}\")",
                arg.name()
            ),
            None => panic!("no trailing arguments"),
        }
    }

    /// Name of the selected command.
    ///
    /// # Panics
    ///
    /// Panics if no command is declared.
    pub fn command_name(&self) -> &str {
        self.ensure_commands();
        self.command.as_deref().unwrap_or_default()
    }

    /// Tokens following the command name.
    ///
    /// # Panics
    ///
    /// Panics if no command is declared.
    pub fn command_arguments(&self) -> &[String] {
        self.ensure_commands();
        &self.command_args
    }

    /// The command name followed by its arguments, ready to be parsed by the
    /// command's own [`CmdLine`] (the command name taking the place of the
    /// program name).
    ///
    /// # Panics
    ///
    /// Panics if no command is declared.
    pub fn command_name_and_arguments(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(self.command_args.len() + 1);
        out.push(self.command_name().to_string());
        out.extend(self.command_args.iter().cloned());
        out
    }

    /// Usage text of the parsed declaration, using the parsed program name.
    pub fn usage(&self) -> String {
        self.cmdline.usage(&self.program_name)
    }

    pub fn cmdline(&self) -> &'c CmdLine {
        self.cmdline
    }
}

impl<'c> Matches<'c> {
    pub(crate) fn new(cmdline: &'c CmdLine, program_name: String) -> Self {
        Self {
            cmdline,
            program_name,
            options: vec![OptionMatch::default(); cmdline.options().len()],
            values: Vec::new(),
            trailing: Vec::new(),
            command: None,
            command_args: Vec::new(),
        }
    }

    pub(crate) fn bind_option(&mut self, idx: usize, value: Option<String>) {
        let state = &mut self.options[idx];
        state.set = true;
        state.value = value;
    }

    pub(crate) fn is_set_at(&self, idx: usize) -> bool {
        self.options[idx].set
    }

    pub(crate) fn bind_arguments(&mut self, values: Vec<String>) {
        self.values = values;
    }

    pub(crate) fn bind_trailing(&mut self, values: Vec<String>) {
        self.trailing = values;
    }

    pub(crate) fn bind_command(&mut self, name: String, args: Vec<String>) {
        self.command = Some(name);
        self.command_args = args;
    }

    fn option_index(&self, name: &str) -> usize {
        match self.cmdline.option_index(name) {
            Some(idx) => idx,
            None => panic!("unknown option \"{name}\""),
        }
    }

    fn ensure_commands(&self) {
        if !self.cmdline.has_commands() {
            panic!("no command defined");
        }
    }
}
