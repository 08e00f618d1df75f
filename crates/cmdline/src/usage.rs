use std::io::{self, Write};

use crate::cmdline::{CmdLine, OptionSpec};

fn format_row(left: &str, help: &str, width: usize) -> String {
    format!("{left:<width$}  {help}")
}

impl CmdLine {
    /// Render the usage text shown for `-h/--help`.
    ///
    /// Layout:
    /// - `Usage: <program> OPTIONS <arg> ... [<trailing> ...]`
    /// - `OPTIONS`, one line per option ordered by short name (or long name
    ///   when there is no short one), with defaults
    /// - `COMMANDS` or `ARGUMENTS`, in declaration order
    ///
    /// The left column is aligned across every section.
    pub fn usage(&self, program_name: &str) -> String {
        let mut out = format!("Usage: {program_name} OPTIONS");
        for arg in self.arguments() {
            if arg.is_trailing() {
                out.push_str(&format!(" [<{}> ...]", arg.name()));
            } else {
                out.push_str(&format!(" <{}>", arg.name()));
            }
        }
        out.push_str("\n\n");

        let mut options: Vec<(&OptionSpec, String)> = self
            .options()
            .iter()
            .map(|opt| (opt, opt.signature()))
            .collect();
        options.sort_by_key(|(opt, _)| opt.sort_key());

        let mut width = options
            .iter()
            .map(|(_, sig)| sig.chars().count())
            .max()
            .unwrap_or(0);
        if self.has_commands() {
            for cmd in self.commands() {
                width = width.max(cmd.name().chars().count());
            }
        } else {
            for arg in self.arguments() {
                width = width.max(arg.name().chars().count());
            }
        }

        out.push_str("OPTIONS\n\n");
        for (opt, sig) in &options {
            out.push_str(&format_row(sig, opt.description(), width));
            if let Some(default_value) = opt.default_value().filter(|v| !v.is_empty()) {
                out.push_str(&format!(" (default: {default_value})"));
            }
            out.push('\n');
        }

        if self.has_commands() {
            out.push_str("\nCOMMANDS\n\n");
            for cmd in self.commands() {
                out.push_str(&format_row(cmd.name(), cmd.description(), width));
                out.push('\n');
            }
        } else if !self.arguments().is_empty() {
            out.push_str("\nARGUMENTS\n\n");
            for arg in self.arguments() {
                out.push_str(&format_row(arg.name(), arg.description(), width));
                out.push('\n');
            }
        }

        out
    }

    /// Write the usage text to `w`.
    pub fn write_usage<W: Write>(&self, program_name: &str, w: &mut W) -> io::Result<()> {
        w.write_all(self.usage(program_name).as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use crate::cmdline::CmdLine;

    #[test]
    fn renders_arguments_section() {
        let mut cl = CmdLine::new();
        cl.add_option("n", "", "value", "an example value").unwrap();
        cl.add_argument("foo", "the first argument").unwrap();
        cl.add_argument("bar", "the second argument").unwrap();
        cl.add_trailing_arguments("name", "a trailing argument").unwrap();

        let expected = "\
Usage: prog OPTIONS <foo> <bar> [<name> ...]

OPTIONS

-h, --help  print help and exit
-n <value>  an example value

ARGUMENTS

foo         the first argument
bar         the second argument
name        a trailing argument
";
        assert_eq!(cl.usage("prog"), expected);
    }

    #[test]
    fn renders_commands_in_declaration_order_with_defaults() {
        let mut cl = CmdLine::new();
        cl.add_option("", "count", "n", "number of runs").unwrap();
        cl.set_option_default("count", "3").unwrap();
        cl.add_command("foo", "subcommand 1").unwrap();
        cl.add_command("bar", "subcommand 2").unwrap();

        let expected = "\
Usage: prog OPTIONS <command>

OPTIONS

--count <n>  number of runs (default: 3)
-h, --help   print help and exit

COMMANDS

foo          subcommand 1
bar          subcommand 2
";
        assert_eq!(cl.usage("prog"), expected);
    }

    #[test]
    fn long_argument_names_widen_the_option_column() {
        let mut cl = CmdLine::new();
        cl.add_argument("a-rather-long-name", "x").unwrap();
        let text = cl.usage("prog");
        assert!(text.contains("\n-h, --help          print help and exit\n"));
        assert!(text.contains("\na-rather-long-name  x\n"));
    }

    #[test]
    fn bare_declaration_has_only_options() {
        let cl = CmdLine::new();
        assert_eq!(
            cl.usage("prog"),
            "Usage: prog OPTIONS\n\nOPTIONS\n\n-h, --help  print help and exit\n"
        );
    }

    #[test]
    fn empty_default_is_not_shown() {
        let mut cl = CmdLine::new();
        cl.add_option("o", "", "file", "output").unwrap();
        cl.set_option_default("o", "").unwrap();
        assert!(cl.usage("prog").contains("\n-o <file>   output\n"));
    }

    #[test]
    fn write_usage_matches_usage() {
        let mut cl = CmdLine::new();
        cl.add_command("run", "run it").unwrap();
        let mut buf = Vec::new();
        cl.write_usage("prog", &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), cl.usage("prog"));
    }
}
