use std::io::IsTerminal;

use anyhow::{Result, bail};
use cmdline::{CmdLine, Matches};
use serde::Serialize;
use tracing_subscriber::{EnvFilter, Registry, fmt, prelude::*, reload};

type LogHandle = reload::Handle<EnvFilter, Registry>;

#[derive(Debug, Serialize)]
struct ArgsReport<'a> {
    foo: &'a str,
    bar: &'a str,
    names: &'a [String],
}

#[derive(Debug, Serialize)]
struct OptReport<'a> {
    n: &'a str,
    set: bool,
}

fn main() {
    let log = init_tracing();
    if let Err(err) = run(&log) {
        cmdline::exit_with_error(format!("{err:#}"));
    }
}

fn run(log: &LogHandle) -> Result<()> {
    let mut cl = CmdLine::new();
    cl.add_flag("v", "verbose", "print debug logs")?
        .add_flag("", "json", "print results as JSON")?
        .add_command("args", "bind positional and trailing arguments")?
        .add_command("opt", "read an option with a default value")?;

    let m = cl.parse_env_or_exit();
    // RUST_LOG covers the top-level parse; -v applies from here on.
    if m.is_option_set("verbose") && std::env::var_os("RUST_LOG").is_none() {
        log.reload(EnvFilter::new("debug"))?;
    }
    let json = m.is_option_set("json");

    tracing::debug!(command = m.command_name(), "dispatching");
    match m.command_name() {
        "args" => cmd_args(&m, json),
        "opt" => cmd_opt(&m, json),
        other => bail!("unhandled command {other}"),
    }
}

fn cmd_args(parent: &Matches<'_>, json: bool) -> Result<()> {
    let mut cl = CmdLine::new();
    cl.add_argument("foo", "the first argument")?
        .add_argument("bar", "the second argument")?
        .add_trailing_arguments("name", "a trailing argument")?;

    let m = cl.parse_or_exit(parent.command_name_and_arguments());
    let report = ArgsReport {
        foo: m.argument_value("foo"),
        bar: m.argument_value("bar"),
        names: m.trailing_arguments_values("name"),
    };

    if json {
        println!("{}", serde_json::to_string(&report)?);
    } else {
        println!("foo: {}", report.foo);
        println!("bar: {}", report.bar);
        println!("names: {:?}", report.names);
    }
    Ok(())
}

fn cmd_opt(parent: &Matches<'_>, json: bool) -> Result<()> {
    let mut cl = CmdLine::new();
    cl.add_option("n", "", "value", "an example value")?
        .set_option_default("n", "1")?
        .add_flag("q", "quiet", "do not print anything")?;

    let m = cl.parse_or_exit(parent.command_name_and_arguments());
    if m.is_option_set("quiet") {
        return Ok(());
    }

    let report = OptReport {
        n: m.option_value("n"),
        set: m.is_option_set("n"),
    };
    if json {
        println!("{}", serde_json::to_string(&report)?);
    } else {
        println!("n: {}", report.n);
    }
    Ok(())
}

fn init_tracing() -> LogHandle {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let (filter, handle) = reload::Layer::new(filter);
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal())
                .with_target(false)
                .compact(),
        )
        .init();
    handle
}
