use std::process::{Command, Output};

fn demo(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_cmdline-demo"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run cmdline-demo")
}

fn demo_with_log(filter: &str, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_cmdline-demo"))
        .args(args)
        .env("RUST_LOG", filter)
        .output()
        .expect("failed to run cmdline-demo")
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

#[test]
fn help_works() {
    let out = demo(&["--help"]);
    assert!(
        out.status.success(),
        "cmdline-demo --help failed:\nstatus: {}\nstderr:\n{}",
        out.status,
        stderr(&out),
    );
    let text = stdout(&out);
    assert!(text.contains(" OPTIONS <command>\n"), "unexpected help output:\n{text}");
    assert!(text.contains("\nCOMMANDS\n\n"), "unexpected help output:\n{text}");
    assert!(text.contains("--verbose"), "unexpected help output:\n{text}");
    let args_pos = text.find("\nargs ").expect("args command not listed");
    let opt_pos = text.find("\nopt ").expect("opt command not listed");
    assert!(args_pos < opt_pos, "commands not in declaration order:\n{text}");
}

#[test]
fn help_ignores_missing_command() {
    let out = demo(&["-v", "-h"]);
    assert_eq!(out.status.code(), Some(0));
    assert!(stdout(&out).starts_with("Usage: "));
}

#[test]
fn args_binds_positionals_and_trailing() {
    let out = demo(&["args", "a", "b", "c", "d"]);
    assert!(out.status.success(), "stderr:\n{}", stderr(&out));
    assert_eq!(stdout(&out), "foo: a\nbar: b\nnames: [\"c\", \"d\"]\n");
}

#[test]
fn args_reports_missing_arguments() {
    let out = demo(&["args", "a"]);
    assert_eq!(out.status.code(), Some(1));
    assert_eq!(stderr(&out), "error: missing argument(s)\n");
    assert!(stdout(&out).is_empty());
}

#[test]
fn nested_help_uses_command_name() {
    let out = demo(&["opt", "--help"]);
    assert_eq!(out.status.code(), Some(0));
    let text = stdout(&out);
    assert!(text.starts_with("Usage: opt OPTIONS\n"), "unexpected help output:\n{text}");
    assert!(text.contains("an example value (default: 1)"), "unexpected help output:\n{text}");
}

#[test]
fn opt_uses_default_then_value() {
    let out = demo(&["opt"]);
    assert!(out.status.success(), "stderr:\n{}", stderr(&out));
    assert_eq!(stdout(&out), "n: 1\n");

    let out = demo(&["--json", "opt", "-n", "5"]);
    assert!(out.status.success(), "stderr:\n{}", stderr(&out));
    assert_eq!(stdout(&out), "{\"n\":\"5\",\"set\":true}\n");
}

#[test]
fn unknown_option_fails_even_with_help() {
    let out = demo(&["--help", "--badflag"]);
    assert_eq!(out.status.code(), Some(1));
    assert_eq!(stderr(&out), "error: unknown option \"badflag\"\n");
    assert!(stdout(&out).is_empty());
}

#[test]
fn unknown_command_fails() {
    let out = demo(&["frob", "x"]);
    assert_eq!(out.status.code(), Some(1));
    assert_eq!(stderr(&out), "error: unknown command \"frob\"\n");
}

#[test]
fn missing_option_value_fails() {
    let out = demo(&["opt", "-n"]);
    assert_eq!(out.status.code(), Some(1));
    assert_eq!(stderr(&out), "error: missing value for option \"n\"\n");
}

#[cfg(unix)]
#[test]
fn invalid_utf8_argument_fails_with_error_line() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let out = Command::new(env!("CARGO_BIN_EXE_cmdline-demo"))
        .arg("args")
        .arg("a")
        .arg(OsStr::from_bytes(b"b\xff"))
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run cmdline-demo");
    assert_eq!(out.status.code(), Some(1));
    assert_eq!(
        stderr(&out),
        "error: invalid UTF-8 in argument \"b\u{FFFD}\"\n"
    );
    assert!(stdout(&out).is_empty());
}

#[test]
fn rust_log_covers_top_level_parse() {
    let out = demo_with_log("debug", &["--badflag"]);
    assert_eq!(out.status.code(), Some(1));
    let text = stderr(&out);
    assert!(text.contains("command line rejected"), "unexpected stderr:\n{text}");
    assert!(
        text.ends_with("error: unknown option \"badflag\"\n"),
        "unexpected stderr:\n{text}"
    );
}

#[test]
fn verbose_logs_command_dispatch() {
    let out = demo(&["-v", "opt", "-n", "5"]);
    assert!(out.status.success(), "stderr:\n{}", stderr(&out));
    assert_eq!(stdout(&out), "n: 5\n");
    let text = stderr(&out);
    assert!(text.contains("dispatching"), "unexpected stderr:\n{text}");
    assert!(text.contains("bound option"), "unexpected stderr:\n{text}");
}
