//! Formatter configuration from the environment and from files

use std::collections::HashMap;
use std::io::{Read, Seek, SeekFrom};

use core_types::ErrorKind;
use integration_tests::MiniRuntime;
use traceback::config::{ENV_LIMIT, ENV_SOURCE_LINES, ENV_THEME};
use traceback::{
    strip_ansi, DefaultFormatter, FormatOptions, FormatterConfig, StyledFormatter,
    TracebackFormatter,
};

fn deep_runtime() -> MiniRuntime {
    let mut runtime = MiniRuntime::load("deep.js", "a();\nfunction a() { b(); }\nfunction b() { c(); }\nfunction c() { fail(); }");
    runtime.call("a", 2, 16);
    runtime.call("b", 3, 16);
    runtime.call("c", 4, 16);
    runtime
}

#[test]
fn test_environment_configures_formatter() {
    let env: HashMap<&str, &str> = [(ENV_LIMIT, "-2"), (ENV_SOURCE_LINES, "0")].into_iter().collect();
    let config = FormatterConfig::from_lookup(|k| env.get(k).map(|v| v.to_string())).unwrap();

    let runtime = deep_runtime();
    let error = runtime.throw(ErrorKind::Error, "fail is not a function");
    let lines: Vec<String> = DefaultFormatter::from_config(config)
        .with_error_source(runtime.errors.clone())
        .format_exception(&error, FormatOptions::new())
        .collect();

    assert_eq!(
        lines,
        vec![
            "Traceback (most recent call last):",
            "  at b (deep.js:3:16)",
            "  at c (deep.js:4:16)",
            "Error: fail is not a function",
        ]
    );
}

#[test]
fn test_environment_theme_reaches_styled_output() {
    let config = FormatterConfig::from_lookup(|k| {
        (k == ENV_THEME).then(|| "function=4|exception=1".to_string())
    })
    .unwrap();
    let runtime = deep_runtime();
    let error = runtime.throw(ErrorKind::Error, "boom");

    let styled = StyledFormatter::styled(config)
        .format_exception(&error, FormatOptions::new())
        .into_text();
    assert!(styled.contains("\x1b[4mc\x1b[0m"));
    assert!(styled.contains("\x1b[1mError\x1b[0m: boom"));

    let plain = DefaultFormatter::new()
        .format_exception(&error, FormatOptions::new())
        .into_text();
    assert_eq!(strip_ansi(&styled), plain);
}

#[test]
fn test_report_written_to_log_file() {
    let mut runtime = deep_runtime();
    let error = runtime.throw(ErrorKind::RangeError, "out of range");
    runtime.unhandled(error);

    let formatter = DefaultFormatter::from_config(FormatterConfig::from_options([("limit", "1")]).unwrap())
        .with_error_source(runtime.errors.clone());

    let mut log = tempfile::tempfile().unwrap();
    formatter
        .write_last_exception(FormatOptions::new(), &mut log)
        .unwrap();

    log.seek(SeekFrom::Start(0)).unwrap();
    let mut text = String::new();
    log.read_to_string(&mut text).unwrap();
    assert_eq!(
        text,
        "Traceback (most recent call last):\n  at <top-level> (deep.js:1:1)\n    a();\nRangeError: out of range\n"
    );
}
