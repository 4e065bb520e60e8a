//! End-to-end error reporting through a simulated runtime

use core_types::ErrorKind;
use integration_tests::MiniRuntime;
use traceback::{DefaultFormatter, FormatOptions, TracebackFormatter};

const APP: &str = "\
main();
function main() {
  try {
    load('config.json');
  } catch (e) {
    report(e);
  }
}
function load(path) {
  throw new TypeError('cannot read ' + path);
}
function report(e) {
  send(e.message);
}";

fn formatter(runtime: &MiniRuntime) -> DefaultFormatter {
    DefaultFormatter::new().with_error_source(runtime.errors.clone())
}

#[test]
fn test_unhandled_error_report() {
    let mut runtime = MiniRuntime::load("app.js", APP);
    runtime.call("main", 4, 5);
    runtime.call("load", 10, 3);
    let error = runtime.throw(ErrorKind::TypeError, "cannot read config.json");
    runtime.unhandled(error);

    let text = formatter(&runtime)
        .format_last_exception(FormatOptions::new())
        .into_text();
    assert_eq!(
        text,
        "\
Traceback (most recent call last):
  at <top-level> (app.js:1:1)
    main();
  at main (app.js:4:5)
    load('config.json');
  at load (app.js:10:3)
    throw new TypeError('cannot read ' + path);
TypeError: cannot read config.json
"
    );
}

#[test]
fn test_error_in_catch_block_reports_both() {
    let mut runtime = MiniRuntime::load("app.js", APP);
    runtime.call("main", 4, 5);
    runtime.call("load", 10, 3);
    let first = runtime.throw(ErrorKind::TypeError, "cannot read config.json");
    runtime.ret();

    let errors = runtime.errors.clone();
    let second = {
        let _handler = errors.enter_handler(first);
        runtime.stack.set_position(6, 5);
        runtime.call("report", 13, 3);

        let lines: Vec<String> = formatter(&runtime)
            .format_current_exception(FormatOptions::new().with_chain(false))
            .collect();
        assert_eq!(lines.last().unwrap(), "TypeError: cannot read config.json");

        runtime.throw(ErrorKind::ReferenceError, "send is not defined")
    };
    runtime.unhandled(second);

    let lines: Vec<String> = formatter(&runtime)
        .format_last_exception(FormatOptions::new())
        .collect();
    let records: Vec<&str> = lines
        .iter()
        .filter(|l| l.ends_with("config.json") || l.ends_with("not defined"))
        .map(String::as_str)
        .collect();
    assert_eq!(
        records,
        vec![
            "TypeError: cannot read config.json",
            "ReferenceError: send is not defined"
        ]
    );
    assert!(lines
        .iter()
        .any(|l| l == "During handling of the above error, another error occurred:"));
    assert!(lines.iter().any(|l| l == "  at report (app.js:13:3)"));
}

#[test]
fn test_rethrown_error_with_explicit_cause() {
    let mut runtime = MiniRuntime::load("app.js", APP);
    runtime.call("main", 4, 5);
    runtime.call("load", 10, 3);
    let low = runtime.throw(ErrorKind::TypeError, "cannot read config.json");
    runtime.ret();

    let high = {
        let _handler = runtime.errors.enter_handler(low.clone());
        let high = runtime.throw(ErrorKind::Error, "startup failed");
        high.set_cause(Some(low));
        high
    };

    let text = formatter(&runtime)
        .format_exception(&high, FormatOptions::new())
        .into_text();
    assert!(text.contains("The above error was the direct cause of the following error:"));
    assert!(!text.contains("During handling"));
    assert!(text.ends_with("Error: startup failed\n"));
}

#[test]
fn test_live_stack_inside_handler() {
    let mut runtime = MiniRuntime::load("app.js", APP);
    runtime.call("main", 6, 5);
    runtime.call("report", 13, 3);

    let formatter = formatter(&runtime);
    let frame = runtime.stack.current_frame().unwrap();
    let lines: Vec<String> = formatter.format_stack(frame, Some(1)).unwrap().collect();
    assert_eq!(lines, vec!["  at report (app.js:13:3)", "    send(e.message);"]);

    let outermost: Vec<String> = formatter.format_stack(frame, Some(-1)).unwrap().collect();
    assert_eq!(outermost[0], "  at <top-level> (app.js:1:1)");
}
