//! Contract compliance tests for the traceback formatter
//!
//! These tests pin the behavior every formatter implementation must keep:
//! limit bounds, extraction purity, chain termination and the shape of the
//! rendered records.

use std::sync::Arc;

use core_types::{ErrorKind, ErrorRef, JsError, StackFrame, Traceback};
use execution::{CallFrame, CallStack, ErrorState, LiveFrame};
use traceback::{
    strip_ansi, DefaultFormatter, ErrorChain, FormatOptions, FormatterConfig, FrameHandle,
    StyledFormatter, TracebackFormatter,
};

fn stack_of(names: &[&str]) -> CallStack {
    let mut stack = CallStack::new();
    stack.push(CallFrame::script("main.js").at(1, 1));
    for (i, name) in names.iter().enumerate() {
        stack.push(CallFrame::function(*name, "main.js").at(i as u32 + 2, 5));
    }
    stack
}

fn traceback_of(names: &[&str]) -> Traceback {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| StackFrame::new(*name).at("lib.js", i as u32 + 1, 1))
        .collect()
}

fn named(frames: &[StackFrame]) -> Vec<&str> {
    frames
        .iter()
        .map(|f| f.function_name.as_deref().unwrap_or("?"))
        .collect()
}

fn error(message: &str, frames: &[&str]) -> ErrorRef {
    JsError::new(ErrorKind::Error, message)
        .with_traceback(traceback_of(frames))
        .shared()
}

fn collect(lines: traceback::Lines<'_>) -> Vec<String> {
    lines.collect()
}

/// Contract: a limit never yields more frames than the full walk, and 0 is the full walk
#[test]
fn contract_limit_is_bounded_by_full_walk() {
    let stack = stack_of(&["a", "b", "c", "d"]);
    let formatter = DefaultFormatter::new();
    let handles: Vec<FrameHandle<'_>> = vec![
        stack.current_frame().unwrap().into(),
        stack.frame_handle(2).unwrap().into(),
        traceback_of(&["x", "y", "z"]).into(),
    ];

    for handle in &handles {
        let full = formatter.extract_frames(handle, Some(0)).unwrap();
        assert_eq!(full, formatter.extract_frames(handle, None).unwrap());
        for limit in [-100, -3, -1, 1, 2, 3, 100, i32::MIN, i32::MAX] {
            let limited = formatter.extract_frames(handle, Some(limit)).unwrap();
            assert!(limited.len() <= full.len(), "limit {}", limit);
            assert_eq!(limited.len(), full.len().min(limit.unsigned_abs() as usize));
        }
    }
}

/// Contract: a live handle into a stack with no frames extracts and formats as empty
#[test]
fn contract_empty_live_stack_is_empty() {
    let stack = CallStack::new();
    let formatter = DefaultFormatter::new();
    let handle: FrameHandle<'_> = LiveFrame::new(&stack, 0).into();

    for limit in [None, Some(3), Some(-3)] {
        assert_eq!(formatter.extract_frames(&handle, limit).unwrap(), vec![]);
    }
    let lines = formatter
        .format_stack(LiveFrame::new(&stack, 0), None)
        .unwrap();
    assert_eq!(lines.count(), 0);

    let mut sink = Vec::new();
    formatter
        .write_stack(LiveFrame::new(&stack, 0), None, &mut sink)
        .unwrap();
    assert!(sink.is_empty());
}

/// Contract: extraction is a pure read of the handle
#[test]
fn contract_extraction_is_repeatable() {
    let stack = stack_of(&["a", "b", "c"]);
    let formatter = DefaultFormatter::new();
    let live: FrameHandle<'_> = stack.current_frame().unwrap().into();
    let captured: FrameHandle<'_> = stack.capture().into();

    for handle in [&live, &captured] {
        for limit in [None, Some(2), Some(-2)] {
            let first = formatter.extract_frames(handle, limit).unwrap();
            let second = formatter.extract_frames(handle, limit).unwrap();
            assert_eq!(first, second);
        }
    }
}

/// Contract: positive limits keep the start of the walk, negative limits its end
#[test]
fn contract_limit_direction_on_three_frames() {
    let formatter = DefaultFormatter::new();

    // captured tracebacks walk entry point first
    let tb: FrameHandle<'_> = traceback_of(&["outer", "middle", "inner"]).into();
    let head = formatter.extract_frames(&tb, Some(2)).unwrap();
    let tail = formatter.extract_frames(&tb, Some(-2)).unwrap();
    assert_eq!(named(&head), vec!["outer", "middle"]);
    assert_eq!(named(&tail), vec!["middle", "inner"]);

    // live stacks walk innermost first
    let stack = stack_of(&["middle", "inner"]);
    let live: FrameHandle<'_> = stack.current_frame().unwrap().into();
    let head = formatter.extract_frames(&live, Some(2)).unwrap();
    let tail = formatter.extract_frames(&live, Some(-2)).unwrap();
    assert_eq!(named(&head), vec!["middle", "inner"]);
    assert_eq!(named(&tail), vec!["<top-level>", "middle"]);
}

/// Contract: head and tail selections do not overlap once the walk is long enough
#[test]
fn contract_head_and_tail_are_disjoint() {
    let formatter = DefaultFormatter::new();
    let tb: FrameHandle<'_> = traceback_of(&["f1", "f2", "f3", "f4"]).into();

    let head = formatter.extract_frames(&tb, Some(2)).unwrap();
    let tail = formatter.extract_frames(&tb, Some(-2)).unwrap();
    assert!(head.iter().all(|f| !tail.contains(f)));

    let short: FrameHandle<'_> = traceback_of(&["f1", "f2"]).into();
    assert_eq!(
        formatter.extract_frames(&short, Some(2)).unwrap(),
        formatter.extract_frames(&short, Some(-2)).unwrap()
    );
}

/// Contract: a predecessor cycle of length k terminates with at most k records
#[test]
fn contract_cyclic_chain_terminates() {
    for k in 1..=4 {
        let errors: Vec<ErrorRef> = (0..k).map(|i| error(&format!("e{}", i), &[])).collect();
        for i in 0..k {
            errors[i].set_cause(Some(errors[(i + 1) % k].clone()));
        }

        let chain = ErrorChain::build(&errors[0], true);
        assert_eq!(chain.len(), k);

        let lines = collect(DefaultFormatter::new().format_exception(&errors[0], FormatOptions::new()));
        let records = lines.iter().filter(|l| l.starts_with("Error: e")).count();
        assert_eq!(records, k);

        for e in &errors {
            e.set_cause(None);
        }
    }
}

/// Contract: exception-only output is the name and message, never frames
#[test]
fn contract_exception_only_has_no_frames() {
    let e = error("boom", &["main", "helper"]);
    let lines = collect(DefaultFormatter::new().format_exception_only(&e));
    assert_eq!(lines, vec!["Error: boom"]);

    let bare = JsError::new(ErrorKind::TypeError, "");
    assert_eq!(collect(DefaultFormatter::new().format_exception_only(&bare)), vec!["TypeError"]);
}

/// Contract: chain=false renders one record; a 2-link chain renders 3 records, oldest first
#[test]
fn contract_chain_shape() {
    let config = FormatterConfig::default();
    let root = error("root", &["load"]);
    let middle = error("middle", &["parse"]);
    let top = error("top", &["main"]);
    middle.set_cause(Some(root));
    top.set_context(Some(middle));

    let formatter = DefaultFormatter::from_config(config.clone());

    let single = collect(formatter.format_exception(&top, FormatOptions::new().with_chain(false)));
    assert_eq!(
        single,
        vec!["Traceback (most recent call last):", "  at main (lib.js:1:1)", "Error: top"]
    );

    let chained = collect(formatter.format_exception(&top, FormatOptions::new()));
    let separators = chained
        .iter()
        .filter(|l| **l == config.cause_header || **l == config.context_header)
        .count();
    assert_eq!(separators, 2);

    let records: Vec<&str> = chained
        .iter()
        .filter(|l| l.starts_with("Error: "))
        .map(String::as_str)
        .collect();
    assert_eq!(records, vec!["Error: root", "Error: middle", "Error: top"]);

    let cause_at = chained.iter().position(|l| *l == config.cause_header).unwrap();
    let context_at = chained.iter().position(|l| *l == config.context_header).unwrap();
    assert!(cause_at < context_at);
    assert_eq!(chained.iter().filter(|l| **l == config.traceback_header).count(), 3);
}

/// Contract: an error without predecessors renders the same with or without chaining
#[test]
fn contract_no_predecessor_chain_is_noop() {
    let e = error("alone", &["main", "run"]);
    let formatter = DefaultFormatter::new();
    assert_eq!(
        collect(formatter.format_exception(&e, FormatOptions::new().with_chain(true))),
        collect(formatter.format_exception(&e, FormatOptions::new().with_chain(false)))
    );
}

/// Contract: suppression hides every predecessor
#[test]
fn contract_suppressed_context_renders_alone() {
    let e = error("top", &[]);
    e.set_context(Some(error("hidden", &[])));
    e.set_cause(Some(error("also hidden", &[])));
    e.set_suppress_context(true);

    let lines = collect(DefaultFormatter::new().format_exception(&e, FormatOptions::new()));
    assert_eq!(lines.last().map(String::as_str), Some("Error: top"));
    assert!(!lines.iter().any(|l| l.contains("hidden")));
}

/// Contract: no active error means empty output, not a failure
#[test]
fn contract_current_exception_without_error_is_empty() {
    let formatter = DefaultFormatter::new().with_error_source(Arc::new(ErrorState::new()));
    assert_eq!(formatter.format_current_exception(FormatOptions::new()).count(), 0);
    assert_eq!(formatter.format_last_exception(FormatOptions::new()).count(), 0);

    let mut sink = Vec::new();
    formatter
        .write_current_exception(FormatOptions::new(), &mut sink)
        .unwrap();
    assert!(sink.is_empty());
}

/// Contract: the per-call limit bounds frames of every record in a chain
#[test]
fn contract_exception_limit_applies_per_record() {
    let root = error("root", &["a", "b", "c"]);
    let top = error("top", &["d", "e", "f"]);
    top.set_cause(Some(root));

    let lines = collect(
        DefaultFormatter::new().format_exception(&top, FormatOptions::new().with_limit(-1)),
    );
    let frames: Vec<&String> = lines.iter().filter(|l| l.starts_with("  at ")).collect();
    assert_eq!(frames, vec!["  at c (lib.js:3:1)", "  at f (lib.js:3:1)"]);
}

/// Contract: the styled variant changes decoration only
#[test]
fn contract_styled_matches_plain() {
    let stack = stack_of(&["a", "b"]);
    let e = JsError::new(ErrorKind::TypeError, "x is undefined")
        .with_traceback(stack.capture())
        .shared();
    e.set_context(Some(error("earlier", &["z"])));

    let plain = DefaultFormatter::new().format_exception(&e, FormatOptions::new()).into_text();
    let styled = StyledFormatter::styled(FormatterConfig::default())
        .format_exception(&e, FormatOptions::new())
        .into_text();
    assert_eq!(strip_ansi(&styled), plain);
}
