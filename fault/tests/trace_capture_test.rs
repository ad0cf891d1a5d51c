//! Capture-at-wrap and on-demand trace rendering

use std::io;

use fault::{CodeOptions, ErrCode, Fault};

#[test]
fn first_wrapper_captures_when_chain_has_no_trace() {
    let raw = io::Error::new(io::ErrorKind::Other, "raw");
    let first = Fault::with_subsystem(raw, "storage");
    assert!(first.trace().is_some(), "first wrapper should capture");

    let second = Fault::with_context(first, "while flushing");
    assert!(second.trace().is_none(), "chain already carries a trace");
    assert!(fault::backtrace(&second).is_some());
}

#[test]
fn with_trace_always_captures_fresh_frames() {
    let already_traced = Fault::msg("root");
    let rewrapped = Fault::with_trace(already_traced);
    assert!(rewrapped.trace().is_some());
}

#[test]
fn code_options_can_suppress_capture() {
    let raw = io::Error::new(io::ErrorKind::Other, "raw");
    let err = Fault::with_err_code_opts(
        raw,
        ErrCode::new("db", 3, "connection refused"),
        CodeOptions {
            capture_trace: false,
            message_prefix: true,
        },
    );
    assert!(err.trace().is_none());
    assert!(fault::backtrace(&err).is_none());
}

#[test]
fn code_options_can_silence_the_message_prefix() {
    let code = ErrCode::new("db", 3, "connection refused");
    let silent = Fault::with_err_code_opts(
        Fault::msg("root"),
        code.clone(),
        CodeOptions {
            capture_trace: true,
            message_prefix: false,
        },
    );
    assert_eq!(silent.to_string(), "root");
    // the code is still discoverable even though the message is untouched
    assert_eq!(fault::err_code(&silent), Some(&code));
}

#[test]
fn default_code_wrap_prefixes_the_message() {
    let err = Fault::with_err_code(
        Fault::msg("root"),
        ErrCode::new("db", 3, "connection refused"),
    );
    assert_eq!(err.to_string(), "db/3 connection refused: root");
}

#[test]
fn captured_traces_render_on_demand() {
    let err = Fault::with_trace(io::Error::new(io::ErrorKind::Other, "raw"));
    let trace = fault::trace_string(&err).expect("captured trace should render");
    assert!(!trace.is_empty());

    let verbose = fault::verbose(&err);
    assert!(verbose.starts_with("raw"));
    assert!(verbose.len() > "raw".len(), "verbose output should append frames");
}

#[test]
fn traceless_chains_render_description_only() {
    let plain = io::Error::new(io::ErrorKind::Other, "plain");
    assert!(fault::trace_string(&plain).is_none());
    assert_eq!(fault::verbose(&plain), "plain");
}
