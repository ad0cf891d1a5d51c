//! Result/Option adapters and construction macros

use std::io;

use fault::{CodeOptions, ErrCode, LogTag, OptionExt, ResultExt};

#[test]
fn ok_values_pass_through_untouched() {
    let ok: Result<u32, io::Error> = Ok(7);
    let annotated = ok.http_status(500);
    assert_eq!(annotated.expect("ok should survive annotation"), 7);
}

#[test]
fn err_values_accumulate_annotation_layers() {
    let err: Result<(), io::Error> = Err(io::Error::new(io::ErrorKind::Other, "boom"));
    let failed = err
        .context("reading chunk")
        .subsystem("ingest")
        .tag(LogTag::Error)
        .http_status(500);

    let fault_err = failed.expect_err("err should stay err");
    assert_eq!(fault::http_status(&fault_err), Some(500));
    assert_eq!(fault::subsystem(&fault_err), Some("ingest"));
    assert_eq!(fault::log_tag(&fault_err), Some(LogTag::Error));
    assert_eq!(fault_err.to_string(), "reading chunk: boom");
}

#[test]
fn alert_adapter_marks_the_error_arm() {
    let err: Result<(), io::Error> = Err(io::Error::new(io::ErrorKind::Other, "boom"));
    let marked = err.alert().expect_err("err should stay err");
    assert!(fault::is_alert(&marked));
    assert_eq!(marked.to_string(), "boom");
}

#[test]
fn err_code_adapters_attach_codes() {
    let code = ErrCode::new("db", 3, "locked");
    let err: Result<(), io::Error> = Err(io::Error::new(io::ErrorKind::Other, "boom"));
    let coded = err.err_code(code.clone()).expect_err("err should stay err");
    assert_eq!(fault::err_code(&coded), Some(&code));

    let silent: Result<(), io::Error> = Err(io::Error::new(io::ErrorKind::Other, "boom"));
    let coded = silent
        .err_code_opts(
            code,
            CodeOptions {
                capture_trace: false,
                message_prefix: false,
            },
        )
        .expect_err("err should stay err");
    assert_eq!(coded.to_string(), "boom");
}

#[test]
fn option_adapter_builds_root_faults() {
    let missing: Option<u32> = None;
    let err = missing.ok_or_fault("no row matched").expect_err("none should fail");
    assert_eq!(err.to_string(), "no row matched");
    assert!(fault::backtrace(&err).is_some());

    let present = Some(3).ok_or_fault("no row matched").expect("some should pass");
    assert_eq!(present, 3);
}

fn guarded(flag: bool) -> fault::Result<u32> {
    fault::ensure!(flag, "flag must be set");
    Ok(1)
}

fn always_bails() -> fault::Result<()> {
    fault::bail!("gave up after {} retries", 3)
}

#[test]
fn ensure_and_bail_build_root_faults() {
    assert_eq!(guarded(true).expect("true should pass"), 1);

    let err = guarded(false).expect_err("false should bail");
    assert_eq!(err.to_string(), "flag must be set");
    assert!(fault::backtrace(&err).is_some());

    let err = always_bails().expect_err("bail should fail");
    assert_eq!(err.to_string(), "gave up after 3 retries");
}

#[test]
fn fault_macro_formats_like_format() {
    let err = fault::fault!("partition {} offline", 12);
    assert_eq!(err.to_string(), "partition 12 offline");
}
