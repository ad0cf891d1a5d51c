//! Result and Option adapters for annotating failures in flight

use std::error::Error as StdError;

use crate::types::{CodeOptions, ErrCode, Fault, LogTag};

/// Annotation adapters for `Result`.
///
/// Every method is a no-op on `Ok`: the value passes through untouched, so
/// annotating a success never manufactures a spurious failure. This is the
/// propagation short-circuit: annotations attach only where a failure
/// actually exists.
pub trait ResultExt<T> {
    /// Wrap the error arm with a plain context message.
    fn context(self, msg: impl Into<String>) -> Result<T, Fault>;

    /// Wrap the error arm with a recommended HTTP status.
    fn http_status(self, status: u16) -> Result<T, Fault>;

    /// Mark the error arm alert-worthy.
    fn alert(self) -> Result<T, Fault>;

    /// Tag the error arm with a log severity.
    fn tag(self, tag: LogTag) -> Result<T, Fault>;

    /// Name the subsystem the error arm surfaced in.
    fn subsystem(self, name: impl Into<String>) -> Result<T, Fault>;

    /// Attach a structured error code to the error arm.
    fn err_code(self, code: ErrCode) -> Result<T, Fault>;

    /// Attach a structured error code under explicit options.
    fn err_code_opts(self, code: ErrCode, opts: CodeOptions) -> Result<T, Fault>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: StdError + Send + Sync + 'static,
{
    fn context(self, msg: impl Into<String>) -> Result<T, Fault> {
        self.map_err(|e| Fault::with_context(e, msg))
    }

    fn http_status(self, status: u16) -> Result<T, Fault> {
        self.map_err(|e| Fault::with_http_status(e, status))
    }

    fn alert(self) -> Result<T, Fault> {
        self.map_err(Fault::with_alert)
    }

    fn tag(self, tag: LogTag) -> Result<T, Fault> {
        self.map_err(|e| Fault::with_tag(e, tag))
    }

    fn subsystem(self, name: impl Into<String>) -> Result<T, Fault> {
        self.map_err(|e| Fault::with_subsystem(e, name))
    }

    fn err_code(self, code: ErrCode) -> Result<T, Fault> {
        self.map_err(|e| Fault::with_err_code(e, code))
    }

    fn err_code_opts(self, code: ErrCode, opts: CodeOptions) -> Result<T, Fault> {
        self.map_err(|e| Fault::with_err_code_opts(e, code, opts))
    }
}

/// Absence adapter for `Option`.
pub trait OptionExt<T> {
    /// Turn `None` into a root fault carrying `msg`.
    fn ok_or_fault(self, msg: impl Into<String>) -> Result<T, Fault>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_fault(self, msg: impl Into<String>) -> Result<T, Fault> {
        self.ok_or_else(|| Fault::msg(msg))
    }
}
