//! Structured error annotations with cause-chain recovery
//!
//! This crate lets call sites attach orthogonal metadata to an underlying
//! failure without losing the original cause, and lets downstream code
//! recover any one piece of that metadata by walking the chain of wrapped
//! causes:
//! - Annotation wrappers: immutable [`Fault`] nodes carrying exactly one of
//!   HTTP status, alert marker, error code, log tag, subsystem, context
//!   message, or captured trace
//! - Chain walking: [`chain`] plus queries where the outermost annotation of
//!   a kind wins, except the merged log-tag resolution with its no-log
//!   override
//! - Backtrace capture at wrap time, formatted on demand
//! - Alert blocks: machine-readable records embedded in human-readable
//!   messages, rendered by an explicit, call-scoped [`AlertRenderer`]
//!
//! Wrapping is pure construction over an `Arc`-backed node, so finished
//! chains are safe to share across threads.
//!
//! ```
//! use fault::{Fault, LogTag};
//!
//! let root = std::io::Error::new(std::io::ErrorKind::Other, "db error");
//! let err = Fault::alert_tagged(
//!     Fault::server_error(root),
//!     "database",
//!     LogTag::SysFailure,
//! );
//!
//! assert_eq!(fault::http_status(&err), Some(500));
//! assert!(fault::is_alert(&err));
//! assert_eq!(fault::root_cause(&err).to_string(), "db error");
//! ```

pub mod alert;
pub mod constructors;
pub mod display;
pub mod extensions;
pub mod logging;
#[doc(hidden)]
pub mod macros;
pub mod types;
pub mod walk;

pub use alert::{AlertBlock, AlertParseError, AlertRenderer, CLOSING_ALERT_TAG, OPENING_ALERT_TAG};
pub use constructors::Wrap;
pub use display::{trace_string, verbose};
pub use extensions::{OptionExt, ResultExt};
pub use types::{Annotation, CodeOptions, ErrCode, Fault, LogTag, Result};
pub use walk::{
    all_err_codes, backtrace, chain, err_code, http_status, is_alert, log_tag, root_cause,
    subsystem, Chain,
};
