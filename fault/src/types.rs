//! Core types for the annotation layer

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use backtrace::Backtrace;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Log severity carried by tag annotations and alert blocks.
///
/// Declaration order is severity order; [`LogTag::SysFailure`] is the highest.
/// `NoLog` is not a severity so much as a suppression: resolution treats it as
/// an override for the whole chain, see [`crate::walk::log_tag`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogTag {
    /// Suppresses logging for the whole chain, regardless of other tags
    NoLog,
    /// Expected outcome worth recording
    Success,
    /// Informational
    Info,
    /// Ordinary failure
    Error,
    /// Programming error; should never happen in production
    Bug,
    /// Infrastructure-level failure
    SysFailure,
}

impl LogTag {
    /// The wire/display name of this tag.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            LogTag::NoLog => "no log needed",
            LogTag::Success => "success",
            LogTag::Info => "info",
            LogTag::Error => "error",
            LogTag::Bug => "bug",
            LogTag::SysFailure => "system failure",
        }
    }

    /// Parse a tag from its wire name. Unknown names resolve to `NoLog`.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "success" => LogTag::Success,
            "info" => LogTag::Info,
            "error" => LogTag::Error,
            "bug" => LogTag::Bug,
            "system failure" => LogTag::SysFailure,
            _ => LogTag::NoLog,
        }
    }
}

impl fmt::Display for LogTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for LogTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for LogTag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(LogTag::from_name(&name))
    }
}

/// Structured error code: owning domain, numeric code, human description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrCode {
    domain: String,
    code: u32,
    description: String,
}

impl ErrCode {
    /// Build a code record.
    #[must_use]
    pub fn new(domain: impl Into<String>, code: u32, description: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            code,
            description: description.into(),
        }
    }

    /// The package or domain that owns this code.
    #[must_use]
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// The numeric code.
    #[must_use]
    pub fn code(&self) -> u32 {
        self.code
    }

    /// The human description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}

impl fmt::Display for ErrCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} {}", self.domain, self.code, self.description)
    }
}

/// Behavior switches for error-code wrappers.
///
/// The defaults capture a trace when the chain has none and prefix the code
/// onto the rendered message; either can be turned off per call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeOptions {
    /// Capture a backtrace at wrap time when the chain has none
    pub capture_trace: bool,
    /// Prefix the code onto the rendered message
    pub message_prefix: bool,
}

impl Default for CodeOptions {
    fn default() -> Self {
        Self {
            capture_trace: true,
            message_prefix: true,
        }
    }
}

/// The single piece of metadata a wrapper node carries.
///
/// This is a closed set: the chain walker dispatches on the variant a node
/// declares instead of probing capabilities dynamically.
#[derive(Debug, Clone)]
pub enum Annotation {
    /// Plain context message prepended to the cause description
    Context(String),
    /// Recommended HTTP response status
    HttpStatus(u16),
    /// Marks the whole chain as alert-worthy; never alters the message
    Alert,
    /// Structured error code
    Code {
        /// The code record
        code: ErrCode,
        /// Whether the code is prefixed onto the rendered message
        message_prefix: bool,
    },
    /// Log severity tag
    Tag(LogTag),
    /// Owning subsystem name
    Subsystem(String),
    /// Trace-only wrapper; the frames live in the node's trace slot
    Trace,
}

/// An immutable annotation wrapper around an underlying failure.
///
/// Each `Fault` carries exactly one [`Annotation`], an optional backtrace
/// captured at wrap time, and an optional cause. Nodes are `Arc`-backed:
/// cloning is cheap and a chain is safe to read from any thread once built.
#[derive(Debug, Clone)]
pub struct Fault {
    pub(crate) inner: Arc<Inner>,
}

#[derive(Debug)]
pub(crate) struct Inner {
    pub(crate) annotation: Annotation,
    pub(crate) trace: Option<Backtrace>,
    pub(crate) cause: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

/// Result type alias using [`Fault`] as the error.
pub type Result<T> = std::result::Result<T, Fault>;
