//! Wrapper constructors and node accessors

use std::error::Error as StdError;
use std::sync::Arc;

use backtrace::Backtrace;

use crate::types::{Annotation, CodeOptions, ErrCode, Fault, Inner, LogTag};
use crate::walk;

type BoxError = Box<dyn StdError + Send + Sync + 'static>;

enum TraceCapture {
    Always,
    IfMissing,
    Never,
}

// Capture-at-wrap: frames are taken here, unresolved, never at format time.
fn wrap_boxed(cause: BoxError, annotation: Annotation, capture: TraceCapture) -> Fault {
    let trace = match capture {
        TraceCapture::Always => Some(Backtrace::new_unresolved()),
        TraceCapture::IfMissing => {
            if walk::backtrace(cause.as_ref() as &(dyn StdError + 'static)).is_none() {
                Some(Backtrace::new_unresolved())
            } else {
                None
            }
        }
        TraceCapture::Never => None,
    };
    Fault {
        inner: Arc::new(Inner {
            annotation,
            trace,
            cause: Some(cause),
        }),
    }
}

impl Fault {
    /// Create a root failure from a message, capturing a backtrace.
    #[must_use]
    pub fn msg(msg: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(Inner {
                annotation: Annotation::Context(msg.into()),
                trace: Some(Backtrace::new_unresolved()),
                cause: None,
            }),
        }
    }

    /// Wrap `err` with a plain context message.
    #[must_use]
    pub fn with_context<E>(err: E, msg: impl Into<String>) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        wrap_boxed(
            Box::new(err),
            Annotation::Context(msg.into()),
            TraceCapture::IfMissing,
        )
    }

    /// Wrap `err` with a recommended HTTP response status.
    #[must_use]
    pub fn with_http_status<E>(err: E, status: u16) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        wrap_boxed(
            Box::new(err),
            Annotation::HttpStatus(status),
            TraceCapture::IfMissing,
        )
    }

    /// Wrap `err` with the alert marker. The rendered message is unchanged.
    #[must_use]
    pub fn with_alert<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        wrap_boxed(Box::new(err), Annotation::Alert, TraceCapture::IfMissing)
    }

    /// Wrap `err` with a log severity tag.
    #[must_use]
    pub fn with_tag<E>(err: E, tag: LogTag) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        wrap_boxed(Box::new(err), Annotation::Tag(tag), TraceCapture::IfMissing)
    }

    /// Wrap `err` with the name of the subsystem it surfaced in.
    #[must_use]
    pub fn with_subsystem<E>(err: E, subsystem: impl Into<String>) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        wrap_boxed(
            Box::new(err),
            Annotation::Subsystem(subsystem.into()),
            TraceCapture::IfMissing,
        )
    }

    /// Wrap `err` with a structured error code, using [`CodeOptions::default`].
    #[must_use]
    pub fn with_err_code<E>(err: E, code: ErrCode) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::with_err_code_opts(err, code, CodeOptions::default())
    }

    /// Wrap `err` with a structured error code under explicit options.
    #[must_use]
    pub fn with_err_code_opts<E>(err: E, code: ErrCode, opts: CodeOptions) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        let capture = if opts.capture_trace {
            TraceCapture::IfMissing
        } else {
            TraceCapture::Never
        };
        wrap_boxed(
            Box::new(err),
            Annotation::Code {
                code,
                message_prefix: opts.message_prefix,
            },
            capture,
        )
    }

    /// Wrap `err` with a freshly captured backtrace and nothing else.
    #[must_use]
    pub fn with_trace<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        wrap_boxed(Box::new(err), Annotation::Trace, TraceCapture::Always)
    }

    /// Wrap `err` as a client error (HTTP 400).
    #[must_use]
    pub fn bad_request<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::with_http_status(err, 400)
    }

    /// Wrap `err` as an authentication failure (HTTP 401).
    #[must_use]
    pub fn unauthorized<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::with_http_status(err, 401)
    }

    /// Wrap `err` as a missing resource (HTTP 404).
    #[must_use]
    pub fn not_found<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::with_http_status(err, 404)
    }

    /// Wrap `err` as an internal failure (HTTP 500).
    #[must_use]
    pub fn server_error<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::with_http_status(err, 500)
    }

    /// Wrap `err` for the alerting pipeline: subsystem, tag, and the alert
    /// marker, applied innermost to outermost.
    #[must_use]
    pub fn alert_tagged<E>(err: E, subsystem: impl Into<String>, tag: LogTag) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::with_alert(Self::with_tag(Self::with_subsystem(err, subsystem), tag))
    }

    /// Start a layered wrap over `err`. Each builder call adds one wrapper
    /// node; the last call ends up outermost.
    #[must_use]
    pub fn build<E>(err: E) -> Wrap
    where
        E: StdError + Send + Sync + 'static,
    {
        Wrap {
            cause: Box::new(err),
            layers: Vec::new(),
        }
    }

    /// This node's annotation.
    #[must_use]
    pub fn annotation(&self) -> &Annotation {
        &self.inner.annotation
    }

    /// The wrapped failure, when this node is not a root.
    #[must_use]
    pub fn cause(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner
            .cause
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }

    /// The backtrace captured by this node, if it captured one.
    #[must_use]
    pub fn trace(&self) -> Option<&Backtrace> {
        self.inner.trace.as_ref()
    }
}

/// Layered wrap builder returned by [`Fault::build`].
///
/// Preserves the one-annotation-per-node invariant: every call stacks a new
/// wrapper instead of accumulating fields on one node. With no layers added,
/// [`done`](Wrap::done) is equivalent to [`Fault::with_trace`].
#[must_use = "call done() to obtain the wrapped Fault"]
pub struct Wrap {
    cause: BoxError,
    layers: Vec<Annotation>,
}

impl Wrap {
    /// Add a plain context message layer.
    pub fn context(mut self, msg: impl Into<String>) -> Self {
        self.layers.push(Annotation::Context(msg.into()));
        self
    }

    /// Add an HTTP status layer.
    pub fn http_status(mut self, status: u16) -> Self {
        self.layers.push(Annotation::HttpStatus(status));
        self
    }

    /// Add the alert marker.
    pub fn alert(mut self) -> Self {
        self.layers.push(Annotation::Alert);
        self
    }

    /// Add a log severity tag layer.
    pub fn tag(mut self, tag: LogTag) -> Self {
        self.layers.push(Annotation::Tag(tag));
        self
    }

    /// Add a subsystem layer.
    pub fn subsystem(mut self, name: impl Into<String>) -> Self {
        self.layers.push(Annotation::Subsystem(name.into()));
        self
    }

    /// Add a structured error code layer under default options.
    pub fn err_code(mut self, code: ErrCode) -> Self {
        self.layers.push(Annotation::Code {
            code,
            message_prefix: true,
        });
        self
    }

    /// Apply the layers, innermost first.
    pub fn done(self) -> Fault {
        let mut layers = self.layers;
        if layers.is_empty() {
            return wrap_boxed(self.cause, Annotation::Trace, TraceCapture::Always);
        }
        let mut fault = wrap_boxed(self.cause, layers.remove(0), TraceCapture::IfMissing);
        for annotation in layers {
            fault = wrap_boxed(Box::new(fault), annotation, TraceCapture::IfMissing);
        }
        fault
    }
}
