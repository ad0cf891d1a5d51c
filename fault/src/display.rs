//! Display and error-trait implementations, plus trace rendering

use std::error::Error as StdError;
use std::fmt;

use crate::types::{Annotation, Fault};
use crate::walk;

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cause = self.inner.cause.as_ref();
        match &self.inner.annotation {
            Annotation::Context(msg) => match cause {
                Some(c) => write!(f, "{msg}: {c}"),
                None => f.write_str(msg),
            },
            Annotation::HttpStatus(status) => match cause {
                Some(c) => write!(f, "http status {status}: {c}"),
                None => write!(f, "http status {status}"),
            },
            Annotation::Code {
                code,
                message_prefix: true,
            } => match cause {
                Some(c) => write!(f, "{code}: {c}"),
                None => write!(f, "{code}"),
            },
            // Pure-metadata wrappers keep the description stable; their
            // payloads are recovered through the walk queries instead.
            Annotation::Code {
                message_prefix: false,
                ..
            }
            | Annotation::Alert
            | Annotation::Tag(_)
            | Annotation::Subsystem(_)
            | Annotation::Trace => match cause {
                Some(c) => write!(f, "{c}"),
                None => Ok(()),
            },
        }
    }
}

impl StdError for Fault {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner
            .cause
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

/// Render the frames of the nearest captured backtrace as `file:line` tokens,
/// one per line.
///
/// Frames are resolved here, on demand; capture itself never resolves
/// symbols. Frames with no resolvable location fall back to the symbol name,
/// then the frame address, so a captured trace never renders empty.
#[must_use]
pub fn trace_string(err: &(dyn StdError + 'static)) -> Option<String> {
    let trace = walk::backtrace(err)?;
    let mut resolved = trace.clone();
    resolved.resolve();
    let mut out = String::new();
    for frame in resolved.frames() {
        if !out.is_empty() {
            out.push('\n');
        }
        match frame.symbols().first() {
            Some(symbol) => match (symbol.filename(), symbol.lineno()) {
                (Some(file), Some(line)) => {
                    out.push_str(&format!("{}:{line}", file.display()));
                }
                _ => match symbol.name() {
                    Some(name) => out.push_str(&format!("{name}")),
                    None => out.push_str(&format!("{:?}", frame.ip())),
                },
            },
            None => out.push_str(&format!("{:?}", frame.ip())),
        }
    }
    if out.is_empty() {
        None
    } else {
        Some(out)
    }
}

/// The plain description plus the nearest captured trace, when one exists.
#[must_use]
pub fn verbose(err: &(dyn StdError + 'static)) -> String {
    match trace_string(err) {
        Some(trace) => format!("{err}\n{trace}"),
        None => err.to_string(),
    }
}
