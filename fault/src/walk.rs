//! Cause-chain traversal and metadata queries
//!
//! Every query walks outer to inner over `source()` links and dispatches on
//! the [`Annotation`] variant each node declares. Absence of a match is the
//! canonical not-found signal (`None`, `false`, empty); traversal never fails
//! and always terminates, since each step follows exactly one cause edge of a
//! finite acyclic chain. Non-[`Fault`] nodes are traversed transparently but
//! expose no annotations.

use std::error::Error as StdError;

use backtrace::Backtrace;

use crate::types::{Annotation, ErrCode, Fault, LogTag};

/// Iterator over a failure and its transitive causes, outermost wrap first.
pub struct Chain<'a> {
    next: Option<&'a (dyn StdError + 'static)>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a (dyn StdError + 'static);

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.source();
        Some(current)
    }
}

/// Walk `err` and its causes, starting at `err` itself.
pub fn chain<'a>(err: &'a (dyn StdError + 'static)) -> Chain<'a> {
    Chain { next: Some(err) }
}

fn annotations<'a>(
    err: &'a (dyn StdError + 'static),
) -> impl Iterator<Item = &'a Annotation> + 'a {
    chain(err)
        .filter_map(|node| node.downcast_ref::<Fault>())
        .map(Fault::annotation)
}

/// The nearest HTTP status in the chain. Outer annotations shadow inner ones.
#[must_use]
pub fn http_status(err: &(dyn StdError + 'static)) -> Option<u16> {
    annotations(err).find_map(|a| match a {
        Annotation::HttpStatus(status) => Some(*status),
        _ => None,
    })
}

/// Whether any wrapper in the chain carries the alert marker.
#[must_use]
pub fn is_alert(err: &(dyn StdError + 'static)) -> bool {
    annotations(err).any(|a| matches!(a, Annotation::Alert))
}

/// The nearest structured error code in the chain.
#[must_use]
pub fn err_code<'a>(err: &'a (dyn StdError + 'static)) -> Option<&'a ErrCode> {
    annotations(err).find_map(|a| match a {
        Annotation::Code { code, .. } => Some(code),
        _ => None,
    })
}

/// Every error code in the chain, most recent wrap first.
#[must_use]
pub fn all_err_codes<'a>(err: &'a (dyn StdError + 'static)) -> Vec<&'a ErrCode> {
    annotations(err)
        .filter_map(|a| match a {
            Annotation::Code { code, .. } => Some(code),
            _ => None,
        })
        .collect()
}

/// The nearest subsystem name in the chain.
#[must_use]
pub fn subsystem<'a>(err: &'a (dyn StdError + 'static)) -> Option<&'a str> {
    annotations(err).find_map(|a| match a {
        Annotation::Subsystem(name) => Some(name.as_str()),
        _ => None,
    })
}

/// The resolved log severity for the chain.
///
/// Severity merges instead of shadowing: the highest tag seen anywhere in the
/// chain wins. The one exception is [`LogTag::NoLog`], a terminating override:
/// declared anywhere, it suppresses the whole chain regardless of tags found
/// before or after it.
#[must_use]
pub fn log_tag(err: &(dyn StdError + 'static)) -> Option<LogTag> {
    let mut resolved: Option<LogTag> = None;
    for annotation in annotations(err) {
        if let Annotation::Tag(tag) = annotation {
            if *tag == LogTag::NoLog {
                return Some(LogTag::NoLog);
            }
            resolved = Some(resolved.map_or(*tag, |seen| seen.max(*tag)));
        }
    }
    resolved
}

/// The innermost failure in the chain.
#[must_use]
pub fn root_cause<'a>(err: &'a (dyn StdError + 'static)) -> &'a (dyn StdError + 'static) {
    let mut current = err;
    while let Some(next) = current.source() {
        current = next;
    }
    current
}

/// The nearest captured backtrace in the chain.
///
/// Traces are discoverable independently of the annotation a node primarily
/// carries: a subsystem wrapper that captured frames at wrap time reports
/// them here.
#[must_use]
pub fn backtrace<'a>(err: &'a (dyn StdError + 'static)) -> Option<&'a Backtrace> {
    chain(err)
        .filter_map(|node| node.downcast_ref::<Fault>())
        .find_map(Fault::trace)
}
