//! Machine-readable alert blocks embedded in human-readable messages

use std::error::Error as StdError;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::LogTag;
use crate::walk;

/// Opens an embedded alert block.
pub const OPENING_ALERT_TAG: &str = "\n<alert>\n";
/// Closes an embedded alert block.
pub const CLOSING_ALERT_TAG: &str = "\n</alert>\n";

/// The structured record carried inside an alert block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertBlock {
    /// Subsystem the failure surfaced in; empty when the chain carries none
    pub subsystem: String,
    /// Resolved severity for the chain
    pub tag: LogTag,
    /// Plain description of the chain
    pub msg: String,
}

impl AlertBlock {
    /// Collect the block fields for an alert-marked chain.
    ///
    /// Returns `None` when the chain carries no alert marker. Subsystem and
    /// tag come from the walk queries, so outer annotations shadow inner
    /// ones the same way they do everywhere else.
    #[must_use]
    pub fn from_err(err: &(dyn StdError + 'static)) -> Option<Self> {
        if !walk::is_alert(err) {
            return None;
        }
        Some(Self {
            subsystem: walk::subsystem(err).unwrap_or_default().to_string(),
            tag: walk::log_tag(err).unwrap_or(LogTag::Error),
            msg: err.to_string(),
        })
    }

    /// Recover the record embedded in rendered output.
    pub fn parse(rendered: &str) -> Result<Self, AlertParseError> {
        let start = rendered
            .find(OPENING_ALERT_TAG)
            .ok_or(AlertParseError::MissingBlock)?
            + OPENING_ALERT_TAG.len();
        let end = rendered[start..]
            .find(CLOSING_ALERT_TAG)
            .ok_or(AlertParseError::MissingBlock)?
            + start;
        Ok(serde_json::from_str(&rendered[start..end])?)
    }
}

/// Failed to recover an alert block from rendered output.
#[derive(Debug, Error)]
pub enum AlertParseError {
    /// The input carries no complete pair of alert delimiters
    #[error("no alert block delimiters in input")]
    MissingBlock,
    /// The delimited payload is not a valid alert record
    #[error("malformed alert record: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Call-scoped alert renderer.
///
/// Owns its serialization settings instead of reading process-wide
/// configuration; pass one to whatever formatting or logging call needs it.
#[derive(Debug, Clone)]
pub struct AlertRenderer {
    pretty: bool,
}

impl AlertRenderer {
    /// Renderer producing compact JSON blocks.
    #[must_use]
    pub fn new() -> Self {
        Self { pretty: false }
    }

    /// Renderer producing pretty-printed JSON blocks.
    #[must_use]
    pub fn pretty() -> Self {
        Self { pretty: true }
    }

    /// Render `err`, appending the alert block when the chain is
    /// alert-marked.
    ///
    /// Serialization failure is non-fatal: it degrades to an inline
    /// diagnostic in place of the block and never fails the caller.
    #[must_use]
    pub fn render(&self, err: &(dyn StdError + 'static)) -> String {
        let msg = err.to_string();
        let Some(block) = AlertBlock::from_err(err) else {
            return msg;
        };
        let encoded = if self.pretty {
            serde_json::to_string_pretty(&block)
        } else {
            serde_json::to_string(&block)
        };
        match encoded {
            Ok(json) => format!("{msg}{OPENING_ALERT_TAG}{json}{CLOSING_ALERT_TAG}"),
            Err(e) => format!("{msg}: unable to encode alert: {e}"),
        }
    }
}

impl Default for AlertRenderer {
    fn default() -> Self {
        Self::new()
    }
}
