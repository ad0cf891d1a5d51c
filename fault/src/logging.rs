//! Log emission keyed by the resolved severity tag

use std::error::Error as StdError;
use std::sync::Once;

use log::{error, info};

use crate::alert::AlertRenderer;
use crate::types::LogTag;
use crate::walk;

static INIT_LOGGER: Once = Once::new();

/// Initialize `env_logger` once at application startup.
///
/// Levels are configured through `RUST_LOG` as usual.
pub fn init() {
    INIT_LOGGER.call_once(|| {
        env_logger::Builder::from_default_env()
            .format_timestamp_micros()
            .init();
    });
}

/// Logger setup for test binaries.
///
/// Safe to call from every test; initialization conflicts are swallowed.
pub fn init_test() {
    let _ = env_logger::Builder::from_default_env()
        .is_test(true)
        .try_init();
}

/// Emit `err` at the level implied by its resolved tag.
///
/// `NoLog` chains are skipped entirely; that is the point of the override.
/// Chains with no tag at all are logged as plain errors. Alert-marked chains
/// go through `renderer`, so the embedded block reaches the log pipeline.
pub fn emit(renderer: &AlertRenderer, err: &(dyn StdError + 'static)) {
    let tag = walk::log_tag(err).unwrap_or(LogTag::Error);
    if tag == LogTag::NoLog {
        return;
    }
    let msg = renderer.render(err);
    let line = match walk::subsystem(err) {
        Some(subsystem) => format!("{subsystem}: {tag}: {msg}"),
        None => format!("{tag}: {msg}"),
    };
    match tag {
        LogTag::NoLog => {}
        LogTag::Success | LogTag::Info => info!("{line}"),
        LogTag::Error | LogTag::Bug | LogTag::SysFailure => error!("{line}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Fault;

    #[test]
    fn emit_skips_no_log_chains() {
        init_test();

        let err = Fault::with_tag(Fault::msg("quiet"), LogTag::NoLog);
        // Must return without touching the logger.
        emit(&AlertRenderer::new(), &err);
    }

    #[test]
    fn emit_handles_untagged_and_alert_chains() {
        init_test();

        let plain = Fault::msg("plain failure");
        emit(&AlertRenderer::new(), &plain);

        let alerting = Fault::alert_tagged(Fault::msg("disk gone"), "storage", LogTag::SysFailure);
        emit(&AlertRenderer::new(), &alerting);
    }
}
