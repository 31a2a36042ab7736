//! The check pipeline: fetch, gate, parse, compare
//!
//! Every path ends in a verdict; nothing here is retried. Logging happens at
//! this level so the parser and checker stay pure.

use tracing::{Level, debug, info, trace, warn};

use crate::parser::traits::ResponseParser;
use crate::probe::gate::gate;
use crate::transport::Transport;
use crate::verdict::Verdict;
use crate::version::checker::compare;
use crate::version::expected::ExpectedSpec;

const RULER_WIDTH: usize = 80;

/// Run one version check against `host:port`.
///
/// Comparison verdicts are prefixed with `software` so the status line names
/// the service it judged.
pub async fn run_check<T, P>(
    transport: &T,
    parser: &P,
    software: &str,
    host: &str,
    port: u16,
    expected: &ExpectedSpec,
) -> Verdict
where
    T: Transport + ?Sized,
    P: ResponseParser + ?Sized,
{
    let response = match transport.fetch(host, port).await {
        Ok(response) => response,
        Err(e) => {
            warn!("request to {}:{} failed: {}", host, port, e);
            return Verdict::critical(e.to_string());
        }
    };

    let ruler = "=".repeat(RULER_WIDTH);
    debug!(status = %response.status, "response received");
    debug!(
        "content:\n{}\n{}\n{}",
        ruler,
        String::from_utf8_lossy(response.body.trim_ascii()),
        ruler
    );

    if let Some(verdict) = gate(response.status) {
        return verdict;
    }

    if tracing::enabled!(Level::TRACE)
        && let Some(tree) = parser.render_tree(&response.body)
    {
        trace!("tag tree:\n{}\n{}", tree, ruler);
    }

    let version = match parser.parse(&response.body) {
        Ok(version) => version,
        Err(e) => {
            warn!("failed to parse response: {}", e);
            return Verdict::unknown(format!("failed to parse response: {e}"));
        }
    };
    info!(version = %version, expected = %expected, "extracted version");

    let verdict = compare(&version, expected);
    let verdict = Verdict::new(verdict.status, format!("{software}: {}", verdict.message));
    info!(status = %verdict.status, "{}", verdict.message);
    verdict
}
