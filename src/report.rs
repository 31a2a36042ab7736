//! Turning the outcome of a run into the status line and exit code

use crate::error::SetupError;
use crate::verdict::{SETUP_FAILURE_EXIT_CODE, Status, Verdict};

/// Apply the note about a skipped default config file, if there is one.
///
/// The check itself still ran, so only an OK result is raised to WARNING.
pub fn with_config_note(verdict: Verdict, ignored: Option<&str>) -> Verdict {
    match ignored {
        Some(note) => verdict.escalate(Status::Warning, note),
        None => verdict,
    }
}

/// Line printed on stdout and the process exit code for a run.
///
/// A [`SetupError`] anywhere in the error chain means the deployment is
/// broken and maps to [`SETUP_FAILURE_EXIT_CODE`]; any other error is UNKNOWN.
pub fn report(outcome: &anyhow::Result<Verdict>) -> (String, u8) {
    match outcome {
        Ok(verdict) => (verdict.to_string(), verdict.exit_code()),
        Err(e) => match e.downcast_ref::<SetupError>() {
            Some(setup) => setup_failure(setup),
            None => (
                Verdict::unknown(e.to_string()).to_string(),
                Status::Unknown.exit_code(),
            ),
        },
    }
}

pub fn setup_failure(error: &SetupError) -> (String, u8) {
    (
        Verdict::unknown(error.to_string()).to_string(),
        SETUP_FAILURE_EXIT_CODE,
    )
}
