//! Response gate: only `200 OK` bodies are worth parsing

use reqwest::StatusCode;

use crate::verdict::Verdict;

/// Returns a CRITICAL verdict for any status other than 200.
///
/// The body of an error page is not a version payload, so parsing it would
/// only turn an accurate CRITICAL into a confusing UNKNOWN.
pub fn gate(status: StatusCode) -> Option<Verdict> {
    if status == StatusCode::OK {
        return None;
    }

    let message = match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => status.as_u16().to_string(),
    };
    Some(Verdict::critical(message))
}
