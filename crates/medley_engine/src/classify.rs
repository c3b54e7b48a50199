use crate::{FailureKind, JobError};

/// Reduces a raw extraction-tool failure message to a `JobError`.
///
/// This is string matching on tool output: heuristic, and it may
/// misclassify. It stays behind this one function so it can be replaced
/// wholesale if the tool ever exposes structured errors.
pub fn classify_failure(raw: &str) -> JobError {
    if raw.contains("Sign in") {
        return JobError::new(
            FailureKind::AccessBlocked,
            "Sign-in required (bot challenge). Load a cookies.txt file and retry.",
        );
    }
    if raw.contains("This video is unavailable") {
        return JobError::new(FailureKind::Unavailable, "Video is unavailable");
    }

    let first = raw
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("external tool failed");
    let cleaned = first.strip_prefix("ERROR: ").unwrap_or(first);
    JobError::new(FailureKind::ExternalTool, cleaned)
}
