use std::fmt;

use thiserror::Error;

pub type JobId = u64;

/// Visual severity of a status update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusStyle {
    Info,
    Success,
    Warning,
    Danger,
}

/// One progress update from a running job. Immutable once built; the
/// percentage, when present, is already clamped to 0..=100.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressEvent {
    pub message: String,
    pub style: StatusStyle,
    pub percent: Option<u8>,
}

impl ProgressEvent {
    pub fn info(message: impl Into<String>) -> Self {
        Self::styled(message, StatusStyle::Info)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::styled(message, StatusStyle::Success)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::styled(message, StatusStyle::Warning)
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self::styled(message, StatusStyle::Danger)
    }

    fn styled(message: impl Into<String>, style: StatusStyle) -> Self {
        Self {
            message: message.into(),
            style,
            percent: None,
        }
    }

    /// Attaches a percentage, clamped to [0, 100].
    pub fn with_percent(mut self, percent: f64) -> Self {
        self.percent = Some(clamp_percent(percent));
        self
    }
}

fn clamp_percent(percent: f64) -> u8 {
    percent.clamp(0.0, 100.0).round() as u8
}

/// Percentage of `downloaded` out of `total`; `None` when the total is
/// unknown (zero stands in for "no content length").
pub fn percent_from_bytes(downloaded: u64, total: u64) -> Option<u8> {
    if total == 0 {
        return None;
    }
    Some(clamp_percent(downloaded as f64 / total as f64 * 100.0))
}

/// Everything the engine reports back to the interactive surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    Progress { job_id: JobId, event: ProgressEvent },
    JobCompleted { job_id: JobId, outcome: JobOutcome },
}

/// Terminal result of a job. Cancellation is its own outcome, not a
/// failure variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    Succeeded { message: String },
    Failed(JobError),
    Cancelled,
}

/// How a task signals its own end to the runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskEnd {
    /// Finished normally; the message is shown to the user.
    Completed(String),
    /// Aborted because the owning session requested close.
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct JobError {
    pub kind: FailureKind,
    pub message: String,
}

impl JobError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The external binary is not installed or not on PATH.
    ToolMissing,
    /// The binary exists but could not be spawned.
    Launch,
    /// The tool ran and reported an error.
    ExternalTool,
    /// The site demanded sign-in (bot challenge).
    AccessBlocked,
    /// The requested media does not exist or was taken down.
    Unavailable,
    /// The destination directory is missing or not writable.
    Output,
    /// A defect inside the job itself (panic).
    Internal,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::ToolMissing => write!(f, "tool missing"),
            FailureKind::Launch => write!(f, "launch failed"),
            FailureKind::ExternalTool => write!(f, "external tool error"),
            FailureKind::AccessBlocked => write!(f, "access blocked"),
            FailureKind::Unavailable => write!(f, "media unavailable"),
            FailureKind::Output => write!(f, "output directory error"),
            FailureKind::Internal => write!(f, "internal error"),
        }
    }
}
