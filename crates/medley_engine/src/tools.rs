use std::io;
use std::path::{Path, PathBuf};
use std::process::{Child, ExitStatus};
use std::thread;
use std::time::Duration;

use which::which;

use crate::{FailureKind, JobError, SessionHandle};

pub const FFMPEG_TOOL: &str = "ffmpeg";
pub const YTDLP_TOOL: &str = "yt-dlp";

/// Resolves an external binary, preferring an explicit override path.
pub fn locate_tool(name: &str, override_path: Option<&Path>) -> Result<PathBuf, JobError> {
    if let Some(path) = override_path {
        if path.is_file() {
            return Ok(path.to_path_buf());
        }
        return Err(JobError::new(
            FailureKind::ToolMissing,
            format!("'{name}' not found at {}", path.display()),
        ));
    }
    which(name).map_err(|_| {
        JobError::new(
            FailureKind::ToolMissing,
            format!("'{name}' not found. Install it and make sure it is on PATH."),
        )
    })
}

/// Polls a child process until it exits, killing it if the session starts
/// closing. Returns `None` when the child was killed on close.
pub fn wait_cancellable(
    child: &mut Child,
    session: &SessionHandle,
) -> io::Result<Option<ExitStatus>> {
    loop {
        if session.is_closing() {
            let _ = child.kill();
            let _ = child.wait();
            return Ok(None);
        }
        match child.try_wait()? {
            Some(status) => return Ok(Some(status)),
            None => thread::sleep(Duration::from_millis(100)),
        }
    }
}

/// Last non-empty line of a tool's output, for terse failure messages.
pub fn last_line(output: &str) -> Option<&str> {
    output
        .lines()
        .rev()
        .map(str::trim)
        .find(|line| !line.is_empty())
}
