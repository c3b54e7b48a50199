use std::io::Read;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::thread;

use engine_logging::engine_info;

use crate::progress::ProgressSink;
use crate::runner::JobTask;
use crate::tools::{last_line, wait_cancellable};
use crate::{FailureKind, JobError, ProgressEvent, SessionHandle, TaskEnd};

/// Self-update invocation for the extraction tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatePlan {
    pub tool: PathBuf,
}

pub fn update_task(plan: UpdatePlan) -> JobTask {
    Box::new(move |sink, session| run_tool_update(&plan, sink, session))
}

fn run_tool_update(
    plan: &UpdatePlan,
    sink: &dyn ProgressSink,
    session: &SessionHandle,
) -> Result<TaskEnd, JobError> {
    if session.is_closing() {
        return Ok(TaskEnd::Cancelled);
    }

    engine_info!("tool update via {}", plan.tool.display());
    sink.emit(ProgressEvent::info("Checking for updates..."));

    let mut child = Command::new(&plan.tool)
        .arg("-U")
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|err| {
            JobError::new(
                FailureKind::Launch,
                format!("could not start '{}': {err}", plan.tool.display()),
            )
        })?;

    // The updater prints a handful of lines; drain both pipes off-thread
    // anyway so the wait loop can never deadlock.
    let stdout = child.stdout.take();
    let stderr = child.stderr.take();
    let output_reader = thread::spawn(move || {
        let mut text = String::new();
        if let Some(mut stdout) = stdout {
            let _ = stdout.read_to_string(&mut text);
        }
        if let Some(mut stderr) = stderr {
            let _ = stderr.read_to_string(&mut text);
        }
        text
    });

    let status = wait_cancellable(&mut child, session)
        .map_err(|err| JobError::new(FailureKind::ExternalTool, err.to_string()))?;
    let output = output_reader.join().unwrap_or_default();

    let Some(status) = status else {
        return Ok(TaskEnd::Cancelled);
    };

    if status.success() {
        Ok(TaskEnd::Completed("yt-dlp is up to date".to_string()))
    } else {
        let detail = last_line(&output).unwrap_or("unknown error");
        Err(JobError::new(
            FailureKind::ExternalTool,
            format!("Update failed: {detail}"),
        ))
    }
}
