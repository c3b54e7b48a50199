use std::ffi::OsString;
use std::io::{BufRead, BufReader, Read};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::thread;

use engine_logging::engine_info;

use crate::classify::classify_failure;
use crate::persist::ensure_output_dir;
use crate::progress::ProgressSink;
use crate::runner::JobTask;
use crate::types::percent_from_bytes;
use crate::{FailureKind, JobError, ProgressEvent, SessionHandle, TaskEnd};

/// What the extraction tool should produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaSelection {
    Video { height_cap: Option<u16> },
    AudioMp3,
}

/// Everything one download job needs, captured before submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub tool: PathBuf,
    pub url: String,
    pub dest_dir: PathBuf,
    pub selection: MediaSelection,
    pub cookie_file: Option<PathBuf>,
}

/// Line format the extraction tool is asked to print per progress tick.
/// Fields: status|downloaded_bytes|total_bytes|percent|speed|eta.
pub const PROGRESS_TEMPLATE: &str = "download:%(progress.status)s|%(progress.downloaded_bytes)s|%(progress.total_bytes)s|%(progress._percent_str)s|%(progress._speed_str)s|%(progress._eta_str)s";

/// Format selector mirroring the original tool: mp4-first with a height
/// cap for video, best audio for mp3 extraction.
pub fn format_selector(selection: &MediaSelection) -> String {
    match selection {
        MediaSelection::Video {
            height_cap: Some(cap),
        } => format!(
            "bestvideo[height<={cap}][ext=mp4]+bestaudio[ext=m4a]/best[height<={cap}][ext=mp4]/best"
        ),
        MediaSelection::Video { height_cap: None } => {
            "bestvideo[ext=mp4]+bestaudio[ext=m4a]/best[ext=mp4]/best".to_string()
        }
        MediaSelection::AudioMp3 => "bestaudio/best".to_string(),
    }
}

/// Full argument list for the extraction-tool invocation.
pub fn download_args(request: &DownloadRequest) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec!["-f".into(), format_selector(&request.selection).into()];

    match request.selection {
        MediaSelection::Video { .. } => {
            args.push("--merge-output-format".into());
            args.push("mp4".into());
        }
        MediaSelection::AudioMp3 => {
            for arg in ["-x", "--audio-format", "mp3", "--audio-quality", "192K"] {
                args.push(arg.into());
            }
        }
    }

    args.push("-o".into());
    args.push(request.dest_dir.join("%(title)s.%(ext)s").into());

    if let Some(cookies) = &request.cookie_file {
        args.push("--cookies".into());
        args.push(cookies.clone().into());
    }

    args.push("--newline".into());
    args.push("--progress-template".into());
    args.push(PROGRESS_TEMPLATE.into());
    args.push(request.url.clone().into());
    args
}

/// One parsed progress line from the tool's stdout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookUpdate {
    pub status: HookStatus,
    pub downloaded_bytes: Option<u64>,
    pub total_bytes: Option<u64>,
    pub percent_text: String,
    pub speed_text: String,
    pub eta_text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookStatus {
    Downloading,
    Finished,
}

/// Parses one `PROGRESS_TEMPLATE` line; non-progress output yields `None`.
pub fn parse_progress_line(line: &str) -> Option<HookUpdate> {
    let rest = line.strip_prefix("download:")?;
    let mut fields = rest.split('|');

    let status = match fields.next()?.trim() {
        "downloading" => HookStatus::Downloading,
        "finished" => HookStatus::Finished,
        _ => return None,
    };

    let downloaded_bytes = parse_byte_count(fields.next()?);
    let total_bytes = parse_byte_count(fields.next()?);
    let percent_text = fields.next()?.trim().to_string();
    let speed_text = fields.next()?.trim().to_string();
    let eta_text = fields.next()?.trim().to_string();

    Some(HookUpdate {
        status,
        downloaded_bytes,
        total_bytes,
        percent_text,
        speed_text,
        eta_text,
    })
}

// The tool prints "NA" for unknown counts and may print floats for
// estimated totals.
fn parse_byte_count(field: &str) -> Option<u64> {
    let trimmed = field.trim();
    if trimmed.is_empty() || trimmed == "NA" || trimmed == "None" {
        return None;
    }
    trimmed.parse::<f64>().ok().map(|value| value as u64)
}

/// Reduces a parsed hook update to the event shown on the status line.
/// An unknown total yields a message-only event (no percentage).
pub fn reduce_hook(update: &HookUpdate) -> ProgressEvent {
    match update.status {
        HookStatus::Finished => {
            ProgressEvent::info("Download finished. Finalizing (merging)...").with_percent(100.0)
        }
        HookStatus::Downloading => {
            let event = ProgressEvent::info(format!(
                "Downloading: {} | Speed: {} | ETA: {}",
                update.percent_text, update.speed_text, update.eta_text
            ));
            match (update.downloaded_bytes, update.total_bytes) {
                (Some(downloaded), Some(total)) => match percent_from_bytes(downloaded, total) {
                    Some(percent) => event.with_percent(f64::from(percent)),
                    None => event,
                },
                _ => event,
            }
        }
    }
}

pub fn download_task(request: DownloadRequest) -> JobTask {
    Box::new(move |sink, session| run_download(&request, sink, session))
}

fn run_download(
    request: &DownloadRequest,
    sink: &dyn ProgressSink,
    session: &SessionHandle,
) -> Result<TaskEnd, JobError> {
    if session.is_closing() {
        return Ok(TaskEnd::Cancelled);
    }

    ensure_output_dir(&request.dest_dir)
        .map_err(|err| JobError::new(FailureKind::Output, err.to_string()))?;

    engine_info!(
        "download url_len={} dest={}",
        request.url.len(),
        request.dest_dir.display()
    );

    let mut child = Command::new(&request.tool)
        .args(download_args(request))
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|err| {
            JobError::new(
                FailureKind::Launch,
                format!("could not start '{}': {err}", request.tool.display()),
            )
        })?;

    let Some(stdout) = child.stdout.take() else {
        let _ = child.kill();
        return Err(JobError::new(
            FailureKind::Launch,
            "no stdout handle for the extraction tool",
        ));
    };

    // Drain stderr on its own thread so a chatty tool cannot fill the pipe
    // and deadlock against our stdout loop.
    let stderr = child.stderr.take();
    let stderr_reader = thread::spawn(move || {
        let mut text = String::new();
        if let Some(mut stderr) = stderr {
            let _ = stderr.read_to_string(&mut text);
        }
        text
    });

    for line in BufReader::new(stdout).lines() {
        if session.is_closing() {
            let _ = child.kill();
            let _ = child.wait();
            let _ = stderr_reader.join();
            return Ok(TaskEnd::Cancelled);
        }
        let Ok(line) = line else { break };
        if let Some(update) = parse_progress_line(&line) {
            sink.emit(reduce_hook(&update));
        }
    }

    let status = child
        .wait()
        .map_err(|err| JobError::new(FailureKind::ExternalTool, err.to_string()))?;
    let stderr_text = stderr_reader.join().unwrap_or_default();

    if session.is_closing() {
        return Ok(TaskEnd::Cancelled);
    }
    if status.success() {
        Ok(TaskEnd::Completed("Download successful".to_string()))
    } else {
        Err(classify_failure(&stderr_text))
    }
}
