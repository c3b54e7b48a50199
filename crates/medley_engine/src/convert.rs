use std::ffi::OsString;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use engine_logging::engine_info;

use crate::progress::ProgressSink;
use crate::runner::JobTask;
use crate::tools::{last_line, wait_cancellable};
use crate::{FailureKind, JobError, ProgressEvent, SessionHandle, TaskEnd};

/// The fixed conversion table, one entry per converter-screen button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionKind {
    Mp4ToAvi,
    AviToMp4,
    MkvToMp4,
    Mp4ToMkv,
    WavToMp3,
    Mp3ToWav,
    M4aToMp3,
    Mp3ToM4a,
    ExtractAudio,
}

impl ConversionKind {
    /// Codec arguments placed between the input and output paths.
    pub fn codec_args(&self) -> &'static [&'static str] {
        match self {
            ConversionKind::Mp4ToAvi => &["-c:v", "libxvid"],
            ConversionKind::AviToMp4 => &["-c:v", "libx264"],
            ConversionKind::MkvToMp4 => &["-c:v", "libx264", "-c:a", "copy"],
            ConversionKind::Mp4ToMkv => &["-c:v", "copy", "-c:a", "copy"],
            ConversionKind::WavToMp3 => &["-c:a", "libmp3lame", "-b:a", "192k"],
            // Container change only; ffmpeg infers PCM for .wav.
            ConversionKind::Mp3ToWav => &[],
            ConversionKind::M4aToMp3 => &["-c:a", "libmp3lame", "-b:a", "192k"],
            ConversionKind::Mp3ToM4a => &["-c:a", "aac"],
            ConversionKind::ExtractAudio => &["-vn", "-c:a", "libmp3lame", "-b:a", "192k"],
        }
    }

    pub fn success_message(&self) -> &'static str {
        match self {
            ConversionKind::ExtractAudio => "Audio extraction successful",
            _ => "Conversion successful",
        }
    }
}

/// Everything one transcode job needs, captured before submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionPlan {
    pub tool: PathBuf,
    pub kind: ConversionKind,
    pub input: PathBuf,
    pub output: PathBuf,
}

/// Full argument list for the transcoder invocation.
pub fn conversion_args(plan: &ConversionPlan) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        "-y".into(),
        "-hide_banner".into(),
        "-loglevel".into(),
        "error".into(),
        "-i".into(),
        plan.input.clone().into(),
    ];
    args.extend(plan.kind.codec_args().iter().map(|arg| OsString::from(*arg)));
    args.push(plan.output.clone().into());
    args
}

pub fn conversion_task(plan: ConversionPlan) -> JobTask {
    Box::new(move |sink, session| run_conversion(&plan, sink, session))
}

fn run_conversion(
    plan: &ConversionPlan,
    sink: &dyn ProgressSink,
    session: &SessionHandle,
) -> Result<TaskEnd, JobError> {
    if session.is_closing() {
        return Ok(TaskEnd::Cancelled);
    }

    engine_info!(
        "convert {:?}: {} -> {}",
        plan.kind,
        plan.input.display(),
        plan.output.display()
    );
    sink.emit(ProgressEvent::info(format!(
        "Converting '{}'...",
        display_name(&plan.input)
    )));

    let mut child = Command::new(&plan.tool)
        .args(conversion_args(plan))
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|err| {
            JobError::new(
                FailureKind::Launch,
                format!("could not start '{}': {err}", plan.tool.display()),
            )
        })?;

    // `-loglevel error` keeps stderr well under the pipe buffer, so it is
    // safe to drain after the child exits.
    let status = wait_cancellable(&mut child, session)
        .map_err(|err| JobError::new(FailureKind::ExternalTool, err.to_string()))?;
    let Some(status) = status else {
        return Ok(TaskEnd::Cancelled);
    };

    if status.success() {
        return Ok(TaskEnd::Completed(plan.kind.success_message().to_string()));
    }

    let mut stderr_text = String::new();
    if let Some(mut stderr) = child.stderr.take() {
        let _ = stderr.read_to_string(&mut stderr_text);
    }
    let message = last_line(&stderr_text)
        .unwrap_or("transcode failed with no diagnostic output")
        .to_string();
    Err(JobError::new(FailureKind::ExternalTool, message))
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
