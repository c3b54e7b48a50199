//! Medley engine: background-job execution and external-tool façades.
mod classify;
mod convert;
mod download;
mod persist;
mod progress;
mod runner;
mod session;
mod tools;
mod types;
mod update_tool;

pub use classify::classify_failure;
pub use convert::{conversion_args, conversion_task, ConversionKind, ConversionPlan};
pub use download::{
    download_args, download_task, format_selector, parse_progress_line, reduce_hook,
    DownloadRequest, HookStatus, HookUpdate, MediaSelection, PROGRESS_TEMPLATE,
};
pub use persist::{ensure_output_dir, write_atomic, PersistError};
pub use progress::{ChannelProgressSink, ProgressSink, SessionScopedSink};
pub use runner::{EngineHandle, JobTask};
pub use session::SessionHandle;
pub use tools::{last_line, locate_tool, wait_cancellable, FFMPEG_TOOL, YTDLP_TOOL};
pub use types::{
    percent_from_bytes, EngineEvent, FailureKind, JobError, JobId, JobOutcome, ProgressEvent,
    StatusStyle, TaskEnd,
};
pub use update_tool::{update_task, UpdatePlan};
