//! Bridge between the pure core and the background engine: submits jobs and
//! translates engine events back into core messages.

use std::path::PathBuf;

use medley_core::{JobResultKind, MediaKind, Msg, Resolution};
use medley_engine::{
    ConversionPlan, DownloadRequest, EngineEvent, EngineHandle, JobId, JobOutcome, MediaSelection,
    ProgressEvent, SessionHandle, UpdatePlan,
};

pub struct EffectRunner {
    engine: EngineHandle,
    next_job_id: JobId,
}

impl EffectRunner {
    pub fn new() -> Self {
        Self {
            engine: EngineHandle::new(),
            next_job_id: 1,
        }
    }

    fn next_id(&mut self) -> JobId {
        let id = self.next_job_id;
        self.next_job_id += 1;
        id
    }

    pub fn submit_conversion(
        &mut self,
        session: &SessionHandle,
        tool: PathBuf,
        kind: medley_core::ConversionKind,
        input: PathBuf,
        output: PathBuf,
    ) -> JobId {
        let job_id = self.next_id();
        self.engine.submit_conversion(
            job_id,
            session.clone(),
            ConversionPlan {
                tool,
                kind: map_conversion(kind),
                input,
                output,
            },
        );
        job_id
    }

    #[allow(clippy::too_many_arguments)]
    pub fn submit_download(
        &mut self,
        session: &SessionHandle,
        tool: PathBuf,
        url: String,
        dest_dir: PathBuf,
        kind: MediaKind,
        resolution: Resolution,
        cookie_file: Option<PathBuf>,
    ) -> JobId {
        let job_id = self.next_id();
        self.engine.submit_download(
            job_id,
            session.clone(),
            DownloadRequest {
                tool,
                url,
                dest_dir,
                selection: map_selection(kind, resolution),
                cookie_file,
            },
        );
        job_id
    }

    pub fn submit_tool_update(&mut self, session: &SessionHandle, tool: PathBuf) -> JobId {
        let job_id = self.next_id();
        self.engine
            .submit_tool_update(job_id, session.clone(), UpdatePlan { tool });
        job_id
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.engine.try_recv()
    }
}

fn map_conversion(kind: medley_core::ConversionKind) -> medley_engine::ConversionKind {
    match kind {
        medley_core::ConversionKind::Mp4ToAvi => medley_engine::ConversionKind::Mp4ToAvi,
        medley_core::ConversionKind::AviToMp4 => medley_engine::ConversionKind::AviToMp4,
        medley_core::ConversionKind::MkvToMp4 => medley_engine::ConversionKind::MkvToMp4,
        medley_core::ConversionKind::Mp4ToMkv => medley_engine::ConversionKind::Mp4ToMkv,
        medley_core::ConversionKind::WavToMp3 => medley_engine::ConversionKind::WavToMp3,
        medley_core::ConversionKind::Mp3ToWav => medley_engine::ConversionKind::Mp3ToWav,
        medley_core::ConversionKind::M4aToMp3 => medley_engine::ConversionKind::M4aToMp3,
        medley_core::ConversionKind::Mp3ToM4a => medley_engine::ConversionKind::Mp3ToM4a,
        medley_core::ConversionKind::ExtractAudio => medley_engine::ConversionKind::ExtractAudio,
    }
}

fn map_selection(kind: MediaKind, resolution: Resolution) -> MediaSelection {
    match kind {
        MediaKind::Video => MediaSelection::Video {
            height_cap: resolution.height_cap(),
        },
        MediaKind::AudioMp3 => MediaSelection::AudioMp3,
    }
}

fn map_style(style: medley_engine::StatusStyle) -> medley_core::StatusStyle {
    match style {
        medley_engine::StatusStyle::Info => medley_core::StatusStyle::Info,
        medley_engine::StatusStyle::Success => medley_core::StatusStyle::Success,
        medley_engine::StatusStyle::Warning => medley_core::StatusStyle::Warning,
        medley_engine::StatusStyle::Danger => medley_core::StatusStyle::Danger,
    }
}

/// Core message for one progress event.
pub fn progress_msg(event: ProgressEvent) -> Msg {
    Msg::JobProgress {
        message: event.message,
        style: map_style(event.style),
        percent: event.percent,
    }
}

/// Core message for a terminal outcome.
pub fn completion_msg(outcome: JobOutcome) -> Msg {
    match outcome {
        JobOutcome::Succeeded { message } => Msg::JobFinished {
            result: JobResultKind::Succeeded,
            message,
        },
        JobOutcome::Failed(err) => Msg::JobFinished {
            result: JobResultKind::Failed,
            message: format!("Error: {}", err.message),
        },
        JobOutcome::Cancelled => Msg::JobFinished {
            result: JobResultKind::Cancelled,
            message: "Operation cancelled".to_string(),
        },
    }
}
