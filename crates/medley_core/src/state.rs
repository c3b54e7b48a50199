use std::path::PathBuf;

use crate::media::file_display_name;
use crate::view_model::{AppViewModel, StatusView};
use crate::{MediaKind, Resolution};

/// Which surface the single window currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Menu,
    Converter,
    Downloader,
}

/// Job lifecycle for the active session. `Idle` is both the initial and the
/// terminal-resting state; a submission while `Running` is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JobPhase {
    #[default]
    Idle,
    Running,
}

/// Visual severity of a status-line update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusStyle {
    #[default]
    Info,
    Success,
    Warning,
    Danger,
}

/// How a job ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobResultKind {
    Succeeded,
    Failed,
    Cancelled,
}

/// Ticks a transient status message survives before it is cleared.
/// Roughly five seconds at the shell's 75 ms tick cadence.
pub const STATUS_TTL_TICKS: u16 = 67;

#[derive(Debug, Clone, PartialEq, Eq)]
struct StatusLine {
    message: String,
    style: StatusStyle,
    percent: Option<u8>,
    ttl_ticks: Option<u16>,
}

impl Default for StatusLine {
    fn default() -> Self {
        Self {
            message: "Ready".to_string(),
            style: StatusStyle::Info,
            percent: None,
            ttl_ticks: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct DownloaderForm {
    url: String,
    kind: MediaKind,
    resolution: Resolution,
    cookie_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    screen: Screen,
    phase: JobPhase,
    status: StatusLine,
    downloader: DownloaderForm,
    converter_tool_error: Option<String>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn phase(&self) -> JobPhase {
        self.phase
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            screen: self.screen,
            busy: self.phase == JobPhase::Running,
            status: StatusView {
                message: self.status.message.clone(),
                style: self.status.style,
                percent: self.status.percent,
            },
            url_input: self.downloader.url.clone(),
            media_kind: self.downloader.kind,
            resolution: self.downloader.resolution,
            cookie_file: self.downloader.cookie_file.clone(),
            cookie_file_name: self
                .downloader
                .cookie_file
                .as_deref()
                .map(file_display_name),
            converter_tool_error: self.converter_tool_error.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns the dirty bit and clears it.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn show_screen(&mut self, screen: Screen) {
        self.screen = screen;
        self.status = StatusLine::default();
        self.mark_dirty();
    }

    pub(crate) fn start_job(&mut self) {
        self.phase = JobPhase::Running;
    }

    pub(crate) fn finish_job(&mut self) {
        self.phase = JobPhase::Idle;
    }

    /// Replaces the status line. An incoming percent is clamped to 100; the
    /// producer side clamps too, so this is the last line of defense.
    pub(crate) fn set_status(
        &mut self,
        message: impl Into<String>,
        style: StatusStyle,
        percent: Option<u8>,
    ) {
        self.status = StatusLine {
            message: message.into(),
            style,
            percent: percent.map(|p| p.min(100)),
            ttl_ticks: None,
        };
        self.mark_dirty();
    }

    /// Like `set_status`, but the message expires after [`STATUS_TTL_TICKS`].
    pub(crate) fn set_transient_status(&mut self, message: impl Into<String>, style: StatusStyle) {
        self.set_status(message, style, None);
        self.status.ttl_ticks = Some(STATUS_TTL_TICKS);
    }

    /// Advances transient-status expiry by one tick.
    pub(crate) fn tick(&mut self) {
        if let Some(remaining) = self.status.ttl_ticks {
            if remaining <= 1 {
                self.status = StatusLine::default();
                self.mark_dirty();
            } else {
                self.status.ttl_ticks = Some(remaining - 1);
            }
        }
    }

    pub(crate) fn set_converter_tool_error(&mut self, reason: String) {
        self.converter_tool_error = Some(reason);
        self.mark_dirty();
    }

    pub(crate) fn converter_available(&self) -> bool {
        self.converter_tool_error.is_none()
    }

    pub(crate) fn url_input(&self) -> &str {
        &self.downloader.url
    }

    pub(crate) fn set_url_input(&mut self, url: String) {
        self.downloader.url = url;
    }

    pub(crate) fn set_media_kind(&mut self, kind: MediaKind) {
        self.downloader.kind = kind;
        self.mark_dirty();
    }

    pub(crate) fn set_resolution(&mut self, resolution: Resolution) {
        self.downloader.resolution = resolution;
        self.mark_dirty();
    }

    pub(crate) fn set_cookie_file(&mut self, path: Option<PathBuf>) {
        self.downloader.cookie_file = path;
        self.mark_dirty();
    }

    pub(crate) fn download_params(&self) -> (MediaKind, Resolution, Option<PathBuf>) {
        (
            self.downloader.kind,
            self.downloader.resolution,
            self.downloader.cookie_file.clone(),
        )
    }
}
