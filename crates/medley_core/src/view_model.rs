use std::path::PathBuf;

use crate::{MediaKind, Resolution, Screen, StatusStyle};

/// Snapshot of the status line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusView {
    pub message: String,
    pub style: StatusStyle,
    pub percent: Option<u8>,
}

/// Everything the shell needs to render one frame.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub screen: Screen,
    pub busy: bool,
    pub status: StatusView,
    pub url_input: String,
    pub media_kind: MediaKind,
    pub resolution: Resolution,
    pub cookie_file: Option<PathBuf>,
    pub cookie_file_name: Option<String>,
    pub converter_tool_error: Option<String>,
    pub dirty: bool,
}
