use std::path::PathBuf;

use crate::{ConversionKind, MediaKind, Resolution};

/// Side effects the shell executes on behalf of the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Locate the transcoding tool for the converter screen.
    ProbeConverterTool,
    /// Locate the extraction tool for the downloader screen.
    ProbeDownloaderTool,
    /// Open the source and destination file dialogs for a conversion.
    ChooseConversionFiles { kind: ConversionKind },
    /// Submit a conversion job.
    RunConversion {
        kind: ConversionKind,
        input: PathBuf,
        output: PathBuf,
    },
    /// Open the destination-directory dialog for a download.
    ChooseDownloadDir,
    /// Open the cookie-file dialog.
    ChooseCookieFile,
    /// Submit a download job.
    RunDownload {
        url: String,
        dest_dir: PathBuf,
        kind: MediaKind,
        resolution: Resolution,
        cookie_file: Option<PathBuf>,
    },
    /// Submit a tool-update job.
    RunToolUpdate,
    /// Close the child session and reveal the menu.
    RevealMenu,
    /// Close every session and terminate the process.
    Quit,
}
