use std::path::PathBuf;

use crate::{ConversionKind, JobResultKind, MediaKind, Resolution, StatusStyle};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User clicked "File Converter" on the menu.
    ConverterOpenRequested,
    /// User clicked "Video Downloader" on the menu.
    DownloaderOpenRequested,
    /// The converter screen opened but its external tool is missing.
    ConverterToolUnavailable { reason: String },
    /// A child screen failed to initialize; the menu is revealed instead.
    ScreenOpenFailed { reason: String },
    /// User picked a conversion; the shell opens the file dialogs next.
    ConversionPicked(ConversionKind),
    /// Both file dialogs resolved for a conversion.
    ConversionInputsChosen {
        kind: ConversionKind,
        input: PathBuf,
        output: PathBuf,
    },
    /// User dismissed a file or directory dialog.
    SelectionCancelled,
    /// User edited the download URL field.
    UrlEdited(String),
    /// User switched between video and audio download.
    KindSelected(MediaKind),
    /// User picked a resolution cap.
    ResolutionSelected(Resolution),
    /// User clicked "Load Cookies.txt".
    CookiePickRequested,
    /// Cookie-file dialog resolved.
    CookiePicked(PathBuf),
    /// Cookie-file dialog dismissed or file cleared.
    CookieCleared,
    /// User clicked "Download".
    DownloadClicked,
    /// Destination-directory dialog resolved.
    DownloadDirChosen(PathBuf),
    /// User clicked "Update yt-dlp" on the menu.
    UpdateToolClicked,
    /// User clicked "Back" on a child screen.
    BackRequested,
    /// User clicked "Exit".
    ExitRequested,
    /// Progress from the running job.
    JobProgress {
        message: String,
        style: StatusStyle,
        percent: Option<u8>,
    },
    /// Terminal outcome of the running job.
    JobFinished {
        result: JobResultKind,
        message: String,
    },
    /// Restore persisted form settings at startup.
    SettingsRestored {
        kind: MediaKind,
        resolution: Resolution,
        cookie_file: Option<PathBuf>,
    },
    /// UI tick; drives transient-status expiry.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
