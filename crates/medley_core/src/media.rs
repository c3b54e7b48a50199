use std::path::Path;

/// File-dialog filter: a display name plus the extensions it matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileFilter {
    pub name: &'static str,
    pub extensions: &'static [&'static str],
}

/// The fixed set of conversions the converter screen offers.
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
    pub const ALL: [ConversionKind; 9] = [
        ConversionKind::Mp4ToAvi,
        ConversionKind::AviToMp4,
        ConversionKind::MkvToMp4,
        ConversionKind::Mp4ToMkv,
        ConversionKind::WavToMp3,
        ConversionKind::Mp3ToWav,
        ConversionKind::M4aToMp3,
        ConversionKind::Mp3ToM4a,
        ConversionKind::ExtractAudio,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ConversionKind::Mp4ToAvi => "MP4 to AVI",
            ConversionKind::AviToMp4 => "AVI to MP4",
            ConversionKind::MkvToMp4 => "MKV to MP4",
            ConversionKind::Mp4ToMkv => "MP4 to MKV",
            ConversionKind::WavToMp3 => "WAV to MP3",
            ConversionKind::Mp3ToWav => "MP3 to WAV",
            ConversionKind::M4aToMp3 => "M4A to MP3",
            ConversionKind::Mp3ToM4a => "MP3 to M4A",
            ConversionKind::ExtractAudio => "Extract Audio (to MP3)",
        }
    }

    /// Filter for the open-file dialog.
    pub fn source_filter(&self) -> FileFilter {
        match self {
            ConversionKind::Mp4ToAvi | ConversionKind::Mp4ToMkv => FileFilter {
                name: "MP4 Files",
                extensions: &["mp4"],
            },
            ConversionKind::AviToMp4 => FileFilter {
                name: "AVI Files",
                extensions: &["avi"],
            },
            ConversionKind::MkvToMp4 => FileFilter {
                name: "MKV Files",
                extensions: &["mkv"],
            },
            ConversionKind::WavToMp3 => FileFilter {
                name: "WAV Files",
                extensions: &["wav"],
            },
            ConversionKind::Mp3ToWav | ConversionKind::Mp3ToM4a => FileFilter {
                name: "MP3 Files",
                extensions: &["mp3"],
            },
            ConversionKind::M4aToMp3 => FileFilter {
                name: "M4A Files",
                extensions: &["m4a"],
            },
            ConversionKind::ExtractAudio => FileFilter {
                name: "Video Files",
                extensions: &["mp4", "avi", "mkv"],
            },
        }
    }

    /// Filter for the save-file dialog.
    pub fn target_filter(&self) -> FileFilter {
        match self {
            ConversionKind::Mp4ToAvi => FileFilter {
                name: "AVI Files",
                extensions: &["avi"],
            },
            ConversionKind::AviToMp4 | ConversionKind::MkvToMp4 => FileFilter {
                name: "MP4 Files",
                extensions: &["mp4"],
            },
            ConversionKind::Mp4ToMkv => FileFilter {
                name: "MKV Files",
                extensions: &["mkv"],
            },
            ConversionKind::WavToMp3
            | ConversionKind::M4aToMp3
            | ConversionKind::ExtractAudio => FileFilter {
                name: "MP3 Files",
                extensions: &["mp3"],
            },
            ConversionKind::Mp3ToWav => FileFilter {
                name: "WAV Files",
                extensions: &["wav"],
            },
            ConversionKind::Mp3ToM4a => FileFilter {
                name: "M4A Files",
                extensions: &["m4a"],
            },
        }
    }

    /// Default extension appended when the user omits one in the save dialog.
    pub fn target_extension(&self) -> &'static str {
        self.target_filter().extensions[0]
    }
}

/// What the downloader should fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MediaKind {
    #[default]
    Video,
    AudioMp3,
}

impl MediaKind {
    pub fn label(&self) -> &'static str {
        match self {
            MediaKind::Video => "Video",
            MediaKind::AudioMp3 => "Audio (MP3)",
        }
    }
}

/// Resolution cap for video downloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Resolution {
    Best,
    #[default]
    P1080,
    P720,
    P480,
}

impl Resolution {
    pub const ALL: [Resolution; 4] = [
        Resolution::Best,
        Resolution::P1080,
        Resolution::P720,
        Resolution::P480,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Resolution::Best => "Best",
            Resolution::P1080 => "1080p",
            Resolution::P720 => "720p",
            Resolution::P480 => "480p",
        }
    }

    /// Height cap in pixels; `None` means unconstrained.
    pub fn height_cap(&self) -> Option<u16> {
        match self {
            Resolution::Best => None,
            Resolution::P1080 => Some(1080),
            Resolution::P720 => Some(720),
            Resolution::P480 => Some(480),
        }
    }
}

/// Basename shown next to a loaded cookie file.
pub(crate) fn file_display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
