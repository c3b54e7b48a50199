use std::path::PathBuf;
use std::sync::Once;

use medley_core::{
    update, AppState, ConversionKind, Effect, MediaKind, Msg, Resolution, Screen, StatusStyle,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

fn open_downloader(state: AppState) -> AppState {
    let (state, effects) = update(state, Msg::DownloaderOpenRequested);
    assert_eq!(effects, vec![Effect::ProbeDownloaderTool]);
    state
}

#[test]
fn menu_opens_converter_and_probes_tool() {
    init_logging();
    let state = AppState::new();

    let (mut state, effects) = update(state, Msg::ConverterOpenRequested);

    assert_eq!(state.view().screen, Screen::Converter);
    assert_eq!(effects, vec![Effect::ProbeConverterTool]);
    assert!(state.consume_dirty());
}

#[test]
fn missing_converter_tool_disables_triggers() {
    init_logging();
    let state = AppState::new();
    let (state, _effects) = update(state, Msg::ConverterOpenRequested);

    let (state, effects) = update(
        state,
        Msg::ConverterToolUnavailable {
            reason: "ffmpeg not found on PATH".to_string(),
        },
    );

    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(
        view.converter_tool_error.as_deref(),
        Some("ffmpeg not found on PATH")
    );
    assert_eq!(view.status.style, StatusStyle::Danger);

    // Conversion clicks are ignored while the tool is missing.
    let (_state, effects) = update(state, Msg::ConversionPicked(ConversionKind::Mp4ToAvi));
    assert!(effects.is_empty());
}

#[test]
fn failed_child_construction_reveals_menu_without_fault() {
    init_logging();
    let state = AppState::new();
    let (state, _effects) = update(state, Msg::DownloaderOpenRequested);

    let (state, effects) = update(
        state,
        Msg::ScreenOpenFailed {
            reason: "yt-dlp not found on PATH".to_string(),
        },
    );

    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.screen, Screen::Menu);
    assert_eq!(view.status.style, StatusStyle::Danger);
    assert!(view.status.message.contains("yt-dlp"));
}

#[test]
fn conversion_pick_opens_dialogs_then_submits() {
    init_logging();
    let state = AppState::new();
    let (state, _effects) = update(state, Msg::ConverterOpenRequested);

    let (state, effects) = update(state, Msg::ConversionPicked(ConversionKind::MkvToMp4));
    assert_eq!(
        effects,
        vec![Effect::ChooseConversionFiles {
            kind: ConversionKind::MkvToMp4
        }]
    );

    let (state, effects) = update(
        state,
        Msg::ConversionInputsChosen {
            kind: ConversionKind::MkvToMp4,
            input: PathBuf::from("in.mkv"),
            output: PathBuf::from("out.mp4"),
        },
    );
    assert_eq!(
        effects,
        vec![Effect::RunConversion {
            kind: ConversionKind::MkvToMp4,
            input: PathBuf::from("in.mkv"),
            output: PathBuf::from("out.mp4"),
        }]
    );
    let view = state.view();
    assert!(view.busy);
    assert!(view.status.message.contains("in.mkv"));
}

#[test]
fn dialog_dismissal_is_a_neutral_warning() {
    init_logging();
    let state = AppState::new();
    let (state, _effects) = update(state, Msg::ConverterOpenRequested);

    let (state, effects) = update(state, Msg::SelectionCancelled);

    assert!(effects.is_empty());
    assert!(!state.view().busy);
    assert_eq!(state.view().status.style, StatusStyle::Warning);
    assert_eq!(state.view().status.message, "Operation cancelled");
}

#[test]
fn empty_url_is_rejected_before_any_dialog() {
    init_logging();
    let state = open_downloader(AppState::new());

    let (state, effects) = update(state, Msg::DownloadClicked);

    assert!(effects.is_empty());
    assert!(!state.view().busy);
    assert_eq!(state.view().status.style, StatusStyle::Danger);
    assert_eq!(state.view().status.message, "Please enter a URL");
}

#[test]
fn valid_url_asks_for_destination_then_submits() {
    init_logging();
    let state = open_downloader(AppState::new());
    let (state, _) = update(
        state,
        Msg::UrlEdited("https://example.com/watch?v=abc".to_string()),
    );
    let (state, _) = update(state, Msg::KindSelected(MediaKind::Video));
    let (state, _) = update(state, Msg::ResolutionSelected(Resolution::P720));

    let (state, effects) = update(state, Msg::DownloadClicked);
    assert_eq!(effects, vec![Effect::ChooseDownloadDir]);
    assert!(!state.view().busy);

    let (state, effects) = update(state, Msg::DownloadDirChosen(PathBuf::from("/tmp/out")));
    assert_eq!(
        effects,
        vec![Effect::RunDownload {
            url: "https://example.com/watch?v=abc".to_string(),
            dest_dir: PathBuf::from("/tmp/out"),
            kind: MediaKind::Video,
            resolution: Resolution::P720,
            cookie_file: None,
        }]
    );
    let view = state.view();
    assert!(view.busy);
    assert_eq!(view.status.percent, Some(0));
}

#[test]
fn submission_while_running_is_rejected_not_queued() {
    init_logging();
    let state = open_downloader(AppState::new());
    let (state, _) = update(state, Msg::UrlEdited("https://example.com/a".to_string()));
    let (state, _) = update(state, Msg::DownloadClicked);
    let (state, _) = update(state, Msg::DownloadDirChosen(PathBuf::from("/tmp")));
    assert!(state.view().busy);

    let (state, effects) = update(state, Msg::DownloadClicked);
    assert!(effects.is_empty());

    // Navigation away is also blocked while a job runs.
    let (state, effects) = update(state, Msg::BackRequested);
    assert!(effects.is_empty());
    assert_eq!(state.view().screen, Screen::Downloader);
}

#[test]
fn cookie_load_and_clear_update_the_status_line() {
    init_logging();
    let state = open_downloader(AppState::new());

    let (state, effects) = update(state, Msg::CookiePickRequested);
    assert_eq!(effects, vec![Effect::ChooseCookieFile]);

    let (state, _) = update(
        state,
        Msg::CookiePicked(PathBuf::from("/home/user/cookies.txt")),
    );
    let view = state.view();
    assert_eq!(view.cookie_file_name.as_deref(), Some("cookies.txt"));
    assert_eq!(view.status.style, StatusStyle::Success);

    let (state, _) = update(state, Msg::CookieCleared);
    let view = state.view();
    assert_eq!(view.cookie_file_name, None);
    assert_eq!(view.status.style, StatusStyle::Warning);
}

#[test]
fn back_reveals_menu_and_emits_reveal_effect() {
    init_logging();
    let state = open_downloader(AppState::new());

    let (state, effects) = update(state, Msg::BackRequested);
    assert_eq!(state.view().screen, Screen::Menu);
    assert_eq!(effects, vec![Effect::RevealMenu]);

    // Back on the menu itself is a no-op.
    let (state, effects) = update(state, Msg::BackRequested);
    assert_eq!(state.view().screen, Screen::Menu);
    assert!(effects.is_empty());
}

#[test]
fn exit_always_quits() {
    init_logging();
    let state = AppState::new();
    let (state, effects) = update(state, Msg::ExitRequested);
    assert_eq!(effects, vec![Effect::Quit]);

    // Even mid-job.
    let state = open_downloader(state);
    let (state, _) = update(state, Msg::UrlEdited("https://example.com/a".to_string()));
    let (state, _) = update(state, Msg::DownloadClicked);
    let (state, _) = update(state, Msg::DownloadDirChosen(PathBuf::from("/tmp")));
    let (_state, effects) = update(state, Msg::ExitRequested);
    assert_eq!(effects, vec![Effect::Quit]);
}

#[test]
fn restored_settings_populate_the_form_silently() {
    init_logging();
    let state = AppState::new();

    let (mut state, effects) = update(
        state,
        Msg::SettingsRestored {
            kind: MediaKind::AudioMp3,
            resolution: Resolution::Best,
            cookie_file: Some(PathBuf::from("/home/user/cookies.txt")),
        },
    );

    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.media_kind, MediaKind::AudioMp3);
    assert_eq!(view.resolution, Resolution::Best);
    assert_eq!(view.cookie_file_name.as_deref(), Some("cookies.txt"));
    // No status-line chatter at startup.
    assert_eq!(view.status.message, "Ready");
    assert!(state.consume_dirty());
}

#[test]
fn update_click_starts_job_on_menu_only() {
    init_logging();
    let state = AppState::new();

    let (state, effects) = update(state, Msg::UpdateToolClicked);
    assert_eq!(effects, vec![Effect::RunToolUpdate]);
    assert!(state.view().busy);

    // A second click while the updater runs is rejected.
    let (_state, effects) = update(state, Msg::UpdateToolClicked);
    assert!(effects.is_empty());
}
