use std::path::PathBuf;
use std::sync::Once;

use medley_core::{
    update, AppState, JobResultKind, Msg, Screen, StatusStyle, STATUS_TTL_TICKS,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

fn running_download(state: AppState) -> AppState {
    let (state, _) = update(state, Msg::DownloaderOpenRequested);
    let (state, _) = update(state, Msg::UrlEdited("https://example.com/v".to_string()));
    let (state, _) = update(state, Msg::DownloadClicked);
    let (state, _) = update(state, Msg::DownloadDirChosen(PathBuf::from("/tmp")));
    assert!(state.view().busy);
    state
}

#[test]
fn progress_updates_the_status_line_in_order() {
    init_logging();
    let mut state = running_download(AppState::new());
    state.consume_dirty();

    let (mut state, effects) = update(
        state,
        Msg::JobProgress {
            message: "Downloading: 25.0% | Speed: 1.2MiB/s | ETA: 00:30".to_string(),
            style: StatusStyle::Info,
            percent: Some(25),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.view().status.percent, Some(25));
    assert!(state.consume_dirty());

    let (state, _) = update(
        state,
        Msg::JobProgress {
            message: "Download finished. Finalizing (merging)...".to_string(),
            style: StatusStyle::Info,
            percent: Some(100),
        },
    );
    assert_eq!(state.view().status.percent, Some(100));
}

#[test]
fn percent_above_hundred_is_clamped_for_display() {
    init_logging();
    let state = running_download(AppState::new());

    let (state, _) = update(
        state,
        Msg::JobProgress {
            message: "Downloading".to_string(),
            style: StatusStyle::Info,
            percent: Some(150),
        },
    );
    assert_eq!(state.view().status.percent, Some(100));
}

#[test]
fn progress_without_percent_keeps_message_only() {
    init_logging();
    let state = running_download(AppState::new());

    let (state, _) = update(
        state,
        Msg::JobProgress {
            message: "Downloading: 3.1MiB at 900KiB/s".to_string(),
            style: StatusStyle::Info,
            percent: None,
        },
    );
    let view = state.view();
    assert_eq!(view.status.percent, None);
    assert_eq!(view.status.message, "Downloading: 3.1MiB at 900KiB/s");
}

#[test]
fn progress_while_idle_is_stale_and_dropped() {
    init_logging();
    let mut state = AppState::new();
    state.consume_dirty();
    let before = state.view();

    let (mut state, _) = update(
        state,
        Msg::JobProgress {
            message: "late".to_string(),
            style: StatusStyle::Info,
            percent: Some(10),
        },
    );
    assert_eq!(state.view().status, before.status);
    assert!(!state.consume_dirty());
}

#[test]
fn failure_outcome_restores_idle_with_danger_status() {
    init_logging();
    let state = running_download(AppState::new());

    let (state, _) = update(
        state,
        Msg::JobFinished {
            result: JobResultKind::Failed,
            message: "Error: codec not found".to_string(),
        },
    );
    let view = state.view();
    assert!(!view.busy);
    assert_eq!(view.status.style, StatusStyle::Danger);
    assert!(view.status.message.contains("codec not found"));
}

#[test]
fn cancelled_outcome_is_a_warning_not_a_failure() {
    init_logging();
    let state = running_download(AppState::new());

    let (state, _) = update(
        state,
        Msg::JobFinished {
            result: JobResultKind::Cancelled,
            message: "Download cancelled".to_string(),
        },
    );
    let view = state.view();
    assert!(!view.busy);
    assert_eq!(view.status.style, StatusStyle::Warning);
}

#[test]
fn success_fills_the_bar_and_reenables_triggers() {
    init_logging();
    let state = running_download(AppState::new());

    let (state, _) = update(
        state,
        Msg::JobFinished {
            result: JobResultKind::Succeeded,
            message: "Download successful".to_string(),
        },
    );
    let view = state.view();
    assert!(!view.busy);
    assert_eq!(view.status.style, StatusStyle::Success);
    assert_eq!(view.status.percent, Some(100));

    // Idle again: a new submission is accepted.
    let (_state, effects) = update(state, Msg::DownloadClicked);
    assert!(!effects.is_empty());
}

#[test]
fn finished_while_idle_is_ignored() {
    init_logging();
    let mut state = AppState::new();
    state.consume_dirty();

    let (mut state, _) = update(
        state,
        Msg::JobFinished {
            result: JobResultKind::Succeeded,
            message: "late".to_string(),
        },
    );
    assert!(!state.consume_dirty());
}

#[test]
fn updater_success_expires_after_ttl_ticks() {
    init_logging();
    let state = AppState::new();
    let (state, _) = update(state, Msg::UpdateToolClicked);
    let (state, _) = update(
        state,
        Msg::JobFinished {
            result: JobResultKind::Succeeded,
            message: "yt-dlp is up to date".to_string(),
        },
    );
    assert_eq!(state.view().screen, Screen::Menu);
    assert_eq!(state.view().status.message, "yt-dlp is up to date");

    let mut state = state;
    for _ in 0..STATUS_TTL_TICKS {
        let (next, _) = update(state, Msg::Tick);
        state = next;
    }
    assert_eq!(state.view().status.message, "Ready");
}

#[test]
fn converter_failure_is_not_transient() {
    init_logging();
    let state = AppState::new();
    let (state, _) = update(state, Msg::ConverterOpenRequested);
    let (state, _) = update(
        state,
        Msg::ConversionInputsChosen {
            kind: medley_core::ConversionKind::WavToMp3,
            input: PathBuf::from("a.wav"),
            output: PathBuf::from("a.mp3"),
        },
    );
    let (state, _) = update(
        state,
        Msg::JobFinished {
            result: JobResultKind::Failed,
            message: "Error: encoder missing".to_string(),
        },
    );

    let mut state = state;
    for _ in 0..(STATUS_TTL_TICKS * 2) {
        let (next, _) = update(state, Msg::Tick);
        state = next;
    }
    assert!(state.view().status.message.contains("encoder missing"));
}
