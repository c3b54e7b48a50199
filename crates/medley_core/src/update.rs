use crate::{AppState, Effect, JobPhase, JobResultKind, Msg, Screen, StatusStyle};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::ConverterOpenRequested => {
            if state.phase() == JobPhase::Running || state.screen() != Screen::Menu {
                return (state, Vec::new());
            }
            state.show_screen(Screen::Converter);
            state.set_status("Waiting for conversion...", StatusStyle::Info, None);
            vec![Effect::ProbeConverterTool]
        }
        Msg::DownloaderOpenRequested => {
            if state.phase() == JobPhase::Running || state.screen() != Screen::Menu {
                return (state, Vec::new());
            }
            state.show_screen(Screen::Downloader);
            state.set_status("Waiting for download...", StatusStyle::Info, None);
            vec![Effect::ProbeDownloaderTool]
        }
        Msg::ConverterToolUnavailable { reason } => {
            state.set_converter_tool_error(reason.clone());
            state.set_status(reason, StatusStyle::Danger, None);
            Vec::new()
        }
        Msg::ScreenOpenFailed { reason } => {
            // The menu must tolerate being revealed when the child never
            // fully initialized.
            state.show_screen(Screen::Menu);
            state.set_status(reason, StatusStyle::Danger, None);
            Vec::new()
        }
        Msg::ConversionPicked(kind) => {
            if state.phase() == JobPhase::Running
                || state.screen() != Screen::Converter
                || !state.converter_available()
            {
                return (state, Vec::new());
            }
            vec![Effect::ChooseConversionFiles { kind }]
        }
        Msg::ConversionInputsChosen {
            kind,
            input,
            output,
        } => {
            if state.phase() == JobPhase::Running {
                return (state, Vec::new());
            }
            state.start_job();
            let name = crate::media::file_display_name(&input);
            state.set_status(
                format!("Processing '{name}'..."),
                StatusStyle::Info,
                None,
            );
            vec![Effect::RunConversion {
                kind,
                input,
                output,
            }]
        }
        Msg::SelectionCancelled => {
            state.set_status("Operation cancelled", StatusStyle::Warning, None);
            Vec::new()
        }
        Msg::UrlEdited(url) => {
            state.set_url_input(url);
            Vec::new()
        }
        Msg::KindSelected(kind) => {
            state.set_media_kind(kind);
            Vec::new()
        }
        Msg::ResolutionSelected(resolution) => {
            state.set_resolution(resolution);
            Vec::new()
        }
        Msg::CookiePickRequested => {
            if state.screen() != Screen::Downloader {
                return (state, Vec::new());
            }
            vec![Effect::ChooseCookieFile]
        }
        Msg::CookiePicked(path) => {
            let name = crate::media::file_display_name(&path);
            state.set_cookie_file(Some(path));
            state.set_status(
                format!("Cookie file loaded: {name}"),
                StatusStyle::Success,
                None,
            );
            Vec::new()
        }
        Msg::CookieCleared => {
            state.set_cookie_file(None);
            state.set_status("No cookies loaded", StatusStyle::Warning, None);
            Vec::new()
        }
        Msg::DownloadClicked => {
            if state.phase() == JobPhase::Running || state.screen() != Screen::Downloader {
                return (state, Vec::new());
            }
            let url = state.url_input().trim().to_string();
            if url.is_empty() {
                state.set_status("Please enter a URL", StatusStyle::Danger, None);
                return (state, Vec::new());
            }
            if !looks_like_url(&url) {
                state.set_status(
                    format!("Not a valid URL: {url}"),
                    StatusStyle::Danger,
                    None,
                );
                return (state, Vec::new());
            }
            vec![Effect::ChooseDownloadDir]
        }
        Msg::DownloadDirChosen(dest_dir) => {
            if state.phase() == JobPhase::Running {
                return (state, Vec::new());
            }
            let url = state.url_input().trim().to_string();
            let (kind, resolution, cookie_file) = state.download_params();
            state.start_job();
            state.set_status("Starting download...", StatusStyle::Info, Some(0));
            vec![Effect::RunDownload {
                url,
                dest_dir,
                kind,
                resolution,
                cookie_file,
            }]
        }
        Msg::UpdateToolClicked => {
            if state.phase() == JobPhase::Running || state.screen() != Screen::Menu {
                return (state, Vec::new());
            }
            state.start_job();
            state.set_status("Checking for updates...", StatusStyle::Info, None);
            vec![Effect::RunToolUpdate]
        }
        Msg::BackRequested => {
            if state.phase() == JobPhase::Running || state.screen() == Screen::Menu {
                return (state, Vec::new());
            }
            state.show_screen(Screen::Menu);
            vec![Effect::RevealMenu]
        }
        Msg::ExitRequested => vec![Effect::Quit],
        Msg::JobProgress {
            message,
            style,
            percent,
        } => {
            // Progress for a job that already finished is stale; drop it.
            if state.phase() == JobPhase::Running {
                state.set_status(message, style, percent);
            }
            Vec::new()
        }
        Msg::JobFinished { result, message } => {
            if state.phase() != JobPhase::Running {
                return (state, Vec::new());
            }
            state.finish_job();
            let style = terminal_style(result);
            let percent = match result {
                JobResultKind::Succeeded => Some(100),
                _ => None,
            };
            if state.screen() == Screen::Menu && result == JobResultKind::Succeeded {
                // Updater success is transient, per the original tool.
                state.set_transient_status(message, style);
            } else {
                state.set_status(message, style, percent);
            }
            Vec::new()
        }
        Msg::SettingsRestored {
            kind,
            resolution,
            cookie_file,
        } => {
            // Silent restore: no status-line chatter at startup.
            state.set_media_kind(kind);
            state.set_resolution(resolution);
            state.set_cookie_file(cookie_file);
            Vec::new()
        }
        Msg::Tick => {
            state.tick();
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn terminal_style(result: JobResultKind) -> StatusStyle {
    match result {
        JobResultKind::Succeeded => StatusStyle::Success,
        JobResultKind::Failed => StatusStyle::Danger,
        JobResultKind::Cancelled => StatusStyle::Warning,
    }
}

/// Accepts anything `yt-dlp` itself would: an absolute URL, or a bare
/// host/path that parses once a scheme is assumed.
fn looks_like_url(input: &str) -> bool {
    if input.contains(char::is_whitespace) {
        return false;
    }
    url::Url::parse(input).is_ok() || url::Url::parse(&format!("https://{input}")).is_ok()
}
