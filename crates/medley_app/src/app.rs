use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use chrono::Utc;
use eframe::egui;
use engine_logging::engine_info;
use medley_core::{update, AppState, Effect, JobResultKind, Msg, Resolution, Screen};
use medley_engine::{
    locate_tool, EngineEvent, JobId, SessionHandle, FFMPEG_TOOL, YTDLP_TOOL,
};

use crate::config::AppConfig;
use crate::effects::{completion_msg, progress_msg, EffectRunner};
use crate::persistence::{self, Settings};
use crate::ui;

/// The job currently in flight, with the session that owns it. Engine
/// events for any other job, or for a closed session, are stale and must
/// not reach the state machine.
struct ActiveJob {
    job_id: JobId,
    session: SessionHandle,
}

#[derive(Default)]
struct ToolPaths {
    ffmpeg: Option<PathBuf>,
    ytdlp: Option<PathBuf>,
}

pub struct MedleyApp {
    config: AppConfig,
    state: AppState,
    msg_tx: mpsc::Sender<Msg>,
    msg_rx: mpsc::Receiver<Msg>,
    runner: EffectRunner,
    menu_session: SessionHandle,
    child_session: Option<SessionHandle>,
    active_job: Option<ActiveJob>,
    tools: ToolPaths,
    settings: Settings,
    settings_dir: PathBuf,
    url_buffer: String,
    egui_ctx: egui::Context,
    shutting_down: bool,
}

impl MedleyApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::dark());

        let settings_dir =
            std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let settings = persistence::load_settings(&settings_dir);

        let (msg_tx, msg_rx) = mpsc::channel::<Msg>();

        // Background tick to drive transient-status expiry and throttle
        // repaints while a job is running.
        {
            let tick_tx = msg_tx.clone();
            let ctx = cc.egui_ctx.clone();
            thread::spawn(move || {
                let interval = Duration::from_millis(75);
                while tick_tx.send(Msg::Tick).is_ok() {
                    ctx.request_repaint();
                    thread::sleep(interval);
                }
            });
        }

        let mut app = Self {
            config,
            state: AppState::new(),
            msg_tx,
            msg_rx,
            runner: EffectRunner::new(),
            menu_session: SessionHandle::new(),
            child_session: None,
            active_job: None,
            tools: ToolPaths::default(),
            settings: settings.clone(),
            settings_dir,
            url_buffer: String::new(),
            egui_ctx: cc.egui_ctx.clone(),
            shutting_down: false,
        };

        app.dispatch(Msg::SettingsRestored {
            kind: if settings.audio_only {
                medley_core::MediaKind::AudioMp3
            } else {
                medley_core::MediaKind::Video
            },
            resolution: resolution_from_cap(settings.resolution_cap),
            cookie_file: settings.cookie_file,
        });
        app
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        for effect in effects {
            self.run_effect(effect);
        }
    }

    fn process_pending_messages(&mut self) {
        let mut inbox = Vec::new();
        while let Ok(msg) = self.msg_rx.try_recv() {
            inbox.push(msg);
        }
        for msg in inbox {
            self.dispatch(msg);
        }
    }

    /// Forwards engine events for the active job only; everything else is
    /// stale (finished job, or a session the user already closed).
    fn drain_engine_events(&mut self) {
        while let Some(event) = self.runner.try_recv() {
            match event {
                EngineEvent::Progress { job_id, event } => {
                    if self.event_is_current(job_id) {
                        self.dispatch(progress_msg(event));
                    }
                }
                EngineEvent::JobCompleted { job_id, outcome } => {
                    let current = self.event_is_current(job_id);
                    if self
                        .active_job
                        .as_ref()
                        .is_some_and(|active| active.job_id == job_id)
                    {
                        self.active_job = None;
                    }
                    if current {
                        self.dispatch(completion_msg(outcome));
                    }
                }
            }
        }
    }

    fn event_is_current(&self, job_id: JobId) -> bool {
        self.active_job
            .as_ref()
            .is_some_and(|active| active.job_id == job_id && !active.session.is_closing())
    }

    fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::ProbeConverterTool => {
                self.child_session = Some(SessionHandle::new());
                match locate_tool(FFMPEG_TOOL, None) {
                    Ok(path) => self.tools.ffmpeg = Some(path),
                    Err(err) => self.dispatch(Msg::ConverterToolUnavailable {
                        reason: err.message,
                    }),
                }
            }
            Effect::ProbeDownloaderTool => match locate_tool(YTDLP_TOOL, None) {
                Ok(path) => {
                    self.tools.ytdlp = Some(path);
                    self.child_session = Some(SessionHandle::new());
                }
                Err(err) => self.dispatch(Msg::ScreenOpenFailed {
                    reason: err.message,
                }),
            },
            Effect::ChooseConversionFiles { kind } => self.choose_conversion_files(kind),
            Effect::RunConversion {
                kind,
                input,
                output,
            } => {
                let (Some(tool), Some(session)) =
                    (self.tools.ffmpeg.clone(), self.child_session.clone())
                else {
                    self.dispatch(Msg::JobFinished {
                        result: JobResultKind::Failed,
                        message: "Error: transcoder unavailable".to_string(),
                    });
                    return;
                };
                let job_id = self
                    .runner
                    .submit_conversion(&session, tool, kind, input, output);
                self.active_job = Some(ActiveJob { job_id, session });
            }
            Effect::ChooseDownloadDir => {
                let mut dialog =
                    rfd::FileDialog::new().set_title("Select Download Directory");
                if let Some(dir) = &self.settings.last_dest_dir {
                    dialog = dialog.set_directory(dir);
                }
                match dialog.pick_folder() {
                    Some(dir) => {
                        self.settings.last_dest_dir = Some(dir.clone());
                        self.dispatch(Msg::DownloadDirChosen(dir));
                    }
                    None => self.dispatch(Msg::SelectionCancelled),
                }
            }
            Effect::ChooseCookieFile => {
                match rfd::FileDialog::new()
                    .set_title("Select cookies.txt file")
                    .add_filter("Text Files", &["txt"])
                    .pick_file()
                {
                    Some(path) => self.dispatch(Msg::CookiePicked(path)),
                    None => self.dispatch(Msg::CookieCleared),
                }
            }
            Effect::RunDownload {
                url,
                dest_dir,
                kind,
                resolution,
                cookie_file,
            } => {
                let (Some(tool), Some(session)) =
                    (self.tools.ytdlp.clone(), self.child_session.clone())
                else {
                    self.dispatch(Msg::JobFinished {
                        result: JobResultKind::Failed,
                        message: "Error: extraction tool unavailable".to_string(),
                    });
                    return;
                };
                let job_id = self.runner.submit_download(
                    &session,
                    tool,
                    url,
                    dest_dir,
                    kind,
                    resolution,
                    cookie_file,
                );
                self.active_job = Some(ActiveJob { job_id, session });
            }
            Effect::RunToolUpdate => match locate_tool(YTDLP_TOOL, None) {
                Ok(tool) => {
                    self.settings.last_update_check = Some(Utc::now());
                    let session = self.menu_session.clone();
                    let job_id = self.runner.submit_tool_update(&session, tool);
                    self.active_job = Some(ActiveJob { job_id, session });
                }
                Err(err) => self.dispatch(Msg::JobFinished {
                    result: JobResultKind::Failed,
                    message: format!("Error: {}", err.message),
                }),
            },
            Effect::RevealMenu => {
                if let Some(session) = self.child_session.take() {
                    session.request_close();
                }
            }
            Effect::Quit => {
                self.shutdown();
                self.egui_ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
        }
    }

    /// Both dialogs run synchronously on the interactive thread, before any
    /// job is submitted.
    fn choose_conversion_files(&mut self, kind: medley_core::ConversionKind) {
        let source = kind.source_filter();
        let Some(input) = rfd::FileDialog::new()
            .set_title(format!("Select {} file", source.name))
            .add_filter(source.name, source.extensions)
            .pick_file()
        else {
            self.dispatch(Msg::SelectionCancelled);
            return;
        };

        let target = kind.target_filter();
        let mut dialog = rfd::FileDialog::new()
            .set_title("Save As")
            .add_filter(target.name, target.extensions);
        if let Some(stem) = input.file_stem() {
            dialog = dialog.set_file_name(format!(
                "{}.{}",
                stem.to_string_lossy(),
                kind.target_extension()
            ));
        }
        let Some(output) = dialog.save_file() else {
            self.dispatch(Msg::SelectionCancelled);
            return;
        };

        self.dispatch(Msg::ConversionInputsChosen {
            kind,
            input,
            output,
        });
    }

    /// Requests close on every open session, then persists settings.
    /// Idempotent: the window-close path and the Exit button both land here.
    fn shutdown(&mut self) {
        if self.shutting_down {
            return;
        }
        self.shutting_down = true;
        engine_info!("shutting down");

        if let Some(session) = self.child_session.take() {
            session.request_close();
        }
        self.menu_session.request_close();

        let view = self.state.view();
        self.settings.audio_only = view.media_kind == medley_core::MediaKind::AudioMp3;
        self.settings.resolution_cap = view.resolution.height_cap();
        self.settings.cookie_file = view.cookie_file;
        persistence::save_settings(&self.settings_dir, &self.settings);
    }
}

impl eframe::App for MedleyApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_engine_events();
        self.process_pending_messages();

        let view = self.state.view();
        let mut out: Vec<Msg> = Vec::new();
        egui::CentralPanel::default().show(ctx, |ui| match view.screen {
            Screen::Menu => ui::menu::render(ui, self.config.app_name, &view, &mut out),
            Screen::Converter => ui::converter::render(ui, &view, &mut out),
            Screen::Downloader => {
                ui::downloader::render(ui, &view, &mut self.url_buffer, &mut out)
            }
        });
        for msg in out {
            self.dispatch(msg);
        }

        if self.state.consume_dirty() {
            ctx.request_repaint();
        }

        if ctx.input(|i| i.viewport().close_requested()) {
            self.shutdown();
        }
    }
}

fn resolution_from_cap(cap: Option<u16>) -> Resolution {
    match cap {
        None => Resolution::Best,
        Some(720) => Resolution::P720,
        Some(480) => Resolution::P480,
        Some(_) => Resolution::P1080,
    }
}
