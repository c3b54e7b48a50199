use eframe::egui;
use medley_core::{AppViewModel, Msg};

use super::{status_section, wide_button};

pub fn render(ui: &mut egui::Ui, app_name: &str, view: &AppViewModel, out: &mut Vec<Msg>) {
    ui.vertical_centered(|ui| {
        ui.add_space(8.0);
        ui.heading(app_name);
        ui.add_space(12.0);
    });

    if wide_button(ui, !view.busy, "Video Downloader") {
        out.push(Msg::DownloaderOpenRequested);
    }
    ui.add_space(6.0);
    if wide_button(ui, !view.busy, "File Converter") {
        out.push(Msg::ConverterOpenRequested);
    }
    ui.add_space(6.0);
    if wide_button(ui, !view.busy, "Update yt-dlp") {
        out.push(Msg::UpdateToolClicked);
    }

    ui.add_space(10.0);
    status_section(ui, view);

    ui.add_space(10.0);
    if wide_button(ui, true, "Exit") {
        out.push(Msg::ExitRequested);
    }
}
