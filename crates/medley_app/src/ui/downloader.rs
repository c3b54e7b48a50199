use eframe::egui;
use medley_core::{AppViewModel, MediaKind, Msg, Resolution};

use super::{navigation_row, status_section, style_color, wide_button};

pub fn render(
    ui: &mut egui::Ui,
    view: &AppViewModel,
    url_buffer: &mut String,
    out: &mut Vec<Msg>,
) {
    ui.vertical_centered(|ui| {
        ui.heading("Video Downloader");
    });
    ui.add_space(8.0);

    ui.label("Video URL:");
    let response = ui.add_enabled(
        !view.busy,
        egui::TextEdit::singleline(url_buffer).desired_width(f32::INFINITY),
    );
    if response.changed() {
        out.push(Msg::UrlEdited(url_buffer.clone()));
    }
    ui.add_space(8.0);

    ui.label("Download Type");
    ui.add_enabled_ui(!view.busy, |ui| {
        ui.horizontal(|ui| {
            for kind in [MediaKind::Video, MediaKind::AudioMp3] {
                if ui.radio(view.media_kind == kind, kind.label()).clicked() {
                    out.push(Msg::KindSelected(kind));
                }
            }
        });
    });

    if view.media_kind == MediaKind::Video {
        ui.add_space(4.0);
        ui.add_enabled_ui(!view.busy, |ui| {
            egui::ComboBox::from_label("Resolution")
                .selected_text(view.resolution.label())
                .show_ui(ui, |ui| {
                    for resolution in Resolution::ALL {
                        if ui
                            .selectable_label(view.resolution == resolution, resolution.label())
                            .clicked()
                        {
                            out.push(Msg::ResolutionSelected(resolution));
                        }
                    }
                });
        });
    }
    ui.add_space(8.0);

    ui.group(|ui| {
        ui.label("Bot Prevention (Recommended)");
        ui.horizontal(|ui| {
            match &view.cookie_file_name {
                Some(name) => {
                    ui.label(
                        egui::RichText::new(format!("Active: {name}"))
                            .color(style_color(medley_core::StatusStyle::Success)),
                    );
                }
                None => {
                    ui.label(
                        egui::RichText::new("Status: No cookies loaded.")
                            .color(style_color(medley_core::StatusStyle::Warning)),
                    );
                }
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if view.cookie_file_name.is_some() && ui.button("Clear").clicked() {
                    out.push(Msg::CookieCleared);
                }
                if ui.button("Load Cookies.txt").clicked() {
                    out.push(Msg::CookiePickRequested);
                }
            });
        });
    });
    ui.add_space(8.0);

    ui.group(|ui| {
        ui.label("Download Progress");
        status_section(ui, view);
    });
    ui.add_space(8.0);

    if wide_button(ui, !view.busy, "Download") {
        out.push(Msg::DownloadClicked);
    }

    navigation_row(ui, view, out);
}
