//! Screen rendering: view model in, widgets out, user intents collected as
//! core messages.

pub mod converter;
pub mod downloader;
pub mod menu;

use eframe::egui;
use medley_core::{AppViewModel, Msg, StatusStyle};

pub(crate) fn style_color(style: StatusStyle) -> egui::Color32 {
    match style {
        StatusStyle::Info => egui::Color32::LIGHT_BLUE,
        StatusStyle::Success => egui::Color32::LIGHT_GREEN,
        StatusStyle::Warning => egui::Color32::GOLD,
        StatusStyle::Danger => egui::Color32::LIGHT_RED,
    }
}

/// Status line plus progress bar, shared by every screen.
pub(crate) fn status_section(ui: &mut egui::Ui, view: &AppViewModel) {
    ui.horizontal(|ui| {
        if view.busy {
            ui.spinner();
        }
        ui.label(
            egui::RichText::new(view.status.message.as_str())
                .color(style_color(view.status.style)),
        );
    });
    if let Some(percent) = view.status.percent {
        ui.add(egui::ProgressBar::new(f32::from(percent) / 100.0).show_percentage());
    }
}

/// Back / Exit row shown on the child screens.
pub(crate) fn navigation_row(ui: &mut egui::Ui, view: &AppViewModel, out: &mut Vec<Msg>) {
    ui.separator();
    ui.horizontal(|ui| {
        if ui
            .add_enabled(!view.busy, egui::Button::new("Back"))
            .clicked()
        {
            out.push(Msg::BackRequested);
        }
        if ui.button("Exit App").clicked() {
            out.push(Msg::ExitRequested);
        }
    });
}

/// Full-width action button.
pub(crate) fn wide_button(ui: &mut egui::Ui, enabled: bool, text: &str) -> bool {
    ui.add_enabled_ui(enabled, |ui| {
        ui.add_sized(
            [ui.available_width(), 32.0],
            egui::Button::new(text),
        )
        .clicked()
    })
    .inner
}
