use eframe::egui;
use medley_core::{AppViewModel, ConversionKind, Msg};

use super::{navigation_row, status_section, style_color};

const VIDEO_KINDS: [ConversionKind; 4] = [
    ConversionKind::Mp4ToAvi,
    ConversionKind::AviToMp4,
    ConversionKind::MkvToMp4,
    ConversionKind::Mp4ToMkv,
];

const AUDIO_KINDS: [ConversionKind; 4] = [
    ConversionKind::WavToMp3,
    ConversionKind::Mp3ToWav,
    ConversionKind::M4aToMp3,
    ConversionKind::Mp3ToM4a,
];

pub fn render(ui: &mut egui::Ui, view: &AppViewModel, out: &mut Vec<Msg>) {
    ui.vertical_centered(|ui| {
        ui.heading("File Converter");
    });
    ui.add_space(8.0);

    let enabled = !view.busy && view.converter_tool_error.is_none();

    ui.label("Video Conversion");
    kind_grid(ui, "video_conversions", &VIDEO_KINDS, enabled, out);
    ui.add_space(8.0);

    ui.label("Audio Conversion");
    kind_grid(ui, "audio_conversions", &AUDIO_KINDS, enabled, out);
    ui.add_space(8.0);

    ui.label("Video to Audio");
    if super::wide_button(ui, enabled, ConversionKind::ExtractAudio.label()) {
        out.push(Msg::ConversionPicked(ConversionKind::ExtractAudio));
    }

    ui.add_space(10.0);
    status_section(ui, view);

    if let Some(reason) = &view.converter_tool_error {
        ui.label(
            egui::RichText::new(reason.as_str())
                .color(style_color(medley_core::StatusStyle::Danger)),
        );
    }

    navigation_row(ui, view, out);
}

fn kind_grid(
    ui: &mut egui::Ui,
    id: &str,
    kinds: &[ConversionKind],
    enabled: bool,
    out: &mut Vec<Msg>,
) {
    let column_width = (ui.available_width() - 12.0) / 2.0;
    egui::Grid::new(id)
        .num_columns(2)
        .min_col_width(column_width)
        .show(ui, |ui| {
            for row in kinds.chunks(2) {
                for kind in row {
                    let button =
                        egui::Button::new(kind.label()).min_size([column_width, 28.0].into());
                    if ui.add_enabled(enabled, button).clicked() {
                        out.push(Msg::ConversionPicked(*kind));
                    }
                }
                ui.end_row();
            }
        });
}
