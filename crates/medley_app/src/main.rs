//! Medley: desktop menu for media conversion and download tools.
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod config;
mod effects;
mod logging;
mod persistence;
mod ui;

use eframe::egui;

use app::MedleyApp;
use config::AppConfig;

fn main() -> Result<(), eframe::Error> {
    logging::initialize(logging::LogDestination::Both);

    let config = AppConfig::standard();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height])
            .with_min_inner_size([420.0, 560.0]),
        ..Default::default()
    };

    eframe::run_native(
        config.app_name,
        options,
        Box::new(move |cc| Box::new(MedleyApp::new(cc, config))),
    )
}
