/// Immutable application configuration, built once in `main` and passed at
/// construction. No global mutable state.
#[derive(Debug, Clone, Copy)]
pub struct AppConfig {
    pub app_name: &'static str,
    pub window_width: f32,
    pub window_height: f32,
}

impl AppConfig {
    pub fn standard() -> Self {
        Self {
            app_name: "Medley Media Tools",
            window_width: 460.0,
            window_height: 640.0,
        }
    }
}
