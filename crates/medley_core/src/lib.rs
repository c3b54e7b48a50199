//! Medley core: pure state machine and view-model helpers.
mod effect;
mod media;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use media::{ConversionKind, FileFilter, MediaKind, Resolution};
pub use msg::Msg;
pub use state::{
    AppState, JobPhase, JobResultKind, Screen, StatusStyle, STATUS_TTL_TICKS,
};
pub use update::update;
pub use view_model::{AppViewModel, StatusView};
