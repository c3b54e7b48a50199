use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared handle over one window's closing flag.
///
/// This is the only state shared between the interactive thread and the
/// background workers. The flag is set exactly once and never reset; every
/// progress hook checks it before touching anything user-visible.
#[derive(Debug, Clone, Default)]
pub struct SessionHandle {
    closing: Arc<AtomicBool>,
}

impl SessionHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_closing(&self) -> bool {
        self.closing.load(Ordering::Acquire)
    }

    /// Requests close. Idempotent: calling twice is the same as calling once.
    pub fn request_close(&self) {
        self.closing.store(true, Ordering::Release);
    }
}
