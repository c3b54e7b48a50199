use std::sync::mpsc;

use crate::{EngineEvent, JobId, ProgressEvent, SessionHandle};

/// Where a running job pushes its updates. `emit` must be callable from a
/// worker thread and must not block the caller.
pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: ProgressEvent);
}

/// Sink that tags events with a job id and forwards them over the engine's
/// event channel. The channel is unbounded, so sending never blocks, and
/// events from one job arrive in post order.
pub struct ChannelProgressSink {
    job_id: JobId,
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelProgressSink {
    pub fn new(job_id: JobId, tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { job_id, tx }
    }
}

impl ProgressSink for ChannelProgressSink {
    fn emit(&self, event: ProgressEvent) {
        let _ = self.tx.send(EngineEvent::Progress {
            job_id: self.job_id,
            event,
        });
    }
}

/// Wraps another sink and silently drops events once the owning session is
/// closing. Dropped events are not queued and not retried.
pub struct SessionScopedSink<S> {
    inner: S,
    session: SessionHandle,
}

impl<S: ProgressSink> SessionScopedSink<S> {
    pub fn new(inner: S, session: SessionHandle) -> Self {
        Self { inner, session }
    }
}

impl<S: ProgressSink> ProgressSink for SessionScopedSink<S> {
    fn emit(&self, event: ProgressEvent) {
        if self.session.is_closing() {
            return;
        }
        self.inner.emit(event);
    }
}
