use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::mpsc;
use std::thread;

use engine_logging::{engine_info, engine_warn};

use crate::progress::{ChannelProgressSink, ProgressSink, SessionScopedSink};
use crate::{
    ConversionPlan, DownloadRequest, EngineEvent, FailureKind, JobError, JobId, JobOutcome,
    SessionHandle, TaskEnd, UpdatePlan,
};

/// A unit of background work. Receives the sink to report through and the
/// owning session's handle to poll for cancellation.
pub type JobTask =
    Box<dyn FnOnce(&dyn ProgressSink, &SessionHandle) -> Result<TaskEnd, JobError> + Send + 'static>;

enum RunnerCommand {
    Submit {
        job_id: JobId,
        session: SessionHandle,
        task: JobTask,
    },
}

/// Handle to the job runner. Submissions go to a dispatch thread which runs
/// each job on its own worker thread; at most one job is in flight per
/// session (enforced at the surface), so no pooling is needed.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<RunnerCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new() -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel::<RunnerCommand>();
        let (event_tx, event_rx) = mpsc::channel::<EngineEvent>();

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let RunnerCommand::Submit {
                    job_id,
                    session,
                    task,
                } = command;
                let event_tx = event_tx.clone();
                thread::Builder::new()
                    .name(format!("medley-job-{job_id}"))
                    .spawn(move || run_job(job_id, session, task, event_tx))
                    .expect("spawn job thread");
            }
        });

        Self { cmd_tx, event_rx }
    }

    pub fn submit(&self, job_id: JobId, session: SessionHandle, task: JobTask) {
        let _ = self.cmd_tx.send(RunnerCommand::Submit {
            job_id,
            session,
            task,
        });
    }

    pub fn submit_conversion(&self, job_id: JobId, session: SessionHandle, plan: ConversionPlan) {
        self.submit(job_id, session, crate::convert::conversion_task(plan));
    }

    pub fn submit_download(&self, job_id: JobId, session: SessionHandle, request: DownloadRequest) {
        self.submit(job_id, session, crate::download::download_task(request));
    }

    pub fn submit_tool_update(&self, job_id: JobId, session: SessionHandle, plan: UpdatePlan) {
        self.submit(job_id, session, crate::update_tool::update_task(plan));
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }
}

impl Default for EngineHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs one job to completion. Exactly one `JobCompleted` is delivered per
/// job, whether the task returned, failed, or panicked.
fn run_job(
    job_id: JobId,
    session: SessionHandle,
    task: JobTask,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    engine_info!("job {} started", job_id);
    let sink = SessionScopedSink::new(
        ChannelProgressSink::new(job_id, event_tx.clone()),
        session.clone(),
    );

    let result = catch_unwind(AssertUnwindSafe(|| task(&sink, &session)));

    let outcome = match result {
        Ok(Ok(TaskEnd::Completed(message))) => {
            engine_info!("job {} succeeded", job_id);
            JobOutcome::Succeeded { message }
        }
        Ok(Ok(TaskEnd::Cancelled)) => {
            engine_info!("job {} cancelled", job_id);
            JobOutcome::Cancelled
        }
        Ok(Err(err)) => {
            engine_warn!("job {} failed: {} ({})", job_id, err.message, err.kind);
            JobOutcome::Failed(err)
        }
        Err(payload) => {
            let message = panic_message(payload);
            engine_warn!("job {} panicked: {}", job_id, message);
            JobOutcome::Failed(JobError::new(FailureKind::Internal, message))
        }
    };

    let _ = event_tx.send(EngineEvent::JobCompleted { job_id, outcome });
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(text) = payload.downcast_ref::<&str>() {
        (*text).to_string()
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else {
        "job panicked".to_string()
    }
}
