use std::sync::Once;
use std::thread;
use std::time::{Duration, Instant};

use medley_engine::{
    EngineHandle, EngineEvent, FailureKind, JobError, JobOutcome, ProgressEvent, SessionHandle,
    TaskEnd,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

/// Polls the engine until the terminal event arrives.
fn drain_until_completed(engine: &EngineHandle) -> Vec<EngineEvent> {
    let deadline = Instant::now() + Duration::from_secs(5);
    let mut events = Vec::new();
    loop {
        if let Some(event) = engine.try_recv() {
            let done = matches!(event, EngineEvent::JobCompleted { .. });
            events.push(event);
            if done {
                return events;
            }
        } else if Instant::now() > deadline {
            panic!("timed out waiting for job completion");
        } else {
            thread::sleep(Duration::from_millis(10));
        }
    }
}

#[test]
fn progress_events_arrive_in_post_order_then_terminal() {
    init_logging();
    let engine = EngineHandle::new();
    let session = SessionHandle::new();

    engine.submit(
        1,
        session,
        Box::new(|sink, _session| {
            for step in 1..=5u8 {
                sink.emit(ProgressEvent::info(format!("step {step}")));
            }
            Ok(TaskEnd::Completed("done".to_string()))
        }),
    );

    let events = drain_until_completed(&engine);
    assert_eq!(events.len(), 6);
    for (index, event) in events.iter().take(5).enumerate() {
        match event {
            EngineEvent::Progress { job_id, event } => {
                assert_eq!(*job_id, 1);
                assert_eq!(event.message, format!("step {}", index + 1));
            }
            other => panic!("expected progress, got {other:?}"),
        }
    }
    assert_eq!(
        events[5],
        EngineEvent::JobCompleted {
            job_id: 1,
            outcome: JobOutcome::Succeeded {
                message: "done".to_string()
            },
        }
    );
}

#[test]
fn task_failure_becomes_a_failed_terminal_event() {
    init_logging();
    let engine = EngineHandle::new();

    engine.submit(
        7,
        SessionHandle::new(),
        Box::new(|_sink, _session| {
            Err(JobError::new(FailureKind::ExternalTool, "codec not found"))
        }),
    );

    let events = drain_until_completed(&engine);
    assert_eq!(events.len(), 1);
    match &events[0] {
        EngineEvent::JobCompleted {
            job_id,
            outcome: JobOutcome::Failed(err),
        } => {
            assert_eq!(*job_id, 7);
            assert!(err.message.contains("codec not found"));
        }
        other => panic!("expected failed completion, got {other:?}"),
    }
}

#[test]
fn task_panic_is_caught_and_reported_exactly_once() {
    init_logging();
    let engine = EngineHandle::new();

    engine.submit(
        9,
        SessionHandle::new(),
        Box::new(|_sink, _session| panic!("worker blew up")),
    );

    let events = drain_until_completed(&engine);
    assert_eq!(events.len(), 1);
    match &events[0] {
        EngineEvent::JobCompleted {
            outcome: JobOutcome::Failed(err),
            ..
        } => {
            assert_eq!(err.kind, FailureKind::Internal);
            assert!(err.message.contains("worker blew up"));
        }
        other => panic!("expected failed completion, got {other:?}"),
    }

    // No second terminal event shows up afterwards.
    thread::sleep(Duration::from_millis(100));
    assert!(engine.try_recv().is_none());
}

#[test]
fn close_before_start_yields_cancelled_and_zero_progress_events() {
    init_logging();
    let engine = EngineHandle::new();
    let session = SessionHandle::new();
    session.request_close();

    engine.submit(
        3,
        session,
        Box::new(|sink, session| {
            if session.is_closing() {
                return Ok(TaskEnd::Cancelled);
            }
            sink.emit(ProgressEvent::info("never shown"));
            Ok(TaskEnd::Completed("done".to_string()))
        }),
    );

    let events = drain_until_completed(&engine);
    assert_eq!(
        events,
        vec![EngineEvent::JobCompleted {
            job_id: 3,
            outcome: JobOutcome::Cancelled,
        }]
    );
}

#[test]
fn progress_after_close_is_suppressed_but_job_still_completes() {
    init_logging();
    let engine = EngineHandle::new();
    let session = SessionHandle::new();
    let session_for_task = session.clone();

    // The task itself never checks the flag; the scoped sink must still
    // keep its late emits away from the surface.
    session.request_close();
    engine.submit(
        4,
        session_for_task,
        Box::new(|sink, _session| {
            sink.emit(ProgressEvent::info("late"));
            sink.emit(ProgressEvent::info("later"));
            Ok(TaskEnd::Completed("ran to the end".to_string()))
        }),
    );

    let events = drain_until_completed(&engine);
    assert_eq!(events.len(), 1);
    assert!(matches!(events[0], EngineEvent::JobCompleted { .. }));
}
