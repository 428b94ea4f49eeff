#![cfg(feature = "tracing")]
//! Events emitted with the `tracing` feature, captured through a fmt subscriber.

use std::io;
use std::sync::{Arc, Mutex};

use exe::prelude::*;

#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

impl io::Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Capture {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

fn captured<T>(run: impl FnOnce() -> T) -> (T, String) {
    let capture = Capture::default();
    let writer = capture.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let out = tracing::subscriber::with_default(subscriber, run);
    (out, capture.text())
}

#[test]
fn test_recovery_emits_guard_and_handler_events() {
    let (n, log) = captured(|| {
        just_value(1)
            | then(|_: i32| -> i32 { raise(12) })
            | catch_exc(|e: Failure| e.downcast_or_resume::<i32>() * 3)
            | sync_await()
    });
    assert_eq!(n, 36);
    assert!(log.contains("inserting guard"), "{log}");
    assert!(log.contains("intercepted failure"), "{log}");
    assert!(log.contains("invoking recovery handler"), "{log}");
}

#[test]
fn test_failure_free_pipeline_emits_no_recovery_event() {
    let (n, log) = captured(|| just_value(2) | then(no_fail(|x: i32| x * 3)) | sync_await());
    assert_eq!(n, 6);
    assert!(!log.contains("inserting guard"), "{log}");
    assert!(!log.contains("invoking recovery handler"), "{log}");
}
