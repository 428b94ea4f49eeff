//! Raising and recovering a failure must stay quiet: the panic hook is process
//! global, so this lives in its own test binary.

use std::panic;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use exe::prelude::*;

#[test]
fn test_recovered_failure_does_not_run_panic_hook() {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    }));

    let n = just_value(1)
        | then(|_: i32| -> i32 { raise(12) })
        | catch_exc(|e: Failure| e.downcast_or_resume::<i32>() * 3)
        | sync_await();

    panic::set_hook(previous);
    assert_eq!(n, 36);
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}
