//! Drivers that run a pipeline to completion on the calling thread.
//!
//! [`handle`] (also reachable as `sender | sync_await()` or [`Sender::sync_await`])
//! follows the pipeline's own descriptor: a pipeline that may fail
//! gets a failure-accepting receiver (and therefore a guard), and a failure is
//! re-raised to the caller; a failure-free pipeline gets a value-only receiver
//! and no failure path at all. [`try_handle`] always accepts failures and
//! returns them as `Err`.

use std::marker::PhantomData;

use crate::{Adaptor, Failure, Operation, PipelineError, Receiver, Sender, connect};

/// Receiver used by [`handle`]; accepts failures only if `S` may fail.
struct AwaitReceiver<'a, S: Sender> {
    slot: &'a mut Option<Result<S::Value, Failure>>,
    _sender: PhantomData<fn() -> S>,
}

impl<S: Sender> Receiver<S::Value> for AwaitReceiver<'_, S> {
    const ACCEPTS_FAILURE: bool = S::MAY_FAIL;

    fn set_value(self, value: S::Value) {
        *self.slot = Some(Ok(value));
    }

    fn set_error(self, failure: Failure) {
        *self.slot = Some(Err(failure));
    }
}

/// Receiver used by [`try_handle`]; always accepts failures.
struct TryAwaitReceiver<'a, T> {
    slot: &'a mut Option<Result<T, Failure>>,
}

impl<T> Receiver<T> for TryAwaitReceiver<'_, T> {
    const ACCEPTS_FAILURE: bool = true;

    fn set_value(self, value: T) {
        *self.slot = Some(Ok(value));
    }

    fn set_error(self, failure: Failure) {
        *self.slot = Some(Err(failure));
    }
}

/// Run `sender` to completion and return its value.
///
/// If the pipeline may fail and does, the failure payload is re-raised. If the
/// pipeline is declared failure-free, no failure path exists and an undeclared
/// failure unwinds straight out of this call.
pub fn handle<S: Sender>(sender: S) -> S::Value {
    let mut slot = None;
    connect(
        sender,
        AwaitReceiver::<S> {
            slot: &mut slot,
            _sender: PhantomData,
        },
    )
    .start();
    match slot {
        Some(Ok(value)) => value,
        Some(Err(failure)) => {
            #[cfg(feature = "tracing")]
            tracing::debug!(failure = %failure, "sync_await: re-raising failure");
            failure.resume()
        }
        None => Failure::from(PipelineError::NoOutcome).resume(),
    }
}

/// Run `sender` to completion, returning a failure as `Err`.
pub fn try_handle<S: Sender>(sender: S) -> Result<S::Value, Failure> {
    let mut slot = None;
    connect(sender, TryAwaitReceiver { slot: &mut slot }).start();
    slot.unwrap_or_else(|| Err(PipelineError::NoOutcome.into()))
}

/// Adaptor returned by [`sync_await`].
pub struct SyncAwait;

/// Terminal adaptor: `sender | sync_await()` runs the pipeline and yields its value.
///
/// ```rust
/// use exe::*;
///
/// assert_eq!(just_value(20) | then(|x: i32| x + 22) | sync_await(), 42);
/// ```
pub fn sync_await() -> SyncAwait {
    SyncAwait
}

impl<S: Sender> Adaptor<S> for SyncAwait {
    type Output = S::Value;

    fn apply(self, sender: S) -> S::Value {
        handle(sender)
    }
}

/// Adaptor returned by [`try_sync_await`].
pub struct TrySyncAwait;

/// Terminal adaptor returning `Result` instead of re-raising.
///
/// ```rust
/// use exe::*;
///
/// let outcome = just_value(1) | then(|_: i32| -> i32 { raise(12) }) | try_sync_await();
/// assert_eq!(outcome.unwrap_err().downcast_ref::<i32>(), Some(&12));
/// ```
pub fn try_sync_await() -> TrySyncAwait {
    TrySyncAwait
}

impl<S: Sender> Adaptor<S> for TrySyncAwait {
    type Output = Result<S::Value, Failure>;

    fn apply(self, sender: S) -> Self::Output {
        try_handle(sender)
    }
}
