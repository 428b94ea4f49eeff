use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

use crate::{Adaptor, Failure, Operation, PipelineError, Receiver, Sender, pipe::impl_pipe};

/// The guard stage. Created by [`capture_exc`], [`Sender::capture_exc`], or
/// automatically by [`connect`](crate::connect) for receivers that accept failures.
///
/// Starting the operation runs the upstream inside a protected region. A failure
/// escaping the upstream, declared or not, is delivered to the receiver's failure
/// path instead of unwinding further. The value, if any, is delivered after the
/// region has been left, so failures raised further downstream are not caught here.
pub struct CaptureExc<S> {
    input: S,
}

impl<S> CaptureExc<S> {
    pub fn new(input: S) -> Self {
        CaptureExc { input }
    }
}

impl<S: Sender> Sender for CaptureExc<S> {
    type Value = S::Value;
    const MAY_FAIL: bool = S::MAY_FAIL;
    const GUARDED: bool = true;

    type Connected<R>
        = CaptureExcOp<S::Connected<GuardReceiver<S::Value>>, S::Value, R>
    where
        R: Receiver<Self::Value>;

    fn connect<R>(self, receiver: R) -> Self::Connected<R>
    where
        R: Receiver<Self::Value>,
    {
        let slot = Rc::new(Cell::new(None));
        let input = self.input.connect(GuardReceiver { slot: slot.clone() });
        CaptureExcOp {
            input,
            slot,
            output: receiver,
        }
    }
}

impl_pipe!(impl<S> for CaptureExc<S>);

/// Parks the upstream value until the guard's protected region has exited.
pub struct GuardReceiver<T> {
    slot: Rc<Cell<Option<T>>>,
}

impl<T> Receiver<T> for GuardReceiver<T> {
    fn set_value(self, value: T) {
        self.slot.set(Some(value));
    }
}

/// Operation for [`CaptureExc`].
pub struct CaptureExcOp<O, T, R> {
    input: O,
    slot: Rc<Cell<Option<T>>>,
    output: R,
}

impl<O, T, R> Operation for CaptureExcOp<O, T, R>
where
    O: Operation,
    R: Receiver<T>,
{
    fn start(self) {
        let CaptureExcOp {
            input,
            slot,
            output,
        } = self;

        let outcome = panic::catch_unwind(AssertUnwindSafe(move || input.start()));
        match (outcome, slot.take()) {
            (Ok(()), Some(value)) => output.set_value(value),
            (Ok(()), None) => output.set_error(PipelineError::NoOutcome.into()),
            (Err(payload), _) => {
                let failure = Failure::from_panic(payload);
                #[cfg(feature = "tracing")]
                tracing::debug!(failure = %failure, "capture_exc: intercepted failure");
                output.set_error(failure);
            }
        }
    }
}

/// Adaptor returned by [`capture_exc`].
pub struct CaptureExcAdaptor;

/// Guard the pipeline so far, for use with `|`.
///
/// Mostly useful with custom receivers; [`connect`](crate::connect) already
/// inserts a guard for every receiver that accepts failures.
pub fn capture_exc() -> CaptureExcAdaptor {
    CaptureExcAdaptor
}

impl<S: Sender> Adaptor<S> for CaptureExcAdaptor {
    type Output = CaptureExc<S>;

    fn apply(self, sender: S) -> CaptureExc<S> {
        CaptureExc::new(sender)
    }
}
