use std::marker::PhantomData;

use crate::{
    Adaptor, Callable, Connection, Failure, Operation, Receiver, Sender, connect, pipe::impl_pipe,
};

/// Recovers from an upstream failure. Created by [`catch_exc`] or [`Sender::catch_exc`].
///
/// The handler turns the [`Failure`] into a value of the upstream's value type.
/// When the upstream cannot fail, the stage is inert: its receiver does not accept
/// failures, no guard is inserted and the handler is never called. The stage may
/// fail only if the upstream may fail and the handler is not declared failure-free.
pub struct CatchExc<S, H> {
    input: S,
    handler: H,
}

impl<S, H> CatchExc<S, H> {
    pub fn new(input: S, handler: H) -> Self {
        CatchExc { input, handler }
    }
}

impl<S, H> Sender for CatchExc<S, H>
where
    S: Sender,
    H: Callable<Failure, Output = S::Value>,
{
    type Value = S::Value;
    const MAY_FAIL: bool = S::MAY_FAIL && H::MAY_FAIL;

    type Connected<R>
        = CatchExcOp<Connection<S, CatchReceiver<S, H, R>>>
    where
        R: Receiver<Self::Value>;

    fn connect<R>(self, receiver: R) -> Self::Connected<R>
    where
        R: Receiver<Self::Value>,
    {
        let receiver = CatchReceiver {
            handler: self.handler,
            output: receiver,
            _input: PhantomData,
        };
        CatchExcOp {
            input: connect(self.input, receiver),
        }
    }
}

impl_pipe!(impl<S, H> for CatchExc<S, H>);

/// Forwards values unchanged and, when the upstream may fail, runs the handler on failures.
///
/// Accepting failures is what makes [`connect`] guard the upstream.
pub struct CatchReceiver<S, H, R> {
    handler: H,
    output: R,
    _input: PhantomData<fn() -> S>,
}

impl<S, H, R> Receiver<S::Value> for CatchReceiver<S, H, R>
where
    S: Sender,
    H: Callable<Failure, Output = S::Value>,
    R: Receiver<S::Value>,
{
    const ACCEPTS_FAILURE: bool = S::MAY_FAIL;

    fn set_value(self, value: S::Value) {
        self.output.set_value(value);
    }

    fn set_error(self, failure: Failure) {
        if !S::MAY_FAIL {
            failure.resume();
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(failure = %failure, "catch_exc: invoking recovery handler");
        self.output.set_value(self.handler.call(failure));
    }
}

/// Operation for [`CatchExc`].
pub struct CatchExcOp<O> {
    input: O,
}

impl<O: Operation> Operation for CatchExcOp<O> {
    fn start(self) {
        self.input.start();
    }
}

/// Adaptor returned by [`catch_exc`].
pub struct CatchExcAdaptor<H> {
    handler: H,
}

/// Recover from upstream failures with `handler`, for use with `|`.
///
/// ```rust
/// use exe::*;
///
/// let n = just_value(1)
///     | then(|_: i32| -> i32 { raise(12) })
///     | catch_exc(|e: Failure| e.downcast_or_resume::<i32>() * 3)
///     | sync_await();
/// assert_eq!(n, 36);
/// ```
pub fn catch_exc<H>(handler: H) -> CatchExcAdaptor<H> {
    CatchExcAdaptor { handler }
}

impl<S, H> Adaptor<S> for CatchExcAdaptor<H>
where
    S: Sender,
    H: Callable<Failure, Output = S::Value>,
{
    type Output = CatchExc<S, H>;

    fn apply(self, sender: S) -> CatchExc<S, H> {
        CatchExc::new(sender, self.handler)
    }
}
