//! The sender/receiver contracts.
//!
//! A [`Sender`] is an immutable plan for producing one value. Connecting it to a
//! [`Receiver`] yields an [`Operation`], which delivers exactly one outcome to the
//! receiver when started: a value through [`Receiver::set_value`] or, for receivers
//! that accept failures, a [`Failure`] through [`Receiver::set_error`].
//!
//! ```rust
//! use exe::*;
//!
//! struct Print;
//!
//! impl Receiver<String> for Print {
//!     fn set_value(self, value: String) {
//!         assert_eq!(value, "lorem ipsum");
//!     }
//! }
//!
//! let op = connect(just_value("lorem".to_string()).then(|s: String| s + " ipsum"), Print);
//! start(op);
//! ```

use either::Either;

use crate::{
    Callable, Descriptor, Failure,
    compose::{CaptureExc, CatchExc, Then},
    handler,
};

/// A plan for a stage that produces a single value.
///
/// Senders are values: combinators consume a sender and wrap it in a new one,
/// and [`connect`](crate::connect) consumes the finished plan exactly once.
pub trait Sender: Sized {
    /// The value delivered on success.
    type Value;

    /// Whether this stage, or anything upstream of it, may fail.
    const MAY_FAIL: bool;

    /// `true` only for the guard stage, which must never be wrapped in another guard.
    const GUARDED: bool = false;

    /// The operation built by connecting this sender to a receiver of type `R`.
    type Connected<R>: Operation
    where
        R: Receiver<Self::Value>;

    /// Build the operation for this stage without any guard insertion.
    ///
    /// Drivers should go through [`connect`](crate::connect), which decides
    /// whether the receiver gets a guard stage first.
    fn connect<R>(self, receiver: R) -> Self::Connected<R>
    where
        R: Receiver<Self::Value>;

    fn describe(&self) -> Descriptor {
        Descriptor::of::<Self>()
    }

    /// Transform the value with `f`.
    fn then<F>(self, f: F) -> Then<Self, F>
    where
        F: Callable<Self::Value>,
    {
        Then::new(self, f)
    }

    /// Recover from an upstream failure with `handler`.
    ///
    /// Inert when this sender cannot fail: the handler is never invoked.
    fn catch_exc<H>(self, handler: H) -> CatchExc<Self, H>
    where
        H: Callable<Failure, Output = Self::Value>,
    {
        CatchExc::new(self, handler)
    }

    /// Wrap this sender in a guard that turns escaping failures into failure deliveries.
    fn capture_exc(self) -> CaptureExc<Self> {
        CaptureExc::new(self)
    }

    /// Run to completion on the calling thread and return the value.
    fn sync_await(self) -> Self::Value {
        handler::handle(self)
    }

    /// Run to completion on the calling thread, returning any failure as `Err`.
    fn try_sync_await(self) -> Result<Self::Value, Failure> {
        handler::try_handle(self)
    }
}

/// The consumer end of a pipeline.
///
/// Both delivery methods consume the receiver, so a receiver gets at most one
/// terminal call. Receivers that override [`set_error`](Receiver::set_error) must
/// also set [`ACCEPTS_FAILURE`](Receiver::ACCEPTS_FAILURE); that constant is what
/// [`connect`](crate::connect) inspects to decide on guard insertion.
pub trait Receiver<T> {
    /// Whether this receiver handles failures.
    const ACCEPTS_FAILURE: bool = false;

    fn set_value(self, value: T);

    /// Deliver a failure.
    ///
    /// [`connect`](crate::connect) only inserts a guard for receivers with
    /// `ACCEPTS_FAILURE`, but an explicit [`capture_exc`](crate::capture_exc) hands
    /// failures to any receiver. The default re-raises the payload in that case.
    fn set_error(self, failure: Failure)
    where
        Self: Sized,
    {
        failure.resume()
    }
}

/// A connected, ready-to-run pipeline.
///
/// `start` consumes the operation, so it runs at most once. It returns only
/// after the outcome has been delivered.
pub trait Operation {
    fn start(self);
}

impl<L, R> Operation for Either<L, R>
where
    L: Operation,
    R: Operation,
{
    fn start(self) {
        match self {
            Either::Left(l) => l.start(),
            Either::Right(r) => r.start(),
        }
    }
}
