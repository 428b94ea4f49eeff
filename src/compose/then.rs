use std::marker::PhantomData;

use crate::{Adaptor, Callable, Operation, Receiver, Sender, pipe::impl_pipe};

/// Applies a callable to the upstream value. Created by [`then`] or [`Sender::then`].
///
/// May fail if the upstream may fail or if the callable is not declared
/// failure-free with [`no_fail`](crate::no_fail).
pub struct Then<S, F> {
    input: S,
    f: F,
}

impl<S, F> Then<S, F> {
    pub fn new(input: S, f: F) -> Self {
        Then { input, f }
    }
}

impl<S, F> Sender for Then<S, F>
where
    S: Sender,
    F: Callable<S::Value>,
{
    type Value = F::Output;
    const MAY_FAIL: bool = S::MAY_FAIL || F::MAY_FAIL;

    type Connected<R>
        = ThenOp<S::Connected<ThenReceiver<F, R, S::Value>>>
    where
        R: Receiver<Self::Value>;

    fn connect<R>(self, receiver: R) -> Self::Connected<R>
    where
        R: Receiver<Self::Value>,
    {
        let receiver = ThenReceiver {
            f: self.f,
            output: receiver,
            _input: PhantomData,
        };
        ThenOp {
            input: self.input.connect(receiver),
        }
    }
}

impl_pipe!(impl<S, F> for Then<S, F>);

/// Receives the upstream value, applies the callable and forwards the result.
///
/// A panic inside the callable unwinds out of `set_value` to the nearest guard.
pub struct ThenReceiver<F, R, T> {
    f: F,
    output: R,
    _input: PhantomData<fn(T)>,
}

impl<F, R, T> Receiver<T> for ThenReceiver<F, R, T>
where
    F: Callable<T>,
    R: Receiver<F::Output>,
{
    fn set_value(self, value: T) {
        self.output.set_value(self.f.call(value));
    }
}

/// Operation for [`Then`]; all transform work happens inside the upstream's delivery.
pub struct ThenOp<O> {
    input: O,
}

impl<O: Operation> Operation for ThenOp<O> {
    fn start(self) {
        self.input.start();
    }
}

/// Adaptor returned by [`then`].
pub struct ThenAdaptor<F> {
    f: F,
}

/// Transform a pipeline's value with `f`, for use with `|`.
///
/// ```rust
/// use exe::*;
///
/// let n = just_value(5)
///     | then(|x: i32| x + 2)
///     | then(|x: i32| -x)
///     | then(|x: i32| x * 4)
///     | then(|x: i32| x - 3)
///     | sync_await();
/// assert_eq!(n, -31);
/// ```
pub fn then<F>(f: F) -> ThenAdaptor<F> {
    ThenAdaptor { f }
}

impl<S, F> Adaptor<S> for ThenAdaptor<F>
where
    S: Sender,
    F: Callable<S::Value>,
{
    type Output = Then<S, F>;

    fn apply(self, sender: S) -> Then<S, F> {
        Then::new(sender, self.f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{just_value, no_fail, sync_await};

    #[test]
    fn test_then_capability_is_union_of_stages() {
        let free = just_value(1) | then(no_fail(|x: i32| x + 1));
        assert!(!free.describe().may_fail);

        let fallible = free | then(|x: i32| x + 1);
        assert!(fallible.describe().may_fail);

        // Once any stage may fail, every later stage may too.
        let still_fallible = fallible | then(no_fail(|x: i32| x + 1));
        assert!(still_fallible.describe().may_fail);
        assert_eq!(still_fallible | sync_await(), 4);
    }

    #[test]
    fn test_then_changes_value_type() {
        let s = just_value("Hello world") | then(no_fail(|s: &str| s.len()));
        assert_eq!(s.describe().value_type, "usize");
        assert_eq!(s | sync_await(), 11);
    }

    #[test]
    fn test_then_chain_runs_in_declared_order() {
        let s = just_value(String::new())
            | then(|s: String| s + "a")
            | then(|s: String| s + "b")
            | then(|s: String| s + "c");
        assert_eq!(s | sync_await(), "abc");
    }
}
