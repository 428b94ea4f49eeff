use crate::{Operation, Receiver, Sender, pipe::impl_pipe};

/// A sender that delivers a stored value. Created by [`just_value`].
///
/// Cannot fail: its descriptor always reports `may_fail = false`.
#[derive(Debug, Clone)]
pub struct Just<T> {
    value: T,
}

/// Start a pipeline with `value`.
///
/// ```rust
/// use exe::*;
///
/// let s = just_value(5);
/// assert!(!s.describe().may_fail);
/// assert_eq!(s | sync_await(), 5);
/// ```
pub fn just_value<T>(value: T) -> Just<T> {
    Just { value }
}

impl<T> Sender for Just<T> {
    type Value = T;
    const MAY_FAIL: bool = false;

    type Connected<R>
        = JustOp<R, T>
    where
        R: Receiver<T>;

    fn connect<R>(self, receiver: R) -> JustOp<R, T>
    where
        R: Receiver<T>,
    {
        JustOp {
            receiver,
            value: self.value,
        }
    }
}

impl_pipe!(impl<T> for Just<T>);

/// Operation for [`Just`]: hands the value to the receiver on start.
pub struct JustOp<R, T> {
    receiver: R,
    value: T,
}

impl<R, T> Operation for JustOp<R, T>
where
    R: Receiver<T>,
{
    fn start(self) {
        self.receiver.set_value(self.value);
    }
}
