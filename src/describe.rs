//! Static stage facts: what a stage yields and whether it can fail.
//!
//! Every [`Sender`](crate::Sender) carries a [`Descriptor`], computed from its
//! type when the pipeline is assembled. Failure capability of user callables is
//! declared through [`Callable::MAY_FAIL`]: plain closures are assumed to be able
//! to fail, and [`no_fail`] marks a callable as failure-free.

use std::any::type_name;

use crate::Sender;

/// The declared value type and failure capability of a stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Descriptor {
    /// Name of the single value type the stage delivers.
    pub value_type: &'static str,
    /// Whether the stage, or anything upstream of it, may fail.
    pub may_fail: bool,
}

impl Descriptor {
    /// The descriptor of sender type `S`.
    ///
    /// ```rust
    /// use exe::*;
    ///
    /// let d = Descriptor::of::<Just<i32>>();
    /// assert_eq!(d.value_type, "i32");
    /// assert!(!d.may_fail);
    /// ```
    pub fn of<S: Sender>() -> Self {
        Descriptor {
            value_type: type_name::<S::Value>(),
            may_fail: S::MAY_FAIL,
        }
    }
}

/// A one-shot callable with a declared failure capability.
///
/// Implemented for every `FnOnce(Args) -> Output` with `MAY_FAIL = true`, since
/// nothing about a closure proves that it won't panic. Wrap a callable in
/// [`no_fail`] to declare it failure-free.
pub trait Callable<Args> {
    type Output;

    /// Whether calling may raise a failure.
    const MAY_FAIL: bool;

    fn call(self, args: Args) -> Self::Output;
}

impl<Args, F, O> Callable<Args> for F
where
    F: FnOnce(Args) -> O,
{
    type Output = O;
    const MAY_FAIL: bool = true;

    fn call(self, args: Args) -> Self::Output {
        self(args)
    }
}

/// A callable declared not to fail. Created by [`no_fail`].
#[derive(Debug, Clone, Copy)]
pub struct NoFail<F>(F);

/// Declare `f` failure-free.
///
/// Stages built from failure-free callables over a failure-free upstream report
/// `may_fail = false`, so drivers never install a failure path for them. The
/// declaration is trusted: if `f` panics anyway, the failure is only caught when
/// some receiver downstream accepts failures.
///
/// ```rust
/// use exe::*;
///
/// let s = just_value(2) | then(no_fail(|x: i32| x * 21));
/// assert!(!s.describe().may_fail);
/// assert_eq!(s | sync_await(), 42);
/// ```
pub fn no_fail<F>(f: F) -> NoFail<F> {
    NoFail(f)
}

impl<Args, F, O> Callable<Args> for NoFail<F>
where
    F: FnOnce(Args) -> O,
{
    type Output = O;
    const MAY_FAIL: bool = false;

    fn call(self, args: Args) -> Self::Output {
        (self.0)(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn may_fail<A, C: Callable<A>>(_: &C) -> bool {
        C::MAY_FAIL
    }

    #[test]
    fn test_closures_are_assumed_fallible() {
        let f = |x: i32| x + 1;
        assert!(may_fail::<i32, _>(&f));
        assert_eq!(Callable::call(f, 1), 2);
    }

    #[test]
    fn test_no_fail_declares_failure_free() {
        let f = no_fail(|s: String| s.len());
        assert!(!may_fail::<String, _>(&f));
        assert_eq!(f.call("four".to_string()), 4);
    }
}
