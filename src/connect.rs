//! Joining a sender to a receiver.
//!
//! [`connect`] is the only place that decides whether a guard stage is inserted:
//! whenever the receiver accepts failures, the sender is wrapped in
//! [`CaptureExc`] first, whatever the sender declares about itself. Receivers
//! without a failure path get a direct connection and no guard.

use either::Either;

use crate::{Operation, Receiver, Sender, compose::CaptureExc};

/// The operation produced by [`connect`]: guarded on the left, direct on the right.
pub type Connection<S, R> =
    Either<<CaptureExc<S> as Sender>::Connected<R>, <S as Sender>::Connected<R>>;

/// Connect `sender` to `receiver`, inserting a guard if the receiver accepts failures.
///
/// The choice is made from compile-time constants, once per connection.
///
/// ```rust
/// use exe::*;
///
/// struct Values(std::rc::Rc<std::cell::Cell<i32>>);
///
/// impl Receiver<i32> for Values {
///     fn set_value(self, v: i32) {
///         self.0.set(v);
///     }
/// }
///
/// let seen = std::rc::Rc::new(std::cell::Cell::new(0));
/// let op = connect(just_value(4) | then(|x: i32| x * 2), Values(seen.clone()));
/// assert!(op.is_right()); // no failure path, so no guard
/// start(op);
/// assert_eq!(seen.get(), 8);
/// ```
pub fn connect<S, R>(sender: S, receiver: R) -> Connection<S, R>
where
    S: Sender,
    R: Receiver<S::Value>,
{
    if R::ACCEPTS_FAILURE && !S::GUARDED {
        #[cfg(feature = "tracing")]
        tracing::trace!(
            value_type = std::any::type_name::<S::Value>(),
            may_fail = S::MAY_FAIL,
            "connect: receiver accepts failures, inserting guard"
        );
        Either::Left(CaptureExc::new(sender).connect(receiver))
    } else {
        Either::Right(sender.connect(receiver))
    }
}

/// Start a connected operation.
pub fn start<O: Operation>(op: O) {
    op.start()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Failure, just_value, no_fail, raise};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, PartialEq)]
    enum Event {
        Value(i32),
        Error(i32),
    }

    struct Recorder(Rc<RefCell<Vec<Event>>>);

    impl Receiver<i32> for Recorder {
        const ACCEPTS_FAILURE: bool = true;

        fn set_value(self, value: i32) {
            self.0.borrow_mut().push(Event::Value(value));
        }

        fn set_error(self, failure: Failure) {
            let code = failure.downcast_or_resume::<i32>();
            self.0.borrow_mut().push(Event::Error(code));
        }
    }

    struct ValueOnly(Rc<RefCell<Vec<Event>>>);

    impl Receiver<i32> for ValueOnly {
        fn set_value(self, value: i32) {
            self.0.borrow_mut().push(Event::Value(value));
        }
    }

    #[test]
    fn test_guard_inserted_for_failure_accepting_receiver() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let op = connect(just_value(1), Recorder(events.clone()));
        assert!(op.is_left());
        start(op);
        assert_eq!(&*events.borrow(), &[Event::Value(1)]);
    }

    #[test]
    fn test_guard_inserted_even_for_failure_free_sender() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sender = just_value(1).then(no_fail(|x: i32| x + 1));
        assert!(!sender.describe().may_fail);
        assert!(connect(sender, Recorder(events)).is_left());
    }

    #[test]
    fn test_no_guard_for_value_only_receiver() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sender = just_value(1).then(|x: i32| x + 1);
        assert!(sender.describe().may_fail);
        let op = connect(sender, ValueOnly(events.clone()));
        assert!(op.is_right());
        start(op);
        assert_eq!(&*events.borrow(), &[Event::Value(2)]);
    }

    #[test]
    fn test_guard_is_not_wrapped_twice() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let op = connect(just_value(1).capture_exc(), Recorder(events));
        assert!(op.is_right());
    }

    #[test]
    fn test_failure_delivered_once_to_accepting_receiver() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sender = just_value(1).then(|_: i32| -> i32 { raise(12) });
        start(connect(sender, Recorder(events.clone())));
        assert_eq!(&*events.borrow(), &[Event::Error(12)]);
    }

    #[test]
    fn test_failure_escapes_value_only_receiver() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sender = just_value(1).then(|_: i32| -> i32 { raise(12) });
        let op = connect(sender, ValueOnly(events.clone()));
        let escaped = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| start(op)));
        let failure = Failure::from_panic(escaped.unwrap_err());
        assert_eq!(failure.downcast_ref::<i32>(), Some(&12));
        assert!(events.borrow().is_empty());
    }
}
