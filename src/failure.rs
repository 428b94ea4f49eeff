//! The single opaque failure payload carried through a pipeline.
//!
//! A pipeline either produces one value or one [`Failure`]. Failures are raised by
//! unwinding ([`raise`]) and captured by a guard stage, which turns the caught panic
//! payload back into a [`Failure`] for the receiver's failure path.
//!
//! ```rust
//! use exe::Failure;
//!
//! let failure = Failure::new(12_i32);
//! assert!(failure.is::<i32>());
//! assert_eq!(failure.downcast_ref::<i32>(), Some(&12));
//! ```

use std::any::Any;
use std::fmt;
use std::panic;

use thiserror::Error;

/// Contract violations detected by the pipeline core itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    #[error("operation returned without delivering an outcome")]
    NoOutcome,
}

/// An opaque failure payload.
///
/// No failure taxonomy is modelled: the payload is whatever value was raised,
/// boxed as `dyn Any + Send`. Handlers recover the concrete value with
/// [`downcast`](Failure::downcast) and friends.
pub struct Failure(Box<dyn Any + Send + 'static>);

impl Failure {
    /// Wrap a value as a failure payload.
    pub fn new<E>(payload: E) -> Self
    where
        E: Any + Send + 'static,
    {
        Self::from_panic(Box::new(payload))
    }

    /// Build a failure from a caught panic payload.
    ///
    /// A payload that is itself a raised `Failure` is unwrapped rather than nested.
    pub fn from_panic(payload: Box<dyn Any + Send + 'static>) -> Self {
        match payload.downcast::<Failure>() {
            Ok(inner) => *inner,
            Err(payload) => Failure(payload),
        }
    }

    /// Returns `true` if the payload is of type `E`.
    pub fn is<E: Any>(&self) -> bool {
        self.0.is::<E>()
    }

    pub fn downcast_ref<E: Any>(&self) -> Option<&E> {
        self.0.downcast_ref::<E>()
    }

    /// Take the payload out as an `E`, or get the failure back unchanged.
    pub fn downcast<E: Any>(self) -> Result<E, Self> {
        match self.0.downcast::<E>() {
            Ok(e) => Ok(*e),
            Err(payload) => Err(Failure(payload)),
        }
    }

    /// Take the payload out as an `E`, re-raising the failure if it holds anything else.
    ///
    /// Convenient inside recovery handlers that only know how to handle one payload
    /// type: any other payload keeps propagating as a failure of the handler itself.
    ///
    /// ```rust
    /// use exe::Failure;
    ///
    /// let code: i32 = Failure::new(7_i32).downcast_or_resume();
    /// assert_eq!(code, 7);
    /// ```
    pub fn downcast_or_resume<E: Any>(self) -> E {
        match self.downcast::<E>() {
            Ok(e) => e,
            Err(failure) => failure.resume(),
        }
    }

    /// The payload as text, when it was raised with a string (as `panic!` does).
    pub fn message(&self) -> Option<&str> {
        if let Some(s) = self.0.downcast_ref::<&'static str>() {
            Some(*s)
        } else if let Some(s) = self.0.downcast_ref::<String>() {
            Some(s.as_str())
        } else {
            None
        }
    }

    pub fn into_payload(self) -> Box<dyn Any + Send + 'static> {
        self.0
    }

    /// Re-raise the failure with its original payload.
    pub fn resume(self) -> ! {
        panic::resume_unwind(self.0)
    }
}

impl fmt::Debug for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Failure").field(&format_args!("{}", self)).finish()
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(msg) = self.message() {
            f.write_str(msg)
        } else if let Some(err) = self.downcast_ref::<PipelineError>() {
            write!(f, "{err}")
        } else {
            f.write_str("opaque failure payload")
        }
    }
}

impl From<PipelineError> for Failure {
    fn from(err: PipelineError) -> Self {
        Failure::new(err)
    }
}

/// Raise `payload` as a pipeline failure.
///
/// Unwinds to the nearest guard stage, which delivers the payload to its receiver's
/// failure path. Without a guard the unwind escapes the pipeline. The panic hook
/// is not invoked: a raised failure is pipeline control flow, not a crash report.
pub fn raise<E>(payload: E) -> !
where
    E: Any + Send + 'static,
{
    Failure::new(payload).resume()
}
