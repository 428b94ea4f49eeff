//! Combining senders together
//!
//! Each combinator consumes an upstream sender and wraps it in a new one,
//! recomputing the descriptor from the upstream's and its own.

mod capture;
mod catch;
mod then;

// Re-export composition operations
pub use capture::{CaptureExc, CaptureExcAdaptor, CaptureExcOp, GuardReceiver, capture_exc};
pub use catch::{CatchExc, CatchExcAdaptor, CatchExcOp, CatchReceiver, catch_exc};
pub use then::{Then, ThenAdaptor, ThenOp, ThenReceiver, then};
