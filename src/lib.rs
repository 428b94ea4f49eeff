//! # Exe: Composable Sender/Receiver Pipelines
//!
//! Build a pipeline as a plan of stages, then connect it to a consumer and run it.
//! Every stage carries a static [`Descriptor`] saying what it yields and whether it
//! can fail at all.
//!
//! ## Core Traits
//!
//! - **[`Sender`]**: an immutable plan for producing one value
//! - **[`Receiver`]**: a consumer of a value and, optionally, of a [`Failure`]
//! - **[`Operation`]**: a connected pipeline, started exactly once
//!
//! ## Failure Capability
//!
//! A pipeline's `may_fail` is the union of its stages' own capability. Plain
//! closures are assumed to be able to fail; [`no_fail`] declares one failure-free.
//! [`connect`] guards every receiver that accepts failures with [`CaptureExc`], so
//! a failure the descriptors did not predict still reaches such a receiver.
//!
//! ## Example
//!
//! ```
//! use exe::*;
//!
//! let n = just_value(1)
//!     | catch_exc(|e: Failure| e.downcast_or_resume::<i32>() * 2) // inert: nothing upstream can fail
//!     | then(|_: i32| -> i32 { raise(12) })
//!     | catch_exc(|e: Failure| e.downcast_or_resume::<i32>() * 3)
//!     | sync_await();
//! assert_eq!(n, 36);
//! ```
//!
//! ## Common Functions
//!
//! **Building Stages:**
//! - [`just_value(v)`](just_value) - Start a pipeline with a value
//! - [`then(f)`](then) - Transform the value
//! - [`catch_exc(h)`](catch_exc) - Recover from an upstream failure
//! - [`capture_exc()`](capture_exc) - Guard the pipeline so far
//!
//! **Execution:**
//! - [`sync_await()`](sync_await) - Run to completion, re-raising failures
//! - [`try_sync_await()`](try_sync_await) - Run to completion, returning `Result`
//! - [`connect(sender, receiver)`](connect) / [`start(op)`](start) - For custom receivers

pub mod build;
pub mod compose;
mod connect;
mod describe;
mod failure;
mod handler;
mod pipe;
pub mod prelude;
mod sender;

pub use build::*;
pub use compose::*;
pub use connect::{Connection, connect, start};
pub use describe::*;
pub use failure::*;
pub use handler::*;
pub use pipe::Adaptor;
pub use sender::*;
