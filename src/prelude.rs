//! Commonly used imports
//!
//! Use `use exe::prelude::*;` for quick access to the most common types and functions.

// Core types
pub use crate::{Descriptor, Failure, Operation, Receiver, Sender};

// Sources and combinators
pub use crate::build::just_value;
pub use crate::compose::{capture_exc, catch_exc, then};

// Failure capability
pub use crate::{no_fail, raise};

// Execution
pub use crate::{connect, start, sync_await, try_sync_await};
