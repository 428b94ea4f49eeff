//! Starting a pipeline
//!
//! This module provides the source stages that begin a sender chain.

mod just;

// Re-export building blocks
pub use just::{Just, JustOp, just_value};
