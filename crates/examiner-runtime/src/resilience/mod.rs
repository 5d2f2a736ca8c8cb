//! Resilience patterns for examiner-runtime.
//!
//! Bounded, opt-in retry of transient oracle failures.

mod retry;

pub use retry::with_retry;
