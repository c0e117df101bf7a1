//! Test utilities
//!
//! Fixtures and hand-written test doubles for unit testing.
//!
//! Why manual doubles instead of mockall?
//! - The in-memory adapters already are the real storage, so most tests use them
//! - The only doubles needed are repositories that fail on demand
//! - Manual doubles are explicit and easy to debug

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
