//! Adapters layer
//!
//! Implementations of port traits for storage backends.

pub mod memory;

pub use memory::{InMemoryOrderRepository, InMemoryProductRepository, InMemoryUserRepository};
