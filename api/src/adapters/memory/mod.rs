//! In-memory adapters
//!
//! Implementations of repository traits backed by process memory. State is
//! lost on restart.

pub mod order_repo;
pub mod product_repo;
pub mod store;
pub mod user_repo;

pub use order_repo::InMemoryOrderRepository;
pub use product_repo::InMemoryProductRepository;
pub use user_repo::InMemoryUserRepository;
