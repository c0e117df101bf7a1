//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate between domain entities and repository ports.

pub mod order_service;
pub mod product_service;
pub mod user_service;

pub use order_service::OrderService;
pub use product_service::ProductService;
pub use user_service::UserService;
