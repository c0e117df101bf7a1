//! Domain entities
//!
//! Pure domain models for the commerce core, each with its own
//! structural validator.

pub mod order;
pub mod product;
pub mod user;

pub use order::{NewOrder, Order, OrderId, OrderItem};
pub use product::{Product, ProductDetails, ProductId};
pub use user::{User, UserId};
