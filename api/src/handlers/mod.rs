//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod orders;
pub mod products;
pub mod users;

pub use orders::{get_order, list_orders, place_order};
pub use products::{create_product, delete_product, get_product, list_products, update_product};
pub use users::{create_user, get_user, list_users};
