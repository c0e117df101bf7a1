//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.
//! Every call generates a fresh identifier.

use crate::domain::entities::{Product, ProductDetails, User};

/// Product attributes with the given price and stock
pub fn product_details(price: f64, stock: i64) -> ProductDetails {
    ProductDetails {
        name: "Test Product".to_string(),
        description: "A product for tests".to_string(),
        price,
        stock,
    }
}

/// Create a test product with the given price and stock
pub fn test_product(price: f64, stock: i64) -> Product {
    Product::new(product_details(price, stock))
}

/// Create a test user with a specific email
pub fn test_user(email: &str) -> User {
    User::new("Test User", email)
}
