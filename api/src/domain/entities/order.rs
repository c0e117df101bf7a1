//! Order domain entity
//!
//! An order records a user's purchase of one or more products. Orders are
//! immutable after placement; the total is fixed at placement time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::product::ProductId;
use super::user::UserId;
use crate::error::DomainError;

/// Unique identifier for an order
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub String);

impl OrderId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl Default for OrderId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for OrderId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for OrderId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A product purchase entry within an order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Weak reference; the product may be deleted later
    pub product_id: ProductId,
    pub quantity: i64,
}

impl OrderItem {
    pub fn new(product_id: impl Into<ProductId>, quantity: i64) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
        }
    }
}

/// A customer's purchase order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub items: Vec<OrderItem>,
    /// Sum of price x quantity using prices read at placement
    pub total: f64,
    pub created_at: DateTime<Utc>,
}

/// An order that has not been priced or persisted yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub user_id: UserId,
    pub items: Vec<OrderItem>,
}

impl NewOrder {
    pub fn new(user_id: impl Into<UserId>, items: Vec<OrderItem>) -> Self {
        Self {
            user_id: user_id.into(),
            items,
        }
    }

    /// Check structural well-formedness before any store is consulted
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.user_id.is_empty() {
            return Err(DomainError::Validation("user_id is required".to_string()));
        }
        if self.items.is_empty() {
            return Err(DomainError::Validation(
                "order must contain at least one item".to_string(),
            ));
        }
        for item in &self.items {
            if item.product_id.is_empty() {
                return Err(DomainError::Validation(
                    "product_id is required for each item".to_string(),
                ));
            }
            if item.quantity <= 0 {
                return Err(DomainError::Validation(
                    "item quantity must be positive".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Stamp the order with an identifier, its total and the current time
    pub fn place(self, total: f64) -> Order {
        Order {
            id: OrderId::new(),
            user_id: self.user_id,
            items: self.items,
            total,
            created_at: Utc::now(),
        }
    }
}
