//! Product domain entity
//!
//! Represents a purchasable product and its available inventory.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Unique identifier for a product
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub String);

impl ProductId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for ProductId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A product that can be purchased
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    /// Unit price, strictly positive
    pub price: f64,
    /// Units on hand, never negative
    pub stock: i64,
}

/// Caller-supplied product attributes for create and wholesale update
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDetails {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: i64,
}

impl Product {
    /// Build a product with a freshly generated identifier
    pub fn new(details: ProductDetails) -> Self {
        Self::with_id(ProductId::new(), details)
    }

    pub fn with_id(id: ProductId, details: ProductDetails) -> Self {
        Self {
            id,
            name: details.name,
            description: details.description,
            price: details.price,
            stock: details.stock,
        }
    }

    /// Check structural well-formedness before persistence
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.is_empty() {
            return Err(DomainError::Validation("name is required".to_string()));
        }
        if self.price.is_nan() || self.price <= 0.0 {
            return Err(DomainError::Validation("price must be positive".to_string()));
        }
        if self.price.is_infinite() {
            return Err(DomainError::Validation("price must be finite".to_string()));
        }
        if self.stock < 0 {
            return Err(DomainError::Validation(
                "stock cannot be negative".to_string(),
            ));
        }
        Ok(())
    }

    /// Whether `quantity` units can be taken from stock
    pub fn has_stock_for(&self, quantity: i64) -> bool {
        self.stock >= quantity
    }
}
