//! Repository port traits
//!
//! These traits define the interface for entity storage. Every operation is
//! linearizable with respect to other operations on the same repository; no
//! ordering is promised across repositories. Implementations hand out copies,
//! never references into their storage.

use async_trait::async_trait;

use crate::domain::entities::{Order, OrderId, Product, ProductId, User, UserId};
use crate::error::DomainError;

/// Repository for Product entities
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert a product. `Conflict` if its id is already stored.
    async fn create(&self, product: &Product) -> Result<(), DomainError>;

    /// Replace a stored product wholesale. `NotFound` if absent.
    async fn update(&self, product: &Product) -> Result<(), DomainError>;

    /// Remove a product. `NotFound` if absent.
    async fn delete(&self, id: &ProductId) -> Result<(), DomainError>;

    /// Find a product by ID
    async fn get_by_id(&self, id: &ProductId) -> Result<Product, DomainError>;

    /// Snapshot of all products, in no particular order
    async fn list(&self) -> Result<Vec<Product>, DomainError>;
}

/// Repository for User entities
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user. `Conflict` on a duplicate id or email.
    async fn create(&self, user: &User) -> Result<(), DomainError>;

    /// Find a user by ID
    async fn get_by_id(&self, id: &UserId) -> Result<User, DomainError>;

    /// Find a user by exact, case-sensitive email
    async fn get_by_email(&self, email: &str) -> Result<User, DomainError>;

    /// Snapshot of all users, in no particular order
    async fn list(&self) -> Result<Vec<User>, DomainError>;
}

/// Repository for Order entities
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Insert an order. `Conflict` if its id is already stored.
    async fn create(&self, order: &Order) -> Result<(), DomainError>;

    /// Find an order by ID
    async fn get_by_id(&self, id: &OrderId) -> Result<Order, DomainError>;

    /// Snapshot of all orders, in no particular order
    async fn list(&self) -> Result<Vec<Order>, DomainError>;
}
