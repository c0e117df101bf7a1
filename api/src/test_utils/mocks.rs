//! Test doubles for port traits

use async_trait::async_trait;

use crate::adapters::InMemoryProductRepository;
use crate::domain::entities::{Order, OrderId, Product, ProductId};
use crate::domain::ports::{OrderRepository, ProductRepository};
use crate::error::DomainError;

/// Order repository whose writes always fail
///
/// Used to exercise failures after the stock decrement has been applied.
pub struct FailingOrderRepository;

#[async_trait]
impl OrderRepository for FailingOrderRepository {
    async fn create(&self, _order: &Order) -> Result<(), DomainError> {
        Err(DomainError::Internal("order store unavailable".to_string()))
    }

    async fn get_by_id(&self, id: &OrderId) -> Result<Order, DomainError> {
        Err(DomainError::NotFound(format!("Order {} not found", id)))
    }

    async fn list(&self) -> Result<Vec<Order>, DomainError> {
        Ok(Vec::new())
    }
}

/// Product repository that refuses stock writes for one product
///
/// Everything else is served by a real in-memory repository, so a placement
/// can decrement earlier products before hitting the refused one.
pub struct FailingUpdateProductRepository {
    pub inner: InMemoryProductRepository,
    pub refuse: ProductId,
}

#[async_trait]
impl ProductRepository for FailingUpdateProductRepository {
    async fn create(&self, product: &Product) -> Result<(), DomainError> {
        self.inner.create(product).await
    }

    async fn update(&self, product: &Product) -> Result<(), DomainError> {
        if product.id == self.refuse {
            return Err(DomainError::NotFound(format!(
                "Product {} not found",
                product.id
            )));
        }
        self.inner.update(product).await
    }

    async fn delete(&self, id: &ProductId) -> Result<(), DomainError> {
        self.inner.delete(id).await
    }

    async fn get_by_id(&self, id: &ProductId) -> Result<Product, DomainError> {
        self.inner.get_by_id(id).await
    }

    async fn list(&self) -> Result<Vec<Product>, DomainError> {
        self.inner.list().await
    }
}
