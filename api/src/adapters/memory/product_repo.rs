//! In-memory adapter for ProductRepository

use async_trait::async_trait;

use super::store::InMemoryStore;
use crate::domain::entities::{Product, ProductId};
use crate::domain::ports::ProductRepository;
use crate::error::DomainError;

/// In-memory implementation of ProductRepository
#[derive(Debug, Default)]
pub struct InMemoryProductRepository {
    store: InMemoryStore<Product>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self {
            store: InMemoryStore::new(),
        }
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, product: &Product) -> Result<(), DomainError> {
        self.store.create(product.clone())
    }

    async fn update(&self, product: &Product) -> Result<(), DomainError> {
        self.store.update(product.clone())
    }

    async fn delete(&self, id: &ProductId) -> Result<(), DomainError> {
        self.store.delete(id)
    }

    async fn get_by_id(&self, id: &ProductId) -> Result<Product, DomainError> {
        self.store.get_by_id(id)
    }

    async fn list(&self) -> Result<Vec<Product>, DomainError> {
        self.store.list()
    }
}
