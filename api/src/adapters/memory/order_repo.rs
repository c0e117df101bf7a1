//! In-memory adapter for OrderRepository

use async_trait::async_trait;

use super::store::InMemoryStore;
use crate::domain::entities::{Order, OrderId};
use crate::domain::ports::OrderRepository;
use crate::error::DomainError;

/// In-memory implementation of OrderRepository
#[derive(Debug, Default)]
pub struct InMemoryOrderRepository {
    store: InMemoryStore<Order>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self {
            store: InMemoryStore::new(),
        }
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn create(&self, order: &Order) -> Result<(), DomainError> {
        self.store.create(order.clone())
    }

    async fn get_by_id(&self, id: &OrderId) -> Result<Order, DomainError> {
        self.store.get_by_id(id)
    }

    async fn list(&self) -> Result<Vec<Order>, DomainError> {
        self.store.list()
    }
}
