//! In-memory adapter for UserRepository

use async_trait::async_trait;

use super::store::InMemoryStore;
use crate::domain::entities::{User, UserId};
use crate::domain::ports::UserRepository;
use crate::error::DomainError;

/// In-memory implementation of UserRepository
///
/// Email uniqueness is enforced inside `create` under the store's write lock,
/// in addition to any pre-check done by callers.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    store: InMemoryStore<User>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            store: InMemoryStore::new(),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &User) -> Result<(), DomainError> {
        self.store.create_unless(user.clone(), |existing, new| {
            (existing.email == new.email)
                .then(|| format!("User with email '{}' already exists", new.email))
        })
    }

    async fn get_by_id(&self, id: &UserId) -> Result<User, DomainError> {
        self.store.get_by_id(id)
    }

    async fn get_by_email(&self, email: &str) -> Result<User, DomainError> {
        self.store
            .find(|u| u.email == email)?
            .ok_or_else(|| DomainError::NotFound(format!("User with email '{}' not found", email)))
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        self.store.list()
    }
}
