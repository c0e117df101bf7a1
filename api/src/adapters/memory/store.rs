//! Generic concurrent in-memory store
//!
//! One `RwLock` per store instance: create/update/delete take the write lock,
//! get/list share the read lock. Locks are never held across an `.await`, and
//! every read hands back a clone so callers cannot mutate stored entities.

use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::entities::{Order, OrderId, Product, ProductId, User, UserId};
use crate::error::DomainError;

/// An entity that can live in an [`InMemoryStore`]
pub trait StoredEntity: Clone + Send + Sync {
    type Id: Clone + Eq + Hash + Display + Debug + Send + Sync;

    /// Human-readable entity name used in error messages
    const KIND: &'static str;

    fn id(&self) -> &Self::Id;
}

impl StoredEntity for Product {
    type Id = ProductId;
    const KIND: &'static str = "Product";

    fn id(&self) -> &ProductId {
        &self.id
    }
}

impl StoredEntity for User {
    type Id = UserId;
    const KIND: &'static str = "User";

    fn id(&self) -> &UserId {
        &self.id
    }
}

impl StoredEntity for Order {
    type Id = OrderId;
    const KIND: &'static str = "Order";

    fn id(&self) -> &OrderId {
        &self.id
    }
}

/// Keyed collection of one entity type guarded by a reader/writer lock
#[derive(Debug)]
pub struct InMemoryStore<E: StoredEntity> {
    entities: RwLock<HashMap<E::Id, E>>,
}

impl<E: StoredEntity> Default for InMemoryStore<E> {
    fn default() -> Self {
        Self {
            entities: RwLock::new(HashMap::new()),
        }
    }
}

impl<E: StoredEntity> InMemoryStore<E> {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<E::Id, E>>, DomainError> {
        self.entities
            .read()
            .map_err(|_| DomainError::Internal(format!("{} store lock poisoned", E::KIND)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<E::Id, E>>, DomainError> {
        self.entities
            .write()
            .map_err(|_| DomainError::Internal(format!("{} store lock poisoned", E::KIND)))
    }

    fn not_found(id: &E::Id) -> DomainError {
        DomainError::NotFound(format!("{} {} not found", E::KIND, id))
    }

    /// Insert a new entity. `Conflict` if the id is taken.
    pub fn create(&self, entity: E) -> Result<(), DomainError> {
        self.create_unless(entity, |_, _| None)
    }

    /// Insert a new entity unless `conflicts_with` objects to an existing one.
    ///
    /// The check runs under the write lock, so uniqueness rules beyond the id
    /// hold even when creations race.
    pub fn create_unless<F>(&self, entity: E, conflicts_with: F) -> Result<(), DomainError>
    where
        F: Fn(&E, &E) -> Option<String>,
    {
        let mut entities = self.write()?;

        if entities.contains_key(entity.id()) {
            return Err(DomainError::Conflict(format!(
                "{} {} already exists",
                E::KIND,
                entity.id()
            )));
        }
        if let Some(reason) = entities
            .values()
            .find_map(|existing| conflicts_with(existing, &entity))
        {
            return Err(DomainError::Conflict(reason));
        }

        entities.insert(entity.id().clone(), entity);
        Ok(())
    }

    /// Replace an existing entity wholesale. `NotFound` if absent.
    pub fn update(&self, entity: E) -> Result<(), DomainError> {
        let mut entities = self.write()?;

        match entities.get_mut(entity.id()) {
            Some(slot) => {
                *slot = entity;
                Ok(())
            }
            None => Err(Self::not_found(entity.id())),
        }
    }

    /// Remove an entity. `NotFound` if absent.
    pub fn delete(&self, id: &E::Id) -> Result<(), DomainError> {
        let mut entities = self.write()?;
        entities
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| Self::not_found(id))
    }

    pub fn get_by_id(&self, id: &E::Id) -> Result<E, DomainError> {
        let entities = self.read()?;
        entities.get(id).cloned().ok_or_else(|| Self::not_found(id))
    }

    /// Linear scan for the first entity matching `predicate`
    pub fn find<P>(&self, predicate: P) -> Result<Option<E>, DomainError>
    where
        P: Fn(&E) -> bool,
    {
        let entities = self.read()?;
        Ok(entities.values().find(|e| predicate(*e)).cloned())
    }

    /// Unordered snapshot of every stored entity
    pub fn list(&self) -> Result<Vec<E>, DomainError> {
        let entities = self.read()?;
        Ok(entities.values().cloned().collect())
    }

    #[cfg(test)]
    pub fn len(&self) -> Result<usize, DomainError> {
        Ok(self.read()?.len())
    }
}
