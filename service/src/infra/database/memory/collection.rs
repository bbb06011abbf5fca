//! [`Collection`] of in-memory records.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::{client, property, Client, Property};

/// Record stored in a [`Collection`].
pub(super) trait Record: Clone {
    /// Identifier of this [`Record`].
    type Id: Copy + Eq + From<u32> + Into<u32>;

    /// Returns the identifier of this [`Record`].
    fn id(&self) -> Self::Id;
}

impl Record for Property {
    type Id = property::Id;

    fn id(&self) -> Self::Id {
        self.id
    }
}

impl Record for Client {
    type Id = client::Id;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Shared ordered list of [`Record`]s.
///
/// Every read returns copies, so callers never observe the inner state.
#[derive(Debug)]
pub(super) struct Collection<T>(Arc<RwLock<Vec<T>>>);

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self::from(Vec::new())
    }
}

impl<T> From<Vec<T>> for Collection<T> {
    fn from(records: Vec<T>) -> Self {
        Self(Arc::new(RwLock::new(records)))
    }
}

impl<T: Record> Collection<T> {
    /// Returns copies of all the [`Record`]s in their store order.
    pub(super) async fn all(&self) -> Vec<T> {
        self.0.read().await.clone()
    }

    /// Returns a copy of the [`Record`] with the provided `id`, if any.
    pub(super) async fn get(&self, id: T::Id) -> Option<T> {
        self.0.read().await.iter().find(|r| r.id() == id).cloned()
    }

    /// Appends a new [`Record`] built with the next free identifier.
    ///
    /// The next identifier is one more than the maximal existing one, or `1`
    /// for an empty [`Collection`]. [`None`] is returned if identifiers are
    /// exhausted.
    pub(super) async fn insert(
        &self,
        build: impl FnOnce(T::Id) -> T,
    ) -> Option<T> {
        let mut records = self.0.write().await;

        let id = match records.iter().map(|r| Into::<u32>::into(r.id())).max() {
            Some(max) => max.checked_add(1)?,
            None => 1,
        };
        let record = build(id.into());
        records.push(record.clone());
        Some(record)
    }

    /// Modifies the [`Record`] with the provided `id` in place, returning its
    /// modified copy.
    ///
    /// [`None`] is returned if there is no such [`Record`].
    pub(super) async fn update(
        &self,
        id: T::Id,
        modify: impl FnOnce(&mut T),
    ) -> Option<T> {
        let mut records = self.0.write().await;

        let record = records.iter_mut().find(|r| r.id() == id)?;
        modify(record);
        Some(record.clone())
    }

    /// Removes the [`Record`] with the provided `id`, returning it.
    ///
    /// [`None`] is returned if there is no such [`Record`].
    pub(super) async fn remove(&self, id: T::Id) -> Option<T> {
        let mut records = self.0.write().await;

        let pos = records.iter().position(|r| r.id() == id)?;
        Some(records.remove(pos))
    }
}
