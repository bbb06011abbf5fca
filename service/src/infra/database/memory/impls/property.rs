//! [`Property`]-related [`Database`] implementations.

use common::{
    operations::{By, Delete, Insert, Select, Update},
    DateTime,
};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{property, Property},
    infra::{
        database::{self, memory, Memory},
        Database,
    },
};

impl Database<Select<By<Vec<Property>, ()>>> for Memory {
    type Ok = Vec<Property>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<Property>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.delay().await;

        Ok(self.properties.all().await)
    }
}

impl Database<Select<By<Option<Property>, property::Id>>> for Memory {
    type Ok = Option<Property>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Property>, property::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.delay().await;

        Ok(self.properties.get(by.into_inner()).await)
    }
}

impl Database<Insert<property::Draft>> for Memory {
    type Ok = Property;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(draft): Insert<property::Draft>,
    ) -> Result<Self::Ok, Self::Err> {
        self.delay().await;

        let now = DateTime::now();
        let property = self
            .properties
            .insert(|id| Property::new(id, draft, now.coerce()))
            .await
            .ok_or_else(|| {
                tracerr::new!(database::Error::from(
                    memory::Error::IdsExhausted,
                ))
            })?;
        log::debug!("inserted `Property(id: {})`", property.id);

        Ok(property)
    }
}

impl Database<Update<(property::Id, property::Draft)>> for Memory {
    type Ok = Option<Property>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update((id, draft)): Update<(property::Id, property::Draft)>,
    ) -> Result<Self::Ok, Self::Err> {
        self.delay().await;

        let now = DateTime::now();
        let property = self
            .properties
            .update(id, |p| p.replace(draft, now.coerce()))
            .await;
        if property.is_some() {
            log::debug!("updated `Property(id: {id})`");
        }

        Ok(property)
    }
}

impl Database<Delete<By<Property, property::Id>>> for Memory {
    type Ok = Option<Property>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Property, property::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.delay().await;

        let id = by.into_inner();
        let property = self.properties.remove(id).await;
        if property.is_some() {
            log::debug!("deleted `Property(id: {id})`");
        }

        Ok(property)
    }
}

#[cfg(test)]
mod spec {
    use common::{
        operations::{By, Delete, Insert, Select, Update},
        Amount,
    };

    use crate::{
        domain::{property, Property},
        infra::{
            database::memory::{self, collection::Collection, Latency, Seed},
            Database as _, Memory,
        },
        read::property::fixture::{draft, property},
    };

    fn memory_with(records: Vec<Property>) -> Memory {
        Memory {
            properties: Collection::from(records),
            ..Memory::new(memory::Config {
                latency: Latency::ZERO,
            })
        }
    }

    async fn all(memory: &Memory) -> Vec<Property> {
        memory
            .execute(Select(By::<Vec<Property>, _>::new(())))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn assigns_next_id_after_max() {
        let memory = memory_with(vec![
            property(7, 100_000, 1),
            property(2, 200_000, 2),
        ]);

        let created = memory
            .execute(Insert(draft("New listing", 300_000)))
            .await
            .unwrap();

        assert_eq!(u32::from(created.id), 8);
        assert_eq!(created.created_at, created.updated_at.coerce());
        assert_eq!(all(&memory).await.last(), Some(&created));
    }

    #[tokio::test]
    async fn assigns_first_id_in_empty_collection() {
        let memory = memory_with(vec![]);

        let created = memory
            .execute(Insert(draft("First listing", 300_000)))
            .await
            .unwrap();

        assert_eq!(u32::from(created.id), 1);
    }

    #[tokio::test]
    async fn fails_when_ids_are_exhausted() {
        let memory = memory_with(vec![property(u32::MAX, 100_000, 1)]);

        let res = memory.execute(Insert(draft("Overflow", 300_000))).await;

        assert!(res.is_err());
        assert_eq!(all(&memory).await.len(), 1);
    }

    #[tokio::test]
    async fn misses_nonexistent_id_without_changes() {
        let memory = memory_with(vec![property(1, 100_000, 1)]);
        let before = all(&memory).await;

        let found = memory
            .execute(Select(By::<Option<Property>, _>::new(
                property::Id::from(5),
            )))
            .await
            .unwrap();
        let updated = memory
            .execute(Update((
                property::Id::from(5),
                draft("Ghost", 1),
            )))
            .await
            .unwrap();
        let deleted = memory
            .execute(Delete(By::<Property, _>::new(property::Id::from(5))))
            .await
            .unwrap();

        assert_eq!(found, None);
        assert_eq!(updated, None);
        assert_eq!(deleted, None);
        assert_eq!(all(&memory).await, before);
    }

    #[tokio::test]
    async fn replaces_body_keeping_identity() {
        let original = property(3, 100_000, 1);
        let memory = memory_with(vec![original.clone()]);

        let updated = memory
            .execute(Update((original.id, draft("Renovated", 150_000))))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, original.id);
        assert_eq!(updated.created_at, original.created_at);
        assert!(updated.updated_at > original.updated_at);
        assert_eq!(updated.price, Amount::from(150_000));
        assert_eq!(all(&memory).await, [updated]);
    }

    #[tokio::test]
    async fn returns_copies() {
        let memory = memory_with(vec![property(1, 100_000, 1)]);

        let mut copy = all(&memory).await.remove(0);
        copy.status = property::Status::Sold;

        assert_ne!(all(&memory).await[0].status, copy.status);
    }

    #[tokio::test]
    async fn deletes_records() {
        let memory = memory_with(vec![
            property(1, 100_000, 1),
            property(2, 200_000, 2),
        ]);

        let deleted = memory
            .execute(Delete(By::<Property, _>::new(property::Id::from(1))))
            .await
            .unwrap();

        assert_eq!(deleted.map(|p| u32::from(p.id)), Some(1));
        assert_eq!(
            all(&memory)
                .await
                .into_iter()
                .map(|p| u32::from(p.id))
                .collect::<Vec<_>>(),
            [2],
        );
    }

    #[tokio::test]
    async fn shares_records_between_clones() {
        let memory =
            Memory::seeded(memory::Config::default(), Seed::default()).unwrap();
        let memory = Memory {
            latency: Latency::ZERO,
            ..memory
        };
        let clone = memory.clone();

        _ = clone
            .execute(Insert(draft("Shared", 100_000)))
            .await
            .unwrap();

        assert_eq!(all(&memory).await.len(), 1);
    }
}
