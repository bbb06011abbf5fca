//! [`Client`]-related [`Database`] implementations.

use common::{
    operations::{By, Delete, Insert, Select, Update},
    DateTime,
};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{client, Client},
    infra::{
        database::{self, memory, Memory},
        Database,
    },
};

impl Database<Select<By<Vec<Client>, ()>>> for Memory {
    type Ok = Vec<Client>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<Client>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.delay().await;

        Ok(self.clients.all().await)
    }
}

impl Database<Select<By<Option<Client>, client::Id>>> for Memory {
    type Ok = Option<Client>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Client>, client::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.delay().await;

        Ok(self.clients.get(by.into_inner()).await)
    }
}

impl Database<Insert<client::Draft>> for Memory {
    type Ok = Client;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(draft): Insert<client::Draft>,
    ) -> Result<Self::Ok, Self::Err> {
        self.delay().await;

        let client = self
            .clients
            .insert(|id| Client::new(id, draft, DateTime::now().coerce()))
            .await
            .ok_or_else(|| {
                tracerr::new!(database::Error::from(
                    memory::Error::IdsExhausted,
                ))
            })?;
        log::debug!("inserted `Client(id: {})`", client.id);

        Ok(client)
    }
}

impl Database<Update<(client::Id, client::Draft)>> for Memory {
    type Ok = Option<Client>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update((id, draft)): Update<(client::Id, client::Draft)>,
    ) -> Result<Self::Ok, Self::Err> {
        self.delay().await;

        let client = self.clients.update(id, |c| c.replace(draft)).await;
        if client.is_some() {
            log::debug!("updated `Client(id: {id})`");
        }

        Ok(client)
    }
}

impl Database<Delete<By<Client, client::Id>>> for Memory {
    type Ok = Option<Client>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Client, client::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.delay().await;

        let id = by.into_inner();
        let client = self.clients.remove(id).await;
        if client.is_some() {
            log::debug!("deleted `Client(id: {id})`");
        }

        Ok(client)
    }
}

#[cfg(test)]
mod spec {
    use common::operations::{By, Insert, Select, Update};

    use crate::{
        domain::{client, Client},
        infra::{
            database::memory::{self, collection::Collection, Latency},
            Database as _, Memory,
        },
        read::client::fixture::{client, draft},
    };

    fn memory_with(records: Vec<Client>) -> Memory {
        Memory {
            clients: Collection::from(records),
            ..Memory::new(memory::Config {
                latency: Latency::ZERO,
            })
        }
    }

    #[tokio::test]
    async fn creates_with_next_id() {
        let memory = memory_with(vec![
            client(4, "Ann Lee", "ann@lee.test", "555 0101"),
            client(9, "Bob Ray", "bob@ray.test", "555 0102"),
        ]);

        let created = memory
            .execute(Insert(draft("Cy Twombly", "cy@art.test", "555 0103")))
            .await
            .unwrap();

        assert_eq!(u32::from(created.id), 10);
    }

    #[tokio::test]
    async fn updates_keeping_creation_time() {
        let original = client(4, "Ann Lee", "ann@lee.test", "555 0101");
        let memory = memory_with(vec![original.clone()]);

        let mut body = draft("Ann Lee-Smith", "ann@smith.test", "555 0101");
        body.status = client::Status::Closed;
        let updated = memory
            .execute(Update((original.id, body)))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.created_at, original.created_at);
        assert_eq!(updated.status, client::Status::Closed);
        assert_eq!(
            memory
                .execute(Select(By::<Option<Client>, _>::new(original.id)))
                .await
                .unwrap(),
            Some(updated),
        );
    }

    #[tokio::test]
    async fn misses_nonexistent_id() {
        let memory = memory_with(vec![]);

        let updated = memory
            .execute(Update((
                client::Id::from(1),
                draft("Nobody", "no@body.test", "555 0100"),
            )))
            .await
            .unwrap();

        assert_eq!(updated, None);
        assert!(memory
            .execute(Select(By::<Vec<Client>, _>::new(())))
            .await
            .unwrap()
            .is_empty());
    }
}
