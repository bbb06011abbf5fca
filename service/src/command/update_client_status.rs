//! [`Command`] for updating a [`client::Status`].

use common::operations::{By, Select, Update};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{client, Client},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for updating a [`client::Status`].
#[derive(Clone, Copy, Debug)]
pub struct UpdateClientStatus {
    /// ID of the [`Client`] which [`client::Status`] should be updated.
    pub client_id: client::Id,

    /// New [`client::Status`] of the [`Client`].
    pub status: client::Status,
}

impl<Db> Command<UpdateClientStatus> for Service<Db>
where
    Db: Database<
            Select<By<Option<Client>, client::Id>>,
            Ok = Option<Client>,
            Err = Traced<database::Error>,
        > + Database<
            Update<(client::Id, client::Draft)>,
            Ok = Option<Client>,
            Err = Traced<database::Error>,
        >,
{
    type Ok = Client;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateClientStatus,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateClientStatus {
            client_id,
            status,
        } = cmd;

        let client = self
            .database()
            .execute(Select(By::<Option<Client>, _>::new(client_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::ClientNotExists(client_id))
            .map_err(tracerr::wrap!())?;
        if client.status == status {
            return Ok(client);
        }

        let draft = client::Draft {
            status,
            ..client.into()
        };
        self.database()
            .execute(Update((client_id, draft)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            // `Client` may be deleted concurrently.
            .ok_or(E::ClientNotExists(client_id))
            .map_err(tracerr::wrap!())
    }
}

/// Error of [`UpdateClientStatus`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Client`] doesn't exist.
    #[display("`Client(id: {_0})` does not exist")]
    #[from(ignore)]
    ClientNotExists(#[error(not(source))] client::Id),
}
