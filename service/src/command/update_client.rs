//! [`Command`] for updating a [`Client`].

use common::operations::Update;
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{client, Client},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for replacing the body of a [`Client`].
#[derive(Clone, Debug)]
pub struct UpdateClient {
    /// ID of the [`Client`] to be updated.
    pub client_id: client::Id,

    /// New body of the [`Client`].
    pub draft: client::Draft,
}

impl<Db> Command<UpdateClient> for Service<Db>
where
    Db: Database<
        Update<(client::Id, client::Draft)>,
        Ok = Option<Client>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Client;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateClient,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateClient { client_id, draft } = cmd;

        self.database()
            .execute(Update((client_id, draft)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::ClientNotExists(client_id))
            .map_err(tracerr::wrap!())
    }
}

/// Error of [`UpdateClient`] [`Command`] execution.
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
