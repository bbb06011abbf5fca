//! [`Command`] for creating a new [`Client`].

use common::operations::Insert;
use tracerr::Traced;

use crate::{
    domain::{client, Client},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Client`].
#[derive(Clone, Debug)]
pub struct CreateClient {
    /// Body of a new [`Client`].
    pub draft: client::Draft,
}

impl<Db> Command<CreateClient> for Service<Db>
where
    Db: Database<
        Insert<client::Draft>,
        Ok = Client,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Client;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateClient,
    ) -> Result<Self::Ok, Self::Err> {
        let CreateClient { draft } = cmd;

        self.database()
            .execute(Insert(draft))
            .await
            .map_err(tracerr::wrap!())
    }
}

/// Error of [`CreateClient`] [`Command`] execution.
pub type ExecutionError = database::Error;
