//! [`Command`] for creating a new [`Property`].

use common::operations::Insert;
use tracerr::Traced;

use crate::{
    domain::{property, Property},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Property`].
#[derive(Clone, Debug)]
pub struct CreateProperty {
    /// Body of a new [`Property`].
    pub draft: property::Draft,
}

impl<Db> Command<CreateProperty> for Service<Db>
where
    Db: Database<
        Insert<property::Draft>,
        Ok = Property,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Property;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateProperty,
    ) -> Result<Self::Ok, Self::Err> {
        let CreateProperty { draft } = cmd;

        self.database()
            .execute(Insert(draft))
            .await
            .map_err(tracerr::wrap!())
    }
}

/// Error of [`CreateProperty`] [`Command`] execution.
pub type ExecutionError = database::Error;
