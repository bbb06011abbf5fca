//! [`Command`] for updating a [`property::Status`].

use common::operations::{By, Select, Update};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{property, Property},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for updating a [`property::Status`].
#[derive(Clone, Copy, Debug)]
pub struct UpdatePropertyStatus {
    /// ID of the [`Property`] which [`property::Status`] should be updated.
    pub property_id: property::Id,

    /// New [`property::Status`] of the [`Property`].
    pub status: property::Status,
}

impl<Db> Command<UpdatePropertyStatus> for Service<Db>
where
    Db: Database<
            Select<By<Option<Property>, property::Id>>,
            Ok = Option<Property>,
            Err = Traced<database::Error>,
        > + Database<
            Update<(property::Id, property::Draft)>,
            Ok = Option<Property>,
            Err = Traced<database::Error>,
        >,
{
    type Ok = Property;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdatePropertyStatus,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdatePropertyStatus {
            property_id,
            status,
        } = cmd;

        let property = self
            .database()
            .execute(Select(By::<Option<Property>, _>::new(property_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::PropertyNotExists(property_id))
            .map_err(tracerr::wrap!())?;
        if property.status == status {
            return Ok(property);
        }

        let draft = property::Draft {
            status,
            ..property.into()
        };
        self.database()
            .execute(Update((property_id, draft)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            // `Property` may be deleted concurrently.
            .ok_or(E::PropertyNotExists(property_id))
            .map_err(tracerr::wrap!())
    }
}

/// Error of [`UpdatePropertyStatus`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Property`] doesn't exist.
    #[display("`Property(id: {_0})` does not exist")]
    #[from(ignore)]
    PropertyNotExists(#[error(not(source))] property::Id),
}
