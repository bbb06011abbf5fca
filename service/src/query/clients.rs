//! [`Query`] collection related to the multiple [`Client`]s.

use common::operations::{By, Select};
use derive_more::From;
use tracerr::Traced;

use crate::{
    domain::Client,
    infra::{database, Database},
    read::client::search::Criteria,
    Query, Service,
};

use super::DatabaseQuery;

/// Queries all the [`Client`]s in their store order.
pub type All = DatabaseQuery<By<Vec<Client>, ()>>;

/// Queries the [`Client`]s matching the provided [`Criteria`], in their
/// store order.
#[derive(Clone, Debug, Default, From)]
pub struct Search(pub Criteria);

impl<Db> Query<Search> for Service<Db>
where
    Db: Database<
        Select<By<Vec<Client>, ()>>,
        Ok = Vec<Client>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Vec<Client>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Search(criteria): Search,
    ) -> Result<Self::Ok, Self::Err> {
        let records = self
            .database()
            .execute(Select(By::new(())))
            .await
            .map_err(tracerr::wrap!())?;

        Ok(criteria.apply(&records))
    }
}
