//! [`Query`] collection related to the multiple [`Property`]s.

use common::operations::{By, Select};
use derive_more::From;
use tracerr::Traced;

use crate::{
    domain::Property,
    infra::{database, Database},
    read::property::search::Criteria,
    Query, Service,
};

use super::DatabaseQuery;

/// Queries all the [`Property`]s in their store order.
pub type All = DatabaseQuery<By<Vec<Property>, ()>>;

/// Queries the [`Property`]s matching the provided [`Criteria`], ordered as
/// the [`Criteria`] require.
#[derive(Clone, Debug, Default, From)]
pub struct Search(pub Criteria);

impl<Db> Query<Search> for Service<Db>
where
    Db: Database<
        Select<By<Vec<Property>, ()>>,
        Ok = Vec<Property>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Vec<Property>;
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
