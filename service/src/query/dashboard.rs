//! [`Dashboard`] definition.

use common::operations::{By, Select};
use futures::future;
use tracerr::Traced;

use crate::{
    domain::{Client, Property},
    infra::{database, Database},
    read, Query, Service,
};

/// [`Query`] summarizing the agency activity into [`read::Stats`].
#[derive(Clone, Copy, Debug, Default)]
pub struct Dashboard;

impl<Db> Query<Dashboard> for Service<Db>
where
    Db: Database<
            Select<By<Vec<Property>, ()>>,
            Ok = Vec<Property>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<Client>, ()>>,
            Ok = Vec<Client>,
            Err = Traced<database::Error>,
        >,
{
    type Ok = read::Stats;
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Dashboard) -> Result<Self::Ok, Self::Err> {
        let (properties, clients) = future::try_join(
            self.database()
                .execute(Select(By::<Vec<Property>, _>::new(()))),
            self.database().execute(Select(By::<Vec<Client>, _>::new(()))),
        )
        .await
        .map_err(tracerr::wrap!())?;

        Ok(read::Stats::new(
            &properties,
            &clients,
            self.config().commission,
            self.config().recent_limit,
        ))
    }
}
