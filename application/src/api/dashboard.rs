//! [`Dashboard`]-related definitions.

use common::Amount;
use derive_more::{From, Into};
use juniper::graphql_object;
use service::read;

use crate::{
    api::{self, property::Property},
    AsError as _, Context, Error,
};

/// Summary of the agency activity.
#[derive(Clone, Debug, From, Into)]
pub struct Dashboard(read::Stats);

/// Summary of the agency activity.
#[graphql_object(context = Context)]
impl Dashboard {
    /// Total number of `Property` listings.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Dashboard.totalListings",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn total_listings(&self, ctx: &Context) -> Result<i32, Error> {
        count(self.0.total_listings, ctx)
    }

    /// Number of `AVAILABLE` `Property` listings.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Dashboard.availableListings",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn available_listings(&self, ctx: &Context) -> Result<i32, Error> {
        count(self.0.available_listings, ctx)
    }

    /// Total number of `Client`s.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Dashboard.totalClients",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn total_clients(&self, ctx: &Context) -> Result<i32, Error> {
        count(self.0.total_clients, ctx)
    }

    /// Commission earned on the `SOLD` `Property`s.
    #[must_use]
    pub fn revenue(&self) -> Amount {
        self.0.revenue
    }

    /// Most recent `Property` listings.
    #[must_use]
    pub fn recent_properties(&self) -> Vec<Property> {
        self.0.recent.iter().cloned().map(Into::into).collect()
    }
}

/// Converts the provided `count` into a GraphQL integer.
fn count(count: usize, ctx: &Context) -> Result<i32, Error> {
    i32::try_from(count).map_err(|e| ctx.error()(e.into_error()))
}
