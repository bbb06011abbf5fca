//! GraphQL [`Query`]s definitions.

use juniper::graphql_object;
use service::{query, read, Query as _};

use crate::{api, AsError, Context, Error};

/// Root of all GraphQL queries.
#[derive(Clone, Copy, Debug)]
pub struct Query;

impl Query {
    /// Name of the [`tracing::Span`] for the queries.
    pub(crate) const SPAN_NAME: &'static str = "GraphQL query";
}

#[graphql_object(context = Context)]
impl Query {
    /// Returns the `Property` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `PROPERTY_NOT_EXISTS` - the `Property` with the specified ID does not
    ///                           exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "property",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn property(
        id: api::property::Id,
        ctx: &Context,
    ) -> Result<api::Property, Error> {
        ctx.service()
            .execute(query::property::ById(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Searches the `Property`s.
    ///
    /// The free-text `query` is matched case-insensitively against titles,
    /// locations and descriptions. Every `filter` field narrows the results,
    /// while blank or malformed ones are ignored. Results are ordered by the
    /// `sort` key, `NEWEST` by default.
    #[tracing::instrument(
        skip_all,
        fields(
            filter = ?filter,
            gql.name = "properties",
            otel.name = Self::SPAN_NAME,
            query = ?query,
            sort = ?sort,
        ),
    )]
    pub async fn properties(
        query: Option<String>,
        filter: Option<api::property::Filter>,
        sort: Option<api::property::Sort>,
        ctx: &Context,
    ) -> Result<Vec<api::Property>, Error> {
        let criteria = read::property::search::Criteria {
            text: query,
            filter: filter.unwrap_or_default().into(),
            sort: sort.unwrap_or_default().into(),
        };

        Ok(ctx
            .service()
            .execute(query::properties::Search(criteria))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    /// Returns the `Client` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `CLIENT_NOT_EXISTS` - the `Client` with the specified ID does not
    ///                         exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "client",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn client(
        id: api::client::Id,
        ctx: &Context,
    ) -> Result<api::Client, Error> {
        ctx.service()
            .execute(query::client::ById(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Searches the `Client`s.
    ///
    /// The free-text `query` is matched case-insensitively against names and
    /// emails, and verbatim against phone numbers. All the `Client`s are
    /// returned if it's omitted or blank.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "clients",
            otel.name = Self::SPAN_NAME,
            query = ?query,
        ),
    )]
    pub async fn clients(
        query: Option<String>,
        ctx: &Context,
    ) -> Result<Vec<api::Client>, Error> {
        let criteria = read::client::search::Criteria {
            text: query,
        };

        Ok(ctx
            .service()
            .execute(query::clients::Search(criteria))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    /// Returns the summary of the agency activity.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "dashboard",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn dashboard(ctx: &Context) -> Result<api::Dashboard, Error> {
        ctx.service()
            .execute(query::Dashboard)
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }
}
