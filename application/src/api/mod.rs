//! GraphQL API definitions.

pub mod client;
pub mod dashboard;
mod mutation;
pub mod property;
mod query;
pub mod scalar;

pub use self::{
    client::Client, dashboard::Dashboard, mutation::Mutation,
    property::Property, query::Query,
};

/// GraphQL schema.
pub type Schema = juniper::RootNode<
    'static,
    Query,
    Mutation,
    juniper::EmptySubscription<crate::Context>,
>;
