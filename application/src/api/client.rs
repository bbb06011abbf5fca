//! [`Client`]-related definitions.

use common::DateTime;
use derive_more::{AsRef, Display, From, Into};
use juniper::{graphql_object, GraphQLEnum, GraphQLInputObject, GraphQLScalar};
use service::{command, domain, query};

use crate::{
    api::{property, scalar},
    define_error, AsError, Context, Error,
};

/// A client of the agency.
#[derive(Clone, Debug, From, Into)]
pub struct Client(domain::Client);

/// A client of the agency.
#[graphql_object(context = Context)]
impl Client {
    /// Unique identifier of this `Client`.
    #[must_use]
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// Full name of this `Client`.
    #[must_use]
    pub fn name(&self) -> Name {
        self.0.name.clone().into()
    }

    /// Email address of this `Client`.
    #[must_use]
    pub fn email(&self) -> Email {
        self.0.email.clone().into()
    }

    /// Phone number of this `Client`.
    #[must_use]
    pub fn phone(&self) -> Phone {
        self.0.phone.clone().into()
    }

    /// Status of this `Client`.
    #[must_use]
    pub fn status(&self) -> Status {
        self.0.status.into()
    }

    /// IDs of the `Property`s this `Client` is interested in.
    #[must_use]
    pub fn interested_properties(&self) -> Vec<property::Id> {
        self.0
            .interested_properties
            .iter()
            .copied()
            .map(Into::into)
            .collect()
    }

    /// `DateTime` when this `Client` was created.
    #[must_use]
    pub fn created_at(&self) -> DateTime {
        self.0.created_at.coerce()
    }
}

/// Unique identifier of a `Client`.
#[derive(AsRef, Clone, Copy, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "ClientId", with = scalar::Via::<domain::client::Id>)]
pub struct Id(domain::client::Id);

/// Full name of a `Client`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "ClientName", with = scalar::Via::<domain::client::Name>)]
pub struct Name(domain::client::Name);

/// Email address of a `Client`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "ClientEmail", with = scalar::Via::<domain::client::Email>)]
pub struct Email(domain::client::Email);

/// Phone number of a `Client`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "ClientPhone", with = scalar::Via::<domain::client::Phone>)]
pub struct Phone(domain::client::Phone);

/// Status of a `Client`.
#[derive(Clone, Copy, Debug, GraphQLEnum)]
#[graphql(name = "ClientStatus")]
pub enum Status {
    /// Actively looking for a property.
    Active,

    /// Interested in some particular properties.
    Interested,

    /// Not looking anymore.
    Closed,
}

impl From<domain::client::Status> for Status {
    fn from(status: domain::client::Status) -> Self {
        use domain::client::Status as S;
        match status {
            S::Active => Self::Active,
            S::Interested => Self::Interested,
            S::Closed => Self::Closed,
        }
    }
}

impl From<Status> for domain::client::Status {
    fn from(status: Status) -> Self {
        match status {
            Status::Active => Self::Active,
            Status::Interested => Self::Interested,
            Status::Closed => Self::Closed,
        }
    }
}

/// Body of a `Client` to be created or updated.
#[derive(Clone, Debug, GraphQLInputObject)]
#[graphql(name = "ClientInput")]
pub struct Input {
    /// Full name of the `Client`.
    pub name: Name,

    /// Email address of the `Client`.
    pub email: Email,

    /// Phone number of the `Client`.
    pub phone: Phone,

    /// Status of the `Client`, `ACTIVE` by default.
    pub status: Option<Status>,

    /// IDs of the `Property`s the `Client` is interested in.
    pub interested_properties: Option<Vec<property::Id>>,
}

impl From<Input> for domain::client::Draft {
    fn from(input: Input) -> Self {
        let Input {
            name,
            email,
            phone,
            status,
            interested_properties,
        } = input;

        Self {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
            status: status.map_or(domain::client::Status::Active, Into::into),
            interested_properties: interested_properties
                .unwrap_or_default()
                .into_iter()
                .map(Into::into)
                .collect(),
        }
    }
}

define_error! {
    enum ClientError {
        #[code = "CLIENT_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Client` with the provided ID does not exist"]
        NotExists,
    }
}

impl AsError for query::client::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::ClientNotExists(_) => Some(ClientError::NotExists.into()),
        }
    }
}

impl AsError for command::update_client::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::ClientNotExists(_) => Some(ClientError::NotExists.into()),
        }
    }
}

impl AsError for command::update_client_status::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::ClientNotExists(_) => Some(ClientError::NotExists.into()),
        }
    }
}

impl AsError for command::delete_client::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::ClientNotExists(_) => Some(ClientError::NotExists.into()),
        }
    }
}

#[cfg(test)]
mod spec {
    use service::domain;

    use super::{Input, Status};

    #[test]
    fn defaults_omitted_input_fields() {
        let draft = domain::client::Draft::from(Input {
            name: domain::client::Name::new("Ann Lee").unwrap().into(),
            email: "ann@lee.test"
                .parse::<domain::client::Email>()
                .unwrap()
                .into(),
            phone: "+1 (555) 010-0101"
                .parse::<domain::client::Phone>()
                .unwrap()
                .into(),
            status: None,
            interested_properties: None,
        });

        assert_eq!(draft.status, domain::client::Status::Active);
        assert!(draft.interested_properties.is_empty());
    }

    #[test]
    fn maps_statuses_both_ways() {
        for status in [Status::Active, Status::Interested, Status::Closed] {
            let domain = domain::client::Status::from(status);
            assert_eq!(
                domain::client::Status::from(Status::from(domain)),
                domain,
            );
        }
    }
}
