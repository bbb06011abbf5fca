//! [`Client`] definitions.

use std::sync::LazyLock;

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, DateTimeOf};
use derive_more::{AsRef, Display, From, FromStr, Into};
use regex::Regex;

use crate::domain::property;

/// Client of the agency.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Client {
    /// ID of this [`Client`].
    pub id: Id,

    /// [`Name`] of this [`Client`].
    pub name: Name,

    /// [`Email`] of this [`Client`].
    pub email: Email,

    /// [`Phone`] of this [`Client`].
    pub phone: Phone,

    /// [`Status`] of this [`Client`].
    pub status: Status,

    /// Properties this [`Client`] is interested in.
    ///
    /// Not guaranteed to reference existing properties.
    pub interested_properties: Vec<property::Id>,

    /// [`DateTime`] when this [`Client`] was created.
    pub created_at: CreationDateTime,
}

impl Client {
    /// Creates a new [`Client`] out of the provided [`Draft`].
    #[must_use]
    pub fn new(id: Id, draft: Draft, created_at: CreationDateTime) -> Self {
        let Draft {
            name,
            email,
            phone,
            status,
            interested_properties,
        } = draft;

        Self {
            id,
            name,
            email,
            phone,
            status,
            interested_properties,
            created_at,
        }
    }

    /// Replaces the body of this [`Client`] with the provided [`Draft`],
    /// keeping its [`Id`] and creation [`DateTime`].
    pub fn replace(&mut self, draft: Draft) {
        *self = Self::new(self.id, draft, self.created_at);
    }
}

/// Body of a [`Client`] provided by a caller on creation and update.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Draft {
    /// [`Name`] of a [`Client`].
    pub name: Name,

    /// [`Email`] of a [`Client`].
    pub email: Email,

    /// [`Phone`] of a [`Client`].
    pub phone: Phone,

    /// [`Status`] of a [`Client`].
    pub status: Status,

    /// Properties a [`Client`] is interested in.
    pub interested_properties: Vec<property::Id>,
}

impl From<Client> for Draft {
    fn from(client: Client) -> Self {
        let Client {
            id: _,
            name,
            email,
            phone,
            status,
            interested_properties,
            created_at: _,
        } = client;

        Self {
            name,
            email,
            phone,
            status,
            interested_properties,
        }
    }
}

/// ID of a [`Client`].
#[derive(
    Clone,
    Copy,
    Debug,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
)]
pub struct Id(u32);

define_text! {
    #[doc = "Full name of a [`Client`]."]
    struct Name(max_len = 512);
}

/// Email address of a [`Client`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(str, String)]
pub struct Email(String);

impl Email {
    /// Creates a new [`Email`] if the given `address` is valid.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Option<Self> {
        let address = address.into();
        Self::check(&address).then_some(Self(address))
    }

    /// Checks whether the given `address` is a valid [`Email`].
    fn check(address: &str) -> bool {
        /// Regular expression checking [`Email`] format: a single `@`
        /// separating non-empty parts without whitespace.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^[^@\s]+@[^@\s]+$").expect("valid regex")
        });

        address.len() <= 254 && REGEX.is_match(address)
    }
}

impl FromStr for Email {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Email`")
    }
}

/// Phone number of a [`Client`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(str, String)]
pub struct Phone(String);

impl Phone {
    /// Creates a new [`Phone`] if the given `number` is valid.
    #[must_use]
    pub fn new(number: impl Into<String>) -> Option<Self> {
        let number = number.into();
        Self::check(&number).then_some(Self(number))
    }

    /// Checks whether the given `number` is a valid [`Phone`].
    fn check(number: &str) -> bool {
        /// Regular expression checking [`Phone`] format: digits with the
        /// usual separators, at least one digit, no surrounding whitespace.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^[+(]?[\d().\- ]*\d[\d().\- ]*$").expect("valid regex")
        });

        number.trim() == number && number.len() <= 32 && REGEX.is_match(number)
    }
}

impl FromStr for Phone {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Phone`")
    }
}

define_kind! {
    #[doc = "Relationship status of a [`Client`]."]
    enum Status {
        #[doc = "Actively looking for a property."]
        Active,

        #[doc = "Interested in particular properties."]
        Interested,

        #[doc = "Deal is closed."]
        Closed,
    }
}

/// [`DateTime`] when a [`Client`] was created.
pub type CreationDateTime = DateTimeOf<(Client, unit::Creation)>;

#[cfg(test)]
mod spec {
    use super::{Email, Phone};

    #[test]
    fn validates_email() {
        assert!(Email::new("jane.doe@example.com").is_some());

        assert!(Email::new("").is_none());
        assert!(Email::new("jane.doe").is_none());
        assert!(Email::new("jane@doe@example.com").is_none());
        assert!(Email::new("jane doe@example.com").is_none());
    }

    #[test]
    fn validates_phone() {
        assert!(Phone::new("+1 (555) 123-4567").is_some());
        assert!(Phone::new("555.123.4567").is_some());

        assert!(Phone::new("").is_none());
        assert!(Phone::new("call me").is_none());
        assert!(Phone::new(" 5551234567").is_none());
        assert!(Phone::new("+-()").is_none());
    }
}
