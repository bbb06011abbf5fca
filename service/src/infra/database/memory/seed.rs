//! [`Seed`] of a [`Memory`] database.

use std::collections::HashSet;

use common::{Amount, DateTime};
use derive_more::{Display, Error as StdError};
use rust_decimal::Decimal;
use serde::{de::IgnoredAny, Deserialize, Deserializer};

use crate::domain::{client, property, Client, Property};
#[cfg(doc)]
use crate::infra::Memory;

/// Static list of records a [`Memory`] database starts with.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Seed {
    /// [`Property`] records.
    pub properties: Vec<PropertyRecord>,

    /// [`Client`] records.
    pub clients: Vec<ClientRecord>,
}

impl Seed {
    /// Validates the records of this [`Seed`], keeping their order.
    ///
    /// # Errors
    ///
    /// If any record is invalid or an identifier is used twice.
    pub fn into_records(self) -> Result<(Vec<Property>, Vec<Client>), Error> {
        let Self {
            properties,
            clients,
        } = self;

        let mut ids = HashSet::new();
        let properties = properties
            .into_iter()
            .map(|r| {
                if !ids.insert(r.id) {
                    return Err(Error::DuplicatePropertyId(r.id));
                }
                Property::try_from(r)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut ids = HashSet::new();
        let clients = clients
            .into_iter()
            .map(|r| {
                if !ids.insert(r.id) {
                    return Err(Error::DuplicateClientId(r.id));
                }
                Client::try_from(r)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok((properties, clients))
    }
}

/// Raw [`Property`] record of a [`Seed`].
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyRecord {
    /// ID of the [`Property`].
    #[serde(rename = "Id")]
    pub id: u32,

    /// Title of the [`Property`].
    pub title: String,

    /// Kind of the [`Property`].
    #[serde(rename = "type")]
    pub kind: String,

    /// Price of the [`Property`].
    pub price: Decimal,

    /// Location of the [`Property`].
    pub location: String,

    /// Area of the [`Property`].
    pub area: Decimal,

    /// Number of bedrooms in the [`Property`].
    pub bedrooms: u16,

    /// Number of bathrooms in the [`Property`].
    pub bathrooms: Decimal,

    /// Description of the [`Property`].
    pub description: String,

    /// Status of the [`Property`].
    pub status: String,

    /// Image URLs of the [`Property`].
    ///
    /// Non-string entries are skipped.
    #[serde(default, deserialize_with = "lenient_strings")]
    pub images: Vec<String>,

    /// Building of the [`Property`].
    #[serde(default)]
    pub building: Option<String>,

    /// Floor of the [`Property`].
    #[serde(default)]
    pub floor: Option<i32>,

    /// Apartment number of the [`Property`].
    #[serde(default)]
    pub apartment_number: Option<String>,

    /// [RFC 3339] creation timestamp of the [`Property`].
    ///
    /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
    #[serde(default)]
    pub created_at: Option<String>,

    /// [RFC 3339] modification timestamp of the [`Property`].
    ///
    /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl TryFrom<PropertyRecord> for Property {
    type Error = Error;

    fn try_from(record: PropertyRecord) -> Result<Self, Self::Error> {
        let PropertyRecord {
            id,
            title,
            kind,
            price,
            location,
            area,
            bedrooms,
            bathrooms,
            description,
            status,
            images,
            building,
            floor,
            apartment_number,
            created_at,
            updated_at,
        } = record;
        let invalid = |field| Error::InvalidProperty { id, field };

        let draft = property::Draft {
            title: property::Title::new(title)
                .ok_or_else(|| invalid("title"))?,
            kind: kind.parse().map_err(|_| invalid("type"))?,
            price: Amount::new(price).ok_or_else(|| invalid("price"))?,
            location: property::Location::new(location)
                .ok_or_else(|| invalid("location"))?,
            area: Amount::new(area).ok_or_else(|| invalid("area"))?,
            bedrooms,
            bathrooms: Amount::new(bathrooms)
                .and_then(property::Bathrooms::new)
                .ok_or_else(|| invalid("bathrooms"))?,
            description: property::Description::new(description)
                .ok_or_else(|| invalid("description"))?,
            status: status.parse().map_err(|_| invalid("status"))?,
            images: property::ImageUrl::sanitize(images),
            building: present(building)
                .map(|b| {
                    property::Building::new(b)
                        .ok_or_else(|| invalid("building"))
                })
                .transpose()?,
            floor,
            apartment_num: present(apartment_number)
                .map(|n| {
                    property::ApartmentNum::new(n)
                        .ok_or_else(|| invalid("apartmentNumber"))
                })
                .transpose()?,
        };

        let created_at = timestamp(created_at.as_deref())
            .ok_or_else(|| invalid("createdAt"))?;
        let updated_at = match updated_at.as_deref() {
            None => created_at,
            Some(s) => {
                DateTime::from_rfc3339(s).map_err(|_| invalid("updatedAt"))?
            }
        };

        Ok(Self {
            updated_at: updated_at.coerce(),
            ..Self::new(id.into(), draft, created_at.coerce())
        })
    }
}

/// Deserializes a list of strings, skipping the entries of any other type
/// and treating `null` as an empty list.
fn lenient_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    /// Entry of a list which is either a string or anything else.
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Entry {
        /// String entry.
        Text(String),

        /// Entry of any other type.
        Other(IgnoredAny),
    }

    Ok(Option::<Vec<Entry>>::deserialize(deserializer)?
        .unwrap_or_default()
        .into_iter()
        .filter_map(|e| match e {
            Entry::Text(s) => Some(s),
            Entry::Other(_) => None,
        })
        .collect())
}

/// Raw [`Client`] record of a [`Seed`].
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientRecord {
    /// ID of the [`Client`].
    #[serde(rename = "Id")]
    pub id: u32,

    /// Name of the [`Client`].
    pub name: String,

    /// Email of the [`Client`].
    pub email: String,

    /// Phone of the [`Client`].
    pub phone: String,

    /// Status of the [`Client`].
    pub status: String,

    /// IDs of the properties the [`Client`] is interested in.
    #[serde(default)]
    pub interested_properties: Vec<u32>,

    /// [RFC 3339] creation timestamp of the [`Client`].
    ///
    /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
    #[serde(default)]
    pub created_at: Option<String>,
}

impl TryFrom<ClientRecord> for Client {
    type Error = Error;

    fn try_from(record: ClientRecord) -> Result<Self, Self::Error> {
        let ClientRecord {
            id,
            name,
            email,
            phone,
            status,
            interested_properties,
            created_at,
        } = record;
        let invalid = |field| Error::InvalidClient { id, field };

        let draft = client::Draft {
            name: client::Name::new(name).ok_or_else(|| invalid("name"))?,
            email: client::Email::new(email)
                .ok_or_else(|| invalid("email"))?,
            phone: client::Phone::new(phone)
                .ok_or_else(|| invalid("phone"))?,
            status: status.parse().map_err(|_| invalid("status"))?,
            interested_properties: interested_properties
                .into_iter()
                .map(property::Id::from)
                .collect(),
        };
        let created_at = timestamp(created_at.as_deref())
            .ok_or_else(|| invalid("createdAt"))?;

        Ok(Self::new(id.into(), draft, created_at.coerce()))
    }
}

/// Parses the provided [RFC 3339] timestamp, defaulting to the current
/// [`DateTime`] if it's absent.
///
/// [`None`] is returned if the timestamp is malformed.
///
/// [RFC 3339]: https://tools.ietf.org/html/rfc3339
fn timestamp(input: Option<&str>) -> Option<DateTime> {
    input.map_or_else(|| Some(DateTime::now()), |s| {
        DateTime::from_rfc3339(s).ok()
    })
}

/// Treats a blank optional text as absent.
fn present(text: Option<String>) -> Option<String> {
    text.filter(|t| !t.trim().is_empty())
}

/// Error of converting a [`Seed`] into records.
#[derive(Clone, Debug, Display, StdError)]
pub enum Error {
    /// [`PropertyRecord`] has an invalid field.
    #[display("`Property(id: {id})` has invalid `{field}`")]
    InvalidProperty {
        /// ID of the invalid [`PropertyRecord`].
        id: u32,

        /// Name of the invalid field.
        field: &'static str,
    },

    /// [`ClientRecord`] has an invalid field.
    #[display("`Client(id: {id})` has invalid `{field}`")]
    InvalidClient {
        /// ID of the invalid [`ClientRecord`].
        id: u32,

        /// Name of the invalid field.
        field: &'static str,
    },

    /// [`Property`] ID is used more than once.
    #[display("`Property(id: {_0})` is duplicated")]
    DuplicatePropertyId(#[error(not(source))] u32),

    /// [`Client`] ID is used more than once.
    #[display("`Client(id: {_0})` is duplicated")]
    DuplicateClientId(#[error(not(source))] u32),
}

#[cfg(test)]
mod spec {
    use common::Amount;

    use crate::domain::property;

    use super::{Error, Seed};

    fn seed(json: &str) -> Seed {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn converts_records() {
        let (properties, clients) = seed(
            r#"{
                "properties": [{
                    "Id": 3,
                    "title": "Modern Downtown Apartment",
                    "type": "Apartment",
                    "price": 450000,
                    "location": "Downtown, Seattle",
                    "area": 1200,
                    "bedrooms": 2,
                    "bathrooms": 1.5,
                    "description": "Bright corner unit.",
                    "status": "Available",
                    "images": ["not a url", "https://x.test/a.jpg", ""],
                    "building": "Skyline Tower",
                    "floor": 15,
                    "apartmentNumber": "15A",
                    "createdAt": "2024-01-15T10:00:00Z",
                    "updatedAt": "2024-01-20T14:30:00Z"
                }],
                "clients": [{
                    "Id": 1,
                    "name": "Sarah Johnson",
                    "email": "sarah.johnson@email.com",
                    "phone": "(555) 123-4567",
                    "status": "Interested",
                    "interestedProperties": [3, 42],
                    "createdAt": "2024-01-10T09:00:00Z"
                }]
            }"#,
        )
        .into_records()
        .unwrap();

        let p = &properties[0];
        assert_eq!(u32::from(p.id), 3);
        assert_eq!(p.kind, property::Kind::Apartment);
        assert_eq!(p.price, Amount::from(450_000));
        assert_eq!(
            p.images.iter().map(AsRef::<str>::as_ref).collect::<Vec<_>>(),
            ["https://x.test/a.jpg"],
        );
        assert_eq!(p.floor, Some(15));
        assert_eq!(p.created_at.to_rfc3339(), "2024-01-15T10:00:00Z");
        assert_eq!(p.updated_at.to_rfc3339(), "2024-01-20T14:30:00Z");

        let c = &clients[0];
        assert_eq!(u32::from(c.id), 1);
        assert_eq!(
            c.interested_properties,
            [property::Id::from(3), property::Id::from(42)],
        );
    }

    #[test]
    fn skips_non_string_images() {
        let (properties, _) = seed(
            r#"{"properties": [{
                "Id": 1, "title": "Cottage", "type": "House",
                "price": 250000, "location": "Lakeside", "area": 900,
                "bedrooms": 2, "bathrooms": 1, "description": "Cozy.",
                "status": "Available",
                "images": [null, 3, {"url": "/a.jpg"}, "https://x.test/a.jpg"]
            }, {
                "Id": 2, "title": "Cabin", "type": "House",
                "price": 150000, "location": "Woods", "area": 500,
                "bedrooms": 1, "bathrooms": 1, "description": "Rustic.",
                "status": "Available", "images": null
            }]}"#,
        )
        .into_records()
        .unwrap();

        assert_eq!(
            properties[0]
                .images
                .iter()
                .map(AsRef::<str>::as_ref)
                .collect::<Vec<_>>(),
            ["https://x.test/a.jpg"],
        );
        assert!(properties[1].images.is_empty());
    }

    #[test]
    fn treats_blank_apartment_fields_as_absent() {
        let (properties, _) = seed(
            r#"{"properties": [{
                "Id": 1, "title": "Cottage", "type": "house",
                "price": "250000.00", "location": "Lakeside", "area": 900,
                "bedrooms": 2, "bathrooms": 1, "description": "Cozy.",
                "status": "pending", "building": " ", "apartmentNumber": ""
            }]}"#,
        )
        .into_records()
        .unwrap();

        assert_eq!(properties[0].building, None);
        assert_eq!(properties[0].apartment_num, None);
        assert_eq!(properties[0].status, property::Status::Pending);
    }

    #[test]
    fn rejects_invalid_records() {
        let err = seed(
            r#"{"clients": [{
                "Id": 7, "name": "Bob", "email": "bob",
                "phone": "555 0100", "status": "Active"
            }]}"#,
        )
        .into_records()
        .unwrap_err();

        assert!(
            matches!(err, Error::InvalidClient { id: 7, field: "email" }),
            "unexpected error: {err}",
        );
    }

    #[test]
    fn rejects_duplicated_ids() {
        let err = seed(
            r#"{"clients": [
                {"Id": 2, "name": "Ann", "email": "ann@x.test",
                 "phone": "555 0101", "status": "Active"},
                {"Id": 2, "name": "Bob", "email": "bob@x.test",
                 "phone": "555 0102", "status": "Closed"}
            ]}"#,
        )
        .into_records()
        .unwrap_err();

        assert!(
            matches!(err, Error::DuplicateClientId(2)),
            "unexpected error: {err}",
        );
    }
}
