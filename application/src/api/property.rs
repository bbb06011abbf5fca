//! [`Property`]-related definitions.

use common::{Amount, DateTime};
use derive_more::{AsRef, Display, From, Into};
use juniper::{
    graphql_object, GraphQLEnum, GraphQLInputObject, GraphQLScalar,
};
use service::{command, domain, query, read};

use crate::{api::scalar, define_error, AsError, Context, Error};

/// A property listed by the agency.
#[derive(Clone, Debug, From, Into)]
pub struct Property(domain::Property);

/// A property listed by the agency.
#[graphql_object(context = Context)]
impl Property {
    /// Unique identifier of this `Property`.
    #[must_use]
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// Title of this `Property`.
    #[must_use]
    pub fn title(&self) -> Title {
        self.0.title.clone().into()
    }

    /// Kind of this `Property`.
    #[graphql(name = "type")]
    #[must_use]
    pub fn kind(&self) -> Kind {
        self.0.kind.into()
    }

    /// Price of this `Property`.
    #[must_use]
    pub fn price(&self) -> Amount {
        self.0.price
    }

    /// Free-text location of this `Property`.
    #[must_use]
    pub fn location(&self) -> Location {
        self.0.location.clone().into()
    }

    /// Area of this `Property`, in square feet.
    #[must_use]
    pub fn area(&self) -> Amount {
        self.0.area
    }

    /// Number of bedrooms in this `Property`.
    #[must_use]
    pub fn bedrooms(&self) -> i32 {
        self.0.bedrooms.into()
    }

    /// Number of bathrooms in this `Property`, in half-steps.
    #[must_use]
    pub fn bathrooms(&self) -> Amount {
        self.0.bathrooms.into()
    }

    /// Description of this `Property`.
    #[must_use]
    pub fn description(&self) -> Description {
        self.0.description.clone().into()
    }

    /// Sale status of this `Property`.
    #[must_use]
    pub fn status(&self) -> Status {
        self.0.status.into()
    }

    /// Image URLs of this `Property`, in display order.
    #[must_use]
    pub fn images(&self) -> Vec<ImageUrl> {
        self.0.images.iter().cloned().map(Into::into).collect()
    }

    /// Building this `Property` is located in, if any.
    #[must_use]
    pub fn building(&self) -> Option<Building> {
        self.0.building.clone().map(Into::into)
    }

    /// Floor this `Property` is located on, if any.
    #[must_use]
    pub fn floor(&self) -> Option<i32> {
        self.0.floor
    }

    /// Apartment number of this `Property`, if any.
    #[must_use]
    pub fn apartment_number(&self) -> Option<ApartmentNum> {
        self.0.apartment_num.clone().map(Into::into)
    }

    /// `DateTime` when this `Property` was created.
    #[must_use]
    pub fn created_at(&self) -> DateTime {
        self.0.created_at.coerce()
    }

    /// `DateTime` when this `Property` was last modified.
    #[must_use]
    pub fn updated_at(&self) -> DateTime {
        self.0.updated_at.coerce()
    }
}

/// Unique identifier of a `Property`.
#[derive(AsRef, Clone, Copy, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "PropertyId",
    with = scalar::Via::<domain::property::Id>,
)]
pub struct Id(domain::property::Id);

/// Title of a `Property`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "PropertyTitle",
    with = scalar::Via::<domain::property::Title>,
)]
pub struct Title(domain::property::Title);

/// Free-text location of a `Property`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "PropertyLocation",
    with = scalar::Via::<domain::property::Location>,
)]
pub struct Location(domain::property::Location);

/// Description of a `Property`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "PropertyDescription",
    with = scalar::Via::<domain::property::Description>,
)]
pub struct Description(domain::property::Description);

/// Building a `Property` is located in.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "PropertyBuilding",
    with = scalar::Via::<domain::property::Building>,
)]
pub struct Building(domain::property::Building);

/// Apartment number of a `Property`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "PropertyApartmentNumber",
    with = scalar::Via::<domain::property::ApartmentNum>,
)]
pub struct ApartmentNum(domain::property::ApartmentNum);

/// URL of a `Property` image.
///
/// Either an absolute URL or a root-relative path.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "PropertyImageUrl",
    with = scalar::Via::<domain::property::ImageUrl>,
)]
pub struct ImageUrl(domain::property::ImageUrl);

/// Kind of a `Property`.
#[derive(Clone, Copy, Debug, GraphQLEnum)]
#[graphql(name = "PropertyKind")]
pub enum Kind {
    /// A detached house.
    House,

    /// An apartment in a building.
    Apartment,

    /// A condominium unit.
    Condo,

    /// A townhouse.
    Townhouse,

    /// A commercial property.
    Commercial,
}

impl From<domain::property::Kind> for Kind {
    fn from(kind: domain::property::Kind) -> Self {
        use domain::property::Kind as K;
        match kind {
            K::House => Self::House,
            K::Apartment => Self::Apartment,
            K::Condo => Self::Condo,
            K::Townhouse => Self::Townhouse,
            K::Commercial => Self::Commercial,
        }
    }
}

impl From<Kind> for domain::property::Kind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::House => Self::House,
            Kind::Apartment => Self::Apartment,
            Kind::Condo => Self::Condo,
            Kind::Townhouse => Self::Townhouse,
            Kind::Commercial => Self::Commercial,
        }
    }
}

/// Sale status of a `Property`.
#[derive(Clone, Copy, Debug, GraphQLEnum)]
#[graphql(name = "PropertyStatus")]
pub enum Status {
    /// Open for offers.
    Available,

    /// An offer is being processed.
    Pending,

    /// Sold already.
    Sold,
}

impl From<domain::property::Status> for Status {
    fn from(status: domain::property::Status) -> Self {
        use domain::property::Status as S;
        match status {
            S::Available => Self::Available,
            S::Pending => Self::Pending,
            S::Sold => Self::Sold,
        }
    }
}

impl From<Status> for domain::property::Status {
    fn from(status: Status) -> Self {
        match status {
            Status::Available => Self::Available,
            Status::Pending => Self::Pending,
            Status::Sold => Self::Sold,
        }
    }
}

/// Order of `Property` search results.
#[derive(Clone, Copy, Debug, Default, GraphQLEnum)]
#[graphql(name = "PropertySort")]
pub enum Sort {
    /// Most recently created first.
    #[default]
    Newest,

    /// Least recently created first.
    Oldest,

    /// Cheapest first.
    PriceLow,

    /// Most expensive first.
    PriceHigh,

    /// Largest area first.
    AreaLarge,

    /// Smallest area first.
    AreaSmall,
}

impl From<Sort> for read::property::search::SortKey {
    fn from(sort: Sort) -> Self {
        match sort {
            Sort::Newest => Self::Newest,
            Sort::Oldest => Self::Oldest,
            Sort::PriceLow => Self::PriceLow,
            Sort::PriceHigh => Self::PriceHigh,
            Sort::AreaLarge => Self::AreaLarge,
            Sort::AreaSmall => Self::AreaSmall,
        }
    }
}

/// Filter of `Property` search results.
///
/// Every field is optional, and blank or malformed values impose no
/// constraint.
#[derive(Clone, Debug, Default, GraphQLInputObject)]
#[graphql(name = "PropertyFilter")]
pub struct Filter {
    /// Substring of a `PropertyKind` name, case-insensitive.
    #[graphql(name = "type")]
    pub kind: Option<String>,

    /// Exact `PropertyStatus` name, case-insensitive.
    pub status: Option<String>,

    /// Minimal price, inclusive.
    pub min_price: Option<String>,

    /// Maximal price, inclusive.
    pub max_price: Option<String>,

    /// Minimal number of bedrooms.
    pub bedrooms: Option<String>,

    /// Substring of a location, case-insensitive.
    pub location: Option<String>,

    /// Substring of a building, case-insensitive.
    pub building: Option<String>,

    /// Exact floor.
    pub floor: Option<String>,

    /// Substring of an apartment number, case-insensitive.
    pub apartment_number: Option<String>,
}

impl From<Filter> for read::property::search::Filter {
    fn from(filter: Filter) -> Self {
        let Filter {
            kind,
            status,
            min_price,
            max_price,
            bedrooms,
            location,
            building,
            floor,
            apartment_number,
        } = filter;

        Self {
            kind,
            status,
            min_price,
            max_price,
            bedrooms,
            location,
            building,
            floor,
            apartment_num: apartment_number,
        }
    }
}

/// Body of a `Property` to be created or updated.
#[derive(Clone, Debug, GraphQLInputObject)]
#[graphql(name = "PropertyInput")]
pub struct Input {
    /// Title of the `Property`.
    pub title: Title,

    /// Kind of the `Property`.
    #[graphql(name = "type")]
    pub kind: Kind,

    /// Price of the `Property`.
    pub price: Amount,

    /// Free-text location of the `Property`.
    pub location: Location,

    /// Area of the `Property`, in square feet.
    pub area: Amount,

    /// Number of bedrooms in the `Property`.
    pub bedrooms: i32,

    /// Number of bathrooms in the `Property`, in half-steps.
    pub bathrooms: Amount,

    /// Description of the `Property`.
    pub description: Description,

    /// Sale status of the `Property`, `AVAILABLE` by default.
    pub status: Option<Status>,

    /// Image URLs of the `Property`.
    ///
    /// Invalid URLs are silently dropped.
    pub images: Option<Vec<String>>,

    /// Building the `Property` is located in.
    pub building: Option<Building>,

    /// Floor the `Property` is located on.
    pub floor: Option<i32>,

    /// Apartment number of the `Property`.
    pub apartment_number: Option<ApartmentNum>,
}

impl TryFrom<Input> for domain::property::Draft {
    type Error = Error;

    fn try_from(input: Input) -> Result<Self, Self::Error> {
        let Input {
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
        } = input;

        Ok(Self {
            title: title.into(),
            kind: kind.into(),
            price,
            location: location.into(),
            area,
            bedrooms: bedrooms
                .try_into()
                .map_err(|_| PropertyError::InvalidBedrooms)?,
            bathrooms: domain::property::Bathrooms::new(bathrooms)
                .ok_or(PropertyError::InvalidBathrooms)?,
            description: description.into(),
            status: status
                .map_or(domain::property::Status::Available, Into::into),
            images: domain::property::ImageUrl::sanitize(
                images.unwrap_or_default(),
            ),
            building: building.map(Into::into),
            floor,
            apartment_num: apartment_number.map(Into::into),
        })
    }
}

define_error! {
    enum PropertyError {
        #[code = "PROPERTY_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Property` with the provided ID does not exist"]
        NotExists,

        #[code = "INVALID_BEDROOMS"]
        #[status = BAD_REQUEST]
        #[message = "Number of bedrooms must be in `0..=65535` range"]
        InvalidBedrooms,

        #[code = "INVALID_BATHROOMS"]
        #[status = BAD_REQUEST]
        #[message = "Number of bathrooms must be a multiple of `0.5`"]
        InvalidBathrooms,
    }
}

impl AsError for query::property::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::PropertyNotExists(_) => Some(PropertyError::NotExists.into()),
        }
    }
}

impl AsError for command::update_property::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::PropertyNotExists(_) => Some(PropertyError::NotExists.into()),
        }
    }
}

impl AsError for command::update_property_status::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::PropertyNotExists(_) => Some(PropertyError::NotExists.into()),
        }
    }
}

impl AsError for command::delete_property::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::PropertyNotExists(_) => Some(PropertyError::NotExists.into()),
        }
    }
}
