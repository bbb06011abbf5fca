//! [`Property`] definitions.

use std::sync::LazyLock;

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, Amount, DateTimeOf};
use derive_more::{AsRef, Display, From, FromStr, Into};
use url::Url;

/// Property listed by the agency.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Property {
    /// ID of this [`Property`].
    pub id: Id,

    /// [`Title`] of this [`Property`].
    pub title: Title,

    /// [`Kind`] of this [`Property`].
    pub kind: Kind,

    /// [`Price`] of this [`Property`].
    pub price: Price,

    /// [`Location`] of this [`Property`].
    pub location: Location,

    /// [`Area`] of this [`Property`], in square feet.
    pub area: Area,

    /// Number of bedrooms in this [`Property`].
    pub bedrooms: Bedrooms,

    /// Number of bathrooms in this [`Property`].
    pub bathrooms: Bathrooms,

    /// [`Description`] of this [`Property`].
    pub description: Description,

    /// [`Status`] of this [`Property`].
    pub status: Status,

    /// Images of this [`Property`], in display order.
    pub images: Vec<ImageUrl>,

    /// [`Building`] this [`Property`] is located in, if any.
    pub building: Option<Building>,

    /// [`Floor`] this [`Property`] is located on, if any.
    pub floor: Option<Floor>,

    /// [`ApartmentNum`] of this [`Property`], if any.
    pub apartment_num: Option<ApartmentNum>,

    /// [`DateTime`] when this [`Property`] was created.
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`Property`] was last modified.
    pub updated_at: ModificationDateTime,
}

impl Property {
    /// Creates a new [`Property`] out of the provided [`Draft`].
    #[must_use]
    pub fn new(id: Id, draft: Draft, at: CreationDateTime) -> Self {
        let Draft {
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
            apartment_num,
        } = draft;

        Self {
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
            apartment_num,
            created_at: at,
            updated_at: at.coerce(),
        }
    }

    /// Replaces the body of this [`Property`] with the provided [`Draft`],
    /// keeping its [`Id`] and creation [`DateTime`].
    pub fn replace(&mut self, draft: Draft, at: ModificationDateTime) {
        *self = Self {
            updated_at: at,
            ..Self::new(self.id, draft, self.created_at)
        };
    }
}

/// Body of a [`Property`] provided by a caller on creation and update.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Draft {
    /// [`Title`] of a [`Property`].
    pub title: Title,

    /// [`Kind`] of a [`Property`].
    pub kind: Kind,

    /// [`Price`] of a [`Property`].
    pub price: Price,

    /// [`Location`] of a [`Property`].
    pub location: Location,

    /// [`Area`] of a [`Property`].
    pub area: Area,

    /// [`Bedrooms`] of a [`Property`].
    pub bedrooms: Bedrooms,

    /// [`Bathrooms`] of a [`Property`].
    pub bathrooms: Bathrooms,

    /// [`Description`] of a [`Property`].
    pub description: Description,

    /// [`Status`] of a [`Property`].
    pub status: Status,

    /// [`ImageUrl`]s of a [`Property`].
    pub images: Vec<ImageUrl>,

    /// [`Building`] of a [`Property`].
    pub building: Option<Building>,

    /// [`Floor`] of a [`Property`].
    pub floor: Option<Floor>,

    /// [`ApartmentNum`] of a [`Property`].
    pub apartment_num: Option<ApartmentNum>,
}

impl From<Property> for Draft {
    fn from(property: Property) -> Self {
        let Property {
            id: _,
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
            apartment_num,
            created_at: _,
            updated_at: _,
        } = property;

        Self {
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
            apartment_num,
        }
    }
}

/// ID of a [`Property`].
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
    #[doc = "Title of a [`Property`]."]
    struct Title(max_len = 512);
}

define_text! {
    #[doc = "Free-text location of a [`Property`]."]
    struct Location(max_len = 512);
}

define_text! {
    #[doc = "Description of a [`Property`]."]
    struct Description(max_len = 8192);
}

define_text! {
    #[doc = "Building a [`Property`] is located in."]
    struct Building(max_len = 512);
}

define_text! {
    #[doc = "Apartment number of a [`Property`]."]
    struct ApartmentNum(max_len = 64);
}

/// Price of a [`Property`].
pub type Price = Amount;

/// Area of a [`Property`], in square feet.
pub type Area = Amount;

/// Number of bedrooms in a [`Property`].
pub type Bedrooms = u16;

/// Floor of a [`Property`].
pub type Floor = i32;

/// Number of bathrooms in a [`Property`], counted in half-steps.
#[derive(
    AsRef,
    Clone,
    Copy,
    Debug,
    Display,
    Eq,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
)]
pub struct Bathrooms(Amount);

impl Bathrooms {
    /// Creates new [`Bathrooms`] if the given `amount` is a multiple of
    /// `0.5`.
    #[must_use]
    pub fn new(amount: Amount) -> Option<Self> {
        Self::check(amount).then_some(Self(amount))
    }

    /// Checks whether the given `amount` is a valid [`Bathrooms`] count.
    fn check(amount: Amount) -> bool {
        (amount + amount).is_integer()
    }
}

impl From<u16> for Bathrooms {
    fn from(count: u16) -> Self {
        Self(Amount::from(u32::from(count)))
    }
}

impl FromStr for Bathrooms {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Amount::from_str(s)
            .ok()
            .and_then(Self::new)
            .ok_or("invalid `Bathrooms`")
    }
}

/// URL of a [`Property`] image.
///
/// Either an absolute URL or a root-relative path (`/images/1.jpg`), kept
/// exactly as provided.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(str, String)]
pub struct ImageUrl(String);

impl ImageUrl {
    /// Creates a new [`ImageUrl`] if the given `url` is valid.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Option<Self> {
        let url = url.into();
        Self::check(&url).then_some(Self(url))
    }

    /// Keeps only the valid [`ImageUrl`]s out of the given `urls`, preserving
    /// their order.
    #[must_use]
    pub fn sanitize<I>(urls: I) -> Vec<Self>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        urls.into_iter().filter_map(Self::new).collect()
    }

    /// Checks whether the given `url` is a valid [`ImageUrl`].
    fn check(url: &str) -> bool {
        /// Base root-relative [`ImageUrl`]s are resolved against.
        static BASE: LazyLock<Url> = LazyLock::new(|| {
            Url::parse("http://localhost/").expect("valid URL")
        });

        if url.is_empty() || url.trim() != url {
            return false;
        }
        if url.starts_with('/') {
            BASE.join(url).is_ok()
        } else {
            Url::parse(url).is_ok()
        }
    }
}

impl FromStr for ImageUrl {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `ImageUrl`")
    }
}

define_kind! {
    #[doc = "Kind of a [`Property`]."]
    enum Kind {
        #[doc = "A detached house."]
        House,

        #[doc = "An apartment in a building."]
        Apartment,

        #[doc = "A condominium unit."]
        Condo,

        #[doc = "A townhouse."]
        Townhouse,

        #[doc = "A commercial property."]
        Commercial,
    }
}

define_kind! {
    #[doc = "Sale status of a [`Property`]."]
    enum Status {
        #[doc = "Open for offers."]
        Available,

        #[doc = "An offer is being processed."]
        Pending,

        #[doc = "Sold already."]
        Sold,
    }
}

/// [`DateTime`] when a [`Property`] was created.
pub type CreationDateTime = DateTimeOf<(Property, unit::Creation)>;

/// [`DateTime`] when a [`Property`] was last modified.
pub type ModificationDateTime = DateTimeOf<(Property, unit::Modification)>;

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use common::Amount;

    use super::{Bathrooms, ImageUrl, Kind, Status};

    #[test]
    fn drops_invalid_image_urls() {
        let images =
            ImageUrl::sanitize(["not a url", "https://x.test/a.jpg", ""]);

        assert_eq!(
            images.iter().map(AsRef::<str>::as_ref).collect::<Vec<_>>(),
            ["https://x.test/a.jpg"],
        );
    }

    #[test]
    fn accepts_root_relative_image_urls() {
        let images = ImageUrl::sanitize([
            "/api/placeholder/800/600",
            "//cdn.x.test/b.png",
            "images/relative.jpg",
            " https://x.test/padded.jpg",
        ]);

        assert_eq!(
            images.iter().map(AsRef::<str>::as_ref).collect::<Vec<_>>(),
            ["/api/placeholder/800/600", "//cdn.x.test/b.png"],
        );
    }

    #[test]
    fn bathrooms_allow_half_steps() {
        assert!(Bathrooms::from_str("2.5").is_ok());
        assert!(Bathrooms::from_str("3").is_ok());
        assert!(Bathrooms::from_str("0").is_ok());

        assert!(Bathrooms::from_str("1.25").is_err());
        assert!(Bathrooms::from_str("-1").is_err());

        assert_eq!(
            Bathrooms::from(2),
            Bathrooms::new(Amount::from(2)).unwrap(),
        );
    }

    #[test]
    fn parses_kinds_case_insensitively() {
        assert_eq!(Kind::from_str("townhouse"), Ok(Kind::Townhouse));
        assert_eq!(Status::from_str("SOLD"), Ok(Status::Sold));
        assert!(Kind::from_str("Castle").is_err());

        assert_eq!(Kind::Condo.to_string(), "Condo");
        assert_eq!(Status::Pending.as_str(), "Pending");
    }
}
