//! [`Property`]-related read definitions.

#[cfg(doc)]
use crate::domain::Property;

pub mod search {
    //! [`Property`] search definitions.

    use std::{cmp::Reverse, str::FromStr};

    use rust_decimal::Decimal;
    use strum::{Display, EnumString};

    use crate::domain::{property, Property};

    /// Order of [`Property`] search results.
    #[derive(
        Clone, Copy, Debug, Default, Display, EnumString, Eq, Hash, PartialEq,
    )]
    #[strum(serialize_all = "kebab-case")]
    pub enum SortKey {
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

    /// Raw filter of [`Property`] search results, as provided by a caller.
    ///
    /// Absent, blank or malformed fields impose no constraint.
    #[derive(Clone, Debug, Default)]
    pub struct Filter {
        /// Substring of a [`property::Kind`] name.
        pub kind: Option<String>,

        /// Exact [`property::Status`] name.
        pub status: Option<String>,

        /// Minimal [`property::Price`], inclusive.
        pub min_price: Option<String>,

        /// Maximal [`property::Price`], inclusive.
        pub max_price: Option<String>,

        /// Minimal number of [`property::Bedrooms`].
        pub bedrooms: Option<String>,

        /// Substring of a [`property::Location`].
        pub location: Option<String>,

        /// Substring of a [`property::Building`].
        pub building: Option<String>,

        /// Exact [`property::Floor`].
        pub floor: Option<String>,

        /// Substring of a [`property::ApartmentNum`].
        pub apartment_num: Option<String>,
    }

    /// Criteria of a [`Property`] search.
    #[derive(Clone, Debug, Default)]
    pub struct Criteria {
        /// Free-text query matched against [`property::Title`],
        /// [`property::Location`] and [`property::Description`].
        pub text: Option<String>,

        /// [`Filter`] narrowing the results.
        pub filter: Filter,

        /// [`SortKey`] ordering the results.
        pub sort: SortKey,
    }

    impl Criteria {
        /// Returns the [`Property`]s out of the provided `records` matching
        /// these [`Criteria`], ordered by their [`SortKey`].
        ///
        /// Sorting is stable, so ties keep their relative order.
        #[must_use]
        pub fn apply(&self, records: &[Property]) -> Vec<Property> {
            let constraints = Constraints::new(self);

            let mut found = records
                .iter()
                .filter(|p| constraints.matches(p))
                .cloned()
                .collect::<Vec<_>>();
            match self.sort {
                SortKey::Newest => {
                    found.sort_by_key(|p| Reverse(p.created_at));
                }
                SortKey::Oldest => found.sort_by_key(|p| p.created_at),
                SortKey::PriceLow => found.sort_by_key(|p| p.price),
                SortKey::PriceHigh => found.sort_by_key(|p| Reverse(p.price)),
                SortKey::AreaLarge => found.sort_by_key(|p| Reverse(p.area)),
                SortKey::AreaSmall => found.sort_by_key(|p| p.area),
            }
            found
        }
    }

    /// Normalized [`Criteria`] ready to be matched against [`Property`]s.
    #[derive(Debug, Default)]
    struct Constraints {
        /// Lower-cased free-text query.
        text: Option<String>,

        /// Lower-cased [`property::Kind`] substring.
        kind: Option<String>,

        /// Lower-cased [`property::Status`] name.
        status: Option<String>,

        /// Minimal [`property::Price`].
        min_price: Option<Decimal>,

        /// Maximal [`property::Price`].
        max_price: Option<Decimal>,

        /// Minimal number of [`property::Bedrooms`].
        bedrooms: Option<i64>,

        /// Lower-cased [`property::Location`] substring.
        location: Option<String>,

        /// Lower-cased [`property::Building`] substring.
        building: Option<String>,

        /// Exact [`property::Floor`].
        floor: Option<i64>,

        /// Lower-cased [`property::ApartmentNum`] substring.
        apartment_num: Option<String>,
    }

    impl Constraints {
        /// Normalizes the provided [`Criteria`].
        fn new(criteria: &Criteria) -> Self {
            let Criteria {
                text,
                filter,
                sort: _,
            } = criteria;

            Self {
                text: lowercase(text.as_deref()),
                kind: lowercase(filter.kind.as_deref()),
                status: lowercase(filter.status.as_deref()),
                min_price: number(filter.min_price.as_deref()),
                max_price: number(filter.max_price.as_deref()),
                bedrooms: integer(filter.bedrooms.as_deref()),
                location: lowercase(filter.location.as_deref()),
                building: lowercase(filter.building.as_deref()),
                floor: integer(filter.floor.as_deref()),
                apartment_num: lowercase(filter.apartment_num.as_deref()),
            }
        }

        /// Checks whether the provided [`Property`] satisfies all these
        /// [`Constraints`].
        fn matches(&self, p: &Property) -> bool {
            if let Some(q) = &self.text {
                let fields: [&str; 3] = [
                    p.title.as_ref(),
                    p.location.as_ref(),
                    p.description.as_ref(),
                ];
                if !fields.into_iter().any(|s| contains(s, q)) {
                    return false;
                }
            }

            self.kind.as_ref().map_or(true, |k| contains(p.kind.as_str(), k))
                && self
                    .status
                    .as_ref()
                    .map_or(true, |s| p.status.as_str().to_lowercase() == *s)
                && self.min_price.map_or(true, |min| p.price.decimal() >= min)
                && self.max_price.map_or(true, |max| p.price.decimal() <= max)
                && self
                    .bedrooms
                    .map_or(true, |min| i64::from(p.bedrooms) >= min)
                && self
                    .location
                    .as_ref()
                    .map_or(true, |l| contains(p.location.as_ref(), l))
                && self.building.as_ref().map_or(true, |b| {
                    p.building.as_ref().is_some_and(|v| contains(v.as_ref(), b))
                })
                && self
                    .floor
                    .map_or(true, |f| p.floor.map(i64::from) == Some(f))
                && self.apartment_num.as_ref().map_or(true, |n| {
                    p.apartment_num
                        .as_ref()
                        .is_some_and(|v| contains(v.as_ref(), n))
                })
        }
    }

    /// Trims and lower-cases the provided `input`, treating a blank one as
    /// absent.
    fn lowercase(input: Option<&str>) -> Option<String> {
        input
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }

    /// Parses the provided `input` as a number, treating a blank or
    /// malformed one as absent.
    fn number<T: FromStr>(input: Option<&str>) -> Option<T> {
        input.and_then(|s| s.trim().parse().ok())
    }

    /// Parses the leading integer of the provided `input`, so `"2.5"` reads
    /// as `2` and `"12th"` as `12`. A blank input or one not starting with
    /// digits is treated as absent.
    fn integer(input: Option<&str>) -> Option<i64> {
        let s = input?.trim_start();
        let sign = usize::from(s.starts_with(['+', '-']));
        let digits = s[sign..]
            .find(|c: char| !c.is_ascii_digit())
            .map_or(s.len(), |end| sign + end);
        s[..digits].parse().ok()
    }

    /// Checks whether the provided `haystack` contains the lower-cased
    /// `needle`, ignoring case.
    fn contains(haystack: &str, needle: &str) -> bool {
        haystack.to_lowercase().contains(needle)
    }
}

#[cfg(test)]
pub(crate) mod fixture {
    //! [`Property`] fixtures for tests.

    use std::str::FromStr as _;

    use common::{Amount, DateTime};

    use crate::domain::{property, Property};

    /// Creates a [`property::Draft`] of an available house.
    pub(crate) fn draft(title: &str, price: u32) -> property::Draft {
        property::Draft {
            title: property::Title::new(title).unwrap(),
            kind: property::Kind::House,
            price: Amount::from(price),
            location: property::Location::new("Riverside, Springfield")
                .unwrap(),
            area: Amount::from(1_500),
            bedrooms: 3,
            bathrooms: property::Bathrooms::from_str("2.5").unwrap(),
            description: property::Description::new("Quiet and sunny.")
                .unwrap(),
            status: property::Status::Available,
            images: vec![],
            building: None,
            floor: None,
            apartment_num: None,
        }
    }

    /// Creates a [`Property`] with the provided `id` and `price`, created at
    /// the provided Unix `timestamp`.
    pub(crate) fn property(id: u32, price: u32, timestamp: i64) -> Property {
        Property::new(
            id.into(),
            draft(&format!("Property #{id}"), price),
            DateTime::from_unix_timestamp(timestamp).unwrap().coerce(),
        )
    }
}

#[cfg(test)]
mod spec {
    use std::collections::HashSet;

    use common::Amount;

    use crate::domain::{property, Property};

    use super::{
        fixture::property,
        search::{Criteria, Filter, SortKey},
    };

    fn ids(records: &[Property]) -> Vec<u32> {
        records.iter().map(|p| p.id.into()).collect()
    }

    fn prices(records: &[Property]) -> Vec<Amount> {
        records.iter().map(|p| p.price).collect()
    }

    fn sample() -> Vec<Property> {
        let mut downtown = property(1, 250_000, 1_000);
        downtown.title = property::Title::new("Downtown Loft").unwrap();
        downtown.kind = property::Kind::Apartment;
        downtown.building = Some(property::Building::new("Sky Tower").unwrap());
        downtown.floor = Some(12);
        downtown.apartment_num = Some(property::ApartmentNum::new("12B").unwrap());
        downtown.bedrooms = 1;

        let mut suburban = property(2, 400_000, 3_000);
        suburban.location =
            property::Location::new("Green Hills, near downtown").unwrap();
        suburban.status = property::Status::Sold;
        suburban.area = Amount::from(2_400);
        suburban.bedrooms = 4;

        let mut cheap = property(3, 100_000, 2_000);
        cheap.kind = property::Kind::Condo;
        cheap.area = Amount::from(700);
        cheap.bedrooms = 2;

        let twin = property(4, 400_000, 2_000);

        vec![downtown, suburban, cheap, twin]
    }

    #[test]
    fn no_criteria_sorts_newest_first() {
        let records = sample();

        let found = Criteria::default().apply(&records);

        assert_eq!(ids(&found), [2, 3, 4, 1]);
        assert_eq!(ids(&records), [1, 2, 3, 4], "input is left intact");
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(Criteria::default().apply(&[]).is_empty());
    }

    #[test]
    fn filters_by_min_price_and_sorts_by_price() {
        let records = vec![
            property(1, 100_000, 1),
            property(2, 250_000, 2),
            property(3, 400_000, 3),
        ];

        let found = Criteria {
            filter: Filter {
                min_price: Some("150000".into()),
                ..Filter::default()
            },
            sort: SortKey::PriceLow,
            ..Criteria::default()
        }
        .apply(&records);

        assert_eq!(
            prices(&found),
            [Amount::from(250_000), Amount::from(400_000)],
        );
    }

    #[test]
    fn equal_price_bounds_select_exact_price() {
        let found = Criteria {
            filter: Filter {
                min_price: Some("400000".into()),
                max_price: Some("400000".into()),
                ..Filter::default()
            },
            ..Criteria::default()
        }
        .apply(&sample());

        assert_eq!(ids(&found), [2, 4]);
    }

    #[test]
    fn sorting_never_changes_membership() {
        let records = sample();
        let filter = Filter {
            bedrooms: Some("2".into()),
            ..Filter::default()
        };

        let expected = HashSet::from([2, 3, 4]);
        for sort in [
            SortKey::Newest,
            SortKey::Oldest,
            SortKey::PriceLow,
            SortKey::PriceHigh,
            SortKey::AreaLarge,
            SortKey::AreaSmall,
        ] {
            let found = Criteria {
                filter: filter.clone(),
                sort,
                ..Criteria::default()
            }
            .apply(&records);

            assert_eq!(
                ids(&found).into_iter().collect::<HashSet<_>>(),
                expected,
                "sorted by `{sort}`",
            );
        }
    }

    #[test]
    fn is_idempotent() {
        let criteria = Criteria {
            text: Some("downtown".into()),
            sort: SortKey::PriceHigh,
            ..Criteria::default()
        };

        let once = criteria.apply(&sample());
        let twice = criteria.apply(&once);

        assert_eq!(once, twice);
        assert_eq!(ids(&once), [2, 1]);
    }

    #[test]
    fn free_text_is_case_insensitive() {
        let records = sample();
        let search = |q: &str| {
            Criteria {
                text: Some(q.into()),
                ..Criteria::default()
            }
            .apply(&records)
        };

        assert_eq!(search("DOWNTOWN"), search("downtown"));
        assert_eq!(ids(&search("  Downtown ")), [2, 1]);
        assert_eq!(ids(&search("   ")), [2, 3, 4, 1]);
        assert!(search("castle").is_empty());
    }

    #[test]
    fn ignores_malformed_numeric_filters() {
        let found = Criteria {
            filter: Filter {
                min_price: Some("cheap".into()),
                max_price: Some(String::new()),
                bedrooms: Some("many".into()),
                floor: Some("top".into()),
                ..Filter::default()
            },
            ..Criteria::default()
        }
        .apply(&sample());

        assert_eq!(ids(&found), [2, 3, 4, 1]);
    }

    #[test]
    fn matches_kind_and_status_ignoring_case() {
        let records = sample();

        let by_kind = Criteria {
            filter: Filter {
                kind: Some("apart".into()),
                ..Filter::default()
            },
            ..Criteria::default()
        }
        .apply(&records);
        assert_eq!(ids(&by_kind), [1]);

        let by_status = Criteria {
            filter: Filter {
                status: Some("sold".into()),
                ..Filter::default()
            },
            ..Criteria::default()
        }
        .apply(&records);
        assert_eq!(ids(&by_status), [2]);

        let partial_status = Criteria {
            filter: Filter {
                status: Some("sol".into()),
                ..Filter::default()
            },
            ..Criteria::default()
        }
        .apply(&records);
        assert!(partial_status.is_empty());
    }

    #[test]
    fn apartment_filters_skip_records_without_fields() {
        let records = sample();
        let search = |filter: Filter| {
            ids(&Criteria {
                filter,
                ..Criteria::default()
            }
            .apply(&records))
        };

        assert_eq!(
            search(Filter {
                building: Some("sky".into()),
                ..Filter::default()
            }),
            [1],
        );
        assert_eq!(
            search(Filter {
                floor: Some("12".into()),
                ..Filter::default()
            }),
            [1],
        );
        assert!(search(Filter {
            floor: Some("3".into()),
            ..Filter::default()
        })
        .is_empty());
        assert_eq!(
            search(Filter {
                apartment_num: Some("12b".into()),
                ..Filter::default()
            }),
            [1],
        );
    }

    #[test]
    fn sorts_stably() {
        let records = sample();
        let sorted = |sort| {
            ids(&Criteria {
                sort,
                ..Criteria::default()
            }
            .apply(&records))
        };

        assert_eq!(sorted(SortKey::Oldest), [1, 3, 4, 2]);
        assert_eq!(sorted(SortKey::PriceLow), [3, 1, 2, 4]);
        assert_eq!(sorted(SortKey::PriceHigh), [2, 4, 1, 3]);
        assert_eq!(sorted(SortKey::AreaLarge), [2, 1, 4, 3]);
        assert_eq!(sorted(SortKey::AreaSmall), [3, 1, 4, 2]);
    }

    #[test]
    fn parses_sort_keys() {
        assert_eq!("price-low".parse(), Ok(SortKey::PriceLow));
        assert_eq!("area-large".parse(), Ok(SortKey::AreaLarge));
        assert_eq!(SortKey::default(), SortKey::Newest);
        assert_eq!(SortKey::AreaSmall.to_string(), "area-small");
        assert!("cheapest".parse::<SortKey>().is_err());
    }

    #[test]
    fn reads_leading_integer_of_room_filters() {
        let records = sample();
        let search = |filter: Filter| {
            ids(&Criteria {
                filter,
                ..Criteria::default()
            }
            .apply(&records))
        };

        assert_eq!(
            search(Filter {
                bedrooms: Some("2.5".into()),
                ..Filter::default()
            }),
            [2, 3, 4],
        );
        assert_eq!(
            search(Filter {
                floor: Some(" 12.0".into()),
                ..Filter::default()
            }),
            [1],
        );
        assert_eq!(
            search(Filter {
                floor: Some("12th".into()),
                ..Filter::default()
            }),
            [1],
        );
        assert_eq!(
            search(Filter {
                bedrooms: Some(".5".into()),
                ..Filter::default()
            }),
            [2, 3, 4, 1],
        );
    }

    #[test]
    fn filters_by_location_ignoring_case() {
        let records = sample();
        let search = |location: &str| {
            ids(&Criteria {
                filter: Filter {
                    location: Some(location.into()),
                    ..Filter::default()
                },
                ..Criteria::default()
            }
            .apply(&records))
        };

        assert_eq!(search("GREEN hills"), [2]);
        assert_eq!(search("  DownTown "), [2]);
        assert_eq!(search("riverside"), [3, 4, 1]);
        assert_eq!(search("   "), [2, 3, 4, 1]);
        assert!(search("lakeside").is_empty());
    }

    #[test]
    fn filters_by_max_price_alone() {
        let found = Criteria {
            filter: Filter {
                max_price: Some("250000".into()),
                ..Filter::default()
            },
            sort: SortKey::PriceHigh,
            ..Criteria::default()
        }
        .apply(&sample());

        assert_eq!(
            prices(&found),
            [Amount::from(250_000), Amount::from(100_000)],
        );
    }
}
