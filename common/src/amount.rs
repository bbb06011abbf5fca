//! [`Amount`] and [`Percent`] definitions.

use std::{iter::Sum, ops, str::FromStr};

use derive_more::Display;
use rust_decimal::Decimal;

/// Non-negative decimal amount.
#[derive(
    Clone, Copy, Debug, Default, Display, Eq, Hash, Ord, PartialEq, PartialOrd,
)]
pub struct Amount(Decimal);

impl Amount {
    /// Zero [`Amount`].
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Largest representable [`Amount`].
    pub const MAX: Self = Self(Decimal::MAX);

    /// Creates a new [`Amount`] if the provided value is not negative.
    #[must_use]
    pub fn new(val: Decimal) -> Option<Self> {
        (!val.is_sign_negative() || val.is_zero())
            .then(|| Self(val.normalize()))
    }

    /// Returns the underlying [`Decimal`] value.
    #[must_use]
    pub const fn decimal(self) -> Decimal {
        self.0
    }

    /// Indicates whether this [`Amount`] has no fractional part.
    #[must_use]
    pub fn is_integer(self) -> bool {
        self.0.is_integer()
    }
}

impl From<u32> for Amount {
    fn from(val: u32) -> Self {
        Self(Decimal::from(val))
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = &'static str;

    fn try_from(val: Decimal) -> Result<Self, Self::Error> {
        Self::new(val).ok_or("negative amount")
    }
}

impl FromStr for Amount {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim())
            .map_err(|_| "invalid amount")
            .and_then(Self::try_from)
    }
}

/// Saturates at [`Amount::MAX`].
impl ops::Add for Amount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, ops::Add::add)
    }
}

/// Decimal percentage in `0..=100` range.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
#[display("{_0}%")]
pub struct Percent(Decimal);

impl Percent {
    /// Creates a new [`Percent`] by checking the provided value is in
    /// `0..=100` range.
    #[must_use]
    pub fn new(val: Decimal) -> Option<Self> {
        (Decimal::ZERO..=Decimal::ONE_HUNDRED)
            .contains(&val)
            .then_some(Self(val))
    }

    /// Returns this [`Percent`] of the provided [`Amount`].
    ///
    /// Never exceeds the provided [`Amount`].
    #[must_use]
    pub fn of(self, amount: Amount) -> Amount {
        let ratio = self.0 / Decimal::ONE_HUNDRED;
        Amount(amount.0.saturating_mul(ratio).min(amount.0))
    }
}

impl FromStr for Percent {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim().trim_end_matches('%'))
            .ok()
            .and_then(Self::new)
            .ok_or("invalid percent value")
    }
}

#[cfg(feature = "juniper")]
mod juniper {
    //! Module providing integration with [`juniper`] crate.

    use std::str::FromStr as _;

    use juniper::{graphql_scalar, InputValue, ScalarValue, Value};
    use rust_decimal::Decimal;

    /// Non-negative decimal number.
    ///
    /// Accepted as an integer, a float or a `{integer}.{fraction}` string,
    /// returned as a string.
    #[graphql_scalar(with = Self, parse_token(i32, f64, String))]
    type Amount = super::Amount;

    impl Amount {
        fn to_output<S: ScalarValue>(a: &Amount) -> Value<S> {
            Value::scalar(a.to_string())
        }

        fn from_input<S: ScalarValue>(
            input: &InputValue<S>,
        ) -> Result<Self, String> {
            if let Some(i) = input.as_int_value() {
                return u32::try_from(i).map(Self::from).map_err(|_| {
                    format!("Cannot parse `Amount` input scalar: {i} < 0")
                });
            }
            if let Some(f) = input.as_float_value() {
                return Decimal::try_from(f)
                    .ok()
                    .and_then(Self::new)
                    .ok_or_else(|| {
                        format!("Cannot parse `Amount` input scalar: {f}")
                    });
            }
            input
                .as_string_value()
                .ok_or_else(|| {
                    format!(
                        "Cannot parse `Amount` input scalar from \
                         non-string value: {input}",
                    )
                })
                .and_then(|s| {
                    Self::from_str(s).map_err(|e| {
                        format!("Cannot parse `Amount` input scalar: {e}")
                    })
                })
        }
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use rust_decimal::Decimal;

    use super::{Amount, Percent};

    fn decimal(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn rejects_negative_amount() {
        assert!(Amount::new(decimal("-1")).is_none());
        assert!(Amount::from_str("-0.5").is_err());
        assert!(Amount::from_str("abc").is_err());
        assert!(Amount::from_str("").is_err());

        assert_eq!(Amount::from_str("0").unwrap(), Amount::ZERO);
        assert_eq!(
            Amount::from_str(" 2.50 ").unwrap(),
            Amount::new(decimal("2.5")).unwrap(),
        );
    }

    #[test]
    fn orders_numerically() {
        let low = Amount::from_str("99.9").unwrap();
        let high = Amount::from_str("100").unwrap();

        assert!(low < high);
        assert_eq!(
            [low, high].into_iter().sum::<Amount>(),
            Amount::from_str("199.9").unwrap(),
        );
    }

    #[test]
    fn percent_of_amount() {
        let three = Percent::from_str("3").unwrap();

        assert_eq!(
            three.of(Amount::from(500_000)),
            Amount::from(15_000),
        );
        assert_eq!(three.to_string(), "3%");
        assert_eq!(Percent::from_str("3%").unwrap(), three);

        assert!(Percent::from_str("101").is_err());
        assert!(Percent::from_str("-1").is_err());
    }

    #[test]
    fn saturates_instead_of_overflowing() {
        let huge = Amount::from_str("50000000000000000000000000000").unwrap();

        assert_eq!(huge + huge, Amount::MAX);
        assert_eq!(
            [huge, huge, huge].into_iter().sum::<Amount>(),
            Amount::MAX,
        );

        let all = Percent::from_str("100").unwrap();
        assert_eq!(all.of(Amount::MAX), Amount::MAX);
        assert_eq!(
            Percent::from_str("3").unwrap().of(huge),
            Amount::from_str("1500000000000000000000000000").unwrap(),
        );
    }
}
