//! In-memory [`Database`] implementation.

mod collection;
mod impls;
pub mod seed;

use std::time::Duration;

use derive_more::{Display, Error as StdError};
use rand::Rng as _;
use smart_default::SmartDefault;
use tracing as log;

use crate::domain::{Client, Property};
#[cfg(doc)]
use crate::infra::Database;

use self::collection::Collection;

pub use self::seed::Seed;

/// In-memory [`Database`] client.
///
/// Clones share the same underlying collections.
#[derive(Clone, Debug)]
pub struct Memory {
    /// Collection of [`Property`] records.
    properties: Collection<Property>,

    /// Collection of [`Client`] records.
    clients: Collection<Client>,

    /// [`Latency`] of every operation.
    latency: Latency,
}

impl Memory {
    /// Creates a new empty [`Memory`] client with the provided [`Config`].
    #[must_use]
    pub fn new(conf: Config) -> Self {
        Self {
            properties: Collection::default(),
            clients: Collection::default(),
            latency: conf.latency,
        }
    }

    /// Creates a new [`Memory`] client with the provided [`Config`] holding
    /// the records of the provided [`Seed`].
    ///
    /// # Errors
    ///
    /// If the [`Seed`] contains invalid or duplicated records.
    pub fn seeded(conf: Config, seed: Seed) -> Result<Self, seed::Error> {
        let (properties, clients) = seed.into_records()?;
        log::debug!(
            "seeded `Memory` with {} properties and {} clients",
            properties.len(),
            clients.len(),
        );

        Ok(Self {
            properties: Collection::from(properties),
            clients: Collection::from(clients),
            latency: conf.latency,
        })
    }

    /// Waits for the simulated round-trip [`Latency`].
    async fn delay(&self) {
        let latency = self.latency.sample();
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
    }
}

/// [`Memory`] configuration.
#[derive(Clone, Copy, Debug, Default)]
pub struct Config {
    /// [`Latency`] of every [`Memory`] operation.
    pub latency: Latency,
}

/// Range of a simulated round-trip latency.
#[derive(Clone, Copy, Debug, Eq, PartialEq, SmartDefault)]
pub struct Latency {
    /// Minimal latency, inclusive.
    #[default(Duration::from_millis(200))]
    pub min: Duration,

    /// Maximal latency, inclusive.
    #[default(Duration::from_millis(500))]
    pub max: Duration,
}

impl Latency {
    /// No [`Latency`] at all.
    pub const ZERO: Self = Self {
        min: Duration::ZERO,
        max: Duration::ZERO,
    };

    /// Picks a uniformly random [`Duration`] within this [`Latency`].
    ///
    /// Collapses to [`Latency::min`] if the range is empty.
    #[must_use]
    pub fn sample(self) -> Duration {
        if self.max <= self.min {
            return self.min;
        }
        rand::thread_rng().gen_range(self.min..=self.max)
    }
}

/// [`Memory`] database error.
#[derive(Clone, Copy, Debug, Display, StdError)]
pub enum Error {
    /// No more identifiers can be assigned in a collection.
    #[display("No more identifiers can be assigned")]
    IdsExhausted,
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use super::Latency;

    #[test]
    fn samples_within_range() {
        let latency = Latency::default();
        for _ in 0..100 {
            let d = latency.sample();
            assert!(
                (Duration::from_millis(200)..=Duration::from_millis(500))
                    .contains(&d),
                "{d:?} is out of range",
            );
        }
    }

    #[test]
    fn collapses_empty_range() {
        let latency = Latency {
            min: Duration::from_millis(10),
            max: Duration::from_millis(5),
        };

        assert_eq!(latency.sample(), Duration::from_millis(10));
        assert_eq!(Latency::ZERO.sample(), Duration::ZERO);
    }
}
