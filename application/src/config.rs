//! [`Config`]-related definitions.

use std::time;

use common::Percent;
use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use derive_more::{Display, Error as StdError};
use rust_decimal::Decimal;
use serde::Deserialize;
use service::infra::memory;
use smart_default::SmartDefault;

/// Application configuration.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    /// Server configuration.
    pub server: Server,

    /// Service configuration.
    pub service: Service,

    /// Store configuration.
    pub store: Store,

    /// Log configuration.
    pub log: Log,
}

impl Config {
    /// Creates a new [`Config`] by:
    /// - loading it from the provided `path` (if any);
    /// - merging it with the environment variables (if any);
    /// - using default values for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(path: impl AsRef<str>) -> Result<Self, ConfigError> {
        ConfigBuilder::<DefaultState>::default()
            .add_source(config::File::with_name(path.as_ref()).required(false))
            .add_source(config::Environment::with_prefix("CONF").separator("."))
            .build()?
            .try_deserialize()
    }
}

/// Server configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Server {
    /// Host to bind the server to.
    #[default("0.0.0.0".to_owned())]
    pub host: String,

    /// Port to bind the server to.
    #[default(8080)]
    pub port: u16,

    /// [CORS] configuration.
    ///
    /// [CORS]: https://developer.mozilla.org/en-US/docs/Web/HTTP/CORS
    pub cors: Cors,
}

/// [CORS] configuration.
///
/// [CORS]: https://developer.mozilla.org/en-US/docs/Web/HTTP/CORS
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Cors {
    /// List of allowed origins.
    #[default(vec!["*".to_owned()])]
    pub origins: Vec<String>,
}

/// Service configuration.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Service {
    /// Commission percent the agency earns on a sold property.
    #[default(Decimal::from(3))]
    pub commission: Decimal,

    /// Number of the most recent properties shown on the dashboard.
    #[default(4)]
    pub recent_limit: usize,
}

impl TryFrom<Service> for service::Config {
    type Error = InvalidCommission;

    fn try_from(value: Service) -> Result<Self, Self::Error> {
        let Service {
            commission,
            recent_limit,
        } = value;

        Ok(Self {
            commission: Percent::new(commission)
                .ok_or(InvalidCommission(commission))?,
            recent_limit,
        })
    }
}

/// Error of a commission being out of `0..=100` percent range.
#[derive(Clone, Copy, Debug, Display, StdError)]
#[display("commission `{_0}` is not in `0..=100` percent range")]
pub struct InvalidCommission(#[error(not(source))] Decimal);

/// Store configuration.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Store {
    /// Simulated latency of every store operation.
    pub latency: Latency,

    /// Path to a JSON file to seed the store with.
    ///
    /// The store starts empty if omitted.
    pub seed: Option<String>,
}

impl From<&Store> for memory::Config {
    fn from(value: &Store) -> Self {
        let Latency { min, max } = value.latency;
        Self {
            latency: memory::Latency { min, max },
        }
    }
}

/// Simulated latency configuration.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Latency {
    /// Minimal latency of a store operation.
    #[default(time::Duration::from_millis(200))]
    #[serde(with = "humantime_serde")]
    pub min: time::Duration,

    /// Maximal latency of a store operation.
    #[default(time::Duration::from_millis(500))]
    #[serde(with = "humantime_serde")]
    pub max: time::Duration,
}

/// Log configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Log {
    /// Log level.
    pub level: LogLevel,
}

/// Log level.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    /// Designates very low priority, often extremely verbose, information.
    Trace,

    /// Designates lower priority information.
    Debug,

    /// Designates useful information.
    #[default]
    Info,

    /// Designates hazardous situations.
    Warn,

    /// Designates very serious errors.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use rust_decimal::Decimal;
    use service::infra::memory;

    use super::{Config, Service};

    #[test]
    fn defaults_missing_file() {
        let conf = Config::new("does-not-exist.toml").unwrap();

        assert_eq!(conf.server.port, 8080);
        assert_eq!(conf.service.recent_limit, 4);
        assert_eq!(conf.store.seed, None);
        assert_eq!(
            memory::Config::from(&conf.store).latency,
            memory::Latency {
                min: Duration::from_millis(200),
                max: Duration::from_millis(500),
            },
        );
    }

    #[test]
    fn rejects_out_of_range_commission() {
        let conf = Service {
            commission: Decimal::from(101),
            recent_limit: 4,
        };

        assert!(service::Config::try_from(conf).is_err());
        assert!(service::Config::try_from(Service::default()).is_ok());
    }
}
