//! Environment-driven service configuration.

use crate::notification::adapters::SmtpSettings;
use std::net::{AddrParseError, IpAddr, SocketAddr};
use std::num::ParseIntError;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_POOL_SIZE: u32 = 10;
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_SMTP_PORT: u16 = 587;
const DEFAULT_MAIL_FROM: &str = "taskflow@localhost";

/// Errors raised while reading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required variable is unset or empty.
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    /// A numeric variable did not parse.
    #[error("invalid value for {name}: {source}")]
    InvalidNumber {
        /// Variable name.
        name: &'static str,
        /// Parse failure.
        source: ParseIntError,
    },

    /// The bind host is not an IP address.
    #[error("invalid value for HOST: {0}")]
    InvalidHost(#[from] AddrParseError),
}

/// Database pool settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection string.
    pub url: String,
    /// Maximum pooled connections.
    pub pool_size: u32,
    /// Pool checkout timeout.
    pub timeout: Duration,
}

/// Service configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Address the HTTP server binds to.
    pub bind: SocketAddr,
    /// Database settings.
    pub database: DatabaseConfig,
    /// SMTP relay settings; `None` routes notifications to the log.
    pub smtp: Option<SmtpSettings>,
}

impl Config {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when `DATABASE_URL` is unset or a value does
    /// not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads configuration through `lookup`, treating empty values as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when `DATABASE_URL` is unset or a value does
    /// not parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.is_empty());

        let host: IpAddr = get("HOST")
            .as_deref()
            .unwrap_or(DEFAULT_HOST)
            .parse()?;
        let port = parse_or(get("PORT"), "PORT", DEFAULT_PORT)?;

        let database = DatabaseConfig {
            url: get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?,
            pool_size: parse_or(get("DATABASE_POOL_SIZE"), "DATABASE_POOL_SIZE", DEFAULT_POOL_SIZE)?,
            timeout: Duration::from_secs(parse_or(
                get("DATABASE_TIMEOUT_SECS"),
                "DATABASE_TIMEOUT_SECS",
                DEFAULT_TIMEOUT_SECS,
            )?),
        };

        let smtp = get("SMTP_HOST")
            .map(|smtp_host| -> Result<SmtpSettings, ConfigError> {
                Ok(SmtpSettings {
                    host: smtp_host,
                    port: parse_or(get("SMTP_PORT"), "SMTP_PORT", DEFAULT_SMTP_PORT)?,
                    username: get("SMTP_USERNAME"),
                    password: get("SMTP_PASSWORD"),
                    from: get("MAIL_FROM").unwrap_or_else(|| DEFAULT_MAIL_FROM.to_owned()),
                })
            })
            .transpose()?;

        Ok(Self {
            bind: SocketAddr::new(host, port),
            database,
            smtp,
        })
    }
}

fn parse_or<T>(value: Option<String>, name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr<Err = ParseIntError>,
{
    value.map_or(Ok(default), |raw| {
        raw.parse()
            .map_err(|source| ConfigError::InvalidNumber { name, source })
    })
}
