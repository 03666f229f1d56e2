use std::env;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error)]
#[error("{name} must be {expected}, got '{value}'")]
pub struct ConfigError {
    name: &'static str,
    expected: &'static str,
    value: String,
}

/// Runtime settings read from the environment (and `.env`, if present).
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub admin_password: String,
    pub session_ttl_secs: i64,
    pub seed_products: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            admin_password: "admin".to_string(),
            session_ttl_secs: 24 * 60 * 60,
            seed_products: true,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from any name → value lookup; unset names keep
    /// their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse(&lookup, "PORT", "a valid port number")?.unwrap_or(defaults.port),
            admin_password: lookup("ADMIN_PASSWORD").unwrap_or(defaults.admin_password),
            session_ttl_secs: parse_ttl(&lookup)?.unwrap_or(defaults.session_ttl_secs),
            seed_products: parse(&lookup, "SEED_PRODUCTS", "true or false")?
                .unwrap_or(defaults.seed_products),
        })
    }
}

/// Longest accepted session lifetime: ten years.
pub const MAX_SESSION_TTL_SECS: i64 = 10 * 365 * 24 * 60 * 60;

fn parse_ttl<F>(lookup: &F) -> Result<Option<i64>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    const NAME: &str = "SESSION_TTL_SECS";
    const EXPECTED: &str = "a number of seconds between 1 and 315360000";
    let ttl = parse::<i64, F>(lookup, NAME, EXPECTED)?;
    match ttl {
        Some(secs) if !(1..=MAX_SESSION_TTL_SECS).contains(&secs) => Err(ConfigError {
            name: NAME,
            expected: EXPECTED,
            value: secs.to_string(),
        }),
        _ => Ok(ttl),
    }
}

fn parse<T, F>(lookup: &F, name: &'static str, expected: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|value| {
            value.trim().parse::<T>().map_err(|_| ConfigError {
                name,
                expected,
                value,
            })
        })
        .transpose()
}
