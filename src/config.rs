use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{var} has an invalid value: {value:?}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub sslmode: String,
    pub pool_size: u32,
    /// Takes precedence over the individual connection parameters.
    pub url_override: Option<String>,
}

impl DatabaseConfig {
    pub fn url(&self) -> String {
        if let Some(url) = &self.url_override {
            return url.clone();
        }
        format!(
            "postgres://{}:{}@{}:{}/{}?sslmode={}",
            self.user, self.password, self.host, self.port, self.name, self.sslmode
        )
    }
}

#[derive(Debug, Clone)]
pub struct KafkaConfig {
    pub group_id: String,
    pub topic: String,
    pub brokers: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub enabled: bool,
    pub default_expiration: Duration,
    pub cleanup_interval: Duration,
    pub preload_limit: u32,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub http: HttpConfig,
    pub database: DatabaseConfig,
    pub kafka: KafkaConfig,
    pub cache: CacheConfig,
    pub shutdown_timeout: Duration,
}

impl Config {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env { lookup };
        let url_override = env.optional("DATABASE_URL");

        // Individual connection parameters are only required without an override.
        let db_required = |var: &'static str| match &url_override {
            Some(_) => Ok(env.optional(var).unwrap_or_default()),
            None => env.required(var),
        };

        Ok(Config {
            http: HttpConfig {
                host: env.or("HTTP_HOST", "0.0.0.0"),
                port: env.parsed_or("HTTP_PORT", 8080)?,
            },
            database: DatabaseConfig {
                host: db_required("DB_HOST")?,
                port: env.parsed_or("DB_PORT", 5432)?,
                user: db_required("DB_USER")?,
                password: db_required("DB_PASSWORD")?,
                name: db_required("DB_NAME")?,
                sslmode: env.or("DB_SSLMODE", "disable"),
                pool_size: env.parsed_or("DB_POOL_SIZE", 10)?,
                url_override: url_override.clone(),
            },
            kafka: KafkaConfig {
                group_id: env.required("KAFKA_GROUP_ID")?,
                topic: env.required("KAFKA_TOPIC")?,
                brokers: parse_brokers(&env.required("KAFKA_BROKERS")?)
                    .ok_or_else(|| ConfigError::Invalid {
                        var: "KAFKA_BROKERS",
                        value: env.optional("KAFKA_BROKERS").unwrap_or_default(),
                    })?,
            },
            cache: CacheConfig {
                enabled: env.parsed_or("CACHE_ENABLED", true)?,
                default_expiration: Duration::from_secs(
                    env.parsed_or("CACHE_DEFAULT_EXPIRATION_SECS", 300)?,
                ),
                cleanup_interval: Duration::from_secs(
                    env.parsed_or("CACHE_CLEANUP_INTERVAL_SECS", 600)?,
                ),
                preload_limit: env.parsed_or("CACHE_PRELOAD_LIMIT", 100)?,
            },
            shutdown_timeout: Duration::from_secs(env.parsed_or("SHUTDOWN_TIMEOUT_SECS", 10)?),
        })
    }
}

fn parse_brokers(raw: &str) -> Option<Vec<String>> {
    let brokers: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|b| !b.is_empty())
        .map(str::to_string)
        .collect();
    (!brokers.is_empty()).then_some(brokers)
}

struct Env<F> {
    lookup: F,
}

impl<F: Fn(&str) -> Option<String>> Env<F> {
    fn optional(&self, var: &str) -> Option<String> {
        (self.lookup)(var).filter(|v| !v.is_empty())
    }

    fn required(&self, var: &'static str) -> Result<String, ConfigError> {
        self.optional(var).ok_or(ConfigError::Missing(var))
    }

    fn or(&self, var: &str, default: &str) -> String {
        self.optional(var).unwrap_or_else(|| default.to_string())
    }

    fn parsed_or<T: FromStr>(&self, var: &'static str, default: T) -> Result<T, ConfigError> {
        match self.optional(var) {
            None => Ok(default),
            Some(value) => value
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid { var, value }),
        }
    }
}
