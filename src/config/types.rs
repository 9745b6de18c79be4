//! The configuration structs that make up `AppConfig`, and their impls.
use std::{path::Path, time::Duration};

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use lazy_regex::regex_captures;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use sqlx::{
    postgres::{PgConnectOptions, PgSslMode},
    ConnectOptions,
};
use strum_macros::AsRefStr;

use crate::config::{ConfigError, ConfigResult};

// ###################################
// ->   STRUCTS
// ###################################
#[derive(AsRefStr, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Local,
    Production,
}

#[derive(Deserialize, Clone, Debug)]
pub struct AppConfig {
    pub net_config: NetConfig,
    pub db_config: DbConfig,
    #[serde(default)]
    pub store_backend: StoreBackend,
}

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct NetConfig {
    pub host: [u8; 4],
    #[serde(default = "default_app_port")]
    pub app_port: u16,
}

#[derive(Deserialize, Clone, Debug)]
pub struct DbConfig {
    pub username: String,
    pub password: SecretString,
    pub port: u16,
    pub host: String,
    pub db_name: String,
    #[serde(default)]
    pub require_ssl: SslRequire,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_acquire_timeout_millis")]
    pub acquire_timeout_millis: u64,
}

#[derive(Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SslRequire {
    #[default]
    Prefer,
    Require,
    Disable,
}

/// Which `SubscriberStore` implementation the application is built with.
#[derive(Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Postgres,
    Memory,
}

fn default_app_port() -> u16 {
    3003
}
fn default_max_connections() -> u32 {
    5
}
fn default_acquire_timeout_millis() -> u64 {
    500
}

// ###################################
// ->   IMPLs
// ###################################
impl AppConfig {
    /// Layers the config sources from lowest to highest priority:
    /// `base.toml`, `{environment}.toml`, `APP_*` env vars (`__` separates nested keys)
    /// and finally a bare `PORT` env var.
    pub fn figment(config_dir: &Path, environment: Environment) -> Figment {
        let environment_filename = format!("{}.toml", environment.as_ref().to_lowercase());

        Figment::new()
            .merge(Toml::file(config_dir.join("base.toml")))
            .merge(Toml::file(config_dir.join(environment_filename)))
            .merge(Env::prefixed("APP_").split("__"))
            .merge(
                Env::raw()
                    .only(&["port"])
                    .map(|_| "net_config.app_port".into()),
            )
    }

    pub fn load(config_dir: &Path, environment: Environment) -> ConfigResult<Self> {
        let mut config: AppConfig = Self::figment(config_dir, environment).extract()?;

        // In production the database is described by a single URL.
        if environment == Environment::Production {
            let production_db = std::env::var("DATABASE_URL")
                .map_err(|_| ConfigError::MissingEnv("DATABASE_URL"))?;
            config.db_config = DbConfig::try_from(production_db.as_str())?;
        }

        Ok(config)
    }
}

impl DbConfig {
    pub fn connection_options(&self) -> PgConnectOptions {
        // Don't try to use the '$HOME/.pgpass' file.
        PgConnectOptions::new_without_pgpass()
            .host(&self.host)
            .username(&self.username)
            .password(self.password.expose_secret())
            .port(self.port)
            .database(&self.db_name)
            .ssl_mode(self.require_ssl.into())
            .log_statements(tracing::log::LevelFilter::Trace)
    }

    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_millis(self.acquire_timeout_millis)
    }
}

impl From<SslRequire> for PgSslMode {
    fn from(value: SslRequire) -> Self {
        match value {
            SslRequire::Require => PgSslMode::Require,
            SslRequire::Disable => PgSslMode::Disable,
            SslRequire::Prefer => PgSslMode::Prefer,
        }
    }
}

// ###################################
// ->   TRY FROMs
// ###################################
impl TryFrom<String> for Environment {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            _ => Err(Self::Error::StringToEnvironmentFail),
        }
    }
}

impl TryFrom<&str> for DbConfig {
    type Error = ConfigError;

    /// Parses `postgres://{username}:{password}@{host}:{port}/{database}?{options}`.
    /// Only the `sslmode` option is understood, everything else is ignored.
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let (_whole, username, password, host, port, db_name, query) = regex_captures!(
            r#"^postgres(?:ql)?:\/\/([^:]+):([^@]+)@([^:\/]+):(\d+)\/([^\s\/?]+)(\?[^\s]*)?$"#,
            value
        )
        .ok_or(ConfigError::StringToDbConfigFail)?;

        let port = port
            .parse::<u16>()
            .map_err(|_| ConfigError::StringToDbConfigFail)?;

        let require_ssl = query
            .trim_start_matches('?')
            .split(['&', ','])
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| *key == "sslmode")
            .map(|(_, mode)| match mode {
                "disable" => SslRequire::Disable,
                "require" => SslRequire::Require,
                _ => SslRequire::Prefer,
            })
            .unwrap_or_default();

        Ok(DbConfig {
            username: username.to_string(),
            password: SecretString::from(password.to_string()),
            port,
            host: host.to_string(),
            db_name: db_name.to_string(),
            require_ssl,
            max_connections: default_max_connections(),
            acquire_timeout_millis: default_acquire_timeout_millis(),
        })
    }
}
