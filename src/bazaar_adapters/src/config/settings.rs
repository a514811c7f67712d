use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use http::HeaderValue;
use secrecy::Secret;
use serde::{Deserialize, Deserializer};

use super::constants::{
    DEFAULT_CONFIG_DIR, DEFAULT_MAX_DB_CONNECTIONS, DEFAULT_PASSWORD_RESET_TTL_SECONDS,
    DEFAULT_TOKEN_TTL_SECONDS, env, prod,
};
use crate::auth_validation::local_jwt_validator::JwtAuthConfig;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub application: ApplicationSettings,
    pub auth: AuthSettings,
    pub postgres: PostgresSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationSettings {
    pub address: String,
}

impl Default for ApplicationSettings {
    fn default() -> Self {
        Self {
            address: prod::APP_ADDRESS.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    pub jwt: JwtSettings,
    #[serde(default)]
    pub password_reset: PasswordResetSettings,
    #[serde(default)]
    pub allowed_origins: AllowedOrigins,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JwtSettings {
    pub secret: Secret<String>,
    /// Seconds
    #[serde(default = "default_token_ttl")]
    pub time_to_live: i64,
}

impl JwtSettings {
    pub fn auth_config(&self) -> JwtAuthConfig {
        JwtAuthConfig {
            jwt_secret: self.secret.clone(),
            token_ttl_in_seconds: self.time_to_live,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PasswordResetSettings {
    /// Seconds
    pub time_to_live: i64,
}

impl PasswordResetSettings {
    pub fn ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.time_to_live)
    }
}

impl Default for PasswordResetSettings {
    fn default() -> Self {
        Self {
            time_to_live: DEFAULT_PASSWORD_RESET_TTL_SECONDS,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostgresSettings {
    pub url: Secret<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_token_ttl() -> i64 {
    DEFAULT_TOKEN_TTL_SECONDS
}

fn default_max_connections() -> u32 {
    DEFAULT_MAX_DB_CONNECTIONS
}

/// Origins allowed to make cross-origin requests.
#[derive(Debug, Clone, Default)]
pub struct AllowedOrigins(Vec<HeaderValue>);

impl AllowedOrigins {
    pub fn new(origins: Vec<HeaderValue>) -> Self {
        Self(origins)
    }

    pub fn contains(&self, origin: &HeaderValue) -> bool {
        self.0.iter().any(|allowed| allowed == origin)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for AllowedOrigins {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Vec::<String>::deserialize(deserializer)?;
        raw.iter()
            .map(|origin| HeaderValue::from_str(origin.trim()).map_err(serde::de::Error::custom))
            .collect::<Result<Vec<_>, _>>()
            .map(AllowedOrigins)
    }
}

impl Settings {
    /// Loads `default.json`, then an optional `local.json`, from the config
    /// directory, then `BAZAAR__SECTION__KEY` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config_dir = std::env::var(env::CONFIG_DIR_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_DIR));

        Self::from_builder(
            Config::builder()
                .add_source(File::from(config_dir.join("default.json")).required(false))
                .add_source(File::from(config_dir.join("local.json")).required(false)),
        )
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, ConfigError> {
        builder
            .add_source(
                Environment::with_prefix(env::ENV_PREFIX)
                    .prefix_separator(env::ENV_SEPARATOR)
                    .separator(env::ENV_SEPARATOR)
                    .list_separator(",")
                    .with_list_parse_key("auth.allowed_origins")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
