use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::{Environment, defaults, envconfig::EnvConfig, validate};

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub general: GeneralConfig,
    pub logging: LoggingConfig,
    pub database: Option<DatabaseConfig>,
    pub auth: Option<AuthConfig>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        <Self as EnvConfig>::from_env()
    }
}

impl EnvConfig for AppConfig {
    fn validate(&self) -> Result<()> {
        validate::validate(self)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneralConfig {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            host: defaults::DEFAULT_HOST.to_string(),
            port: defaults::DEFAULT_PORT as u16,
            environment: Environment::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub rust_log: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            rust_log: defaults::DEFAULT_RUST_LOG.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_db_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_db_min_idle")]
    pub min_idle: u32,
}

impl DatabaseConfig {
    /// Connection URL safe for logs: the password, if any, becomes `***`.
    pub fn redacted_url(&self) -> String {
        let Some((scheme, rest)) = self.url.split_once("://") else {
            return self.url.clone();
        };
        let Some((credentials, host)) = rest.rsplit_once('@') else {
            return self.url.clone();
        };
        match credentials.split_once(':') {
            Some((user, _)) => format!("{scheme}://{user}:***@{host}"),
            None => self.url.clone(),
        }
    }
}

#[derive(Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AuthConfig {
    pub jwt_secret: String,
    #[serde(default = "default_token_ttl_secs")]
    pub token_ttl_secs: u64,
    #[serde(default)]
    pub admin_email: Option<String>,
    #[serde(default)]
    pub admin_password: Option<String>,
}

// Keeps the secret and admin password out of `{:?}` output.
impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"***")
            .field("token_ttl_secs", &self.token_ttl_secs)
            .field("admin_email", &self.admin_email)
            .field("admin_password", &self.admin_password.as_ref().map(|_| "***"))
            .finish()
    }
}

fn default_db_max_connections() -> u32 {
    defaults::DEFAULT_DB_MAX_CONNECTIONS as u32
}

fn default_db_min_idle() -> u32 {
    defaults::DEFAULT_DB_MIN_IDLE as u32
}

fn default_token_ttl_secs() -> u64 {
    defaults::DEFAULT_TOKEN_TTL_SECS as u64
}

#[cfg(test)]
mod tests {
    use ::config as config_rs;

    use super::{AppConfig, DatabaseConfig};
    use crate::config::{EnvConfig, Environment};

    fn source(pairs: &[(&str, &str)]) -> config_rs::Environment {
        let map = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        config_rs::Environment::with_prefix("APP")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
            .source(Some(map))
    }

    #[test]
    fn loads_sections_from_prefixed_variables() {
        let cfg = AppConfig::from_source(source(&[
            ("APP_GENERAL__PORT", "8080"),
            ("APP_GENERAL__ENVIRONMENT", "prod"),
            ("APP_DATABASE__URL", "postgres://app:pw@db:5432/shop"),
            (
                "APP_AUTH__JWT_SECRET",
                "0123456789abcdef0123456789abcdef",
            ),
        ]))
        .expect("config should load");

        assert_eq!(cfg.general.port, 8080);
        assert_eq!(cfg.general.environment, Environment::Production);
        let database = cfg.database.expect("database section");
        assert_eq!(database.max_connections, 10);
        assert_eq!(database.min_idle, 2);
        let auth = cfg.auth.expect("auth section");
        assert_eq!(auth.token_ttl_secs, 14_400);
        assert!(auth.admin_email.is_none());
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = AppConfig::from_source(source(&[("APP_GENERAL__COLOR", "blue")]))
            .expect_err("unknown key should fail");
        assert!(format!("{err:#}").contains("color"), "{err:#}");
    }

    #[test]
    fn redacted_url_hides_password() {
        let cfg = DatabaseConfig {
            url: "postgres://app:s3cret@db:5432/shop".to_string(),
            max_connections: 10,
            min_idle: 2,
        };
        assert_eq!(cfg.redacted_url(), "postgres://app:***@db:5432/shop");

        let no_password = DatabaseConfig {
            url: "postgres://db:5432/shop".to_string(),
            ..cfg
        };
        assert_eq!(no_password.redacted_url(), "postgres://db:5432/shop");
    }

    #[test]
    fn auth_debug_output_is_redacted() {
        let cfg = AppConfig::from_source(source(&[
            ("APP_AUTH__JWT_SECRET", "top-secret-value"),
            ("APP_AUTH__ADMIN_EMAIL", "root@example.com"),
            ("APP_AUTH__ADMIN_PASSWORD", "hunter2hunter2"),
        ]))
        .expect("config should load");
        let rendered = format!("{:?}", cfg.auth);
        assert!(!rendered.contains("top-secret-value"));
        assert!(!rendered.contains("hunter2hunter2"));
        assert!(rendered.contains("root@example.com"));
    }
}
