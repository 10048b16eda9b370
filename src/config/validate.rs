use anyhow::{Result, bail};

use super::{AppConfig, defaults::MIN_PRODUCTION_SECRET_LEN};
use crate::auth::password::MIN_PASSWORD_LEN;

pub fn validate(cfg: &AppConfig) -> Result<()> {
    let mut errors: Vec<String> = Vec::new();

    if cfg.general.host.trim().is_empty() {
        errors.push("general.host must not be empty".to_string());
    }

    if let Some(database) = cfg.database.as_ref() {
        if database.url.trim().is_empty() {
            errors.push("database.url must not be empty".to_string());
        }

        if database.min_idle > database.max_connections {
            errors.push(format!(
                "database.min_idle ({}) must be <= database.max_connections ({})",
                database.min_idle, database.max_connections
            ));
        }
    }

    if let Some(auth) = cfg.auth.as_ref() {
        if auth.jwt_secret.trim().is_empty() {
            errors.push("auth.jwt_secret must not be empty".to_string());
        } else if cfg.general.environment.is_production()
            && auth.jwt_secret.len() < MIN_PRODUCTION_SECRET_LEN
        {
            errors.push(format!(
                "auth.jwt_secret must be at least {MIN_PRODUCTION_SECRET_LEN} characters in production"
            ));
        }

        if auth.token_ttl_secs == 0 {
            errors.push("auth.token_ttl_secs must be > 0".to_string());
        }

        match (auth.admin_email.as_deref(), auth.admin_password.as_deref()) {
            (Some(email), Some(password)) => {
                if email.trim().is_empty() {
                    errors.push("auth.admin_email must not be empty".to_string());
                }
                if password.len() < MIN_PASSWORD_LEN {
                    errors.push(format!(
                        "auth.admin_password must be at least {MIN_PASSWORD_LEN} characters"
                    ));
                }
            }
            (Some(_), None) | (None, Some(_)) => errors.push(
                "auth.admin_email and auth.admin_password must be set together".to_string(),
            ),
            (None, None) => {}
        }
    }

    if errors.is_empty() {
        return Ok(());
    }

    bail!("invalid app config:\n- {}", errors.join("\n- "))
}

#[cfg(test)]
mod tests {
    use super::validate;
    use crate::config::{AppConfig, AuthConfig, DatabaseConfig, Environment};

    fn auth(secret: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: secret.to_string(),
            token_ttl_secs: 60,
            admin_email: None,
            admin_password: None,
        }
    }

    #[test]
    fn defaults_are_valid() {
        assert!(validate(&AppConfig::default()).is_ok());
    }

    #[test]
    fn collects_every_problem() {
        let mut cfg = AppConfig::default();
        cfg.general.host = " ".to_string();
        cfg.database = Some(DatabaseConfig {
            url: String::new(),
            max_connections: 1,
            min_idle: 5,
        });
        cfg.auth = Some(AuthConfig {
            token_ttl_secs: 0,
            admin_email: Some("root@example.com".to_string()),
            ..auth("")
        });

        let message = validate(&cfg).expect_err("config should be rejected").to_string();
        for expected in [
            "general.host",
            "database.url",
            "database.min_idle",
            "auth.jwt_secret",
            "auth.token_ttl_secs",
            "set together",
        ] {
            assert!(message.contains(expected), "missing {expected}: {message}");
        }
    }

    #[test]
    fn production_requires_long_secret() {
        let mut cfg = AppConfig::default();
        cfg.auth = Some(auth("short-secret"));
        assert!(validate(&cfg).is_ok());

        cfg.general.environment = Environment::Production;
        let message = validate(&cfg).expect_err("short secret").to_string();
        assert!(message.contains("at least 32 characters"), "{message}");
    }

    #[test]
    fn admin_password_must_meet_minimum_length() {
        let mut cfg = AppConfig::default();
        cfg.auth = Some(AuthConfig {
            admin_email: Some("root@example.com".to_string()),
            admin_password: Some("short".to_string()),
            ..auth("secret")
        });
        let message = validate(&cfg).expect_err("short password").to_string();
        assert!(message.contains("auth.admin_password"), "{message}");
    }
}
