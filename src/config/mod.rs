pub mod configs;
pub mod defaults;
pub mod envconfig;
pub mod environment;
pub mod validate;

pub use configs::{AppConfig, AuthConfig, DatabaseConfig, GeneralConfig, LoggingConfig};
pub use envconfig::EnvConfig;
pub use environment::Environment;
