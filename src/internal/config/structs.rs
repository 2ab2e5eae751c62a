pub mod app_config;
pub mod config_error;

pub use app_config::{AppConfig, ENV_PREFIX};
pub use config_error::ConfigError;
