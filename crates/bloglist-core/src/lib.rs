use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod app_config;
pub mod config;
pub mod stats;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};

/// One blog entry as the aggregation layer sees it.
///
/// `likes` is always present and non-negative by the time a record is
/// constructed: creation defaults a missing count to zero and the API
/// boundary rejects negative values, so downstream code never re-checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogPost {
    pub title: String,
    pub author: String,
    pub url: String,
    pub likes: i64,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
