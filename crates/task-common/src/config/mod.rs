//! Configuration structs

mod app_config;
mod duration;

pub use app_config::{
    AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, Environment, JwtConfig,
    RateLimitConfig, ServerConfig, MAX_TOKEN_LIFETIME_SECS,
};
pub use duration::parse_duration;
