//! Process configuration, read from the environment at startup.

use std::time::Duration;

/// Runtime settings for the API server.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub jwt_secret: String,
    pub token_ttl: Duration,
}

impl AppConfig {
    /// Read configuration from the environment, falling back to dev defaults.
    pub fn from_env() -> Self {
        let bind_addr =
            std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("JWT_SECRET not set; using insecure dev default");
            "dev-secret".to_string()
        });

        let token_ttl = std::env::var("TOKEN_TTL_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(Self::DEFAULT_TOKEN_TTL);

        Self {
            bind_addr,
            jwt_secret,
            token_ttl,
        }
    }

    /// One hour, matching the issued token lifetime clients expect.
    pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(3600);
}
