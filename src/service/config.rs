//! Environment-driven configuration for the HTTP service.

use std::{env, fmt::Display, str::FromStr};

use tracing::{info, warn};

/// Runtime configuration, loaded from the environment at startup.
pub struct ServiceConfig {
    /// Port the HTTP listener binds to (`SAGIP_PORT`, default 3000).
    pub port: u16,
    /// Bind host (`SAGIP_HOST`, default `0.0.0.0`).
    pub host: String,
}

impl ServiceConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset. Panics on unparseable values since
    /// there is no sane way to continue with a misconfigured listener.
    pub fn load() -> Self {
        Self {
            port: try_load("SAGIP_PORT", "3000"),
            host: try_load("SAGIP_HOST", "0.0.0.0"),
        }
    }

    /// The socket address string to bind, e.g. `0.0.0.0:3000`.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn var(key: &str) -> Result<String, ()> {
    env::var(key).map_err(|_| {
        warn!("Environment variable {key} not found, using default");
    })
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}
