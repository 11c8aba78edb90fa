use std::{env, fmt::Display, path::PathBuf, str::FromStr, time::Duration};

use thiserror::Error;
use tracing::{info, warn};

const MEBIBYTE: usize = 1024 * 1024;

#[derive(Error, Debug)]
#[error("Invalid {key} value: {reason}")]
pub struct ConfigError {
    pub key: &'static str,
    pub reason: String,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub backend_url: String,
    pub backend_timeout: Duration,
    pub max_upload_bytes: usize,
    pub static_dir: PathBuf,
    pub upload_dir: PathBuf,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        let timeout_secs: u64 = try_load("BACKEND_TIMEOUT_SECS", "120")?;
        let max_upload_mb: usize = try_load("MAX_UPLOAD_MB", "64")?;

        Ok(Self {
            port: try_load("RUST_PORT", "3000")?,
            backend_url: try_load("BACKEND_URL", "http://127.0.0.1:8000/upload")?,
            backend_timeout: Duration::from_secs(timeout_secs),
            max_upload_bytes: max_upload_mb.saturating_mul(MEBIBYTE),
            static_dir: try_load("STATIC_DIR", "public")?,
            upload_dir: var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| env::temp_dir()),
        })
    }
}

fn var(key: &str) -> Result<String, ()> {
    env::var(key).map_err(|_| {
        warn!("Environment variable {key} not found, using default");
    })
}

fn try_load<T: FromStr>(key: &'static str, default: &str) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e: T::Err| {
            warn!("Invalid {key} value: {e}");

            ConfigError {
                key,
                reason: e.to_string(),
            }
        })
}
