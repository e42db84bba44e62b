use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use healthpro_core::models::artifact::NamingScheme;
use healthpro_export::styles::PageOptions;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}: invalid value {value:?}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Server settings, read once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub output_dir: PathBuf,
    pub records_path: PathBuf,
    /// Built-in definitions when unset.
    pub definitions_path: Option<PathBuf>,
    pub chromium_path: PathBuf,
    pub naming: NamingScheme,
    pub page: PageOptions,
    /// Permissive CORS when unset.
    pub frontend_url: Option<String>,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary variable source.
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_empty = |key: &str| var(key).filter(|v| !v.trim().is_empty());

        let port: u16 = parse(&non_empty, "PORT", 5000)?;
        let host: IpAddr = parse(&non_empty, "HEALTHPRO_BIND_ADDR", IpAddr::from([0, 0, 0, 0]))?;

        let naming = match non_empty("HEALTHPRO_NAMING").as_deref().map(str::trim) {
            None | Some("session") => NamingScheme::Session,
            Some("timestamped") => NamingScheme::Timestamped,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    var: "HEALTHPRO_NAMING",
                    value: other.to_string(),
                    reason: "expected `session` or `timestamped`".to_string(),
                });
            }
        };

        let defaults = PageOptions::default();
        let page = PageOptions {
            timeout_secs: parse(&non_empty, "HEALTHPRO_RENDER_TIMEOUT_SECS", defaults.timeout_secs)?,
            settle_delay_ms: parse(&non_empty, "HEALTHPRO_SETTLE_DELAY_MS", defaults.settle_delay_ms)?,
            ..defaults
        };

        Ok(Self {
            bind_addr: SocketAddr::new(host, port),
            output_dir: non_empty("HEALTHPRO_OUTPUT_DIR")
                .unwrap_or_else(|| "generated-reports".to_string())
                .into(),
            records_path: non_empty("HEALTHPRO_RECORDS_PATH")
                .unwrap_or_else(|| "data/assessments.json".to_string())
                .into(),
            definitions_path: non_empty("HEALTHPRO_DEFINITIONS_PATH").map(PathBuf::from),
            chromium_path: non_empty("HEALTHPRO_CHROMIUM_PATH")
                .unwrap_or_else(|| "chromium".to_string())
                .into(),
            naming,
            page,
            frontend_url: non_empty("FRONTEND_URL"),
        })
    }
}

fn parse<T>(var: &impl Fn(&str) -> Option<String>, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match var(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            var: key,
            value: raw.clone(),
            reason: e.to_string(),
        }),
    }
}
