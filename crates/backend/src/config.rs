use std::path::PathBuf;

use cropmap_shared::models::ClientConfig;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {var}={value:?}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Server settings, read from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub assets_dir: PathBuf,
    pub dist_dir: PathBuf,
    /// Handed to the browser as-is through `/api/config`.
    pub client: ClientConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = ClientConfig::default();

        let port = match get("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| ConfigError::Invalid {
                var: "PORT",
                value: raw.clone(),
                reason: e.to_string(),
            })?,
            None => 3000,
        };

        let marker_radius_m = match get("MARKER_RADIUS_M") {
            Some(raw) => {
                let radius = raw.trim().parse::<f64>().map_err(|e| ConfigError::Invalid {
                    var: "MARKER_RADIUS_M",
                    value: raw.clone(),
                    reason: e.to_string(),
                })?;
                if !radius.is_finite() || radius <= 0.0 {
                    return Err(ConfigError::Invalid {
                        var: "MARKER_RADIUS_M",
                        value: raw,
                        reason: "must be a positive number of meters".to_string(),
                    });
                }
                radius
            }
            None => defaults.marker_radius_m,
        };

        Ok(Config {
            port,
            assets_dir: PathBuf::from(get("ASSETS_DIR").unwrap_or_else(|| "assets".to_string())),
            dist_dir: PathBuf::from(get("DIST_DIR").unwrap_or_else(|| "dist".to_string())),
            client: ClientConfig {
                weather_url: get("OPENWEATHER_URL").unwrap_or(defaults.weather_url),
                weather_api_key: get("OPENWEATHER_API_KEY").unwrap_or_default(),
                recommend_url: get("RECOMMEND_URL").unwrap_or(defaults.recommend_url),
                tile_url: get("TILE_URL").unwrap_or(defaults.tile_url),
                marker_radius_m,
            },
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}
