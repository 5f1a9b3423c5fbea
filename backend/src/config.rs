//! Application configuration file support.
//!
//! Settings are read from `occupancy.toml` and can be overridden with
//! environment variables:
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `OCCUPANCY_DATA_PATH`: Sales CSV location (default: ./seasonal_ph_sales.csv)

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::error::{OccupancyError, OccupancyResult};

/// Application configuration from file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub data: DataSettings,
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Sales data source settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSettings {
    #[serde(default = "default_data_path")]
    pub path: PathBuf,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            path: default_data_path(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_data_path() -> PathBuf {
    PathBuf::from("./seasonal_ph_sales.csv")
}

impl AppConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(AppConfig)` if successful
    /// * `Err(OccupancyError::Configuration)` if file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> OccupancyResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            OccupancyError::Configuration(format!("Failed to read config file: {}", e))
        })?;

        toml::from_str(&content).map_err(|e| {
            OccupancyError::Configuration(format!("Failed to parse config file: {}", e))
        })
    }

    /// Load configuration from the default location.
    ///
    /// Searches for `occupancy.toml` in:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    ///
    /// Returns `Ok(None)` when no file exists.
    pub fn from_default_location() -> OccupancyResult<Option<Self>> {
        let search_paths = [
            PathBuf::from("occupancy.toml"),
            PathBuf::from("backend/occupancy.toml"),
            PathBuf::from("../occupancy.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path).map(Some);
            }
        }

        Ok(None)
    }

    /// Default-location file (or built-in defaults) with environment overrides.
    pub fn load() -> OccupancyResult<Self> {
        Self::from_default_location()?
            .unwrap_or_default()
            .with_env_overrides()
    }

    /// Apply `HOST`, `PORT` and `OCCUPANCY_DATA_PATH` from the process environment.
    pub fn with_env_overrides(self) -> OccupancyResult<Self> {
        self.apply_overrides(|key| env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn apply_overrides<F>(mut self, lookup: F) -> OccupancyResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = port.parse().map_err(|_| {
                OccupancyError::Configuration(format!(
                    "PORT must be a valid port number, got '{}'",
                    port
                ))
            })?;
        }
        if let Some(path) = lookup("OCCUPANCY_DATA_PATH") {
            self.data.path = PathBuf::from(path);
        }
        Ok(self)
    }

    /// Socket address the server binds to.
    pub fn bind_addr(&self) -> OccupancyResult<SocketAddr> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| OccupancyError::Configuration(format!("Invalid bind address: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[server]
host = "127.0.0.1"
port = 9000

[data]
path = "data/sales.csv"
"#;

        let config: AppConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.data.path, PathBuf::from("data/sales.csv"));
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config: AppConfig = toml::from_str("[server]\nport = 9100\n").unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.data.path, PathBuf::from("./seasonal_ph_sales.csv"));
    }

    #[test]
    fn test_env_overrides() {
        let config = AppConfig::default()
            .apply_overrides(lookup_from(&[
                ("PORT", "3000"),
                ("OCCUPANCY_DATA_PATH", "/srv/sales.csv"),
            ]))
            .unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.data.path, PathBuf::from("/srv/sales.csv"));
    }

    #[test]
    fn test_invalid_port_override() {
        let result = AppConfig::default().apply_overrides(lookup_from(&[("PORT", "http")]));
        assert!(matches!(result, Err(OccupancyError::Configuration(_))));
    }

    #[test]
    fn test_bind_addr() {
        let addr = AppConfig::default().bind_addr().unwrap();
        assert_eq!(addr.port(), 8080);
    }

    #[test]
    fn test_from_file_missing() {
        assert!(AppConfig::from_file("/nonexistent/occupancy.toml").is_err());
    }
}
