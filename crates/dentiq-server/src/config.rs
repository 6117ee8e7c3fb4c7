use dentiq_core::StaffRole;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Seed data applied at startup (staff directory, treatment catalog)
    #[serde(default)]
    pub bootstrap: BootstrapConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), String> {
        // Server validations
        if self.server.port == 0 {
            return Err("server.port must be > 0".into());
        }
        if self.server.body_limit_bytes == 0 {
            return Err("server.body_limit_bytes must be > 0".into());
        }
        // Logging validation
        let lvl = self.logging.level.to_ascii_lowercase();
        let valid_levels = ["trace", "debug", "info", "warn", "error", "off"];
        if !valid_levels.contains(&lvl.as_str()) {
            return Err(format!("logging.level must be one of {valid_levels:?}"));
        }
        // Storage validation - only the in-memory backend ships today
        if self.storage.backend != "memory" {
            return Err(format!(
                "storage.backend '{}' is not supported (expected 'memory')",
                self.storage.backend
            ));
        }
        Ok(())
    }

    pub fn addr(&self) -> SocketAddr {
        use std::net::{IpAddr, Ipv4Addr};
        let host: IpAddr = self
            .server
            .host
            .parse()
            .unwrap_or(IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)));
        SocketAddr::from((host, self.server.port))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            body_limit_bytes: default_body_limit(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8090
}

fn default_body_limit() -> usize {
    1024 * 1024
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_backend")]
    pub backend: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
        }
    }
}

fn default_backend() -> String {
    "memory".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Startup seed data. The in-memory backend starts empty; clinics load their
/// staff directory and treatment catalog from here.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BootstrapConfig {
    #[serde(default)]
    pub staff: Vec<StaffSeed>,
    #[serde(default)]
    pub treatments: Vec<TreatmentSeed>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffSeed {
    pub id: String,
    pub clinic_id: String,
    pub role: StaffRole,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreatmentSeed {
    pub id: String,
    pub clinic_id: String,
    pub name: String,
    pub price: i64,
}

pub mod loader {
    use super::AppConfig;
    use config::{Config, Environment, File};
    use std::path::PathBuf;

    pub fn load_config(path: Option<&str>) -> Result<AppConfig, String> {
        let mut builder = Config::builder();
        match path {
            Some(p) => {
                let pathbuf = PathBuf::from(p);
                if pathbuf.exists() {
                    builder = builder.add_source(File::from(pathbuf));
                }
            }
            None => {
                // Try default root-level file
                let default_path = PathBuf::from("dentiq.toml");
                if default_path.exists() {
                    builder = builder.add_source(File::from(default_path));
                }
            }
        }
        // Environment variable overrides, e.g., DENTIQ__SERVER__PORT=9090
        builder = builder.add_source(
            Environment::with_prefix("DENTIQ")
                .try_parsing(true)
                .separator("__"),
        );
        let cfg = builder
            .build()
            .map_err(|e| format!("config build error: {e}"))?;
        let merged: AppConfig = cfg
            .try_deserialize()
            .map_err(|e| format!("config deserialize error: {e}"))?;
        // Validate
        merged.validate()?;
        Ok(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let cfg = AppConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.server.port, 8090);
        assert_eq!(cfg.storage.backend, "memory");
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn test_validate_rejects_bad_port() {
        let mut cfg = AppConfig::default();
        cfg.server.port = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_unknown_backend() {
        let mut cfg = AppConfig::default();
        cfg.storage.backend = "postgres".into();
        let err = cfg.validate().unwrap_err();
        assert!(err.contains("postgres"));
    }

    #[test]
    fn test_validate_rejects_unknown_log_level() {
        let mut cfg = AppConfig::default();
        cfg.logging.level = "verbose".into();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_addr_falls_back_to_wildcard_on_bad_host() {
        let mut cfg = AppConfig::default();
        cfg.server.host = "not-an-ip".into();
        assert_eq!(cfg.addr().to_string(), "0.0.0.0:8090");
    }

    #[test]
    fn test_bootstrap_deserializes_from_toml() {
        let toml = r#"
            [server]
            port = 9000

            [[bootstrap.staff]]
            id = "u1"
            clinic_id = "clinic-1"
            role = "receptionist"

            [[bootstrap.treatments]]
            id = "t1"
            clinic_id = "clinic-1"
            name = "Basic Cleaning"
            price = 75
        "#;
        let cfg: AppConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.bootstrap.staff.len(), 1);
        assert_eq!(cfg.bootstrap.staff[0].role, StaffRole::Receptionist);
        assert_eq!(cfg.bootstrap.treatments[0].price, 75);
    }
}
