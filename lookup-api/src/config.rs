use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ApiConfig {
    pub cors: Option<CorsConfig>,
    pub server: Option<ServerConfig>,
    pub database: Option<DatabaseConfig>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            cors: Some(CorsConfig {
                allowed_origins: vec!["http://localhost:3000".to_string()],
            }),
            server: Some(ServerConfig::default()),
            database: None,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    pub path: PathBuf,
}

impl ApiConfig {
    pub fn load() -> Result<(Self, PathBuf), ConfigError> {
        let config_path = get_config_path();
        Ok((Self::load_from(&config_path)?, config_path))
    }

    /// Read `config_path`, writing the default config there first if missing
    pub fn load_from(config_path: &std::path::Path) -> Result<Self, ConfigError> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ConfigError::Message(format!("Failed to create config directory: {e}"))
            })?;
        }

        if !config_path.exists() {
            let default_config = toml::to_string_pretty(&ApiConfig::default()).map_err(|e| {
                ConfigError::Message(format!("Failed to serialize default config: {e}"))
            })?;
            std::fs::write(config_path, default_config).map_err(|e| {
                ConfigError::Message(format!("Failed to write default config: {e}"))
            })?;
        }

        Config::builder()
            .add_source(File::from(config_path.to_path_buf()))
            .build()?
            .try_deserialize()
    }

    pub fn server(&self) -> ServerConfig {
        self.server.clone().unwrap_or_default()
    }
}

pub fn get_config_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("contact-lookup").join("api.toml")
    } else {
        PathBuf::from("api.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_written_and_read_back() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("api.toml");

        let config = ApiConfig::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.server().port, 8080);
        assert!(config.database.is_none());
        assert_eq!(
            config.cors.unwrap().allowed_origins,
            vec!["http://localhost:3000"]
        );
    }

    #[test]
    fn test_reads_database_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("api.toml");
        std::fs::write(
            &path,
            "[server]\nhost = \"0.0.0.0\"\nport = 9000\n\n[database]\npath = \"/tmp/contacts.db\"\n",
        )
        .unwrap();

        let config = ApiConfig::load_from(&path).unwrap();
        assert_eq!(config.server().host, "0.0.0.0");
        assert_eq!(
            config.database.unwrap().path,
            PathBuf::from("/tmp/contacts.db")
        );
        assert!(config.cors.is_none());
    }
}
