// upload-service/src/config.rs

use std::env;
use thiserror::Error;

/// Region used when `REGION` is not set
pub const DEFAULT_REGION: &str = "us-east-1";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;

/// Required variables, in the order they are reported when missing
const REQUIRED_VARS: [&str; 3] = ["ACCESS_KEY_ID", "SECRET_ACCESS_KEY", "BUCKET_NAME"];

/// Application configuration, built once at startup and never mutated
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Clone)]
pub struct StorageConfig {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub bucket_name: String,
    pub region: String,
}

// Keep the secret out of startup logs.
impl std::fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageConfig")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"***")
            .field("bucket_name", &self.bucket_name)
            .field("region", &self.region)
            .finish()
    }
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// The binary loads `.env` through `dotenvy` before calling this.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolve configuration through an arbitrary variable lookup.
    ///
    /// Empty values count as absent. Every missing required variable is
    /// collected before failing, so a single error names all of them.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let missing: Vec<String> = REQUIRED_VARS
            .iter()
            .filter(|key| get(**key).is_none())
            .map(|key| key.to_string())
            .collect();

        if !missing.is_empty() {
            return Err(ConfigError::MissingVariables(missing));
        }

        // Presence was checked above.
        let required = |key: &str| get(key).unwrap_or_default();

        let port = match get("SERVER_PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        Ok(Config {
            server: ServerConfig {
                host: get("SERVER_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
                port,
            },
            storage: StorageConfig {
                access_key_id: required("ACCESS_KEY_ID"),
                secret_access_key: required("SECRET_ACCESS_KEY"),
                bucket_name: required("BUCKET_NAME"),
                region: get("REGION").unwrap_or_else(|| DEFAULT_REGION.to_string()),
            },
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variables: {}", .0.join(", "))]
    MissingVariables(Vec<String>),

    #[error("Invalid server port: {0}")]
    InvalidPort(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_full_configuration() {
        let config = Config::from_lookup(lookup_from(&[
            ("ACCESS_KEY_ID", "AKIA123"),
            ("SECRET_ACCESS_KEY", "secret"),
            ("BUCKET_NAME", "mybucket"),
            ("REGION", "eu-west-1"),
            ("SERVER_PORT", "8080"),
        ]))
        .unwrap();

        assert_eq!(config.storage.bucket_name, "mybucket");
        assert_eq!(config.storage.region, "eu-west-1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_region_and_server_defaults() {
        let config = Config::from_lookup(lookup_from(&[
            ("ACCESS_KEY_ID", "AKIA123"),
            ("SECRET_ACCESS_KEY", "secret"),
            ("BUCKET_NAME", "mybucket"),
        ]))
        .unwrap();

        assert_eq!(config.storage.region, DEFAULT_REGION);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5000);
    }

    #[test]
    fn test_all_missing_variables_reported_at_once() {
        let err = Config::from_lookup(lookup_from(&[("SECRET_ACCESS_KEY", "secret")]))
            .unwrap_err();

        assert_eq!(
            err,
            ConfigError::MissingVariables(vec![
                "ACCESS_KEY_ID".to_string(),
                "BUCKET_NAME".to_string(),
            ])
        );
        assert_eq!(
            err.to_string(),
            "Missing required environment variables: ACCESS_KEY_ID, BUCKET_NAME"
        );
    }

    #[test]
    fn test_empty_value_counts_as_missing() {
        let err = Config::from_lookup(lookup_from(&[
            ("ACCESS_KEY_ID", "AKIA123"),
            ("SECRET_ACCESS_KEY", "secret"),
            ("BUCKET_NAME", ""),
        ]))
        .unwrap_err();

        assert_eq!(err, ConfigError::MissingVariables(vec!["BUCKET_NAME".to_string()]));
    }

    #[test]
    fn test_invalid_port() {
        let err = Config::from_lookup(lookup_from(&[
            ("ACCESS_KEY_ID", "AKIA123"),
            ("SECRET_ACCESS_KEY", "secret"),
            ("BUCKET_NAME", "mybucket"),
            ("SERVER_PORT", "http"),
        ]))
        .unwrap_err();

        assert_eq!(err, ConfigError::InvalidPort("http".to_string()));
    }

    #[test]
    fn test_debug_hides_secret() {
        let storage = StorageConfig {
            access_key_id: "AKIA123".to_string(),
            secret_access_key: "hunter2".to_string(),
            bucket_name: "mybucket".to_string(),
            region: DEFAULT_REGION.to_string(),
        };

        assert!(!format!("{:?}", storage).contains("hunter2"));
    }
}
