//! API server configuration.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Default request body limit for uploads (10 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// HTTP listen port
    pub http_port: u16,

    /// Interface to bind
    pub bind_addr: String,

    /// SQLite database file
    pub db_path: PathBuf,

    /// Directory uploaded images are written to
    pub upload_dir: PathBuf,

    /// URL prefix uploaded images are served under, e.g. `/uploads`
    pub public_upload_prefix: String,

    /// Max request body size in bytes
    pub max_upload_bytes: usize,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    ///
    /// `MTC_HTTP_PORT` wins over `PORT`, which hosting platforms set.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let config = ApiConfig {
            http_port: lookup("MTC_HTTP_PORT")
                .or_else(|| lookup("PORT"))
                .unwrap_or_else(|| "8080".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("MTC_HTTP_PORT".to_string()))?,

            bind_addr: lookup("MTC_BIND_ADDR").unwrap_or_else(|| "0.0.0.0".to_string()),

            db_path: lookup("MTC_DB_PATH")
                .unwrap_or_else(|| "./data/mtc.db".to_string())
                .into(),

            upload_dir: lookup("MTC_UPLOAD_DIR")
                .unwrap_or_else(|| "./data/uploads".to_string())
                .into(),

            public_upload_prefix: lookup("MTC_PUBLIC_UPLOAD_PREFIX")
                .unwrap_or_else(|| "/uploads".to_string())
                .trim_end_matches('/')
                .to_string(),

            max_upload_bytes: match lookup("MTC_MAX_UPLOAD_BYTES") {
                Some(raw) => raw
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue("MTC_MAX_UPLOAD_BYTES".to_string()))?,
                None => DEFAULT_MAX_UPLOAD_BYTES,
            },
        };

        // Mounted with nest_service, which rejects "" and "/".
        if !config.public_upload_prefix.starts_with('/') || config.public_upload_prefix.len() < 2 {
            return Err(ConfigError::InvalidValue(
                "MTC_PUBLIC_UPLOAD_PREFIX".to_string(),
            ));
        }

        if config.max_upload_bytes == 0 {
            return Err(ConfigError::InvalidValue("MTC_MAX_UPLOAD_BYTES".to_string()));
        }

        Ok(config)
    }

    /// Socket address to listen on.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.bind_addr, self.http_port)
            .parse()
            .map_err(|_| ConfigError::InvalidValue("MTC_BIND_ADDR".to_string()))
    }

    /// Config for tests: everything local, uploads under `upload_dir`.
    pub fn for_tests(upload_dir: impl Into<PathBuf>) -> Self {
        ApiConfig {
            http_port: 0,
            bind_addr: "127.0.0.1".to_string(),
            db_path: PathBuf::from(":memory:"),
            upload_dir: upload_dir.into(),
            public_upload_prefix: "/uploads".to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<ApiConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ApiConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.http_port, 8080);
        assert_eq!(config.bind_addr, "0.0.0.0");
        assert_eq!(config.db_path, PathBuf::from("./data/mtc.db"));
        assert_eq!(config.public_upload_prefix, "/uploads");
        assert_eq!(config.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
        assert_eq!(config.socket_addr().unwrap().port(), 8080);
    }

    #[test]
    fn test_port_precedence() {
        assert_eq!(load(&[("PORT", "9000")]).unwrap().http_port, 9000);
        assert_eq!(
            load(&[("PORT", "9000"), ("MTC_HTTP_PORT", "7000")])
                .unwrap()
                .http_port,
            7000
        );
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            load(&[("MTC_HTTP_PORT", "eighty")]),
            Err(ConfigError::InvalidValue(key)) if key == "MTC_HTTP_PORT"
        ));
        assert!(load(&[("MTC_MAX_UPLOAD_BYTES", "-1")]).is_err());
        assert!(load(&[("MTC_MAX_UPLOAD_BYTES", "0")]).is_err());
        assert!(load(&[("MTC_PUBLIC_UPLOAD_PREFIX", "/")]).is_err());
        assert!(load(&[("MTC_PUBLIC_UPLOAD_PREFIX", "uploads")]).is_err());
    }

    #[test]
    fn test_upload_prefix_trailing_slash() {
        let config = load(&[("MTC_PUBLIC_UPLOAD_PREFIX", "/media/")]).unwrap();
        assert_eq!(config.public_upload_prefix, "/media");
    }

    #[test]
    fn test_bad_bind_addr() {
        let config = load(&[("MTC_BIND_ADDR", "not an ip")]).unwrap();
        assert!(config.socket_addr().is_err());
    }
}
