//! Configuration module
//!
//! This module provides the configuration for the HTTP server and for each optional
//! backend. Every backend setting is optional: an unset variable means the
//! corresponding pipeline stage is simply not configured.

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

// Common constants
const SERVER_PORT: u16 = 8080;
const MAX_UPLOAD_SIZE_MB: usize = 25;
const BYTES_PER_MB: usize = 1024 * 1024;
const UPLOAD_DIR: &str = "/tmp/docrec_uploads";
const STATIC_DIR: &str = "static";
const GOOGLE_VISION_ENDPOINT: &str = "https://vision.googleapis.com";
const GOOGLE_VISION_TIMEOUT_SECS: u64 = 60;
const DB_MAX_CONNECTIONS: u32 = 5;
const DB_TIMEOUT_SECS: u64 = 10;

/// Remote object storage used for archival.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveProvider {
    Gcs,
    S3,
}

impl ArchiveProvider {
    /// URL scheme used in archive locators for this provider.
    pub fn scheme(&self) -> &'static str {
        match self {
            ArchiveProvider::Gcs => "gs",
            ArchiveProvider::S3 => "s3",
        }
    }
}

impl FromStr for ArchiveProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gcs" | "gs" | "google" => Ok(ArchiveProvider::Gcs),
            "s3" | "aws" => Ok(ArchiveProvider::S3),
            other => Err(anyhow::anyhow!(
                "ARCHIVE_PROVIDER must be 'gcs' or 's3', got '{}'",
                other
            )),
        }
    }
}

impl fmt::Display for ArchiveProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArchiveProvider::Gcs => write!(f, "gcs"),
            ArchiveProvider::S3 => write!(f, "s3"),
        }
    }
}

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// HTTP server configuration
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    pub max_upload_size_bytes: usize,
    pub static_dir: PathBuf,
    pub log_format: LogFormat,
}

/// Settings for the staging directory and the optional backends
#[derive(Clone, Debug)]
pub struct BackendConfig {
    pub upload_dir: PathBuf,
    // Text extraction (Google Cloud Vision)
    pub google_vision_api_key: Option<String>,
    pub google_vision_endpoint: String,
    pub google_vision_timeout_secs: u64,
    // Archive (object storage)
    pub archive_provider: ArchiveProvider,
    pub archive_bucket: Option<String>,
    pub s3_region: Option<String>,
    pub s3_endpoint: Option<String>, // Custom endpoint for S3-compatible providers (MinIO, etc.)
    // Metadata (PostgreSQL)
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub base: BaseConfig,
    pub backends: BackendConfig,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_or<T: FromStr>(value: Option<String>, default: T) -> T {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}

impl Config {
    /// Load configuration from the process environment (and a `.env` file, if present).
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| non_empty(lookup(key));

        let environment = get("ENVIRONMENT")
            .or_else(|| get("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let cors_origins: Vec<String> = get("CORS_ORIGINS")
            .unwrap_or_else(|| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let server_port = match get("PORT") {
            Some(port) => port
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            None => SERVER_PORT,
        };

        let log_format = match get("LOG_FORMAT").map(|f| f.to_lowercase()).as_deref() {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        let base = BaseConfig {
            server_port,
            cors_origins,
            environment,
            max_upload_size_bytes: parse_or(get("MAX_UPLOAD_SIZE_MB"), MAX_UPLOAD_SIZE_MB)
                .checked_mul(BYTES_PER_MB)
                .unwrap_or(MAX_UPLOAD_SIZE_MB * BYTES_PER_MB),
            static_dir: PathBuf::from(get("STATIC_DIR").unwrap_or_else(|| STATIC_DIR.to_string())),
            log_format,
        };

        let archive_provider = match get("ARCHIVE_PROVIDER") {
            Some(provider) => provider.parse()?,
            None => ArchiveProvider::Gcs,
        };

        let backends = BackendConfig {
            upload_dir: PathBuf::from(get("UPLOAD_DIR").unwrap_or_else(|| UPLOAD_DIR.to_string())),
            google_vision_api_key: get("GOOGLE_VISION_API_KEY"),
            google_vision_endpoint: get("GOOGLE_VISION_ENDPOINT")
                .unwrap_or_else(|| GOOGLE_VISION_ENDPOINT.to_string()),
            google_vision_timeout_secs: parse_or(
                get("GOOGLE_VISION_TIMEOUT_SECS"),
                GOOGLE_VISION_TIMEOUT_SECS,
            ),
            archive_provider,
            archive_bucket: get("ARCHIVE_BUCKET").or_else(|| get("GCS_BUCKET")),
            s3_region: get("S3_REGION").or_else(|| get("AWS_REGION")),
            s3_endpoint: get("S3_ENDPOINT"),
            database_url: get("DATABASE_URL"),
            db_max_connections: parse_or(get("DB_MAX_CONNECTIONS"), DB_MAX_CONNECTIONS),
            db_timeout_seconds: parse_or(get("DB_TIMEOUT_SECONDS"), DB_TIMEOUT_SECS),
        };

        Ok(Config { base, backends })
    }

    /// Fail fast on settings that can never work.
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.is_production() && self.base.cors_origins.iter().any(|o| o == "*") {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        if self.base.max_upload_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_UPLOAD_SIZE_MB must be greater than 0"));
        }

        if let Some(url) = &self.backends.database_url {
            if !url.starts_with("postgres://") && !url.starts_with("postgresql://") {
                return Err(anyhow::anyhow!(
                    "DATABASE_URL must be a valid PostgreSQL connection string"
                ));
            }
        }

        if self.backends.archive_bucket.is_some()
            && self.backends.archive_provider == ArchiveProvider::S3
            && self.backends.s3_region.is_none()
        {
            return Err(anyhow::anyhow!(
                "ARCHIVE_PROVIDER=s3 requires S3_REGION or AWS_REGION to be set"
            ));
        }

        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.base.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn server_port(&self) -> u16 {
        self.base.server_port
    }

    pub fn environment(&self) -> &str {
        &self.base.environment
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.base.cors_origins
    }

    pub fn upload_dir(&self) -> &PathBuf {
        &self.backends.upload_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, anyhow::Error> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_leave_backends_unconfigured() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.server_port(), 8080);
        assert_eq!(config.upload_dir(), &PathBuf::from("/tmp/docrec_uploads"));
        assert_eq!(config.base.max_upload_size_bytes, 25 * 1024 * 1024);
        assert!(config.backends.google_vision_api_key.is_none());
        assert!(config.backends.archive_bucket.is_none());
        assert!(config.backends.database_url.is_none());
        assert_eq!(config.backends.archive_provider, ArchiveProvider::Gcs);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_blank_values_count_as_unset() {
        let config = config_from(&[("GCS_BUCKET", "  "), ("GOOGLE_VISION_API_KEY", "")]).unwrap();
        assert!(config.backends.archive_bucket.is_none());
        assert!(config.backends.google_vision_api_key.is_none());
    }

    #[test]
    fn test_gcs_bucket_is_archive_bucket_fallback() {
        let config = config_from(&[("GCS_BUCKET", "captures-prod")]).unwrap();
        assert_eq!(
            config.backends.archive_bucket.as_deref(),
            Some("captures-prod")
        );
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        assert!(config_from(&[("PORT", "not-a-port")]).is_err());
    }

    #[test]
    fn test_invalid_numbers_fall_back_to_defaults() {
        let config = config_from(&[("MAX_UPLOAD_SIZE_MB", "lots"), ("DB_MAX_CONNECTIONS", "-1")])
            .unwrap();
        assert_eq!(config.base.max_upload_size_bytes, 25 * 1024 * 1024);
        assert_eq!(config.backends.db_max_connections, 5);
    }

    #[test]
    fn test_oversized_upload_limit_falls_back_to_default() {
        let huge = usize::MAX.to_string();
        let config = config_from(&[("MAX_UPLOAD_SIZE_MB", huge.as_str())]).unwrap();
        assert_eq!(config.base.max_upload_size_bytes, 25 * 1024 * 1024);

        let config = config_from(&[("MAX_UPLOAD_SIZE_MB", "100")]).unwrap();
        assert_eq!(config.base.max_upload_size_bytes, 100 * 1024 * 1024);
    }

    #[test]
    fn test_wildcard_cors_rejected_in_production() {
        let config = config_from(&[("ENVIRONMENT", "production")]).unwrap();
        assert!(config.validate().is_err());

        let config = config_from(&[
            ("ENVIRONMENT", "production"),
            ("CORS_ORIGINS", "https://docrec.example.com"),
        ])
        .unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_s3_archive_requires_region() {
        let config = config_from(&[("ARCHIVE_PROVIDER", "s3"), ("ARCHIVE_BUCKET", "b")]).unwrap();
        assert!(config.validate().is_err());

        let config = config_from(&[
            ("ARCHIVE_PROVIDER", "s3"),
            ("ARCHIVE_BUCKET", "b"),
            ("AWS_REGION", "eu-west-1"),
        ])
        .unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.backends.archive_provider.scheme(), "s3");
    }

    #[test]
    fn test_unknown_archive_provider_is_rejected() {
        assert!(config_from(&[("ARCHIVE_PROVIDER", "azure")]).is_err());
    }

    #[test]
    fn test_database_url_must_be_postgres() {
        let config = config_from(&[("DATABASE_URL", "mysql://localhost/db")]).unwrap();
        assert!(config.validate().is_err());
    }
}
