use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::config::env::{self, EnvKey};

pub const DEFAULT_PUBLIC_BASE_URL: &str = "http://localhost:8000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("PUBLIC_BASE_URL '{value}' is not a valid URL: {source}")]
    InvalidBaseUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("PUBLIC_BASE_URL '{0}' must use http or https")]
    UnsupportedScheme(String),
}

#[derive(Clone, Debug, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Prefix for every link handed out to clients, stored without a trailing slash.
    pub public_base_url: String,
    pub upload_dir: PathBuf,
    pub files_dir: PathBuf,
    pub max_upload_bytes: usize,
}

impl AppConfig {
    pub fn new() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env::get_or(EnvKey::ServerHost, "0.0.0.0"),
            port: env::get_parsed(EnvKey::ServerPort, 8000),
            public_base_url: normalize_base_url(&env::get_or(
                EnvKey::PublicBaseUrl,
                DEFAULT_PUBLIC_BASE_URL,
            ))?,
            upload_dir: env::get_path(EnvKey::UploadDir, "uploads"),
            files_dir: env::get_path(EnvKey::FilesDir, "files"),
            max_upload_bytes: env::get_parsed(EnvKey::MaxUploadBytes, 25 * 1024 * 1024),
        })
    }

    /// Absolute URL under which a file in the served directory is reachable.
    pub fn public_file_url(&self, name: &str) -> String {
        format!("{}/files/{}", self.public_base_url, name)
    }
}

pub fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');

    let parsed = Url::parse(trimmed).map_err(|source| ConfigError::InvalidBaseUrl {
        value: raw.to_string(),
        source,
    })?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::UnsupportedScheme(raw.to_string()));
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_base(base: &str) -> AppConfig {
        AppConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            public_base_url: normalize_base_url(base).unwrap(),
            upload_dir: PathBuf::from("uploads"),
            files_dir: PathBuf::from("files"),
            max_upload_bytes: 1024,
        }
    }

    #[test]
    fn trailing_slash_is_dropped() {
        assert_eq!(
            normalize_base_url("https://demo.example.com/").unwrap(),
            "https://demo.example.com"
        );
    }

    #[test]
    fn path_prefix_is_kept() {
        let config = config_with_base("https://demo.example.com/plan2scene/");
        assert_eq!(
            config.public_file_url("sample.mp4"),
            "https://demo.example.com/plan2scene/files/sample.mp4"
        );
    }

    #[test]
    fn default_base_builds_local_links() {
        let config = config_with_base(DEFAULT_PUBLIC_BASE_URL);
        assert_eq!(
            config.public_file_url("abc_preview.png"),
            "http://localhost:8000/files/abc_preview.png"
        );
    }

    #[test]
    fn garbage_base_url_is_rejected() {
        assert!(matches!(
            normalize_base_url("not a url"),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
        assert!(matches!(
            normalize_base_url("ftp://files.example.com"),
            Err(ConfigError::UnsupportedScheme(_))
        ));
    }
}
