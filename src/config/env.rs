use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use tracing::warn;

pub enum EnvKey {
    ServerHost,
    ServerPort,
    PublicBaseUrl,
    UploadDir,
    FilesDir,
    MaxUploadBytes,
}

impl EnvKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnvKey::ServerHost => "APP_HOST",
            EnvKey::ServerPort => "APP_PORT",
            EnvKey::PublicBaseUrl => "PUBLIC_BASE_URL",
            EnvKey::UploadDir => "UPLOAD_DIR",
            EnvKey::FilesDir => "FILES_DIR",
            EnvKey::MaxUploadBytes => "MAX_UPLOAD_BYTES",
        }
    }
}

/// Set and non-blank value of `key`.
pub fn get(key: &EnvKey) -> Option<String> {
    env::var(key.as_str())
        .ok()
        .filter(|val| !val.trim().is_empty())
}

pub fn get_or(key: EnvKey, default: &str) -> String {
    get(&key).unwrap_or_else(|| default.to_string())
}

pub fn get_path(key: EnvKey, default: &str) -> PathBuf {
    PathBuf::from(get_or(key, default))
}

/// Parsed value of `key`; unparsable values are reported and replaced by `default`.
pub fn get_parsed<T: FromStr>(key: EnvKey, default: T) -> T {
    let Some(val) = get(&key) else {
        return default;
    };

    match val.trim().parse::<T>() {
        Ok(parsed) => parsed,
        Err(_) => {
            warn!("Ignoring invalid {}={:?}, using default", key.as_str(), val);
            default
        }
    }
}
