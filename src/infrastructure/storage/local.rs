use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

/// Pre-existing placeholder video linked from every job.
pub const SAMPLE_VIDEO: &str = "sample.mp4";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to prepare directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to list directory {path}: {source}")]
    List {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Two local directories: raw uploads (never served) and public files
/// (served under `/files/`).
#[derive(Clone, Debug)]
pub struct LocalStorage {
    upload_dir: PathBuf,
    files_dir: PathBuf,
}

impl LocalStorage {
    pub async fn new(upload_dir: &Path, files_dir: &Path) -> Result<Self, StorageError> {
        for dir in [upload_dir, files_dir] {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|source| StorageError::CreateDir {
                    path: dir.to_path_buf(),
                    source,
                })?;
        }

        info!(
            "✅ Storage ready (uploads: {}, files: {})",
            upload_dir.display(),
            files_dir.display()
        );

        Ok(Self {
            upload_dir: upload_dir.to_path_buf(),
            files_dir: files_dir.to_path_buf(),
        })
    }

    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    pub fn files_dir(&self) -> &Path {
        &self.files_dir
    }

    pub fn upload_path(&self, job_id: &str, original_name: &str) -> PathBuf {
        self.upload_dir
            .join(format!("{}_{}", job_id, sanitize_filename(original_name)))
    }

    pub fn preview_name(job_id: &str) -> String {
        format!("{}_preview.png", job_id)
    }

    pub fn served_path(&self, name: &str) -> PathBuf {
        self.files_dir.join(name)
    }

    pub async fn has_sample_video(&self) -> bool {
        tokio::fs::try_exists(self.served_path(SAMPLE_VIDEO))
            .await
            .unwrap_or(false)
    }

    pub async fn files_dir_exists(&self) -> bool {
        tokio::fs::try_exists(&self.files_dir).await.unwrap_or(false)
    }

    /// Names of everything in the served directory, sorted.
    pub async fn list_served(&self) -> Result<Vec<String>, StorageError> {
        let to_err = |source| StorageError::List {
            path: self.files_dir.clone(),
            source,
        };

        let mut entries = tokio::fs::read_dir(&self.files_dir).await.map_err(to_err)?;
        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(to_err)? {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        names.sort();

        Ok(names)
    }
}

/// Reduces a client supplied filename to a single safe path component.
pub fn sanitize_filename(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or("");

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned.to_string()
    }
}
