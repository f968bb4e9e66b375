use axum::{
    body::Bytes,
    extract::multipart::{Field, MultipartError},
};
use futures_util::StreamExt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("stream interrupted: {0}")]
    Stream(#[from] MultipartError),
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

/// Writes one upload to disk chunk by chunk.
pub struct DiskUploader {
    path: PathBuf,
    writer: BufWriter<File>,
    written: u64,
}

impl DiskUploader {
    pub async fn new(path: &Path) -> Result<Self, UploadError> {
        let file = File::create(path).await?;

        Ok(Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
            written: 0,
        })
    }

    pub async fn write_chunk(&mut self, chunk: Bytes) -> Result<(), UploadError> {
        self.writer.write_all(&chunk).await?;
        self.written += chunk.len() as u64;
        Ok(())
    }

    pub async fn finish(&mut self) -> Result<u64, UploadError> {
        self.writer.flush().await?;
        self.writer.get_mut().sync_all().await?;
        Ok(self.written)
    }

    /// Drops whatever was written so far.
    pub async fn abort(self) {
        drop(self.writer);
        if let Err(e) = tokio::fs::remove_file(&self.path).await {
            error!("Failed to remove partial upload {}: {}", self.path.display(), e);
        }
    }
}

/// Persists the raw bytes of a multipart field verbatim at `path`.
pub async fn stream_to_file(mut field: Field<'_>, path: &Path) -> Result<u64, UploadError> {
    let mut uploader = DiskUploader::new(path).await?;

    while let Some(chunk) = field.next().await {
        let chunk = match chunk {
            Ok(c) => c,
            Err(e) => {
                error!("Stream error: {}", e);
                uploader.abort().await;
                return Err(e.into());
            }
        };

        if let Err(e) = uploader.write_chunk(chunk).await {
            error!("Write error: {}", e);
            uploader.abort().await;
            return Err(e);
        }
    }

    match uploader.finish().await {
        Ok(written) => {
            info!("Saved {} bytes to {}", written, path.display());
            Ok(written)
        }
        Err(e) => {
            error!("Flush error: {}", e);
            uploader.abort().await;
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn finish_reports_bytes_written() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("raw.bin");

        let mut uploader = DiskUploader::new(&path).await.unwrap();
        uploader.write_chunk(Bytes::from_static(b"floor")).await.unwrap();
        uploader.write_chunk(Bytes::from_static(b"plan")).await.unwrap();

        assert_eq!(uploader.finish().await.unwrap(), 9);
        assert_eq!(std::fs::read(&path).unwrap(), b"floorplan");
    }

    #[tokio::test]
    async fn abort_removes_partial_upload() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("raw.bin");

        let mut uploader = DiskUploader::new(&path).await.unwrap();
        uploader.write_chunk(Bytes::from_static(b"partial")).await.unwrap();
        assert!(path.exists());

        uploader.abort().await;
        assert!(!path.exists());
    }
}
