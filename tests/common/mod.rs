#![allow(dead_code)]

use std::io::Cursor;
use std::path::PathBuf;

use axum::Router;
use axum::body::Body;
use axum::http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::{Method, Request, Response};
use http_body_util::BodyExt;
use image::{GrayImage, ImageFormat, Luma};
use tempfile::TempDir;
use tower::ServiceExt;

use plan2scene_backend::app::create_app;
use plan2scene_backend::config::settings::AppConfig;
use plan2scene_backend::infrastructure::memory::job_store::JobStore;
use plan2scene_backend::infrastructure::storage::local::LocalStorage;
use plan2scene_backend::state::AppState;

pub const BASE_URL: &str = "http://demo.test:8000";
const BOUNDARY: &str = "plan2scene-test-boundary";

/// A router over fresh temporary directories. Keep the `TempDir` alive for
/// the duration of the test.
pub struct TestApp {
    pub router: Router,
    pub dir: TempDir,
}

impl TestApp {
    pub fn upload_dir(&self) -> PathBuf {
        self.dir.path().join("uploads")
    }

    pub fn files_dir(&self) -> PathBuf {
        self.dir.path().join("files")
    }
}

pub async fn build_test_app() -> TestApp {
    build_test_app_with_limit(10 * 1024 * 1024).await
}

pub async fn build_test_app_with_limit(max_upload_bytes: usize) -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        public_base_url: BASE_URL.to_string(),
        upload_dir: dir.path().join("uploads"),
        files_dir: dir.path().join("files"),
        max_upload_bytes,
    };

    let storage = LocalStorage::new(&config.upload_dir, &config.files_dir)
        .await
        .unwrap();
    let state = AppState::new(config, storage, JobStore::new());

    TestApp {
        router: create_app(state),
        dir,
    }
}

pub async fn get(app: &TestApp, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.router.clone().oneshot(request).await.unwrap()
}

pub fn multipart_body(field: &str, filename: &str, bytes: &[u8]) -> Vec<u8> {
    let mut body = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
    )
    .into_bytes();
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub async fn post_multipart(app: &TestApp, field: &str, filename: &str, bytes: &[u8]) -> Response<Body> {
    let body = multipart_body(field, filename, bytes);
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/generate")
        .header(CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}"))
        .header(CONTENT_LENGTH, body.len())
        .body(Body::from(body))
        .unwrap();
    app.router.clone().oneshot(request).await.unwrap()
}

pub async fn upload(app: &TestApp, filename: &str, bytes: &[u8]) -> Response<Body> {
    post_multipart(app, "file", filename, bytes).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// Grayscale PNG with a horizontal ramp so autocontrast has work to do.
pub fn gray_png(width: u32, height: u32) -> Vec<u8> {
    let img = GrayImage::from_fn(width, height, |x, y| Luma([(32 + (x + y) % 160) as u8]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png).unwrap();
    out.into_inner()
}
