#![allow(dead_code)]

use std::collections::BTreeMap;
use std::io::{Cursor, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use playhub_api::auth::jwt::JwtConfig;
use playhub_api::auth::password::hash_password;
use playhub_api::config::ServerConfig;
use playhub_api::router::build_app_router;
use playhub_api::state::AppState;
use playhub_api::storage::{public_url, validate_blob_path, BlobStore, StorageError};
use playhub_core::roles::DEFAULT_ROLE_ID;
use playhub_db::models::user::{CreateUser, User};
use playhub_db::repositories::UserRepo;

pub const TEST_PASSWORD: &str = "secret1";
pub const ADMIN_ROLE_ID: i64 = 1;
const BOUNDARY: &str = "playhub-test-boundary";

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with safe defaults and small upload limits.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        storage_root: PathBuf::from("target/test-storage-unused"),
        public_asset_prefix: "/games".to_string(),
        max_archive_bytes: 64 * 1024,
        max_thumbnail_bytes: 16 * 1024,
        jwt: JwtConfig {
            secret: "test-jwt-secret".to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

/// Build the full application router backed by a fresh in-memory blob store.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_store(pool, Arc::new(MemoryBlobStore::default()))
}

/// Build the full application router around a caller-held blob store, so
/// tests can inspect writes and inject failures.
pub fn build_test_app_with_store(pool: PgPool, blobs: Arc<MemoryBlobStore>) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        blobs,
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// In-memory blob store
// ---------------------------------------------------------------------------

/// Write-once map of path to bytes. `fail_puts_ending_with` makes every
/// matching `put` return an I/O error.
#[derive(Default)]
pub struct MemoryBlobStore {
    blobs: Mutex<BTreeMap<String, Vec<u8>>>,
    fail_suffix: Mutex<Option<String>>,
}

impl MemoryBlobStore {
    pub fn fail_puts_ending_with(&self, suffix: &str) {
        *self.fail_suffix.lock().unwrap() = Some(suffix.to_string());
    }

    pub fn clear_failures(&self) {
        *self.fail_suffix.lock().unwrap() = None;
    }

    pub fn paths(&self) -> Vec<String> {
        self.blobs.lock().unwrap().keys().cloned().collect()
    }

    pub fn get(&self, path: &str) -> Option<Vec<u8>> {
        self.blobs.lock().unwrap().get(path).cloned()
    }

    /// Seed a blob without going through `put`, e.g. leftovers of a crashed upload.
    pub fn insert(&self, path: &str, data: &[u8]) {
        self.blobs.lock().unwrap().insert(path.to_string(), data.to_vec());
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn put(&self, path: &str, data: &[u8]) -> Result<(), StorageError> {
        validate_blob_path(path)?;
        if let Some(suffix) = self.fail_suffix.lock().unwrap().as_deref() {
            if path.ends_with(suffix) {
                return Err(StorageError::Io {
                    path: path.to_string(),
                    source: std::io::Error::other("injected failure"),
                });
            }
        }
        let mut blobs = self.blobs.lock().unwrap();
        if blobs.contains_key(path) {
            return Err(StorageError::AlreadyExists(path.to_string()));
        }
        blobs.insert(path.to_string(), data.to_vec());
        Ok(())
    }

    async fn exists(&self, path: &str) -> Result<bool, StorageError> {
        validate_blob_path(path)?;
        Ok(self.blobs.lock().unwrap().contains_key(path))
    }

    fn url(&self, path: &str) -> String {
        public_url("/games", path)
    }

    async fn delete_directory(&self, path: &str) -> Result<(), StorageError> {
        validate_blob_path(path)?;
        let prefix = format!("{path}/");
        self.blobs
            .lock()
            .unwrap()
            .retain(|key, _| key != path && !key.starts_with(&prefix));
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Create a user directly in the database with [`TEST_PASSWORD`].
pub async fn create_user(pool: &PgPool, username: &str, role_id: i64) -> User {
    let password_hash = hash_password(TEST_PASSWORD).expect("hashing should succeed");
    UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            password_hash,
            role_id,
        },
    )
    .await
    .expect("user creation should succeed")
}

pub async fn create_player(pool: &PgPool, username: &str) -> User {
    create_user(pool, username, DEFAULT_ROLE_ID).await
}

/// Sign in through the API and return the bearer token.
pub async fn signin(app: &Router, username: &str, password: &str) -> String {
    let body = serde_json::json!({ "username": username, "password": password });
    let response = post_json(app.clone(), "/api/v1/auth/signin", body).await;
    assert_eq!(response.status(), StatusCode::OK, "sign-in should succeed");
    let json = body_json(response).await;
    json["data"]["token"].as_str().unwrap().to_string()
}

/// Create a player and sign them in. Returns the user and their token.
pub async fn player_with_token(pool: &PgPool, app: &Router, username: &str) -> (User, String) {
    let user = create_player(pool, username).await;
    let token = signin(app, username, TEST_PASSWORD).await;
    (user, token)
}

/// Create a game through the API and return its slug.
pub async fn create_game(app: &Router, token: &str, title: &str) -> String {
    let body = serde_json::json!({ "title": title, "description": "A test game" });
    let response = post_json_auth(app.clone(), "/api/v1/games", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED, "game creation should succeed");
    body_json(response).await["slug"].as_str().unwrap().to_string()
}

/// A minimal valid game archive.
pub fn zip_fixture() -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Stored);
    writer.start_file("index.html", options).unwrap();
    writer.write_all(b"<html><body>game</body></html>").unwrap();
    writer.finish().unwrap().into_inner()
}

/// Bytes that sniff as PNG.
pub fn png_fixture() -> Vec<u8> {
    b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR\0\0\0\x01\0\0\0\x01\x08\x06\0\0\0".to_vec()
}

/// Upload `zip` (and optionally a thumbnail) to `slug` through the API.
pub async fn upload(
    app: &Router,
    token: &str,
    slug: &str,
    zip: &[u8],
    thumbnail: Option<&[u8]>,
) -> Response {
    let mut parts = vec![MultipartPart::file("zipfile", "game.zip", "application/zip", zip)];
    if let Some(data) = thumbnail {
        parts.push(MultipartPart::file("thumbnail", "thumb.png", "image/png", data));
    }
    post_multipart_auth(
        app.clone(),
        &format!("/api/v1/games/{slug}/upload"),
        &parts,
        token,
    )
    .await
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

fn builder(method: Method, uri: &str, token: Option<&str>) -> axum::http::request::Builder {
    let builder = Request::builder().method(method).uri(uri);
    match token {
        Some(token) => builder.header(AUTHORIZATION, format!("Bearer {token}")),
        None => builder,
    }
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, builder(Method::GET, uri, None).body(Body::empty()).unwrap()).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, builder(Method::GET, uri, Some(token)).body(Body::empty()).unwrap()).await
}

fn json_request(method: Method, uri: &str, body: serde_json::Value, token: Option<&str>) -> Request<Body> {
    builder(method, uri, token)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, json_request(Method::POST, uri, body, None)).await
}

pub async fn post_json_auth(app: Router, uri: &str, body: serde_json::Value, token: &str) -> Response {
    send(app, json_request(Method::POST, uri, body, Some(token))).await
}

pub async fn put_json_auth(app: Router, uri: &str, body: serde_json::Value, token: &str) -> Response {
    send(app, json_request(Method::PUT, uri, body, Some(token))).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, builder(Method::POST, uri, Some(token)).body(Body::empty()).unwrap()).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, builder(Method::DELETE, uri, Some(token)).body(Body::empty()).unwrap()).await
}

/// One part of a `multipart/form-data` body.
pub struct MultipartPart<'a> {
    pub name: &'a str,
    pub filename: Option<&'a str>,
    pub content_type: Option<&'a str>,
    pub data: &'a [u8],
}

impl<'a> MultipartPart<'a> {
    pub fn file(name: &'a str, filename: &'a str, content_type: &'a str, data: &'a [u8]) -> Self {
        Self {
            name,
            filename: Some(filename),
            content_type: Some(content_type),
            data,
        }
    }

    pub fn text(name: &'a str, value: &'a str) -> Self {
        Self {
            name,
            filename: None,
            content_type: None,
            data: value.as_bytes(),
        }
    }
}

pub fn multipart_body(parts: &[MultipartPart<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        let mut disposition = format!("Content-Disposition: form-data; name=\"{}\"", part.name);
        if let Some(filename) = part.filename {
            disposition.push_str(&format!("; filename=\"{filename}\""));
        }
        body.extend_from_slice(disposition.as_bytes());
        body.extend_from_slice(b"\r\n");
        if let Some(content_type) = part.content_type {
            body.extend_from_slice(format!("Content-Type: {content_type}\r\n").as_bytes());
        }
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(part.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub async fn post_multipart_auth(
    app: Router,
    uri: &str,
    parts: &[MultipartPart<'_>],
    token: &str,
) -> Response {
    let request = builder(Method::POST, uri, Some(token))
        .header(CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}"))
        .body(Body::from(multipart_body(parts)))
        .unwrap();
    send(app, request).await
}
