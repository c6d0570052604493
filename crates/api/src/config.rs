use std::path::PathBuf;

use playhub_core::assets::{DEFAULT_MAX_ARCHIVE_BYTES, DEFAULT_MAX_THUMBNAIL_BYTES};

use crate::auth::jwt::JwtConfig;

/// Room left in the request body limit for multipart framing and headers.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable, multi-line output (default).
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

impl LogFormat {
    /// Parse a `LOG_FORMAT` value. Anything other than `json` selects [`LogFormat::Pretty`].
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Pretty
        }
    }

    /// Read `LOG_FORMAT` from the environment.
    pub fn from_env() -> Self {
        std::env::var("LOG_FORMAT")
            .map(|v| Self::parse(&v))
            .unwrap_or_default()
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Directory the local blob store writes game assets into.
    pub storage_root: PathBuf,
    /// URL prefix under which stored assets are publicly reachable.
    pub public_asset_prefix: String,
    /// Largest accepted game archive in bytes.
    pub max_archive_bytes: usize,
    /// Largest accepted thumbnail in bytes.
    pub max_thumbnail_bytes: usize,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `STORAGE_ROOT`         | `storage/games`            |
    /// | `PUBLIC_ASSET_PREFIX`  | `/games`                   |
    /// | `MAX_ARCHIVE_BYTES`    | `10485760` (10 MiB)        |
    /// | `MAX_THUMBNAIL_BYTES`  | `2097152` (2 MiB)          |
    ///
    /// # Panics
    ///
    /// Panics on unparseable numeric values or a missing `JWT_SECRET`, so
    /// misconfiguration fails at startup.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = parse_origins(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let storage_root = PathBuf::from(
            std::env::var("STORAGE_ROOT").unwrap_or_else(|_| "storage/games".into()),
        );

        let public_asset_prefix =
            std::env::var("PUBLIC_ASSET_PREFIX").unwrap_or_else(|_| "/games".into());

        let max_archive_bytes: usize = std::env::var("MAX_ARCHIVE_BYTES")
            .unwrap_or_else(|_| DEFAULT_MAX_ARCHIVE_BYTES.to_string())
            .parse()
            .expect("MAX_ARCHIVE_BYTES must be a valid usize");

        let max_thumbnail_bytes: usize = std::env::var("MAX_THUMBNAIL_BYTES")
            .unwrap_or_else(|_| DEFAULT_MAX_THUMBNAIL_BYTES.to_string())
            .parse()
            .expect("MAX_THUMBNAIL_BYTES must be a valid usize");

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            storage_root,
            public_asset_prefix,
            max_archive_bytes,
            max_thumbnail_bytes,
            jwt,
        }
    }

    /// Body limit for the upload route: both assets plus multipart framing.
    pub fn upload_body_limit(&self) -> usize {
        self.max_archive_bytes
            .saturating_add(self.max_thumbnail_bytes)
            .saturating_add(MULTIPART_OVERHEAD_BYTES)
    }
}

/// Split a comma-separated origin list, dropping blanks.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
