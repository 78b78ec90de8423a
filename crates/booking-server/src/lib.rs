//! Server assembly for the appointment booking API.
//!
//! Configuration loading and the HTTP middleware stack live here so the binary
//! stays a thin shell and both can be exercised from tests.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::Router;
use booking_store_sqlite::SqliteStore;
use serde::Deserialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration.
///
/// Layered from built-in defaults, an optional TOML file and `BOOKING_*`
/// environment variables, later sources winning.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ServerConfig {
  pub host:            String,
  pub port:            u16,
  pub store_path:      PathBuf,
  /// Allow cross-origin requests from any origin.
  pub cors_permissive: bool,
}

impl ServerConfig {
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

/// Load [`ServerConfig`] from `file` (if present) and the environment.
pub fn load_config(file: &Path) -> Result<ServerConfig, config::ConfigError> {
  config::Config::builder()
    .set_default("host", "127.0.0.1")?
    .set_default("port", 5000_i64)?
    .set_default("store_path", "appointments.db")?
    .set_default("cors_permissive", true)?
    .add_source(config::File::from(file.to_path_buf()).required(false))
    .add_source(config::Environment::with_prefix("BOOKING"))
    .build()?
    .try_deserialize()
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Application ──────────────────────────────────────────────────────────────

/// Build the full application: API routes plus request tracing and CORS.
pub fn app(store: SqliteStore, cfg: &ServerConfig) -> Router {
  let router =
    booking_api::api_router(Arc::new(store)).layer(TraceLayer::new_for_http());
  if cfg.cors_permissive {
    router.layer(CorsLayer::permissive())
  } else {
    router
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use tower::ServiceExt as _;

  fn cfg(cors_permissive: bool) -> ServerConfig {
    ServerConfig {
      host: "127.0.0.1".to_string(),
      port: 5000,
      store_path: PathBuf::from(":memory:"),
      cors_permissive,
    }
  }

  // ── Configuration ───────────────────────────────────────────────────────────

  #[test]
  fn defaults_apply_without_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let loaded = load_config(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(loaded.port, 5000);
    assert_eq!(loaded.store_path, PathBuf::from("appointments.db"));
    assert!(loaded.cors_permissive);
  }

  #[test]
  fn file_overrides_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "port = 8080\nstore_path = \"/var/lib/booking.db\"\n")
      .unwrap();

    let loaded = load_config(&path).unwrap();
    assert_eq!(loaded.port, 8080);
    assert_eq!(loaded.store_path, PathBuf::from("/var/lib/booking.db"));
    assert_eq!(loaded.address(), "127.0.0.1:8080");
  }

  #[test]
  fn tilde_is_expanded_only_at_the_start() {
    let home = std::env::var("HOME").unwrap_or_default();
    if !home.is_empty() {
      assert_eq!(
        expand_tilde(Path::new("~/booking.db")),
        PathBuf::from(&home).join("booking.db")
      );
    }
    assert_eq!(expand_tilde(Path::new("a/~/b")), PathBuf::from("a/~/b"));
  }

  // ── Middleware ──────────────────────────────────────────────────────────────

  async fn health_with_origin(cors_permissive: bool) -> axum::response::Response {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let req = Request::builder()
      .uri("/health")
      .header(header::ORIGIN, "http://example.com")
      .body(Body::empty())
      .unwrap();
    app(store, &cfg(cors_permissive)).oneshot(req).await.unwrap()
  }

  #[tokio::test]
  async fn permissive_cors_allows_any_origin() {
    let resp = health_with_origin(true).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
      resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
      "*"
    );
  }

  #[tokio::test]
  async fn cors_can_be_disabled() {
    let resp = health_with_origin(false).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
  }
}
