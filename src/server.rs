use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue},
    middleware::{self, Next},
    response::Response,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::{
    cmp::Ordering,
    path::PathBuf,
    sync::atomic::{AtomicU64, Ordering as AtomicOrdering},
    sync::Arc,
    time::{Instant, SystemTime, UNIX_EPOCH},
};
use thiserror::Error;
use tower_http::services::{ServeDir, ServeFile};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_SITE_DIR: &str = "dist";
const DEFAULT_STATIC_CACHE_SECONDS: u64 = 3_600;
const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

const PORT_BOUNDS: (u64, u64) = (1, 65_535);
const STATIC_CACHE_SECONDS_BOUNDS: (u64, u64) = (0, 365 * 24 * 60 * 60);
const REQUEST_ID_HEADER: &str = "x-request-id";

static REQUEST_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("site directory {0} does not exist; run `trunk build --release` first")]
    MissingSiteDir(PathBuf),
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        source: std::io::Error,
    },
    #[error("server stopped: {0}")]
    Serve(#[from] std::io::Error),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LogLevel {
    Debug,
    Info,
}

impl PartialOrd for LogLevel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LogLevel {
    fn cmp(&self, other: &Self) -> Ordering {
        fn rank(level: LogLevel) -> u8 {
            match level {
                LogLevel::Debug => 0,
                LogLevel::Info => 1,
            }
        }

        rank(*self).cmp(&rank(*other))
    }
}

impl LogLevel {
    fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
        }
    }
}

#[derive(Clone, Debug)]
pub struct HostConfig {
    port: u16,
    site_dir: PathBuf,
    static_cache_seconds: u64,
    log_level: LogLevel,
}

impl HostConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = parse_u64_with_bounds(lookup("PORT"), u64::from(DEFAULT_PORT), PORT_BOUNDS);
        let static_cache_seconds = parse_u64_with_bounds(
            lookup("STATIC_CACHE_SECONDS"),
            DEFAULT_STATIC_CACHE_SECONDS,
            STATIC_CACHE_SECONDS_BOUNDS,
        );
        let site_dir = non_empty(lookup("SITE_DIR"))
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SITE_DIR));
        let log_level = parse_log_level(lookup("LOG_LEVEL"), DEFAULT_LOG_LEVEL);

        Self {
            port: u16::try_from(port).unwrap_or(DEFAULT_PORT),
            site_dir,
            static_cache_seconds,
            log_level,
        }
    }
}

#[derive(Clone)]
struct AppState {
    config: Arc<HostConfig>,
}

#[derive(Serialize)]
struct HealthPayload {
    ok: bool,
    version: &'static str,
}

pub async fn run() -> Result<(), ServerError> {
    let config = HostConfig::from_env();
    if !config.site_dir.is_dir() {
        return Err(ServerError::MissingSiteDir(config.site_dir));
    }

    let address = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .map_err(|source| ServerError::Bind {
            address: address.clone(),
            source,
        })?;

    log_event(
        &config,
        LogLevel::Info,
        "listening",
        serde_json::json!({
            "address": address,
            "url": format!("http://127.0.0.1:{}", config.port),
            "site_dir": config.site_dir.display().to_string(),
        }),
    );

    axum::serve(listener, router(config)).await?;
    Ok(())
}

/// Health check plus the built site, with unknown paths falling back to the
/// single page.
pub fn router(config: HostConfig) -> Router {
    let index = config.site_dir.join("index.html");
    let static_service = ServeDir::new(&config.site_dir).not_found_service(ServeFile::new(index));
    let state = AppState {
        config: Arc::new(config),
    };

    Router::new()
        .route("/healthz", get(health))
        .fallback_service(static_service)
        .layer(middleware::from_fn_with_state(state, track_request))
}

async fn health() -> Json<HealthPayload> {
    Json(HealthPayload {
        ok: true,
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn track_request(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let request_id = resolve_request_id(request.headers());
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let mut response = next.run(request).await;
    let status = response.status();
    let headers = response.headers_mut();

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        headers.insert(REQUEST_ID_HEADER, value);
    }
    if !headers.contains_key(header::CACHE_CONTROL) {
        let content_type = headers
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok());
        let policy = cache_control_for(&path, content_type, state.config.static_cache_seconds);
        headers.insert(header::CACHE_CONTROL, policy);
    }

    let level = if path == "/healthz" {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };
    let duration_ms = started.elapsed().as_millis() as u64;
    log_event(
        &state.config,
        level,
        "request",
        request_fields(&request_id, &method, &path, status.as_u16(), duration_ms),
    );

    response
}

fn request_fields(
    request_id: &str,
    method: &str,
    path: &str,
    status: u16,
    duration_ms: u64,
) -> serde_json::Value {
    serde_json::json!({
        "request_id": request_id,
        "method": method,
        "path": path,
        "status": status,
        "duration_ms": duration_ms,
    })
}

/// Hashed build assets can be cached; the page itself and the health check
/// must be revalidated. An asset path answered with the HTML fallback is the
/// page, not the asset.
fn cache_control_for(
    path: &str,
    content_type: Option<&str>,
    static_cache_seconds: u64,
) -> HeaderValue {
    if path == "/healthz" {
        return HeaderValue::from_static("no-store");
    }

    let last_segment = path.rsplit('/').next().unwrap_or_default();
    let is_html = content_type.is_some_and(|value| value.starts_with("text/html"));
    let is_asset = last_segment.contains('.') && !last_segment.ends_with(".html") && !is_html;
    if !is_asset || static_cache_seconds == 0 {
        return HeaderValue::from_static("no-cache");
    }

    HeaderValue::from_str(&format!("public, max-age={static_cache_seconds}"))
        .unwrap_or_else(|_| HeaderValue::from_static("no-cache"))
}

fn parse_u64_with_bounds(value: Option<String>, default: u64, bounds: (u64, u64)) -> u64 {
    value
        .and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_log_level(value: Option<String>, default: LogLevel) -> LogLevel {
    match non_empty(value)
        .unwrap_or_else(|| default.as_str().to_string())
        .to_ascii_lowercase()
        .as_str()
    {
        "debug" => LogLevel::Debug,
        "info" => LogLevel::Info,
        _ => default,
    }
}

fn now_unix_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|value| value.as_millis())
        .unwrap_or(0)
}

fn now_unix_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|value| value.as_secs())
        .unwrap_or(0)
}

fn generate_request_id() -> String {
    let counter = REQUEST_ID_COUNTER.fetch_add(1, AtomicOrdering::Relaxed);
    format!("req-{}-{counter}", now_unix_millis())
}

fn resolve_request_id(headers: &HeaderMap) -> String {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|raw| raw.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(ToString::to_string)
        .unwrap_or_else(generate_request_id)
}

fn log_event(config: &HostConfig, level: LogLevel, event: &str, fields: serde_json::Value) {
    if level < config.log_level {
        return;
    }

    let mut payload = serde_json::Map::new();
    payload.insert(
        "ts".to_string(),
        serde_json::Value::Number(serde_json::Number::from(now_unix_seconds())),
    );
    payload.insert("level".to_string(), serde_json::Value::String(level.as_str().to_string()));
    payload.insert("event".to_string(), serde_json::Value::String(event.to_string()));

    if let serde_json::Value::Object(extra) = fields {
        for (key, value) in extra {
            payload.insert(key, value);
        }
    }

    println!("{}", serde_json::Value::Object(payload));
}
