use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    middleware::{self, Next},
    response::Response,
    Router,
};
use serde::Serialize;
use std::{
    path::{Path, PathBuf},
    sync::atomic::{AtomicU64, Ordering},
    sync::Arc,
    time::{Duration, Instant, SystemTime, UNIX_EPOCH},
};
use tower_http::services::{ServeDir, ServeFile};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DIST_DIR: &str = "dist";
const DEFAULT_ASSET_MAX_AGE_SECONDS: u64 = 365 * 24 * 60 * 60;
const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;
const SHORT_LIVED_MAX_AGE_SECONDS: u64 = 60 * 60;

const PORT_BOUNDS: (u64, u64) = (1, 65_535);
const ASSET_MAX_AGE_SECONDS_BOUNDS: (u64, u64) = (0, 365 * 24 * 60 * 60);
const FINGERPRINT_MIN_HEX_LEN: usize = 8;
const REQUEST_ID_HEADER: &str = "x-request-id";

static REQUEST_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Access-log verbosity, ordered from chattiest to quietest.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
enum LogLevel {
    Debug,
    Info,
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
struct HostConfig {
    port: u16,
    dist_dir: PathBuf,
    asset_max_age_seconds: u64,
    log_level: LogLevel,
}

impl HostConfig {
    fn from_env() -> Self {
        let port = parse_env_u64_with_bounds("PORT", u64::from(DEFAULT_PORT), PORT_BOUNDS);
        let dist_dir = parse_env_non_empty_string("SITE_DIST_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DIST_DIR));
        let asset_max_age_seconds = parse_env_u64_with_bounds(
            "SITE_ASSET_MAX_AGE_SECONDS",
            DEFAULT_ASSET_MAX_AGE_SECONDS,
            ASSET_MAX_AGE_SECONDS_BOUNDS,
        );
        let log_level = parse_log_level("LOG_LEVEL", DEFAULT_LOG_LEVEL);

        Self {
            port: u16::try_from(port).unwrap_or(DEFAULT_PORT),
            dist_dir,
            asset_max_age_seconds,
            log_level,
        }
    }
}

#[derive(Clone)]
struct AppState {
    config: Arc<HostConfig>,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum CachePolicy {
    NoCache,
    Immutable,
    ShortLived,
}

impl CachePolicy {
    fn header_value(self, immutable_max_age: u64) -> HeaderValue {
        let value = match self {
            Self::NoCache => "no-cache".to_string(),
            Self::Immutable => format!("public, max-age={immutable_max_age}, immutable"),
            Self::ShortLived => format!("public, max-age={SHORT_LIVED_MAX_AGE_SECONDS}"),
        };

        HeaderValue::from_str(&value).unwrap_or_else(|_| HeaderValue::from_static("no-cache"))
    }
}

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = HostConfig::from_env();
    let bind_address = format!("0.0.0.0:{}", config.port);
    let index = config.dist_dir.join("index.html");

    if !index.is_file() {
        log_event(
            &config,
            LogLevel::Info,
            "bundle_missing",
            serde_json::json!({
                "path": index.display().to_string(),
                "hint": "run `trunk build --release` first",
            }),
        );
    }

    let state = AppState {
        config: Arc::new(config),
    };
    let app = router(state.clone());

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    log_event(
        &state.config,
        LogLevel::Info,
        "server_listening",
        serde_json::json!({
            "address": format!("http://127.0.0.1:{}", state.config.port),
            "distDir": state.config.dist_dir.display().to_string(),
        }),
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log_event(&state.config, LogLevel::Info, "server_stopped", serde_json::json!({}));
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

fn router(state: AppState) -> Router {
    let dist_dir = state.config.dist_dir.clone();
    let static_service =
        ServeDir::new(&dist_dir).not_found_service(ServeFile::new(dist_dir.join("index.html")));

    Router::new()
        .fallback_service(static_service)
        .layer(middleware::from_fn_with_state(state, annotate_response))
}

async fn annotate_response(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let started_at = Instant::now();
    let request_id = resolve_request_id(request.headers());
    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    let mut response = next.run(request).await;
    let status = response.status();

    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(ToString::to_string);
    let policy = cache_policy(&path, status, content_type.as_deref());

    let headers = response.headers_mut();
    headers.insert(
        header::CACHE_CONTROL,
        policy.header_value(state.config.asset_max_age_seconds),
    );
    if let Ok(request_id_header) = HeaderValue::from_str(&request_id) {
        headers.insert(REQUEST_ID_HEADER, request_id_header);
    }

    let level = if status.is_success() || status.is_redirection() {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };
    log_event(
        &state.config,
        level,
        "request_served",
        serde_json::json!({
            "requestId": request_id,
            "method": method,
            "path": path,
            "status": status.as_u16(),
            "durationMs": started_at.elapsed().as_millis() as u64,
        }),
    );

    response
}

fn cache_policy(path: &str, status: StatusCode, content_type: Option<&str>) -> CachePolicy {
    if !status.is_success() {
        return CachePolicy::NoCache;
    }

    let is_html = content_type
        .map(|value| value.starts_with("text/html"))
        .unwrap_or(false)
        || path.ends_with('/')
        || path.ends_with(".html");
    if is_html {
        return CachePolicy::NoCache;
    }

    if is_fingerprinted(path) {
        CachePolicy::Immutable
    } else {
        CachePolicy::ShortLived
    }
}

/// True for bundler output named `<stem>-<hex hash>[_bg].<ext>`.
fn is_fingerprinted(path: &str) -> bool {
    let Some(file_name) = Path::new(path).file_name().and_then(|name| name.to_str()) else {
        return false;
    };
    let Some((stem, _extension)) = file_name.split_once('.') else {
        return false;
    };
    let stem = stem.strip_suffix("_bg").unwrap_or(stem);
    let Some((_, hash)) = stem.rsplit_once('-') else {
        return false;
    };

    hash.len() >= FINGERPRINT_MIN_HEX_LEN && hash.chars().all(|c| c.is_ascii_hexdigit())
}

fn parse_env_u64_with_bounds(name: &str, default: u64, bounds: (u64, u64)) -> u64 {
    std::env::var(name)
        .ok()
        .and_then(|value| parse_u64_with_bounds(&value, bounds))
        .unwrap_or(default)
}

fn parse_u64_with_bounds(value: &str, bounds: (u64, u64)) -> Option<u64> {
    value
        .trim()
        .parse::<u64>()
        .ok()
        .filter(|value| (bounds.0..=bounds.1).contains(value))
}

fn parse_env_non_empty_string(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_log_level(name: &str, default: LogLevel) -> LogLevel {
    parse_env_non_empty_string(name)
        .and_then(|value| log_level_from_str(&value))
        .unwrap_or(default)
}

fn log_level_from_str(value: &str) -> Option<LogLevel> {
    match value.trim().to_ascii_lowercase().as_str() {
        "debug" => Some(LogLevel::Debug),
        "info" => Some(LogLevel::Info),
        _ => None,
    }
}

/// Time since the Unix epoch; a clock set before 1970 reads as zero.
fn since_epoch() -> Duration {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
}

fn generate_request_id() -> String {
    let counter = REQUEST_ID_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("req-{}-{counter}", since_epoch().as_millis())
}

fn resolve_request_id(headers: &HeaderMap) -> String {
    let value = headers
        .get(REQUEST_ID_HEADER)
        .and_then(|raw| raw.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(ToString::to_string);

    value.unwrap_or_else(generate_request_id)
}

#[derive(Serialize)]
struct LogRecord<'a> {
    ts: u64,
    level: &'static str,
    event: &'a str,
    #[serde(flatten)]
    fields: serde_json::Map<String, serde_json::Value>,
}

fn log_record(level: LogLevel, event: &str, fields: serde_json::Value) -> Option<String> {
    let fields = match fields {
        serde_json::Value::Object(map) => map,
        _ => serde_json::Map::new(),
    };

    serde_json::to_string(&LogRecord {
        ts: since_epoch().as_secs(),
        level: level.as_str(),
        event,
        fields,
    })
    .ok()
}

fn log_event(config: &HostConfig, level: LogLevel, event: &str, fields: serde_json::Value) {
    if level < config.log_level {
        return;
    }

    if let Some(line) = log_record(level, event, fields) {
        println!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use http_body_util::BodyExt;
    use std::fs;
    use tower::ServiceExt;

    const WASM_NAME: &str = "veil-portfolio-4f2a9c1be07d3e11_bg.wasm";

    fn test_config(dist_dir: &Path) -> HostConfig {
        HostConfig {
            port: DEFAULT_PORT,
            dist_dir: dist_dir.to_path_buf(),
            asset_max_age_seconds: DEFAULT_ASSET_MAX_AGE_SECONDS,
            log_level: DEFAULT_LOG_LEVEL,
        }
    }

    fn test_bundle() -> tempfile::TempDir {
        let dir = tempfile::tempdir().expect("temp dir");
        fs::write(dir.path().join("index.html"), "<!doctype html><div id=\"app\"></div>")
            .expect("write index");
        fs::write(dir.path().join(WASM_NAME), b"\0asm").expect("write wasm");
        fs::create_dir_all(dir.path().join("assets")).expect("assets dir");
        fs::write(dir.path().join("assets/logo.svg"), "<svg/>").expect("write logo");
        dir
    }

    fn test_router(dir: &Path) -> Router {
        router(AppState {
            config: Arc::new(test_config(dir)),
        })
    }

    async fn get(app: Router, uri: &str, request_id: Option<&str>) -> Response {
        let mut builder = axum::http::Request::builder().uri(uri);
        if let Some(request_id) = request_id {
            builder = builder.header(REQUEST_ID_HEADER, request_id);
        }

        app.oneshot(builder.body(Body::empty()).expect("request builds"))
            .await
            .expect("router is infallible")
    }

    fn header_str<'a>(response: &'a Response, name: &str) -> Option<&'a str> {
        response.headers().get(name).and_then(|value| value.to_str().ok())
    }

    #[tokio::test]
    async fn root_serves_index_without_caching() {
        let bundle = test_bundle();
        let response = get(test_router(bundle.path()), "/", None).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(header_str(&response, "cache-control"), Some("no-cache"));
        assert!(header_str(&response, REQUEST_ID_HEADER)
            .expect("request id set")
            .starts_with("req-"));

        let body = response
            .into_body()
            .collect()
            .await
            .expect("body reads")
            .to_bytes();
        assert!(String::from_utf8_lossy(&body).contains("id=\"app\""));
    }

    #[tokio::test]
    async fn fingerprinted_bundle_is_immutable() {
        let bundle = test_bundle();
        let response = get(test_router(bundle.path()), &format!("/{WASM_NAME}"), None).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            header_str(&response, "cache-control"),
            Some("public, max-age=31536000, immutable")
        );
    }

    #[tokio::test]
    async fn plain_assets_are_short_lived() {
        let bundle = test_bundle();
        let response = get(test_router(bundle.path()), "/assets/logo.svg", None).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(header_str(&response, "cache-control"), Some("public, max-age=3600"));
    }

    #[tokio::test]
    async fn unknown_path_falls_back_to_index_with_not_found() {
        let bundle = test_bundle();
        let response = get(test_router(bundle.path()), "/no/such/page", Some("req-upstream")).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(header_str(&response, "cache-control"), Some("no-cache"));
        assert_eq!(header_str(&response, REQUEST_ID_HEADER), Some("req-upstream"));

        let body = response
            .into_body()
            .collect()
            .await
            .expect("body reads")
            .to_bytes();
        assert!(String::from_utf8_lossy(&body).contains("id=\"app\""));
    }

    #[test]
    fn fingerprint_detection() {
        assert!(is_fingerprinted("/veil-portfolio-4f2a9c1be07d3e11.js"));
        assert!(is_fingerprinted("/veil-portfolio-4f2a9c1be07d3e11_bg.wasm"));
        assert!(is_fingerprinted("/styles-0123abcd.css"));
        assert!(!is_fingerprinted("/assets/logo.svg"));
        assert!(!is_fingerprinted("/assets/quiz-master.png"));
        assert!(!is_fingerprinted("/"));
    }

    #[test]
    fn error_responses_are_never_cached() {
        assert_eq!(
            cache_policy("/styles-0123abcd.css", StatusCode::NOT_FOUND, Some("text/css")),
            CachePolicy::NoCache
        );
        assert_eq!(
            cache_policy("/", StatusCode::OK, Some("text/html; charset=utf-8")),
            CachePolicy::NoCache
        );
    }

    #[test]
    fn bounded_parsing_rejects_out_of_range_values() {
        assert_eq!(parse_u64_with_bounds(" 8081 ", PORT_BOUNDS), Some(8081));
        assert_eq!(parse_u64_with_bounds("0", PORT_BOUNDS), None);
        assert_eq!(parse_u64_with_bounds("70000", PORT_BOUNDS), None);
        assert_eq!(parse_u64_with_bounds("soon", PORT_BOUNDS), None);
    }

    #[test]
    fn log_levels_order_and_parse() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert_eq!(log_level_from_str("DEBUG"), Some(LogLevel::Debug));
        assert_eq!(log_level_from_str("trace"), None);
    }

    #[test]
    fn log_record_flattens_fields() {
        let line = log_record(
            LogLevel::Info,
            "request_served",
            serde_json::json!({ "status": 404, "path": "/missing" }),
        )
        .expect("record serializes");
        let parsed: serde_json::Value = serde_json::from_str(&line).expect("valid json");

        assert_eq!(parsed["level"], "info");
        assert_eq!(parsed["event"], "request_served");
        assert_eq!(parsed["status"], 404);
        assert_eq!(parsed["path"], "/missing");
        assert!(parsed["ts"].is_u64());
    }

    #[test]
    fn incoming_request_id_is_reused() {
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static("  abc-123 "));
        assert_eq!(resolve_request_id(&headers), "abc-123");

        let generated = resolve_request_id(&HeaderMap::new());
        assert!(generated.starts_with("req-"));
    }
}
